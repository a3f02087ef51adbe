//! Rental Analysis CLI
//!
//! Command-line interface for analyzing a single property or a saved portfolio

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use rental_analysis::assumptions::loader::DEFAULT_ASSUMPTIONS_PATH;
use rental_analysis::portfolio::{analyze_portfolio, PortfolioSummary};
use rental_analysis::property::{load_portfolio, loader::DEFAULT_PORTFOLIO_PATH};
use rental_analysis::{analyze, AnalysisRequest, Assumptions, Percent, PropertyAnalysis, PropertyFacts};

#[derive(Parser, Debug)]
#[command(name = "rental_analysis", version)]
#[command(about = "Cash flow, affordability and 30-year projections for rental properties")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Assumption overrides (name,value CSV). Defaults to data/assumptions.csv when present.
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a single property
    Analyze(AnalyzeArgs),

    /// Analyze every property in a saved portfolio CSV
    Portfolio {
        /// Portfolio file
        #[arg(default_value = DEFAULT_PORTFOLIO_PATH)]
        csv: PathBuf,

        /// Print rows and summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Rates are given in percent (6.5 = 6.5%)
#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[arg(long)]
    address: String,

    /// Home value or purchase price
    #[arg(long)]
    value: f64,

    /// Annual property tax
    #[arg(long)]
    tax: f64,

    /// Monthly HOA dues
    #[arg(long, default_value_t = 0.0)]
    hoa: f64,

    /// Annual insurance premium
    #[arg(long)]
    insurance: f64,

    /// Estimated monthly rent
    #[arg(long)]
    rent: f64,

    /// Monthly rent to use instead of the estimate
    #[arg(long)]
    custom_rent: Option<f64>,

    /// Gross annual household income
    #[arg(long, default_value_t = 120_000.0)]
    income: f64,

    /// Other monthly debt payments
    #[arg(long, default_value_t = 0.0)]
    other_debt: f64,

    /// Interest rate, percent
    #[arg(long)]
    rate: Option<f64>,

    /// Down payment, percent of value
    #[arg(long)]
    down: Option<f64>,

    /// Loan term in years
    #[arg(long)]
    term: Option<u32>,

    /// Vacancy, percent of rent
    #[arg(long)]
    vacancy: Option<f64>,

    /// Maintenance, percent of rent
    #[arg(long)]
    maintenance: Option<f64>,

    /// Management, percent of rent
    #[arg(long)]
    management: Option<f64>,

    /// Leave PMI out of the payment
    #[arg(long)]
    no_pmi: bool,

    /// Print the full analysis as JSON
    #[arg(long)]
    json: bool,
}

impl AnalyzeArgs {
    fn into_request(self, mut assumptions: Assumptions) -> AnalysisRequest {
        let percent = |v: f64| Percent::new(v).to_fraction();

        let financing = &mut assumptions.financing;
        if let Some(rate) = self.rate {
            financing.interest_rate = percent(rate);
        }
        if let Some(down) = self.down {
            financing.down_payment_percent = percent(down);
        }
        if let Some(term) = self.term {
            financing.loan_term_years = term;
        }
        if self.no_pmi {
            financing.include_pmi = false;
        }

        let operating = &mut assumptions.operating;
        if let Some(vacancy) = self.vacancy {
            operating.vacancy_rate = percent(vacancy);
        }
        if let Some(maintenance) = self.maintenance {
            operating.maintenance_rate = percent(maintenance);
        }
        if let Some(management) = self.management {
            operating.management_rate = percent(management);
        }

        AnalysisRequest {
            property: PropertyFacts {
                address: self.address,
                home_value: self.value,
                tax_annual: self.tax,
                hoa_monthly: self.hoa,
                insurance_annual: self.insurance,
                rent_estimate: self.rent,
                beds: None,
                baths: None,
                sqft: None,
            },
            assumptions,
            income_annual: self.income,
            other_debt_monthly: self.other_debt,
            custom_rent: self.custom_rent,
            comps: Vec::new(),
            selected_comp_ids: Vec::new(),
        }
    }
}

fn load_assumptions(path: Option<&Path>) -> Result<Assumptions> {
    match path {
        Some(path) => Assumptions::from_csv_path(path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display())),
        None if Path::new(DEFAULT_ASSUMPTIONS_PATH).exists() => {
            Assumptions::from_csv().context("Failed to load data/assumptions.csv")
        }
        None => Ok(Assumptions::default_underwriting()),
    }
}

fn print_analysis(analysis: &PropertyAnalysis) {
    let finance = &analysis.finance;
    println!("{}", analysis.address);
    println!("{}\n", "=".repeat(analysis.address.len()));

    println!("Rent used: ${:.0} ({:?})", analysis.rent, analysis.rent_source);
    println!("  Loan:              ${:>12.2}", finance.loan);
    println!("  P&I:               ${:>12.2}", finance.pi);
    println!("  PMI:               ${:>12.2}", finance.pmi_monthly);
    println!("  PITI:              ${:>12.2}", finance.piti);
    println!("  Break-even rent:   ${:>12.2}", finance.rent_break_even);
    println!("  Operating costs:   ${:>12.2}", finance.operating_expenses);
    println!("  Cash flow:         ${:>12.2}", finance.cash_flow);
    println!("  NOI:               ${:>12.2}", finance.noi);
    println!("  Cap rate:           {:>12}", finance.cap_rate.to_string());
    println!("  Cash invested:     ${:>12.2}", finance.cash_invested);
    println!("  Cash-on-cash:       {:>12}", finance.coc.to_string());

    println!("\nMonthly expenses:");
    for (label, amount) in analysis.expenses.items() {
        println!("  {:<18} ${:>12.2}", label, amount);
    }

    let affordability = &analysis.affordability;
    println!("\nAffordability:");
    println!("  Monthly income:    ${:>12.2}", affordability.income_monthly);
    println!("  Max PITI by DTI:   ${:>12.2}", affordability.max_piti_by_dti);
    println!(
        "  Headroom:          ${:>12.2} ({})",
        affordability.headroom,
        if affordability.fits_budget() { "within budget" } else { "over budget" }
    );

    println!("\nScenarios:");
    println!("{:<22} {:>8} {:>8} {:>10} {:>10} {:>10}", "Name", "Rate", "Down", "PMI", "PITI", "CashFlow");
    println!("{}", "-".repeat(73));
    for s in &analysis.scenarios {
        println!(
            "{:<22} {:>8} {:>8} {:>10.2} {:>10.2} {:>10.2}",
            s.name,
            s.interest_rate.to_string(),
            s.down_payment_percent.to_string(),
            s.pmi_monthly,
            s.piti,
            s.cash_flow
        );
    }

    println!("\nProjection milestones:");
    match &analysis.metrics {
        Some(metrics) => {
            for m in metrics.milestones() {
                println!(
                    "  Year {:>2}: value=${:.0} equity=${:.0} cash_flow=${:.0} return=${:.0} ROI={}",
                    m.year, m.home_value, m.equity, m.total_cash_flow, m.total_return, m.roi
                );
            }
        }
        None => println!("  ROI not available without a down payment"),
    }
    let summary = &analysis.projection_summary;
    println!(
        "  After {} years: value=${:.0} equity=${:.0} cash_flow=${:.0} return=${:.0}",
        summary.total_years,
        summary.final_home_value,
        summary.final_equity,
        summary.total_cash_flow,
        summary.final_total_return
    );
    match summary.payoff_year {
        Some(year) => println!("  Loan paid off in year {}", year),
        None => println!("  Loan still outstanding at end of projection"),
    }
    if let Some(irr) = analysis.irr {
        println!("  30-year IRR: {}", irr);
    }
}

fn run_portfolio(csv: &Path, assumptions: &Assumptions, json: bool) -> Result<()> {
    let properties = load_portfolio(csv)
        .with_context(|| format!("Failed to load portfolio from {}", csv.display()))?;
    let rows = analyze_portfolio(&properties, assumptions)?;
    let summary = PortfolioSummary::from_rows(&rows);

    if json {
        let output = serde_json::json!({ "properties": rows, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{:<40} {:>12} {:>10} {:>10} {:>8}", "Address", "Value", "PITI", "CashFlow", "Cap");
    println!("{}", "-".repeat(84));
    for row in &rows {
        println!(
            "{:<40} {:>12.0} {:>10.2} {:>10.2} {:>8}",
            row.address,
            row.home_value,
            row.finance.piti,
            row.finance.cash_flow,
            row.finance.cap_rate.to_string()
        );
    }

    println!("\nSummary:");
    println!("  Properties:        {}", summary.property_count);
    println!("  Total value:       ${:.2}", summary.total_value);
    println!("  Monthly cash flow: ${:.2}", summary.total_monthly_cash_flow);
    println!("  Average cap rate:  {}", summary.average_cap_rate);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let assumptions = load_assumptions(cli.assumptions.as_deref())?;

    match cli.command {
        Commands::Analyze(args) => {
            let json = args.json;
            let request = args.into_request(assumptions);
            let analysis = analyze(&request).context("Analysis failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis);
            }
        }
        Commands::Portfolio { csv, json } => run_portfolio(&csv, &assumptions, json)?,
    }

    Ok(())
}
