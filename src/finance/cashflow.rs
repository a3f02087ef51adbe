//! Monthly mortgage, cash flow and return metrics for a rental property

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::amortization::{amortized_pi, validate_terms};
use crate::error::{ensure_finite, ensure_non_negative, ensure_unit_interval, AnalysisError, Result};
use crate::units::{Fraction, Money};

/// Annual PMI premium as a share of the loan.
/// Flat approximation; real underwriting varies with LTV and credit profile.
pub const PMI_ANNUAL_RATE: f64 = 0.005;

/// Down payments below this share of the price carry PMI
pub const PMI_DOWN_PAYMENT_THRESHOLD: f64 = 0.20;

/// Closing costs as a share of the price when none is given
pub const DEFAULT_CLOSING_COST_RATE: Fraction = Fraction::new(0.03);

fn default_closing_cost_rate() -> Fraction {
    DEFAULT_CLOSING_COST_RATE
}

/// Inputs for a single property calculation. All rates are fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceInputs {
    /// Purchase price / current value
    pub home_value: Money,
    pub tax_annual: Money,
    pub hoa_monthly: Money,
    pub insurance_annual: Money,

    /// Annual nominal interest rate
    pub interest_rate: Fraction,
    pub loan_term_years: u32,

    /// Share of the price paid up front, in [0, 1)
    pub down_payment_percent: Fraction,

    /// Expected monthly rent
    pub rent_estimate: Money,

    // Operating expenses, each a share of rent
    pub vacancy_rate: Fraction,
    pub maintenance_rate: Fraction,
    pub management_rate: Fraction,

    #[serde(default = "default_closing_cost_rate")]
    pub closing_cost_rate: Fraction,

    /// Charge PMI when the down payment is under 20%
    #[serde(default)]
    pub include_pmi: bool,
}

impl FinanceInputs {
    /// Range checks applied before any calculation
    pub fn validate(&self) -> Result<()> {
        ensure_finite("home_value", self.home_value)?;
        if self.home_value <= 0.0 {
            return Err(AnalysisError::invalid("home_value", "must be positive"));
        }
        ensure_non_negative("tax_annual", self.tax_annual)?;
        ensure_non_negative("hoa_monthly", self.hoa_monthly)?;
        ensure_non_negative("insurance_annual", self.insurance_annual)?;
        ensure_non_negative("rent_estimate", self.rent_estimate)?;

        validate_terms(self.interest_rate, self.loan_term_years)?;

        let down = self.down_payment_percent.value();
        ensure_finite("down_payment_percent", down)?;
        if !(0.0..1.0).contains(&down) {
            return Err(AnalysisError::invalid(
                "down_payment_percent",
                format!("must be in [0, 1), got {}", down),
            ));
        }

        ensure_unit_interval("vacancy_rate", self.vacancy_rate.value())?;
        ensure_unit_interval("maintenance_rate", self.maintenance_rate.value())?;
        ensure_unit_interval("management_rate", self.management_rate.value())?;
        let total = self.total_expense_rate().value();
        if total >= 1.0 {
            return Err(AnalysisError::invalid(
                "operating_expense_rate",
                format!("vacancy + maintenance + management must be below 1, got {}", total),
            ));
        }

        ensure_non_negative("closing_cost_rate", self.closing_cost_rate.value())?;
        Ok(())
    }

    /// Vacancy + maintenance + management
    pub fn total_expense_rate(&self) -> Fraction {
        self.vacancy_rate + self.maintenance_rate + self.management_rate
    }

    pub fn loan_amount(&self) -> Money {
        self.home_value * (1.0 - self.down_payment_percent.value())
    }

    pub fn down_payment_amount(&self) -> Money {
        self.home_value * self.down_payment_percent.value()
    }

    pub fn pmi_applies(&self) -> bool {
        self.include_pmi && self.down_payment_percent.value() < PMI_DOWN_PAYMENT_THRESHOLD
    }

    /// Taxes, insurance and HOA per month (no debt service)
    pub fn monthly_carrying_costs(&self) -> Money {
        self.tax_annual / 12.0 + self.insurance_annual / 12.0 + self.hoa_monthly
    }
}

/// Monthly snapshot of payment, cash flow and returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceResult {
    pub loan: Money,
    /// Monthly principal + interest
    pub pi: Money,
    pub pmi_monthly: Money,
    /// Principal, interest, taxes, insurance, HOA and PMI
    pub piti: Money,
    /// Rent needed for zero cash flow
    pub rent_break_even: Money,
    /// Vacancy, maintenance and management per month
    pub operating_expenses: Money,
    /// Monthly cash flow after PITI and operating expenses; may be negative
    pub cash_flow: Money,
    /// Monthly net operating income, excludes debt service
    pub noi: Money,
    pub cap_rate: Fraction,
    pub cash_invested: Money,
    /// Cash-on-cash return. Meaningless when cash_invested is ~0.
    pub coc: Fraction,
}

/// rent - PITI - rent * expense rate
pub fn monthly_cash_flow(rent: Money, piti: Money, total_expense_rate: Fraction) -> Money {
    rent - (piti + rent * total_expense_rate.value())
}

/// Compute the full monthly finance snapshot for a property
pub fn calc_finance(inputs: &FinanceInputs) -> Result<FinanceResult> {
    inputs.validate()?;

    let loan = inputs.loan_amount();
    let pi = amortized_pi(loan, inputs.interest_rate, inputs.loan_term_years)?;

    let pmi_monthly = if inputs.pmi_applies() {
        loan * PMI_ANNUAL_RATE / 12.0
    } else {
        0.0
    };

    let carrying = inputs.monthly_carrying_costs();
    let piti = pi + carrying + pmi_monthly;

    let expense_rate = inputs.total_expense_rate();
    let rent_break_even = piti / (1.0 - expense_rate.value());

    let rent = inputs.rent_estimate;
    let operating_expenses = rent * expense_rate.value();
    let cash_flow = monthly_cash_flow(rent, piti, expense_rate);

    let noi = rent - operating_expenses - carrying;
    let cap_rate = Fraction::new(noi * 12.0 / inputs.home_value);

    let cash_invested =
        inputs.down_payment_amount() + inputs.closing_cost_rate.value() * inputs.home_value;
    if cash_invested < 1.0 {
        warn!(
            "cash invested is {:.2}; cash-on-cash return is not meaningful",
            cash_invested
        );
    }
    let coc = Fraction::new(cash_flow * 12.0 / cash_invested.max(1.0));

    debug!(
        "finance: loan={:.2} pi={:.2} piti={:.2} cash_flow={:.2} cap_rate={:.4}",
        loan,
        pi,
        piti,
        cash_flow,
        cap_rate.value()
    );

    Ok(FinanceResult {
        loan,
        pi,
        pmi_monthly,
        piti,
        rent_break_even,
        operating_expenses,
        cash_flow,
        noi,
        cap_rate,
        cash_invested,
        coc,
    })
}
