//! Full analysis of one property: cash flow, affordability, scenarios and projection

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::{AnalysisError, Result};
use crate::finance::{
    calc_affordability, calc_finance, AffordabilityResult, ExpenseBreakdown, FinanceResult,
};
use crate::projection::{
    calculate_investment_irr, calculate_projection_metrics, ProjectionEngine, ProjectionInputs,
    ProjectionMetrics, ProjectionSummary, YearlyProjection,
};
use crate::property::{select_rent, PropertyFacts, RentComp, RentSource};
use crate::scenario::{standard_scenarios, ScenarioOutcome, ScenarioRunner};
use crate::units::{Fraction, Money};

/// Everything needed to analyze one property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub property: PropertyFacts,

    #[serde(default)]
    pub assumptions: Assumptions,

    /// Gross household income
    pub income_annual: Money,

    #[serde(default)]
    pub other_debt_monthly: Money,

    /// Overrides the provider's rent estimate
    #[serde(default)]
    pub custom_rent: Option<Money>,

    #[serde(default)]
    pub comps: Vec<RentComp>,

    /// Comparables whose average rent should be used
    #[serde(default)]
    pub selected_comp_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyAnalysis {
    pub address: String,
    /// Monthly rent the analysis was run with
    pub rent: Money,
    pub rent_source: RentSource,
    pub finance: FinanceResult,
    pub affordability: AffordabilityResult,
    pub expenses: ExpenseBreakdown,
    pub scenarios: Vec<ScenarioOutcome>,
    pub projection: Vec<YearlyProjection>,
    /// Final-year position and loan payoff year
    pub projection_summary: ProjectionSummary,
    /// Absent when there is no down payment to measure ROI against
    pub metrics: Option<ProjectionMetrics>,
    pub irr: Option<Fraction>,
}

/// Run the complete analysis for a request
pub fn analyze(request: &AnalysisRequest) -> Result<PropertyAnalysis> {
    let assumptions = &request.assumptions;
    let (rent, rent_source) = select_rent(
        &request.property,
        request.custom_rent,
        &request.comps,
        &request.selected_comp_ids,
    );

    let inputs = assumptions.finance_inputs(&request.property, rent);
    let finance = calc_finance(&inputs)?;

    let affordability = calc_affordability(&assumptions.affordability_inputs(
        request.income_annual,
        request.other_debt_monthly,
        finance.piti,
    ))?;

    let expenses = ExpenseBreakdown::from_finance(&inputs, &finance, rent);
    let scenarios = ScenarioRunner::new(inputs.clone()).run_scenarios(&standard_scenarios())?;

    let projection_inputs = ProjectionInputs::from_finance(&inputs, &finance).with_growth(
        assumptions.growth.appreciation_rate,
        assumptions.growth.rent_growth_rate,
    );
    let projection_result = ProjectionEngine::default().project(&projection_inputs)?;
    let projection_summary = projection_result.summary();
    let projection = projection_result.years;

    let initial_investment = projection_inputs.down_payment;
    let metrics = match calculate_projection_metrics(&projection, initial_investment) {
        Ok(metrics) => Some(metrics),
        Err(AnalysisError::UndefinedRoi { .. }) => {
            warn!(
                "{}: no down payment, skipping ROI milestones",
                request.property.address
            );
            None
        }
        Err(e) => return Err(e),
    };
    let irr = if initial_investment > 0.0 {
        calculate_investment_irr(&projection, initial_investment)
    } else {
        None
    };

    info!(
        "analyzed {}: rent={:.0} ({:?}) piti={:.2} cash_flow={:.2} cap_rate={}",
        request.property.address, rent, rent_source, finance.piti, finance.cash_flow, finance.cap_rate
    );

    Ok(PropertyAnalysis {
        address: request.property.address.clone(),
        rent,
        rent_source,
        finance,
        affordability,
        expenses,
        scenarios,
        projection,
        projection_summary,
        metrics,
        irr,
    })
}
