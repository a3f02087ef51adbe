//! Side-by-side financing scenarios for one property
//!
//! Each scenario tweaks the base calculator inputs (down payment, rate, PMI)
//! and recomputes payment and cash flow through `calc_finance`.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::finance::{calc_finance, FinanceInputs};
use crate::units::{Fraction, Money};

/// Rate reduction in the first year of a 3-2-1 buydown
pub const BUYDOWN_YEAR_ONE_REDUCTION: Fraction = Fraction::new(0.03);

/// A named change to the base financing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    /// Replace the down payment share
    #[serde(default)]
    pub down_payment_percent: Option<Fraction>,
    /// Subtracted from the base rate, floored at zero
    #[serde(default)]
    pub rate_reduction: Fraction,
    /// Replace the PMI flag
    #[serde(default)]
    pub include_pmi: Option<bool>,
}

impl ScenarioSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            down_payment_percent: None,
            rate_reduction: Fraction::ZERO,
            include_pmi: None,
        }
    }

    /// Calculator inputs for this scenario
    pub fn apply(&self, base: &FinanceInputs) -> FinanceInputs {
        let rate = (base.interest_rate.value() - self.rate_reduction.value()).max(0.0);
        FinanceInputs {
            interest_rate: Fraction::new(rate),
            down_payment_percent: self.down_payment_percent.unwrap_or(base.down_payment_percent),
            include_pmi: self.include_pmi.unwrap_or(base.include_pmi),
            ..base.clone()
        }
    }
}

/// Payment and cash flow under one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub interest_rate: Fraction,
    pub down_payment_percent: Fraction,
    pub pmi_monthly: Money,
    pub piti: Money,
    pub cash_flow: Money,
}

/// "10% + PMI", "20% down" and "3-2-1 Buydown (Yr1)"
pub fn standard_scenarios() -> Vec<ScenarioSpec> {
    vec![
        ScenarioSpec {
            down_payment_percent: Some(Fraction::new(0.10)),
            include_pmi: Some(true),
            ..ScenarioSpec::new("10% + PMI")
        },
        ScenarioSpec {
            down_payment_percent: Some(Fraction::new(0.20)),
            ..ScenarioSpec::new("20% down")
        },
        ScenarioSpec {
            rate_reduction: BUYDOWN_YEAR_ONE_REDUCTION,
            ..ScenarioSpec::new("3-2-1 Buydown (Yr1)")
        },
    ]
}

/// Runs scenarios against a fixed set of base inputs
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(inputs);
/// let outcomes = runner.run_scenarios(&standard_scenarios())?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_inputs: FinanceInputs,
}

impl ScenarioRunner {
    pub fn new(base_inputs: FinanceInputs) -> Self {
        Self { base_inputs }
    }

    /// Run a single scenario
    pub fn run(&self, spec: &ScenarioSpec) -> Result<ScenarioOutcome> {
        let inputs = spec.apply(&self.base_inputs);
        let result = calc_finance(&inputs)?;
        Ok(ScenarioOutcome {
            name: spec.name.clone(),
            interest_rate: inputs.interest_rate,
            down_payment_percent: inputs.down_payment_percent,
            pmi_monthly: result.pmi_monthly,
            piti: result.piti,
            cash_flow: result.cash_flow,
        })
    }

    /// Run multiple scenarios, in order
    pub fn run_scenarios(&self, specs: &[ScenarioSpec]) -> Result<Vec<ScenarioOutcome>> {
        specs.iter().map(|spec| self.run(spec)).collect()
    }

    /// Get reference to base inputs for inspection
    pub fn base_inputs(&self) -> &FinanceInputs {
        &self.base_inputs
    }
}
