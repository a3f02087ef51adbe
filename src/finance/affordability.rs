//! Debt-to-income bounded housing payment

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_unit_interval, Result};
use crate::units::{Fraction, Money};

pub const DEFAULT_FRONT_END_DTI: Fraction = Fraction::new(0.28);
pub const DEFAULT_BACK_END_DTI: Fraction = Fraction::new(0.36);

fn default_front_end_dti() -> Fraction {
    DEFAULT_FRONT_END_DTI
}

fn default_back_end_dti() -> Fraction {
    DEFAULT_BACK_END_DTI
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityInputs {
    pub income_annual: Money,
    #[serde(default)]
    pub other_debt_monthly: Money,
    /// Housing payment being tested against the limits
    pub piti: Money,
    /// Max housing payment / gross monthly income
    #[serde(default = "default_front_end_dti")]
    pub front_end_dti: Fraction,
    /// Max total debt payments / gross monthly income
    #[serde(default = "default_back_end_dti")]
    pub back_end_dti: Fraction,
}

impl AffordabilityInputs {
    /// Inputs with the standard 28% / 36% limits
    pub fn new(income_annual: Money, other_debt_monthly: Money, piti: Money) -> Self {
        Self {
            income_annual,
            other_debt_monthly,
            piti,
            front_end_dti: DEFAULT_FRONT_END_DTI,
            back_end_dti: DEFAULT_BACK_END_DTI,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("income_annual", self.income_annual)?;
        ensure_non_negative("other_debt_monthly", self.other_debt_monthly)?;
        ensure_non_negative("piti", self.piti)?;
        ensure_unit_interval("front_end_dti", self.front_end_dti.value())?;
        ensure_unit_interval("back_end_dti", self.back_end_dti.value())?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub income_monthly: Money,
    /// Largest housing payment both DTI limits allow.
    /// Negative when existing debt alone exceeds the back-end limit.
    pub max_piti_by_dti: Money,
    /// max_piti_by_dti - piti
    pub headroom: Money,
}

impl AffordabilityResult {
    pub fn fits_budget(&self) -> bool {
        self.headroom >= 0.0
    }
}

/// Maximum housing payment under front-end and back-end DTI limits
pub fn calc_affordability(inputs: &AffordabilityInputs) -> Result<AffordabilityResult> {
    inputs.validate()?;

    let income_monthly = inputs.income_annual / 12.0;
    let max_housing = inputs.front_end_dti.value() * income_monthly;
    let max_all_debt = inputs.back_end_dti.value() * income_monthly - inputs.other_debt_monthly;
    let max_piti_by_dti = max_housing.min(max_all_debt);

    Ok(AffordabilityResult {
        income_monthly,
        max_piti_by_dti,
        headroom: max_piti_by_dti - inputs.piti,
    })
}
