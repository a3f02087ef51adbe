//! Underwriting assumptions: financing terms, operating expenses, growth and DTI limits

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AnalysisError, Result};
use crate::finance::{
    AffordabilityInputs, FinanceInputs, DEFAULT_BACK_END_DTI, DEFAULT_CLOSING_COST_RATE,
    DEFAULT_FRONT_END_DTI, MAX_LOAN_TERM_YEARS,
};
use crate::projection::{DEFAULT_APPRECIATION_RATE, DEFAULT_RENT_GROWTH_RATE};
use crate::property::PropertyFacts;
use crate::units::{Fraction, Money};

/// Loan terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingAssumptions {
    pub interest_rate: Fraction,
    pub loan_term_years: u32,
    pub down_payment_percent: Fraction,
    pub closing_cost_rate: Fraction,
    pub include_pmi: bool,
}

impl Default for FinancingAssumptions {
    fn default() -> Self {
        Self {
            interest_rate: Fraction::new(0.065),
            loan_term_years: 30,
            down_payment_percent: Fraction::new(0.20),
            closing_cost_rate: DEFAULT_CLOSING_COST_RATE,
            include_pmi: true,
        }
    }
}

/// Operating expenses as shares of rent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingAssumptions {
    pub vacancy_rate: Fraction,
    pub maintenance_rate: Fraction,
    pub management_rate: Fraction,
}

impl Default for OperatingAssumptions {
    fn default() -> Self {
        Self {
            vacancy_rate: Fraction::new(0.05),
            maintenance_rate: Fraction::new(0.08),
            management_rate: Fraction::new(0.08),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthAssumptions {
    pub appreciation_rate: Fraction,
    pub rent_growth_rate: Fraction,
}

impl Default for GrowthAssumptions {
    fn default() -> Self {
        Self {
            appreciation_rate: DEFAULT_APPRECIATION_RATE,
            rent_growth_rate: DEFAULT_RENT_GROWTH_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DtiLimits {
    pub front_end: Fraction,
    pub back_end: Fraction,
}

impl Default for DtiLimits {
    fn default() -> Self {
        Self {
            front_end: DEFAULT_FRONT_END_DTI,
            back_end: DEFAULT_BACK_END_DTI,
        }
    }
}

/// Container for all analysis assumptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub financing: FinancingAssumptions,
    pub operating: OperatingAssumptions,
    pub growth: GrowthAssumptions,
    pub dti: DtiLimits,
}

impl Assumptions {
    /// 6.5% / 30-year / 20% down, 5% vacancy, 8% maintenance, 8% management,
    /// 3% appreciation, 2% rent growth, 28/36 DTI
    pub fn default_underwriting() -> Self {
        Self::default()
    }

    /// Load overrides from the default location (data/assumptions.csv)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Defaults with any overrides found in a `name,value` CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut assumptions = Self::default_underwriting();
        for (name, value) in loader::load_overrides(path)? {
            assumptions.apply_override(&name, value)?;
        }
        Ok(assumptions)
    }

    /// Defaults with overrides read from any reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut assumptions = Self::default_underwriting();
        for (name, value) in loader::load_overrides_from_reader(reader)? {
            assumptions.apply_override(&name, value)?;
        }
        Ok(assumptions)
    }

    /// Set a single assumption by name. Rates are fractions.
    pub fn apply_override(&mut self, name: &str, value: f64) -> Result<()> {
        let rate = Fraction::new(value);
        match name {
            "interest_rate" => self.financing.interest_rate = rate,
            "loan_term_years" => {
                if value < 1.0 || value.fract() != 0.0 || value > MAX_LOAN_TERM_YEARS as f64 {
                    return Err(AnalysisError::invalid(
                        "loan_term_years",
                        format!("must be a whole number of years, got {}", value),
                    ));
                }
                self.financing.loan_term_years = value as u32;
            }
            "down_payment_percent" => self.financing.down_payment_percent = rate,
            "closing_cost_rate" => self.financing.closing_cost_rate = rate,
            "include_pmi" => self.financing.include_pmi = value != 0.0,
            "vacancy_rate" => self.operating.vacancy_rate = rate,
            "maintenance_rate" => self.operating.maintenance_rate = rate,
            "management_rate" => self.operating.management_rate = rate,
            "appreciation_rate" => self.growth.appreciation_rate = rate,
            "rent_growth_rate" => self.growth.rent_growth_rate = rate,
            "front_end_dti" => self.dti.front_end = rate,
            "back_end_dti" => self.dti.back_end = rate,
            other => return Err(AnalysisError::UnknownAssumption(other.to_string())),
        }
        Ok(())
    }

    /// Calculator inputs for a property at the given monthly rent
    pub fn finance_inputs(&self, facts: &PropertyFacts, rent: Money) -> FinanceInputs {
        FinanceInputs {
            home_value: facts.home_value,
            tax_annual: facts.tax_annual,
            hoa_monthly: facts.hoa_monthly,
            insurance_annual: facts.insurance_annual,
            interest_rate: self.financing.interest_rate,
            loan_term_years: self.financing.loan_term_years,
            down_payment_percent: self.financing.down_payment_percent,
            rent_estimate: rent,
            vacancy_rate: self.operating.vacancy_rate,
            maintenance_rate: self.operating.maintenance_rate,
            management_rate: self.operating.management_rate,
            closing_cost_rate: self.financing.closing_cost_rate,
            include_pmi: self.financing.include_pmi,
        }
    }

    pub fn affordability_inputs(
        &self,
        income_annual: Money,
        other_debt_monthly: Money,
        piti: Money,
    ) -> AffordabilityInputs {
        AffordabilityInputs {
            income_annual,
            other_debt_monthly,
            piti,
            front_end_dti: self.dti.front_end,
            back_end_dti: self.dti.back_end,
        }
    }
}
