//! Year-by-year investment projection under appreciation and rent growth

use log::debug;
use serde::{Deserialize, Serialize};

use super::rows::{ProjectionResult, YearlyProjection};
use super::state::ProjectionState;
use crate::error::{ensure_finite, ensure_non_negative, AnalysisError, Result};
use crate::finance::amortization::validate_terms;
use crate::finance::{remaining_balance, FinanceInputs, FinanceResult};
use crate::units::{Fraction, Money, Percent};

/// Standard projection horizon
pub const PROJECTION_YEARS: u32 = 30;

pub const DEFAULT_APPRECIATION_RATE: Fraction = Fraction::new(0.03);
pub const DEFAULT_RENT_GROWTH_RATE: Fraction = Fraction::new(0.02);

fn default_appreciation_rate() -> Fraction {
    DEFAULT_APPRECIATION_RATE
}

fn default_rent_growth_rate() -> Fraction {
    DEFAULT_RENT_GROWTH_RATE
}

/// Starting point and growth assumptions for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInputs {
    pub home_value: Money,
    pub down_payment: Money,
    pub loan_amount: Money,
    pub interest_rate: Fraction,
    pub loan_term_years: u32,
    pub monthly_pi: Money,
    pub monthly_piti: Money,
    pub rent_estimate: Money,
    /// First-year monthly cash flow; grows with rent
    pub monthly_cash_flow: Money,

    #[serde(default = "default_appreciation_rate")]
    pub appreciation_rate: Fraction,

    #[serde(default = "default_rent_growth_rate")]
    pub rent_growth_rate: Fraction,
}

impl ProjectionInputs {
    /// Seed a projection from a finance calculation, with default growth rates
    pub fn from_finance(inputs: &FinanceInputs, result: &FinanceResult) -> Self {
        Self {
            home_value: inputs.home_value,
            down_payment: inputs.down_payment_amount(),
            loan_amount: result.loan,
            interest_rate: inputs.interest_rate,
            loan_term_years: inputs.loan_term_years,
            monthly_pi: result.pi,
            monthly_piti: result.piti,
            rent_estimate: inputs.rent_estimate,
            monthly_cash_flow: result.cash_flow,
            appreciation_rate: DEFAULT_APPRECIATION_RATE,
            rent_growth_rate: DEFAULT_RENT_GROWTH_RATE,
        }
    }

    pub fn with_growth(mut self, appreciation_rate: Fraction, rent_growth_rate: Fraction) -> Self {
        self.appreciation_rate = appreciation_rate;
        self.rent_growth_rate = rent_growth_rate;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("home_value", self.home_value)?;
        if self.home_value <= 0.0 {
            return Err(AnalysisError::invalid("home_value", "must be positive"));
        }
        ensure_non_negative("down_payment", self.down_payment)?;
        ensure_non_negative("loan_amount", self.loan_amount)?;
        validate_terms(self.interest_rate, self.loan_term_years)?;
        ensure_non_negative("rent_estimate", self.rent_estimate)?;
        ensure_finite("monthly_pi", self.monthly_pi)?;
        ensure_finite("monthly_piti", self.monthly_piti)?;
        ensure_finite("monthly_cash_flow", self.monthly_cash_flow)?;

        for (field, rate) in [
            ("appreciation_rate", self.appreciation_rate),
            ("rent_growth_rate", self.rent_growth_rate),
        ] {
            ensure_finite(field, rate.value())?;
            if rate.value() <= -1.0 {
                return Err(AnalysisError::invalid(field, "must be above -100%"));
            }
        }
        Ok(())
    }
}

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Number of years to project
    pub horizon_years: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_years: PROJECTION_YEARS,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project the investment one year at a time over the configured horizon
    pub fn project(&self, inputs: &ProjectionInputs) -> Result<ProjectionResult> {
        inputs.validate()?;
        if self.config.horizon_years == 0 {
            return Err(AnalysisError::invalid("horizon_years", "must be at least 1 year"));
        }

        let mut result = ProjectionResult::with_capacity(self.config.horizon_years);
        let mut state = ProjectionState::from_inputs(inputs);

        for _year in 1..=self.config.horizon_years {
            state.advance_year();
            let row = self.calculate_year(inputs, &mut state)?;
            result.add_row(row);
        }

        debug!(
            "projected {} years: final equity={:.0} cumulative cash flow={:.0}",
            result.years.len(),
            result.years.last().map(|r| r.equity).unwrap_or(0.0),
            state.cumulative_cash_flow
        );

        Ok(result)
    }

    /// Values for the state's current year. Accumulation stays unrounded;
    /// only the emitted row is rounded.
    fn calculate_year(
        &self,
        inputs: &ProjectionInputs,
        state: &mut ProjectionState,
    ) -> Result<YearlyProjection> {
        let year = state.year;
        let exponent = year as i32;

        let home_value = inputs.home_value * (1.0 + inputs.appreciation_rate.value()).powi(exponent);

        let rent_growth_factor = (1.0 + inputs.rent_growth_rate.value()).powi(exponent);
        let rent_monthly = inputs.rent_estimate * rent_growth_factor;
        let rent_annual = rent_monthly * 12.0;

        let loan_balance = remaining_balance(
            inputs.loan_amount,
            inputs.interest_rate,
            inputs.loan_term_years,
            year,
        )?;
        let principal_paid = state.record_balance(loan_balance);

        let equity = (home_value - loan_balance).max(0.0);

        // Expenses are assumed to grow with rent, so cash flow scales by the
        // rent growth factor. The loan payoff does not step cash flow up.
        let annual_cash_flow = inputs.monthly_cash_flow * 12.0 * rent_growth_factor;
        let cumulative_cash_flow = state.collect_cash_flow(annual_cash_flow);

        let total_return = equity + cumulative_cash_flow;

        Ok(YearlyProjection {
            year,
            home_value: home_value.round(),
            rent_monthly: rent_monthly.round(),
            rent_annual: rent_annual.round(),
            loan_balance: loan_balance.round(),
            principal_paid: principal_paid.round(),
            equity: equity.round(),
            annual_cash_flow: annual_cash_flow.round(),
            total_cash_flow: cumulative_cash_flow.round(),
            equity_percent: Percent::new(equity / home_value * 100.0),
            total_return: total_return.round(),
        })
    }
}

/// Standard 30-year projection (years 1..=30)
pub fn calculate_30_year_projection(inputs: &ProjectionInputs) -> Result<Vec<YearlyProjection>> {
    Ok(ProjectionEngine::default().project(inputs)?.years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn test_inputs() -> ProjectionInputs {
        ProjectionInputs {
            home_value: 500_000.0,
            down_payment: 100_000.0,
            loan_amount: 400_000.0,
            interest_rate: Fraction::new(0.065),
            loan_term_years: 30,
            monthly_pi: 2528.27,
            monthly_piti: 3493.27,
            rent_estimate: 2_850.0,
            monthly_cash_flow: 150.0,
            appreciation_rate: DEFAULT_APPRECIATION_RATE,
            rent_growth_rate: DEFAULT_RENT_GROWTH_RATE,
        }
    }

    #[test]
    fn test_projection_runs() {
        let rows = calculate_30_year_projection(&test_inputs()).unwrap();

        assert_eq!(rows.len(), 30);
        for (idx, row) in rows.iter().enumerate() {
            assert_eq!(row.year, idx as u32 + 1);
        }
    }

    #[test]
    fn test_growth_values() {
        let rows = calculate_30_year_projection(&test_inputs()).unwrap();

        assert_eq!(rows[0].home_value, 515_000.0);
        assert_eq!(rows[0].rent_monthly, 2_907.0);
        assert_eq!(rows[0].rent_annual, 34_884.0);
        assert_eq!(rows[4].home_value, 579_637.0);
        assert_eq!(rows[29].home_value, 1_213_631.0);
        assert_eq!(rows[29].rent_monthly, 5_162.0);
    }

    #[test]
    fn test_loan_balance_amortizes_to_zero() {
        let rows = calculate_30_year_projection(&test_inputs()).unwrap();

        for pair in rows.windows(2) {
            assert!(pair[1].loan_balance <= pair[0].loan_balance);
        }
        assert_eq!(rows[9].loan_balance, 339_105.0);
        assert_eq!(rows[29].loan_balance, 0.0);
        assert!(rows.iter().all(|r| r.loan_balance >= 0.0));
    }

    #[test]
    fn test_shorter_loan_pays_off_at_term() {
        let inputs = ProjectionInputs {
            loan_term_years: 15,
            ..test_inputs()
        };
        let result = ProjectionEngine::default().project(&inputs).unwrap();

        assert!(result.years[13].loan_balance > 0.0);
        assert!(result.years[14..].iter().all(|r| r.loan_balance == 0.0));
        assert_eq!(result.payoff_year(), Some(15));
        assert!(result.years[15..].iter().all(|r| r.principal_paid == 0.0));
    }

    #[test]
    fn test_principal_paid_sums_to_loan() {
        let result = ProjectionEngine::default().project(&test_inputs()).unwrap();
        let total: f64 = result.years.iter().map(|r| r.principal_paid).sum();
        // Each year is rounded on emission
        assert_abs_diff_eq!(total, 400_000.0, epsilon = 30.0);
    }

    #[test]
    fn test_equity_and_total_return() {
        let rows = calculate_30_year_projection(&test_inputs()).unwrap();

        for row in &rows {
            assert!(row.equity <= row.home_value);
            assert_abs_diff_eq!(row.equity, row.home_value - row.loan_balance, epsilon = 1.0);
            assert_abs_diff_eq!(row.total_return, row.equity + row.total_cash_flow, epsilon = 1.0);
            assert_abs_diff_eq!(
                row.equity_percent.value(),
                row.equity / row.home_value * 100.0,
                epsilon = 0.01
            );
        }
        assert_relative_eq!(rows[29].equity_percent.value(), 100.0);
    }

    #[test]
    fn test_cash_flow_grows_with_rent() {
        let rows = calculate_30_year_projection(&test_inputs()).unwrap();

        // 150 * 12 * 1.02
        assert_eq!(rows[0].annual_cash_flow, 1_836.0);
        for pair in rows.windows(2) {
            assert!(pair[1].total_cash_flow >= pair[0].total_cash_flow);
        }
        // No step-up after the loan is paid off
        let inputs = ProjectionInputs {
            loan_term_years: 10,
            ..test_inputs()
        };
        let short = calculate_30_year_projection(&inputs).unwrap();
        assert_eq!(short[10].annual_cash_flow, rows[10].annual_cash_flow);
    }

    #[test]
    fn test_rounding_happens_after_accumulation() {
        let inputs = ProjectionInputs {
            monthly_cash_flow: 10.0417,
            rent_growth_rate: Fraction::ZERO,
            ..test_inputs()
        };
        let rows = calculate_30_year_projection(&inputs).unwrap();

        // 120.5004 per year emits as 121, but 30 years accumulate to 3615.012
        assert_eq!(rows[0].annual_cash_flow, 121.0);
        assert_eq!(rows[29].total_cash_flow, 3_615.0);
        let sum_of_rounded: f64 = rows.iter().map(|r| r.annual_cash_flow).sum();
        assert_eq!(sum_of_rounded, 3_630.0);
    }

    #[test]
    fn test_negative_cash_flow_passes_through() {
        let inputs = ProjectionInputs {
            monthly_cash_flow: -400.0,
            ..test_inputs()
        };
        let rows = calculate_30_year_projection(&inputs).unwrap();
        assert!(rows[0].annual_cash_flow < 0.0);
        assert!(rows[29].total_cash_flow < rows[0].total_cash_flow);
    }

    #[test]
    fn test_equity_clamped_when_value_falls() {
        let inputs = ProjectionInputs {
            home_value: 400_000.0,
            down_payment: 0.0,
            appreciation_rate: Fraction::new(-0.20),
            ..test_inputs()
        };
        let rows = calculate_30_year_projection(&inputs).unwrap();
        assert_eq!(rows[0].equity, 0.0);
        assert!(rows.iter().all(|r| r.equity >= 0.0));
    }

    #[test]
    fn test_custom_horizon() {
        let engine = ProjectionEngine::new(ProjectionConfig { horizon_years: 40 });
        let result = engine.project(&test_inputs()).unwrap();
        assert_eq!(result.years.len(), 40);
        assert_eq!(result.years.last().map(|r| r.year), Some(40));

        let summary = result.summary();
        assert_eq!(summary.total_years, 40);
        assert_eq!(summary.payoff_year, Some(30));
        assert_eq!(summary.final_equity, result.years[39].home_value);

        let empty = ProjectionEngine::new(ProjectionConfig { horizon_years: 0 });
        assert!(empty.project(&test_inputs()).is_err());
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let bad = [
            ProjectionInputs { home_value: 0.0, ..test_inputs() },
            ProjectionInputs { loan_term_years: 0, ..test_inputs() },
            ProjectionInputs { interest_rate: Fraction::new(-0.05), ..test_inputs() },
            ProjectionInputs { interest_rate: Fraction::new(2000.0), ..test_inputs() },
            ProjectionInputs { loan_term_years: 400_000_000, ..test_inputs() },
            ProjectionInputs { rent_growth_rate: Fraction::new(-1.0), ..test_inputs() },
            ProjectionInputs { monthly_cash_flow: f64::NAN, ..test_inputs() },
        ];
        for inputs in &bad {
            assert!(calculate_30_year_projection(inputs).is_err(), "{:?}", inputs);
        }
    }

    #[test]
    fn test_repeatable() {
        let a = calculate_30_year_projection(&test_inputs()).unwrap();
        let b = calculate_30_year_projection(&test_inputs()).unwrap();
        assert_eq!(a, b);
    }
}
