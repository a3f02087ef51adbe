//! Monthly expense breakdown for a rental

use serde::{Deserialize, Serialize};

use super::cashflow::{FinanceInputs, FinanceResult};
use crate::units::Money;

/// Where a month's rent goes, in currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub piti: Money,
    pub vacancy: Money,
    pub maintenance: Money,
    pub management: Money,
}

impl ExpenseBreakdown {
    /// Split the monthly outlay for `rent` into PITI and each operating expense
    pub fn from_finance(inputs: &FinanceInputs, result: &FinanceResult, rent: Money) -> Self {
        Self {
            piti: result.piti,
            vacancy: rent * inputs.vacancy_rate.value(),
            maintenance: rent * inputs.maintenance_rate.value(),
            management: rent * inputs.management_rate.value(),
        }
    }

    pub fn operating_total(&self) -> Money {
        self.vacancy + self.maintenance + self.management
    }

    pub fn total(&self) -> Money {
        self.piti + self.operating_total()
    }

    /// (label, amount) pairs in display order
    pub fn items(&self) -> [(&'static str, Money); 4] {
        [
            ("Monthly Payment", self.piti),
            ("Vacancy", self.vacancy),
            ("Maintenance", self.maintenance),
            ("Management", self.management),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::cashflow::calc_finance;
    use crate::units::Fraction;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_breakdown_matches_operating_expenses() {
        let inputs = FinanceInputs {
            home_value: 400_000.0,
            tax_annual: 4_800.0,
            hoa_monthly: 0.0,
            insurance_annual: 1_200.0,
            interest_rate: Fraction::new(0.06),
            loan_term_years: 30,
            down_payment_percent: Fraction::new(0.25),
            rent_estimate: 3_000.0,
            vacancy_rate: Fraction::new(0.05),
            maintenance_rate: Fraction::new(0.08),
            management_rate: Fraction::new(0.10),
            closing_cost_rate: Fraction::new(0.03),
            include_pmi: false,
        };
        let result = calc_finance(&inputs).unwrap();
        let breakdown = ExpenseBreakdown::from_finance(&inputs, &result, inputs.rent_estimate);

        assert_abs_diff_eq!(breakdown.vacancy, 150.0, epsilon = 1e-9);
        assert_abs_diff_eq!(breakdown.maintenance, 240.0, epsilon = 1e-9);
        assert_abs_diff_eq!(breakdown.management, 300.0, epsilon = 1e-9);
        assert_abs_diff_eq!(breakdown.operating_total(), result.operating_expenses, epsilon = 1e-9);
        // Everything spent plus cash flow accounts for the rent
        assert_abs_diff_eq!(breakdown.total() + result.cash_flow, 3_000.0, epsilon = 1e-9);
        assert_eq!(breakdown.items()[0].0, "Monthly Payment");
    }
}
