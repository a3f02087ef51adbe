//! Running state carried from one projection year to the next

use super::engine::ProjectionInputs;
use crate::units::Money;

/// Unrounded accumulators for a projection in progress
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection year (0 before the first advance)
    pub year: u32,

    /// Cash flow collected through the current year, unrounded
    pub cumulative_cash_flow: Money,

    /// Loan balance at the end of the prior year
    pub prior_loan_balance: Money,
}

impl ProjectionState {
    /// State at purchase, before any year has elapsed
    pub fn from_inputs(inputs: &ProjectionInputs) -> Self {
        Self {
            year: 0,
            cumulative_cash_flow: 0.0,
            prior_loan_balance: inputs.loan_amount,
        }
    }

    pub fn advance_year(&mut self) {
        self.year += 1;
    }

    /// Add this year's cash flow and return the new cumulative total
    pub fn collect_cash_flow(&mut self, annual_cash_flow: Money) -> Money {
        self.cumulative_cash_flow += annual_cash_flow;
        self.cumulative_cash_flow
    }

    /// Principal repaid during the current year
    pub fn record_balance(&mut self, loan_balance: Money) -> Money {
        let principal_paid = (self.prior_loan_balance - loan_balance).max(0.0);
        self.prior_loan_balance = loan_balance;
        principal_paid
    }
}
