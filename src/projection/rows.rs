//! Yearly projection output structures

use serde::{Deserialize, Serialize};

use crate::units::{Money, Percent};

/// One projected year. Currency fields are rounded to whole units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    /// Years since purchase (1-indexed)
    pub year: u32,

    /// Appreciated property value
    pub home_value: Money,

    // Grown rent
    pub rent_monthly: Money,
    pub rent_annual: Money,

    /// Remaining amortized loan balance
    pub loan_balance: Money,

    /// Principal repaid during this year
    pub principal_paid: Money,

    /// home_value - loan_balance
    pub equity: Money,

    /// Cash flow collected during this year
    pub annual_cash_flow: Money,

    /// Cash flow collected through this year
    pub total_cash_flow: Money,

    /// equity / home_value, unrounded
    pub equity_percent: Percent,

    /// equity + total_cash_flow
    pub total_return: Money,
}

/// Complete projection result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub years: Vec<YearlyProjection>,
}

impl ProjectionResult {
    pub fn with_capacity(horizon_years: u32) -> Self {
        Self {
            years: Vec::with_capacity(horizon_years as usize),
        }
    }

    pub fn add_row(&mut self, row: YearlyProjection) {
        self.years.push(row);
    }

    /// First year the loan is fully paid off
    pub fn payoff_year(&self) -> Option<u32> {
        self.years.iter().find(|r| r.loan_balance <= 0.0).map(|r| r.year)
    }

    pub fn summary(&self) -> ProjectionSummary {
        let last = self.years.last();
        ProjectionSummary {
            total_years: self.years.len() as u32,
            final_home_value: last.map(|r| r.home_value).unwrap_or(0.0),
            final_equity: last.map(|r| r.equity).unwrap_or(0.0),
            total_cash_flow: last.map(|r| r.total_cash_flow).unwrap_or(0.0),
            final_total_return: last.map(|r| r.total_return).unwrap_or(0.0),
            payoff_year: self.payoff_year(),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub final_home_value: Money,
    pub final_equity: Money,
    pub total_cash_flow: Money,
    pub final_total_return: Money,
    pub payoff_year: Option<u32>,
}
