//! Batch analysis of saved properties
//!
//! Each property is run through the calculator with its own saved rates, in
//! parallel, and the results are rolled up into a portfolio summary.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::finance::{calc_finance, FinanceResult};
use crate::property::SavedProperty;
use crate::units::{Fraction, Money};

/// Calculator output for one saved property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRow {
    pub address: String,
    pub home_value: Money,
    pub finance: FinanceResult,
}

/// Portfolio-level totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub property_count: usize,
    pub total_value: Money,
    pub total_monthly_cash_flow: Money,
    /// Unweighted mean of the property cap rates
    pub average_cap_rate: Fraction,
}

impl PortfolioSummary {
    pub fn from_rows(rows: &[PortfolioRow]) -> Self {
        let property_count = rows.len();
        let total_value = rows.iter().map(|r| r.home_value).sum();
        let total_monthly_cash_flow = rows.iter().map(|r| r.finance.cash_flow).sum();
        let average_cap_rate = if property_count == 0 {
            Fraction::ZERO
        } else {
            let total: f64 = rows.iter().map(|r| r.finance.cap_rate.value()).sum();
            Fraction::new(total / property_count as f64)
        };

        Self {
            property_count,
            total_value,
            total_monthly_cash_flow,
            average_cap_rate,
        }
    }
}

/// Analyze every saved property, preserving input order.
/// Fails on the first property with invalid inputs.
pub fn analyze_portfolio(
    properties: &[SavedProperty],
    assumptions: &Assumptions,
) -> Result<Vec<PortfolioRow>> {
    properties
        .par_iter()
        .map(|property| {
            let finance = calc_finance(&property.finance_inputs(assumptions))?;
            debug!(
                "{}: cash_flow={:.2} cap_rate={}",
                property.facts.address, finance.cash_flow, finance.cap_rate
            );
            Ok(PortfolioRow {
                address: property.facts.address.clone(),
                home_value: property.facts.home_value,
                finance,
            })
        })
        .collect()
}
