//! Rental Analysis - Financial core for residential rental property investment
//!
//! This library provides:
//! - Mortgage amortization, PITI and monthly cash flow
//! - Debt-to-income affordability checks
//! - 30-year projections of value, rent, equity and cumulative cash flow
//! - ROI milestones and investment IRR
//! - Financing scenario comparison and portfolio batch analysis

pub mod units;
pub mod error;
pub mod finance;
pub mod projection;
pub mod assumptions;
pub mod property;
pub mod scenario;
pub mod analysis;
pub mod portfolio;

// Re-export commonly used types
pub use units::{Fraction, Money, Percent};
pub use error::{AnalysisError, Result};
pub use finance::{calc_affordability, calc_finance, FinanceInputs, FinanceResult};
pub use projection::{calculate_30_year_projection, calculate_projection_metrics, YearlyProjection};
pub use assumptions::Assumptions;
pub use property::{PropertyFacts, SavedProperty};
pub use scenario::ScenarioRunner;
pub use analysis::{analyze, AnalysisRequest, PropertyAnalysis};
pub use portfolio::{analyze_portfolio, PortfolioSummary};
