//! Multi-year investment projection and milestone metrics

mod state;
mod engine;
mod rows;
mod metrics;
mod irr;

pub use state::ProjectionState;
pub use engine::{
    calculate_30_year_projection, ProjectionConfig, ProjectionEngine, ProjectionInputs,
    DEFAULT_APPRECIATION_RATE, DEFAULT_RENT_GROWTH_RATE, PROJECTION_YEARS,
};
pub use rows::{ProjectionResult, ProjectionSummary, YearlyProjection};
pub use metrics::{calculate_projection_metrics, MilestoneMetrics, ProjectionMetrics, MILESTONE_YEARS};
pub use irr::{annual_irr, calculate_investment_irr, hold_cash_flows};
