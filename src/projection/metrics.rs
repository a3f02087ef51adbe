//! Milestone snapshots (years 5, 10 and 30) and ROI against the initial investment

use serde::{Deserialize, Serialize};

use super::engine::PROJECTION_YEARS;
use super::rows::YearlyProjection;
use crate::error::{AnalysisError, Result};
use crate::units::{Money, Percent};

/// Years reported as milestones
pub const MILESTONE_YEARS: [u32; 3] = [5, 10, 30];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneMetrics {
    pub year: u32,
    pub home_value: Money,
    pub equity: Money,
    pub total_cash_flow: Money,
    pub total_return: Money,
    /// (total_return - initial_investment) / initial_investment
    pub roi: Percent,
}

impl MilestoneMetrics {
    fn from_row(row: &YearlyProjection, initial_investment: Money) -> Self {
        Self {
            year: row.year,
            home_value: row.home_value,
            equity: row.equity,
            total_cash_flow: row.total_cash_flow,
            total_return: row.total_return,
            roi: roi(row.total_return, initial_investment),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionMetrics {
    pub year5: MilestoneMetrics,
    pub year10: MilestoneMetrics,
    pub year30: MilestoneMetrics,
}

impl ProjectionMetrics {
    pub fn milestones(&self) -> [&MilestoneMetrics; 3] {
        [&self.year5, &self.year10, &self.year30]
    }
}

fn roi(total_return: Money, initial_investment: Money) -> Percent {
    Percent::new((total_return - initial_investment) / initial_investment * 100.0)
}

/// Summarise a projection at years 5, 10 and 30.
///
/// Requires at least 30 rows ordered from year 1, and a positive initial
/// investment (ROI is undefined otherwise).
pub fn calculate_projection_metrics(
    projections: &[YearlyProjection],
    initial_investment: Money,
) -> Result<ProjectionMetrics> {
    if !initial_investment.is_finite() || initial_investment <= 0.0 {
        return Err(AnalysisError::UndefinedRoi { initial_investment });
    }

    let required = PROJECTION_YEARS as usize;
    let ordered = projections
        .iter()
        .take(required)
        .enumerate()
        .all(|(idx, row)| row.year as usize == idx + 1);
    if projections.len() < required || !ordered {
        return Err(AnalysisError::InsufficientProjection {
            required,
            actual: projections.len(),
        });
    }

    let milestone = |year: u32| {
        MilestoneMetrics::from_row(&projections[(year - 1) as usize], initial_investment)
    };

    Ok(ProjectionMetrics {
        year5: milestone(MILESTONE_YEARS[0]),
        year10: milestone(MILESTONE_YEARS[1]),
        year30: milestone(MILESTONE_YEARS[2]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::engine::{calculate_30_year_projection, ProjectionInputs};
    use crate::units::Fraction;
    use approx::assert_relative_eq;

    fn projection() -> Vec<YearlyProjection> {
        calculate_30_year_projection(&ProjectionInputs {
            home_value: 350_000.0,
            down_payment: 70_000.0,
            loan_amount: 280_000.0,
            interest_rate: Fraction::new(0.07),
            loan_term_years: 30,
            monthly_pi: 1862.85,
            monthly_piti: 2400.0,
            rent_estimate: 2_600.0,
            monthly_cash_flow: 120.0,
            appreciation_rate: Fraction::new(0.03),
            rent_growth_rate: Fraction::new(0.02),
        })
        .unwrap()
    }

    #[test]
    fn test_milestones_select_years() {
        let rows = projection();
        let metrics = calculate_projection_metrics(&rows, 70_000.0).unwrap();

        assert_eq!(metrics.year5.year, 5);
        assert_eq!(metrics.year10.year, 10);
        assert_eq!(metrics.year30.year, 30);
        assert_eq!(metrics.year5.home_value, rows[4].home_value);
        assert_eq!(metrics.year10.equity, rows[9].equity);
        assert_eq!(metrics.year30.total_cash_flow, rows[29].total_cash_flow);
    }

    #[test]
    fn test_roi_recomputed_independently() {
        let rows = projection();
        let metrics = calculate_projection_metrics(&rows, 70_000.0).unwrap();

        for (milestone, idx) in metrics.milestones().iter().zip([4usize, 9, 29]) {
            let expected = (rows[idx].total_return - 70_000.0) / 70_000.0 * 100.0;
            assert_relative_eq!(milestone.roi.value(), expected);
        }
        assert!(metrics.year30.roi > metrics.year5.roi);
    }

    #[test]
    fn test_zero_investment_is_rejected() {
        let rows = projection();
        assert!(matches!(
            calculate_projection_metrics(&rows, 0.0),
            Err(AnalysisError::UndefinedRoi { .. })
        ));
        assert!(calculate_projection_metrics(&rows, -5.0).is_err());
    }

    #[test]
    fn test_short_or_unordered_projection_is_rejected() {
        let rows = projection();
        assert!(matches!(
            calculate_projection_metrics(&rows[..29], 70_000.0),
            Err(AnalysisError::InsufficientProjection { actual: 29, .. })
        ));

        let mut shuffled = rows.clone();
        shuffled.swap(3, 4);
        assert!(calculate_projection_metrics(&shuffled, 70_000.0).is_err());
    }
}
