//! Annualized return of a buy-and-hold investment
//!
//! The hold is a series of annual flows: the down payment out at purchase,
//! each projected year's cash flow in, and the final year's equity realised
//! at the end of the horizon.

use super::rows::YearlyProjection;
use crate::units::{Fraction, Money};

/// Lowest annual rate searched (loses 99% a year)
const RATE_FLOOR: f64 = -0.99;

/// Highest annual rate searched
const RATE_CEILING: f64 = 1.0;

const RATE_TOLERANCE: f64 = 1e-10;
const MAX_STEPS: usize = 200;

/// Annual flows of a hold: `-initial_investment` at year 0, each year's
/// cash flow after it, with the last year's equity added to the final flow.
pub fn hold_cash_flows(projections: &[YearlyProjection], initial_investment: Money) -> Vec<Money> {
    let mut flows = Vec::with_capacity(projections.len() + 1);
    flows.push(-initial_investment);
    flows.extend(projections.iter().map(|row| row.annual_cash_flow));
    if let (Some(last), Some(final_flow)) = (projections.last(), flows.last_mut()) {
        *final_flow += last.equity;
    }
    flows
}

/// Present value of annual flows at `rate`, and its derivative in `rate`
fn npv_with_slope(flows: &[Money], rate: f64) -> (f64, f64) {
    let growth = 1.0 + rate;
    let mut discount = 1.0;
    let mut value = 0.0;
    let mut slope = 0.0;
    for (year, &flow) in flows.iter().enumerate() {
        value += flow * discount;
        slope -= year as f64 * flow * discount / growth;
        discount /= growth;
    }
    (value, slope)
}

/// Starting point: the rate that turns total money out into total money in
/// over the whole hold
fn initial_guess(flows: &[Money]) -> f64 {
    let money_in: f64 = flows.iter().filter(|&&f| f > 0.0).sum();
    let money_out: f64 = -flows.iter().filter(|&&f| f < 0.0).sum::<f64>();
    let years = flows.len().saturating_sub(1).max(1) as f64;
    (money_in / money_out).powf(1.0 / years) - 1.0
}

/// Annual rate at which the flows have zero present value.
///
/// Searches [-99%, 100%] with Newton steps kept inside a shrinking sign
/// bracket, bisecting whenever a step would leave it. Returns `None` when the
/// flows never change sign or the present value has the same sign at both
/// ends of the range.
pub fn annual_irr(flows: &[Money]) -> Option<Fraction> {
    let has_inflow = flows.iter().any(|&f| f > 0.0);
    let has_outflow = flows.iter().any(|&f| f < 0.0);
    if !has_inflow || !has_outflow {
        return None;
    }

    let (floor_value, _) = npv_with_slope(flows, RATE_FLOOR);
    let (ceiling_value, _) = npv_with_slope(flows, RATE_CEILING);
    if floor_value == 0.0 {
        return Some(Fraction::new(RATE_FLOOR));
    }
    if ceiling_value == 0.0 {
        return Some(Fraction::new(RATE_CEILING));
    }
    if floor_value.signum() == ceiling_value.signum() {
        return None;
    }

    // `low` always holds the floor's sign, `high` the ceiling's
    let floor_sign = floor_value.signum();
    let mut low = RATE_FLOOR;
    let mut high = RATE_CEILING;
    let mut rate = initial_guess(flows).clamp(low, high);

    for _ in 0..MAX_STEPS {
        let (value, slope) = npv_with_slope(flows, rate);
        if value == 0.0 {
            return Some(Fraction::new(rate));
        }
        if value.signum() == floor_sign {
            low = rate;
        } else {
            high = rate;
        }

        let newton = rate - value / slope;
        let next = if slope != 0.0 && newton > low && newton < high {
            newton
        } else {
            (low + high) / 2.0
        };

        if (next - rate).abs() < RATE_TOLERANCE || high - low < RATE_TOLERANCE {
            return Some(Fraction::new(next));
        }
        rate = next;
    }

    None
}

/// Annual IRR of buying with `initial_investment`, collecting each year's
/// cash flow, and realising the final year's equity.
pub fn calculate_investment_irr(
    projections: &[YearlyProjection],
    initial_investment: Money,
) -> Option<Fraction> {
    if projections.is_empty() {
        return None;
    }
    annual_irr(&hold_cash_flows(projections, initial_investment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::engine::{calculate_30_year_projection, ProjectionInputs};
    use crate::units::Percent;
    use approx::assert_abs_diff_eq;

    fn row(year: u32, annual_cash_flow: f64, equity: f64) -> YearlyProjection {
        YearlyProjection {
            year,
            home_value: equity,
            rent_monthly: 0.0,
            rent_annual: 0.0,
            loan_balance: 0.0,
            principal_paid: 0.0,
            equity,
            annual_cash_flow,
            total_cash_flow: annual_cash_flow * year as f64,
            equity_percent: Percent::new(100.0),
            total_return: 0.0,
        }
    }

    fn projection_inputs(appreciation: f64) -> ProjectionInputs {
        ProjectionInputs {
            home_value: 350_000.0,
            down_payment: 70_000.0,
            loan_amount: 280_000.0,
            interest_rate: Fraction::new(0.07),
            loan_term_years: 30,
            monthly_pi: 1862.85,
            monthly_piti: 2400.0,
            rent_estimate: 2_600.0,
            monthly_cash_flow: -150.0,
            appreciation_rate: Fraction::new(appreciation),
            rent_growth_rate: Fraction::new(0.02),
        }
    }

    #[test]
    fn test_coupon_style_flows() {
        let irr = annual_irr(&[-100.0, 10.0, 110.0]).unwrap();
        assert_abs_diff_eq!(irr.value(), 0.10, epsilon = 1e-8);
    }

    #[test]
    fn test_doubling_over_ten_years() {
        let mut flows = vec![-1_000.0];
        flows.extend([0.0; 9]);
        flows.push(2_000.0);
        let irr = annual_irr(&flows).unwrap();
        assert_abs_diff_eq!(irr.value(), 2f64.powf(0.1) - 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_losing_hold_has_negative_irr() {
        let irr = annual_irr(&[-100_000.0, -5_000.0, -5_000.0, 60_000.0]).unwrap();
        assert!(irr.value() < 0.0);
        let (value, _) = npv_with_slope(&[-100_000.0, -5_000.0, -5_000.0, 60_000.0], irr.value());
        assert_abs_diff_eq!(value, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_no_solution() {
        assert!(annual_irr(&[]).is_none());
        assert!(annual_irr(&[100.0, 50.0]).is_none());
        assert!(annual_irr(&[-100.0, -50.0]).is_none());
        // Tenfold in one year lies above the searched range
        assert!(annual_irr(&[-100.0, 1_000.0]).is_none());
    }

    #[test]
    fn test_hold_flows_include_final_equity() {
        let rows = vec![row(1, 10.0, 100.0), row(2, 10.0, 100.0)];
        assert_eq!(hold_cash_flows(&rows, 100.0), vec![-100.0, 10.0, 110.0]);

        let irr = calculate_investment_irr(&rows, 100.0).unwrap();
        assert_abs_diff_eq!(irr.value(), 0.10, epsilon = 1e-8);
        assert!(calculate_investment_irr(&[], 100.0).is_none());
    }

    #[test]
    fn test_irr_of_projected_hold() {
        let rows = calculate_30_year_projection(&projection_inputs(0.03)).unwrap();
        let flows = hold_cash_flows(&rows, 70_000.0);
        assert_eq!(flows.len(), 31);

        let irr = calculate_investment_irr(&rows, 70_000.0).unwrap();
        assert!(irr.value() > 0.0 && irr.value() < RATE_CEILING, "irr={}", irr);
        let (value, _) = npv_with_slope(&flows, irr.value());
        assert_abs_diff_eq!(value, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_faster_appreciation_raises_irr() {
        let slow = calculate_30_year_projection(&projection_inputs(0.02)).unwrap();
        let fast = calculate_30_year_projection(&projection_inputs(0.05)).unwrap();
        let slow_irr = calculate_investment_irr(&slow, 70_000.0).unwrap();
        let fast_irr = calculate_investment_irr(&fast, 70_000.0).unwrap();
        assert!(fast_irr > slow_irr);
    }
}
