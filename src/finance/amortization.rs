//! Level-payment amortization: monthly principal & interest and remaining balance

use crate::error::{ensure_finite, ensure_non_negative, AnalysisError, Result};
use crate::units::{Fraction, Money};

/// Longest loan term accepted
pub const MAX_LOAN_TERM_YEARS: u32 = 40;

/// Highest annual interest rate accepted
pub const MAX_INTEREST_RATE: Fraction = Fraction::new(0.5);

/// Rate in [0, 50%] and term in 1..=40 years
pub(crate) fn validate_terms(annual_rate: Fraction, years: u32) -> Result<()> {
    let rate = annual_rate.value();
    ensure_finite("interest_rate", rate)?;
    if !(0.0..=MAX_INTEREST_RATE.value()).contains(&rate) {
        return Err(AnalysisError::invalid(
            "interest_rate",
            format!("must be between 0 and {}, got {}", MAX_INTEREST_RATE.value(), rate),
        ));
    }
    if !(1..=MAX_LOAN_TERM_YEARS).contains(&years) {
        return Err(AnalysisError::invalid(
            "loan_term_years",
            format!("must be between 1 and {} years, got {}", MAX_LOAN_TERM_YEARS, years),
        ));
    }
    Ok(())
}

fn validate_loan(loan: Money, annual_rate: Fraction, years: u32) -> Result<()> {
    ensure_non_negative("loan", loan)?;
    validate_terms(annual_rate, years)
}

/// Fixed monthly principal + interest payment for a fully amortizing loan.
///
/// payment = loan * r * (1+r)^n / ((1+r)^n - 1), with r = annual_rate / 12
/// and n = years * 12. A zero rate falls back to straight-line repayment
/// (loan / n), which is the limit of the formula as r -> 0.
pub fn amortized_pi(loan: Money, annual_rate: Fraction, years: u32) -> Result<Money> {
    validate_loan(loan, annual_rate, years)?;

    let n = (years * 12) as i32;
    if loan == 0.0 {
        return Ok(0.0);
    }

    let r = annual_rate.monthly();
    if r == 0.0 {
        return Ok(loan / n as f64);
    }

    let growth = (1.0 + r).powi(n);
    Ok(loan * r * growth / (growth - 1.0))
}

/// Remaining balance of the original loan after `years_paid` full years of payments.
///
/// Zero once `years_paid` reaches the loan term, and never negative.
pub fn remaining_balance(
    original_loan: Money,
    annual_rate: Fraction,
    term_years: u32,
    years_paid: u32,
) -> Result<Money> {
    let payment = amortized_pi(original_loan, annual_rate, term_years)?;
    if years_paid >= term_years {
        return Ok(0.0);
    }

    let remaining_months = ((term_years - years_paid) * 12) as i32;
    let r = annual_rate.monthly();

    let balance = if r == 0.0 {
        payment * remaining_months as f64
    } else {
        // Present value of the payments still owed
        let growth = (1.0 + r).powi(remaining_months);
        payment * (growth - 1.0) / (r * growth)
    };

    Ok(balance.max(0.0))
}
