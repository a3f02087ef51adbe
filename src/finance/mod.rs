//! Mortgage, cash flow and affordability calculators

pub mod amortization;
mod cashflow;
mod affordability;
mod expenses;

pub use amortization::{amortized_pi, remaining_balance, MAX_INTEREST_RATE, MAX_LOAN_TERM_YEARS};
pub use cashflow::{
    calc_finance, monthly_cash_flow, FinanceInputs, FinanceResult, DEFAULT_CLOSING_COST_RATE,
    PMI_ANNUAL_RATE, PMI_DOWN_PAYMENT_THRESHOLD,
};
pub use affordability::{
    calc_affordability, AffordabilityInputs, AffordabilityResult, DEFAULT_BACK_END_DTI,
    DEFAULT_FRONT_END_DTI,
};
pub use expenses::ExpenseBreakdown;
