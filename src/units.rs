//! Unit conventions for rates and currency
//!
//! Rates travel through the library as [`Fraction`] (0.065 = 6.5%). Values
//! meant for display as a percentage are [`Percent`] (6.5 = 6.5%). The two
//! never convert implicitly, so an input of `6.5` cannot be mistaken for 650%.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency amount. A single unit is used throughout (no cents/dollars split).
pub type Money = f64;

/// A rate expressed as a fraction (0.065 = 6.5%)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fraction(f64);

impl Fraction {
    pub const ZERO: Fraction = Fraction(0.0);

    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Same rate as a percentage (0.065 -> 6.5)
    pub fn to_percent(self) -> Percent {
        Percent(self.0 * 100.0)
    }

    /// Monthly rate for an annual nominal rate
    pub fn monthly(self) -> f64 {
        self.0 / 12.0
    }
}

impl std::ops::Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        Fraction(self.0 + rhs.0)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_percent())
    }
}

/// A value expressed as a percentage (6.5 = 6.5%)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(f64);

impl Percent {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Same rate as a fraction (6.5 -> 0.065)
    pub fn to_fraction(self) -> Fraction {
        Fraction(self.0 / 100.0)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}
