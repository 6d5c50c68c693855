//! Error types for rational arithmetic.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from constructing or combining [`Rational`](crate::Rational) values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RationalError {
    /// A rational was constructed with a zero denominator.
    ZeroDenominator,
    /// Division by a rational equal to zero.
    DivisionByZero,
    /// An intermediate product or sum left the `i128` range.
    Overflow,
    /// A decimal input could not be bridged to a rational.
    InvalidDecimal(&'static str),
    /// Text could not be parsed as a fraction or decimal.
    Parse(String),
}

impl Display for RationalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDenominator => write!(f, "rational constructed with zero denominator"),
            Self::DivisionByZero => write!(f, "division by zero rational"),
            Self::Overflow => write!(f, "rational arithmetic overflow"),
            Self::InvalidDecimal(msg) => write!(f, "invalid decimal: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl Error for RationalError {}
