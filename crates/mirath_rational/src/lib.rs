//! Exact rational arithmetic for estate share computation.
//!
//! This crate provides:
//! - [`Rational`], an always-normalized `i128` fraction with exact ordering
//! - checked and operator arithmetic, `gcd` / `lcm` helpers
//! - a bounded best-approximation bridge from decimal input
//!
//! Floating point appears only in [`Rational::to_f64`] and
//! [`Rational::from_decimal`]; no comparison goes through it.

pub mod approx;
pub mod error;
pub mod rational;

pub use approx::MAX_DECIMAL_MAGNITUDE;
pub use error::RationalError;
pub use rational::{Rational, gcd, lcm};
