//! Decimal-to-rational bridge.
//!
//! Only for externally supplied decimal input (a percentage typed into a
//! form, a share read from a spreadsheet). Results that started as exact
//! fractions never pass through here.

use crate::error::RationalError;
use crate::rational::Rational;

/// Largest magnitude accepted by [`Rational::from_decimal`].
pub const MAX_DECIMAL_MAGNITUDE: f64 = 1e15;

/// Continued-fraction depth cap; doubles exhaust their precision long before.
const MAX_TERMS: usize = 64;

impl Rational {
    /// Best rational approximation of `value` with denominator at most
    /// `max_denominator`.
    ///
    /// Walks the continued-fraction convergents of `|value|`; when the next
    /// convergent would exceed the bound, the best semiconvergent within the
    /// bound is compared against the last convergent and the closer wins.
    pub fn from_decimal(value: f64, max_denominator: u32) -> Result<Self, RationalError> {
        if !value.is_finite() {
            return Err(RationalError::InvalidDecimal("value must be finite"));
        }
        if value.abs() > MAX_DECIMAL_MAGNITUDE {
            return Err(RationalError::InvalidDecimal("magnitude too large"));
        }
        if max_denominator == 0 {
            return Err(RationalError::InvalidDecimal(
                "max_denominator must be greater than zero",
            ));
        }

        let negative = value < 0.0;
        let x = value.abs();
        let max_den = i128::from(max_denominator);

        // (p0/q0) is the convergent before (p1/q1); seeded with 0/1 and 1/0.
        let (mut p0, mut q0, mut p1, mut q1) = (0_i128, 1_i128, 1_i128, 0_i128);
        let mut tail = x;

        for _ in 0..MAX_TERMS {
            let a = tail.floor();
            let a_int = a as i128;
            let q2 = a_int * q1 + q0;
            if q2 > max_den {
                let k = (max_den - q0) / q1;
                let (ps, qs) = (p0 + k * p1, q0 + k * q1);
                let semi_err = (ps as f64 / qs as f64 - x).abs();
                let conv_err = (p1 as f64 / q1 as f64 - x).abs();
                if semi_err < conv_err {
                    (p1, q1) = (ps, qs);
                }
                break;
            }
            let p2 = a_int * p1 + p0;
            (p0, q0, p1, q1) = (p1, q1, p2, q2);

            let frac = tail - a;
            if frac == 0.0 || (p1 as f64 / q1 as f64 - x).abs() <= f64::EPSILON * x.max(1.0) {
                break;
            }
            tail = 1.0 / frac;
        }

        let num = if negative { -p1 } else { p1 };
        Self::new(num, q1)
    }
}
