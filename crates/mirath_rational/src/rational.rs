//! The [`Rational`] value type.
//!
//! Values are always held in lowest terms with a strictly positive
//! denominator, so structural equality is numeric equality and the derived
//! `Hash` agrees with it.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RationalError;

/// Greatest common divisor of `|a|` and `|b|` (Euclid).
///
/// `gcd(0, 0) = 0`; otherwise the result is strictly positive.
pub const fn gcd(a: i128, b: i128) -> i128 {
    let mut a = a.unsigned_abs();
    let mut b = b.unsigned_abs();
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a as i128
}

/// Least common multiple of `|a|` and `|b|`; zero if either is zero.
pub const fn lcm(a: i128, b: i128) -> i128 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b) * b).abs()
}

/// Exact fraction `num / den` with `den > 0` and `gcd(|num|, den) == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    num: i128,
    den: i128,
}

impl Rational {
    pub const ZERO: Self = Self { num: 0, den: 1 };
    pub const ONE: Self = Self { num: 1, den: 1 };

    /// Construct `num / den`, simplified.
    ///
    /// Fails with [`RationalError::ZeroDenominator`] when `den == 0`. The sign
    /// always ends up on the numerator.
    pub fn new(num: i128, den: i128) -> Result<Self, RationalError> {
        if den == 0 {
            return Err(RationalError::ZeroDenominator);
        }
        Ok(Self::normalized(num, den))
    }

    /// Compile-time constructor for rule tables.
    ///
    /// # Panics
    /// When `den == 0`; in a `const` item this is a compile error.
    pub const fn frac(num: i128, den: i128) -> Self {
        assert!(den != 0, "rational constructed with zero denominator");
        Self::normalized(num, den)
    }

    /// The integer `n` as `n / 1`.
    pub const fn integer(n: i128) -> Self {
        Self { num: n, den: 1 }
    }

    const fn normalized(num: i128, den: i128) -> Self {
        let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
        let g = gcd(num, den);
        if g <= 1 {
            Self { num, den }
        } else {
            Self {
                num: num / g,
                den: den / g,
            }
        }
    }

    pub const fn numer(&self) -> i128 {
        self.num
    }

    pub const fn denom(&self) -> i128 {
        self.den
    }

    /// Divide both components by their gcd. Idempotent.
    pub const fn simplify(self) -> Self {
        Self::normalized(self.num, self.den)
    }

    pub const fn is_zero(&self) -> bool {
        self.num == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.num > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.num < 0
    }

    pub const fn abs(self) -> Self {
        Self {
            num: self.num.abs(),
            den: self.den,
        }
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, RationalError> {
        let g = gcd(self.den, rhs.den);
        let lhs_scale = rhs.den / g;
        let rhs_scale = self.den / g;
        let a = self
            .num
            .checked_mul(lhs_scale)
            .ok_or(RationalError::Overflow)?;
        let b = rhs
            .num
            .checked_mul(rhs_scale)
            .ok_or(RationalError::Overflow)?;
        let num = a.checked_add(b).ok_or(RationalError::Overflow)?;
        let den = self
            .den
            .checked_mul(lhs_scale)
            .ok_or(RationalError::Overflow)?;
        Ok(Self::normalized(num, den))
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self, RationalError> {
        self.checked_add(rhs.checked_neg()?)
    }

    pub fn checked_neg(self) -> Result<Self, RationalError> {
        let num = self.num.checked_neg().ok_or(RationalError::Overflow)?;
        Ok(Self { num, den: self.den })
    }

    pub fn checked_mul(self, rhs: Self) -> Result<Self, RationalError> {
        // Cross-cancel first so small fractions stay small.
        let g1 = gcd(self.num, rhs.den);
        let g2 = gcd(rhs.num, self.den);
        let num = (self.num / g1)
            .checked_mul(rhs.num / g2)
            .ok_or(RationalError::Overflow)?;
        let den = (self.den / g2)
            .checked_mul(rhs.den / g1)
            .ok_or(RationalError::Overflow)?;
        Ok(Self::normalized(num, den))
    }

    /// Fails with [`RationalError::DivisionByZero`] when `rhs` is zero.
    pub fn checked_div(self, rhs: Self) -> Result<Self, RationalError> {
        self.checked_mul(rhs.checked_recip()?)
    }

    /// `1 / self`; fails with [`RationalError::DivisionByZero`] on zero.
    pub fn checked_recip(self) -> Result<Self, RationalError> {
        if self.num == 0 {
            return Err(RationalError::DivisionByZero);
        }
        Ok(Self::normalized(self.den, self.num))
    }

    /// Floating-point approximation. Only for display and monetary output;
    /// never compare shares through this.
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

fn expect_exact(result: Result<Rational, RationalError>) -> Rational {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{e}"),
    }
}

// Operator impls panic on overflow or division by zero, mirroring the
// primitive integer operators. Use the `checked_*` methods on untrusted data.

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        expect_exact(self.checked_add(rhs))
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        expect_exact(self.checked_sub(rhs))
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        expect_exact(self.checked_mul(rhs))
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        expect_exact(self.checked_div(rhs))
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        expect_exact(self.checked_neg())
    }
}

impl Sum for Rational {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Rational> for Rational {
    fn sum<I: Iterator<Item = &'a Rational>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + *x)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    /// Cross-multiplication; denominators are positive so the sign is kept.
    /// Products that overflow fall back to comparing continued-fraction terms.
    fn cmp(&self, other: &Self) -> Ordering {
        match (
            self.num.checked_mul(other.den),
            other.num.checked_mul(self.den),
        ) {
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
            _ => cmp_by_quotients((self.num, self.den), (other.num, other.den)),
        }
    }
}

/// Compare `a.0 / a.1` with `b.0 / b.1` (positive denominators) without
/// multiplying. Whole parts first, then the reciprocals of the fractional
/// parts, which flips the order.
fn cmp_by_quotients(mut a: (i128, i128), mut b: (i128, i128)) -> Ordering {
    loop {
        let (qa, ra) = (a.0.div_euclid(a.1), a.0.rem_euclid(a.1));
        let (qb, rb) = (b.0.div_euclid(b.1), b.0.rem_euclid(b.1));
        if qa != qb {
            return qa.cmp(&qb);
        }
        match (ra == 0, rb == 0) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        (a, b) = ((b.1, rb), (a.1, ra));
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i128> for Rational {
    fn from(n: i128) -> Self {
        Self::integer(n)
    }
}

impl From<u32> for Rational {
    fn from(n: u32) -> Self {
        Self::integer(i128::from(n))
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

/// Longest decimal fraction part accepted by [`FromStr`]; 10^30 still fits
/// comfortably in `i128`.
const MAX_DECIMAL_DIGITS: usize = 30;

impl FromStr for Rational {
    type Err = RationalError;

    /// Accepts `n/d`, an integer, or a plain decimal such as `-0.125`.
    /// Decimals are converted exactly (`0.125` is `1/8`), not approximated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((n, d)) = s.split_once('/') {
            let num: i128 = n
                .trim()
                .parse()
                .map_err(|e| RationalError::Parse(format!("numerator {n:?}: {e}")))?;
            let den: i128 = d
                .trim()
                .parse()
                .map_err(|e| RationalError::Parse(format!("denominator {d:?}: {e}")))?;
            return Self::new(num, den);
        }

        let Some((int_part, frac_part)) = s.split_once('.') else {
            let n: i128 = s
                .parse()
                .map_err(|e| RationalError::Parse(format!("{s:?}: {e}")))?;
            return Ok(Self::integer(n));
        };

        if frac_part.is_empty()
            || frac_part.len() > MAX_DECIMAL_DIGITS
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(RationalError::Parse(format!("invalid decimal {s:?}")));
        }
        let negative = int_part.starts_with('-');
        let int_digits = int_part.trim_start_matches(['-', '+']);
        let whole: i128 = if int_digits.is_empty() {
            0
        } else {
            int_digits
                .parse()
                .map_err(|e| RationalError::Parse(format!("{s:?}: {e}")))?
        };
        let frac: i128 = frac_part
            .parse()
            .map_err(|e| RationalError::Parse(format!("{s:?}: {e}")))?;
        let scale = 10_i128.pow(frac_part.len() as u32);
        let magnitude = whole
            .checked_mul(scale)
            .and_then(|w| w.checked_add(frac))
            .ok_or(RationalError::Overflow)?;
        let num = if negative { -magnitude } else { magnitude };
        Self::new(num, scale)
    }
}

impl Serialize for Rational {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rational {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
