//! Corrective procedures applied after fixed shares and the residuary.
//!
//! At most one applies to a composition, checked in this order:
//!
//! 1. The dual-parent exception (Umariyyatan): one spouse with both parents
//!    and nobody else who could inherit. The mother takes a third of what
//!    the spouse leaves, not a third of the estate.
//! 2. Reduction (awl): fixed shares exceed the estate and are scaled down
//!    by a common ratio.
//! 3. Redistribution (radd): a remainder is left with no residuary to
//!    absorb it and returns to the non-spouse sharers pro rata.

use mirath_rational::{Rational, lcm};
use serde::Serialize;

use crate::category::HeirCategory;
use crate::composition::HeirComposition;
use crate::furud::{HALF, QUARTER, THIRD};

/// Which form of the dual-parent exception applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionCase {
    UmariyyatanHusband,
    UmariyyatanWife,
}

impl ExceptionCase {
    pub const fn key(self) -> &'static str {
        match self {
            Self::UmariyyatanHusband => "umariyyatan_husband",
            Self::UmariyyatanWife => "umariyyatan_wife",
        }
    }

    pub const fn spouse(self) -> HeirCategory {
        match self {
            Self::UmariyyatanHusband => HeirCategory::Husband,
            Self::UmariyyatanWife => HeirCategory::Wife,
        }
    }
}

/// Final shares under the exception; always sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExceptionShares {
    pub case: ExceptionCase,
    pub spouse: Rational,
    pub mother: Rational,
    pub father: Rational,
}

/// Spouse 1/2 (husband) or 1/4 (wives), mother a third of the rest, father
/// the balance.
pub fn check_umariyyatan(c: &HeirComposition) -> Option<ExceptionShares> {
    if !c.is_umariyyatan() {
        return None;
    }
    let (case, spouse) = match c.spouse()? {
        HeirCategory::Husband => (ExceptionCase::UmariyyatanHusband, HALF),
        _ => (ExceptionCase::UmariyyatanWife, QUARTER),
    };
    let rest = Rational::ONE - spouse;
    let mother = rest * THIRD;
    Some(ExceptionShares {
        case,
        spouse,
        mother,
        father: rest - mother,
    })
}

/// A proportional reduction of every fixed share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reduction {
    pub original_total: Rational,
    /// `1 / original_total`.
    pub ratio: Rational,
    pub adjusted_total: Rational,
    /// Least common denominator of the fixed shares (asl al-mas'ala).
    pub original_base: i128,
    /// The base the shares add up to once the total exceeds it.
    pub raised_base: i128,
}

impl Reduction {
    pub fn apply(&self, share: Rational) -> Rational {
        share * self.ratio
    }
}

/// Least common denominator of the non-zero shares; 1 when all are zero.
pub fn common_base(shares: &[(HeirCategory, Rational)]) -> i128 {
    shares
        .iter()
        .filter(|(_, s)| !s.is_zero())
        .fold(1, |base, (_, s)| lcm(base, s.denom()))
}

/// Reduction when the fixed shares sum to more than one.
pub fn check_awl(shares: &[(HeirCategory, Rational)]) -> Option<Reduction> {
    let original_total: Rational = shares.iter().map(|(_, s)| *s).sum();
    if original_total <= Rational::ONE {
        return None;
    }
    let ratio = Rational::ONE / original_total;
    let adjusted_total = shares.iter().map(|(_, s)| *s * ratio).sum();
    let original_base = common_base(shares);
    let raised = original_total * Rational::integer(original_base);
    Some(Reduction {
        original_total,
        ratio,
        adjusted_total,
        original_base,
        raised_base: raised.numer() / raised.denom(),
    })
}

/// One recipient's part of a redistribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RaddShare {
    pub category: HeirCategory,
    pub base_share: Rational,
    pub addend: Rational,
}

impl RaddShare {
    pub fn final_share(&self) -> Rational {
        self.base_share + self.addend
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redistribution {
    pub remainder: Rational,
    pub recipients: Vec<RaddShare>,
    /// The remainder went back to the spouse because nobody else shares.
    pub to_spouse: bool,
}

impl Redistribution {
    pub fn addend_for(&self, category: HeirCategory) -> Rational {
        self.recipients
            .iter()
            .find(|r| r.category == category)
            .map_or(Rational::ZERO, |r| r.addend)
    }
}

/// Redistribution of a positive remainder with no residuary heir.
///
/// Every non-spouse category with a non-zero share receives
/// `remainder * share / sum of recipient shares`. The two maternal
/// half-sibling categories already hold their per-head portions of the
/// common pool, so the pool is weighed once in the sum and its addend
/// divides per head between them.
///
/// With no non-spouse recipient the remainder goes to the spouse only when
/// `spouse_fallback` is set; otherwise nothing applies and the remainder is
/// left unallocated.
pub fn check_radd(
    shares: &[(HeirCategory, Rational)],
    remainder: Rational,
    has_residuary: bool,
    spouse_fallback: bool,
) -> Option<Redistribution> {
    if has_residuary || !remainder.is_positive() {
        return None;
    }
    let eligible: Vec<(HeirCategory, Rational)> = shares
        .iter()
        .copied()
        .filter(|(c, s)| !c.is_spouse() && !s.is_zero())
        .collect();

    if eligible.is_empty() {
        if !spouse_fallback {
            return None;
        }
        let (category, base_share) = shares.iter().copied().find(|(c, _)| c.is_spouse())?;
        return Some(Redistribution {
            remainder,
            recipients: vec![RaddShare {
                category,
                base_share,
                addend: remainder,
            }],
            to_spouse: true,
        });
    }

    let weight: Rational = eligible.iter().map(|(_, s)| *s).sum();
    let recipients = eligible
        .into_iter()
        .map(|(category, base_share)| RaddShare {
            category,
            base_share,
            addend: remainder * base_share / weight,
        })
        .collect();
    Some(Redistribution {
        remainder,
        recipients,
        to_spouse: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::furud::{SIXTH, TWO_THIRDS};
    use HeirCategory as C;

    #[test]
    fn umariyyatan_wife() {
        let c = HeirComposition::builder().wife().father().mother().build_unchecked();
        let s = check_umariyyatan(&c).unwrap();
        assert_eq!(s.case, ExceptionCase::UmariyyatanWife);
        assert_eq!(s.spouse, QUARTER);
        assert_eq!(s.mother, QUARTER);
        assert_eq!(s.father, HALF);
    }

    #[test]
    fn umariyyatan_husband() {
        let c = HeirComposition::builder().husband().father().mother().build_unchecked();
        let s = check_umariyyatan(&c).unwrap();
        assert_eq!(s.case.spouse(), C::Husband);
        assert_eq!(s.mother, SIXTH);
        assert_eq!(s.father, THIRD);
        assert_eq!(s.spouse + s.mother + s.father, Rational::ONE);
        assert!(s.mother < THIRD);
    }

    #[test]
    fn umariyyatan_needs_exact_shape() {
        let no_spouse = HeirComposition::builder().father().mother().build_unchecked();
        assert_eq!(check_umariyyatan(&no_spouse), None);
        let grandmother = HeirComposition::builder()
            .wives(2)
            .father()
            .mother()
            .paternal_grandmother()
            .build_unchecked();
        assert_eq!(check_umariyyatan(&grandmother), None);
    }

    #[test]
    fn awl_six_raised_to_eight() {
        let shares = [
            (C::Husband, HALF),
            (C::FullSister, TWO_THIRDS),
            (C::Mother, SIXTH),
        ];
        let r = check_awl(&shares).unwrap();
        assert_eq!(r.original_total, Rational::frac(4, 3));
        assert_eq!(r.ratio, Rational::frac(3, 4));
        assert_eq!(r.adjusted_total, Rational::ONE);
        assert_eq!((r.original_base, r.raised_base), (6, 8));
        assert_eq!(r.apply(HALF), Rational::frac(3, 8));
    }

    #[test]
    fn awl_twelve_raised_to_thirteen() {
        let shares = [
            (C::Husband, QUARTER),
            (C::Daughter, TWO_THIRDS),
            (C::Mother, SIXTH),
        ];
        let r = check_awl(&shares).unwrap();
        assert_eq!(r.ratio, Rational::frac(12, 13));
        assert_eq!((r.original_base, r.raised_base), (12, 13));
    }

    #[test]
    fn no_awl_at_or_below_one() {
        assert_eq!(check_awl(&[(C::Husband, HALF), (C::FullSister, HALF)]), None);
        assert_eq!(check_awl(&[]), None);
    }

    #[test]
    fn radd_excludes_spouse() {
        let shares = [(C::Wife, QUARTER), (C::Daughter, HALF), (C::Mother, SIXTH)];
        let rem = Rational::frac(1, 12);
        let r = check_radd(&shares, rem, false, false).unwrap();
        assert_eq!(r.addend_for(C::Wife), Rational::ZERO);
        assert_eq!(r.addend_for(C::Daughter), Rational::frac(1, 16));
        assert_eq!(r.addend_for(C::Mother), Rational::frac(1, 48));
        let total: Rational = r.recipients.iter().map(|x| x.addend).sum();
        assert_eq!(total, rem);
    }

    #[test]
    fn radd_skipped_with_residuary_or_no_remainder() {
        let shares = [(C::Daughter, HALF)];
        assert_eq!(check_radd(&shares, HALF, true, false), None);
        assert_eq!(check_radd(&shares, Rational::ZERO, false, false), None);
    }

    #[test]
    fn maternal_pool_counted_once() {
        // Mother 1/6 and three maternal siblings holding 1/3 between them.
        let shares = [
            (C::Mother, SIXTH),
            (C::MaternalBrother, Rational::frac(2, 9)),
            (C::MaternalSister, Rational::frac(1, 9)),
        ];
        let r = check_radd(&shares, HALF, false, false).unwrap();
        let pool = r.addend_for(C::MaternalBrother) + r.addend_for(C::MaternalSister);
        assert_eq!(pool, Rational::frac(1, 3));
        assert_eq!(
            r.addend_for(C::MaternalBrother),
            r.addend_for(C::MaternalSister) * Rational::integer(2)
        );
        assert_eq!(r.addend_for(C::Mother), Rational::frac(1, 6));
    }

    #[test]
    fn spouse_fallback() {
        let shares = [(C::Husband, HALF)];
        assert_eq!(check_radd(&shares, HALF, false, false), None);
        let r = check_radd(&shares, HALF, false, true).unwrap();
        assert!(r.to_spouse);
        assert_eq!(r.recipients[0].final_share(), Rational::ONE);
    }
}
