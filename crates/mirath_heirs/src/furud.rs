//! Fixed shares (furud).
//!
//! Each share function assumes its category is present and unblocked and
//! returns the statutory share of the whole category (not per head).
//! Functions are total: every composition yields a [`ShareRule`].

use mirath_rational::Rational;
use serde::Serialize;

use crate::blocking::{BlockingMap, all_blockings};
use crate::category::{ALL_CATEGORIES, HeirCategory, descriptor};
use crate::composition::HeirComposition;

pub const HALF: Rational = Rational::frac(1, 2);
pub const THIRD: Rational = Rational::frac(1, 3);
pub const QUARTER: Rational = Rational::frac(1, 4);
pub const SIXTH: Rational = Rational::frac(1, 6);
pub const EIGHTH: Rational = Rational::frac(1, 8);
pub const TWO_THIRDS: Rational = Rational::frac(2, 3);

/// What a category is entitled to before residuary and corrections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "share", rename_all = "snake_case")]
pub enum ShareRule {
    /// A statutory fraction; may be zero.
    Fixed(Rational),
    /// No fixed share; takes part in the remainder only.
    Residuary,
    /// A fixed fraction plus whatever remainder the tier absorbs.
    FixedAndResiduary(Rational),
}

impl ShareRule {
    /// The fixed portion; zero for purely residuary rules.
    pub const fn fixed_part(&self) -> Rational {
        match self {
            Self::Fixed(r) | Self::FixedAndResiduary(r) => *r,
            Self::Residuary => Rational::ZERO,
        }
    }

    pub const fn is_residuary(&self) -> bool {
        matches!(self, Self::Residuary | Self::FixedAndResiduary(_))
    }
}

/// Split a one-or-several group: 1/2 for a single heir, 2/3 for several.
const fn one_or_several(count: u32) -> Rational {
    if count <= 1 { HALF } else { TWO_THIRDS }
}

pub fn husband(c: &HeirComposition) -> ShareRule {
    ShareRule::Fixed(if c.has_descendants() { QUARTER } else { HALF })
}

/// Shared equally by all wives.
pub fn wife(c: &HeirComposition) -> ShareRule {
    ShareRule::Fixed(if c.has_descendants() { EIGHTH } else { QUARTER })
}

pub fn residuary_only(_: &HeirComposition) -> ShareRule {
    ShareRule::Residuary
}

pub fn daughter(c: &HeirComposition) -> ShareRule {
    if c.sons > 0 {
        return ShareRule::Residuary;
    }
    ShareRule::Fixed(one_or_several(c.daughters))
}

pub fn sons_daughter(c: &HeirComposition) -> ShareRule {
    if c.sons_sons > 0 {
        return ShareRule::Residuary;
    }
    match c.daughters {
        0 => ShareRule::Fixed(one_or_several(c.sons_daughters)),
        // Completes the daughters' two-thirds.
        1 => ShareRule::Fixed(SIXTH),
        _ => ShareRule::Fixed(Rational::ZERO),
    }
}

pub fn father(c: &HeirComposition) -> ShareRule {
    if c.has_male_descendants() {
        ShareRule::Fixed(SIXTH)
    } else if c.has_female_descendants() {
        ShareRule::FixedAndResiduary(SIXTH)
    } else {
        ShareRule::Residuary
    }
}

/// Mirrors the father; only reached when the father is absent.
pub fn paternal_grandfather(c: &HeirComposition) -> ShareRule {
    father(c)
}

pub fn mother(c: &HeirComposition) -> ShareRule {
    if c.has_descendants() || c.sibling_count() >= 2 {
        ShareRule::Fixed(SIXTH)
    } else {
        ShareRule::Fixed(THIRD)
    }
}

/// One-sixth split evenly among present, unblocked grandmothers. Both
/// grandmother categories are excluded by the mother, so when this runs the
/// mother is absent and every present grandmother is unblocked.
pub fn grandmother(c: &HeirComposition) -> ShareRule {
    let present = c.paternal_grandmother as i128 + c.maternal_grandmother as i128;
    if present == 0 {
        return ShareRule::Fixed(SIXTH);
    }
    ShareRule::Fixed(SIXTH / Rational::integer(present))
}

pub fn full_sister(c: &HeirComposition) -> ShareRule {
    if c.full_brothers > 0 || c.full_sisters_residuary_with_other() {
        return ShareRule::Residuary;
    }
    ShareRule::Fixed(one_or_several(c.full_sisters))
}

pub fn paternal_sister(c: &HeirComposition) -> ShareRule {
    if c.paternal_brothers > 0 || c.paternal_sisters_residuary_with_other() {
        return ShareRule::Residuary;
    }
    match c.full_sisters {
        0 => ShareRule::Fixed(one_or_several(c.paternal_sisters)),
        // Completes the full sister's half to two-thirds.
        1 => ShareRule::Fixed(SIXTH),
        _ => ShareRule::Fixed(Rational::ZERO),
    }
}

/// Maternal half-siblings form one pool: 1/6 for a single heir, otherwise
/// 1/3 divided per head without regard to sex. The category receives its
/// heads' portion of the pool.
pub fn maternal_sibling_pool(c: &HeirComposition) -> Rational {
    match c.maternal_sibling_count() {
        0 => Rational::ZERO,
        1 => SIXTH,
        _ => THIRD,
    }
}

fn maternal_share_for(c: &HeirComposition, heads: u32) -> ShareRule {
    let pool_heads = c.maternal_sibling_count();
    if !c.is_kalala() || pool_heads == 0 {
        return ShareRule::Fixed(Rational::ZERO);
    }
    let portion = Rational::from(heads) / Rational::from(pool_heads);
    ShareRule::Fixed(maternal_sibling_pool(c) * portion)
}

pub fn maternal_brother(c: &HeirComposition) -> ShareRule {
    maternal_share_for(c, c.maternal_brothers)
}

pub fn maternal_sister(c: &HeirComposition) -> ShareRule {
    maternal_share_for(c, c.maternal_sisters)
}

/// Statutory share of `category`, assuming present and unblocked.
pub fn share_rule(category: HeirCategory, c: &HeirComposition) -> ShareRule {
    (descriptor(category).share)(c)
}

/// A present, unblocked category with its rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FixedShare {
    pub category: HeirCategory,
    pub count: u32,
    pub rule: ShareRule,
}

/// Rules for every present, unblocked category, in canonical order.
pub fn applicable_shares(c: &HeirComposition, blockings: &BlockingMap) -> Vec<FixedShare> {
    ALL_CATEGORIES
        .into_iter()
        .filter(|cat| c.is_present(*cat))
        .filter(|cat| !blockings.get(cat).is_some_and(|b| b.is_blocked()))
        .map(|category| FixedShare {
            category,
            count: c.count(category),
            rule: share_rule(category, c),
        })
        .collect()
}

/// Sum of every applicable fixed contribution.
pub fn calculate_fixed_shares_total(c: &HeirComposition) -> Rational {
    applicable_shares(c, &all_blockings(c))
        .iter()
        .map(|s| s.rule.fixed_part())
        .sum()
}

/// `1 - fixed total`. Negative means reduction; positive means residuary
/// absorption or redistribution.
pub fn calculate_remainder(c: &HeirComposition) -> Rational {
    Rational::ONE - calculate_fixed_shares_total(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp() -> crate::composition::HeirCompositionBuilder {
        HeirComposition::builder()
    }

    #[test]
    fn spouse_halved_by_descendants() {
        assert_eq!(husband(&comp().husband().build_unchecked()), ShareRule::Fixed(HALF));
        assert_eq!(
            husband(&comp().husband().sons_daughters(1).build_unchecked()),
            ShareRule::Fixed(QUARTER)
        );
        assert_eq!(wife(&comp().wife().build_unchecked()), ShareRule::Fixed(QUARTER));
        assert_eq!(
            wife(&comp().wives(3).daughters(1).build_unchecked()),
            ShareRule::Fixed(EIGHTH)
        );
    }

    #[test]
    fn mother_third_or_sixth() {
        assert_eq!(mother(&comp().mother().build_unchecked()), ShareRule::Fixed(THIRD));
        assert_eq!(
            mother(&comp().mother().sons(1).build_unchecked()),
            ShareRule::Fixed(SIXTH)
        );
        assert_eq!(
            mother(&comp().mother().full_brothers(1).build_unchecked()),
            ShareRule::Fixed(THIRD)
        );
        assert_eq!(
            mother(&comp().mother().full_sisters(1).maternal_brothers(1).build_unchecked()),
            ShareRule::Fixed(SIXTH)
        );
    }

    #[test]
    fn daughters() {
        assert_eq!(daughter(&comp().daughters(1).build_unchecked()), ShareRule::Fixed(HALF));
        assert_eq!(
            daughter(&comp().daughters(3).build_unchecked()),
            ShareRule::Fixed(TWO_THIRDS)
        );
        assert_eq!(
            daughter(&comp().daughters(1).sons(1).build_unchecked()),
            ShareRule::Residuary
        );
    }

    #[test]
    fn sons_daughters_top_up() {
        let one_daughter = comp().daughters(1).sons_daughters(2).build_unchecked();
        assert_eq!(sons_daughter(&one_daughter), ShareRule::Fixed(SIXTH));

        let two_daughters = comp().daughters(2).sons_daughters(1).build_unchecked();
        assert_eq!(sons_daughter(&two_daughters), ShareRule::Fixed(Rational::ZERO));

        let with_sons_son = comp().daughters(2).sons_daughters(1).sons_sons(1).build_unchecked();
        assert_eq!(sons_daughter(&with_sons_son), ShareRule::Residuary);

        let alone = comp().sons_daughters(1).build_unchecked();
        assert_eq!(sons_daughter(&alone), ShareRule::Fixed(HALF));
    }

    #[test]
    fn father_three_modes() {
        assert_eq!(
            father(&comp().father().sons_sons(1).build_unchecked()),
            ShareRule::Fixed(SIXTH)
        );
        assert_eq!(
            father(&comp().father().daughters(1).build_unchecked()),
            ShareRule::FixedAndResiduary(SIXTH)
        );
        assert_eq!(father(&comp().father().build_unchecked()), ShareRule::Residuary);
    }

    #[test]
    fn grandmothers_split_sixth() {
        let both = comp().paternal_grandmother().maternal_grandmother().build_unchecked();
        assert_eq!(grandmother(&both), ShareRule::Fixed(Rational::frac(1, 12)));
        let one = comp().maternal_grandmother().build_unchecked();
        assert_eq!(grandmother(&one), ShareRule::Fixed(SIXTH));
    }

    #[test]
    fn sisters() {
        assert_eq!(full_sister(&comp().full_sisters(1).build_unchecked()), ShareRule::Fixed(HALF));
        assert_eq!(
            full_sister(&comp().full_sisters(2).build_unchecked()),
            ShareRule::Fixed(TWO_THIRDS)
        );
        assert_eq!(
            full_sister(&comp().full_sisters(2).full_brothers(1).build_unchecked()),
            ShareRule::Residuary
        );
        assert_eq!(
            full_sister(&comp().full_sisters(1).daughters(1).build_unchecked()),
            ShareRule::Residuary
        );
    }

    #[test]
    fn paternal_sisters_top_up() {
        let one_full = comp().full_sisters(1).paternal_sisters(1).build_unchecked();
        assert_eq!(paternal_sister(&one_full), ShareRule::Fixed(SIXTH));
        let two_full = comp().full_sisters(2).paternal_sisters(1).build_unchecked();
        assert_eq!(paternal_sister(&two_full), ShareRule::Fixed(Rational::ZERO));
        let with_brother = comp()
            .full_sisters(2)
            .paternal_sisters(1)
            .paternal_brothers(1)
            .build_unchecked();
        assert_eq!(paternal_sister(&with_brother), ShareRule::Residuary);
    }

    #[test]
    fn maternal_siblings_pool() {
        let one = comp().maternal_sisters(1).build_unchecked();
        assert_eq!(share_rule(HeirCategory::MaternalSister, &one), ShareRule::Fixed(SIXTH));

        let mixed = comp().maternal_brothers(2).maternal_sisters(1).build_unchecked();
        assert_eq!(
            share_rule(HeirCategory::MaternalBrother, &mixed),
            ShareRule::Fixed(Rational::frac(2, 9))
        );
        assert_eq!(
            share_rule(HeirCategory::MaternalSister, &mixed),
            ShareRule::Fixed(Rational::frac(1, 9))
        );
    }

    #[test]
    fn maternal_siblings_need_kalala() {
        let with_daughter = comp().maternal_brothers(1).daughters(1).build_unchecked();
        assert_eq!(
            share_rule(HeirCategory::MaternalBrother, &with_daughter),
            ShareRule::Fixed(Rational::ZERO)
        );
    }

    #[test]
    fn fixed_total_and_remainder() {
        let c = comp().husband().daughters(2).mother().build_unchecked();
        assert_eq!(calculate_fixed_shares_total(&c), Rational::frac(13, 12));
        assert_eq!(calculate_remainder(&c), Rational::frac(-1, 12));

        let sisters = comp().husband().full_sisters(2).mother().build_unchecked();
        assert_eq!(calculate_fixed_shares_total(&sisters), Rational::frac(4, 3));

        let son_only = comp().sons(1).build_unchecked();
        assert_eq!(calculate_fixed_shares_total(&son_only), Rational::ZERO);
        assert_eq!(calculate_remainder(&son_only), Rational::ONE);
    }

    #[test]
    fn blocked_categories_contribute_nothing() {
        // Grandfather blocked by father; only the father's sixth counts.
        let c = comp().father().paternal_grandfather().sons(1).build_unchecked();
        assert_eq!(calculate_fixed_shares_total(&c), SIXTH);
    }
}
