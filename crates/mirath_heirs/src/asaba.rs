//! Residuary (asaba) resolution.
//!
//! Tiers are scanned in priority order; the first tier whose principal is
//! present and unblocked absorbs the whole remainder. A tier with a female
//! partner splits 2:1 by sex.

use mirath_rational::Rational;
use serde::Serialize;

use crate::blocking::BlockingMap;
use crate::category::HeirCategory;
use crate::composition::HeirComposition;

/// One entry of the residuary priority list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsabaTier {
    pub category: HeirCategory,
    /// Opposite-sex category that shares the tier at half a male's portion.
    pub partner: Option<HeirCategory>,
    /// Sisters inheriting as residuaries beside female descendants.
    pub with_other: bool,
}

const fn tier(category: HeirCategory, partner: Option<HeirCategory>) -> AsabaTier {
    AsabaTier {
        category,
        partner,
        with_other: false,
    }
}

const fn with_other(category: HeirCategory) -> AsabaTier {
    AsabaTier {
        category,
        partner: None,
        with_other: true,
    }
}

use HeirCategory as C;

/// Residuary priority, highest first.
pub const ASABA_PRIORITY: [AsabaTier; 14] = [
    tier(C::Son, Some(C::Daughter)),
    tier(C::SonsSon, Some(C::SonsDaughter)),
    tier(C::Father, None),
    tier(C::PaternalGrandfather, None),
    tier(C::FullBrother, Some(C::FullSister)),
    with_other(C::FullSister),
    tier(C::PaternalBrother, Some(C::PaternalSister)),
    with_other(C::PaternalSister),
    tier(C::FullBrothersSon, None),
    tier(C::PaternalBrothersSon, None),
    tier(C::FullPaternalUncle, None),
    tier(C::PaternalPaternalUncle, None),
    tier(C::FullUnclesSon, None),
    tier(C::PaternalUnclesSon, None),
];

/// The tier that absorbs the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResiduaryInfo {
    pub category: HeirCategory,
    pub count: u32,
    /// Present female partner and her head-count.
    pub partner: Option<(HeirCategory, u32)>,
    pub with_other: bool,
}

impl ResiduaryInfo {
    /// Whether `category` takes part in this tier.
    pub fn includes(&self, category: HeirCategory) -> bool {
        self.category == category || self.partner.is_some_and(|(p, _)| p == category)
    }
}

fn is_unblocked(category: HeirCategory, blockings: &BlockingMap) -> bool {
    !blockings.get(&category).is_some_and(|b| b.is_blocked())
}

fn qualifies(t: &AsabaTier, c: &HeirComposition, blockings: &BlockingMap) -> bool {
    if !c.is_present(t.category) || !is_unblocked(t.category, blockings) {
        return false;
    }
    if !t.with_other {
        return true;
    }
    match t.category {
        C::FullSister => c.full_sisters_residuary_with_other(),
        C::PaternalSister => c.paternal_sisters_residuary_with_other(),
        _ => false,
    }
}

/// First qualifying tier, or `None` when nobody is residuary.
pub fn resolve_asaba(c: &HeirComposition, blockings: &BlockingMap) -> Option<ResiduaryInfo> {
    let t = ASABA_PRIORITY.iter().find(|t| qualifies(t, c, blockings))?;
    let partner = t
        .partner
        .filter(|p| c.is_present(*p) && is_unblocked(*p, blockings))
        .map(|p| (p, c.count(p)));
    Some(ResiduaryInfo {
        category: t.category,
        count: c.count(t.category),
        partner,
        with_other: t.with_other,
    })
}

/// How a positive remainder splits inside the residuary tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AsabaDistribution {
    pub info: ResiduaryInfo,
    pub remainder: Rational,
    /// Shares counted: two per male and one per female with a partner,
    /// otherwise one per head.
    pub units: u32,
    pub per_unit: Rational,
    pub principal_total: Rational,
    pub partner_total: Rational,
}

impl AsabaDistribution {
    /// Portion of the remainder going to `category`; zero when outside the tier.
    pub fn total_for(&self, category: HeirCategory) -> Rational {
        if category == self.info.category {
            self.principal_total
        } else if self.info.partner.is_some_and(|(p, _)| p == category) {
            self.partner_total
        } else {
            Rational::ZERO
        }
    }
}

/// Split `remainder` across the tier; `None` unless the remainder is positive.
pub fn calculate_asaba(remainder: Rational, info: &ResiduaryInfo) -> Option<AsabaDistribution> {
    if !remainder.is_positive() || info.count == 0 {
        return None;
    }
    let (principal_units, partner_units) = match info.partner {
        Some((_, females)) => (2 * info.count, females),
        None => (info.count, 0),
    };
    let units = principal_units + partner_units;
    let per_unit = remainder / Rational::from(units);
    Some(AsabaDistribution {
        info: *info,
        remainder,
        units,
        per_unit,
        principal_total: per_unit * Rational::from(principal_units),
        partner_total: per_unit * Rational::from(partner_units),
    })
}
