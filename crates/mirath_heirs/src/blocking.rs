//! Exclusion (hijb) rules.
//!
//! Each blockable category carries an ordered precedence list of blockers.
//! Evaluation walks the list and reports the first blocker present in the
//! composition; later entries are never consulted. Husband, wife, son,
//! daughter, father and mother have no list and are never blocked.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::category::HeirCategory;
use crate::composition::HeirComposition;

/// Why a category is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "category", rename_all = "snake_case")]
pub enum Blocker {
    /// Presence of a closer heir.
    Heir(HeirCategory),
    /// A sister inheriting as residuary beside a female descendant, who
    /// excludes heirs a brother of hers would exclude.
    SisterWithDaughters(HeirCategory),
}

impl Blocker {
    /// Whether this blocker is in force for `c`.
    pub const fn applies(self, c: &HeirComposition) -> bool {
        match self {
            Self::Heir(category) => c.is_present(category),
            Self::SisterWithDaughters(HeirCategory::FullSister) => {
                c.full_sisters_residuary_with_other()
            }
            Self::SisterWithDaughters(HeirCategory::PaternalSister) => {
                c.paternal_sisters_residuary_with_other()
            }
            Self::SisterWithDaughters(_) => false,
        }
    }

    /// The category whose presence excludes.
    pub const fn category(self) -> HeirCategory {
        match self {
            Self::Heir(c) | Self::SisterWithDaughters(c) => c,
        }
    }

    /// Stable key for localization, e.g. `blocked_by.father`.
    pub fn key(self) -> String {
        match self {
            Self::Heir(c) => format!("blocked_by.{}", c.key()),
            Self::SisterWithDaughters(c) => format!("blocked_by.{}_with_daughters", c.key()),
        }
    }
}

impl Display for Blocker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heir(c) => write!(f, "blocked by {}", c.english_name()),
            Self::SisterWithDaughters(c) => write!(
                f,
                "blocked by {} inheriting as residuary with daughters",
                c.english_name()
            ),
        }
    }
}

/// Blocking state of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockingOutcome {
    pub category: HeirCategory,
    pub blocked_by: Option<Blocker>,
}

impl BlockingOutcome {
    pub const fn is_blocked(&self) -> bool {
        self.blocked_by.is_some()
    }
}

/// Complete blocking evaluation keyed by category.
pub type BlockingMap = BTreeMap<HeirCategory, BlockingOutcome>;

/// Every category that has a blocking rule.
pub const BLOCKABLE_CATEGORIES: [HeirCategory; 17] = [
    HeirCategory::SonsSon,
    HeirCategory::SonsDaughter,
    HeirCategory::PaternalGrandfather,
    HeirCategory::PaternalGrandmother,
    HeirCategory::MaternalGrandmother,
    HeirCategory::FullBrother,
    HeirCategory::FullSister,
    HeirCategory::PaternalBrother,
    HeirCategory::PaternalSister,
    HeirCategory::MaternalBrother,
    HeirCategory::MaternalSister,
    HeirCategory::FullBrothersSon,
    HeirCategory::PaternalBrothersSon,
    HeirCategory::FullPaternalUncle,
    HeirCategory::PaternalPaternalUncle,
    HeirCategory::FullUnclesSon,
    HeirCategory::PaternalUnclesSon,
];

use Blocker::{Heir, SisterWithDaughters};
use HeirCategory as C;

const BY_SON: &[Blocker] = &[Heir(C::Son)];
const BY_FATHER: &[Blocker] = &[Heir(C::Father)];
const BY_MOTHER: &[Blocker] = &[Heir(C::Mother)];
const FULL_SIBLING: &[Blocker] = &[Heir(C::Father), Heir(C::Son), Heir(C::SonsSon)];
const PATERNAL_SIBLING: &[Blocker] = &[
    Heir(C::Father),
    Heir(C::Son),
    Heir(C::SonsSon),
    Heir(C::FullBrother),
    SisterWithDaughters(C::FullSister),
];
const MATERNAL_SIBLING: &[Blocker] = &[
    Heir(C::Father),
    Heir(C::PaternalGrandfather),
    Heir(C::Son),
    Heir(C::Daughter),
    Heir(C::SonsSon),
    Heir(C::SonsDaughter),
];
const FULL_BROTHERS_SON: &[Blocker] = &[
    Heir(C::Father),
    Heir(C::PaternalGrandfather),
    Heir(C::Son),
    Heir(C::SonsSon),
    Heir(C::FullBrother),
    Heir(C::PaternalBrother),
    SisterWithDaughters(C::FullSister),
    SisterWithDaughters(C::PaternalSister),
];
const PATERNAL_BROTHERS_SON: &[Blocker] = &[
    Heir(C::Father),
    Heir(C::PaternalGrandfather),
    Heir(C::Son),
    Heir(C::SonsSon),
    Heir(C::FullBrother),
    Heir(C::PaternalBrother),
    SisterWithDaughters(C::FullSister),
    SisterWithDaughters(C::PaternalSister),
    Heir(C::FullBrothersSon),
];
const FULL_PATERNAL_UNCLE: &[Blocker] = &[
    Heir(C::Father),
    Heir(C::PaternalGrandfather),
    Heir(C::Son),
    Heir(C::SonsSon),
    Heir(C::FullBrother),
    Heir(C::PaternalBrother),
    SisterWithDaughters(C::FullSister),
    SisterWithDaughters(C::PaternalSister),
    Heir(C::FullBrothersSon),
    Heir(C::PaternalBrothersSon),
];
const PATERNAL_PATERNAL_UNCLE: &[Blocker] = &[
    Heir(C::Father),
    Heir(C::PaternalGrandfather),
    Heir(C::Son),
    Heir(C::SonsSon),
    Heir(C::FullBrother),
    Heir(C::PaternalBrother),
    SisterWithDaughters(C::FullSister),
    SisterWithDaughters(C::PaternalSister),
    Heir(C::FullBrothersSon),
    Heir(C::PaternalBrothersSon),
    Heir(C::FullPaternalUncle),
];
const FULL_UNCLES_SON: &[Blocker] = &[
    Heir(C::Father),
    Heir(C::PaternalGrandfather),
    Heir(C::Son),
    Heir(C::SonsSon),
    Heir(C::FullBrother),
    Heir(C::PaternalBrother),
    SisterWithDaughters(C::FullSister),
    SisterWithDaughters(C::PaternalSister),
    Heir(C::FullBrothersSon),
    Heir(C::PaternalBrothersSon),
    Heir(C::FullPaternalUncle),
    Heir(C::PaternalPaternalUncle),
];
const PATERNAL_UNCLES_SON: &[Blocker] = &[
    Heir(C::Father),
    Heir(C::PaternalGrandfather),
    Heir(C::Son),
    Heir(C::SonsSon),
    Heir(C::FullBrother),
    Heir(C::PaternalBrother),
    SisterWithDaughters(C::FullSister),
    SisterWithDaughters(C::PaternalSister),
    Heir(C::FullBrothersSon),
    Heir(C::PaternalBrothersSon),
    Heir(C::FullPaternalUncle),
    Heir(C::PaternalPaternalUncle),
    Heir(C::FullUnclesSon),
];

/// Precedence list for `category`; empty for categories never blocked.
pub const fn blocking_rules(category: HeirCategory) -> &'static [Blocker] {
    match category {
        C::Husband | C::Wife | C::Son | C::Daughter | C::Father | C::Mother => &[],
        C::SonsSon | C::SonsDaughter => BY_SON,
        C::PaternalGrandfather => BY_FATHER,
        C::PaternalGrandmother | C::MaternalGrandmother => BY_MOTHER,
        C::FullBrother | C::FullSister => FULL_SIBLING,
        C::PaternalBrother | C::PaternalSister => PATERNAL_SIBLING,
        C::MaternalBrother | C::MaternalSister => MATERNAL_SIBLING,
        C::FullBrothersSon => FULL_BROTHERS_SON,
        C::PaternalBrothersSon => PATERNAL_BROTHERS_SON,
        C::FullPaternalUncle => FULL_PATERNAL_UNCLE,
        C::PaternalPaternalUncle => PATERNAL_PATERNAL_UNCLE,
        C::FullUnclesSon => FULL_UNCLES_SON,
        C::PaternalUnclesSon => PATERNAL_UNCLES_SON,
    }
}

/// First blocker in force for `category`, if any.
pub fn block_reason(category: HeirCategory, c: &HeirComposition) -> Option<Blocker> {
    blocking_rules(category)
        .iter()
        .copied()
        .find(|blocker| blocker.applies(c))
}

pub fn is_blocked(category: HeirCategory, c: &HeirComposition) -> bool {
    block_reason(category, c).is_some()
}

pub fn evaluate_blocking(category: HeirCategory, c: &HeirComposition) -> BlockingOutcome {
    BlockingOutcome {
        category,
        blocked_by: block_reason(category, c),
    }
}

/// Evaluate every blockable category; the map always holds all
/// [`BLOCKABLE_CATEGORIES`] keys.
pub fn all_blockings(c: &HeirComposition) -> BlockingMap {
    BLOCKABLE_CATEGORIES
        .into_iter()
        .map(|category| (category, evaluate_blocking(category, c)))
        .collect()
}
