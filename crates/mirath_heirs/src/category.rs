//! Heir categories and their static descriptors.
//!
//! Every relative the engine knows about belongs to exactly one
//! [`HeirCategory`]. The descriptor table pairs each category with its sex,
//! whether it can ever be residuary (asaba), its share function, and an
//! opaque citation carried through to the output unchanged.

use serde::{Deserialize, Serialize};

use crate::composition::HeirComposition;
use crate::furud::{self, ShareRule};

/// Sex of an heir category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

/// The heir taxonomy, in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeirCategory {
    Husband,
    Wife,
    Son,
    Daughter,
    SonsSon,
    SonsDaughter,
    Father,
    Mother,
    PaternalGrandfather,
    PaternalGrandmother,
    MaternalGrandmother,
    FullBrother,
    FullSister,
    PaternalBrother,
    PaternalSister,
    MaternalBrother,
    MaternalSister,
    FullBrothersSon,
    PaternalBrothersSon,
    FullPaternalUncle,
    PaternalPaternalUncle,
    FullUnclesSon,
    PaternalUnclesSon,
}

/// All 23 categories in canonical order.
pub const ALL_CATEGORIES: [HeirCategory; 23] = [
    HeirCategory::Husband,
    HeirCategory::Wife,
    HeirCategory::Son,
    HeirCategory::Daughter,
    HeirCategory::SonsSon,
    HeirCategory::SonsDaughter,
    HeirCategory::Father,
    HeirCategory::Mother,
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

impl HeirCategory {
    /// Stable snake_case key for localization lookups.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Husband => "husband",
            Self::Wife => "wife",
            Self::Son => "son",
            Self::Daughter => "daughter",
            Self::SonsSon => "sons_son",
            Self::SonsDaughter => "sons_daughter",
            Self::Father => "father",
            Self::Mother => "mother",
            Self::PaternalGrandfather => "paternal_grandfather",
            Self::PaternalGrandmother => "paternal_grandmother",
            Self::MaternalGrandmother => "maternal_grandmother",
            Self::FullBrother => "full_brother",
            Self::FullSister => "full_sister",
            Self::PaternalBrother => "paternal_brother",
            Self::PaternalSister => "paternal_sister",
            Self::MaternalBrother => "maternal_brother",
            Self::MaternalSister => "maternal_sister",
            Self::FullBrothersSon => "full_brothers_son",
            Self::PaternalBrothersSon => "paternal_brothers_son",
            Self::FullPaternalUncle => "full_paternal_uncle",
            Self::PaternalPaternalUncle => "paternal_paternal_uncle",
            Self::FullUnclesSon => "full_uncles_son",
            Self::PaternalUnclesSon => "paternal_uncles_son",
        }
    }

    /// Transliterated Arabic name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Husband => "Zawj",
            Self::Wife => "Zawjah",
            Self::Son => "Ibn",
            Self::Daughter => "Bint",
            Self::SonsSon => "Ibn al-Ibn",
            Self::SonsDaughter => "Bint al-Ibn",
            Self::Father => "Ab",
            Self::Mother => "Umm",
            Self::PaternalGrandfather => "Jadd",
            Self::PaternalGrandmother => "Jaddah li-Ab",
            Self::MaternalGrandmother => "Jaddah li-Umm",
            Self::FullBrother => "Akh Shaqiq",
            Self::FullSister => "Ukht Shaqiqah",
            Self::PaternalBrother => "Akh li-Ab",
            Self::PaternalSister => "Ukht li-Ab",
            Self::MaternalBrother => "Akh li-Umm",
            Self::MaternalSister => "Ukht li-Umm",
            Self::FullBrothersSon => "Ibn al-Akh al-Shaqiq",
            Self::PaternalBrothersSon => "Ibn al-Akh li-Ab",
            Self::FullPaternalUncle => "Amm Shaqiq",
            Self::PaternalPaternalUncle => "Amm li-Ab",
            Self::FullUnclesSon => "Ibn al-Amm al-Shaqiq",
            Self::PaternalUnclesSon => "Ibn al-Amm li-Ab",
        }
    }

    /// English name.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Husband => "Husband",
            Self::Wife => "Wife",
            Self::Son => "Son",
            Self::Daughter => "Daughter",
            Self::SonsSon => "Son's son",
            Self::SonsDaughter => "Son's daughter",
            Self::Father => "Father",
            Self::Mother => "Mother",
            Self::PaternalGrandfather => "Paternal grandfather",
            Self::PaternalGrandmother => "Paternal grandmother",
            Self::MaternalGrandmother => "Maternal grandmother",
            Self::FullBrother => "Full brother",
            Self::FullSister => "Full sister",
            Self::PaternalBrother => "Paternal half-brother",
            Self::PaternalSister => "Paternal half-sister",
            Self::MaternalBrother => "Maternal half-brother",
            Self::MaternalSister => "Maternal half-sister",
            Self::FullBrothersSon => "Full brother's son",
            Self::PaternalBrothersSon => "Paternal half-brother's son",
            Self::FullPaternalUncle => "Full paternal uncle",
            Self::PaternalPaternalUncle => "Paternal half paternal uncle",
            Self::FullUnclesSon => "Full paternal uncle's son",
            Self::PaternalUnclesSon => "Paternal half uncle's son",
        }
    }

    /// 0-based index into [`ALL_CATEGORIES`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn sex(self) -> Sex {
        match self {
            Self::Wife
            | Self::Daughter
            | Self::SonsDaughter
            | Self::Mother
            | Self::PaternalGrandmother
            | Self::MaternalGrandmother
            | Self::FullSister
            | Self::PaternalSister
            | Self::MaternalSister => Sex::Female,
            _ => Sex::Male,
        }
    }

    pub const fn is_spouse(self) -> bool {
        matches!(self, Self::Husband | Self::Wife)
    }

    /// Parse a [`key`](Self::key) back into a category.
    pub fn from_key(key: &str) -> Option<Self> {
        ALL_CATEGORIES.into_iter().find(|c| c.key() == key)
    }
}

/// Static description of one heir category.
#[derive(Clone, Copy)]
pub struct HeirDescriptor {
    pub category: HeirCategory,
    pub sex: Sex,
    /// Whether the category is ever residuary (alone, beside a brother, or
    /// beside a female descendant).
    pub residuary: bool,
    /// Statutory share assuming the category is present and unblocked.
    pub share: fn(&HeirComposition) -> ShareRule,
    /// Opaque source reference.
    pub citation: &'static str,
}

impl std::fmt::Debug for HeirDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeirDescriptor")
            .field("category", &self.category)
            .field("sex", &self.sex)
            .field("residuary", &self.residuary)
            .field("citation", &self.citation)
            .finish_non_exhaustive()
    }
}

const QURAN_4_11: &str = "Qur'an 4:11";
const QURAN_4_12: &str = "Qur'an 4:12";
const QURAN_4_176: &str = "Qur'an 4:176";
const BUKHARI_6732: &str = "Sahih al-Bukhari 6732";
const BUKHARI_6736: &str = "Sahih al-Bukhari 6736";
const ABU_DAWUD_2894: &str = "Sunan Abi Dawud 2894";
const ABU_DAWUD_2896: &str = "Sunan Abi Dawud 2896";

const fn descriptor_entry(
    category: HeirCategory,
    sex: Sex,
    residuary: bool,
    share: fn(&HeirComposition) -> ShareRule,
    citation: &'static str,
) -> HeirDescriptor {
    HeirDescriptor {
        category,
        sex,
        residuary,
        share,
        citation,
    }
}

/// Descriptor table, indexed by [`HeirCategory::index`].
pub static DESCRIPTORS: [HeirDescriptor; 23] = {
    use HeirCategory as C;
    use Sex::{Female, Male};
    [
        descriptor_entry(C::Husband, Male, false, furud::husband, QURAN_4_12),
        descriptor_entry(C::Wife, Female, false, furud::wife, QURAN_4_12),
        descriptor_entry(C::Son, Male, true, furud::residuary_only, QURAN_4_11),
        descriptor_entry(C::Daughter, Female, true, furud::daughter, QURAN_4_11),
        descriptor_entry(C::SonsSon, Male, true, furud::residuary_only, BUKHARI_6732),
        descriptor_entry(C::SonsDaughter, Female, true, furud::sons_daughter, BUKHARI_6736),
        descriptor_entry(C::Father, Male, true, furud::father, QURAN_4_11),
        descriptor_entry(C::Mother, Female, false, furud::mother, QURAN_4_11),
        descriptor_entry(
            C::PaternalGrandfather,
            Male,
            true,
            furud::paternal_grandfather,
            ABU_DAWUD_2896,
        ),
        descriptor_entry(C::PaternalGrandmother, Female, false, furud::grandmother, ABU_DAWUD_2894),
        descriptor_entry(C::MaternalGrandmother, Female, false, furud::grandmother, ABU_DAWUD_2894),
        descriptor_entry(C::FullBrother, Male, true, furud::residuary_only, QURAN_4_176),
        descriptor_entry(C::FullSister, Female, true, furud::full_sister, QURAN_4_176),
        descriptor_entry(C::PaternalBrother, Male, true, furud::residuary_only, QURAN_4_176),
        descriptor_entry(C::PaternalSister, Female, true, furud::paternal_sister, QURAN_4_176),
        descriptor_entry(C::MaternalBrother, Male, false, furud::maternal_brother, QURAN_4_12),
        descriptor_entry(C::MaternalSister, Female, false, furud::maternal_sister, QURAN_4_12),
        descriptor_entry(C::FullBrothersSon, Male, true, furud::residuary_only, BUKHARI_6732),
        descriptor_entry(C::PaternalBrothersSon, Male, true, furud::residuary_only, BUKHARI_6732),
        descriptor_entry(C::FullPaternalUncle, Male, true, furud::residuary_only, BUKHARI_6732),
        descriptor_entry(C::PaternalPaternalUncle, Male, true, furud::residuary_only, BUKHARI_6732),
        descriptor_entry(C::FullUnclesSon, Male, true, furud::residuary_only, BUKHARI_6732),
        descriptor_entry(C::PaternalUnclesSon, Male, true, furud::residuary_only, BUKHARI_6732),
    ]
};

/// Descriptor for a category.
pub fn descriptor(category: HeirCategory) -> &'static HeirDescriptor {
    &DESCRIPTORS[category.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_categories_count() {
        assert_eq!(ALL_CATEGORIES.len(), 23);
    }

    #[test]
    fn indices_sequential() {
        for (i, c) in ALL_CATEGORIES.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn descriptor_table_aligned() {
        for c in ALL_CATEGORIES {
            assert_eq!(descriptor(c).category, c, "descriptor row for {c:?}");
        }
    }

    #[test]
    fn keys_unique_and_round_trip() {
        for c in ALL_CATEGORIES {
            assert_eq!(HeirCategory::from_key(c.key()), Some(c));
        }
        assert_eq!(HeirCategory::from_key("cousin"), None);
    }

    #[test]
    fn names_nonempty() {
        for c in ALL_CATEGORIES {
            assert!(!c.name().is_empty());
            assert!(!c.english_name().is_empty());
            assert!(!descriptor(c).citation.is_empty());
        }
    }

    #[test]
    fn descriptor_sex_matches_category() {
        for c in ALL_CATEGORIES {
            assert_eq!(descriptor(c).sex, c.sex(), "{c:?}");
        }
    }

    #[test]
    fn sexes() {
        assert_eq!(HeirCategory::Husband.sex(), Sex::Male);
        assert_eq!(HeirCategory::Wife.sex(), Sex::Female);
        assert_eq!(HeirCategory::SonsDaughter.sex(), Sex::Female);
        assert_eq!(HeirCategory::FullUnclesSon.sex(), Sex::Male);
    }

    #[test]
    fn spouses_and_fixed_only_categories_never_residuary() {
        for c in [
            HeirCategory::Husband,
            HeirCategory::Wife,
            HeirCategory::Mother,
            HeirCategory::PaternalGrandmother,
            HeirCategory::MaternalGrandmother,
            HeirCategory::MaternalBrother,
            HeirCategory::MaternalSister,
        ] {
            assert!(!descriptor(c).residuary, "{c:?}");
        }
    }

    #[test]
    fn serde_uses_keys() {
        let json = serde_json::to_string(&HeirCategory::SonsDaughter).unwrap();
        assert_eq!(json, "\"sons_daughter\"");
    }
}
