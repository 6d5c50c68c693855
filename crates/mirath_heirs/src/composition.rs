//! The heir-composition input record.

use serde::{Deserialize, Serialize};

use crate::category::HeirCategory;
use crate::error::{CompositionError, MAX_WIVES};

/// Who survives the deceased.
///
/// Boolean fields mark presence of a single individual. Count fields carry
/// head-counts; wives are counted because several may share one spouse
/// share. Husband and wives are mutually exclusive; see [`validate`].
///
/// [`validate`]: HeirComposition::validate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeirComposition {
    pub husband: bool,
    pub wives: u32,
    pub sons: u32,
    pub daughters: u32,
    pub sons_sons: u32,
    pub sons_daughters: u32,
    pub father: bool,
    pub mother: bool,
    pub paternal_grandfather: bool,
    pub paternal_grandmother: bool,
    pub maternal_grandmother: bool,
    pub full_brothers: u32,
    pub full_sisters: u32,
    pub paternal_brothers: u32,
    pub paternal_sisters: u32,
    pub maternal_brothers: u32,
    pub maternal_sisters: u32,
    pub full_brothers_sons: u32,
    pub paternal_brothers_sons: u32,
    pub full_paternal_uncles: u32,
    pub paternal_paternal_uncles: u32,
    pub full_uncles_sons: u32,
    pub paternal_uncles_sons: u32,
}

impl HeirComposition {
    pub fn builder() -> HeirCompositionBuilder {
        HeirCompositionBuilder::default()
    }

    /// Reject records the engine must never see.
    pub fn validate(&self) -> Result<(), CompositionError> {
        if self.husband && self.wives > 0 {
            return Err(CompositionError::SpouseConflict);
        }
        if self.wives > MAX_WIVES {
            return Err(CompositionError::TooManyWives(self.wives));
        }
        Ok(())
    }

    /// Head-count for a category (0 or 1 for single-individual fields).
    pub const fn count(&self, category: HeirCategory) -> u32 {
        use HeirCategory as C;
        match category {
            C::Husband => self.husband as u32,
            C::Wife => self.wives,
            C::Son => self.sons,
            C::Daughter => self.daughters,
            C::SonsSon => self.sons_sons,
            C::SonsDaughter => self.sons_daughters,
            C::Father => self.father as u32,
            C::Mother => self.mother as u32,
            C::PaternalGrandfather => self.paternal_grandfather as u32,
            C::PaternalGrandmother => self.paternal_grandmother as u32,
            C::MaternalGrandmother => self.maternal_grandmother as u32,
            C::FullBrother => self.full_brothers,
            C::FullSister => self.full_sisters,
            C::PaternalBrother => self.paternal_brothers,
            C::PaternalSister => self.paternal_sisters,
            C::MaternalBrother => self.maternal_brothers,
            C::MaternalSister => self.maternal_sisters,
            C::FullBrothersSon => self.full_brothers_sons,
            C::PaternalBrothersSon => self.paternal_brothers_sons,
            C::FullPaternalUncle => self.full_paternal_uncles,
            C::PaternalPaternalUncle => self.paternal_paternal_uncles,
            C::FullUnclesSon => self.full_uncles_sons,
            C::PaternalUnclesSon => self.paternal_uncles_sons,
        }
    }

    pub const fn is_present(&self, category: HeirCategory) -> bool {
        self.count(category) > 0
    }

    /// The present spouse category, if any.
    pub const fn spouse(&self) -> Option<HeirCategory> {
        if self.husband {
            Some(HeirCategory::Husband)
        } else if self.wives > 0 {
            Some(HeirCategory::Wife)
        } else {
            None
        }
    }

    pub const fn has_male_descendants(&self) -> bool {
        self.sons > 0 || self.sons_sons > 0
    }

    pub const fn has_female_descendants(&self) -> bool {
        self.daughters > 0 || self.sons_daughters > 0
    }

    pub const fn has_descendants(&self) -> bool {
        self.has_male_descendants() || self.has_female_descendants()
    }

    /// Siblings of every parentage and sex, blocked or not.
    pub const fn sibling_count(&self) -> u32 {
        self.full_brothers
            + self.full_sisters
            + self.paternal_brothers
            + self.paternal_sisters
            + self.maternal_brothers
            + self.maternal_sisters
    }

    pub const fn maternal_sibling_count(&self) -> u32 {
        self.maternal_brothers + self.maternal_sisters
    }

    pub const fn has_grandparents(&self) -> bool {
        self.paternal_grandfather || self.paternal_grandmother || self.maternal_grandmother
    }

    /// Kalala: neither father nor any descendant survives.
    pub const fn is_kalala(&self) -> bool {
        !self.father && !self.has_descendants()
    }

    /// No male residuary closer than siblings: no son, son's son, father or
    /// paternal grandfather.
    const fn no_lineal_male_residuary(&self) -> bool {
        !self.has_male_descendants() && !self.father && !self.paternal_grandfather
    }

    /// Full sisters inherit as residuaries beside a daughter or son's
    /// daughter (asaba ma'a al-ghayr): no full brother, no closer male
    /// residuary, and at least one female descendant.
    pub const fn full_sisters_residuary_with_other(&self) -> bool {
        self.full_sisters > 0
            && self.full_brothers == 0
            && self.has_female_descendants()
            && self.no_lineal_male_residuary()
    }

    /// Paternal sisters take the same role only when no full sibling
    /// survives and no paternal brother makes them ordinary residuaries.
    pub const fn paternal_sisters_residuary_with_other(&self) -> bool {
        self.paternal_sisters > 0
            && self.paternal_brothers == 0
            && self.full_brothers == 0
            && self.full_sisters == 0
            && self.has_female_descendants()
            && self.no_lineal_male_residuary()
    }

    /// The named dual-parent case: one spouse category, both parents, and
    /// no descendant, sibling or grandparent. Further collaterals do not
    /// matter since the father excludes all of them.
    pub const fn is_umariyyatan(&self) -> bool {
        self.spouse().is_some()
            && self.father
            && self.mother
            && !self.has_descendants()
            && self.sibling_count() == 0
            && !self.has_grandparents()
    }
}

/// Fluent constructor for [`HeirComposition`]; `build` validates.
#[derive(Debug, Clone, Default)]
pub struct HeirCompositionBuilder {
    inner: HeirComposition,
}

macro_rules! count_setters {
    ($($name:ident),* $(,)?) => {
        $(
            pub fn $name(mut self, n: u32) -> Self {
                self.inner.$name = n;
                self
            }
        )*
    };
}

macro_rules! flag_setters {
    ($($name:ident),* $(,)?) => {
        $(
            pub fn $name(mut self) -> Self {
                self.inner.$name = true;
                self
            }
        )*
    };
}

impl HeirCompositionBuilder {
    count_setters!(
        wives,
        sons,
        daughters,
        sons_sons,
        sons_daughters,
        full_brothers,
        full_sisters,
        paternal_brothers,
        paternal_sisters,
        maternal_brothers,
        maternal_sisters,
        full_brothers_sons,
        paternal_brothers_sons,
        full_paternal_uncles,
        paternal_paternal_uncles,
        full_uncles_sons,
        paternal_uncles_sons,
    );

    flag_setters!(
        husband,
        father,
        mother,
        paternal_grandfather,
        paternal_grandmother,
        maternal_grandmother,
    );

    /// One wife; shorthand for `wives(1)`.
    pub fn wife(self) -> Self {
        self.wives(1)
    }

    /// Set the head-count of any category. Single-individual categories
    /// become present for any non-zero count.
    pub fn with(mut self, category: HeirCategory, n: u32) -> Self {
        use HeirCategory as C;
        let c = &mut self.inner;
        match category {
            C::Husband => c.husband = n > 0,
            C::Wife => c.wives = n,
            C::Son => c.sons = n,
            C::Daughter => c.daughters = n,
            C::SonsSon => c.sons_sons = n,
            C::SonsDaughter => c.sons_daughters = n,
            C::Father => c.father = n > 0,
            C::Mother => c.mother = n > 0,
            C::PaternalGrandfather => c.paternal_grandfather = n > 0,
            C::PaternalGrandmother => c.paternal_grandmother = n > 0,
            C::MaternalGrandmother => c.maternal_grandmother = n > 0,
            C::FullBrother => c.full_brothers = n,
            C::FullSister => c.full_sisters = n,
            C::PaternalBrother => c.paternal_brothers = n,
            C::PaternalSister => c.paternal_sisters = n,
            C::MaternalBrother => c.maternal_brothers = n,
            C::MaternalSister => c.maternal_sisters = n,
            C::FullBrothersSon => c.full_brothers_sons = n,
            C::PaternalBrothersSon => c.paternal_brothers_sons = n,
            C::FullPaternalUncle => c.full_paternal_uncles = n,
            C::PaternalPaternalUncle => c.paternal_paternal_uncles = n,
            C::FullUnclesSon => c.full_uncles_sons = n,
            C::PaternalUnclesSon => c.paternal_uncles_sons = n,
        }
        self
    }

    pub fn build(self) -> Result<HeirComposition, CompositionError> {
        self.inner.validate()?;
        Ok(self.inner)
    }

    /// The record as built so far, without validation.
    pub fn build_unchecked(self) -> HeirComposition {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::ALL_CATEGORIES;

    #[test]
    fn empty_is_valid() {
        assert_eq!(HeirComposition::default().validate(), Ok(()));
    }

    #[test]
    fn spouse_conflict_rejected() {
        let err = HeirComposition::builder().husband().wife().build();
        assert_eq!(err, Err(CompositionError::SpouseConflict));
    }

    #[test]
    fn too_many_wives_rejected() {
        let err = HeirComposition::builder().wives(5).build();
        assert_eq!(err, Err(CompositionError::TooManyWives(5)));
        assert!(HeirComposition::builder().wives(4).build().is_ok());
    }

    #[test]
    fn with_and_count_agree() {
        for c in ALL_CATEGORIES {
            let comp = HeirComposition::builder().with(c, 2).build_unchecked();
            let expected = match c {
                HeirCategory::Husband
                | HeirCategory::Father
                | HeirCategory::Mother
                | HeirCategory::PaternalGrandfather
                | HeirCategory::PaternalGrandmother
                | HeirCategory::MaternalGrandmother => 1,
                _ => 2,
            };
            assert_eq!(comp.count(c), expected, "{c:?}");
            for other in ALL_CATEGORIES.into_iter().filter(|o| *o != c) {
                assert_eq!(comp.count(other), 0, "{other:?} leaked from {c:?}");
            }
        }
    }

    #[test]
    fn descendant_helpers() {
        let c = HeirComposition::builder().sons_daughters(1).build_unchecked();
        assert!(c.has_descendants());
        assert!(c.has_female_descendants());
        assert!(!c.has_male_descendants());
        assert!(!c.is_kalala());
    }

    #[test]
    fn kalala_requires_no_father_and_no_descendant() {
        assert!(HeirComposition::builder().mother().build_unchecked().is_kalala());
        assert!(!HeirComposition::builder().father().build_unchecked().is_kalala());
    }

    #[test]
    fn sister_with_daughter_is_residuary_with_other() {
        let c = HeirComposition::builder()
            .daughters(1)
            .full_sisters(1)
            .build_unchecked();
        assert!(c.full_sisters_residuary_with_other());

        let with_brother = HeirComposition::builder()
            .daughters(1)
            .full_sisters(1)
            .full_brothers(1)
            .build_unchecked();
        assert!(!with_brother.full_sisters_residuary_with_other());

        let with_father = HeirComposition::builder()
            .daughters(1)
            .full_sisters(1)
            .father()
            .build_unchecked();
        assert!(!with_father.full_sisters_residuary_with_other());
    }

    #[test]
    fn paternal_sister_yields_to_full_sister() {
        let c = HeirComposition::builder()
            .daughters(1)
            .full_sisters(1)
            .paternal_sisters(1)
            .build_unchecked();
        assert!(!c.paternal_sisters_residuary_with_other());

        let alone = HeirComposition::builder()
            .daughters(1)
            .paternal_sisters(2)
            .build_unchecked();
        assert!(alone.paternal_sisters_residuary_with_other());
    }

    #[test]
    fn umariyyatan_shape() {
        let c = HeirComposition::builder().wife().father().mother().build().unwrap();
        assert!(c.is_umariyyatan());

        let with_sibling = HeirComposition::builder()
            .husband()
            .father()
            .mother()
            .maternal_sisters(1)
            .build()
            .unwrap();
        assert!(!with_sibling.is_umariyyatan());

        let with_uncle = HeirComposition::builder()
            .husband()
            .father()
            .mother()
            .full_paternal_uncles(1)
            .build()
            .unwrap();
        assert!(with_uncle.is_umariyyatan());
    }

    #[test]
    fn json_accepts_partial_camel_case() {
        let c: HeirComposition =
            serde_json::from_str(r#"{"husband": true, "sonsDaughters": 2}"#).unwrap();
        assert!(c.husband);
        assert_eq!(c.sons_daughters, 2);
        assert_eq!(c.sons, 0);
    }
}
