//! Output records of a distribution.

use mirath_heirs::{Blocker, ExceptionShares, HeirCategory, Redistribution, Reduction};
use mirath_rational::Rational;
use serde::Serialize;

/// How an entry's share was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareBasis {
    Fixed,
    Residuary,
    FixedAndResiduary,
    /// Set by the dual-parent exception.
    Exception,
    Blocked,
}

/// One present heir category and what it receives.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEntry {
    pub category: HeirCategory,
    pub count: u32,
    pub basis: ShareBasis,
    /// Fixed share plus residuary portion, before reduction or redistribution.
    pub raw_fraction: Rational,
    pub final_fraction: Rational,
    /// `final_fraction / count`.
    pub per_head: Rational,
    pub percentage: f64,
    pub amount: f64,
    pub blocked: bool,
    pub blocked_by: Option<Blocker>,
    pub citation: &'static str,
}

/// The corrective procedure that shaped the final fractions, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorrectionOutcome {
    NotApplied,
    Reduction(Reduction),
    Redistribution(Redistribution),
    Exception(ExceptionShares),
}

impl CorrectionOutcome {
    pub const fn key(&self) -> &'static str {
        match self {
            Self::NotApplied => "none",
            Self::Reduction(_) => "awl",
            Self::Redistribution(_) => "radd",
            Self::Exception(e) => e.case.key(),
        }
    }

    pub const fn is_applied(&self) -> bool {
        !matches!(self, Self::NotApplied)
    }
}

/// Result of one distribution request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    /// Every present category once, in canonical order.
    pub entries: Vec<AllocationEntry>,
    pub correction: CorrectionOutcome,
    /// Fraction nobody receives; zero unless only spouses inherit.
    pub unallocated: Rational,
    pub estate: f64,
}

impl AllocationResult {
    pub fn entry(&self, category: HeirCategory) -> Option<&AllocationEntry> {
        self.entries.iter().find(|e| e.category == category)
    }

    /// Final fraction of `category`; zero when absent or blocked.
    pub fn fraction_of(&self, category: HeirCategory) -> Rational {
        self.entry(category)
            .map_or(Rational::ZERO, |e| e.final_fraction)
    }

    /// Sum of all final fractions.
    pub fn allocated(&self) -> Rational {
        self.entries.iter().map(|e| e.final_fraction).sum()
    }

    pub fn unblocked(&self) -> impl Iterator<Item = &AllocationEntry> {
        self.entries.iter().filter(|e| !e.blocked)
    }

    pub fn blocked(&self) -> impl Iterator<Item = &AllocationEntry> {
        self.entries.iter().filter(|e| e.blocked)
    }
}
