//! Heir rules for exact estate distribution.
//!
//! This crate provides:
//! - The heir taxonomy with a static descriptor per category
//! - The composition record and its validation
//! - Exclusion (hijb) rules with ordered precedence
//! - Fixed shares (furud) and the residuary (asaba) priority scan
//! - Reduction (awl), redistribution (radd) and the dual-parent exception
//!
//! Every function here is pure and works on exact [`Rational`] values.
//!
//! [`Rational`]: mirath_rational::Rational

pub mod asaba;
pub mod blocking;
pub mod category;
pub mod composition;
pub mod correction;
pub mod error;
pub mod furud;

pub use asaba::{
    ASABA_PRIORITY, AsabaDistribution, AsabaTier, ResiduaryInfo, calculate_asaba, resolve_asaba,
};
pub use blocking::{
    BLOCKABLE_CATEGORIES, Blocker, BlockingMap, BlockingOutcome, all_blockings, block_reason,
    blocking_rules, evaluate_blocking, is_blocked,
};
pub use category::{ALL_CATEGORIES, DESCRIPTORS, HeirCategory, HeirDescriptor, Sex, descriptor};
pub use composition::{HeirComposition, HeirCompositionBuilder};
pub use correction::{
    ExceptionCase, ExceptionShares, RaddShare, Redistribution, Reduction, check_awl, check_radd,
    check_umariyyatan, common_base,
};
pub use error::{CompositionError, MAX_WIVES};
pub use furud::{
    FixedShare, ShareRule, applicable_shares, calculate_fixed_shares_total, calculate_remainder,
    share_rule,
};
