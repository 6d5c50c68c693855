//! Exact estate distribution among heirs.
//!
//! [`compute_distribution`] takes a [`HeirComposition`] and an estate value
//! and returns one [`AllocationEntry`] per present heir category, with exact
//! fractions that sum to one.
//!
//! # Quick start
//!
//! ```rust
//! use mirath_engine::*;
//!
//! let heirs = HeirComposition::builder().wife().sons(1).daughters(2).build().unwrap();
//! let result = compute_distribution(&heirs, 120_000.0).unwrap();
//! assert_eq!(result.fraction_of(HeirCategory::Wife), Rational::frac(1, 8));
//! assert_eq!(result.fraction_of(HeirCategory::Son), Rational::frac(7, 16));
//! assert_eq!(result.allocated(), Rational::ONE);
//! ```

pub mod distribution;
pub mod error;
pub mod types;

pub use distribution::{compute_distribution, compute_distribution_with, fraction_from_decimal};
pub use error::EngineError;
pub use types::{AllocationEntry, AllocationResult, CorrectionOutcome, ShareBasis};

// Re-export input and rule types so callers need only this crate.
pub use mirath_config::{ConfigError, DistributionConfig};
pub use mirath_heirs::{
    ALL_CATEGORIES, Blocker, BlockingOutcome, CompositionError, ExceptionCase, ExceptionShares,
    HeirCategory, HeirComposition, HeirCompositionBuilder, RaddShare, Redistribution, Reduction,
    Sex, ShareRule, all_blockings, descriptor,
};
pub use mirath_rational::{Rational, RationalError};
