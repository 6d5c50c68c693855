//! Error types for heir composition input.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Largest number of wives a composition may carry.
pub const MAX_WIVES: u32 = 4;

/// A composition record that cannot enter the rule engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompositionError {
    /// Husband and wife both marked present.
    SpouseConflict,
    /// More wives than [`MAX_WIVES`].
    TooManyWives(u32),
}

impl Display for CompositionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SpouseConflict => write!(f, "husband and wife cannot both be present"),
            Self::TooManyWives(n) => write!(f, "at most {MAX_WIVES} wives, got {n}"),
        }
    }
}

impl Error for CompositionError {}
