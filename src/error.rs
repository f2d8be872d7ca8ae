// SPDX-License-Identifier: MPL-2.0

//! Error types for bound construction and parsing.

use thiserror::Error;

/// A bound that would contain no values.
///
/// Construction rejects these outright instead of normalizing them: a caller
/// holding a [`Bound`](crate::Bound) may rely on it being non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidBound {
    /// The lower edge compares above the upper edge.
    #[error("lower edge is above the upper edge")]
    Inverted,
    /// Both edges share one value but at least one of them is excluded, so
    /// not even that value is inside.
    #[error("bound contains no values")]
    Empty,
}

/// Failure to parse a bound from its textual `[lo:hi)` notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseBoundError<E> {
    /// Missing bracket, missing `:` divider, or input too short to hold a
    /// bound at all.
    #[error("invalid bound syntax")]
    Syntax,
    /// Both values parsed but the resulting bound would be empty.
    #[error("invalid bound: {0}")]
    Invalid(#[from] InvalidBound),
    /// The caller-supplied value parser rejected one of the two values.
    #[error("invalid bound value: {0}")]
    Value(E),
}
