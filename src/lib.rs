// SPDX-License-Identifier: MPL-2.0

//! An interval-set algebra over arbitrary totally ordered domains.
//!
//! A [`Span`] represents a subset of some ordered domain as a sorted list of
//! non-overlapping, maximally merged [`Bound`]s. Each bound is a contiguous
//! range between two [`Edge`]s, and each edge is a domain value plus a flag
//! telling whether the value itself belongs to the range (`[`/`]` in the
//! textual notation) or not (`(`/`)`).
//!
//! The algebra never assumes anything about the element type beyond a
//! caller-supplied [`Compare`] function, so it works for integers, floats,
//! characters, timestamps or any other type with a total order. Discrete
//! domains can additionally supply a [`Next`] successor function, which lets
//! a union coalesce bounds across gaps that contain no representable value:
//! `[1:2]` and `[3:4]` merge into `[1:4]` over the integers, but stay apart
//! over the reals.
//!
//! ```
//! use spanset::{domain, Bound};
//!
//! let span = domain::discrete([Bound::closed(1, 2)?, Bound::closed(3, 4)?]);
//! // 2 and 3 have no integer strictly between them, so the bounds coalesce.
//! assert_eq!(span.to_string(), "[1:4]");
//! assert!(span.contains(&3));
//!
//! // Removing the open interior leaves the two end points.
//! let punched = span.difference_bound(&Bound::open(1, 4)?);
//! assert_eq!(punched.to_string(), "[1:1][4:4]");
//! # Ok::<(), spanset::InvalidBound>(())
//! ```
//!
//! Bounds can also be parsed from and formatted to a compact bracket
//! notation, which makes equality-by-string assertions convenient in tests:
//!
//! ```
//! use spanset::{domain, Bound};
//!
//! let b = Bound::parse("[2.5:7)", |s| s.parse::<f64>(), domain::cmp_f64)?;
//! assert_eq!(b.to_string(), "[2.5:7)");
//! # Ok::<(), spanset::ParseBoundError<std::num::ParseFloatError>>(())
//! ```
//!
//! ## Optional features
//!
//! * `serde`: serialization for [`Edge`], [`Bound`] and [`Span`] (spans
//!   serialize their bound list only; the comparator and successor functions
//!   cannot be deserialized).
//! * `proptest`: exports a proptest strategy for `Span<i32>`.

use std::cmp::Ordering;

pub mod domain;

mod bound;
mod edge;
mod error;
mod span;

pub use bound::{union_bounds, Bound};
pub use edge::{is_near, max_edge, min_edge, Edge};
pub use error::{InvalidBound, ParseBoundError};
#[cfg(any(feature = "proptest", test))]
pub use span::proptest_strategy;
pub use span::Span;

/// Total order over the element type, supplied by the caller.
///
/// Every operation of the algebra is parameterized over this function; the
/// element type's own `Ord` impl (if any) is never consulted. Two spans built
/// with different comparators are not meaningfully comparable.
pub type Compare<T> = fn(&T, &T) -> Ordering;

/// Successor function for discrete domains.
///
/// `next(value, toward)` steps `value` one representable unit in the
/// direction of `toward` and returns `value` unchanged when the two are
/// equal. It is consulted only to decide whether two closed edges are
/// adjacent with no value in between; continuous domains pass `None` and
/// never coalesce across a gap.
pub type Next<T> = fn(&T, &T) -> T;
