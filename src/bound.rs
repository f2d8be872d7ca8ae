// SPDX-License-Identifier: MPL-2.0

//! A single contiguous range between two [`Edge`]s, and the pairwise
//! interval arithmetic the [`Span`](crate::Span) layer is built on.
//!
//! The key computation in every operation is the relative placement of the
//! two lower and the two upper edges, so most methods follow one template:
//! compare the boundary values that matter, then discharge the value ties
//! with the inclusion flags. Each method calls the comparator at most twice.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use smallvec::SmallVec;

use crate::edge::{is_near, max_edge, min_edge, Edge};
use crate::error::{InvalidBound, ParseBoundError};
use crate::{Compare, Next};

/// One contiguous, non-empty range `lo..hi`, each side independently open or
/// closed.
///
/// A bound is a validated immutable value: `lo` never compares above `hi`,
/// and a single-point bound is closed on both ends. Operations return new
/// bounds instead of mutating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bound<T> {
    lo: Edge<T>,
    hi: Edge<T>,
}

impl<T> Bound<T> {
    /// Builds a bound from two edges, rejecting inverted and empty ranges.
    pub fn from_edges(lo: Edge<T>, hi: Edge<T>, cmp: Compare<T>) -> Result<Self, InvalidBound> {
        match cmp(&lo.value, &hi.value) {
            Ordering::Greater => Err(InvalidBound::Inverted),
            Ordering::Equal if !(lo.included && hi.included) => Err(InvalidBound::Empty),
            _ => Ok(Self { lo, hi }),
        }
    }

    /// For results of operations on already-valid bounds, where the edge
    /// order is guaranteed by construction.
    pub(crate) fn new_unchecked(lo: Edge<T>, hi: Edge<T>) -> Self {
        Self { lo, hi }
    }

    pub fn lo(&self) -> &Edge<T> {
        &self.lo
    }

    pub fn hi(&self) -> &Edge<T> {
        &self.hi
    }

    pub fn into_edges(self) -> (Edge<T>, Edge<T>) {
        (self.lo, self.hi)
    }
}

impl<T: Ord> Bound<T> {
    /// Builds a bound over an `Ord` domain, using the order of the type.
    pub fn new(lo_included: bool, lo: T, hi: T, hi_included: bool) -> Result<Self, InvalidBound> {
        Self::from_edges(
            Edge::new(lo, lo_included),
            Edge::new(hi, hi_included),
            crate::domain::ord,
        )
    }

    /// `[lo:hi]`
    pub fn closed(lo: T, hi: T) -> Result<Self, InvalidBound> {
        Self::new(true, lo, hi, true)
    }

    /// `(lo:hi)`
    pub fn open(lo: T, hi: T) -> Result<Self, InvalidBound> {
        Self::new(false, lo, hi, false)
    }

    /// `[lo:hi)`
    pub fn closed_open(lo: T, hi: T) -> Result<Self, InvalidBound> {
        Self::new(true, lo, hi, false)
    }

    /// `(lo:hi]`
    pub fn open_closed(lo: T, hi: T) -> Result<Self, InvalidBound> {
        Self::new(false, lo, hi, true)
    }
}

impl<T> Bound<T> {
    /// Whether every value of `other` is inside `self`.
    pub fn contains(&self, cmp: Compare<T>, other: &Bound<T>) -> bool {
        let lo_cmp = cmp(&self.lo.value, &other.lo.value);
        let hi_cmp = cmp(&self.hi.value, &other.hi.value);

        // On a shared boundary value the other side may only be as open as
        // this one: a closed edge covers both flavors, an open edge covers
        // open only.
        let start_within = lo_cmp == Ordering::Less
            || (lo_cmp == Ordering::Equal && (self.lo.included || !other.lo.included));
        let end_within = hi_cmp == Ordering::Greater
            || (hi_cmp == Ordering::Equal && (self.hi.included || !other.hi.included));

        start_within && end_within
    }

    /// Whether the two ranges share at least one value. Bounds touching at a
    /// point excluded from either side do not overlap.
    pub fn overlaps(&self, cmp: Compare<T>, other: &Bound<T>) -> bool {
        let lo_hi_cmp = cmp(&self.lo.value, &other.hi.value);
        let hi_lo_cmp = cmp(&self.hi.value, &other.lo.value);

        let other_below = lo_hi_cmp == Ordering::Greater
            || (lo_hi_cmp == Ordering::Equal && !(self.lo.included && other.hi.included));
        let other_above = hi_lo_cmp == Ordering::Less
            || (hi_lo_cmp == Ordering::Equal && !(self.hi.included && other.lo.included));

        !other_below && !other_above
    }

    /// Placement of the bound relative to a single value: `Greater` when the
    /// bound lies entirely above the value, `Less` when entirely below,
    /// `Equal` when the value is contained. The return convention makes the
    /// method usable directly as a `binary_search_by` probe over a sorted
    /// bound list.
    pub fn position(&self, cmp: Compare<T>, value: &T) -> Ordering {
        let lo_cmp = cmp(&self.lo.value, value);
        if lo_cmp == Ordering::Greater || (lo_cmp == Ordering::Equal && !self.lo.included) {
            return Ordering::Greater;
        }
        let hi_cmp = cmp(&self.hi.value, value);
        if hi_cmp == Ordering::Less || (hi_cmp == Ordering::Equal && !self.hi.included) {
            return Ordering::Less;
        }
        Ordering::Equal
    }
}

impl<T: Clone> Bound<T> {
    /// The set difference `self − other` as zero, one or two bounds.
    ///
    /// Each side of the cut is computed independently and emitted only when
    /// non-empty: below `other` the piece keeps `self.lo` and ends at the
    /// inclusion complement of `other.lo` (collapsing to the single closed
    /// point when the lower values are equal and only `other`'s is open),
    /// and symmetrically above `other`.
    pub fn difference(&self, cmp: Compare<T>, other: &Bound<T>) -> SmallVec<[Bound<T>; 2]> {
        let mut pieces = SmallVec::new();

        if other.contains(cmp, self) {
            return pieces;
        }
        if !self.overlaps(cmp, other) {
            pieces.push(self.clone());
            return pieces;
        }

        match cmp(&other.lo.value, &self.lo.value) {
            Ordering::Equal => {
                // [1:3] - (1:2] = [1:1] (2:3]
                if self.lo.included && !other.lo.included {
                    let point = Edge::included(self.lo.value.clone());
                    pieces.push(Bound::new_unchecked(point.clone(), point));
                }
            }
            Ordering::Greater => {
                // [1:3] - [2:3] = [1:2)
                pieces.push(Bound::new_unchecked(
                    self.lo.clone(),
                    Edge::new(other.lo.value.clone(), !other.lo.included),
                ));
            }
            Ordering::Less => {}
        }

        match cmp(&other.hi.value, &self.hi.value) {
            Ordering::Equal => {
                // [1:3] - [1:3) = [3:3]
                if self.hi.included && !other.hi.included {
                    let point = Edge::included(self.hi.value.clone());
                    pieces.push(Bound::new_unchecked(point.clone(), point));
                }
            }
            Ordering::Less => {
                // [1:3] - [1:2] = (2:3]
                pieces.push(Bound::new_unchecked(
                    Edge::new(other.hi.value.clone(), !other.hi.included),
                    self.hi.clone(),
                ));
            }
            Ordering::Greater => {}
        }

        pieces
    }
}

/// Merges two bounds into one when they overlap, one contains the other, or
/// their facing edges are adjacent per [`is_near`]. Returns `None` when the
/// bounds are separated by a real gap.
pub fn union_bounds<T: Clone>(
    next: Option<Next<T>>,
    cmp: Compare<T>,
    a: &Bound<T>,
    b: &Bound<T>,
) -> Option<Bound<T>> {
    if a.contains(cmp, b) {
        return Some(a.clone());
    }
    if b.contains(cmp, a) {
        return Some(b.clone());
    }

    if !a.overlaps(cmp, b) {
        // Disjoint bounds can still join in exactly two shapes: meeting at
        // one point that at least one side includes, like `[1:2] (2:3]`, or
        // two closed edges with no representable value between them, like
        // `[1:2] [3:4]` over the integers.
        return if cmp(&a.hi.value, &b.lo.value) != Ordering::Greater
            && is_near(next, cmp, &a.hi, &b.lo)
        {
            Some(Bound::new_unchecked(a.lo.clone(), b.hi.clone()))
        } else if cmp(&b.hi.value, &a.lo.value) != Ordering::Greater
            && is_near(next, cmp, &b.hi, &a.lo)
        {
            Some(Bound::new_unchecked(b.lo.clone(), a.hi.clone()))
        } else {
            None
        };
    }

    // Partial overlap: the merged bound spans the outermost edges.
    Some(Bound::new_unchecked(
        min_edge(&a.lo, &b.lo, cmp),
        max_edge(&a.hi, &b.hi, cmp),
    ))
}

impl<T> Bound<T> {
    /// Parses the compact notation `"[lo:hi]"` / `"(lo:hi)"` and the two
    /// half-open mixes, with the values handed to `parse_value`. The parsed
    /// bound is validated like a constructed one.
    pub fn parse<E>(
        s: &str,
        parse_value: impl Fn(&str) -> Result<T, E>,
        cmp: Compare<T>,
    ) -> Result<Self, ParseBoundError<E>> {
        // "[a:b]" is the shortest well-formed input.
        if s.len() < 5 {
            return Err(ParseBoundError::Syntax);
        }
        let bytes = s.as_bytes();
        let lo_included = match bytes[0] {
            b'[' => true,
            b'(' => false,
            _ => return Err(ParseBoundError::Syntax),
        };
        let hi_included = match bytes[bytes.len() - 1] {
            b']' => true,
            b')' => false,
            _ => return Err(ParseBoundError::Syntax),
        };
        let divider = s.find(':').ok_or(ParseBoundError::Syntax)?;

        let lo = parse_value(&s[1..divider]).map_err(ParseBoundError::Value)?;
        let hi = parse_value(&s[divider + 1..s.len() - 1]).map_err(ParseBoundError::Value)?;

        Self::from_edges(Edge::new(lo, lo_included), Edge::new(hi, hi_included), cmp)
            .map_err(ParseBoundError::Invalid)
    }
}

impl<T: Display> Display for Bound<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            if self.lo.included { '[' } else { '(' },
            self.lo.value,
            self.hi.value,
            if self.hi.included { ']' } else { ')' },
        )
    }
}
