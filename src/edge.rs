// SPDX-License-Identifier: MPL-2.0

//! A single boundary point: a domain value plus an inclusion flag.

use std::cmp::Ordering;

use crate::{Compare, Next};

/// One boundary of a [`Bound`](crate::Bound).
///
/// `included` tells whether the value itself belongs to the range the edge
/// delimits: `[`/`]` in the bracket notation when true, `(`/`)` when false.
/// Edges are plain immutable values; operations produce new edges instead of
/// mutating existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge<T> {
    pub value: T,
    pub included: bool,
}

impl<T> Edge<T> {
    pub fn new(value: T, included: bool) -> Self {
        Self { value, included }
    }

    /// A closed edge: the value belongs to the range.
    pub fn included(value: T) -> Self {
        Self::new(value, true)
    }

    /// An open edge: the value is left out of the range.
    pub fn excluded(value: T) -> Self {
        Self::new(value, false)
    }
}

/// Whether no gap separates `lower` from `higher` (`lower` assumed not above
/// `higher`), so two bounds meeting at these edges can merge into one.
pub fn is_near<T>(
    next: Option<Next<T>>,
    cmp: Compare<T>,
    lower: &Edge<T>,
    higher: &Edge<T>,
) -> bool {
    // Touching edges: `[1:2] [2:3]`, `[1:2) [2:3]` and `[1:2] (2:3]` all meet
    // at 2, but `[1:2) (2:3]` leaves 2 to neither side.
    if cmp(&lower.value, &higher.value) == Ordering::Equal && (lower.included || higher.included) {
        return true;
    }

    // Discrete adjacency: `[1:2] [3:4]` when the domain has no value strictly
    // between 2 and 3. An excluded edge keeps its own value out, so both
    // sides must be closed; continuous domains supply no successor and never
    // take this branch.
    if let Some(next) = next {
        if lower.included
            && higher.included
            && cmp(&next(&lower.value, &higher.value), &higher.value) != Ordering::Less
        {
            return true;
        }
    }

    false
}

/// The lesser of two edges by value. On a value tie the result is included
/// if either input is: a union must not lose the shared point.
pub fn min_edge<T: Clone>(a: &Edge<T>, b: &Edge<T>, cmp: Compare<T>) -> Edge<T> {
    match cmp(&a.value, &b.value) {
        Ordering::Greater => b.clone(),
        Ordering::Less => a.clone(),
        Ordering::Equal => Edge::new(a.value.clone(), a.included || b.included),
    }
}

/// The greater of two edges by value, with the same tie rule as [`min_edge`].
pub fn max_edge<T: Clone>(a: &Edge<T>, b: &Edge<T>, cmp: Compare<T>) -> Edge<T> {
    match cmp(&a.value, &b.value) {
        Ordering::Greater => a.clone(),
        Ordering::Less => b.clone(),
        Ordering::Equal => Edge::new(a.value.clone(), a.included || b.included),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{next_int, ord};

    #[test]
    fn near_at_shared_value_needs_one_closed_side() {
        let cases = [
            (Edge::included(2), Edge::included(2), true),
            (Edge::excluded(2), Edge::included(2), true),
            (Edge::included(2), Edge::excluded(2), true),
            (Edge::excluded(2), Edge::excluded(2), false),
        ];
        for (lower, higher, want) in cases {
            assert_eq!(is_near(None, ord, &lower, &higher), want, "{lower:?} {higher:?}");
        }
    }

    #[test]
    fn near_across_gap_needs_successor_and_closed_edges() {
        let lower = Edge::included(2);
        let higher = Edge::included(3);
        assert!(is_near(Some(next_int), ord, &lower, &higher));
        assert!(!is_near(None, ord, &lower, &higher));
        assert!(!is_near(Some(next_int), ord, &Edge::excluded(2), &higher));
        assert!(!is_near(Some(next_int), ord, &lower, &Edge::excluded(3)));
        assert!(!is_near(Some(next_int), ord, &lower, &Edge::included(4)));
    }

    #[test]
    fn min_max_prefer_inclusion_on_ties() {
        let open = Edge::excluded(5);
        let closed = Edge::included(5);
        assert_eq!(min_edge(&open, &closed, ord), closed);
        assert_eq!(max_edge(&open, &closed, ord), closed);
        assert_eq!(min_edge(&Edge::included(1), &open, ord), Edge::included(1));
        assert_eq!(max_edge(&Edge::included(1), &open, ord), open);
    }
}
