// SPDX-License-Identifier: MPL-2.0

//! An ordered collection of non-overlapping, maximally merged bounds
//! representing an arbitrary subset of the domain.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

#[cfg(any(feature = "proptest", test))]
use proptest::prelude::*;
use smallvec::SmallVec;

use crate::bound::{union_bounds, Bound};
use crate::edge::Edge;
use crate::{Compare, Next};

/// A set of values over a totally ordered domain, stored as a sorted list of
/// non-overlapping [`Bound`]s.
///
/// The list is kept maximally merged: no two bounds a caller can observe
/// would be combined by [`union_bounds`], so every set has exactly one
/// representation under a given comparator and successor. All operations
/// take `&self` and return a fresh span; a caller keeping the receiver
/// around holds an immutable snapshot.
#[derive(Debug, Clone)]
pub struct Span<T> {
    /// Steps a value one representable unit toward another; `None` for
    /// continuous domains, which never coalesce across a gap.
    next: Option<Next<T>>,
    cmp: Compare<T>,
    bounds: SmallVec<[Bound<T>; 1]>,
}

impl<T> Span<T> {
    /// The empty set over the given domain.
    pub fn new(next: Option<Next<T>>, cmp: Compare<T>) -> Self {
        Self {
            next,
            cmp,
            bounds: SmallVec::new(),
        }
    }

    /// The ordered bound list.
    pub fn bounds(&self) -> &[Bound<T>] {
        &self.bounds
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn comparator(&self) -> Compare<T> {
        self.cmp
    }

    pub fn successor(&self) -> Option<Next<T>> {
        self.next
    }

    /// Whether the value is inside any bound. `O(log n)` in the number of
    /// bounds.
    pub fn contains(&self, value: &T) -> bool {
        self.bounds
            .binary_search_by(|bound| bound.position(self.cmp, value))
            .is_ok()
    }

    /// Whether every value of `bound` is inside one bound of the span.
    /// `O(log n)`: the only candidate is the last bound starting at or
    /// before `bound`'s lower edge.
    pub fn contains_bound(&self, bound: &Bound<T>) -> bool {
        let cmp = self.cmp;
        let candidate = self
            .bounds
            .partition_point(|existing| cmp_lower_edges(existing.lo(), bound.lo(), cmp) != Ordering::Greater);
        candidate > 0 && self.bounds[candidate - 1].contains(cmp, bound)
    }
}

/// Order of two lower edges: by value, and on a tie the closed edge starts
/// earlier than the open one.
fn cmp_lower_edges<T>(a: &Edge<T>, b: &Edge<T>, cmp: Compare<T>) -> Ordering {
    cmp(&a.value, &b.value).then(match (a.included, b.included) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    })
}

impl<T: Clone> Span<T> {
    /// Builds a span from any bound list. Each bound is inserted through
    /// union, so the result is sorted and maximally merged regardless of the
    /// input order or overlap.
    pub fn from_bounds<I>(next: Option<Next<T>>, cmp: Compare<T>, bounds: I) -> Self
    where
        I: IntoIterator<Item = Bound<T>>,
    {
        let mut span = Self::new(next, cmp);
        for bound in bounds {
            span.insert_bound(bound);
        }
        span.check_invariants()
    }

    /// The union of the span and a single bound.
    pub fn union_bound(&self, bound: &Bound<T>) -> Self {
        let mut merged = self.clone();
        merged.insert_bound(bound.clone());
        merged.check_invariants()
    }

    /// The union of two spans over the same domain.
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for bound in &other.bounds {
            merged.insert_bound(bound.clone());
        }
        merged.check_invariants()
    }

    /// Everything in the span except the values of `bound`.
    pub fn difference_bound(&self, bound: &Bound<T>) -> Self {
        let mut remaining: SmallVec<[Bound<T>; 1]> = SmallVec::new();
        for existing in &self.bounds {
            if bound.contains(self.cmp, existing) {
                continue;
            }
            if existing.overlaps(self.cmp, bound) {
                for piece in existing.difference(self.cmp, bound) {
                    push_coalescing(self.next, self.cmp, &mut remaining, piece);
                }
            } else {
                push_coalescing(self.next, self.cmp, &mut remaining, existing.clone());
            }
        }
        Self {
            next: self.next,
            cmp: self.cmp,
            bounds: remaining,
        }
        .check_invariants()
    }

    /// Everything in the span except the values of `other`.
    pub fn difference(&self, other: &Self) -> Self {
        let mut remaining = self.clone();
        for bound in &other.bounds {
            remaining = remaining.difference_bound(bound);
        }
        remaining
    }

    /// Re-expresses every bound with closed edges by stepping excluded edges
    /// one unit inward with `next`. Bounds left without any representable
    /// value, like an open single step `(1:2)` over the integers, are
    /// dropped.
    pub fn make_strict(&self, next: Next<T>) -> Self {
        if self.bounds.is_empty() {
            return self.clone();
        }

        let min_value = &self.bounds[0].lo().value;
        let max_value = &self.bounds[self.bounds.len() - 1].hi().value;

        let mut strict: SmallVec<[Bound<T>; 1]> = SmallVec::with_capacity(self.bounds.len());
        for bound in &self.bounds {
            if bound.lo().included && bound.hi().included {
                strict.push(bound.clone());
                continue;
            }

            let lo = if bound.lo().included {
                bound.lo().value.clone()
            } else {
                next(&bound.lo().value, max_value)
            };
            let hi = if bound.hi().included {
                bound.hi().value.clone()
            } else {
                next(&bound.hi().value, min_value)
            };

            match Bound::from_edges(Edge::included(lo), Edge::included(hi), self.cmp) {
                Ok(closed) => strict.push(closed),
                Err(_) => continue,
            }
        }

        Self::from_bounds(Some(next), self.cmp, strict)
    }

    /// Merges `bound` into the sorted list: every existing bound that
    /// overlaps or touches the (growing) candidate is absorbed into it, the
    /// rest are kept, and the list is re-sorted by lower edge.
    fn insert_bound(&mut self, mut bound: Bound<T>) {
        let mut kept: SmallVec<[Bound<T>; 1]> = SmallVec::with_capacity(self.bounds.len() + 1);
        for existing in self.bounds.drain(..) {
            match union_bounds(self.next, self.cmp, &existing, &bound) {
                Some(merged) => bound = merged,
                None => kept.push(existing),
            }
        }
        kept.push(bound);

        let cmp = self.cmp;
        kept.sort_by(|a, b| cmp(&a.lo().value, &b.lo().value));
        self.bounds = kept;
    }

    fn check_invariants(self) -> Self {
        if cfg!(debug_assertions) {
            for pair in self.bounds.windows(2) {
                assert_eq!(
                    (self.cmp)(&pair[0].lo().value, &pair[1].lo().value),
                    Ordering::Less,
                    "bounds must be sorted by lower edge",
                );
                assert!(
                    union_bounds(self.next, self.cmp, &pair[0], &pair[1]).is_none(),
                    "no two bounds may overlap or touch",
                );
            }
        }
        self
    }
}

/// Appends `bound` to an already-sorted list, merging it into the last
/// element when the two overlap or touch. Keeps difference results maximally
/// merged on discrete domains, where a removed open gap holds no value.
fn push_coalescing<T: Clone>(
    next: Option<Next<T>>,
    cmp: Compare<T>,
    out: &mut SmallVec<[Bound<T>; 1]>,
    bound: Bound<T>,
) {
    if let Some(last) = out.last_mut() {
        if let Some(merged) = union_bounds(next, cmp, last, &bound) {
            *last = merged;
            return;
        }
    }
    out.push(bound);
}

/// Spans are equal when their bound lists match edge for edge, value and
/// inclusion both. Two representations of the same value set with different
/// edges (possible across different successors) compare unequal.
impl<T: PartialEq> PartialEq for Span<T> {
    fn eq(&self, other: &Self) -> bool {
        self.bounds == other.bounds
    }
}

impl<T: Eq> Eq for Span<T> {}

/// Concatenation of each bound's bracket form; the empty span renders as the
/// empty string.
impl<T: Display> Display for Span<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for bound in &self.bounds {
            write!(f, "{bound}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Span<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.bounds.iter())
    }
}

/// Spans of small integer bounds with a mix of open, closed and single-point
/// shapes, for property tests.
#[cfg(any(feature = "proptest", test))]
pub fn proptest_strategy() -> impl Strategy<Value = Span<i32>> {
    prop::collection::vec((any::<i16>(), 0u8..12, any::<bool>(), any::<bool>()), 0..8).prop_map(
        |parts| {
            let bounds = parts.into_iter().map(|(lo, width, lo_included, hi_included)| {
                let lo = lo as i32;
                let hi = lo + width as i32;
                if width == 0 {
                    Bound::closed(lo, hi).expect("point bound is valid")
                } else {
                    Bound::new(lo_included, lo, hi, hi_included).expect("non-empty bound is valid")
                }
            });
            Span::from_bounds(Some(crate::domain::next_int), crate::domain::ord, bounds)
        },
    )
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::domain::{self, next_int, ord};

    fn sp(bounds: &[Bound<u32>]) -> Span<u32> {
        Span::from_bounds(Some(next_int), ord, bounds.iter().cloned())
    }

    fn b(lo: char, hi: char) -> Bound<u32> {
        Bound::closed(lo as u32, hi as u32).unwrap()
    }

    fn point(c: char) -> Bound<u32> {
        b(c, c)
    }

    fn bc(s: &str) -> Bound<u32> {
        Bound::parse(
            s,
            |v| {
                let mut chars = v.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c as u32),
                    _ => Err("expected exactly one character"),
                }
            },
            ord,
        )
        .unwrap()
    }

    fn sc(specs: &[&str]) -> Span<u32> {
        Span::from_bounds(Some(next_int), ord, specs.iter().map(|s| bc(s)))
    }

    #[test]
    fn union_spans() {
        let cases: &[(Span<u32>, Span<u32>, Span<u32>)] = &[
            (sp(&[]), sp(&[]), sp(&[])),
            (sp(&[]), sp(&[b('0', '9')]), sp(&[b('0', '9')])),
            (sp(&[b('a', 'z')]), sp(&[]), sp(&[b('a', 'z')])),
            (sp(&[b('a', 'z')]), sp(&[b('a', 'z')]), sp(&[b('a', 'z')])),
            (sp(&[b('a', 'o')]), sp(&[b('o', 'z')]), sp(&[b('a', 'z')])),
            (sp(&[b('a', 'p')]), sp(&[b('n', 'z')]), sp(&[b('a', 'z')])),
            (sp(&[b('a', 't')]), sp(&[b('t', 'z')]), sp(&[b('a', 'z')])),
            (sp(&[b('a', 'z')]), sp(&[b('b', 'y')]), sp(&[b('a', 'z')])),
            (sp(&[b('b', 'y')]), sp(&[b('a', 'z')]), sp(&[b('a', 'z')])),
            (sp(&[b('b', 'z')]), sp(&[b('a', 'y')]), sp(&[b('a', 'z')])),
            (sp(&[b('n', 'p')]), sp(&[b('a', 'z')]), sp(&[b('a', 'z')])),
            (sp(&[b('o', 'z')]), sp(&[b('a', 'o')]), sp(&[b('a', 'z')])),
            (
                sp(&[b('a', 'a')]),
                sp(&[point('c')]),
                sp(&[b('a', 'a'), b('c', 'c')]),
            ),
            (
                sp(&[b('a', 'z')]),
                sp(&[point('A')]),
                sp(&[b('A', 'A'), b('a', 'z')]),
            ),
            (
                sp(&[b('c', 'z')]),
                sp(&[point('a')]),
                sp(&[b('a', 'a'), b('c', 'z')]),
            ),
            (
                sp(&[b('0', '9')]),
                sp(&[b('a', 'z')]),
                sp(&[b('0', '9'), b('a', 'z')]),
            ),
            (
                sp(&[b('a', 'd')]),
                sp(&[b('d', 'f'), b('f', 'i')]),
                sp(&[b('a', 'i')]),
            ),
            (
                sp(&[b('a', 'n'), b('p', 'z')]),
                sp(&[b('n', 'p')]),
                sp(&[b('a', 'z')]),
            ),
            (
                sp(&[b('a', 't')]),
                sp(&[b('x', 'z')]),
                sp(&[b('a', 't'), b('x', 'z')]),
            ),
            (
                sp(&[b('a', 'c')]),
                sp(&[b('d', 'f'), b('g', 'i')]),
                sp(&[b('a', 'i')]),
            ),
        ];
        for (a, b, want) in cases {
            assert_eq!(&a.union(b), want, "{a} v {b}");
            assert_eq!(&b.union(a), want, "{b} v {a}");
        }
    }

    #[test]
    fn union_bound_absorbs_and_bridges() {
        fn si(bounds: &[Bound<i32>]) -> Span<i32> {
            domain::discrete(bounds.iter().cloned())
        }
        let bi = |lo, hi| Bound::closed(lo, hi).unwrap();

        let cases = [
            (si(&[bi(1, 6)]), bi(3, 4), si(&[bi(1, 6)])),
            (si(&[bi(3, 4)]), bi(1, 6), si(&[bi(1, 6)])),
            (si(&[bi(1, 2), bi(3, 4)]), bi(2, 3), si(&[bi(1, 4)])),
            // The candidate bridges two separated bounds in one pass.
            (si(&[bi(1, 2), bi(5, 6)]), bi(3, 4), si(&[bi(1, 6)])),
        ];
        for (span, bound, want) in cases {
            assert_eq!(span.union_bound(&bound), want, "{span} v {bound}");
        }
    }

    #[test]
    fn union_keeps_input_spans_intact() {
        let a = sp(&[b('a', 'c')]);
        let before = a.clone();
        let _ = a.union_bound(&b('x', 'z'));
        assert_eq!(a, before);
    }

    #[test]
    fn unsorted_input_is_sorted_at_construction() {
        assert_eq!(
            sp(&[b('a', 'z'), b('A', 'Z')]),
            sp(&[b('A', 'Z'), b('a', 'z')]),
        );
    }

    #[test]
    fn difference_spans() {
        fn si(specs: &[&str]) -> Span<i32> {
            Span::from_bounds(
                Some(next_int),
                ord,
                specs.iter().map(|s| Bound::parse(s, |v| v.parse::<i32>(), ord).unwrap()),
            )
        }

        let cases = [
            (si(&["[1:6]"]), si(&["[2:4]"]), si(&["[1:2)", "(4:6]"])),
            (si(&["[1:6]"]), si(&["[2:2]"]), si(&["[1:2)", "(2:6]"])),
            (si(&["[1:3)", "[4:6]"]), si(&["[3:4]"]), si(&["[1:3)", "(4:6]"])),
            // (2:3) holds no integer, so nothing is actually removed.
            (si(&["[1:6]"]), si(&["(2:3)"]), si(&["[1:6]"])),
            (si(&["[1:6]"]), si(&[]), si(&["[1:6]"])),
            (si(&["[1:6]"]), si(&["[0:9]"]), si(&[])),
        ];
        for (a, b, want) in cases {
            assert_eq!(a.difference(&b), want, "{a} - {b}");
        }
    }

    #[test]
    fn difference_splits_at_open_gap_on_continuous_domains() {
        let pb = |s: &str| Bound::parse(s, |v| v.parse::<f64>(), domain::cmp_f64).unwrap();
        let a = domain::float64([pb("[1:3]")]);
        assert_eq!(a.difference_bound(&pb("(1:2)")).to_string(), "[1:1][2:3]");
        assert_eq!(
            domain::float64([pb("[1:4]")]).difference_bound(&pb("[2:3]")).to_string(),
            "[1:2)(3:4]",
        );
    }

    #[test]
    fn coalescing_depends_on_the_domain() {
        // Over the integers [1:2] and [3:4] touch; over the floats they
        // leave a gap.
        let discrete = domain::discrete([Bound::closed(1, 2).unwrap()])
            .union_bound(&Bound::closed(3, 4).unwrap());
        assert_eq!(discrete.to_string(), "[1:4]");

        let fb = |s: &str| Bound::parse(s, |v| v.parse::<f64>(), domain::cmp_f64).unwrap();
        let continuous = domain::float64([fb("[1:2]")]).union_bound(&fb("[3:4]"));
        assert_eq!(continuous.to_string(), "[1:2][3:4]");
    }

    #[test]
    fn membership_lookups() {
        let span = sp(&[b('0', '9'), b('a', 'z')]);
        assert!(span.contains_bound(&b('c', 'c')));
        assert!(span.contains_bound(&b('0', '9')));
        assert!(!span.contains_bound(&bc("[9:a]")));
        assert!(span.contains(&('5' as u32)));
        assert!(!span.contains(&('@' as u32)));
        assert!(!sp(&[]).contains(&0));
    }

    #[test]
    fn contains_bound_with_excluded_shared_lower_edge() {
        let span = sc(&["(1:5]"]);
        assert!(span.contains_bound(&bc("(1:3]")));
        assert!(!span.contains_bound(&bc("[1:3]")));
    }

    #[test]
    fn make_strict_closes_open_edges() {
        let cases = [
            (sc(&["(a:z)"]), sc(&["[b:y]"])),
            (sc(&["[a:z)"]), sc(&["[a:y]"])),
            (sc(&["[a:z)", "[0:9]"]), sc(&["[a:y]", "[0:9]"])),
            (sc(&["(a:z)", "(0:9)"]), sc(&["[b:y]", "[1:8]"])),
            (sc(&["[1:2]", "[2:3]"]), sc(&["[1:2]", "[2:3]"])),
        ];
        for (input, want) in cases {
            assert_eq!(input.make_strict(next_int), want, "{input}");
        }

        // An open single step holds no value at all and is dropped.
        let empty = Span::from_bounds(Some(next_int), ord, [Bound::open(1u32, 2).unwrap()]);
        assert!(empty.make_strict(next_int).is_empty());
    }

    #[test]
    fn display_concatenates_bounds() {
        fn si(specs: &[&str]) -> Span<i32> {
            Span::from_bounds(
                Some(next_int),
                ord,
                specs.iter().map(|s| Bound::parse(s, |v| v.parse::<i32>(), ord).unwrap()),
            )
        }
        assert_eq!(si(&["[1:2)", "[5:9]"]).to_string(), "[1:2)[5:9]");
        assert_eq!(si(&[]).to_string(), "");
    }

    proptest! {
        #[test]
        fn union_is_commutative(a in proptest_strategy(), b in proptest_strategy()) {
            prop_assert_eq!(a.union(&b), b.union(&a));
        }

        #[test]
        fn union_is_associative(
            a in proptest_strategy(),
            b in proptest_strategy(),
            c in proptest_strategy(),
        ) {
            prop_assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
        }

        #[test]
        fn union_is_idempotent(a in proptest_strategy()) {
            prop_assert_eq!(a.union(&a), a);
        }

        #[test]
        fn union_contains_either(
            a in proptest_strategy(),
            b in proptest_strategy(),
            v in any::<i16>(),
        ) {
            let v = v as i32;
            prop_assert_eq!(a.union(&b).contains(&v), a.contains(&v) || b.contains(&v));
        }

        #[test]
        fn difference_contains_left_only(
            a in proptest_strategy(),
            b in proptest_strategy(),
            v in any::<i16>(),
        ) {
            let v = v as i32;
            prop_assert_eq!(
                a.difference(&b).contains(&v),
                a.contains(&v) && !b.contains(&v)
            );
        }

        #[test]
        fn difference_then_union_recovers_the_union(
            a in proptest_strategy(),
            b in proptest_strategy(),
            v in any::<i16>(),
        ) {
            let v = v as i32;
            prop_assert_eq!(
                a.difference(&b).union(&b).contains(&v),
                a.union(&b).contains(&v)
            );
        }

        #[test]
        fn union_result_is_canonical(a in proptest_strategy(), b in proptest_strategy()) {
            let merged = a.union(&b);
            for pair in merged.bounds().windows(2) {
                prop_assert!(union_bounds(Some(next_int), ord, &pair[0], &pair[1]).is_none());
            }
        }

        #[test]
        fn contained_bounds_are_contained(a in proptest_strategy(), b in proptest_strategy()) {
            for bound in b.bounds() {
                prop_assert_eq!(
                    a.union(&b).contains_bound(bound),
                    true,
                    "{} should contain {}",
                    a.union(&b),
                    bound,
                );
            }
        }
    }
}
