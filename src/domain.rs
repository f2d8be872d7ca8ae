// SPDX-License-Identifier: MPL-2.0

//! Comparators, successor functions and ready-made [`Span`] constructors for
//! common domains.
//!
//! The algebra itself is agnostic about the element type; this module wires
//! it up for the types most callers use. Integers get a successor so that
//! touching bounds coalesce; floats are treated as continuous and get none,
//! though [`next_f32`]/[`next_f64`] are available for callers who do want
//! ULP-level adjacency or [`Span::make_strict`] over floats.

use std::cmp::Ordering;

use num_traits::PrimInt;

use crate::{Bound, Span};

/// Comparator from the type's own `Ord` impl.
pub fn ord<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// Total order on `f32`, IEEE 754 `totalOrder`.
pub fn cmp_f32(a: &f32, b: &f32) -> Ordering {
    a.total_cmp(b)
}

/// Total order on `f64`, IEEE 754 `totalOrder`.
pub fn cmp_f64(a: &f64, b: &f64) -> Ordering {
    a.total_cmp(b)
}

/// Steps an integer one unit toward `toward`; identity when equal.
pub fn next_int<T: PrimInt>(value: &T, toward: &T) -> T {
    match value.cmp(toward) {
        Ordering::Equal => *value,
        Ordering::Less => *value + T::one(),
        Ordering::Greater => *value - T::one(),
    }
}

/// Steps an `f32` one representable value toward `toward`.
pub fn next_f32(value: &f32, toward: &f32) -> f32 {
    if value < toward {
        value.next_up()
    } else if value > toward {
        value.next_down()
    } else {
        *value
    }
}

/// Steps an `f64` one representable value toward `toward`.
pub fn next_f64(value: &f64, toward: &f64) -> f64 {
    if value < toward {
        value.next_up()
    } else if value > toward {
        value.next_down()
    } else {
        *value
    }
}

/// A span over any primitive integer type, coalescing adjacent bounds.
pub fn discrete<T, I>(bounds: I) -> Span<T>
where
    T: PrimInt,
    I: IntoIterator<Item = Bound<T>>,
{
    Span::from_bounds(Some(next_int::<T>), ord::<T>, bounds)
}

/// A span over `f32` treated as a continuous domain.
pub fn float32<I>(bounds: I) -> Span<f32>
where
    I: IntoIterator<Item = Bound<f32>>,
{
    Span::from_bounds(None, cmp_f32, bounds)
}

/// A span over `f64` treated as a continuous domain.
pub fn float64<I>(bounds: I) -> Span<f64>
where
    I: IntoIterator<Item = Bound<f64>>,
{
    Span::from_bounds(None, cmp_f64, bounds)
}
