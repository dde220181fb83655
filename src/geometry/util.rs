// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use num_traits::Float;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::geometry::{aabb::BoundingBox, point_2::Point2};

/// Default tolerance for point-in-triangle classification.
pub const DEFAULT_EPS: f64 = 1e-12;

#[inline(always)]
pub fn min3<T: Float>(a: T, b: T, c: T) -> T {
    a.min(b).min(c)
}

#[inline(always)]
pub fn max3<T: Float>(a: T, b: T, c: T) -> T {
    a.max(b).max(c)
}

#[inline(always)]
pub fn f64_next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Upper bound on widening steps in [`covering_half`].
const MAX_WIDEN_STEPS: usize = 64;

/// A half extent of at least `half` for which the closed interval
/// `center - h ..= center + h`, as computed in `f64`, contains both `a` and
/// `b`.
///
/// Starts from the exact distances and grows by doubling ulp steps, so far
/// from the origin it settles within a few iterations.
pub fn covering_half(center: f64, a: f64, b: f64, half: f64) -> f64 {
    let (lo, hi) = (a.min(b), a.max(b));
    let mut h = half.max(center - lo).max(hi - center);
    let mut step = f64_next_up(h) - h;
    for _ in 0..MAX_WIDEN_STEPS {
        if center - h <= lo && center + h >= hi {
            break;
        }
        h += step;
        step *= 2.0;
    }
    h
}

/// `(min_x, min_y, max_x, max_y)` of two parallel coordinate slices, or `None`
/// when they are empty.
pub fn extent(xs: &[f64], ys: &[f64]) -> Option<(f64, f64, f64, f64)> {
    let (&x0, &y0) = (xs.first()?, ys.first()?);
    Some(xs.iter().zip(ys).fold(
        (x0, y0, x0, y0),
        |(min_x, min_y, max_x, max_y), (&x, &y)| {
            (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
        },
    ))
}

/// Uniformly distributed points inside `bounds`, reproducible for a given seed.
/// Identifiers are the generation order.
pub fn random_points(n: usize, bounds: &BoundingBox, seed: u64) -> Vec<Point2> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|id| {
            let x = if bounds.half.x > 0.0 {
                rng.random_range(bounds.min_x()..bounds.max_x())
            } else {
                bounds.center.x
            };
            let y = if bounds.half.y > 0.0 {
                rng.random_range(bounds.min_y()..bounds.max_y())
            } else {
                bounds.center.y
            };
            Point2::with_id(x, y, id)
        })
        .collect()
}
