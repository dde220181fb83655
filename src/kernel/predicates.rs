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

//! Exact point-in-triangle tests with barycentric weights.
//!
//! Both frames refuse to exist for a zero-area triangle, so no division by a
//! zero determinant can reach a caller.

use crate::geometry::Point2;
use crate::kernel::orientation::orient2d;

#[inline(always)]
fn within(w: f64, eps: f64) -> bool {
    -eps <= w && w <= 1.0 + eps
}

/// Triangle `abc` prepared for repeated barycentric evaluation through
/// signed-area ratios.
#[derive(Debug, Clone, Copy)]
pub struct TriangleFrame {
    a: Point2,
    b: Point2,
    c: Point2,
    det: f64,
}

impl TriangleFrame {
    /// `None` if the triangle has zero (or non-finite) signed area.
    pub fn new(a: Point2, b: Point2, c: Point2) -> Option<Self> {
        let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(TriangleFrame { a, b, c, det })
    }

    pub fn vertices(&self) -> [Point2; 3] {
        [self.a, self.b, self.c]
    }

    /// Twice the signed area, positive for counter-clockwise vertices.
    pub fn det(&self) -> f64 {
        self.det
    }

    /// Weights of `p` with respect to `a`, `b` and `c`, summing to one.
    pub fn weights(&self, p: &Point2) -> [f64; 3] {
        let (a, b, c) = (&self.a, &self.b, &self.c);
        let wa = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / self.det;
        let wb = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / self.det;
        [wa, wb, 1.0 - wa - wb]
    }

    /// Weights of `p` if every one lies in `[-eps, 1 + eps]`.
    pub fn locate(&self, p: &Point2, eps: f64) -> Option<[f64; 3]> {
        let w = self.weights(p);
        w.iter().all(|&wi| within(wi, eps)).then_some(w)
    }
}

/// Triangle expressed as an origin and two edge vectors, solved as a 2x2
/// affine system. Used by the brute-force locator.
#[derive(Debug, Clone, Copy)]
pub struct AffineFrame {
    origin: Point2,
    a11: f64,
    a12: f64,
    a21: f64,
    a22: f64,
    det: f64,
}

impl AffineFrame {
    pub fn new(a: Point2, b: Point2, c: Point2) -> Option<Self> {
        let a11 = b.x - a.x;
        let a12 = b.y - a.y;
        let a21 = c.x - a.x;
        let a22 = c.y - a.y;
        let det = a11 * a22 - a21 * a12;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(AffineFrame {
            origin: a,
            a11,
            a12,
            a21,
            a22,
            det,
        })
    }

    /// Weights of `p` if it lies in the triangle, boundary widened by `eps`.
    pub fn locate(&self, p: &Point2, eps: f64) -> Option<[f64; 3]> {
        let dx = p.x - self.origin.x;
        let dy = p.y - self.origin.y;
        let c1 = (self.a22 * dx - self.a21 * dy) / self.det;
        let c2 = (-self.a12 * dx + self.a11 * dy) / self.det;
        if c1 >= -eps && c2 >= -eps && c1 + c2 <= 1.0 + eps {
            Some([1.0 - c1 - c2, c1, c2])
        } else {
            None
        }
    }
}

/// One-shot test: weights of `p` in `abc`, or `None` if `p` is outside or the
/// triangle is degenerate.
pub fn point_in_triangle(a: &Point2, b: &Point2, c: &Point2, p: &Point2, eps: f64) -> Option<[f64; 3]> {
    TriangleFrame::new(*a, *b, *c)?.locate(p, eps)
}

/// Is `abc` free of area?
pub fn is_degenerate(a: &Point2, b: &Point2, c: &Point2) -> bool {
    let area = orient2d(a, b, c);
    area == 0.0 || !area.is_finite()
}
