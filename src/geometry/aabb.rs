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

use crate::geometry::{point_2::Point2, util::covering_half};

/// The four children of a subdivided region.
///
/// [`Quadrant::ALL`] is the insertion order; a point sitting exactly on a
/// division line goes to the first quadrant that contains it, which is the
/// one [`Quadrant::of`] picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NE,
    NW,
    SE,
    SW,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::NE, Quadrant::NW, Quadrant::SE, Quadrant::SW];

    /// The quadrant around `center` that owns `p`. Division lines belong to
    /// the east and north sides.
    pub fn of(center: &Point2, p: &Point2) -> Quadrant {
        match (p.x >= center.x, p.y >= center.y) {
            (true, true) => Quadrant::NE,
            (false, true) => Quadrant::NW,
            (true, false) => Quadrant::SE,
            (false, false) => Quadrant::SW,
        }
    }

    /// Position in [`Quadrant::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit offset of the quadrant centre from the parent centre.
    fn signs(self) -> (f64, f64) {
        match self {
            Quadrant::NE => (1.0, 1.0),
            Quadrant::NW => (-1.0, 1.0),
            Quadrant::SE => (1.0, -1.0),
            Quadrant::SW => (-1.0, -1.0),
        }
    }
}

/// An axis-aligned rectangle stored as a centre and a half extent.
///
/// Both [`contains`](BoundingBox::contains) and
/// [`intersects`](BoundingBox::intersects) treat the rectangle as closed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub center: Point2,
    pub half: Point2,
}

impl BoundingBox {
    pub fn new(center: Point2, half: Point2) -> Self {
        BoundingBox { center, half }
    }

    pub fn from_center(cx: f64, cy: f64, half_width: f64, half_height: f64) -> Self {
        BoundingBox::new(Point2::new(cx, cy), Point2::new(half_width, half_height))
    }

    /// Build the box spanning `[min_x, max_x] x [min_y, max_y]`.
    pub fn from_extent(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox::from_center(
            (min_x + max_x) / 2.0,
            (min_y + max_y) / 2.0,
            (max_x - min_x) / 2.0,
            (max_y - min_y) / 2.0,
        )
    }

    /// Smallest box containing three points.
    pub fn of_triangle(a: &Point2, b: &Point2, c: &Point2) -> Self {
        use crate::geometry::util::{max3, min3};
        BoundingBox::from_extent(
            min3(a.x, b.x, c.x),
            min3(a.y, b.y, c.y),
            max3(a.x, b.x, c.x),
            max3(a.y, b.y, c.y),
        )
    }

    pub fn min_x(&self) -> f64 {
        self.center.x - self.half.x
    }

    pub fn max_x(&self) -> f64 {
        self.center.x + self.half.x
    }

    pub fn min_y(&self) -> f64 {
        self.center.y - self.half.y
    }

    pub fn max_y(&self) -> f64 {
        self.center.y + self.half.y
    }

    /// Grow the half extent by `margin` on both axes.
    pub fn expanded(&self, margin: f64) -> Self {
        BoundingBox::new(
            self.center,
            Point2::new(self.half.x + margin, self.half.y + margin),
        )
    }

    /// Boundary-inclusive point containment.
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// Do the two closed rectangles overlap? Touching edges count.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x() <= other.max_x()
            && self.max_x() >= other.min_x()
            && self.min_y() <= other.max_y()
            && self.max_y() >= other.min_y()
    }

    /// One of the four sub-rectangles.
    ///
    /// The child reaches from this box's centre to the matching corner. Away
    /// from the origin `center ± half / 2` rounds on its own, so the half
    /// extent is widened until both ends are inside the closed child.
    pub fn quadrant(&self, q: Quadrant) -> BoundingBox {
        let (sx, sy) = q.signs();
        let hx = self.half.x * 0.5;
        let hy = self.half.y * 0.5;
        let cx = self.center.x + sx * hx;
        let cy = self.center.y + sy * hy;
        let far_x = if sx > 0.0 { self.max_x() } else { self.min_x() };
        let far_y = if sy > 0.0 { self.max_y() } else { self.min_y() };
        BoundingBox::from_center(
            cx,
            cy,
            covering_half(cx, self.center.x, far_x, hx),
            covering_half(cy, self.center.y, far_y, hy),
        )
    }
}
