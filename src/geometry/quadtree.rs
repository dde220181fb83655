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

//! Region quadtree over a 2-D point set.
//!
//! The tree is built once from every query point, then only read. Points are
//! stored exclusively in nodes at [`MAX_DEPTH`]; shallower nodes subdivide on
//! first insertion and forward everything to their children.

use log::{debug, trace};

use crate::{
    error::{Error, Result},
    geometry::{
        aabb::{BoundingBox, Quadrant},
        point_2::Point2,
        util::{covering_half, extent},
    },
};

/// Depth of the nodes that hold points. The root is depth 1.
pub const MAX_DEPTH: usize = 6;

/// A node of the quadtree, exclusively owning its children.
#[derive(Debug, Clone)]
pub enum QuadNode {
    Leaf {
        boundary: BoundingBox,
        depth: usize,
        points: Vec<Point2>,
    },
    Internal {
        boundary: BoundingBox,
        depth: usize,
        /// In [`Quadrant::ALL`] order.
        children: Box<[QuadNode; 4]>,
    },
}

/// Query region; the bounding rectangle drives pruning, `accepts` the final
/// per-point test.
#[derive(Debug, Clone, Copy)]
enum Window {
    Rect(BoundingBox),
    Circle { center: Point2, radius: f64 },
}

impl Window {
    /// Pruning rectangle. It is padded by a few ulps of its magnitude so
    /// that every point `accepts` keeps also lies inside it after rounding.
    fn bounds(&self) -> BoundingBox {
        let bb = match *self {
            Window::Rect(bb) => bb,
            Window::Circle { center, radius } => {
                BoundingBox::new(center, Point2::new(radius, radius))
            }
        };
        let scale = bb.center.x.abs().max(bb.center.y.abs()) + bb.half.x.max(bb.half.y);
        bb.expanded(4.0 * f64::EPSILON * scale)
    }

    fn accepts(&self, p: &Point2) -> bool {
        match self {
            Window::Rect(bb) => {
                (bb.center.x - p.x).abs() <= bb.half.x && (bb.center.y - p.y).abs() <= bb.half.y
            }
            Window::Circle { center, radius } => center.distance_to(p) <= *radius,
        }
    }
}

impl QuadNode {
    pub fn new(boundary: BoundingBox, depth: usize) -> Self {
        QuadNode::Leaf {
            boundary,
            depth,
            points: Vec::new(),
        }
    }

    pub fn boundary(&self) -> &BoundingBox {
        match self {
            QuadNode::Leaf { boundary, .. } => boundary,
            QuadNode::Internal { boundary, .. } => boundary,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            QuadNode::Leaf { depth, .. } => *depth,
            QuadNode::Internal { depth, .. } => *depth,
        }
    }

    /// Points held directly by this node. Always empty for internal nodes.
    pub fn points(&self) -> &[Point2] {
        match self {
            QuadNode::Leaf { points, .. } => points,
            QuadNode::Internal { .. } => &[],
        }
    }

    pub fn children(&self) -> Option<&[QuadNode; 4]> {
        match self {
            QuadNode::Leaf { .. } => None,
            QuadNode::Internal { children, .. } => Some(children),
        }
    }

    /// Insert `p` below this node.
    ///
    /// Returns `false` when `p` lies outside the boundary. Below that, each
    /// internal node routes the point with [`Quadrant::of`] around its
    /// centre, so a point on a division line is stored once, in the first
    /// quadrant of [`Quadrant::ALL`] that contains it.
    pub fn insert(&mut self, p: Point2) -> bool {
        if !self.boundary().contains(&p) {
            return false;
        }
        self.place(p);
        true
    }

    /// Children are built to cover their whole share of the parent, so a
    /// point accepted at the top reaches a leaf.
    fn place(&mut self, p: Point2) {
        if let QuadNode::Leaf {
            boundary,
            depth,
            points,
        } = self
        {
            if *depth >= MAX_DEPTH {
                points.push(p);
                return;
            }
            let (boundary, depth) = (*boundary, *depth);
            *self = QuadNode::subdivided(boundary, depth);
        }

        if let QuadNode::Internal {
            boundary, children, ..
        } = self
        {
            let child = &mut children[Quadrant::of(&boundary.center, &p).index()];
            debug_assert!(child.boundary().contains(&p));
            child.place(p);
        }
    }

    fn subdivided(boundary: BoundingBox, depth: usize) -> Self {
        trace!("subdividing node at depth {depth} centred on {}", boundary.center);
        let children = Quadrant::ALL.map(|q| QuadNode::new(boundary.quadrant(q), depth + 1));
        QuadNode::Internal {
            boundary,
            depth,
            children: Box::new(children),
        }
    }

    fn range_lookup<'a>(&'a self, window: &Window, bounds: &BoundingBox, out: &mut Vec<&'a Point2>) {
        if !self.boundary().intersects(bounds) {
            return;
        }
        match self {
            QuadNode::Leaf { points, .. } => {
                out.extend(points.iter().filter(|p| window.accepts(p)));
            }
            QuadNode::Internal { children, .. } => {
                for child in children.iter() {
                    child.range_lookup(window, bounds, out);
                }
            }
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            QuadNode::Leaf { points, .. } => usize::from(!points.is_empty()),
            QuadNode::Internal { children, .. } => children.iter().map(QuadNode::leaf_count).sum(),
        }
    }

    fn max_depth(&self) -> usize {
        match self {
            QuadNode::Leaf { depth, .. } => *depth,
            QuadNode::Internal { children, .. } => children
                .iter()
                .map(QuadNode::max_depth)
                .max()
                .unwrap_or(self.depth()),
        }
    }
}

/// Quadtree index over a set of query points, built once and read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    root: QuadNode,
    len: usize,
}

impl SpatialIndex {
    /// Index the points `(xs[i], ys[i])`, each identified by its row `i`.
    ///
    /// The root is the smallest square around the data extent, centred on
    /// its midpoint.
    pub fn build(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::DimensionMismatch {
                what: "query coordinates (xi, yi)",
                expected: xs.len(),
                found: ys.len(),
            });
        }
        if let Some(index) = xs
            .iter()
            .zip(ys)
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(Error::NonFiniteCoordinate { index });
        }
        let (min_x, min_y, max_x, max_y) = extent(xs, ys).ok_or(Error::EmptyInput)?;

        let (span_x, span_y) = (max_x - min_x, max_y - min_y);
        if !span_x.is_finite() {
            return Err(Error::ExtentOverflow { min: min_x, max: max_x });
        }
        if !span_y.is_finite() {
            return Err(Error::ExtentOverflow { min: min_y, max: max_y });
        }

        let center = Point2::new(min_x / 2.0 + max_x / 2.0, min_y / 2.0 + max_y / 2.0);
        let half = span_x.max(span_y) / 2.0;
        let range = covering_half(center.x, min_x, max_x, half).max(covering_half(
            center.y, min_y, max_y, half,
        ));

        let mut root = QuadNode::new(BoundingBox::new(center, Point2::new(range, range)), 1);
        for (id, (&x, &y)) in xs.iter().zip(ys).enumerate() {
            if !root.insert(Point2::with_id(x, y, id)) {
                return Err(Error::PointOutsideBounds { id });
            }
        }

        let index = SpatialIndex {
            root,
            len: xs.len(),
        };
        debug!(
            "quadtree built: {} points, {} occupied leaves, depth {}",
            index.len,
            index.leaf_count(),
            index.depth()
        );
        Ok(index)
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The root square.
    pub fn boundary(&self) -> &BoundingBox {
        self.root.boundary()
    }

    pub fn root(&self) -> &QuadNode {
        &self.root
    }

    /// Deepest level reached by the tree.
    pub fn depth(&self) -> usize {
        self.root.max_depth()
    }

    /// Number of leaves holding at least one point.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Points with `|x - cx| <= half_width` and `|y - cy| <= half_height`.
    pub fn query_rect(&self, cx: f64, cy: f64, half_width: f64, half_height: f64) -> Vec<&Point2> {
        let mut out = Vec::new();
        self.query_rect_into(&BoundingBox::from_center(cx, cy, half_width, half_height), &mut out);
        out
    }

    /// Append the points inside `window` to `out`.
    pub fn query_rect_into<'a>(&'a self, window: &BoundingBox, out: &mut Vec<&'a Point2>) {
        let window = Window::Rect(*window);
        self.root.range_lookup(&window, &window.bounds(), out);
    }

    /// Points within Euclidean distance `radius` of `(cx, cy)`.
    pub fn query_circle(&self, cx: f64, cy: f64, radius: f64) -> Vec<&Point2> {
        let mut out = Vec::new();
        self.query_circle_into(&Point2::new(cx, cy), radius, &mut out);
        out
    }

    pub fn query_circle_into<'a>(&'a self, center: &Point2, radius: f64, out: &mut Vec<&'a Point2>) {
        let window = Window::Circle {
            center: *center,
            radius,
        };
        self.root.range_lookup(&window, &window.bounds(), out);
    }

    pub fn query_rect_ids(&self, cx: f64, cy: f64, half_width: f64, half_height: f64) -> Vec<usize> {
        self.query_rect(cx, cy, half_width, half_height)
            .into_iter()
            .map(|p| p.id)
            .collect()
    }

    pub fn query_circle_ids(&self, cx: f64, cy: f64, radius: f64) -> Vec<usize> {
        self.query_circle(cx, cy, radius)
            .into_iter()
            .map(|p| p.id)
            .collect()
    }
}
