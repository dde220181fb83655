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

//! Triangle point location.
//!
//! Given a triangulation (1-based vertex triples over `x`, `y`) and a set of
//! query points, find for each point the triangle that contains it.
//!
//! - [`locate`] scans the triangles once, pulling candidate points out of a
//!   [`SpatialIndex`](crate::geometry::SpatialIndex) with each triangle's
//!   bounding box. When several triangles claim a point the last one in
//!   input order wins.
//! - [`locate_legacy`] scans the points instead, testing the previous hit
//!   first and falling back to a linear pass over triangle bounding boxes.
//!   The first triangle found wins.

mod indexed;
mod legacy;
mod options;

pub use indexed::{locate, locate_points};
pub use legacy::{LastTriangle, LegacyLocator, locate_legacy};
pub use options::LocateOptions;

use log::warn;

use crate::{
    error::{Error, Result},
    geometry::Point2,
};

/// Outcome for one query point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocationResult {
    /// 1-based index of the owning triangle, `None` if unassigned.
    pub triangle: Option<usize>,
    /// Weights for the triangle's vertices in order, when requested.
    pub barycentric: Option<[f64; 3]>,
}

/// Counters gathered during one locate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocateStats {
    /// Triangles that were actually tested.
    pub triangles: usize,
    /// Exact point-in-triangle evaluations.
    pub candidates: usize,
    /// Successful assignments, overwrites included.
    pub hits: usize,
    /// Triangles skipped as degenerate or malformed.
    pub skipped: usize,
    /// Points resolved by the previous triangle (brute-force locator only).
    pub hint_hits: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LocateOutput {
    /// One entry per query point, indexed by point id.
    pub locations: Vec<LocationResult>,
    /// Recoverable problems; only [`Error::is_recoverable`] variants.
    pub warnings: Vec<Error>,
    pub stats: LocateStats,
    /// Set when the abort flag stopped the scan early. Entries committed
    /// before the stop are kept.
    pub aborted: bool,
}

impl LocateOutput {
    fn unassigned(len: usize) -> Self {
        LocateOutput {
            locations: vec![LocationResult::default(); len],
            ..Default::default()
        }
    }

    /// Owning triangle per point.
    pub fn triangles(&self) -> Vec<Option<usize>> {
        self.locations.iter().map(|l| l.triangle).collect()
    }

    /// Number of points that found a triangle.
    pub fn assigned(&self) -> usize {
        self.locations.iter().filter(|l| l.triangle.is_some()).count()
    }

    /// Record triangle `k` (0-based) as owner of point `id`.
    fn assign(&mut self, id: usize, k: usize, weights: Option<[f64; 3]>) {
        self.locations[id] = LocationResult {
            triangle: Some(k + 1),
            barycentric: weights,
        };
        self.stats.hits += 1;
    }

    fn skip(&mut self, err: Error) {
        warn!("skipping triangle: {err}");
        self.stats.skipped += 1;
        self.warnings.push(err);
    }
}

fn check_parallel(what: &'static str, xs: &[f64], ys: &[f64]) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(Error::DimensionMismatch {
            what,
            expected: xs.len(),
            found: ys.len(),
        });
    }
    Ok(())
}

/// Vertices of triangle `k` (0-based) from 1-based indices into `x`, `y`.
fn triangle_vertices(k: usize, tri: &[usize; 3], x: &[f64], y: &[f64]) -> Result<[Point2; 3]> {
    let mut out = [Point2::default(); 3];
    for (slot, &vertex) in out.iter_mut().zip(tri) {
        if vertex == 0 || vertex > x.len() {
            return Err(Error::VertexOutOfRange {
                triangle: k + 1,
                vertex,
                len: x.len(),
            });
        }
        *slot = Point2::new(x[vertex - 1], y[vertex - 1]);
    }
    Ok(out)
}
