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

use log::debug;

use super::{LocateOptions, LocateOutput, LocateStats, check_parallel, triangle_vertices};
use crate::{
    error::{Error, Result},
    geometry::{BoundingBox, Point2, util::extent},
    kernel::AffineFrame,
};

/// Triangle that held the previous query point, tried first for the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastTriangle {
    #[default]
    NoHint,
    /// 0-based triangle index.
    Hint(usize),
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    bounds: BoundingBox,
    frame: AffineFrame,
}

/// Brute-force locator over a fixed triangulation.
///
/// All arithmetic happens in coordinates translated by the triangulation's
/// minimum corner, which keeps cancellation small for clouds far from the
/// origin. Barycentric weights are translation invariant, so nothing needs
/// to be shifted back.
#[derive(Debug, Clone)]
pub struct LegacyLocator {
    triangles: Vec<Option<Candidate>>,
    shift: (f64, f64),
    eps: f64,
}

impl LegacyLocator {
    /// Prepare every triangle. Unusable ones are returned as warnings and
    /// never match.
    pub fn new(
        x: &[f64],
        y: &[f64],
        triangles: &[[usize; 3]],
        eps: f64,
    ) -> Result<(Self, Vec<Error>)> {
        check_parallel("triangulation coordinates (x, y)", x, y)?;
        let shift = extent(x, y).map_or((0.0, 0.0), |(min_x, min_y, _, _)| (-min_x, -min_y));

        let mut warnings = Vec::new();
        let prepared = triangles
            .iter()
            .enumerate()
            .map(|(k, tri)| {
                let [a, b, c] = triangle_vertices(k, tri, x, y)
                    .map_err(|err| warnings.push(err))
                    .ok()?
                    .map(|v| v.translated(shift.0, shift.1));
                let Some(frame) = AffineFrame::new(a, b, c) else {
                    warnings.push(Error::DegenerateTriangle { triangle: k + 1 });
                    return None;
                };
                Some(Candidate {
                    bounds: BoundingBox::of_triangle(&a, &b, &c).expanded(eps),
                    frame,
                })
            })
            .collect();

        Ok((
            LegacyLocator {
                triangles: prepared,
                shift,
                eps,
            },
            warnings,
        ))
    }

    /// Number of triangles, usable or not.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of triangles that can own points.
    pub fn usable(&self) -> usize {
        self.triangles.iter().flatten().count()
    }

    /// Find the triangle holding `p`, trying `hint` first.
    ///
    /// Returns the 0-based triangle and its weights, along with the hint for
    /// the next point: the triangle just found, or [`LastTriangle::NoHint`]
    /// after a miss.
    pub fn locate_one(
        &self,
        hint: LastTriangle,
        p: &Point2,
        stats: &mut LocateStats,
    ) -> (Option<(usize, [f64; 3])>, LastTriangle) {
        let p = p.translated(self.shift.0, self.shift.1);

        if let LastTriangle::Hint(k) = hint {
            if let Some(Some(cand)) = self.triangles.get(k) {
                stats.candidates += 1;
                if let Some(w) = cand.frame.locate(&p, self.eps) {
                    stats.hint_hits += 1;
                    return (Some((k, w)), hint);
                }
            }
        }

        for (k, cand) in self.triangles.iter().enumerate() {
            let Some(cand) = cand else { continue };
            if !cand.bounds.contains(&p) {
                continue;
            }
            stats.candidates += 1;
            if let Some(w) = cand.frame.locate(&p, self.eps) {
                return (Some((k, w)), LastTriangle::Hint(k));
            }
        }
        (None, LastTriangle::NoHint)
    }
}

/// Locate `(xi, yi)` in the triangulation without a spatial index.
///
/// Cheap when consecutive points tend to fall in the same triangle, as along
/// a path. Within one point's scan the first matching triangle wins. The
/// `parallel` option is ignored: each point depends on the previous one.
pub fn locate_legacy(
    x: &[f64],
    y: &[f64],
    triangles: &[[usize; 3]],
    xi: &[f64],
    yi: &[f64],
    options: &LocateOptions,
) -> Result<LocateOutput> {
    check_parallel("triangulation coordinates (x, y)", x, y)?;
    check_parallel("query coordinates (xi, yi)", xi, yi)?;
    options.validate()?;
    if xi.is_empty() {
        return Err(Error::EmptyInput);
    }
    if let Some(index) = xi
        .iter()
        .zip(yi)
        .position(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        return Err(Error::NonFiniteCoordinate { index });
    }

    let (locator, warnings) = LegacyLocator::new(x, y, triangles, options.eps)?;
    let mut out = LocateOutput::unassigned(xi.len());
    for err in warnings {
        out.skip(err);
    }
    out.stats.triangles = locator.usable();

    let mut hint = LastTriangle::NoHint;
    for (id, (&px, &py)) in xi.iter().zip(yi).enumerate() {
        if options.is_aborted() {
            out.aborted = true;
            break;
        }
        let (found, next) = locator.locate_one(hint, &Point2::with_id(px, py, id), &mut out.stats);
        if let Some((k, w)) = found {
            out.assign(id, k, options.barycentric.then_some(w));
        }
        hint = next;
    }

    debug!(
        "brute-force located {} of {} points ({} candidates tested, {} from the previous triangle)",
        out.assigned(),
        xi.len(),
        out.stats.candidates,
        out.stats.hint_hits
    );
    Ok(out)
}
