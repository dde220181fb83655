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
use rayon::prelude::*;

use super::{LocateOptions, LocateOutput, check_parallel, triangle_vertices};
use crate::{
    error::{Error, Result},
    geometry::{BoundingBox, Point2, SpatialIndex},
    kernel::TriangleFrame,
};

/// What one triangle contributes, before it is committed.
enum Scan {
    Hits {
        hits: Vec<(usize, [f64; 3])>,
        candidates: usize,
    },
    Skipped(Error),
    Aborted,
}

fn scan_triangle<'a>(
    index: &'a SpatialIndex,
    k: usize,
    tri: &[usize; 3],
    x: &[f64],
    y: &[f64],
    eps: f64,
    buf: &mut Vec<&'a Point2>,
) -> Scan {
    let [a, b, c] = match triangle_vertices(k, tri, x, y) {
        Ok(vertices) => vertices,
        Err(err) => return Scan::Skipped(err),
    };
    let Some(frame) = TriangleFrame::new(a, b, c) else {
        return Scan::Skipped(Error::DegenerateTriangle { triangle: k + 1 });
    };

    let window = BoundingBox::of_triangle(&a, &b, &c).expanded(eps);
    buf.clear();
    index.query_rect_into(&window, buf);

    let hits = buf
        .iter()
        .filter_map(|p| frame.locate(p, eps).map(|w| (p.id, w)))
        .collect();
    Scan::Hits {
        hits,
        candidates: buf.len(),
    }
}

/// Apply one scan to the output. Returns `false` once the run is aborted.
fn commit(out: &mut LocateOutput, k: usize, scan: Scan, barycentric: bool) -> bool {
    match scan {
        Scan::Hits { hits, candidates } => {
            out.stats.triangles += 1;
            out.stats.candidates += candidates;
            for (id, w) in hits {
                out.assign(id, k, barycentric.then_some(w));
            }
            true
        }
        Scan::Skipped(err) => {
            out.skip(err);
            true
        }
        Scan::Aborted => {
            out.aborted = true;
            false
        }
    }
}

/// Commit scans in triangle order. The abort flag is read again before each
/// commit, so nothing lands after it is raised, however far the scans got.
fn commit_all(out: &mut LocateOutput, scans: impl IntoIterator<Item = Scan>, options: &LocateOptions) {
    for (k, scan) in scans.into_iter().enumerate() {
        let scan = if options.is_aborted() { Scan::Aborted } else { scan };
        if !commit(out, k, scan, options.barycentric) {
            break;
        }
    }
}

/// Locate every point of `index` in the triangulation `triangles` over
/// `(x, y)`.
///
/// Triangles are visited in input order and a later triangle overwrites an
/// earlier one for a point both contain, so a point on a shared edge ends up
/// with the higher triangle number. This tie-break is reproducible but
/// carries no geometric meaning.
///
/// Malformed or zero-area triangles are skipped and listed in
/// [`LocateOutput::warnings`].
pub fn locate(
    index: &SpatialIndex,
    x: &[f64],
    y: &[f64],
    triangles: &[[usize; 3]],
    options: &LocateOptions,
) -> Result<LocateOutput> {
    check_parallel("triangulation coordinates (x, y)", x, y)?;
    options.validate()?;

    let eps = options.eps;
    let mut out = LocateOutput::unassigned(index.len());

    if options.parallel {
        let scans: Vec<Scan> = triangles
            .par_iter()
            .enumerate()
            .map_init(Vec::new, |buf, (k, tri)| {
                if options.is_aborted() {
                    Scan::Aborted
                } else {
                    scan_triangle(index, k, tri, x, y, eps, buf)
                }
            })
            .collect();
        commit_all(&mut out, scans, options);
    } else {
        let mut buf = Vec::new();
        let scans = triangles.iter().enumerate().map(|(k, tri)| {
            if options.is_aborted() {
                Scan::Aborted
            } else {
                scan_triangle(index, k, tri, x, y, eps, &mut buf)
            }
        });
        commit_all(&mut out, scans, options);
    }

    debug!(
        "located {} of {} points in {} triangles ({} candidates tested, {} skipped{})",
        out.assigned(),
        index.len(),
        out.stats.triangles,
        out.stats.candidates,
        out.stats.skipped,
        if out.aborted { ", aborted" } else { "" }
    );
    Ok(out)
}

/// Build a [`SpatialIndex`] over `(xi, yi)` and run [`locate`] with it.
pub fn locate_points(
    x: &[f64],
    y: &[f64],
    triangles: &[[usize; 3]],
    xi: &[f64],
    yi: &[f64],
    options: &LocateOptions,
) -> Result<LocateOutput> {
    check_parallel("triangulation coordinates (x, y)", x, y)?;
    options.validate()?;
    let index = SpatialIndex::build(xi, yi)?;
    locate(&index, x, y, triangles, options)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};

    use super::*;

    fn hit(id: usize) -> Scan {
        Scan::Hits {
            hits: vec![(id, [1.0, 0.0, 0.0])],
            candidates: 1,
        }
    }

    #[test]
    fn raising_abort_mid_run_keeps_the_prefix() {
        let flag = Arc::new(AtomicBool::new(false));
        let options = LocateOptions::default().with_abort(flag.clone());
        let scans = (0..4).map(|k| {
            if k == 2 {
                flag.store(true, Ordering::Relaxed);
            }
            hit(k)
        });

        let mut out = LocateOutput::unassigned(4);
        commit_all(&mut out, scans, &options);
        assert!(out.aborted);
        assert_eq!(out.triangles(), vec![Some(1), Some(2), None, None]);
        assert_eq!(out.stats.triangles, 2);
        assert_eq!(out.stats.hits, 2);
    }

    #[test]
    fn abort_after_scanning_commits_nothing() {
        let flag = Arc::new(AtomicBool::new(false));
        let options = LocateOptions::default().with_abort(flag.clone());
        let scans: Vec<Scan> = (0..3).map(hit).collect();
        flag.store(true, Ordering::Relaxed);

        let mut out = LocateOutput::unassigned(3);
        commit_all(&mut out, scans, &options);
        assert!(out.aborted);
        assert_eq!(out.assigned(), 0);
        assert_eq!(out.stats.triangles, 0);
    }

    #[test]
    fn later_scan_overwrites_earlier() {
        let mut out = LocateOutput::unassigned(1);
        commit_all(&mut out, [hit(0), hit(0)], &LocateOptions::default());
        assert!(!out.aborted);
        assert_eq!(out.triangles(), vec![Some(2)]);
    }
}
