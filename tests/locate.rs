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

use std::sync::{Arc, atomic::AtomicBool};

use approx::assert_relative_eq;
use tsearch::geometry::BoundingBox;
use tsearch::geometry::util::random_points;
use tsearch::{
    Error, GeometryEngine, LocateOptions, PlanarEngine, Point2, SpatialIndex, locate, locate_points,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn unit_triangle() -> (Vec<f64>, Vec<f64>, Vec<[usize; 3]>) {
    (vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0], vec![[1, 2, 3]])
}

fn unit_square() -> (Vec<f64>, Vec<f64>) {
    (vec![0.0, 1.0, 1.0, 0.0], vec![0.0, 0.0, 1.0, 1.0])
}

/// Random triangulation of `n` vertices plus `m` query points over the same
/// square.
fn random_mesh(n: usize, m: usize, seed: u64) -> (Vec<f64>, Vec<f64>, Vec<[usize; 3]>, Vec<f64>, Vec<f64>) {
    let bounds = BoundingBox::from_extent(0.0, 0.0, 100.0, 100.0);
    let vertices = random_points(n, &bounds, seed);
    let mut sink = Vec::new();
    let dt = PlanarEngine
        .compute_delaunay(&vertices, "", &mut sink)
        .unwrap();
    let queries = random_points(m, &bounds, seed + 1);
    (
        vertices.iter().map(|p| p.x).collect(),
        vertices.iter().map(|p| p.y).collect(),
        dt.simplices,
        queries.iter().map(|p| p.x).collect(),
        queries.iter().map(|p| p.y).collect(),
    )
}

#[test]
fn test_barycentric_scenario() {
    let (x, y, tris) = unit_triangle();
    let index = SpatialIndex::build(&[0.25], &[0.25]).unwrap();
    let out = locate(
        &index,
        &x,
        &y,
        &tris,
        &LocateOptions::default().with_barycentric(true),
    )
    .unwrap();

    assert_eq!(out.triangles(), vec![Some(1)]);
    let w = out.locations[0].barycentric.unwrap();
    assert_relative_eq!(w[0], 0.5, epsilon = 1e-12);
    assert_relative_eq!(w[1], 0.25, epsilon = 1e-12);
    assert_relative_eq!(w[2], 0.25, epsilon = 1e-12);
    assert!(out.warnings.is_empty());
    assert!(!out.aborted);
}

#[test]
fn test_barycentric_only_when_requested() {
    let (x, y, tris) = unit_triangle();
    let out = locate_points(&x, &y, &tris, &[0.25], &[0.25], &LocateOptions::default()).unwrap();
    assert_eq!(out.locations[0].triangle, Some(1));
    assert!(out.locations[0].barycentric.is_none());
}

#[test]
fn test_points_outside_bounding_box_are_never_tested() {
    let (x, y, tris) = unit_triangle();
    // first point is just right of the triangle's box, second is inside
    let index = SpatialIndex::build(&[1.0 + 1e-9, 0.2], &[0.5, 0.2]).unwrap();
    let out = locate(&index, &x, &y, &tris, &LocateOptions::default()).unwrap();

    assert_eq!(out.triangles(), vec![None, Some(1)]);
    assert_eq!(out.stats.triangles, 1);
    assert_eq!(out.stats.candidates, 1);
    assert_eq!(out.stats.hits, 1);
}

#[test]
fn test_inside_box_but_outside_triangle() {
    let (x, y, tris) = unit_triangle();
    let out = locate_points(&x, &y, &tris, &[0.9], &[0.9], &LocateOptions::default()).unwrap();
    assert_eq!(out.triangles(), vec![None]);
    assert_eq!(out.stats.candidates, 1);
    assert_eq!(out.assigned(), 0);
}

#[test]
fn test_shared_edge_goes_to_later_triangle() {
    let (x, y) = unit_square();
    let forward = vec![[1, 2, 3], [1, 3, 4]];
    let backward = vec![[1, 3, 4], [1, 2, 3]];
    let xi = [0.5, 0.25, 0.75];
    let yi = [0.5, 0.75, 0.25];

    for _ in 0..3 {
        let out = locate_points(&x, &y, &forward, &xi, &yi, &LocateOptions::default()).unwrap();
        assert_eq!(out.triangles(), vec![Some(2), Some(2), Some(1)]);
        // the diagonal point was claimed twice
        assert_eq!(out.stats.hits, 4);
    }

    let out = locate_points(&x, &y, &backward, &xi, &yi, &LocateOptions::default()).unwrap();
    assert_eq!(out.triangles(), vec![Some(2), Some(1), Some(2)]);
}

#[test]
fn test_bad_triangles_are_skipped_with_warnings() {
    init_logging();
    let x = vec![0.0, 1.0, 2.0, 0.0];
    let y = vec![0.0, 1.0, 2.0, 1.0];
    // collinear, index 0, index past the end, then a usable one
    let tris = vec![[1, 2, 3], [0, 1, 2], [1, 2, 5], [1, 2, 4]];
    let out = locate_points(&x, &y, &tris, &[0.2, 1.5], &[0.5, 1.5], &LocateOptions::default()).unwrap();

    assert_eq!(out.triangles(), vec![Some(4), None]);
    assert_eq!(out.stats.skipped, 3);
    assert_eq!(out.stats.triangles, 1);
    assert_eq!(
        out.warnings,
        vec![
            Error::DegenerateTriangle { triangle: 1 },
            Error::VertexOutOfRange {
                triangle: 2,
                vertex: 0,
                len: 4
            },
            Error::VertexOutOfRange {
                triangle: 3,
                vertex: 5,
                len: 4
            },
        ]
    );
    assert!(out.warnings.iter().all(Error::is_recoverable));
}

#[test]
fn test_fatal_input_errors() {
    let (x, y, tris) = unit_triangle();
    let index = SpatialIndex::build(&[0.1], &[0.1]).unwrap();

    assert!(matches!(
        locate(&index, &x, &y[..2], &tris, &LocateOptions::default()),
        Err(Error::DimensionMismatch { .. })
    ));
    assert!(matches!(
        locate(&index, &x, &y, &tris, &LocateOptions::default().with_eps(-1.0)),
        Err(Error::InvalidTolerance { .. })
    ));
    assert_eq!(
        locate_points(&x, &y, &tris, &[], &[], &LocateOptions::default()).unwrap_err(),
        Error::EmptyInput
    );
}

#[test]
fn test_no_triangles_leaves_everything_unassigned() {
    let index = SpatialIndex::build(&[0.1, 0.2], &[0.1, 0.2]).unwrap();
    let out = locate(&index, &[], &[], &[], &LocateOptions::default()).unwrap();
    assert_eq!(out.triangles(), vec![None, None]);
    assert_eq!(out.stats.triangles, 0);
}

#[test]
fn test_tolerance_absorbs_rounding_on_boundary() {
    let (x, y, tris) = unit_triangle();
    let xi = [0.5 + 1e-13, 0.5 + 1e-6];
    let yi = [0.5, 0.5];
    let strict = locate_points(&x, &y, &tris, &xi, &yi, &LocateOptions::default()).unwrap();
    assert_eq!(strict.triangles(), vec![Some(1), None]);

    let loose = locate_points(&x, &y, &tris, &xi, &yi, &LocateOptions::default().with_eps(1e-5)).unwrap();
    assert_eq!(loose.triangles(), vec![Some(1), Some(1)]);
}

#[test]
fn test_random_mesh_every_interior_point_found() {
    let (x, y, tris, xi, yi) = random_mesh(200, 2000, 5);
    let out = locate_points(&x, &y, &tris, &xi, &yi, &LocateOptions::default().with_barycentric(true)).unwrap();

    for (id, loc) in out.locations.iter().enumerate() {
        let Some(k) = loc.triangle else { continue };
        let [a, b, c] = tris[k - 1].map(|v| Point2::new(x[v - 1], y[v - 1]));
        let w = loc.barycentric.unwrap();
        assert_relative_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(w[0] * a.x + w[1] * b.x + w[2] * c.x, xi[id], epsilon = 1e-8);
        assert_relative_eq!(w[0] * a.y + w[1] * b.y + w[2] * c.y, yi[id], epsilon = 1e-8);
    }
    // the hull of 200 uniform points covers most of the square
    assert!(out.assigned() > 1500);
}

#[test]
fn test_parallel_matches_sequential() {
    let (x, y, tris, xi, yi) = random_mesh(300, 3000, 17);
    let index = SpatialIndex::build(&xi, &yi).unwrap();
    let opts = LocateOptions::default().with_barycentric(true);

    let sequential = locate(&index, &x, &y, &tris, &opts).unwrap();
    let parallel = locate(&index, &x, &y, &tris, &opts.clone().with_parallel(true)).unwrap();

    assert_eq!(sequential.locations, parallel.locations);
    assert_eq!(sequential.stats, parallel.stats);
}

#[test]
fn test_abort_before_start() {
    let (x, y, tris) = unit_triangle();
    let flag = Arc::new(AtomicBool::new(true));
    for parallel in [false, true] {
        let opts = LocateOptions::default()
            .with_abort(flag.clone())
            .with_parallel(parallel);
        let out = locate_points(&x, &y, &tris, &[0.1], &[0.1], &opts).unwrap();
        assert!(out.aborted);
        assert_eq!(out.triangles(), vec![None]);
        assert_eq!(out.stats.triangles, 0);
    }
}
