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

use approx::assert_relative_eq;
use tsearch::{Error, GeometryEngine, LocateOptions, PlanarEngine, Point2, locate_points};

fn points(coords: &[(f64, f64)]) -> Vec<Point2> {
    coords.iter().map(|&c| Point2::from(c)).collect()
}

#[test]
fn test_delaunay_of_square() {
    let pts = points(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
    let mut sink = Vec::new();
    let dt = PlanarEngine.compute_delaunay(&pts, "Fa", &mut sink).unwrap();

    assert_eq!(dt.simplices.len(), 2);
    assert!(dt.simplices.iter().flatten().all(|&v| (1..=4).contains(&v)));
    let areas = dt.areas.unwrap();
    assert_relative_eq!(areas.iter().sum::<f64>(), 4.0, epsilon = 1e-12);
    assert!(dt.neighbors.is_none());
    assert!(sink.is_empty());
}

#[test]
fn test_hull_measures() {
    // interior point must not appear on the hull
    let pts = points(&[(0.0, 0.0), (3.0, 0.0), (3.0, 1.0), (0.0, 1.0), (1.0, 0.5)]);
    let mut sink = Vec::new();
    let hull = PlanarEngine.compute_hull(&pts, "FA Qt", &mut sink).unwrap();

    assert_eq!(hull.facets.len(), 4);
    assert!(hull.facets.iter().flatten().all(|&v| v != 5));
    assert_relative_eq!(hull.area.unwrap(), 8.0, epsilon = 1e-12);
    assert_relative_eq!(hull.volume.unwrap(), 3.0, epsilon = 1e-12);
    assert!(hull.normals.is_none());
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_engine_errors_are_verbatim() {
    let mut sink = Vec::new();

    let err = PlanarEngine
        .compute_delaunay(&points(&[(0.0, 0.0), (1.0, 1.0)]), "", &mut sink)
        .unwrap_err();
    assert_eq!(err, Error::Engine("need at least 3 points, got 2".into()));

    let err = PlanarEngine
        .compute_hull(&points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]), "", &mut sink)
        .unwrap_err();
    assert!(err.is_engine_error());

    let err = PlanarEngine
        .compute_delaunay(&points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]), "Fx", &mut sink)
        .unwrap_err();
    assert_eq!(err, Error::Engine("unknown option 'Fx'".into()));
}

#[test]
fn test_triangulation_feeds_locator() {
    let pts = points(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (2.0, 1.0)]);
    let mut sink = Vec::new();
    let dt = PlanarEngine.compute_delaunay(&pts, "", &mut sink).unwrap();

    let x: Vec<f64> = pts.iter().map(|p| p.x).collect();
    let y: Vec<f64> = pts.iter().map(|p| p.y).collect();
    let xi = [0.5, 3.5, 3.9, 5.0];
    let yi = [3.0, 0.2, 3.9, 5.0];
    let out = locate_points(&x, &y, &dt.simplices, &xi, &yi, &LocateOptions::default()).unwrap();

    assert_eq!(out.assigned(), 3);
    assert_eq!(out.locations[3].triangle, None);
    assert!(out.warnings.is_empty());
}
