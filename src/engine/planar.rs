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

use delaunator::{EMPTY, Triangulation, triangulate};

use super::{Delaunay, DiagnosticSink, GeometryEngine, Hull, parse_options};
use crate::{
    error::{Error, Result},
    geometry::Point2,
    kernel::orient2d,
};

/// Planar engine backed by `delaunator`.
///
/// Duplicate points are dropped by the triangulator; they simply never show
/// up in the output.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlanarEngine;

impl PlanarEngine {
    fn triangulate(&self, points: &[Point2]) -> Result<Triangulation> {
        if points.len() < 3 {
            return Err(Error::Engine(format!(
                "need at least 3 points, got {}",
                points.len()
            )));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(Error::Engine(format!("point {} is not finite", i + 1)));
        }
        let input: Vec<delaunator::Point> = points
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();
        let tri = triangulate(&input);
        if tri.triangles.is_empty() {
            return Err(Error::Engine(
                "initial simplex is flat: all points are collinear or coincident".to_owned(),
            ));
        }
        Ok(tri)
    }
}

impl GeometryEngine for PlanarEngine {
    fn compute_hull(
        &self,
        points: &[Point2],
        options: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Hull> {
        let flags = parse_options(options, &["FA", "n"], sink)?;
        let tri = self.triangulate(points)?;
        let ring: Vec<&Point2> = tri.hull.iter().map(|&i| &points[i]).collect();
        let n = ring.len();

        let facets = (0..n)
            .map(|i| [tri.hull[i] + 1, tri.hull[(i + 1) % n] + 1])
            .collect();

        let (area, volume) = if flags.contains(&"FA") {
            let perimeter = (0..n)
                .map(|i| ring[i].distance_to(ring[(i + 1) % n]))
                .sum::<f64>();
            let origin = Point2::default();
            let enclosed: f64 = (0..n)
                .map(|i| orient2d(&origin, ring[i], ring[(i + 1) % n]))
                .sum::<f64>()
                / 2.0;
            (Some(perimeter), Some(enclosed.abs()))
        } else {
            (None, None)
        };

        let normals = flags.contains(&"n").then(|| {
            let cx = ring.iter().map(|p| p.x).sum::<f64>() / n as f64;
            let cy = ring.iter().map(|p| p.y).sum::<f64>() / n as f64;
            (0..n)
                .map(|i| {
                    let (p, q) = (ring[i], ring[(i + 1) % n]);
                    let len = p.distance_to(q);
                    let (mut nx, mut ny) = ((q.y - p.y) / len, -(q.x - p.x) / len);
                    if nx * (p.x - cx) + ny * (p.y - cy) < 0.0 {
                        nx = -nx;
                        ny = -ny;
                    }
                    [nx, ny, -(nx * p.x + ny * p.y)]
                })
                .collect()
        });

        Ok(Hull {
            facets,
            area,
            volume,
            normals,
        })
    }

    fn compute_delaunay(
        &self,
        points: &[Point2],
        options: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Delaunay> {
        let flags = parse_options(options, &["Fa", "Fn"], sink)?;
        let tri = self.triangulate(points)?;

        let simplices: Vec<[usize; 3]> = tri
            .triangles
            .chunks_exact(3)
            .map(|t| [t[0] + 1, t[1] + 1, t[2] + 1])
            .collect();

        // Halfedge 3t+j runs from vertex j to vertex j+1, so the triangle
        // across it is opposite vertex j+2.
        let neighbors = flags.contains(&"Fn").then(|| {
            (0..simplices.len())
                .map(|t| {
                    std::array::from_fn(|i| {
                        let opposite = tri.halfedges[3 * t + (i + 1) % 3];
                        (opposite != EMPTY).then(|| opposite / 3 + 1)
                    })
                })
                .collect()
        });

        let areas = flags.contains(&"Fa").then(|| {
            simplices
                .iter()
                .map(|s| orient2d(&points[s[0] - 1], &points[s[1] - 1], &points[s[2] - 1]).abs() / 2.0)
                .collect()
        });

        Ok(Delaunay {
            simplices,
            neighbors,
            areas,
        })
    }
}
