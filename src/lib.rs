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

//! Quadtree-accelerated triangle point location in the plane.
//!
//! ```
//! use tsearch::{LocateOptions, SpatialIndex, locate};
//!
//! let x = [0.0, 1.0, 0.0];
//! let y = [0.0, 0.0, 1.0];
//! let triangles = [[1, 2, 3]];
//!
//! let index = SpatialIndex::build(&[0.25, 2.0], &[0.25, 2.0]).unwrap();
//! let out = locate(&index, &x, &y, &triangles, &LocateOptions::default()).unwrap();
//! assert_eq!(out.triangles(), vec![Some(1), None]);
//! ```

pub mod engine;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod operations;

pub use engine::{Delaunay, DiagnosticSink, GeometryEngine, Hull, LogSink, PlanarEngine};
pub use error::{Error, Result};
pub use geometry::{BoundingBox, Point2, SpatialIndex};
pub use operations::{
    LastTriangle, LegacyLocator, LocateOptions, LocateOutput, LocateStats, LocationResult, locate,
    locate_legacy, locate_points,
};
