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

//! Seam to an external hull / triangulation engine.
//!
//! The locator only consumes triangles; where they come from is up to the
//! caller. [`GeometryEngine`] describes what such an engine provides and
//! [`PlanarEngine`] is a ready-made 2-D implementation. Engine failures are
//! surfaced as [`Error::Engine`](crate::error::Error::Engine) with the
//! engine's message untouched.

mod planar;

pub use planar::PlanarEngine;

use log::info;

use crate::{
    error::{Error, Result},
    geometry::Point2,
};

/// Receiver for engine chatter (warnings, option notes).
///
/// Passed explicitly to every engine call; nothing is written to process
/// wide streams.
pub trait DiagnosticSink {
    fn emit(&mut self, message: &str);
}

impl DiagnosticSink for Vec<String> {
    fn emit(&mut self, message: &str) {
        self.push(message.to_owned());
    }
}

/// Forwards diagnostics to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, message: &str) {
        info!("geometry engine: {message}");
    }
}

/// Convex hull of a planar point set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hull {
    /// Hull edges as 1-based point index pairs.
    pub facets: Vec<[usize; 2]>,
    /// Hull "area", which in the plane is the perimeter (`FA`).
    pub area: Option<f64>,
    /// Hull "volume", which in the plane is the enclosed area (`FA`).
    pub volume: Option<f64>,
    /// Outward unit normal and offset per facet, `n . p + offset = 0` on the
    /// facet line (`n`).
    pub normals: Option<Vec<[f64; 3]>>,
}

/// Delaunay triangulation of a planar point set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Delaunay {
    /// Triangles as 1-based point index triples, ready for
    /// [`locate`](crate::operations::locate).
    pub simplices: Vec<[usize; 3]>,
    /// Neighbour opposite each vertex, 1-based, `None` on the hull (`Fn`).
    pub neighbors: Option<Vec<[Option<usize>; 3]>>,
    /// Triangle areas (`Fa`).
    pub areas: Option<Vec<f64>>,
}

pub trait GeometryEngine {
    fn compute_hull(
        &self,
        points: &[Point2],
        options: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Hull>;

    fn compute_delaunay(
        &self,
        points: &[Point2],
        options: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Delaunay>;
}

/// Split an option string into the flags in `known`.
///
/// `Q*` tuning flags are accepted and reported as having no effect;
/// anything else is an engine error.
fn parse_options<'a>(
    options: &'a str,
    known: &[&str],
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<&'a str>> {
    let mut flags = Vec::new();
    for token in options.split_whitespace() {
        if known.contains(&token) {
            flags.push(token);
        } else if token.starts_with('Q') {
            sink.emit(&format!("option '{token}' has no effect and was ignored"));
        } else {
            return Err(Error::Engine(format!("unknown option '{token}'")));
        }
    }
    Ok(flags)
}
