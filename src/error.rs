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

//! Error types shared by index construction, point location and the
//! geometry engine seam.

use thiserror::Error;

/// Errors produced while building a spatial index or locating points.
///
/// The per-triangle variants ([`Error::DegenerateTriangle`] and
/// [`Error::VertexOutOfRange`]) never abort a scan; they are reported as
/// warnings on the locate output. Everything else is fatal and raised before
/// any partial work.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No points to index.
    #[error("empty input: at least one point is required")]
    EmptyInput,

    /// Two coordinate sequences that must be parallel have different lengths.
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Which pair of arrays disagreed
        what: &'static str,
        /// Length of the reference array
        expected: usize,
        /// Length of the offending array
        found: usize,
    },

    /// A triangle references a vertex that does not exist (1-based indices).
    #[error("triangle {triangle} references vertex {vertex}, valid range is 1..={len}")]
    VertexOutOfRange {
        /// 1-based triangle index
        triangle: usize,
        /// Offending 1-based vertex index
        vertex: usize,
        /// Number of vertices available
        len: usize,
    },

    /// A query coordinate is NaN or infinite.
    #[error("non-finite coordinate at index {index}")]
    NonFiniteCoordinate {
        /// 0-based row of the offending point
        index: usize,
    },

    /// A point could not be placed in the tree because it lies outside the
    /// root boundary.
    #[error("point {id} lies outside the index boundary")]
    PointOutsideBounds {
        /// Identifier of the rejected point
        id: usize,
    },

    /// The data extent along one axis is wider than an `f64` can hold, so no
    /// root square can be built around it.
    #[error("coordinate extent {min} to {max} is too wide to index")]
    ExtentOverflow {
        /// Smallest coordinate on the offending axis
        min: f64,
        /// Largest coordinate on the offending axis
        max: f64,
    },

    /// Zero signed area; the triangle cannot own any point.
    #[error("triangle {triangle} is degenerate (zero area)")]
    DegenerateTriangle {
        /// 1-based triangle index
        triangle: usize,
    },

    /// Tolerance must be finite and non-negative.
    #[error("invalid tolerance: {eps}")]
    InvalidTolerance {
        /// The rejected tolerance
        eps: f64,
    },

    /// Opaque failure reported by a geometry engine, message kept verbatim.
    #[error("geometry engine error: {0}")]
    Engine(String),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` for errors that only invalidate a single triangle.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::DegenerateTriangle { .. } | Error::VertexOutOfRange { .. }
        )
    }

    /// Returns `true` if this error came from the geometry engine.
    pub fn is_engine_error(&self) -> bool {
        matches!(self, Error::Engine(_))
    }
}
