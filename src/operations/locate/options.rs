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

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    geometry::util::DEFAULT_EPS,
};

/// Settings shared by the indexed and brute-force locators.
///
/// Serializable so callers can keep them next to the rest of their
/// configuration; the abort flag is runtime-only and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateOptions {
    /// Tolerance on barycentric weights and on triangle bounding boxes.
    pub eps: f64,
    /// Record barycentric weights for every located point.
    pub barycentric: bool,
    /// Scan triangles on the rayon pool. Results are committed in triangle
    /// order, so the output is identical to a sequential run.
    pub parallel: bool,
    /// Cooperative cancellation, checked between triangles.
    #[serde(skip)]
    pub abort: Option<Arc<AtomicBool>>,
}

impl Default for LocateOptions {
    fn default() -> Self {
        LocateOptions {
            eps: DEFAULT_EPS,
            barycentric: false,
            parallel: false,
            abort: None,
        }
    }
}

impl LocateOptions {
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_barycentric(mut self, barycentric: bool) -> Self {
        self.barycentric = barycentric;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_abort(mut self, flag: Arc<AtomicBool>) -> Self {
        self.abort = Some(flag);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.eps.is_finite() || self.eps < 0.0 {
            return Err(Error::InvalidTolerance { eps: self.eps });
        }
        Ok(())
    }

    pub fn is_aborted(&self) -> bool {
        self.abort
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
