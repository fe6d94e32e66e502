// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # los-prescan
//!
//! A parallel solver for the Line-of-Sight visibility problem, built around
//! a single reusable primitive: the exclusive prefix-max ("max-prescan")
//! over a distributed vector of angles.
//!
//! Given an observer at the first altitude of a terrain profile, point `i`
//! is visible from the observer iff its apparent elevation angle strictly
//! exceeds the largest angle among all closer points. Computing "the largest
//! angle among all closer points" for every point at once is exactly an
//! exclusive prefix-max scan, which is where the parallelism lives.
//!
//! ## Two regimes
//! - **Tree regime** (`P >= ceil(N/2)`): a single Blelloch-style
//!   up-sweep/down-sweep scan runs directly over the angle array, one rank
//!   per pair of elements at the bottom of the tree.
//! - **Block regime** (`P < ceil(N/2)`): each rank reduces its own
//!   contiguous block to one maximum, those `P` maxima get a length-`P` tree
//!   scan, and each rank finishes with a local sequential exclusive scan
//!   seeded by its tree-scan result.
//!
//! Both regimes are driven by [`solve`], which picks automatically between
//! them from `(N, P)`.
//!
//! ## Quick example
//! ```
//! # use los_prescan::solve;
//! let h = [2i64, 4, 6, 8, 10, 12];
//! let verdict = solve(&h, 3).unwrap();
//! // index 0 is the observer; visible[1] is the first point after it.
//! assert_eq!(verdict.visible[1], true);
//! assert_eq!(verdict.visible[2], false);
//! ```
//!
//! ## What this crate does not do
//! Command-line parsing and input tokenisation live in the `los` binary
//! (see `src/bin/los.rs`), not in this library. There is no fault tolerance:
//! a panicking worker aborts the whole call with [`LosError::WorkerPanicked`].
//! There is no support for streaming or sparse input, and no dynamic
//! repartitioning mid-run.

mod angle;
mod block;
mod common;
mod error;
mod orchestrator;
mod partition;
mod region;
mod scan;
mod verdict;
mod worker;

pub use common::{Partition, Regime, Verdict, NEG_INF};
pub use error::{LosError, Result};
pub use orchestrator::{solve, solve_with_regime};

// Exposed for callers who want to build their own front-end instead of the
// `los` binary, or who want to test a single component in isolation.
pub use angle::compute_angles;
pub use block::block_scan_driver;
pub use partition::partition as compute_partition;
pub use region::SharedRegion;
pub use scan::tree_scan;
pub use verdict::compute_verdict;
pub use worker::run_workers;
