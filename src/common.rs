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

//! This module defines the most basic data types that are used throughout all
//! the code of this crate (both in the core scan machinery and in the worker
//! runtime wired around it).

// ----------------------------------------------------------------------------
// --- NEUTRAL ELEMENT ----------------------------------------------------------
// ----------------------------------------------------------------------------
/// The scan identity: a concrete sentinel rather than an abstract bottom, so
/// that it can be stored directly in an `f32` array cell. `max(NEG_INF, x) == x`
/// for every `x` this crate ever produces (every angle lies in `(-pi/2, pi/2)`).
pub const NEG_INF: f32 = f32::MIN;

// ----------------------------------------------------------------------------
// --- PARTITION ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A partition of `N` points across `P` ranks: block sizes and start offsets.
///
/// `counts[r]` and `starts[r]` give the contiguous, disjoint block owned by
/// rank `r`: `[starts[r], starts[r] + counts[r])`. The first `N mod P` ranks
/// get the larger of the two possible block sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub counts: Box<[usize]>,
    pub starts: Box<[usize]>,
}

impl Partition {
    /// The number of ranks this partition was built for.
    pub fn ranks(&self) -> usize {
        self.counts.len()
    }

    /// The half-open range of indices owned by `rank`.
    pub fn block(&self, rank: usize) -> std::ops::Range<usize> {
        let start = self.starts[rank];
        start..start + self.counts[rank]
    }
}

// ----------------------------------------------------------------------------
// --- REGIME -------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The two scan strategies a run can take, selected from `(n, p)` unless
/// forced by the caller (see [`crate::Cli`] in the binary front-end).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Regime {
    /// `P >= ceil(N/2)`: a single Blelloch tree scan runs directly on the
    /// angle array.
    Tree,
    /// `P < ceil(N/2)`: per-rank local reduce, a length-P tree scan over the
    /// block maxima, then a per-rank sequential local scan.
    Block,
}

impl Regime {
    /// Picks the regime the way the orchestrator does: tree whenever the
    /// worker count can give the tree scan (at least) one active rank pair
    /// per two elements.
    pub fn select(n: usize, p: usize) -> Regime {
        if p >= n.div_ceil(2) {
            Regime::Tree
        } else {
            Regime::Block
        }
    }
}

// ----------------------------------------------------------------------------
// --- VISIBILITY REPORT --------------------------------------------------------
// ----------------------------------------------------------------------------
/// The outcome of a complete Line-of-Sight run: the visibility verdict for
/// every point, plus the regime that was actually used (handy for tests and
/// diagnostics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// `visible[i]` is meaningless for `i == 0` (the observer); it is never
    /// read there by this crate's own code, but it is initialized to `false`
    /// rather than left as a gap so the vector always has length `N`.
    pub visible: Box<[bool]>,
    pub regime: Regime,
}
