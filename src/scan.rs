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

//! The Blelloch-style exclusive max-scan: an in-place up-sweep / down-sweep
//! over a shared region of length `n`, run by `p` cooperating ranks that each
//! identify their own tree position with their rank id.
//!
//! This is called twice in a run: once directly over the full angle
//! workspace when the tree regime is selected (`n == N`), and once over the
//! length-`P` vector of per-block maxima when the block-scan driver needs an
//! exclusive max-prefix of block sums (`n == P`). Both calls share this one
//! routine.
//!
//! Correctness needs exactly `ceil(n/2)` active ranks: one per adjacent pair
//! of real indices at the bottom of the tree. Pairs that fall entirely in
//! the padding between `n` and `n.next_power_of_two()` never need a rank at
//! all, since both their inputs and their result are identity. Callers with
//! fewer than `ceil(n/2)` ranks will silently leave some real pairs
//! uncombined; every call site in this crate is only ever reached with
//! `p >= ceil(n/2)` for the `n` it passes.

use std::sync::Barrier;

use crate::common::NEG_INF;
use crate::region::SharedRegion;

/// Reads `region[idx]` if `idx < n`, else returns the scan identity. Indices
/// at or beyond `n` but below `n.next_power_of_two()` are padding that never
/// had a physical cell to begin with; treating them as identity on every
/// read, at every depth rather than only the first, is what keeps this scan
/// memory-safe for every `p`, including worker counts larger than strictly
/// needed.
#[inline]
fn read_or_identity(region: &SharedRegion<f32>, idx: usize, n: usize) -> f32 {
    if idx < n {
        region.get(idx)
    } else {
        NEG_INF
    }
}

/// Writes `region[idx] = value` if `idx < n`; a no-op for padding positions,
/// which by construction are never read back as anything but identity.
#[inline]
fn write_if_real(region: &SharedRegion<f32>, idx: usize, value: f32, n: usize) {
    if idx < n {
        region.write(idx, value);
    }
}

/// Runs the exclusive max-scan over `region[0..n)` in place. `rank` is this
/// caller's position in `0..p`; every one of the `p` cooperating ranks must
/// call this function the same number of times with the same `n`, since the
/// barrier requires symmetric participation regardless of which ranks turn
/// out to be active at a given depth.
///
/// Post-condition: for every `i` in `0..n`, `region[i]` holds
/// `max(original region[0..i))`, with the empty max defined as `NEG_INF`.
pub fn tree_scan(region: &SharedRegion<f32>, n: usize, rank: usize, barrier: &Barrier) {
    if n == 0 {
        return;
    }
    let n_hat = n.next_power_of_two();
    let depth = n_hat.trailing_zeros() as usize;

    // Up-sweep.
    for d in 0..depth {
        if rank % (1 << d) == 0 {
            let left = rank * 2 + (1 << d) - 1;
            let right = rank * 2 + (1 << (d + 1)) - 1;
            let lv = read_or_identity(region, left, n);
            let rv = read_or_identity(region, right, n);
            write_if_real(region, right, lv.max(rv), n);
        }
        barrier.wait();
    }

    // Identity injection at the tree root.
    if rank == 0 {
        write_if_real(region, n_hat - 1, NEG_INF, n);
    }
    barrier.wait();

    // Down-sweep.
    for d in (0..depth).rev() {
        if rank % (1 << d) == 0 {
            let left = rank * 2 + (1 << d) - 1;
            let right = rank * 2 + (1 << (d + 1)) - 1;
            let tmp = read_or_identity(region, left, n);
            let rv = read_or_identity(region, right, n);
            write_if_real(region, left, rv, n);
            write_if_real(region, right, tmp.max(rv), n);
        }
        barrier.wait();
    }
}
