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

//! Wires the whole pipeline together: broadcast `N`, partition, compute
//! angles, scan (tree or block regime), compute the verdict, and hand the
//! result back. This is the crate's single public entry point; everything
//! upstream of it (tokenising a CLI argument, say) and everything
//! downstream (rendering `R` as CSV) lives outside the core, in the `los`
//! binary.

use std::sync::Barrier;

use tracing::{debug, info_span};

use crate::angle::compute_angles;
use crate::block::block_scan_driver;
use crate::common::{Regime, Verdict};
use crate::error::{LosError, Result};
use crate::partition::partition;
use crate::region::SharedRegion;
use crate::scan::tree_scan;
use crate::verdict::compute_verdict;
use crate::worker::run_workers;

/// Solves the Line-of-Sight visibility problem for altitude sequence `h`
/// using `p` worker ranks. `h[0]` is the observer; `h.len()` is `N`. The
/// regime (tree vs block) is chosen automatically from `(N, P)`.
///
/// Phase order is total and identical on every rank, each phase closed by a
/// barrier: partition, angle kernel, scan (tree or block, chosen from
/// `(n, p)`), verdict kernel.
pub fn solve(h: &[i64], p: usize) -> Result<Verdict> {
    solve_with_regime(h, p, None)
}

/// Same as [`solve`], but lets the caller force a specific regime instead of
/// letting `(N, P)` decide. Both regimes are correct for any valid `(N, P)`
/// pair — the split between them is a performance choice, not a correctness
/// one — so this exists purely so the `los` binary and the regime-invariance
/// property tests can exercise the non-default regime directly instead of
/// only indirectly via `P`.
pub fn solve_with_regime(h: &[i64], p: usize, forced: Option<Regime>) -> Result<Verdict> {
    let n = h.len();
    if n == 0 {
        return Err(LosError::EmptyInput);
    }
    if n < 2 {
        return Err(LosError::TooFewPoints { n });
    }

    let part = partition(n, p)?;
    let regime = forced.unwrap_or_else(|| Regime::select(n, p));

    let span = info_span!("los_solve", n, p, ?regime);
    let _enter = span.enter();
    debug!(counts = ?part.counts, starts = ?part.starts, "partition computed");

    let angles = SharedRegion::new(vec![0.0f32; n].into_boxed_slice());
    let scan = SharedRegion::new(vec![0.0f32; n].into_boxed_slice());
    let visible = SharedRegion::new(vec![false; n].into_boxed_slice());
    let sub_max = match regime {
        Regime::Block => Some(SharedRegion::new(vec![0.0f32; p].into_boxed_slice())),
        Regime::Tree => None,
    };
    let barrier = Barrier::new(p);

    run_workers(p, |rank| {
        let block = part.block(rank);

        compute_angles(h, block.clone(), &angles, &scan);
        barrier.wait();

        match regime {
            Regime::Tree => {
                debug!(rank, "entering tree scan");
                tree_scan(&scan, n, rank, &barrier);
            }
            Regime::Block => {
                debug!(rank, "entering block scan driver");
                let sub_max = sub_max.as_ref().expect("sub_max allocated for block regime");
                block_scan_driver(&scan, sub_max, block.clone(), rank, p, &barrier);
            }
        }

        compute_verdict(block, &angles, &scan, &visible);
        barrier.wait();
    })?;

    Ok(Verdict {
        visible: visible.into_inner(),
        regime,
    })
}
