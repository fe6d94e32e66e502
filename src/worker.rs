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

//! The BSP runtime this crate runs ranks on: one OS thread per rank, spawned
//! fresh for each call to [`crate::solve`], with `std::sync::Barrier` as the
//! release/acquire synchronisation primitive the phases in `orchestrator`
//! rely on.
//!
//! Mapping ranks onto real OS threads this way gives every rank the same
//! address space almost for free: a value computed by rank 0 before the
//! scope is entered is already visible to every worker closure through the
//! shared reference it captures, so there is no broadcast step to implement
//! at all — the language's own borrow rules do it.

use crate::error::{LosError, Result};

/// Spawns `p` scoped threads, each running `body(rank)` for `rank` in
/// `0..p`. Blocks until every thread finishes. A panic in any one worker is
/// caught and reported as [`LosError::WorkerPanicked`]; by that point every
/// other worker has necessarily already finished or is blocked on a barrier
/// that will now never complete, so the whole call fails as a unit — there
/// is nothing partial left to salvage.
pub fn run_workers<F>(p: usize, body: F) -> Result<()>
where
    F: Fn(usize) + Sync,
{
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        std::thread::scope(|scope| {
            for rank in 0..p {
                let body = &body;
                scope.spawn(move || body(rank));
            }
        });
    }));
    outcome.map_err(|_| LosError::WorkerPanicked)
}

#[cfg(test)]
mod test_worker {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn every_rank_runs_exactly_once() {
        let seen = AtomicUsize::new(0);
        run_workers(6, |_rank| {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn a_worker_panic_surfaces_as_worker_panicked() {
        let result = run_workers(4, |rank| {
            if rank == 2 {
                panic!("synthetic failure for test");
            }
        });
        assert!(matches!(result, Err(LosError::WorkerPanicked)));
    }
}
