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

//! A single N-element region, readable by every rank and writable by exactly
//! one rank per index, published to the rest of the ranks at the next
//! barrier.
//!
//! This is the one place in the crate that reaches for `unsafe`. Every rank
//! runs as an ordinary OS thread inside the same address space, so a single
//! heap allocation shared by reference already gives every thread a view of
//! every cell; the same effect other runtimes get from a one-sided shared
//! memory window falls out for free here. What the compiler can't see on its
//! own is the access discipline that makes concurrent `&mut` access to
//! disjoint cells sound, so that discipline is documented here and then
//! asserted with a manual `Sync` impl.

use std::cell::UnsafeCell;

/// Owner-per-index shared storage for one of `A`, `M`, or `R`.
///
/// # Safety contract
/// Between two consecutive barrier crossings, index `i` may be written by at
/// most one rank (its owner, as determined by the active [`crate::common::Partition`]),
/// and read by any number of ranks. The barrier that closes the phase is what
/// makes a write performed before it visible to every rank reading after it;
/// `SharedRegion` itself provides no synchronisation, only the ability to
/// alias the storage across thread boundaries.
pub struct SharedRegion<T> {
    cells: UnsafeCell<Box<[T]>>,
}

// Safety: callers of `write` and `get`/`as_slice` are required to respect the
// owner-per-index discipline documented on the type, with publishing handled
// by an external barrier. No two ranks are ever given overlapping write
// access to the same index within a phase.
unsafe impl<T: Send> Sync for SharedRegion<T> {}

impl<T> SharedRegion<T> {
    pub fn new(cells: Box<[T]>) -> Self {
        SharedRegion {
            cells: UnsafeCell::new(cells),
        }
    }

    pub fn len(&self) -> usize {
        // Safety: shared (read-only) access to the slice metadata only.
        unsafe { (*self.cells.get()).len() }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the value at `index`. Any rank may call this at any time; the
    /// value observed for indices outside the caller's own block is only
    /// guaranteed fresh once a barrier has closed the phase that wrote it.
    pub fn get(&self, index: usize) -> T
    where
        T: Copy,
    {
        // Safety: reading a `Copy` value never conflicts with the disjoint
        // writes the discipline above permits.
        unsafe { (*self.cells.get())[index] }
    }

    /// Writes `value` at `index`. Caller must own `index` for the current
    /// phase (i.e. be the rank whose partition block contains it, or be
    /// acting as the single designated writer for a tree-scan step that
    /// targets it).
    pub fn write(&self, index: usize, value: T) {
        // Safety: the caller is required by the type's safety contract to be
        // the sole writer of `index` during this phase.
        unsafe {
            (*self.cells.get())[index] = value;
        }
    }

    /// Consumes the region, returning the backing storage. Only sound to
    /// call once every rank has finished touching the region (i.e. after the
    /// final barrier of the phase that uses it).
    pub fn into_inner(self) -> Box<[T]> {
        self.cells.into_inner()
    }

    /// Borrows the whole region as a slice. Only sound when no concurrent
    /// writer can be active, e.g. after the orchestrator has dropped out of
    /// the worker scope.
    pub fn as_slice(&self) -> &[T] {
        // Safety: see method doc; callers uphold no-concurrent-writer.
        unsafe { &*self.cells.get() }
    }
}
