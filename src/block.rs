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

//! The coarse-grained counterpart to [`crate::scan::tree_scan`], used when
//! there are fewer ranks than the tree scan's one-rank-per-pair-of-elements
//! assumption needs (`P < ceil(N/2)`): each rank reduces its own block to a
//! single maximum, those `P` maxima get an exclusive max-prefix via the tree
//! scan, and each rank then turns its own block into a local sequential
//! exclusive scan seeded by that prefix.

use std::ops::Range;
use std::sync::Barrier;

use crate::region::SharedRegion;
use crate::scan::tree_scan;

/// Runs the three-step block scan driver for one rank's `block` of `scan`.
///
/// `scan` holds the per-point values to exclusive-max-scan (on phase entry,
/// equal to the angle workspace `A`); `sub_max` is a length-`p` shared region
/// used as scratch space for the per-block maxima, owned index-for-index by
/// rank, the same as every other region in this crate.
pub fn block_scan_driver(
    scan: &SharedRegion<f32>,
    sub_max: &SharedRegion<f32>,
    block: Range<usize>,
    rank: usize,
    p: usize,
    barrier: &Barrier,
) {
    // 1. Local reduce.
    let mut local_max = scan.get(block.start);
    for i in block.clone() {
        local_max = local_max.max(scan.get(i));
    }
    sub_max.write(rank, local_max);
    barrier.wait();

    // 2. Tree scan over the P block maxima.
    tree_scan(sub_max, p, rank, barrier);

    // 3. Local sequential exclusive scan, seeded by this rank's offset.
    let offset = sub_max.get(rank);
    let mut prev = scan.get(block.start);
    scan.write(block.start, offset);
    for i in (block.start + 1)..block.end {
        let cur = prev.max(scan.get(i - 1));
        prev = scan.get(i);
        scan.write(i, cur);
    }
    barrier.wait();
}

#[cfg(test)]
mod test_block {
    use super::*;
    use crate::common::{Partition, NEG_INF};
    use crate::partition::partition;
    use std::thread;

    fn run(values: &[f32], p: usize) -> Vec<f32> {
        let n = values.len();
        let part = partition(n, p).unwrap();
        let scan = SharedRegion::new(values.to_vec().into_boxed_slice());
        let sub_max = SharedRegion::new(vec![0.0f32; p].into_boxed_slice());
        let barrier = Barrier::new(p);
        thread::scope(|s| {
            for rank in 0..p {
                let scan = &scan;
                let sub_max = &sub_max;
                let barrier = &barrier;
                let part: &Partition = &part;
                s.spawn(move || {
                    block_scan_driver(scan, sub_max, part.block(rank), rank, p, barrier);
                });
            }
        });
        scan.into_inner().into_vec()
    }

    fn serial_exclusive_max(values: &[f32]) -> Vec<f32> {
        let mut out = Vec::with_capacity(values.len());
        let mut running = NEG_INF;
        for &v in values {
            out.push(running);
            running = running.max(v);
        }
        out
    }

    #[test]
    fn matches_serial_reference_across_rank_counts() {
        let input = vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0];
        let expected = serial_exclusive_max(&input);
        for p in 1..=3 {
            assert_eq!(run(&input, p), expected, "p={p}");
        }
    }

    #[test]
    fn single_rank_block_of_one_seeds_offset_only() {
        let input = vec![5.0, -3.0, 9.0, 1.0];
        let expected = serial_exclusive_max(&input);
        assert_eq!(run(&input, 4), expected);
    }

    #[test]
    fn matches_serial_on_uneven_partition() {
        let input = vec![10.0, 3.0, 5.0, 2.0, 8.0, 1.0];
        let expected = serial_exclusive_max(&input);
        for p in 1..=4 {
            assert_eq!(run(&input, p), expected, "p={p}");
        }
    }
}
