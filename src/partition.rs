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

//! Maps `N` points onto `P` ranks: block sizes, start offsets, and
//! block-to-rank ownership. Every rank derives the same partition
//! independently from `(n, p)` alone, so this never needs a round of
//! communication beyond the initial broadcast of `N`.

use crate::common::Partition;
use crate::error::{LosError, Result};

/// Builds the partition for `n` points spread over `p` ranks.
///
/// `q = n / p`, `m = n % p`; the first `m` ranks get `q + 1` points, the rest
/// get `q`. `starts` is the exclusive prefix sum of `counts`, so blocks are
/// contiguous and disjoint and `counts[r]` never differs from `counts[r']` by
/// more than one.
pub fn partition(n: usize, p: usize) -> Result<Partition> {
    if n == 0 {
        return Err(LosError::EmptyInput);
    }
    if p == 0 {
        return Err(LosError::NoWorkers);
    }
    if p > n {
        return Err(LosError::TooManyWorkers { p, n });
    }

    let q = n / p;
    let m = n % p;

    let mut counts = Vec::with_capacity(p);
    let mut starts = Vec::with_capacity(p);
    let mut start = 0usize;
    for r in 0..p {
        let count = if r < m { q + 1 } else { q };
        starts.push(start);
        counts.push(count);
        start += count;
    }
    debug_assert_eq!(start, n);

    Ok(Partition {
        counts: counts.into_boxed_slice(),
        starts: starts.into_boxed_slice(),
    })
}

#[cfg(test)]
mod test_partition {
    use super::*;

    #[test]
    fn rejects_zero_points_or_workers() {
        assert!(matches!(partition(0, 1), Err(LosError::EmptyInput)));
        assert!(matches!(partition(4, 0), Err(LosError::NoWorkers)));
    }

    #[test]
    fn rejects_more_workers_than_points() {
        assert!(matches!(
            partition(3, 4),
            Err(LosError::TooManyWorkers { p: 4, n: 3 })
        ));
    }

    #[test]
    fn even_split() {
        let part = partition(6, 3).unwrap();
        assert_eq!(&*part.counts, &[2, 2, 2]);
        assert_eq!(&*part.starts, &[0, 2, 4]);
    }

    #[test]
    fn remainder_goes_to_lowest_ranks() {
        let part = partition(7, 3).unwrap();
        assert_eq!(&*part.counts, &[3, 2, 2]);
        assert_eq!(&*part.starts, &[0, 3, 5]);
    }

    #[test]
    fn single_worker_owns_everything() {
        let part = partition(5, 1).unwrap();
        assert_eq!(&*part.counts, &[5]);
        assert_eq!(&*part.starts, &[0]);
    }

    #[test]
    fn one_point_per_worker() {
        let part = partition(4, 4).unwrap();
        assert_eq!(&*part.counts, &[1, 1, 1, 1]);
        assert_eq!(&*part.starts, &[0, 1, 2, 3]);
    }

    #[test]
    fn counts_sum_to_n_and_are_balanced_for_many_ratios() {
        for n in 1..=40 {
            for p in 1..=n {
                let part = partition(n, p).unwrap();
                let total: usize = part.counts.iter().sum();
                assert_eq!(total, n);
                let min = *part.counts.iter().min().unwrap();
                let max = *part.counts.iter().max().unwrap();
                assert!(max - min <= 1);
                for r in 1..p {
                    assert_eq!(part.starts[r], part.starts[r - 1] + part.counts[r - 1]);
                }
            }
        }
    }
}
