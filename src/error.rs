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

//! Every failure mode this crate can produce. All of them are fatal: there is
//! no local recovery anywhere in the core, so any `Err` here is meant to
//! propagate straight out of [`crate::solve`] and abort the whole job.

/// The error type returned by [`crate::solve`] and the `los` binary.
#[derive(thiserror::Error, Debug)]
pub enum LosError {
    /// No altitudes were supplied at all.
    #[error("no altitudes were supplied")]
    EmptyInput,

    /// `N < 2`: there must be an observer plus at least one other point.
    #[error("need at least 2 altitudes (observer + 1 point), got {n}")]
    TooFewPoints { n: usize },

    /// `P == 0`.
    #[error("worker count must be at least 1")]
    NoWorkers,

    /// `P > N`: some rank would own an empty block, which the partitioner
    /// and block scan driver both treat as a programmer error.
    #[error("worker count {p} exceeds the number of points {n}")]
    TooManyWorkers { p: usize, n: usize },

    /// A token in the input line could not be parsed as an integer altitude.
    #[error("could not parse altitude {token:?}: {source}")]
    ParseAltitude {
        token: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A worker thread panicked mid-phase: unrecoverable, since every other
    /// rank is now either finished or blocked on a barrier that will never
    /// complete, so the whole job must be torn down with it.
    #[error("a worker thread panicked before completing its phase")]
    WorkerPanicked,
}

pub type Result<T> = std::result::Result<T, LosError>;

#[cfg(test)]
mod test_error {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            LosError::TooFewPoints { n: 1 }.to_string(),
            "need at least 2 altitudes (observer + 1 point), got 1"
        );
        assert_eq!(
            LosError::TooManyWorkers { p: 9, n: 4 }.to_string(),
            "worker count 9 exceeds the number of points 4"
        );
    }
}
