// This code is part of Qiskit.
//
// (C) Copyright IBM 2025
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.
//
// Any modifications or derivative works of this code must retain this
// copyright notice, and modified files need to carry a notice indicating
// that they have been altered from the originals.

//! Post-processing of measurement counts.

pub mod adder;
pub mod marginalization;

use std::env;

use hashbrown::HashMap;
use thiserror::Error;

pub use adder::{AdderReadout, Outcome};
pub use marginalization::{
    marginal_counts, marginal_distribution, marginal_memory, most_frequent,
};

/// Measurement outcomes keyed by bitstring, clbit 0 rightmost.
pub type Counts = HashMap<String, u64>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResultsError {
    #[error("no measurement outcomes to read out")]
    EmptyCounts,
    #[error("outcome '{key}' has {actual} bits, expected at least {expected}")]
    ShortOutcome {
        key: String,
        expected: usize,
        actual: usize,
    },
    #[error("'{0}' is not a bitstring")]
    InvalidBitstring(String),
}

/// Whether to fan work out over rayon's thread pool.
///
/// When `QADDER_IN_PARALLEL` is `TRUE` we are already inside a parallel
/// context (e.g. a batch of jobs each on its own thread) and stay serial unless
/// `QADDER_FORCE_THREADS` is also `TRUE`.
#[inline]
pub fn getenv_use_multiple_threads() -> bool {
    use_multiple_threads(
        env::var("QADDER_IN_PARALLEL").ok().as_deref(),
        env::var("QADDER_FORCE_THREADS").ok().as_deref(),
    )
}

/// The threading policy behind [getenv_use_multiple_threads], given the raw
/// values of the two variables. Unset counts as `FALSE`; case is ignored.
pub fn use_multiple_threads(in_parallel: Option<&str>, force_threads: Option<&str>) -> bool {
    let is_true = |value: Option<&str>| value.is_some_and(|v| v.eq_ignore_ascii_case("TRUE"));
    !is_true(in_parallel) || is_true(force_threads)
}

#[cfg(test)]
mod test {
    use super::use_multiple_threads;

    #[test]
    fn threads_are_used_outside_a_parallel_context() {
        assert!(use_multiple_threads(None, None));
        assert!(use_multiple_threads(Some("FALSE"), None));
        assert!(use_multiple_threads(Some("yes"), None));
    }

    #[test]
    fn parallel_context_stays_serial_unless_forced() {
        assert!(!use_multiple_threads(Some("TRUE"), None));
        assert!(!use_multiple_threads(Some("true"), Some("FALSE")));
        assert!(use_multiple_threads(Some("True"), Some("tRuE")));
    }
}
