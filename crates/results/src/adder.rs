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

//! Reading an integer sum back out of ripple-carry adder counts.
//!
//! The adder circuits measure the sum register into clbits `0..k` and the
//! carry-out into clbit `k`; any further clbits (ancillas, the restored `a`
//! register) are ignored. The low `k + 1` bits of the most frequent outcome are
//! therefore the full `k + 1` bit sum, with the carry as its leading bit.

use itertools::Itertools;

use crate::marginalization::{marginal_counts, most_frequent};
use crate::{Counts, ResultsError};

/// One distinct `k + 1` bit outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub bitstring: String,
    pub value: u64,
    pub overflow: bool,
    pub count: u64,
}

impl Outcome {
    /// Distance of this outcome from the expected sum.
    pub fn error(&self, expected: u64) -> u64 {
        self.value.abs_diff(expected)
    }
}

#[derive(Clone, Debug)]
pub struct AdderReadout {
    num_state_qubits: usize,
    shots: u64,
    outcomes: Vec<Outcome>,
    best: usize,
}

fn parse_outcome(bitstring: &str, count: u64) -> Result<Outcome, ResultsError> {
    let value = u64::from_str_radix(bitstring, 2)
        .map_err(|_| ResultsError::InvalidBitstring(bitstring.to_string()))?;
    Ok(Outcome {
        bitstring: bitstring.to_string(),
        value,
        overflow: bitstring.starts_with('1'),
        count,
    })
}

impl AdderReadout {
    /// Marginalize `counts` down to the `num_state_qubits + 1` result bits.
    pub fn from_counts(counts: &Counts, num_state_qubits: usize) -> Result<Self, ResultsError> {
        let width = num_state_qubits + 1;
        if counts.is_empty() {
            return Err(ResultsError::EmptyCounts);
        }
        let bit_len = |key: &str| key.replace([' ', '_'], "").len();
        if let Some(short) = counts.keys().find(|key| bit_len(key) < width) {
            return Err(ResultsError::ShortOutcome {
                key: short.clone(),
                expected: width,
                actual: bit_len(short),
            });
        }
        let indices: Vec<usize> = (0..width).collect();
        let result_counts = marginal_counts(counts, Some(&indices));
        let Some((best_key, _)) = most_frequent(&result_counts) else {
            return Err(ResultsError::EmptyCounts);
        };
        let best_key = best_key.to_string();
        let outcomes: Vec<Outcome> = result_counts
            .iter()
            .map(|(key, count)| parse_outcome(key, *count))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .sorted_by(|a, b| {
                b.count
                    .cmp(&a.count)
                    .then_with(|| a.bitstring.cmp(&b.bitstring))
            })
            .collect();
        let best = outcomes
            .iter()
            .position(|outcome| outcome.bitstring == best_key)
            .ok_or(ResultsError::EmptyCounts)?;
        Ok(Self {
            num_state_qubits,
            shots: counts.values().sum(),
            outcomes,
            best,
        })
    }

    #[inline]
    pub fn num_state_qubits(&self) -> usize {
        self.num_state_qubits
    }

    /// Total number of shots in the counts.
    #[inline]
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// The most frequent outcome.
    #[inline]
    pub fn most_common(&self) -> &Outcome {
        &self.outcomes[self.best]
    }

    /// The sum read as all `k + 1` bits, carry included.
    pub fn quantum_sum(&self) -> u64 {
        self.most_common().value
    }

    /// The carry-out bit of the most frequent outcome.
    pub fn overflow(&self) -> bool {
        self.most_common().overflow
    }

    /// The low `k` bits, i.e. the sum modulo `2**k`.
    pub fn sum_value(&self) -> u64 {
        let mask = u32::try_from(self.num_state_qubits)
            .ok()
            .and_then(|k| 1u64.checked_shl(k))
            .map_or(u64::MAX, |bit| bit - 1);
        self.quantum_sum() & mask
    }

    /// Fraction of shots that produced the most frequent outcome.
    pub fn confidence(&self) -> f64 {
        if self.shots == 0 {
            return 0.;
        }
        self.most_common().count as f64 / self.shots as f64
    }

    pub fn unique_outcomes(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether more than one distinct result was measured.
    pub fn is_noisy(&self) -> bool {
        self.outcomes.len() > 1
    }

    /// Every distinct outcome, most frequent first.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// The `n` most frequent outcomes.
    pub fn top_outcomes(&self, n: usize) -> &[Outcome] {
        &self.outcomes[..n.min(self.outcomes.len())]
    }
}
