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

use hashbrown::HashMap;
use rayon::prelude::*;

use crate::{ResultsError, getenv_use_multiple_threads};

#[inline]
fn clean_key(key: &str) -> String {
    key.replace(|c| c == '_' || c == ' ', "")
}

fn marginalize<T: std::ops::AddAssign + Copy>(
    counts: &HashMap<String, T>,
    indices: Option<&[usize]>,
) -> HashMap<String, T> {
    let mut out_counts: HashMap<String, T> = HashMap::with_capacity(counts.len());
    let Some(first) = counts.keys().next() else {
        return out_counts;
    };
    let clbit_size = clean_key(first).len();
    let all_indices: Vec<usize> = (0..clbit_size).collect();
    counts
        .iter()
        .map(|(k, v)| (clean_key(k), *v))
        .for_each(|(k, v)| match indices {
            Some(indices) if all_indices != indices => {
                let key_arr = k.as_bytes();
                let new_key: String = indices
                    .iter()
                    .map(|bit| {
                        let index = clbit_size.wrapping_sub(*bit + 1);
                        match key_arr.get(index) {
                            Some(bit) => *bit as char,
                            None => '0',
                        }
                    })
                    .rev()
                    .collect();
                out_counts
                    .entry(new_key)
                    .and_modify(|e| *e += v)
                    .or_insert(v);
            }
            _ => {
                out_counts
                    .entry(k)
                    .and_modify(|e| *e += v)
                    .or_insert(v);
            }
        });
    out_counts
}

/// Keep only the clbits at `indices` (clbit 0 is the rightmost character of a
/// key), summing the counts of keys that become equal. `None` keeps every bit
/// and only normalises the keys.
pub fn marginal_counts(
    counts: &HashMap<String, u64>,
    indices: Option<&[usize]>,
) -> HashMap<String, u64> {
    marginalize(counts, indices)
}

/// [marginal_counts] for quasi-probability distributions.
pub fn marginal_distribution(
    counts: &HashMap<String, f64>,
    indices: Option<&[usize]>,
) -> HashMap<String, f64> {
    marginalize(counts, indices)
}

#[inline]
fn map_memory(bitstring: &str, indices: Option<&[usize]>, clbit_size: usize) -> String {
    let bitstring = clean_key(bitstring);
    match indices {
        Some(indices) => {
            let bit_array = bitstring.as_bytes();
            indices
                .iter()
                .map(|bit| {
                    let index = clbit_size.wrapping_sub(*bit + 1);
                    match bit_array.get(index) {
                        Some(bit) => *bit as char,
                        None => '0',
                    }
                })
                .rev()
                .collect()
        }
        None => bitstring,
    }
}

/// Marginalize per-shot memory. Runs on the rayon pool once the memory has at
/// least `parallel_threshold` entries.
pub fn marginal_memory(
    memory: &[String],
    indices: Option<&[usize]>,
    parallel_threshold: usize,
) -> Vec<String> {
    let Some(first_elem) = memory.first() else {
        return Vec::new();
    };
    let clbit_size = clean_key(first_elem).len();
    if memory.len() < parallel_threshold || !getenv_use_multiple_threads() {
        memory
            .iter()
            .map(|x| map_memory(x, indices, clbit_size))
            .collect()
    } else {
        memory
            .par_iter()
            .map(|x| map_memory(x, indices, clbit_size))
            .collect()
    }
}

/// The outcome with the highest count. Ties go to the smallest bitstring so
/// the choice doesn't depend on hash order.
pub fn most_frequent(counts: &HashMap<String, u64>) -> Option<(&str, u64)> {
    counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(key, count)| (key.as_str(), *count))
}

#[cfg(test)]
mod test {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn marginal_counts_merges_keys() {
        let input = counts(&[("101", 3), ("001", 4), ("110", 5)]);
        let out = marginal_counts(&input, Some(&[0]));
        assert_eq!(out, counts(&[("1", 7), ("0", 5)]));
        let out = marginal_counts(&input, Some(&[2, 0]));
        assert_eq!(out, counts(&[("11", 3), ("10", 4), ("01", 5)]));
    }

    #[test]
    fn register_spaces_are_ignored() {
        let input = counts(&[("1 01", 2), ("0_01", 1)]);
        assert_eq!(
            marginal_counts(&input, None),
            counts(&[("101", 2), ("001", 1)])
        );
        assert_eq!(
            marginal_counts(&input, Some(&[2])),
            counts(&[("1", 2), ("0", 1)])
        );
    }

    #[test]
    fn empty_counts_stay_empty() {
        assert!(marginal_counts(&HashMap::new(), Some(&[0])).is_empty());
        assert!(most_frequent(&HashMap::new()).is_none());
        assert!(marginal_memory(&[], Some(&[0]), 1).is_empty());
    }

    #[test]
    fn distribution_sums_probabilities() {
        let input: HashMap<String, f64> = [("10".to_string(), 0.25), ("11".to_string(), 0.5)]
            .into_iter()
            .collect();
        let out = marginal_distribution(&input, Some(&[1]));
        assert_eq!(out.len(), 1);
        assert!((out["1"] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn memory_marginalizes_per_shot() {
        let memory: Vec<String> = ["0110", "1001", "1111"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            marginal_memory(&memory, Some(&[0, 3]), 1000),
            vec!["00", "11", "11"]
        );
        // Above the threshold the parallel path must agree with the serial one.
        assert_eq!(marginal_memory(&memory, Some(&[1]), 1), vec!["1", "0", "1"]);
    }

    #[test]
    fn ties_break_to_smallest_bitstring() {
        let input = counts(&[("11", 4), ("01", 4), ("10", 1)]);
        assert_eq!(most_frequent(&input), Some(("01", 4)));
    }
}
