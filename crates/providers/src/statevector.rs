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
use num_complex::Complex64;

use qadder_circuit::Qubit;
use qadder_circuit::operations::StandardGate;
use qadder_circuit::util::{C_ZERO, GateArray1Q};

use crate::ProviderError;

/// Basis states are packed into a `u64`, one bit per qubit.
pub const MAX_QUBITS: usize = 64;

// Amplitudes whose squared norm falls below this are dropped.
const PRUNE_TOL: f64 = 1e-14;

/// A state vector that stores only its nonzero amplitudes.
///
/// Arithmetic circuits stay close to a computational basis state: the
/// permutation gates (`x`, `cx`, `ccx`, `swap`) never grow the support, and a
/// translated Toffoli only ever spreads its target qubit over two states. So
/// the memory used tracks the number of live basis states, not `2**n`.
#[derive(Clone, Debug)]
pub struct SparseStatevector {
    num_qubits: usize,
    amplitudes: HashMap<u64, Complex64>,
}

impl SparseStatevector {
    /// The all-zero state on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Result<Self, ProviderError> {
        if num_qubits > MAX_QUBITS {
            return Err(ProviderError::TooManyQubits(num_qubits));
        }
        let mut amplitudes = HashMap::with_capacity(1);
        amplitudes.insert(0, Complex64::new(1., 0.));
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The number of basis states with a nonzero amplitude.
    #[inline]
    pub fn support_size(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn amplitude(&self, basis_state: u64) -> Complex64 {
        self.amplitudes.get(&basis_state).copied().unwrap_or(C_ZERO)
    }

    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.values().map(|a| a.norm_sqr()).sum()
    }

    /// `(basis state, probability)` pairs, sorted by basis state.
    pub fn probabilities(&self) -> Vec<(u64, f64)> {
        let mut probs: Vec<(u64, f64)> = self
            .amplitudes
            .iter()
            .map(|(state, amp)| (*state, amp.norm_sqr()))
            .collect();
        probs.sort_unstable_by_key(|(state, _)| *state);
        probs
    }

    #[inline]
    fn mask(qubit: Qubit) -> u64 {
        1u64 << qubit.0
    }

    fn permute<F>(&mut self, f: F)
    where
        F: Fn(u64) -> u64,
    {
        let permuted: HashMap<u64, Complex64> = self
            .amplitudes
            .drain()
            .map(|(state, amp)| (f(state), amp))
            .collect();
        self.amplitudes = permuted;
    }

    fn apply_1q(&mut self, matrix: &GateArray1Q, qubit: Qubit) {
        let mask = Self::mask(qubit);
        let mut out: HashMap<u64, Complex64> = HashMap::with_capacity(self.amplitudes.len() * 2);
        for (state, amp) in self.amplitudes.drain() {
            let bit = ((state & mask) != 0) as usize;
            let base = state & !mask;
            *out.entry(base).or_insert(C_ZERO) += matrix[0][bit] * amp;
            *out.entry(base | mask).or_insert(C_ZERO) += matrix[1][bit] * amp;
        }
        out.retain(|_, amp| amp.norm_sqr() > PRUNE_TOL);
        self.amplitudes = out;
    }

    /// Apply a standard gate. The qubit count must match the gate.
    pub fn apply_gate(
        &mut self,
        gate: StandardGate,
        params: &[f64],
        qubits: &[Qubit],
    ) -> Result<(), ProviderError> {
        if let Some(q) = qubits.iter().find(|q| q.index() >= self.num_qubits) {
            return Err(ProviderError::QubitOutOfRange(q.0));
        }
        match (gate, qubits) {
            (StandardGate::I, _) => {}
            (StandardGate::X, [q]) => {
                let m = Self::mask(*q);
                self.permute(|s| s ^ m);
            }
            (StandardGate::CX, [c, t]) => {
                let (c, t) = (Self::mask(*c), Self::mask(*t));
                self.permute(|s| if s & c != 0 { s ^ t } else { s });
            }
            (StandardGate::CCX, [c0, c1, t]) => {
                let c = Self::mask(*c0) | Self::mask(*c1);
                let t = Self::mask(*t);
                self.permute(|s| if s & c == c { s ^ t } else { s });
            }
            (StandardGate::Swap, [a, b]) => {
                let (a, b) = (Self::mask(*a), Self::mask(*b));
                self.permute(|s| {
                    if ((s & a) != 0) != ((s & b) != 0) {
                        s ^ a ^ b
                    } else {
                        s
                    }
                });
            }
            (StandardGate::CZ, [a, b]) => {
                let both = Self::mask(*a) | Self::mask(*b);
                for (state, amp) in self.amplitudes.iter_mut() {
                    if state & both == both {
                        *amp = -*amp;
                    }
                }
            }
            (gate, [q]) => {
                let matrix = gate
                    .matrix(params)
                    .ok_or_else(|| ProviderError::UnsupportedGate(format!("{gate:?}")))?;
                self.apply_1q(&matrix, *q);
            }
            (gate, _) => {
                return Err(ProviderError::UnsupportedGate(format!(
                    "{gate:?} on {} qubits",
                    qubits.len()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn hadamard_spreads_and_recombines() {
        let mut sv = SparseStatevector::new(2).unwrap();
        sv.apply_gate(StandardGate::H, &[], &[Qubit(1)]).unwrap();
        assert_eq!(sv.support_size(), 2);
        assert_abs_diff_eq!(sv.amplitude(0b10).re, FRAC_1_SQRT_2, epsilon = 1e-12);
        sv.apply_gate(StandardGate::H, &[], &[Qubit(1)]).unwrap();
        assert_eq!(sv.support_size(), 1);
        assert_abs_diff_eq!(sv.amplitude(0).re, 1., epsilon = 1e-12);
    }

    #[test]
    fn bell_state_probabilities() {
        let mut sv = SparseStatevector::new(2).unwrap();
        sv.apply_gate(StandardGate::H, &[], &[Qubit(0)]).unwrap();
        sv.apply_gate(StandardGate::CX, &[], &[Qubit(0), Qubit(1)])
            .unwrap();
        let probs = sv.probabilities();
        assert_eq!(probs.len(), 2);
        assert_eq!(probs[0].0, 0b00);
        assert_eq!(probs[1].0, 0b11);
        assert_abs_diff_eq!(probs[0].1, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(sv.norm_sqr(), 1., epsilon = 1e-12);
    }

    #[test]
    fn toffoli_and_swap_permute() {
        let mut sv = SparseStatevector::new(4).unwrap();
        sv.apply_gate(StandardGate::X, &[], &[Qubit(0)]).unwrap();
        sv.apply_gate(StandardGate::X, &[], &[Qubit(1)]).unwrap();
        sv.apply_gate(StandardGate::CCX, &[], &[Qubit(0), Qubit(1), Qubit(2)])
            .unwrap();
        sv.apply_gate(StandardGate::Swap, &[], &[Qubit(2), Qubit(3)])
            .unwrap();
        assert_abs_diff_eq!(sv.amplitude(0b1011).re, 1., epsilon = 1e-12);
    }

    #[test]
    fn decomposed_toffoli_matches_toffoli() {
        let definition = StandardGate::CCX.definition(&[]).unwrap();
        for input in 0..8u64 {
            let mut sv = SparseStatevector::new(3).unwrap();
            for q in 0..3 {
                if (input >> q) & 1 == 1 {
                    sv.apply_gate(StandardGate::X, &[], &[Qubit(q)]).unwrap();
                }
            }
            for (gate, params, qubits) in &definition.steps {
                sv.apply_gate(*gate, params, qubits).unwrap();
            }
            let expected = if input & 0b011 == 0b011 { input ^ 0b100 } else { input };
            assert_eq!(sv.support_size(), 1);
            assert_abs_diff_eq!(sv.amplitude(expected).norm_sqr(), 1., epsilon = 1e-9);
        }
    }

    #[test]
    fn wrong_arity_is_an_error() {
        let mut sv = SparseStatevector::new(2).unwrap();
        assert!(matches!(
            sv.apply_gate(StandardGate::CX, &[], &[Qubit(0)]),
            Err(ProviderError::UnsupportedGate(_))
        ));
        assert_eq!(
            sv.apply_gate(StandardGate::X, &[], &[Qubit(2)]),
            Err(ProviderError::QubitOutOfRange(2))
        );
    }

    #[test]
    fn too_many_qubits_is_rejected() {
        assert_eq!(
            SparseStatevector::new(65).unwrap_err(),
            ProviderError::TooManyQubits(65)
        );
    }
}
