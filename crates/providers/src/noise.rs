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

use crate::ProviderError;

/// Stochastic Pauli and readout error rates.
///
/// After every gate each qubit it touched suffers, with the gate's error
/// probability, a uniformly random `x`, `y` or `z`. Every measured bit is
/// flipped with the readout probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseModel {
    one_qubit: f64,
    two_qubit: f64,
    readout: f64,
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self::ideal()
    }
}

impl NoiseModel {
    pub fn new(one_qubit: f64, two_qubit: f64, readout: f64) -> Result<Self, ProviderError> {
        for (name, p) in [
            ("one_qubit", one_qubit),
            ("two_qubit", two_qubit),
            ("readout", readout),
        ] {
            if !(0. ..=1.).contains(&p) {
                return Err(ProviderError::InvalidNoise(format!(
                    "{name} error rate {p} is not a probability"
                )));
            }
        }
        Ok(Self {
            one_qubit,
            two_qubit,
            readout,
        })
    }

    pub const fn ideal() -> Self {
        Self {
            one_qubit: 0.,
            two_qubit: 0.,
            readout: 0.,
        }
    }

    /// IonQ Forte: 99.98% single-qubit, 99.6% two-qubit and 99.5% SPAM fidelity.
    pub const fn ionq_forte() -> Self {
        Self {
            one_qubit: 2e-4,
            two_qubit: 4e-3,
            readout: 5e-3,
        }
    }

    /// IonQ Aria: 99.95% single-qubit, 99.4% two-qubit and 99.4% SPAM fidelity.
    pub const fn ionq_aria() -> Self {
        Self {
            one_qubit: 5e-4,
            two_qubit: 6e-3,
            readout: 6e-3,
        }
    }

    pub fn is_ideal(&self) -> bool {
        self.one_qubit == 0. && self.two_qubit == 0. && self.readout == 0.
    }

    /// Error probability per qubit of a gate on `num_qubits` qubits. Gates on
    /// three or more qubits use the two-qubit rate.
    #[inline]
    pub fn gate_error(&self, num_qubits: usize) -> f64 {
        match num_qubits {
            0 => 0.,
            1 => self.one_qubit,
            _ => self.two_qubit,
        }
    }

    #[inline]
    pub fn readout_error(&self) -> f64 {
        self.readout
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rates_must_be_probabilities() {
        assert!(NoiseModel::new(0.1, 0.2, 0.0).is_ok());
        assert!(matches!(
            NoiseModel::new(0.1, 1.5, 0.0),
            Err(ProviderError::InvalidNoise(_))
        ));
        assert!(NoiseModel::new(f64::NAN, 0., 0.).is_err());
    }

    #[test]
    fn presets() {
        assert!(NoiseModel::ideal().is_ideal());
        assert!(NoiseModel::default().is_ideal());
        let forte = NoiseModel::ionq_forte();
        assert!(!forte.is_ideal());
        assert_eq!(forte.gate_error(1), 2e-4);
        assert_eq!(forte.gate_error(3), 4e-3);
        assert_eq!(forte.readout_error(), 5e-3);
    }
}
