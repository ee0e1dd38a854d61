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

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CircuitError {
    #[error("Qubit at index {0} exceeds circuit capacity.")]
    QubitExceedsCapacity(usize),
    #[error("Clbit at index {0} exceeds circuit capacity.")]
    ClbitExceedsCapacity(usize),
    #[error("register name \"{0}\" already exists")]
    RegisterNameExists(String),
    #[error("no register named \"{0}\"")]
    MissingRegister(String),
    #[error("'{name}' acts on {expected} qubits, got {actual}")]
    QubitCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("'{name}' takes {expected} parameters, got {actual}")]
    ParamCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("duplicate qubit arguments for '{0}'")]
    DuplicateQubits(String),
    #[error("value {value} does not fit in register \"{register}\" of {size} bits")]
    ValueExceedsRegister {
        value: u128,
        register: String,
        size: usize,
    },
    #[error("cannot compose a circuit of {other} {kind} onto {mapped} mapped {kind}")]
    ComposeMismatch {
        kind: &'static str,
        other: usize,
        mapped: usize,
    },
}
