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

pub mod passes;
pub mod target;
pub mod transpiler;

use thiserror::Error;

use qadder_circuit::CircuitError;

pub use target::{Connectivity, Target};
pub use transpiler::transpile;

#[derive(Debug, Error)]
pub enum TranspilerError {
    #[error("circuit has {circuit} qubits but the target '{target}' only has {available}")]
    CircuitTooWide {
        circuit: usize,
        target: String,
        available: usize,
    },
    #[error("Unable to translate the operations in the circuit: no rule to expand '{0}'")]
    NoDefinition(String),
    #[error("'{name}' on qubits {qubits:?} is not supported by the target")]
    GateNotInTarget { name: String, qubits: Vec<u32> },
    #[error("'{name}' on qubits {qubits:?} is not on a coupled pair of the target")]
    CouplingViolation { name: String, qubits: [u32; 2] },
    #[error(transparent)]
    Circuit(#[from] CircuitError),
}
