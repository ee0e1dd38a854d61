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

//! Integer addition on quantum backends.
//!
//! [QuantumAdder] runs one CDKM ripple-carry adder sized to its operands.
//! [CarryChainAdder] splits operands too wide for the device into limbs and
//! adds them one quantum run at a time, carrying between runs classically.

pub mod carry_chain;
pub mod circuit;
pub mod quantum_adder;

use thiserror::Error;

use qadder_circuit::CircuitError;
use qadder_circuit_library::AdderError;
use qadder_providers::ProviderError;
use qadder_results::ResultsError;
use qadder_transpiler::TranspilerError;

pub use carry_chain::{CarryChainAdder, CarryMemory, ChainOutcome, LimbRecord};
pub use circuit::{bit_width, build_addition_circuit, build_limb_circuit};
pub use quantum_adder::{
    AdditionOutcome, AdditionStage, DEFAULT_OPTIMIZATION_LEVEL, DEFAULT_SHOTS, MAX_OPERAND_BITS,
    QuantumAdder,
};

#[derive(Debug, Error)]
pub enum ArithmeticError {
    #[error("adding needs {required} qubits but the device has {available}")]
    DeviceTooSmall { required: usize, available: usize },
    #[error("operands need {bits} bits but at most {max} are supported")]
    OperandTooWide { bits: u32, max: u32 },
    #[error(transparent)]
    Circuit(#[from] CircuitError),
    #[error(transparent)]
    Adder(#[from] AdderError),
    #[error(transparent)]
    Transpiler(#[from] TranspilerError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Results(#[from] ResultsError),
}
