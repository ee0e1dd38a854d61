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

use qadder_circuit::CircuitData;
use qadder_circuit::packed_instruction::PackedInstruction;

use crate::target::Target;

/// The first instruction the target can't run as-is.
pub fn first_gate_missing_from_target<'a>(
    circuit: &'a CircuitData,
    target: &Target,
) -> Option<&'a PackedInstruction> {
    circuit
        .data()
        .iter()
        .find(|inst| !target.instruction_supported(inst.name(), &inst.qubits))
}

/// Check whether any instruction of `circuit` is unsupported by `target`.
pub fn gates_missing_from_target(circuit: &CircuitData, target: &Target) -> bool {
    first_gate_missing_from_target(circuit, target).is_some()
}
