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

use smallvec::SmallVec;

use qadder_circuit::operations::{Operation, PackedOperation, StandardGate, StandardInstruction};
use qadder_circuit::{CircuitData, Qubit};

use crate::TranspilerError;
use crate::target::Target;

/// Rewrite every gate the target doesn't support in terms of its definition,
/// recursively, until only target operations remain.
///
/// The phase picked up by the definitions is added to the output circuit's
/// global phase.
pub fn run_basis_translator(
    circuit: &CircuitData,
    target: &Target,
) -> Result<CircuitData, TranspilerError> {
    let mut out = circuit.copy_empty_like();
    let mut phase = 0.;
    for inst in circuit.data() {
        match inst.op {
            PackedOperation::Instruction(StandardInstruction::Barrier(_)) => {
                out.push(inst.clone())?
            }
            PackedOperation::Instruction(op) => {
                if !target.contains_key(op.name()) {
                    return Err(TranspilerError::GateNotInTarget {
                        name: op.name().to_string(),
                        qubits: inst.qubits.iter().map(|q| q.0).collect(),
                    });
                }
                out.push(inst.clone())?
            }
            PackedOperation::Gate(gate) => {
                expand_gate(
                    gate,
                    &inst.params,
                    &inst.qubits,
                    target,
                    &mut out,
                    &mut phase,
                )?
            }
        }
    }
    out.add_global_phase(phase);
    Ok(out)
}

fn expand_gate(
    gate: StandardGate,
    params: &[f64],
    qubits: &[Qubit],
    target: &Target,
    out: &mut CircuitData,
    phase: &mut f64,
) -> Result<(), TranspilerError> {
    if target.contains_key(gate.name()) {
        out.push_standard_gate(gate, params, qubits)?;
        return Ok(());
    }
    let definition = gate
        .definition(params)
        .ok_or_else(|| TranspilerError::NoDefinition(gate.name().to_string()))?;
    *phase += definition.global_phase;
    for (step, step_params, step_qubits) in &definition.steps {
        let mapped: SmallVec<[Qubit; 3]> = step_qubits.iter().map(|q| qubits[q.index()]).collect();
        expand_gate(*step, step_params, &mapped, target, out, phase)?;
    }
    Ok(())
}
