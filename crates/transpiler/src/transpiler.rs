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

use tracing::debug;

use qadder_circuit::CircuitData;
use qadder_circuit::operations::Operation;

use crate::passes::{
    first_gate_missing_from_target, run_basis_translator, run_check_map, run_inverse_cancellation,
    run_optimize_1q_rotations,
};
use crate::TranspilerError;
use crate::target::Target;

/// The highest optimization level with its own pass pipeline. Higher levels
/// run this one.
pub const MAX_OPTIMIZATION_LEVEL: u8 = 1;

/// Compile `circuit` for `target` under the trivial layout.
///
/// * Level 0 translates to the target basis and checks the result.
/// * Level 1 additionally cancels inverse pairs before translation, then
///   cancels and merges rotations on the translated circuit until it stops
///   shrinking.
///
/// The target must be wide enough and every two-qubit gate must land on a
/// coupled pair: there is no routing.
pub fn transpile(
    circuit: &CircuitData,
    target: &Target,
    optimization_level: u8,
) -> Result<CircuitData, TranspilerError> {
    if circuit.num_qubits() > target.num_qubits {
        return Err(TranspilerError::CircuitTooWide {
            circuit: circuit.num_qubits(),
            target: target.description.clone(),
            available: target.num_qubits,
        });
    }
    let level = optimization_level.min(MAX_OPTIMIZATION_LEVEL);

    let mut out = if level >= 1 {
        run_basis_translator(&run_inverse_cancellation(circuit)?, target)?
    } else {
        run_basis_translator(circuit, target)?
    };
    debug!(
        size = out.size(),
        depth = out.depth(),
        "translated to target basis"
    );

    if level >= 1 {
        loop {
            let size_before = out.size();
            out = run_inverse_cancellation(&out)?;
            out = run_optimize_1q_rotations(&out)?;
            if out.size() >= size_before {
                break;
            }
        }
    }

    if let Some((name, qubits)) = run_check_map(&out, target) {
        return Err(TranspilerError::CouplingViolation { name, qubits });
    }
    if let Some(inst) = first_gate_missing_from_target(&out, target) {
        return Err(TranspilerError::GateNotInTarget {
            name: inst.op.name().to_string(),
            qubits: inst.qubits.iter().map(|q| q.0).collect(),
        });
    }

    debug!(
        target = %target.description,
        optimization_level = level,
        size_in = circuit.size(),
        depth_in = circuit.depth(),
        size_out = out.size(),
        depth_out = out.depth(),
        "transpiled circuit"
    );
    Ok(out)
}
