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

use qadder_circuit::packed_instruction::PackedInstruction;
use qadder_circuit::{CircuitData, CircuitError};

const ANGLE_TOL: f64 = 1e-10;

/// The index of the instruction `inst` undoes, if that instruction is the
/// latest one on every wire `inst` touches.
fn cancellable_predecessor(
    inst: &PackedInstruction,
    wire_stacks: &[Vec<usize>],
    data: &[PackedInstruction],
) -> Option<usize> {
    inst.standard_gate()?;
    let first = *wire_stacks[inst.qubits.first()?.index()].last()?;
    if inst
        .qubits
        .iter()
        .any(|q| wire_stacks[q.index()].last() != Some(&first))
    {
        return None;
    }
    inst.is_inverse_of(&data[first], ANGLE_TOL).then_some(first)
}

/// Remove pairs of adjacent gates that compose to the identity: self-inverse
/// gates applied twice to the same qubits (`cx`, `ccx`, `h`, ...) and inverse
/// pairs such as `t`/`tdg` or `s`/`sdg`.
///
/// Gates are adjacent when nothing else acts on any of their qubits between
/// them; barriers and measurements block cancellation. Removal cascades, so
/// `x cx cx x` on the same wires cancels completely.
pub fn run_inverse_cancellation(circuit: &CircuitData) -> Result<CircuitData, CircuitError> {
    let data = circuit.data();
    let mut alive = vec![true; data.len()];
    let mut wire_stacks: Vec<Vec<usize>> = vec![Vec::new(); circuit.num_qubits()];
    let mut removed = 0usize;
    for (index, inst) in data.iter().enumerate() {
        if let Some(prev) = cancellable_predecessor(inst, &wire_stacks, data) {
            alive[prev] = false;
            alive[index] = false;
            for q in &inst.qubits {
                wire_stacks[q.index()].pop();
            }
            removed += 2;
            continue;
        }
        for q in &inst.qubits {
            wire_stacks[q.index()].push(index);
        }
    }
    let mut out = circuit.copy_empty_like();
    out.replace_data(
        data.iter()
            .zip(alive)
            .filter_map(|(inst, keep)| keep.then(|| inst.clone())),
    )?;
    debug!(removed, "inverse cancellation");
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use qadder_circuit::operations::StandardGate;
    use qadder_circuit::{Clbit, Qubit};

    #[test]
    fn nested_pairs_cascade() {
        let mut qc = CircuitData::new(2, 0);
        qc.x(Qubit(0)).unwrap();
        qc.cx(Qubit(0), Qubit(1)).unwrap();
        qc.cx(Qubit(0), Qubit(1)).unwrap();
        qc.x(Qubit(0)).unwrap();
        let out = run_inverse_cancellation(&qc).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn gates_on_other_wires_do_not_block() {
        let mut qc = CircuitData::new(3, 0);
        qc.push_standard_gate(StandardGate::T, &[], &[Qubit(0)])
            .unwrap();
        qc.cx(Qubit(1), Qubit(2)).unwrap();
        qc.push_standard_gate(StandardGate::Tdg, &[], &[Qubit(0)])
            .unwrap();
        let out = run_inverse_cancellation(&qc).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.data()[0].name(), "cx");
    }

    #[test]
    fn interleaved_gates_block() {
        let mut qc = CircuitData::new(2, 1);
        qc.cx(Qubit(0), Qubit(1)).unwrap();
        qc.x(Qubit(1)).unwrap();
        qc.cx(Qubit(0), Qubit(1)).unwrap();
        qc.cx(Qubit(1), Qubit(0)).unwrap();
        qc.measure(Qubit(0), Clbit(0)).unwrap();
        qc.measure(Qubit(0), Clbit(0)).unwrap();
        let out = run_inverse_cancellation(&qc).unwrap();
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn barrier_blocks() {
        let mut qc = CircuitData::new(1, 0);
        qc.push_standard_gate(StandardGate::H, &[], &[Qubit(0)])
            .unwrap();
        qc.barrier().unwrap();
        qc.push_standard_gate(StandardGate::H, &[], &[Qubit(0)])
            .unwrap();
        assert_eq!(run_inverse_cancellation(&qc).unwrap().len(), 3);
    }
}
