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

use std::f64::consts::PI;

use tracing::debug;

use qadder_circuit::operations::StandardGate;
use qadder_circuit::packed_instruction::PackedInstruction;
use qadder_circuit::{CircuitData, CircuitError};

const ANGLE_TOL: f64 = 1e-10;

/// If a rotation by `theta` is the identity up to global phase, the phase.
///
/// `R(theta)` has period `4 pi`; at `2 pi` it is `-I`.
fn rotation_identity_phase(theta: f64) -> Option<f64> {
    let reduced = theta.rem_euclid(4. * PI);
    if reduced < ANGLE_TOL || 4. * PI - reduced < ANGLE_TOL {
        Some(0.)
    } else if (reduced - 2. * PI).abs() < ANGLE_TOL {
        Some(PI)
    } else {
        None
    }
}

/// Merge runs of the same single-axis rotation on one qubit into a single
/// rotation and drop rotations (and `id` gates) that are the identity up to
/// global phase.
pub fn run_optimize_1q_rotations(circuit: &CircuitData) -> Result<CircuitData, CircuitError> {
    let mut work: Vec<Option<PackedInstruction>> =
        circuit.data().iter().cloned().map(Some).collect();
    let mut wire_stacks: Vec<Vec<usize>> = vec![Vec::new(); circuit.num_qubits()];
    let mut phase = 0.;
    let mut merged = 0usize;

    for index in 0..work.len() {
        let Some(inst) = work[index].as_ref() else {
            continue;
        };
        let gate = inst.standard_gate();
        if gate == Some(StandardGate::I) {
            work[index] = None;
            continue;
        }
        let Some(gate) = gate.filter(StandardGate::is_rotation) else {
            for q in &inst.qubits {
                wire_stacks[q.index()].push(index);
            }
            continue;
        };
        let qubit = inst.qubits[0].index();
        let angle = inst.params[0];

        let previous = wire_stacks[qubit]
            .last()
            .copied()
            .filter(|prev| matches!(&work[*prev], Some(p) if p.standard_gate() == Some(gate)));
        match previous {
            Some(prev) => {
                work[index] = None;
                merged += 1;
                let Some(prev_inst) = work[prev].as_mut() else {
                    unreachable!("wire stacks only hold live instructions")
                };
                prev_inst.params[0] += angle;
                if let Some(identity_phase) = rotation_identity_phase(prev_inst.params[0]) {
                    phase += identity_phase;
                    work[prev] = None;
                    wire_stacks[qubit].pop();
                }
            }
            None => {
                if let Some(identity_phase) = rotation_identity_phase(angle) {
                    phase += identity_phase;
                    work[index] = None;
                } else {
                    wire_stacks[qubit].push(index);
                }
            }
        }
    }

    let mut out = circuit.copy_empty_like();
    out.add_global_phase(phase);
    out.replace_data(work.into_iter().flatten())?;
    debug!(merged, "single-qubit rotation merging");
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use qadder_circuit::Qubit;
    use std::f64::consts::FRAC_PI_4;

    fn rz(qc: &mut CircuitData, theta: f64, qubit: u32) {
        qc.push_standard_gate(StandardGate::RZ, &[theta], &[Qubit(qubit)])
            .unwrap();
    }

    #[test]
    fn runs_merge_into_one_rotation() {
        let mut qc = CircuitData::new(2, 0);
        rz(&mut qc, FRAC_PI_4, 0);
        rz(&mut qc, 0.3, 1);
        rz(&mut qc, FRAC_PI_4, 0);
        let out = run_optimize_1q_rotations(&qc).unwrap();
        assert_eq!(out.len(), 2);
        assert!((out.data()[0].params[0] - 2. * FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn full_turn_becomes_global_phase() {
        let mut qc = CircuitData::new(1, 0);
        rz(&mut qc, PI, 0);
        rz(&mut qc, PI, 0);
        let out = run_optimize_1q_rotations(&qc).unwrap();
        assert!(out.is_empty());
        assert!((out.global_phase() - PI).abs() < 1e-12);
    }

    #[test]
    fn different_axes_do_not_merge() {
        let mut qc = CircuitData::new(1, 0);
        rz(&mut qc, 0.1, 0);
        qc.push_standard_gate(StandardGate::RX, &[0.2], &[Qubit(0)])
            .unwrap();
        rz(&mut qc, 0.3, 0);
        qc.push_standard_gate(StandardGate::I, &[], &[Qubit(0)])
            .unwrap();
        rz(&mut qc, 4. * PI, 0);
        let out = run_optimize_1q_rotations(&qc).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.global_phase().abs() < 1e-12);
    }

    #[test]
    fn merged_away_rotation_exposes_earlier_one() {
        let mut qc = CircuitData::new(1, 0);
        rz(&mut qc, 0.5, 0);
        qc.push_standard_gate(StandardGate::RX, &[0.2], &[Qubit(0)])
            .unwrap();
        qc.push_standard_gate(StandardGate::RX, &[-0.2], &[Qubit(0)])
            .unwrap();
        rz(&mut qc, 0.25, 0);
        let out = run_optimize_1q_rotations(&qc).unwrap();
        assert_eq!(out.len(), 1);
        assert!((out.data()[0].params[0] - 0.75).abs() < 1e-12);
    }
}
