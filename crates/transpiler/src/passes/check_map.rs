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
use qadder_circuit::operations::Operation;

use crate::target::Target;

/// Find the first two-qubit gate that isn't on a coupled pair of the target.
///
/// Returns the gate name and its qubits, or `None` if the circuit respects the
/// coupling map.
pub fn run_check_map(circuit: &CircuitData, target: &Target) -> Option<(String, [u32; 2])> {
    circuit
        .data()
        .iter()
        .filter(|inst| !inst.op.directive() && inst.qubits.len() == 2)
        .find(|inst| !target.connected(inst.qubits[0].0, inst.qubits[1].0))
        .map(|inst| (inst.name().to_string(), [inst.qubits[0].0, inst.qubits[1].0]))
}

#[cfg(test)]
mod test {
    use super::*;
    use qadder_circuit::Qubit;

    #[test]
    fn reports_uncoupled_pair() {
        let target = Target::new("line", 3)
            .with_basis(["cx"])
            .with_coupling_map([(0, 1), (1, 2)]);
        let mut qc = CircuitData::new(3, 0);
        qc.cx(Qubit(1), Qubit(0)).unwrap();
        assert_eq!(run_check_map(&qc, &target), None);
        qc.cx(Qubit(2), Qubit(0)).unwrap();
        assert_eq!(
            run_check_map(&qc, &target),
            Some(("cx".to_string(), [2, 0]))
        );
    }

    #[test]
    fn barriers_are_ignored() {
        let target = Target::new("pair", 3).with_coupling_map([(0, 1)]);
        let mut qc = CircuitData::new(2, 0);
        qc.barrier().unwrap();
        assert_eq!(run_check_map(&qc, &target), None);
    }
}
