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

use crate::operations::{Operation, PackedOperation, Params, StandardGate};
use crate::{Clbit, Qubit};

/// An operation together with the bits it acts on.
#[derive(Clone, Debug, PartialEq)]
pub struct PackedInstruction {
    pub op: PackedOperation,
    pub params: Params,
    pub qubits: SmallVec<[Qubit; 3]>,
    pub clbits: SmallVec<[Clbit; 1]>,
}

impl PackedInstruction {
    pub fn from_standard_gate(
        gate: StandardGate,
        params: Params,
        qubits: SmallVec<[Qubit; 3]>,
    ) -> Self {
        Self {
            op: gate.into(),
            params,
            qubits,
            clbits: SmallVec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.op.name()
    }

    #[inline]
    pub fn standard_gate(&self) -> Option<StandardGate> {
        self.op.standard_gate()
    }

    #[inline]
    pub fn params_view(&self) -> &[f64] {
        &self.params
    }

    /// Whether this instruction undoes `other` when applied directly after it.
    pub fn is_inverse_of(&self, other: &PackedInstruction, tol: f64) -> bool {
        if self.qubits != other.qubits {
            return false;
        }
        let (Some(gate), Some(other_gate)) = (self.standard_gate(), other.standard_gate()) else {
            return false;
        };
        let Some((inverse, inverse_params)) = other_gate.inverse(&other.params) else {
            return false;
        };
        inverse == gate
            && inverse_params.len() == self.params.len()
            && inverse_params
                .iter()
                .zip(self.params.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn cx_with_swapped_qubits_is_not_inverse() {
        let a = PackedInstruction::from_standard_gate(
            StandardGate::CX,
            smallvec![],
            smallvec![Qubit(0), Qubit(1)],
        );
        let b = PackedInstruction::from_standard_gate(
            StandardGate::CX,
            smallvec![],
            smallvec![Qubit(1), Qubit(0)],
        );
        assert!(a.is_inverse_of(&a.clone(), 1e-10));
        assert!(!a.is_inverse_of(&b, 1e-10));
    }

    #[test]
    fn t_and_tdg_cancel() {
        let on_q2 =
            |gate| PackedInstruction::from_standard_gate(gate, smallvec![], smallvec![Qubit(2)]);
        let t = on_q2(StandardGate::T);
        let tdg = on_q2(StandardGate::Tdg);
        assert!(tdg.is_inverse_of(&t, 1e-10));
        assert!(!t.is_inverse_of(&t.clone(), 1e-10));
    }
}
