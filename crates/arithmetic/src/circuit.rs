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

use qadder_circuit::{CircuitData, Qubit};
use qadder_circuit_library::{AdderKind, cdkm_ripple_carry_adder};

use crate::ArithmeticError;

/// Number of state qubits needed to hold both operands, at least one.
#[inline]
pub fn bit_width(a: u64, b: u64) -> u32 {
    (u64::BITS - (a | b).leading_zeros()).max(1)
}

/// A `k` bit half adder computing `a + b`, with `k = bit_width(a, b)`.
///
/// The qubits are `a[k]`, `b[k]`, `cout[1]` and `ancilla[1]`, and all of them
/// are measured into `res[2k + 2]`: the sum from `b` into `res[0..k]`, the carry
/// into `res[k]`, the ancilla into `res[k + 1]` and the restored `a` into
/// `res[k + 2..]`. The low `k + 1` bits of every outcome are the sum.
pub fn build_addition_circuit(a: u64, b: u64) -> Result<CircuitData, ArithmeticError> {
    let k = bit_width(a, b);
    let adder = cdkm_ripple_carry_adder(k, AdderKind::Half)?;

    let mut qc = CircuitData::new(0, 0);
    let qr_a = qc.add_qreg("a", k)?;
    let qr_b = qc.add_qreg("b", k)?;
    let cout = qc.add_qreg("cout", 1)?;
    let ancilla = qc.add_qreg("ancilla", 1)?;
    let res = qc.add_creg("res", 2 * k + 2)?;

    qc.encode_integer(&qr_a, a as u128)?;
    qc.encode_integer(&qr_b, b as u128)?;
    let qubits: Vec<Qubit> = qc.qubits();
    qc.compose(&adder, &qubits, &[])?;

    let k = k as usize;
    for i in 0..k {
        qc.measure(qr_b.bit(i), res.bit(i))?;
    }
    qc.measure(cout.bit(0), res.bit(k))?;
    qc.measure(ancilla.bit(0), res.bit(k + 1))?;
    for i in 0..k {
        qc.measure(qr_a.bit(i), res.bit(k + 2 + i))?;
    }
    debug!(a, b, k, qubits = qc.num_qubits(), "built addition circuit");
    Ok(qc)
}

/// One limb of a carry chain: a `width` bit full adder computing
/// `a + b + carry_in`, with the sum measured into `res[0..width]` and the carry
/// out into `res[width]`.
pub fn build_limb_circuit(
    a: u64,
    b: u64,
    carry_in: bool,
    width: u32,
) -> Result<CircuitData, ArithmeticError> {
    let adder = cdkm_ripple_carry_adder(width, AdderKind::Full)?;

    let mut qc = CircuitData::new(0, 0);
    let cin = qc.add_qreg("cin", 1)?;
    let qr_a = qc.add_qreg("a", width)?;
    let qr_b = qc.add_qreg("b", width)?;
    let cout = qc.add_qreg("cout", 1)?;
    let res = qc.add_creg("res", width + 1)?;

    if carry_in {
        qc.x(cin.bit(0))?;
    }
    qc.encode_integer(&qr_a, a as u128)?;
    qc.encode_integer(&qr_b, b as u128)?;
    let qubits: Vec<Qubit> = qc.qubits();
    qc.compose(&adder, &qubits, &[])?;

    let width = width as usize;
    for i in 0..width {
        qc.measure(qr_b.bit(i), res.bit(i))?;
    }
    qc.measure(cout.bit(0), res.bit(width))?;
    Ok(qc)
}

#[cfg(test)]
mod test {
    use super::*;
    use qadder_circuit::{CircuitError, Register};

    #[test]
    fn widths() {
        assert_eq!(bit_width(0, 0), 1);
        assert_eq!(bit_width(1, 0), 1);
        assert_eq!(bit_width(5, 2), 3);
        assert_eq!(bit_width(100000, 131071), 17);
        assert_eq!(bit_width(131072, 0), 18);
        assert_eq!(bit_width(u64::MAX, 1), 64);
    }

    #[test]
    fn addition_circuit_layout() {
        let qc = build_addition_circuit(100000, 131071).unwrap();
        assert_eq!(qc.num_qubits(), 36);
        assert_eq!(qc.num_clbits(), 36);
        let names: Vec<&str> = qc.qregs().iter().map(|reg| reg.name()).collect();
        assert_eq!(names, ["a", "b", "cout", "ancilla"]);
        let ops = qc.count_ops();
        assert_eq!(ops["measure"], 36);
        assert_eq!(
            ops["x"],
            (100000u64.count_ones() + 131071u64.count_ones()) as usize
        );
    }

    #[test]
    fn measurement_order() {
        let qc = build_addition_circuit(2, 1).unwrap();
        let measures: Vec<(u32, u32)> = qc
            .data()
            .iter()
            .filter(|inst| inst.name() == "measure")
            .map(|inst| (inst.qubits[0].0, inst.clbits[0].0))
            .collect();
        // a = q0..2, b = q2..4, cout = q4, ancilla = q5
        assert_eq!(measures, [(2, 0), (3, 1), (4, 2), (5, 3), (0, 4), (1, 5)]);
    }

    #[test]
    fn limb_circuit_layout() {
        let qc = build_limb_circuit(9, 15, true, 4).unwrap();
        assert_eq!(qc.num_qubits(), 10);
        assert_eq!(qc.num_clbits(), 5);
        assert_eq!(qc.count_ops()["measure"], 5);
        assert!(matches!(
            build_limb_circuit(16, 0, false, 4),
            Err(ArithmeticError::Circuit(CircuitError::ValueExceedsRegister { .. }))
        ));
    }
}
