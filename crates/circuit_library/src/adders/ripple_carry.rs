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

//! The Cuccaro-Draper-Kutin-Moulton ripple-carry adder.
//!
//! The adder works in place: given registers ``a`` and ``b`` of ``k`` qubits
//! each it computes ``b <- a + b (+ cin)`` with a single ancilla (the carry
//! qubit ``cin`` in full mode, a ``help`` qubit otherwise) which is threaded
//! through the ``a`` register by the MAJ blocks and restored by the UMA
//! blocks. Everything except ``b`` and ``cout`` is returned to its input value.
//!
//! Reference: S. A. Cuccaro, T. G. Draper, S. A. Kutin, D. P. Moulton,
//! "A new quantum ripple-carry addition circuit", arXiv:quant-ph/0410184.

use std::fmt;
use std::str::FromStr;

use qadder_circuit::{CircuitData, CircuitError, Qubit};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum AdderError {
    /// The number of state qubits must be at least one.
    #[error("The number of qubits must be at least 1, not {0}.")]
    NumStateQubits(u32),

    /// An adder kind that isn't one of ``full``, ``half`` or ``fixed``.
    #[error("Invalid kind '{0}', must be one of 'full', 'half' or 'fixed'.")]
    UnknownKind(String),

    #[error(transparent)]
    Circuit(#[from] CircuitError),
}

/// Which carry bits the adder exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AdderKind {
    /// Carry-in and carry-out qubits: ``cin, a, b, cout``.
    Full,
    /// Carry-out only, plus a helper ancilla: ``a, b, cout, help``.
    #[default]
    Half,
    /// Addition modulo ``2**k``: ``a, b, help``.
    Fixed,
}

impl AdderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Half => "half",
            Self::Fixed => "fixed",
        }
    }

    #[inline]
    fn has_carry_out(&self) -> bool {
        matches!(self, Self::Full | Self::Half)
    }
}

impl fmt::Display for AdderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdderKind {
    type Err = AdderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "half" => Ok(Self::Half),
            "fixed" => Ok(Self::Fixed),
            other => Err(AdderError::UnknownKind(other.to_string())),
        }
    }
}

/// Total width of a ``num_state_qubits`` adder of the given kind.
#[inline]
pub fn qubits_required(num_state_qubits: u32, kind: AdderKind) -> u32 {
    match kind {
        AdderKind::Full | AdderKind::Half => 2 * num_state_qubits + 2,
        AdderKind::Fixed => 2 * num_state_qubits + 1,
    }
}

/// The widest adder of the given kind that fits on ``num_qubits`` qubits,
/// ``0`` if none does.
#[inline]
pub fn max_state_qubits(num_qubits: u32, kind: AdderKind) -> u32 {
    match kind {
        AdderKind::Full | AdderKind::Half => num_qubits.saturating_sub(2) / 2,
        AdderKind::Fixed => num_qubits.saturating_sub(1) / 2,
    }
}

/// Majority of three bits, computed in place on ``x``.
fn maj(circuit: &mut CircuitData, x: Qubit, y: Qubit, z: Qubit) -> Result<(), CircuitError> {
    circuit.cx(x, y)?;
    circuit.cx(x, z)?;
    circuit.ccx(z, y, x)
}

/// Un-majority and add: undoes [maj] on ``x`` and ``z`` leaving the sum bit
/// in ``y``.
fn uma(circuit: &mut CircuitData, x: Qubit, y: Qubit, z: Qubit) -> Result<(), CircuitError> {
    circuit.ccx(z, y, x)?;
    circuit.cx(x, z)?;
    circuit.cx(z, y)
}

/// Build a ripple-carry adder on ``num_state_qubits`` bit operands.
///
/// The returned circuit has no classical bits; its registers are named
/// ``cin``, ``a``, ``b``, ``cout`` and ``help`` depending on ``kind``.
pub fn cdkm_ripple_carry_adder(
    num_state_qubits: u32,
    kind: AdderKind,
) -> Result<CircuitData, AdderError> {
    if num_state_qubits < 1 {
        return Err(AdderError::NumStateQubits(num_state_qubits));
    }
    let k = num_state_qubits as usize;
    let mut circuit = CircuitData::new(0, 0);

    let cin = match kind {
        AdderKind::Full => Some(circuit.add_qreg("cin", 1)?),
        _ => None,
    };
    let qr_a = circuit.add_qreg("a", num_state_qubits)?;
    let qr_b = circuit.add_qreg("b", num_state_qubits)?;
    let cout = if kind.has_carry_out() {
        Some(circuit.add_qreg("cout", 1)?)
    } else {
        None
    };
    let carry = match cin {
        Some(cin) => cin.bit(0),
        None => circuit.add_qreg("help", 1)?.bit(0),
    };

    maj(&mut circuit, qr_a.bit(0), qr_b.bit(0), carry)?;
    for i in 0..k - 1 {
        maj(&mut circuit, qr_a.bit(i + 1), qr_b.bit(i + 1), qr_a.bit(i))?;
    }

    if let Some(cout) = cout {
        circuit.cx(qr_a.bit(k - 1), cout.bit(0))?;
    }

    for i in (0..k - 1).rev() {
        uma(&mut circuit, qr_a.bit(i + 1), qr_b.bit(i + 1), qr_a.bit(i))?;
    }
    uma(&mut circuit, qr_a.bit(0), qr_b.bit(0), carry)?;

    debug!(
        num_state_qubits,
        %kind,
        num_qubits = circuit.num_qubits(),
        size = circuit.size(),
        "built CDKM ripple-carry adder"
    );
    Ok(circuit)
}
