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

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, PI};

use smallvec::{SmallVec, smallvec};

use crate::Qubit;
use crate::gate_matrix;
use crate::util::GateArray1Q;

/// Parameters of a standard gate. Only bound (numeric) angles are supported.
pub type Params = SmallVec<[f64; 3]>;

/// One step of a gate definition: the gate, its parameters and the qubits of
/// the defined gate it acts on.
pub type DefinitionStep = (StandardGate, Params, SmallVec<[Qubit; 3]>);

/// A gate decomposed into other standard gates, together with the global phase
/// the decomposition introduces.
#[derive(Clone, Debug)]
pub struct GateDefinition {
    pub steps: Vec<DefinitionStep>,
    pub global_phase: f64,
}

/// Trait for generic circuit operations these define the common attributes
/// needed for something to be addable to the circuit struct
pub trait Operation {
    fn name(&self) -> &str;
    fn num_qubits(&self) -> u32;
    fn num_clbits(&self) -> u32;
    fn num_params(&self) -> u32;
    fn directive(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StandardGate {
    I,
    X,
    Y,
    Z,
    H,
    S,
    Sdg,
    T,
    Tdg,
    SX,
    RX,
    RY,
    RZ,
    CX,
    CZ,
    Swap,
    CCX,
}

// This must be kept up-to-date with `StandardGate` when adding or removing
// gates from the enum
pub const STANDARD_GATE_SIZE: usize = 17;

static STANDARD_GATES: [StandardGate; STANDARD_GATE_SIZE] = [
    StandardGate::I,
    StandardGate::X,
    StandardGate::Y,
    StandardGate::Z,
    StandardGate::H,
    StandardGate::S,
    StandardGate::Sdg,
    StandardGate::T,
    StandardGate::Tdg,
    StandardGate::SX,
    StandardGate::RX,
    StandardGate::RY,
    StandardGate::RZ,
    StandardGate::CX,
    StandardGate::CZ,
    StandardGate::Swap,
    StandardGate::CCX,
];

impl StandardGate {
    /// Iterate over every standard gate.
    pub fn all() -> impl ExactSizeIterator<Item = &'static StandardGate> {
        STANDARD_GATES.iter()
    }

    /// Look a gate up by its OpenQASM-style name.
    pub fn from_name(name: &str) -> Option<Self> {
        STANDARD_GATES.iter().copied().find(|gate| gate.name() == name)
    }

    /// The gates which are their own inverse.
    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            Self::I
                | Self::X
                | Self::Y
                | Self::Z
                | Self::H
                | Self::CX
                | Self::CZ
                | Self::Swap
                | Self::CCX
        )
    }

    /// True for rotation gates whose single parameter is an angle.
    pub fn is_rotation(&self) -> bool {
        matches!(self, Self::RX | Self::RY | Self::RZ)
    }

    /// The 2x2 unitary of a one-qubit gate.
    pub fn matrix(&self, params: &[f64]) -> Option<GateArray1Q> {
        match self {
            Self::I => Some(gate_matrix::ONE_QUBIT_IDENTITY),
            Self::X => Some(gate_matrix::X_GATE),
            Self::Y => Some(gate_matrix::Y_GATE),
            Self::Z => Some(gate_matrix::Z_GATE),
            Self::H => Some(gate_matrix::H_GATE),
            Self::S => Some(gate_matrix::S_GATE),
            Self::Sdg => Some(gate_matrix::SDG_GATE),
            Self::T => Some(gate_matrix::T_GATE),
            Self::Tdg => Some(gate_matrix::TDG_GATE),
            Self::SX => Some(gate_matrix::SX_GATE),
            Self::RX => params.first().map(|theta| gate_matrix::rx_gate(*theta)),
            Self::RY => params.first().map(|theta| gate_matrix::ry_gate(*theta)),
            Self::RZ => params.first().map(|theta| gate_matrix::rz_gate(*theta)),
            Self::CX | Self::CZ | Self::Swap | Self::CCX => None,
        }
    }

    /// The inverse of this gate, if it is expressible as a standard gate.
    pub fn inverse(&self, params: &[f64]) -> Option<(StandardGate, Params)> {
        if self.is_self_inverse() {
            return Some((*self, Params::new()));
        }
        match self {
            Self::S => Some((Self::Sdg, Params::new())),
            Self::Sdg => Some((Self::S, Params::new())),
            Self::T => Some((Self::Tdg, Params::new())),
            Self::Tdg => Some((Self::T, Params::new())),
            Self::RX | Self::RY | Self::RZ => {
                params.first().map(|theta| (*self, smallvec![-theta]))
            }
            _ => None,
        }
    }

    /// Decompose the gate into other standard gates.
    ///
    /// The rotation gates and `cx` are the primitives every definition bottoms
    /// out in, so they have no definition themselves.
    pub fn definition(&self, _params: &[f64]) -> Option<GateDefinition> {
        let q0 = Qubit(0);
        let q1 = Qubit(1);
        let q2 = Qubit(2);
        let one = |gate: StandardGate, params: Params, phase: f64| GateDefinition {
            steps: vec![(gate, params, smallvec![q0])],
            global_phase: phase,
        };
        match self {
            Self::I => Some(GateDefinition {
                steps: vec![],
                global_phase: 0.,
            }),
            Self::X => Some(one(Self::RX, smallvec![PI], FRAC_PI_2)),
            Self::Y => Some(one(Self::RY, smallvec![PI], FRAC_PI_2)),
            Self::Z => Some(one(Self::RZ, smallvec![PI], FRAC_PI_2)),
            Self::S => Some(one(Self::RZ, smallvec![FRAC_PI_2], FRAC_PI_4)),
            Self::Sdg => Some(one(Self::RZ, smallvec![-FRAC_PI_2], -FRAC_PI_4)),
            Self::T => Some(one(Self::RZ, smallvec![FRAC_PI_4], FRAC_PI_8)),
            Self::Tdg => Some(one(Self::RZ, smallvec![-FRAC_PI_4], -FRAC_PI_8)),
            Self::SX => Some(one(Self::RX, smallvec![FRAC_PI_2], FRAC_PI_4)),
            Self::H => Some(GateDefinition {
                steps: vec![
                    (Self::RZ, smallvec![PI], smallvec![q0]),
                    (Self::RY, smallvec![FRAC_PI_2], smallvec![q0]),
                ],
                global_phase: FRAC_PI_2,
            }),
            Self::CZ => Some(GateDefinition {
                steps: vec![
                    (Self::H, smallvec![], smallvec![q1]),
                    (Self::CX, smallvec![], smallvec![q0, q1]),
                    (Self::H, smallvec![], smallvec![q1]),
                ],
                global_phase: 0.,
            }),
            Self::Swap => Some(GateDefinition {
                steps: vec![
                    (Self::CX, smallvec![], smallvec![q0, q1]),
                    (Self::CX, smallvec![], smallvec![q1, q0]),
                    (Self::CX, smallvec![], smallvec![q0, q1]),
                ],
                global_phase: 0.,
            }),
            Self::CCX => Some(GateDefinition {
                steps: vec![
                    (Self::H, smallvec![], smallvec![q2]),
                    (Self::CX, smallvec![], smallvec![q1, q2]),
                    (Self::Tdg, smallvec![], smallvec![q2]),
                    (Self::CX, smallvec![], smallvec![q0, q2]),
                    (Self::T, smallvec![], smallvec![q2]),
                    (Self::CX, smallvec![], smallvec![q1, q2]),
                    (Self::Tdg, smallvec![], smallvec![q2]),
                    (Self::CX, smallvec![], smallvec![q0, q2]),
                    (Self::T, smallvec![], smallvec![q1]),
                    (Self::T, smallvec![], smallvec![q2]),
                    (Self::H, smallvec![], smallvec![q2]),
                    (Self::CX, smallvec![], smallvec![q0, q1]),
                    (Self::T, smallvec![], smallvec![q0]),
                    (Self::Tdg, smallvec![], smallvec![q1]),
                    (Self::CX, smallvec![], smallvec![q0, q1]),
                ],
                global_phase: 0.,
            }),
            Self::RX | Self::RY | Self::RZ | Self::CX => None,
        }
    }
}

impl Operation for StandardGate {
    fn name(&self) -> &str {
        match self {
            Self::I => "id",
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::H => "h",
            Self::S => "s",
            Self::Sdg => "sdg",
            Self::T => "t",
            Self::Tdg => "tdg",
            Self::SX => "sx",
            Self::RX => "rx",
            Self::RY => "ry",
            Self::RZ => "rz",
            Self::CX => "cx",
            Self::CZ => "cz",
            Self::Swap => "swap",
            Self::CCX => "ccx",
        }
    }

    fn num_qubits(&self) -> u32 {
        match self {
            Self::CX | Self::CZ | Self::Swap => 2,
            Self::CCX => 3,
            _ => 1,
        }
    }

    fn num_clbits(&self) -> u32 {
        0
    }

    fn num_params(&self) -> u32 {
        match self {
            Self::RX | Self::RY | Self::RZ => 1,
            _ => 0,
        }
    }

    fn directive(&self) -> bool {
        false
    }
}

/// Non-unitary instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StandardInstruction {
    Measure,
    Barrier(u32),
}

impl Operation for StandardInstruction {
    fn name(&self) -> &str {
        match self {
            Self::Measure => "measure",
            Self::Barrier(_) => "barrier",
        }
    }

    fn num_qubits(&self) -> u32 {
        match self {
            Self::Measure => 1,
            Self::Barrier(num_qubits) => *num_qubits,
        }
    }

    fn num_clbits(&self) -> u32 {
        match self {
            Self::Measure => 1,
            Self::Barrier(_) => 0,
        }
    }

    fn num_params(&self) -> u32 {
        0
    }

    fn directive(&self) -> bool {
        matches!(self, Self::Barrier(_))
    }
}

/// Either a standard gate or a standard instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PackedOperation {
    Gate(StandardGate),
    Instruction(StandardInstruction),
}

impl PackedOperation {
    #[inline]
    pub fn standard_gate(&self) -> Option<StandardGate> {
        match self {
            Self::Gate(gate) => Some(*gate),
            Self::Instruction(_) => None,
        }
    }

    #[inline]
    pub fn standard_instruction(&self) -> Option<StandardInstruction> {
        match self {
            Self::Gate(_) => None,
            Self::Instruction(inst) => Some(*inst),
        }
    }
}

impl From<StandardGate> for PackedOperation {
    fn from(value: StandardGate) -> Self {
        Self::Gate(value)
    }
}

impl From<StandardInstruction> for PackedOperation {
    fn from(value: StandardInstruction) -> Self {
        Self::Instruction(value)
    }
}

impl Operation for PackedOperation {
    fn name(&self) -> &str {
        match self {
            Self::Gate(op) => op.name(),
            Self::Instruction(op) => op.name(),
        }
    }

    fn num_qubits(&self) -> u32 {
        match self {
            Self::Gate(op) => op.num_qubits(),
            Self::Instruction(op) => op.num_qubits(),
        }
    }

    fn num_clbits(&self) -> u32 {
        match self {
            Self::Gate(op) => op.num_clbits(),
            Self::Instruction(op) => op.num_clbits(),
        }
    }

    fn num_params(&self) -> u32 {
        match self {
            Self::Gate(op) => op.num_params(),
            Self::Instruction(op) => op.num_params(),
        }
    }

    fn directive(&self) -> bool {
        match self {
            Self::Gate(op) => op.directive(),
            Self::Instruction(op) => op.directive(),
        }
    }
}
