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

use hashbrown::HashSet;
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::error::CircuitError;
use crate::operations::{Operation, PackedOperation, StandardGate, StandardInstruction};
use crate::packed_instruction::PackedInstruction;
use crate::register::{ClassicalRegister, QuantumRegister, Register};
use crate::{Clbit, Qubit};

/// A circuit: a flat list of instructions over a fixed set of qubits and
/// clbits, optionally grouped into named registers.
///
/// Bits added through [CircuitData::add_qreg] / [CircuitData::add_creg] are
/// appended after any existing bits, so register order is bit order. This
/// matters for composition: composing a library circuit onto `qubits()` of a
/// larger circuit maps registers positionally.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CircuitData {
    /// The packed instruction listing.
    data: Vec<PackedInstruction>,
    num_qubits: u32,
    num_clbits: u32,
    qregs: Vec<QuantumRegister>,
    cregs: Vec<ClassicalRegister>,
    global_phase: f64,
}

impl CircuitData {
    /// A circuit with loose bits and no registers.
    pub fn new(num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            num_qubits,
            num_clbits,
            ..Default::default()
        }
    }

    /// An alternate constructor to build a new `CircuitData` from an iterator
    /// of standard gates. This can be used to build a circuit from a sequence
    /// of standard gates, such as for a `StandardGate` definition or circuit
    /// synthesis.
    pub fn from_standard_gates<I, P, Q>(
        num_qubits: u32,
        instructions: I,
        global_phase: f64,
    ) -> Result<Self, CircuitError>
    where
        I: IntoIterator<Item = (StandardGate, P, Q)>,
        P: AsRef<[f64]>,
        Q: AsRef<[Qubit]>,
    {
        let mut res = Self::new(num_qubits, 0);
        res.global_phase = global_phase;
        for (gate, params, qubits) in instructions {
            res.push_standard_gate(gate, params.as_ref(), qubits.as_ref())?;
        }
        Ok(res)
    }

    /// A circuit with the same bits, registers and global phase but no
    /// instructions.
    pub fn copy_empty_like(&self) -> Self {
        Self {
            data: Vec::with_capacity(self.data.len()),
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
            qregs: self.qregs.clone(),
            cregs: self.cregs.clone(),
            global_phase: self.global_phase,
        }
    }

    pub fn add_qreg(&mut self, name: &str, size: u32) -> Result<QuantumRegister, CircuitError> {
        if self.qregs.iter().any(|reg| reg.name() == name) {
            return Err(CircuitError::RegisterNameExists(name.to_string()));
        }
        let reg = QuantumRegister::new(name.to_string(), self.num_qubits, size);
        self.num_qubits += size;
        self.qregs.push(reg.clone());
        Ok(reg)
    }

    pub fn add_creg(&mut self, name: &str, size: u32) -> Result<ClassicalRegister, CircuitError> {
        if self.cregs.iter().any(|reg| reg.name() == name) {
            return Err(CircuitError::RegisterNameExists(name.to_string()));
        }
        let reg = ClassicalRegister::new(name.to_string(), self.num_clbits, size);
        self.num_clbits += size;
        self.cregs.push(reg.clone());
        Ok(reg)
    }

    pub fn qregs(&self) -> &[QuantumRegister] {
        &self.qregs
    }

    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    pub fn qreg(&self, name: &str) -> Result<&QuantumRegister, CircuitError> {
        self.qregs
            .iter()
            .find(|reg| reg.name() == name)
            .ok_or_else(|| CircuitError::MissingRegister(name.to_string()))
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    #[inline]
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// All qubits of the circuit, in order.
    pub fn qubits(&self) -> Vec<Qubit> {
        (0..self.num_qubits).map(Qubit).collect()
    }

    #[inline]
    pub fn data(&self) -> &[PackedInstruction] {
        &self.data
    }

    /// The number of instructions, directives included.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn global_phase(&self) -> f64 {
        self.global_phase
    }

    pub fn add_global_phase(&mut self, phase: f64) {
        self.global_phase += phase;
    }

    fn check_qubits(
        &self,
        name: &str,
        expected: usize,
        qubits: &[Qubit],
    ) -> Result<(), CircuitError> {
        if qubits.len() != expected {
            return Err(CircuitError::QubitCountMismatch {
                name: name.to_string(),
                expected,
                actual: qubits.len(),
            });
        }
        if let Some(bad) = qubits.iter().find(|q| q.0 >= self.num_qubits) {
            return Err(CircuitError::QubitExceedsCapacity(bad.index()));
        }
        if qubits.len() > 1 {
            let unique: HashSet<Qubit> = qubits.iter().copied().collect();
            if unique.len() != qubits.len() {
                return Err(CircuitError::DuplicateQubits(name.to_string()));
            }
        }
        Ok(())
    }

    /// Append a validated instruction.
    pub fn push(&mut self, instruction: PackedInstruction) -> Result<(), CircuitError> {
        let name = instruction.op.name();
        self.check_qubits(
            name,
            instruction.op.num_qubits() as usize,
            &instruction.qubits,
        )?;
        if instruction.params.len() != instruction.op.num_params() as usize {
            return Err(CircuitError::ParamCountMismatch {
                name: name.to_string(),
                expected: instruction.op.num_params() as usize,
                actual: instruction.params.len(),
            });
        }
        if let Some(bad) = instruction.clbits.iter().find(|c| c.0 >= self.num_clbits) {
            return Err(CircuitError::ClbitExceedsCapacity(bad.index()));
        }
        self.data.push(instruction);
        Ok(())
    }

    pub fn push_standard_gate(
        &mut self,
        gate: StandardGate,
        params: &[f64],
        qubits: &[Qubit],
    ) -> Result<(), CircuitError> {
        self.push(PackedInstruction::from_standard_gate(
            gate,
            params.iter().copied().collect(),
            qubits.iter().copied().collect(),
        ))
    }

    pub fn x(&mut self, qubit: Qubit) -> Result<(), CircuitError> {
        self.push_standard_gate(StandardGate::X, &[], &[qubit])
    }

    pub fn cx(&mut self, control: Qubit, target: Qubit) -> Result<(), CircuitError> {
        self.push_standard_gate(StandardGate::CX, &[], &[control, target])
    }

    pub fn ccx(
        &mut self,
        control_1: Qubit,
        control_2: Qubit,
        target: Qubit,
    ) -> Result<(), CircuitError> {
        self.push_standard_gate(StandardGate::CCX, &[], &[control_1, control_2, target])
    }

    pub fn measure(&mut self, qubit: Qubit, clbit: Clbit) -> Result<(), CircuitError> {
        self.push(PackedInstruction {
            op: StandardInstruction::Measure.into(),
            params: SmallVec::new(),
            qubits: SmallVec::from_elem(qubit, 1),
            clbits: SmallVec::from_elem(clbit, 1),
        })
    }

    /// A barrier across every qubit of the circuit.
    pub fn barrier(&mut self) -> Result<(), CircuitError> {
        self.push(PackedInstruction {
            op: StandardInstruction::Barrier(self.num_qubits).into(),
            params: SmallVec::new(),
            qubits: self.qubits().into_iter().collect(),
            clbits: SmallVec::new(),
        })
    }

    /// Prepare `value` on `register` from the all-zero state by flipping each
    /// qubit whose bit is set, least significant bit on the register's first
    /// qubit.
    pub fn encode_integer(
        &mut self,
        register: &QuantumRegister,
        value: u128,
    ) -> Result<(), CircuitError> {
        let needed = (u128::BITS - value.leading_zeros()) as usize;
        if needed > register.len() {
            return Err(CircuitError::ValueExceedsRegister {
                value,
                register: register.name().to_string(),
                size: register.len(),
            });
        }
        for i in (0..needed).filter(|i| (value >> i) & 1 == 1) {
            self.x(register.bit(i))?;
        }
        Ok(())
    }

    /// Append every instruction of `other`, with its qubit `i` mapped to
    /// `qubits[i]` and clbit `j` to `clbits[j]`. The global phases add.
    ///
    /// On error the circuit is left as it was before the call.
    pub fn compose(
        &mut self,
        other: &CircuitData,
        qubits: &[Qubit],
        clbits: &[Clbit],
    ) -> Result<(), CircuitError> {
        if other.num_qubits() != qubits.len() {
            return Err(CircuitError::ComposeMismatch {
                kind: "qubits",
                other: other.num_qubits(),
                mapped: qubits.len(),
            });
        }
        if other.num_clbits() != clbits.len() {
            return Err(CircuitError::ComposeMismatch {
                kind: "clbits",
                other: other.num_clbits(),
                mapped: clbits.len(),
            });
        }
        let start = self.data.len();
        self.data.reserve(other.data.len());
        for inst in &other.data {
            let mapped = PackedInstruction {
                op: inst.op,
                params: inst.params.clone(),
                qubits: inst.qubits.iter().map(|q| qubits[q.index()]).collect(),
                clbits: inst.clbits.iter().map(|c| clbits[c.index()]).collect(),
            };
            if let Err(err) = self.push(mapped) {
                self.data.truncate(start);
                return Err(err);
            }
        }
        self.global_phase += other.global_phase;
        Ok(())
    }

    /// Return the circuit depth: the length of the longest path through the
    /// qubit and clbit wires. Directives such as barriers do not count.
    pub fn depth(&self) -> usize {
        let mut qubit_levels = vec![0usize; self.num_qubits()];
        let mut clbit_levels = vec![0usize; self.num_clbits()];
        let mut depth = 0;
        for inst in self.data.iter().filter(|inst| !inst.op.directive()) {
            let level = inst
                .qubits
                .iter()
                .map(|q| qubit_levels[q.index()])
                .chain(inst.clbits.iter().map(|c| clbit_levels[c.index()]))
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                qubit_levels[q.index()] = level;
            }
            for c in &inst.clbits {
                clbit_levels[c.index()] = level;
            }
            depth = depth.max(level);
        }
        depth
    }

    /// The number of non-directive instructions.
    pub fn size(&self) -> usize {
        self.data.iter().filter(|inst| !inst.op.directive()).count()
    }

    /// Count each operation kind, in order of first appearance.
    pub fn count_ops(&self) -> IndexMap<String, usize> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for inst in &self.data {
            *counts.entry(inst.op.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// The number of gates acting on two or more qubits.
    pub fn num_nonlocal_gates(&self) -> usize {
        self.data
            .iter()
            .filter(|inst| matches!(inst.op, PackedOperation::Gate(_)) && inst.qubits.len() > 1)
            .count()
    }

    /// Replace the instruction list wholesale. The new instructions are
    /// validated against this circuit's bits.
    pub fn replace_data<I>(&mut self, instructions: I) -> Result<(), CircuitError>
    where
        I: IntoIterator<Item = PackedInstruction>,
    {
        let previous = std::mem::take(&mut self.data);
        for inst in instructions {
            if let Err(err) = self.push(inst) {
                self.data = previous;
                return Err(err);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn registers_are_laid_out_in_order() {
        let mut qc = CircuitData::new(0, 0);
        let a = qc.add_qreg("a", 3).unwrap();
        let b = qc.add_qreg("b", 3).unwrap();
        let cout = qc.add_qreg("cout", 1).unwrap();
        assert_eq!(a.bit(0), Qubit(0));
        assert_eq!(b.bit(0), Qubit(3));
        assert_eq!(cout.bit(0), Qubit(6));
        assert_eq!(qc.num_qubits(), 7);
        assert_eq!(
            qc.add_qreg("a", 1),
            Err(CircuitError::RegisterNameExists("a".to_string()))
        );
    }

    #[test]
    fn encode_integer_sets_little_endian_bits() {
        let mut qc = CircuitData::new(0, 0);
        let a = qc.add_qreg("a", 4).unwrap();
        qc.encode_integer(&a, 0b1010).unwrap();
        let targets: Vec<Qubit> = qc.data().iter().map(|inst| inst.qubits[0]).collect();
        assert_eq!(targets, vec![Qubit(1), Qubit(3)]);
        assert!(matches!(
            qc.encode_integer(&a, 16),
            Err(CircuitError::ValueExceedsRegister { size: 4, .. })
        ));
    }

    #[test]
    fn invalid_gates_are_rejected() {
        let mut qc = CircuitData::new(2, 0);
        assert_eq!(
            qc.cx(Qubit(0), Qubit(0)),
            Err(CircuitError::DuplicateQubits("cx".to_string()))
        );
        assert_eq!(qc.x(Qubit(2)), Err(CircuitError::QubitExceedsCapacity(2)));
        assert!(matches!(
            qc.push_standard_gate(StandardGate::RZ, &[], &[Qubit(0)]),
            Err(CircuitError::ParamCountMismatch { expected: 1, actual: 0, .. })
        ));
        assert!(matches!(
            qc.measure(Qubit(0), Clbit(0)),
            Err(CircuitError::ClbitExceedsCapacity(0))
        ));
        assert!(qc.is_empty());
    }

    #[test]
    fn depth_ignores_barriers_and_tracks_clbits() {
        let mut qc = CircuitData::new(3, 1);
        qc.x(Qubit(0)).unwrap();
        qc.x(Qubit(1)).unwrap();
        qc.barrier().unwrap();
        qc.cx(Qubit(0), Qubit(2)).unwrap();
        qc.measure(Qubit(1), Clbit(0)).unwrap();
        // The second measurement shares the clbit wire with the first.
        qc.measure(Qubit(2), Clbit(0)).unwrap();
        assert_eq!(qc.depth(), 3);
        assert_eq!(qc.size(), 5);
        assert_eq!(qc.len(), 6);
    }

    #[test]
    fn compose_maps_qubits() {
        let inner = CircuitData::from_standard_gates(
            2,
            [(StandardGate::CX, [0.0f64; 0], [Qubit(0), Qubit(1)])],
            0.5,
        )
        .unwrap();
        let mut outer = CircuitData::new(4, 0);
        outer.compose(&inner, &[Qubit(3), Qubit(1)], &[]).unwrap();
        assert_eq!(outer.data()[0].qubits.as_slice(), &[Qubit(3), Qubit(1)]);
        assert_eq!(outer.global_phase(), 0.5);
        assert!(matches!(
            outer.compose(&inner, &[Qubit(0)], &[]),
            Err(CircuitError::ComposeMismatch { kind: "qubits", .. })
        ));
    }

    #[test]
    fn failed_compose_leaves_circuit_unchanged() {
        let mut inner = CircuitData::new(2, 0);
        inner.x(Qubit(0)).unwrap();
        inner.cx(Qubit(0), Qubit(1)).unwrap();
        let mut outer = CircuitData::new(2, 0);
        outer.x(Qubit(1)).unwrap();
        // Both inner qubits land on the same outer wire, so the cx is rejected.
        assert_eq!(
            outer.compose(&inner, &[Qubit(0), Qubit(0)], &[]),
            Err(CircuitError::DuplicateQubits("cx".to_string()))
        );
        assert_eq!(outer.len(), 1);
        assert_eq!(outer.data()[0].qubits.as_slice(), &[Qubit(1)]);
        assert_eq!(outer.global_phase(), 0.0);
    }

    #[test]
    fn count_ops_keeps_first_seen_order() {
        let mut qc = CircuitData::new(3, 0);
        qc.ccx(Qubit(0), Qubit(1), Qubit(2)).unwrap();
        qc.x(Qubit(0)).unwrap();
        qc.ccx(Qubit(2), Qubit(1), Qubit(0)).unwrap();
        let counts: Vec<(String, usize)> = qc.count_ops().into_iter().collect();
        assert_eq!(counts, vec![("ccx".to_string(), 2), ("x".to_string(), 1)]);
        assert_eq!(qc.num_nonlocal_gates(), 2);
    }
}
