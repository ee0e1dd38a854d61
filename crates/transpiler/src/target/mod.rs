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

//! Description of the device a circuit is compiled for.
//!
//! A [Target] only tracks what the compiler needs to know: how many qubits the
//! device has, which operations it runs natively, which qubit pairs can host a
//! two-qubit gate and how many shots a single job may request.

use hashbrown::HashSet;
use indexmap::IndexSet;

use qadder_circuit::Qubit;

/// The gate set accepted by the Braket IonQ devices and simulators.
pub const BRAKET_BASIS: [&str; 16] = [
    "x", "y", "z", "h", "s", "sdg", "t", "tdg", "sx", "rx", "ry", "rz", "cx", "swap", "measure",
    "barrier",
];

/// The default cap on shots per job.
pub const DEFAULT_MAX_SHOTS: u32 = 100_000;

/// Which qubit pairs can interact directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Connectivity {
    /// Any pair, as on trapped-ion devices.
    AllToAll,
    /// Undirected edges, stored with the smaller index first.
    CouplingMap(HashSet<(u32, u32)>),
}

#[derive(Clone, Debug)]
pub struct Target {
    pub description: String,
    pub num_qubits: usize,
    pub max_shots: u32,
    basis: IndexSet<String>,
    connectivity: Connectivity,
}

impl Target {
    /// An all-to-all target with no operations.
    pub fn new(description: &str, num_qubits: usize) -> Self {
        Self {
            description: description.to_string(),
            num_qubits,
            max_shots: DEFAULT_MAX_SHOTS,
            basis: IndexSet::new(),
            connectivity: Connectivity::AllToAll,
        }
    }

    pub fn with_basis<'a, I>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.basis.extend(names.into_iter().map(str::to_string));
        self
    }

    pub fn with_coupling_map<I>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        self.connectivity = Connectivity::CouplingMap(
            edges
                .into_iter()
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect(),
        );
        self
    }

    /// IonQ Forte: 36 fully connected trapped-ion qubits.
    pub fn ionq_forte() -> Self {
        Self::new("IonQ Forte", 36).with_basis(BRAKET_BASIS)
    }

    /// IonQ Aria: 25 fully connected trapped-ion qubits.
    pub fn ionq_aria() -> Self {
        Self::new("IonQ Aria", 25).with_basis(BRAKET_BASIS)
    }

    /// Braket's on-demand state vector simulator.
    pub fn braket_sv1() -> Self {
        Self::new("Braket SV1", 34).with_basis(BRAKET_BASIS)
    }

    /// Braket's on-demand density matrix simulator.
    pub fn braket_dm1() -> Self {
        Self::new("Braket DM1", 17).with_basis(BRAKET_BASIS)
    }

    /// Checks if the target supports the operation `name` at all.
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.basis.contains(name)
    }

    pub fn operation_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.basis.iter().map(String::as_str)
    }

    /// Whether `a` and `b` can host a two-qubit gate.
    pub fn connected(&self, a: u32, b: u32) -> bool {
        match &self.connectivity {
            Connectivity::AllToAll => a != b,
            Connectivity::CouplingMap(edges) => edges.contains(&(a.min(b), a.max(b))),
        }
    }

    /// Whether the operation `name` can run on `qargs` under the trivial
    /// layout.
    pub fn instruction_supported(&self, name: &str, qargs: &[Qubit]) -> bool {
        if name == "barrier" {
            return true;
        }
        if !self.contains_key(name) || qargs.iter().any(|q| q.index() >= self.num_qubits) {
            return false;
        }
        match qargs {
            [a, b] => self.connected(a.0, b.0),
            _ => true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn forte_is_all_to_all() {
        let target = Target::ionq_forte();
        assert_eq!(target.num_qubits, 36);
        assert!(target.instruction_supported("cx", &[Qubit(0), Qubit(35)]));
        assert!(!target.instruction_supported("ccx", &[Qubit(0), Qubit(1), Qubit(2)]));
        assert!(!target.instruction_supported("x", &[Qubit(36)]));
    }

    #[test]
    fn coupling_map_is_undirected() {
        let target = Target::new("line", 3)
            .with_basis(["cx", "rz"])
            .with_coupling_map([(1, 0), (1, 2)]);
        assert!(target.connected(0, 1));
        assert!(target.connected(2, 1));
        assert!(!target.connected(0, 2));
        assert!(target.instruction_supported("barrier", &[Qubit(0), Qubit(2)]));
        assert_eq!(
            target.operation_names().collect::<Vec<_>>(),
            vec!["cx", "rz"]
        );
    }
}
