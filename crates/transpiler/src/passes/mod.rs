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

pub mod basis_translator;
pub mod check_map;
pub mod gates_in_basis;
pub mod inverse_cancellation;
pub mod optimize_1q_rotations;

pub use basis_translator::run_basis_translator;
pub use check_map::run_check_map;
pub use gates_in_basis::{first_gate_missing_from_target, gates_missing_from_target};
pub use inverse_cancellation::run_inverse_cancellation;
pub use optimize_1q_rotations::run_optimize_1q_rotations;
