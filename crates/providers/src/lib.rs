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

//! Execution backends.
//!
//! A [Backend] accepts a circuit already compiled for its [Target] and returns
//! a [Job] holding the measurement counts. Jobs complete synchronously: every
//! backend here executes locally, either as a plain simulator or emulating a
//! named Braket device from its published qubit count, gate set and error
//! rates.
//!
//! [Target]: qadder_transpiler::Target

pub mod backend;
pub mod device;
pub mod noise;
pub mod simulator;
pub mod statevector;

use thiserror::Error;

pub use backend::{Backend, ExecutionResult, Job, JobId, JobStatus};
pub use device::{DEFAULT_DEVICE_ARN, DeviceArn, DeviceKind, DeviceProfile, EmulatedDevice};
pub use noise::NoiseModel;
pub use simulator::LocalSimulator;
pub use statevector::SparseStatevector;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProviderError {
    #[error("'{0}' is not a Braket device ARN")]
    InvalidArn(String),
    #[error("no profile for device '{0}'")]
    UnknownDevice(String),
    #[error("shots must be between 1 and {max}, got {shots}")]
    InvalidShots { shots: u32, max: u32 },
    #[error("circuit has {circuit} qubits but '{backend}' only has {available}")]
    CircuitTooWide {
        circuit: usize,
        backend: String,
        available: usize,
    },
    #[error("'{name}' on qubits {qubits:?} is not supported by '{backend}'; transpile first")]
    UnsupportedInstruction {
        name: String,
        qubits: Vec<u32>,
        backend: String,
    },
    #[error("cannot simulate {0} qubits, at most 64 are supported")]
    TooManyQubits(usize),
    #[error("qubit {0} is outside the simulated state")]
    QubitOutOfRange(u32),
    #[error("cannot simulate {0}")]
    UnsupportedGate(String),
    #[error("statevector has no probability left to sample")]
    EmptyState,
    #[error("qubit {0} is used after it was measured")]
    NonTerminalMeasurement(u32),
    #[error("invalid noise model: {0}")]
    InvalidNoise(String),
    #[error("job {job_id} failed: {message}")]
    JobFailed { job_id: String, message: String },
}
