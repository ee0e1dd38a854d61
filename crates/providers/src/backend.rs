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

use std::fmt;

use qadder_circuit::CircuitData;
use qadder_results::Counts;
use qadder_transpiler::Target;
use qadder_transpiler::passes::first_gate_missing_from_target;
use uuid::Uuid;

use crate::ProviderError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobStatus {
    Done,
    Failed(String),
}

/// Counts (and optionally per-shot memory) from one job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionResult {
    pub backend_name: String,
    pub job_id: JobId,
    pub shots: u32,
    pub counts: Counts,
    /// One bitstring per shot, in execution order, when requested.
    pub memory: Option<Vec<String>>,
}

impl ExecutionResult {
    pub fn get_counts(&self) -> &Counts {
        &self.counts
    }
}

/// A submitted job. Local execution is synchronous, so a job is finished by the
/// time it is handed out; `status` says whether it succeeded.
#[derive(Clone, Debug)]
pub struct Job {
    id: JobId,
    status: JobStatus,
    result: Option<ExecutionResult>,
}

impl Job {
    pub(crate) fn from_outcome(id: JobId, outcome: Result<ExecutionResult, ProviderError>) -> Self {
        match outcome {
            Ok(result) => Self {
                id,
                status: JobStatus::Done,
                result: Some(result),
            },
            Err(err) => Self {
                id,
                status: JobStatus::Failed(err.to_string()),
                result: None,
            },
        }
    }

    pub fn job_id(&self) -> &JobId {
        &self.id
    }

    pub fn status(&self) -> &JobStatus {
        &self.status
    }

    pub fn result(&self) -> Result<&ExecutionResult, ProviderError> {
        match (&self.status, &self.result) {
            (JobStatus::Done, Some(result)) => Ok(result),
            (JobStatus::Failed(message), _) => Err(ProviderError::JobFailed {
                job_id: self.id.to_string(),
                message: message.clone(),
            }),
            (JobStatus::Done, None) => Err(ProviderError::JobFailed {
                job_id: self.id.to_string(),
                message: "no result recorded".to_string(),
            }),
        }
    }
}

/// Something that runs compiled circuits.
pub trait Backend {
    fn name(&self) -> &str;

    /// What circuits handed to [Backend::run] must be compiled for.
    fn target(&self) -> &Target;

    /// Execute `circuit` `shots` times. Submission-time problems (bad shot
    /// count, circuit not compiled for the target) are returned as errors;
    /// failures during execution are reported through the job.
    fn run(&self, circuit: &CircuitData, shots: u32) -> Result<Job, ProviderError>;
}

/// The checks a device performs before accepting a job.
pub(crate) fn validate_submission(
    backend: &str,
    target: &Target,
    circuit: &CircuitData,
    shots: u32,
) -> Result<(), ProviderError> {
    if shots == 0 || shots > target.max_shots {
        return Err(ProviderError::InvalidShots {
            shots,
            max: target.max_shots,
        });
    }
    if circuit.num_qubits() > target.num_qubits {
        return Err(ProviderError::CircuitTooWide {
            circuit: circuit.num_qubits(),
            backend: backend.to_string(),
            available: target.num_qubits,
        });
    }
    if let Some(inst) = first_gate_missing_from_target(circuit, target) {
        return Err(ProviderError::UnsupportedInstruction {
            name: inst.name().to_string(),
            qubits: inst.qubits.iter().map(|q| q.0).collect(),
            backend: backend.to_string(),
        });
    }
    Ok(())
}
