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

use rand::Rng;
use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand_pcg::Pcg64Mcg;
use rayon::prelude::*;
use tracing::{debug, info};

use qadder_circuit::operations::{Operation, PackedOperation, StandardGate, StandardInstruction};
use qadder_circuit::packed_instruction::PackedInstruction;
use qadder_circuit::{CircuitData, Clbit, Qubit};
use qadder_results::{Counts, getenv_use_multiple_threads};
use qadder_transpiler::Target;

use crate::ProviderError;
use crate::backend::{Backend, ExecutionResult, Job, JobId, validate_submission};
use crate::noise::NoiseModel;
use crate::statevector::{MAX_QUBITS, SparseStatevector};

/// Noisy runs with at least this many shots spread trajectories over threads.
pub const DEFAULT_PARALLEL_THRESHOLD: u32 = 64;

const PAULIS: [StandardGate; 3] = [StandardGate::X, StandardGate::Y, StandardGate::Z];

/// Sampling statevector simulator.
///
/// Without noise the circuit is simulated once and every shot is drawn from
/// the final distribution. With noise each shot is its own trajectory: after
/// every gate each operand suffers a uniformly random Pauli with the model's
/// gate error probability, and each measured bit flips with the readout error
/// probability.
#[derive(Clone, Debug)]
pub struct LocalSimulator {
    name: String,
    target: Target,
    noise: NoiseModel,
    seed: Option<u64>,
    memory: bool,
    parallel_threshold: u32,
}

impl Default for LocalSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSimulator {
    pub fn new() -> Self {
        let target = Target::new("local simulator", MAX_QUBITS).with_basis(
            StandardGate::all()
                .map(|gate| gate.name())
                .chain(["measure", "barrier"]),
        );
        Self {
            name: "local_simulator".to_string(),
            target,
            noise: NoiseModel::ideal(),
            seed: None,
            memory: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Restrict what the simulator accepts. The width is capped at 64 qubits.
    pub fn with_target(mut self, mut target: Target) -> Self {
        target.num_qubits = target.num_qubits.min(MAX_QUBITS);
        self.target = target;
        self
    }

    pub fn with_noise(mut self, noise: NoiseModel) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Keep one bitstring per shot in the result.
    pub fn with_memory(mut self, memory: bool) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: u32) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn noise(&self) -> &NoiseModel {
        &self.noise
    }

    /// Run every shot and return the per-shot bitstrings.
    fn execute(
        &self,
        circuit: &CircuitData,
        shots: u32,
        seed: u64,
    ) -> Result<Vec<String>, ProviderError> {
        let plan = ExecutionPlan::new(circuit)?;
        if self.noise.is_ideal() {
            let state = plan.simulate(&self.noise, &mut Pcg64Mcg::seed_from_u64(seed))?;
            let probabilities = state.probabilities();
            debug!(
                support = probabilities.len(),
                "sampling from the final statevector"
            );
            let dist = WeightedIndex::new(probabilities.iter().map(|(_, p)| *p))
                .map_err(|_| ProviderError::EmptyState)?;
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            return Ok((0..shots)
                .map(|_| {
                    let basis = probabilities[dist.sample(&mut rng)].0;
                    plan.readout(basis, &self.noise, &mut rng)
                })
                .collect());
        }

        let trajectory = |shot: u32| -> Result<String, ProviderError> {
            let mut rng = Pcg64Mcg::seed_from_u64(seed.wrapping_add(shot as u64));
            let state = plan.simulate(&self.noise, &mut rng)?;
            let probabilities = state.probabilities();
            let dist = WeightedIndex::new(probabilities.iter().map(|(_, p)| *p))
                .map_err(|_| ProviderError::EmptyState)?;
            let basis = probabilities[dist.sample(&mut rng)].0;
            Ok(plan.readout(basis, &self.noise, &mut rng))
        };
        if shots >= self.parallel_threshold && getenv_use_multiple_threads() {
            debug!(shots, "running noisy trajectories in parallel");
            (0..shots).into_par_iter().map(trajectory).collect()
        } else {
            (0..shots).map(trajectory).collect()
        }
    }
}

impl Backend for LocalSimulator {
    fn name(&self) -> &str {
        &self.name
    }

    fn target(&self) -> &Target {
        &self.target
    }

    fn run(&self, circuit: &CircuitData, shots: u32) -> Result<Job, ProviderError> {
        validate_submission(&self.name, &self.target, circuit, shots)?;
        let seed = self.seed.unwrap_or_else(rand::random);
        let job_id = JobId::new();
        info!(
            job_id = %job_id,
            backend = %self.name,
            shots,
            qubits = circuit.num_qubits(),
            "running job"
        );
        let outcome = self.execute(circuit, shots, seed).map(|memory| {
            let mut counts = Counts::new();
            for bits in &memory {
                *counts.entry(bits.clone()).or_insert(0) += 1;
            }
            ExecutionResult {
                backend_name: self.name.clone(),
                job_id: job_id.clone(),
                shots,
                counts,
                memory: self.memory.then_some(memory),
            }
        });
        Ok(Job::from_outcome(job_id, outcome))
    }
}

/// A circuit split into the gates to simulate and its terminal measurements.
struct ExecutionPlan<'a> {
    num_qubits: usize,
    num_clbits: usize,
    gates: Vec<(StandardGate, &'a PackedInstruction)>,
    measurements: Vec<(Qubit, Clbit)>,
}

impl<'a> ExecutionPlan<'a> {
    fn new(circuit: &'a CircuitData) -> Result<Self, ProviderError> {
        let mut measured = vec![false; circuit.num_qubits()];
        let mut gates = Vec::with_capacity(circuit.len());
        let mut measurements = Vec::new();
        for inst in circuit.data() {
            match inst.op {
                PackedOperation::Instruction(StandardInstruction::Barrier(_)) => {}
                PackedOperation::Instruction(StandardInstruction::Measure) => {
                    let (qubit, clbit) = (inst.qubits[0], inst.clbits[0]);
                    measured[qubit.index()] = true;
                    measurements.push((qubit, clbit));
                }
                PackedOperation::Gate(gate) => {
                    if let Some(q) = inst.qubits.iter().find(|q| measured[q.index()]) {
                        return Err(ProviderError::NonTerminalMeasurement(q.0));
                    }
                    gates.push((gate, inst));
                }
            }
        }
        Ok(Self {
            num_qubits: circuit.num_qubits(),
            num_clbits: circuit.num_clbits(),
            gates,
            measurements,
        })
    }

    fn simulate<R: Rng>(
        &self,
        noise: &NoiseModel,
        rng: &mut R,
    ) -> Result<SparseStatevector, ProviderError> {
        let mut state = SparseStatevector::new(self.num_qubits)?;
        for (gate, inst) in &self.gates {
            state.apply_gate(*gate, inst.params_view(), &inst.qubits)?;
            let p = noise.gate_error(inst.qubits.len());
            if p > 0.0 {
                for qubit in &inst.qubits {
                    if rng.gen_bool(p) {
                        let pauli = PAULIS[rng.gen_range(0..PAULIS.len())];
                        state.apply_gate(pauli, &[], &[*qubit])?;
                    }
                }
            }
        }
        Ok(state)
    }

    /// Classical bits after measuring `basis`, with clbit 0 rightmost.
    fn readout<R: Rng>(&self, basis: u64, noise: &NoiseModel, rng: &mut R) -> String {
        let mut bits = vec![false; self.num_clbits];
        let flip = noise.readout_error();
        for (qubit, clbit) in &self.measurements {
            let mut value = (basis >> qubit.0) & 1 == 1;
            if flip > 0.0 && rng.gen_bool(flip) {
                value = !value;
            }
            bits[clbit.index()] = value;
        }
        bits.iter().rev().map(|b| if *b { '1' } else { '0' }).collect()
    }
}
