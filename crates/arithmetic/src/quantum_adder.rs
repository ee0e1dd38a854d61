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

use tracing::info;

use qadder_circuit::CircuitData;
use qadder_circuit_library::{AdderKind, qubits_required};
use qadder_providers::{Backend, JobId};
use qadder_results::AdderReadout;
use qadder_transpiler::transpile;

use crate::ArithmeticError;
use crate::circuit::{bit_width, build_addition_circuit};

pub const DEFAULT_SHOTS: u32 = 100;
pub const DEFAULT_OPTIMIZATION_LEVEL: u8 = 1;

/// Widest operands [QuantumAdder] accepts. The `k + 1` bit sum of two `k` bit
/// operands must fit in a `u64`.
pub const MAX_OPERAND_BITS: u32 = u64::BITS - 1;

/// Progress of one addition, reported in the order the steps happen.
#[derive(Clone, Copy, Debug)]
pub enum AdditionStage<'a> {
    /// The logical adder circuit is built.
    Built(&'a CircuitData),
    /// Compilation for the backend is about to start.
    Transpiling,
    Transpiled(&'a CircuitData),
    /// The job is about to be submitted.
    Submitting { shots: u32 },
    Submitted(&'a JobId),
    /// The job was accepted and its result is being fetched.
    Waiting,
}

/// Adds two integers with a single ripple-carry adder run on `backend`.
pub struct QuantumAdder<B> {
    backend: B,
    shots: u32,
    optimization_level: u8,
}

impl<B: Backend> QuantumAdder<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            shots: DEFAULT_SHOTS,
            optimization_level: DEFAULT_OPTIMIZATION_LEVEL,
        }
    }

    pub fn shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    pub fn optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn add(&self, a: u64, b: u64) -> Result<AdditionOutcome, ArithmeticError> {
        self.add_with_progress(a, b, |_| {})
    }

    /// [QuantumAdder::add], calling `on_stage` as each step starts or ends.
    pub fn add_with_progress<F>(
        &self,
        a: u64,
        b: u64,
        mut on_stage: F,
    ) -> Result<AdditionOutcome, ArithmeticError>
    where
        F: FnMut(AdditionStage<'_>),
    {
        let k = bit_width(a, b);
        if k > MAX_OPERAND_BITS {
            return Err(ArithmeticError::OperandTooWide {
                bits: k,
                max: MAX_OPERAND_BITS,
            });
        }
        let required = qubits_required(k, AdderKind::Half) as usize;
        let available = self.backend.target().num_qubits;
        if required > available {
            return Err(ArithmeticError::DeviceTooSmall {
                required,
                available,
            });
        }

        let circuit = build_addition_circuit(a, b)?;
        on_stage(AdditionStage::Built(&circuit));
        on_stage(AdditionStage::Transpiling);
        let compiled = transpile(&circuit, self.backend.target(), self.optimization_level)?;
        on_stage(AdditionStage::Transpiled(&compiled));

        info!(
            a,
            b,
            k,
            backend = self.backend.name(),
            depth = circuit.depth(),
            transpiled_depth = compiled.depth(),
            "submitting addition"
        );
        on_stage(AdditionStage::Submitting { shots: self.shots });
        let job = self.backend.run(&compiled, self.shots)?;
        on_stage(AdditionStage::Submitted(job.job_id()));
        on_stage(AdditionStage::Waiting);
        let result = job.result()?;
        let readout = AdderReadout::from_counts(result.get_counts(), k as usize)?;
        Ok(AdditionOutcome {
            a,
            b,
            num_state_qubits: k,
            num_qubits: circuit.num_qubits(),
            depth: circuit.depth(),
            transpiled_depth: compiled.depth(),
            job_id: job.job_id().clone(),
            readout,
            classical_sum: a + b,
        })
    }
}

/// Everything known about one addition once its job has finished.
#[derive(Clone, Debug)]
pub struct AdditionOutcome {
    pub a: u64,
    pub b: u64,
    pub num_state_qubits: u32,
    pub num_qubits: usize,
    pub depth: usize,
    pub transpiled_depth: usize,
    pub job_id: JobId,
    pub readout: AdderReadout,
    pub classical_sum: u64,
}

impl AdditionOutcome {
    /// The most frequent outcome, carry included, equals `a + b`.
    pub fn is_correct(&self) -> bool {
        self.readout.quantum_sum() == self.classical_sum
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use qadder_providers::{
        DEFAULT_DEVICE_ARN, EmulatedDevice, Job, LocalSimulator, ProviderError,
    };
    use qadder_circuit::operations::{Operation, StandardGate};
    use qadder_transpiler::Target;

    /// A device with room for any adder that never runs anything.
    struct WideDevice {
        target: Target,
    }

    impl WideDevice {
        fn new() -> Self {
            let basis = StandardGate::all().map(|gate| gate.name()).chain(["measure"]);
            Self {
                target: Target::new("wide", 256).with_basis(basis),
            }
        }
    }

    impl Backend for WideDevice {
        fn name(&self) -> &str {
            "wide"
        }

        fn target(&self) -> &Target {
            &self.target
        }

        fn run(&self, _circuit: &CircuitData, _shots: u32) -> Result<Job, ProviderError> {
            Err(ProviderError::UnknownDevice("wide".to_string()))
        }
    }

    #[test]
    fn small_sums_are_exact_without_noise() {
        let adder = QuantumAdder::new(LocalSimulator::new().with_seed(1)).shots(10);
        for (a, b) in [(0, 0), (1, 1), (5, 3), (7, 7), (12, 9)] {
            let outcome = adder.add(a, b).unwrap();
            assert!(outcome.is_correct(), "{a} + {b}");
            assert_eq!(outcome.readout.confidence(), 1.0);
            assert_eq!(outcome.readout.unique_outcomes(), 1);
        }
    }

    #[test]
    fn overflow_is_the_carry() {
        let outcome = QuantumAdder::new(LocalSimulator::new().with_seed(2))
            .add(12, 9)
            .unwrap();
        assert_eq!(outcome.num_state_qubits, 4);
        assert_eq!(outcome.num_qubits, 10);
        assert!(outcome.readout.overflow());
        assert_eq!(outcome.readout.sum_value(), 21 - 16);
        assert_eq!(outcome.readout.shots(), DEFAULT_SHOTS as u64);
    }

    #[test]
    fn operands_too_wide_for_the_device() {
        let device = EmulatedDevice::from_arn(DEFAULT_DEVICE_ARN).unwrap();
        let adder = QuantumAdder::new(device);
        assert!(matches!(
            adder.add(1 << 17, 1),
            Err(ArithmeticError::DeviceTooSmall {
                required: 38,
                available: 36
            })
        ));
    }

    #[test]
    fn shots_are_validated_by_the_backend() {
        let adder = QuantumAdder::new(LocalSimulator::new()).shots(0);
        assert!(matches!(
            adder.add(1, 2),
            Err(ArithmeticError::Provider(_))
        ));
    }

    #[test]
    fn sixty_four_bit_operands_are_rejected() {
        let wide = QuantumAdder::new(WideDevice::new());
        assert!(matches!(
            wide.add(u64::MAX, 1),
            Err(ArithmeticError::OperandTooWide { bits: 64, max: 63 })
        ));
        // The width check runs before the device size check.
        let small = QuantumAdder::new(LocalSimulator::new());
        assert!(matches!(
            small.add(1, 1 << 63),
            Err(ArithmeticError::OperandTooWide { bits: 64, .. })
        ));
    }

    #[test]
    fn widest_operands_reach_the_backend() {
        let wide = QuantumAdder::new(WideDevice::new());
        let max = (1u64 << MAX_OPERAND_BITS) - 1;
        assert!(matches!(
            wide.add(max, max),
            Err(ArithmeticError::Provider(ProviderError::UnknownDevice(_)))
        ));
    }

    #[test]
    fn stages_are_reported_in_order() {
        let adder = QuantumAdder::new(LocalSimulator::new().with_seed(4)).shots(20);
        let mut stages = Vec::new();
        let outcome = adder
            .add_with_progress(6, 3, |stage| {
                stages.push(match stage {
                    AdditionStage::Built(qc) => format!("built {}", qc.num_qubits()),
                    AdditionStage::Transpiling => "transpiling".to_string(),
                    AdditionStage::Transpiled(_) => "transpiled".to_string(),
                    AdditionStage::Submitting { shots } => format!("submitting {shots}"),
                    AdditionStage::Submitted(id) => format!("submitted {id}"),
                    AdditionStage::Waiting => "waiting".to_string(),
                })
            })
            .unwrap();
        assert!(outcome.is_correct());
        assert_eq!(
            stages,
            vec![
                "built 8".to_string(),
                "transpiling".to_string(),
                "transpiled".to_string(),
                "submitting 20".to_string(),
                format!("submitted {}", outcome.job_id),
                "waiting".to_string(),
            ]
        );
    }
}
