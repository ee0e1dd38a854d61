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

//! Addition of arbitrarily wide integers on a fixed-size device.
//!
//! The operands are cut into limbs of `limb_width` bits, least significant
//! first. Each limb is added by a full CDKM adder whose carry-in qubit is
//! prepared from the carry-out measured on the previous limb. Measured carries
//! live in a [CarryMemory] between runs, so the quantum register never needs to
//! hold more than one limb.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::{debug, info};

use qadder_circuit_library::{AdderKind, max_state_qubits, qubits_required};
use qadder_providers::{Backend, JobId};
use qadder_results::AdderReadout;
use qadder_transpiler::transpile;

use crate::ArithmeticError;
use crate::circuit::build_limb_circuit;
use crate::quantum_adder::{DEFAULT_OPTIMIZATION_LEVEL, DEFAULT_SHOTS};

// Limb sums are read back as u64 together with their carry.
const MAX_LIMB_WIDTH: u32 = u64::BITS - 1;

/// What one limb's run read out.
#[derive(Clone, Debug, PartialEq)]
pub struct LimbRecord {
    pub index: usize,
    pub a: u64,
    pub b: u64,
    pub carry_in: bool,
    /// Low `limb_width` bits of the most frequent outcome.
    pub sum: u64,
    pub carry_out: bool,
    pub confidence: f64,
    pub job_id: JobId,
}

/// Classical storage for the carry passed between limbs, and the history of
/// every limb run so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarryMemory {
    records: Vec<LimbRecord>,
}

impl CarryMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The carry into the next limb.
    pub fn carry(&self) -> bool {
        self.records.last().is_some_and(|record| record.carry_out)
    }

    pub fn record(&mut self, record: LimbRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[LimbRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Recombine the limb sums and the final carry.
    pub fn value(&self, limb_width: u32) -> BigUint {
        let mut value = BigUint::zero();
        for record in self.records.iter().rev() {
            value <<= limb_width;
            value += record.sum;
        }
        if self.carry() {
            value += BigUint::one() << (limb_width as usize * self.records.len());
        }
        value
    }
}

/// Result of a carry-chain addition.
#[derive(Clone, Debug)]
pub struct ChainOutcome {
    pub a: BigUint,
    pub b: BigUint,
    pub limb_width: u32,
    pub memory: CarryMemory,
    pub value: BigUint,
    pub classical_sum: BigUint,
}

impl ChainOutcome {
    pub fn is_correct(&self) -> bool {
        self.value == self.classical_sum
    }

    /// Confidence of the least certain limb.
    pub fn min_confidence(&self) -> f64 {
        self.memory
            .records()
            .iter()
            .map(|record| record.confidence)
            .fold(1., f64::min)
    }
}

pub struct CarryChainAdder<B> {
    backend: B,
    limb_width: Option<u32>,
    shots: u32,
    optimization_level: u8,
}

impl<B: Backend> CarryChainAdder<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            limb_width: None,
            shots: DEFAULT_SHOTS,
            optimization_level: DEFAULT_OPTIMIZATION_LEVEL,
        }
    }

    /// Fix the limb width instead of using the widest adder the device fits.
    pub fn limb_width(mut self, width: u32) -> Self {
        self.limb_width = Some(width);
        self
    }

    pub fn shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    pub fn optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level;
        self
    }

    /// The width each limb will be added at on this backend.
    pub fn effective_limb_width(&self) -> Result<u32, ArithmeticError> {
        let available = self.backend.target().num_qubits;
        let width = match self.limb_width {
            Some(width) => width,
            None => max_state_qubits(available.try_into().unwrap_or(u32::MAX), AdderKind::Full)
                .min(MAX_LIMB_WIDTH),
        };
        let required = qubits_required(width.max(1), AdderKind::Full) as usize;
        if width == 0 || width > MAX_LIMB_WIDTH || required > available {
            return Err(ArithmeticError::DeviceTooSmall {
                required,
                available,
            });
        }
        Ok(width)
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> Result<ChainOutcome, ArithmeticError> {
        let width = self.effective_limb_width()?;
        let bits = a.bits().max(b.bits()).max(1);
        let num_limbs = bits.div_ceil(width as u64) as usize;
        info!(
            bits,
            limb_width = width,
            num_limbs,
            backend = self.backend.name(),
            "starting carry chain"
        );

        let mut memory = CarryMemory::new();
        for index in 0..num_limbs {
            let offset = (index * width as usize) as u64;
            let (limb_a, limb_b) = (limb(a, offset, width), limb(b, offset, width));
            let carry_in = memory.carry();
            let circuit = build_limb_circuit(limb_a, limb_b, carry_in, width)?;
            let compiled = transpile(&circuit, self.backend.target(), self.optimization_level)?;
            let job = self.backend.run(&compiled, self.shots)?;
            let readout = AdderReadout::from_counts(job.result()?.get_counts(), width as usize)?;
            let record = LimbRecord {
                index,
                a: limb_a,
                b: limb_b,
                carry_in,
                sum: readout.sum_value(),
                carry_out: readout.overflow(),
                confidence: readout.confidence(),
                job_id: job.job_id().clone(),
            };
            debug!(
                index,
                carry_in,
                sum = record.sum,
                carry_out = record.carry_out,
                confidence = record.confidence,
                "limb done"
            );
            memory.record(record);
        }

        Ok(ChainOutcome {
            a: a.clone(),
            b: b.clone(),
            limb_width: width,
            value: memory.value(width),
            memory,
            classical_sum: a + b,
        })
    }
}

/// Bits `offset..offset + width` of `value`.
fn limb(value: &BigUint, offset: u64, width: u32) -> u64 {
    (0..width)
        .filter(|bit| value.bit(offset + *bit as u64))
        .fold(0, |acc, bit| acc | (1u64 << bit))
}
