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


use std::io::{self, Write};
use std::ops::RangeInclusive;

use anyhow::Context;
use rand::Rng;
use tracing::info;

use qadder_arithmetic::{AdditionStage, CarryChainAdder, QuantumAdder, bit_width};
use qadder_circuit_library::cdkm_ripple_carry_adder;
use qadder_providers::{Backend, EmulatedDevice, NoiseModel};
use qadder_transpiler::transpile;

use crate::report::{addition_report, chain_report, circuit_summary};
use crate::{AddArgs, ChainArgs, DeviceArgs, InfoArgs};

/// Operands drawn when none are given: 17 bits each, the widest half adder an
/// IonQ Forte holds.
pub const RANDOM_OPERANDS: RangeInclusive<u64> = 100000..=131071;

fn emulated_device(args: &DeviceArgs) -> anyhow::Result<EmulatedDevice> {
    let mut device = EmulatedDevice::from_arn(&args.device_arn)
        .with_context(|| format!("cannot use device {}", args.device_arn))?;
    if args.ideal {
        device = device.with_noise(NoiseModel::ideal());
    }
    if let Some(seed) = args.seed {
        device = device.with_seed(seed);
    }
    Ok(device)
}

fn write_stage(out: &mut impl Write, device: &str, stage: AdditionStage<'_>) -> io::Result<()> {
    match stage {
        AdditionStage::Built(circuit) => {
            writeln!(out, "Circuit uses {} qubits", circuit.num_qubits())?;
            writeln!(out, "Circuit depth: {}", circuit.depth())
        }
        AdditionStage::Transpiling => {
            writeln!(out)?;
            writeln!(out, "Connecting to device: {device}")?;
            writeln!(out, "Transpiling circuit for backend...")
        }
        AdditionStage::Transpiled(circuit) => {
            writeln!(out, "Transpiled circuit depth: {}", circuit.depth())
        }
        AdditionStage::Submitting { shots } => {
            writeln!(out, "Submitting job with {shots} shots...")
        }
        AdditionStage::Submitted(job_id) => writeln!(out, "Job ID: {job_id}"),
        AdditionStage::Waiting => writeln!(out, "Waiting for results..."),
    }
}

pub fn add(args: AddArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();
    let a = args.a.unwrap_or_else(|| rng.gen_range(RANDOM_OPERANDS));
    let b = args.b.unwrap_or_else(|| rng.gen_range(RANDOM_OPERANDS));
    let device = emulated_device(&args.device)?;

    writeln!(out, "Computing {a} + {b}")?;
    writeln!(
        out,
        "Bit width: {} bits (sum needs {} bits)",
        bit_width(a, b),
        u128::BITS - (a as u128 + b as u128).leading_zeros()
    )?;

    let device_name = device.name().to_string();
    let adder = QuantumAdder::new(device)
        .shots(args.device.shots)
        .optimization_level(args.device.optimization_level);
    let mut written = Ok(());
    let outcome = adder
        .add_with_progress(a, b, |stage| {
            if written.is_ok() {
                written = write_stage(&mut *out, &device_name, stage);
            }
        })
        .with_context(|| format!("adding {a} + {b} failed"))?;
    written?;

    writeln!(out)?;
    writeln!(out, "{}", addition_report(&outcome))?;
    Ok(())
}

pub fn chain(args: ChainArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let device = emulated_device(&args.device)?;
    writeln!(out, "Computing {} + {}", args.a, args.b)?;
    writeln!(out, "Connecting to device: {}", device.name())?;

    let mut adder = CarryChainAdder::new(device)
        .shots(args.device.shots)
        .optimization_level(args.device.optimization_level);
    if let Some(width) = args.limb_width {
        adder = adder.limb_width(width);
    }
    let outcome = adder.add(&args.a, &args.b).context("carry chain failed")?;
    writeln!(out)?;
    writeln!(out, "{}", chain_report(&outcome))?;
    Ok(())
}

pub fn info(args: InfoArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let adder = cdkm_ripple_carry_adder(args.num_state_qubits, args.kind)?;
    let title = format!("CDKM {} adder, {} bits", args.kind, args.num_state_qubits);
    writeln!(out, "{}", circuit_summary(&title, &adder))?;

    let device = EmulatedDevice::from_arn(&args.device_arn)
        .with_context(|| format!("cannot use device {}", args.device_arn))?;
    info!(device = device.name(), "transpiling");
    let compiled = transpile(&adder, device.target(), args.optimization_level)
        .with_context(|| format!("cannot transpile for {}", device.name()))?;
    let title = format!("Transpiled for {}", device.name());
    writeln!(out)?;
    writeln!(out, "{}", circuit_summary(&title, &compiled))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use num_bigint::BigUint;
    use qadder_circuit_library::AdderKind;
    use qadder_providers::DEFAULT_DEVICE_ARN;

    const GARNET: &str = "arn:aws:braket:eu-north-1::device/qpu/iqm/Garnet";

    fn ideal_device(device_arn: &str) -> DeviceArgs {
        DeviceArgs {
            device_arn: device_arn.to_string(),
            shots: 10,
            seed: Some(7),
            ideal: true,
            optimization_level: 1,
        }
    }

    fn run<F>(command: F) -> (anyhow::Result<()>, String)
    where
        F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>,
    {
        let mut out = Vec::new();
        let result = command(&mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn add_prints_progress_before_the_report() {
        let args = AddArgs {
            a: Some(5),
            b: Some(6),
            device: ideal_device(DEFAULT_DEVICE_ARN),
        };
        let (result, text) = run(|out| add(args, out));
        result.unwrap();
        let expected_order = [
            "Computing 5 + 6",
            "Bit width: 3 bits (sum needs 4 bits)",
            "Circuit uses 8 qubits",
            "Circuit depth: ",
            "Connecting to device: Forte-Enterprise-1",
            "Transpiling circuit for backend...",
            "Transpiled circuit depth: ",
            "Submitting job with 10 shots...",
            "Job ID: ",
            "Waiting for results...",
            "=== Results ===",
            "Quantum sum: 11 (✓)",
        ];
        let positions: Vec<usize> = expected_order
            .iter()
            .map(|line| match text.find(line) {
                Some(position) => position,
                None => panic!("missing {line:?} in {text}"),
            })
            .collect();
        assert!(positions.is_sorted(), "{text}");
    }

    #[test]
    fn chain_reports_the_full_sum() {
        let args = ChainArgs {
            a: BigUint::from(1000u32),
            b: BigUint::from(24u32),
            limb_width: Some(4),
            device: ideal_device(DEFAULT_DEVICE_ARN),
        };
        let (result, text) = run(|out| chain(args, out));
        result.unwrap();
        assert!(text.starts_with("Computing 1000 + 24\n"));
        assert!(text.contains("Limb width: 4 bits"));
        assert!(text.contains("Quantum sum: 1024 (✓)"));
    }

    #[test]
    fn info_summarizes_both_circuits() {
        let args = InfoArgs {
            num_state_qubits: 2,
            kind: AdderKind::Half,
            device_arn: DEFAULT_DEVICE_ARN.to_string(),
            optimization_level: 1,
        };
        let (result, text) = run(|out| info(args, out));
        result.unwrap();
        let (logical, compiled) = text
            .split_once("\n\nTranspiled for Forte-Enterprise-1:\n")
            .unwrap();
        assert!(logical.starts_with("CDKM half adder, 2 bits:\n  qubits: 6\n"));
        assert!(logical.contains("  ccx: "));
        assert!(compiled.starts_with("  qubits: 6\n"));
        assert!(!compiled.contains("  ccx: "));
    }

    #[test]
    fn unknown_devices_are_named_in_the_error() {
        let args = AddArgs {
            a: Some(1),
            b: Some(2),
            device: ideal_device(GARNET),
        };
        let (result, text) = run(|out| add(args, out));
        let message = format!("{:#}", result.unwrap_err());
        assert!(
            message.starts_with(&format!("cannot use device {GARNET}: ")),
            "{message}"
        );
        assert!(text.is_empty());

        let args = InfoArgs {
            num_state_qubits: 2,
            kind: AdderKind::Half,
            device_arn: GARNET.to_string(),
            optimization_level: 1,
        };
        let (result, _) = run(|out| info(args, out));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("cannot use device"), "{message}");
    }
}
