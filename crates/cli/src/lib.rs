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

//! The `qadder` command line.
//!
//! ```bash
//! # Add two random 17 bit operands on an emulated IonQ Forte
//! qadder add
//!
//! # Add chosen operands without device noise
//! qadder add 123456 98765 --ideal --seed 7
//!
//! # Add numbers wider than the device, one limb at a time
//! qadder chain 340282366920938463463374607431768211455 1
//!
//! # Inspect the adder before and after compilation
//! qadder info 17 --kind half
//! ```

use clap::{Args, Parser, Subcommand};
use num_bigint::BigUint;

use qadder_arithmetic::{DEFAULT_OPTIMIZATION_LEVEL, DEFAULT_SHOTS};
use qadder_circuit_library::AdderKind;
use qadder_providers::DEFAULT_DEVICE_ARN;

pub mod commands;
pub mod report;

#[derive(Parser, Debug)]
#[command(name = "qadder")]
#[command(author, version, about = "Integer addition on emulated quantum devices")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add two integers with one ripple-carry adder run
    Add(AddArgs),
    /// Add arbitrarily wide integers as a chain of limb-sized runs
    Chain(ChainArgs),
    /// Show an adder's size before and after transpilation
    Info(InfoArgs),
}

/// Where and how circuits are run.
#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// Braket ARN of the device to emulate
    #[arg(long, env = "QADDER_DEVICE_ARN", default_value = DEFAULT_DEVICE_ARN)]
    pub device_arn: String,

    #[arg(long, env = "QADDER_SHOTS", default_value_t = DEFAULT_SHOTS)]
    pub shots: u32,

    /// Seed for reproducible sampling
    #[arg(long, env = "QADDER_SEED")]
    pub seed: Option<u64>,

    /// Ignore the device's error rates
    #[arg(long)]
    pub ideal: bool,

    #[arg(long, default_value_t = DEFAULT_OPTIMIZATION_LEVEL)]
    pub optimization_level: u8,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// First operand, random in 100000..=131071 if omitted
    pub a: Option<u64>,
    /// Second operand, random in 100000..=131071 if omitted
    pub b: Option<u64>,

    #[command(flatten)]
    pub device: DeviceArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ChainArgs {
    pub a: BigUint,
    pub b: BigUint,

    /// Bits per limb; defaults to the widest full adder the device holds
    #[arg(long)]
    pub limb_width: Option<u32>,

    #[command(flatten)]
    pub device: DeviceArgs,
}

#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    /// Number of state qubits per operand
    pub num_state_qubits: u32,

    /// Adder variant: full, half or fixed
    #[arg(long, default_value_t = AdderKind::Half)]
    pub kind: AdderKind,

    #[arg(long, env = "QADDER_DEVICE_ARN", default_value = DEFAULT_DEVICE_ARN)]
    pub device_arn: String,

    #[arg(long, default_value_t = DEFAULT_OPTIMIZATION_LEVEL)]
    pub optimization_level: u8,
}
