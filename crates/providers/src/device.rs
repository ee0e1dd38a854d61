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

//! Braket device ARNs and local emulation of the devices they name.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use qadder_circuit::CircuitData;
use qadder_transpiler::Target;

use crate::ProviderError;
use crate::backend::{Backend, Job};
use crate::noise::NoiseModel;
use crate::simulator::LocalSimulator;

/// The device the command line targets unless told otherwise.
pub const DEFAULT_DEVICE_ARN: &str = "arn:aws:braket:us-east-1::device/qpu/ionq/Forte-Enterprise-1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Qpu,
    Simulator,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qpu => "qpu",
            Self::Simulator => "quantum-simulator",
        }
    }
}

/// A parsed `arn:aws:braket:<region>::device/<kind>/<provider>/<name>`.
/// Simulators are global and have an empty region.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeviceArn {
    region: Option<String>,
    kind: DeviceKind,
    provider: String,
    name: String,
}

impl DeviceArn {
    pub fn parse(arn: &str) -> Result<Self, ProviderError> {
        arn.parse()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for DeviceArn {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ProviderError::InvalidArn(s.to_string());
        let [arn, partition, service, region, account, resource] =
            <[&str; 6]>::try_from(s.split(':').collect::<Vec<_>>()).map_err(|_| invalid())?;
        if arn != "arn" || partition != "aws" || service != "braket" || !account.is_empty() {
            return Err(invalid());
        }
        let [device, kind, provider, name] =
            <[&str; 4]>::try_from(resource.split('/').collect::<Vec<_>>()).map_err(|_| invalid())?;
        if device != "device" || provider.is_empty() || name.is_empty() {
            return Err(invalid());
        }
        let kind = match kind {
            "qpu" => DeviceKind::Qpu,
            "quantum-simulator" => DeviceKind::Simulator,
            _ => return Err(invalid()),
        };
        Ok(Self {
            region: (!region.is_empty()).then(|| region.to_string()),
            kind,
            provider: provider.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for DeviceArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:aws:braket:{}::device/{}/{}/{}",
            self.region().unwrap_or_default(),
            self.kind.as_str(),
            self.provider,
            self.name
        )
    }
}

/// Published characteristics of a device: what it accepts and how noisy it is.
#[derive(Clone, Debug)]
pub struct DeviceProfile {
    pub target: Target,
    pub noise: NoiseModel,
}

impl DeviceProfile {
    pub fn lookup(arn: &DeviceArn) -> Result<Self, ProviderError> {
        let (target, noise) = match (arn.kind(), arn.provider(), arn.name()) {
            (DeviceKind::Qpu, "ionq", "Forte-1" | "Forte-Enterprise-1") => {
                (Target::ionq_forte(), NoiseModel::ionq_forte())
            }
            (DeviceKind::Qpu, "ionq", "Aria-1" | "Aria-2") => {
                (Target::ionq_aria(), NoiseModel::ionq_aria())
            }
            (DeviceKind::Simulator, "amazon", "sv1") => (Target::braket_sv1(), NoiseModel::ideal()),
            (DeviceKind::Simulator, "amazon", "dm1") => (Target::braket_dm1(), NoiseModel::ideal()),
            _ => return Err(ProviderError::UnknownDevice(arn.to_string())),
        };
        Ok(Self { target, noise })
    }
}

/// A Braket device emulated on the local simulator with its profile's target
/// and noise.
#[derive(Clone, Debug)]
pub struct EmulatedDevice {
    arn: DeviceArn,
    simulator: LocalSimulator,
}

impl EmulatedDevice {
    pub fn new(arn: DeviceArn) -> Result<Self, ProviderError> {
        let DeviceProfile { target, noise } = DeviceProfile::lookup(&arn)?;
        debug!(
            device = %arn,
            qubits = target.num_qubits,
            "emulating device"
        );
        let simulator = LocalSimulator::new()
            .with_name(arn.name())
            .with_target(target)
            .with_noise(noise);
        Ok(Self { arn, simulator })
    }

    pub fn from_arn(arn: &str) -> Result<Self, ProviderError> {
        Self::new(arn.parse()?)
    }

    pub fn arn(&self) -> &DeviceArn {
        &self.arn
    }

    pub fn noise(&self) -> &NoiseModel {
        self.simulator.noise()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.simulator = self.simulator.with_seed(seed);
        self
    }

    /// Replace the device's published error rates.
    pub fn with_noise(mut self, noise: NoiseModel) -> Self {
        self.simulator = self.simulator.with_noise(noise);
        self
    }

    pub fn with_memory(mut self, memory: bool) -> Self {
        self.simulator = self.simulator.with_memory(memory);
        self
    }
}

impl Backend for EmulatedDevice {
    fn name(&self) -> &str {
        self.arn.name()
    }

    fn target(&self) -> &Target {
        self.simulator.target()
    }

    fn run(&self, circuit: &CircuitData, shots: u32) -> Result<Job, ProviderError> {
        self.simulator.run(circuit, shots)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use qadder_circuit::{Clbit, Qubit};

    #[test]
    fn parse_qpu_arn() {
        let arn: DeviceArn = DEFAULT_DEVICE_ARN.parse().unwrap();
        assert_eq!(arn.region(), Some("us-east-1"));
        assert_eq!(arn.kind(), DeviceKind::Qpu);
        assert_eq!(arn.provider(), "ionq");
        assert_eq!(arn.name(), "Forte-Enterprise-1");
        assert_eq!(arn.to_string(), DEFAULT_DEVICE_ARN);
    }

    #[test]
    fn parse_simulator_arn() {
        let text = "arn:aws:braket:::device/quantum-simulator/amazon/sv1";
        let arn = DeviceArn::parse(text).unwrap();
        assert_eq!(arn.region(), None);
        assert_eq!(arn.kind(), DeviceKind::Simulator);
        assert_eq!(arn.to_string(), text);
    }

    #[test]
    fn reject_malformed_arns() {
        for bad in [
            "",
            "ionq/Forte-1",
            "arn:aws:s3:::device/qpu/ionq/Forte-1",
            "arn:aws:braket:us-east-1::device/qpu/ionq",
            "arn:aws:braket:us-east-1::device/gpu/ionq/Forte-1",
            "arn:aws:braket:us-east-1:1234:device/qpu/ionq/Forte-1",
        ] {
            assert_eq!(
                bad.parse::<DeviceArn>(),
                Err(ProviderError::InvalidArn(bad.to_string()))
            );
        }
    }

    #[test]
    fn profiles() {
        let forte = EmulatedDevice::from_arn(DEFAULT_DEVICE_ARN).unwrap();
        assert_eq!(forte.target().num_qubits, 36);
        assert_eq!(forte.noise(), &NoiseModel::ionq_forte());
        assert_eq!(forte.name(), "Forte-Enterprise-1");

        let aria =
            EmulatedDevice::from_arn("arn:aws:braket:us-east-1::device/qpu/ionq/Aria-1").unwrap();
        assert_eq!(aria.target().num_qubits, 25);

        let sv1 = EmulatedDevice::from_arn("arn:aws:braket:::device/quantum-simulator/amazon/sv1")
            .unwrap();
        assert!(sv1.noise().is_ideal());

        assert!(matches!(
            EmulatedDevice::from_arn("arn:aws:braket:eu-north-1::device/qpu/iqm/Garnet"),
            Err(ProviderError::UnknownDevice(_))
        ));
    }

    #[test]
    fn device_rejects_untranslated_gates() {
        let device = EmulatedDevice::from_arn(DEFAULT_DEVICE_ARN).unwrap();
        let mut qc = CircuitData::new(3, 1);
        qc.ccx(Qubit(0), Qubit(1), Qubit(2)).unwrap();
        qc.measure(Qubit(2), Clbit(0)).unwrap();
        assert!(matches!(
            device.run(&qc, 10),
            Err(ProviderError::UnsupportedInstruction { ref backend, .. })
                if backend == "Forte-Enterprise-1"
        ));
    }

    #[test]
    fn ideal_device_run() {
        let device = EmulatedDevice::from_arn(DEFAULT_DEVICE_ARN)
            .unwrap()
            .with_noise(NoiseModel::ideal())
            .with_seed(9);
        let mut qc = CircuitData::new(2, 2);
        qc.x(Qubit(1)).unwrap();
        qc.measure(Qubit(0), Clbit(0)).unwrap();
        qc.measure(Qubit(1), Clbit(1)).unwrap();
        let job = device.run(&qc, 100).unwrap();
        let result = job.result().unwrap();
        assert_eq!(result.backend_name, "Forte-Enterprise-1");
        assert_eq!(result.counts["10"], 100);
    }
}
