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

//! Plain-text reports printed by the commands.

use qadder_arithmetic::{AdditionOutcome, ChainOutcome};
use qadder_circuit::CircuitData;

/// Outcomes listed when a run produced more than this many.
pub const TOP_OUTCOMES: usize = 5;

pub fn addition_report(outcome: &AdditionOutcome) -> String {
    let readout = &outcome.readout;
    let mut lines = vec![
        "=== Results ===".to_string(),
        format!("Classical sum: {}", outcome.classical_sum),
        format!(
            "Quantum sum: {} ({})",
            readout.quantum_sum(),
            if outcome.is_correct() { "✓" } else { "✗" }
        ),
        format!(
            "Overflow detected: {} (cout={})",
            if readout.overflow() { "YES" } else { "NO" },
            readout.overflow() as u8
        ),
        format!("Sum value (without overflow): {}", readout.sum_value()),
        format!(
            "Confidence: {}/{} = {:.1}%",
            readout.most_common().count,
            readout.shots(),
            readout.confidence() * 100.
        ),
        format!(
            "Unique outcomes: {} (noise: {})",
            readout.unique_outcomes(),
            if readout.is_noisy() { "yes" } else { "no" }
        ),
    ];
    if readout.unique_outcomes() > TOP_OUTCOMES {
        lines.push(String::new());
        lines.push(format!("Top {TOP_OUTCOMES} outcomes:"));
        for top in readout.top_outcomes(TOP_OUTCOMES) {
            lines.push(format!(
                "  {:4} (overflow={}, error: {:3}): {:3} times",
                top.value,
                top.overflow as u8,
                top.error(outcome.classical_sum),
                top.count
            ));
        }
    }
    lines.join("\n")
}

pub fn chain_report(outcome: &ChainOutcome) -> String {
    let mut lines = vec![format!(
        "{:>5} {:>8} {:>8} {:>3} {:>8} {:>4} {:>10}  job",
        "limb", "a", "b", "cin", "sum", "cout", "confidence"
    )];
    for record in outcome.memory.records() {
        lines.push(format!(
            "{:>5} {:>8} {:>8} {:>3} {:>8} {:>4} {:>9.1}%  {}",
            record.index,
            record.a,
            record.b,
            record.carry_in as u8,
            record.sum,
            record.carry_out as u8,
            record.confidence * 100.,
            record.job_id
        ));
    }
    lines.push(String::new());
    lines.push(format!("Limb width: {} bits", outcome.limb_width));
    lines.push(format!("Classical sum: {}", outcome.classical_sum));
    lines.push(format!(
        "Quantum sum: {} ({})",
        outcome.value,
        if outcome.is_correct() { "✓" } else { "✗" }
    ));
    lines.push(format!(
        "Least confident limb: {:.1}%",
        outcome.min_confidence() * 100.
    ));
    lines.join("\n")
}

/// Qubits, depth, size and per-operation counts of `circuit`.
pub fn circuit_summary(title: &str, circuit: &CircuitData) -> String {
    let mut lines = vec![
        format!("{title}:"),
        format!("  qubits: {}", circuit.num_qubits()),
        format!("  depth: {}", circuit.depth()),
        format!("  size: {}", circuit.size()),
        format!(
            "  two-qubit and wider gates: {}",
            circuit.num_nonlocal_gates()
        ),
    ];
    for (name, count) in circuit.count_ops() {
        lines.push(format!("  {name}: {count}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod test {
    use super::*;
    use qadder_providers::JobId;
    use qadder_results::{AdderReadout, Counts};

    fn outcome(counts: &[(&str, u64)], a: u64, b: u64, k: u32) -> AdditionOutcome {
        let counts = Counts::from_iter(counts.iter().map(|(key, count)| (key.to_string(), *count)));
        AdditionOutcome {
            a,
            b,
            num_state_qubits: k,
            num_qubits: 2 * k as usize + 2,
            depth: 0,
            transpiled_depth: 0,
            job_id: JobId::new(),
            readout: AdderReadout::from_counts(&counts, k as usize).unwrap(),
            classical_sum: a + b,
        }
    }

    #[test]
    fn clean_report() {
        let report = addition_report(&outcome(&[("101", 100)], 3, 2, 2));
        assert_eq!(
            report,
            "=== Results ===\n\
             Classical sum: 5\n\
             Quantum sum: 5 (✓)\n\
             Overflow detected: YES (cout=1)\n\
             Sum value (without overflow): 1\n\
             Confidence: 100/100 = 100.0%\n\
             Unique outcomes: 1 (noise: no)"
        );
    }

    #[test]
    fn noisy_report_lists_top_outcomes() {
        let counts = [
            ("101", 40),
            ("001", 20),
            ("111", 15),
            ("100", 10),
            ("011", 8),
            ("000", 7),
        ];
        let report = addition_report(&outcome(&counts, 3, 2, 2));
        assert!(report.contains("Confidence: 40/100 = 40.0%"));
        assert!(report.contains("Unique outcomes: 6 (noise: yes)"));
        assert!(report.contains("Top 5 outcomes:"));
        assert!(report.contains("     5 (overflow=1, error:   0):  40 times"));
        assert!(report.contains("     1 (overflow=0, error:   4):  20 times"));
        assert!(!report.contains(" 0 (overflow=0"));
    }

    #[test]
    fn few_outcomes_are_not_listed() {
        let report = addition_report(&outcome(&[("101", 90), ("001", 10)], 3, 2, 2));
        assert!(report.contains("Quantum sum: 5 (✓)"));
        assert!(!report.contains("Top"));
    }

    #[test]
    fn summary_lists_ops() {
        let mut qc = CircuitData::new(2, 0);
        qc.x(qadder_circuit::Qubit(0)).unwrap();
        qc.cx(qadder_circuit::Qubit(0), qadder_circuit::Qubit(1))
            .unwrap();
        let summary = circuit_summary("Adder", &qc);
        assert!(summary.starts_with("Adder:\n  qubits: 2\n  depth: 2"));
        assert!(summary.contains("  cx: 1"));
    }
}
