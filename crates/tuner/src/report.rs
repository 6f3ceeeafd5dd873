//! Tuning run records and reporting

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::candidate::CandidateConfig;
use crate::elo::MatchResult;
use crate::error::Result;
use crate::tuner::Direction;
use crate::variable::{TunedValue, VariableSpec};

/// Everything that happened in one iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// 1-based iteration number
    pub iteration: u32,
    pub deltas: Vec<f64>,
    pub a: CandidateConfig,
    pub b: CandidateConfig,
    /// A's win fraction against B
    pub outcome: f64,
    pub result: Option<MatchResult>,
    pub direction: Direction,
    /// The outcome was exactly 0.5 and the direction came from a coin flip
    pub tie_break: bool,
    /// Values after the update
    pub values: Vec<TunedValue>,
}

/// Report of a completed tuning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningReport {
    /// Seed of the run's random source, if known
    pub seed: Option<u64>,
    pub variables: Vec<VariableSpec>,
    pub iterations: Vec<IterationRecord>,
    pub final_values: Vec<TunedValue>,
}

impl TuningReport {
    pub fn new(variables: Vec<VariableSpec>) -> Self {
        let final_values = variables
            .iter()
            .map(|v| TunedValue {
                name: v.name.clone(),
                value: v.default,
            })
            .collect();
        Self {
            seed: None,
            variables,
            iterations: Vec::new(),
            final_values,
        }
    }

    pub fn push(&mut self, record: IterationRecord) {
        self.iterations.push(record);
    }

    /// Save report to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load report from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Tuning Run ===\n\n");
        if let Some(seed) = self.seed {
            report.push_str(&format!("Seed: {}\n", seed));
        }
        report.push_str(&format!("Iterations: {}\n\n", self.iterations.len()));

        report.push_str(&format!("{:>5} {:>8} {:>4}", "Iter", "Score", "dt"));
        for var in &self.variables {
            report.push_str(&format!(" {:>12}", var.name));
        }
        report.push('\n');
        report.push_str(&"-".repeat(19 + 13 * self.variables.len()));
        report.push('\n');

        for record in &self.iterations {
            let dt = match record.direction {
                Direction::Plus => "+1",
                Direction::Minus => "-1",
            };
            report.push_str(&format!(
                "{:>5} {:>8.3} {:>4}",
                record.iteration, record.outcome, dt
            ));
            for value in &record.values {
                report.push_str(&format!(" {:>12.2}", value.value));
            }
            report.push('\n');
        }

        report.push_str("\nFinal values:\n");
        for value in &self.final_values {
            report.push_str(&format!("{}: {}\n", value.name, value.value));
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
