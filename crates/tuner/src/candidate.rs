//! Candidate configurations for one paired comparison

use serde::{Deserialize, Serialize};

use crate::variable::{TunedValue, TuningState, VariableSpec};

/// One side of a paired comparison: a value for every tuned variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateConfig {
    pub values: Vec<TunedValue>,
}

impl CandidateConfig {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.iter().find(|v| v.name == name).map(|v| v.value)
    }

    /// Values as handed to the engine, rounded to integers.
    pub fn engine_options(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.values.iter().map(|v| (v.name.as_str(), v.rounded()))
    }
}

/// Configurations A (center + delta) and B (center - delta) for one iteration,
/// with the deltas used to build them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePair {
    pub a: CandidateConfig,
    pub b: CandidateConfig,
    pub deltas: Vec<f64>,
}

impl CandidatePair {
    /// Build both sides around the current state.
    ///
    /// Each side is clamped on its own, so near a bound A and B are not
    /// necessarily symmetric around the center.
    pub fn build(specs: &[VariableSpec], state: &TuningState, deltas: Vec<f64>) -> Self {
        debug_assert_eq!(specs.len(), state.len());
        debug_assert_eq!(specs.len(), deltas.len());

        let mut a = Vec::with_capacity(specs.len());
        let mut b = Vec::with_capacity(specs.len());

        for (i, (spec, &delta)) in specs.iter().zip(&deltas).enumerate() {
            let x = state.value_at(i);
            a.push(TunedValue {
                name: spec.name.clone(),
                value: spec.clamp(x + delta),
            });
            b.push(TunedValue {
                name: spec.name.clone(),
                value: spec.clamp(x - delta),
            });
        }

        Self {
            a: CandidateConfig { values: a },
            b: CandidateConfig { values: b },
            deltas,
        }
    }
}

#[cfg(test)]
#[path = "candidate_tests.rs"]
mod candidate_tests;
