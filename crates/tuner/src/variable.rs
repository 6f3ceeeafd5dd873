//! Tunable variables and the current tuning estimate

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, TunerError};

/// Static description of one tuned engine parameter.
///
/// Perturbations are sized for integer-valued engine options, since the
/// candidates are rounded before they reach the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    /// UCI option name, unique within a run
    pub name: String,
    pub default: f64,
    pub minval: f64,
    pub maxval: f64,
    /// Perturbation scale; sampled deltas lie in [-delta, +delta]
    pub delta: f64,
    /// Damping applied to the sampled delta when the update is accepted
    pub apply_factor: f64,
}

impl VariableSpec {
    pub fn new(
        name: impl Into<String>,
        default: f64,
        minval: f64,
        maxval: f64,
        delta: f64,
        apply_factor: f64,
    ) -> Self {
        Self {
            name: name.into(),
            default,
            minval,
            maxval,
            delta,
            apply_factor,
        }
    }

    /// Clamp a value into this variable's range.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        clamp(value, self.minval, self.maxval)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| -> Result<()> {
            Err(TunerError::Config(format!(
                "variable {:?}: {}",
                self.name, reason
            )))
        };

        if self.name.trim().is_empty() {
            return invalid("name cannot be empty");
        }
        let fields = [
            self.default,
            self.minval,
            self.maxval,
            self.delta,
            self.apply_factor,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return invalid("all values must be finite");
        }
        if self.minval > self.maxval {
            return invalid("minval must not exceed maxval");
        }
        if self.default < self.minval || self.default > self.maxval {
            return invalid("default must lie within [minval, maxval]");
        }
        if self.delta < 0.0 {
            return invalid("delta must be non-negative");
        }
        if self.apply_factor < 0.0 {
            return invalid("apply_factor must be non-negative");
        }
        Ok(())
    }
}

/// Validate a whole variable set: each spec individually, plus unique names.
pub fn validate_variables(specs: &[VariableSpec]) -> Result<()> {
    if specs.is_empty() {
        return Err(TunerError::Config("at least one variable is required".into()));
    }
    let mut seen = HashSet::new();
    for spec in specs {
        spec.validate()?;
        if !seen.insert(spec.name.as_str()) {
            return Err(TunerError::Config(format!(
                "duplicate variable name {:?}",
                spec.name
            )));
        }
    }
    Ok(())
}

/// Clamp `value` into `[lo, hi]`. Requires `lo <= hi`.
#[inline]
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// A named value, used both for the current estimate and for candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunedValue {
    pub name: String,
    pub value: f64,
}

impl TunedValue {
    /// Value as the engine sees it.
    pub fn rounded(&self) -> i64 {
        self.value.round() as i64
    }
}

/// Current estimate of every variable, in variable order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningState {
    values: Vec<TunedValue>,
}

impl TuningState {
    /// Start from each variable's default.
    pub fn from_defaults(specs: &[VariableSpec]) -> Self {
        Self {
            values: specs
                .iter()
                .map(|spec| TunedValue {
                    name: spec.name.clone(),
                    value: spec.default,
                })
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.iter().find(|v| v.name == name).map(|v| v.value)
    }

    pub fn values(&self) -> &[TunedValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn value_at(&self, index: usize) -> f64 {
        self.values[index].value
    }

    pub(crate) fn set_at(&mut self, index: usize, value: f64) {
        self.values[index].value = value;
    }
}

#[cfg(test)]
#[path = "variable_tests.rs"]
mod variable_tests;
