//! Perturbation sampling
//!
//! Deltas come from a normal distribution truncated to the allowed interval by
//! rejection: `std_dev = |upper - lower| / 6`, so roughly ±3σ spans the
//! interval and large perturbations are rare.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, TunerError};
use crate::variable::clamp;

/// Rejected draws after which the sampler warns that the range is too narrow.
pub const WARN_AFTER_ATTEMPTS: u32 = 2000;

/// Retry behaviour of the rejection loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Number of rejected draws that triggers the "too close to bounds" warning
    pub warn_after: u32,
    /// Hard stop on the number of draws (None = keep drawing until accepted)
    pub max_attempts: Option<u32>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            warn_after: WARN_AFTER_ATTEMPTS,
            max_attempts: None,
        }
    }
}

/// One sampled value and how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draw {
    pub value: f64,
    /// Total draws taken, including the accepted one
    pub attempts: u32,
    /// The retry warning fired while producing this draw
    pub stalled: bool,
    /// The hard cap was hit and `value` is the closest rejected draw, clamped
    pub capped: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PerturbationSampler {
    config: SamplerConfig,
}

impl PerturbationSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Signed perturbation for a variable with scale `delta`, centered on 0.
    pub fn random_delta<R: Rng + ?Sized>(&self, rng: &mut R, delta: f64) -> Result<Draw> {
        self.truncated_gaussian(rng, -delta, delta, 0.0)
    }

    /// Draw from N(center, |upper - lower| / 6) until a value lands in
    /// `[lower, upper]`.
    pub fn truncated_gaussian<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        lower: f64,
        upper: f64,
        center: f64,
    ) -> Result<Draw> {
        if !lower.is_finite() || !upper.is_finite() || !center.is_finite() || lower > upper {
            return Err(TunerError::InvalidRange { lower, upper });
        }

        let std_dev = (upper - lower).abs() / 6.0;
        let normal =
            Normal::new(center, std_dev).map_err(|_| TunerError::InvalidRange { lower, upper })?;

        let mut attempts: u32 = 0;
        let mut stalled = false;
        // (distance outside the interval, draw)
        let mut closest: Option<(f64, f64)> = None;

        loop {
            let num = normal.sample(rng);
            attempts = attempts.saturating_add(1);

            if lower <= num && num <= upper {
                return Ok(Draw {
                    value: num,
                    attempts,
                    stalled,
                    capped: false,
                });
            }

            let distance = if num < lower { lower - num } else { num - upper };
            if closest.map_or(true, |(best, _)| distance < best) {
                closest = Some((distance, num));
            }

            if attempts == self.config.warn_after {
                stalled = true;
                warn!(
                    center,
                    lower,
                    upper,
                    attempts,
                    "current value is too close to the bounds of the range, consider extending the range"
                );
            }

            if let Some(max_attempts) = self.config.max_attempts {
                if attempts >= max_attempts {
                    let best = closest.map_or(center, |(_, num)| num);
                    return Ok(Draw {
                        value: clamp(best, lower, upper),
                        attempts,
                        stalled,
                        capped: true,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "sampler_tests.rs"]
mod sampler_tests;
