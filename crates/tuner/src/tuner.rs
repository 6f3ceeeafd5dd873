//! Paired evaluation and update loop
//!
//! Each iteration samples one delta per variable, plays `x + d` (A) against
//! `x - d` (B), and moves every variable by `apply_factor * d` toward the
//! winning side. Iterations run strictly one after another: the next pair is
//! always built around the values the previous update produced.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::candidate::CandidatePair;
use crate::error::Result;
use crate::match_runner::{ComparisonOutcome, MatchSummary, PairedMatchRunner};
use crate::report::{IterationRecord, TuningReport};
use crate::sampler::PerturbationSampler;
use crate::variable::{validate_variables, TuningState, VariableSpec};

/// Sign of the update applied after a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Toward configuration A
    Plus,
    /// Toward configuration B
    Minus,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Plus => 1.0,
            Direction::Minus => -1.0,
        }
    }

    /// Pick the side that won. An exact 0.5 is broken by a fair coin so
    /// frequent ties don't drift the parameters one way.
    pub fn from_outcome<R: Rng + ?Sized>(outcome: ComparisonOutcome, rng: &mut R) -> Self {
        let r = outcome.value();
        if r > 0.5 {
            Direction::Plus
        } else if r < 0.5 {
            Direction::Minus
        } else if rng.gen_bool(0.5) {
            Direction::Plus
        } else {
            Direction::Minus
        }
    }
}

/// New value for a variable after a comparison: `clamp(x + dt * apply_factor * d)`.
#[inline]
pub fn update_value(spec: &VariableSpec, current: f64, delta: f64, direction: Direction) -> f64 {
    spec.clamp(current + direction.sign() * spec.apply_factor * delta)
}

pub struct Tuner<M, R> {
    specs: Vec<VariableSpec>,
    state: TuningState,
    sampler: PerturbationSampler,
    runner: M,
    rng: R,
    iteration: u32,
}

impl<M: PairedMatchRunner, R: Rng> Tuner<M, R> {
    pub fn new(
        specs: Vec<VariableSpec>,
        sampler: PerturbationSampler,
        runner: M,
        rng: R,
    ) -> Result<Self> {
        validate_variables(&specs)?;
        let state = TuningState::from_defaults(&specs);
        Ok(Self {
            specs,
            state,
            sampler,
            runner,
            rng,
            iteration: 0,
        })
    }

    pub fn specs(&self) -> &[VariableSpec] {
        &self.specs
    }

    pub fn state(&self) -> &TuningState {
        &self.state
    }

    /// Iterations completed so far
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn runner(&self) -> &M {
        &self.runner
    }

    /// Sample a delta for every variable and build A and B around the
    /// current values.
    pub fn sample_pair(&mut self) -> Result<CandidatePair> {
        let mut deltas = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            let draw = self.sampler.random_delta(&mut self.rng, spec.delta)?;
            debug!(
                variable = %spec.name,
                delta = draw.value,
                attempts = draw.attempts,
                "chose delta"
            );
            deltas.push(draw.value);
        }
        Ok(CandidatePair::build(&self.specs, &self.state, deltas))
    }

    /// Move every variable toward the winning side of `pair`.
    pub fn apply_outcome(&mut self, pair: &CandidatePair, outcome: ComparisonOutcome) -> Direction {
        let direction = Direction::from_outcome(outcome, &mut self.rng);
        for (i, spec) in self.specs.iter().enumerate() {
            let current = self.state.value_at(i);
            let updated = update_value(spec, current, pair.deltas[i], direction);
            self.state.set_at(i, updated);
        }
        direction
    }

    /// Run one full iteration: sample, evaluate, update.
    ///
    /// A failed evaluation leaves the state untouched and is returned as is.
    pub fn step(&mut self) -> Result<IterationRecord> {
        let pair = self.sample_pair()?;
        info!(a = ?pair.a.values, b = ?pair.b.values, "candidates");

        let MatchSummary { outcome, result } = self.runner.play(&pair.a, &pair.b)?;
        let tie_break = outcome.value() == 0.5;
        let elo = result.and_then(|r| r.elo_difference());
        info!(?result, ?elo, "Result: A won {:.1}%", outcome.value() * 100.0);
        if tie_break {
            debug!("draw, choosing direction at random");
        }

        let direction = self.apply_outcome(&pair, outcome);
        self.iteration += 1;
        info!(iteration = self.iteration, dt = direction.sign(), "applied update");

        Ok(IterationRecord {
            iteration: self.iteration,
            deltas: pair.deltas,
            a: pair.a,
            b: pair.b,
            outcome: outcome.value(),
            result,
            direction,
            tie_break,
            values: self.state.values().to_vec(),
        })
    }

    /// Run a fixed number of iterations and report the final values.
    ///
    /// Stops at the first failed evaluation; no report is produced for a run
    /// that did not complete.
    pub fn run(&mut self, iterations: u32) -> Result<TuningReport> {
        let mut report = TuningReport::new(self.specs.clone());

        for i in 0..iterations {
            info!("Iteration {}/{}", i + 1, iterations);
            for value in self.state.values() {
                info!("{}: {}", value.name, value.value);
            }
            report.push(self.step()?);
        }

        report.final_values = self.state.values().to_vec();
        Ok(report)
    }
}

#[cfg(test)]
#[path = "tuner_tests.rs"]
mod tuner_tests;
