//! Parameter tuner for UCI chess engines
//!
//! This crate provides infrastructure for:
//! - Sampling bounded perturbations for a set of engine parameters
//! - Playing the `+delta` configuration against the `-delta` one
//! - Moving the parameters toward whichever side scored better
//!
//! # Usage
//!
//! ```bash
//! # Write the default config, edit it, then tune
//! cargo run -p tuner -- default-config > tuner.toml
//! cargo run -p tuner -- run --config tuner.toml --iterations 20
//!
//! # Repeat a run exactly
//! cargo run -p tuner -- run --config tuner.toml --seed 1234
//! ```

mod candidate;
mod config;
mod elo;
mod error;
mod match_runner;
mod report;
mod sampler;
mod tuner;
mod variable;

pub use candidate::*;
pub use config::*;
pub use elo::*;
pub use error::*;
pub use match_runner::*;
pub use report::*;
pub use sampler::*;
pub use tuner::*;
pub use variable::*;
