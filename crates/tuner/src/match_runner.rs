//! Match runner for playing candidate configurations against each other
//!
//! The tuner only needs one number per iteration: how often configuration A
//! beat configuration B. [`CutechessRunner`] gets it by writing an
//! `engines.json` for cutechess-cli, running a gauntlet between the two
//! configurations and reading the final `Score of A vs B` line.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::candidate::CandidateConfig;
use crate::elo::MatchResult;
use crate::error::{Result, TunerError};

/// Engines file written into the working directory before every match
pub const ENGINES_FILE: &str = "engines.json";

/// Marker of cutechess-cli's running score line
pub const SCORE_MARKER: &str = "Score of A vs B";

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Configuration A's win fraction against B, always within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ComparisonOutcome(f64);

impl ComparisonOutcome {
    pub fn new(value: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(TunerError::InvalidOutcome(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// What a paired match produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchSummary {
    pub outcome: ComparisonOutcome,
    /// Win/loss/draw counts, when the runner reports them
    pub result: Option<MatchResult>,
}

impl From<ComparisonOutcome> for MatchSummary {
    fn from(outcome: ComparisonOutcome) -> Self {
        Self {
            outcome,
            result: None,
        }
    }
}

/// Plays configuration A against configuration B and reports A's score.
///
/// Implementations block until the match is over. A match that yields no
/// usable score must return an error; callers never substitute a default.
pub trait PairedMatchRunner {
    fn play(&mut self, a: &CandidateConfig, b: &CandidateConfig) -> Result<MatchSummary>;
}

impl<T: PairedMatchRunner + ?Sized> PairedMatchRunner for Box<T> {
    fn play(&mut self, a: &CandidateConfig, b: &CandidateConfig) -> Result<MatchSummary> {
        (**self).play(a, b)
    }
}

/// Fixed match parameters, set once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// cutechess-cli invocation; whitespace-separated, the first word is the program
    pub cutechess_command: String,
    /// Engine binary, relative to the working directory
    pub engine_command: String,
    /// Directory the match runs in and where the engines file is written
    pub working_directory: PathBuf,
    pub time_control: String,
    /// Hash size in MB passed to both engines
    pub hash: u32,
    /// Games per match (openings are repeated with colors swapped)
    pub games: u32,
    pub concurrency: u32,
    /// PGN opening book (None = cutechess default openings)
    pub openings: Option<String>,
    /// Additional cutechess-cli arguments (adjudication, PGN output)
    pub extra_args: Vec<String>,
    /// Kill the match after this many seconds (None = wait indefinitely)
    pub timeout_secs: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        let extra_args = "-pgnout games.pgn \
            -draw movenumber=40 movecount=4 score=2 \
            -resign movecount=4 score=300";
        Self {
            cutechess_command: "./cutechess-cli".to_string(),
            engine_command: "./Avalanche".to_string(),
            working_directory: PathBuf::from("./engine"),
            time_control: "15.0+0.12".to_string(),
            hash: 64,
            games: 50,
            concurrency: 7,
            openings: Some("UHO.pgn".to_string()),
            extra_args: extra_args.split_whitespace().map(str::to_string).collect(),
            timeout_secs: None,
        }
    }
}

impl MatchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cutechess_command.split_whitespace().next().is_none() {
            return Err(TunerError::Config("cutechess_command cannot be empty".into()));
        }
        if self.engine_command.trim().is_empty() {
            return Err(TunerError::Config("engine_command cannot be empty".into()));
        }
        if self.games == 0 {
            return Err(TunerError::Config("games must be greater than 0".into()));
        }
        if self.concurrency == 0 {
            return Err(TunerError::Config("concurrency must be greater than 0".into()));
        }
        if self.timeout_secs == Some(0) {
            return Err(TunerError::Config("timeout_secs must be greater than 0".into()));
        }
        Ok(())
    }

    /// Full argument list after the program name.
    pub fn command_args(&self) -> Vec<String> {
        let mut args: Vec<String> = self
            .cutechess_command
            .split_whitespace()
            .skip(1)
            .map(str::to_string)
            .collect();

        args.extend(["-tournament", "gauntlet"].map(String::from));
        args.push("-concurrency".to_string());
        args.push(self.concurrency.to_string());
        args.push("-recover".to_string());
        args.extend(self.extra_args.iter().cloned());
        args.extend(["-each", "proto=uci"].map(String::from));
        if let Some(openings) = &self.openings {
            args.push("-openings".to_string());
            args.push(format!("file={}", openings));
            args.push("format=pgn".to_string());
        }
        args.push("-repeat".to_string());
        args.push("-games".to_string());
        args.push(self.games.to_string());
        for name in ["A", "B"] {
            args.push("-engine".to_string());
            args.push(format!("conf={}", name));
            args.push(format!("tc={}", self.time_control));
        }
        args
    }

    fn program(&self) -> &str {
        self.cutechess_command
            .split_whitespace()
            .next()
            .unwrap_or_default()
    }
}

/// One entry of cutechess-cli's engines file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineEntry {
    pub command: String,
    pub name: String,
    pub options: Vec<EngineOption>,
    pub protocol: String,
    pub working_directory: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOption {
    pub name: String,
    pub value: i64,
}

/// Build the engines file entries for A and B.
pub fn engine_entries(
    config: &MatchConfig,
    a: &CandidateConfig,
    b: &CandidateConfig,
) -> Vec<EngineEntry> {
    [("A", a), ("B", b)]
        .into_iter()
        .map(|(name, candidate)| {
            let mut options = vec![EngineOption {
                name: "Hash".to_string(),
                value: i64::from(config.hash),
            }];
            options.extend(candidate.engine_options().map(|(name, value)| EngineOption {
                name: name.to_string(),
                value,
            }));
            EngineEntry {
                command: config.engine_command.clone(),
                name: name.to_string(),
                options,
                protocol: "uci".to_string(),
                working_directory: ".".to_string(),
            }
        })
        .collect()
}

/// Extract A's score from cutechess-cli output.
///
/// cutechess prints a running score after games; the last line covers the
/// whole match.
pub fn parse_match_output(output: &str) -> Result<MatchSummary> {
    let line = output
        .lines()
        .rev()
        .find(|line| line.contains(SCORE_MARKER))
        .ok_or(TunerError::MissingScore)?;
    parse_score_line(line)
}

/// Parse a line like `Score of A vs B: 20 - 15 - 15  [0.550] 50`.
pub fn parse_score_line(line: &str) -> Result<MatchSummary> {
    let parse_err = || TunerError::ParseScore {
        line: line.to_string(),
    };

    let open = line.find('[').ok_or_else(parse_err)?;
    let close = line[open..].find(']').ok_or_else(parse_err)? + open;
    let value: f64 = line[open + 1..close]
        .trim()
        .parse()
        .map_err(|_| parse_err())?;
    let outcome = ComparisonOutcome::new(value)?;

    // W - L - D between the colon and the bracket
    let result = line[..open].rsplit_once(':').and_then(|(_, counts)| {
        let counts: Vec<u32> = counts
            .split('-')
            .map(|part| part.trim().parse().ok())
            .collect::<Option<_>>()?;
        match counts.as_slice() {
            [wins, losses, draws] => Some(MatchResult::new(*wins, *losses, *draws)),
            _ => None,
        }
    });

    Ok(MatchSummary { outcome, result })
}

/// Runs paired matches through cutechess-cli
pub struct CutechessRunner {
    config: MatchConfig,
}

impl CutechessRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn engines_file(&self) -> PathBuf {
        self.config.working_directory.join(ENGINES_FILE)
    }

    /// Write the engines file for this pair, replacing any previous one.
    pub fn write_engines_file(&self, a: &CandidateConfig, b: &CandidateConfig) -> Result<PathBuf> {
        let entries = engine_entries(&self.config, a, b);
        let json = serde_json::to_string_pretty(&entries)?;
        let path = self.engines_file();
        std::fs::write(&path, json)?;
        Ok(path)
    }

    fn spawn(&self) -> Result<Child> {
        let program = self.config.program();
        let args = self.config.command_args();
        debug!(program, ?args, "launching cutechess");

        Command::new(program)
            .args(&args)
            .current_dir(&self.config.working_directory)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| TunerError::ProcessSpawn {
                command: program.to_string(),
                source,
            })
    }

    /// Wait for the match to finish and collect its stdout.
    fn collect_output(&self, mut child: Child) -> Result<String> {
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| TunerError::Io(std::io::Error::other("cutechess stdout not captured")))?;

        // Drain on a separate thread so a full pipe can't stall the match
        let reader = thread::spawn(move || {
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).map(|_| buf)
        });

        let status = match self.config.timeout() {
            None => child.wait()?,
            Some(limit) => wait_with_timeout(&mut child, limit)?,
        };
        if !status.success() {
            warn!(%status, "cutechess exited with failure status");
        }

        let bytes = reader
            .join()
            .map_err(|_| TunerError::Io(std::io::Error::other("output reader panicked")))??;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn wait_with_timeout(child: &mut Child, limit: Duration) -> Result<std::process::ExitStatus> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if start.elapsed() >= limit {
            let _ = child.kill();
            let _ = child.wait();
            return Err(TunerError::ProcessTimeout(limit));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

impl PairedMatchRunner for CutechessRunner {
    fn play(&mut self, a: &CandidateConfig, b: &CandidateConfig) -> Result<MatchSummary> {
        let path = self.write_engines_file(a, b)?;
        info!(
            games = self.config.games,
            tc = %self.config.time_control,
            engines_file = %path.display(),
            "starting match between A and B"
        );

        let child = self.spawn()?;
        let output = self.collect_output(child)?;
        parse_match_output(&output)
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
