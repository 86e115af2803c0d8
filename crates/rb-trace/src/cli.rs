//! `rb-trace`: command-line driver for the traced red-black tree.
//!
//! Provides the core logic used by the binary entry point:
//! - `rb-trace script <ops...>`: run `+k` / `-k` / `?k` operations and dump
//!   every recorded step
//! - `rb-trace stress`: seeded randomised regression with
//!   verification and replay checks after every operation

use std::fmt::Write as _;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::Serialize;
use thiserror::Error;

use crate::op::{Op, ParseOpError};
use crate::snapshot::Snapshot;
use crate::step::Step;
use crate::stress::{self, StressConfig, StressError};
use crate::tree::RbTree;

// ── Arguments ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "rb-trace", version, about = "Red-black tree with a replayable step log")]
pub struct Cli {
    /// Output format.
    #[arg(long, value_enum, global = true, default_value_t = Format::Text)]
    pub format: Format,

    /// Log verbosity on stderr.
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run operations in order, e.g. `+5 +3 -5 ?3`.
    Script {
        #[arg(required = true, allow_hyphen_values = true)]
        ops: Vec<String>,
    },
    /// Random inserts and removals, checked after every operation.
    Stress {
        /// Seed of the operation sequence; random when omitted.
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10_000)]
        ops: usize,
        /// Keys are drawn from 0..=max-key.
        #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(i64).range(0..))]
        max_key: i64,
        /// Probability of an insert.
        #[arg(long, default_value_t = 0.7)]
        insert_ratio: f64,
        /// Skip the forward/backward replay check.
        #[arg(long)]
        no_replay: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Op(#[from] ParseOpError),
    #[error(transparent)]
    Stress(#[from] StressError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

// ── script ────────────────────────────────────────────────────────────────

/// Record of one scripted operation.
#[derive(Debug, Serialize)]
pub struct OpReport {
    #[serde(flatten)]
    pub op: Op,
    pub ok: bool,
    pub steps: Vec<Step>,
    pub tree: Snapshot,
}

pub fn parse_ops<S: AsRef<str>>(ops: &[S]) -> Result<Vec<Op>, ParseOpError> {
    ops.iter().map(|s| s.as_ref().parse()).collect()
}

/// Runs `ops` on an empty tree. Parsing happens up front so a malformed
/// operation leaves nothing half done.
pub fn run_script(ops: &[Op]) -> Vec<OpReport> {
    let mut tree = RbTree::new();
    ops.iter()
        .map(|&op| {
            let ok = op.apply(&mut tree);
            OpReport {
                op,
                ok,
                steps: tree.steps().to_vec(),
                tree: tree.snapshot(),
            }
        })
        .collect()
}

pub fn render_script(reports: &[OpReport], format: Format) -> Result<String, CliError> {
    if format == Format::Json {
        return Ok(serde_json::to_string_pretty(reports)?);
    }
    let mut out = String::new();
    for report in reports {
        writeln!(out, "== {} ({})", report.op, if report.ok { "ok" } else { "no-op" })?;
        for (i, step) in report.steps.iter().enumerate() {
            writeln!(out, "{i:>4}  {step}")?;
        }
        let tree = RbTree::from_snapshot(&report.tree);
        writeln!(out, "{}\n", tree.print())?;
    }
    Ok(out)
}

// ── Entry point ───────────────────────────────────────────────────────────

/// Executes the parsed command and returns what should go to stdout.
pub fn run(cli: &Cli) -> Result<String, CliError> {
    match &cli.command {
        Command::Script { ops } => {
            let ops = parse_ops(ops)?;
            render_script(&run_script(&ops), cli.format)
        }
        Command::Stress {
            seed,
            ops,
            max_key,
            insert_ratio,
            no_replay,
        } => {
            let config = StressConfig {
                seed: *seed,
                ops: *ops,
                max_key: *max_key,
                insert_ratio: *insert_ratio,
                check_replay: !no_replay,
            };
            let report = stress::run(&config)?;
            match cli.format {
                Format::Json => Ok(serde_json::to_string_pretty(&report)?),
                Format::Text => Ok(format!(
                    "seed {}: {} operations ({} inserts, {} removals, {} duplicates), {} steps, final size {}, max height {}",
                    report.seed,
                    report.ops,
                    report.inserts,
                    report.removes,
                    report.duplicates,
                    report.steps,
                    report.final_len,
                    report.max_height
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_accepts_hyphenated_operations() {
        let cli = Cli::try_parse_from(["rb-trace", "--format", "json", "script", "+5", "-5", "?5"])
            .unwrap();
        assert_eq!(cli.format, Format::Json);
        match cli.command {
            Command::Script { ops } => assert_eq!(ops, vec!["+5", "-5", "?5"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn stress_defaults() {
        let cli = Cli::try_parse_from(["rb-trace", "stress"]).unwrap();
        match cli.command {
            Command::Stress {
                seed,
                ops,
                max_key,
                insert_ratio,
                no_replay,
            } => {
                assert_eq!(seed, None);
                assert_eq!(ops, 10_000);
                assert_eq!(max_key, 200);
                assert_eq!(insert_ratio, 0.7);
                assert!(!no_replay);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn script_reports_outcomes_and_final_tree() {
        let ops = parse_ops(&["+5", "+3", "+5", "-4", "?3"]).unwrap();
        let reports = run_script(&ops);
        let oks: Vec<bool> = reports.iter().map(|r| r.ok).collect();
        assert_eq!(oks, vec![true, true, false, false, true]);
        assert_eq!(reports[4].tree.keys(), vec![3, 5]);
    }

    #[test]
    fn text_output_lists_steps_and_tree() {
        let reports = run_script(&[Op::Insert(5)]);
        let text = render_script(&reports, Format::Text).unwrap();
        assert!(text.starts_with("== +5 (ok)\n"));
        assert!(text.contains("create    Create a red node for 5 [root]"));
        assert!(text.contains("5 black\nL=∅\nR=∅"));
    }

    #[test]
    fn json_output_flattens_the_operation() {
        let reports = run_script(&[Op::Insert(1)]);
        let json = render_script(&reports, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["op"], "insert");
        assert_eq!(value[0]["key"], 1);
        assert_eq!(value[0]["ok"], true);
        assert_eq!(value[0]["tree"]["root"]["colour"], "black");
    }

    #[test]
    fn negative_max_key_is_rejected() {
        assert!(Cli::try_parse_from(["rb-trace", "stress", "--max-key=-1", "--ops", "3"]).is_err());
        let cli = Cli::try_parse_from(["rb-trace", "stress", "--max-key", "0", "--ops", "3"]).unwrap();
        assert!(run(&cli).is_ok());
    }

    #[test]
    fn malformed_operation_fails_the_script() {
        let cli = Cli::try_parse_from(["rb-trace", "script", "+1", "x"]).unwrap();
        assert!(matches!(run(&cli), Err(CliError::Op(_))));
    }
}
