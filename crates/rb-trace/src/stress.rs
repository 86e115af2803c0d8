//! Randomised insert/remove regression with per-operation checks.
//!
//! After every operation the tree is verified, and the recorded log is
//! replayed backward from the new state and forward from the old one; both
//! replays have to land exactly on the other state.

use std::collections::BTreeSet;

use log::{debug, info};
use rand::{rngs::OsRng, RngCore};
use serde::Serialize;
use thiserror::Error;

use crate::fuzzer::Fuzzer;
use crate::op::Op;
use crate::red_black::InvariantError;
use crate::replay::{self, ReplayError};
use crate::step::Direction;
use crate::tree::RbTree;

/// Parameters of a stress run.
#[derive(Clone, Debug)]
pub struct StressConfig {
    /// Seed of the operation sequence; drawn from the OS when absent.
    pub seed: Option<u64>,
    pub ops: usize,
    /// Keys are drawn from `0..=max_key`.
    pub max_key: i64,
    /// Probability that an operation is an insert.
    pub insert_ratio: f64,
    /// Also check step replay in both directions after every operation.
    pub check_replay: bool,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ops: 10_000,
            max_key: 200,
            insert_ratio: 0.7,
            check_replay: true,
        }
    }
}

/// Summary of a successful run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StressReport {
    pub seed: u64,
    pub ops: usize,
    pub inserts: usize,
    pub removes: usize,
    pub duplicates: usize,
    pub steps: usize,
    pub final_len: usize,
    pub max_height: usize,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StressError {
    #[error("insert ratio {0} is not a probability")]
    InvalidRatio(f64),
    #[error("max key {0} leaves no key to draw")]
    InvalidKeyRange(i64),
    #[error("operation {index} ({op}) returned {got}, expected {expected}")]
    Outcome {
        index: usize,
        op: Op,
        got: bool,
        expected: bool,
    },
    #[error("operation {index} ({op}) broke the tree: {source}")]
    Invariant {
        index: usize,
        op: Op,
        #[source]
        source: InvariantError,
    },
    #[error("operation {index} ({op}) recorded a log that does not replay: {source}")]
    Replay {
        index: usize,
        op: Op,
        #[source]
        source: ReplayError,
    },
    #[error("operation {index} ({op}): replaying its log {direction:?} gives a different tree")]
    Diverged {
        index: usize,
        op: Op,
        direction: Direction,
    },
}

/// Runs `op` on `tree` and checks the result: the tree stays valid and the
/// recorded log replays in both directions. Returns the operation's outcome.
pub fn checked_apply(
    tree: &mut RbTree,
    op: Op,
    index: usize,
    check_replay: bool,
) -> Result<bool, StressError> {
    let before = check_replay.then(|| tree.clone());
    let ok = op.apply(tree);

    tree.verify()
        .map_err(|source| StressError::Invariant { index, op, source })?;

    if let Some(mut old) = before {
        let replay_err = |source| StressError::Replay { index, op, source };

        let mut undone = tree.clone();
        replay::backward(&mut undone, tree.steps()).map_err(replay_err)?;
        if undone.snapshot() != old.snapshot() {
            return Err(StressError::Diverged {
                index,
                op,
                direction: Direction::Backward,
            });
        }

        replay::forward(&mut old, tree.steps()).map_err(replay_err)?;
        if old.snapshot() != tree.snapshot() {
            return Err(StressError::Diverged {
                index,
                op,
                direction: Direction::Forward,
            });
        }
    }
    Ok(ok)
}

/// Runs the randomised regression described by `config`.
pub fn run(config: &StressConfig) -> Result<StressReport, StressError> {
    if !(0.0..=1.0).contains(&config.insert_ratio) {
        return Err(StressError::InvalidRatio(config.insert_ratio));
    }
    if config.max_key < 0 {
        return Err(StressError::InvalidKeyRange(config.max_key));
    }
    let seed = config.seed.unwrap_or_else(|| OsRng.next_u64());
    info!("stress: seed {seed}, {} operations over 0..={}", config.ops, config.max_key);

    let mut fuzzer = Fuzzer::from_u64(seed);
    let mut tree = RbTree::new();
    let mut inserted: Vec<i64> = Vec::new();
    let mut present: BTreeSet<i64> = BTreeSet::new();
    let mut report = StressReport {
        seed,
        ..StressReport::default()
    };

    for index in 0..config.ops {
        let op = if inserted.is_empty() || fuzzer.random_bool(config.insert_ratio) {
            Op::Insert(fuzzer.random_int(0, config.max_key))
        } else {
            let at = fuzzer.index(inserted.len());
            Op::Remove(inserted.swap_remove(at))
        };

        let expected = match op {
            Op::Insert(k) => !present.contains(&k),
            Op::Remove(_) | Op::Find(_) => true,
        };
        let got = checked_apply(&mut tree, op, index, config.check_replay)?;
        if got != expected {
            return Err(StressError::Outcome {
                index,
                op,
                got,
                expected,
            });
        }

        match op {
            Op::Insert(k) if got => {
                inserted.push(k);
                present.insert(k);
                report.inserts += 1;
            }
            Op::Insert(_) => report.duplicates += 1,
            Op::Remove(k) => {
                present.remove(&k);
                report.removes += 1;
            }
            Op::Find(_) => {}
        }
        report.ops += 1;
        report.steps += tree.steps().len();
        report.max_height = report.max_height.max(tree.height());
    }

    report.final_len = tree.len();
    debug!("stress: {report:?}");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_apply_reports_outcome() {
        let mut tree = RbTree::new();
        assert_eq!(checked_apply(&mut tree, Op::Insert(4), 0, true), Ok(true));
        assert_eq!(checked_apply(&mut tree, Op::Insert(4), 1, true), Ok(false));
        assert_eq!(checked_apply(&mut tree, Op::Find(4), 2, true), Ok(true));
        assert_eq!(checked_apply(&mut tree, Op::Remove(4), 3, true), Ok(true));
        assert!(tree.is_empty());
    }

    #[test]
    fn short_run_counts_every_operation() {
        let report = run(&StressConfig {
            seed: Some(5),
            ops: 300,
            max_key: 20,
            ..StressConfig::default()
        })
        .unwrap();
        assert_eq!(report.ops, 300);
        assert!(report.max_height > 0);
    }
}
