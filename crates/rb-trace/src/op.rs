use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::tree::RbTree;

/// One public tree operation, written `+k`, `-k` or `?k`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "key", rename_all = "lowercase")]
pub enum Op {
    Insert(i64),
    Remove(i64),
    Find(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseOpError {
    #[error("operation `{0}` must start with `+`, `-` or `?`")]
    UnknownOperator(String),
    #[error("operation `{0}` does not carry an integer key")]
    BadKey(String),
}

impl Op {
    pub fn key(self) -> i64 {
        match self {
            Op::Insert(k) | Op::Remove(k) | Op::Find(k) => k,
        }
    }

    /// Runs the operation, returning its boolean outcome.
    pub fn apply(self, tree: &mut RbTree) -> bool {
        match self {
            Op::Insert(k) => tree.insert(k),
            Op::Remove(k) => tree.remove(k),
            Op::Find(k) => tree.find(k).is_some(),
        }
    }
}

impl FromStr for Op {
    type Err = ParseOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let make = match chars.next() {
            Some('+') => Op::Insert,
            Some('-') => Op::Remove,
            Some('?') => Op::Find,
            _ => return Err(ParseOpError::UnknownOperator(s.to_string())),
        };
        chars
            .as_str()
            .parse::<i64>()
            .map(make)
            .map_err(|_| ParseOpError::BadKey(s.to_string()))
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Insert(k) => write!(f, "+{k}"),
            Op::Remove(k) => write!(f, "-{k}"),
            Op::Find(k) => write!(f, "?{k}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_operator() {
        assert_eq!("+5".parse(), Ok(Op::Insert(5)));
        assert_eq!("-5".parse(), Ok(Op::Remove(5)));
        assert_eq!("?-3".parse(), Ok(Op::Find(-3)));
        assert_eq!(" +12 ".parse::<Op>().map(|op| op.to_string()), Ok("+12".to_string()));
    }

    #[test]
    fn rejects_malformed_operations() {
        assert_eq!(
            "5".parse::<Op>(),
            Err(ParseOpError::UnknownOperator("5".to_string()))
        );
        assert_eq!("+x".parse::<Op>(), Err(ParseOpError::BadKey("+x".to_string())));
        assert_eq!("".parse::<Op>(), Err(ParseOpError::UnknownOperator(String::new())));
    }
}
