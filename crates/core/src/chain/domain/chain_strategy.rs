use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::shared::constants::MAX_COMBINATORIC_OPERATIONS;

/// How a chain combines its operations into variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChainStrategy {
    /// Every subset of operations, applied in chain order: 2^n variants.
    Combinatoric,
    /// All operations applied cumulatively: exactly one variant.
    Linear,
    /// Each operation applied alone to the original: n variants.
    Flat,
}

impl ChainStrategy {
    pub const ALL: [ChainStrategy; 3] = [
        ChainStrategy::Combinatoric,
        ChainStrategy::Linear,
        ChainStrategy::Flat,
    ];

    /// Number of variants an invocation produces for `operation_count`
    /// operations, or `None` if the strategy refuses that many.
    pub fn expected_variants(self, operation_count: usize) -> Option<usize> {
        match self {
            ChainStrategy::Combinatoric => {
                if operation_count > MAX_COMBINATORIC_OPERATIONS {
                    None
                } else {
                    Some(1usize << operation_count)
                }
            }
            ChainStrategy::Linear => Some(1),
            ChainStrategy::Flat => Some(operation_count),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChainStrategy::Combinatoric => "combinatoric",
            ChainStrategy::Linear => "linear",
            ChainStrategy::Flat => "flat",
        }
    }
}

impl fmt::Display for ChainStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown chain strategy `{0}` (expected combinatoric, linear or flat)")]
pub struct ParseStrategyError(pub String);

impl FromStr for ChainStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "combinatoric" => Ok(ChainStrategy::Combinatoric),
            "linear" => Ok(ChainStrategy::Linear),
            "flat" => Ok(ChainStrategy::Flat),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}
