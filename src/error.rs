use std::fmt;

use crate::types::ProcessId;

/// Errors reported by game construction and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// No structurally equal position was ever registered in the game.
    UnknownPosition(String),
    /// A candidate set to be partitioned exceeded the configured limit.
    PartitionLimit { size: usize, limit: usize },
    /// The process is not a state of the transition system.
    UnknownProcess(ProcessId),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UnknownPosition(position) => write!(f, "position {} is not part of the game", position),
            GameError::PartitionLimit { size, limit } => {
                write!(f, "cannot partition {} candidates (limit is {})", size, limit)
            }
            GameError::UnknownProcess(process) => write!(f, "unknown process {}", process),
        }
    }
}

impl std::error::Error for GameError {}
