//! Error types for the Hanoi solver.

use crate::engine::{Disk, Peg};
use thiserror::Error;

/// Errors reported by configuration building, validation and search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid disk count {num_disks}: expected between 1 and {max}")]
    InvalidDiskCount { num_disks: usize, max: usize },

    #[error("invalid peg index {index}: expected 0, 1 or 2")]
    InvalidPeg { index: usize },

    #[error("unknown search strategy '{name}' (expected 'astar' or 'bfs')")]
    UnknownStrategy { name: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("illegal move of disk {disk} from {from} to {to}")]
    IllegalMove { disk: Disk, from: Peg, to: Peg },

    #[error("node limit of {limit} reached after {expanded} expansions")]
    NodeLimitExceeded { limit: usize, expanded: usize },

    /// The frontier emptied without reaching the goal. The Hanoi state graph is
    /// finite and always solvable, so this points at a broken move generator,
    /// deduplication or goal test.
    #[error("internal invariant violated: frontier exhausted after {expanded} expansions without reaching the goal")]
    SearchExhausted { expanded: usize },
}

impl Error {
    pub(crate) fn invalid_configuration(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Returns `true` for errors that indicate a defect in the search machinery
    /// rather than bad input or an exhausted budget.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::SearchExhausted { .. })
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
