//! Error types for the ball-sort solver.
//!
//! Only the puzzle loader and the random generator surface errors to callers.
//! `MoveError` is produced by `State::apply` and is recovered locally by the
//! move generator.

use thiserror::Error;

/// Raised when a single-ball move cannot be applied to a state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The source tube holds no ball to move.
    #[error("tube {from} is empty")]
    EmptySource { from: usize },

    /// The destination tube is already at its capacity limit.
    #[error("tube {to} is full")]
    DestinationFull { to: usize },

    /// A tube index does not exist in this state.
    #[error("tube index {index} out of range (state has {bins} tubes)")]
    OutOfRange { index: usize, bins: usize },
}

/// Errors produced while loading puzzles from text.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A line carries a limit token but no tube field.
    #[error("line {line}: expected `<limit> [<balls>`")]
    MissingTube { line: usize },

    /// The tube field does not start with `[`.
    #[error("line {line}: tube contents must start with '['")]
    MissingBracket { line: usize },

    /// A numeric limit that cannot hold any ball.
    #[error("line {line}: invalid capacity '{token}'")]
    InvalidLimit { line: usize, token: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by the random puzzle generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("at least one color is required")]
    NoColors,

    #[error("tube height must be > 0")]
    ZeroHeight,

    #[error("{colors} colors exceed the {max} available ball symbols")]
    TooManyColors { colors: usize, max: usize },
}
