//! Error type shared by the cube model and the solvers.

use thiserror::Error;

/// Fatal outcomes of building or solving a cube.
///
/// Neither kind is retried: there is no I/O in the core, so every error
/// points at a bad input cube or a solver defect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// A classification observed a state no legal cube can reach.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    /// Malformed coordinates, sides or piece data supplied by the caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
