//! Logger construction errors.

use thiserror::Error;

use crate::rotation::RotationError;
use crate::sys::process::ProcessError;

/// Errors that can occur while building or installing a logger.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The running executable's location, needed for relative log paths, is unknown.
    #[error("cannot resolve log directory: {0}")]
    ExecutableDir(#[from] ProcessError),

    /// The rotating log file could not be set up.
    #[error(transparent)]
    Rotation(#[from] RotationError),

    /// A global `tracing` subscriber is already installed.
    #[error("cannot install logger as global subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}
