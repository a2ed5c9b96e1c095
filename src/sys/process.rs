//! Running-process location.
//!
//! # Responsibilities
//! - Resolve the zeroth process argument to an absolute executable path,
//!   searching `PATH` for bare names the way a shell does
//! - Expose the directory containing that executable
//! - Expose the program name used as the default `app` log field

use std::env;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::sys::path::clean_path;

/// Errors raised while locating the running executable.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The process was started without a zeroth argument.
    #[error("process has no zeroth argument")]
    MissingArgv0,

    /// No executable file matches the zeroth argument, on `PATH` or in place.
    #[error("executable {0:?} not found")]
    NotFound(OsString),

    /// The current directory was needed to absolutize the path but is unavailable.
    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[from] io::Error),
}

/// Directory containing the running executable.
///
/// # Panics
///
/// Panics when the executable path cannot be resolved. Location of the
/// running binary is treated as unrecoverable; use [`try_executable_dir`]
/// when a failure must be handled.
pub fn executable_dir() -> PathBuf {
    match try_executable_dir() {
        Ok(dir) => dir,
        Err(e) => panic!("cannot resolve executable directory: {e}"),
    }
}

/// Fallible form of [`executable_dir`].
pub fn try_executable_dir() -> Result<PathBuf, ProcessError> {
    let arg0 = env::args_os().next().ok_or(ProcessError::MissingArgv0)?;
    executable_dir_from(&arg0)
}

/// Resolve `arg0` the way a shell would and return its parent directory.
pub(crate) fn executable_dir_from(arg0: &OsStr) -> Result<PathBuf, ProcessError> {
    let exe = look_path(arg0)?;
    let exe = if exe.is_absolute() {
        exe
    } else {
        env::current_dir()?.join(exe)
    };
    let exe = clean_path(&exe);

    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| exe.clone()))
}

/// Base name of the zeroth process argument, or an empty string if absent.
pub fn program_name() -> String {
    env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn look_path(arg0: &OsStr) -> Result<PathBuf, ProcessError> {
    if arg0.is_empty() {
        return Err(ProcessError::MissingArgv0);
    }
    // Bare names are searched on PATH; anything with a separator is checked
    // in place. Either way the result must be an executable file.
    which::which(arg0).map_err(|_| ProcessError::NotFound(arg0.to_os_string()))
}
