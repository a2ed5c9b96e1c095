//! Build a live logger from a resolved configuration.
//!
//! # Responsibilities
//! - Place relative log files under `<exec-dir>/../logs/`
//! - Wire the rotating writer, encoder, level and options into a [`Logger`]
//!
//! # Design Decisions
//! - Resolving the executable directory is the only failure point; it is
//!   reported instead of aborting
//! - The log directory exists once `build` returns

use std::path::{Path, PathBuf};

use crate::logger::builder::ResolvedLogging;
use crate::logger::core::Logger;
use crate::logger::error::LoggerError;
use crate::logger::sugar::SugaredLogger;
use crate::rotation::RotatingWriter;
use crate::sys::path::clean_path;
use crate::sys::process::try_executable_dir;

/// Where `filename` lives relative to a given executable directory.
///
/// Rooted names are returned as given.
pub fn log_path_under(exec_dir: &Path, filename: &str) -> PathBuf {
    let name = Path::new(filename);
    if name.has_root() {
        return name.to_path_buf();
    }
    clean_path(&exec_dir.join("..").join("logs").join(name))
}

/// Where `filename` lives for the running executable.
pub fn resolve_log_path(filename: &str) -> Result<PathBuf, LoggerError> {
    if Path::new(filename).has_root() {
        return Ok(PathBuf::from(filename));
    }
    let exec_dir = try_executable_dir()?;
    Ok(log_path_under(&exec_dir, filename))
}

impl ResolvedLogging {
    /// The file this configuration writes to.
    pub fn log_path(&self) -> Result<PathBuf, LoggerError> {
        resolve_log_path(&self.rotation.filename)
    }

    /// Shorthand for [`build`].
    pub fn build(&self) -> Result<Logger, LoggerError> {
        build(self)
    }
}

/// Instantiate a logger writing to a rotating file.
pub fn build(config: &ResolvedLogging) -> Result<Logger, LoggerError> {
    let path = config.log_path()?;
    build_at(config, path)
}

/// Instantiate a logger and wrap it in the keyed-argument adapter.
pub fn build_sugared(config: &ResolvedLogging) -> Result<SugaredLogger, LoggerError> {
    Ok(build(config)?.sugar())
}

fn build_at(config: &ResolvedLogging, path: PathBuf) -> Result<Logger, LoggerError> {
    let rotation = &config.rotation;
    tracing::debug!(
        path = %path.display(),
        max_size_mb = rotation.max_size_mb,
        max_backups = rotation.max_backups,
        max_age_days = rotation.max_age_days,
        encoding = config.encoder.kind().as_str(),
        "Building logger"
    );

    let writer = RotatingWriter::new(path, rotation)?;
    Ok(Logger::new(
        config.encoder.clone(),
        writer,
        config.level.clone(),
        &config.options,
    ))
}
