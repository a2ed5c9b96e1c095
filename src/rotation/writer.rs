//! Size/age/count bounded log file writer.
//!
//! # Responsibilities
//! - Write log output to a file that rotates once it reaches a size limit
//! - Keep at most `max_backups` rotated files, gzipped when asked
//! - Drop backups older than `max_age_days`
//!
//! # Design Decisions
//! - Rotation, naming and count cleanup run in `flexi_logger`'s
//!   `FileLogWriter`, in the writing thread so limits hold once a write returns
//! - Each entry is one write, so an entry never straddles two files
//! - No logging from here: this writer can be the sink of the global subscriber

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use flexi_logger::writers::{FileLogWriter, LogWriter};
use flexi_logger::{Cleanup, Criterion, FlexiLoggerError, WriteMode};
use thiserror::Error;

use crate::config::schema::RotationPolicy;
use crate::rotation::backup::{self, DEFAULT_DIR_MODE};

const MEGABYTE: u64 = 1024 * 1024;

/// Errors raised while setting up a rotating writer.
#[derive(Debug, Error)]
pub enum RotationError {
    /// The log directory could not be created.
    #[error("cannot create log directory {path:?}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file writer rejected its configuration.
    #[error("cannot set up log file writer: {0}")]
    Writer(#[from] FlexiLoggerError),
}

/// A writer that rotates its file by size and prunes old backups.
pub struct RotatingWriter {
    path: PathBuf,
    max_bytes: u64,
    max_age_days: u64,
    since_prune: u64,
    inner: FileLogWriter,
}

impl RotatingWriter {
    /// Writer for `path` using the thresholds in `policy`.
    ///
    /// `policy.filename` is ignored; `path` is where output goes.
    pub fn new(path: impl Into<PathBuf>, policy: &RotationPolicy) -> Result<Self, RotationError> {
        let max_bytes = policy.max_size_mb.saturating_mul(MEGABYTE);
        Self::with_max_bytes(path, policy, max_bytes)
    }

    /// Like [`RotatingWriter::new`] with the size limit given in bytes.
    pub fn with_max_bytes(
        path: impl Into<PathBuf>,
        policy: &RotationPolicy,
        max_bytes: u64,
    ) -> Result<Self, RotationError> {
        let path = path.into();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            create_log_dir(dir).map_err(|source| RotationError::Directory {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let cleanup = match (policy.max_backups, policy.compress) {
            (0, _) => Cleanup::Never,
            (n, false) => Cleanup::KeepLogFiles(n),
            (n, true) => Cleanup::KeepCompressedFiles(n),
        };

        let inner = FileLogWriter::builder(backup::file_spec(&path))
            .rotate(Criterion::Size(max_bytes), backup::backup_naming(), cleanup)
            .cleanup_in_background_thread(false)
            .write_mode(WriteMode::Direct)
            .append()
            .try_build()?;

        let writer = Self {
            path,
            max_bytes,
            max_age_days: policy.max_age_days,
            since_prune: 0,
            inner,
        };
        writer.prune();
        Ok(writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    fn prune(&self) {
        // Best effort; a failed cleanup never fails a write.
        let _ = backup::prune_older_than(&self.path, self.max_age_days, SystemTime::now());
    }
}

impl Write for RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len() as u64;
        if len > self.max_bytes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "write length {} exceeds maximum file size {}",
                    len, self.max_bytes
                ),
            ));
        }

        let n = self.inner.plain_write(buf)?;

        // At most one age pass per file's worth of output.
        self.since_prune += n as u64;
        if self.since_prune >= self.max_bytes {
            self.since_prune = 0;
            self.prune();
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        LogWriter::flush(&self.inner)
    }
}

impl std::fmt::Debug for RotatingWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("max_age_days", &self.max_age_days)
            .finish()
    }
}

#[cfg(unix)]
fn create_log_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(DEFAULT_DIR_MODE)
        .create(dir)
}

#[cfg(not(unix))]
fn create_log_dir(dir: &Path) -> io::Result<()> {
    let _ = DEFAULT_DIR_MODE;
    fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::backup::list_backups;

    fn policy(max_backups: usize) -> RotationPolicy {
        RotationPolicy {
            filename: String::new(),
            max_size_mb: 1,
            max_age_days: 0,
            max_backups,
            compress: false,
        }
    }

    /// Current file followed by every backup, oldest first.
    fn all_lines(path: &Path) -> Vec<String> {
        let mut files: Vec<PathBuf> = list_backups(path)
            .unwrap()
            .into_iter()
            .rev()
            .map(|b| b.path)
            .collect();
        files.push(path.to_path_buf());

        let mut lines: Vec<String> = files
            .iter()
            .flat_map(|f| {
                fs::read_to_string(f)
                    .unwrap()
                    .lines()
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .collect();
        lines.sort();
        lines
    }

    #[test]
    fn writes_to_the_exact_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/logs/app.log");
        let mut writer = RotatingWriter::new(&path, &policy(3)).unwrap();

        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(list_backups(&path).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn log_directory_gets_default_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/app.log");
        RotatingWriter::new(&path, &policy(3)).unwrap();

        let mode = fs::metadata(path.parent().unwrap()).unwrap().permissions().mode() & 0o777;
        // umask can only clear bits
        assert_eq!(mode & !0o755, 0);
    }

    #[test]
    fn appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "earlier\n").unwrap();

        let mut writer = RotatingWriter::new(&path, &policy(3)).unwrap();
        writer.write_all(b"later\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "earlier\nlater\n");
    }

    #[test]
    fn rotates_once_the_size_limit_is_reached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = RotatingWriter::with_max_bytes(&path, &policy(3), 10).unwrap();

        writer.write_all(b"aaaaaaaa\n").unwrap();
        writer.write_all(b"bbbbbbbb\n").unwrap();
        writer.write_all(b"cccccccc\n").unwrap();
        writer.flush().unwrap();

        assert!(!list_backups(&path).unwrap().is_empty());
        assert_ne!(fs::read_to_string(&path).unwrap().lines().count(), 3);
        assert_eq!(all_lines(&path), ["aaaaaaaa", "bbbbbbbb", "cccccccc"]);
    }

    #[test]
    fn oversized_write_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = RotatingWriter::with_max_bytes(&path, &policy(3), 4).unwrap();

        let err = writer.write(b"too long").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn back_to_back_rotations_keep_every_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = RotatingWriter::with_max_bytes(&path, &policy(0), 8).unwrap();

        // Many rotations land in the same millisecond.
        for i in 0..50 {
            writer.write_all(format!("line{i:02}\n").as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        let expected: Vec<String> = (0..50).map(|i| format!("line{i:02}")).collect();
        assert_eq!(all_lines(&path), expected);
        assert!(list_backups(&path).unwrap().len() >= 10);
    }

    #[test]
    fn backup_count_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = RotatingWriter::with_max_bytes(&path, &policy(2), 8).unwrap();

        for i in 0..20 {
            writer.write_all(format!("line{i:02}\n").as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(list_backups(&path).unwrap().len(), 2);
        assert!(fs::read_to_string(&path).unwrap().contains("line19"));
    }
}
