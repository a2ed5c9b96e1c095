//! Backup naming, discovery and age-based cleanup.
//!
//! # Responsibilities
//! - Describe a log path as a `flexi_logger` file spec
//! - Find rotated backups of a log file and order them newest first
//! - Remove backups older than the age limit
//!
//! # Design Decisions
//! - Count limits and compression belong to `flexi_logger`'s cleanup; only
//!   the age limit, which it cannot express, is applied here
//! - Backup age is the file's modification time, i.e. its last write

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use flexi_logger::{FileSpec, Naming};

/// Timestamp layout embedded in backup names: `<stem>_<timestamp><ext>`.
pub const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";

/// Suffix of compressed backups.
pub const COMPRESS_SUFFIX: &str = ".gz";

/// Mode for created log directories.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Rotation naming: the active file keeps its plain name, backups get a
/// timestamp infix. Rotations within the same millisecond get a restart
/// counter appended instead of overwriting each other.
pub fn backup_naming() -> Naming {
    Naming::TimestampsCustomFormat {
        current_infix: Some(""),
        format: BACKUP_TIME_FORMAT,
    }
}

/// File spec writing exactly to `path`.
pub fn file_spec(path: &Path) -> FileSpec {
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let basename = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = path.extension().map(|e| e.to_string_lossy().into_owned());

    FileSpec::default()
        .directory(directory)
        .basename(basename)
        .o_suffix(suffix)
        .suppress_timestamp()
}

/// A rotated-out log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    pub path: PathBuf,
    pub modified: SystemTime,
    pub compressed: bool,
}

/// Backups of `path`, newest first.
pub fn list_backups(path: &Path) -> io::Result<Vec<Backup>> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let Some(current) = path.file_name() else {
        return Ok(Vec::new());
    };
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let prefix = format!("{stem}_");

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut backups = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        if name == current {
            continue;
        }
        let name = name.to_string_lossy();
        if !name.starts_with(&prefix) {
            continue;
        }
        let meta = entry.metadata()?;
        if !meta.is_file() {
            continue;
        }
        backups.push(Backup {
            path: entry.path(),
            modified: meta.modified()?,
            compressed: name.ends_with(COMPRESS_SUFFIX),
        });
    }

    backups.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(backups)
}

/// Delete backups of `path` last written more than `max_age_days` before `now`.
///
/// `max_age_days == 0` keeps everything. Returns the number of removed files.
pub fn prune_older_than(path: &Path, max_age_days: u64, now: SystemTime) -> io::Result<usize> {
    if max_age_days == 0 {
        return Ok(0);
    }
    let max_age = Duration::from_secs(max_age_days.saturating_mul(SECONDS_PER_DAY));
    let Some(cutoff) = now.checked_sub(max_age) else {
        return Ok(0);
    };

    let mut removed = 0;
    for backup in list_backups(path)? {
        if backup.modified < cutoff {
            fs::remove_file(&backup.path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path, age: Duration) {
        fs::write(path, "x").unwrap();
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
    }

    #[test]
    fn lists_only_backups_of_this_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "current").unwrap();
        touch(&dir.path().join("app_2026-01-01T00-00-00.000.log"), Duration::from_secs(60));
        touch(&dir.path().join("app_2026-01-02T00-00-00.000.log.gz"), Duration::from_secs(30));
        touch(&dir.path().join("other.log"), Duration::ZERO);

        let backups = list_backups(&path).unwrap();
        assert_eq!(backups.len(), 2);
        assert!(backups[0].compressed);
        assert!(backups[0].path.ends_with("app_2026-01-02T00-00-00.000.log.gz"));
        assert!(!backups[1].compressed);
    }

    #[test]
    fn missing_directory_has_no_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope/app.log");
        assert!(list_backups(&path).unwrap().is_empty());
    }

    #[test]
    fn prunes_backups_past_max_age() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let old = dir.path().join("app_old.log");
        let fresh = dir.path().join("app_fresh.log");
        touch(&old, Duration::from_secs(3 * SECONDS_PER_DAY));
        touch(&fresh, Duration::from_secs(60));

        let removed = prune_older_than(&path, 2, SystemTime::now()).unwrap();
        assert_eq!(removed, 1);
        assert!(!old.exists());
        assert!(fresh.exists());
    }

    #[test]
    fn zero_age_keeps_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let old = dir.path().join("app_old.log");
        touch(&old, Duration::from_secs(30 * SECONDS_PER_DAY));

        assert_eq!(prune_older_than(&path, 0, SystemTime::now()).unwrap(), 0);
        assert!(old.exists());
    }
}
