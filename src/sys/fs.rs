//! Directory probing.

use std::fs;
use std::io;
use std::path::Path;

/// Outcome of probing a path for a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    /// The path exists and is a directory.
    Directory,
    /// The path exists but is not a directory.
    NotDirectory,
    /// The path does not exist.
    NotFound,
    /// Stat failed for a reason other than absence (permissions, loops, ...).
    Error(io::ErrorKind),
}

/// Probe `path` and report what is there.
pub fn dir_status(path: impl AsRef<Path>) -> DirStatus {
    match fs::metadata(path.as_ref()) {
        Ok(meta) if meta.is_dir() => DirStatus::Directory,
        Ok(_) => DirStatus::NotDirectory,
        Err(e) if e.kind() == io::ErrorKind::NotFound => DirStatus::NotFound,
        Err(e) => DirStatus::Error(e.kind()),
    }
}

/// Whether `path` is an existing directory.
///
/// Fails open: a stat error other than "not found" reports `true`. Use
/// [`dir_status`] to tell the cases apart.
pub fn is_directory(path: impl AsRef<Path>) -> bool {
    match dir_status(path) {
        DirStatus::Directory | DirStatus::Error(_) => true,
        DirStatus::NotDirectory | DirStatus::NotFound => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_not_directory() {
        assert!(!is_directory("/path/that/does/not/exist"));
        assert_eq!(dir_status("/path/that/does/not/exist"), DirStatus::NotFound);
    }

    #[test]
    fn root_is_directory() {
        assert!(is_directory(std::path::MAIN_SEPARATOR_STR));
    }

    #[test]
    fn regular_file_is_not_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(!is_directory(file.path()));
        assert_eq!(dir_status(file.path()), DirStatus::NotDirectory);
    }

    #[cfg(unix)]
    #[test]
    fn stat_error_other_than_not_found_fails_open() {
        // A regular file used as a directory component yields ENOTDIR.
        let file = tempfile::NamedTempFile::new().unwrap();
        let through_file = file.path().join("child");

        assert!(matches!(dir_status(&through_file), DirStatus::Error(_)));
        assert!(is_directory(&through_file));
    }

    #[cfg(unix)]
    #[test]
    fn permission_denied_fails_open() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::create_dir(locked.join("inner")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let status = dir_status(locked.join("inner"));
        let reported = is_directory(locked.join("inner"));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Privileged users bypass the mode bits and see the directory itself.
        match status {
            DirStatus::Error(kind) => assert_eq!(kind, io::ErrorKind::PermissionDenied),
            other => assert_eq!(other, DirStatus::Directory),
        }
        assert!(reported);
    }
}
