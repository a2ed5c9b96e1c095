//! Size/age/count based log file rotation.
//!
//! # Responsibilities
//! - Write log output to a file that rotates once it reaches a size limit
//! - Name rotated backups `<stem>_<timestamp><ext>` in local time
//! - Prune backups by count and age, optionally gzip them
//!
//! # Design Decisions
//! - The file writer and count cleanup come from `flexi_logger`
//! - Backups are discovered from the directory listing, so files left by an
//!   earlier run are pruned too

pub mod backup;
pub mod writer;

pub use backup::{
    backup_naming, file_spec, list_backups, prune_older_than, Backup, BACKUP_TIME_FORMAT,
    COMPRESS_SUFFIX, DEFAULT_DIR_MODE,
};
pub use writer::{RotatingWriter, RotationError};
