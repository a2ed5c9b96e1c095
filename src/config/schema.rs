//! Configuration schema definitions.
//!
//! This module defines the partial logging configuration a caller supplies.
//! All types derive Serde traits for deserialization from config files, and
//! every field defaults to its zero value, which means "use the default"
//! when the configuration is resolved.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logger::level::AtomicLevel;

/// Initial fields injected into every record, keyed by field name.
pub type FieldMap = BTreeMap<String, Value>;

/// Root logging configuration.
///
/// Rotation of the output file and behaviour of the logger are kept as two
/// separate values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output file and rotation thresholds.
    pub rotation: RotationPolicy,

    /// Level, encoding, fields and behaviour toggles.
    pub behavior: LoggerBehavior,
}

/// Where log output goes and when it rotates.
///
/// Backup names always carry local time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RotationPolicy {
    /// Log file name. Relative names live under `<exec-dir>/../logs/`.
    pub filename: String,

    /// Size in megabytes that triggers rotation.
    pub max_size_mb: u64,

    /// Days a rotated backup is kept.
    pub max_age_days: u64,

    /// Number of rotated backups kept.
    pub max_backups: usize,

    /// Gzip rotated backups.
    pub compress: bool,
}

/// Logger behaviour independent of the output file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerBehavior {
    /// Severity threshold. `None` means the default.
    pub level: Option<AtomicLevel>,

    /// Turn off call-site capture.
    pub disable_caller: bool,

    /// Turn off stack traces on error entries.
    pub disable_stacktrace: bool,

    /// Optional per-second sampling.
    pub sampling: Option<SamplingConfig>,

    /// `"console"` for human-readable lines; anything else is json.
    pub encoding: String,

    /// Fields injected into every entry. Empty means `{"app": <program>}`.
    pub initial_fields: FieldMap,
}

/// Sampling counts applied per one-second window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SamplingConfig {
    /// Entries let through per window before thinning starts.
    pub initial: u64,

    /// After `initial`, every `thereafter`-th entry is let through.
    pub thereafter: u64,
}
