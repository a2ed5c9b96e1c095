//! Default logging settings.
//!
//! Defaults are built fresh by [`defaults`] on every call; nothing here is
//! shared or mutable.

use std::time::Duration;

use tracing::Level;

use crate::config::schema::FieldMap;
use crate::logger::encoder::{EncoderConfig, Encoding};
use crate::sys::process::program_name;

/// Field injected when the caller supplies no initial fields.
pub const DEFAULT_FIELD_KEY: &str = "app";

/// Fully populated defaults used to fill a partial configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDefaults {
    pub filename: String,
    pub max_size_mb: u64,
    pub max_age_days: u64,
    pub max_backups: usize,
    pub compress: bool,
    pub level: Level,
    pub encoding: Encoding,
    pub encoder: EncoderConfig,
    pub stacktrace_level: Level,
    pub sampling_tick: Duration,
}

impl LogDefaults {
    /// `{"app": <program name>}`.
    pub fn initial_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(DEFAULT_FIELD_KEY.to_string(), program_name().into());
        fields
    }
}

/// Build the default settings.
pub fn defaults() -> LogDefaults {
    LogDefaults {
        filename: "default.log".to_string(),
        max_size_mb: 1024,
        max_age_days: 7,
        max_backups: 3,
        compress: false,
        level: Level::DEBUG,
        encoding: Encoding::Json,
        encoder: EncoderConfig::production(),
        stacktrace_level: Level::ERROR,
        sampling_tick: Duration::from_secs(1),
    }
}
