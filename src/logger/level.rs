//! Runtime-adjustable severity threshold.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tracing::Level;

/// A level name that is not one of the five known severities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid log level: {0:?} (use trace, debug, info, warn or error)")]
pub struct ParseLevelError(pub String);

/// A severity threshold shared between a logger and its owners.
///
/// Clones share the same underlying value, so raising or lowering the level
/// through any handle takes effect for every logger built from it.
#[derive(Clone)]
pub struct AtomicLevel {
    inner: Arc<AtomicU8>,
}

impl AtomicLevel {
    /// Create a new handle starting at `level`.
    pub fn new(level: Level) -> Self {
        Self {
            inner: Arc::new(AtomicU8::new(severity(&level))),
        }
    }

    /// Current threshold.
    pub fn level(&self) -> Level {
        from_severity(self.inner.load(Ordering::Relaxed))
    }

    /// Change the threshold for every clone of this handle.
    pub fn set_level(&self, level: Level) {
        self.inner.store(severity(&level), Ordering::Relaxed);
    }

    /// Whether a record at `level` passes the threshold.
    pub fn enabled(&self, level: &Level) -> bool {
        severity(level) >= self.inner.load(Ordering::Relaxed)
    }

    /// Whether both handles point at the same shared threshold.
    pub fn same_handle(&self, other: &AtomicLevel) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for AtomicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicLevel").field(&self.level()).finish()
    }
}

impl From<Level> for AtomicLevel {
    fn from(level: Level) -> Self {
        Self::new(level)
    }
}

impl Serialize for AtomicLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.level().as_str().to_ascii_lowercase())
    }
}

impl<'de> Deserialize<'de> for AtomicLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        parse_level(&name)
            .map(AtomicLevel::new)
            .map_err(serde::de::Error::custom)
    }
}

/// Parse a level name (`trace`, `debug`, `info`, `warn`, `error`), case-insensitive.
pub fn parse_level(name: &str) -> Result<Level, ParseLevelError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(ParseLevelError(name.to_string())),
    }
}

/// Severity rank: higher is more important.
pub(crate) fn severity(level: &Level) -> u8 {
    match *level {
        Level::TRACE => 0,
        Level::DEBUG => 1,
        Level::INFO => 2,
        Level::WARN => 3,
        Level::ERROR => 4,
    }
}

fn from_severity(rank: u8) -> Level {
    match rank {
        0 => Level::TRACE,
        1 => Level::DEBUG,
        2 => Level::INFO,
        3 => Level::WARN,
        _ => Level::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_filters_lower_severities() {
        let level = AtomicLevel::new(Level::INFO);
        assert!(!level.enabled(&Level::DEBUG));
        assert!(level.enabled(&Level::INFO));
        assert!(level.enabled(&Level::ERROR));
    }

    #[test]
    fn clones_share_updates() {
        let level = AtomicLevel::new(Level::DEBUG);
        let handle = level.clone();
        handle.set_level(Level::WARN);

        assert_eq!(level.level(), Level::WARN);
        assert!(level.same_handle(&handle));
        assert!(!level.same_handle(&AtomicLevel::new(Level::WARN)));
    }

    #[test]
    fn parse_accepts_any_case_and_warning_alias() {
        assert_eq!(parse_level("DEBUG").unwrap(), Level::DEBUG);
        assert_eq!(parse_level(" info ").unwrap(), Level::INFO);
        assert_eq!(parse_level("warning").unwrap(), Level::WARN);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn serializes_as_lowercase_name() {
        let json = serde_json::to_string(&AtomicLevel::new(Level::ERROR)).unwrap();
        assert_eq!(json, "\"error\"");

        let back: AtomicLevel = serde_json::from_str("\"Warn\"").unwrap();
        assert_eq!(back.level(), Level::WARN);
    }
}
