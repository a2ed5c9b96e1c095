//! Merge a partial configuration with the defaults.
//!
//! # Responsibilities
//! - Fill every zero/empty field from `config::defaults`
//! - Pick the encoder class from the encoding name
//! - Assemble the ordered option list: caller, stacktrace, sampling, fields
//!
//! # Design Decisions
//! - Resolution never fails and performs no I/O
//! - The fields option is always last so it sees the resolved field set

use crate::config::defaults::{defaults, LogDefaults};
use crate::config::schema::{FieldMap, LoggerBehavior, LoggingConfig, RotationPolicy};
use crate::logger::encoder::{Encoder, Encoding};
use crate::logger::field::Field;
use crate::logger::level::AtomicLevel;
use crate::logger::options::LoggerOption;

/// A fully populated logging configuration, ready for the factory.
#[derive(Debug, Clone)]
pub struct ResolvedLogging {
    /// Output file and rotation thresholds, every threshold non-zero.
    pub rotation: RotationPolicy,
    /// Behaviour flags as merged; `level` is always set.
    pub behavior: LoggerBehavior,
    /// Live severity threshold.
    pub level: AtomicLevel,
    /// Encoder selected from `behavior.encoding`.
    pub encoder: Encoder,
    /// Fields injected into every entry; never empty.
    pub fields: FieldMap,
    /// Construction options in application order.
    pub options: Vec<LoggerOption>,
}

impl LoggingConfig {
    /// Resolve against fresh defaults.
    pub fn resolve(self) -> ResolvedLogging {
        resolve(self)
    }
}

/// Resolve `partial` against fresh defaults.
pub fn resolve(partial: LoggingConfig) -> ResolvedLogging {
    resolve_with(partial, &defaults())
}

/// Resolve `partial` against the given defaults.
pub fn resolve_with(partial: LoggingConfig, d: &LogDefaults) -> ResolvedLogging {
    let LoggingConfig { rotation, behavior } = partial;

    let rotation = RotationPolicy {
        filename: if rotation.filename.is_empty() {
            d.filename.clone()
        } else {
            rotation.filename
        },
        max_size_mb: non_zero_or(rotation.max_size_mb, d.max_size_mb),
        max_age_days: non_zero_or(rotation.max_age_days, d.max_age_days),
        max_backups: if rotation.max_backups != 0 {
            rotation.max_backups
        } else {
            d.max_backups
        },
        compress: rotation.compress,
    };

    let level = behavior
        .level
        .clone()
        .unwrap_or_else(|| AtomicLevel::new(d.level));

    let mut options = Vec::new();
    if !behavior.disable_caller {
        options.push(LoggerOption::AddCaller);
    }
    if !behavior.disable_stacktrace {
        options.push(LoggerOption::AddStacktrace(d.stacktrace_level));
    }
    if let Some(config) = behavior.sampling {
        options.push(LoggerOption::Sampling {
            tick: d.sampling_tick,
            config,
        });
    }

    let encoder = Encoder::new(Encoding::from_name(&behavior.encoding), d.encoder.clone());

    let fields = if behavior.initial_fields.is_empty() {
        d.initial_fields()
    } else {
        behavior.initial_fields.clone()
    };
    options.push(LoggerOption::Fields(
        fields
            .iter()
            .map(|(k, v)| Field::new(k.clone(), v.clone()))
            .collect(),
    ));

    ResolvedLogging {
        rotation,
        behavior: LoggerBehavior {
            level: Some(level.clone()),
            initial_fields: fields.clone(),
            ..behavior
        },
        level,
        encoder,
        fields,
        options,
    }
}

fn non_zero_or(value: u64, default: u64) -> u64 {
    if value != 0 {
        value
    } else {
        default
    }
}
