//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or LoggingConfig built in code
//!     → loader.rs (parse & deserialize)
//!     → LoggingConfig (partial; zero values mean "default")
//!     → logger::builder::resolve + defaults.rs
//!     → ResolvedLogging (fully populated)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → new level stored into the live AtomicLevel
//! ```
//!
//! # Design Decisions
//! - Rotation policy and logger behaviour are separate values
//! - All fields have zero-value defaults to allow minimal configs
//! - Only the level is live; every other change needs a new logger

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod watcher;

pub use defaults::{defaults, LogDefaults};
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{FieldMap, LoggerBehavior, LoggingConfig, RotationPolicy, SamplingConfig};
pub use watcher::{apply_level_reload, LevelWatcher};
