//! Rotating-file structured logging with config defaults and small OS probes.
//!
//! ```no_run
//! use logkit::{build, LoggingConfig};
//!
//! let mut partial = LoggingConfig::default();
//! partial.rotation.filename = "svc.log".into();
//!
//! let logger = build(&partial.resolve()).expect("log directory");
//! logger.info("started", &[]);
//! ```

pub mod config;
pub mod logger;
pub mod rotation;
pub mod sys;

pub use config::schema::{LoggerBehavior, LoggingConfig, RotationPolicy, SamplingConfig};
pub use logger::{
    build, build_sugared, resolve, AtomicLevel, Field, Logger, LoggerError, ResolvedLogging,
    SugaredLogger,
};
pub use rotation::{RotatingWriter, RotationError};
pub use sys::{executable_dir, is_directory, local_ipv4};
