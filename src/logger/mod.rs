//! Structured logging.
//!
//! # Data Flow
//! ```text
//! LoggingConfig (partial) ──resolve──▶ ResolvedLogging ──build──▶ Logger
//!                                                                 │
//!                      tracing events ──LoggerLayer──────────────▶│
//!                                                                 ▼
//!                                         Encoder ──▶ RotatingWriter
//! ```
//!
//! # Design Decisions
//! - The level is a shared atomic handle so it can be changed at runtime
//! - Options are data (`LoggerOption`) applied in order by `Logger::new`
//! - Typed fields on `Logger`, loose key/value pairs on `SugaredLogger`

pub mod builder;
pub mod core;
pub mod encoder;
pub mod error;
pub mod factory;
pub mod field;
pub mod layer;
pub mod level;
pub mod options;
pub mod sampler;
pub mod sugar;

pub use builder::{resolve, resolve_with, ResolvedLogging};
pub use self::core::Logger;
pub use encoder::{Encoder, EncoderConfig, Encoding};
pub use error::LoggerError;
pub use factory::{build, build_sugared, log_path_under, resolve_log_path};
pub use field::{Field, FieldValue};
pub use layer::LoggerLayer;
pub use level::{parse_level, AtomicLevel, ParseLevelError};
pub use options::LoggerOption;
pub use sampler::Sampler;
pub use sugar::SugaredLogger;
