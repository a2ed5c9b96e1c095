//! Behaviour toggles applied when a logger is constructed.

use std::time::Duration;

use tracing::Level;

use crate::config::schema::SamplingConfig;
use crate::logger::field::Field;

/// One construction-time option. Options apply in order.
#[derive(Debug, Clone, PartialEq)]
pub enum LoggerOption {
    /// Record the call site (`caller` key) on every entry.
    AddCaller,
    /// Capture a stack trace for entries at or above the given level.
    AddStacktrace(Level),
    /// Throttle repeated entries per `tick` window.
    Sampling { tick: Duration, config: SamplingConfig },
    /// Inject these fields into every entry.
    Fields(Vec<Field>),
}
