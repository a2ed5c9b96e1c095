//! Bridge from `tracing` events into a [`Logger`].

use std::fmt;

use serde_json::Value;
use tracing::field::{Field as TracingField, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::logger::core::Logger;
use crate::logger::encoder::Caller;
use crate::logger::error::LoggerError;
use crate::logger::field::Field;

/// A `tracing_subscriber` layer that writes every event through a [`Logger`].
///
/// The logger's level and sampling apply; the event's `message` becomes the
/// entry message and its other fields become entry fields.
#[derive(Debug, Clone)]
pub struct LoggerLayer {
    logger: Logger,
}

impl LoggerLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl Logger {
    /// A `tracing` layer feeding this logger.
    pub fn layer(&self) -> LoggerLayer {
        LoggerLayer::new(self.clone())
    }

    /// Install this logger as the global `tracing` subscriber.
    pub fn install(&self) -> Result<(), LoggerError> {
        tracing_subscriber::registry().with(self.layer()).try_init()?;
        Ok(())
    }
}

impl<S: Subscriber> Layer<S> for LoggerLayer {
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        // The level can change at runtime, so never cache a verdict.
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.logger.enabled(metadata.level())
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let caller = Caller {
            file: meta.file().unwrap_or_else(|| meta.target()),
            line: meta.line().unwrap_or(0),
        };
        self.logger
            .write_entry(*meta.level(), &visitor.message, &visitor.fields, caller);
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<Field>,
}

impl EventVisitor {
    fn push(&mut self, field: &TracingField, value: Value) {
        if field.name() == "message" {
            self.message = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
        } else {
            self.fields.push(Field::new(field.name(), value));
        }
    }
}

impl Visit for EventVisitor {
    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.push(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.push(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.push(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.push(field, Value::from(value));
    }

    fn record_str(&mut self, field: &TracingField, value: &str) {
        self.push(field, Value::from(value));
    }

    fn record_error(&mut self, field: &TracingField, value: &(dyn std::error::Error + 'static)) {
        self.push(field, Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
        self.push(field, Value::String(format!("{value:?}")));
    }
}
