//! Record encoders.
//!
//! # Responsibilities
//! - Select the encoder class (json or console) from an encoding name
//! - Render one record per line with the shared key/format settings
//!
//! # Design Decisions
//! - Both encoder classes share one `EncoderConfig`; they differ only in layout
//! - Field order is stable: header keys, context fields, call-site fields, stacktrace

use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use tracing::Level;

use crate::logger::field::{Field, FieldValue};

/// Encoder class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Console,
}

impl Encoding {
    /// Map an encoding name to a class. Only `"console"` selects the console
    /// encoder; every other value, including the empty string, means json.
    pub fn from_name(name: &str) -> Self {
        match name {
            "console" => Encoding::Console,
            _ => Encoding::Json,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Json => "json",
            Encoding::Console => "console",
        }
    }
}

/// Record keys shared by both encoder classes.
///
/// Values always render the same way: ISO-8601 timestamps with millis and
/// offset, capitalized levels, durations as strings, short callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    pub caller_key: String,
    pub message_key: String,
    pub stacktrace_key: String,
}

impl EncoderConfig {
    /// `level`, `timestamp`, `caller`, `msg` and `stacktrace`.
    pub fn production() -> Self {
        Self {
            time_key: "timestamp".to_string(),
            level_key: "level".to_string(),
            caller_key: "caller".to_string(),
            message_key: "msg".to_string(),
            stacktrace_key: "stacktrace".to_string(),
        }
    }

    fn time(&self, time: &DateTime<FixedOffset>) -> String {
        time.format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string()
    }

    fn level(&self, level: &Level) -> String {
        level.as_str().to_string()
    }

    fn caller(&self, caller: &Caller) -> String {
        format!("{}:{}", short_path(caller.file), caller.line)
    }

    fn duration(&self, d: &Duration) -> Value {
        Value::String(format!("{d:?}"))
    }

    fn field_value(&self, value: &FieldValue) -> Value {
        match value {
            FieldValue::Json(v) => v.clone(),
            FieldValue::Duration(d) => self.duration(d),
        }
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::production()
    }
}

/// Source location of a log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub file: &'static str,
    pub line: u32,
}

/// Everything an encoder needs to render one line.
#[derive(Debug)]
pub struct Record<'a> {
    pub time: DateTime<FixedOffset>,
    pub level: Level,
    pub message: &'a str,
    pub caller: Option<Caller>,
    pub context: &'a [Field],
    pub fields: &'a [Field],
    pub stacktrace: Option<&'a str>,
}

/// A configured encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoder {
    Json(EncoderConfig),
    Console(EncoderConfig),
}

impl Encoder {
    pub fn new(encoding: Encoding, config: EncoderConfig) -> Self {
        match encoding {
            Encoding::Json => Encoder::Json(config),
            Encoding::Console => Encoder::Console(config),
        }
    }

    pub fn kind(&self) -> Encoding {
        match self {
            Encoder::Json(_) => Encoding::Json,
            Encoder::Console(_) => Encoding::Console,
        }
    }

    pub fn config(&self) -> &EncoderConfig {
        match self {
            Encoder::Json(c) | Encoder::Console(c) => c,
        }
    }

    /// Render `record` as a single newline-terminated entry.
    pub fn encode(&self, record: &Record<'_>) -> String {
        match self {
            Encoder::Json(cfg) => encode_json(cfg, record),
            Encoder::Console(cfg) => encode_console(cfg, record),
        }
    }
}

fn encode_json(cfg: &EncoderConfig, record: &Record<'_>) -> String {
    let mut obj = JsonObject::new();
    obj.push(&cfg.level_key, &Value::String(cfg.level(&record.level)));
    obj.push(&cfg.time_key, &Value::String(cfg.time(&record.time)));
    if let Some(caller) = &record.caller {
        obj.push(&cfg.caller_key, &Value::String(cfg.caller(caller)));
    }
    obj.push(&cfg.message_key, &Value::String(record.message.to_string()));
    for field in record.context.iter().chain(record.fields) {
        obj.push(&field.key, &cfg.field_value(&field.value));
    }
    if let Some(stack) = record.stacktrace {
        obj.push(&cfg.stacktrace_key, &Value::String(stack.to_string()));
    }

    let mut line = obj.finish();
    line.push('\n');
    line
}

fn encode_console(cfg: &EncoderConfig, record: &Record<'_>) -> String {
    let mut line = String::new();
    line.push_str(&cfg.time(&record.time));
    line.push('\t');
    line.push_str(&cfg.level(&record.level));
    if let Some(caller) = &record.caller {
        line.push('\t');
        line.push_str(&cfg.caller(caller));
    }
    line.push('\t');
    line.push_str(record.message);

    if !record.context.is_empty() || !record.fields.is_empty() {
        let mut obj = JsonObject::new();
        for field in record.context.iter().chain(record.fields) {
            obj.push(&field.key, &cfg.field_value(&field.value));
        }
        line.push('\t');
        line.push_str(&obj.finish());
    }
    line.push('\n');

    if let Some(stack) = record.stacktrace {
        line.push_str(stack);
        if !stack.ends_with('\n') {
            line.push('\n');
        }
    }
    line
}

/// Ordered JSON object writer; keys keep insertion order.
struct JsonObject {
    buf: String,
    empty: bool,
}

impl JsonObject {
    fn new() -> Self {
        Self {
            buf: String::from("{"),
            empty: true,
        }
    }

    fn push(&mut self, key: &str, value: &Value) {
        if !self.empty {
            self.buf.push(',');
        }
        self.empty = false;
        // Writing to a String cannot fail.
        let _ = write!(self.buf, "{}:{}", Value::String(key.to_string()), value);
    }

    fn finish(mut self) -> String {
        self.buf.push('}');
        self.buf
    }
}

fn short_path(file: &str) -> &str {
    let mut seps = file.rmatch_indices(['/', '\\']);
    match (seps.next(), seps.next()) {
        (Some(_), Some((idx, _))) => &file[idx + 1..],
        _ => file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_fixed_time() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, 9, 30, 0)
            .unwrap()
    }

    fn record<'a>(context: &'a [Field], fields: &'a [Field]) -> Record<'a> {
        Record {
            time: at_fixed_time(),
            level: Level::INFO,
            message: "started",
            caller: Some(Caller {
                file: "src/logger/core.rs",
                line: 42,
            }),
            context,
            fields,
            stacktrace: None,
        }
    }

    #[test]
    fn only_console_selects_console() {
        assert_eq!(Encoding::from_name("console"), Encoding::Console);
        for name in ["", "json", "xml", "Console"] {
            assert_eq!(Encoding::from_name(name), Encoding::Json);
        }
    }

    #[test]
    fn json_line_has_header_then_fields() {
        let encoder = Encoder::new(Encoding::Json, EncoderConfig::production());
        let context = [Field::new("app", "svc")];
        let fields = [Field::new("port", 8080u32)];

        let line = encoder.encode(&record(&context, &fields));

        assert_eq!(
            line,
            "{\"level\":\"INFO\",\"timestamp\":\"2026-10-16T09:30:00.000+0200\",\
             \"caller\":\"logger/core.rs:42\",\"msg\":\"started\",\"app\":\"svc\",\"port\":8080}\n"
        );
    }

    #[test]
    fn console_line_is_tab_separated() {
        let encoder = Encoder::new(Encoding::Console, EncoderConfig::production());
        let context = [Field::new("app", "svc")];

        let line = encoder.encode(&record(&context, &[]));

        assert_eq!(
            line,
            "2026-10-16T09:30:00.000+0200\tINFO\tlogger/core.rs:42\tstarted\t{\"app\":\"svc\"}\n"
        );
    }

    #[test]
    fn durations_render_as_strings() {
        let encoder = Encoder::new(Encoding::Json, EncoderConfig::production());
        let fields = [Field::duration("elapsed", Duration::from_millis(1500))];

        let line = encoder.encode(&record(&[], &fields));
        let parsed: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["elapsed"], "1.5s");
    }

    #[test]
    fn stacktrace_goes_last() {
        let encoder = Encoder::new(Encoding::Json, EncoderConfig::production());
        let mut rec = record(&[], &[]);
        rec.level = Level::ERROR;
        rec.stacktrace = Some("frame 0");

        let line = encoder.encode(&rec);

        assert!(line.ends_with("\"stacktrace\":\"frame 0\"}\n"));
        assert!(line.contains("\"level\":\"ERROR\""));
    }

    #[test]
    fn renamed_keys_keep_value_formats() {
        let config = EncoderConfig {
            time_key: "ts".to_string(),
            level_key: "severity".to_string(),
            ..EncoderConfig::production()
        };
        let encoder = Encoder::new(Encoding::Json, config);

        let line = encoder.encode(&record(&[], &[]));
        let parsed: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["ts"], "2026-10-16T09:30:00.000+0200");
        assert_eq!(parsed["caller"], "logger/core.rs:42");
        assert!(parsed.get("timestamp").is_none());
    }

    #[test]
    fn short_caller_keeps_last_directory() {
        assert_eq!(short_path("/home/u/proj/src/main.rs"), "src/main.rs");
        assert_eq!(short_path("main.rs"), "main.rs");
        assert_eq!(short_path("src/main.rs"), "src/main.rs");
    }
}
