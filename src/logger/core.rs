//! The logger core: severity filter, sampling, encoding and a synchronized sink.

use std::backtrace::Backtrace;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Local;
use tracing::Level;

use crate::logger::encoder::{Caller, Encoder, Record};
use crate::logger::field::Field;
use crate::logger::level::{severity, AtomicLevel};
use crate::logger::options::LoggerOption;
use crate::logger::sampler::Sampler;

type Sink = Mutex<Box<dyn Write + Send>>;

struct Core {
    encoder: Encoder,
    sink: Sink,
    level: AtomicLevel,
    add_caller: bool,
    stacktrace_level: Option<Level>,
    sampler: Option<Sampler>,
}

/// A structured logger writing encoded entries to a synchronized sink.
///
/// Cloning is cheap; clones and children created with [`Logger::with`]
/// share the sink, level and sampling state.
#[derive(Clone)]
pub struct Logger {
    core: Arc<Core>,
    context: Arc<[Field]>,
}

impl Logger {
    /// Compose a logger from an encoder, a writer, a level and options.
    ///
    /// Options apply in order; a later sampling option replaces an earlier one.
    pub fn new<W>(encoder: Encoder, writer: W, level: AtomicLevel, options: &[LoggerOption]) -> Self
    where
        W: Write + Send + 'static,
    {
        let mut add_caller = false;
        let mut stacktrace_level = None;
        let mut sampler = None;
        let mut context = Vec::new();

        for option in options {
            match option {
                LoggerOption::AddCaller => add_caller = true,
                LoggerOption::AddStacktrace(level) => stacktrace_level = Some(*level),
                LoggerOption::Sampling { tick, config } => {
                    sampler = Some(Sampler::new(*tick, *config))
                }
                LoggerOption::Fields(fields) => context.extend(fields.iter().cloned()),
            }
        }

        Self {
            core: Arc::new(Core {
                encoder,
                sink: Mutex::new(Box::new(writer)),
                level,
                add_caller,
                stacktrace_level,
                sampler,
            }),
            context: context.into(),
        }
    }

    /// Live severity threshold.
    pub fn level(&self) -> &AtomicLevel {
        &self.core.level
    }

    pub fn enabled(&self, level: &Level) -> bool {
        self.core.level.enabled(level)
    }

    pub fn encoder(&self) -> &Encoder {
        &self.core.encoder
    }

    /// Fields attached to every entry of this logger.
    pub fn context(&self) -> &[Field] {
        &self.context
    }

    /// A child logger that adds `fields` to every entry.
    pub fn with(&self, fields: &[Field]) -> Logger {
        let mut context = self.context.to_vec();
        context.extend(fields.iter().cloned());
        Logger {
            core: Arc::clone(&self.core),
            context: context.into(),
        }
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: &str, fields: &[Field]) {
        let loc = Location::caller();
        self.write_entry(
            level,
            message,
            fields,
            Caller {
                file: loc.file(),
                line: loc.line(),
            },
        );
    }

    #[track_caller]
    pub fn trace(&self, message: &str, fields: &[Field]) {
        self.log(Level::TRACE, message, fields);
    }

    #[track_caller]
    pub fn debug(&self, message: &str, fields: &[Field]) {
        self.log(Level::DEBUG, message, fields);
    }

    #[track_caller]
    pub fn info(&self, message: &str, fields: &[Field]) {
        self.log(Level::INFO, message, fields);
    }

    #[track_caller]
    pub fn warn(&self, message: &str, fields: &[Field]) {
        self.log(Level::WARN, message, fields);
    }

    #[track_caller]
    pub fn error(&self, message: &str, fields: &[Field]) {
        self.log(Level::ERROR, message, fields);
    }

    /// Flush the underlying writer.
    pub fn sync(&self) -> io::Result<()> {
        self.core
            .sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }

    pub(crate) fn write_entry(&self, level: Level, message: &str, fields: &[Field], caller: Caller) {
        let core = &self.core;
        if !core.level.enabled(&level) {
            return;
        }
        if let Some(sampler) = &core.sampler {
            if !sampler.check(&level, message) {
                return;
            }
        }

        let stacktrace = match core.stacktrace_level {
            Some(min) if severity(&level) >= severity(&min) => {
                Some(Backtrace::force_capture().to_string())
            }
            _ => None,
        };

        let line = core.encoder.encode(&Record {
            time: Local::now().fixed_offset(),
            level,
            message,
            caller: core.add_caller.then_some(caller),
            context: &self.context,
            fields,
            stacktrace: stacktrace.as_deref(),
        });

        let result = core
            .sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write_all(line.as_bytes());
        if let Err(e) = result {
            let _ = writeln!(io::stderr(), "logkit: failed to write log entry: {e}");
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("encoding", &self.core.encoder.kind())
            .field("level", &self.core.level)
            .field("add_caller", &self.core.add_caller)
            .field("stacktrace_level", &self.core.stacktrace_level)
            .field("sampling", &self.core.sampler.is_some())
            .field("context", &self.context)
            .finish()
    }
}
