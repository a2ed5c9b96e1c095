//! Loosely-typed convenience logger.

use std::fmt;
use std::panic::Location;

use tracing::Level;

use crate::logger::core::Logger;
use crate::logger::encoder::Caller;
use crate::logger::field::{Field, FieldValue};

/// Wraps a [`Logger`] with printf-style and key/value methods.
///
/// `*f` methods take `format_args!`; `*w` methods take a message plus
/// key/value pairs.
#[derive(Debug, Clone)]
pub struct SugaredLogger {
    base: Logger,
}

impl Logger {
    pub fn sugar(&self) -> SugaredLogger {
        SugaredLogger { base: self.clone() }
    }
}

macro_rules! sugared_levels {
    ($($level:expr => $plain:ident, $f:ident, $w:ident;)*) => {
        $(
            #[track_caller]
            pub fn $plain(&self, message: &str) {
                self.emit($level, message, Vec::new());
            }

            #[track_caller]
            pub fn $f(&self, args: fmt::Arguments<'_>) {
                if self.base.enabled(&$level) {
                    self.emit($level, &args.to_string(), Vec::new());
                }
            }

            #[track_caller]
            pub fn $w<K, V>(&self, message: &str, kvs: impl IntoIterator<Item = (K, V)>)
            where
                K: Into<String>,
                V: Into<FieldValue>,
            {
                if self.base.enabled(&$level) {
                    self.emit($level, message, to_fields(kvs));
                }
            }
        )*
    };
}

impl SugaredLogger {
    /// The strongly-typed logger underneath.
    pub fn desugar(&self) -> &Logger {
        &self.base
    }

    /// A child logger that adds the pairs to every entry.
    pub fn with<K, V>(&self, kvs: impl IntoIterator<Item = (K, V)>) -> SugaredLogger
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        SugaredLogger {
            base: self.base.with(&to_fields(kvs)),
        }
    }

    sugared_levels! {
        Level::DEBUG => debug, debugf, debugw;
        Level::INFO => info, infof, infow;
        Level::WARN => warn, warnf, warnw;
        Level::ERROR => error, errorf, errorw;
    }

    #[track_caller]
    fn emit(&self, level: Level, message: &str, fields: Vec<Field>) {
        let loc = Location::caller();
        self.base.write_entry(
            level,
            message,
            &fields,
            Caller {
                file: loc.file(),
                line: loc.line(),
            },
        );
    }
}

fn to_fields<K, V>(kvs: impl IntoIterator<Item = (K, V)>) -> Vec<Field>
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    kvs.into_iter().map(|(k, v)| Field::new(k, v)).collect()
}
