//! Record-building logger.

use std::fmt;
use std::io::{self, Write};
use serde_json::{Map, Value};

use crate::logger::error::Error;
use crate::logger::level::Level;

/// Fields every line may carry ahead of the attached pairs.
const RESERVED_FIELDS: [&str; 4] = ["level", "key", "message", "error"];

/// Prefix given to attached pairs whose key is a reserved field.
const FIELD_PREFIX: &str = "fields.";

/// The record being assembled by chained calls.
#[derive(Debug, Default)]
struct Record {
    level: Option<Level>,
    key: Option<String>,
    message: Option<String>,
    err: Option<String>,
    vals: Vec<(String, Value)>,
}

impl Record {
    fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.key.is_none()
            && self.message.is_none()
            && self.err.is_none()
            && self.vals.is_empty()
    }

    /// One JSON object: level, key, message and error first, then the
    /// attached pairs in the order they were added.
    fn to_line(&self, level: Level) -> Result<Vec<u8>, Error> {
        let mut object = Map::new();
        object.insert("level".to_string(), Value::from(level.as_str()));
        if let Some(key) = &self.key {
            object.insert("key".to_string(), Value::from(key.as_str()));
        }
        if let Some(message) = &self.message {
            object.insert("message".to_string(), Value::from(message.as_str()));
        }
        if let Some(err) = &self.err {
            object.insert("error".to_string(), Value::from(err.as_str()));
        }
        for (k, v) in &self.vals {
            let name = if RESERVED_FIELDS.contains(&k.as_str()) {
                format!("{FIELD_PREFIX}{k}")
            } else {
                k.clone()
            };
            object.insert(name, v.clone());
        }

        let mut line = serde_json::to_vec(&Value::Object(object))?;
        line.push(b'\n');
        Ok(line)
    }
}

/// A leveled logger writing one line per record to a sink.
///
/// The configuration calls ([`level`](Logger::level), [`key`](Logger::key),
/// [`msg`](Logger::msg), [`err`](Logger::err), [`val`](Logger::val)) mutate
/// the current record and return the logger for chaining. [`log`](Logger::log)
/// writes the record if its level is at or above the logger's minimum and
/// clears it either way. Records without an explicit level are `Info`.
pub struct Logger {
    min_level: Level,
    sink: Box<dyn Write + Send>,
    record: Record,
}

impl Logger {
    /// Create a logger writing records at `min_level` or above to `sink`.
    pub fn new(min_level: Level, sink: impl Write + Send + 'static) -> Self {
        Self {
            min_level,
            sink: Box::new(sink),
            record: Record::default(),
        }
    }

    /// Create a logger writing to standard error.
    pub fn stderr(min_level: Level) -> Self {
        Self::new(min_level, io::stderr())
    }

    /// The minimum level a record needs to be written.
    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Whether a record is being assembled.
    pub fn is_accumulating(&self) -> bool {
        !self.record.is_empty()
    }

    /// Set the level of the current record.
    pub fn level(&mut self, level: Level) -> &mut Self {
        self.record.level = Some(level);
        self
    }

    pub fn key(&mut self, key: impl Into<String>) -> &mut Self {
        self.record.key = Some(key.into());
        self
    }

    pub fn msg(&mut self, message: impl Into<String>) -> &mut Self {
        self.record.message = Some(message.into());
        self
    }

    /// Attach an error, recorded by its display text.
    pub fn err(&mut self, err: impl fmt::Display) -> &mut Self {
        self.record.err = Some(err.to_string());
        self
    }

    /// Attach a key/value pair. Pairs keep the order they were attached in.
    ///
    /// A pair named `level`, `key`, `message` or `error` is written as
    /// `fields.<name>` so it cannot replace the record's own field.
    pub fn val(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.record.vals.push((key.into(), value.into()));
        self
    }

    /// Write the current record and clear it.
    ///
    /// Returns whether a line was written.
    pub fn log(&mut self) -> Result<bool, Error> {
        let record = std::mem::take(&mut self.record);
        let level = record.level.unwrap_or_default();
        if level < self.min_level {
            return Ok(false);
        }

        let line = record.to_line(level)?;
        self.sink.write_all(&line)?;
        self.sink.flush()?;
        Ok(true)
    }

    pub fn debug(&mut self, message: impl Into<String>) -> Result<bool, Error> {
        self.level(Level::Debug).msg(message).log()
    }

    pub fn info(&mut self, message: impl Into<String>) -> Result<bool, Error> {
        self.level(Level::Info).msg(message).log()
    }

    pub fn warn(&mut self, message: impl Into<String>) -> Result<bool, Error> {
        self.level(Level::Warn).msg(message).log()
    }

    pub fn error(&mut self, message: impl Into<String>) -> Result<bool, Error> {
        self.level(Level::Error).msg(message).log()
    }
}

impl Default for Logger {
    /// Writes `Info` and above to standard error.
    fn default() -> Self {
        Self::stderr(Level::Info)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}
