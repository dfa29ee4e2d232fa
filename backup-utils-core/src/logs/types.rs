use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured payload decoded from the JSON tail of a log line.
///
/// The payload is schemaless: callers reach into it with dotted paths
/// (`metadata.memory_usage`) and get `None` for anything that is missing or
/// of the wrong shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(Map<String, Value>);

impl Context {
    /// Walk a dotted path through nested objects.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?)?;

        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }

        Some(current)
    }

    pub fn str_at(&self, path: &str) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str)
    }

    pub fn f64_at(&self, path: &str) -> Option<f64> {
        self.lookup(path).and_then(Value::as_f64)
    }
}

impl From<Map<String, Value>> for Context {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One parsed log line.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: NaiveDateTime,
    pub level: String,
    pub message: String,
    pub context: Context,
}

impl LogRecord {
    pub fn backup_event(&self) -> Option<&str> {
        self.context.str_at("backup_event")
    }

    pub fn status(&self) -> Option<&str> {
        self.context.str_at("status")
    }
}

/// A record that names the notification which produced it. Only these take
/// part in statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub record: LogRecord,
    pub notification_type: String,
    pub notification_class: String,
}

impl NotificationRecord {
    /// Promote a record whose context carries a string `notification_type`.
    pub fn from_record(record: LogRecord) -> Option<Self> {
        let notification_type = record.context.str_at("notification_type")?.to_string();
        let notification_class = record
            .context
            .str_at("notification_class")
            .unwrap_or("Unknown")
            .to_string();

        Some(Self {
            record,
            notification_type,
            notification_class,
        })
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.record.timestamp
    }

    pub fn data(&self) -> &Context {
        &self.record.context
    }
}

/// Result of matching one line against the log grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    Matched(T),
    Unmatched,
}

impl<T> ParseOutcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            ParseOutcome::Matched(value) => Some(value),
            ParseOutcome::Unmatched => None,
        }
    }
}
