use crate::logs::{Context, LogRecord, NotificationRecord};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Value, json};

pub fn at(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn day(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
}

/// A statistics line as the notification writer produces it.
pub fn notification_line(ts: NaiveDateTime, level: &str, kind: &str, extra: Value) -> String {
    let mut payload = json!({
        "notification_type": kind,
        "notification_class": format!("backup_utils::{kind}"),
    });
    if let (Some(obj), Value::Object(extra)) = (payload.as_object_mut(), extra) {
        obj.extend(extra);
    }
    format!(
        "[{}] local.{level}: Event {kind} {payload}",
        ts.format("%Y-%m-%d %H:%M:%S")
    )
}

pub fn viewer_line(ts: NaiveDateTime, level: &str, message: &str, context: Value) -> String {
    format!(
        "[{}] local.{level}: {message} {context}",
        ts.format("%Y-%m-%d %H:%M:%S")
    )
}

pub fn notification(ts: NaiveDateTime, kind: &str) -> NotificationRecord {
    notification_with(ts, kind, json!({}))
}

pub fn notification_with(ts: NaiveDateTime, kind: &str, extra: Value) -> NotificationRecord {
    let mut map = serde_json::Map::new();
    map.insert("notification_type".into(), Value::String(kind.to_string()));
    if let Value::Object(extra) = extra {
        map.extend(extra);
    }

    let level = if crate::logs::is_failure(kind) {
        "ERROR"
    } else {
        "INFO"
    };

    NotificationRecord::from_record(LogRecord {
        timestamp: ts,
        level: level.to_string(),
        message: format!("Event {kind}"),
        context: Context::from(map),
    })
    .unwrap()
}

pub fn viewer_record(ts: NaiveDateTime, level: &str, context: Value) -> LogRecord {
    let map = match context {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    LogRecord {
        timestamp: ts,
        level: level.to_string(),
        message: "entry".to_string(),
        context: Context::from(map),
    }
}
