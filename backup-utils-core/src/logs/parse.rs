use crate::logs::types::{Context, LogRecord, NotificationRecord, ParseOutcome};
use chrono::NaiveDateTime;
use serde_json::{Map, Value};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TIMESTAMP_LEN: usize = 19;

//-----------------------------------------------------------------------------
// Header: `[YYYY-MM-DD HH:MM:SS] <channel>.<level>: <body>`
//-----------------------------------------------------------------------------

struct Header<'a> {
    timestamp: NaiveDateTime,
    level: &'a str,
    body: &'a str,
}

fn parse_header(line: &str) -> Option<Header<'_>> {
    let rest = line.strip_prefix('[')?;

    let raw_timestamp = rest.get(..TIMESTAMP_LEN)?;
    if !has_timestamp_shape(raw_timestamp) {
        return None;
    }
    let timestamp = NaiveDateTime::parse_from_str(raw_timestamp, TIMESTAMP_FORMAT).ok()?;

    let rest = rest[TIMESTAMP_LEN..].strip_prefix("] ")?;
    let (_channel, rest) = take_word(rest)?;
    let rest = rest.strip_prefix('.')?;
    let (level, rest) = take_word(rest)?;
    let body = rest.strip_prefix(": ")?;

    if body.is_empty() {
        return None;
    }

    Some(Header {
        timestamp,
        level,
        body,
    })
}

/// `YYYY-MM-DD HH:MM:SS` with every digit present.
fn has_timestamp_shape(raw: &str) -> bool {
    raw.bytes().enumerate().all(|(i, b)| match i {
        4 | 7 => b == b'-',
        10 => b == b' ',
        13 | 16 => b == b':',
        _ => b.is_ascii_digit(),
    })
}

fn take_word(s: &str) -> Option<(&str, &str)> {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len());

    if end == 0 {
        return None;
    }

    Some((&s[..end], &s[end..]))
}

//-----------------------------------------------------------------------------
// Loose variant (log viewer)
//-----------------------------------------------------------------------------

/// Parse a line for display. The JSON tail is optional and an undecodable
/// tail leaves the context empty.
pub fn parse_line(line: &str) -> ParseOutcome<LogRecord> {
    let Some(header) = parse_header(line) else {
        return ParseOutcome::Unmatched;
    };

    let (message, context) = match header.body.find('{') {
        Some(start) => (
            header.body[..start].trim().to_string(),
            decode_context(&header.body[start..]),
        ),
        None => (header.body.to_string(), Context::default()),
    };

    ParseOutcome::Matched(LogRecord {
        timestamp: header.timestamp,
        level: header.level.to_string(),
        message,
        context,
    })
}

fn decode_context(raw: &str) -> Context {
    serde_json::from_str::<Map<String, Value>>(raw)
        .map(Context::from)
        .unwrap_or_default()
}

//-----------------------------------------------------------------------------
// Strict variant (statistics)
//-----------------------------------------------------------------------------

/// Parse a line for statistics.
///
/// The line must carry a decodable JSON object naming its `notification_type`
/// and must not be older than `cutoff`. Anything else is `Unmatched`.
pub fn parse_notification_line(
    line: &str,
    cutoff: NaiveDateTime,
) -> ParseOutcome<NotificationRecord> {
    let Some(header) = parse_header(line) else {
        return ParseOutcome::Unmatched;
    };

    if header.timestamp < cutoff {
        return ParseOutcome::Unmatched;
    }

    let Some((message, payload)) = split_payload(header.body) else {
        return ParseOutcome::Unmatched;
    };

    let Ok(data) = serde_json::from_str::<Map<String, Value>>(payload) else {
        return ParseOutcome::Unmatched;
    };

    let record = LogRecord {
        timestamp: header.timestamp,
        level: header.level.to_string(),
        message: message.to_string(),
        context: Context::from(data),
    };

    match NotificationRecord::from_record(record) {
        Some(notification) => ParseOutcome::Matched(notification),
        None => ParseOutcome::Unmatched,
    }
}

/// Split `<message> {<json>}` at the first ` {` that leaves a non-empty
/// message and a non-empty object before the last `}` on the line.
fn split_payload(body: &str) -> Option<(&str, &str)> {
    let close = body.rfind('}')?;

    body.match_indices(" {")
        .map(|(i, _)| i)
        .find(|&i| i >= 1 && close > i + 2)
        .map(|i| (&body[..i], &body[i + 1..=close]))
}
