use crate::logs::types::NotificationRecord;
use std::collections::HashSet;

/// Merge records read from several files.
///
/// Identity is `(timestamp, notification_type)`; the first occurrence in
/// source order wins. The result is sorted oldest first, ties keeping their
/// source order.
pub fn merge_sources<I>(sources: I) -> Vec<NotificationRecord>
where
    I: IntoIterator<Item = Vec<NotificationRecord>>,
{
    let mut seen = HashSet::new();

    let mut merged: Vec<NotificationRecord> = sources
        .into_iter()
        .flatten()
        .filter(|r| seen.insert((r.timestamp(), r.notification_type.clone())))
        .collect();

    merged.sort_by_key(NotificationRecord::timestamp);
    merged
}
