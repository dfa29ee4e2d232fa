use crate::logs::histogram::Tally;
use crate::logs::types::LogRecord;
use chrono::NaiveDateTime;

const UNKNOWN: &str = "unknown";

/// Counts shown by `logs --stats`, computed over the newest-first records
/// the viewer already selected.
#[derive(Debug, Clone, Default)]
pub struct ViewerStats {
    pub total_entries: usize,
    pub levels: Tally,
    pub events: Tally,
    pub statuses: Tally,
    pub last_successful: Option<NaiveDateTime>,
    pub last_failed: Option<NaiveDateTime>,
}

impl ViewerStats {
    pub fn from_records(records: &[LogRecord]) -> Self {
        let mut stats = ViewerStats {
            total_entries: records.len(),
            ..Default::default()
        };

        for record in records {
            stats.levels.record(&record.level);
            stats.events.record(record.backup_event().unwrap_or(UNKNOWN));

            let status = record.status().unwrap_or(UNKNOWN);
            stats.statuses.record(status);

            match status {
                "success" => {
                    stats.last_successful.get_or_insert(record.timestamp);
                }
                "error" | "failed" => {
                    stats.last_failed.get_or_insert(record.timestamp);
                }
                _ => {}
            }
        }

        stats
    }
}
