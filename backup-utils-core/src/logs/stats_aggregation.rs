use crate::logs::classify::{EventOutcome, classify};
use crate::logs::histogram::{Tally, busiest};
use crate::logs::types::NotificationRecord;
use crate::logs::units::{format_bytes, round2};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

const RECENT_FAILURES: usize = 5;
const RECENT_ACTIVITY: usize = 10;
const TREND_SPAN: usize = 7;

const MEMORY_PATH: &str = "metadata.memory_usage";
const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN: &str = "Unknown";

/// Metadata keys holding the two version strings shown under performance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionKeys {
    pub runtime: String,
    pub framework: String,
}

impl Default for VersionKeys {
    fn default() -> Self {
        Self {
            runtime: "php_version".to_string(),
            framework: "laravel_version".to_string(),
        }
    }
}

//-----------------------------------------------------------------------------
// Snapshot model
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedStats {
    pub overview: Overview,
    pub notification_types: Vec<TypeBreakdown>,
    pub time_analysis: TimeAnalysis,
    pub failure_analysis: FailureAnalysis,
    pub performance: Performance,
    pub recent_activity: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_events: u64,
    pub successful_events: u64,
    pub failed_events: u64,
    pub success_rate: f64,
    pub failure_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeBreakdown {
    pub notification_type: String,
    pub count: u64,
    pub percentage: f64,
    pub last_occurrence: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayBreakdown {
    pub total: u64,
    pub successes: u64,
    pub failures: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAnalysis {
    /// Keyed by `YYYY-MM-DD`.
    pub daily_breakdown: BTreeMap<String, DayBreakdown>,
    /// Keyed by two-digit hour `00`..`23`.
    pub hourly_distribution: BTreeMap<String, u64>,
    pub busiest_day: Option<String>,
    pub busiest_hour: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCount {
    pub notification_type: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureEntry {
    #[serde(rename = "type")]
    pub notification_type: String,
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub mail_subject: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureTrend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

impl fmt::Display for FailureTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureTrend::Increasing => "Increasing",
            FailureTrend::Decreasing => "Decreasing",
            FailureTrend::Stable => "Stable",
            FailureTrend::InsufficientData => "Insufficient data",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureAnalysis {
    pub failure_types: Vec<TypeCount>,
    pub total_failures: u64,
    /// Newest first.
    pub recent_failures: Vec<FailureEntry>,
    pub failure_trend: FailureTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub average_memory_usage: String,
    pub peak_memory_usage: String,
    pub runtime_version: String,
    pub framework_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(rename = "type")]
    pub notification_type: String,
    pub level: String,
    pub timestamp: NaiveDateTime,
    pub message: String,
}

//-----------------------------------------------------------------------------
// Aggregation
//-----------------------------------------------------------------------------

/// Folds a chronologically ordered record sequence into [`AggregatedStats`].
pub struct StatsAggregator {
    version_keys: VersionKeys,

    total: u64,
    successes: u64,
    failures: u64,

    types: Tally,
    last_seen: HashMap<String, NaiveDateTime>,

    daily: BTreeMap<String, DayBreakdown>,
    hourly: BTreeMap<String, u64>,

    failure_types: Tally,
    /// Newest first; equal timestamps keep arrival order.
    recent_failures: Vec<FailureEntry>,
    recent_activity: Vec<ActivityEntry>,

    memory_sum: f64,
    memory_samples: u64,
    memory_peak: Option<f64>,

    versions: Option<(String, String)>,
}

impl StatsAggregator {
    pub fn new(version_keys: VersionKeys) -> Self {
        Self {
            version_keys,
            total: 0,
            successes: 0,
            failures: 0,
            types: Tally::new(),
            last_seen: HashMap::new(),
            daily: BTreeMap::new(),
            hourly: BTreeMap::new(),
            failure_types: Tally::new(),
            recent_failures: Vec::with_capacity(RECENT_FAILURES + 1),
            recent_activity: Vec::with_capacity(RECENT_ACTIVITY + 1),
            memory_sum: 0.0,
            memory_samples: 0,
            memory_peak: None,
            versions: None,
        }
    }

    pub fn push(&mut self, record: &NotificationRecord) {
        let ts = record.timestamp();
        let kind = record.notification_type.as_str();
        let outcome = classify(kind);

        if self.versions.is_none() {
            self.versions = Some(self.read_versions(record));
        }

        self.total += 1;

        self.types.record(kind);
        self.last_seen
            .entry(kind.to_string())
            .and_modify(|seen| *seen = (*seen).max(ts))
            .or_insert(ts);

        let day = self
            .daily
            .entry(ts.format("%Y-%m-%d").to_string())
            .or_default();
        day.total += 1;
        *self.hourly.entry(ts.format("%H").to_string()).or_insert(0) += 1;

        match outcome {
            EventOutcome::Success => {
                self.successes += 1;
                day.successes += 1;
            }
            EventOutcome::Failure => {
                self.failures += 1;
                day.failures += 1;
                self.failure_types.record(kind);

                keep_newest(
                    &mut self.recent_failures,
                    FailureEntry {
                        notification_type: kind.to_string(),
                        timestamp: ts,
                        message: record.record.message.clone(),
                        mail_subject: record.data().str_at("mail_subject").map(str::to_string),
                    },
                    RECENT_FAILURES,
                    |f| f.timestamp,
                );
            }
            EventOutcome::Neutral => {}
        }

        if let Some(bytes) = record.data().f64_at(MEMORY_PATH) {
            self.memory_sum += bytes;
            self.memory_samples += 1;
            self.memory_peak = Some(self.memory_peak.map_or(bytes, |peak| peak.max(bytes)));
        }

        keep_newest(
            &mut self.recent_activity,
            ActivityEntry {
                notification_type: kind.to_string(),
                level: record.record.level.clone(),
                timestamp: ts,
                message: record.record.message.clone(),
            },
            RECENT_ACTIVITY,
            |a| a.timestamp,
        );
    }

    fn read_versions(&self, record: &NotificationRecord) -> (String, String) {
        let read = |key: &str| {
            record
                .data()
                .str_at(&format!("metadata.{key}"))
                .unwrap_or(UNKNOWN)
                .to_string()
        };

        (
            read(&self.version_keys.runtime),
            read(&self.version_keys.framework),
        )
    }

    pub fn snapshot(&self) -> AggregatedStats {
        AggregatedStats {
            overview: self.overview(),
            notification_types: self.type_breakdown(),
            time_analysis: TimeAnalysis {
                daily_breakdown: self.daily.clone(),
                hourly_distribution: self.hourly.clone(),
                busiest_day: busiest(&self.daily, |d| d.total),
                busiest_hour: busiest(&self.hourly, |c| *c),
            },
            failure_analysis: FailureAnalysis {
                failure_types: self
                    .failure_types
                    .ranked()
                    .into_iter()
                    .map(|(notification_type, count)| TypeCount {
                        notification_type,
                        count,
                    })
                    .collect(),
                total_failures: self.failures,
                recent_failures: self.recent_failures.clone(),
                failure_trend: failure_trend(self.failures as usize),
            },
            performance: self.performance(),
            recent_activity: self.recent_activity.clone(),
        }
    }

    fn overview(&self) -> Overview {
        let (success_rate, failure_rate) = if self.total > 0 {
            let success_rate = round2(self.successes as f64 / self.total as f64 * 100.0);
            (success_rate, round2(100.0 - success_rate))
        } else {
            (0.0, 0.0)
        };

        Overview {
            total_events: self.total,
            successful_events: self.successes,
            failed_events: self.failures,
            success_rate,
            failure_rate,
        }
    }

    fn type_breakdown(&self) -> Vec<TypeBreakdown> {
        self.types
            .ranked()
            .into_iter()
            .filter_map(|(notification_type, count)| {
                let last_occurrence = *self.last_seen.get(&notification_type)?;
                Some(TypeBreakdown {
                    percentage: round2(count as f64 / self.total as f64 * 100.0),
                    notification_type,
                    count,
                    last_occurrence,
                })
            })
            .collect()
    }

    fn performance(&self) -> Performance {
        let average = (self.memory_samples > 0)
            .then(|| format_bytes(self.memory_sum / self.memory_samples as f64));
        let peak = self.memory_peak.map(format_bytes);
        let (runtime_version, framework_version) = self
            .versions
            .clone()
            .unwrap_or_else(|| (UNKNOWN.to_string(), UNKNOWN.to_string()));

        Performance {
            average_memory_usage: average.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            peak_memory_usage: peak.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            runtime_version,
            framework_version,
        }
    }
}

/// Insert into a newest-first list capped at `limit`. The sort is stable, so
/// an entry tied with existing ones lands after them.
fn keep_newest<T, F>(entries: &mut Vec<T>, item: T, limit: usize, timestamp: F)
where
    F: Fn(&T) -> NaiveDateTime,
{
    entries.push(item);
    entries.sort_by(|a, b| timestamp(b).cmp(&timestamp(a)));
    entries.truncate(limit);
}

/// Compare the newest seven failures against the seven before them.
///
/// Both counts are capped at seven and taken by recency rank, not calendar
/// days, so with this rule "decreasing" can never be produced.
pub fn failure_trend(total_failures: usize) -> FailureTrend {
    if total_failures < 2 {
        return FailureTrend::InsufficientData;
    }

    let recent = total_failures.min(TREND_SPAN);
    let previous = total_failures.saturating_sub(TREND_SPAN).min(TREND_SPAN);

    match recent.cmp(&previous) {
        std::cmp::Ordering::Greater => FailureTrend::Increasing,
        std::cmp::Ordering::Less => FailureTrend::Decreasing,
        std::cmp::Ordering::Equal => FailureTrend::Stable,
    }
}

/// Aggregate a deduplicated, oldest-first record sequence.
pub fn aggregate(records: &[NotificationRecord], version_keys: VersionKeys) -> AggregatedStats {
    let mut agg = StatsAggregator::new(version_keys);
    for record in records {
        agg.push(record);
    }
    agg.snapshot()
}
