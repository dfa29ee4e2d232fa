use crate::logs::render::render_json;
use crate::logs::stats_aggregation::AggregatedStats;
use chrono::NaiveDateTime;
use clap::ValueEnum;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write export file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize statistics: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// `backup-stats-YYYY-MM-DD-HH-MM-SS.<ext>`
pub fn export_file_name(format: ExportFormat, now: NaiveDateTime) -> String {
    format!(
        "backup-stats-{}.{}",
        now.format("%Y-%m-%d-%H-%M-%S"),
        format.extension()
    )
}

/// Write the report into `dir` and return the path written.
pub fn export_stats(
    stats: &AggregatedStats,
    format: ExportFormat,
    dir: &Path,
    now: NaiveDateTime,
) -> Result<PathBuf, ExportError> {
    let contents = match format {
        ExportFormat::Json => render_json(stats)?,
        ExportFormat::Csv => render_csv(stats),
    };

    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(export_file_name(format, now));
    fs::write(&path, contents).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), "statistics exported");
    Ok(path)
}

/// Flattened two-section CSV: headline metrics, then one row per type.
pub fn render_csv(stats: &AggregatedStats) -> String {
    let overview = &stats.overview;
    let mut csv = String::from("Metric,Value\n");

    let metrics = [
        ("Total Events", overview.total_events.to_string()),
        ("Successful Events", overview.successful_events.to_string()),
        ("Failed Events", overview.failed_events.to_string()),
        ("Success Rate", format!("{}%", overview.success_rate)),
        ("Failure Rate", format!("{}%", overview.failure_rate)),
        (
            "Failure Trend",
            stats.failure_analysis.failure_trend.to_string(),
        ),
        (
            "Average Memory Usage",
            stats.performance.average_memory_usage.clone(),
        ),
        (
            "Peak Memory Usage",
            stats.performance.peak_memory_usage.clone(),
        ),
    ];
    for (metric, value) in metrics {
        let _ = writeln!(csv, "{}", csv_row(&[metric, &value]));
    }

    csv.push_str("\nNotification Type,Count,Percentage\n");
    for entry in &stats.notification_types {
        let _ = writeln!(
            csv,
            "{}",
            csv_row(&[
                &entry.notification_type,
                &entry.count.to_string(),
                &format!("{}%", entry.percentage),
            ])
        );
    }

    csv
}

fn csv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| csv_escape(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a field containing a comma, quote or line break.
pub fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
