use crate::cli::Outcome;
use crate::conf::BackupUtilsConfig;
use crate::logs::{
    ExportFormat, LogLocator, ReportFormat, aggregate, export_stats, load_notifications,
    render_report,
};
use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Args;
use std::io::Write;

#[derive(Args, Debug, Clone, Default)]
pub struct StatsArgs {
    /// Number of days to analyze
    #[arg(long)]
    pub days: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: ReportFormat,

    /// Also write the statistics to a file
    #[arg(long, value_enum)]
    pub export: Option<ExportFormat>,
}

/// Requested day count, capped at `stats.max_days`.
pub fn effective_days(requested: Option<u32>, cfg: &BackupUtilsConfig) -> u32 {
    let days = requested.unwrap_or(cfg.stats.default_days);
    if days > cfg.stats.max_days {
        tracing::warn!(
            requested = days,
            max_days = cfg.stats.max_days,
            "day count exceeds stats.max_days, clamping"
        );
        return cfg.stats.max_days;
    }
    days
}

pub fn run_stats(
    args: &StatsArgs,
    cfg: &BackupUtilsConfig,
    now: NaiveDateTime,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let days = effective_days(args.days, cfg);
    let locator = LogLocator::from_config(&cfg.logging);

    writeln!(out, "Analyzing backup logs for the last {days} days...\n")?;

    let records = load_notifications(&locator, now, days);
    if records.is_empty() {
        writeln!(out, "No backup log entries found in the specified time period.")?;
        return Ok(Outcome::NoRecords);
    }

    let stats = aggregate(&records, cfg.stats.version_keys());
    writeln!(out, "{}", render_report(&stats, args.format, now)?)?;

    if let Some(format) = args.export {
        let path = export_stats(&stats, format, cfg.export_dir(), now)?;
        writeln!(out, "Statistics exported to: {}", path.display())?;
    }

    Ok(Outcome::Success)
}
