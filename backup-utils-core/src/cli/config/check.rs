use crate::conf::BackupUtilsConfig;
use std::io::Write;

/// Print a short summary of an already loaded and validated config.
pub fn check(cfg: &BackupUtilsConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(out, "✔ Config loaded successfully")?;
    writeln!(
        out,
        "✔ Logs: {}/{}.log (channel '{}')",
        cfg.logging.dir.display(),
        cfg.logging.file_prefix,
        cfg.logging.channel
    )?;
    writeln!(
        out,
        "✔ Viewer: last {} days, {} entries",
        cfg.viewer.default_days, cfg.viewer.default_tail
    )?;
    writeln!(
        out,
        "✔ Stats: last {} days (max {})",
        cfg.stats.default_days, cfg.stats.max_days
    )?;
    writeln!(out, "✔ Exports: {}", cfg.export_dir().display())?;
    Ok(())
}
