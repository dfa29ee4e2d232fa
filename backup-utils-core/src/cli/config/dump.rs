use crate::conf::BackupUtilsConfig;
use serde::Serialize;
use std::io::Write;

/// JSON unless `yaml` is set.
pub fn dump(cfg: &BackupUtilsConfig, yaml: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    if yaml {
        dump_yaml(cfg, out)
    } else {
        dump_json(cfg, out)
    }
}

fn dump_json<T: Serialize>(value: &T, out: &mut dyn Write) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    writeln!(out, "{s}")?;
    Ok(())
}

fn dump_yaml<T: Serialize>(value: &T, out: &mut dyn Write) -> anyhow::Result<()> {
    let s = serde_yaml::to_string(value)?;
    write!(out, "{s}")?;
    Ok(())
}
