use anyhow::{Context, Result, bail};
use rust_embed::RustEmbed;
use std::fs;
use std::io::Write;
use std::path::Path;

const TEMPLATE: &str = "backup-utils.hcl";

#[derive(RustEmbed)]
#[folder = "config-templates/"]
pub struct ConfigTemplates;

pub fn init(path: &Path, out: &mut dyn Write) -> Result<()> {
    if path.exists() {
        bail!("{} already exists, refusing to overwrite", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    fs::write(path, template(TEMPLATE)?.trim_start())
        .with_context(|| format!("failed to write {}", path.display()))?;

    writeln!(out, "✔ Wrote {}", path.display())?;
    writeln!(out)?;
    writeln!(out, "Next steps:")?;
    writeln!(out, "  backup-utils --config {} config check", path.display())?;
    writeln!(out, "  backup-utils --config {} stats", path.display())?;

    Ok(())
}

/// Fetch an embedded config template as UTF-8 text
fn template(name: &str) -> Result<String> {
    let file = ConfigTemplates::get(name)
        .with_context(|| format!("missing embedded config template: {name}"))?;

    let s =
        std::str::from_utf8(file.data.as_ref()).context("config template is not valid UTF-8")?;

    Ok(s.to_owned())
}
