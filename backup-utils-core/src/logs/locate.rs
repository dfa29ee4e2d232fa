use crate::conf::types::LoggingConfig;
use chrono::{Days, NaiveDate};
use glob::{Pattern, glob};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Knows where backup log files live and how they are named.
///
/// Daily files are `<prefix>-YYYY-MM-DD.log`, the generic fallback is
/// `<prefix>.log`, both directly under `dir`.
#[derive(Debug, Clone)]
pub struct LogLocator {
    dir: PathBuf,
    prefix: String,
}

impl LogLocator {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn from_config(cfg: &LoggingConfig) -> Self {
        Self::new(&cfg.dir, &cfg.file_prefix)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn dated_path(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}-{}.log", self.prefix, date.format("%Y-%m-%d")))
    }

    pub fn generic_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.prefix))
    }

    /// Paths reported to the user when the viewer finds nothing.
    pub fn viewer_candidates(&self, today: NaiveDate) -> Vec<PathBuf> {
        vec![self.dated_path(today), self.generic_path()]
    }

    /// Pick the single file the viewer reads: today's, yesterday's, the
    /// generic file, or else the most recently modified dated file.
    pub fn viewer_file(&self, today: NaiveDate) -> Option<PathBuf> {
        let dated = [Some(today), today.checked_sub_days(Days::new(1))]
            .into_iter()
            .flatten()
            .map(|date| self.dated_path(date));

        dated
            .chain(std::iter::once(self.generic_path()))
            .find(|path| path.is_file())
            .or_else(|| self.most_recent_dated())
    }

    /// Files feeding statistics: one dated file per day of the window that
    /// exists, then the generic file if present.
    pub fn stats_files(&self, today: NaiveDate, days: u32) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = (0..u64::from(days))
            .map_while(|offset| today.checked_sub_days(Days::new(offset)))
            .map(|date| self.dated_path(date))
            .filter(|path| path.is_file())
            .collect();

        let generic = self.generic_path();
        if generic.is_file() && !files.contains(&generic) {
            files.push(generic);
        }

        files
    }

    fn most_recent_dated(&self) -> Option<PathBuf> {
        let pattern = self.dated_glob();

        let paths = match glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                tracing::warn!(pattern = %pattern, error = %e, "invalid log file pattern");
                return None;
            }
        };

        paths
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .filter_map(|path| modified(&path).map(|mtime| (path, mtime)))
            .max_by_key(|(_, mtime)| *mtime)
            .map(|(path, _)| path)
    }

    fn dated_glob(&self) -> String {
        let dir = Pattern::escape(&self.dir.to_string_lossy());
        let file = format!("{}-*.log", Pattern::escape(&self.prefix));

        Path::new(&dir).join(file).to_string_lossy().into_owned()
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Read a whole log file. An unreadable file contributes nothing.
pub fn read_log_file(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => match String::from_utf8_lossy(&bytes) {
            Cow::Borrowed(s) => s.to_owned(),
            Cow::Owned(s) => {
                tracing::debug!(path = %path.display(), "log file contains invalid UTF-8");
                s
            }
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read log file");
            String::new()
        }
    }
}
