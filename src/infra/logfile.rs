//! Run log
//!
//! One line per significant run event. Lines reach stdout unless the run is
//! quiet; with a log file configured they are also appended there, prefixed
//! with a unix timestamp. The log file is best effort: a failed write warns
//! and the run carries on.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::defaults::LOG_FILE_NAME;
use crate::error::FilesystemError;
use crate::infra::filesystem;

/// Destination for run events
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    file: Option<PathBuf>,
    quiet: bool,
}

impl RunLog {
    /// Create a log writing to stdout and, optionally, a file
    pub fn new(file: Option<PathBuf>, quiet: bool) -> Self {
        Self { file, quiet }
    }

    /// Prepare the run log inside `logdir`
    ///
    /// A file left over from a previous run is removed first; the fresh log
    /// opens with a line announcing its own path.
    pub fn for_logdir(logdir: &Path, quiet: bool) -> Result<Self, FilesystemError> {
        filesystem::create_dir_all(logdir)?;
        let path = logdir.join(LOG_FILE_NAME);
        filesystem::remove_file_if_exists(&path)?;

        let log = Self::new(Some(path.clone()), quiet);
        log.event(&format!("starting logfile: {}", path.display()));
        Ok(log)
    }

    /// Path of the log file, when one is configured
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Emit one event line
    pub fn event(&self, message: &str) {
        if let Some(path) = &self.file {
            if let Err(error) = append_line(path, message) {
                tracing::warn!("Could not write to logfile {}: {error}", path.display());
            }
        }
        if !self.quiet {
            println!("{message}");
        }
    }
}

fn append_line(path: &Path, message: &str) -> std::io::Result<()> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(
        file,
        "{}.{:03}:{message}",
        now.as_secs(),
        now.subsec_millis()
    )
}
