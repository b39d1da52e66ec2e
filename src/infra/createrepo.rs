//! Repository index refresh
//!
//! Runs the indexer (createrepo_c by default) over the local repository so
//! that later builds can resolve the packages built before them. An existing
//! index is updated in place; a missing one is created from scratch. The
//! indexer's stderr is part of its failure contract: any output there fails
//! the refresh even on a zero exit status.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::defaults::REPO_INDEX_MARKER;
use crate::core::scheduler::RepoRefresher;
use crate::error::IndexError;

/// Index refresher backed by an external createrepo-style tool
#[derive(Debug, Clone)]
pub struct Createrepo {
    program: String,
    repo_dir: PathBuf,
}

impl Createrepo {
    /// Create a refresher for the given executable and repository directory
    pub fn new(program: impl Into<String>, repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            repo_dir: repo_dir.into(),
        }
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Whether the repository already carries index metadata
    pub fn index_exists(&self) -> bool {
        self.repo_dir.join(REPO_INDEX_MARKER).exists()
    }

    fn command_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if self.index_exists() {
            args.push("--update".into());
        }
        args.push(self.repo_dir.as_os_str().to_os_string());
        args
    }

    /// Run the indexer once over the repository
    pub fn run(&self) -> Result<(), IndexError> {
        let args = self.command_args();
        tracing::debug!(
            "Refreshing repository index in {}",
            self.repo_dir.display()
        );

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| IndexError::Spawn {
                tool: self.program.clone(),
                error: e.to_string(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr.trim();
        if !output.status.success() || !detail.is_empty() {
            let stderr = if detail.is_empty() {
                output.status.to_string()
            } else {
                detail.to_string()
            };
            return Err(IndexError::Failed {
                repo: self.repo_dir.clone(),
                stderr,
            });
        }
        Ok(())
    }
}

impl RepoRefresher for Createrepo {
    fn refresh(&mut self) -> Result<(), IndexError> {
        self.run()
    }
}
