//! Per-package build markers
//!
//! Each package gets a result directory under the local repo, keyed by its
//! stable name. Two marker files inside it persist the outcome across runs:
//! `success` (content `done`) and `fail` (content `undone`). A success
//! marker is what makes reruns skip the package entirely.

use std::path::{Path, PathBuf};

use crate::config::defaults::{
    FAIL_MARKER, FAIL_MARKER_CONTENT, SUCCESS_MARKER, SUCCESS_MARKER_CONTENT,
};
use crate::error::FilesystemError;
use crate::infra::filesystem;

/// Persisted outcome of past build attempts on one package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    /// Never attempted, or reset
    Absent,
    /// A build of this package completed successfully
    Success,
    /// The most recent attempt failed
    Failure,
}

/// Marker files for one package's result directory
#[derive(Debug, Clone)]
pub struct BuildMarker {
    result_dir: PathBuf,
}

impl BuildMarker {
    /// Create a marker handle for a result directory
    pub fn new(result_dir: impl Into<PathBuf>) -> Self {
        Self {
            result_dir: result_dir.into(),
        }
    }

    /// The result directory the markers live in
    pub fn result_dir(&self) -> &Path {
        &self.result_dir
    }

    fn success_file(&self) -> PathBuf {
        self.result_dir.join(SUCCESS_MARKER)
    }

    fn fail_file(&self) -> PathBuf {
        self.result_dir.join(FAIL_MARKER)
    }

    /// Inspect the markers without touching them
    ///
    /// When both files exist (a crash between writing one and clearing the
    /// other), success wins: the package did build once.
    pub fn check(&self) -> MarkerState {
        if self.success_file().exists() {
            MarkerState::Success
        } else if self.fail_file().exists() {
            MarkerState::Failure
        } else {
            MarkerState::Absent
        }
    }

    /// Create the result directory if it does not exist yet
    pub fn ensure_result_dir(&self) -> Result<(), FilesystemError> {
        filesystem::create_dir_all(&self.result_dir)
    }

    /// Record that the build tool reported success
    pub fn record_success(&self) -> Result<(), FilesystemError> {
        filesystem::write_file(&self.success_file(), SUCCESS_MARKER_CONTENT)?;
        filesystem::remove_file_if_exists(&self.fail_file())
    }

    /// Record that the build tool reported failure
    pub fn record_failure(&self) -> Result<(), FilesystemError> {
        filesystem::write_file(&self.fail_file(), FAIL_MARKER_CONTENT)
    }

    /// Clear a stale failure marker before a fresh attempt
    ///
    /// Success markers are never cleared here; that is the idempotency
    /// guarantee.
    pub fn reset(&self) -> Result<(), FilesystemError> {
        filesystem::remove_file_if_exists(&self.fail_file())
    }
}
