//! One build attempt
//!
//! Wraps a single invocation of the external build tool for one package:
//! consult the marker, run the tool, record the new marker. The tool itself
//! sits behind the [`BuildTool`] trait so the attempt logic stays testable
//! without spawning processes.

use std::path::{Path, PathBuf};

use crate::core::marker::{BuildMarker, MarkerState};
use crate::core::options;
use crate::core::package::Package;
use crate::error::BuildError;

/// Everything the external tool needs for one attempt
#[derive(Debug)]
pub struct BuildRequest<'a> {
    /// Build root name handed to the tool's `-r` flag
    pub chroot: &'a str,
    /// Directory holding the derived config
    pub config_dir: &'a Path,
    /// Per-package result directory
    pub result_dir: &'a Path,
    /// Per-run uniqueness suffix
    pub unique_ext: &'a str,
    /// Tokenized passthrough options
    pub options: &'a [String],
    /// The package to build
    pub package: &'a Package,
}

/// Captured result of one tool invocation
#[derive(Debug)]
pub struct ToolOutput {
    /// Whether the tool exited with status zero
    pub success: bool,
    /// Captured standard output
    pub stdout: Vec<u8>,
    /// Captured standard error
    pub stderr: Vec<u8>,
}

/// External build tool seam
pub trait BuildTool {
    /// Run one build attempt to completion
    fn run(&self, request: &BuildRequest<'_>) -> Result<ToolOutput, BuildError>;
}

/// Classification of one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    /// The tool ran and reported success
    BuiltOk,
    /// The tool ran and reported failure
    BuildFailed,
    /// A success marker existed, the tool was never invoked
    AlreadyBuilt,
}

/// Result of one attempt, with captured output for diagnostics
#[derive(Debug)]
pub struct BuildOutcome {
    /// What happened
    pub status: BuildStatus,
    /// Build tool stdout (empty for skipped packages)
    pub stdout: Vec<u8>,
    /// Build tool stderr (empty for skipped packages)
    pub stderr: Vec<u8>,
}

impl BuildOutcome {
    fn skipped() -> Self {
        Self {
            status: BuildStatus::AlreadyBuilt,
            stdout: Vec::new(),
            stderr: Vec::new(),
        }
    }
}

/// Runs build attempts for one configured run
#[derive(Debug)]
pub struct Builder<T> {
    tool: T,
    chroot: String,
    config_dir: PathBuf,
    repo_dir: PathBuf,
    unique_ext: String,
    tool_options: Vec<String>,
}

impl<T: BuildTool> Builder<T> {
    /// Configure a builder for one run
    ///
    /// Passthrough options are tokenized once here; every attempt reuses
    /// them.
    pub fn new(
        tool: T,
        chroot: impl Into<String>,
        config_dir: impl Into<PathBuf>,
        repo_dir: impl Into<PathBuf>,
        unique_ext: impl Into<String>,
        passthrough_options: &[String],
    ) -> Self {
        Self {
            tool,
            chroot: chroot.into(),
            config_dir: config_dir.into(),
            repo_dir: repo_dir.into(),
            unique_ext: unique_ext.into(),
            tool_options: options::tokenize_options(passthrough_options),
        }
    }

    /// Result directory for a package, keyed by its stable name
    pub fn result_dir(&self, package: &Package) -> PathBuf {
        self.repo_dir.join(package.name())
    }

    /// Attempt to build one package
    ///
    /// A success marker short-circuits the attempt without spawning the
    /// tool. A stale failure marker is cleared first; the fresh outcome is
    /// recorded before returning. Marker I/O errors surface as `Err` and
    /// count as a failed attempt for the round.
    pub fn build(&self, package: &Package) -> Result<BuildOutcome, BuildError> {
        let result_dir = self.result_dir(package);
        let marker = BuildMarker::new(&result_dir);

        match marker.check() {
            MarkerState::Success => return Ok(BuildOutcome::skipped()),
            MarkerState::Failure => marker.reset()?,
            MarkerState::Absent => {}
        }
        marker.ensure_result_dir()?;

        let request = BuildRequest {
            chroot: &self.chroot,
            config_dir: &self.config_dir,
            result_dir: &result_dir,
            unique_ext: &self.unique_ext,
            options: &self.tool_options,
            package,
        };
        let output = self.tool.run(&request)?;

        let status = if output.success {
            marker.record_success()?;
            BuildStatus::BuiltOk
        } else {
            marker.record_failure()?;
            BuildStatus::BuildFailed
        };
        Ok(BuildOutcome {
            status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
