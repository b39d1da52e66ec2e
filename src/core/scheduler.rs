//! Build convergence loop
//!
//! The scheduler drives retry rounds over a worklist of packages. Every
//! round attempts each remaining package in order; successes are followed
//! immediately by a repository refresh so the next package in the same
//! round can depend on the fresh artifact. With retry enabled the failures
//! of one round become the worklist of the next, until a round ends clean
//! or makes no progress.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::defaults::EXIT_BUILD_FAILED;
use crate::core::builder::{BuildOutcome, BuildStatus, BuildTool, Builder};
use crate::core::package::Package;
use crate::error::{BuildError, IndexError};
use crate::infra::logfile::RunLog;

/// Scheduler state across rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// A round is in progress
    Running,
    /// The previous round's failures are being reattempted
    Retrying,
    /// The run is over
    Done,
}

/// Attempts one package build; the scheduler's view of [`Builder`]
pub trait PackageBuilder {
    /// Attempt one package, consulting and updating its markers
    fn build(&mut self, package: &Package) -> Result<BuildOutcome, BuildError>;
}

impl<T: BuildTool> PackageBuilder for Builder<T> {
    fn build(&mut self, package: &Package) -> Result<BuildOutcome, BuildError> {
        Builder::build(self, package)
    }
}

/// Refreshes the local repository index after a success
pub trait RepoRefresher {
    /// Bring the repository index up to date with the artifacts on disk
    fn refresh(&mut self) -> Result<(), IndexError>;
}

/// Final outcome of a whole run
///
/// Finalized when the loop terminates, never mutated after.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    /// Packages built this run, in the order they succeeded
    pub built: Vec<Package>,
    /// Packages that ultimately failed, including non-package inputs
    pub failed: Vec<Package>,
    /// Number of rounds executed
    pub rounds: u32,
}

impl RunReport {
    /// Whether every requested package is built or was already built
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Process exit code reflecting the run outcome
    pub fn exit_code(&self) -> i32 {
        if self.failed.is_empty() {
            0
        } else {
            EXIT_BUILD_FAILED
        }
    }
}

/// End-of-round transition
///
/// A clean round ends the run. Failures end it too unless retries are on
/// and at least one package made progress this round; a round where every
/// attempted package failed cannot improve and stops the run.
fn next_state(retry_failed: bool, attempted: usize, failed: usize) -> RoundState {
    if failed == 0 || !retry_failed || failed == attempted {
        RoundState::Done
    } else {
        RoundState::Retrying
    }
}

/// Drives builds to convergence over retry rounds
pub struct ChainScheduler<'a, B, R> {
    builder: B,
    refresher: R,
    log: &'a RunLog,
    retry_failed: bool,
    repo_dir: PathBuf,
}

impl<'a, B: PackageBuilder, R: RepoRefresher> ChainScheduler<'a, B, R> {
    /// Create a scheduler for one run
    pub fn new(
        builder: B,
        refresher: R,
        log: &'a RunLog,
        retry_failed: bool,
        repo_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            builder,
            refresher,
            log,
            retry_failed,
            repo_dir: repo_dir.into(),
        }
    }

    /// Run the convergence loop to completion
    ///
    /// Non-package entries are classified as failed up front without an
    /// attempt. The returned report is final.
    pub fn run(mut self, packages: Vec<Package>) -> RunReport {
        let mut report = RunReport::default();
        let mut worklist = Vec::new();
        for package in packages {
            if package.is_buildable() {
                worklist.push(package);
            } else {
                self.log
                    .event(&format!("{package} doesn't appear to be an rpm - skipping"));
                report.failed.push(package);
            }
        }

        let mut state = if worklist.is_empty() {
            RoundState::Done
        } else {
            RoundState::Running
        };
        loop {
            match state {
                RoundState::Done => break,
                RoundState::Running | RoundState::Retrying => {
                    report.rounds += 1;
                    let failed = self.run_round(&worklist, &mut report);

                    state = next_state(self.retry_failed, worklist.len(), failed.len());
                    if state == RoundState::Retrying {
                        self.log.event("Some package succeeded, some failed.");
                        self.log.event(&format!(
                            "Trying to rebuild {} failed pkgs, because --recurse is set.",
                            failed.len()
                        ));
                        worklist = failed;
                    } else {
                        if self.retry_failed && !failed.is_empty() {
                            self.log.event(&format!(
                                "Tried {} times - following pkgs could not be successfully built:",
                                report.rounds
                            ));
                            for package in &failed {
                                self.log.event(package.reference());
                            }
                        }
                        report.failed.extend(failed);
                    }
                }
            }
        }
        report
    }

    /// One pass over the worklist; returns this round's failures in order
    fn run_round(&mut self, worklist: &[Package], report: &mut RunReport) -> Vec<Package> {
        let mut failed = Vec::new();
        for package in worklist {
            self.log.event(&format!("Start build: {package}"));
            let result = self.builder.build(package);
            self.log.event(&format!("End build: {package}"));

            match result {
                Ok(outcome) => match outcome.status {
                    BuildStatus::BuiltOk => {
                        self.log
                            .event(&format!("Success building {}", package.file_name()));
                        report.built.push(package.clone());
                        // The refresh must land before the next build starts.
                        if let Err(error) = self.refresher.refresh() {
                            self.log.event(&format!(
                                "Error making local repo: {}",
                                self.repo_dir.display()
                            ));
                            self.log.event(&format!("Err: {error}"));
                        }
                    }
                    BuildStatus::BuildFailed => {
                        replay_stderr(&outcome.stderr);
                        self.note_failure(package, &mut failed);
                    }
                    BuildStatus::AlreadyBuilt => {
                        self.log.event(&format!(
                            "Skipping already built pkg {}",
                            package.file_name()
                        ));
                    }
                },
                Err(error) => {
                    self.log.event(&format!("Err: {error}"));
                    self.note_failure(package, &mut failed);
                }
            }
        }
        failed
    }

    fn note_failure(&self, package: &Package, failed: &mut Vec<Package>) {
        self.log
            .event(&format!("Error building {}.", package.file_name()));
        if self.retry_failed {
            self.log
                .event("Will try to build again (if some other package will succeed).");
        } else {
            self.log
                .event(&format!("See logs/results in {}", self.repo_dir.display()));
        }
        failed.push(package.clone());
    }
}

fn replay_stderr(stderr: &[u8]) {
    if stderr.is_empty() {
        return;
    }
    let _ = std::io::stderr().write_all(stderr);
}
