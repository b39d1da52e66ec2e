//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod output;
pub mod run;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::defaults::{DEFAULT_BUILD_TOOL, DEFAULT_CONFIG_DIR, DEFAULT_INDEX_TOOL};
use crate::core::scheduler::RunReport;

/// Chainbuild - sequential package chain builder
///
/// Build a list of source packages in order, feeding each build's output to
/// the packages after it through a shared local repository.
#[derive(Parser, Debug)]
#[command(name = "chainbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Build root config to build the packages in (e.g. fedora-rawhide-x86_64)
    #[arg(short = 'r', long = "root", value_name = "CHROOT")]
    pub root: Option<String>,

    /// Local repository directory shared by all builds in the chain
    #[arg(short = 'l', long = "localrepo", value_name = "DIR")]
    pub localrepo: Option<PathBuf>,

    /// Additional repository baseurl to resolve dependencies from (repeatable)
    #[arg(short = 'a', long = "addrepo", value_name = "URL")]
    pub addrepo: Vec<String>,

    /// Retry failed packages as long as some other package keeps succeeding
    #[arg(long)]
    pub recurse: bool,

    /// Directory for the run logfile
    #[arg(long, value_name = "DIR")]
    pub logdir: Option<PathBuf>,

    /// Prefix for the per-run uniqueness suffix (defaults to the login name)
    #[arg(long = "tmp-prefix", value_name = "PREFIX")]
    pub tmp_prefix: Option<String>,

    /// Extra option passed through to the build tool (repeatable)
    #[arg(
        short = 'm',
        long = "tool-option",
        value_name = "OPTION",
        allow_hyphen_values = true
    )]
    pub tool_option: Vec<String>,

    /// Build tool executable
    #[arg(
        long,
        value_name = "PROGRAM",
        default_value = DEFAULT_BUILD_TOOL,
        env = "CHAINBUILD_BUILD_TOOL"
    )]
    pub build_tool: String,

    /// Repository index tool executable
    #[arg(
        long,
        value_name = "PROGRAM",
        default_value = DEFAULT_INDEX_TOOL,
        env = "CHAINBUILD_INDEX_TOOL"
    )]
    pub index_tool: String,

    /// Directory holding the build root configs
    #[arg(
        long,
        value_name = "DIR",
        default_value = DEFAULT_CONFIG_DIR,
        env = "CHAINBUILD_CONFIG_DIR"
    )]
    pub configdir: PathBuf,

    /// Print the final report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Suppress per-package progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose diagnostics (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Source packages to build, in the order given
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,
}

impl Cli {
    /// Execute the build chain described by the parsed arguments
    pub fn run(self) -> Result<RunReport> {
        run::execute(self)
    }
}
