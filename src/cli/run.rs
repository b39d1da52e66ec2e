//! Run orchestration
//!
//! Turns parsed arguments into one full chain run: validates the inputs,
//! prepares the local repository and the derived build root config, seeds
//! the repository index, drives the scheduler, and prints the summary.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tempfile::TempDir;

use crate::cli::Cli;
use crate::config::defaults::{LOCAL_REPO_ID, STATIC_CONFIG_FILES};
use crate::core::builder::Builder;
use crate::core::buildroot::BuildRootConfig;
use crate::core::package::Package;
use crate::core::scheduler::{ChainScheduler, RunReport};
use crate::error::ConfigError;
use crate::infra::buildtool::MockTool;
use crate::infra::createrepo::Createrepo;
use crate::infra::filesystem;
use crate::infra::logfile::RunLog;

/// Execute one chain run to completion
pub fn execute(cli: Cli) -> Result<RunReport> {
    let chroot = cli.root.clone().ok_or(ConfigError::MissingRoot)?;
    if cli.packages.is_empty() {
        return Err(ConfigError::NoPackages.into());
    }
    for tool in [&cli.build_tool, &cli.index_tool] {
        if which::which(tool).is_err() {
            return Err(ConfigError::ToolNotFound { tool: tool.clone() }.into());
        }
    }

    let unique_ext = unique_ext(&cli)?;

    let log = match &cli.logdir {
        Some(dir) => RunLog::for_logdir(dir, cli.quiet)
            .with_context(|| format!("Could not prepare log directory {}", dir.display()))?,
        None => RunLog::new(None, cli.quiet),
    };

    // The local repo doubles as the result directory, so it has to outlive
    // the process even when nobody named it explicitly.
    let repo_dir = match &cli.localrepo {
        Some(dir) => dir.clone(),
        None => std::env::temp_dir().join(format!("chainbuild-{unique_ext}")),
    };
    filesystem::create_dir_all(&repo_dir)?;
    let repo_dir = repo_dir
        .canonicalize()
        .with_context(|| format!("Could not resolve local repo path {}", repo_dir.display()))?;
    log.event(&format!("results dir: {}", repo_dir.display()));

    let rundir = TempDir::new().context("Could not create the run scratch directory")?;
    let (chroot_name, tool_config_dir) =
        prepare_build_root(&cli, &chroot, &repo_dir, rundir.path())?;
    log.event(&format!("config dir: {}", tool_config_dir.display()));

    let indexer = Createrepo::new(cli.index_tool.clone(), repo_dir.clone());
    if let Err(error) = indexer.run() {
        log.event(&format!("Error making local repo: {}", repo_dir.display()));
        log.event(&format!("Err: {error}"));
        bail!(
            "could not create the initial repository index in {}",
            repo_dir.display()
        );
    }

    let builder = Builder::new(
        MockTool::new(cli.build_tool.clone(), log.clone()),
        chroot_name,
        tool_config_dir,
        repo_dir.clone(),
        unique_ext,
        &cli.tool_option,
    );
    let packages: Vec<Package> = cli.packages.iter().cloned().map(Package::new).collect();
    let scheduler = ChainScheduler::new(builder, indexer, &log, cli.recurse, repo_dir.clone());
    let report = scheduler.run(packages);

    log.event(&format!("Results out to: {}", repo_dir.display()));
    log.event(&format!("Pkgs built: {}", report.built.len()));
    if !report.built.is_empty() {
        let heading = if report.all_succeeded() {
            "Packages successfully built in this order:"
        } else {
            "Some packages successfully built in this order:"
        };
        log.event(heading);
        for package in &report.built {
            log.event(package.reference());
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(report)
}

/// Per-run uniqueness suffix, `<prefix>-<pid>`
fn unique_ext(cli: &Cli) -> Result<String, ConfigError> {
    let prefix = match &cli.tmp_prefix {
        Some(prefix) => prefix.clone(),
        None => std::env::var("USER")
            .or_else(|_| std::env::var("LOGNAME"))
            .map_err(|_| ConfigError::NoUserName)?,
    };
    Ok(format!("{prefix}-{}", std::process::id()))
}

/// Derive the build root config for this run
///
/// Loads `<configdir>/<chroot>.toml`, enables the plugin machinery, wires in
/// the local repo and any extra repos, and writes the result next to the
/// copied static support files. Returns the chroot name from the config and
/// the directory the build tool should be pointed at.
fn prepare_build_root(
    cli: &Cli,
    chroot: &str,
    repo_dir: &std::path::Path,
    rundir: &std::path::Path,
) -> Result<(String, PathBuf)> {
    let config_path = cli.configdir.join(format!("{chroot}.toml"));
    let config = BuildRootConfig::load(&config_path)?;
    let chroot_name = config.chroot_name()?.to_string();

    let tool_config_dir = rundir.join("configs").join(&chroot_name);
    filesystem::create_dir_all(&tool_config_dir)?;

    let local_baseurl = format!("file://{}", repo_dir.display());
    let mut used_ids = BTreeSet::new();
    let mut config = config
        .with_plugins_enabled()?
        .with_repo(&local_baseurl, Some(LOCAL_REPO_ID), &mut used_ids)?;
    for baseurl in &cli.addrepo {
        config = config.with_repo(baseurl, None, &mut used_ids)?;
    }
    config.write_to(&tool_config_dir.join(format!("{chroot_name}.toml")))?;

    for name in STATIC_CONFIG_FILES {
        let source = cli.configdir.join(name);
        if !source.exists() {
            return Err(ConfigError::StaticFileMissing { path: source }.into());
        }
        filesystem::copy_file(&source, &tool_config_dir.join(name))?;
    }

    Ok((chroot_name, tool_config_dir))
}
