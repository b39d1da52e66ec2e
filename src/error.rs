//! Error types for chainbuild
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
///
/// All of these are fatal: they abort the run before any build attempt.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No build root given on the command line
    #[error("You must provide an argument to -r for the build root to use")]
    MissingRoot,

    /// No packages given on the command line
    #[error("You need to specify at least 1 package to build")]
    NoPackages,

    /// Build-root config file could not be read
    #[error("Unable to read build root config '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Build-root config file could not be parsed
    #[error("Unable to parse build root config '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// Required key absent from the build-root config
    #[error("Build root config is missing required key '{key}'")]
    MissingKey { key: String },

    /// Required key present but not a string
    #[error("Build root config key '{key}' must be a string")]
    NotString { key: String },

    /// Derived config could not be written
    #[error("Could not write build root config to '{path}': {error}")]
    WriteDerived { path: PathBuf, error: String },

    /// Static support file absent from the config dir
    #[error("Static config file not found: {path}")]
    StaticFileMissing { path: PathBuf },

    /// No login name available for the uniqueness suffix
    #[error("Could not find login name for the uniqueness suffix, add --tmp-prefix")]
    NoUserName,

    /// External tool absent from PATH
    #[error("Required tool '{tool}' not found on PATH")]
    ToolNotFound { tool: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to remove file
    #[error("Failed to remove file '{path}': {error}")]
    RemoveFile { path: PathBuf, error: String },

    /// Failed to copy file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },
}

/// Errors raised while attempting one package build
///
/// These never abort the run; the scheduler records the package as failed
/// for the round and moves on.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Marker or result-directory I/O failed
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// Build tool could not be spawned
    #[error("Failed to execute build tool '{tool}': {error}")]
    ToolSpawn { tool: String, error: String },
}

/// Repository indexing errors
#[derive(Error, Debug)]
pub enum IndexError {
    /// Indexer could not be spawned
    #[error("Failed to execute repository indexer '{tool}': {error}")]
    Spawn { tool: String, error: String },

    /// Indexer ran but reported failure
    #[error("Index refresh failed for '{repo}': {stderr}")]
    Failed { repo: PathBuf, stderr: String },
}
