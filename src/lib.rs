//! Chainbuild - sequential package chain builder
//!
//! This library builds a list of source packages in order, publishing each
//! successful build into a local package repository so the packages after it
//! can build against it.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and run orchestration
//! - [`core`] - Business logic (markers, build attempts, convergence)
//! - [`infra`] - Infrastructure layer (filesystem, run log, external tools)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
