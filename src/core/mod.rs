//! Core business logic module
//!
//! This module contains the build chain itself: how packages are named, how
//! build results are remembered between runs, and how rounds of builds
//! converge. Process spawning lives in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`package`] - Package reference handling
//! - [`marker`] - On-disk build result markers
//! - [`buildroot`] - Build root configuration derivation
//! - [`options`] - Passthrough tool option tokenization
//! - [`builder`] - Single package build attempts
//! - [`scheduler`] - Round-based convergence over the package list

pub mod builder;
pub mod buildroot;
pub mod marker;
pub mod options;
pub mod package;
pub mod scheduler;
