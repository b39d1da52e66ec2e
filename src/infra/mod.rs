//! Infrastructure layer
//!
//! Filesystem helpers, the run log, and the external processes the chain
//! drives: the build tool and the repository indexer.

pub mod buildtool;
pub mod createrepo;
pub mod filesystem;
pub mod logfile;
