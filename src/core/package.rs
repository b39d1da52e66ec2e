//! Package references
//!
//! A package is identified by whatever the operator passed on the command
//! line, usually a path to a source rpm. The stable name derived from the
//! reference keys the per-package result directory under the local repo.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Archive suffixes recognized as buildable source packages, most specific
/// first.
const PACKAGE_SUFFIXES: &[&str] = &[".temp.src.rpm", ".src.rpm", ".rpm"];

/// A package to build
///
/// Immutable once enqueued. Ordering among packages in a worklist is
/// significant: it determines build sequence and which artifacts earlier
/// builds make visible to later ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Package {
    reference: String,
}

impl Package {
    /// Create a package from a command-line reference
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    /// The reference exactly as given
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Whether the reference looks like a buildable package archive
    pub fn is_buildable(&self) -> bool {
        self.reference.ends_with(".rpm")
    }

    /// Base file name of the reference
    pub fn file_name(&self) -> &str {
        Path::new(&self.reference)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.reference)
    }

    /// Stable name for the per-package result directory
    ///
    /// The base file name with the most specific recognized suffix stripped.
    /// References without a recognized suffix keep their full base name.
    pub fn name(&self) -> &str {
        let file_name = self.file_name();
        for suffix in PACKAGE_SUFFIXES {
            if let Some(stripped) = file_name.strip_suffix(suffix) {
                if !stripped.is_empty() {
                    return stripped;
                }
            }
        }
        file_name
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference)
    }
}
