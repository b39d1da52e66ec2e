//! Output formatting for the command line
//!
//! Per-package progress goes through the run log so that it lands in the
//! logfile and on the terminal with the same wording. This module only
//! carries the terminal status prefixes and the final error presenter.

/// Print an error and its cause chain to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} Error: {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  Caused by: {cause}");
    }
}

/// Status message prefixes
pub mod status {
    /// Error prefix (red X)
    pub const ERROR: &str = "✗";
}
