//! Default configuration values

/// Default external build tool
pub const DEFAULT_BUILD_TOOL: &str = "mock";

/// Default repository indexing tool
pub const DEFAULT_INDEX_TOOL: &str = "createrepo_c";

/// Default directory holding build-root configs
pub const DEFAULT_CONFIG_DIR: &str = "/etc/chainbuild";

/// File name of the per-package success marker
pub const SUCCESS_MARKER: &str = "success";

/// File name of the per-package failure marker
pub const FAIL_MARKER: &str = "fail";

/// Content written into a success marker
pub const SUCCESS_MARKER_CONTENT: &str = "done\n";

/// Content written into a failure marker
pub const FAIL_MARKER_CONTENT: &str = "undone\n";

/// Path, relative to a repository, that proves an index exists
pub const REPO_INDEX_MARKER: &str = "repodata/repomd.xml";

/// Repo id under which the local build repository is injected
pub const LOCAL_REPO_ID: &str = "local_build_repo";

/// File name of the run log inside `--logdir`
pub const LOG_FILE_NAME: &str = "chainbuild.log";

/// Support files copied verbatim from the config dir into each run's
/// derived config directory
pub const STATIC_CONFIG_FILES: &[&str] = &["site-defaults.toml", "logging.ini"];

/// Exit code for fatal configuration errors
pub const EXIT_FATAL: i32 = 1;

/// Exit code when one or more packages permanently failed to build
pub const EXIT_BUILD_FAILED: i32 = 2;

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
