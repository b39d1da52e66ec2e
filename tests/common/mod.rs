//! Common test utilities and helpers
//!
//! This module provides a sandbox for integration tests: a config dir with a
//! usable build root, fake build/index tools driven by environment variables,
//! and a record file capturing the order of tool invocations.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Build root config served from the sandbox config dir as `rawhide.toml`
pub const RAWHIDE_CONFIG: &str = r#"
chroot_name = "fedora-rawhide-x86_64"
"yum.conf" = "[main]\ndebuglevel=1\nreposdir=/dev/null\n"
"#;

/// Fake build tool
///
/// Records `build <package file>` into `$CHAIN_RECORD`, fails packages named
/// in `$CHAIN_FAIL` (comma separated), and fails the first attempt of
/// packages named in `$CHAIN_FLAKY`.
const BUILD_TOOL_SCRIPT: &str = r#"#!/bin/sh
eval "pkg=\${$#}"
name=$(basename "$pkg")
printf 'build %s\n' "$name" >> "$CHAIN_RECORD"
case ",$CHAIN_FAIL," in
    *",$name,"*)
        echo "build error for $name" >&2
        exit 1
        ;;
esac
case ",$CHAIN_FLAKY," in
    *",$name,"*)
        if [ ! -e "$CHAIN_STATE/$name.tried" ]; then
            : > "$CHAIN_STATE/$name.tried"
            echo "flaky first attempt for $name" >&2
            exit 1
        fi
        ;;
esac
exit 0
"#;

/// Fake repository indexer
///
/// Records `index-full` or `index-update` depending on whether `--update`
/// was passed, and creates `repodata/repomd.xml` so the next run updates.
/// `$CHAIN_INDEX_FAIL` fails every call, `$CHAIN_INDEX_STDERR` produces
/// stderr with a clean exit, `$CHAIN_INDEX_FAIL_AFTER` fails every call
/// after the given count.
const INDEX_TOOL_SCRIPT: &str = r#"#!/bin/sh
if [ -n "$CHAIN_INDEX_FAIL" ]; then
    echo "index explosion" >&2
    exit 1
fi
if [ -n "$CHAIN_INDEX_STDERR" ]; then
    echo "index warning" >&2
    exit 0
fi
count_file="$CHAIN_STATE/index.count"
count=$(cat "$count_file" 2>/dev/null || echo 0)
count=$((count + 1))
printf '%s\n' "$count" > "$count_file"
if [ -n "$CHAIN_INDEX_FAIL_AFTER" ] && [ "$count" -gt "$CHAIN_INDEX_FAIL_AFTER" ]; then
    echo "index explosion" >&2
    exit 1
fi
eval "repo=\${$#}"
if [ "$1" = "--update" ]; then
    printf 'index-update\n' >> "$CHAIN_RECORD"
else
    printf 'index-full\n' >> "$CHAIN_RECORD"
fi
mkdir -p "$repo/repodata"
: > "$repo/repodata/repomd.xml"
exit 0
"#;

/// Sandboxed environment for one chain run
pub struct BuildSandbox {
    /// Temporary directory holding configs, tools, repo and records
    pub dir: TempDir,
}

impl BuildSandbox {
    /// Create a sandbox with a working build root and fake tools
    pub fn new() -> Self {
        let sandbox = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        sandbox.create_dir("state");
        sandbox.create_file("configs/rawhide.toml", RAWHIDE_CONFIG);
        sandbox.create_file("configs/site-defaults.toml", "# site defaults\n");
        sandbox.create_file("configs/logging.ini", "# logging\n");
        sandbox.install_tool("buildtool", BUILD_TOOL_SCRIPT);
        sandbox.install_tool("indextool", INDEX_TOOL_SCRIPT);
        sandbox
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn configdir(&self) -> PathBuf {
        self.path().join("configs")
    }

    pub fn repo_dir(&self) -> PathBuf {
        self.path().join("repo")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.path().join("state")
    }

    pub fn record_file(&self) -> PathBuf {
        self.path().join("record")
    }

    pub fn build_tool(&self) -> PathBuf {
        self.path().join("bin/buildtool")
    }

    pub fn index_tool(&self) -> PathBuf {
        self.path().join("bin/indextool")
    }

    /// Marker file path for a package result directory
    pub fn marker(&self, package_name: &str, marker: &str) -> PathBuf {
        self.repo_dir().join(package_name).join(marker)
    }

    /// Create a file in the sandbox
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the sandbox
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    fn install_tool(&self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        self.create_file(&format!("bin/{name}"), script);
        let path = self.path().join("bin").join(name);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to mark tool executable");
    }

    /// Tool invocations recorded so far, in order
    pub fn recorded(&self) -> Vec<String> {
        match std::fs::read_to_string(self.record_file()) {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Forget recorded invocations, typically between two runs
    pub fn clear_record(&self) {
        let _ = std::fs::remove_file(self.record_file());
    }

    /// Preconfigured chainbuild command wired to the fake tools
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_chainbuild"));
        cmd.current_dir(self.path());
        cmd.env("CHAINBUILD_BUILD_TOOL", self.build_tool());
        cmd.env("CHAINBUILD_INDEX_TOOL", self.index_tool());
        cmd.env("CHAINBUILD_CONFIG_DIR", self.configdir());
        cmd.env("CHAIN_RECORD", self.record_file());
        cmd.env("CHAIN_STATE", self.state_dir());
        cmd.env("USER", "tester");
        cmd.env_remove("CHAIN_FAIL");
        cmd.env_remove("CHAIN_FLAKY");
        cmd.env_remove("CHAIN_INDEX_FAIL");
        cmd.env_remove("CHAIN_INDEX_STDERR");
        cmd.env_remove("CHAIN_INDEX_FAIL_AFTER");
        cmd
    }

    /// Run a chain over the given packages against the sandbox repo
    pub fn run_chain(&self, extra_args: &[&str], packages: &[&str]) -> Output {
        let mut cmd = self.command();
        cmd.args(["-r", "rawhide", "--localrepo"]);
        cmd.arg(self.repo_dir());
        cmd.args(extra_args);
        for package in packages {
            cmd.arg(package);
        }
        cmd.output().expect("Failed to execute chainbuild")
    }
}

impl Default for BuildSandbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode captured stdout for containment assertions
pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Decode captured stderr for containment assertions
pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
