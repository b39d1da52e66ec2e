//! Integration tests for fatal configuration errors
//!
//! Configuration problems abort the run with exit code 1 before any build is
//! attempted; build failures use exit code 2 and are covered elsewhere.

mod common;

use common::{stderr_of, stdout_of, BuildSandbox};

#[test]
fn test_no_packages_is_fatal() {
    let sandbox = BuildSandbox::new();

    let output = sandbox.run_chain(&[], &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("You need to specify at least 1 package to build"));
}

#[test]
fn test_missing_root_is_fatal() {
    let sandbox = BuildSandbox::new();

    let mut cmd = sandbox.command();
    cmd.arg("x-1.0-1.src.rpm");
    let output = cmd.output().expect("Failed to execute chainbuild");

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr_of(&output).contains("You must provide an argument to -r for the build root")
    );
}

#[test]
fn test_unknown_build_root_is_fatal() {
    let sandbox = BuildSandbox::new();

    let mut cmd = sandbox.command();
    cmd.args(["-r", "missing", "--localrepo"]);
    cmd.arg(sandbox.repo_dir());
    cmd.arg("x-1.0-1.src.rpm");
    let output = cmd.output().expect("Failed to execute chainbuild");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Unable to read build root config"));
}

#[test]
fn test_missing_static_file_is_fatal() {
    let sandbox = BuildSandbox::new();
    std::fs::remove_file(sandbox.configdir().join("logging.ini")).unwrap();

    let output = sandbox.run_chain(&[], &["x-1.0-1.src.rpm"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Static config file not found"));
    // The failure happens before any tool is spawned.
    assert!(sandbox.recorded().is_empty());
}

#[test]
fn test_missing_build_tool_is_fatal() {
    let sandbox = BuildSandbox::new();

    let mut cmd = sandbox.command();
    cmd.env("CHAINBUILD_BUILD_TOOL", "/nonexistent/build-tool");
    cmd.args(["-r", "rawhide", "--localrepo"]);
    cmd.arg(sandbox.repo_dir());
    cmd.arg("x-1.0-1.src.rpm");
    let output = cmd.output().expect("Failed to execute chainbuild");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("'/nonexistent/build-tool' not found on PATH"));
}

#[test]
fn test_initial_index_failure_is_fatal() {
    let sandbox = BuildSandbox::new();

    let mut cmd = sandbox.command();
    cmd.env("CHAIN_INDEX_FAIL", "1");
    cmd.args(["-r", "rawhide", "--localrepo"]);
    cmd.arg(sandbox.repo_dir());
    cmd.arg("x-1.0-1.src.rpm");
    let output = cmd.output().expect("Failed to execute chainbuild");

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Error making local repo:"));
    assert!(stdout.contains("Err: "));
    assert!(stdout.contains("index explosion"));
    assert!(stderr_of(&output).contains("could not create the initial repository index"));
    assert!(sandbox.recorded().is_empty());
}

#[test]
fn test_index_stderr_alone_is_failure() {
    let sandbox = BuildSandbox::new();

    let mut cmd = sandbox.command();
    cmd.env("CHAIN_INDEX_STDERR", "1");
    cmd.args(["-r", "rawhide", "--localrepo"]);
    cmd.arg(sandbox.repo_dir());
    cmd.arg("x-1.0-1.src.rpm");
    let output = cmd.output().expect("Failed to execute chainbuild");

    // The indexer exits zero here; its stderr output alone fails the run.
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("index warning"));
}

#[test]
fn test_later_index_failure_keeps_the_run_alive() {
    let sandbox = BuildSandbox::new();

    let mut cmd = sandbox.command();
    cmd.env("CHAIN_INDEX_FAIL_AFTER", "1");
    cmd.args(["-r", "rawhide", "--localrepo"]);
    cmd.arg(sandbox.repo_dir());
    cmd.arg("x-1.0-1.src.rpm");
    let output = cmd.output().expect("Failed to execute chainbuild");

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Success building x-1.0-1.src.rpm"));
    assert!(stdout.contains("Error making local repo:"));
    assert!(sandbox.marker("x-1.0-1", "success").exists());
}
