//! Build tool invocation
//!
//! Spawns the external build tool (mock by default) for one package and
//! captures its output. The command line mirrors what an operator would run
//! by hand and is echoed to the run log before spawning.

use std::ffi::OsString;
use std::process::Command;

use crate::core::builder::{BuildRequest, BuildTool, ToolOutput};
use crate::error::BuildError;
use crate::infra::logfile::RunLog;

/// The production build tool invoker
#[derive(Debug)]
pub struct MockTool {
    program: String,
    log: RunLog,
}

impl MockTool {
    /// Create an invoker for the given executable
    pub fn new(program: impl Into<String>, log: RunLog) -> Self {
        Self {
            program: program.into(),
            log,
        }
    }

    /// Argument list for one attempt, without the program itself
    fn command_args(request: &BuildRequest<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        args.push("--nocheck".into());
        args.push("--configdir".into());
        args.push(request.config_dir.into());
        args.push("--resultdir".into());
        args.push(request.result_dir.into());
        args.push("--uniqueext".into());
        args.push(request.unique_ext.into());
        args.push("-r".into());
        args.push(request.chroot.into());
        for option in request.options {
            args.push(option.into());
        }
        args.push(request.package.reference().into());
        args
    }
}

impl BuildTool for MockTool {
    fn run(&self, request: &BuildRequest<'_>) -> Result<ToolOutput, BuildError> {
        let args = Self::command_args(request);
        self.log.event(&format!(
            "Executing: {}",
            render_command(&self.program, &args)
        ));
        tracing::debug!(
            "Spawning build tool '{}' for {}",
            self.program,
            request.package
        );

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| BuildError::ToolSpawn {
                tool: self.program.clone(),
                error: e.to_string(),
            })?;

        Ok(ToolOutput {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Render a command line the way an operator would retype it
fn render_command(program: &str, args: &[OsString]) -> String {
    let mut rendered = String::from(program);
    for arg in args {
        let text = arg.to_string_lossy();
        rendered.push(' ');
        if text.contains(' ') {
            rendered.push('"');
            rendered.push_str(&text);
            rendered.push('"');
        } else {
            rendered.push_str(&text);
        }
    }
    rendered
}
