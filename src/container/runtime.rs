//! Container runtime process execution

use crate::error::{Result, SvcError};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Captured output of a finished runtime command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: &str) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failed(code: i32, stderr: &str) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    /// Check if the command exited with status zero
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    fn status_string(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs container runtime commands
pub trait CommandRunner {
    /// Run the runtime with `args` and wait for it to finish
    fn run(&self, args: &[String]) -> Result<CommandOutput>;

    /// Human readable command line, used in errors and logs
    fn describe(&self, args: &[String]) -> String;

    /// Run and fail with [`SvcError::Runtime`] on a non-zero exit
    fn run_checked(&self, args: &[String]) -> Result<CommandOutput> {
        let output = self.run(args)?;
        if !output.success() {
            return Err(SvcError::Runtime {
                command: self.describe(args),
                status: output.status_string(),
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }
}

/// Runs the runtime binary as a child process
#[derive(Debug, Clone)]
pub struct SystemRunner {
    program: PathBuf,
}

impl SystemRunner {
    /// Create a runner for the given runtime binary
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runtime binary path
    pub fn program(&self) -> &PathBuf {
        &self.program
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, args: &[String]) -> Result<CommandOutput> {
        debug!("Running {}", self.describe(args));

        let output = Command::new(&self.program).args(args).output()?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn describe(&self, args: &[String]) -> String {
        let mut line = self.program.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}
