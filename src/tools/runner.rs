use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::process::{Command, Stdio};

use crate::foundation::error::{ReelError, ReelResult};

/// A fully built external tool invocation: program name plus argument vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    /// Program name, resolved through `PATH` when run.
    pub program: String,
    /// Arguments in order, passed without shell interpretation.
    pub args: Vec<OsString>,
}

impl ToolCommand {
    /// Start a command for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Arguments as (lossy) UTF-8 strings.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Last argument; every builder in this crate puts the output path there.
    pub fn last_arg(&self) -> Option<&OsStr> {
        self.args.last().map(OsString::as_os_str)
    }

    /// Space-joined rendering for logs.
    pub fn display(&self) -> String {
        let mut s = self.program.clone();
        for a in &self.args {
            s.push(' ');
            s.push_str(&a.to_string_lossy());
        }
        s
    }
}

/// Captured result of a finished tool process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Captured standard output.
    pub stdout: Vec<u8>,
    /// Captured standard error.
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    /// Successful exit with empty output.
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            success: true,
            ..Self::default()
        }
    }

    /// Successful exit with the given stdout.
    pub fn ok_with_stdout(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::ok()
        }
    }

    /// Failed exit with `code` and the given stderr.
    pub fn failed(code: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            code: Some(code),
            success: false,
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    /// Stderr decoded lossily and trimmed.
    pub fn stderr_trimmed(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_owned()
    }

    fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_owned(),
        }
    }
}

/// Runs external tools.
///
/// The pipeline only talks to the outside world through this trait, so tests can substitute
/// [`ScriptedRunner`] for real binaries.
pub trait CommandRunner {
    /// Run `cmd` to completion and capture its output.
    ///
    /// `Err` means the process could not be started at all; a non-zero exit is reported through
    /// [`ToolOutput::success`].
    fn run(&mut self, cmd: &ToolCommand) -> ReelResult<ToolOutput>;

    /// Return `true` when `program` can be found on `PATH`.
    fn is_available(&self, program: &str) -> bool;
}

/// Run `cmd` and turn a non-zero exit into [`ReelError::Tool`].
pub fn run_checked(runner: &mut dyn CommandRunner, cmd: &ToolCommand) -> ReelResult<ToolOutput> {
    tracing::debug!(command = %cmd.display(), "running tool");
    let out = runner.run(cmd)?;
    if !out.success {
        let stderr = out.stderr_trimmed();
        let detail = if stderr.is_empty() {
            out.status_text()
        } else {
            format!("{}: {stderr}", out.status_text())
        };
        return Err(ReelError::tool(&cmd.program, detail));
    }
    Ok(out)
}

/// [`CommandRunner`] backed by real processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a runner that spawns real processes.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, cmd: &ToolCommand) -> ReelResult<ToolOutput> {
        let out = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                ReelError::tool(
                    &cmd.program,
                    format!("failed to spawn (is it installed and on PATH?): {e}"),
                )
            })?;

        Ok(ToolOutput {
            code: out.status.code(),
            success: out.status.success(),
            stdout: out.stdout,
            stderr: out.stderr,
        })
    }

    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

type Handler = Box<dyn FnMut(&ToolCommand) -> ToolOutput + Send>;

/// Scripted runner for tests and dry runs.
///
/// Programs outside the availability set behave like missing binaries (spawn error); every
/// other call is answered by the handler. All calls are recorded in order.
pub struct ScriptedRunner {
    available: BTreeSet<String>,
    handler: Handler,
    calls: Vec<ToolCommand>,
}

impl ScriptedRunner {
    /// Create a runner answering available programs with `handler`.
    pub fn new(handler: impl FnMut(&ToolCommand) -> ToolOutput + Send + 'static) -> Self {
        Self {
            available: BTreeSet::new(),
            handler: Box::new(handler),
            calls: Vec::new(),
        }
    }

    /// Mark `programs` as installed.
    pub fn with_available<I, S>(mut self, programs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available.extend(programs.into_iter().map(Into::into));
        self
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> &[ToolCommand] {
        &self.calls
    }

    /// Commands run so far for `program`.
    pub fn calls_to<'a>(&'a self, program: &'a str) -> impl Iterator<Item = &'a ToolCommand> {
        self.calls.iter().filter(move |c| c.program == program)
    }
}

impl std::fmt::Debug for ScriptedRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedRunner")
            .field("available", &self.available)
            .field("calls", &self.calls.len())
            .finish_non_exhaustive()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&mut self, cmd: &ToolCommand) -> ReelResult<ToolOutput> {
        self.calls.push(cmd.clone());
        if !self.available.contains(&cmd.program) {
            return Err(ReelError::tool(&cmd.program, "failed to spawn: not found"));
        }
        Ok((self.handler)(cmd))
    }

    fn is_available(&self, program: &str) -> bool {
        self.available.contains(program)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tools/runner.rs"]
mod tests;
