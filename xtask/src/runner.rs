//! Process spawning seam. [`ProcessRunner`] starts real children; tests swap in
//! a recorder.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::identity::BuildIdentity;
use crate::plan::Step;

/// How a child process ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    Code(i32),
    /// No exit code was reported (terminated by a signal).
    Terminated,
}

impl Exit {
    pub fn success(self) -> bool {
        self == Self::Code(0)
    }
}

impl From<ExitStatus> for Exit {
    fn from(status: ExitStatus) -> Self {
        status.code().map_or(Self::Terminated, Self::Code)
    }
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "exited with status {code}"),
            Self::Terminated => f.write_str("was terminated by a signal"),
        }
    }
}

/// Everything a child needs: the step, where to run it and its build identity.
#[derive(Clone, Copy, Debug)]
pub struct Invocation<'a> {
    pub step: &'a Step,
    pub cwd: &'a Path,
    pub identity: &'a BuildIdentity,
}

pub trait Runner {
    /// Runs one step to completion. `Err` means the program never started.
    fn run(&mut self, invocation: Invocation<'_>) -> io::Result<Exit>;
}

/// Spawns steps as real child processes with inherited stdio.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn command(invocation: Invocation<'_>) -> Command {
        let mut cmd = Command::new(resolve_program(&invocation.step.program));
        cmd.args(&invocation.step.args)
            .envs(invocation.step.env.iter().map(|(k, v)| (*k, v)))
            .current_dir(invocation.cwd);
        invocation.identity.apply_to_command(&mut cmd);
        cmd
    }
}

impl Runner for ProcessRunner {
    fn run(&mut self, invocation: Invocation<'_>) -> io::Result<Exit> {
        Self::command(invocation).status().map(Exit::from)
    }
}

/// Looks the program up on `PATH` (with `PATHEXT` on Windows, so `npm.cmd`
/// is found). Falls back to the bare name and lets the spawn report it.
pub fn resolve_program(program: &Path) -> PathBuf {
    which::which(program).unwrap_or_else(|_| program.to_path_buf())
}
