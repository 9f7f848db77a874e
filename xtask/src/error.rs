use std::io;
use std::path::PathBuf;

use crate::plan::StepKind;
use crate::runner::Exit;

/// Exit code used when a step's program could not be started.
pub const SPAWN_FAILURE_CODE: i32 = 127;

/// Exit code used when a step ended without one (killed by a signal).
pub const TERMINATED_CODE: i32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{step} failed: `{}` {exit}", program.display())]
    Failed {
        step: StepKind,
        program: PathBuf,
        exit: Exit,
    },

    #[error("{step} failed: could not start `{}`", program.display())]
    Spawn {
        step: StepKind,
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DispatchError {
    /// Process exit code the dispatcher should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Failed {
                exit: Exit::Code(code),
                ..
            } => *code,
            Self::Failed {
                exit: Exit::Terminated,
                ..
            } => TERMINATED_CODE,
            Self::Spawn { .. } => SPAWN_FAILURE_CODE,
        }
    }
}

/// Maps any application error to a process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<DispatchError>())
        .map_or(1, DispatchError::exit_code)
}
