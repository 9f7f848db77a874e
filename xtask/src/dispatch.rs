use std::path::Path;

use crate::error::DispatchError;
use crate::identity::BuildIdentity;
use crate::plan::Plan;
use crate::runner::{Invocation, Runner};

/// Runs the plan's steps in order and stops at the first one that fails.
///
/// Nothing is retried or cleaned up. The failing child's own output has
/// already reached the terminal through inherited stdio.
pub fn run_plan<R: Runner>(
    plan: &Plan,
    identity: &BuildIdentity,
    cwd: &Path,
    runner: &mut R,
) -> Result<(), DispatchError> {
    let total = plan.steps.len();
    for (n, step) in plan.steps.iter().enumerate() {
        log::info!("step {}/{total}: {}", n + 1, step.command_line());

        let invocation = Invocation {
            step,
            cwd,
            identity,
        };
        let exit = runner
            .run(invocation)
            .map_err(|source| DispatchError::Spawn {
                step: step.kind,
                program: step.program.clone(),
                source,
            })?;

        if !exit.success() {
            return Err(DispatchError::Failed {
                step: step.kind,
                program: step.program.clone(),
                exit,
            });
        }
        log::debug!("{} ok", step.kind);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::identity::{BUILD_NUMBER_VAR, BUILD_REVISION_VAR};
    use crate::plan::{StepKind, Toolchain};
    use crate::platform::Platform;
    use crate::runner::Exit;
    use std::collections::HashMap;
    use std::io;
    use std::path::PathBuf;

    #[derive(Debug)]
    struct Seen {
        kind: StepKind,
        args: Vec<String>,
        cwd: PathBuf,
        env: HashMap<&'static str, String>,
    }

    /// Records invocations and answers with scripted exits.
    #[derive(Default)]
    struct Recorder {
        exits: HashMap<StepKind, Exit>,
        unspawnable: Option<StepKind>,
        seen: Vec<Seen>,
    }

    impl Recorder {
        fn failing(kind: StepKind, code: i32) -> Self {
            let mut r = Self::default();
            r.exits.insert(kind, Exit::Code(code));
            r
        }

        fn kinds(&self) -> Vec<StepKind> {
            self.seen.iter().map(|s| s.kind).collect()
        }
    }

    impl Runner for Recorder {
        fn run(&mut self, inv: Invocation<'_>) -> io::Result<Exit> {
            self.seen.push(Seen {
                kind: inv.step.kind,
                args: inv.step.args.clone(),
                cwd: inv.cwd.to_path_buf(),
                env: inv
                    .identity
                    .vars()
                    .into_iter()
                    .map(|(k, v)| (k, v.to_string_lossy().into_owned()))
                    .collect(),
            });
            if self.unspawnable == Some(inv.step.kind) {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such program"));
            }
            Ok(self
                .exits
                .get(&inv.step.kind)
                .copied()
                .unwrap_or(Exit::Code(0)))
        }
    }

    fn linux_plan() -> Plan {
        Plan::new(Platform::Linux, &Toolchain::default())
    }

    fn defaulted() -> BuildIdentity {
        BuildIdentity::resolve(|_| None)
    }

    #[test]
    fn all_steps_succeed_end_to_end() {
        let mut rec = Recorder::default();
        let cwd = Path::new("/work/pulse");
        run_plan(&linux_plan(), &defaulted(), cwd, &mut rec).unwrap();

        assert_eq!(
            rec.kinds(),
            [StepKind::Install, StepKind::Package, StepKind::Distribute]
        );
        let package = &rec.seen[1];
        assert!(package.args.iter().any(|a| a.contains("linux-x64")));
        assert_eq!(package.env[BUILD_NUMBER_VAR], "0");
        assert_eq!(package.env[BUILD_REVISION_VAR], "0");
        assert!(rec.seen.iter().all(|s| s.cwd == cwd));
    }

    #[test]
    fn install_failure_stops_before_packaging() {
        let mut rec = Recorder::failing(StepKind::Install, 1);
        let err = run_plan(&linux_plan(), &defaulted(), Path::new("."), &mut rec).unwrap_err();

        assert_eq!(rec.kinds(), [StepKind::Install]);
        assert!(matches!(err, DispatchError::Failed { step: StepKind::Install, .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn package_failure_skips_distribution() {
        let mut rec = Recorder::failing(StepKind::Package, 42);
        let err = run_plan(&linux_plan(), &defaulted(), Path::new("."), &mut rec).unwrap_err();

        assert_eq!(rec.kinds(), [StepKind::Install, StepKind::Package]);
        assert!(matches!(err, DispatchError::Failed { step: StepKind::Package, .. }));
        assert_eq!(err.exit_code(), 42);
    }

    #[test]
    fn distribution_failure_is_reported() {
        let mut rec = Recorder::failing(StepKind::Distribute, 5);
        let err = run_plan(&linux_plan(), &defaulted(), Path::new("."), &mut rec).unwrap_err();

        assert_eq!(rec.kinds().len(), 3);
        assert!(matches!(
            err,
            DispatchError::Failed {
                step: StepKind::Distribute,
                exit: Exit::Code(5),
                ..
            }
        ));
    }

    #[test]
    fn signal_termination_is_a_failure() {
        let mut rec = Recorder::default();
        rec.exits.insert(StepKind::Install, Exit::Terminated);
        let err = run_plan(&linux_plan(), &defaulted(), Path::new("."), &mut rec).unwrap_err();
        assert_eq!(rec.kinds(), [StepKind::Install]);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn missing_program_aborts_with_spawn_error() {
        let mut rec = Recorder {
            unspawnable: Some(StepKind::Package),
            ..Recorder::default()
        };
        let err = run_plan(&linux_plan(), &defaulted(), Path::new("."), &mut rec).unwrap_err();

        assert_eq!(rec.kinds(), [StepKind::Install, StepKind::Package]);
        assert!(matches!(err, DispatchError::Spawn { step: StepKind::Package, .. }));
        assert_eq!(err.exit_code(), 127);
    }

    #[test]
    fn caller_identity_is_passed_through_unchanged() {
        let identity = BuildIdentity::resolve(|key| match key {
            BUILD_NUMBER_VAR => Some("1203".into()),
            BUILD_REVISION_VAR => Some("e4d1".into()),
            _ => None,
        });
        let mut rec = Recorder::default();
        run_plan(&linux_plan(), &identity, Path::new("."), &mut rec).unwrap();

        for seen in &rec.seen {
            assert_eq!(seen.env[BUILD_NUMBER_VAR], "1203");
            assert_eq!(seen.env[BUILD_REVISION_VAR], "e4d1");
        }
    }

    #[test]
    fn windows_plan_packages_win_target() {
        let plan = Plan::new(Platform::Windows, &Toolchain::default());
        let mut rec = Recorder::default();
        run_plan(&plan, &defaulted(), Path::new("."), &mut rec).unwrap();
        assert!(rec.seen[1].args.iter().any(|a| a.contains("win-x64")));
        assert_eq!(rec.seen[2].args, ["run", "dist-win"]);
    }
}
