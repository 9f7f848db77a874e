use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::dispatch;
use crate::identity::{BuildIdentity, BUILD_NUMBER_VAR, BUILD_REVISION_VAR};
use crate::plan::Plan;
use crate::runner::ProcessRunner;

pub fn run(opts: &GlobalOpts) -> Result<()> {
    let identity = resolve_identity();
    let root = crate::util::repo::project_dir(opts.project_dir.as_deref())?;
    let plan = Plan::new(opts.platform(), &opts.toolchain());

    log::info!("Project: {}", root.display());
    log::info!("Platform: {}", plan.platform);

    dispatch::run_plan(&plan, &identity, &root, &mut ProcessRunner)?;
    log::info!("{} distribution ready", plan.platform);
    Ok(())
}

/// Reads the identity from the environment and reports how it was obtained.
fn resolve_identity() -> BuildIdentity {
    let identity = BuildIdentity::from_env();
    match (&identity.number, &identity.revision) {
        (number, _) if identity.defaulted => log::info!(
            "{BUILD_NUMBER_VAR} not set; number and revision default to {}",
            number.to_string_lossy()
        ),
        (_, None) => log::warn!(
            "{BUILD_NUMBER_VAR} is set but {BUILD_REVISION_VAR} is not; children get no revision"
        ),
        (number, Some(revision)) => log::info!(
            "Build identity: {} ({})",
            number.to_string_lossy(),
            revision.to_string_lossy()
        ),
    }
    identity
}
