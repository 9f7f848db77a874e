use anyhow::{Context, Result};

use crate::cli::GlobalOpts;
use crate::identity::{BuildIdentity, IdentityView};
use crate::plan::Plan;

#[derive(serde::Serialize)]
struct PlanReport<'a> {
    identity: IdentityView,
    #[serde(flatten)]
    plan: &'a Plan,
}

pub fn run(opts: &GlobalOpts, json: bool) -> Result<()> {
    let identity = BuildIdentity::from_env();
    let plan = Plan::new(opts.platform(), &opts.toolchain());

    if json {
        let report = PlanReport {
            identity: identity.view(),
            plan: &plan,
        };
        let out = serde_json::to_string_pretty(&report).context("Serializing plan")?;
        println!("{out}");
    } else {
        print!("{}", render_text(&identity, &plan));
    }
    Ok(())
}

fn render_text(identity: &BuildIdentity, plan: &Plan) -> String {
    let mut out = format!("platform: {}\n", plan.platform);
    for (name, value) in identity.vars() {
        out.push_str(&format!("env: {name}={}\n", value.to_string_lossy()));
    }
    for (n, step) in plan.steps.iter().enumerate() {
        out.push_str(&format!("{}. [{}] {}\n", n + 1, step.kind, step.command_line()));
    }
    out
}
