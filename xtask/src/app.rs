use anyhow::Result;

use crate::cli::{Cli, Cmd};

pub fn run(cli: Cli) -> Result<()> {
    let opts = cli.opts;
    match cli.cmd.unwrap_or(Cmd::Dist) {
        Cmd::Dist => crate::tasks::dist::run(&opts),
        Cmd::Plan { json } => crate::tasks::plan::run(&opts, json),
        Cmd::Env { shell } => crate::tasks::tooling::env::run(shell),
        Cmd::Doctor => crate::tasks::tooling::doctor::run(&opts),
    }
}
