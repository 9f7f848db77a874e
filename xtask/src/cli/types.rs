use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::plan::{Toolchain, DEFAULT_NODE_TARGET};
use crate::platform::Platform;

#[derive(Parser, Debug)]
#[command(name = "pulse-build")]
#[command(about = "Package the Pulse project into a per-platform binary and distribution")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub opts: GlobalOpts,

    /// Defaults to `dist` when omitted.
    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    #[arg(
        long = "project-dir",
        global = true,
        help = "Directory holding package.json; children run here. Defaults to the current directory."
    )]
    pub project_dir: Option<PathBuf>,

    #[arg(
        long = "platform",
        value_enum,
        global = true,
        help = "Build for this platform instead of the detected host."
    )]
    pub platform: Option<Platform>,

    #[arg(long = "npm", env = "PULSE_NPM", default_value = "npm", global = true)]
    pub npm: PathBuf,

    #[arg(long = "pkg", env = "PULSE_PKG", default_value = "pkg", global = true)]
    pub pkg: PathBuf,

    #[arg(
        long = "node",
        env = "PULSE_NODE_TARGET",
        default_value = DEFAULT_NODE_TARGET,
        global = true,
        help = "Node runtime tag prefixed to the pkg target (node12 -> node12-linux-x64)."
    )]
    pub node: String,

    #[arg(
        long = "pkg-cache",
        env = "PKG_CACHE_PATH",
        global = true,
        help = "pkg base-binary cache (e.g. ./pkg-cache holding the icon-customised Windows binary). Passed to every step as PKG_CACHE_PATH."
    )]
    pub pkg_cache: Option<PathBuf>,
}

impl GlobalOpts {
    pub fn toolchain(&self) -> Toolchain {
        Toolchain {
            npm: self.npm.clone(),
            pkg: self.pkg.clone(),
            node: self.node.clone(),
            pkg_cache: self.pkg_cache.clone(),
        }
    }

    /// Explicit `--platform` wins over host detection.
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::detect)
    }
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Install dependencies, package the binary and assemble the distribution.
    Dist,

    /// Print the commands `dist` would run, without running them.
    Plan {
        #[arg(long, help = "Emit the plan as JSON.")]
        json: bool,
    },

    /// Print shell exports for the resolved build identity.
    ///
    /// Usage:
    ///   eval "$(pulse-build env bash)"
    Env {
        #[arg(value_enum, default_value_t = Shell::Bash)]
        shell: Shell,
    },

    /// Check that package.json, npm and pkg are where `dist` expects them.
    Doctor,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Shell {
    Bash,
    Sh,
    Powershell,
}
