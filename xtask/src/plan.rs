//! The fixed three-step command plan for one platform.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::platform::Platform;

pub const DEFAULT_NODE_TARGET: &str = "node12";
pub const PROJECT_MANIFEST: &str = "package.json";

/// Where `pkg` (and the project's icon-customising `dist-win` script) keep the
/// fetched node base binaries.
pub const PKG_CACHE_VAR: &str = "PKG_CACHE_PATH";

/// Programs and fixed arguments the plan is built from.
#[derive(Clone, Debug)]
pub struct Toolchain {
    pub npm: PathBuf,
    pub pkg: PathBuf,
    pub node: String,
    /// Passed to every step as `PKG_CACHE_PATH`. Relative paths resolve
    /// against the project directory, where the children run.
    pub pkg_cache: Option<PathBuf>,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            npm: PathBuf::from("npm"),
            pkg: PathBuf::from("pkg"),
            node: DEFAULT_NODE_TARGET.to_string(),
            pkg_cache: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Install,
    Package,
    Distribute,
}

impl StepKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Install => "install dependencies",
            Self::Package => "package binary",
            Self::Distribute => "assemble distribution",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Step {
    pub kind: StepKind,
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Extra child environment on top of the build identity.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<(&'static str, PathBuf)>,
}

impl Step {
    fn new(
        kind: StepKind,
        program: &Path,
        args: &[&str],
        env: &[(&'static str, PathBuf)],
    ) -> Self {
        Self {
            kind,
            program: program.to_path_buf(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            env: env.to_vec(),
        }
    }

    /// Human-readable command line. Display only, never handed to a shell.
    pub fn command_line(&self) -> String {
        let mut line = String::new();
        for (name, value) in &self.env {
            line.push_str(&format!("{name}={} ", value.display()));
        }
        line.push_str(&self.program.display().to_string());
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Plan {
    pub platform: Platform,
    pub steps: Vec<Step>,
}

impl Plan {
    pub fn new(platform: Platform, tools: &Toolchain) -> Self {
        let target = platform.pkg_target(&tools.node);
        let env: Vec<_> = tools
            .pkg_cache
            .iter()
            .map(|dir| (PKG_CACHE_VAR, dir.clone()))
            .collect();
        let steps = vec![
            Step::new(StepKind::Install, &tools.npm, &["install"], &env),
            Step::new(
                StepKind::Package,
                &tools.pkg,
                &[PROJECT_MANIFEST, "-t", target.as_str()],
                &env,
            ),
            Step::new(
                StepKind::Distribute,
                &tools.npm,
                &["run", platform.dist_script()],
                &env,
            ),
        ];
        Self { platform, steps }
    }
}
