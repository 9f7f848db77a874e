use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::plan::PROJECT_MANIFEST;

/// Directory the children run in: `--project-dir` if given, else the cwd.
pub fn project_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => {
            if !dir.is_dir() {
                anyhow::bail!("Project directory does not exist: {}", dir.display());
            }
            Ok(dir.to_path_buf())
        }
        None => env::current_dir().context("Reading current directory"),
    }
}

pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(PROJECT_MANIFEST)
}
