use anyhow::{bail, Result};
use std::path::Path;

use crate::cli::GlobalOpts;

pub fn run(opts: &GlobalOpts) -> Result<()> {
    let root = crate::util::repo::project_dir(opts.project_dir.as_deref())?;
    let manifest = crate::util::repo::manifest_path(&root);

    let mut ok = true;

    if manifest.is_file() {
        eprintln!("[OK] {}", manifest.display());
    } else {
        eprintln!("[FAIL] missing project manifest: {}", manifest.display());
        ok = false;
    }

    let tools = opts.toolchain();
    for program in [&tools.npm, &tools.pkg] {
        ok &= check_tool(program);
    }

    if !ok {
        bail!("doctor checks failed");
    }
    Ok(())
}

fn check_tool(program: &Path) -> bool {
    match which::which(program) {
        Ok(found) => {
            eprintln!("[OK] {} ({})", program.display(), found.display());
            true
        }
        Err(_) => {
            eprintln!("[FAIL] missing `{}` in PATH", program.display());
            false
        }
    }
}
