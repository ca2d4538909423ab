use anyhow::{Context, Result, anyhow};
use ignore::WalkBuilder;
use log::{debug, trace};
use std::{
    env,
    path::{Path, PathBuf},
};

use crate::constants::{SKIPPED_DIRS, is_tsconfig_file_name};

/// Walks up from the current directory to the first one containing `.git`.
pub fn find_git_root() -> Result<PathBuf> {
    debug!("Searching for git root");
    let current_dir = env::current_dir().context("Failed to read current directory")?;
    find_git_root_from(&current_dir)
}

/// First of `start` and its ancestors that contains `.git`.
pub fn find_git_root_from(start: &Path) -> Result<PathBuf> {
    trace!("Starting search from: {:?}", start);
    start
        .ancestors()
        .find(|dir| {
            trace!("Checking for .git in: {:?}", dir);
            dir.join(".git").exists()
        })
        .map(|dir| {
            debug!("Found git root at: {:?}", dir);
            dir.to_path_buf()
        })
        .ok_or_else(|| anyhow!("Could not find .git directory above {}", start.display()))
}

/// Workspace-relative paths of every tsconfig file under `root`, sorted.
///
/// Honors `.gitignore` and never descends into `node_modules`.
pub fn collect_tsconfigs(root: &Path) -> Result<Vec<String>> {
    debug!("Collecting tsconfig files under {}", root.display());
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .filter_entry(|entry| {
            entry.file_name().to_str().is_none_or(|name| !SKIPPED_DIRS.contains(&name))
        })
        .build();

    let mut configs = Vec::new();
    for res in walker {
        let dent = res.with_context(|| format!("Failed to walk {}", root.display()))?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }

        if p.file_name().and_then(|n| n.to_str()).is_some_and(is_tsconfig_file_name) {
            let rel = p.strip_prefix(root).unwrap_or(p).to_string_lossy().replace('\\', "/");
            trace!("Found tsconfig at: {}", rel);
            configs.push(rel);
        }
    }

    configs.sort();
    debug!("Collected {} tsconfig files", configs.len());
    Ok(configs)
}
