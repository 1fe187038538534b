//! Candidate file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{Config, SKIP_DIRS};

/// Collect every file under `root` matching the configured predicate.
///
/// Hidden directories and vendored trees are never descended into.
pub fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            if e.file_type().is_dir() && name.starts_with('.') && e.depth() > 0 {
                return false;
            }
            if e.file_type().is_dir() && SKIP_DIRS.contains(&name.as_ref()) {
                return false;
            }
            true
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !config.matches_extension(path) {
            continue;
        }
        let rel = path.strip_prefix(root).unwrap_or(path);
        if config.is_path_excluded(rel) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    // Walk order is filesystem-dependent; sort so the task list is stable
    files.sort();
    Ok(files)
}
