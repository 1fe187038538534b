//! Project-level aggregation.
//!
//! Pulls the per-file analysis results, manifest metadata, route table and
//! deployment summary into one record, ready for rendering.

pub mod deploy;
pub mod manifest;

pub use deploy::{explain_cpu, explain_memory, DeploymentSummary};
pub use manifest::PackageManifest;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::analyzer::{walk, Analyzer};
use crate::config::Config;
use crate::extract;
use crate::facts::{FileAnalysis, Route};

/// Cap on the rendered structure listing.
const MAX_STRUCTURE_LINES: usize = 2000;

/// Root-level files worth calling out when present.
const NOTABLE_FILES: &[&str] = &["Dockerfile", ".env", "tsconfig.json", "swagger.json", "README.md"];

/// Aggregated facts for an entire project, ready for rendering.
///
/// Built once per run and discarded after the renderer consumes it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectRecord {
    /// Manifest metadata (empty defaults when package.json is absent).
    pub manifest: PackageManifest,
    /// Indented tree listing of the analyzed files.
    pub structure: String,
    /// Folder path to per-file outcomes, completion order within a folder.
    pub folders: BTreeMap<String, Vec<FileAnalysis>>,
    /// Routes pulled from the configured router file.
    pub routes: Vec<Route>,
    /// Deployment summary, when `deploy/k8s/` exists.
    pub deploy: Option<DeploymentSummary>,
    /// Analyzed paths plus notable root files that exist.
    pub key_files: Vec<String>,
}

impl ProjectRecord {
    /// Total number of per-file outcomes across all folders.
    pub fn file_count(&self) -> usize {
        self.folders.values().map(Vec::len).sum()
    }

    /// Number of error records across all folders.
    pub fn error_count(&self) -> usize {
        self.folders
            .values()
            .flatten()
            .filter(|a| a.is_err())
            .count()
    }
}

/// Build the project record for `root`.
///
/// Discovers files, runs the bounded analysis, then merges manifest, route
/// and deployment metadata. Only file discovery can fail; every metadata
/// read is best-effort.
pub async fn aggregate(
    root: &Path,
    analyzer: &Analyzer,
    config: &Config,
) -> anyhow::Result<ProjectRecord> {
    let files = walk::collect_files(root, config)?;
    let results = analyzer.analyze(&files).await;

    let mut record = ProjectRecord {
        manifest: PackageManifest::load(root),
        structure: structure_listing(root, &files),
        folders: group_by_folder(results),
        routes: extract_router_routes(&files, config),
        deploy: DeploymentSummary::load(root),
        key_files: Vec::new(),
    };

    record.key_files = files
        .iter()
        .map(|p| rel_string(root, p))
        .chain(
            NOTABLE_FILES
                .iter()
                .filter(|name| root.join(name).exists())
                .map(|name| name.to_string()),
        )
        .collect();

    Ok(record)
}

/// Group outcomes by containing folder, preserving completion order.
fn group_by_folder(results: Vec<FileAnalysis>) -> BTreeMap<String, Vec<FileAnalysis>> {
    let mut folders: BTreeMap<String, Vec<FileAnalysis>> = BTreeMap::new();
    for outcome in results {
        let folder = Path::new(outcome.path())
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| ".".to_string());
        folders.entry(folder).or_default().push(outcome);
    }
    folders
}

/// Routes from every collected file whose name matches the configured
/// router entry point.
fn extract_router_routes(files: &[PathBuf], config: &Config) -> Vec<Route> {
    let mut seen = std::collections::HashSet::new();
    files
        .iter()
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n == config.router_file)
                .unwrap_or(false)
        })
        .filter_map(|path| fs::read_to_string(path).ok())
        .flat_map(|text| extract::extract_routes(&text))
        .filter(|r| seen.insert((r.method.clone(), r.path.clone())))
        .collect()
}

/// Indented tree listing of the analyzed files.
fn structure_listing(root: &Path, files: &[PathBuf]) -> String {
    let mut lines = Vec::new();
    let mut seen_dirs = std::collections::HashSet::new();

    for file in files {
        let rel = rel_string(root, file);
        let rel_path = Path::new(&rel);
        let components: Vec<_> = rel_path.components().collect();

        let mut prefix = PathBuf::new();
        for (depth, comp) in components.iter().take(components.len() - 1).enumerate() {
            prefix.push(comp);
            if seen_dirs.insert(prefix.clone()) {
                lines.push(format!(
                    "{}- {}/",
                    "  ".repeat(depth),
                    comp.as_os_str().to_string_lossy()
                ));
            }
        }
        let depth = components.len() - 1;
        lines.push(format!(
            "{}- {}",
            "  ".repeat(depth),
            rel_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| rel.clone())
        ));
    }

    lines.truncate(MAX_STRUCTURE_LINES);
    lines.join("\n")
}

fn rel_string(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}
