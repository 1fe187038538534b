//! Run configuration for readmint.
//!
//! A `readmint.yaml` at the project root customizes scanning and generation;
//! every field has a default so the file is optional. The cache directory is
//! injected here rather than read from a process-wide constant.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Default config file names to search for.
const DEFAULT_CONFIG_NAMES: &[&str] = &["readmint.yaml", ".readmint.yaml"];

/// Directory names never descended into during the walk.
pub const SKIP_DIRS: &[&str] = &["node_modules", "vendor", "target", "dist", "build"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// File extensions treated as source files.
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
    /// Glob patterns for paths to exclude from analysis.
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// File name scanned for route declarations.
    #[serde(default = "default_router_file")]
    pub router_file: String,
    /// Worker pool size for parallel analysis.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Per-file read bound, in characters.
    #[serde(default = "default_max_file_chars")]
    pub max_file_chars: usize,
    /// Cache directory override; platform cache dir when absent.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Output path for the generated document, relative to the project root.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Text-generation model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the Ollama-compatible endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout for generation calls, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_source_extensions() -> Vec<String> {
    ["js", "ts", "jsx", "tsx", "mjs", "cjs"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_router_file() -> String {
    "router.js".to_string()
}

fn default_workers() -> usize {
    3
}

fn default_max_file_chars() -> usize {
    20_000
}

fn default_output() -> PathBuf {
    PathBuf::from("README.generated.md")
}

fn default_model() -> String {
    "qwen2.5-coder:14b".to_string()
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_extensions: default_source_extensions(),
            excluded_paths: Vec::new(),
            router_file: default_router_file(),
            workers: default_workers(),
            max_file_chars: default_max_file_chars(),
            cache_dir: None,
            output: default_output(),
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config discovered under `root`, or defaults when absent.
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        match discover_config(root) {
            Some(path) => Self::parse_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Check whether a path matches the configured extension set.
    pub fn matches_extension(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.source_extensions.iter().any(|e| e == ext)
    }

    /// Check if a path should be excluded based on excluded_paths patterns.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }

    /// The cache directory to use: the configured override, or the platform
    /// cache dir. `None` when neither is available (caching disabled).
    pub fn resolved_cache_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.cache_dir {
            return Some(dir.clone());
        }
        ProjectDirs::from("", "", "readmint").map(|dirs| dirs.cache_dir().join("analysis"))
    }
}

/// Discover a config file under `root`.
fn discover_config(root: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.exists())
}
