//! Package manifest metadata.
//!
//! Reads `package.json` best-effort: an absent or malformed file reduces to
//! empty defaults, never an error.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Manifest metadata merged into the project record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub description: String,
    /// Dependency names only; versions are irrelevant to the document.
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
    /// Script name to command mapping.
    pub scripts: BTreeMap<String, String>,
}

/// On-disk shape of the fields we read from package.json.
#[derive(Deserialize, Default)]
struct RawPackageJson {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    scripts: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Load the manifest under `root`, or defaults when absent or malformed.
    pub fn load(root: &Path) -> Self {
        let raw = fs::read_to_string(root.join("package.json"))
            .ok()
            .and_then(|content| serde_json::from_str::<RawPackageJson>(&content).ok())
            .unwrap_or_default();

        Self {
            name: raw.name,
            description: raw.description,
            dependencies: raw.dependencies.into_keys().collect(),
            dev_dependencies: raw.dev_dependencies.into_keys().collect(),
            scripts: raw.scripts,
        }
    }
}
