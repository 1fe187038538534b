//! Deployment manifest metadata.
//!
//! Best-effort structured lookups into Kubernetes YAML under `deploy/k8s/`:
//! container resource requests/limits from the deployment manifest, and
//! externally reachable hostnames from the per-environment ingress files.
//! Missing files and malformed YAML reduce to absent values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Relative directory holding the Kubernetes manifests.
const K8S_DIR: &str = "deploy/k8s";

/// Per-environment ingress file name.
const INGRESS_FILE: &str = "2-ingress.yaml";

/// CPU/memory quantities with human-readable forms precomputed for the
/// renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceQuantities {
    pub cpu: Option<String>,
    pub memory: Option<String>,
    pub cpu_text: Option<String>,
    pub memory_text: Option<String>,
}

impl ResourceQuantities {
    fn from_yaml(value: &Value) -> Option<Self> {
        let cpu = quantity_string(value.get("cpu"));
        let memory = quantity_string(value.get("memory"));
        if cpu.is_none() && memory.is_none() {
            return None;
        }
        Some(Self {
            cpu_text: cpu.as_deref().map(explain_cpu),
            memory_text: memory.as_deref().map(explain_memory),
            cpu,
            memory,
        })
    }
}

/// Requests and limits of the first container in the deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub requests: Option<ResourceQuantities>,
    pub limits: Option<ResourceQuantities>,
}

/// Ingress hostnames per environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvHosts {
    pub dev: Vec<String>,
    pub pro: Vec<String>,
}

/// Everything the document needs from the deployment manifests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentSummary {
    pub resources: Option<ResourceSpec>,
    pub hosts: EnvHosts,
}

impl DeploymentSummary {
    /// Load the summary for the project at `root`.
    ///
    /// Returns `None` when there is no `deploy/k8s/` directory at all.
    pub fn load(root: &Path) -> Option<Self> {
        let k8s = root.join(K8S_DIR);
        if !k8s.is_dir() {
            return None;
        }

        Some(Self {
            resources: read_deployment_resources(&k8s),
            hosts: EnvHosts {
                dev: read_ingress_hosts(&k8s.join("dev").join(INGRESS_FILE)),
                pro: read_ingress_hosts(&k8s.join("pro").join(INGRESS_FILE)),
            },
        })
    }
}

/// Resources of the first container in the first `*deployment.yaml` found.
fn read_deployment_resources(k8s: &Path) -> Option<ResourceSpec> {
    let mut candidates: Vec<_> = fs::read_dir(k8s)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.ends_with("deployment.yaml"))
                .unwrap_or(false)
        })
        .collect();
    candidates.sort();

    let doc = read_yaml(candidates.first()?)?;
    let resources = doc
        .get("spec")?
        .get("template")?
        .get("spec")?
        .get("containers")?
        .as_sequence()?
        .first()?
        .get("resources")?;

    let spec = ResourceSpec {
        requests: resources.get("requests").and_then(ResourceQuantities::from_yaml),
        limits: resources.get("limits").and_then(ResourceQuantities::from_yaml),
    };
    if spec.requests.is_none() && spec.limits.is_none() {
        None
    } else {
        Some(spec)
    }
}

/// Hostnames from `spec.rules[*].host` of an ingress manifest.
fn read_ingress_hosts(path: &Path) -> Vec<String> {
    let Some(doc) = read_yaml(path) else {
        return Vec::new();
    };
    doc.get("spec")
        .and_then(|spec| spec.get("rules"))
        .and_then(Value::as_sequence)
        .map(|rules| {
            rules
                .iter()
                .filter_map(|rule| rule.get("host"))
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a YAML file, reducing every failure to `None`.
fn read_yaml(path: &Path) -> Option<Value> {
    let content = fs::read_to_string(path).ok()?;
    serde_yaml::from_str(&content).ok()
}

/// Render a YAML scalar quantity as a string.
fn quantity_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Human-readable form of a Kubernetes CPU quantity.
///
/// `"500m"` reads as `"500 milicores"`, `"2"` as `"2 cores"`. Anything
/// unrecognized passes through verbatim.
pub fn explain_cpu(quantity: &str) -> String {
    if let Some(millis) = quantity.strip_suffix('m') {
        if millis.parse::<u64>().is_ok() {
            return format!("{} milicores", millis);
        }
    }
    if let Ok(cores) = quantity.parse::<f64>() {
        let unit = if (cores - 1.0).abs() < f64::EPSILON {
            "core"
        } else {
            "cores"
        };
        return format!("{} {}", fmt_quantity(cores), unit);
    }
    quantity.to_string()
}

/// Human-readable form of a Kubernetes memory quantity.
///
/// Mi values render as Megabytes at display granularity; at 1024Mi and
/// above the value switches to Gigabytes. Gi values render as Gigabytes
/// directly. Anything unrecognized passes through verbatim.
pub fn explain_memory(quantity: &str) -> String {
    for suffix in ["Mi", "M"] {
        if let Some(raw) = quantity.strip_suffix(suffix) {
            if let Ok(mebibytes) = raw.parse::<f64>() {
                if mebibytes >= 1024.0 {
                    return format!("{} Gigabytes", fmt_quantity(mebibytes / 1024.0));
                }
                return format!("{} Megabytes", fmt_quantity(mebibytes));
            }
        }
    }
    for suffix in ["Gi", "G"] {
        if let Some(raw) = quantity.strip_suffix(suffix) {
            if let Ok(gibibytes) = raw.parse::<f64>() {
                return format!("{} Gigabytes", fmt_quantity(gibibytes));
            }
        }
    }
    quantity.to_string()
}

/// Whole quantities drop the decimal point; fractions keep one digit.
fn fmt_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explain_cpu() {
        assert_eq!(explain_cpu("500m"), "500 milicores");
        assert_eq!(explain_cpu("250m"), "250 milicores");
        assert_eq!(explain_cpu("2"), "2 cores");
        assert_eq!(explain_cpu("1"), "1 core");
        assert_eq!(explain_cpu("0.5"), "0.5 cores");
        assert_eq!(explain_cpu("weird"), "weird");
    }

    #[test]
    fn test_explain_memory() {
        assert_eq!(explain_memory("512Mi"), "512 Megabytes");
        assert_eq!(explain_memory("2048Mi"), "2 Gigabytes");
        assert_eq!(explain_memory("1536Mi"), "1.5 Gigabytes");
        assert_eq!(explain_memory("2Gi"), "2 Gigabytes");
        assert_eq!(explain_memory("256M"), "256 Megabytes");
        assert_eq!(explain_memory("64RandomUnit"), "64RandomUnit");
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_deployment_and_ingress() {
        let temp = TempDir::new().unwrap();
        write(
            &temp.path().join("deploy/k8s/api-deployment.yaml"),
            r#"
spec:
  template:
    spec:
      containers:
        - name: api
          resources:
            requests:
              cpu: "250m"
              memory: "256Mi"
            limits:
              cpu: "500m"
              memory: "2048Mi"
"#,
        );
        write(
            &temp.path().join("deploy/k8s/dev/2-ingress.yaml"),
            r#"
spec:
  rules:
    - host: api.dev.example.net
"#,
        );
        write(
            &temp.path().join("deploy/k8s/pro/2-ingress.yaml"),
            r#"
spec:
  rules:
    - host: api.example.net
    - host: www.api.example.net
"#,
        );

        let summary = DeploymentSummary::load(temp.path()).unwrap();
        let resources = summary.resources.unwrap();
        let limits = resources.limits.unwrap();
        assert_eq!(limits.cpu.as_deref(), Some("500m"));
        assert_eq!(limits.cpu_text.as_deref(), Some("500 milicores"));
        assert_eq!(limits.memory_text.as_deref(), Some("2 Gigabytes"));
        let requests = resources.requests.unwrap();
        assert_eq!(requests.memory_text.as_deref(), Some("256 Megabytes"));

        assert_eq!(summary.hosts.dev, vec!["api.dev.example.net"]);
        assert_eq!(
            summary.hosts.pro,
            vec!["api.example.net", "www.api.example.net"]
        );
    }

    #[test]
    fn test_missing_k8s_dir_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(DeploymentSummary::load(temp.path()).is_none());
    }

    #[test]
    fn test_malformed_yaml_reduces_to_absent_values() {
        let temp = TempDir::new().unwrap();
        write(
            &temp.path().join("deploy/k8s/api-deployment.yaml"),
            ": not: valid: yaml: [",
        );

        let summary = DeploymentSummary::load(temp.path()).unwrap();
        assert!(summary.resources.is_none());
        assert!(summary.hosts.dev.is_empty());
        assert!(summary.hosts.pro.is_empty());
    }

    #[test]
    fn test_numeric_cpu_quantity() {
        let temp = TempDir::new().unwrap();
        write(
            &temp.path().join("deploy/k8s/deployment.yaml"),
            r#"
spec:
  template:
    spec:
      containers:
        - resources:
            limits:
              cpu: 2
"#,
        );

        let summary = DeploymentSummary::load(temp.path()).unwrap();
        let limits = summary.resources.unwrap().limits.unwrap();
        assert_eq!(limits.cpu.as_deref(), Some("2"));
        assert_eq!(limits.cpu_text.as_deref(), Some("2 cores"));
    }
}
