//! Prompt assembly and prose generation for the README.
//!
//! Turns the project record into context lines, asks the model for each
//! section, and degrades to placeholders section by section on failure.

use serde::Serialize;

use super::{fallback_text, generate_or_fallback, TextGenerator};
use crate::facts::Route;
use crate::project::ProjectRecord;

/// A route plus its generated description.
#[derive(Debug, Clone, Serialize)]
pub struct RouteDoc {
    #[serde(flatten)]
    pub route: Route,
    pub description: String,
}

/// Model-written sections consumed by the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedProse {
    /// Technical introduction paragraph(s).
    pub intro: String,
    /// ASCII architecture diagram.
    pub architecture: String,
    /// Per-route descriptions, in route-table order.
    pub routes: Vec<RouteDoc>,
}

/// Generate every prose section for the record.
///
/// Sections are generated sequentially; they feed a single document and a
/// local model serves one request at a time anyway.
pub async fn generate_prose(
    generator: &dyn TextGenerator,
    record: &ProjectRecord,
) -> GeneratedProse {
    let context = context_lines(record);
    let name = display_name(record);

    let intro = generate_or_fallback(generator, &intro_prompt(&name), &context).await;
    let architecture =
        generate_or_fallback(generator, &architecture_prompt(&name), &context).await;

    let mut routes = Vec::with_capacity(record.routes.len());
    for route in &record.routes {
        let route_context = vec![
            format!("Route: {} {}", route.method, route.path),
            format!("Handlers: {}", route.handlers.join(", ")),
            format!("Purpose: {}", route.purpose),
        ];
        let description =
            generate_or_fallback(generator, &route_prompt(route), &route_context).await;
        routes.push(RouteDoc {
            route: route.clone(),
            description,
        });
    }

    GeneratedProse {
        intro,
        architecture,
        routes,
    }
}

/// Prose built without any model call (offline mode).
pub fn placeholder_prose(record: &ProjectRecord) -> GeneratedProse {
    GeneratedProse {
        intro: fallback_text(),
        architecture: String::new(),
        routes: record
            .routes
            .iter()
            .map(|route| RouteDoc {
                route: route.clone(),
                description: route.purpose.clone(),
            })
            .collect(),
    }
}

/// Per-file context lines fed to every section prompt.
pub fn context_lines(record: &ProjectRecord) -> Vec<String> {
    let mut lines = Vec::new();

    for files in record.folders.values() {
        for outcome in files {
            let Some(facts) = outcome.facts() else {
                continue;
            };
            lines.push(format!(
                "{}:\nExports: {}\nFunctions: {}\nClasses: {}\nComments: {}",
                facts.path,
                facts.exports.join(" "),
                facts.function_names().join(" "),
                facts.class_names().join(" "),
                facts.summary_lines.join(" | "),
            ));
        }
    }

    let mut deps = record.manifest.dependencies.clone();
    deps.extend(record.manifest.dev_dependencies.iter().cloned());
    if !deps.is_empty() {
        lines.push(format!("Dependencies: {}", deps.join(", ")));
    }

    lines
}

fn display_name(record: &ProjectRecord) -> String {
    if record.manifest.name.is_empty() {
        "this project".to_string()
    } else {
        record.manifest.name.clone()
    }
}

fn intro_prompt(name: &str) -> String {
    format!(
        "Write an exhaustive technical README introduction for the project \
{}, detailing architecture, modules, routes, dependencies and overall \
purpose.",
        name
    )
}

fn architecture_prompt(name: &str) -> String {
    format!(
        "Analyze the provided information about the project {} and produce a \
professional ASCII diagram of the system architecture, including layers, \
modules, dependencies and data flow.",
        name
    )
}

fn route_prompt(route: &Route) -> String {
    format!(
        "Explain in detail the purpose, data flow and validations of the \
route {} {}.",
        route.method, route.path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{FileAnalysis, FileFacts};
    use crate::llm::GenerateFuture;

    struct CannedGenerator;

    impl TextGenerator for CannedGenerator {
        fn generate(&self, prompt: &str, _context: &[String]) -> GenerateFuture<'_> {
            let reply = format!("generated for: {}", prompt);
            Box::pin(async move { Ok(reply) })
        }
    }

    fn record_with_route() -> ProjectRecord {
        let mut record = ProjectRecord::default();
        record.manifest.name = "shop-api".to_string();
        record.manifest.dependencies = vec!["express".to_string()];
        record.folders.insert(
            "src".to_string(),
            vec![FileAnalysis::Ok {
                facts: FileFacts {
                    path: "src/app.js".to_string(),
                    exports: vec!["app".to_string()],
                    ..Default::default()
                },
            }],
        );
        record.routes.push(Route {
            method: "GET".to_string(),
            path: "/orders".to_string(),
            handlers: vec!["listOrders".to_string()],
            purpose: "Handler `listOrders` (purpose inferred from name)".to_string(),
        });
        record
    }

    #[test]
    fn test_context_lines_cover_files_and_deps() {
        let record = record_with_route();
        let lines = context_lines(&record);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("src/app.js"));
        assert!(lines[0].contains("Exports: app"));
        assert!(lines[1].starts_with("Dependencies: express"));
    }

    #[test]
    fn test_context_lines_skip_error_records() {
        let mut record = ProjectRecord::default();
        record.folders.insert(
            "src".to_string(),
            vec![FileAnalysis::Err {
                path: "src/bad.js".to_string(),
                error: "unreadable".to_string(),
            }],
        );
        assert!(context_lines(&record).is_empty());
    }

    #[tokio::test]
    async fn test_generate_prose_fills_every_section() {
        let record = record_with_route();
        let prose = generate_prose(&CannedGenerator, &record).await;

        assert!(prose.intro.contains("shop-api"));
        assert!(prose.architecture.contains("ASCII diagram"));
        assert_eq!(prose.routes.len(), 1);
        assert!(prose.routes[0].description.contains("GET /orders"));
    }

    #[test]
    fn test_placeholder_prose_keeps_routes() {
        let record = record_with_route();
        let prose = placeholder_prose(&record);
        assert_eq!(prose.intro, fallback_text());
        assert_eq!(prose.routes.len(), 1);
        assert_eq!(prose.routes[0].description, record.routes[0].purpose);
    }
}
