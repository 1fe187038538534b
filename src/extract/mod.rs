//! Regex-based structural extraction.
//!
//! A shallow pattern-matching pass over raw file text: no parser, no AST,
//! no cross-file resolution. Every extractor is best-effort and total -
//! malformed input yields partial or empty results, never an error.

mod javascript;
pub mod routes;

pub use routes::extract_routes;

use crate::facts::FileFacts;

/// Extract all structural facts from one source file.
///
/// Pure function of the file text; the path is carried along as identity.
pub fn extract(path: &str, text: &str) -> FileFacts {
    let jsdoc = javascript::jsdoc_blocks(text);
    let mut facts = FileFacts {
        path: path.to_string(),
        summary_lines: javascript::summary_lines(text),
        doc_summary: javascript::doc_summary(&jsdoc),
        imports: javascript::imports(text),
        exports: javascript::exports(text),
        functions: javascript::function_signatures(text),
        classes: javascript::class_methods(text),
        sql_snippets: javascript::sql_snippets(text),
        db_clients: javascript::db_clients(text),
        handler_usage: javascript::handler_usage(text),
        narrative: None,
    };
    facts.narrative = Some(narrative_for(&facts));
    facts
}

/// Assemble a one-paragraph description from extracted facts.
///
/// Only restates what the extractors found; no inference beyond names.
fn narrative_for(facts: &FileFacts) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(summary) = &facts.doc_summary {
        parts.push(summary.clone());
    }
    if !facts.imports.is_empty() {
        parts.push(format!(
            "Imports modules: {}{}",
            facts.imports.iter().take(8).cloned().collect::<Vec<_>>().join(", "),
            if facts.imports.len() > 8 { "..." } else { "" }
        ));
    }
    if !facts.exports.is_empty() {
        parts.push(format!(
            "Exports: {}{}",
            facts.exports.iter().take(8).cloned().collect::<Vec<_>>().join(", "),
            if facts.exports.len() > 8 { "..." } else { "" }
        ));
    }
    if !facts.functions.is_empty() {
        let names: Vec<_> = facts.function_names().into_iter().take(8).collect();
        parts.push(format!("Defines functions: {}", names.join(", ")));
    }
    if !facts.classes.is_empty() {
        parts.push(format!("Classes: {}", facts.class_names().join(", ")));
    }
    if !facts.sql_snippets.is_empty() {
        parts.push(format!(
            "Contains detected SQL queries ({})",
            facts.sql_snippets.len()
        ));
    }
    if !facts.db_clients.is_empty() {
        parts.push(format!(
            "Uses database clients: {}",
            facts.db_clients.join(", ")
        ));
    }
    if facts.handler_usage.any() {
        if facts.handler_usage.is_handler() {
            parts.push("Acts as an HTTP handler (uses req/res)".to_string());
        } else {
            parts.push("References req or res identifiers".to_string());
        }
    }

    if parts.is_empty() {
        "No clear structural signals; review the file manually.".to_string()
    } else {
        format!("{}.", parts.join(". "))
    }
}
