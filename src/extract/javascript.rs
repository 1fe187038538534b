//! JavaScript/TypeScript structural pattern matching.
//!
//! Brittle, best-effort, language-specific heuristics. Every function here
//! is total over arbitrary text; garbage in produces empty results out.

use lazy_static::lazy_static;
use regex::Regex;

use crate::facts::{ClassFacts, FunctionSig, HandlerUsage};

/// Maximum number of summary lines kept per file.
const MAX_SUMMARY_LINES: usize = 200;

/// How far into a class body to look for method signatures.
const CLASS_BODY_WINDOW: usize = 2000;

lazy_static! {
    /// ES module and CommonJS import forms.
    static ref IMPORT_PATTERN: Regex = Regex::new(
        r#"(?m)^\s*(?:import\s+.*?\s+from\s+['"]([^'"]+)['"]|const\s+.*?=\s*require\(\s*['"]([^'"]+)['"]\s*\))"#
    )
    .unwrap();

    /// JSDoc block comments.
    static ref JSDOC_PATTERN: Regex = Regex::new(r"(?s)/\*\*.*?\*/").unwrap();

    /// Classic function declarations.
    static ref FUNCTION_PATTERN: Regex =
        Regex::new(r"function\s+([A-Za-z0-9_$]+)\s*\(([^)]*)\)").unwrap();

    /// Arrow functions bound to a const/let/var.
    static ref ARROW_PATTERN: Regex = Regex::new(
        r"(?:const|let|var)\s+([A-Za-z0-9_$]+)\s*=\s*(?:async\s*)?\(([^)]*)\)\s*=>"
    )
    .unwrap();

    /// Class declarations, optionally with an extends clause.
    static ref CLASS_PATTERN: Regex =
        Regex::new(r"class\s+([A-Za-z0-9_$]+)\s*(?:extends\s+[A-Za-z0-9_$]+\s*)?\{").unwrap();

    /// Method signatures near the top of a class body.
    static ref METHOD_PATTERN: Regex =
        Regex::new(r"(?m)^\s*(?:async\s+)?([A-Za-z0-9_$]+)\s*\(([^)]*)\)\s*\{").unwrap();

    /// Export forms; group 1 is the symbol name when the form carries one.
    static ref EXPORT_PATTERN: Regex = Regex::new(
        r"(?:module\.exports\s*=|exports\.[A-Za-z0-9_$]+\s*=|export\s+default|export\s+(?:const|function|class)\s+([A-Za-z0-9_$]+))"
    )
    .unwrap();

    /// SQL-looking string literals, one pattern per quote style.
    static ref SQL_PATTERNS: Vec<Regex> = vec![
        Regex::new(r#""([^"\n]{0,300}\b(?i:SELECT|INSERT|UPDATE|DELETE|CALL)\b[^"\n]{0,300})""#)
            .unwrap(),
        Regex::new(r"'([^'\n]{0,300}\b(?i:SELECT|INSERT|UPDATE|DELETE|CALL)\b[^'\n]{0,300})'")
            .unwrap(),
        Regex::new(r"(?s)`([^`]{0,500}\b(?i:SELECT|INSERT|UPDATE|DELETE|CALL)\b[^`]{0,500})`")
            .unwrap(),
    ];

    static ref REQ_PATTERN: Regex = Regex::new(r"\breq\b").unwrap();
    static ref RES_PATTERN: Regex = Regex::new(r"\bres\b").unwrap();
    static ref NEXT_PATTERN: Regex = Regex::new(r"\bnext\b").unwrap();

    /// Database client tokens matched on word boundaries.
    static ref DB_CLIENT_PATTERNS: Vec<(&'static str, Regex)> = [
        "mysql", "mysql2", "oracledb", "pg", "pg-pool", "mongoose", "sequelize", "knex",
    ]
    .iter()
    .map(|token| {
        (
            *token,
            Regex::new(&format!(r"\b{}\b", regex::escape(token))).unwrap(),
        )
    })
    .collect();
}

/// Comment and declaration lines kept as a short text summary.
pub fn summary_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| {
            line.starts_with("//")
                || line.starts_with("/*")
                || line.starts_with('*')
                || line.starts_with("function ")
                || line.starts_with("class ")
                || line.contains("=>")
        })
        .take(MAX_SUMMARY_LINES)
        .map(str::to_string)
        .collect()
}

/// Imported module names, in source order.
pub fn imports(text: &str) -> Vec<String> {
    IMPORT_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_string())
        })
        .collect()
}

/// Raw JSDoc blocks.
pub fn jsdoc_blocks(text: &str) -> Vec<String> {
    JSDOC_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// First descriptive line of the first JSDoc block.
pub fn doc_summary(blocks: &[String]) -> Option<String> {
    let first = blocks.first()?;
    first
        .lines()
        .map(|l| l.trim().trim_start_matches("/**").trim_end_matches("*/"))
        .map(|l| l.trim_start_matches('*').trim())
        .find(|l| !l.is_empty() && !l.starts_with('@'))
        .map(str::to_string)
}

/// Function signatures from both declaration styles.
pub fn function_signatures(text: &str) -> Vec<FunctionSig> {
    let mut results = Vec::new();
    for pattern in [&*FUNCTION_PATTERN, &*ARROW_PATTERN] {
        for caps in pattern.captures_iter(text) {
            results.push(FunctionSig {
                name: caps[1].to_string(),
                params: split_params(&caps[2]),
            });
        }
    }
    results
}

/// Classes with the methods found near the top of their bodies.
pub fn class_methods(text: &str) -> Vec<ClassFacts> {
    // Keywords that look like methods to the signature pattern
    const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch"];

    CLASS_PATTERN
        .captures_iter(text)
        .map(|caps| {
            let body_start = caps.get(0).map(|m| m.end()).unwrap_or(0);
            let body = char_prefix(&text[body_start..], CLASS_BODY_WINDOW);
            let methods = METHOD_PATTERN
                .captures_iter(body)
                .filter(|m| !CONTROL_KEYWORDS.contains(&&m[1]))
                .map(|m| FunctionSig {
                    name: m[1].to_string(),
                    params: split_params(&m[2]),
                })
                .collect();
            ClassFacts {
                name: caps[1].to_string(),
                methods,
            }
        })
        .collect()
}

/// Exported symbol names; unnamed export forms keep the raw line.
pub fn exports(text: &str) -> Vec<String> {
    EXPORT_PATTERN
        .captures_iter(text)
        .map(|caps| match caps.get(1) {
            Some(name) => name.as_str().to_string(),
            None => {
                let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
                char_prefix(&text[start..], 120)
                    .lines()
                    .next()
                    .unwrap_or("")
                    .trim()
                    .to_string()
            }
        })
        .collect()
}

/// SQL-like string literals, deduplicated in first-seen order.
pub fn sql_snippets(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut snippets = Vec::new();
    for pattern in SQL_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let snippet = caps[1].trim().to_string();
            if seen.insert(snippet.clone()) {
                snippets.push(snippet);
            }
        }
    }
    snippets
}

/// Request/response identifier usage.
pub fn handler_usage(text: &str) -> HandlerUsage {
    HandlerUsage {
        uses_req: REQ_PATTERN.is_match(text),
        uses_res: RES_PATTERN.is_match(text),
        uses_next: NEXT_PATTERN.is_match(text),
    }
}

/// Database client tokens mentioned in the file.
pub fn db_clients(text: &str) -> Vec<String> {
    DB_CLIENT_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(token, _)| token.to_string())
        .collect()
}

/// Split a parameter list into trimmed, non-empty names.
fn split_params(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Longest prefix of `s` holding at most `max` characters, cut on a char
/// boundary.
fn char_prefix(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
