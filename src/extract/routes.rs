//! Route declaration extraction from router files.
//!
//! Scans raw text for call-like patterns binding an HTTP method, a path
//! literal and handler identifiers. Handlers are never resolved against
//! real symbols; the purpose line comes from the handler name alone.

use lazy_static::lazy_static;
use regex::Regex;

use crate::facts::Route;

lazy_static! {
    /// `app.get('/path', handler)` / `router.post("/path", a, b)` forms.
    static ref ROUTE_PATTERN: Regex = Regex::new(
        r#"(?:app|router)\.(get|post|put|delete|patch)\s*\(\s*['"]([^'"]+)['"]\s*,\s*([^)]+)\)"#
    )
    .unwrap();
}

/// Extract all route declarations from router-file text.
pub fn extract_routes(text: &str) -> Vec<Route> {
    ROUTE_PATTERN
        .captures_iter(text)
        .map(|caps| {
            let handlers: Vec<String> = caps[3]
                .split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_string)
                .collect();
            let purpose = purpose_for(handlers.first().map(String::as_str).unwrap_or(""));
            Route {
                method: caps[1].to_uppercase(),
                path: caps[2].to_string(),
                handlers,
                purpose,
            }
        })
        .collect()
}

/// One-line purpose inferred only from the handler's name.
fn purpose_for(handler: &str) -> String {
    if handler.is_empty() {
        "Handler purpose unknown".to_string()
    } else {
        format!("Handler `{}` (purpose inferred from name)", handler)
    }
}
