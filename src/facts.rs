//! Structural fact records extracted from source files.

use serde::{Deserialize, Serialize};

/// A function signature found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSig {
    /// The function name.
    pub name: String,
    /// Parameter names, in declaration order.
    pub params: Vec<String>,
}

/// A class and the methods declared in its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFacts {
    /// The class name.
    pub name: String,
    /// Methods found near the top of the class body.
    pub methods: Vec<FunctionSig>,
}

/// Request/response identifier usage, a weak signal that a file acts as an
/// HTTP handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerUsage {
    pub uses_req: bool,
    pub uses_res: bool,
    pub uses_next: bool,
}

impl HandlerUsage {
    /// True when both `req` and `res` appear in the file.
    pub fn is_handler(&self) -> bool {
        self.uses_req && self.uses_res
    }

    /// True when any of the tracked identifiers appears.
    pub fn any(&self) -> bool {
        self.uses_req || self.uses_res || self.uses_next
    }
}

/// All facts extracted from a single source file.
///
/// Created by the extractor, cached, and never mutated after creation. A
/// file whose content hash changes gets a fresh record, not an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileFacts {
    /// Project-relative file path (immutable identity).
    pub path: String,
    /// Comment and declaration lines kept as a short text summary.
    #[serde(default)]
    pub summary_lines: Vec<String>,
    /// First sentence of the leading doc comment, if any.
    #[serde(default)]
    pub doc_summary: Option<String>,
    /// Imported module names.
    #[serde(default)]
    pub imports: Vec<String>,
    /// Exported symbol names (or the raw export line when unnamed).
    #[serde(default)]
    pub exports: Vec<String>,
    /// Function signatures.
    #[serde(default)]
    pub functions: Vec<FunctionSig>,
    /// Classes with their methods.
    #[serde(default)]
    pub classes: Vec<ClassFacts>,
    /// SQL-like string literals found in the file.
    #[serde(default)]
    pub sql_snippets: Vec<String>,
    /// Database client tokens mentioned in the file.
    #[serde(default)]
    pub db_clients: Vec<String>,
    /// Request/response identifier usage.
    #[serde(default)]
    pub handler_usage: HandlerUsage,
    /// One-paragraph description assembled from the facts above.
    #[serde(default)]
    pub narrative: Option<String>,
}

impl FileFacts {
    /// Create an empty record for a file.
    pub fn empty(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Default::default()
        }
    }

    /// Names of all functions in the file.
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name.as_str()).collect()
    }

    /// Names of all classes in the file.
    pub fn class_names(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }
}

/// A route declaration pulled out of a router file.
///
/// Handlers are not resolved against real symbols; the purpose line is
/// inferred from the handler name alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// HTTP method token, upper-cased (`GET`, `POST`, ...).
    pub method: String,
    /// Path template string as written in the source.
    pub path: String,
    /// Handler identifiers, in call order.
    pub handlers: Vec<String>,
    /// One-line purpose built only from the first handler's name.
    pub purpose: String,
}

/// Per-file analysis outcome.
///
/// Failures are values attached to the file's slot in the result set; a bad
/// file never aborts the batch.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileAnalysis {
    Ok { facts: FileFacts },
    Err { path: String, error: String },
}

impl FileAnalysis {
    /// The path this outcome belongs to.
    pub fn path(&self) -> &str {
        match self {
            FileAnalysis::Ok { facts } => &facts.path,
            FileAnalysis::Err { path, .. } => path,
        }
    }

    /// The extracted facts, if analysis succeeded.
    pub fn facts(&self) -> Option<&FileFacts> {
        match self {
            FileAnalysis::Ok { facts } => Some(facts),
            FileAnalysis::Err { .. } => None,
        }
    }

    pub fn is_err(&self) -> bool {
        matches!(self, FileAnalysis::Err { .. })
    }
}
