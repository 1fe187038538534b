//! README rendering.
//!
//! A single embedded minijinja template turns the project record plus the
//! generated prose into the final Markdown document.

use minijinja::{context, Environment};
use once_cell::sync::Lazy;

use crate::llm::GeneratedProse;
use crate::project::ProjectRecord;

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_template("readme", include_str!("templates/readme.md.j2"))
        .expect("embedded readme template must parse");
    env
});

/// Render the README document for a project.
pub fn render_readme(record: &ProjectRecord, prose: &GeneratedProse) -> anyhow::Result<String> {
    let name = if record.manifest.name.is_empty() {
        "Project"
    } else {
        record.manifest.name.as_str()
    };

    let template = TEMPLATES.get_template("readme")?;
    let text = template.render(context! {
        name => name,
        description => record.manifest.description,
        project => record,
        prose => prose,
    })?;
    Ok(text)
}
