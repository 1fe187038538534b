//! Text-generation client port.
//!
//! Generation is a best-effort collaborator: every caller catches errors
//! and substitutes a placeholder so document generation always completes.

mod ollama;
pub mod prose;

pub use ollama::OllamaClient;
pub use prose::{GeneratedProse, RouteDoc};

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Errors that can occur during a generation call.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("endpoint error: {0}")]
    Endpoint(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Boxed future type alias keeping [`TextGenerator`] dyn-compatible.
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String, GenerateError>> + Send + 'a>>;

/// Sends a prompt plus technical context lines to a text-generation model.
pub trait TextGenerator: Send + Sync {
    /// Generate prose for the given prompt and context.
    fn generate(&self, prompt: &str, context: &[String]) -> GenerateFuture<'_>;
}

/// Compose the final prompt sent to the model: context block first, then
/// the instruction.
pub fn compose_prompt(prompt: &str, context: &[String]) -> String {
    if context.is_empty() {
        return prompt.to_string();
    }
    format!(
        "Use the following technical context to answer in a professional, \
detailed tone:\n{}\n\n{}",
        context.join("\n"),
        prompt
    )
}

/// Run a generation call, reducing any failure to a placeholder paragraph.
pub async fn generate_or_fallback(
    generator: &dyn TextGenerator,
    prompt: &str,
    context: &[String],
) -> String {
    match generator.generate(prompt, context).await {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Warning: text generation failed: {}", e);
            fallback_text()
        }
    }
}

/// Placeholder paragraph used when the model is unavailable.
pub fn fallback_text() -> String {
    "_Text generation was unavailable for this section; the structural facts \
below were extracted statically._"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingGenerator;

    impl TextGenerator for FailingGenerator {
        fn generate(&self, _prompt: &str, _context: &[String]) -> GenerateFuture<'_> {
            Box::pin(async { Err(GenerateError::Endpoint("boom".to_string())) })
        }
    }

    struct EchoGenerator;

    impl TextGenerator for EchoGenerator {
        fn generate(&self, prompt: &str, context: &[String]) -> GenerateFuture<'_> {
            let composed = compose_prompt(prompt, context);
            Box::pin(async move { Ok(composed) })
        }
    }

    #[test]
    fn test_compose_prompt_without_context() {
        assert_eq!(compose_prompt("Explain this.", &[]), "Explain this.");
    }

    #[test]
    fn test_compose_prompt_with_context() {
        let composed = compose_prompt("Explain this.", &["fact one".to_string()]);
        assert!(composed.contains("fact one"));
        assert!(composed.ends_with("Explain this."));
    }

    #[tokio::test]
    async fn test_fallback_on_error() {
        let text = generate_or_fallback(&FailingGenerator, "prompt", &[]).await;
        assert_eq!(text, fallback_text());
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let text = generate_or_fallback(&EchoGenerator, "prompt", &[]).await;
        assert_eq!(text, "prompt");
    }
}
