//! Free-form content expansion
//!
//! One-shot rewrite of an existing passage per a caller-supplied
//! instruction. No schema validation: the result is free text.

use crate::error::ProviderError;
use crate::prompts;
use crate::provider::{ResponseFormat, TextGenerate};
use std::sync::Arc;

/// Expands existing passages against the text generator.
#[derive(Debug)]
pub struct ContentExpander<G: TextGenerate + ?Sized> {
    generator: Arc<G>,
}

impl<G: TextGenerate + ?Sized> ContentExpander<G> {
    /// Create an expander over a text generator
    #[inline]
    #[must_use]
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }

    /// Expand `content` following `instruction`.
    ///
    /// # Errors
    /// [`ProviderError`] when the generation call itself fails; expansion has
    /// no retry loop.
    pub async fn expand(&self, content: &str, instruction: &str) -> Result<String, ProviderError> {
        let messages = prompts::expand(content, instruction);
        self.generator
            .generate(&messages, ResponseFormat::Text)
            .await
    }
}
