//! Testing utilities for the BidGen workspace
//!
//! Scripted provider stubs shared by unit and integration tests.

#![allow(missing_docs)]

use async_trait::async_trait;
use bidgen_core::{ChatMessage, EmbeddingSearch, ProviderError, ResponseFormat, TextGenerate};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// What a [`ScriptedGenerator`] does once its script is exhausted.
#[derive(Debug, Clone)]
enum Fallback {
    /// Answer every further call with the same text
    Repeat(String),
    /// Echo back the output-format template embedded in the system prompt,
    /// simulating a generator that follows the template perfectly
    EchoTemplate,
    /// Fail every further call
    Fail(String),
}

/// Text generator stub driven by a fixed script of responses.
///
/// Records every conversation it is shown and counts calls, so tests can
/// assert on prompts and retry behavior.
#[derive(Debug)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<String>>,
    fallback: Fallback,
    calls: AtomicUsize,
    captured: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedGenerator {
    /// Answer calls from `responses` in order, then with empty text.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(responses.into_iter().map(Into::into).collect()),
            fallback: Fallback::Repeat(String::new()),
            calls: AtomicUsize::new(0),
            captured: Mutex::new(Vec::new()),
        }
    }

    /// Answer every call with the same text.
    pub fn repeating(text: impl Into<String>) -> Self {
        let mut stub = Self::with_responses(std::iter::empty::<String>());
        stub.fallback = Fallback::Repeat(text.into());
        stub
    }

    /// Fail every call with the given provider error message.
    pub fn always_failing(message: impl Into<String>) -> Self {
        let mut stub = Self::with_responses(std::iter::empty::<String>());
        stub.fallback = Fallback::Fail(message.into());
        stub
    }

    /// After the script runs out, echo back the `### Output Format` template
    /// from the system prompt instead of empty text.
    #[must_use]
    pub fn echo_template_after_script(mut self) -> Self {
        self.fallback = Fallback::EchoTemplate;
        self
    }

    /// Total generation calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every conversation passed to [`TextGenerate::generate`], in call order.
    pub fn captured_messages(&self) -> Vec<Vec<ChatMessage>> {
        self.captured
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn echo_template(messages: &[ChatMessage]) -> String {
        messages
            .first()
            .and_then(|system| system.content.split_once("### Output Format\n"))
            .map(|(_, template)| template.trim().to_string())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerate for ScriptedGenerator {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        _format: ResponseFormat,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.captured
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(messages.to_vec());

        let scripted = self
            .script
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front();
        if let Some(response) = scripted {
            return Ok(response);
        }

        match &self.fallback {
            Fallback::Repeat(text) => Ok(text.clone()),
            Fallback::EchoTemplate => Ok(Self::echo_template(messages)),
            Fallback::Fail(message) => Err(ProviderError::Request(message.clone())),
        }
    }
}

/// Retrieval stub returning a fixed snippet list, truncated to `k`.
#[derive(Debug, Clone, Default)]
pub struct StaticRetrieval {
    snippets: Vec<String>,
}

impl StaticRetrieval {
    /// Always return the given snippets.
    pub fn new<I, S>(snippets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            snippets: snippets.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl EmbeddingSearch for StaticRetrieval {
    async fn search(&self, _query: &str, k: usize) -> Vec<String> {
        self.snippets.iter().take(k).cloned().collect()
    }
}
