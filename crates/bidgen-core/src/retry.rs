//! Schema-validated generation with bounded retries
//!
//! Wraps a single call into the external text generator with structural
//! validation and a fixed-delay retry loop. Failures here are schema-shape
//! failures, not rate-limit failures, so the backoff is a constant short
//! delay rather than exponential.
//!
//! The conversation is never mutated between attempts: the same prompt is
//! retried as-is, with no error-aware re-prompting.

use crate::error::GenerateError;
use crate::provider::{ChatMessage, ResponseFormat, TextGenerate};
use crate::types::GenConfig;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// What to do when the retry budget is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Signal a terminal error carrying the last validation failure
    Raise,
    /// Return the last (unvalidated) response text as-is, for callers that
    /// tolerate partial structure
    ReturnLast,
}

/// Retrying, schema-validating wrapper around a text generator.
#[derive(Debug)]
pub struct RetryingGenerator<G: TextGenerate + ?Sized> {
    generator: Arc<G>,
    max_retries: u32,
    backoff: Duration,
}

impl<G: TextGenerate + ?Sized> Clone for RetryingGenerator<G> {
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
            max_retries: self.max_retries,
            backoff: self.backoff,
        }
    }
}

impl<G: TextGenerate + ?Sized> RetryingGenerator<G> {
    /// Create with explicit retry budget and backoff
    #[inline]
    #[must_use]
    pub fn new(generator: Arc<G>, max_retries: u32, backoff: Duration) -> Self {
        Self {
            generator,
            max_retries,
            backoff,
        }
    }

    /// Create with the retry knobs from a pipeline config
    #[inline]
    #[must_use]
    pub fn from_config(generator: Arc<G>, config: &GenConfig) -> Self {
        Self::new(
            generator,
            config.max_retries,
            Duration::from_millis(config.retry_backoff_ms),
        )
    }

    /// Generate text that validates against `template`.
    ///
    /// Invokes the generator, cleans and parses the response, and validates
    /// it structurally. On success the raw text is returned immediately. On
    /// failure the same conversation is retried after a fixed delay, up to
    /// the retry budget. Provider transport errors count as failed attempts.
    ///
    /// `label` scopes the retry logs to the calling context.
    ///
    /// # Errors
    /// With [`FailurePolicy::Raise`], returns
    /// [`GenerateError::RetryBudgetExhausted`] after the budget is spent.
    /// [`FailurePolicy::ReturnLast`] never errors; the last raw text (empty
    /// if the final provider call itself failed) is returned instead.
    pub async fn generate_validated(
        &self,
        messages: &[ChatMessage],
        template: &Value,
        policy: FailurePolicy,
        label: &str,
    ) -> Result<String, GenerateError> {
        let mut attempt: u32 = 0;
        loop {
            let (text, error) = match self
                .generator
                .generate(messages, ResponseFormat::JsonObject)
                .await
            {
                Ok(text) => match bidgen_schema::check_payload(&text, template) {
                    Ok(_) => {
                        tracing::debug!(label, attempt, "response validated");
                        return Ok(text);
                    }
                    Err(mismatch) => (text, mismatch.to_string()),
                },
                Err(provider_err) => (String::new(), provider_err.to_string()),
            };

            if attempt >= self.max_retries {
                tracing::warn!(
                    label,
                    attempts = attempt + 1,
                    max_retries = self.max_retries,
                    error,
                    "validation failed, retry budget exhausted"
                );
                return match policy {
                    FailurePolicy::Raise => Err(GenerateError::RetryBudgetExhausted {
                        attempts: attempt + 1,
                        last_error: error,
                    }),
                    FailurePolicy::ReturnLast => Ok(text),
                };
            }

            attempt += 1;
            tracing::warn!(
                label,
                retry = attempt,
                max_retries = self.max_retries,
                error,
                "validation failed, retrying"
            );
            tokio::time::sleep(self.backoff).await;
        }
    }
}
