//! External collaborator interfaces
//!
//! The pipeline consumes two narrow traits: a complete-text generator and a
//! best-effort embedding retrieval. Neither is owned here; implementations
//! live with the provider integration.

use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Conversation role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction
    System,
    /// User input
    User,
    /// Prior assistant output
    Assistant,
}

/// One conversation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// System message
    #[inline]
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// User message
    #[inline]
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Response-shape hint forwarded to the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Free text
    #[default]
    Text,
    /// Provider should emit a JSON object/array
    JsonObject,
}

/// A single complete-text result from an external generator.
///
/// Implementations may stream internally but must return an
/// eventually-complete string, with thinking-block sentinel content already
/// stripped (see [`bidgen_schema::strip_thinking`]) so validation never sees
/// reasoning tokens.
#[async_trait]
pub trait TextGenerate: Send + Sync {
    /// Generate a complete text response for the conversation.
    async fn generate(
        &self,
        messages: &[ChatMessage],
        format: ResponseFormat,
    ) -> Result<String, ProviderError>;
}

/// Best-effort vector-similarity retrieval.
///
/// Never fails: implementations must convert internal errors into an empty
/// result so retrieval outages cannot block generation.
#[async_trait]
pub trait EmbeddingSearch: Send + Sync {
    /// Return up to `k` supporting text snippets for the query, best first.
    async fn search(&self, query: &str, k: usize) -> Vec<String>;
}

/// Retrieval that always returns nothing; for callers without a corpus.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRetrieval;

#[async_trait]
impl EmbeddingSearch for NoRetrieval {
    async fn search(&self, _query: &str, _k: usize) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors() {
        let msg = ChatMessage::system("instructions");
        assert_eq!(msg.role, Role::System);
        assert_eq!(ChatMessage::user("hello").role, Role::User);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert!(json.contains(r#""role":"user""#));
    }

    #[tokio::test]
    async fn no_retrieval_is_empty() {
        let retrieval = NoRetrieval;
        assert!(retrieval.search("anything", 3).await.is_empty());
    }
}
