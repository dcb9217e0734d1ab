//! Error types for the generation pipeline
//!
//! Propagation policy:
//! - Skeleton-level failures abort the whole outline generation
//! - Section-level failures degrade to a placeholder node at the task boundary
//! - Leaf content failures are written into that leaf's content field
//! - Retrieval failures are never propagated (empty result instead)

/// Failure of a single call into the external text generator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Request could not be completed
    #[error("generation request failed: {0}")]
    Request(String),

    /// Provider signalled rate limiting
    #[error("rate limited by provider: {0}")]
    RateLimited(String),
}

/// Failure of a validated generation call after retries.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerateError {
    /// Retry budget exhausted; carries the last validation error and the
    /// number of attempts made
    #[error("validation failed after {attempts} attempts: {last_error}")]
    RetryBudgetExhausted {
        /// Total attempts made (initial call plus retries)
        attempts: u32,
        /// Last validation or provider error message
        last_error: String,
    },
}

/// Failure of a whole outline-generation invocation.
#[derive(Debug, thiserror::Error)]
pub enum OutlineError {
    /// The top-level skeleton never validated; the outline cannot be built
    #[error("skeleton generation failed: {0}")]
    SkeletonRejected(#[from] GenerateError),

    /// The skeleton validated structurally but is not a usable section list
    #[error("skeleton response is not a valid section list: {0}")]
    MalformedSkeleton(String),
}

/// Failure of a single section expansion, caught at the task boundary and
/// converted into a placeholder node.
#[derive(Debug, thiserror::Error)]
pub(crate) enum SectionError {
    #[error("section response could not be parsed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("section template could not be serialized: {0}")]
    Template(serde_json::Error),
}
