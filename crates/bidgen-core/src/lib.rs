//! BidGen Core - Structured outline generation pipeline
//!
//! Turns a free-text project brief into a multi-level outline tree and
//! drives leaf-content synthesis against an unreliable external text
//! generator:
//! - Weighted allocation of a fixed leaf budget across sections
//! - Empty subtree templates doubling as validation schemas
//! - Validate-retry-degrade generation with bounded concurrency
//! - Depth-first leaf content filling with ancestor/sibling context
//!
//! This is a pure in-process library: transport, storage, and document
//! rendering belong to the consumer.
//!
//! # Example
//!
//! ```rust,ignore
//! use bidgen_core::{GenConfig, OutlineOrchestrator, ProjectBrief};
//! use std::sync::Arc;
//!
//! # async fn example(provider: Arc<impl bidgen_core::TextGenerate>) -> Result<(), bidgen_core::OutlineError> {
//! let orchestrator = OutlineOrchestrator::new(provider, GenConfig::default());
//! let brief = ProjectBrief::new("overview text", "requirements text");
//! let outline = orchestrator.generate_outline(&brief, &mut rand::rng()).await?;
//!
//! println!("generated {} chapters", outline.len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod allocation;
pub mod config;
pub mod error;
pub mod expand;
pub mod filler;
pub mod orchestrator;
pub mod prompts;
pub mod provider;
pub mod retry;
pub mod template;
pub mod types;

// Re-exports for convenience
pub use allocation::{allocate, pick_priority_indexes, Distribution};
pub use config::{ProviderSettings, SettingsStore};
pub use error::{GenerateError, OutlineError, ProviderError};
pub use expand::ContentExpander;
pub use filler::ContentFiller;
pub use orchestrator::OutlineOrchestrator;
pub use provider::{ChatMessage, EmbeddingSearch, NoRetrieval, ResponseFormat, Role, TextGenerate};
pub use retry::{FailurePolicy, RetryingGenerator};
pub use template::section_template;
pub use types::{
    GenConfig, NodeSummary, OutlineNode, ProjectBrief, ProjectType, SectionSeed,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with BidGen Core
    pub use crate::{
        ChatMessage, ContentFiller, EmbeddingSearch, FailurePolicy, GenConfig, OutlineNode,
        OutlineOrchestrator, ProjectBrief, ProjectType, RetryingGenerator, TextGenerate,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
