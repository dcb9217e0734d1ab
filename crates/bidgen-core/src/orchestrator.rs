//! Outline orchestration
//!
//! Top-level control for one outline generation: collect the flat section
//! skeleton, allocate the leaf budget, expand every section in parallel under
//! a bounded pool, and assemble the results in input order.
//!
//! A malformed skeleton aborts the invocation; a failed section degrades to a
//! placeholder node so the overall structure stays valid and usable.

use crate::allocation::{allocate, pick_priority_indexes, Distribution};
use crate::error::{OutlineError, SectionError};
use crate::prompts;
use crate::provider::TextGenerate;
use crate::retry::{FailurePolicy, RetryingGenerator};
use crate::template::section_template;
use crate::types::{GenConfig, OutlineNode, ProjectBrief, SectionSeed};
use rand::Rng;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Drives one outline generation end to end.
///
/// Owns the assembled tree until it is returned to the caller. Dropping the
/// returned future cancels all outstanding section expansions.
#[derive(Debug)]
pub struct OutlineOrchestrator<G: TextGenerate + ?Sized> {
    config: GenConfig,
    retry: RetryingGenerator<G>,
}

impl<G: TextGenerate + ?Sized> OutlineOrchestrator<G> {
    /// Create an orchestrator over a text generator
    #[inline]
    #[must_use]
    pub fn new(generator: Arc<G>, config: GenConfig) -> Self {
        let retry = RetryingGenerator::from_config(generator, &config);
        Self { config, retry }
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Generate the full outline tree for a project brief.
    ///
    /// Workflow:
    /// 1. Collect section seeds (validated, fatal on failure)
    /// 2. Pick two priority sections from the injected random source
    /// 3. Allocate the leaf budget across sections
    /// 4. Expand sections in parallel, bounded by the configured concurrency
    /// 5. Assemble in input order, degrading failed sections to placeholders
    ///
    /// # Errors
    /// [`OutlineError`] when the top-level skeleton cannot be obtained; a
    /// malformed skeleton invalidates the entire outline.
    pub async fn generate_outline<R: Rng + ?Sized>(
        &self,
        brief: &ProjectBrief,
        rng: &mut R,
    ) -> Result<Vec<OutlineNode>, OutlineError> {
        let seeds = self.collect_seeds(brief).await?;
        tracing::info!(sections = seeds.len(), "collected section seeds");

        let priority = pick_priority_indexes(rng, seeds.len());
        let budget = self.config.leaf_budget(seeds.len());
        let distribution = allocate(seeds.len(), priority, budget);
        tracing::debug!(?priority, budget, "allocated leaf budget");

        let limiter = Arc::new(Semaphore::new(self.config.section_concurrency));
        let expansions = seeds.iter().enumerate().map(|(i, seed)| {
            let limiter = Arc::clone(&limiter);
            let distribution = &distribution;
            let seeds = &seeds;
            async move {
                let Ok(_permit) = limiter.acquire().await else {
                    return placeholder_section(i + 1, seed);
                };
                match self.expand_section(brief, i, seed, distribution, seeds).await {
                    Ok(node) => node,
                    Err(e) => {
                        tracing::warn!(section = i + 1, error = %e, "section expansion degraded");
                        placeholder_section(i + 1, seed)
                    }
                }
            }
        });

        // join_all keeps input order regardless of completion order
        let outline = futures::future::join_all(expansions).await;
        tracing::info!(sections = outline.len(), "outline assembled");
        Ok(outline)
    }

    /// Request the flat section-seed list from the generator.
    ///
    /// The seed schema is a non-empty example list, so a validated response
    /// always parses to at least one seed; an empty `[]` answer fails
    /// validation and surfaces as [`OutlineError::SkeletonRejected`].
    async fn collect_seeds(&self, brief: &ProjectBrief) -> Result<Vec<SectionSeed>, OutlineError> {
        let schema = prompts::seed_schema();
        let messages = prompts::skeleton(brief);
        let text = self
            .retry
            .generate_validated(&messages, &schema, FailurePolicy::Raise, "skeleton")
            .await?;

        let cleaned = bidgen_schema::clean_payload(&text);
        serde_json::from_str(&cleaned).map_err(|e| OutlineError::MalformedSkeleton(e.to_string()))
    }

    /// Expand one section into its full subtree.
    async fn expand_section(
        &self,
        brief: &ProjectBrief,
        index: usize,
        seed: &SectionSeed,
        distribution: &Distribution,
        seeds: &[SectionSeed],
    ) -> Result<OutlineNode, SectionError> {
        let ordinal = index + 1;
        let template = section_template(&seed.new_title, ordinal, distribution);
        let template_value = serde_json::to_value(&template).map_err(SectionError::Template)?;

        let messages = prompts::section(brief, index, seeds, &template_value);
        let label = format!("section {ordinal}");
        // ReturnLast never errors; a persistently failing section comes back
        // as unvalidated text and degrades at the parse below
        let text = self
            .retry
            .generate_validated(&messages, &template_value, FailurePolicy::ReturnLast, &label)
            .await
            .unwrap_or_default();

        let cleaned = bidgen_schema::clean_payload(&text);
        let node: OutlineNode = serde_json::from_str(cleaned.trim())?;
        Ok(node)
    }
}

/// Minimal valid stand-in for a section whose expansion failed.
fn placeholder_section(ordinal: usize, seed: &SectionSeed) -> OutlineNode {
    OutlineNode::empty(ordinal.to_string())
        .with_title(seed.new_title.clone())
        .with_description(
            "Outline generation for this chapter failed; regenerate or edit manually",
        )
}
