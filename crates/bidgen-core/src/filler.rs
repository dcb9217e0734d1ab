//! Leaf content filling
//!
//! Walks a completed outline tree depth-first and issues one free-text
//! generation call per leaf, carrying ancestor and sibling context plus any
//! retrieved supporting material. Nodes are mutated in place: content only,
//! never structure, and sibling order is preserved.
//!
//! Top-level chapters are filled concurrently; leaves within a chapter are
//! filled sequentially.

use crate::prompts;
use crate::provider::{EmbeddingSearch, ResponseFormat, TextGenerate};
use crate::types::{GenConfig, NodeSummary, OutlineNode};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;

/// Fills leaf content across an outline tree.
///
/// Takes a unique working reference to the tree; must not run concurrently
/// with another mutator of the same tree.
#[derive(Debug)]
pub struct ContentFiller<G: TextGenerate + ?Sized, R: EmbeddingSearch + ?Sized> {
    generator: Arc<G>,
    retrieval: Arc<R>,
    config: GenConfig,
}

impl<G: TextGenerate + ?Sized, R: EmbeddingSearch + ?Sized> ContentFiller<G, R> {
    /// Create a filler over a generator and a retrieval collaborator
    #[inline]
    #[must_use]
    pub fn new(generator: Arc<G>, retrieval: Arc<R>, config: GenConfig) -> Self {
        Self {
            generator,
            retrieval,
            config,
        }
    }

    /// Fill every leaf of the outline with generated content.
    ///
    /// Never fails: a leaf whose generation call errors gets the error text
    /// written into its `content` field, so a single stuck leaf cannot block
    /// sibling or ancestor completion.
    pub async fn fill(&self, outline: &mut [OutlineNode], overview: &str) {
        let chapter_summaries: Vec<NodeSummary> = outline.iter().map(NodeSummary::of).collect();
        let chapters = outline.iter_mut().map(|chapter| {
            self.fill_node(chapter, Vec::new(), chapter_summaries.clone(), overview)
        });
        futures::future::join_all(chapters).await;
    }

    /// Recurse into one node, forwarding the accumulated ancestor chain and
    /// the node's sibling set.
    fn fill_node<'a>(
        &'a self,
        node: &'a mut OutlineNode,
        ancestors: Vec<NodeSummary>,
        siblings: Vec<NodeSummary>,
        overview: &'a str,
    ) -> BoxFuture<'a, ()> {
        async move {
            if node.is_leaf() {
                let summary = NodeSummary::of(node);
                node.content = self
                    .leaf_body(&summary, &ancestors, &siblings, overview)
                    .await;
            } else {
                let mut chain = ancestors;
                chain.push(NodeSummary::of(node));
                let child_summaries: Vec<NodeSummary> =
                    node.children.iter().map(NodeSummary::of).collect();
                for child in node.children.iter_mut() {
                    self.fill_node(child, chain.clone(), child_summaries.clone(), overview)
                        .await;
                }
            }
        }
        .boxed()
    }

    /// Generate the body text for one leaf. Not schema-validated.
    async fn leaf_body(
        &self,
        node: &NodeSummary,
        ancestors: &[NodeSummary],
        siblings: &[NodeSummary],
        overview: &str,
    ) -> String {
        // Query keyed by the leaf's own title/description plus the nearest
        // ancestor's title
        let mut query = format!("{} {}", node.title, node.description);
        if let Some(parent) = ancestors.last() {
            query = format!("{} {}", parent.title, query);
        }
        let snippets = self.retrieval.search(&query, self.config.retrieval_k).await;
        if !snippets.is_empty() {
            tracing::debug!(leaf = %node.id, count = snippets.len(), "retrieved supporting snippets");
        }

        let messages = prompts::leaf_content(overview, node, ancestors, siblings, &snippets);
        match self
            .generator
            .generate(&messages, ResponseFormat::Text)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(leaf = %node.id, error = %e, "leaf content generation failed");
                format!("Error: {e}")
            }
        }
    }
}
