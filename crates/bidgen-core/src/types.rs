//! Core types for the generation pipeline
//!
//! Defines the fundamental types:
//! - Outline tree nodes and their prompt-facing summaries
//! - Section seeds (flat top-level skeleton entries)
//! - Project briefs and project typing
//! - Pipeline configuration

use serde::{Deserialize, Serialize};

/// One node of the outline tree.
///
/// A node's `id` is a dotted path encoding its position: a root-level id is a
/// plain 1-based integer, and every child id is its parent's id plus `.` plus
/// the child's 1-based ordinal among its siblings (`"2.3.1"`).
///
/// Only leaf nodes (empty `children`) ever hold non-empty `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Dotted-path identifier, unique within the tree
    pub id: String,
    /// Section title (empty until filled by the generator)
    #[serde(default)]
    pub title: String,
    /// Section description (empty until filled by the generator)
    #[serde(default)]
    pub description: String,
    /// Ordered child nodes; absent from serialized leaves
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineNode>,
    /// Leaf body text, written only by the content filler
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
}

impl OutlineNode {
    /// Create an empty node with the given id
    #[inline]
    #[must_use]
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            children: Vec::new(),
            content: String::new(),
        }
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With children
    #[inline]
    #[must_use]
    pub fn with_children(mut self, children: Vec<OutlineNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether this node is a leaf (the unit of content generation)
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Count leaf nodes in this subtree
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(OutlineNode::leaf_count).sum()
        }
    }
}

/// Prompt-facing summary of a node (id, title, description).
///
/// Used for ancestor and sibling context when generating leaf content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    /// Node id
    pub id: String,
    /// Node title
    pub title: String,
    /// Node description
    pub description: String,
}

impl NodeSummary {
    /// Summarize a node
    #[inline]
    #[must_use]
    pub fn of(node: &OutlineNode) -> Self {
        Self {
            id: node.id.clone(),
            title: node.title.clone(),
            description: node.description.clone(),
        }
    }
}

/// Flat description of one top-level section before tree expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSeed {
    /// Source scoring label this section was derived from
    #[serde(default)]
    pub rating_item: String,
    /// Reworked section title
    pub new_title: String,
}

impl SectionSeed {
    /// Create a seed
    #[inline]
    #[must_use]
    pub fn new(rating_item: impl Into<String>, new_title: impl Into<String>) -> Self {
        Self {
            rating_item: rating_item.into(),
            new_title: new_title.into(),
        }
    }
}

/// Project category, steering prompt emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    /// Construction/engineering work
    Engineering,
    /// Service delivery
    Service,
    /// Goods supply
    Goods,
    /// No particular category
    #[default]
    General,
}

impl ProjectType {
    /// Hint injected into skeleton-level prompts
    #[must_use]
    pub fn outline_hint(&self) -> &'static str {
        match self {
            Self::Engineering => {
                "Engineering project: emphasize technical detail, construction \
                 method, safety and quality assurance, and process flow."
            }
            Self::Service => {
                "Service project: emphasize service workflow, team strengths, \
                 response speed, and quality commitments."
            }
            Self::Goods => {
                "Goods project: emphasize product specifications, \
                 certifications, delivery plan, and after-sales service."
            }
            Self::General => "General project: balance all aspects to the project at hand.",
        }
    }

    /// Hint injected into section-expansion prompts
    #[must_use]
    pub fn detail_hint(&self) -> &'static str {
        match self {
            Self::Engineering => {
                "Engineering: second and third levels should cover drawing \
                 refinement and construction specifics."
            }
            Self::Service => {
                "Service: second and third levels should cover organizational \
                 structure and staffing."
            }
            Self::Goods => {
                "Goods: second and third levels should cover specification \
                 deviation tables and supply logistics."
            }
            Self::General => "General: deepen each heading following its own logic.",
        }
    }
}

/// Free-text input describing the project to outline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectBrief {
    /// Project overview text
    pub overview: String,
    /// Requirements / scoring criteria text
    pub requirements: String,
    /// Project category
    #[serde(default)]
    pub project_type: ProjectType,
    /// Optional sub-category refinement
    #[serde(default)]
    pub sub_type: Option<String>,
}

impl ProjectBrief {
    /// Create a brief from overview and requirements
    #[inline]
    #[must_use]
    pub fn new(overview: impl Into<String>, requirements: impl Into<String>) -> Self {
        Self {
            overview: overview.into(),
            requirements: requirements.into(),
            project_type: ProjectType::General,
            sub_type: None,
        }
    }

    /// With project type
    #[inline]
    #[must_use]
    pub fn with_project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = project_type;
        self
    }

    /// With sub-type refinement
    #[inline]
    #[must_use]
    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = Some(sub_type.into());
        self
    }
}

/// Pipeline configuration.
///
/// The section-pool concurrency ceiling and the retry count/backoff are the
/// only resource knobs the pipeline exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    /// Maximum validation retries per generation call
    pub max_retries: u32,
    /// Fixed delay between retries, in milliseconds
    pub retry_backoff_ms: u64,
    /// Simultaneous section expansions
    pub section_concurrency: usize,
    /// Minimum total leaf budget for any outline
    pub leaf_budget_floor: usize,
    /// Leaf budget contributed per top-level section
    pub leaf_budget_per_section: usize,
    /// Snippets requested from retrieval per leaf
    pub retrieval_k: usize,
}

impl GenConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With max retries
    #[inline]
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// With retry backoff in milliseconds
    #[inline]
    #[must_use]
    pub fn with_retry_backoff_ms(mut self, backoff_ms: u64) -> Self {
        self.retry_backoff_ms = backoff_ms;
        self
    }

    /// With section concurrency ceiling
    #[inline]
    #[must_use]
    pub fn with_section_concurrency(mut self, concurrency: usize) -> Self {
        self.section_concurrency = concurrency.max(1);
        self
    }

    /// Total leaf budget for a given section count.
    ///
    /// Adaptive floor: small outlines are not starved, large outlines scale.
    #[inline]
    #[must_use]
    pub fn leaf_budget(&self, section_count: usize) -> usize {
        self.leaf_budget_floor
            .max(section_count * self.leaf_budget_per_section)
    }
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_backoff_ms: 500,
            section_concurrency: 5,
            leaf_budget_floor: 150,
            leaf_budget_per_section: 10,
            retrieval_k: 3,
        }
    }
}
