//! Prompt construction
//!
//! Builds the conversations sent to the text generator: the top-level
//! skeleton request, per-section expansion, leaf content synthesis, and
//! free-form expansion. Each prompt embeds the structural template or the
//! surrounding outline context the generator needs.

use crate::provider::ChatMessage;
use crate::types::{NodeSummary, ProjectBrief, SectionSeed};
use serde_json::{json, Value};
use std::fmt::Write;

/// Example-shaped schema for the flat section-seed list.
#[must_use]
pub fn seed_schema() -> Value {
    json!([{
        "rating_item": "original scoring item",
        "new_title": "section title reworked from the scoring item"
    }])
}

/// Conversation requesting the flat list of top-level section titles.
#[must_use]
pub fn skeleton(brief: &ProjectBrief) -> Vec<ChatMessage> {
    let mut hint = brief.project_type.outline_hint().to_string();
    if let Some(sub_type) = &brief.sub_type {
        let _ = write!(hint, " Optimize specifically for the {sub_type} niche.");
    }

    let system = format!(
        "You are an expert bid-document writer.\n\
         ### Task\n\
         1. Draft the first-level outline of the technical proposal\n\
         ### Industry guidance\n{hint}\n\
         ### Output Format\n{schema}",
        schema = seed_schema()
    );

    vec![
        ChatMessage::system(system),
        ChatMessage::user(project_context(brief)),
    ]
}

/// Conversation expanding one section into its second and third levels.
///
/// Embeds the empty subtree template as the required output shape, plus a
/// listing of all other section titles so the generator avoids cross-section
/// duplication.
#[must_use]
pub fn section(
    brief: &ProjectBrief,
    seed_index: usize,
    seeds: &[SectionSeed],
    template: &Value,
) -> Vec<ChatMessage> {
    let mut hint = brief.project_type.detail_hint().to_string();
    if let Some(sub_type) = &brief.sub_type {
        let _ = write!(hint, " Tailor to the characteristics of the {sub_type} niche.");
    }

    let other_titles = seeds
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != seed_index)
        .map(|(j, seed)| format!("{}. {}", j + 1, seed.new_title))
        .collect::<Vec<_>>()
        .join("\n");

    let system = format!(
        "You are a bid-document expert.\n\
         ### Task\n\
         1. Complete the second- and third-level headings\n\
         ### Industry guidance\n{hint}\n\
         ### Output Format\n{template}"
    );
    let user = format!(
        "{context}\n<other_outline>\n{other_titles}\n</other_outline>",
        context = project_context(brief)
    );

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// Conversation synthesizing the body text of one leaf node.
///
/// Carries all ancestor summaries, all sibling summaries excluding the leaf
/// itself, and any retrieved supporting snippets.
#[must_use]
pub fn leaf_content(
    overview: &str,
    node: &NodeSummary,
    ancestors: &[NodeSummary],
    siblings: &[NodeSummary],
    snippets: &[String],
) -> Vec<ChatMessage> {
    let system = "You are an expert bid-document writer producing the body of the \
                  technical proposal.\n\
                  Requirements:\n\
                  1. Stay professional and consistent with the section title and description\n\
                  2. This is a technical plan, not marketing copy; keep it plain and concrete\n\
                  3. Use formal proposal language without stilted connectives\n\
                  4. Be detailed and specific, never vague\n\
                  5. Avoid repeating sibling-section content; stay complementary\n\
                  6. Prefer facts, figures, and parameters from the reference material, \
                     without copying it verbatim\n\
                  7. Return the section body directly: no headings, no extra commentary, \
                     no formatting markers";

    let mut context = String::new();
    if !ancestors.is_empty() {
        context.push_str("Ancestor sections:\n");
        for ancestor in ancestors {
            let _ = writeln!(
                context,
                "- {} {}\n  {}",
                ancestor.id, ancestor.title, ancestor.description
            );
        }
    }
    let peers: Vec<&NodeSummary> = siblings.iter().filter(|s| s.id != node.id).collect();
    if !peers.is_empty() {
        context.push_str("Sibling sections (avoid duplicating their content):\n");
        for sibling in &peers {
            let _ = writeln!(
                context,
                "- {} {}\n  {}",
                sibling.id, sibling.title, sibling.description
            );
        }
    }
    if !snippets.is_empty() {
        context.push_str("\nRelevant reference material:\n");
        context.push_str(&snippets.join("\n---\n"));
        context.push('\n');
    }

    let project = if overview.trim().is_empty() {
        String::new()
    } else {
        format!("Project overview:\n{overview}\n\n")
    };

    let user = format!(
        "{project}{context}\n\
         Current section:\n\
         id: {id}\n\
         title: {title}\n\
         description: {description}\n\n\
         Write the full body for this section, using the project overview, the \
         reference material, and the outline hierarchy above.",
        id = node.id,
        title = node.title,
        description = node.description,
    );

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// Conversation rewriting/expanding a passage per a free-form instruction.
#[must_use]
pub fn expand(content: &str, instruction: &str) -> Vec<ChatMessage> {
    let system = "You are an expert at expanding bid-document content.\n\
                  Expand and refine the passage per the instruction.\n\
                  Requirements:\n\
                  1. Keep the original structure and core points\n\
                  2. Expand specifically along the instruction\n\
                  3. Keep the result professional, accurate, and substantial\n\
                  4. Use formal proposal language\n\
                  5. Return the expanded content directly, no extra commentary";

    let user = format!(
        "Original content:\n{content}\n\nExpansion instruction:\n{instruction}\n\n\
         Expand the content following the instruction."
    );

    vec![ChatMessage::system(system.to_string()), ChatMessage::user(user)]
}

fn project_context(brief: &ProjectBrief) -> String {
    format!(
        "### Project information\n<overview>\n{}\n</overview>\n\
         <requirements>\n{}\n</requirements>",
        brief.overview, brief.requirements
    )
}
