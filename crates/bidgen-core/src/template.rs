//! Outline subtree templates
//!
//! Materializes the empty three-level subtree for one top-level section,
//! sized by the allocation and with ids following the dotted-path scheme.
//! The serialized template doubles as the validation schema for the section
//! expansion response.

use crate::allocation::Distribution;
use crate::types::OutlineNode;

/// Build the empty outline template for one top-level section.
///
/// `ordinal` is 1-based; the subtree is shaped by
/// `distribution.level2[ordinal - 1]` and
/// `distribution.leaf_per_level2[ordinal - 1]`. Titles and descriptions are
/// left empty for the generator to fill; only the section itself carries its
/// seed title. Pure and deterministic.
#[must_use]
pub fn section_template(
    section_title: &str,
    ordinal: usize,
    distribution: &Distribution,
) -> OutlineNode {
    let index = ordinal - 1;
    let level2_count = distribution.level2.get(index).copied().unwrap_or(1);
    let empty = Vec::new();
    let leaf_spread = distribution
        .leaf_per_level2
        .get(index)
        .unwrap_or(&empty);

    let children = (1..=level2_count)
        .map(|j| {
            let leaf_count = leaf_spread.get(j - 1).copied().unwrap_or(0);
            let leaves = (1..=leaf_count)
                .map(|k| OutlineNode::empty(format!("{ordinal}.{j}.{k}")))
                .collect();
            OutlineNode::empty(format!("{ordinal}.{j}")).with_children(leaves)
        })
        .collect();

    OutlineNode::empty(ordinal.to_string())
        .with_title(section_title)
        .with_children(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::allocate;
    use pretty_assertions::assert_eq;

    fn assert_id_invariant(node: &OutlineNode) {
        for (pos, child) in node.children.iter().enumerate() {
            assert_eq!(child.id, format!("{}.{}", node.id, pos + 1));
            assert_id_invariant(child);
        }
    }

    #[test]
    fn ids_follow_dotted_path_invariant() {
        let dist = allocate(5, (1, 3), 150);
        for ordinal in 1..=5 {
            let template = section_template("Section", ordinal, &dist);
            assert_eq!(template.id, ordinal.to_string());
            assert_id_invariant(&template);
        }
    }

    #[test]
    fn shape_matches_distribution() {
        let dist = allocate(5, (1, 3), 150);
        let template = section_template("Quality Assurance", 2, &dist);

        assert_eq!(template.title, "Quality Assurance");
        assert_eq!(template.children.len(), dist.level2[1]);
        for (j, level2_node) in template.children.iter().enumerate() {
            assert_eq!(level2_node.children.len(), dist.leaf_per_level2[1][j]);
            assert!(level2_node.title.is_empty());
        }
        assert_eq!(template.leaf_count(), dist.leaves[1]);
    }

    #[test]
    fn serialized_leaves_have_no_children_key() {
        let dist = allocate(2, (0, 1), 12);
        let template = section_template("t", 1, &dist);
        let json = serde_json::to_value(&template).unwrap();

        let level2 = &json["children"][0];
        let leaf = &level2["children"][0];
        assert!(leaf.get("children").is_none());
        assert_eq!(leaf["title"], "");
    }
}
