//! Weighted leaf allocation
//!
//! Distributes a fixed budget of leaf nodes across top-level sections. Two
//! randomly chosen "priority" sections get amplified shares (weights 1.4 and
//! 1.2 against a normal 1.0); every other section weighs 1.0.
//!
//! The last section (in input order) absorbs the rounding remainder so the
//! distributed total is exact. This is asymmetric by design; callers must not
//! assume symmetric treatment of sections.

use rand::Rng;

const PRIMARY_WEIGHT: f64 = 1.4;
const SECONDARY_WEIGHT: f64 = 1.2;
const NORMAL_WEIGHT: f64 = 1.0;

/// Per-section node counts for one outline invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Distribution {
    /// Second-level node count per section, each at least 1
    pub level2: Vec<usize>,
    /// Leaf budget per section; sums to the total budget exactly
    pub leaves: Vec<usize>,
    /// Leaves under each second-level node, per section; row `i` has
    /// `level2[i]` entries summing to `leaves[i]`
    pub leaf_per_level2: Vec<Vec<usize>>,
}

impl Distribution {
    /// Number of sections covered
    #[inline]
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.level2.len()
    }
}

/// Pick two distinct priority-section indices, uniform without replacement.
///
/// With fewer than two sections both indices collapse to 0 (degenerate
/// single-priority allocation; must not crash).
pub fn pick_priority_indexes<R: Rng + ?Sized>(rng: &mut R, section_count: usize) -> (usize, usize) {
    if section_count < 2 {
        return (0, 0);
    }
    let picked = rand::seq::index::sample(rng, section_count, 2);
    (picked.index(0), picked.index(1))
}

/// Compute the weighted distribution of second-level and leaf nodes.
///
/// `priority.0` weighs 1.4, `priority.1` weighs 1.2. Every section keeps at
/// least one second-level node even when its leaf share rounds to zero, so
/// the tree never degenerates to a childless top-level node.
#[must_use]
pub fn allocate(
    section_count: usize,
    priority: (usize, usize),
    total_leaves: usize,
) -> Distribution {
    if section_count == 0 {
        return Distribution::default();
    }

    let (primary, secondary) = priority;
    let total_weight =
        (section_count as f64 - 2.0) * NORMAL_WEIGHT + PRIMARY_WEIGHT + SECONDARY_WEIGHT;

    let base = (total_leaves as f64 / section_count as f64 / 3.0).round().max(1.0) as usize;

    let mut level2 = vec![base; section_count];
    // When both indices coincide the secondary amplification wins, matching
    // the assignment order below.
    level2[primary] = ((base as f64 * PRIMARY_WEIGHT).round() as usize).max(1);
    level2[secondary] = ((base as f64 * SECONDARY_WEIGHT).round() as usize).max(1);

    let mut remaining = total_leaves as i64;
    let mut leaves = vec![0usize; section_count];
    let mut leaf_per_level2 = Vec::with_capacity(section_count);

    for i in 0..section_count {
        let weight = if i == primary {
            PRIMARY_WEIGHT
        } else if i == secondary {
            SECONDARY_WEIGHT
        } else {
            NORMAL_WEIGHT
        };

        // Every section but the last takes its rounded weighted share; the
        // last absorbs whatever is left so the sum stays exact.
        let target = if i + 1 < section_count {
            (total_leaves as f64 * weight / total_weight).round() as i64
        } else {
            remaining
        };
        let target = target.max(0) as usize;

        let per_node = target / level2[i];
        let extra = target % level2[i];
        leaf_per_level2.push(
            (0..level2[i])
                .map(|j| per_node + usize::from(j < extra))
                .collect(),
        );

        leaves[i] = target;
        remaining -= target as i64;
    }

    Distribution {
        level2,
        leaves,
        leaf_per_level2,
    }
}
