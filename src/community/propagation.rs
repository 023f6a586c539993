//! Label propagation fallback
//!
//! Deterministic variant: nodes are visited in ascending index order
//! and adopt the most frequent label among their neighbors, ties broken
//! toward the lowest label id. Used when modularity optimization fails
//! to converge; if this also runs out of iterations the pipeline has no
//! partition to offer and must abort.

use std::collections::BTreeMap;

use crate::community::{CommunityError, Partition};
use crate::graph::GraphStore;

pub fn label_propagation(
    graph: &GraphStore,
    iteration_cap: usize,
) -> Result<Partition, CommunityError> {
    let n = graph.node_count;
    let mut labels: Vec<u32> = (0..n as u32).collect();

    for iteration in 0..iteration_cap {
        let mut changed = false;

        for node in 0..n {
            // Count neighbor labels; on equal counts the ordering ranks
            // the lower label higher, so ties resolve deterministically
            let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
            for &target in graph.neighbors(node) {
                *counts.entry(labels[target as usize]).or_default() += 1;
            }

            let Some((&best_label, _)) = counts.iter().max_by(|a, b| {
                a.1.cmp(b.1).then_with(|| b.0.cmp(a.0))
            }) else {
                continue; // isolated node keeps its own label
            };

            if best_label != labels[node] {
                labels[node] = best_label;
                changed = true;
            }
        }

        if !changed {
            log::debug!("Label propagation converged after {} iterations", iteration + 1);
            return Ok(Partition::from_assignments(&labels));
        }
    }

    Err(CommunityError::FallbackDiverged(iteration_cap))
}
