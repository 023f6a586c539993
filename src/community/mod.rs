//! Community detection module

pub mod louvain;
pub mod propagation;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::GraphStore;

/// Community detection failure conditions
#[derive(Debug, Error)]
pub enum CommunityError {
    /// Modularity optimization hit a sweep or level cap while still moving
    #[error("modularity optimization did not converge within its caps")]
    LouvainDiverged,

    /// The deterministic fallback also failed; the pipeline cannot continue
    #[error("label propagation fallback did not converge within {0} iterations")]
    FallbackDiverged(usize),
}

/// A complete, disjoint assignment of every node to one community.
///
/// Community ids are contiguous `0..community_count`, numbered by first
/// appearance in ascending node order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partition {
    /// Community id per internal node index
    pub assignments: Vec<u32>,

    /// Number of distinct communities
    pub community_count: usize,
}

impl Partition {
    /// Build a partition from raw labels, renumbering them contiguous
    /// by first appearance in ascending node order.
    pub fn from_assignments(raw: &[u32]) -> Self {
        // Labels are arbitrary values, not bounded by the node count
        let max_label = raw.iter().max().copied().unwrap_or(0) as usize;
        let mut remap = vec![u32::MAX; max_label + 1];
        let mut next = 0u32;
        let mut assignments = Vec::with_capacity(raw.len());

        for &label in raw {
            let slot = &mut remap[label as usize];
            if *slot == u32::MAX {
                *slot = next;
                next += 1;
            }
            assignments.push(*slot);
        }

        Self {
            assignments,
            community_count: next as usize,
        }
    }

    pub fn community_of(&self, node: usize) -> u32 {
        self.assignments[node]
    }

    /// Member lists per community (internal indices, ascending)
    pub fn members(&self) -> Vec<Vec<u32>> {
        let mut members = vec![Vec::new(); self.community_count];
        for (node, &c) in self.assignments.iter().enumerate() {
            members[c as usize].push(node as u32);
        }
        members
    }

    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.community_count];
        for &c in &self.assignments {
            sizes[c as usize] += 1;
        }
        sizes
    }
}

/// Newman modularity of a partition over an unweighted graph.
pub fn modularity(graph: &GraphStore, assignments: &[u32]) -> f64 {
    let m = graph.edge_count as f64;
    if m == 0.0 {
        return 0.0;
    }

    let community_count = assignments.iter().map(|&c| c as usize + 1).max().unwrap_or(0);
    let mut intra = vec![0.0f64; community_count];
    let mut degree_sum = vec![0.0f64; community_count];

    for node in 0..graph.node_count {
        let c = assignments[node] as usize;
        degree_sum[c] += graph.degree(node) as f64;
        for &target in graph.neighbors(node) {
            // Count each undirected edge once
            if (target as usize) > node && assignments[target as usize] == assignments[node] {
                intra[c] += 1.0;
            }
        }
    }

    let two_m = 2.0 * m;
    (0..community_count)
        .map(|c| intra[c] / m - (degree_sum[c] / two_m).powi(2))
        .sum()
}

/// Configuration for community detection caps
#[derive(Debug, Clone, Copy)]
pub struct CommunityConfig {
    /// Maximum local-moving sweeps per Louvain level
    pub sweep_cap: usize,

    /// Maximum Louvain aggregation levels
    pub level_cap: usize,

    /// Minimum modularity gain for another aggregation round
    pub epsilon: f64,

    /// Maximum label-propagation iterations for the fallback
    pub label_prop_cap: usize,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            sweep_cap: 100,
            level_cap: 20,
            epsilon: 1e-7,
            label_prop_cap: 100,
        }
    }
}

/// Partition a graph into communities.
///
/// Runs Louvain modularity optimization and falls back to deterministic
/// label propagation when the optimizer fails to converge within its
/// caps. A fallback failure is fatal and surfaces to the caller.
pub fn detect_communities(
    graph: &GraphStore,
    config: &CommunityConfig,
) -> Result<Partition, CommunityError> {
    match louvain::louvain(graph, config) {
        Ok(partition) => {
            log::info!(
                "Louvain found {} communities (modularity {:.4})",
                partition.community_count,
                modularity(graph, &partition.assignments)
            );
            Ok(partition)
        }
        Err(err) => {
            log::warn!("{}; falling back to label propagation", err);
            let partition = propagation::label_propagation(graph, config.label_prop_cap)?;
            log::info!(
                "Label propagation found {} communities",
                partition.community_count
            );
            Ok(partition)
        }
    }
}
