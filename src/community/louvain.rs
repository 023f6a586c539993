//! Louvain modularity optimization
//!
//! Multi-level local moving + aggregation. Levels are flat indexed
//! arrays rather than a recursive structure: each level is a weighted
//! super-node graph plus a mapping from original nodes to the node that
//! represents them at that level.

use std::collections::BTreeMap;

use crate::community::{CommunityConfig, CommunityError, Partition};
use crate::graph::GraphStore;

/// One aggregation level: a weighted undirected graph over super-nodes.
struct LevelGraph {
    node_count: usize,
    /// CSR offsets into `neighbors`/`weights`
    offsets: Vec<u32>,
    /// Neighbor indices, both directions per edge
    neighbors: Vec<u32>,
    /// Weight parallel to `neighbors`
    weights: Vec<f64>,
    /// Accumulated intra-community weight per super-node
    self_loops: Vec<f64>,
    /// Total graph weight m: each edge once plus self-loops
    total_weight: f64,
}

impl LevelGraph {
    fn from_store(graph: &GraphStore) -> Self {
        let weights = vec![1.0; graph.neighbors.len()];
        Self {
            node_count: graph.node_count,
            offsets: graph.offsets.clone(),
            neighbors: graph.neighbors.clone(),
            weights,
            self_loops: vec![0.0; graph.node_count],
            total_weight: graph.edge_count as f64,
        }
    }

    fn row(&self, node: usize) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        self.neighbors[start..end]
            .iter()
            .copied()
            .zip(self.weights[start..end].iter().copied())
    }

    /// Weighted degree: incident edge weight, self-loops counted twice
    fn degrees(&self) -> Vec<f64> {
        (0..self.node_count)
            .map(|i| self.row(i).map(|(_, w)| w).sum::<f64>() + 2.0 * self.self_loops[i])
            .collect()
    }
}

/// One full local-moving phase over a level.
///
/// Nodes are swept in ascending index order; each node moves to the
/// neighboring community with the strictly greatest positive modularity
/// gain, ties resolved toward the lowest community id. Returns the raw
/// community labels once a sweep makes no move, or an error if the
/// sweep cap runs out first.
fn local_move(
    level: &LevelGraph,
    sweep_cap: usize,
) -> Result<(Vec<u32>, bool), CommunityError> {
    let n = level.node_count;
    let mut community: Vec<u32> = (0..n as u32).collect();
    let degrees = level.degrees();
    let mut sigma_tot = degrees.clone();
    let m = level.total_weight;
    let mut any_moved = false;

    for _ in 0..sweep_cap {
        let mut moved = false;

        for i in 0..n {
            // Edge weight from i into each neighboring community; a
            // BTreeMap makes the candidate order (and thus tie-breaking)
            // deterministic
            let mut weight_to: BTreeMap<u32, f64> = BTreeMap::new();
            for (j, w) in level.row(i) {
                if j as usize != i {
                    *weight_to.entry(community[j as usize]).or_default() += w;
                }
            }

            let current = community[i];
            let k_i = degrees[i];
            let k_in_current = weight_to.get(&current).copied().unwrap_or(0.0);
            // Cost of leaving the current community, with i's own degree
            // excluded from its sigma
            let sigma_current = sigma_tot[current as usize] - k_i;
            let removal = k_in_current / m - sigma_current * k_i / (2.0 * m * m);

            let mut best = current;
            let mut best_delta = 0.0f64;
            for (&candidate, &k_in) in &weight_to {
                if candidate == current {
                    continue;
                }
                let gain = k_in / m - sigma_tot[candidate as usize] * k_i / (2.0 * m * m);
                let delta = gain - removal;
                // Strict improvement required; ascending iteration keeps
                // the lowest community id on equal gains
                if delta > best_delta {
                    best_delta = delta;
                    best = candidate;
                }
            }

            if best != current {
                sigma_tot[current as usize] -= k_i;
                sigma_tot[best as usize] += k_i;
                community[i] = best;
                moved = true;
                any_moved = true;
            }
        }

        if !moved {
            return Ok((community, any_moved));
        }
    }

    Err(CommunityError::LouvainDiverged)
}

/// Renumber labels contiguous by first appearance in ascending order.
fn renumber(labels: &[u32]) -> (Vec<u32>, usize) {
    let mut remap = vec![u32::MAX; labels.len()];
    let mut next = 0u32;
    let renumbered = labels
        .iter()
        .map(|&label| {
            let slot = &mut remap[label as usize];
            if *slot == u32::MAX {
                *slot = next;
                next += 1;
            }
            *slot
        })
        .collect();
    (renumbered, next as usize)
}

/// Contract each community into a super-node for the next level.
///
/// Cross-community weight sums over all crossing edges; intra-community
/// weight and member self-loops accumulate into the super-node's
/// self-loop.
fn aggregate(level: &LevelGraph, community: &[u32], community_count: usize) -> LevelGraph {
    let mut self_loops = vec![0.0f64; community_count];
    for (i, &c) in community.iter().enumerate() {
        self_loops[c as usize] += level.self_loops[i];
    }

    let mut cross: BTreeMap<(u32, u32), f64> = BTreeMap::new();
    for i in 0..level.node_count {
        for (j, w) in level.row(i) {
            // Visit each undirected edge once
            if (j as usize) <= i {
                continue;
            }
            let ci = community[i];
            let cj = community[j as usize];
            if ci == cj {
                self_loops[ci as usize] += w;
            } else {
                let key = if ci < cj { (ci, cj) } else { (cj, ci) };
                *cross.entry(key).or_default() += w;
            }
        }
    }

    let mut adjacency: Vec<Vec<(u32, f64)>> = vec![Vec::new(); community_count];
    for (&(a, b), &w) in &cross {
        adjacency[a as usize].push((b, w));
        adjacency[b as usize].push((a, w));
    }

    let mut offsets = Vec::with_capacity(community_count + 1);
    offsets.push(0);
    let mut neighbors = Vec::new();
    let mut weights = Vec::new();
    let mut offset = 0u32;
    for list in &mut adjacency {
        list.sort_unstable_by_key(|&(j, _)| j);
        for &(j, w) in list.iter() {
            neighbors.push(j);
            weights.push(w);
        }
        offset += list.len() as u32;
        offsets.push(offset);
    }

    let total_weight =
        cross.values().sum::<f64>() + self_loops.iter().sum::<f64>();

    LevelGraph {
        node_count: community_count,
        offsets,
        neighbors,
        weights,
        self_loops,
        total_weight,
    }
}

/// Weighted modularity of a level under a community labeling.
fn level_modularity(level: &LevelGraph, community: &[u32], community_count: usize) -> f64 {
    let two_m = 2.0 * level.total_weight;
    if two_m == 0.0 {
        return 0.0;
    }

    let mut internal = vec![0.0f64; community_count];
    let mut degree_sum = vec![0.0f64; community_count];
    let degrees = level.degrees();

    for i in 0..level.node_count {
        let c = community[i] as usize;
        degree_sum[c] += degrees[i];
        internal[c] += 2.0 * level.self_loops[i];
        for (j, w) in level.row(i) {
            if j as usize != i && community[j as usize] == community[i] {
                internal[c] += w;
            }
        }
    }

    (0..community_count)
        .map(|c| internal[c] / two_m - (degree_sum[c] / two_m).powi(2))
        .sum()
}

/// Run Louvain over successive aggregation levels.
///
/// Stops when an aggregation round improves modularity by less than
/// `epsilon`; exhausting the sweep or level caps while still improving
/// is a non-convergence error (the caller falls back to label
/// propagation). Modularity never decreases across accepted rounds.
pub fn louvain(graph: &GraphStore, config: &CommunityConfig) -> Result<Partition, CommunityError> {
    if graph.node_count == 0 {
        return Ok(Partition::from_assignments(&[]));
    }
    if graph.edge_count == 0 {
        // Every node its own singleton community
        let labels: Vec<u32> = (0..graph.node_count as u32).collect();
        return Ok(Partition::from_assignments(&labels));
    }

    let mut level = LevelGraph::from_store(graph);
    // Original node -> representing node at the current level
    let mut assignment: Vec<u32> = (0..graph.node_count as u32).collect();
    let singleton: Vec<u32> = (0..level.node_count as u32).collect();
    let mut current_q = level_modularity(&level, &singleton, level.node_count);

    for level_idx in 0..config.level_cap {
        let (labels, moved) = local_move(&level, config.sweep_cap)?;
        let (renumbered, count) = renumber(&labels);

        for slot in assignment.iter_mut() {
            *slot = renumbered[*slot as usize];
        }

        let new_q = level_modularity(&level, &renumbered, count);
        log::debug!(
            "Louvain level {}: {} -> {} communities, modularity {:.6}",
            level_idx,
            level.node_count,
            count,
            new_q
        );

        if !moved || new_q - current_q < config.epsilon {
            return Ok(Partition::from_assignments(&assignment));
        }

        current_q = new_q;
        level = aggregate(&level, &renumbered, count);
    }

    Err(CommunityError::LouvainDiverged)
}

#[cfg(test)]
mod tests {
    use super::louvain;
    use crate::community::{modularity, CommunityConfig, Partition};
    use crate::graph::{GraphBuilder, GraphStore};

    fn two_cliques() -> GraphStore {
        let mut builder = GraphBuilder::new();
        for base in [0u32, 4] {
            for i in base..base + 4 {
                for j in (i + 1)..base + 4 {
                    builder.add_edge(i, j);
                }
            }
        }
        builder.build()
    }

    #[test]
    fn splits_two_cliques() {
        let g = two_cliques();
        let p = louvain(&g, &CommunityConfig::default()).unwrap();
        assert_eq!(p.community_count, 2);
        assert_eq!(p.sizes(), vec![4, 4]);
        // All of the first clique shares one community
        for node in 1..4 {
            assert_eq!(p.community_of(node), p.community_of(0));
        }
        assert_ne!(p.community_of(0), p.community_of(4));
    }

    #[test]
    fn two_cliques_with_bridge_still_split() {
        let mut builder = GraphBuilder::new();
        for base in [0u32, 4] {
            for i in base..base + 4 {
                for j in (i + 1)..base + 4 {
                    builder.add_edge(i, j);
                }
            }
        }
        builder.add_edge(3, 4);
        let g = builder.build();
        let p = louvain(&g, &CommunityConfig::default()).unwrap();
        assert_eq!(p.community_count, 2);
        assert_eq!(p.sizes(), vec![4, 4]);
    }

    #[test]
    fn partition_is_complete_and_disjoint() {
        let g = two_cliques();
        let p = louvain(&g, &CommunityConfig::default()).unwrap();
        assert_eq!(p.assignments.len(), g.node_count);
        let total: usize = p.sizes().iter().sum();
        assert_eq!(total, g.node_count);
    }

    #[test]
    fn improves_on_singleton_modularity() {
        let g = two_cliques();
        let p = louvain(&g, &CommunityConfig::default()).unwrap();
        let singleton: Vec<u32> = (0..g.node_count as u32).collect();
        assert!(modularity(&g, &p.assignments) >= modularity(&g, &singleton));
    }

    #[test]
    fn edgeless_graph_yields_singletons() {
        let mut builder = GraphBuilder::new();
        builder.add_node(1);
        builder.add_node(2);
        builder.add_node(3);
        let g = builder.build();
        let p = louvain(&g, &CommunityConfig::default()).unwrap();
        assert_eq!(p.community_count, 3);
    }

    #[test]
    fn empty_graph_yields_empty_partition() {
        let g = GraphStore::empty();
        let p: Partition = louvain(&g, &CommunityConfig::default()).unwrap();
        assert_eq!(p.community_count, 0);
        assert!(p.assignments.is_empty());
    }

    #[test]
    fn deterministic_across_runs() {
        let g = two_cliques();
        let a = louvain(&g, &CommunityConfig::default()).unwrap();
        let b = louvain(&g, &CommunityConfig::default()).unwrap();
        assert_eq!(a.assignments, b.assignments);
    }
}
