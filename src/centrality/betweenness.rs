//! Betweenness centrality via Brandes' algorithm
//!
//! One BFS per source with reverse dependency accumulation, O(V*E)
//! total. Sources are independent, so they run on the rayon pool and
//! the partial dependency vectors merge by plain summation at the end.

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::centrality::CentralityMap;
use crate::graph::GraphStore;

/// Dependency contributions from a single BFS source.
fn accumulate_from_source(graph: &GraphStore, source: usize) -> Vec<f64> {
    let n = graph.node_count;
    let mut stack = Vec::with_capacity(n);
    let mut sigma = vec![0u64; n];
    let mut distance = vec![i32::MAX; n];
    let mut predecessors: Vec<Vec<u32>> = vec![Vec::new(); n];
    let mut delta = vec![0.0f64; n];

    sigma[source] = 1;
    distance[source] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(source as u32);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        for &w in graph.neighbors(v as usize) {
            let wi = w as usize;
            if distance[wi] == i32::MAX {
                distance[wi] = distance[v as usize] + 1;
                queue.push_back(w);
            }
            if distance[wi] == distance[v as usize] + 1 {
                sigma[wi] = sigma[wi].saturating_add(sigma[v as usize]);
                predecessors[wi].push(v);
            }
        }
    }

    // Back-propagate in reverse BFS order
    while let Some(w) = stack.pop() {
        let wi = w as usize;
        for &v in &predecessors[wi] {
            let vi = v as usize;
            delta[vi] += (sigma[vi] as f64 / sigma[wi] as f64) * (1.0 + delta[wi]);
        }
        // Source contributes no dependency to itself
        if wi == source {
            delta[wi] = 0.0;
        }
    }

    delta
}

/// Normalized betweenness centrality for every node.
///
/// Undirected: pair dependencies are halved, then scaled by
/// 2 / ((|V|-1)(|V|-2)). Graphs with fewer than three nodes have no
/// intermediaries and score zero everywhere.
pub fn betweenness_centrality(graph: &GraphStore) -> CentralityMap {
    let n = graph.node_count;
    if n < 3 {
        return vec![0.0; n];
    }

    let partials: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|source| accumulate_from_source(graph, source))
        .collect();

    let mut centrality = vec![0.0f64; n];
    for partial in partials {
        for (slot, score) in centrality.iter_mut().zip(partial) {
            *slot += score;
        }
    }

    // Each unordered pair was counted from both endpoints
    let scale = 2.0 / ((n - 1) as f64 * (n - 2) as f64) / 2.0;
    for score in &mut centrality {
        *score *= scale;
    }

    centrality
}

#[cfg(test)]
mod tests {
    use super::betweenness_centrality;
    use crate::centrality::test_graphs::{path5, triangle};
    use crate::graph::GraphBuilder;

    #[test]
    fn path_middle_node_dominates() {
        let g = path5();
        let bc = betweenness_centrality(&g);
        for v in [0, 1, 3, 4] {
            assert!(bc[2] > bc[v]);
        }
        // Node 2 lies on 4 of the 6 pairs excluding it:
        // (0,3),(0,4),(1,3),(1,4); normalized: 4 * 2/(4*3)
        assert!((bc[2] - 4.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn endpoints_have_zero_betweenness() {
        let g = path5();
        let bc = betweenness_centrality(&g);
        assert_eq!(bc[0], 0.0);
        assert_eq!(bc[4], 0.0);
    }

    #[test]
    fn triangle_is_uniformly_zero() {
        let g = triangle();
        let bc = betweenness_centrality(&g);
        for v in 0..3 {
            assert!(bc[v].abs() < 1e-12);
        }
    }

    #[test]
    fn tiny_graphs_score_zero() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(0, 1);
        let g = builder.build();
        assert_eq!(betweenness_centrality(&g), vec![0.0, 0.0]);
    }

    #[test]
    fn scores_are_non_negative() {
        let g = path5();
        assert!(betweenness_centrality(&g).iter().all(|&v| v >= 0.0));
    }
}
