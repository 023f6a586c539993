//! Closeness centrality
//!
//! Single-source BFS per node with the Wasserman-Faust correction, so
//! scores stay comparable when the graph is disconnected.

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::centrality::CentralityMap;
use crate::graph::GraphStore;

/// BFS shortest-path distances from one source; unreachable nodes stay
/// at `usize::MAX`.
pub fn bfs_distances(graph: &GraphStore, source: usize) -> Vec<usize> {
    let mut distances = vec![usize::MAX; graph.node_count];
    distances[source] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source as u32);

    while let Some(v) = queue.pop_front() {
        for &w in graph.neighbors(v as usize) {
            if distances[w as usize] == usize::MAX {
                distances[w as usize] = distances[v as usize] + 1;
                queue.push_back(w);
            }
        }
    }

    distances
}

/// Wasserman-Faust closeness: (R/(|V|-1)) * (R/D) with R the reachable
/// count and D the distance sum; zero when nothing is reachable.
pub fn closeness_centrality(graph: &GraphStore) -> CentralityMap {
    let n = graph.node_count;
    if n <= 1 {
        return vec![0.0; n];
    }

    (0..n)
        .into_par_iter()
        .map(|v| {
            let distances = bfs_distances(graph, v);
            let mut reachable = 0usize;
            let mut distance_sum = 0usize;
            for &d in &distances {
                if d != usize::MAX && d > 0 {
                    reachable += 1;
                    distance_sum += d;
                }
            }
            if distance_sum == 0 {
                return 0.0;
            }
            let r = reachable as f64;
            (r / (n - 1) as f64) * (r / distance_sum as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{bfs_distances, closeness_centrality};
    use crate::centrality::test_graphs::path5;
    use crate::graph::GraphBuilder;

    #[test]
    fn bfs_distances_on_path() {
        let g = path5();
        assert_eq!(bfs_distances(&g, 0), vec![0, 1, 2, 3, 4]);
        assert_eq!(bfs_distances(&g, 2), vec![2, 1, 0, 1, 2]);
    }

    #[test]
    fn path_middle_node_is_closest() {
        let g = path5();
        let cc = closeness_centrality(&g);
        for v in [0, 1, 3, 4] {
            assert!(cc[2] > cc[v]);
        }
        // Node 2: distances 2+1+1+2 = 6, all 4 reachable: (4/4)*(4/6)
        assert!((cc[2] - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn disconnected_graph_uses_reachable_fraction() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(0, 1);
        builder.add_node(2);
        let g = builder.build();
        let cc = closeness_centrality(&g);
        // Node 0 reaches 1 of 2 others at distance 1: (1/2)*(1/1)
        assert!((cc[0] - 0.5).abs() < 1e-12);
        assert_eq!(cc[2], 0.0);
    }

    #[test]
    fn scores_lie_in_unit_interval() {
        let g = path5();
        let cc = closeness_centrality(&g);
        assert!(cc.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }
}
