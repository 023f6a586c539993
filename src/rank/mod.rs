//! Ranking and cross-measure analysis
//!
//! Thin, pure derivations over the centrality outputs: top-k lists,
//! the cross-measure overlap set, and the Pearson correlation matrix.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use itertools::Itertools;

use crate::centrality::{CentralitySuite, Measure};
use crate::graph::{GraphStore, NodeId};

/// Top-k nodes by score, descending; equal scores break toward the
/// lower external NodeId so rankings are reproducible.
pub fn top_k(graph: &GraphStore, scores: &[f64], k: usize) -> Vec<(NodeId, f64)> {
    let mut ranked: Vec<(NodeId, f64)> = scores
        .iter()
        .enumerate()
        .map(|(idx, &score)| (graph.node_id(idx), score))
        .collect();

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(k);
    ranked
}

/// Top-k list per measure, in `Measure::ALL` order.
pub fn rank_all(
    graph: &GraphStore,
    suite: &CentralitySuite,
    k: usize,
) -> Vec<(Measure, Vec<(NodeId, f64)>)> {
    Measure::ALL
        .iter()
        .map(|&measure| (measure, top_k(graph, suite.get(measure), k)))
        .collect()
}

/// Nodes appearing in the top-k of every measure, ascending.
pub fn overlap(rankings: &[(Measure, Vec<(NodeId, f64)>)]) -> Vec<NodeId> {
    let mut sets = rankings
        .iter()
        .map(|(_, list)| list.iter().map(|&(id, _)| id).collect::<BTreeSet<_>>());

    let Some(first) = sets.next() else {
        return Vec::new();
    };
    let common = sets.fold(first, |acc, set| acc.intersection(&set).copied().collect());
    common.into_iter().collect()
}

/// Pearson correlation of two equal-length score vectors; zero when
/// either has no variance.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len() as f64;
    if n == 0.0 {
        return 0.0;
    }

    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return 0.0;
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}

/// Pairwise Pearson matrix over the four measures, `Measure::ALL` order.
pub fn correlation_matrix(suite: &CentralitySuite) -> Vec<Vec<f64>> {
    Measure::ALL
        .iter()
        .map(|&row| {
            Measure::ALL
                .iter()
                .map(|&col| {
                    if row == col {
                        1.0
                    } else {
                        pearson(suite.get(row), suite.get(col))
                    }
                })
                .collect_vec()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{correlation_matrix, overlap, pearson, top_k};
    use crate::centrality::{CentralitySuite, Measure};
    use crate::graph::GraphBuilder;

    fn star_graph() -> crate::graph::GraphStore {
        let mut builder = GraphBuilder::new();
        for leaf in [1, 2, 3, 4] {
            builder.add_edge(0, leaf);
        }
        builder.build()
    }

    #[test]
    fn top_k_orders_descending() {
        let g = star_graph();
        let ranked = top_k(&g, &[0.1, 0.9, 0.3, 0.7, 0.5], 3);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].0, 1);
        assert_eq!(ranked[1].0, 3);
        assert_eq!(ranked[2].0, 4);
    }

    #[test]
    fn top_k_tie_breaks_on_ascending_id() {
        let g = star_graph();
        let ranked = top_k(&g, &[0.5, 0.5, 0.5, 0.5, 0.5], 3);
        assert_eq!(
            ranked.iter().map(|&(id, _)| id).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn top_k_larger_than_graph_returns_everything() {
        let g = star_graph();
        let ranked = top_k(&g, &[0.1, 0.2, 0.3, 0.4, 0.5], 50);
        assert_eq!(ranked.len(), 5);
    }

    #[test]
    fn overlap_intersects_all_measures() {
        let rankings = vec![
            (Measure::Degree, vec![(1u32, 0.9), (2, 0.8), (3, 0.7)]),
            (Measure::Betweenness, vec![(2u32, 0.9), (3, 0.8), (4, 0.7)]),
            (Measure::Closeness, vec![(3u32, 0.9), (2, 0.8), (5, 0.7)]),
        ];
        assert_eq!(overlap(&rankings), vec![2, 3]);
    }

    #[test]
    fn overlap_of_nothing_is_empty() {
        assert!(overlap(&[]).is_empty());
    }

    #[test]
    fn pearson_perfect_and_inverse() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0];
        let c = [4.0, 3.0, 2.0, 1.0];
        assert!((pearson(&a, &b) - 1.0).abs() < 1e-12);
        assert!((pearson(&a, &c) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_zero_variance_is_zero() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn correlation_matrix_diagonal_and_symmetry() {
        let suite = CentralitySuite {
            degree: vec![0.1, 0.5, 0.9],
            betweenness: vec![0.0, 0.6, 0.2],
            closeness: vec![0.3, 0.4, 0.8],
            eigenvector: vec![0.2, 0.5, 0.7],
        };
        let matrix = correlation_matrix(&suite);
        for i in 0..4 {
            assert_eq!(matrix[i][i], 1.0);
            for j in 0..4 {
                assert!((matrix[i][j] - matrix[j][i]).abs() < 1e-12);
                assert!(matrix[i][j].abs() <= 1.0 + 1e-12);
            }
        }
    }
}
