//! Centrality measures module
//!
//! Four independent measures computed against one immutable graph
//! snapshot, normally the giant component.

pub mod betweenness;
pub mod closeness;
pub mod eigenvector;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::GraphStore;

/// Per-node centrality scores, indexed by internal node index
/// (ascending-NodeId order by the graph index invariant).
pub type CentralityMap = Vec<f64>;

/// Centrality failure conditions
#[derive(Debug, Error)]
pub enum CentralityError {
    /// Power iteration hit its cap before meeting the tolerance. Must
    /// never be conflated with a converged result.
    #[error("eigenvector power iteration did not converge within {iterations} iterations")]
    EigenvectorDiverged { iterations: usize },
}

/// The four computed measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Degree,
    Betweenness,
    Closeness,
    Eigenvector,
}

impl Measure {
    pub const ALL: [Measure; 4] = [
        Measure::Degree,
        Measure::Betweenness,
        Measure::Closeness,
        Measure::Eigenvector,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Measure::Degree => "degree",
            Measure::Betweenness => "betweenness",
            Measure::Closeness => "closeness",
            Measure::Eigenvector => "eigenvector",
        }
    }
}

/// All four centrality maps over one graph
#[derive(Debug, Clone)]
pub struct CentralitySuite {
    pub degree: CentralityMap,
    pub betweenness: CentralityMap,
    pub closeness: CentralityMap,
    pub eigenvector: CentralityMap,
}

impl CentralitySuite {
    pub fn get(&self, measure: Measure) -> &CentralityMap {
        match measure {
            Measure::Degree => &self.degree,
            Measure::Betweenness => &self.betweenness,
            Measure::Closeness => &self.closeness,
            Measure::Eigenvector => &self.eigenvector,
        }
    }
}

/// Caps and tolerances for the iterative measures
#[derive(Debug, Clone, Copy)]
pub struct CentralityConfig {
    pub eigen_max_iter: usize,
    pub eigen_tol: f64,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            eigen_max_iter: 1000,
            eigen_tol: 1e-6,
        }
    }
}

/// Degree centrality: degree(v) / (|V|-1), zero for trivial graphs.
pub fn degree_centrality(graph: &GraphStore) -> CentralityMap {
    if graph.node_count <= 1 {
        return vec![0.0; graph.node_count];
    }
    let norm = (graph.node_count - 1) as f64;
    (0..graph.node_count)
        .map(|v| graph.degree(v) as f64 / norm)
        .collect()
}

/// Compute all four measures over one immutable graph.
///
/// Degree, betweenness, and closeness are total; eigenvector
/// non-convergence aborts the suite with a typed error.
pub fn compute_suite(
    graph: &GraphStore,
    config: &CentralityConfig,
) -> Result<CentralitySuite, CentralityError> {
    log::info!("Computing degree centrality...");
    let degree = degree_centrality(graph);

    log::info!("Computing betweenness centrality (Brandes)...");
    let betweenness = betweenness::betweenness_centrality(graph);

    log::info!("Computing closeness centrality...");
    let closeness = closeness::closeness_centrality(graph);

    log::info!("Computing eigenvector centrality (power iteration)...");
    let eigenvector =
        eigenvector::eigenvector_centrality(graph, config.eigen_max_iter, config.eigen_tol)?;

    Ok(CentralitySuite {
        degree,
        betweenness,
        closeness,
        eigenvector,
    })
}

#[cfg(test)]
pub(crate) mod test_graphs {
    use crate::graph::{GraphBuilder, GraphStore};

    /// 0-1-2-3-4 path
    pub fn path5() -> GraphStore {
        let mut builder = GraphBuilder::new();
        for i in 0..4 {
            builder.add_edge(i, i + 1);
        }
        builder.build()
    }

    /// Triangle on nodes 0,1,2
    pub fn triangle() -> GraphStore {
        let mut builder = GraphBuilder::new();
        builder.add_edge(0, 1);
        builder.add_edge(1, 2);
        builder.add_edge(2, 0);
        builder.build()
    }
}
