//! Configuration management for the analysis pipeline

use crate::centrality::CentralityConfig;
use crate::community::CommunityConfig;

/// Tunable parameters for a full analysis run
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of nodes to sample from the universe
    pub sample_size: usize,

    /// Seed for the deterministic sampling procedure
    pub seed: u64,

    /// Ranking depth per centrality measure
    pub top_k: usize,

    /// Eigenvector power-iteration cap
    pub eigen_max_iter: usize,

    /// Eigenvector convergence tolerance
    pub eigen_tol: f64,

    /// Maximum local-moving sweeps per Louvain level
    pub louvain_sweep_cap: usize,

    /// Maximum Louvain aggregation levels
    pub louvain_level_cap: usize,

    /// Maximum label-propagation iterations for the fallback
    pub label_prop_cap: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_size: 2000,
            seed: 42,
            top_k: 10,
            eigen_max_iter: 1000,
            eigen_tol: 1e-6,
            louvain_sweep_cap: 100,
            louvain_level_cap: 20,
            label_prop_cap: 100,
        }
    }
}

impl Config {
    pub fn community(&self) -> CommunityConfig {
        CommunityConfig {
            sweep_cap: self.louvain_sweep_cap,
            level_cap: self.louvain_level_cap,
            label_prop_cap: self.label_prop_cap,
            ..CommunityConfig::default()
        }
    }

    pub fn centrality(&self) -> CentralityConfig {
        CentralityConfig {
            eigen_max_iter: self.eigen_max_iter,
            eigen_tol: self.eigen_tol,
        }
    }
}
