//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, to_string_pretty};

use crate::centrality::{CentralitySuite, Measure};
use crate::community::Partition;
use crate::graph::{GraphStore, NodeId};

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

// Empty score vectors (empty input graph) must not fold to +/-infinity,
// which serde_json would render as null
fn min(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Save all analysis outputs to the specified directory.
#[allow(clippy::too_many_arguments)]
pub fn save_results(
    sampled: &GraphStore,
    giant: &GraphStore,
    component_count: usize,
    partition: &Partition,
    suite: &CentralitySuite,
    rankings: &[(Measure, Vec<(NodeId, f64)>)],
    overlap: &[NodeId],
    correlation: &[Vec<f64>],
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving analysis results to {}", output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(sampled, giant, component_count, partition, overlap, output_dir)?;
    save_communities(giant, partition, output_dir)?;
    save_centrality(suite, rankings, output_dir)?;
    save_correlation(correlation, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Graph-level and community-level summary statistics
fn save_summary(
    sampled: &GraphStore,
    giant: &GraphStore,
    component_count: usize,
    partition: &Partition,
    overlap: &[NodeId],
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let sizes = partition.sizes();
    let summary = json!({
        "sampled_graph": {
            "node_count": sampled.node_count,
            "edge_count": sampled.edge_count,
            "density": sampled.density(),
            "component_count": component_count,
        },
        "giant_component": {
            "node_count": giant.node_count,
            "edge_count": giant.edge_count,
            "density": giant.density(),
        },
        "communities": {
            "count": partition.community_count,
            "largest": sizes.iter().max().copied().unwrap_or(0),
            "smallest": sizes.iter().min().copied().unwrap_or(0),
            "avg_size": if sizes.is_empty() { 0.0 } else {
                sizes.iter().sum::<usize>() as f64 / sizes.len() as f64
            },
        },
        "top_k_overlap": overlap,
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Per-community member lists, resolved to external node ids
fn save_communities(giant: &GraphStore, partition: &Partition, output_dir: &str) -> Result<()> {
    log::info!("Saving community membership");

    let path = Path::new(output_dir).join("communities.json");
    let mut file = File::create(path)?;

    let communities = json!({
        "communities": partition.members().iter().enumerate().map(|(id, members)| {
            json!({
                "id": id,
                "size": members.len(),
                "members": members.iter()
                    .map(|&idx| giant.node_id(idx as usize))
                    .collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>()
    });

    file.write_all(to_string_pretty(&communities)?.as_bytes())?;

    Ok(())
}

/// Per-measure score statistics and top-k rankings
fn save_centrality(
    suite: &CentralitySuite,
    rankings: &[(Measure, Vec<(NodeId, f64)>)],
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving centrality measures");

    let path = Path::new(output_dir).join("centrality.json");
    let mut file = File::create(path)?;

    let measures = rankings
        .iter()
        .map(|(measure, ranked)| {
            let scores = suite.get(*measure);
            json!({
                "measure": measure.name(),
                "mean": mean(scores),
                "min": min(scores),
                "max": max(scores),
                "top": ranked.iter().map(|&(id, score)| {
                    json!({ "node": id, "score": score })
                }).collect::<Vec<_>>(),
            })
        })
        .collect::<Vec<_>>();

    file.write_all(to_string_pretty(&json!({ "measures": measures }))?.as_bytes())?;

    Ok(())
}

/// Pairwise Pearson correlation between the four centrality vectors
fn save_correlation(correlation: &[Vec<f64>], output_dir: &str) -> Result<()> {
    log::info!("Saving correlation matrix");

    let path = Path::new(output_dir).join("correlation.json");
    let mut file = File::create(path)?;

    let names: Vec<&str> = Measure::ALL.iter().map(|m| m.name()).collect();
    let matrix = json!({
        "measures": names,
        "pearson": correlation,
    });

    file.write_all(to_string_pretty(&matrix)?.as_bytes())?;

    Ok(())
}
