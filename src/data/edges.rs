//! Edge-list file ingestion
//!
//! Reads a directory of ego-network edge files, each line holding two
//! whitespace-separated integer node ids. Malformed lines are skipped;
//! I/O failures are fatal.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::graph::NodeId;

/// Raw union of all edge files: the node universe and the edge list.
///
/// Transient input for the sampler; nodes are kept ordered so the
/// sampling procedure sees a stable universe regardless of file layout.
#[derive(Debug, Default)]
pub struct EdgeData {
    /// All node ids seen across every file
    pub nodes: BTreeSet<NodeId>,

    /// All edges in file order (may contain duplicates and self-loops;
    /// the graph builder cleans those up)
    pub edges: Vec<(NodeId, NodeId)>,
}

/// Parse one edge line: exactly two unsigned integer tokens.
fn parse_edge_line(line: &str) -> Option<(NodeId, NodeId)> {
    let mut tokens = line.split_whitespace();
    let a = tokens.next()?.parse().ok()?;
    let b = tokens.next()?.parse().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some((a, b))
}

/// Load every `.edges` file under `dir`, in sorted filename order.
pub fn load_edge_files(dir: &Path) -> Result<EdgeData> {
    log::info!("Reading edge files from {}", dir.display());

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read input directory {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("cannot list input directory {}", dir.display()))?
            .path();
        if path.extension().map_or(false, |ext| ext == "edges") {
            paths.push(path);
        }
    }
    // Directory iteration order is platform-dependent
    paths.sort();

    log::info!("Found {} ego-network edge files", paths.len());

    let mut data = EdgeData::default();
    let mut skipped = 0usize;

    for path in &paths {
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        for line in BufReader::new(file).lines() {
            let line = line.with_context(|| format!("cannot read {}", path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_edge_line(&line) {
                Some((a, b)) => {
                    data.nodes.insert(a);
                    data.nodes.insert(b);
                    data.edges.push((a, b));
                }
                None => {
                    skipped += 1;
                    log::debug!("Skipping malformed line in {}: {:?}", path.display(), line);
                }
            }
        }
    }

    log::info!(
        "Loaded {} unique nodes and {} edges ({} malformed lines skipped)",
        data.nodes.len(),
        data.edges.len(),
        skipped
    );

    Ok(data)
}
