//! Memory-efficient undirected graph representation

use serde::{Deserialize, Serialize};

/// External node identifier as it appears in the edge-list files.
pub type NodeId = u32;

/// Compressed sparse representation of a simple undirected graph.
///
/// Nodes are stored as dense internal indices `0..node_count`. The
/// `node_ids` array maps each index back to the external id and is
/// sorted ascending, so internal index order is ascending-NodeId order.
/// Each undirected edge appears in the adjacency of both endpoints.
///
/// A graph is never mutated after construction; all analysis stages
/// share it read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStore {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Number of undirected edges
    pub edge_count: usize,

    /// Offset array: index where each node's neighbors begin.
    /// offsets[i] to offsets[i+1] defines the neighbor range for node i
    pub offsets: Vec<u32>,

    /// Neighbor array: concatenated sorted adjacency lists (internal indices)
    pub neighbors: Vec<u32>,

    /// Mapping from internal indices to external node ids, sorted ascending
    pub node_ids: Vec<NodeId>,
}

impl GraphStore {
    /// Empty graph, produced for degenerate inputs (empty universe, k = 0).
    pub fn empty() -> Self {
        Self {
            node_count: 0,
            edge_count: 0,
            offsets: vec![0],
            neighbors: Vec::new(),
            node_ids: Vec::new(),
        }
    }

    /// Get the neighbors of a node (internal indices, sorted ascending)
    pub fn neighbors(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.neighbors[start..end]
    }

    /// Number of edges incident to a node
    pub fn degree(&self, node: usize) -> usize {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        end - start
    }

    /// External id of an internal index
    pub fn node_id(&self, node: usize) -> NodeId {
        self.node_ids[node]
    }

    /// Graph density: 2|E| / (|V| (|V|-1)), 0 for fewer than two nodes
    pub fn density(&self) -> f64 {
        if self.node_count < 2 {
            return 0.0;
        }
        let n = self.node_count as f64;
        2.0 * self.edge_count as f64 / (n * (n - 1.0))
    }

    /// Check whether two nodes are adjacent (internal indices)
    pub fn has_edge(&self, a: usize, b: u32) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Build the induced subgraph on a set of internal indices.
    ///
    /// `members` must be sorted ascending; the resulting graph keeps the
    /// external ids of the selected nodes, so its index order remains
    /// ascending-NodeId.
    pub fn induced_subgraph(&self, members: &[u32]) -> GraphStore {
        debug_assert!(members.windows(2).all(|w| w[0] < w[1]));

        // Map old internal indices to new ones
        let mut old_to_new = vec![u32::MAX; self.node_count];
        for (new_idx, &old_idx) in members.iter().enumerate() {
            old_to_new[old_idx as usize] = new_idx as u32;
        }

        let mut offsets = Vec::with_capacity(members.len() + 1);
        offsets.push(0);
        let mut neighbors = Vec::new();
        let mut offset = 0u32;

        for &old_idx in members {
            for &target in self.neighbors(old_idx as usize) {
                let mapped = old_to_new[target as usize];
                if mapped != u32::MAX {
                    neighbors.push(mapped);
                    offset += 1;
                }
            }
            offsets.push(offset);
        }

        let node_ids = members
            .iter()
            .map(|&old_idx| self.node_ids[old_idx as usize])
            .collect();

        GraphStore {
            node_count: members.len(),
            edge_count: neighbors.len() / 2,
            offsets,
            neighbors,
            node_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::GraphBuilder;

    fn path_graph() -> super::GraphStore {
        let mut builder = GraphBuilder::new();
        for i in 0..5 {
            builder.add_node(i);
        }
        for i in 0..4 {
            builder.add_edge(i, i + 1);
        }
        builder.build()
    }

    #[test]
    fn degree_counts_incident_edges() {
        let g = path_graph();
        assert_eq!(g.degree(0), 1);
        assert_eq!(g.degree(2), 2);
        assert_eq!(g.degree(4), 1);
    }

    #[test]
    fn density_of_path() {
        let g = path_graph();
        // 4 edges over 5 nodes: 2*4 / (5*4) = 0.4
        assert!((g.density() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn density_degenerate() {
        let g = super::GraphStore::empty();
        assert_eq!(g.density(), 0.0);
    }

    #[test]
    fn has_edge_matches_adjacency() {
        let g = path_graph();
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(1, 0));
        assert!(!g.has_edge(0, 2));
        assert!(!g.has_edge(0, 0));
    }

    #[test]
    fn induced_subgraph_keeps_external_ids() {
        let g = path_graph();
        let sub = g.induced_subgraph(&[1, 2, 3]);
        assert_eq!(sub.node_count, 3);
        assert_eq!(sub.edge_count, 2);
        assert_eq!(sub.node_ids, vec![1, 2, 3]);
        assert_eq!(sub.degree(1), 2);
    }
}
