//! Graph construction module

use std::collections::BTreeSet;

use crate::graph::store::{GraphStore, NodeId};

/// Builder for incrementally constructing a GraphStore.
///
/// Accepts raw nodes and edges in any order, drops self-loops and
/// duplicate edges, and produces a simple undirected graph whose
/// internal index order is ascending external NodeId.
pub struct GraphBuilder {
    /// Node universe (ordered, deduplicated)
    nodes: BTreeSet<NodeId>,

    /// Edges normalized to (min, max) pairs (ordered, deduplicated)
    edges: BTreeSet<(NodeId, NodeId)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes: BTreeSet::new(),
            edges: BTreeSet::new(),
        }
    }

    /// Register a node, with or without incident edges
    pub fn add_node(&mut self, id: NodeId) {
        self.nodes.insert(id);
    }

    /// Add an undirected edge. Self-loops and repeats are ignored;
    /// both endpoints are registered as nodes.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        self.nodes.insert(a);
        self.nodes.insert(b);
        let pair = if a < b { (a, b) } else { (b, a) };
        self.edges.insert(pair);
    }

    /// Build the compressed adjacency representation
    pub fn build(self) -> GraphStore {
        let node_ids: Vec<NodeId> = self.nodes.iter().copied().collect();
        let node_count = node_ids.len();

        // External id -> internal index; node_ids is sorted so a binary
        // search is enough, but a direct pass keeps this O(E log V) overall
        let index_of = |id: NodeId| -> u32 {
            node_ids.binary_search(&id).expect("endpoint registered") as u32
        };

        let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); node_count];
        for &(a, b) in &self.edges {
            let ia = index_of(a);
            let ib = index_of(b);
            adjacency[ia as usize].push(ib);
            adjacency[ib as usize].push(ia);
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        let mut neighbors = Vec::with_capacity(self.edges.len() * 2);
        let mut offset = 0u32;

        for list in &mut adjacency {
            list.sort_unstable();
            offset += list.len() as u32;
            offsets.push(offset);
            neighbors.extend_from_slice(list);
        }

        GraphStore {
            node_count,
            edge_count: self.edges.len(),
            offsets,
            neighbors,
            node_ids,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
