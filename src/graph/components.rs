//! Connected-component analysis

use crate::graph::store::GraphStore;

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set (for union by size)
    size: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(count: usize) -> Self {
        let mut parent = Vec::with_capacity(count);
        let mut size = Vec::with_capacity(count);

        // Initialize each node as its own set
        for i in 0..count {
            parent.push(i as u32);
            size.push(1);
        }

        Self { parent, size }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let px = self.parent[x as usize];
        if px != x {
            // Path compression: set parent to root
            self.parent[x as usize] = self.find(px);
        }
        self.parent[x as usize]
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return; // Already in the same set
        }

        // Union by size: attach smaller tree under root of larger tree
        if self.size[root_x as usize] >= self.size[root_y as usize] {
            self.parent[root_y as usize] = root_x;
            self.size[root_x as usize] += self.size[root_y as usize];
        } else {
            self.parent[root_x as usize] = root_y;
            self.size[root_y as usize] += self.size[root_x as usize];
        }
    }
}

/// Find the connected components of a graph.
///
/// Returns each component as a sorted list of internal indices; the
/// components themselves are ordered by their smallest member, so the
/// result is fully deterministic.
pub fn connected_components(graph: &GraphStore) -> Vec<Vec<u32>> {
    let mut sets = DisjointSets::new(graph.node_count);

    for node in 0..graph.node_count {
        for &target in graph.neighbors(node) {
            sets.union(node as u32, target);
        }
    }

    // Group nodes by root; nodes are visited ascending, so each member
    // list comes out sorted and components are keyed by smallest member
    let mut component_of_root = vec![u32::MAX; graph.node_count];
    let mut components: Vec<Vec<u32>> = Vec::new();

    for node in 0..graph.node_count as u32 {
        let root = sets.find(node) as usize;
        if component_of_root[root] == u32::MAX {
            component_of_root[root] = components.len() as u32;
            components.push(Vec::new());
        }
        components[component_of_root[root] as usize].push(node);
    }

    components
}

/// Extract the induced subgraph on the largest connected component.
///
/// Ties on size are broken toward the component containing the smallest
/// external NodeId, so repeated runs always select the same component.
pub fn giant_component(graph: &GraphStore) -> GraphStore {
    if graph.node_count == 0 {
        return GraphStore::empty();
    }

    let components = connected_components(graph);

    let mut best = 0;
    for (idx, members) in components.iter().enumerate().skip(1) {
        let best_len = components[best].len();
        if members.len() > best_len {
            best = idx;
            continue;
        }
        if members.len() == best_len {
            // Member lists are sorted; first entry carries the smallest id
            let candidate_min = graph.node_id(members[0] as usize);
            let best_min = graph.node_id(components[best][0] as usize);
            if candidate_min < best_min {
                best = idx;
            }
        }
    }

    graph.induced_subgraph(&components[best])
}

#[cfg(test)]
mod tests {
    use super::{connected_components, giant_component};
    use crate::graph::GraphBuilder;

    #[test]
    fn splits_disconnected_graph() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(0, 1);
        builder.add_edge(1, 2);
        builder.add_edge(10, 11);
        let g = builder.build();

        let components = connected_components(&g);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].len(), 3);
        assert_eq!(components[1].len(), 2);
    }

    #[test]
    fn components_cover_all_nodes() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(0, 1);
        builder.add_node(7);
        let g = builder.build();

        let components = connected_components(&g);
        let total: usize = components.iter().map(Vec::len).sum();
        assert_eq!(total, g.node_count);
    }

    #[test]
    fn giant_component_picks_largest() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(0, 1);
        builder.add_edge(1, 2);
        builder.add_edge(10, 11);
        let g = builder.build();

        let giant = giant_component(&g);
        assert_eq!(giant.node_count, 3);
        assert_eq!(giant.node_ids, vec![0, 1, 2]);
    }

    #[test]
    fn giant_component_tie_breaks_on_smallest_id() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(20, 21);
        builder.add_edge(3, 4);
        let g = builder.build();

        let giant = giant_component(&g);
        assert_eq!(giant.node_ids, vec![3, 4]);
    }
}
