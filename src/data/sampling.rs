//! Deterministic node sampling
//!
//! Results must be bit-reproducible across platforms for a given seed,
//! so the generator is pinned rather than taken from a library default:
//! xorshift64* (Vigna 2016) seeded through one SplitMix64 scramble.

use crate::data::EdgeData;
use crate::graph::{GraphBuilder, GraphStore, NodeId};

/// Pinned pseudo-random generator: xorshift64* with SplitMix64 seeding.
pub struct SampleRng {
    state: u64,
}

impl SampleRng {
    pub fn new(seed: u64) -> Self {
        // SplitMix64 scramble spreads low-entropy seeds (0, 42, ...)
        // across the whole state space; the xorshift state must be nonzero
        let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        Self {
            state: if z == 0 { 0x9E37_79B9_7F4A_7C15 } else { z },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform draw in `0..bound` via rejection sampling (no modulo bias)
    pub fn next_below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let x = self.next_u64();
            if x >= threshold {
                return x % bound;
            }
        }
    }
}

/// Draw a reproducible node sample and build the induced graph.
///
/// The universe is visited in ascending NodeId order and shuffled with a
/// partial Fisher-Yates keyed by `seed`, so identical (universe, edges,
/// sample_size, seed) always yields the identical graph. Degenerate
/// inputs produce an empty graph, never an error.
pub fn sample_graph(data: &EdgeData, sample_size: usize, seed: u64) -> GraphStore {
    let mut universe: Vec<NodeId> = data.nodes.iter().copied().collect();
    let k = sample_size.min(universe.len());

    if k == 0 {
        return GraphStore::empty();
    }

    log::info!(
        "Sampling {} of {} nodes (seed {})",
        k,
        universe.len(),
        seed
    );

    // Partial Fisher-Yates: only the first k positions need settling
    let mut rng = SampleRng::new(seed);
    let n = universe.len();
    for i in 0..k {
        let j = i + rng.next_below((n - i) as u64) as usize;
        universe.swap(i, j);
    }

    let mut builder = GraphBuilder::new();
    for &node in &universe[..k] {
        builder.add_node(node);
    }

    // Induced edge set: both endpoints must be sampled
    let mut selected = universe[..k].to_vec();
    selected.sort_unstable();
    let in_sample = |id: NodeId| selected.binary_search(&id).is_ok();

    let mut kept = 0usize;
    for &(a, b) in &data.edges {
        if in_sample(a) && in_sample(b) {
            builder.add_edge(a, b);
            kept += 1;
        }
    }

    log::info!("Induced edge set: {} of {} edges retained", kept, data.edges.len());

    builder.build()
}
