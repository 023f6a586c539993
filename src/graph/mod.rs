//! Graph representation and structural queries

pub mod builder;
pub mod components;
pub mod store;

pub use builder::GraphBuilder;
pub use store::{GraphStore, NodeId};
