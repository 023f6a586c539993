//! Data ingestion and sampling module

pub mod edges;
pub mod sampling;

pub use edges::EdgeData;
