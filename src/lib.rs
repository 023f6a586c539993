//! Core library for the social-graph analyzer

pub mod centrality;
pub mod community;
pub mod config;
pub mod data;
pub mod graph;
pub mod rank;
pub mod storage;

pub use anyhow::{anyhow, Result};
