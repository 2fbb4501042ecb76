//! Region adjacency graph and traversal.
//!
//! The graph is derived once from region geometry and never mutated
//! afterwards. Traversal works on dense `NodeId` indices; string ids are
//! resolved at the boundary.

pub mod adjacency;
pub mod builder;
pub mod traversal;

pub use adjacency::{AdjacencyGraph, NodeId};
pub use builder::build_adjacency;
pub use traversal::{
    components, distances_from, mainland, shortest_path, shortest_path_between,
};

/// Errors raised while building or querying the adjacency graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("no regions to build a graph from")]
    Empty,

    #[error("duplicate region id '{0}'")]
    DuplicateRegion(String),

    #[error("region '{0}' not found")]
    UnknownRegion(String),
}
