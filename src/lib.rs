//! Rayonlarimiz puzzle library.
//!
//! Exposes region geometry, the adjacency graph and its traversals, daily
//! puzzle selection, data loading and the line protocol for use by
//! integration tests and the binary entry points.

pub mod cli;
pub mod data;
pub mod game;
pub mod geometry;
pub mod graph;
pub mod protocol;
pub mod puzzle;
pub mod session;
