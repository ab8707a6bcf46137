//! # graphkit
//!
//! graphkit is a Rust library of classical graph algorithms built around a few
//! shared structures:
//!
//! - [`union_find`]: a disjoint-set arena with union by depth and path
//!   compression, consumed by [`mst::Kruskal`].
//! - [`traversal`]: breadth-first and depth-first searches over any node type,
//!   driven by a caller-supplied neighbour function and a visitor that can stop
//!   the search early.
//! - [`mst`]: minimum spanning trees (and forests) by edge sorting and by node
//!   priority.
//! - [`flow`]: an Edmonds–Karp maximum-flow engine over a residual network with
//!   any number of sources and sinks, and a bipartite matching reduction on top
//!   of it.
//!
//! Everything runs synchronously on the calling thread and operates purely in
//! memory on caller-supplied graph descriptions.

pub mod error;
pub mod flow;
pub mod mst;
pub mod num_traits;
pub mod traversal;
pub mod typed_vec;
pub mod union_find;

pub use error::GraphError;
