//! # Generic graph traversal
//!
//! Breadth-first ([`Bfs`]) and depth-first ([`Dfs`]) searches over any node type.
//! The graph is never materialised: the caller supplies a function producing the
//! successors of a node, and a visitor that is called for each reached node.
//!
//! Visitors return [`ControlFlow`]. Returning `ControlFlow::Break(())` stops the
//! search at once: no other node is visited afterwards, neither the nodes already
//! waiting in the breadth-first queue nor the unfinished frames of a depth-first
//! search.
//!
//! Each search object owns its visited record. A node seen by one search is
//! skipped by the next one until [`Bfs::reset`] / [`Dfs::reset`] is called, which
//! allows running several searches that together cover a graph (for example to
//! enumerate connected components).

pub use std::ops::ControlFlow;

mod bfs;
mod dfs;

pub use bfs::{Bfs, BfsStep};
pub use dfs::{Dfs, DfsEvent, DfsOrder};

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchOutcome {
    /// Every node reachable from the start (and not seen before) was visited.
    Completed,
    /// The visitor asked to stop.
    Stopped,
}

impl SearchOutcome {
    pub fn is_stopped(&self) -> bool {
        matches!(self, SearchOutcome::Stopped)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SearchOutcome::Completed)
    }
}
