//! # Minimum spanning trees
//!
//! Two independent algorithms computing a minimum spanning tree of an undirected
//! graph with valued edges:
//!
//! - [`Kruskal`] sorts the edges and joins components through a
//!   [`DisjointSet`](crate::union_find::DisjointSet).
//! - [`Prim`] grows a tree from a start node, always taking the cheapest edge
//!   leaving the visited set, through a keyed priority queue.
//!
//! Nodes are numbered `1..=node_count`; an edge only stores the numbers of its
//! endpoints. On a disconnected graph both algorithms return a minimum spanning
//! forest by default, so callers that need a single tree check the result with
//! [`is_spanning_tree`].

use std::fmt::{self, Display};

use crate::{num_traits::Weight, GraphError};

mod kruskal;
mod prim;

pub use kruskal::Kruskal;
pub use prim::{DisconnectedPolicy, Prim, PrimBuilder};

/// An undirected edge between the nodes numbered `from` and `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuedEdge<W> {
    pub from: usize,
    pub to: usize,
    pub value: W,
}

impl<W> ValuedEdge<W> {
    pub fn new(from: usize, to: usize, value: W) -> Self {
        ValuedEdge { from, to, value }
    }

    /// The endpoint that is not `node`.
    pub fn other(&self, node: usize) -> usize {
        if self.from == node {
            self.to
        } else {
            self.from
        }
    }
}

impl<W: Display> Display for ValuedEdge<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}:{}", self.from, self.to, self.value)
    }
}

pub trait SpanningTree<W: Weight> {
    /// Selects the edges of a minimum spanning tree (or forest) of the graph with
    /// nodes `1..=node_count`.
    ///
    /// Fails with [`GraphError::OutOfRange`] if an endpoint is not a node and with
    /// [`GraphError::InvalidArgument`] if a value has no place in a total order.
    fn minimum_spanning_tree(
        &self,
        node_count: usize,
        edges: &[ValuedEdge<W>],
    ) -> Result<Vec<ValuedEdge<W>>, GraphError>;
}

pub(crate) fn validate<W: Weight>(
    node_count: usize,
    edges: &[ValuedEdge<W>],
) -> Result<(), GraphError> {
    for (i, edge) in edges.iter().enumerate() {
        for endpoint in [edge.from, edge.to] {
            if endpoint == 0 || endpoint > node_count {
                return Err(GraphError::out_of_range("edges", endpoint, node_count));
            }
        }
        if !edge.value.is_comparable() {
            return Err(GraphError::invalid(
                "edges",
                format!("edge {i} has the incomparable value {:?}", edge.value),
            ));
        }
    }
    Ok(())
}

/// Sum of the values of `edges`. Fails with
/// [`GraphError::InternalInconsistency`] if the sum overflows `W`.
pub fn total_value<W: Weight>(edges: &[ValuedEdge<W>]) -> Result<W, GraphError> {
    edges.iter().try_fold(W::zero(), |acc, e| {
        acc.checked_add(e.value).ok_or_else(|| {
            GraphError::inconsistent(format!("total value overflows after adding {e:?}"))
        })
    })
}

/// Whether a result of [`SpanningTree::minimum_spanning_tree`] reaches every one
/// of the `node_count` nodes.
pub fn is_spanning_tree<W>(node_count: usize, tree: &[ValuedEdge<W>]) -> bool {
    tree.len() == node_count.saturating_sub(1)
}
