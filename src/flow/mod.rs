//! # Maximum flow
//!
//! The flow engine works on a [`ResidualNetwork`]: an arena of directed edges,
//! each carrying a capacity and a current flow. The reverse direction of an edge
//! is never stored. Its residual capacity is read off the forward edge (it
//! equals the current flow), so cancelling flow is just lowering the flow of the
//! forward edge and conservation stays exact.
//!
//! - [`FlowNetwork`] is the arena used throughout the crate, with caller labels
//!   for nodes.
//! - [`EdmondsKarp`] computes a maximum flow between any number of sources and
//!   sinks, and the matching minimum cut.
//! - [`maximum_flow`] builds the network by exploring a caller-supplied
//!   `edges_of` function and solves it in one go.
//! - [`bipartite`] reduces maximum bipartite matching to a unit-capacity flow.

use bitvec::vec::BitVec;

use crate::{define_indexed_vec, num_traits::Capacity, GraphError};

pub mod bipartite;
mod max_flow;
mod network;

pub use max_flow::{maximum_flow, EdmondsKarp, FlowSolution, MinCut};
pub use network::{FlowNetwork, NetworkEdge};

define_indexed_vec!(
    /// Node of a residual network.
    pub struct NodeId;

    pub struct NodeVec;
);

define_indexed_vec!(
    /// Edge of a residual network.
    pub struct EdgeId;

    pub struct EdgeVec;
);

/// Which way an edge is crossed in the residual network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Along the edge: pushes more flow.
    Forward,
    /// Against the edge: cancels flow already on it.
    Backward,
}

/// A directed edge with a capacity and a current flow.
///
/// Only `capacity`, `flow` and `set_flow` are stored state; the residual
/// capacities and `push` derive from them.
pub trait FlowEdge {
    type Capacity: Capacity;

    /// `(source, target)`.
    fn endpoints(&self) -> (NodeId, NodeId);

    fn capacity(&self) -> Self::Capacity;

    fn flow(&self) -> Self::Capacity;

    fn set_flow(&mut self, flow: Self::Capacity);

    fn source(&self) -> NodeId {
        self.endpoints().0
    }

    fn target(&self) -> NodeId {
        self.endpoints().1
    }

    /// How much more flow the edge accepts. Zero if the flow already exceeds the
    /// capacity.
    fn residual_forward(&self) -> Self::Capacity {
        self.capacity()
            .checked_sub(self.flow())
            .unwrap_or_else(<Self::Capacity as Capacity>::zero)
    }

    /// How much flow can be cancelled.
    fn residual_backward(&self) -> Self::Capacity {
        self.flow()
    }

    fn residual(&self, direction: Direction) -> Self::Capacity {
        match direction {
            Direction::Forward => self.residual_forward(),
            Direction::Backward => self.residual_backward(),
        }
    }

    /// The direction in which the edge leaves `node`, `None` if `node` is not an
    /// endpoint or the edge is a loop.
    fn leaving(&self, node: NodeId) -> Option<Direction> {
        let (source, target) = self.endpoints();
        if source == target {
            None
        } else if source == node {
            Some(Direction::Forward)
        } else if target == node {
            Some(Direction::Backward)
        } else {
            None
        }
    }

    /// The node reached when crossing the edge in `direction`.
    fn head(&self, direction: Direction) -> NodeId {
        match direction {
            Direction::Forward => self.target(),
            Direction::Backward => self.source(),
        }
    }

    /// The node the edge is crossed from in `direction`.
    fn tail(&self, direction: Direction) -> NodeId {
        match direction {
            Direction::Forward => self.source(),
            Direction::Backward => self.target(),
        }
    }

    /// Pushes `amount` units across the edge: forward raises the flow, backward
    /// lowers it. Exceeding the residual capacity is an
    /// [`GraphError::InternalInconsistency`].
    fn push(&mut self, amount: Self::Capacity, direction: Direction) -> Result<(), GraphError> {
        let flow = self.flow();
        let new_flow = match direction {
            Direction::Forward => flow
                .checked_add(amount)
                .filter(|f| *f <= self.capacity()),
            Direction::Backward => flow.checked_sub(amount),
        };
        match new_flow {
            Some(f) => {
                self.set_flow(f);
                Ok(())
            }
            None => Err(GraphError::inconsistent(format!(
                "pushing {amount} {direction:?} over {:?} with flow {flow} and capacity {}",
                self.endpoints(),
                self.capacity()
            ))),
        }
    }
}

/// The structure the flow engine runs on.
pub trait ResidualNetwork {
    type Edge: FlowEdge;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Edges leaving or entering `node`.
    fn incident(&self, node: NodeId) -> &[EdgeId];

    fn edge(&self, id: EdgeId) -> &Self::Edge;

    fn edge_mut(&mut self, id: EdgeId) -> &mut Self::Edge;
}

/// The capacity type of a network.
pub type CapacityOf<R> = <<R as ResidualNetwork>::Edge as FlowEdge>::Capacity;

/// Net flow leaving the set `nodes`: flow on edges leaving the set minus flow on
/// edges entering it. Ids must be in range.
pub(crate) fn net_outflow<R: ResidualNetwork>(
    network: &R,
    nodes: &[NodeId],
) -> Result<CapacityOf<R>, GraphError> {
    let mut inside: BitVec = BitVec::repeat(false, network.node_count());
    for n in nodes {
        inside.set(n.0, true);
    }

    let overflow = || GraphError::inconsistent("flow total overflows");
    let zero = <CapacityOf<R> as Capacity>::zero();
    let (mut out, mut into) = (zero, zero);
    for id in (0..network.edge_count()).map(EdgeId) {
        let edge = network.edge(id);
        let (s, t) = edge.endpoints();
        match (inside[s.0], inside[t.0]) {
            (true, false) => out = out.checked_add(edge.flow()).ok_or_else(overflow)?,
            (false, true) => into = into.checked_add(edge.flow()).ok_or_else(overflow)?,
            _ => {}
        }
    }
    out.checked_sub(into)
        .ok_or_else(|| GraphError::inconsistent("more flow enters the set than leaves it"))
}

#[cfg(test)]
mod test;
