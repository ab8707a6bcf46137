use std::hash::Hash;

use ahash::RandomState;
use indexmap::IndexSet;

use super::{net_outflow, EdgeId, EdgeVec, FlowEdge, NodeId, NodeVec, ResidualNetwork};
use crate::{num_traits::Capacity, GraphError};

/// A directed edge of a [`FlowNetwork`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkEdge<C> {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: C,
    pub flow: C,
}

impl<C: Capacity> FlowEdge for NetworkEdge<C> {
    type Capacity = C;

    fn endpoints(&self) -> (NodeId, NodeId) {
        (self.from, self.to)
    }

    fn capacity(&self) -> C {
        self.capacity
    }

    fn flow(&self) -> C {
        self.flow
    }

    fn set_flow(&mut self, flow: C) {
        self.flow = flow;
    }
}

/// Residual network over caller-labelled nodes.
///
/// Labels are interned: adding a label twice returns the same [`NodeId`]. Parallel
/// edges are kept as distinct edges.
#[derive(Debug, Clone)]
pub struct FlowNetwork<N, C> {
    labels: IndexSet<N, RandomState>,
    incident: NodeVec<Vec<EdgeId>>,
    edges: EdgeVec<NetworkEdge<C>>,
}

impl<N, C> Default for FlowNetwork<N, C> {
    fn default() -> Self {
        FlowNetwork {
            labels: IndexSet::default(),
            incident: NodeVec::new(),
            edges: EdgeVec::new(),
        }
    }
}

impl<N: Eq + Hash, C: Capacity> FlowNetwork<N, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node labelled `label`, creating it if needed.
    pub fn add_node(&mut self, label: N) -> NodeId {
        let (index, inserted) = self.labels.insert_full(label);
        if inserted {
            self.incident.push(vec![]);
        }
        NodeId(index)
    }

    /// Adds an edge `from -> to` with zero flow, creating missing nodes.
    pub fn add_edge(&mut self, from: N, to: N, capacity: C) -> EdgeId {
        let from = self.add_node(from);
        let to = self.add_node(to);
        let id = self.edges.push(NetworkEdge {
            from,
            to,
            capacity,
            flow: C::zero(),
        });
        self.incident[from].push(id);
        if to != from {
            self.incident[to].push(id);
        }
        id
    }

    pub fn node_id(&self, label: &N) -> Option<NodeId> {
        self.labels.get_index_of(label).map(NodeId)
    }

    pub fn label(&self, node: NodeId) -> Option<&N> {
        self.labels.get_index(node.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &N)> {
        self.labels.iter().enumerate().map(|(i, l)| (NodeId(i), l))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &NetworkEdge<C>)> {
        self.edges.iter()
    }

    /// Resolves a list of labels, failing on the first unknown one.
    pub fn node_ids(&self, arg: &'static str, labels: &[N]) -> Result<Vec<NodeId>, GraphError> {
        labels
            .iter()
            .map(|l| {
                self.node_id(l).ok_or_else(|| {
                    GraphError::invalid(arg, "label is not a node of the network")
                })
            })
            .collect()
    }

    fn check(&self, node: NodeId) -> Result<(), GraphError> {
        if self.incident.contains_index(node) {
            Ok(())
        } else {
            Err(GraphError::out_of_range("node", node.0, self.incident.len()))
        }
    }

    pub(super) fn sum_flow(
        &self,
        mut edges: impl Iterator<Item = EdgeId>,
    ) -> Result<C, GraphError> {
        edges.try_fold(C::zero(), |acc, e| {
            acc.checked_add(self.edges[e].flow)
                .ok_or_else(|| GraphError::inconsistent("flow total overflows"))
        })
    }

    /// Total flow on the edges leaving `node`.
    pub fn outflow(&self, node: NodeId) -> Result<C, GraphError> {
        self.check(node)?;
        self.sum_flow(
            self.incident[node]
                .iter()
                .copied()
                .filter(|&e| self.edges[e].from == node && self.edges[e].to != node),
        )
    }

    /// Total flow on the edges entering `node`.
    pub fn inflow(&self, node: NodeId) -> Result<C, GraphError> {
        self.check(node)?;
        self.sum_flow(
            self.incident[node]
                .iter()
                .copied()
                .filter(|&e| self.edges[e].to == node && self.edges[e].from != node),
        )
    }

    /// Net flow leaving the set `nodes`. Zero for every set of inner nodes when
    /// flow is conserved.
    pub fn net_outflow(&self, nodes: &[NodeId]) -> Result<C, GraphError> {
        for &node in nodes {
            self.check(node)?;
        }
        net_outflow(self, nodes)
    }

    /// Sets the flow of every edge back to zero.
    pub fn reset_flow(&mut self) {
        for (_, edge) in self.edges.iter_mut() {
            edge.flow = C::zero();
        }
    }
}

impl<N, C: Capacity> ResidualNetwork for FlowNetwork<N, C> {
    type Edge = NetworkEdge<C>;

    fn node_count(&self) -> usize {
        self.incident.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn incident(&self, node: NodeId) -> &[EdgeId] {
        &self.incident[node]
    }

    fn edge(&self, id: EdgeId) -> &NetworkEdge<C> {
        &self.edges[id]
    }

    fn edge_mut(&mut self, id: EdgeId) -> &mut NetworkEdge<C> {
        &mut self.edges[id]
    }
}
