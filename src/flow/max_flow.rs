use std::{hash::Hash, ops::ControlFlow};

use bitvec::vec::BitVec;
use itertools::Either;
use tracing::{debug, trace};

use super::{
    net_outflow, CapacityOf, Direction, EdgeId, FlowEdge, FlowNetwork, NodeId, NodeVec,
    ResidualNetwork,
};
use crate::{num_traits::Capacity, traversal::Bfs, GraphError};

/// Node of the search graph: the network's nodes plus one virtual super-source
/// whose neighbours are all the sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Vertex {
    Super,
    Node(NodeId),
}

/// How a vertex was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arc {
    /// From the super-source, with unbounded capacity.
    Start,
    Edge(EdgeId, Direction),
}

/// Residual arcs leaving `vertex`: an arc is usable if it still has capacity in
/// its direction.
fn residual_arcs<'a, R: ResidualNetwork>(
    network: &'a R,
    sources: &'a [NodeId],
    vertex: &Vertex,
) -> impl Iterator<Item = (Vertex, Arc)> + 'a {
    match *vertex {
        Vertex::Super => Either::Left(sources.iter().map(|&s| (Vertex::Node(s), Arc::Start))),
        Vertex::Node(node) => Either::Right(network.incident(node).iter().filter_map(move |&id| {
            let edge = network.edge(id);
            let direction = edge.leaving(node)?;
            if edge.residual(direction).is_zero() {
                None
            } else {
                Some((Vertex::Node(edge.head(direction)), Arc::Edge(id, direction)))
            }
        })),
    }
}

/// Edmonds–Karp maximum flow.
///
/// Augments along shortest residual paths, found by breadth-first search from a
/// virtual super-source attached to every source, until no sink can be reached.
/// At that point the flow is maximum (max-flow/min-cut duality). O(V E²).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdmondsKarp;

/// A minimum cut, as found after a maximum flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinCut {
    /// Nodes still reachable from the sources in the residual network.
    pub source_side: Vec<NodeId>,
    /// Edges from the source side to the rest; all of them are saturated.
    pub edges: Vec<EdgeId>,
}

impl EdmondsKarp {
    fn validate<R: ResidualNetwork>(
        network: &R,
        sources: &[NodeId],
        sinks: &[NodeId],
    ) -> Result<(), GraphError> {
        if sources.is_empty() {
            return Err(GraphError::invalid("sources", "no source node given"));
        }
        if sinks.is_empty() {
            return Err(GraphError::invalid("sinks", "no sink node given"));
        }
        let n = network.node_count();
        for (arg, nodes) in [("sources", sources), ("sinks", sinks)] {
            if let Some(bad) = nodes.iter().find(|id| id.0 >= n) {
                return Err(GraphError::out_of_range(arg, bad.0, n));
            }
        }
        shared_endpoint(sources, sinks)
    }

    /// Finds the shortest residual path from any source to any sink, as the list
    /// of arcs walked from the sink back to a source.
    fn augmenting_path<R: ResidualNetwork>(
        bfs: &mut Bfs<Vertex>,
        network: &R,
        sources: &[NodeId],
        is_sink: &BitVec,
    ) -> Result<Option<Vec<(EdgeId, Direction)>>, GraphError> {
        let mut reached_by: NodeVec<Option<Arc>> = NodeVec::filled(None, network.node_count());
        let mut reached = None;

        bfs.reset();
        let outcome = bfs.search_labeled(
            Vertex::Super,
            |v| residual_arcs(network, sources, v),
            |step| {
                if let (Vertex::Node(node), Some(&arc)) = (*step.node, step.via) {
                    reached_by[node] = Some(arc);
                    if is_sink[node.0] {
                        reached = Some(node);
                        return ControlFlow::Break(());
                    }
                }
                ControlFlow::Continue(())
            },
        );

        let Some(sink) = reached else {
            return Ok(None);
        };
        debug_assert!(outcome.is_stopped());

        let mut path = vec![];
        let mut node = sink;
        loop {
            match reached_by[node] {
                Some(Arc::Start) => break,
                Some(Arc::Edge(id, direction)) => {
                    path.push((id, direction));
                    node = network.edge(id).tail(direction);
                }
                None => {
                    return Err(GraphError::inconsistent(format!(
                        "node {node} is on the augmenting path but was never reached"
                    )))
                }
            }
            if path.len() > network.edge_count() {
                return Err(GraphError::inconsistent("augmenting path contains a cycle"));
            }
        }
        Ok(Some(path))
    }

    /// Raises the flow of `network` to a maximum flow from `sources` to `sinks`
    /// and returns its value.
    ///
    /// The network may already carry a valid flow; augmentation continues from
    /// it. Fails with [`GraphError::InvalidArgument`] when either list is empty or
    /// they share a node, and with [`GraphError::OutOfRange`] on unknown nodes.
    pub fn max_flow<R: ResidualNetwork>(
        &self,
        network: &mut R,
        sources: &[NodeId],
        sinks: &[NodeId],
    ) -> Result<CapacityOf<R>, GraphError> {
        Self::validate(network, sources, sinks)?;

        let mut is_sink: BitVec = BitVec::repeat(false, network.node_count());
        for t in sinks {
            is_sink.set(t.0, true);
        }

        let mut value = net_outflow(network, sources)?;
        let mut bfs = Bfs::new();
        let mut rounds = 0usize;

        while let Some(path) = Self::augmenting_path(&mut bfs, network, sources, &is_sink)? {
            let bottleneck = path
                .iter()
                .map(|&(id, direction)| network.edge(id).residual(direction))
                .min()
                .ok_or_else(|| GraphError::inconsistent("empty augmenting path"))?;
            if bottleneck.is_zero() {
                return Err(GraphError::inconsistent("augmenting path without capacity"));
            }

            for &(id, direction) in &path {
                network.edge_mut(id).push(bottleneck, direction)?;
            }
            value = value
                .checked_add(bottleneck)
                .ok_or_else(|| GraphError::inconsistent("flow value overflows"))?;
            rounds += 1;
            trace!(round = rounds, %bottleneck, length = path.len(), "augmented");
        }

        debug!(
            nodes = network.node_count(),
            edges = network.edge_count(),
            sources = sources.len(),
            sinks = sinks.len(),
            augmentations = rounds,
            %value,
            "maximum flow found"
        );
        Ok(value)
    }

    /// The minimum cut matching the current flow of `network`, which should be
    /// maximum (see [`EdmondsKarp::max_flow`]). The capacities of the cut edges
    /// then add up to the flow value.
    pub fn min_cut<R: ResidualNetwork>(
        &self,
        network: &R,
        sources: &[NodeId],
    ) -> Result<MinCut, GraphError> {
        if sources.is_empty() {
            return Err(GraphError::invalid("sources", "no source node given"));
        }
        let n = network.node_count();
        if let Some(bad) = sources.iter().find(|id| id.0 >= n) {
            return Err(GraphError::out_of_range("sources", bad.0, n));
        }

        let mut side: BitVec = BitVec::repeat(false, n);
        let mut bfs = Bfs::new();
        bfs.search(
            Vertex::Super,
            |v| residual_arcs(network, sources, v).map(|(next, _)| next),
            |v, _| {
                if let Vertex::Node(node) = *v {
                    side.set(node.0, true);
                }
                ControlFlow::Continue(())
            },
        );

        let edges = (0..network.edge_count())
            .map(EdgeId)
            .filter(|&id| {
                let (s, t) = network.edge(id).endpoints();
                side[s.0] && !side[t.0]
            })
            .collect();

        Ok(MinCut {
            source_side: side.iter_ones().map(NodeId).collect(),
            edges,
        })
    }
}

/// Fails if a node is listed both as a source and as a sink, naming the
/// positions of both occurrences.
fn shared_endpoint<N: PartialEq>(sources: &[N], sinks: &[N]) -> Result<(), GraphError> {
    for (t, sink) in sinks.iter().enumerate() {
        if let Some(s) = sources.iter().position(|source| source == sink) {
            return Err(GraphError::invalid("sinks", format!("sink {t} is also source {s}")));
        }
    }
    Ok(())
}

/// A solved network returned by [`maximum_flow`].
#[derive(Debug, Clone)]
pub struct FlowSolution<N, C> {
    pub value: C,
    pub network: FlowNetwork<N, C>,
}

impl<N: Eq + Hash, C: Capacity> FlowSolution<N, C> {
    /// Total flow on the edges from `from` to `to`, zero if either label is not a
    /// node of the network.
    pub fn flow_between(&self, from: &N, to: &N) -> Result<C, GraphError> {
        let (Some(from), Some(to)) = (self.network.node_id(from), self.network.node_id(to)) else {
            return Ok(C::zero());
        };
        self.network.sum_flow(
            self.network
                .edges()
                .filter(|(_, e)| e.from == from && e.to == to)
                .map(|(id, _)| id),
        )
    }
}

/// Maximum flow from `sources` to `sinks` over the network described by
/// `edges_of`, which lists the `(target, capacity)` pairs of the edges leaving a
/// node.
///
/// Only the part of the network reachable from the sources is explored, each
/// node's edges being requested exactly once.
pub fn maximum_flow<N, C, I, F>(
    sources: &[N],
    sinks: &[N],
    mut edges_of: F,
) -> Result<FlowSolution<N, C>, GraphError>
where
    N: Clone + Eq + Hash,
    C: Capacity,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = (N, C)>,
{
    if sources.is_empty() {
        return Err(GraphError::invalid("sources", "no source node given"));
    }
    if sinks.is_empty() {
        return Err(GraphError::invalid("sinks", "no sink node given"));
    }
    shared_endpoint(sources, sinks)?;

    let mut arcs: Vec<(N, N, C)> = vec![];
    let mut bfs = Bfs::new();
    for source in sources {
        bfs.search(
            source.clone(),
            |node: &N| {
                let out: Vec<(N, C)> = edges_of(node).into_iter().collect();
                arcs.extend(out.iter().map(|(t, c)| (node.clone(), t.clone(), *c)));
                out.into_iter().map(|(t, _)| t)
            },
            |_, _| ControlFlow::Continue(()),
        );
    }

    let mut network = FlowNetwork::new();
    for label in sources.iter().chain(sinks) {
        network.add_node(label.clone());
    }
    for (from, to, capacity) in arcs {
        network.add_edge(from, to, capacity);
    }

    let source_ids = network.node_ids("sources", sources)?;
    let sink_ids = network.node_ids("sinks", sinks)?;
    let value = EdmondsKarp.max_flow(&mut network, &source_ids, &sink_ids)?;

    Ok(FlowSolution { value, network })
}
