use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use bitvec::vec::BitVec;
use tracing::{debug, trace};

use super::{validate, SpanningTree, ValuedEdge};
use crate::{num_traits::Weight, GraphError};

// Defaults for parameters
const START_DEFAULT: usize = 1;
const POLICY_DEFAULT: DisconnectedPolicy = DisconnectedPolicy::SpanningForest;

/// What [`Prim`] does once every node reachable from the current tree is
/// visited but some nodes are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisconnectedPolicy {
    /// Start a new tree from the lowest-numbered unvisited node. The result is a
    /// minimum spanning forest of the whole graph, with the same total value as
    /// [`Kruskal`](super::Kruskal) returns.
    #[default]
    SpanningForest,
    /// Stop. Only the component of the start node is spanned.
    StartComponent,
}

/// Node-priority minimum spanning tree.
///
/// Grows a tree from the start node. A keyed priority queue holds, for every
/// unvisited node touching the tree, the cheapest edge joining it to the tree;
/// the overall cheapest entry is taken next. O(E log E) with the lazy queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prim {
    start: usize,
    policy: DisconnectedPolicy,
}

/// Builder object to configure [`Prim`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimBuilder {
    start: Option<usize>,
    policy: Option<DisconnectedPolicy>,
}

impl Default for Prim {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Prim {
    pub fn builder() -> PrimBuilder {
        PrimBuilder::default()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn policy(&self) -> DisconnectedPolicy {
        self.policy
    }
}

impl PrimBuilder {
    /// Sets the node the first tree grows from. Defaults to node 1. A start node
    /// outside the graph is reported when the algorithm runs.
    pub fn start(mut self, node: usize) -> PrimBuilder {
        self.start = Some(node);
        self
    }

    /// Sets the behaviour on disconnected graphs. Defaults to
    /// [`DisconnectedPolicy::SpanningForest`].
    pub fn disconnected(mut self, policy: DisconnectedPolicy) -> PrimBuilder {
        self.policy = Some(policy);
        self
    }

    pub fn build(self) -> Prim {
        Prim {
            start: self.start.unwrap_or(START_DEFAULT),
            policy: self.policy.unwrap_or(POLICY_DEFAULT),
        }
    }
}

/// A candidate edge in the frontier queue, ordered by value, then by edge
/// position so that extraction is deterministic.
#[derive(Debug, Clone, Copy)]
struct Candidate<W> {
    value: W,
    edge: usize,
    node: usize,
}

impl<W: Weight> Ord for Candidate<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .weight_cmp(&other.value)
            .then(self.edge.cmp(&other.edge))
            .then(self.node.cmp(&other.node))
    }
}

impl<W: Weight> PartialOrd for Candidate<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> PartialEq for Candidate<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Weight> Eq for Candidate<W> {}

/// Min-priority queue keyed by node.
///
/// Each node has at most one live entry, recorded in `keys`. Replacing or
/// removing an entry only updates `keys`; stale heap entries are dropped when
/// they surface.
struct FrontierQueue<W> {
    heap: BinaryHeap<Reverse<Candidate<W>>>,
    keys: Vec<Option<usize>>,
}

impl<W: Weight> FrontierQueue<W> {
    fn new(node_count: usize) -> Self {
        FrontierQueue {
            heap: BinaryHeap::new(),
            keys: vec![None; node_count],
        }
    }

    fn key(&self, node: usize) -> Option<usize> {
        self.keys[node]
    }

    fn insert(&mut self, node: usize, edge: usize, value: W) {
        self.keys[node] = Some(edge);
        self.heap.push(Reverse(Candidate { value, edge, node }));
    }

    fn remove(&mut self, node: usize) {
        self.keys[node] = None;
    }

    fn pop_min(&mut self) -> Option<Candidate<W>> {
        while let Some(Reverse(candidate)) = self.heap.pop() {
            if self.keys[candidate.node] == Some(candidate.edge) {
                self.keys[candidate.node] = None;
                return Some(candidate);
            }
        }
        None
    }
}

/// State of one run. Nodes are zero-based here.
struct Growth<'a, W> {
    edges: &'a [ValuedEdge<W>],
    adjacency: Vec<Vec<usize>>,
    visited: BitVec,
    queue: FrontierQueue<W>,
}

impl<'a, W: Weight> Growth<'a, W> {
    fn new(node_count: usize, edges: &'a [ValuedEdge<W>]) -> Self {
        let mut adjacency = vec![vec![]; node_count];
        for (i, e) in edges.iter().enumerate() {
            adjacency[e.from - 1].push(i);
            if e.to != e.from {
                adjacency[e.to - 1].push(i);
            }
        }
        Growth {
            edges,
            adjacency,
            visited: BitVec::repeat(false, node_count),
            queue: FrontierQueue::new(node_count),
        }
    }

    fn other(&self, edge: usize, node: usize) -> usize {
        self.edges[edge].other(node + 1) - 1
    }

    fn visit(&mut self, node: usize) {
        self.visited.set(node, true);
        self.queue.remove(node);

        for k in 0..self.adjacency[node].len() {
            let neighbor = self.other(self.adjacency[node][k], node);
            if !self.visited[neighbor] {
                self.refresh(neighbor);
            }
        }
    }

    /// Recomputes the frontier entry of the unvisited `node` from the edges whose
    /// other endpoint is visited.
    fn refresh(&mut self, node: usize) {
        let best = self.adjacency[node]
            .iter()
            .copied()
            .filter(|&e| self.visited[self.other(e, node)])
            .min_by(|&a, &b| {
                self.edges[a]
                    .value
                    .weight_cmp(&self.edges[b].value)
                    .then(a.cmp(&b))
            });

        match best {
            Some(edge) if self.queue.key(node) != Some(edge) => {
                self.queue.insert(node, edge, self.edges[edge].value)
            }
            Some(_) => {}
            None => self.queue.remove(node),
        }
    }

    /// Spans the component of `root` and appends the selected edges to `tree`.
    fn grow(&mut self, root: usize, tree: &mut Vec<ValuedEdge<W>>) {
        self.visit(root);
        while let Some(candidate) = self.queue.pop_min() {
            let edge = self.edges[candidate.edge];
            trace!(from = edge.from, to = edge.to, value = ?edge.value, "prim accepted edge");
            tree.push(edge);
            self.visit(candidate.node);
        }
    }
}

impl<W: Weight> SpanningTree<W> for Prim {
    fn minimum_spanning_tree(
        &self,
        node_count: usize,
        edges: &[ValuedEdge<W>],
    ) -> Result<Vec<ValuedEdge<W>>, GraphError> {
        validate(node_count, edges)?;
        if node_count == 0 {
            return Ok(vec![]);
        }
        if self.start == 0 || self.start > node_count {
            return Err(GraphError::out_of_range("start", self.start, node_count));
        }

        let mut growth = Growth::new(node_count, edges);
        let mut tree = Vec::with_capacity(node_count - 1);
        let mut trees = 0;

        let mut root = Some(self.start - 1);
        while let Some(r) = root {
            growth.grow(r, &mut tree);
            trees += 1;
            root = match self.policy {
                DisconnectedPolicy::SpanningForest => growth.visited.first_zero(),
                DisconnectedPolicy::StartComponent => None,
            };
        }

        debug!(
            nodes = node_count,
            edges = edges.len(),
            selected = tree.len(),
            trees,
            "prim finished"
        );
        Ok(tree)
    }
}
