use std::{collections::VecDeque, hash::Hash, ops::ControlFlow};

use ahash::AHashSet;
use tracing::trace;

use super::SearchOutcome;

/// What a breadth-first visitor learns about the node being visited.
#[derive(Debug)]
pub struct BfsStep<'a, N, L> {
    pub node: &'a N,
    /// The node this one was discovered from. `None` for the start node.
    pub parent: Option<&'a N>,
    /// Label of the edge this node was discovered through.
    pub via: Option<&'a L>,
    /// Number of edges between the start node and this node.
    pub depth: usize,
}

/// First-in-first-out search.
///
/// Nodes are marked as visited at the moment they are queued, so each node is
/// queued at most once and nodes are visited in non-decreasing depth.
#[derive(Debug, Clone)]
pub struct Bfs<N> {
    visited: AHashSet<N>,
}

impl<N> Default for Bfs<N> {
    fn default() -> Self {
        Bfs {
            visited: AHashSet::new(),
        }
    }
}

impl<N: Clone + Eq + Hash> Bfs<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every visited node.
    pub fn reset(&mut self) {
        self.visited.clear();
    }

    pub fn is_visited(&self, node: &N) -> bool {
        self.visited.contains(node)
    }

    /// Number of nodes seen (visited or queued) since the last reset.
    pub fn visited(&self) -> usize {
        self.visited.len()
    }

    /// Visits every node reachable from `start`. The visitor receives the node
    /// and its depth.
    pub fn search<I, S, V>(&mut self, start: N, mut neighbors: S, mut visit: V) -> SearchOutcome
    where
        S: FnMut(&N) -> I,
        I: IntoIterator<Item = N>,
        V: FnMut(&N, usize) -> ControlFlow<()>,
    {
        self.search_labeled(
            start,
            |node| neighbors(node).into_iter().map(|next| (next, ())),
            |step| visit(step.node, step.depth),
        )
    }

    /// Like [`Bfs::search`], but `neighbors` yields `(node, label)` pairs and the
    /// visitor is told the parent and the label of the edge each node was
    /// discovered through. Labels let parallel edges between the same pair of
    /// nodes be told apart.
    pub fn search_labeled<L, I, S, V>(
        &mut self,
        start: N,
        mut neighbors: S,
        mut visit: V,
    ) -> SearchOutcome
    where
        S: FnMut(&N) -> I,
        I: IntoIterator<Item = (N, L)>,
        V: FnMut(BfsStep<'_, N, L>) -> ControlFlow<()>,
    {
        if !self.visited.insert(start.clone()) {
            return SearchOutcome::Completed;
        }

        let mut queue: VecDeque<(N, Option<(N, L)>, usize)> = VecDeque::new();
        queue.push_back((start, None, 0));

        while let Some((node, from, depth)) = queue.pop_front() {
            let step = BfsStep {
                node: &node,
                parent: from.as_ref().map(|(p, _)| p),
                via: from.as_ref().map(|(_, l)| l),
                depth,
            };
            if visit(step).is_break() {
                trace!(queued = queue.len(), "breadth-first search stopped");
                return SearchOutcome::Stopped;
            }

            for (next, label) in neighbors(&node) {
                if self.visited.insert(next.clone()) {
                    queue.push_back((next, Some((node.clone(), label)), depth + 1));
                }
            }
        }

        SearchOutcome::Completed
    }
}
