use std::{hash::Hash, ops::ControlFlow};

use ahash::AHashSet;
use tracing::trace;

use super::SearchOutcome;

/// When a depth-first visitor is notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DfsOrder {
    /// When a node is first encountered.
    #[default]
    Preorder,
    /// When all descendants of a node are finished.
    Postorder,
    /// Both.
    Both,
}

impl DfsOrder {
    fn on_discover(self) -> bool {
        matches!(self, DfsOrder::Preorder | DfsOrder::Both)
    }

    fn on_finish(self) -> bool {
        matches!(self, DfsOrder::Postorder | DfsOrder::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DfsEvent {
    Discover,
    Finish,
}

/// Last-in-first-out search.
///
/// Every frame on the stack keeps its neighbour iterator until it is exhausted,
/// so all children of a node are explored (and finished) before any sibling of
/// that node is discovered.
#[derive(Debug, Clone)]
pub struct Dfs<N> {
    order: DfsOrder,
    visited: AHashSet<N>,
}

impl<N> Default for Dfs<N> {
    fn default() -> Self {
        Dfs {
            order: DfsOrder::default(),
            visited: AHashSet::new(),
        }
    }
}

impl<N: Clone + Eq + Hash> Dfs<N> {
    pub fn new(order: DfsOrder) -> Self {
        Dfs {
            order,
            visited: AHashSet::new(),
        }
    }

    pub fn order(&self) -> DfsOrder {
        self.order
    }

    pub fn reset(&mut self) {
        self.visited.clear();
    }

    pub fn is_visited(&self, node: &N) -> bool {
        self.visited.contains(node)
    }

    pub fn visited(&self) -> usize {
        self.visited.len()
    }

    /// Explores everything reachable from `start`. The visitor receives the node,
    /// the event that triggered the call and the depth of the node in the search
    /// tree.
    pub fn search<I, S, V>(&mut self, start: N, mut neighbors: S, mut visit: V) -> SearchOutcome
    where
        S: FnMut(&N) -> I,
        I: IntoIterator<Item = N>,
        V: FnMut(&N, DfsEvent, usize) -> ControlFlow<()>,
    {
        if !self.visited.insert(start.clone()) {
            return SearchOutcome::Completed;
        }

        let discover = self.order.on_discover();
        let finish = self.order.on_finish();

        if discover && visit(&start, DfsEvent::Discover, 0).is_break() {
            return SearchOutcome::Stopped;
        }

        let pending = neighbors(&start).into_iter();
        let mut stack: Vec<(N, I::IntoIter)> = vec![(start, pending)];

        while let Some((_, pending)) = stack.last_mut() {
            if let Some(next) = pending.next() {
                if !self.visited.insert(next.clone()) {
                    continue;
                }
                let depth = stack.len();
                if discover && visit(&next, DfsEvent::Discover, depth).is_break() {
                    trace!(depth, "depth-first search stopped");
                    return SearchOutcome::Stopped;
                }
                let children = neighbors(&next).into_iter();
                stack.push((next, children));
                continue;
            }

            if let Some((node, _)) = stack.pop() {
                if finish && visit(&node, DfsEvent::Finish, stack.len()).is_break() {
                    trace!(depth = stack.len(), "depth-first search stopped");
                    return SearchOutcome::Stopped;
                }
            }
        }

        SearchOutcome::Completed
    }
}
