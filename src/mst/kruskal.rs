use itertools::Itertools;
use tracing::{debug, trace};

use super::{validate, SpanningTree, ValuedEdge};
use crate::{
    num_traits::Weight,
    union_find::{DisjointSet, ElementIndex},
    GraphError,
};

/// Edge-sorting minimum spanning tree.
///
/// Edges are taken in ascending value (ties keep their input order) and kept
/// whenever their endpoints lie in different groups of a disjoint set holding
/// one element per node. O(E log E), dominated by the sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Kruskal;

impl<W: Weight> SpanningTree<W> for Kruskal {
    fn minimum_spanning_tree(
        &self,
        node_count: usize,
        edges: &[ValuedEdge<W>],
    ) -> Result<Vec<ValuedEdge<W>>, GraphError> {
        validate(node_count, edges)?;

        let mut components: DisjointSet<usize> = DisjointSet::with_capacity(node_count);
        components.add(1..=node_count);
        let target = node_count.saturating_sub(1);
        let mut tree = Vec::with_capacity(target);

        for edge in edges
            .iter()
            .sorted_by(|a, b| a.value.weight_cmp(&b.value))
        {
            if tree.len() == target {
                break;
            }
            let a = ElementIndex(edge.from - 1);
            let b = ElementIndex(edge.to - 1);
            if components.same_group(a, b)? {
                continue;
            }
            components.union(a, b)?;
            trace!(from = edge.from, to = edge.to, value = ?edge.value, "kruskal accepted edge");
            tree.push(*edge);
        }

        debug!(
            nodes = node_count,
            edges = edges.len(),
            selected = tree.len(),
            components = components.groups_count(),
            "kruskal finished"
        );
        Ok(tree)
    }
}
