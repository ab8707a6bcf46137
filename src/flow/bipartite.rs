//! Maximum bipartite matching as a unit-capacity flow.
//!
//! A virtual source feeds every left node, every adjacent left/right pair is
//! joined left to right, and every right node drains into a virtual sink, all
//! with capacity one. A maximum flow then saturates exactly the left/right edges
//! of a maximum matching.

use tracing::debug;

use super::{EdmondsKarp, FlowNetwork, ResidualNetwork};
use crate::GraphError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Side {
    Source,
    Sink,
    Left(usize),
    Right(usize),
}

/// One left node and the right node it is matched with, if any.
#[derive(Debug, PartialEq, Eq)]
pub struct Match<'a, L, R> {
    pub left: &'a L,
    pub right: Option<&'a R>,
}

impl<L, R> Clone for Match<'_, L, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L, R> Copy for Match<'_, L, R> {}

/// A maximum matching, with one [`Match`] per left node in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching<'a, L, R> {
    matches: Vec<Match<'a, L, R>>,
    right_of: Vec<Option<usize>>,
}

impl<'a, L, R> Matching<'a, L, R> {
    pub fn matches(&self) -> &[Match<'a, L, R>] {
        &self.matches
    }

    /// Number of matched pairs.
    pub fn cardinality(&self) -> usize {
        self.right_of.iter().flatten().count()
    }

    /// Position in `right` of the partner of the `i`-th left node.
    pub fn right_index(&self, i: usize) -> Option<usize> {
        self.right_of.get(i).copied().flatten()
    }

    /// The matched pairs only.
    pub fn pairs(&self) -> impl Iterator<Item = (&'a L, &'a R)> + '_ {
        self.matches
            .iter()
            .filter_map(|m| m.right.map(|r| (m.left, r)))
    }
}

/// Solves the reduced network for `left_count` left and `right_count` right
/// nodes and returns the partner index of each left node.
fn match_indices(
    left_count: usize,
    right_count: usize,
    pairs: impl IntoIterator<Item = (usize, usize)>,
) -> Result<Vec<Option<usize>>, GraphError> {
    let mut network: FlowNetwork<Side, u32> = FlowNetwork::new();
    let source = network.add_node(Side::Source);
    let sink = network.add_node(Side::Sink);

    for i in 0..left_count {
        network.add_edge(Side::Source, Side::Left(i), 1);
    }
    for (i, j) in pairs {
        network.add_edge(Side::Left(i), Side::Right(j), 1);
    }
    for j in 0..right_count {
        network.add_edge(Side::Right(j), Side::Sink, 1);
    }

    let value = EdmondsKarp.max_flow(&mut network, &[source], &[sink])?;

    let mut right_of = vec![None; left_count];
    for (_, edge) in network.edges().filter(|(_, e)| e.flow == 1) {
        if let (Some(&Side::Left(i)), Some(&Side::Right(j))) =
            (network.label(edge.from), network.label(edge.to))
        {
            if right_of[i].replace(j).is_some() {
                return Err(GraphError::inconsistent(format!(
                    "left node {i} carries more than one unit of flow"
                )));
            }
        }
    }

    let cardinality = right_of.iter().flatten().count();
    if cardinality as u64 != u64::from(value) {
        return Err(GraphError::inconsistent(format!(
            "matching of size {cardinality} read back from a flow of {value}"
        )));
    }

    debug!(
        left = left_count,
        right = right_count,
        edges = network.edge_count(),
        cardinality,
        "maximum matching found"
    );
    Ok(right_of)
}

fn collect<'a, L, R>(
    left: &'a [L],
    right: &'a [R],
    right_of: Vec<Option<usize>>,
) -> Matching<'a, L, R> {
    let matches = left
        .iter()
        .zip(&right_of)
        .map(|(l, j)| Match {
            left: l,
            right: j.map(|j| &right[j]),
        })
        .collect();
    Matching { matches, right_of }
}

/// Maximum matching between `left` and `right`, where `adjacent` tells whether a
/// pair may be matched.
pub fn maximum_matching<'a, L, R, F>(
    left: &'a [L],
    right: &'a [R],
    mut adjacent: F,
) -> Result<Matching<'a, L, R>, GraphError>
where
    F: FnMut(&L, &R) -> bool,
{
    let mut pairs = vec![];
    for (i, l) in left.iter().enumerate() {
        for (j, r) in right.iter().enumerate() {
            if adjacent(l, r) {
                pairs.push((i, j));
            }
        }
    }
    let right_of = match_indices(left.len(), right.len(), pairs)?;
    Ok(collect(left, right, right_of))
}

/// Maximum matching from an adjacency matrix with one row per left node and one
/// column per right node.
pub fn matching_from_rows<'a, L, R, T>(
    left: &'a [L],
    right: &'a [R],
    rows: &[T],
) -> Result<Matching<'a, L, R>, GraphError>
where
    T: AsRef<[bool]>,
{
    if rows.len() != left.len() {
        return Err(GraphError::invalid(
            "rows",
            format!("{} rows for {} left nodes", rows.len(), left.len()),
        ));
    }
    let rows: Vec<&[bool]> = rows.iter().map(<T as AsRef<[bool]>>::as_ref).collect();
    if let Some((i, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != right.len())
    {
        return Err(GraphError::invalid(
            "rows",
            format!("row {i} has {} entries for {} right nodes", row.len(), right.len()),
        ));
    }

    let pairs = rows.iter().enumerate().flat_map(|(i, row)| {
        row.iter()
            .enumerate()
            .filter(|&(_, &adjacent)| adjacent)
            .map(move |(j, _)| (i, j))
    });
    let right_of = match_indices(left.len(), right.len(), pairs)?;
    Ok(collect(left, right, right_of))
}
