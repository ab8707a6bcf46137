use itertools::Itertools;
use proptest::prelude::*;

use super::{bipartite::*, *};
use crate::GraphError;

fn scenario_network() -> FlowNetwork<u32, u32> {
    let mut network = FlowNetwork::new();
    network.add_edge(1, 2, 1);
    network.add_edge(1, 2, 1);
    network.add_edge(2, 3, 2);
    network
}

#[test]
fn parallel_edges_both_carry_flow() {
    let mut network = scenario_network();
    let s = network.node_id(&1).unwrap();
    let t = network.node_id(&3).unwrap();

    assert_eq!(EdmondsKarp.max_flow(&mut network, &[s], &[t]), Ok(2));
    assert!(network.edges().all(|(_, e)| e.flow == e.capacity));
    assert_eq!(network.outflow(s), Ok(2));
    assert_eq!(network.inflow(t), Ok(2));
}

#[test]
fn maximum_flow_explores_edges_of() {
    let adjacency = |n: &u32| match n {
        1 => vec![(2, 1), (2, 1)],
        2 => vec![(3, 2)],
        _ => vec![],
    };
    let mut calls = vec![];
    let solution = maximum_flow(&[1], &[3], |n| {
        calls.push(*n);
        adjacency(n)
    })
    .unwrap();

    assert_eq!(solution.value, 2_u32);
    assert_eq!(solution.flow_between(&1, &2), Ok(2));
    assert_eq!(solution.flow_between(&2, &3), Ok(2));
    assert_eq!(solution.flow_between(&3, &1), Ok(0));
    calls.sort();
    assert_eq!(calls, vec![1, 2, 3]);
}

fn detour_edges(node: &&'static str) -> Vec<(&'static str, u8)> {
    match *node {
        "s" => vec![("a", 1), ("c", 1)],
        "a" => vec![("d", 1), ("e", 1)],
        "c" => vec![("d", 1)],
        "d" => vec![("t", 1)],
        "e" => vec![("f", 1)],
        "f" => vec![("t", 1)],
        _ => vec![],
    }
}

#[test]
fn flow_is_cancelled_along_backward_edges() {
    // The shortest path s-a-d-t blocks s-c-d-t; the second augmentation has to
    // send its unit back over a-d and reroute it through e and f.
    let solution = maximum_flow(&["s"], &["t"], detour_edges).unwrap();

    assert_eq!(solution.value, 2);
    assert_eq!(solution.flow_between(&"a", &"d"), Ok(0));
    assert_eq!(solution.flow_between(&"c", &"d"), Ok(1));
    assert_eq!(solution.flow_between(&"a", &"e"), Ok(1));
    assert_eq!(solution.flow_between(&"f", &"t"), Ok(1));
}

#[test]
fn several_sources_and_sinks() {
    let mut network: FlowNetwork<&str, u64> = FlowNetwork::new();
    network.add_edge("s1", "x", 3);
    network.add_edge("s2", "x", 2);
    network.add_edge("x", "t1", 4);
    network.add_edge("s2", "t2", 1);
    network.add_edge("t1", "s1", 7);

    let sources = network.node_ids("sources", &["s1", "s2"]).unwrap();
    let sinks = network.node_ids("sinks", &["t1", "t2"]).unwrap();
    assert_eq!(EdmondsKarp.max_flow(&mut network, &sources, &sinks), Ok(5));

    let cut = EdmondsKarp.min_cut(&network, &sources).unwrap();
    let cut_capacity: u64 = cut.edges.iter().map(|&e| network.edge(e).capacity).sum();
    assert_eq!(cut_capacity, 5);
}

#[test]
fn unreachable_sink_gets_no_flow() {
    let solution = maximum_flow(&['a'], &['z'], |n: &char| match n {
        'a' => vec![('b', 4_u32)],
        _ => vec![],
    })
    .unwrap();
    assert_eq!(solution.value, 0);
    assert_eq!(solution.network.node_count(), 3);
}

#[test]
fn existing_flow_is_kept() {
    let mut network = scenario_network();
    let s = network.node_id(&1).unwrap();
    let t = network.node_id(&3).unwrap();

    network.edge_mut(EdgeId(0)).push(1, Direction::Forward).unwrap();
    network.edge_mut(EdgeId(2)).push(1, Direction::Forward).unwrap();
    assert_eq!(EdmondsKarp.max_flow(&mut network, &[s], &[t]), Ok(2));
    assert_eq!(EdmondsKarp.max_flow(&mut network, &[s], &[t]), Ok(2));

    network.reset_flow();
    assert!(network.edges().all(|(_, e)| e.flow == 0));
}

#[test]
fn arguments_are_validated() {
    let mut network = scenario_network();
    let (a, b, c) = (NodeId(0), NodeId(1), NodeId(2));

    assert!(matches!(
        EdmondsKarp.max_flow(&mut network, &[], &[c]),
        Err(GraphError::InvalidArgument { arg: "sources", .. })
    ));
    assert!(matches!(
        EdmondsKarp.max_flow(&mut network, &[a], &[]),
        Err(GraphError::InvalidArgument { arg: "sinks", .. })
    ));
    assert_eq!(
        EdmondsKarp.max_flow(&mut network, &[a], &[b, NodeId(9)]),
        Err(GraphError::OutOfRange {
            arg: "sinks",
            index: 9,
            len: 3
        })
    );
    assert!(matches!(
        EdmondsKarp.max_flow(&mut network, &[a, b], &[b, c]),
        Err(GraphError::InvalidArgument { arg: "sinks", .. })
    ));
    assert!(network.edges().all(|(_, e)| e.flow == 0));

    assert!(matches!(
        maximum_flow(&[1], &[1], |_: &u32| vec![(2_u32, 1_u32)]),
        Err(GraphError::InvalidArgument { arg: "sinks", .. })
    ));
    assert!(matches!(
        network.node_ids("sources", &[1, 7]),
        Err(GraphError::InvalidArgument { arg: "sources", .. })
    ));
    assert_eq!(
        network.outflow(NodeId(3)),
        Err(GraphError::OutOfRange {
            arg: "node",
            index: 3,
            len: 3
        })
    );
}

#[test]
fn shared_endpoint_is_rejected_before_exploring() {
    let mut calls = 0;
    let result = maximum_flow(&[1, 2], &[5, 2], |_: &u32| {
        calls += 1;
        vec![(3_u32, 1_u32)]
    });
    insta::assert_snapshot!(result.unwrap_err(), @"Invalid argument `sinks`: sink 1 is also source 1");
    assert_eq!(calls, 0);

    let mut network = scenario_network();
    let err = EdmondsKarp
        .max_flow(&mut network, &[NodeId(0), NodeId(1)], &[NodeId(1), NodeId(2)])
        .unwrap_err();
    insta::assert_snapshot!(err, @"Invalid argument `sinks`: sink 0 is also source 1");
}

#[test]
fn flow_totals_report_overflow() {
    let mut network: FlowNetwork<char, u8> = FlowNetwork::new();
    let first = network.add_edge('a', 'b', 200);
    let second = network.add_edge('a', 'b', 200);
    network.edge_mut(first).push(200, Direction::Forward).unwrap();
    network.edge_mut(second).push(100, Direction::Forward).unwrap();
    let solution = FlowSolution { value: 0, network };

    assert!(matches!(
        solution.flow_between(&'a', &'b'),
        Err(GraphError::InternalInconsistency(_))
    ));
    assert!(solution.network.outflow(NodeId(0)).is_err());
    assert_eq!(solution.flow_between(&'b', &'a'), Ok(0));
    assert_eq!(solution.flow_between(&'a', &'z'), Ok(0));
}

#[test]
fn pushing_past_residual_capacity_fails() {
    let mut edge = NetworkEdge {
        from: NodeId(0),
        to: NodeId(1),
        capacity: 2_u16,
        flow: 1,
    };
    assert_eq!(edge.residual(Direction::Forward), 1);
    assert_eq!(edge.residual(Direction::Backward), 1);

    let err = edge.push(2, Direction::Forward).unwrap_err();
    insta::assert_snapshot!(err, @"Internal inconsistency: pushing 2 Forward over (NodeId(0), NodeId(1)) with flow 1 and capacity 2");
    assert!(edge.push(2, Direction::Backward).is_err());
    assert_eq!(edge.flow, 1);

    edge.push(1, Direction::Forward).unwrap();
    assert_eq!(edge.residual_forward(), 0);
    edge.push(2, Direction::Backward).unwrap();
    assert_eq!(edge.flow, 0);
}

#[test]
fn loops_are_never_crossed() {
    let edge = NetworkEdge {
        from: NodeId(4),
        to: NodeId(4),
        capacity: 3_u32,
        flow: 0,
    };
    assert_eq!(edge.leaving(NodeId(4)), None);

    let arc = NetworkEdge { to: NodeId(5), ..edge };
    assert_eq!(arc.leaving(NodeId(4)), Some(Direction::Forward));
    assert_eq!(arc.leaving(NodeId(5)), Some(Direction::Backward));
    assert_eq!(arc.leaving(NodeId(6)), None);
    assert_eq!(arc.head(Direction::Backward), NodeId(4));
    assert_eq!(arc.tail(Direction::Backward), NodeId(5));
}

#[test]
fn bipartite_rows() {
    let left = [1, 2, 3];
    let right = [1, 2, 3, 4];
    let rows = [
        [true, true, false, true],
        [false, true, false, false],
        [false, false, false, false],
    ];
    let matching = matching_from_rows(&left, &right, &rows).unwrap();

    let partners: Vec<Option<&i32>> = matching.matches().iter().map(|m| m.right).collect();
    similar_asserts::assert_eq!(partners, vec![Some(&1), Some(&2), None]);
    assert_eq!(matching.cardinality(), 2);
    assert_eq!(matching.right_index(1), Some(1));
    assert_eq!(matching.right_index(7), None);
    assert_eq!(
        matching.pairs().collect::<Vec<_>>(),
        vec![(&1, &1), (&2, &2)]
    );
}

#[test]
fn bipartite_rows_must_fit() {
    let left = ['a', 'b'];
    let right = ['x', 'y'];

    let err = matching_from_rows(&left, &right, &[vec![true, false]]).unwrap_err();
    insta::assert_snapshot!(err, @"Invalid argument `rows`: 1 rows for 2 left nodes");

    let err = matching_from_rows(&left, &right, &[vec![true, false], vec![true]]).unwrap_err();
    insta::assert_snapshot!(err, @"Invalid argument `rows`: row 1 has 1 entries for 2 right nodes");
}

#[test]
fn bipartite_with_predicate() {
    let jobs = ["cook", "drive", "teach"];
    let people = ["ann", "bob"];
    let can_do = |job: &&str, person: &&str| match *person {
        "ann" => *job == "cook",
        "bob" => *job == "cook" || *job == "teach",
        _ => false,
    };
    let matching = maximum_matching(&jobs, &people, can_do).unwrap();

    assert_eq!(matching.cardinality(), 2);
    assert_eq!(matching.matches()[0].right, Some(&"ann"));
    assert_eq!(matching.matches()[1].right, None);
    assert_eq!(matching.matches()[2].right, Some(&"bob"));

    let empty: [u8; 0] = [];
    let matching = maximum_matching(&jobs, &empty, |_, _| true).unwrap();
    assert_eq!(matching.cardinality(), 0);
    assert_eq!(matching.matches().len(), 3);
}

/// Brute force: the cheapest cut over every split of the nodes.
fn brute_force_min_cut(n: usize, edges: &[(usize, usize, u32)], s: usize, t: usize) -> u32 {
    (0..1_u32 << n)
        .filter(|&set| set & (1 << s) != 0 && set & (1 << t) == 0)
        .map(|set| {
            edges
                .iter()
                .filter(|&&(a, b, _)| set & (1 << a) != 0 && set & (1 << b) == 0)
                .map(|&(_, _, c)| c)
                .sum::<u32>()
        })
        .min()
        .unwrap_or(0)
}

/// Brute force: the largest set of pairs with distinct endpoints.
fn brute_force_matching(rows: &[Vec<bool>], i: usize, used: &mut Vec<bool>) -> usize {
    if i == rows.len() {
        return 0;
    }
    let mut best = brute_force_matching(rows, i + 1, used);
    for j in 0..used.len() {
        if rows[i][j] && !used[j] {
            used[j] = true;
            best = best.max(1 + brute_force_matching(rows, i + 1, used));
            used[j] = false;
        }
    }
    best
}

fn arb_network() -> impl Strategy<Value = (usize, Vec<(usize, usize, u32)>)> {
    (2..=6_usize).prop_flat_map(|n| {
        let edge = (0..n, 0..n, 0..6_u32);
        (Just(n), proptest::collection::vec(edge, 0..=14))
    })
}

fn arb_rows() -> impl Strategy<Value = (usize, Vec<Vec<bool>>)> {
    (0..=5_usize, 0..=5_usize).prop_flat_map(|(l, r)| {
        let row = proptest::collection::vec(any::<bool>(), r);
        (Just(r), proptest::collection::vec(row, l))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn maximum_flow_is_a_minimum_cut((n, edges) in arb_network()) {
        let mut network: FlowNetwork<usize, u32> = FlowNetwork::new();
        for node in 0..n {
            network.add_node(node);
        }
        for &(a, b, c) in &edges {
            network.add_edge(a, b, c);
        }
        let (s, t) = (NodeId(0), NodeId(n - 1));
        let value = EdmondsKarp.max_flow(&mut network, &[s], &[t]).unwrap();

        for (_, edge) in network.edges() {
            prop_assert!(edge.flow <= edge.capacity);
        }
        for node in (1..n - 1).map(NodeId) {
            prop_assert_eq!(network.inflow(node), network.outflow(node));
        }
        prop_assert_eq!(value + network.inflow(s).unwrap(), network.outflow(s).unwrap());
        prop_assert_eq!(network.net_outflow(&[s]), Ok(value));
        let inner = (1..n - 1).map(NodeId).collect_vec();
        prop_assert_eq!(network.net_outflow(&inner), Ok(0));
        prop_assert_eq!(value, brute_force_min_cut(n, &edges, 0, n - 1));

        let cut = EdmondsKarp.min_cut(&network, &[s]).unwrap();
        prop_assert!(cut.source_side.contains(&s));
        prop_assert!(!cut.source_side.contains(&t));
        let cut_capacity: u32 = cut.edges.iter().map(|&e| network.edge(e).capacity).sum();
        prop_assert_eq!(cut_capacity, value);
    }

    #[test]
    fn matching_is_maximum((r, rows) in arb_rows()) {
        let left = (0..rows.len()).collect_vec();
        let right = (0..r).collect_vec();
        let matching = matching_from_rows(&left, &right, &rows).unwrap();

        let partners = (0..left.len()).filter_map(|i| matching.right_index(i).map(|j| (i, j))).collect_vec();
        for &(i, j) in &partners {
            prop_assert!(rows[i][j]);
        }
        prop_assert!(partners.iter().map(|&(_, j)| j).all_unique());
        prop_assert_eq!(
            matching.cardinality(),
            brute_force_matching(&rows, 0, &mut vec![false; r])
        );
    }
}
