//!
//! Small repeat graphs for tests
//!
//! Mocks add nodes with `add_node_pair` and edges with `add_edge_pair`,
//! so a forward node/edge is immediately followed by its complement.
//!
use super::RepeatGraph;
use crate::common::{CopyNum, Coverage};

///
/// Linear chain of three nodes
///
/// ```text
/// a --e1--> b --e2--> c
/// ```
///
pub fn mock_chain(coverage: Coverage) -> RepeatGraph {
    let mut g = RepeatGraph::new();
    let (a, _) = g.add_node_pair();
    let (b, _) = g.add_node_pair();
    let (c, _) = g.add_node_pair();
    g.add_edge_pair(a, b, 100, coverage);
    g.add_edge_pair(b, c, 100, coverage);
    g
}

///
/// Cycle of three nodes
///
/// ```text
/// a --e1--> b --e2--> c --e3--> a
/// ```
///
pub fn mock_cycle(coverage: Coverage) -> RepeatGraph {
    let mut g = RepeatGraph::new();
    let (a, _) = g.add_node_pair();
    let (b, _) = g.add_node_pair();
    let (c, _) = g.add_node_pair();
    g.add_edge_pair(a, b, 100, coverage);
    g.add_edge_pair(b, c, 100, coverage);
    g.add_edge_pair(c, a, 100, coverage);
    g
}

///
/// Junction with a self-loop
///
/// ```text
///            e2
///           /  \
///           \  /
/// a --e1--> b  --e3--> c
/// ```
///
pub fn mock_looped_junction() -> RepeatGraph {
    let mut g = RepeatGraph::new();
    let (a, _) = g.add_node_pair();
    let (b, _) = g.add_node_pair();
    let (c, _) = g.add_node_pair();
    g.add_edge_pair(a, b, 100, 10.0);
    g.add_edge_pair(b, b, 50, 10.0);
    g.add_edge_pair(b, c, 100, 10.0);
    g
}

///
/// A two-copy repeat `r` between two unique entries and two unique exits.
///
/// ```text
/// a1 --u1--           --v1--> b1
///          \         /
///           x --r-- y
///          /         \
/// a2 --u2--           --v2--> b2
/// ```
///
/// `u*` and `v*` have `unique_coverage`, `r` has `repeat_coverage`.
///
pub fn mock_repeat(unique_coverage: Coverage, repeat_coverage: Coverage) -> RepeatGraph {
    let mut g = RepeatGraph::new();
    let (a1, _) = g.add_node_pair();
    let (a2, _) = g.add_node_pair();
    let (x, _) = g.add_node_pair();
    let (y, _) = g.add_node_pair();
    let (b1, _) = g.add_node_pair();
    let (b2, _) = g.add_node_pair();
    g.add_edge_pair(a1, x, 1000, unique_coverage);
    g.add_edge_pair(a2, x, 1000, unique_coverage);
    g.add_edge_pair(x, y, 500, repeat_coverage);
    g.add_edge_pair(y, b1, 1000, unique_coverage);
    g.add_edge_pair(y, b2, 1000, unique_coverage);
    g
}

///
/// Circular genome with a two-copy repeat `r`, so that no edge is a tip.
///
/// ```text
///            +--v1--> p --u1--+
///            |                v
/// x --r--> y                  x
///            |                ^
///            +--v2--> q --u2--+
/// ```
///
/// `v1`/`u1` have `return1_coverage`, `v2`/`u2` have `return2_coverage`.
///
pub fn mock_circular_repeat(
    repeat_coverage: Coverage,
    return1_coverage: Coverage,
    return2_coverage: Coverage,
) -> RepeatGraph {
    let mut g = RepeatGraph::new();
    let (x, _) = g.add_node_pair();
    let (y, _) = g.add_node_pair();
    let (p, _) = g.add_node_pair();
    let (q, _) = g.add_node_pair();
    g.add_edge_pair(x, y, 500, repeat_coverage);
    g.add_edge_pair(y, p, 1000, return1_coverage);
    g.add_edge_pair(p, x, 1000, return1_coverage);
    g.add_edge_pair(y, q, 1000, return2_coverage);
    g.add_edge_pair(q, x, 1000, return2_coverage);
    g
}

///
/// Hairpin through a self-complementary node `p`
///
/// ```text
/// z --e1--> a --e2--> p --~e2--> ~a --~e1--> ~z
/// ```
///
pub fn mock_hairpin(coverage: Coverage) -> RepeatGraph {
    let mut g = RepeatGraph::new();
    let (z, _) = g.add_node_pair();
    let (a, _) = g.add_node_pair();
    let p = g.add_self_complementary_node();
    g.add_edge_pair(z, a, 100, coverage);
    g.add_edge_pair(a, p, 100, coverage);
    g
}

///
/// Edge `x` from `a` into its own complement `~a`
///
/// ```text
/// z --y--> a --x--> ~a --~y--> ~z
/// ```
///
/// `x` and its complement `~x` are parallel edges `a -> ~a`.
/// Multiplicities are set directly (`y` and `x`), not from coverage.
///
pub fn mock_inverted_edge(y: CopyNum, x: CopyNum) -> RepeatGraph {
    let mut g = RepeatGraph::new();
    let (z, _) = g.add_node_pair();
    let (a, a_c) = g.add_node_pair();
    let edge_y = g.add_edge_pair(z, a, 100, 10.0);
    let edge_x = g.add_edge_pair(a, a_c, 100, 10.0);
    for &((e, e_c), m) in &[(edge_y, y), (edge_x, x)] {
        g.edge_mut(e).multiplicity = m;
        g.edge_mut(e_c).multiplicity = m;
    }
    g
}
