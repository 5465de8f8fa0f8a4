#[macro_use]
extern crate approx;

use repgraph::common::CopyNum;
use repgraph::graph::mocks::*;
use repgraph::graph::RepeatGraph;
use repgraph::lp::LpStatus;
use repgraph::multiplicity::coverage::estimate_by_coverage;
use repgraph::multiplicity::symmetry::{is_eligible_node, CanonicalIds};
use repgraph::multiplicity::{
    fix_edges_multiplicity, BalanceConfig, MultiplicityError, MultiplicityInferer,
};
use repgraph::vector::EdgeVec;

fn multiplicities(g: &RepeatGraph) -> EdgeVec<CopyNum> {
    EdgeVec::from_vec(g.edges().map(|e| g.multiplicity(e)).collect())
}

fn mocks() -> Vec<RepeatGraph> {
    vec![
        mock_chain(10.0),
        mock_cycle(10.0),
        mock_looped_junction(),
        mock_repeat(10.0, 12.0),
        mock_repeat(10.0, 31.0),
        mock_circular_repeat(10.0, 10.0, 10.0),
        mock_circular_repeat(25.0, 10.0, 13.0),
        mock_hairpin(10.0),
    ]
}

#[test]
fn complement_symmetry_after_pass() {
    for mut g in mocks() {
        fix_edges_multiplicity(&mut g, BalanceConfig::default()).unwrap();
        for e in g.edges() {
            assert_eq!(g.multiplicity(e), g.multiplicity(g.complement_edge(e)));
        }
    }
}

#[test]
fn multiplicities_never_decrease() {
    for mut g in mocks() {
        estimate_by_coverage(&mut g);
        let before = multiplicities(&g);
        MultiplicityInferer::new(&mut g, BalanceConfig::default())
            .balance_graph()
            .unwrap();
        let after = multiplicities(&g);
        for (e, &m) in before.iter() {
            assert!(after[e] >= m, "edge {:?} decreased {} -> {}", e, m, after[e]);
        }
    }
}

#[test]
fn conservation_holds_at_balanced_nodes() {
    for mut g in mocks() {
        let report = fix_edges_multiplicity(&mut g, BalanceConfig::default()).unwrap();
        assert!(report.is_fully_balanced());
        for v in g.nodes() {
            if is_eligible_node(&g, v) {
                let (m_in, m_out) = g.flow_balance(v);
                assert_eq!(m_in, m_out, "node {:?} is unbalanced", v);
            }
        }
    }
}

#[test]
fn complement_pairing_is_stable() {
    for mut g in mocks() {
        estimate_by_coverage(&mut g);
        let before = CanonicalIds::from_graph(&g);
        MultiplicityInferer::new(&mut g, BalanceConfig::default())
            .balance_graph()
            .unwrap();
        let after = CanonicalIds::from_graph(&g);
        assert_eq!(before.edge_pairs(), after.edge_pairs());
        assert_eq!(before.node_pairs(), after.node_pairs());
        assert_eq!(g.check_complements(), Ok(()));
    }
}

#[test]
fn uniform_coverage() {
    let mut g = mock_cycle(7.0);
    let mean = estimate_by_coverage(&mut g);
    assert_abs_diff_eq!(mean, 7.0, epsilon = 1e-9);
    for e in g.edges() {
        assert_eq!(g.multiplicity(e), 1);
    }
}

#[test]
fn empty_graph() {
    let mut g = RepeatGraph::new();
    let mut inferer = MultiplicityInferer::new(&mut g, BalanceConfig::default());
    assert_abs_diff_eq!(inferer.estimate_by_coverage(), 1.0);
    let report = inferer.balance_graph().unwrap();
    assert_eq!(report.n_edge_variables, 0);
    assert_eq!(report.n_nodes, 0);
    assert!(report.changes.is_empty());
}

#[test]
fn cycle_skips_dependent_row_and_solves() {
    let mut g = mock_cycle(10.0);
    let report = fix_edges_multiplicity(&mut g, BalanceConfig::default()).unwrap();
    assert_eq!(report.n_nodes, 3);
    assert_eq!(report.n_conservation_rows, 2);
    assert_eq!(report.n_dependent_rows, 1);
    assert!(report.changes.is_empty());
}

#[test]
fn chain_solves() {
    let mut g = mock_chain(10.0);
    let report = fix_edges_multiplicity(&mut g, BalanceConfig::default()).unwrap();
    assert_eq!(report.n_nodes, 1);
    assert_eq!(report.n_dependent_rows, 0);
    for e in g.edges() {
        assert_eq!(g.multiplicity(e), 1);
    }
}

#[test]
fn circular_repeat_is_raised() {
    let mut g = mock_circular_repeat(10.0, 10.0, 10.0);
    let report = fix_edges_multiplicity(&mut g, BalanceConfig::default()).unwrap();
    assert!(report.is_fully_balanced());
    assert_eq!(report.changes.len(), 1);
    assert_eq!(report.changes[0].id, 1);
    assert_eq!(g.multiplicity(g.find_edge_by_id(1).unwrap()), 2);
    assert_eq!(g.multiplicity(g.find_edge_by_id(-1).unwrap()), 2);
}

#[test]
fn strict_mode_with_cap_is_infeasible() {
    let mut g = mock_repeat(10.0, 12.0);
    let config = BalanceConfig {
        use_slack: false,
        max_multiplicity: Some(1),
        ..BalanceConfig::default()
    };
    let mut inferer = MultiplicityInferer::new(&mut g, config);
    inferer.estimate_by_coverage();
    let before = multiplicities(inferer.graph());
    assert_eq!(
        inferer.balance_graph(),
        Err(MultiplicityError::LpSolve(LpStatus::Infeasible))
    );
    assert_eq!(multiplicities(&g), before);
}

#[test]
fn capped_graph_uses_slack() {
    let mut g = mock_repeat(10.0, 12.0);
    let config = BalanceConfig {
        max_multiplicity: Some(1),
        ..BalanceConfig::default()
    };
    let report = fix_edges_multiplicity(&mut g, config).unwrap();
    assert!(!report.is_fully_balanced());
    assert_eq!(report.unbalanced_nodes.len(), 2);
    assert_eq!(report.extra_source + report.extra_sink, 2);
    assert!(report.changes.is_empty());
}

#[test]
fn pass_over_json_dump() {
    let g = mock_repeat(10.0, 12.0);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    g.to_json_file(&path).unwrap();

    let mut h = RepeatGraph::from_json_file(&path).unwrap();
    fix_edges_multiplicity(&mut h, BalanceConfig::default()).unwrap();
    h.to_json_file(&path).unwrap();

    let h = RepeatGraph::from_json_file(&path).unwrap();
    assert_eq!(h.multiplicity(h.find_edge_by_id(3).unwrap()), 2);
    assert_eq!(h.multiplicity(h.find_edge_by_id(-3).unwrap()), 2);
}

#[test]
fn unreported_nodes_are_balanced() {
    let mut g = mock_inverted_edge(3, 1);
    let report = MultiplicityInferer::new(&mut g, BalanceConfig::default())
        .balance_graph()
        .unwrap();
    assert_eq!(report.unbalanced_nodes.len(), 1);
    for v in g.nodes() {
        let reported = report.unbalanced_nodes.contains(&v)
            || report.unbalanced_nodes.contains(&g.complement_node(v));
        if is_eligible_node(&g, v) && !reported {
            let (m_in, m_out) = g.flow_balance(v);
            assert_eq!(m_in, m_out, "node {:?} is unbalanced", v);
        }
    }
}
