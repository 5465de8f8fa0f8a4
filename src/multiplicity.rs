//!
//! Edge multiplicity inference on the repeat graph
//!
//! 1. estimate multiplicities from coverage (`coverage`)
//! 2. raise them so that the flow is conserved at junctions, by solving
//!    a linear program over strand-collapsed edges (`symmetry`, `model`)
//! 3. write the solution back to both strands and report leftover imbalance (`writeback`)
//!
//! Balancing is best-effort: imbalance that cannot be fixed by raising multiplicities
//! is absorbed by penalized slack variables and reported as a warning.
//!
use crate::common::{CopyNum, Coverage};
use crate::graph::RepeatGraph;
use crate::lp::{LpSolver, LpStatus, SimplexSolver};
use log::{info, warn};
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod coverage;
pub mod independence;
pub mod model;
pub mod symmetry;
pub mod writeback;

use model::MultiplicityModel;
use writeback::{find_imbalance, write_back, MultiplicityChange};

///
/// Objective weight of a unit of slack flow
///
pub const DEFAULT_SLACK_PENALTY: f64 = 1000.0;

///
/// Parameters of `balance_graph`
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    ///
    /// cost of a unit of flow of emergency source/sink, relative to the cost 1
    /// of a unit of edge multiplicity
    ///
    pub slack_penalty: f64,
    ///
    /// if false, conservation rows have no emergency source/sink
    /// and an unbalanceable graph makes the LP infeasible
    ///
    pub use_slack: bool,
    ///
    /// upper bound of multiplicity of each edge
    ///
    pub max_multiplicity: Option<CopyNum>,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        BalanceConfig {
            slack_penalty: DEFAULT_SLACK_PENALTY,
            use_slack: true,
            max_multiplicity: None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MultiplicityError {
    #[error("error while solving LP: {0}")]
    LpSolve(LpStatus),
    #[error("LP solver returned no solution")]
    MissingSolution,
}

///
/// Summary of a balancing pass
///
#[derive(Clone, Debug, PartialEq, Default)]
pub struct BalanceReport {
    /// # of LP variables for edges (strand pairs)
    pub n_edge_variables: usize,
    /// # of canonical junction nodes
    pub n_nodes: usize,
    /// # of conservation rows added into the LP
    pub n_conservation_rows: usize,
    /// # of conservation rows skipped as linearly dependent
    pub n_dependent_rows: usize,
    /// multiplicity updates (one per strand pair)
    pub changes: Vec<MultiplicityChange>,
    /// representative nodes that remained unbalanced (slack used or in/out sums differ)
    pub unbalanced_nodes: Vec<NodeIndex>,
    pub extra_source: CopyNum,
    pub extra_sink: CopyNum,
}

impl BalanceReport {
    pub fn is_fully_balanced(&self) -> bool {
        self.unbalanced_nodes.is_empty()
    }
}

///
/// Multiplicity inference bound to a graph
///
/// The graph is mutably borrowed during the pass, so no other reader/writer
/// can observe a half-updated graph.
///
pub struct MultiplicityInferer<'a> {
    graph: &'a mut RepeatGraph,
    config: BalanceConfig,
}

impl<'a> MultiplicityInferer<'a> {
    pub fn new(graph: &'a mut RepeatGraph, config: BalanceConfig) -> Self {
        MultiplicityInferer { graph, config }
    }
    pub fn graph(&self) -> &RepeatGraph {
        &*self.graph
    }
    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }
    ///
    /// Estimate by coverage, then balance
    ///
    pub fn fix_edges_multiplicity(&mut self) -> Result<BalanceReport, MultiplicityError> {
        self.estimate_by_coverage();
        self.balance_graph()
    }
    ///
    /// Set multiplicities of all edges from coverage. Returns the mean coverage.
    ///
    pub fn estimate_by_coverage(&mut self) -> Coverage {
        coverage::estimate_by_coverage(self.graph)
    }
    ///
    /// Balance with the default simplex solver
    ///
    pub fn balance_graph(&mut self) -> Result<BalanceReport, MultiplicityError> {
        let mut solver = SimplexSolver::new();
        self.balance_graph_with(&mut solver)
    }
    ///
    /// Raise multiplicities so that flow is conserved at junction nodes.
    ///
    /// If the solver fails, the graph is left untouched.
    ///
    pub fn balance_graph_with<S: LpSolver>(
        &mut self,
        solver: &mut S,
    ) -> Result<BalanceReport, MultiplicityError> {
        info!("updating edges multiplicity");
        let model = MultiplicityModel::build(self.graph, &self.config);
        info!(
            "lp: {} variables, {} constraints, {} dependent conservation rows skipped",
            model.n_variables(),
            model.constraints().len(),
            model.dependent_nodes().len(),
        );

        let values = model.solve(solver)?;

        let changes = write_back(self.graph, &model, &values);
        let imbalance = find_imbalance(self.graph, &model, &values);
        if !imbalance.is_empty() {
            warn!(
                "could not balance assembly graph in full: {} nodes remained, extra source: {} extra sink: {}",
                imbalance.nodes.len(),
                imbalance.extra_source,
                imbalance.extra_sink,
            );
        }

        Ok(BalanceReport {
            n_edge_variables: model.n_edge_variables(),
            n_nodes: model.ids().n_nodes(),
            n_conservation_rows: model.conserved_nodes().len(),
            n_dependent_rows: model.dependent_nodes().len(),
            changes,
            unbalanced_nodes: imbalance.nodes,
            extra_source: imbalance.extra_source,
            extra_sink: imbalance.extra_sink,
        })
    }
}

///
/// Run the whole pass (estimate and balance) on the graph
///
pub fn fix_edges_multiplicity(
    graph: &mut RepeatGraph,
    config: BalanceConfig,
) -> Result<BalanceReport, MultiplicityError> {
    MultiplicityInferer::new(graph, config).fix_edges_multiplicity()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ni;
    use crate::graph::mocks::*;
    use crate::lp::{ComparisonOp, VarId};
    use crate::vector::EdgeVec;
    use test_case::test_case;

    fn multiplicities(g: &RepeatGraph) -> EdgeVec<CopyNum> {
        EdgeVec::from_vec(g.edges().map(|e| g.multiplicity(e)).collect())
    }

    ///
    /// Solver that always reports the given status
    ///
    struct StatusSolver(LpStatus, usize);

    impl LpSolver for StatusSolver {
        fn add_variable(&mut self, _name: &str) -> VarId {
            self.1 += 1;
            self.1 - 1
        }
        fn add_constraint(&mut self, _row: &[(VarId, f64)], _op: ComparisonOp, _rhs: f64) {}
        fn set_objective(&mut self, _costs: &[f64]) {}
        fn solve(&mut self) -> LpStatus {
            self.0
        }
        fn solution(&self) -> Option<&[f64]> {
            None
        }
    }

    #[test]
    fn repeat_is_raised() {
        let mut g = mock_repeat(10.0, 12.0);
        let report = fix_edges_multiplicity(&mut g, BalanceConfig::default()).unwrap();
        println!("{:?}", report);
        let r = g.find_edge_by_id(3).unwrap();
        assert_eq!(g.multiplicity(r), 2);
        assert_eq!(g.multiplicity(g.find_edge_by_id(-3).unwrap()), 2);
        assert_eq!(report.changes.len(), 1);
        assert!(report.is_fully_balanced());
        assert_eq!(report.n_conservation_rows, 2);
    }
    #[test]
    fn balanced_graph_is_unchanged() {
        let mut g = mock_repeat(10.0, 20.0);
        let mut inferer = MultiplicityInferer::new(&mut g, BalanceConfig::default());
        inferer.estimate_by_coverage();
        let before = multiplicities(inferer.graph());
        let report = inferer.balance_graph().unwrap();
        assert!(report.changes.is_empty());
        assert!(report.is_fully_balanced());
        assert_eq!(multiplicities(&g), before);
    }
    #[test]
    fn empty_graph_is_noop() {
        let mut g = RepeatGraph::new();
        let report = fix_edges_multiplicity(&mut g, BalanceConfig::default()).unwrap();
        assert_eq!(report, BalanceReport::default());
    }
    #[test]
    fn looped_edges_keep_estimate() {
        let mut g = mock_looped_junction();
        let report = fix_edges_multiplicity(&mut g, BalanceConfig::default()).unwrap();
        assert_eq!(report.n_edge_variables, 2);
        for e in g.edges() {
            assert_eq!(g.multiplicity(e), 1);
        }
    }
    #[test]
    fn fractional_optimum_is_reported() {
        // a has y on the in side and both strands of x on the out side,
        // so the LP settles on x = 1.5
        let mut g = mock_inverted_edge(3, 1);
        let report = MultiplicityInferer::new(&mut g, BalanceConfig::default())
            .balance_graph()
            .unwrap();
        assert!(!report.is_fully_balanced());
        assert_eq!(report.unbalanced_nodes, vec![ni(2)]);
        assert_eq!(report.extra_source + report.extra_sink, 0);
        assert_eq!(g.flow_balance(ni(2)), (3, 4));
    }
    #[test_case(LpStatus::Infeasible ; "infeasible")]
    #[test_case(LpStatus::NeedsFixup ; "needs fixup")]
    #[test_case(LpStatus::Unbounded ; "unbounded")]
    fn solver_failure_aborts(status: LpStatus) {
        let mut g = mock_repeat(10.0, 12.0);
        let mut inferer = MultiplicityInferer::new(&mut g, BalanceConfig::default());
        inferer.estimate_by_coverage();
        let before = multiplicities(inferer.graph());
        let mut solver = StatusSolver(status, 0);
        assert_eq!(
            inferer.balance_graph_with(&mut solver),
            Err(MultiplicityError::LpSolve(status))
        );
        assert_eq!(solver.1, 9);
        assert_eq!(multiplicities(&g), before);
    }
    #[test]
    fn solved_without_values() {
        let mut g = mock_chain(10.0);
        let mut solver = StatusSolver(LpStatus::Solved, 0);
        let mut inferer = MultiplicityInferer::new(&mut g, BalanceConfig::default());
        inferer.estimate_by_coverage();
        assert_eq!(
            inferer.balance_graph_with(&mut solver),
            Err(MultiplicityError::MissingSolution)
        );
    }
    #[test]
    fn config_from_partial_json() {
        let config: BalanceConfig = serde_json::from_str(r#"{"use_slack": false}"#).unwrap();
        assert!(!config.use_slack);
        assert_abs_diff_eq!(config.slack_penalty, DEFAULT_SLACK_PENALTY);
        assert_eq!(config.max_multiplicity, None);
    }
}
