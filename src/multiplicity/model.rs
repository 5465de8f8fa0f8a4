//!
//! Linear program of edge multiplicities
//!
//! # Variables
//!
//! * `x_e` (`0 <= e < E`): multiplicity of canonical edge `e`
//! * `source_n` (`E + 2n`) and `sink_n` (`E + 2n + 1`): emergency source and sink
//!   of canonical node `n`, absorbing the imbalance that cannot be fixed by raising
//!   multiplicities.
//!
//! # Constraints
//!
//! * `x_e >= current multiplicity of e`
//! * `source_n >= 0`, `sink_n >= 0`
//! * `sum(in-edges of n) - sum(out-edges of n) + source_n - sink_n == 0`
//!   only if the row over edge variables is linearly independent of the
//!   previously added rows. A row whose test overflows is kept.
//! * (optional) `x_e <= max_multiplicity`
//!
//! # Objective
//!
//! minimize `sum(x_e) + slack_penalty * sum(source_n + sink_n)`
//!
use super::independence::{to_sparse_row, RowEchelon, SparseRow};
use super::symmetry::CanonicalIds;
use super::{BalanceConfig, MultiplicityError};
use crate::common::CopyNum;
use crate::graph::RepeatGraph;
use crate::lp::{ComparisonOp, Constraint, LpSolver, LpStatus, VarId};
use log::{debug, warn};

///
/// LP model built from a snapshot of the graph.
/// Discarded after the solution is written back.
///
#[derive(Clone, Debug)]
pub struct MultiplicityModel {
    ids: CanonicalIds,
    ///
    /// name of each variable
    ///
    names: Vec<String>,
    ///
    /// multiplicity of each canonical edge when the model was built
    ///
    lower_bounds: Vec<CopyNum>,
    constraints: Vec<Constraint>,
    objective: Vec<f64>,
    ///
    /// canonical node ids whose conservation row was added
    ///
    conserved_nodes: Vec<usize>,
    ///
    /// canonical node ids whose conservation row was linearly dependent
    ///
    dependent_nodes: Vec<usize>,
}

///
/// Conservation row of the canonical node over edge variables:
/// +1 for each non-looped in-edge and -1 for each non-looped out-edge.
///
pub fn conservation_row(graph: &RepeatGraph, ids: &CanonicalIds, node_id: usize) -> SparseRow {
    let (node, _) = ids.node_pair(node_id);
    let in_terms = graph
        .in_edges(node)
        .into_iter()
        .filter_map(|e| ids.edge_id(e).map(|id| (id, 1)));
    let out_terms = graph
        .out_edges(node)
        .into_iter()
        .filter_map(|e| ids.edge_id(e).map(|id| (id, -1)));
    to_sparse_row(in_terms.chain(out_terms))
}

impl MultiplicityModel {
    ///
    /// Build the model from the current multiplicities of the graph
    ///
    pub fn build(graph: &RepeatGraph, config: &BalanceConfig) -> Self {
        let ids = CanonicalIds::from_graph(graph);
        let n_edges = ids.n_edges();
        let n_nodes = ids.n_nodes();
        let n_vars = n_edges + 2 * n_nodes;

        let mut names = Vec::with_capacity(n_vars);
        let mut lower_bounds = Vec::with_capacity(n_edges);
        let mut constraints = Vec::new();

        // edge variables
        for (id, &(e, _)) in ids.edge_pairs().iter().enumerate() {
            let ew = graph.edge(e);
            names.push(ew.id.to_string());
            lower_bounds.push(ew.multiplicity);
            constraints.push(Constraint::single(
                id,
                ComparisonOp::Ge,
                ew.multiplicity as f64,
            ));
            if let Some(max) = config.max_multiplicity {
                constraints.push(Constraint::single(id, ComparisonOp::Le, max as f64));
            }
        }

        // slack variables and conservation rows
        let mut echelon = RowEchelon::new();
        let mut conserved_nodes = Vec::new();
        let mut dependent_nodes = Vec::new();
        for node_id in 0..n_nodes {
            let source = n_edges + 2 * node_id;
            let sink = source + 1;
            names.push(format!("{}_source", node_id));
            names.push(format!("{}_sink", node_id));
            constraints.push(Constraint::single(source, ComparisonOp::Ge, 0.0));
            constraints.push(Constraint::single(sink, ComparisonOp::Ge, 0.0));

            let row = conservation_row(graph, &ids, node_id);
            match echelon.insert(&row) {
                Ok(true) => {}
                Ok(false) => {
                    debug!("node {} has a dependent conservation row", node_id);
                    dependent_nodes.push(node_id);
                    continue;
                }
                Err(e) => {
                    warn!("node {}: {}, conservation row is kept", node_id, e);
                }
            }
            let mut lp_row: Vec<(VarId, f64)> = row
                .iter()
                .map(|&(id, coeff)| (id, coeff as f64))
                .collect();
            if config.use_slack {
                lp_row.push((source, 1.0));
                lp_row.push((sink, -1.0));
            }
            constraints.push(Constraint::new(lp_row, ComparisonOp::Eq, 0.0));
            conserved_nodes.push(node_id);
        }

        let mut objective = vec![1.0; n_edges];
        objective.resize(n_vars, config.slack_penalty);

        MultiplicityModel {
            ids,
            names,
            lower_bounds,
            constraints,
            objective,
            conserved_nodes,
            dependent_nodes,
        }
    }
    pub fn ids(&self) -> &CanonicalIds {
        &self.ids
    }
    /// E + 2N
    pub fn n_variables(&self) -> usize {
        self.names.len()
    }
    pub fn n_edge_variables(&self) -> usize {
        self.ids.n_edges()
    }
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }
    pub fn variable_name(&self, var: VarId) -> &str {
        &self.names[var]
    }
    /// variable of the canonical edge
    pub fn edge_var(&self, edge_id: usize) -> VarId {
        edge_id
    }
    /// emergency source variable of the canonical node
    pub fn source_var(&self, node_id: usize) -> VarId {
        self.ids.n_edges() + 2 * node_id
    }
    /// emergency sink variable of the canonical node
    pub fn sink_var(&self, node_id: usize) -> VarId {
        self.ids.n_edges() + 2 * node_id + 1
    }
    /// multiplicity of the canonical edge when the model was built
    pub fn lower_bound(&self, edge_id: usize) -> CopyNum {
        self.lower_bounds[edge_id]
    }
    pub fn conserved_nodes(&self) -> &[usize] {
        &self.conserved_nodes
    }
    pub fn dependent_nodes(&self) -> &[usize] {
        &self.dependent_nodes
    }
    ///
    /// Declare variables, constraints and the objective into the solver
    ///
    pub fn load_into<S: LpSolver>(&self, solver: &mut S) {
        for name in self.names.iter() {
            solver.add_variable(name);
        }
        for c in self.constraints.iter() {
            solver.add_constraint(&c.row, c.op, c.rhs);
        }
        solver.set_objective(&self.objective);
    }
    ///
    /// Solve the model and return the value of each variable.
    ///
    /// A model without variables is trivially solved without calling the solver.
    ///
    pub fn solve<S: LpSolver>(&self, solver: &mut S) -> Result<Vec<f64>, MultiplicityError> {
        if self.n_variables() == 0 {
            return Ok(Vec::new());
        }
        self.load_into(solver);
        match solver.solve() {
            LpStatus::Solved => {
                let values = solver.solution().ok_or(MultiplicityError::MissingSolution)?;
                if values.len() != self.n_variables() {
                    return Err(MultiplicityError::MissingSolution);
                }
                Ok(values.to_vec())
            }
            status => Err(MultiplicityError::LpSolve(status)),
        }
    }
}
