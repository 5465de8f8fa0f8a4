//!
//! `LpSolver` backed by the `minilp` simplex implementation
//!
use super::{ComparisonOp, Constraint, LpSolver, LpStatus, VarId};
use log::debug;
use minilp::{LinearExpr, OptimizationDirection, Problem};

///
/// Buffers the declared problem and hands it to `minilp` on `solve`.
///
#[derive(Clone, Debug, Default)]
pub struct SimplexSolver {
    names: Vec<String>,
    constraints: Vec<Constraint>,
    costs: Vec<f64>,
    values: Option<Vec<f64>>,
}

impl SimplexSolver {
    pub fn new() -> Self {
        SimplexSolver::default()
    }
    /// # of declared variables
    pub fn n_variables(&self) -> usize {
        self.names.len()
    }
    /// # of added constraints
    pub fn n_constraints(&self) -> usize {
        self.constraints.len()
    }
    /// name of the variable given in `add_variable`
    pub fn variable_name(&self, var: VarId) -> &str {
        &self.names[var]
    }
}

fn to_minilp_op(op: ComparisonOp) -> minilp::ComparisonOp {
    match op {
        ComparisonOp::Eq => minilp::ComparisonOp::Eq,
        ComparisonOp::Le => minilp::ComparisonOp::Le,
        ComparisonOp::Ge => minilp::ComparisonOp::Ge,
    }
}

impl LpSolver for SimplexSolver {
    fn add_variable(&mut self, name: &str) -> VarId {
        self.names.push(name.to_string());
        self.names.len() - 1
    }
    fn add_constraint(&mut self, row: &[(VarId, f64)], op: ComparisonOp, rhs: f64) {
        assert!(
            row.iter().all(|&(v, _)| v < self.names.len()),
            "constraint refers to an undeclared variable"
        );
        self.constraints.push(Constraint::new(row.to_vec(), op, rhs));
    }
    fn set_objective(&mut self, costs: &[f64]) {
        self.costs = costs.to_vec();
    }
    fn solve(&mut self) -> LpStatus {
        self.values = None;
        let mut problem = Problem::new(OptimizationDirection::Minimize);
        let vars: Vec<minilp::Variable> = (0..self.names.len())
            .map(|i| {
                let cost = self.costs.get(i).copied().unwrap_or(0.0);
                problem.add_var(cost, (0.0, f64::INFINITY))
            })
            .collect();
        for constraint in self.constraints.iter() {
            let mut expr = LinearExpr::empty();
            for &(v, coeff) in constraint.row.iter() {
                expr.add(vars[v], coeff);
            }
            problem.add_constraint(expr, to_minilp_op(constraint.op), constraint.rhs);
        }
        match problem.solve() {
            Ok(solution) => {
                debug!("simplex: objective={}", solution.objective());
                self.values = Some(vars.iter().map(|&var| solution[var]).collect());
                LpStatus::Solved
            }
            Err(minilp::Error::Unbounded) => LpStatus::Unbounded,
            Err(err) => {
                debug!("simplex: {:?}", err);
                LpStatus::Infeasible
            }
        }
    }
    fn solution(&self) -> Option<&[f64]> {
        self.values.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimize_with_lower_bounds() {
        // min x + y  s.t. x >= 2, y >= 1, x - y == 0
        let mut s = SimplexSolver::new();
        let x = s.add_variable("x");
        let y = s.add_variable("y");
        s.add_constraint(&[(x, 1.0)], ComparisonOp::Ge, 2.0);
        s.add_constraint(&[(y, 1.0)], ComparisonOp::Ge, 1.0);
        s.add_constraint(&[(x, 1.0), (y, -1.0)], ComparisonOp::Eq, 0.0);
        s.set_objective(&[1.0, 1.0]);
        assert_eq!(s.solve(), LpStatus::Solved);
        let values = s.solution().unwrap();
        assert_abs_diff_eq!(values[x], 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(values[y], 2.0, epsilon = 1e-6);
        assert_eq!(s.variable_name(y), "y");
    }
    #[test]
    fn infeasible_problem() {
        let mut s = SimplexSolver::new();
        let x = s.add_variable("x");
        s.add_constraint(&[(x, 1.0)], ComparisonOp::Ge, 3.0);
        s.add_constraint(&[(x, 1.0)], ComparisonOp::Le, 2.0);
        s.set_objective(&[1.0]);
        assert_eq!(s.solve(), LpStatus::Infeasible);
        assert!(s.solution().is_none());
    }
    #[test]
    fn unbounded_problem() {
        let mut s = SimplexSolver::new();
        let x = s.add_variable("x");
        s.add_constraint(&[(x, 1.0)], ComparisonOp::Ge, 1.0);
        s.set_objective(&[-1.0]);
        assert_eq!(s.solve(), LpStatus::Unbounded);
    }
}
