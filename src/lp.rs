//!
//! Linear programming interface
//!
//! The multiplicity model only talks to the solver through `LpSolver`:
//! declare variables, add constraints, set a (minimized) objective, solve,
//! then read the status and the values of variables.
//!
//! All declared variables are non-negative.
//!
pub mod simplex;
pub use simplex::SimplexSolver;

/// index of a variable, in declaration order
pub type VarId = usize;

///
/// Comparison operator of a constraint `row (op) rhs`
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonOp {
    /// `row == rhs`
    Eq,
    /// `row <= rhs`
    Le,
    /// `row >= rhs`
    Ge,
}

impl std::fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ComparisonOp::Eq => write!(f, "=="),
            ComparisonOp::Le => write!(f, "<="),
            ComparisonOp::Ge => write!(f, ">="),
        }
    }
}

///
/// A linear constraint over a sparse coefficient row
///
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    /// (variable, coefficient) pairs
    pub row: Vec<(VarId, f64)>,
    pub op: ComparisonOp,
    pub rhs: f64,
}

impl Constraint {
    pub fn new(row: Vec<(VarId, f64)>, op: ComparisonOp, rhs: f64) -> Self {
        Constraint { row, op, rhs }
    }
    ///
    /// `var (op) rhs`
    ///
    pub fn single(var: VarId, op: ComparisonOp, rhs: f64) -> Self {
        Constraint::new(vec![(var, 1.0)], op, rhs)
    }
    ///
    /// Check the constraint against values of variables (with tolerance `eps`)
    ///
    pub fn is_satisfied(&self, values: &[f64], eps: f64) -> bool {
        let lhs: f64 = self.row.iter().map(|&(v, c)| c * values[v]).sum();
        match self.op {
            ComparisonOp::Eq => (lhs - self.rhs).abs() <= eps,
            ComparisonOp::Le => lhs <= self.rhs + eps,
            ComparisonOp::Ge => lhs >= self.rhs - eps,
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, (v, c)) in self.row.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}*x{}", c, v)?;
        }
        write!(f, " {} {}", self.op, self.rhs)
    }
}

///
/// Result status of `LpSolver::solve`
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LpStatus {
    /// optimal solution was found
    Solved,
    /// no solution satisfies the constraints
    Infeasible,
    /// solver stopped in a state that requires manual adjustment of the problem
    NeedsFixup,
    /// objective is unbounded
    Unbounded,
}

impl LpStatus {
    pub fn is_solved(&self) -> bool {
        matches!(self, LpStatus::Solved)
    }
}

impl std::fmt::Display for LpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LpStatus::Solved => write!(f, "solved"),
            LpStatus::Infeasible => write!(f, "infeasible"),
            LpStatus::NeedsFixup => write!(f, "needs fixup"),
            LpStatus::Unbounded => write!(f, "unbounded"),
        }
    }
}

///
/// Minimal contract of a linear programming engine.
///
/// * `add_variable`: declare a new non-negative variable
/// * `add_constraint`: add a constraint over declared variables
/// * `set_objective`: set the cost of each variable (minimized)
/// * `solve`: run the solver and return the status
/// * `solution`: values of variables if the last `solve` succeeded
///
pub trait LpSolver {
    fn add_variable(&mut self, name: &str) -> VarId;
    fn add_constraint(&mut self, row: &[(VarId, f64)], op: ComparisonOp, rhs: f64);
    fn set_objective(&mut self, costs: &[f64]);
    fn solve(&mut self) -> LpStatus;
    fn solution(&self) -> Option<&[f64]>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_satisfaction() {
        let c = Constraint::new(vec![(0, 1.0), (1, -1.0)], ComparisonOp::Eq, 0.0);
        assert!(c.is_satisfied(&[2.0, 2.0], 1e-9));
        assert!(!c.is_satisfied(&[2.0, 1.0], 1e-9));
        let c = Constraint::single(1, ComparisonOp::Ge, 3.0);
        assert!(c.is_satisfied(&[0.0, 3.0], 1e-9));
        assert!(!c.is_satisfied(&[0.0, 2.5], 1e-9));
        assert_eq!(c.to_string(), "1*x1 >= 3");
    }
}
