//!
//! globally-available parts
//!
pub use crate::common::{CopyNum, Coverage, EdgeId};
pub use crate::graph::RepeatGraph;
pub use crate::lp::{LpSolver, LpStatus, SimplexSolver};
pub use crate::multiplicity::{
    fix_edges_multiplicity, BalanceConfig, BalanceReport, MultiplicityError, MultiplicityInferer,
};
pub use petgraph::graph::{EdgeIndex, NodeIndex};
