//!
//! Edge multiplicity inference for strand-symmetric repeat graphs
//!
//! * `graph`: repeat graph with complement (reverse-complement strand) relations
//! * `multiplicity`: coverage estimate and LP-based flow balancing of multiplicities
//! * `lp`: linear programming interface and its simplex backend
//!
#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod common;
pub mod graph;
pub mod lp;
pub mod multiplicity;
pub mod prelude;
pub mod vector;
