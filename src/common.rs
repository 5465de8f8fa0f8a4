//!
//! Types shared by the graph and the multiplicity inference
//!
pub use petgraph::graph::{EdgeIndex, NodeIndex};

/// integer copy number (= occurrence of the edge sequence on the genome)
pub type CopyNum = usize;

/// read depth of an edge (externally computed, can be fractional)
pub type Coverage = f64;

/// Signed id of an edge.
///
/// The sign encodes the strand, so an edge with id `k` has the complement edge `-k`.
pub type EdgeId = i64;

///
/// short-hand of `NodeIndex::new`
///
pub fn ni(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

///
/// short-hand of `EdgeIndex::new`
///
pub fn ei(index: usize) -> EdgeIndex {
    EdgeIndex::new(index)
}

///
/// Round a (LP solution) value to the nearest copy number.
///
/// Negative values and tiny negative rounding errors of the solver are clamped into 0.
///
pub fn to_copy_num(value: f64) -> CopyNum {
    let rounded = value.round();
    if rounded <= 0.0 {
        0
    } else {
        rounded as CopyNum
    }
}
