//!
//! Initial multiplicity from read coverage
//!
use crate::common::{CopyNum, Coverage};
use crate::graph::RepeatGraph;
use log::info;

///
/// Length-weighted mean of edge coverages
///
/// `sum(coverage * length) / sum(length)`, or 1 if the total length is 0.
///
pub fn mean_coverage(graph: &RepeatGraph) -> Coverage {
    let (sum_cov, sum_length) = graph
        .edges()
        .map(|e| {
            let ew = graph.edge(e);
            (ew.coverage * ew.length as f64, ew.length)
        })
        .fold((0.0, 0), |(c, l), (ec, el)| (c + ec, l + el));
    if sum_length == 0 {
        1.0
    } else {
        sum_cov / sum_length as f64
    }
}

///
/// `max(min_multiplicity, round(coverage / mean))`
///
/// where `min_multiplicity` is 0 for tips and 1 otherwise.
///
pub fn estimate_multiplicity(coverage: Coverage, mean: Coverage, is_tip: bool) -> CopyNum {
    let min_multiplicity: CopyNum = if is_tip { 0 } else { 1 };
    let ratio = (coverage / mean).round();
    let estimate = if ratio.is_finite() && ratio > 0.0 {
        ratio as CopyNum
    } else {
        0
    };
    estimate.max(min_multiplicity)
}

///
/// Overwrite the multiplicity of every edge by the estimate from coverage.
/// Returns the mean coverage used.
///
pub fn estimate_by_coverage(graph: &mut RepeatGraph) -> Coverage {
    let mean = mean_coverage(graph);
    info!("mean edge coverage: {}", mean);

    let estimates: Vec<(_, CopyNum)> = graph
        .edges()
        .map(|e| {
            let m = estimate_multiplicity(graph.edge(e).coverage, mean, graph.is_tip(e));
            (e, m)
        })
        .collect();
    for (e, m) in estimates {
        graph.edge_mut(e).multiplicity = m;
    }
    mean
}
