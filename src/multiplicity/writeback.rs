//!
//! Write the LP solution back into the graph and summarize the leftover imbalance
//!
use super::model::MultiplicityModel;
use crate::common::{to_copy_num, CopyNum, EdgeId};
use crate::graph::RepeatGraph;
use derive_new::new;
use log::debug;
use petgraph::graph::{EdgeIndex, NodeIndex};

///
/// Multiplicity update of a strand pair of edges
///
#[derive(Clone, Debug, PartialEq, new)]
pub struct MultiplicityChange {
    /// representative edge
    pub edge: EdgeIndex,
    /// complement of the representative edge
    pub complement: EdgeIndex,
    /// signed id of the representative edge
    pub id: EdgeId,
    pub old: CopyNum,
    pub new: CopyNum,
}

///
/// Set the solved multiplicity of each canonical edge to both the edge and its complement.
///
/// The strand pairs recorded when the model was built are used, so the written pair is
/// exactly the pair that shared the LP variable.
///
pub fn write_back(
    graph: &mut RepeatGraph,
    model: &MultiplicityModel,
    values: &[f64],
) -> Vec<MultiplicityChange> {
    let mut changes = Vec::new();
    for (id, &(e, c)) in model.ids().edge_pairs().iter().enumerate() {
        debug_assert_eq!(graph.complement_edge(e), c);
        let inferred = to_copy_num(values[model.edge_var(id)]);
        let old = graph.multiplicity(e);
        if old != inferred {
            let edge_id = graph.edge(e).id;
            debug!("mult {} {} -> {}", edge_id, old, inferred);
            graph.edge_mut(e).multiplicity = inferred;
            graph.edge_mut(c).multiplicity = inferred;
            changes.push(MultiplicityChange::new(e, c, edge_id, old, inferred));
        }
    }
    changes
}

///
/// Leftover imbalance after balancing
///
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Imbalance {
    ///
    /// representative node of canonical nodes whose source or sink is used,
    /// or whose in/out multiplicities differ after rounding
    ///
    pub nodes: Vec<NodeIndex>,
    ///
    /// total flow of emergency sources
    ///
    pub extra_source: CopyNum,
    ///
    /// total flow of emergency sinks
    ///
    pub extra_sink: CopyNum,
}

impl Imbalance {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

///
/// Collect canonical nodes that are not balanced in the written graph.
///
/// A node is unbalanced if its (rounded) source or sink flow is non-zero, or if the
/// multiplicities of its in-edges and out-edges do not sum up to the same value.
/// The latter happens when the LP optimum is fractional, or when the conservation
/// row of the node was skipped as dependent and slack was used elsewhere.
///
/// Call after `write_back`.
///
pub fn find_imbalance(
    graph: &RepeatGraph,
    model: &MultiplicityModel,
    values: &[f64],
) -> Imbalance {
    let mut imbalance = Imbalance::default();
    for (node_id, &(node, _)) in model.ids().node_pairs().iter().enumerate() {
        let source = to_copy_num(values[model.source_var(node_id)]);
        let sink = to_copy_num(values[model.sink_var(node_id)]);
        imbalance.extra_source += source;
        imbalance.extra_sink += sink;
        let (m_in, m_out) = graph.flow_balance(node);
        if m_in != m_out {
            debug!("node {} in={} out={}", node.index(), m_in, m_out);
        }
        if source + sink > 0 || m_in != m_out {
            imbalance.nodes.push(node);
        }
    }
    imbalance
}
