//!
//! Canonical numbering of strand pairs
//!
//! An edge and its complement edge are the same genomic segment, so they share one id.
//! Same for nodes. Ids are dense (`0..n`) and are rebuilt on every balancing pass.
//!
use crate::graph::RepeatGraph;
use crate::vector::{EdgeVec, NodeVec};
use petgraph::graph::{EdgeIndex, NodeIndex};

///
/// Id tables of canonical edges and nodes
///
#[derive(Clone, Debug)]
pub struct CanonicalIds {
    ///
    /// canonical id of each edge. `None` if looped.
    ///
    edge_ids: EdgeVec<Option<usize>>,
    ///
    /// (representative edge, its complement) for each canonical edge id
    ///
    edge_pairs: Vec<(EdgeIndex, EdgeIndex)>,
    ///
    /// canonical id of each node. `None` if not eligible for flow conservation.
    ///
    node_ids: NodeVec<Option<usize>>,
    ///
    /// (representative node, its complement) for each canonical node id
    ///
    node_pairs: Vec<(NodeIndex, NodeIndex)>,
}

///
/// A node enters the flow conservation if it has both in and out edges
/// and at least two distinct neighbors.
///
pub fn is_eligible_node(graph: &RepeatGraph, node: NodeIndex) -> bool {
    !graph.in_edges(node).is_empty()
        && !graph.out_edges(node).is_empty()
        && graph.neighbors(node).len() >= 2
}

impl CanonicalIds {
    pub fn from_graph(graph: &RepeatGraph) -> Self {
        let mut edge_ids = EdgeVec::new(graph.n_edges(), None);
        let mut edge_pairs = Vec::new();
        for e in graph.edges() {
            if graph.is_looped(e) || edge_ids[e].is_some() {
                continue;
            }
            let c = graph.complement_edge(e);
            let id = edge_pairs.len();
            edge_ids[e] = Some(id);
            edge_ids[c] = Some(id);
            edge_pairs.push((e, c));
        }

        let mut node_ids = NodeVec::new(graph.n_nodes(), None);
        let mut node_pairs = Vec::new();
        for v in graph.nodes() {
            if node_ids[v].is_some() || !is_eligible_node(graph, v) {
                continue;
            }
            let c = graph.complement_node(v);
            let id = node_pairs.len();
            node_ids[v] = Some(id);
            node_ids[c] = Some(id);
            node_pairs.push((v, c));
        }

        CanonicalIds {
            edge_ids,
            edge_pairs,
            node_ids,
            node_pairs,
        }
    }
    /// # of canonical edges
    pub fn n_edges(&self) -> usize {
        self.edge_pairs.len()
    }
    /// # of canonical nodes
    pub fn n_nodes(&self) -> usize {
        self.node_pairs.len()
    }
    pub fn edge_id(&self, edge: EdgeIndex) -> Option<usize> {
        self.edge_ids[edge]
    }
    pub fn node_id(&self, node: NodeIndex) -> Option<usize> {
        self.node_ids[node]
    }
    /// (representative, complement) of the canonical edge
    pub fn edge_pair(&self, id: usize) -> (EdgeIndex, EdgeIndex) {
        self.edge_pairs[id]
    }
    pub fn edge_pairs(&self) -> &[(EdgeIndex, EdgeIndex)] {
        &self.edge_pairs
    }
    /// (representative, complement) of the canonical node
    pub fn node_pair(&self, id: usize) -> (NodeIndex, NodeIndex) {
        self.node_pairs[id]
    }
    pub fn node_pairs(&self) -> &[(NodeIndex, NodeIndex)] {
        &self.node_pairs
    }
}
