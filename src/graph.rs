//!
//! `RepeatGraph`
//!
//! Node: junction between sequence fragments
//! Edge: contiguous sequence fragment (with length, coverage and multiplicity)
//!
//! Every node and edge has a complement (reverse-complement strand) counterpart
//! stored explicitly in its weight.
//! Complement relations are involutive, and a node can be its own complement.
//!
use crate::common::{CopyNum, Coverage, EdgeId};
use fnv::FnvHashSet as HashSet;
use itertools::Itertools;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

pub mod io;
pub mod mocks;

///
/// Node of RepeatGraph
///
#[derive(Clone, Debug, PartialEq)]
pub struct RepeatNode {
    ///
    /// reverse-complement node
    ///
    complement: NodeIndex,
}

impl RepeatNode {
    pub fn complement(&self) -> NodeIndex {
        self.complement
    }
}

///
/// Edge of RepeatGraph
///
/// Corresponds to a sequence fragment.
///
#[derive(Clone, Debug, PartialEq)]
pub struct RepeatEdge {
    ///
    /// signed id. complement edge has the negated id.
    ///
    pub id: EdgeId,
    ///
    /// length of the sequence fragment in bp
    ///
    pub length: usize,
    ///
    /// mean read depth on the fragment
    ///
    pub coverage: Coverage,
    ///
    /// copy number of the fragment in the genome
    ///
    pub multiplicity: CopyNum,
    ///
    /// reverse-complement edge
    ///
    complement: EdgeIndex,
}

impl RepeatEdge {
    pub fn complement(&self) -> EdgeIndex {
        self.complement
    }
}

impl std::fmt::Display for RepeatNode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "~{}", self.complement.index())
    }
}

impl std::fmt::Display for RepeatEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} len={} cov={} x{}",
            self.id, self.length, self.coverage, self.multiplicity
        )
    }
}

///
/// Repeat graph with both strands
///
#[derive(Clone, Debug)]
pub struct RepeatGraph {
    graph: DiGraph<RepeatNode, RepeatEdge>,
    next_edge_id: EdgeId,
}

impl Default for RepeatGraph {
    fn default() -> Self {
        RepeatGraph::new()
    }
}

impl std::fmt::Display for RepeatGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", Dot::with_config(&self.graph, &[]))
    }
}

///
/// Violation of the complement relation found by `RepeatGraph::check_complements`
///
#[derive(Clone, Debug, PartialEq)]
pub enum ComplementError {
    /// `complement(complement(v)) != v`
    NodeNotInvolutive(NodeIndex),
    /// `complement(complement(e)) != e`
    EdgeNotInvolutive(EdgeIndex),
    /// complement edge does not connect complement(target) -> complement(source)
    EdgeEndpointsMismatch(EdgeIndex),
    /// complement edge id is not the negated id
    EdgeIdMismatch(EdgeIndex),
}

///
/// Construction
///
impl RepeatGraph {
    pub fn new() -> Self {
        RepeatGraph {
            graph: DiGraph::new(),
            next_edge_id: 1,
        }
    }
    ///
    /// Add a node and its complement node.
    ///
    pub fn add_node_pair(&mut self) -> (NodeIndex, NodeIndex) {
        let n = self.graph.node_count();
        let v = self.graph.add_node(RepeatNode {
            complement: NodeIndex::new(n + 1),
        });
        let w = self.graph.add_node(RepeatNode { complement: v });
        (v, w)
    }
    ///
    /// Add a node that is the complement of itself (e.g. center of a palindrome)
    ///
    pub fn add_self_complementary_node(&mut self) -> NodeIndex {
        let n = self.graph.node_count();
        self.graph.add_node(RepeatNode {
            complement: NodeIndex::new(n),
        })
    }
    ///
    /// Add an edge `source -> target` and its complement edge
    /// `complement(target) -> complement(source)`.
    ///
    /// The forward edge gets a fresh positive id `k` and the complement `-k`.
    /// Multiplicity is initialized to 0.
    ///
    pub fn add_edge_pair(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        length: usize,
        coverage: Coverage,
    ) -> (EdgeIndex, EdgeIndex) {
        let id = self.next_edge_id;
        self.add_edge_pair_with_id(id, source, target, length, coverage)
    }
    ///
    /// `add_edge_pair` with an explicit (positive) edge id
    ///
    pub fn add_edge_pair_with_id(
        &mut self,
        id: EdgeId,
        source: NodeIndex,
        target: NodeIndex,
        length: usize,
        coverage: Coverage,
    ) -> (EdgeIndex, EdgeIndex) {
        let source_c = self.complement_node(source);
        let target_c = self.complement_node(target);
        let m = self.graph.edge_count();
        let e = self.graph.add_edge(
            source,
            target,
            RepeatEdge {
                id,
                length,
                coverage,
                multiplicity: 0,
                complement: EdgeIndex::new(m + 1),
            },
        );
        let e_c = self.graph.add_edge(
            target_c,
            source_c,
            RepeatEdge {
                id: -id,
                length,
                coverage,
                multiplicity: 0,
                complement: e,
            },
        );
        self.next_edge_id = self.next_edge_id.max(id.abs() + 1);
        (e, e_c)
    }
}

///
/// Graph wrappers and accessor to attributes
///
impl RepeatGraph {
    ///
    /// Reference of the inner petgraph `&DiGraph<RepeatNode, RepeatEdge>`
    ///
    pub fn graph(&self) -> &DiGraph<RepeatNode, RepeatEdge> {
        &self.graph
    }
    /// # of nodes (both strands)
    pub fn n_nodes(&self) -> usize {
        self.graph.node_count()
    }
    /// # of edges (both strands)
    pub fn n_edges(&self) -> usize {
        self.graph.edge_count()
    }
    /// Iterator of all nodes
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }
    /// Iterator of all edges
    pub fn edges(&self) -> impl Iterator<Item = EdgeIndex> {
        self.graph.edge_indices()
    }
    /// Weight of the edge
    pub fn edge(&self, edge: EdgeIndex) -> &RepeatEdge {
        &self.graph[edge]
    }
    /// Mutable weight of the edge
    pub fn edge_mut(&mut self, edge: EdgeIndex) -> &mut RepeatEdge {
        &mut self.graph[edge]
    }
    /// (source, target) of the edge
    pub fn endpoints(&self, edge: EdgeIndex) -> (NodeIndex, NodeIndex) {
        self.graph
            .edge_endpoints(edge)
            .unwrap_or_else(|| panic!("edge {} is not in the graph", edge.index()))
    }
    ///
    /// Incoming edges of the node, ordered by edge index
    ///
    pub fn in_edges(&self, node: NodeIndex) -> Vec<EdgeIndex> {
        self.adjacent_edges(node, Direction::Incoming)
    }
    ///
    /// Outgoing edges of the node, ordered by edge index
    ///
    pub fn out_edges(&self, node: NodeIndex) -> Vec<EdgeIndex> {
        self.adjacent_edges(node, Direction::Outgoing)
    }
    fn adjacent_edges(&self, node: NodeIndex, dir: Direction) -> Vec<EdgeIndex> {
        self.graph
            .edges_directed(node, dir)
            .map(|er| er.id())
            .sorted()
            .collect()
    }
    ///
    /// The set of nodes (other than the node itself) adjacent via in/out edges
    ///
    pub fn neighbors(&self, node: NodeIndex) -> HashSet<NodeIndex> {
        self.graph
            .neighbors_undirected(node)
            .filter(|&w| w != node)
            .collect()
    }
    ///
    /// Complement node
    ///
    pub fn complement_node(&self, node: NodeIndex) -> NodeIndex {
        self.graph[node].complement
    }
    ///
    /// Complement edge
    ///
    pub fn complement_edge(&self, edge: EdgeIndex) -> EdgeIndex {
        self.graph[edge].complement
    }
    ///
    /// Self-loop edge: source and target are the same node
    ///
    pub fn is_looped(&self, edge: EdgeIndex) -> bool {
        let (s, t) = self.endpoints(edge);
        s == t
    }
    ///
    /// Dead end on one side: source has no incoming edges
    /// or target has no outgoing edges.
    ///
    pub fn is_tip(&self, edge: EdgeIndex) -> bool {
        let (s, t) = self.endpoints(edge);
        self.graph
            .edges_directed(s, Direction::Incoming)
            .next()
            .is_none()
            || self
                .graph
                .edges_directed(t, Direction::Outgoing)
                .next()
                .is_none()
    }
    ///
    /// Find the edge by its signed id
    ///
    pub fn find_edge_by_id(&self, id: EdgeId) -> Option<EdgeIndex> {
        self.graph.edge_indices().find(|&e| self.graph[e].id == id)
    }
    ///
    /// multiplicity of the edge
    ///
    pub fn multiplicity(&self, edge: EdgeIndex) -> CopyNum {
        self.graph[edge].multiplicity
    }
    ///
    /// Check that complement relations are total and involutive,
    /// and that complement edges connect the complement nodes in reverse.
    ///
    pub fn check_complements(&self) -> Result<(), ComplementError> {
        for v in self.nodes() {
            let c = self.complement_node(v);
            if c.index() >= self.n_nodes() || self.complement_node(c) != v {
                return Err(ComplementError::NodeNotInvolutive(v));
            }
        }
        for e in self.edges() {
            let c = self.complement_edge(e);
            if c.index() >= self.n_edges() || self.complement_edge(c) != e {
                return Err(ComplementError::EdgeNotInvolutive(e));
            }
            let (s, t) = self.endpoints(e);
            let (cs, ct) = self.endpoints(c);
            if cs != self.complement_node(t) || ct != self.complement_node(s) {
                return Err(ComplementError::EdgeEndpointsMismatch(e));
            }
            if self.edge(c).id != -self.edge(e).id {
                return Err(ComplementError::EdgeIdMismatch(e));
            }
        }
        Ok(())
    }
    ///
    /// For every node, (sum of in-edge multiplicities, sum of out-edge multiplicities).
    /// Looped edges are ignored.
    ///
    pub fn flow_balance(&self, node: NodeIndex) -> (CopyNum, CopyNum) {
        let sum = |edges: Vec<EdgeIndex>| -> CopyNum {
            edges
                .into_iter()
                .filter(|&e| !self.is_looped(e))
                .map(|e| self.multiplicity(e))
                .sum()
        };
        (sum(self.in_edges(node)), sum(self.out_edges(node)))
    }
}
