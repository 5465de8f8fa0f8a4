//!
//! JSON dump of `RepeatGraph`
//!
//! ```text
//! {
//!   "nodes": [{"complement": 1}, {"complement": 0}, ...],
//!   "edges": [{"id": 1, "source": 0, "target": 2, "length": 100, "coverage": 10.0, "multiplicity": 1}, ...]
//! }
//! ```
//!
//! Complement of the edge with id `k` is the edge with id `-k`.
//!
use super::{ComplementError, RepeatEdge, RepeatGraph, RepeatNode};
use crate::common::{CopyNum, Coverage, EdgeId};
use fnv::FnvHashMap as HashMap;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// index of the complement node
    pub complement: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: EdgeId,
    pub source: usize,
    pub target: usize,
    pub length: usize,
    pub coverage: Coverage,
    #[serde(default)]
    pub multiplicity: CopyNum,
}

///
/// Serializable form of `RepeatGraph`
///
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphDump {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Error, Debug)]
pub enum GraphIoError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("node {0} referenced but only {1} nodes exist")]
    DanglingNode(usize, usize),
    #[error("edge id {0} appears more than once")]
    DuplicateEdgeId(EdgeId),
    #[error("edge id {0} is out of range")]
    EdgeIdOutOfRange(EdgeId),
    #[error("edge id {0} has no complement edge")]
    MissingComplementEdge(EdgeId),
    #[error("invalid complement relation: {0:?}")]
    Complement(ComplementError),
}

impl RepeatGraph {
    ///
    /// Convert into the serializable form
    ///
    pub fn to_dump(&self) -> GraphDump {
        let nodes = self
            .nodes()
            .map(|v| NodeRecord {
                complement: self.complement_node(v).index(),
            })
            .collect();
        let edges = self
            .edges()
            .map(|e| {
                let (s, t) = self.endpoints(e);
                let ew = self.edge(e);
                EdgeRecord {
                    id: ew.id,
                    source: s.index(),
                    target: t.index(),
                    length: ew.length,
                    coverage: ew.coverage,
                    multiplicity: ew.multiplicity,
                }
            })
            .collect();
        GraphDump { nodes, edges }
    }
    ///
    /// Construct from the serializable form.
    ///
    /// Node and edge indices follow the record order.
    ///
    pub fn from_dump(dump: &GraphDump) -> Result<RepeatGraph, GraphIoError> {
        let n = dump.nodes.len();
        let check = |v: usize| -> Result<NodeIndex, GraphIoError> {
            if v < n {
                Ok(NodeIndex::new(v))
            } else {
                Err(GraphIoError::DanglingNode(v, n))
            }
        };

        let mut graph: DiGraph<RepeatNode, RepeatEdge> =
            DiGraph::with_capacity(n, dump.edges.len());
        for record in dump.nodes.iter() {
            let complement = check(record.complement)?;
            graph.add_node(RepeatNode { complement });
        }

        let mut edge_of_id: HashMap<EdgeId, EdgeIndex> = HashMap::default();
        for record in dump.edges.iter() {
            // both -id and |id| + 1 (next fresh id) must be representable
            if record
                .id
                .checked_abs()
                .and_then(|k| k.checked_add(1))
                .is_none()
            {
                return Err(GraphIoError::EdgeIdOutOfRange(record.id));
            }
            let source = check(record.source)?;
            let target = check(record.target)?;
            // complement is filled after all edges are added
            let e = graph.add_edge(
                source,
                target,
                RepeatEdge {
                    id: record.id,
                    length: record.length,
                    coverage: record.coverage,
                    multiplicity: record.multiplicity,
                    complement: EdgeIndex::end(),
                },
            );
            if edge_of_id.insert(record.id, e).is_some() {
                return Err(GraphIoError::DuplicateEdgeId(record.id));
            }
        }
        for record in dump.edges.iter() {
            let e = edge_of_id[&record.id];
            let c = edge_of_id
                .get(&-record.id)
                .copied()
                .ok_or(GraphIoError::MissingComplementEdge(record.id))?;
            graph[e].complement = c;
        }

        let next_edge_id = dump.edges.iter().map(|r| r.id.abs() + 1).max().unwrap_or(1);
        let g = RepeatGraph {
            graph,
            next_edge_id,
        };
        g.check_complements().map_err(GraphIoError::Complement)?;
        Ok(g)
    }
    ///
    /// Read the JSON dump file
    ///
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<RepeatGraph, GraphIoError> {
        let file = std::fs::File::open(path)?;
        let dump: GraphDump = serde_json::from_reader(BufReader::new(file))?;
        RepeatGraph::from_dump(&dump)
    }
    ///
    /// Write the JSON dump into the writer
    ///
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), GraphIoError> {
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer_pretty(&mut writer, &self.to_dump())?;
        writeln!(writer)?;
        Ok(())
    }
    ///
    /// Write the JSON dump file
    ///
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GraphIoError> {
        let file = std::fs::File::create(path)?;
        self.write_json(file)
    }
}

#[cfg(test)]
mod tests {
    use super::super::mocks::*;
    use super::*;

    #[test]
    fn dump_keeps_structure() {
        let mut g = mock_repeat(10.0, 20.0);
        let r = g.find_edge_by_id(3).unwrap();
        g.edge_mut(r).multiplicity = 2;
        let dump = g.to_dump();
        assert_eq!(dump.nodes.len(), 12);
        assert_eq!(dump.edges.len(), 10);

        let h = RepeatGraph::from_dump(&dump).unwrap();
        assert_eq!(h.to_dump(), dump);
        let r2 = h.find_edge_by_id(3).unwrap();
        assert_eq!(h.complement_edge(r2), h.find_edge_by_id(-3).unwrap());
        assert_eq!(h.multiplicity(r2), 2);
    }
    #[test]
    fn json_file() {
        let g = mock_hairpin(12.5);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        g.to_json_file(&path).unwrap();
        let h = RepeatGraph::from_json_file(&path).unwrap();
        assert_eq!(g.to_dump(), h.to_dump());
    }
    #[test]
    fn missing_complement_edge() {
        let json = r#"{
            "nodes": [{"complement": 1}, {"complement": 0}],
            "edges": [{"id": 1, "source": 0, "target": 1, "length": 10, "coverage": 1.0}]
        }"#;
        let dump: GraphDump = serde_json::from_str(json).unwrap();
        assert_eq!(dump.edges[0].multiplicity, 0);
        match RepeatGraph::from_dump(&dump) {
            Err(GraphIoError::MissingComplementEdge(1)) => {}
            other => panic!("unexpected {:?}", other.map(|g| g.to_dump())),
        }
    }
    #[test]
    fn edge_id_out_of_range() {
        for &id in &[EdgeId::MIN, EdgeId::MAX] {
            let dump = GraphDump {
                nodes: vec![NodeRecord { complement: 0 }],
                edges: vec![EdgeRecord {
                    id,
                    source: 0,
                    target: 0,
                    length: 10,
                    coverage: 1.0,
                    multiplicity: 0,
                }],
            };
            assert!(matches!(
                RepeatGraph::from_dump(&dump),
                Err(GraphIoError::EdgeIdOutOfRange(i)) if i == id
            ));
        }
    }
    #[test]
    fn dangling_node() {
        let dump = GraphDump {
            nodes: vec![NodeRecord { complement: 3 }],
            edges: vec![],
        };
        assert!(matches!(
            RepeatGraph::from_dump(&dump),
            Err(GraphIoError::DanglingNode(3, 1))
        ));
    }
}
