use crate::{GraphDocument, KanjiEdge};
use kanjigraph_core::{Direction, Kanji, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

/// Directed kanji dependency graph.
///
/// Nodes and edges keep their insertion order so that subgraphs, node
/// indices and serialised output are stable across runs.
#[derive(Debug, Clone, Default)]
pub struct KanjiGraph {
    nodes: Vec<Kanji>,
    index: FxHashMap<Kanji, usize>,
    out_edges: Vec<Vec<usize>>,
    in_edges: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
    edge_set: FxHashSet<(usize, usize)>,
}

impl KanjiGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<I, A, B>(edges: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<Kanji>,
        B: Into<Kanji>,
    {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    /// Adds a node if it is not already present and returns its index.
    pub fn add_node(&mut self, kanji: impl Into<Kanji>) -> usize {
        let kanji = kanji.into();
        if let Some(&idx) = self.index.get(&kanji) {
            return idx;
        }
        let idx = self.nodes.len();
        self.index.insert(kanji.clone(), idx);
        self.nodes.push(kanji);
        self.out_edges.push(Vec::new());
        self.in_edges.push(Vec::new());
        idx
    }

    /// Adds `from -> to`, creating missing endpoints. Returns `false` for a duplicate edge.
    pub fn add_edge(&mut self, from: impl Into<Kanji>, to: impl Into<Kanji>) -> bool {
        let from = self.add_node(from);
        let to = self.add_node(to);
        if !self.edge_set.insert((from, to)) {
            return false;
        }
        self.edges.push((from, to));
        self.out_edges[from].push(to);
        self.in_edges[to].push(from);
        true
    }

    pub fn contains(&self, kanji: &str) -> bool {
        self.index.contains_key(kanji)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(String::as_str)
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.edges
            .iter()
            .map(|&(a, b)| (self.nodes[a].as_str(), self.nodes[b].as_str()))
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self.edge_set.contains(&(a, b)),
            _ => false,
        }
    }

    /// Components `kanji` is built from.
    pub fn successors(&self, kanji: &str) -> Vec<&str> {
        self.index
            .get(kanji)
            .map(|&i| self.names(&self.out_edges[i]))
            .unwrap_or_default()
    }

    /// Compounds that are built from `kanji`.
    pub fn predecessors(&self, kanji: &str) -> Vec<&str> {
        self.index
            .get(kanji)
            .map(|&i| self.names(&self.in_edges[i]))
            .unwrap_or_default()
    }

    pub fn neighbors(&self, kanji: &str, direction: Direction) -> Vec<&str> {
        match direction {
            Direction::Outgoing => self.successors(kanji),
            Direction::Incoming => self.predecessors(kanji),
            Direction::Both => {
                let mut out = self.predecessors(kanji);
                for succ in self.successors(kanji) {
                    if !out.contains(&succ) {
                        out.push(succ);
                    }
                }
                out
            }
        }
    }

    pub fn in_degree(&self, kanji: &str) -> usize {
        self.index.get(kanji).map_or(0, |&i| self.in_edges[i].len())
    }

    pub fn out_degree(&self, kanji: &str) -> usize {
        self.index.get(kanji).map_or(0, |&i| self.out_edges[i].len())
    }

    /// Induced subgraph over `keep`. Node order follows this graph; names
    /// that are not in this graph are ignored.
    pub fn subgraph<'k, I>(&self, keep: I) -> KanjiGraph
    where
        I: IntoIterator<Item = &'k str>,
    {
        let wanted: FxHashSet<usize> = keep
            .into_iter()
            .filter_map(|k| self.index.get(k).copied())
            .collect();

        let mut sub = KanjiGraph::new();
        for (i, name) in self.nodes.iter().enumerate() {
            if wanted.contains(&i) {
                sub.add_node(name.clone());
            }
        }
        for &(a, b) in &self.edges {
            if wanted.contains(&a) && wanted.contains(&b) {
                sub.add_edge(self.nodes[a].clone(), self.nodes[b].clone());
            }
        }
        sub
    }

    pub fn from_document(doc: &GraphDocument) -> Result<Self> {
        let mut graph = Self::new();
        for node in &doc.nodes {
            graph.add_node(node.clone());
        }
        for KanjiEdge { from, to } in doc.edge_pairs()? {
            graph.add_edge(from, to);
        }
        Ok(graph)
    }

    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self.nodes.clone(),
            edges: self
                .edges()
                .map(|(a, b)| vec![a.to_string(), b.to_string()])
                .collect(),
        }
    }

    pub fn from_yaml_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: GraphDocument = serde_yaml::from_reader(reader)?;
        Self::from_document(&doc)
    }

    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let graph = Self::from_yaml_reader(BufReader::new(file))?;
        info!(
            "Loaded kanji graph from {:?}: {} nodes, {} edges",
            path,
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.to_document())?)
    }

    fn names(&self, ids: &[usize]) -> Vec<&str> {
        ids.iter().map(|&i| self.nodes[i].as_str()).collect()
    }
}
