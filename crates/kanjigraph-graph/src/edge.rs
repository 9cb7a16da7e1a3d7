use kanjigraph_core::{Kanji, KanjiGraphError, Result};
use serde::{Deserialize, Serialize};

/// Directed edge: `from` is built from `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KanjiEdge {
    pub from: Kanji,
    pub to: Kanji,
}

impl KanjiEdge {
    pub fn new(from: impl Into<Kanji>, to: impl Into<Kanji>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// On-disk layout of a graph file.
///
/// ```yaml
/// nodes: [口]
/// edges:
///   - [品, 口]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<Kanji>,
    #[serde(default)]
    pub edges: Vec<Vec<Kanji>>,
}

impl GraphDocument {
    pub fn edge_pairs(&self) -> Result<Vec<KanjiEdge>> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, pair)| match pair.as_slice() {
                [from, to] => Ok(KanjiEdge::new(from.clone(), to.clone())),
                other => Err(KanjiGraphError::Parse(format!(
                    "edge #{} must have exactly two endpoints, got {}",
                    i,
                    other.len()
                ))),
            })
            .collect()
    }
}
