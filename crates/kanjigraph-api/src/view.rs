//! Node/link JSON shape consumed by force-directed graph front ends.

use kanjigraph_core::Kanji;
use kanjigraph_dict::HeisigTable;
use kanjigraph_graph::{EgoNetwork, KanjiGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView {
    pub kanji: Kanji,
    pub keyword: Option<String>,
    /// Stable node key for the front end; the kanji itself
    pub id: Kanji,
}

/// Edge between two positions of [`GraphView::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkView {
    pub source: usize,
    pub target: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphView {
    /// Position of the focused kanji in `nodes`
    pub current_kanji: Option<usize>,
    /// Traversal depth, absent for lesson views
    pub depth: Option<usize>,
    pub nodes: Vec<NodeView>,
    pub links: Vec<LinkView>,
}

impl GraphView {
    pub fn new(graph: &KanjiGraph, center: &str, depth: Option<usize>, heisig: &HeisigTable) -> Self {
        let index: HashMap<&str, usize> = graph.nodes().enumerate().map(|(i, k)| (k, i)).collect();

        let nodes = graph
            .nodes()
            .map(|kanji| NodeView {
                kanji: kanji.to_string(),
                keyword: heisig.keyword(kanji).map(str::to_string),
                id: kanji.to_string(),
            })
            .collect();
        let links = graph
            .edges()
            .filter_map(|(from, to)| {
                Some(LinkView {
                    source: *index.get(from)?,
                    target: *index.get(to)?,
                })
            })
            .collect();

        Self {
            current_kanji: index.get(center).copied(),
            depth,
            nodes,
            links,
        }
    }

    pub fn from_ego(ego: &EgoNetwork, heisig: &HeisigTable) -> Self {
        Self::new(&ego.graph, &ego.center, Some(ego.depth), heisig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_point_at_node_positions() {
        let g = KanjiGraph::from_edges([("語", "言"), ("語", "吾"), ("吾", "口")]);
        let heisig = HeisigTable::parse("banner\nkanji:keyword5th-ed\n語:language\n").unwrap();
        let view = GraphView::new(&g, "吾", Some(3), &heisig);

        assert_eq!(view.current_kanji, Some(2));
        assert_eq!(view.nodes[0].keyword.as_deref(), Some("language"));
        assert_eq!(view.nodes[1].keyword, None);
        assert_eq!(
            view.links,
            vec![
                LinkView { source: 0, target: 1 },
                LinkView { source: 0, target: 2 },
                LinkView { source: 2, target: 3 },
            ]
        );

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["nodes"][1]["keyword"], serde_json::Value::Null);
        assert_eq!(json["nodes"][0]["id"], "語");
        assert_eq!(json["nodes"][2]["id"], "吾");
    }
}
