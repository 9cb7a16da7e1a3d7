use crate::KanjiGraph;
use kanjigraph_core::{Kanji, KanjiGraphError, Result};
use serde::{Deserialize, Serialize};

/// One-hop navigation around a kanji, split into immediate and indirect relatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
    /// Compounds that contain the kanji through one of its parents as well
    pub ancestors: Vec<Kanji>,
    pub parents: Vec<Kanji>,
    pub kanji: Kanji,
    pub children: Vec<Kanji>,
    /// Components also reachable through one of the children
    pub descendants: Vec<Kanji>,
}

/// Compounds built directly from `kanji`.
pub fn ancestors<'g>(graph: &'g KanjiGraph, kanji: &str) -> Vec<&'g str> {
    graph.predecessors(kanji)
}

/// Components `kanji` is built from.
pub fn descendants<'g>(graph: &'g KanjiGraph, kanji: &str) -> Vec<&'g str> {
    graph.successors(kanji)
}

/// Ancestors that are not themselves built into another ancestor.
pub fn parents<'g>(graph: &'g KanjiGraph, kanji: &str) -> Vec<&'g str> {
    let ancestors = ancestors(graph, kanji);
    ancestors
        .iter()
        .copied()
        .filter(|&a| !ancestors.iter().any(|&d| d != a && graph.has_edge(a, d)))
        .collect()
}

/// Descendants that no other descendant is built from.
pub fn children<'g>(graph: &'g KanjiGraph, kanji: &str) -> Vec<&'g str> {
    let descendants = descendants(graph, kanji);
    descendants
        .iter()
        .copied()
        .filter(|&c| !descendants.iter().any(|&a| a != c && graph.has_edge(a, c)))
        .collect()
}

pub fn lineage(graph: &KanjiGraph, kanji: &str) -> Result<Lineage> {
    if !graph.contains(kanji) {
        return Err(KanjiGraphError::NodeNotFound(kanji.to_string()));
    }
    let parents = parents(graph, kanji);
    let children = children(graph, kanji);
    let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    Ok(Lineage {
        ancestors: ancestors(graph, kanji)
            .into_iter()
            .filter(|a| !parents.contains(a))
            .map(str::to_string)
            .collect(),
        parents: owned(&parents),
        kanji: kanji.to_string(),
        children: owned(&children),
        descendants: descendants(graph, kanji)
            .into_iter()
            .filter(|d| !children.contains(d))
            .map(str::to_string)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // 語 is built from 言 and 吾, 吾 from 五 and 口; the graph is transitively
    // closed, so 語 also points at 五 and 口 directly.
    fn closed() -> KanjiGraph {
        KanjiGraph::from_edges([
            ("語", "言"),
            ("語", "吾"),
            ("語", "五"),
            ("語", "口"),
            ("吾", "五"),
            ("吾", "口"),
            ("悟", "吾"),
            ("悟", "五"),
            ("悟", "口"),
        ])
    }

    #[test]
    fn children_skip_components_reached_through_siblings() {
        let g = closed();
        assert_eq!(children(&g, "語"), vec!["言", "吾"]);
    }

    #[test]
    fn parents_skip_compounds_reached_through_siblings() {
        let g = closed();
        assert_eq!(parents(&g, "口"), vec!["吾"]);
        assert_eq!(parents(&g, "吾"), vec!["語", "悟"]);
    }

    #[test]
    fn lineage_partitions_neighbours() {
        let g = closed();
        let l = lineage(&g, "吾").unwrap();
        assert_eq!(l.parents, vec!["語", "悟"]);
        assert!(l.ancestors.is_empty());
        assert_eq!(l.children, vec!["五", "口"]);
        assert!(l.descendants.is_empty());

        let l = lineage(&g, "口").unwrap();
        assert_eq!(l.parents, vec!["吾"]);
        assert_eq!(l.ancestors, vec!["語", "悟"]);
    }

    #[test]
    fn lineage_of_unknown_kanji_fails() {
        assert!(lineage(&closed(), "森").is_err());
    }
}
