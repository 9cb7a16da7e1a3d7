use crate::KanjiGraph;
use kanjigraph_core::Kanji;

/// Degree centrality, `(in + out) / (n - 1)`, in node order.
pub fn degree_centrality(graph: &KanjiGraph) -> Vec<(Kanji, f64)> {
    let n = graph.node_count();
    if n <= 1 {
        return graph.nodes().map(|k| (k.to_string(), 1.0)).collect();
    }
    let scale = 1.0 / (n - 1) as f64;
    graph
        .nodes()
        .map(|k| {
            let degree = graph.in_degree(k) + graph.out_degree(k);
            (k.to_string(), degree as f64 * scale)
        })
        .collect()
}

/// First node with maximal degree centrality.
pub fn hub(graph: &KanjiGraph) -> Option<Kanji> {
    let mut best: Option<(Kanji, f64)> = None;
    for (kanji, score) in degree_centrality(graph) {
        match &best {
            Some((_, top)) if score <= *top => {}
            _ => best = Some((kanji, score)),
        }
    }
    best.map(|(k, _)| k)
}
