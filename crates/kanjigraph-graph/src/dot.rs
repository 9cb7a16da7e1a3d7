use crate::KanjiGraph;
use rustc_hash::FxHashSet;
use std::fmt::Write;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Renders the graph in Graphviz DOT syntax.
pub fn to_dot(graph: &KanjiGraph) -> String {
    let mut out = String::from("digraph g {\n");
    let mut linked: FxHashSet<&str> = FxHashSet::default();
    for (from, to) in graph.edges() {
        linked.insert(from);
        linked.insert(to);
        let _ = writeln!(out, "{} -> {}", quote(from), quote(to));
    }
    for node in graph.nodes().filter(|n| !linked.contains(n)) {
        let _ = writeln!(out, "{}", quote(node));
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_edges_then_isolated_nodes() {
        let mut g = KanjiGraph::from_edges([("明", "日"), ("明", "月")]);
        g.add_node("\"q\"");
        let dot = to_dot(&g);
        assert_eq!(
            dot,
            "digraph g {\n\"明\" -> \"日\"\n\"明\" -> \"月\"\n\"\\\"q\\\"\"\n}\n"
        );
    }
}
