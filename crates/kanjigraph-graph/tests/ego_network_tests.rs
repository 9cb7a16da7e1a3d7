use kanjigraph_core::{Direction, SubgraphConfig};
use kanjigraph_graph::{adaptive_subgraph, hub, lineage, to_dot, AdaptivePolicy, KanjiGraph};
use std::io::Write;
use tempfile::NamedTempFile;

const GRAPH_YAML: &str = r#"
nodes: [一]
edges:
  - [露, 雨]
  - [露, 路]
  - [路, 足]
  - [路, 各]
  - [各, 夂]
  - [各, 口]
  - [足, 口]
  - [雷, 雨]
  - [雷, 田]
"#;

fn load() -> KanjiGraph {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(GRAPH_YAML.as_bytes()).unwrap();
    KanjiGraph::from_yaml_path(file.path()).unwrap()
}

#[test]
fn test_graph_file_loads_nodes_and_edges() {
    let g = load();
    assert_eq!(g.node_count(), 10);
    assert_eq!(g.edge_count(), 9);
    assert!(g.contains("一"));
    assert_eq!(g.nodes().next(), Some("一"));
}

#[test]
fn test_outgoing_ego_network_collects_components() {
    let g = load();
    let ego = adaptive_subgraph(&g, "露", &AdaptivePolicy::default()).unwrap();
    assert_eq!(ego.depth, 4);
    let mut nodes: Vec<&str> = ego.graph.nodes().collect();
    nodes.sort();
    let mut expected = vec!["露", "雨", "路", "足", "各", "夂", "口"];
    expected.sort();
    assert_eq!(nodes, expected);
    assert!(!ego.graph.contains("雷"));
}

#[test]
fn test_undirected_ego_network_reaches_siblings() {
    let g = load();
    let policy = AdaptivePolicy::from(&SubgraphConfig {
        direction: Direction::Both,
        ..SubgraphConfig::default()
    });
    let ego = adaptive_subgraph(&g, "露", &policy).unwrap();
    assert!(ego.graph.contains("雷"));
    assert!(ego.graph.has_edge("雷", "雨"));
}

#[test]
fn test_tight_threshold_forces_smaller_depth() {
    let g = load();
    let policy = AdaptivePolicy::default().with_threshold(4);
    let ego = adaptive_subgraph(&g, "露", &policy).unwrap();
    assert_eq!(ego.depth, 2);
    assert_eq!(ego.len(), 3);
    assert_eq!(ego.center_index(), Some(0));
}

#[test]
fn test_lineage_and_hub_over_loaded_graph() {
    let g = load();
    let l = lineage(&g, "口").unwrap();
    assert_eq!(l.parents, vec!["各", "足"]);
    assert!(l.children.is_empty());

    let lesson = g.subgraph(["路", "足", "各", "口"]);
    assert_eq!(hub(&lesson).as_deref(), Some("路"));
}

#[test]
fn test_ego_network_exports_to_dot() {
    let g = load();
    let ego = adaptive_subgraph(&g, "雷", &AdaptivePolicy::default()).unwrap();
    let dot = to_dot(&ego.graph);
    assert!(dot.starts_with("digraph g {"));
    assert!(dot.contains("\"雷\" -> \"田\""));
}
