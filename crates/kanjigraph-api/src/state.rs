use kanjigraph_core::{Result, Settings};
use kanjigraph_dict::Dictionaries;
use kanjigraph_graph::KanjiGraph;
use std::sync::Arc;
use tracing::info;

/// Everything a request needs. Loaded once; never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<KanjiGraph>,
    pub dicts: Arc<Dictionaries>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Reads the graph and dictionary files named in `settings.data`.
    /// The graph file is required; missing dictionaries load as empty tables.
    pub fn load(settings: Settings) -> Result<Self> {
        let graph = KanjiGraph::from_yaml_path(settings.data.graph_path())?;
        let dicts = Dictionaries::load(&settings.data)?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "application state loaded"
        );
        Ok(Self::from_parts(graph, dicts, settings))
    }

    pub fn from_parts(graph: KanjiGraph, dicts: Dictionaries, settings: Settings) -> Self {
        Self {
            graph: Arc::new(graph),
            dicts: Arc::new(dicts),
            settings: Arc::new(settings),
        }
    }
}
