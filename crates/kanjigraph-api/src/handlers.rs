use crate::{ApiError, ApiResult, AppState, GraphView};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use kanjigraph_core::{Direction, Kanji};
use kanjigraph_dict::{QueryHit, RadicalLabel};
use kanjigraph_graph::{adaptive_subgraph, hub, lineage as lineage_of, AdaptivePolicy, Lineage};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub nodes: usize,
    pub edges: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubgraphParams {
    pub kanji: Option<String>,
    pub threshold: Option<usize>,
    pub direction: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KanjiParams {
    pub kanji: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct QueryResponse {
    pub r: Vec<QueryHit>,
}

#[derive(Serialize)]
pub struct DecomposeResponse {
    pub kanji: Kanji,
    pub parts: Vec<Kanji>,
    pub radicals: Vec<RadicalLabel>,
}

impl AppState {
    /// The requested kanji, or the configured default. Heisig keywords are
    /// accepted in place of the character.
    fn resolve_kanji(&self, requested: Option<&str>) -> Kanji {
        let raw = requested
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(&self.settings.default_kanji);
        self.dicts.heisig.resolve(raw).to_string()
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        nodes: state.graph.node_count(),
        edges: state.graph.edge_count(),
    })
}

pub async fn subgraph(
    State(state): State<AppState>,
    Query(params): Query<SubgraphParams>,
) -> ApiResult<Json<GraphView>> {
    let kanji = state.resolve_kanji(params.kanji.as_deref());

    let mut policy = AdaptivePolicy::from(&state.settings.subgraph);
    if let Some(threshold) = params.threshold {
        policy = policy.with_threshold(threshold);
    }
    if let Some(direction) = params.direction.as_deref() {
        policy = policy.with_direction(direction.parse::<Direction>()?);
    }

    let ego = adaptive_subgraph(&state.graph, &kanji, &policy)?;
    debug!(%kanji, depth = ego.depth, nodes = ego.len(), "subgraph");
    Ok(Json(GraphView::from_ego(&ego, &state.dicts.heisig)))
}

pub async fn lesson(
    State(state): State<AppState>,
    Path(lesson): Path<String>,
) -> ApiResult<Json<GraphView>> {
    let members = state.dicts.heisig.lesson(&lesson);
    let sub = state.graph.subgraph(members);
    let center = hub(&sub).ok_or_else(|| ApiError::NotFound(format!("lesson {}", lesson)))?;
    debug!(%lesson, %center, nodes = sub.node_count(), "lesson");
    Ok(Json(GraphView::new(&sub, &center, None, &state.dicts.heisig)))
}

pub async fn lineage(
    State(state): State<AppState>,
    Query(params): Query<KanjiParams>,
) -> ApiResult<Json<Lineage>> {
    let kanji = state.resolve_kanji(params.kanji.as_deref());
    Ok(Json(lineage_of(&state.graph, &kanji)?))
}

pub async fn query(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<QueryResponse>> {
    let q = params.q.unwrap_or_default();
    if q.trim().is_empty() {
        return Err(ApiError::BadRequest("query parameter q must not be empty".into()));
    }
    let r = state.dicts.query(&q, state.settings.search.max_combinations);
    Ok(Json(QueryResponse { r }))
}

pub async fn decompose(
    State(state): State<AppState>,
    Path(kanji): Path<String>,
) -> Json<DecomposeResponse> {
    Json(DecomposeResponse {
        parts: state.dicts.chise.decompose(&kanji),
        radicals: state.dicts.radical_labels(&kanji),
        kanji,
    })
}
