use crate::KanjiGraph;
use kanjigraph_core::{Direction, Kanji, KanjiGraphError, Result, SubgraphConfig};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::debug;

/// Stopping policy for [`adaptive_subgraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptivePolicy {
    pub min_depth: usize,
    pub max_depth: usize,
    /// A depth is accepted once the neighbourhood has fewer nodes than this
    pub threshold: usize,
    pub direction: Direction,
}

impl Default for AdaptivePolicy {
    fn default() -> Self {
        Self::from(&SubgraphConfig::default())
    }
}

impl From<&SubgraphConfig> for AdaptivePolicy {
    fn from(cfg: &SubgraphConfig) -> Self {
        Self {
            min_depth: cfg.min_depth,
            max_depth: cfg.max_depth,
            threshold: cfg.threshold,
            direction: cfg.direction,
        }
    }
}

impl AdaptivePolicy {
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold == 0 {
            return Err(KanjiGraphError::InvalidOperation(
                "threshold must be > 0".into(),
            ));
        }
        if self.min_depth > self.max_depth {
            return Err(KanjiGraphError::InvalidOperation(format!(
                "min_depth {} exceeds max_depth {}",
                self.min_depth, self.max_depth
            )));
        }
        Ok(())
    }
}

/// Neighbourhood extracted around one kanji.
#[derive(Debug, Clone)]
pub struct EgoNetwork {
    pub center: Kanji,
    /// Depth that satisfied the policy (or the minimum depth if none did)
    pub depth: usize,
    pub graph: KanjiGraph,
}

impl EgoNetwork {
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Position of the center in the subgraph's node order.
    pub fn center_index(&self) -> Option<usize> {
        self.graph.nodes().position(|k| k == self.center)
    }
}

/// Collects `start` and every node fewer than `depth` hops away along `direction`.
///
/// `depth` 0 and 1 both yield just `start`; depth 2 adds its immediate
/// neighbours. Nodes are returned in breadth-first discovery order.
pub fn search(graph: &KanjiGraph, start: &str, depth: usize, direction: Direction) -> Vec<Kanji> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut order: Vec<Kanji> = vec![start.to_string()];
    let mut queue: VecDeque<(&str, usize)> = VecDeque::new();

    seen.insert(start);
    queue.push_back((start, 0));

    while let Some((current, hops)) = queue.pop_front() {
        if hops + 1 >= depth {
            continue;
        }
        for next in graph.neighbors(current, direction) {
            if seen.insert(next) {
                order.push(next.to_string());
                queue.push_back((next, hops + 1));
            }
        }
    }

    order
}

/// Tries depths from `max_depth` down to `min_depth` and keeps the first
/// neighbourhood smaller than the threshold.
pub fn adaptive_subgraph(
    graph: &KanjiGraph,
    kanji: &str,
    policy: &AdaptivePolicy,
) -> Result<EgoNetwork> {
    policy.validate()?;
    if !graph.contains(kanji) {
        return Err(KanjiGraphError::NodeNotFound(kanji.to_string()));
    }

    let mut chosen = (policy.min_depth, Vec::new());
    for depth in (policy.min_depth..=policy.max_depth).rev() {
        let seen = search(graph, kanji, depth, policy.direction);
        debug!(kanji, depth, size = seen.len(), "ego network attempt");
        let fits = seen.len() < policy.threshold;
        chosen = (depth, seen);
        if fits {
            break;
        }
    }

    let (depth, seen) = chosen;
    debug!(kanji, depth, ?seen, "ego network selected");
    Ok(EgoNetwork {
        center: kanji.to_string(),
        depth,
        graph: graph.subgraph(seen.iter().map(String::as_str)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// a -> b -> c -> d -> e, plus a fan of leaves under b.
    fn chain_with_fan(leaves: usize) -> KanjiGraph {
        let mut g = KanjiGraph::from_edges([("a", "b"), ("b", "c"), ("c", "d"), ("d", "e")]);
        for i in 0..leaves {
            g.add_edge("b", format!("leaf{}", i));
        }
        g
    }

    #[test]
    fn depth_counts_nodes_strictly_inside_radius() {
        let g = chain_with_fan(0);
        assert_eq!(search(&g, "a", 0, Direction::Outgoing), vec!["a"]);
        assert_eq!(search(&g, "a", 1, Direction::Outgoing), vec!["a"]);
        assert_eq!(search(&g, "a", 2, Direction::Outgoing), vec!["a", "b"]);
        assert_eq!(search(&g, "a", 4, Direction::Outgoing), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn direction_controls_reachability() {
        let g = chain_with_fan(0);
        assert_eq!(search(&g, "c", 3, Direction::Incoming), vec!["c", "b", "a"]);
        assert_eq!(search(&g, "c", 2, Direction::Both), vec!["c", "b", "d"]);
    }

    #[test]
    fn unknown_start_yields_only_itself() {
        let g = chain_with_fan(2);
        assert_eq!(search(&g, "zz", 3, Direction::Both), vec!["zz"]);
    }

    #[test]
    fn shortest_hop_count_wins_over_discovery_path() {
        // a reaches d both directly and via a long detour; the direct hop must count.
        let g = KanjiGraph::from_edges([("a", "b"), ("b", "c"), ("c", "d"), ("a", "d"), ("d", "x")]);
        let seen = search(&g, "a", 3, Direction::Outgoing);
        assert!(seen.contains(&"x".to_string()));
    }

    #[test]
    fn adaptive_keeps_largest_depth_under_threshold() {
        let g = chain_with_fan(0);
        let ego = adaptive_subgraph(&g, "a", &AdaptivePolicy::default()).unwrap();
        assert_eq!(ego.depth, 4);
        assert_eq!(ego.len(), 4);
        assert_eq!(ego.center_index(), Some(0));
    }

    #[test]
    fn adaptive_shrinks_when_neighbourhood_is_crowded() {
        let g = chain_with_fan(30);
        let ego = adaptive_subgraph(&g, "a", &AdaptivePolicy::default()).unwrap();
        // depth 4 and 3 reach the fan under b; depth 2 is only {a, b}.
        assert_eq!(ego.depth, 2);
        assert_eq!(ego.len(), 2);
        assert_eq!(ego.graph.edge_count(), 1);
    }

    #[test]
    fn adaptive_falls_back_to_min_depth_when_nothing_fits() {
        let mut g = KanjiGraph::new();
        for i in 0..25 {
            g.add_edge("hub", format!("n{}", i));
        }
        let ego = adaptive_subgraph(&g, "hub", &AdaptivePolicy::default()).unwrap();
        assert_eq!(ego.depth, 2);
        assert_eq!(ego.len(), 26);
    }

    #[test]
    fn unknown_kanji_is_not_found() {
        let g = chain_with_fan(0);
        let err = adaptive_subgraph(&g, "z", &AdaptivePolicy::default()).unwrap_err();
        assert!(matches!(err, KanjiGraphError::NodeNotFound(_)));
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let g = chain_with_fan(0);
        let policy = AdaptivePolicy::default().with_threshold(0);
        assert!(matches!(
            adaptive_subgraph(&g, "a", &policy),
            Err(KanjiGraphError::InvalidOperation(_))
        ));
    }
}
