use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kanjigraph_core::Direction;
use kanjigraph_graph::{adaptive_subgraph, search, AdaptivePolicy, KanjiGraph};
use std::hint::black_box;
use std::time::Duration;

/// Random component graph: every node points at a few earlier nodes.
fn create_component_graph(node_count: usize, fan_out: usize) -> KanjiGraph {
    let mut graph = KanjiGraph::new();
    graph.add_node("k0");
    for i in 1..node_count {
        for _ in 0..fan_out {
            let target = fastrand::usize(..i);
            graph.add_edge(format!("k{}", i), format!("k{}", target));
        }
    }
    graph
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.measurement_time(Duration::from_secs(5));

    for size in [1_000, 5_000, 10_000].iter() {
        let graph = create_component_graph(*size, 3);
        let start = format!("k{}", size - 1);
        group.bench_with_input(BenchmarkId::new("both_depth_3", size), size, |b, _| {
            b.iter(|| black_box(search(&graph, &start, 3, Direction::Both)))
        });
    }
    group.finish();
}

fn bench_adaptive(c: &mut Criterion) {
    let mut group = c.benchmark_group("adaptive_subgraph");
    group.measurement_time(Duration::from_secs(5));

    for size in [1_000, 5_000, 10_000].iter() {
        let graph = create_component_graph(*size, 3);
        let start = format!("k{}", size / 2);
        let policy = AdaptivePolicy::default().with_direction(Direction::Both);
        group.bench_with_input(BenchmarkId::new("default_policy", size), size, |b, _| {
            b.iter(|| black_box(adaptive_subgraph(&graph, &start, &policy).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search, bench_adaptive);
criterion_main!(benches);
