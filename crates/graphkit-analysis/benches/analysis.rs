use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use graphkit_analysis::{
    detect_cycles, min_cost_assignment, minimum_spanning_forest, shortest_path,
    strongly_connected_components,
};
use graphkit_core::{AnalysisLimits, Graph, GraphKind};

const SIZES: [usize; 3] = [50, 200, 400];

/// Deterministic sparse graph: each vertex gets ~4 outgoing edges.
fn generate(n: usize, kind: GraphKind, seed: u64) -> Graph {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        state >> 33
    };

    let mut rows = vec![vec![0.0; n]; n];
    for (u, row) in rows.iter_mut().enumerate() {
        for _ in 0..4 {
            let v = usize::try_from(next()).unwrap_or(0) % n;
            if v != u {
                row[v] = f64::from(u8::try_from(next() % 9).unwrap_or(0) + 1);
            }
        }
    }
    if kind == GraphKind::Undirected {
        for u in 0..n {
            for v in 0..u {
                let w = rows[u][v].max(rows[v][u]);
                rows[u][v] = w;
                rows[v][u] = w;
            }
        }
    }

    let labels: Vec<String> = (0..n).map(|i| format!("v{i}")).collect();
    let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
    Graph::from_matrix(kind, true, &refs, &rows).expect("generated matrix is square")
}

fn bench_traversals(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis.traversal");
    for n in SIZES {
        let g = generate(n, GraphKind::Directed, 0xC0FFEE);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("cycles", n), &g, |b, g| {
            b.iter(|| black_box(detect_cycles(g).cycle_roots));
        });
        group.bench_with_input(BenchmarkId::new("scc", n), &g, |b, g| {
            b.iter(|| black_box(strongly_connected_components(g).map(|c| c.len())));
        });
    }
    group.finish();
}

fn bench_weighted(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis.weighted");
    for n in SIZES {
        let directed = generate(n, GraphKind::Directed, 0x5EED);
        let undirected = generate(n, GraphKind::Undirected, 0x5EED);
        let target = format!("v{}", n - 1);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("shortest_path", n), &directed, |b, g| {
            b.iter(|| black_box(shortest_path(g, "v0", &target).map(|r| r.cost)));
        });
        group.bench_with_input(BenchmarkId::new("kruskal", n), &undirected, |b, g| {
            b.iter(|| black_box(minimum_spanning_forest(g).map(|f| f.total_weight)));
        });
        group.bench_with_input(BenchmarkId::new("assignment", n), &undirected, |b, g| {
            b.iter(|| black_box(min_cost_assignment(g, &AnalysisLimits::default()).is_ok()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_traversals, bench_weighted);
criterion_main!(benches);
