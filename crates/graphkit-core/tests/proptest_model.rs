use graphkit_core::{AnalysisLimits, Graph, GraphKind, GraphLibrary, GraphSource, UnionFind};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn arb_rows(max_n: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1..=max_n).prop_flat_map(|n| {
        prop::collection::vec(
            prop::collection::vec(prop_oneof![2 => Just(0.0), 1 => (-9i8..=9).prop_map(f64::from)], n),
            n,
        )
    })
}

fn graph_from(kind: GraphKind, rows: &[Vec<f64>]) -> Graph {
    let labels: Vec<String> = (0..rows.len()).map(|i| format!("v{i}")).collect();
    let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
    Graph::from_matrix(kind, true, &refs, rows).expect("square matrix")
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn union_find_agrees_with_naive_relabeling(
        n in 1usize..20,
        unions in prop::collection::vec((0usize..20, 0usize..20), 0..40),
    ) {
        let mut sets = UnionFind::new(n);
        let mut naive: Vec<usize> = (0..n).collect();
        for (a, b) in unions {
            let (a, b) = (a % n, b % n);
            let merged = sets.union(a, b);
            let (la, lb) = (naive[a], naive[b]);
            prop_assert_eq!(merged, la != lb);
            for label in &mut naive {
                if *label == lb {
                    *label = la;
                }
            }
        }
        for a in 0..n {
            for b in 0..n {
                prop_assert_eq!(sets.connected(a, b), naive[a] == naive[b]);
            }
        }
        let mut distinct = naive.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(sets.set_count(), distinct.len());
    }

    #[test]
    fn symmetrized_graphs_are_never_directed(rows in arb_rows(6)) {
        let g = graph_from(GraphKind::Directed, &rows);
        let sym = g.symmetrized();
        prop_assert!(!sym.is_directed());
        prop_assert!(sym.verify_symmetric().is_ok());
        prop_assert_eq!(sym.kind(), GraphKind::Undirected);
    }

    #[test]
    fn transpose_swaps_degrees(rows in arb_rows(6)) {
        let g = graph_from(GraphKind::Directed, &rows);
        let t = g.transpose();
        for v in 0..g.vertex_count() {
            prop_assert_eq!(g.in_degree(v), t.out_degree(v));
            prop_assert_eq!(g.out_degree(v), t.in_degree(v));
        }
        prop_assert_eq!(g.edge_count(), t.edge_count());
    }

    #[test]
    fn library_document_preserves_the_matrix(rows in arb_rows(6)) {
        let g = graph_from(GraphKind::Directed, &rows);
        let mut matrix = Map::new();
        for (i, row) in rows.iter().enumerate() {
            let cells: Map<String, Value> = row
                .iter()
                .enumerate()
                .map(|(j, &w)| (g.label(j).to_string(), json!(w)))
                .collect();
            matrix.insert(g.label(i).to_string(), Value::Object(cells));
        }
        let document = json!({
            "g": { "type": "directed", "has_weights": true, "adjacency_matrix": matrix }
        });

        let library = GraphLibrary::from_json_str(&document.to_string()).expect("valid library");
        let loaded = library
            .load_graph("g", &AnalysisLimits::default())
            .expect("loads");
        prop_assert_eq!(loaded, g);
    }
}
