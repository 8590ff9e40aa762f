//! Known-topology regression tests.
//!
//! Each test loads a hand-written graph through the JSON library adapter
//! and checks analyzer output that was worked out by hand.

use graphkit_analysis::{
    CostMatrix, DominationVerdict, NonPlanarWitness, PathAlgorithm, PlanarityVerdict,
    check_dominating_set, check_planarity, detect_cycles, eulerian_circuit, is_connected,
    min_cost_assignment, minimum_spanning_tree, shortest_path, solve_assignment,
    strongly_connected_components, topological_sort,
};
use graphkit_core::{AnalysisLimits, DagViolation, Graph, GraphError, GraphLibrary, GraphSource};

const LIBRARY: &str = r#"{
    "cycle": {
        "type": "directed",
        "has_weights": false,
        "adjacency_matrix": {
            "A": { "A": 0, "B": 1, "C": 0 },
            "B": { "A": 0, "B": 0, "C": 1 },
            "C": { "A": 1, "B": 0, "C": 0 }
        }
    },
    "chain": {
        "type": "directed",
        "has_weights": false,
        "adjacency_matrix": {
            "A": { "B": 1 },
            "B": { "C": 1 },
            "C": {}
        }
    },
    "negative": {
        "type": "directed",
        "has_weights": true,
        "adjacency_matrix": {
            "A": { "B": 1 },
            "B": { "C": -3 },
            "C": { "A": 1 }
        }
    },
    "house": {
        "type": "undirected",
        "has_weights": true,
        "adjacency_matrix": {
            "A": { "B": 2, "C": 3 },
            "B": { "A": 2, "D": 4, "E": 1 },
            "C": { "A": 3, "D": 5, "E": 2 },
            "D": { "B": 4, "C": 5 },
            "E": { "B": 1, "C": 2 }
        }
    },
    "k33": {
        "type": "undirected",
        "has_weights": false,
        "adjacency_matrix": {
            "L1": { "R1": 1, "R2": 1, "R3": 1 },
            "L2": { "R1": 1, "R2": 1, "R3": 1 },
            "L3": { "R1": 1, "R2": 1, "R3": 1 },
            "R1": { "L1": 1, "L2": 1, "L3": 1 },
            "R2": { "L1": 1, "L2": 1, "L3": 1 },
            "R3": { "L1": 1, "L2": 1, "L3": 1 }
        }
    }
}"#;

fn load(name: &str) -> Graph {
    GraphLibrary::from_json_str(LIBRARY)
        .expect("valid library")
        .load_graph(name, &AnalysisLimits::default())
        .expect("graph loads")
}

#[test]
fn three_cycle_is_detected_and_refuses_ordering() {
    let g = load("cycle");
    let report = detect_cycles(&g);
    assert!(report.has_cycle());
    assert_eq!(report.cycle_roots, 3);
    assert_eq!(
        topological_sort(&g),
        Err(GraphError::NotADag(DagViolation::Cyclic))
    );
    assert_eq!(
        strongly_connected_components(&g).expect("directed"),
        vec![vec!["A", "C", "B"]]
    );
}

#[test]
fn three_cycle_is_eulerian() {
    let circuit = eulerian_circuit(&load("cycle")).expect("eulerian");
    assert_eq!(circuit.circuit, vec!["A", "B", "C", "A"]);
}

#[test]
fn chain_is_acyclic_and_ordered() {
    let g = load("chain");
    assert!(!detect_cycles(&g).has_cycle());
    assert_eq!(topological_sort(&g).expect("dag"), vec!["A", "B", "C"]);
}

#[test]
fn negative_cycle_is_reported_not_resolved() {
    let g = load("negative");
    let result = shortest_path(&g, "A", "C").expect("weighted");
    assert!(result.negative_cycle);
    assert_eq!(result.algorithm, PathAlgorithm::BellmanFord);
    assert!(result.path.is_none());
    assert!(result.cost.is_infinite() && result.cost < 0.0);
}

#[test]
fn house_spanning_tree_and_paths() {
    let g = load("house");
    assert!(is_connected(&g).expect("symmetric"));

    let tree = minimum_spanning_tree(&g).expect("connected");
    assert!((tree.total_weight - 9.0).abs() < 1e-9);
    assert_eq!(tree.edges.len(), 4);

    let result = shortest_path(&g, "A", "D").expect("weighted");
    assert_eq!(result.algorithm, PathAlgorithm::Dijkstra);
    assert!((result.cost - 6.0).abs() < 1e-9);
    assert_eq!(
        result.path,
        Some(vec!["A".to_string(), "B".to_string(), "D".to_string()])
    );
}

#[test]
fn house_domination() {
    let g = load("house");
    assert_eq!(
        check_dominating_set(&g, &["B", "C"]).expect("known"),
        DominationVerdict::MinimalDominating
    );
}

#[test]
fn k33_is_found_when_halves_line_up() {
    let verdict = check_planarity(&load("k33"), &AnalysisLimits::default()).expect("small");
    assert_eq!(
        verdict,
        PlanarityVerdict::NonPlanar {
            witness: NonPlanarWitness::K33 {
                left: vec!["L1".into(), "L2".into(), "L3".into()],
                right: vec!["R1".into(), "R2".into(), "R3".into()],
            }
        }
    );
}

#[test]
fn k33_positional_assignment_is_an_approximation() {
    let result = min_cost_assignment(&load("k33"), &AnalysisLimits::default()).expect("even");
    assert!(result.is_approximation());
    assert_eq!(result.pairs.len(), 3);
    assert!((result.total_cost - 3.0).abs() < 1e-9);
}

#[test]
fn three_by_three_assignment_costs_five() {
    // Enumerating all six permutations gives 6, 11, 5, 9, 7, 6.
    let matrix = CostMatrix::new(vec![
        vec![4.0, 1.0, 3.0],
        vec![2.0, 0.0, 5.0],
        vec![3.0, 2.0, 2.0],
    ])
    .expect("square");
    let solved = solve_assignment(&matrix).expect("finite");
    assert!((solved.total_cost - 5.0).abs() < 1e-9);
}
