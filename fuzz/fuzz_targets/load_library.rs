#![no_main]

use graphkit_analysis::{check_planarity, detect_cycles, eulerian_circuit, topological_sort};
use graphkit_core::{AnalysisLimits, GraphLibrary, GraphSource};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(library) = GraphLibrary::from_json_str(text) else {
        return;
    };

    let limits = AnalysisLimits {
        max_vertices: 64,
        planarity_max_vertices: 12,
        ..AnalysisLimits::default()
    };
    for name in library.graph_names() {
        if let Ok(graph) = library.load_graph(&name, &limits) {
            let _ = detect_cycles(&graph);
            let _ = topological_sort(&graph);
            let _ = eulerian_circuit(&graph);
            let _ = check_planarity(&graph, &limits);
        }
    }
});
