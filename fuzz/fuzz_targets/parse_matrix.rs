#![no_main]

use flatearth_engine::AdjacencyMatrix;
use flatearth_engine::graph::classify::analyze;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(matrix) = AdjacencyMatrix::parse(text) else {
        return;
    };

    let analysis = analyze(&matrix);
    assert_eq!(analysis.nodes.len(), matrix.node_count());

    // Display output must parse back to the same matrix.
    let reparsed = AdjacencyMatrix::parse(&matrix.to_string()).expect("display output parses");
    assert_eq!(reparsed, matrix);
});
