#![no_main]

use flatearth_engine::AdjacencyMatrix;
use flatearth_engine::route::{enumerate_covering_paths, find_covering_path, is_covering_path};
use libfuzzer_sys::fuzz_target;

// First byte picks the node count (1..=7), remaining bits fill the matrix
// row-major with the diagonal forced off.
fuzz_target!(|data: &[u8]| {
    let Some((&head, bits)) = data.split_first() else {
        return;
    };
    let n = usize::from(head % 7) + 1;
    let mut matrix = AdjacencyMatrix::with_nodes(n);
    for from in 0..n {
        for to in 0..n {
            let i = from * n + to;
            let set = bits.get(i / 8).is_some_and(|b| b & (1 << (i % 8)) != 0);
            if set && from != to {
                matrix.set_edge(from, to, true);
            }
        }
    }

    let paths = enumerate_covering_paths(&matrix, None, None);
    for path in &paths {
        assert!(is_covering_path(&matrix, path));
    }
    for start in 0..n {
        let from_start = paths.iter().any(|p| p[0] == start);
        let found = find_covering_path(&matrix, start, usize::MAX);
        assert_eq!(found.is_some(), from_start);
    }
});
