// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

/* Golden end-to-end counts for small factors. The factor 1 and 2 runs
   complete the path base directly; factors 3 and 4 each visit two
   predecorations. These values pin down the counting conventions
   (completions vs. decorations) as well as the search itself. */

use deco_search::search::{run, SearchConfig};
use deco_search::state::Counter;
use std::io::Read;

fn counts(factor: usize) -> (u64, u64) {
    let config = SearchConfig::new(factor);
    let mut sink = Vec::new();
    let stats = run(&config, &mut sink).expect("writing to a buffer cannot fail");
    (
        stats.get(Counter::Predecorations),
        stats.get(Counter::Completions),
    )
}

#[test]
fn test_factor_1() {
    assert_eq!(counts(1), (1, 1));
}

#[test]
fn test_factor_2() {
    assert_eq!(counts(2), (1, 1));
}

#[test]
fn test_factor_3() {
    assert_eq!(counts(3), (2, 2));
}

#[test]
fn test_factor_4() {
    assert_eq!(counts(4), (2, 3));
}

#[test]
fn test_small_factors_produce_output() {
    for factor in 5..=8 {
        let (predecorations, completions) = counts(factor);
        assert!(predecorations > 0, "factor {} found nothing", factor);
        assert!(completions > 0, "factor {} completed nothing", factor);
    }
}

#[test]
fn test_lsp_filter_only_removes_completions() {
    for factor in 1..=6 {
        let unfiltered = counts(factor);

        let mut config = SearchConfig::new(factor);
        config.filter_lsp = true;
        let mut sink = Vec::new();
        let stats = run(&config, &mut sink).unwrap();

        // The filter gates completions, never the search itself.
        assert_eq!(stats.get(Counter::Predecorations), unfiltered.0);
        assert!(stats.get(Counter::Completions) <= unfiltered.1);
    }
}

#[test]
fn test_predeco_output_to_file() {
    let mut config = SearchConfig::new(4);
    config.predeco_output = true;

    let mut file = tempfile::tempfile().unwrap();
    let stats = run(&config, &mut file).unwrap();

    use std::io::Seek;
    file.rewind().unwrap();
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).unwrap();

    assert_eq!(&bytes[..15], b">>planar_code<<");
    // Both factor 4 predecorations have 4 vertices: count byte plus one
    // neighbor run (terminated by 0) per vertex.
    assert_eq!(stats.get(Counter::Predecorations), 2);
    let structures = &bytes[15..];
    assert_eq!(structures[0], 4);
    let zeros = structures.iter().filter(|&&b| b == 0).count();
    assert_eq!(zeros, 8);
}

#[test]
fn test_emitted_predecoration_codes_are_distinct() {
    let mut config = SearchConfig::new(6);
    config.predeco_output = true;
    let mut sink = Vec::new();
    let stats = run(&config, &mut sink).unwrap();

    // Split the stream back into structures and compare them pairwise.
    let mut structures: Vec<Vec<u8>> = Vec::new();
    let mut pos = 15;
    while pos < sink.len() {
        let order = sink[pos] as usize;
        let mut block = vec![sink[pos]];
        pos += 1;
        let mut zeros = 0;
        while zeros < order {
            if sink[pos] == 0 {
                zeros += 1;
            }
            block.push(sink[pos]);
            pos += 1;
        }
        structures.push(block);
    }
    assert_eq!(structures.len() as u64, stats.get(Counter::Predecorations));
    let unique: std::collections::HashSet<_> = structures.iter().collect();
    assert_eq!(unique.len(), structures.len());
}
