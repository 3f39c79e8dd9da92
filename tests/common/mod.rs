// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Shared helpers for integration tests.

use deco_search::planemap::PlaneMap;

/// Structural equality up to the parts a reduction is allowed to
/// perturb: arena contents and rotation links must match exactly,
/// degrees must match, and the degree buckets must hold the same vertex
/// sets (their element order is not significant).
pub fn assert_maps_equivalent(actual: &PlaneMap, expected: &PlaneMap) {
    assert_eq!(actual.order(), expected.order());
    assert_eq!(actual.size(), expected.size());
    for e in 0..expected.size() {
        assert_eq!(actual.edge(e), expected.edge(e), "half-edge {} differs", e);
    }
    for vertex in 0..expected.order() {
        assert_eq!(actual.degree(vertex), expected.degree(vertex));
    }
    let buckets = |map: &PlaneMap| {
        let mut d1: Vec<_> = map.deg1.as_slice().to_vec();
        let mut d2: Vec<_> = map.deg2.as_slice().to_vec();
        d1.sort_unstable();
        d2.sort_unstable();
        (d1, d2)
    };
    assert_eq!(buckets(actual), buckets(expected));
}
