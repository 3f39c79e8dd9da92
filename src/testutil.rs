// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Shared helpers for unit tests.

use crate::planemap::{EdgeId, PlaneMap};

/// The 2-path v0 - v1 - v2, the smallest seed structure.
///
/// Returns the map plus the forward half-edges (v0 -> v1, v1 -> v2).
pub(crate) fn path_base() -> (PlaneMap, EdgeId, EdgeId) {
    let mut map = PlaneMap::new();
    let v0 = map.create_vertex();
    let v1 = map.create_vertex();
    let v2 = map.create_vertex();
    let e0 = map.create_edge(v0, v1);
    let i0 = map.inverse(e0);
    let e1 = map.create_edge(v1, v2);
    let i1 = map.inverse(e1);

    map.set_next(e0, e0);
    map.set_next(i0, e1);
    map.set_next(e1, i0);
    map.set_next(i1, i1);
    (map, e0, e1)
}

/// Structural equality up to the parts a reduction is allowed to perturb:
/// arena contents and rotation links must match exactly, degrees must
/// match, and the degree buckets must hold the same vertex sets (their
/// element order is not significant).
pub(crate) fn assert_maps_equivalent(actual: &PlaneMap, expected: &PlaneMap) {
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
