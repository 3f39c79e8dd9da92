// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The three seed structures the augmentation starts from.
//!
//! Each base is laid down on top of the previous one in the same arena,
//! so the builders must run in order and rely on the ids the earlier
//! bases created. The driver runs the full search after seeding each
//! base; which bases are seeded depends on the target factor.

use crate::planemap::{EdgeId, PlaneMap};

/// The 2-path v0 - v1 - v2. Returns the root half-edge used as the
/// provisional canonical representative for every base.
pub fn first_base(map: &mut PlaneMap) -> EdgeId {
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
    e0
}

/// Close the path into the 4-cycle v0 - v1 - v2 - v3. Used for factors
/// of at least 5.
pub fn second_base(map: &mut PlaneMap) {
    debug_assert_eq!(map.order(), 3);
    let (e0, i1) = (0, 3);

    let v3 = map.create_vertex();
    let e2 = map.create_edge(0, v3);
    let i2 = map.inverse(e2);
    let e3 = map.create_edge(v3, 2);
    let i3 = map.inverse(e3);

    map.set_next(e2, e0);
    map.set_next(e0, e2);
    map.set_next(i3, i1);
    map.set_next(i1, i3);
    map.set_next(e3, i2);
    map.set_next(i2, e3);
}

/// Grow the 4-cycle into the cube quadrangulation. Used for factors of
/// at least 11.
pub fn third_base(map: &mut PlaneMap) {
    debug_assert_eq!(map.order(), 4);
    let (e0, i0, e1, i1) = (0, 1, 2, 3);
    let (e2, i2, e3, i3) = (4, 5, 6, 7);

    let v4 = map.create_vertex();
    let v5 = map.create_vertex();
    let v6 = map.create_vertex();
    let v7 = map.create_vertex();

    let e4 = map.create_edge(0, v4);
    let i4 = map.inverse(e4);
    let e5 = map.create_edge(1, v5);
    let i5 = map.inverse(e5);
    let e6 = map.create_edge(2, v6);
    let i6 = map.inverse(e6);
    let e7 = map.create_edge(3, v7);
    let i7 = map.inverse(e7);
    let e8 = map.create_edge(v4, v5);
    let i8 = map.inverse(e8);
    let e9 = map.create_edge(v5, v6);
    let i9 = map.inverse(e9);
    let e10 = map.create_edge(v4, v7);
    let i10 = map.inverse(e10);
    let e11 = map.create_edge(v7, v6);
    let i11 = map.inverse(e11);

    map.set_next(e4, e0);
    map.set_next(e2, e4);
    map.set_next(e5, e1);
    map.set_next(i0, e5);
    map.set_next(e6, i3);
    map.set_next(i1, e6);
    map.set_next(e7, i2);
    map.set_next(e3, e7);

    map.set_next(e8, i4);
    map.set_next(e10, e8);
    map.set_next(e9, i5);
    map.set_next(i8, e9);
    map.set_next(i4, e10);
    map.set_next(i5, i8);
    map.set_next(i11, i6);
    map.set_next(i6, i9);
    map.set_next(i9, i11);
    map.set_next(i10, i7);
    map.set_next(e11, i10);
    map.set_next(i7, e11);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_base_is_the_path() {
        let mut map = PlaneMap::new();
        first_base(&mut map);
        assert_eq!(map.order(), 3);
        assert_eq!(map.size(), 4);
        assert_eq!(map.n1(), 2);
        assert_eq!(map.n2(), 1);
        map.check();
    }

    #[test]
    fn test_second_base_is_the_four_cycle() {
        let mut map = PlaneMap::new();
        first_base(&mut map);
        second_base(&mut map);
        assert_eq!(map.order(), 4);
        assert_eq!(map.size(), 8);
        assert_eq!(map.n1(), 0);
        assert_eq!(map.n2(), 4);
        for vertex in 0..4 {
            assert_eq!(map.degree(vertex), 2);
        }
        map.check();
    }

    #[test]
    fn test_third_base_is_the_cube() {
        let mut map = PlaneMap::new();
        first_base(&mut map);
        second_base(&mut map);
        third_base(&mut map);
        assert_eq!(map.order(), 8);
        assert_eq!(map.size(), 24);
        assert_eq!(map.n1() + map.n2(), 0);
        for vertex in 0..8 {
            assert_eq!(map.degree(vertex), 3);
        }
        map.check();
    }
}
