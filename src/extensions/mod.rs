// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The four local rewrites that grow a double predecoration, and their
//! exact inverses.
//!
//! Every extension creates one new vertex and two new half-edge pairs at
//! the arena tail; every reduction pops exactly those entities, so a
//! matched apply/reduce pair restores the previous structure (arena
//! occupancy, rotation links and degree-bucket membership). The driver
//! is the only caller and always pairs them, whether or not the child
//! was explored.
//!
//! Applicability is a local degree test. An inapplicable `apply` leaves
//! the structure untouched and returns `false`; it never half-applies.
//!
//! The declaration order is the priority order used both by the driver
//! (children are tried kind by kind) and by the canonical-form check
//! (a child that a lower kind could have built rejects higher kinds).

use crate::planemap::{EdgeId, PlaneMap};
use strum_macros::EnumIter;

/// The four extension kinds, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumIter)]
pub enum ExtensionKind {
    /// Insert an ear across the face at `edge`, splitting the face with
    /// a new degree-2 vertex. Inapplicable when the site would create a
    /// degenerate low-degree chain.
    EarSplit,
    /// The same rewrite, restricted to sites whose both sides already
    /// have degree exactly 2.
    Bridge,
    /// Duplicate the arc at `edge` and hang a new pendant vertex
    /// between the copies. Always applicable; used to grow out of
    /// single-edge configurations.
    PendantEar,
    /// Detach the arc opposite `edge`, insert the ear, and reattach the
    /// detached arc onto the new vertex. Requires degrees >= 3 / >= 4 at
    /// the site and a distinct opposite vertex of degree >= 2.
    Reattach,
}

/// Insert a new degree-2 vertex into the face at `edge_a`, joining it
/// to `edge_a`'s start and to the start of the opposite arc.
fn insert_ear(map: &mut PlaneMap, edge_a: EdgeId) {
    let edge_b = map.inverse(map.prev(map.inverse(edge_a)));

    let vertex = map.create_vertex();
    let e0 = map.create_edge(map.start(edge_a), vertex);
    let i0 = map.inverse(e0);
    let e1 = map.create_edge(map.start(edge_b), vertex);
    let i1 = map.inverse(e1);

    map.set_next(e0, map.next(edge_a));
    map.set_next(edge_a, e0);
    map.set_next(map.prev(edge_b), e1);
    map.set_next(e1, edge_b);
    map.set_next(i0, i1);
    map.set_next(i1, i0);
}

impl ExtensionKind {
    /// Apply this extension at `edge`. Returns whether it was
    /// applicable; `false` means the structure is untouched.
    pub fn apply(self, map: &mut PlaneMap, edge: EdgeId) -> bool {
        match self {
            ExtensionKind::EarSplit => {
                if map.degree(map.end(edge)) > 1 && map.degree(map.start(edge)) < 3 {
                    return false;
                }
                insert_ear(map, edge);
                true
            }
            ExtensionKind::Bridge => {
                let opposite = map.end(map.prev(map.inverse(edge)));
                if map.degree(map.start(edge)) != 2 || map.degree(opposite) != 2 {
                    return false;
                }
                insert_ear(map, edge);
                true
            }
            ExtensionKind::PendantEar => {
                let inverse = map.inverse(edge);

                let vertex = map.create_vertex();
                let e0 = map.create_edge(map.start(edge), map.end(edge));
                let i0 = map.inverse(e0);
                let e1 = map.create_edge(map.start(edge), vertex);
                let i1 = map.inverse(e1);

                map.set_next(e0, map.next(edge));
                map.set_next(edge, e1);
                map.set_next(e1, e0);
                map.set_next(i1, i1);
                map.set_next(map.prev(inverse), i0);
                map.set_next(i0, inverse);
                true
            }
            ExtensionKind::Reattach => {
                if map.degree(map.start(edge)) < 3 || map.degree(map.end(edge)) < 4 {
                    return false;
                }
                let inverse_a = map.inverse(edge);
                let edge_c = map.prev(inverse_a);
                let inverse_b = map.prev(edge_c);
                let edge_b = map.inverse(inverse_b);
                if map.start(edge) == map.start(edge_b) || map.degree(map.start(edge_b)) < 2 {
                    return false;
                }

                let vertex = map.create_vertex();
                let e0 = map.create_edge(map.start(edge), vertex);
                let i0 = map.inverse(e0);
                let e1 = map.create_edge(map.start(edge_b), vertex);
                let i1 = map.inverse(e1);

                map.detach(edge_c);

                map.set_next(e0, map.next(edge));
                map.set_next(edge, e0);
                map.set_next(map.prev(edge_b), e1);
                map.set_next(e1, edge_b);
                map.set_next(i0, i1);
                map.set_next(i1, i0);

                map.attach(i1, edge_c);
                true
            }
        }
    }

    /// Undo this extension, which must have been the last one applied
    /// at `edge`.
    pub fn reduce(self, map: &mut PlaneMap, edge: EdgeId) {
        match self {
            ExtensionKind::Reattach => {
                // Recover the reattached arc before popping; its home
                // position is only derivable while the ear still exists.
                let edge_c = map.prev(map.inverse(map.next(edge)));
                map.remove_extension();
                let home = map.prev(map.inverse(edge));
                map.attach(home, edge_c);
            }
            _ => map.remove_extension(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{assert_maps_equivalent, path_base};
    use strum::IntoEnumIterator;

    #[test]
    fn test_kind_priority_order() {
        let kinds: Vec<_> = ExtensionKind::iter().collect();
        assert_eq!(
            kinds,
            vec![
                ExtensionKind::EarSplit,
                ExtensionKind::Bridge,
                ExtensionKind::PendantEar,
                ExtensionKind::Reattach,
            ]
        );
        assert!(ExtensionKind::EarSplit < ExtensionKind::Reattach);
    }

    #[test]
    fn test_ear_split_applicability() {
        let (mut map, e0, _) = path_base();
        let before = map.clone();

        // A pendant arc whose far side has degree 2 is a degenerate
        // site: not applicable, structure untouched.
        assert!(!ExtensionKind::EarSplit.apply(&mut map, e0));
        assert_maps_equivalent(&map, &before);

        // The reversed arc ends in a degree-1 vertex and is a site.
        let i0 = map.inverse(e0);
        assert!(ExtensionKind::EarSplit.apply(&mut map, i0));
        assert_eq!(map.order(), 4);
        assert_eq!(map.size(), 8);
        assert_eq!(map.degree(3), 2);
        map.check();
    }

    #[test]
    fn test_ear_split_round_trip() {
        let (mut map, e0, _) = path_base();
        let i0 = map.inverse(e0);
        let before = map.clone();

        assert!(ExtensionKind::EarSplit.apply(&mut map, i0));
        ExtensionKind::EarSplit.reduce(&mut map, i0);
        assert_maps_equivalent(&map, &before);
        map.check();
    }

    #[test]
    fn test_bridge_round_trip() {
        let (mut map, e0, _) = path_base();
        let i0 = map.inverse(e0);
        let before = map.clone();

        // i0 starts at the degree-2 middle vertex and its opposite side
        // is the same vertex, so the bridge applies.
        assert!(ExtensionKind::Bridge.apply(&mut map, i0));
        map.check();
        ExtensionKind::Bridge.reduce(&mut map, i0);
        assert_maps_equivalent(&map, &before);
    }

    #[test]
    fn test_bridge_requires_degree_two() {
        let (mut map, e0, _) = path_base();
        let before = map.clone();
        assert!(!ExtensionKind::Bridge.apply(&mut map, e0));
        assert_maps_equivalent(&map, &before);
    }

    #[test]
    fn test_pendant_ear_round_trip() {
        let (mut map, e0, _) = path_base();
        let before = map.clone();

        assert!(ExtensionKind::PendantEar.apply(&mut map, e0));
        assert_eq!(map.order(), 4);
        assert_eq!(map.degree(3), 1);
        // The site arc is doubled: its start gained two arcs.
        assert_eq!(map.degree(map.start(e0)), 3);
        map.check();

        ExtensionKind::PendantEar.reduce(&mut map, e0);
        assert_maps_equivalent(&map, &before);
        map.check();
    }

    #[test]
    fn test_reattach_requires_high_degrees() {
        let (mut map, e0, _) = path_base();
        let before = map.clone();
        for edge in 0..map.size() {
            assert!(!ExtensionKind::Reattach.apply(&mut map, edge));
        }
        assert_maps_equivalent(&map, &before);
    }
}
