// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Orbits and stabilizers derived from the numberings recorded by a
//! winning canonical-form computation.
//!
//! The rows of the canonicalizer's numbering table that tied with the
//! canonical code are exactly the automorphisms of the current
//! structure, written as position-for-position edge maps. Everything
//! here reads those rows: grouping vertices into orbits, restricting
//! the group to the stabilizer of a chosen vertex, and the lockstep
//! traversals that decide whether an automorphism maps one
//! distinguished edge configuration onto another.
//!
//! The completion step uses these to pick the final distinguished
//! vertices once per isomorphism class instead of once per symmetric
//! copy.

use crate::canon::Canonicalizer;
use crate::planemap::{EdgeId, PlaneMap, VertexId};

/// Result of [`Canonicalizer::fix_edges`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixEdges {
    /// The second configuration is lexicographically larger; the caller
    /// should swap the roles and retry.
    Swap,
    /// The stabilizer has been determined. `orbits` holds one
    /// representative per vertex orbit of size greater than one; it is
    /// empty when no automorphism relates the two configurations (the
    /// structure is rigid with respect to them). `fixpoint` is the
    /// vertex, if any, fixed by the stabilizer besides the
    /// configuration itself.
    Fixed {
        orbits: Vec<VertexId>,
        fixpoint: Option<VertexId>,
    },
}

impl Canonicalizer {
    /// Group all vertices into orbits under the recorded automorphisms.
    ///
    /// Returns one representative per orbit, in canonical discovery
    /// order. Must follow a successful [`canon`](Canonicalizer::canon)
    /// on the same structure.
    pub fn vertex_orbits(&mut self, map: &PlaneMap) -> Vec<VertexId> {
        let mut orbits = Vec::with_capacity(map.order());
        self.vertex_marks.reset(1);
        for i in 0..map.size() {
            let vertex = map.start(self.numberings[0][i]);
            if !self.vertex_marks.is_marked(vertex) {
                orbits.push(vertex);
                for n in 0..self.nb_sym {
                    let image = map.start(self.numberings[n][i]);
                    self.vertex_marks.mark(image, 1);
                }
            }
        }
        orbits
    }

    /// Restrict the recorded automorphisms to the stabilizer of
    /// `vertex` and recompute vertex orbits under it.
    ///
    /// Returns one representative per orbit of size greater than one,
    /// plus the vertex (if any) other than `vertex` that every
    /// stabilizer element fixes. An empty orbit list with no fixpoint
    /// means the stabilizer is trivial.
    pub fn fix_vertex(
        &mut self,
        map: &PlaneMap,
        vertex: VertexId,
    ) -> (Vec<VertexId>, Option<VertexId>) {
        let mut position = 0;
        while map.start(self.numberings[0][position]) != vertex {
            position += 1;
        }
        self.symmetries.clear();
        for n in 1..self.nb_sym {
            if map.start(self.numberings[n][position]) == vertex {
                self.symmetries.push(n);
            }
        }

        let mut orbits = Vec::new();
        let mut fixpoint = None;
        if self.symmetries.is_empty() {
            return (orbits, fixpoint);
        }

        self.vertex_marks.reset(1);
        self.vertex_marks.mark(vertex, 1);
        for i in 0..map.size() {
            let rep = map.start(self.numberings[0][i]);
            if self.vertex_marks.is_marked(rep) {
                continue;
            }
            self.vertex_marks.mark(rep, 1);
            let mut fixed = true;
            for s in 0..self.symmetries.len() {
                let image = map.start(self.numberings[self.symmetries[s]][i]);
                if image != rep {
                    fixed = false;
                    if !self.vertex_marks.is_marked(image) {
                        self.vertex_marks.mark(image, 1);
                    }
                }
            }
            if fixed {
                fixpoint = Some(rep);
            } else {
                orbits.push(rep);
            }
        }
        (orbits, fixpoint)
    }

    /// Decide whether a structure automorphism maps the directed
    /// 2-cycle at `edge` onto the one at `edge2`, by a breadth-first
    /// discovery run in lockstep over both roots.
    ///
    /// On success the correspondence acts as an automorphism whose
    /// fixed structure is reported like [`fix_vertex`](Self::fix_vertex).
    pub fn fix_edges(&mut self, map: &PlaneMap, edge: EdgeId, edge2: EdgeId) -> FixEdges {
        const RIGID: FixEdges = FixEdges::Fixed {
            orbits: Vec::new(),
            fixpoint: None,
        };

        if map.degree(map.start(edge)) < map.degree(map.start(edge2)) {
            return RIGID;
        }
        if map.degree(map.start(edge)) > map.degree(map.start(edge2)) {
            return FixEdges::Swap;
        }

        self.vertex_marks.reset(map.order());
        self.vertex_marks2.reset(map.order());
        self.vertex_marks.mark(map.start(edge), 1);
        self.vertex_marks.mark(map.end(edge), 2);
        self.vertex_marks2.mark(map.start(edge2), 1);
        self.vertex_marks2.mark(map.end(edge2), 2);
        self.start_edge[0] = edge;
        self.start_edge2[0] = edge2;
        self.start_edge[1] = map.inverse(edge);
        self.start_edge2[1] = map.inverse(edge2);

        let mut last_number = 2;
        let mut actual = 0;
        while actual < last_number {
            let entry = self.start_edge[actual];
            let entry2 = self.start_edge2[actual];
            let mut run = map.next(entry);
            let mut run2 = map.next(entry2);
            while run != entry {
                let vertex = map.end(run);
                let vertex2 = map.end(run2);
                let mark = self.vertex_marks.get(vertex);
                let mark2 = self.vertex_marks2.get(vertex2);
                if mark < mark2 {
                    return RIGID;
                }
                if mark > mark2 {
                    return FixEdges::Swap;
                }
                if mark == 0 {
                    self.start_edge[last_number] = map.inverse(run);
                    self.start_edge2[last_number] = map.inverse(run2);
                    last_number += 1;
                    self.vertex_marks.mark(vertex, last_number);
                    self.vertex_marks2.mark(vertex2, last_number);

                    if map.degree(vertex) < map.degree(vertex2) {
                        return RIGID;
                    }
                    if map.degree(vertex) > map.degree(vertex2) {
                        return FixEdges::Swap;
                    }
                }
                run = map.next(run);
                run2 = map.next(run2);
            }
            actual += 1;
        }

        let mut orbits = Vec::new();
        let mut fixpoint = None;
        self.vertex_marks.reset(1);
        for i in 0..last_number {
            let rep = map.start(self.start_edge[i]);
            if self.vertex_marks.is_marked(rep) {
                continue;
            }
            self.vertex_marks.mark(rep, 1);
            let image = map.start(self.start_edge2[i]);
            if !self.vertex_marks.is_marked(image) {
                self.vertex_marks.mark(image, 1);
                orbits.push(rep);
            } else {
                fixpoint = Some(rep);
            }
        }
        FixEdges::Fixed { orbits, fixpoint }
    }

    /// Whether an orientation-reversing correspondence rooted at `edge`
    /// and `edge2` extends to a structure automorphism that also
    /// respects the two excluded vertices `v1` and `v2` (each must map
    /// to itself wherever it occurs).
    pub fn compare_edges(
        &mut self,
        map: &PlaneMap,
        edge: EdgeId,
        edge2: EdgeId,
        v1: VertexId,
        v2: VertexId,
    ) -> bool {
        if map.degree(map.end(edge)) != map.degree(map.end(edge2)) {
            return false;
        }
        let (end, end2) = (map.end(edge), map.end(edge2));
        if (end == v1 || end == v2 || end2 == v1 || end2 == v2) && end != end2 {
            return false;
        }

        self.vertex_marks.reset(map.order());
        self.vertex_marks2.reset(map.order());
        self.vertex_marks.mark(map.start(edge), 1);
        self.vertex_marks.mark(map.end(edge), 2);
        self.vertex_marks2.mark(map.start(edge2), 1);
        self.vertex_marks2.mark(map.end(edge2), 2);
        self.start_edge[0] = edge;
        self.start_edge2[0] = edge2;
        self.start_edge[1] = map.inverse(edge);
        self.start_edge2[1] = map.inverse(edge2);

        let mut last_number = 2;
        let mut actual = 0;
        while actual < last_number {
            let entry = self.start_edge[actual];
            let entry2 = self.start_edge2[actual];
            let mut run = map.next(entry);
            // The second traversal walks its rotations backwards: the
            // correspondence reverses orientation.
            let mut run2 = map.prev(entry2);
            while run != entry {
                let vertex = map.end(run);
                let vertex2 = map.end(run2);
                if self.vertex_marks.get(vertex) != self.vertex_marks2.get(vertex2) {
                    return false;
                }
                if !self.vertex_marks.is_marked(vertex) {
                    self.start_edge[last_number] = map.inverse(run);
                    self.start_edge2[last_number] = map.inverse(run2);
                    last_number += 1;
                    self.vertex_marks.mark(vertex, last_number);
                    self.vertex_marks2.mark(vertex2, last_number);

                    if map.degree(vertex) != map.degree(vertex2) {
                        return false;
                    }
                    if (vertex == v1 || vertex == v2 || vertex2 == v1 || vertex2 == v2)
                        && vertex != vertex2
                    {
                        return false;
                    }
                }
                run = map.next(run);
                run2 = map.prev(run2);
            }
            actual += 1;
        }
        true
    }

    /// Whether some rotation arc at `v0` is related to the first by an
    /// orientation-reversing automorphism respecting `v1` and `v2`.
    pub fn is_lsp(&mut self, map: &PlaneMap, v0: VertexId, v1: VertexId, v2: VertexId) -> bool {
        let edge = map.first_edge(v0);
        let mut run = edge;
        loop {
            if self.compare_edges(map, edge, run, v1, v2) {
                return true;
            }
            run = map.next(run);
            if run == edge {
                return false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::path_base;

    #[test]
    fn test_vertex_orbits_of_path_base() {
        let (map, e0, _) = path_base();
        let mut canon = Canonicalizer::new();
        canon.canon(&map, None, e0).expect("path base is canonical");

        // The reflection pairs the two pendant vertices; the middle
        // vertex is its own orbit.
        let orbits = canon.vertex_orbits(&map);
        assert_eq!(orbits, vec![0, 1]);
    }

    #[test]
    fn test_fix_vertex_on_path_middle() {
        let (map, e0, _) = path_base();
        let mut canon = Canonicalizer::new();
        canon.canon(&map, None, e0).expect("path base is canonical");

        // Fixing the middle vertex keeps the reflection; the pendant
        // vertices form one orbit of size two and nothing else is fixed.
        let (orbits, fixpoint) = canon.fix_vertex(&map, 1);
        assert_eq!(orbits, vec![0]);
        assert_eq!(fixpoint, None);
    }

    #[test]
    fn test_fix_vertex_with_trivial_stabilizer() {
        let (map, e0, _) = path_base();
        let mut canon = Canonicalizer::new();
        canon.canon(&map, None, e0).expect("path base is canonical");

        // No non-identity automorphism fixes a pendant vertex.
        let (orbits, fixpoint) = canon.fix_vertex(&map, 0);
        assert!(orbits.is_empty());
        assert_eq!(fixpoint, None);
    }

    #[test]
    fn test_fix_edges_on_detached_path() {
        let (mut map, e0, e1) = path_base();
        let mut canon = Canonicalizer::new();

        // Detach the middle vertex's arc towards v0, as the odd-factor
        // completion does, then relate the two remaining 2-cycles.
        let i0 = map.inverse(e0);
        map.detach(i0);
        let edge2 = map.prev(map.inverse(e1));
        match canon.fix_edges(&map, e1, edge2) {
            FixEdges::Fixed { orbits, fixpoint } => {
                assert_eq!(orbits, vec![1]);
                assert_eq!(fixpoint, None);
            }
            other => panic!("expected Fixed, got {:?}", other),
        }
        map.attach(e1, i0);
        map.check();
    }

    #[test]
    fn test_is_lsp_on_path_middle() {
        let (map, _, _) = path_base();
        let mut canon = Canonicalizer::new();
        // The path has a reflection through its middle vertex.
        assert!(canon.is_lsp(&map, 1, 0, 2));
    }
}
