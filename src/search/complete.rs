// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The completion step: turn a predecoration at the target order into
//! decorations by choosing the final distinguished vertices.
//!
//! A completion picks three distinguished vertices v0, v1, v2. The
//! driver has already fixed the structure's vertex orbits; completion
//! first commits to v1 (for an odd factor by detaching a degree-1
//! vertex, for an even factor by fixing an orbit representative), then
//! derives the stabilizer symmetry and enumerates the non-isomorphic
//! choices of v0 and v2 from the remaining orbits. Choices forced by
//! the low-degree census skip the orbit enumeration entirely. A choice
//! counts twice when the two chosen vertices are unrelated by the
//! stabilizer (the pair can be distinguished in two ways), once
//! otherwise.

use super::Search;
use crate::planemap::VertexId;
use crate::state::Counter;
use crate::symmetry::FixEdges;

/// The bucket element other than `v1` (or its first element when `v1`
/// is not in the bucket).
fn pick_other(bucket: &[VertexId], v1: VertexId) -> VertexId {
    if bucket[0] != v1 {
        bucket[0]
    } else {
        bucket[1]
    }
}

impl Search<'_> {
    /// Complete with an odd target factor: v1 is a degree-1 vertex,
    /// whose pendant arc is detached while the remaining symmetry is
    /// derived from the 2-cycle it hung from.
    pub(super) fn complete_odd(&mut self, orbits: &[VertexId]) {
        for &v1 in orbits {
            if self.map.degree(v1) != 1 {
                continue;
            }
            let edge = self.map.first_edge(v1);
            if self.map.degree(self.map.end(edge)) == 3 && self.map.n1() + self.map.n2() == 3 {
                continue;
            }
            let edge_a = self.map.prev(self.map.inverse(edge));
            let detached = self.map.inverse(edge);
            self.map.detach(detached);

            let edge2 = self.map.prev(self.map.inverse(edge_a));
            match self.canon.fix_edges(&self.map, edge_a, edge2) {
                FixEdges::Fixed { orbits: fixed, fixpoint } => {
                    self.complete02(&fixed, fixpoint, v1);
                }
                // The mirrored configuration is the smaller one; it is
                // enumerated from its own side.
                FixEdges::Swap => {}
            }

            self.map.attach(edge_a, detached);
        }
    }

    /// Complete with an even target factor: v1 is an orbit
    /// representative fixed in place.
    pub(super) fn complete_even(&mut self, orbits: &[VertexId]) {
        for &v1 in orbits {
            let eligible = if self.map.n1() + self.map.n2() < 3 {
                self.map.degree(v1) > 1
            } else {
                self.map.degree(v1) == 2
            };
            if eligible {
                let (fixed, fixpoint) = self.canon.fix_vertex(&self.map, v1);
                self.complete02(&fixed, fixpoint, v1);
            }
        }
    }

    /// Choose v0 and v2 in all non-isomorphic ways, given v1 and the
    /// vertex orbits of the symmetry that fixes it.
    ///
    /// The census of low-degree vertices not accounted for by v1
    /// dictates how constrained the choice is: 0 leaves both free, 1
    /// forces v0, 2 forces the degree (or both vertices) of the pair.
    fn complete02(&mut self, orbits: &[VertexId], fixpoint: Option<VertexId>, v1: VertexId) {
        let order = self.map.order();
        let census = self.map.n1() + self.map.n2() - usize::from(self.map.degree(v1) < 3);
        match census {
            0 => {
                if orbits.is_empty() {
                    for v0 in 0..order - 1 {
                        if v0 == v1 {
                            continue;
                        }
                        for v2 in v0 + 1..order {
                            if v2 != v1 {
                                self.check_and_count(v0, v1, v2, 2);
                            }
                        }
                    }
                } else {
                    for i in 0..orbits.len() {
                        let v0 = orbits[i];
                        for v2 in 0..order {
                            if v2 != v1 && v2 != v0 {
                                self.check_and_count(v0, v1, v2, 1);
                            }
                        }
                        if let Some(f) = fixpoint {
                            self.check_and_count(v0, v1, f, 2);
                        }
                    }
                }
            }
            1 => {
                let v0 = if self.map.n1() - usize::from(self.map.degree(v1) == 1) != 0 {
                    pick_other(self.map.deg1.as_slice(), v1)
                } else {
                    pick_other(self.map.deg2.as_slice(), v1)
                };
                if fixpoint == Some(v0) {
                    for i in 0..orbits.len() {
                        self.check_and_count(v0, v1, orbits[i], 2);
                    }
                } else {
                    for v2 in 0..order {
                        if v2 != v1 && v2 != v0 {
                            self.check_and_count(v0, v1, v2, 2);
                        }
                    }
                }
            }
            2 => match self.map.n1() - usize::from(self.map.degree(v1) == 1) {
                count @ (0 | 2) => {
                    let d = if count == 0 { 2 } else { 1 };
                    if orbits.is_empty() {
                        for v0 in 0..order - 1 {
                            if v0 == v1 || self.map.degree(v0) != d {
                                continue;
                            }
                            for v2 in v0 + 1..order {
                                if v2 != v1 && self.map.degree(v2) == d {
                                    self.check_and_count(v0, v1, v2, 2);
                                }
                            }
                        }
                    } else {
                        for i in 0..orbits.len() {
                            let v0 = orbits[i];
                            if self.map.degree(v0) != d {
                                continue;
                            }
                            for v2 in 0..order {
                                if v2 != v1 && v2 != v0 && self.map.degree(v2) == d {
                                    self.check_and_count(v0, v1, v2, 1);
                                }
                            }
                        }
                    }
                }
                1 => {
                    let v0 = pick_other(self.map.deg1.as_slice(), v1);
                    let v2 = pick_other(self.map.deg2.as_slice(), v1);
                    self.check_and_count(v0, v1, v2, 2);
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// Count an accepted completion, subject to the optional lsp
    /// automorphism filter.
    fn check_and_count(&mut self, v0: VertexId, v1: VertexId, v2: VertexId, n: u64) {
        if !self.config.filter_lsp || self.canon.is_lsp(&self.map, v0, v1, v2) {
            self.stats.add(Counter::Completions, n);
        }
    }
}
