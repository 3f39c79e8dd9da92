// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Arena-backed half-edge representation of a double predecoration.
//!
//! A [`PlaneMap`] stores the rotation system of a plane graph: every
//! undirected edge is a pair of antiparallel half-edges, and the
//! half-edges leaving a vertex form a cyclic `next`/`prev` list in
//! plane order. All links are indices into one arena, so no entity can
//! outlive the map, and backtracking is a matter of popping the arena
//! tail.
//!
//! # Invariants
//!
//! - `inverse(inverse(e)) == e`; half-edges are created in pairs and the
//!   arena length (`size`) is always even.
//! - The `next` links at a fixed start vertex form a single cycle whose
//!   length is that vertex's degree; `prev` is its exact reverse.
//! - The degree-1 and degree-2 buckets always contain exactly the
//!   vertices of that degree.
//! - Entities are created only at the arena tail and removed only in
//!   LIFO order by [`PlaneMap::remove_extension`], so earlier indices
//!   are never invalidated.
//!
//! Violations are programming defects: they are caught by the debug-only
//! [`PlaneMap::check`] pass and are not recoverable conditions.

use crate::constants::{MAX_LOW_DEGREE, MAX_ORDER, MAX_SIZE};

/// Index of a vertex in `0..order`.
pub type VertexId = usize;

/// Index of a half-edge in the arena.
pub type EdgeId = usize;

/// One directed arc of the rotation system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    pub start: VertexId,
    pub end: VertexId,
    /// Previous arc in the cyclic rotation at `start`.
    pub prev: EdgeId,
    /// Next arc in the cyclic rotation at `start`.
    pub next: EdgeId,
    /// The antiparallel twin.
    pub inverse: EdgeId,
}

/// Bounded unordered set of low-degree vertices.
///
/// Removal is a linear scan by value; the bucket never holds more than
/// [`MAX_LOW_DEGREE`] vertices, so a reverse index would buy nothing.
#[derive(Debug, Clone)]
pub struct DegreeBucket {
    items: [VertexId; MAX_LOW_DEGREE],
    len: usize,
}

impl DegreeBucket {
    fn new() -> Self {
        Self {
            items: [0; MAX_LOW_DEGREE],
            len: 0,
        }
    }

    fn push(&mut self, vertex: VertexId) {
        debug_assert!(self.len < MAX_LOW_DEGREE);
        self.items[self.len] = vertex;
        self.len += 1;
    }

    /// Remove `vertex`, which must be present.
    fn remove(&mut self, vertex: VertexId) {
        let mut i = 0;
        while self.items[i] != vertex {
            i += 1;
        }
        self.len -= 1;
        self.items[i] = self.items[self.len];
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[VertexId] {
        &self.items[..self.len]
    }
}

/// The mutable plane structure grown and shrunk by the search.
#[derive(Debug, Clone)]
pub struct PlaneMap {
    edges: Vec<HalfEdge>,
    /// Rotation entry point per vertex. Only meaningful for vertices of
    /// degree >= 1; any member of the rotation is a valid entry point.
    first_edge: [EdgeId; MAX_ORDER],
    degree: [usize; MAX_ORDER],
    order: usize,
    /// Vertices currently of degree 1.
    pub deg1: DegreeBucket,
    /// Vertices currently of degree 2.
    pub deg2: DegreeBucket,
}

impl PlaneMap {
    /// An empty map with full arena capacity reserved.
    pub fn new() -> Self {
        Self {
            edges: Vec::with_capacity(MAX_SIZE),
            first_edge: [0; MAX_ORDER],
            degree: [0; MAX_ORDER],
            order: 0,
            deg1: DegreeBucket::new(),
            deg2: DegreeBucket::new(),
        }
    }

    /// Number of vertices.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of half-edges (always even).
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    pub fn degree(&self, vertex: VertexId) -> usize {
        self.degree[vertex]
    }

    /// An arbitrary half-edge leaving `vertex`.
    pub fn first_edge(&self, vertex: VertexId) -> EdgeId {
        self.first_edge[vertex]
    }

    pub fn edge(&self, e: EdgeId) -> &HalfEdge {
        &self.edges[e]
    }

    pub fn start(&self, e: EdgeId) -> VertexId {
        self.edges[e].start
    }

    pub fn end(&self, e: EdgeId) -> VertexId {
        self.edges[e].end
    }

    pub fn next(&self, e: EdgeId) -> EdgeId {
        self.edges[e].next
    }

    pub fn prev(&self, e: EdgeId) -> EdgeId {
        self.edges[e].prev
    }

    pub fn inverse(&self, e: EdgeId) -> EdgeId {
        self.edges[e].inverse
    }

    /// Number of degree-1 vertices.
    pub fn n1(&self) -> usize {
        self.deg1.len()
    }

    /// Number of degree-2 vertices.
    pub fn n2(&self) -> usize {
        self.deg2.len()
    }

    fn increase_degree(&mut self, vertex: VertexId) {
        match self.degree[vertex] {
            0 => self.deg1.push(vertex),
            1 => {
                self.deg1.remove(vertex);
                self.deg2.push(vertex);
            }
            2 => self.deg2.remove(vertex),
            _ => {}
        }
        self.degree[vertex] += 1;
    }

    fn decrease_degree(&mut self, vertex: VertexId) {
        match self.degree[vertex] {
            1 => self.deg1.remove(vertex),
            2 => {
                self.deg2.remove(vertex);
                self.deg1.push(vertex);
            }
            3 => self.deg2.push(vertex),
            _ => {}
        }
        self.degree[vertex] -= 1;
    }

    /// Append a new isolated vertex and return its id.
    pub fn create_vertex(&mut self) -> VertexId {
        debug_assert!(self.order < MAX_ORDER);
        self.degree[self.order] = 0;
        let vertex = self.order;
        self.order += 1;
        vertex
    }

    /// Append a half-edge pair between two existing vertices.
    ///
    /// Returns the forward half-edge; its inverse is the next arena slot.
    /// The rotation links of the pair are left for the caller to wire
    /// with [`PlaneMap::set_next`] or [`PlaneMap::attach`].
    pub fn create_edge(&mut self, start: VertexId, end: VertexId) -> EdgeId {
        debug_assert!(self.edges.len() + 2 <= MAX_SIZE);
        let e = self.edges.len();
        let inverse = e + 1;
        self.edges.push(HalfEdge {
            start,
            end,
            prev: e,
            next: e,
            inverse,
        });
        self.edges.push(HalfEdge {
            start: end,
            end: start,
            prev: inverse,
            next: inverse,
            inverse: e,
        });
        self.increase_degree(start);
        self.increase_degree(end);
        self.first_edge[start] = e;
        self.first_edge[end] = inverse;
        e
    }

    /// Link `e` directly after `edge` in `edge`'s rotation.
    pub fn set_next(&mut self, edge: EdgeId, e: EdgeId) {
        self.edges[edge].next = e;
        self.edges[e].prev = edge;
    }

    /// Remove `e` from its start vertex's rotation.
    ///
    /// The arc itself stays in the arena; it must later be either
    /// re-inserted with [`PlaneMap::attach`] or popped by
    /// [`PlaneMap::remove_extension`].
    pub fn detach(&mut self, e: EdgeId) {
        let (prev, next, start) = {
            let edge = &self.edges[e];
            (edge.prev, edge.next, edge.start)
        };
        self.set_next(prev, next);
        if self.first_edge[start] == e {
            self.first_edge[start] = prev;
        }
        self.decrease_degree(start);
    }

    /// Insert `e` directly after `prev` in `prev`'s rotation, re-homing
    /// `e` to `prev`'s start vertex.
    pub fn attach(&mut self, prev: EdgeId, e: EdgeId) {
        let start = self.edges[prev].start;
        self.edges[e].start = start;
        let inv = self.edges[e].inverse;
        self.edges[inv].end = start;
        self.increase_degree(start);
        let after = self.edges[prev].next;
        self.set_next(e, after);
        self.set_next(prev, e);
    }

    /// Pop the most recently created vertex and its 4 newest half-edges.
    ///
    /// Popped arcs that were wired into an older vertex's rotation are
    /// detached first; arcs starting at the popped vertex just vanish
    /// with it. Must exactly undo the extension that created them.
    pub fn remove_extension(&mut self) {
        self.order -= 1;
        let vertex = self.order;

        for _ in 0..4 {
            let e = self.edges.len() - 1;
            if self.edges[e].start != vertex {
                self.detach(e);
            }
            self.edges.pop();
        }

        match self.degree[vertex] {
            1 => self.deg1.remove(vertex),
            2 => self.deg2.remove(vertex),
            _ => {}
        }
    }

    /// Structural consistency pass: rotation cycles, degree buckets,
    /// arena occupancy, and the all-faces-are-quadrilaterals property.
    ///
    /// Debug builds only; a violation here is a fatal programming
    /// defect, never a runtime condition.
    #[cfg(debug_assertions)]
    pub fn check(&self) {
        assert!(self.order <= MAX_ORDER);
        assert!(self.size() <= MAX_SIZE);

        let mut size = 0;
        let mut n1 = 0;
        let mut n2 = 0;
        for vertex in 0..self.order {
            size += self.degree(vertex);
            match self.degree(vertex) {
                1 => n1 += 1,
                2 => n2 += 1,
                _ => {}
            }

            let mut e = self.first_edge(vertex);
            for _ in 0..self.degree(vertex) {
                assert_eq!(self.start(e), vertex);
                assert_ne!(self.end(e), vertex);
                assert!(self.end(e) < self.order);
                assert_eq!(self.next(self.prev(e)), e);
                e = self.next(e);
            }
            assert_eq!(e, self.first_edge(vertex));
        }
        assert_eq!(self.size(), size);
        assert_eq!(self.n1(), n1);
        assert_eq!(self.n2(), n2);

        for &vertex in self.deg1.as_slice() {
            assert_eq!(self.degree(vertex), 1);
        }
        for &vertex in self.deg2.as_slice() {
            assert_eq!(self.degree(vertex), 2);
        }

        let mut seen = vec![false; self.size()];
        for e in 0..self.size() {
            if !seen[e] {
                let mut run = e;
                for _ in 0..4 {
                    assert!(!seen[run]);
                    seen[run] = true;
                    run = self.prev(self.inverse(run));
                }
                assert_eq!(run, e);
            }
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    pub fn check(&self) {}
}

impl Default for PlaneMap {
    fn default() -> Self {
        Self::new()
    }
}
