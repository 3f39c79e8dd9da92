// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Isomorph-free exhaustive generation of double decorations.
//!
//! The generator grows plane structures ("double predecorations") one
//! ear at a time and completes them into decorations of a target
//! inflation factor, visiting every isomorphism class exactly once.
//!
//! # Architecture
//!
//! Duplicate structures are rejected by the canonical construction path
//! method rather than by storing anything: a child structure is
//! explored only when the extension that produced it, applied at the
//! site it was applied to, is the canonical way to build that child.
//!
//! The pieces, leaves first:
//!
//! - [`marks`] - O(1)-resettable mark epochs, the primitive that keeps
//!   the per-node canonical-form computation from paying a clearing
//!   cost proportional to the structure.
//! - [`planemap`] - the arena-backed half-edge structure with its
//!   bounded low-degree buckets; all mutation is rotation re-wiring
//!   plus LIFO arena growth and shrinkage.
//! - [`canon`] - breadth-first canonical codes, lazy code comparison,
//!   and the per-extension-kind candidate enumeration.
//! - [`symmetry`] - vertex/edge orbits and stabilizer fixing, computed
//!   from the numberings that tied for canonical.
//! - [`extensions`] - the four ear rewrites and their exact inverses.
//! - [`search`] - the recursive driver and the completion step.
//! - [`output`] - planar-code serialization of predecorations.
//!
//! # Search algorithm
//!
//! Starting from up to three seed bases (a path, a 4-cycle, the cube),
//! the driver applies each extension kind at each edge-orbit
//! representative, keeps the children whose construction is canonical,
//! and recurses until the order implied by the factor is reached; a
//! completion step then distinguishes the final vertices once per
//! symmetry orbit. Counts are reported as completions and decorations
//! (two per completion, one per orientation).

pub mod canon;
pub mod constants;
pub mod extensions;
pub mod marks;
pub mod output;
pub mod planemap;
pub mod search;
pub mod state;
pub mod symmetry;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use canon::{canonical_signature, Canonicalizer};
pub use extensions::ExtensionKind;
pub use marks::Marks;
pub use planemap::PlaneMap;
pub use search::{run, SearchConfig};
pub use state::{Counter, Statistics};
