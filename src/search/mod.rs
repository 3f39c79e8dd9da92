// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The recursive augmentation driver.
//!
//! The driver owns the single mutable [`PlaneMap`] and walks the search
//! tree depth-first: at each node it applies every extension kind to
//! every edge-orbit representative, asks the canonicalizer whether that
//! application is the canonical way to build the child, recurses if so,
//! and always undoes the extension before trying the next candidate.
//! This is the canonical construction path rule: a child is visited
//! only through the unique site that makes the applied extension
//! canonical in the child, so every isomorphism class is reached
//! exactly once.
//!
//! Growth stops when the structure reaches the order determined by the
//! target factor; structures whose low-degree census is small enough
//! are then counted and handed to the completion step (see
//! [`complete`](self::complete)).
//!
//! All scratch state (the map, the canonicalizer, the counters) lives
//! in one [`Search`] value threaded through the recursion, so parallel
//! searches only need independent contexts.

pub mod bases;
mod complete;

use crate::canon::Canonicalizer;
use crate::extensions::ExtensionKind;
use crate::output;
use crate::planemap::{EdgeId, PlaneMap};
use crate::state::{Counter, Statistics};
use std::io::{self, Write};
use strum::IntoEnumIterator;

/// Options controlling one generation run.
///
/// The partitioning options (`modulus`, `residue`, `split_level`) and
/// the `all`/`connectivity`/`deco_output` selections are carried for
/// the command line's sake but do not alter the augmentation; see
/// DESIGN.md.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Target inflation factor.
    pub factor: usize,
    pub connectivity: u32,
    pub all: bool,
    /// Emit the planar code of every predecoration reaching the target
    /// order.
    pub predeco_output: bool,
    pub deco_output: bool,
    /// Gate completions on the lsp automorphism filter.
    pub filter_lsp: bool,
    pub modulus: u64,
    pub residue: u64,
    pub split_level: u32,
}

impl SearchConfig {
    pub fn new(factor: usize) -> Self {
        Self {
            factor,
            connectivity: 3,
            all: false,
            predeco_output: false,
            deco_output: false,
            filter_lsp: false,
            modulus: 1,
            residue: 0,
            split_level: 3,
        }
    }
}

/// One generation run: the mutable structure, the canonical-form
/// scratch, the counters, and the output sink.
pub struct Search<'a> {
    map: PlaneMap,
    canon: Canonicalizer,
    stats: Statistics,
    config: &'a SearchConfig,
    out: &'a mut dyn Write,
}

/// Run the full generation for `config`, writing any structure output
/// to `out`. Returns the final counters.
pub fn run<'a>(config: &'a SearchConfig, out: &'a mut dyn Write) -> io::Result<Statistics> {
    tracing::info!(
        factor = config.factor,
        lsp_filter = config.filter_lsp,
        "starting augmentation search"
    );
    if config.predeco_output {
        output::write_planar_header(out)?;
    }
    let mut search = Search {
        map: PlaneMap::new(),
        canon: Canonicalizer::new(),
        stats: Statistics::new(),
        config,
        out,
    };
    search.start_construction()?;
    tracing::info!(
        completions = search.stats.get(Counter::Completions),
        predecorations = search.stats.get(Counter::Predecorations),
        "search finished"
    );
    Ok(search.stats)
}

impl Search<'_> {
    /// Seed each base in turn and grow it to the target factor.
    ///
    /// The root half-edge of the first base serves as the provisional
    /// canonical representative for every base.
    fn start_construction(&mut self) -> io::Result<()> {
        let root = bases::first_base(&mut self.map);
        tracing::debug!("seeded the path base");
        let reps = self.canon.canon(&self.map, None, root).unwrap_or_default();
        self.map.check();
        self.grow(&reps)?;

        if self.config.factor < 5 {
            return Ok(());
        }
        bases::second_base(&mut self.map);
        tracing::debug!("seeded the 4-cycle base");
        let reps = self.canon.canon(&self.map, None, root).unwrap_or_default();
        self.map.check();
        self.grow(&reps)?;

        if self.config.factor < 11 {
            return Ok(());
        }
        bases::third_base(&mut self.map);
        tracing::debug!("seeded the cube base");
        let reps = self.canon.canon(&self.map, None, root).unwrap_or_default();
        self.map.check();
        self.grow(&reps)
    }

    /// One node of the search tree, entered with the edge-orbit
    /// representatives of the current structure.
    fn grow(&mut self, reps: &[EdgeId]) -> io::Result<()> {
        if self.map.order() - 2 == (self.config.factor + 1) / 2 {
            if self.map.n1() + self.map.n2() <= 3 {
                self.stats.add(Counter::Predecorations, 1);
                let orbits = self.canon.vertex_orbits(&self.map);
                if self.config.predeco_output {
                    output::write_planar_code(self.out, &self.map)?;
                }
                if self.config.factor % 2 == 1 {
                    self.complete_odd(&orbits);
                } else {
                    self.complete_even(&orbits);
                }
            }
            return Ok(());
        }

        for kind in ExtensionKind::iter() {
            self.try_extension(kind, reps)?;
        }
        Ok(())
    }

    /// Apply `kind` at every orbit representative, recursing into the
    /// children that survive the canonical-form check.
    ///
    /// The matching reduction runs unconditionally after each
    /// application, whether the child was explored, rejected, or its
    /// subtree failed, so the parent structure is always restored
    /// before the next candidate. This is the only place an extension
    /// is ever applied.
    fn try_extension(&mut self, kind: ExtensionKind, reps: &[EdgeId]) -> io::Result<()> {
        for &edge in reps {
            if !kind.apply(&mut self.map, edge) {
                continue;
            }
            self.map.check();
            let result = if self.map.n1() + self.map.n2() <= 4 {
                match self.canon.canon(&self.map, Some(kind), edge) {
                    Some(child_reps) => self.grow(&child_reps),
                    None => Ok(()),
                }
            } else {
                Ok(())
            };
            kind.reduce(&mut self.map, edge);
            self.map.check();
            result?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_one_counts() {
        let config = SearchConfig::new(1);
        let mut sink = Vec::new();
        let stats = run(&config, &mut sink).unwrap();
        assert_eq!(stats.get(Counter::Predecorations), 1);
        assert_eq!(stats.get(Counter::Completions), 1);
        assert_eq!(stats.decorations(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_factor_two_counts() {
        let config = SearchConfig::new(2);
        let mut sink = Vec::new();
        let stats = run(&config, &mut sink).unwrap();
        assert_eq!(stats.get(Counter::Predecorations), 1);
        assert_eq!(stats.get(Counter::Completions), 1);
    }

    #[test]
    fn test_predeco_output_stream_shape() {
        let mut config = SearchConfig::new(3);
        config.predeco_output = true;
        let mut sink = Vec::new();
        let stats = run(&config, &mut sink).unwrap();

        assert_eq!(&sink[..15], b">>planar_code<<");
        // One code block per predecoration, each led by its vertex
        // count and holding one 0 terminator per vertex.
        let mut blocks = 0;
        let mut pos = 15;
        while pos < sink.len() {
            let order = sink[pos] as usize;
            pos += 1;
            let mut zeros = 0;
            while zeros < order {
                if sink[pos] == 0 {
                    zeros += 1;
                }
                pos += 1;
            }
            blocks += 1;
        }
        assert_eq!(blocks as u64, stats.get(Counter::Predecorations));
    }
}
