// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Result counters.
//!
//! Counters live in the search context and are incremented by the
//! driver and the completion step.

use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

#[derive(EnumCountMacro, Debug, Copy, Clone)]
#[repr(u8)]
pub enum Counter {
    /// Double predecorations reaching the target order with an
    /// admissible low-degree census.
    Predecorations,
    /// Accepted completions. Each corresponds to two decorations, one
    /// per orientation.
    Completions,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    counts: [u64; Counter::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by `n`.
    pub fn add(&mut self, counter: Counter, n: u64) {
        self.counts[counter as usize] += n;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counter) -> u64 {
        self.counts[counter as usize]
    }

    /// Number of decorations: two per completion, one per orientation.
    pub fn decorations(&self) -> u64 {
        2 * self.get(Counter::Completions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = Statistics::new();
        assert_eq!(stats.get(Counter::Predecorations), 0);
        assert_eq!(stats.get(Counter::Completions), 0);
    }

    #[test]
    fn test_decorations_double_completions() {
        let mut stats = Statistics::new();
        stats.add(Counter::Completions, 2);
        stats.add(Counter::Completions, 1);
        assert_eq!(stats.get(Counter::Completions), 3);
        assert_eq!(stats.decorations(), 6);
    }
}
