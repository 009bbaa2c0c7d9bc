// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Invariant verification over the explored universe.
//!
//! The property being proved: no reachable state of the layouter holds a
//! whole ring unit (or more) of slack. A single violating state falsifies the
//! layouter's worst-case bound, so verification aborts on the first one found
//! and reports it in full; the violating path can be reconstructed from the
//! edge set.
//!
//! On success the verifier summarizes the universe: a histogram of state
//! counts by total gap size, and edge counts by policy branch.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use strum::{EnumCount, IntoEnumIterator};

use crate::engine::Reachable;
use crate::layout::{Alloc, TransitionKind};
use crate::ring::LayoutState;

/// Fatal verification failure: a reachable state at or over the gap bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapBoundViolation {
    /// The offending state, gap list and tail included.
    pub state: LayoutState,
    /// Its total gap size.
    pub total_gaps: u32,
    /// The bound it reached: the ring unit.
    pub unit: u32,
}

impl fmt::Display for GapBoundViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "State {} holds {} gap bytes, at or over the ring unit {}",
            self.state, self.total_gaps, self.unit
        )
    }
}

impl Error for GapBoundViolation {}

/// Check `total_gaps < unit` on every reachable state.
///
/// Returns the successful verification summary, or a violation naming a
/// state with the worst total slack.
pub fn verify_gap_bound(
    reachable: &Reachable<LayoutState, Alloc>,
    unit: u32,
) -> Result<Verification, GapBoundViolation> {
    let mut histogram: BTreeMap<u32, u64> = BTreeMap::new();
    let mut worst: Option<&LayoutState> = None;
    for state in &reachable.states {
        let total = state.total_gaps();
        *histogram.entry(total).or_insert(0) += 1;
        if worst.map_or(true, |w| total > w.total_gaps()) {
            worst = Some(state);
        }
    }

    if let Some(state) = worst.filter(|w| w.total_gaps() >= unit) {
        return Err(GapBoundViolation {
            state: state.clone(),
            total_gaps: state.total_gaps(),
            unit,
        });
    }

    let mut statistics = Statistics::new();
    for edge in &reachable.edges {
        statistics.record(edge.label.kind);
    }

    Ok(Verification {
        histogram: GapHistogram { counts: histogram },
        statistics,
    })
}

/// Successful verification outcome.
#[derive(Debug)]
pub struct Verification {
    pub histogram: GapHistogram,
    pub statistics: Statistics,
}

/// Reachable-state counts grouped by total gap size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapHistogram {
    counts: BTreeMap<u32, u64>,
}

impl GapHistogram {
    /// Number of states whose gaps sum to exactly `total`.
    pub fn count(&self, total: u32) -> u64 {
        self.counts.get(&total).copied().unwrap_or(0)
    }

    /// `(total gap size, state count)` pairs, ascending by size.
    pub fn buckets(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }

    /// The largest total gap size any reachable state holds.
    pub fn worst(&self) -> u32 {
        self.counts.keys().next_back().copied().unwrap_or(0)
    }
}

/// Edge counts by policy branch.
///
/// Counts are per distinct edge, so they sum to the edge count.
#[derive(Debug, Default)]
pub struct Statistics {
    counts: [u64; TransitionKind::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    fn record(&mut self, kind: TransitionKind) {
        self.counts[kind as usize] += 1;
    }

    pub fn get(&self, kind: TransitionKind) -> u64 {
        self.counts[kind as usize]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in TransitionKind::iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", kind.name(), self.get(kind))?;
        }
        Ok(())
    }
}
