// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The allocation transition function.
//!
//! [`Layouter::allocate`] is the whole allocation policy: given a layout
//! state and a requested power-of-two size, decide whether to reuse an
//! existing gap, extend the tail, or realign the tail by introducing a new
//! gap. It is a pure function of its arguments, defined for every reachable
//! state and every allowed size, so the explorer can treat it as a total
//! transition relation.
//!
//! # Priority order
//!
//! 1. **Gap reuse (first-fit)**: the first gap in scan order that is large
//!    enough. An aligned gap is consumed from its low end; a misaligned gap
//!    is split around the aligned allocation, with the pre-slack kept at the
//!    same free-list position so the scan order is preserved.
//! 2. **Aligned tail extension**: bump the tail, zero waste.
//! 3. **Misaligned tail**: record the skipped bytes as a new gap, then place
//!    the allocation at the realigned boundary. The tail advances past the
//!    gap *and* the allocation.
//!
//! The allocation itself is never represented in the state; only the slack
//! around it is.

pub mod config;

pub use config::{ConfigError, LayoutConfig};

use strum_macros::{EnumCount as EnumCountMacro, EnumIter};

use crate::engine::TransitionSystem;
use crate::ring::{Gap, LayoutState};

/// Which branch of the allocation policy produced a transition.
///
/// Used as the derived edge category in the emitted graph and for the run
/// statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCountMacro, EnumIter)]
#[repr(u8)]
pub enum TransitionKind {
    /// First-fit reuse of an existing gap.
    GapReuse,
    /// Tail extension at an already-aligned tail.
    AlignedTail,
    /// Tail realignment that introduced a new gap.
    MisalignedTail,
}

impl TransitionKind {
    /// Short name, used in the run summary and as a Graphviz color.
    pub fn name(self) -> &'static str {
        match self {
            TransitionKind::GapReuse => "reuse",
            TransitionKind::AlignedTail => "aligned",
            TransitionKind::MisalignedTail => "misaligned",
        }
    }
}

/// Label carried on explorer edges: the requested size and the policy branch
/// that handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alloc {
    pub size: u32,
    pub kind: TransitionKind,
}

/// The padding-slot layouter for one ring configuration.
#[derive(Debug, Clone)]
pub struct Layouter {
    config: LayoutConfig,
}

impl Layouter {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Apply one allocation of `size` bytes to `state`.
    ///
    /// `size` must be a positive power of two no larger than the ring unit;
    /// [`LayoutConfig`] guarantees this for every size the explorer feeds in.
    pub fn allocate(&self, state: &LayoutState, size: u32) -> LayoutState {
        self.allocate_classified(state, size).0
    }

    /// As [`Self::allocate`], also reporting which policy branch fired.
    pub fn allocate_classified(
        &self,
        state: &LayoutState,
        size: u32,
    ) -> (LayoutState, TransitionKind) {
        let unit = self.config.unit();

        // First-fit: the first gap large enough, in scan order.
        if let Some(idx) = state.gaps().iter().position(|g| g.size >= size) {
            let mut gaps = state.gaps().to_vec();
            let gap = gaps.remove(idx);

            if gap.offset % size == 0 {
                // Aligned gap: consume the low end, keep any leftover in place.
                let leftover = gap.size - size;
                if leftover > 0 {
                    gaps.insert(idx, Gap::new(gap.offset + size, leftover));
                }
            } else {
                // Misaligned gap: split around the aligned allocation. The
                // pre-slack stays at the same position; it remains usable by
                // smaller requests later in the scan.
                let pre = size - gap.offset % size;
                gaps.insert(idx, Gap::new(gap.offset, pre));
                if gap.size > pre + size {
                    gaps.insert(idx + 1, Gap::new(gap.offset + pre + size, gap.size - pre - size));
                }
            }
            return (
                LayoutState::new(gaps, state.tail(), unit),
                TransitionKind::GapReuse,
            );
        }

        // No gap fits; the tail happens to satisfy the alignment.
        if state.tail() % size == 0 {
            return (
                LayoutState::new(state.gaps().to_vec(), state.tail() + size, unit),
                TransitionKind::AlignedTail,
            );
        }

        // No gap fits and the tail is misaligned: record the skipped bytes as
        // a gap and place the allocation at the realigned boundary.
        let skip = size - state.tail() % size;
        let mut gaps = state.gaps().to_vec();
        gaps.push(Gap::new(state.tail(), skip));
        (
            LayoutState::new(gaps, state.tail() + skip + size, unit),
            TransitionKind::MisalignedTail,
        )
    }
}

impl TransitionSystem for Layouter {
    type State = LayoutState;
    type Label = Alloc;

    fn root(&self) -> LayoutState {
        LayoutState::empty()
    }

    fn successors(&self, from: &LayoutState) -> Vec<(Alloc, LayoutState)> {
        self.config
            .sizes()
            .iter()
            .map(|&size| {
                let (to, kind) = self.allocate_classified(from, size);
                (Alloc { size, kind }, to)
            })
            .collect()
    }
}
