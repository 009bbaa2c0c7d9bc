// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Layout state: the ordered free list plus the tail pointer.
//!
//! The gap list is kept in free-list scan order, not sorted by offset or
//! size. First-fit scans it in this order, and the "reinsert at the same
//! position" rule in the layouter depends on it, so state equality must be
//! order-sensitive.

use std::fmt;

use crate::ring::Gap;

/// One reachable state of the layouter.
///
/// `tail` is the offset one past the last tail-extended allocation; it is
/// independent of the gap list. Both the tail and all gap offsets are reduced
/// modulo the ring unit at construction, so equal states compare equal no
/// matter how many whole units the underlying sequence has consumed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutState {
    gaps: Vec<Gap>,
    tail: u32,
}

impl LayoutState {
    /// The sole root state: no gaps, tail at the start of the unit.
    pub fn empty() -> Self {
        Self {
            gaps: Vec::new(),
            tail: 0,
        }
    }

    /// Construct a state, wrapping all offsets into `[0, unit)`.
    pub fn new(gaps: Vec<Gap>, tail: u32, unit: u32) -> Self {
        let gaps = gaps
            .into_iter()
            .map(|g| Gap::new(g.offset % unit, g.size))
            .collect();
        Self {
            gaps,
            tail: tail % unit,
        }
    }

    /// The free list, in scan order.
    pub fn gaps(&self) -> &[Gap] {
        &self.gaps
    }

    /// Offset one past the last tail-extended allocation.
    pub fn tail(&self) -> u32 {
        self.tail
    }

    /// Total bytes of slack currently held in gaps.
    ///
    /// The verified property is that this stays below the ring unit for
    /// every reachable state.
    pub fn total_gaps(&self) -> u32 {
        self.gaps.iter().map(|g| g.size).sum()
    }
}

impl fmt::Display for LayoutState {
    /// Canonical form, used verbatim as the graph node label:
    /// `[@1:1, @4:2], @*:6`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, g) in self.gaps.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", g)?;
        }
        write!(f, "], @*:{}", self.tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state() {
        let s = LayoutState::empty();
        assert!(s.gaps().is_empty());
        assert_eq!(s.tail(), 0);
        assert_eq!(s.total_gaps(), 0);
    }

    #[test]
    fn test_offsets_wrap_mod_unit() {
        let s = LayoutState::new(vec![Gap::new(9, 2)], 12, 8);
        assert_eq!(s.gaps(), &[Gap::new(1, 2)]);
        assert_eq!(s.tail(), 4);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a = LayoutState::new(vec![Gap::new(1, 1), Gap::new(4, 2)], 6, 8);
        let b = LayoutState::new(vec![Gap::new(4, 2), Gap::new(1, 1)], 6, 8);
        assert_ne!(a, b);
        assert_eq!(a.total_gaps(), b.total_gaps());
    }

    #[test]
    fn test_display_form() {
        let s = LayoutState::new(vec![Gap::new(1, 1), Gap::new(4, 2)], 6, 8);
        assert_eq!(s.to_string(), "[@1:1, @4:2], @*:6");
        assert_eq!(LayoutState::empty().to_string(), "[], @*:0");
    }
}
