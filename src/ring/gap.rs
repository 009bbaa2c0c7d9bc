// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Gap value type.
//!
//! A gap is a free, reusable byte range inside the padding ring, given by its
//! offset from the start of the ring unit and its size in bytes. Gaps are
//! immutable: the transition function produces new gaps, it never mutates
//! existing ones.

use std::fmt;

/// A free contiguous byte range in the padding ring.
///
/// Equality and hashing are structural over `(offset, size)`; this is what
/// the explorer's deduplication relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gap {
    /// Offset from the start of the ring unit, in `[0, unit)`.
    pub offset: u32,
    /// Size in bytes, always positive.
    pub size: u32,
}

impl Gap {
    /// Create a new gap.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero. Zero-sized gaps are never produced by the
    /// layouter and would break the total-size accounting.
    pub fn new(offset: u32, size: u32) -> Self {
        assert!(size > 0, "Gap size must be positive: @{}:{}", offset, size);
        Self { offset, size }
    }
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}:{}", self.offset, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_equality() {
        assert_eq!(Gap::new(1, 3), Gap::new(1, 3));
        assert_ne!(Gap::new(1, 3), Gap::new(3, 1));
        assert_ne!(Gap::new(1, 3), Gap::new(1, 2));
    }

    #[test]
    fn test_gap_display() {
        assert_eq!(Gap::new(4, 2).to_string(), "@4:2");
    }

    #[test]
    #[should_panic(expected = "Gap size must be positive")]
    fn test_zero_sized_gap_rejected() {
        Gap::new(0, 0);
    }
}
