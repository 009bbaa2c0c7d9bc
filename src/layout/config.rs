// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Layouter configuration and validation.
//!
//! Validation happens once, before any exploration: a bad unit or size set is
//! a configuration error, never a mid-search failure.

use std::error::Error;
use std::fmt;

/// Errors raised while validating a [`LayoutConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The ring unit is zero or not a power of two.
    UnitNotPowerOfTwo { unit: u32 },

    /// An allocation size is zero or not a power of two.
    SizeNotPowerOfTwo { size: u32 },

    /// An allocation size exceeds the ring unit.
    SizeExceedsUnit { size: u32, unit: u32 },

    /// The allocation sizes are not strictly ascending.
    SizesNotAscending { prev: u32, next: u32 },

    /// No allocation sizes were given.
    NoSizes,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnitNotPowerOfTwo { unit } => {
                write!(f, "Ring unit {} is not a power of two", unit)
            }
            ConfigError::SizeNotPowerOfTwo { size } => {
                write!(f, "Allocation size {} is not a power of two", size)
            }
            ConfigError::SizeExceedsUnit { size, unit } => {
                write!(f, "Allocation size {} exceeds ring unit {}", size, unit)
            }
            ConfigError::SizesNotAscending { prev, next } => {
                write!(f, "Allocation sizes not ascending: {} before {}", prev, next)
            }
            ConfigError::NoSizes => write!(f, "No allocation sizes given"),
        }
    }
}

impl Error for ConfigError {}

/// Validated input to a verification run: the ring unit and the ascending
/// set of allowed allocation sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    unit: u32,
    sizes: Vec<u32>,
}

impl LayoutConfig {
    /// Validate a unit and an explicit size list.
    pub fn new(unit: u32, sizes: Vec<u32>) -> Result<Self, ConfigError> {
        if !unit.is_power_of_two() {
            return Err(ConfigError::UnitNotPowerOfTwo { unit });
        }
        if sizes.is_empty() {
            return Err(ConfigError::NoSizes);
        }
        let mut prev = None;
        for &size in &sizes {
            if !size.is_power_of_two() {
                return Err(ConfigError::SizeNotPowerOfTwo { size });
            }
            if size > unit {
                return Err(ConfigError::SizeExceedsUnit { size, unit });
            }
            if let Some(prev) = prev {
                if size <= prev {
                    return Err(ConfigError::SizesNotAscending { prev, next: size });
                }
            }
            prev = Some(size);
        }
        Ok(Self { unit, sizes })
    }

    /// The conventional configuration: every power of two `1..=unit`.
    pub fn all_sizes(unit: u32) -> Result<Self, ConfigError> {
        if !unit.is_power_of_two() {
            return Err(ConfigError::UnitNotPowerOfTwo { unit });
        }
        let sizes = (0..=unit.trailing_zeros()).map(|i| 1u32 << i).collect();
        Self::new(unit, sizes)
    }

    /// The ring unit U.
    pub fn unit(&self) -> u32 {
        self.unit
    }

    /// Allowed allocation sizes, strictly ascending.
    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }
}
