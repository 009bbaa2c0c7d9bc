// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Data model for the padding ring: gaps and layout states.
//!
//! Pure data carriers with structural equality and hashing; all allocation
//! logic lives in [`crate::layout`].

pub mod gap;
pub mod state;

pub use gap::Gap;
pub use state::LayoutState;
