// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Self-verifying slot layouter for a circular padding buffer.
//!
//! The layouter packs power-of-two-sized, alignment-sensitive allocations
//! into a repeating ring of U bytes (U a power of two), inserting padding
//! gaps only where alignment forces it. The crate exhaustively enumerates
//! every state the layouter can reach under every allowed allocation
//! sequence and proves that no reachable state ever accumulates a whole
//! unit of slack.
//!
//! # Architecture
//!
//! Four layers, leaves first:
//!
//! - [`ring`] — the data model: [`ring::Gap`] (a free byte range) and
//!   [`ring::LayoutState`] (ordered free list + tail pointer). Pure data,
//!   structural equality.
//! - [`layout`] — the allocation policy: [`layout::Layouter::allocate`], a
//!   pure transition function choosing between first-fit gap reuse, aligned
//!   tail extension, and tail realignment.
//! - [`engine`] — a generic breadth-first fixpoint search over any
//!   [`engine::TransitionSystem`]; the layouter is just one such system.
//! - [`verify`] / [`report`] — the gap-bound check over the explored
//!   universe, plus the DOT graph and histogram artifacts.
//!
//! # Example
//!
//! ```
//! use gapsim::engine::explore;
//! use gapsim::layout::{LayoutConfig, Layouter};
//! use gapsim::verify::verify_gap_bound;
//!
//! let config = LayoutConfig::all_sizes(8)?;
//! let layouter = Layouter::new(config);
//! let reachable = explore(&layouter);
//! let verification = verify_gap_bound(&reachable, 8).expect("gap bound holds");
//! assert!(verification.histogram.worst() < 8);
//! # Ok::<(), gapsim::layout::ConfigError>(())
//! ```

pub mod engine;
pub mod layout;
pub mod report;
pub mod ring;
pub mod verify;

// Re-export commonly used types
pub use engine::{explore, Edge, Reachable, TransitionSystem};
pub use layout::{Alloc, ConfigError, LayoutConfig, Layouter, TransitionKind};
pub use ring::{Gap, LayoutState};
pub use verify::{verify_gap_bound, GapBoundViolation, Verification};
