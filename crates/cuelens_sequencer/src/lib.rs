// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timestamp action sequencer for CueLens.
//!
//! This crate fires side effects against a host as an external
//! playhead crosses cue timestamps:
//! - Sequence mode: one slot per timestamp, started in ascending order,
//!   each start preceded by the previous slot's reset
//! - Single mode: one timestamp firing every configured target once per
//!   forward crossing
//! - Five interchangeable action targets: scene toggle, tween,
//!   capability call, trigger broadcast, text
//! - RON cue sheets with build-time validation
//!
//! ## Architecture
//!
//! The sequencer is built on:
//! - A [`Timeline`] of cue timestamps and a scanning [`Cursor`]
//! - [`ActionTarget`] dispatch into [`cuelens_host`] collaborator
//!   traits, every collaborator optional per call
//! - External tick driving: the embedding samples its time source once
//!   per frame and calls [`Sequencer::tick`]

pub mod config;
pub mod restart;
pub mod sequencer;
pub mod target;
pub mod timeline;

pub use config::{ActionConfig, CueSheet, CueSheetError};
pub use restart::{restart_auto_tweens, restart_helpers};
pub use sequencer::Sequencer;
pub use target::{ActionTarget, RestartConfig};
pub use timeline::{Cursor, PlayheadSample, Timeline};
