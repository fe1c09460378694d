// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host capability model for CueLens.
//!
//! CueLens scripts run embedded in an AR host runtime that owns the
//! scene graph, tween subsystem, trigger bus, script instances and text
//! displays. This crate defines the narrow contracts CueLens needs from
//! those subsystems:
//! - Opaque handles ([`NodeId`], [`ScriptId`])
//! - One trait per collaborator
//! - [`HostContext`], the per-tick bundle of optional collaborator
//!   handles
//! - [`MemoryHost`], an in-memory implementation with an event journal
//!   for tests and headless playback
//!
//! ## Architecture
//!
//! Every collaborator is optional at every call: CueLens treats an
//! absent subsystem as "skip the effect", never as an error.

pub mod capability;
pub mod memory;
pub mod node;

pub use capability::{
    AutoTween, HostContext, SceneGraph, ScriptApi, TextDisplay, TriggerBus, TweenRunner,
    REINITIALIZE_ALL_BEHAVIORS, TRIGGER_ALL_AWAKE_BEHAVIORS, TRIGGER_ALL_TURN_ON_BEHAVIORS,
};
pub use memory::{
    HostEvent, MemoryHost, MemoryScene, MemoryScripts, MemoryText, MemoryTriggers, MemoryTweens,
};
pub use node::{NodeId, ScriptId};
