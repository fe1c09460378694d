// SPDX-License-Identifier: MIT OR Apache-2.0
//! Collaborator traits for host subsystems.
//!
//! Each trait covers one host capability a sequencer can call into.
//! They are injected per tick via [`HostContext`], where every slot is
//! independently optional: an unwired collaborator skips the side
//! effect, it never fails the tick.

use crate::node::{NodeId, ScriptId};

/// Trigger broadcast to reinitialize all enabled behavior scripts
pub const REINITIALIZE_ALL_BEHAVIORS: &str = "_reinitialize_all_behaviors";
/// Trigger broadcast to re-fire the awake event on all behavior scripts
pub const TRIGGER_ALL_AWAKE_BEHAVIORS: &str = "_trigger_all_awake_behaviors";
/// Trigger broadcast to re-fire the turn-on event on all behavior scripts
pub const TRIGGER_ALL_TURN_ON_BEHAVIORS: &str = "_trigger_all_turn_on_behaviors";

/// An auto-playing tween declared on a scene node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoTween {
    /// Node the tween animates
    pub target: NodeId,
    /// Tween name within the runner's registry
    pub name: String,
}

/// Scene graph access: enable state and subtree structure
pub trait SceneGraph {
    /// Enable or disable a node. Unknown nodes are ignored.
    fn set_enabled(&mut self, node: NodeId, enabled: bool);

    /// Whether a node is currently enabled (`false` for unknown nodes)
    fn is_enabled(&self, node: NodeId) -> bool;

    /// Direct children of a node, in scene order
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Auto-play tween declarations attached to a node (not its subtree)
    fn auto_play_tweens(&self, node: NodeId) -> Vec<AutoTween>;
}

/// Named-tween playback registry
pub trait TweenRunner {
    /// Start the named tween on a node
    fn start_tween(&mut self, node: NodeId, name: &str);

    /// Stop the named tween on a node
    fn stop_tween(&mut self, node: NodeId, name: &str);

    /// Whether the named tween is currently playing on a node
    fn is_playing(&self, node: NodeId, name: &str) -> bool;

    /// Rewind the named tween on a node to its initial state
    fn reset_tween(&mut self, node: NodeId, name: &str);
}

/// Global trigger broadcast bus
pub trait TriggerBus {
    /// Broadcast a named trigger to all listeners
    fn send_trigger(&mut self, name: &str);
}

/// Zero-argument actions exposed by script instances
pub trait ScriptApi {
    /// Whether a script exposes the named action
    fn has_action(&self, script: ScriptId, name: &str) -> bool;

    /// Invoke the named action on a script. Unknown script/action
    /// combinations are ignored; no return value is consumed.
    fn call_action(&mut self, script: ScriptId, name: &str);
}

/// A text or 3D-text display component
pub trait TextDisplay {
    /// Replace the displayed text
    fn set_text(&mut self, text: &str);
}

/// Per-tick bundle of collaborator handles.
///
/// Built fresh by the embedding each tick from whatever subsystems it
/// has wired up. Fields borrow independently, so an action can read the
/// scene while driving the tween runner.
#[derive(Default)]
pub struct HostContext<'a> {
    /// Scene graph, if wired
    pub scene: Option<&'a mut dyn SceneGraph>,
    /// Tween runner, if wired
    pub tweens: Option<&'a mut dyn TweenRunner>,
    /// Trigger bus, if wired
    pub triggers: Option<&'a mut dyn TriggerBus>,
    /// Script API table, if wired
    pub scripts: Option<&'a mut dyn ScriptApi>,
    /// Text display, if wired
    pub text: Option<&'a mut dyn TextDisplay>,
}

impl<'a> HostContext<'a> {
    /// A context with no collaborators wired; every effect is skipped
    pub fn empty() -> Self {
        Self::default()
    }
}
