// SPDX-License-Identifier: MIT OR Apache-2.0
//! Action targets: the side effect a slot performs on start/reset.

use crate::restart;
use cuelens_host::{HostContext, NodeId, ScriptId};
use serde::{Deserialize, Serialize};

/// Restart behavior applied after enabling a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestartConfig {
    /// Restart auto-play tweens found in the enabled node's subtree
    pub tweens: bool,
    /// Broadcast behavior-restart triggers on the bus
    pub behaviors: bool,
    /// Reinitialize all enabled behavior scripts
    pub reinitialize: bool,
    /// Re-fire the awake event on behavior scripts
    pub call_awake: bool,
    /// Re-fire the turn-on event on behavior scripts
    pub call_turn_on: bool,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            tweens: false,
            behaviors: false,
            reinitialize: true,
            call_awake: true,
            call_turn_on: true,
        }
    }
}

/// The side effect performed when a slot starts or resets.
///
/// Every variant tolerates an absent collaborator in the
/// [`HostContext`]; the effect is skipped, never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionTarget {
    /// Enable/disable a scene node, optionally restarting helper
    /// scripts in its subtree on enable
    SceneToggle {
        /// Node to toggle
        node: NodeId,
        /// Restart behavior applied on enable
        restart: RestartConfig,
    },
    /// Play/stop a named tween on a node
    Tween {
        /// Node the tween animates
        node: NodeId,
        /// Tween name within the runner's registry
        name: String,
    },
    /// Invoke named zero-argument actions on a script instance
    Capability {
        /// Script hosting the actions
        script: ScriptId,
        /// Action invoked on start, skipped when unset
        start: Option<String>,
        /// Action invoked on reset, skipped when unset
        stop: Option<String>,
    },
    /// Broadcast a named trigger; reset is a no-op
    Trigger {
        /// Trigger name
        name: String,
    },
    /// Set the display text; reset is a no-op
    Text {
        /// Text shown when the slot starts
        value: String,
    },
}

impl ActionTarget {
    /// Perform the slot's start effect
    pub fn start(&self, host: &mut HostContext<'_>) {
        match self {
            Self::SceneToggle { node, restart } => {
                // Helpers restart only after an actual enable; no
                // scene graph means nothing was enabled.
                let Some(scene) = host.scene.as_deref_mut() else {
                    return;
                };
                scene.set_enabled(*node, true);
                restart::restart_helpers(*node, restart, host);
            }
            Self::Tween { node, name } => {
                if let Some(tweens) = host.tweens.as_deref_mut() {
                    tweens.start_tween(*node, name);
                }
            }
            Self::Capability { script, start, .. } => {
                if let (Some(api), Some(name)) = (host.scripts.as_deref_mut(), start) {
                    api.call_action(*script, name);
                }
            }
            Self::Trigger { name } => {
                if let Some(bus) = host.triggers.as_deref_mut() {
                    bus.send_trigger(name);
                }
            }
            Self::Text { value } => {
                if let Some(display) = host.text.as_deref_mut() {
                    display.set_text(value);
                }
            }
        }
    }

    /// Perform the slot's reset effect
    pub fn reset(&self, host: &mut HostContext<'_>) {
        match self {
            Self::SceneToggle { node, .. } => {
                if let Some(scene) = host.scene.as_deref_mut() {
                    scene.set_enabled(*node, false);
                }
            }
            Self::Tween { node, name } => {
                // Stop only when the runner reports it playing, so a
                // reset of a never-started tween stays a no-op.
                if let Some(tweens) = host.tweens.as_deref_mut() {
                    if tweens.is_playing(*node, name) {
                        tweens.stop_tween(*node, name);
                    }
                }
            }
            Self::Capability { script, stop, .. } => {
                if let (Some(api), Some(name)) = (host.scripts.as_deref_mut(), stop) {
                    api.call_action(*script, name);
                }
            }
            Self::Trigger { .. } | Self::Text { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuelens_host::{HostEvent, MemoryHost, SceneGraph};

    #[test]
    fn test_scene_toggle_start_and_reset() {
        let mut host = MemoryHost::new();
        let node = host.scene.add_node("crystal");
        host.scene.set_enabled(node, false);
        host.take_events();

        let target = ActionTarget::SceneToggle {
            node,
            restart: RestartConfig::default(),
        };

        target.start(&mut host.context());
        assert!(host.scene.is_enabled(node));
        target.reset(&mut host.context());
        assert!(!host.scene.is_enabled(node));
    }

    #[test]
    fn test_tween_reset_only_stops_when_playing() {
        let mut host = MemoryHost::new();
        let node = host.scene.add_node("door");
        let target = ActionTarget::Tween {
            node,
            name: "open".to_string(),
        };

        target.reset(&mut host.context());
        assert!(host.take_events().is_empty());

        target.start(&mut host.context());
        target.reset(&mut host.context());
        assert_eq!(
            host.take_events(),
            vec![
                HostEvent::TweenStarted {
                    node,
                    name: "open".to_string()
                },
                HostEvent::TweenStopped {
                    node,
                    name: "open".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_capability_sides_are_independent() {
        let mut host = MemoryHost::new();
        let script = host.scripts.add_script();
        host.scripts.register_action(script, "go", || {});

        let target = ActionTarget::Capability {
            script,
            start: Some("go".to_string()),
            stop: None,
        };

        target.start(&mut host.context());
        target.reset(&mut host.context());
        assert_eq!(
            host.take_events(),
            vec![HostEvent::ActionCalled {
                script,
                name: "go".to_string()
            }]
        );
    }

    #[test]
    fn test_trigger_and_text_reset_are_noops() {
        let mut host = MemoryHost::new();

        let trigger = ActionTarget::Trigger {
            name: "flash".to_string(),
        };
        let text = ActionTarget::Text {
            value: "hola".to_string(),
        };

        trigger.reset(&mut host.context());
        text.reset(&mut host.context());
        assert!(host.take_events().is_empty());

        trigger.start(&mut host.context());
        text.start(&mut host.context());
        assert_eq!(host.text.current(), "hola");
        assert_eq!(host.take_events().len(), 2);
    }

    #[test]
    fn test_scene_toggle_without_scene_skips_restart() {
        let mut host = MemoryHost::new();
        let node = host.scene.add_node("crystal");
        let target = ActionTarget::SceneToggle {
            node,
            restart: RestartConfig {
                behaviors: true,
                ..RestartConfig::default()
            },
        };

        let mut ctx = HostContext {
            triggers: Some(&mut host.triggers),
            ..HostContext::empty()
        };
        target.start(&mut ctx);
        assert!(
            host.take_events().is_empty(),
            "no enable, so no restart triggers"
        );
    }

    #[test]
    fn test_absent_collaborators_skip_silently() {
        let mut host = HostContext::empty();
        let target = ActionTarget::Trigger {
            name: "flash".to_string(),
        };
        target.start(&mut host);
        target.reset(&mut host);
    }
}
