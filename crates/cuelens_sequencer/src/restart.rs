// SPDX-License-Identifier: MIT OR Apache-2.0
//! Helper-script restart after enabling a scene node.
//!
//! Re-enabling a node does not re-run lifecycle hooks in the host, so a
//! slot can optionally broadcast the behavior-restart triggers and
//! re-fire auto-play tweens found anywhere in the enabled subtree.

use crate::target::RestartConfig;
use cuelens_host::{
    HostContext, NodeId, REINITIALIZE_ALL_BEHAVIORS, TRIGGER_ALL_AWAKE_BEHAVIORS,
    TRIGGER_ALL_TURN_ON_BEHAVIORS,
};

/// Apply the configured restart side effects for an enabled node
pub fn restart_helpers(node: NodeId, opts: &RestartConfig, host: &mut HostContext<'_>) {
    if opts.behaviors {
        if let Some(bus) = host.triggers.as_deref_mut() {
            if opts.reinitialize {
                bus.send_trigger(REINITIALIZE_ALL_BEHAVIORS);
            }
            if opts.call_awake {
                bus.send_trigger(TRIGGER_ALL_AWAKE_BEHAVIORS);
            }
            if opts.call_turn_on {
                bus.send_trigger(TRIGGER_ALL_TURN_ON_BEHAVIORS);
            }
        }
    }
    if opts.tweens {
        restart_auto_tweens(node, host);
    }
}

/// Reset-then-start every auto-play tween declared in a node's subtree.
///
/// Depth-first over an explicit stack, visiting each node once in scene
/// order. Requires both the scene graph and the tween runner; skipped
/// when either is absent.
pub fn restart_auto_tweens(node: NodeId, host: &mut HostContext<'_>) {
    let HostContext {
        scene: Some(scene),
        tweens: Some(tweens),
        ..
    } = host
    else {
        return;
    };

    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        for auto in scene.auto_play_tweens(current) {
            tweens.reset_tween(auto.target, &auto.name);
            tweens.start_tween(auto.target, &auto.name);
        }
        let mut children = scene.children(current);
        children.reverse();
        stack.extend(children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuelens_host::{HostEvent, MemoryHost};

    #[test]
    fn test_behavior_triggers_follow_flags() {
        let mut host = MemoryHost::new();
        let node = host.scene.add_node("root");

        let opts = RestartConfig {
            behaviors: true,
            call_awake: false,
            ..RestartConfig::default()
        };
        restart_helpers(node, &opts, &mut host.context());

        assert_eq!(
            host.take_events(),
            vec![
                HostEvent::TriggerSent {
                    name: REINITIALIZE_ALL_BEHAVIORS.to_string()
                },
                HostEvent::TriggerSent {
                    name: TRIGGER_ALL_TURN_ON_BEHAVIORS.to_string()
                },
            ]
        );
    }

    #[test]
    fn test_behaviors_disabled_sends_nothing() {
        let mut host = MemoryHost::new();
        let node = host.scene.add_node("root");

        restart_helpers(node, &RestartConfig::default(), &mut host.context());
        assert!(host.take_events().is_empty());
    }

    #[test]
    fn test_auto_tweens_restart_depth_first_in_scene_order() {
        let mut host = MemoryHost::new();
        let root = host.scene.add_node("root");
        let first = host.scene.add_child(root, "first");
        let second = host.scene.add_child(root, "second");
        let grandchild = host.scene.add_child(first, "grandchild");

        host.scene.add_auto_tween(root, "r", root);
        host.scene.add_auto_tween(grandchild, "g", grandchild);
        host.scene.add_auto_tween(second, "s", second);

        restart_auto_tweens(root, &mut host.context());

        let names: Vec<String> = host
            .take_events()
            .into_iter()
            .filter_map(|e| match e {
                HostEvent::TweenStarted { name, .. } => Some(name),
                _ => None,
            })
            .collect();
        // root subtree before its siblings, first child's subtree
        // before the second child
        assert_eq!(names, vec!["r", "g", "s"]);
    }

    #[test]
    fn test_each_tween_is_reset_before_start() {
        let mut host = MemoryHost::new();
        let root = host.scene.add_node("root");
        host.scene.add_auto_tween(root, "spin", root);

        restart_auto_tweens(root, &mut host.context());

        assert_eq!(
            host.take_events(),
            vec![
                HostEvent::TweenReset {
                    node: root,
                    name: "spin".to_string()
                },
                HostEvent::TweenStarted {
                    node: root,
                    name: "spin".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_missing_tween_runner_skips() {
        let mut host = MemoryHost::new();
        let root = host.scene.add_node("root");
        host.scene.add_auto_tween(root, "spin", root);

        let mut ctx = HostContext {
            scene: Some(&mut host.scene),
            ..HostContext::empty()
        };
        restart_auto_tweens(root, &mut ctx);
        assert!(host.take_events().is_empty());
    }
}
