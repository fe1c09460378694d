// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory host for tests and headless playback.
//!
//! [`MemoryHost`] implements every collaborator trait over plain data
//! structures and journals each mutation as a [`HostEvent`], so callers
//! can assert the exact order of side effects across subsystems.

use crate::capability::{
    AutoTween, HostContext, SceneGraph, ScriptApi, TextDisplay, TriggerBus, TweenRunner,
};
use crate::node::{NodeId, ScriptId};
use indexmap::{IndexMap, IndexSet};
use std::cell::RefCell;
use std::rc::Rc;

/// One recorded host mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A node's enable flag changed
    NodeEnabled {
        /// Affected node
        node: NodeId,
        /// New enable state
        enabled: bool,
    },
    /// A tween was started
    TweenStarted {
        /// Animated node
        node: NodeId,
        /// Tween name
        name: String,
    },
    /// A tween was stopped
    TweenStopped {
        /// Animated node
        node: NodeId,
        /// Tween name
        name: String,
    },
    /// A tween was rewound to its initial state
    TweenReset {
        /// Animated node
        node: NodeId,
        /// Tween name
        name: String,
    },
    /// A trigger was broadcast
    TriggerSent {
        /// Trigger name
        name: String,
    },
    /// A script action was invoked
    ActionCalled {
        /// Target script
        script: ScriptId,
        /// Action name
        name: String,
    },
    /// The text display changed
    TextSet {
        /// New text
        text: String,
    },
}

/// Shared journal of host mutations, in call order
type EventLog = Rc<RefCell<Vec<HostEvent>>>;

/// Node record in the in-memory scene
#[derive(Debug, Clone, Default)]
struct NodeData {
    name: String,
    enabled: bool,
    children: Vec<NodeId>,
    auto_tweens: Vec<AutoTween>,
}

/// In-memory scene graph
pub struct MemoryScene {
    nodes: IndexMap<NodeId, NodeData>,
    log: EventLog,
}

impl MemoryScene {
    fn new(log: EventLog) -> Self {
        Self {
            nodes: IndexMap::new(),
            log,
        }
    }

    /// Add a root node, enabled by default
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId::new();
        self.add_node_with_id(id, name);
        id
    }

    /// Add a root node under a host-assigned ID, enabled by default
    pub fn add_node_with_id(&mut self, id: NodeId, name: impl Into<String>) {
        self.nodes.insert(
            id,
            NodeData {
                name: name.into(),
                enabled: true,
                children: Vec::new(),
                auto_tweens: Vec::new(),
            },
        );
    }

    /// Add a child node under an existing parent
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = self.add_node(name);
        if let Some(data) = self.nodes.get_mut(&parent) {
            data.children.push(id);
        }
        id
    }

    /// Declare an auto-play tween on a node
    pub fn add_auto_tween(&mut self, node: NodeId, name: impl Into<String>, target: NodeId) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.auto_tweens.push(AutoTween {
                target,
                name: name.into(),
            });
        }
    }

    /// Name of a node, if known
    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|d| d.name.as_str())
    }
}

impl SceneGraph for MemoryScene {
    fn set_enabled(&mut self, node: NodeId, enabled: bool) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.enabled = enabled;
            self.log
                .borrow_mut()
                .push(HostEvent::NodeEnabled { node, enabled });
        }
    }

    fn is_enabled(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|d| d.enabled)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|d| d.children.clone())
            .unwrap_or_default()
    }

    fn auto_play_tweens(&self, node: NodeId) -> Vec<AutoTween> {
        self.nodes
            .get(&node)
            .map(|d| d.auto_tweens.clone())
            .unwrap_or_default()
    }
}

/// In-memory tween registry tracking the currently playing set
pub struct MemoryTweens {
    playing: IndexSet<(NodeId, String)>,
    log: EventLog,
}

impl MemoryTweens {
    fn new(log: EventLog) -> Self {
        Self {
            playing: IndexSet::new(),
            log,
        }
    }
}

impl TweenRunner for MemoryTweens {
    fn start_tween(&mut self, node: NodeId, name: &str) {
        self.playing.insert((node, name.to_string()));
        self.log.borrow_mut().push(HostEvent::TweenStarted {
            node,
            name: name.to_string(),
        });
    }

    fn stop_tween(&mut self, node: NodeId, name: &str) {
        self.playing.shift_remove(&(node, name.to_string()));
        self.log.borrow_mut().push(HostEvent::TweenStopped {
            node,
            name: name.to_string(),
        });
    }

    fn is_playing(&self, node: NodeId, name: &str) -> bool {
        self.playing.contains(&(node, name.to_string()))
    }

    fn reset_tween(&mut self, node: NodeId, name: &str) {
        self.playing.shift_remove(&(node, name.to_string()));
        self.log.borrow_mut().push(HostEvent::TweenReset {
            node,
            name: name.to_string(),
        });
    }
}

/// In-memory trigger bus
pub struct MemoryTriggers {
    log: EventLog,
}

impl MemoryTriggers {
    fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl TriggerBus for MemoryTriggers {
    fn send_trigger(&mut self, name: &str) {
        self.log.borrow_mut().push(HostEvent::TriggerSent {
            name: name.to_string(),
        });
    }
}

/// In-memory script API table
pub struct MemoryScripts {
    actions: IndexMap<ScriptId, IndexMap<String, Box<dyn FnMut()>>>,
    log: EventLog,
}

impl MemoryScripts {
    fn new(log: EventLog) -> Self {
        Self {
            actions: IndexMap::new(),
            log,
        }
    }

    /// Register a new script instance
    pub fn add_script(&mut self) -> ScriptId {
        let id = ScriptId::new();
        self.add_script_with_id(id);
        id
    }

    /// Register a script instance under a host-assigned ID
    pub fn add_script_with_id(&mut self, id: ScriptId) {
        self.actions.entry(id).or_default();
    }

    /// Register a zero-argument action on a script
    pub fn register_action(
        &mut self,
        script: ScriptId,
        name: impl Into<String>,
        action: impl FnMut() + 'static,
    ) {
        self.actions
            .entry(script)
            .or_default()
            .insert(name.into(), Box::new(action));
    }
}

impl ScriptApi for MemoryScripts {
    fn has_action(&self, script: ScriptId, name: &str) -> bool {
        self.actions
            .get(&script)
            .is_some_and(|table| table.contains_key(name))
    }

    fn call_action(&mut self, script: ScriptId, name: &str) {
        let Some(action) = self.actions.get_mut(&script).and_then(|t| t.get_mut(name)) else {
            return;
        };
        self.log.borrow_mut().push(HostEvent::ActionCalled {
            script,
            name: name.to_string(),
        });
        action();
    }
}

/// In-memory text display
pub struct MemoryText {
    value: String,
    log: EventLog,
}

impl MemoryText {
    fn new(log: EventLog) -> Self {
        Self {
            value: String::new(),
            log,
        }
    }

    /// Text currently shown
    pub fn current(&self) -> &str {
        &self.value
    }
}

impl TextDisplay for MemoryText {
    fn set_text(&mut self, text: &str) {
        self.value = text.to_string();
        self.log.borrow_mut().push(HostEvent::TextSet {
            text: text.to_string(),
        });
    }
}

/// In-memory host wiring all five collaborators over one journal
pub struct MemoryHost {
    /// Scene graph component
    pub scene: MemoryScene,
    /// Tween registry component
    pub tweens: MemoryTweens,
    /// Trigger bus component
    pub triggers: MemoryTriggers,
    /// Script API component
    pub scripts: MemoryScripts,
    /// Text display component
    pub text: MemoryText,
    log: EventLog,
}

impl MemoryHost {
    /// Create an empty host
    pub fn new() -> Self {
        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        Self {
            scene: MemoryScene::new(Rc::clone(&log)),
            tweens: MemoryTweens::new(Rc::clone(&log)),
            triggers: MemoryTriggers::new(Rc::clone(&log)),
            scripts: MemoryScripts::new(Rc::clone(&log)),
            text: MemoryText::new(Rc::clone(&log)),
            log,
        }
    }

    /// Borrow every collaborator as a [`HostContext`]
    pub fn context(&mut self) -> HostContext<'_> {
        HostContext {
            scene: Some(&mut self.scene),
            tweens: Some(&mut self.tweens),
            triggers: Some(&mut self.triggers),
            scripts: Some(&mut self.scripts),
            text: Some(&mut self.text),
        }
    }

    /// Drain the journal, returning events in call order
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}
