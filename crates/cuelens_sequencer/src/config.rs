// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cue sheet configuration and build-time validation.
//!
//! A [`CueSheet`] is the serialized description of one sequencer: the
//! timeline plus one action type with its per-slot data. Sheets are
//! stored as RON and validated once by [`CueSheet::build`]; a sheet
//! that fails validation never produces a ticking sequencer.

use crate::sequencer::Sequencer;
use crate::target::{ActionTarget, RestartConfig};
use crate::timeline::Timeline;
use cuelens_host::{NodeId, ScriptApi, ScriptId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cue sheet validation and parse errors
#[derive(Debug, Error)]
pub enum CueSheetError {
    /// Sequence timeline with no timestamps
    #[error("cue sheet has no timestamps")]
    EmptyTimeline,

    /// Action carries no per-slot data
    #[error("cue sheet has no action targets")]
    NoTargets,

    /// Sequence-mode timestamps and target data disagree in length
    #[error("timestamp count {timestamps} does not match target count {targets}")]
    CountMismatch {
        /// Number of timeline timestamps
        timestamps: usize,
        /// Number of configured targets
        targets: usize,
    },

    /// Malformed RON input
    #[error("failed to parse cue sheet: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

fn default_start_action() -> Option<String> {
    Some("start".to_string())
}

fn default_stop_action() -> Option<String> {
    Some("stop".to_string())
}

/// One action type with its per-slot data arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionConfig {
    /// Enable/disable scene nodes
    SceneToggle {
        /// One node per slot
        nodes: Vec<NodeId>,
        /// Restart behavior applied on enable
        #[serde(default)]
        restart: RestartConfig,
    },
    /// Start/stop one named tween across nodes
    Tween {
        /// Tween name shared by every slot
        name: String,
        /// One animated node per slot
        nodes: Vec<NodeId>,
    },
    /// Invoke zero-argument script actions
    Capability {
        /// One script instance per slot
        scripts: Vec<ScriptId>,
        /// Action invoked on start (`None` skips that side)
        #[serde(default = "default_start_action")]
        start_action: Option<String>,
        /// Action invoked on reset (`None` skips that side)
        #[serde(default = "default_stop_action")]
        stop_action: Option<String>,
    },
    /// Broadcast named triggers
    Trigger {
        /// One trigger name per slot
        names: Vec<String>,
    },
    /// Set display text
    Text {
        /// One text value per slot
        values: Vec<String>,
    },
}

impl ActionConfig {
    /// Number of slots this action configures
    pub fn slot_count(&self) -> usize {
        match self {
            Self::SceneToggle { nodes, .. } | Self::Tween { nodes, .. } => nodes.len(),
            Self::Capability { scripts, .. } => scripts.len(),
            Self::Trigger { names } => names.len(),
            Self::Text { values } => values.len(),
        }
    }
}

/// Serialized sequencer description: timeline plus action data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueSheet {
    /// Cue timestamps
    pub timeline: Timeline,
    /// Action type and per-slot data
    pub action: ActionConfig,
}

impl CueSheet {
    /// Parse a cue sheet from RON
    pub fn from_ron(source: &str) -> Result<Self, CueSheetError> {
        Ok(ron::from_str(source)?)
    }

    /// Serialize the cue sheet to pretty RON
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Validate the sheet and build its [`Sequencer`].
    ///
    /// Passing a [`ScriptApi`] resolves capability action names up
    /// front; a name a script does not expose is reported with a
    /// `tracing` diagnostic but still builds, since absence skips at
    /// runtime.
    pub fn build(&self, scripts: Option<&dyn ScriptApi>) -> Result<Sequencer, CueSheetError> {
        if self.timeline.is_empty() {
            return Err(CueSheetError::EmptyTimeline);
        }
        let slots = self.action.slot_count();
        if slots == 0 {
            return Err(CueSheetError::NoTargets);
        }
        if let Timeline::Sequence(timestamps) = &self.timeline {
            if timestamps.len() != slots {
                return Err(CueSheetError::CountMismatch {
                    timestamps: timestamps.len(),
                    targets: slots,
                });
            }
        }
        if !self.timeline.is_sorted() {
            tracing::warn!("cue timestamps are not in ascending order");
        }

        let targets = self.targets(scripts);
        Ok(match &self.timeline {
            Timeline::Sequence(timestamps) => Sequencer::sequence(timestamps.clone(), targets),
            Timeline::Single(timestamp) => Sequencer::single(*timestamp, targets),
        })
    }

    fn targets(&self, resolver: Option<&dyn ScriptApi>) -> Vec<ActionTarget> {
        match &self.action {
            ActionConfig::SceneToggle { nodes, restart } => nodes
                .iter()
                .map(|&node| ActionTarget::SceneToggle {
                    node,
                    restart: *restart,
                })
                .collect(),
            ActionConfig::Tween { name, nodes } => nodes
                .iter()
                .map(|&node| ActionTarget::Tween {
                    node,
                    name: name.clone(),
                })
                .collect(),
            ActionConfig::Capability {
                scripts,
                start_action,
                stop_action,
            } => scripts
                .iter()
                .map(|&script| {
                    if let Some(api) = resolver {
                        for name in [start_action, stop_action].into_iter().flatten() {
                            if !api.has_action(script, name) {
                                tracing::warn!("script {script:?} does not expose action '{name}'");
                            }
                        }
                    }
                    ActionTarget::Capability {
                        script,
                        start: start_action.clone(),
                        stop: stop_action.clone(),
                    }
                })
                .collect(),
            ActionConfig::Trigger { names } => names
                .iter()
                .map(|name| ActionTarget::Trigger { name: name.clone() })
                .collect(),
            ActionConfig::Text { values } => values
                .iter()
                .map(|value| ActionTarget::Text {
                    value: value.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuelens_host::MemoryHost;

    fn trigger_sheet(timestamps: Vec<f32>, names: &[&str]) -> CueSheet {
        CueSheet {
            timeline: Timeline::Sequence(timestamps),
            action: ActionConfig::Trigger {
                names: names.iter().map(|n| n.to_string()).collect(),
            },
        }
    }

    #[test]
    fn test_build_sequence_sheet() {
        let sheet = trigger_sheet(vec![1.0, 2.0], &["a", "b"]);
        let seq = sheet.build(None).unwrap();
        assert_eq!(seq.slot_count(), 2);
        assert_eq!(seq.timeline(), Timeline::Sequence(vec![1.0, 2.0]));
    }

    #[test]
    fn test_empty_timeline_rejected() {
        let sheet = trigger_sheet(Vec::new(), &[]);
        assert!(matches!(
            sheet.build(None),
            Err(CueSheetError::EmptyTimeline)
        ));
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let sheet = trigger_sheet(vec![1.0, 2.0, 3.0], &["a", "b"]);
        assert!(matches!(
            sheet.build(None),
            Err(CueSheetError::CountMismatch {
                timestamps: 3,
                targets: 2
            })
        ));
    }

    #[test]
    fn test_single_sheet_allows_any_target_count() {
        let sheet = CueSheet {
            timeline: Timeline::Single(2.0),
            action: ActionConfig::Trigger {
                names: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            },
        };
        assert_eq!(sheet.build(None).unwrap().slot_count(), 3);
    }

    #[test]
    fn test_single_sheet_without_targets_rejected() {
        let sheet = CueSheet {
            timeline: Timeline::Single(2.0),
            action: ActionConfig::Trigger { names: Vec::new() },
        };
        assert!(matches!(sheet.build(None), Err(CueSheetError::NoTargets)));
    }

    #[test]
    fn test_capability_defaults_resolve_against_scripts() {
        let mut host = MemoryHost::new();
        let script = host.scripts.add_script();
        host.scripts.register_action(script, "start", || {});
        host.scripts.register_action(script, "stop", || {});

        let source = format!(
            "(timeline: Single(1.0), action: Capability(scripts: [(\"{}\")]))",
            (script.0)
        );
        let sheet = CueSheet::from_ron(&source).unwrap();
        // Unresolved names only warn; the sheet still builds.
        let seq = sheet.build(Some(&host.scripts)).unwrap();
        assert_eq!(seq.slot_count(), 1);
    }

    #[test]
    fn test_unsorted_timestamps_still_build() {
        let sheet = trigger_sheet(vec![3.0, 1.0], &["a", "b"]);
        assert!(sheet.build(None).is_ok());
    }

    #[test]
    fn test_ron_round_trip() {
        let sheet = CueSheet {
            timeline: Timeline::Sequence(vec![0.5, 1.5]),
            action: ActionConfig::SceneToggle {
                nodes: vec![NodeId::new(), NodeId::new()],
                restart: RestartConfig {
                    tweens: true,
                    behaviors: true,
                    ..RestartConfig::default()
                },
            },
        };
        let ron = sheet.to_ron().unwrap();
        assert_eq!(CueSheet::from_ron(&ron).unwrap(), sheet);
    }
}
