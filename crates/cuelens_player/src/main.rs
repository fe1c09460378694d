// SPDX-License-Identifier: MIT OR Apache-2.0
//! CueLens Player - headless cue sheet dry-runner
//!
//! Loads a RON cue sheet, seeds an in-memory host with the nodes and
//! scripts the sheet references, then ticks a simulated playhead at
//! 60 Hz and logs every host side effect as it fires. Useful for
//! checking cue timing without an AR host attached.
//!
//! Usage: `cuelens_player <cuesheet.ron> [duration-seconds]`

use cuelens_host::{HostEvent, MemoryHost};
use cuelens_sequencer::{ActionConfig, CueSheet, CueSheetError, PlayheadSample};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Simulated playhead tick rate
const TICK_RATE_HZ: f32 = 60.0;

/// Player failure modes
#[derive(Debug, Error)]
enum PlayerError {
    /// Cue sheet file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path passed on the command line
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Cue sheet failed to parse or validate
    #[error(transparent)]
    Sheet(#[from] CueSheetError),
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("cuelens_player=info".parse().expect("valid directive"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: cuelens_player <cuesheet.ron> [duration-seconds]");
        std::process::exit(2);
    };
    let duration = args.next().and_then(|s| s.parse::<f32>().ok());

    if let Err(err) = run(Path::new(&path), duration) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(path: &Path, duration: Option<f32>) -> Result<(), PlayerError> {
    let source = std::fs::read_to_string(path).map_err(|source| PlayerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let sheet = CueSheet::from_ron(&source)?;
    let fired = simulate(&sheet, duration)?;
    tracing::info!("dry run complete, {fired} host effects fired");
    Ok(())
}

/// Seed a host from the sheet, run the playhead, log every effect.
/// Returns the number of host effects fired.
fn simulate(sheet: &CueSheet, duration: Option<f32>) -> Result<usize, CueSheetError> {
    let mut host = MemoryHost::new();
    seed_host(&mut host, sheet);

    let mut sequencer = sheet.build(Some(&host.scripts))?;
    // Default run length: one second past the last cue.
    let end = duration.unwrap_or_else(|| sheet.timeline.end() + 1.0);

    let mut fired = 0;
    let mut frame = 0u64;
    loop {
        let pos = frame as f32 / TICK_RATE_HZ;
        if pos > end {
            break;
        }
        sequencer.tick(Some(PlayheadSample::advancing(pos)), &mut host.context());
        for event in host.take_events() {
            match &event {
                HostEvent::NodeEnabled { node, enabled } => {
                    let name = host.scene.node_name(*node).unwrap_or("?");
                    tracing::info!("t={pos:.3}s node '{name}' enabled={enabled}");
                }
                other => tracing::info!("t={pos:.3}s {other:?}"),
            }
            fired += 1;
        }
        frame += 1;
    }
    Ok(fired)
}

/// Materialize the nodes and scripts a sheet references so effects
/// land somewhere observable
fn seed_host(host: &mut MemoryHost, sheet: &CueSheet) {
    match &sheet.action {
        ActionConfig::SceneToggle { nodes, .. } | ActionConfig::Tween { nodes, .. } => {
            for (index, node) in nodes.iter().enumerate() {
                host.scene.add_node_with_id(*node, format!("slot{index}"));
            }
        }
        ActionConfig::Capability {
            scripts,
            start_action,
            stop_action,
        } => {
            for script in scripts {
                host.scripts.add_script_with_id(*script);
                for name in [start_action, stop_action].into_iter().flatten() {
                    host.scripts.register_action(*script, name.clone(), || {});
                }
            }
        }
        ActionConfig::Trigger { .. } | ActionConfig::Text { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuelens_host::NodeId;
    use cuelens_sequencer::{RestartConfig, Timeline};

    #[test]
    fn test_simulate_trigger_sheet() {
        let sheet = CueSheet {
            timeline: Timeline::Sequence(vec![0.5, 1.0]),
            action: ActionConfig::Trigger {
                names: vec!["a".to_string(), "b".to_string()],
            },
        };
        // Two trigger broadcasts, resets are no-ops.
        assert_eq!(simulate(&sheet, None).unwrap(), 2);
    }

    #[test]
    fn test_simulate_scene_sheet_counts_toggles() {
        let sheet = CueSheet {
            timeline: Timeline::Sequence(vec![0.5, 1.0]),
            action: ActionConfig::SceneToggle {
                nodes: vec![NodeId::new(), NodeId::new()],
                restart: RestartConfig::default(),
            },
        };
        // Slot 0 enabled, slot 0 disabled, slot 1 enabled.
        assert_eq!(simulate(&sheet, None).unwrap(), 3);
    }

    #[test]
    fn test_simulate_rejects_mismatched_sheet() {
        let sheet = CueSheet {
            timeline: Timeline::Sequence(vec![0.5]),
            action: ActionConfig::Trigger {
                names: vec!["a".to_string(), "b".to_string()],
            },
        };
        assert!(simulate(&sheet, None).is_err());
    }

    #[test]
    fn test_capability_sheet_seeds_scripts() {
        let sheet = CueSheet {
            timeline: Timeline::Single(0.25),
            action: ActionConfig::Capability {
                scripts: vec![cuelens_host::ScriptId::new()],
                start_action: Some("start".to_string()),
                stop_action: Some("stop".to_string()),
            },
        };
        // Single mode resets then starts: one ActionCalled per side.
        assert_eq!(simulate(&sheet, None).unwrap(), 2);
    }
}
