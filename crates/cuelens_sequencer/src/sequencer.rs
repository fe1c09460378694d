// SPDX-License-Identifier: MIT OR Apache-2.0
//! The timestamp action sequencer.
//!
//! Driven externally once per frame with a playhead sample, the
//! sequencer fires each slot's start effect when the playhead crosses
//! its timestamp and resets the previously active slot. A rewound
//! playhead re-arms the scan from the first slot.

use crate::target::ActionTarget;
use crate::timeline::{Cursor, PlayheadSample, Timeline};
use cuelens_host::HostContext;

/// Playback mode plus its per-mode scan state
#[derive(Debug, Clone, PartialEq)]
enum Mode {
    /// One slot per timestamp, fired in ascending order
    Sequence {
        timestamps: Vec<f32>,
        cursor: Cursor,
    },
    /// One timestamp firing every target at once
    Single { timestamp: f32, need_reset: bool },
}

/// Fires slot actions as an external playhead crosses cue timestamps.
///
/// Single-owner, tick-driven state machine: exactly one [`tick`] per
/// frame, no re-entrancy. `tick` never panics and never returns an
/// error; absent collaborators skip their side effects.
///
/// [`tick`]: Sequencer::tick
#[derive(Debug, Clone, PartialEq)]
pub struct Sequencer {
    targets: Vec<ActionTarget>,
    mode: Mode,
}

impl Sequencer {
    /// Sequence-mode sequencer: slot `i` of `targets` fires when the
    /// playhead crosses `timestamps[i]`. The scan covers
    /// `timestamps.len()` slots; slots without a target are skipped.
    pub fn sequence(timestamps: Vec<f32>, targets: Vec<ActionTarget>) -> Self {
        Self {
            targets,
            mode: Mode::Sequence {
                timestamps,
                cursor: Cursor::default(),
            },
        }
    }

    /// Single-mode sequencer: one forward crossing of `timestamp`
    /// fires every target once; a rewind below it re-arms the firing.
    pub fn single(timestamp: f32, targets: Vec<ActionTarget>) -> Self {
        Self {
            targets,
            mode: Mode::Single {
                timestamp,
                need_reset: false,
            },
        }
    }

    /// The timeline this sequencer scans
    pub fn timeline(&self) -> Timeline {
        match &self.mode {
            Mode::Sequence { timestamps, .. } => Timeline::Sequence(timestamps.clone()),
            Mode::Single { timestamp, .. } => Timeline::Single(*timestamp),
        }
    }

    /// Number of configured slots
    pub fn slot_count(&self) -> usize {
        self.targets.len()
    }

    /// Sequence-mode scan position (`None` in single mode)
    pub fn cursor(&self) -> Option<Cursor> {
        match &self.mode {
            Mode::Sequence { cursor, .. } => Some(*cursor),
            Mode::Single { .. } => None,
        }
    }

    /// Advance the sequencer with one playhead sample.
    ///
    /// `None` means no time source is wired this frame; the tick is a
    /// no-op. In sequence mode a non-advancing source is also a no-op,
    /// single mode only needs the source to exist.
    pub fn tick(&mut self, sample: Option<PlayheadSample>, host: &mut HostContext<'_>) {
        let Some(sample) = sample else { return };
        let pos = sample.seconds;

        match &mut self.mode {
            Mode::Sequence { timestamps, cursor } => {
                if !sample.advancing {
                    return;
                }
                // Fire every boundary crossed this tick, not just the
                // first: a seek can skip several timestamps at once.
                while cursor.next < timestamps.len() && pos > timestamps[cursor.next] {
                    if let Some(current) = cursor.current {
                        dispatch_reset(&self.targets, current, host);
                    }
                    dispatch_start(&self.targets, cursor.next, host);
                    cursor.current = Some(cursor.next);
                    cursor.next += 1;
                }
                // Rewind re-arms the scan but does not reset the active
                // slot; the next forward crossing resets it naturally.
                if cursor.last_playhead.is_some_and(|prev| prev > pos) {
                    cursor.next = 0;
                }
                cursor.last_playhead = Some(pos);
            }
            Mode::Single {
                timestamp,
                need_reset,
            } => {
                if pos < *timestamp && *need_reset {
                    *need_reset = false;
                }
                if pos >= *timestamp && !*need_reset {
                    for idx in 0..self.targets.len() {
                        dispatch_reset(&self.targets, idx, host);
                    }
                    for idx in 0..self.targets.len() {
                        dispatch_start(&self.targets, idx, host);
                    }
                    *need_reset = true;
                }
            }
        }
    }

    /// Fire the start effect of one slot; out-of-range is a no-op
    pub fn start_slot(&self, idx: usize, host: &mut HostContext<'_>) {
        dispatch_start(&self.targets, idx, host);
    }

    /// Fire the reset effect of one slot; out-of-range is a no-op
    pub fn reset_slot(&self, idx: usize, host: &mut HostContext<'_>) {
        dispatch_reset(&self.targets, idx, host);
    }
}

fn dispatch_start(targets: &[ActionTarget], idx: usize, host: &mut HostContext<'_>) {
    if let Some(target) = targets.get(idx) {
        target.start(host);
    }
}

fn dispatch_reset(targets: &[ActionTarget], idx: usize, host: &mut HostContext<'_>) {
    if let Some(target) = targets.get(idx) {
        target.reset(host);
    }
}
