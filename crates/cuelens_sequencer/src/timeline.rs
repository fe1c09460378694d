// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cue timeline and playhead types.

use serde::{Deserialize, Serialize};

/// Cue timestamps, immutable once built.
///
/// Sequence timestamps are non-decreasing by convention; out-of-order
/// entries are accepted but flagged with a diagnostic at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Timeline {
    /// Ordered cue timestamps, one slot each
    Sequence(Vec<f32>),
    /// One timestamp firing every configured target at once
    Single(f32),
}

impl Timeline {
    /// Number of slots (1 for single mode)
    pub fn len(&self) -> usize {
        match self {
            Self::Sequence(ts) => ts.len(),
            Self::Single(_) => 1,
        }
    }

    /// Whether the timeline has no slots
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest timestamp (0.0 for an empty sequence)
    pub fn end(&self) -> f32 {
        match self {
            Self::Sequence(ts) => ts.iter().copied().fold(0.0, f32::max),
            Self::Single(ts) => *ts,
        }
    }

    /// Whether sequence timestamps are non-decreasing
    pub fn is_sorted(&self) -> bool {
        match self {
            Self::Sequence(ts) => ts.windows(2).all(|w| w[0] <= w[1]),
            Self::Single(_) => true,
        }
    }
}

/// One playhead reading from the external time source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayheadSample {
    /// Playhead position in seconds
    pub seconds: f32,
    /// Whether the source is currently advancing (e.g. audio playing)
    pub advancing: bool,
}

impl PlayheadSample {
    /// A sample from an advancing source
    pub fn advancing(seconds: f32) -> Self {
        Self {
            seconds,
            advancing: true,
        }
    }

    /// A sample from a paused source
    pub fn paused(seconds: f32) -> Self {
        Self {
            seconds,
            advancing: false,
        }
    }
}

/// Sequence-mode scan position.
///
/// `current` is the last slot started and not yet reset, `next` the
/// next slot eligible to start. Invariants: `next <= count`, and
/// `current`, when set, is a previously visited index below `next`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cursor {
    /// Last slot started and not yet reset
    pub current: Option<usize>,
    /// Next slot eligible to start
    pub next: usize,
    /// Playhead position recorded on the previous tick, for rewind
    /// detection
    pub last_playhead: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_len() {
        assert_eq!(Timeline::Sequence(vec![1.0, 2.0, 3.0]).len(), 3);
        assert_eq!(Timeline::Single(2.0).len(), 1);
        assert!(Timeline::Sequence(Vec::new()).is_empty());
        assert!(!Timeline::Single(0.0).is_empty());
    }

    #[test]
    fn test_timeline_end() {
        assert_eq!(Timeline::Sequence(vec![1.0, 4.0, 2.0]).end(), 4.0);
        assert_eq!(Timeline::Single(2.5).end(), 2.5);
        assert_eq!(Timeline::Sequence(Vec::new()).end(), 0.0);
    }

    #[test]
    fn test_timeline_sortedness() {
        assert!(Timeline::Sequence(vec![1.0, 1.0, 2.5]).is_sorted());
        assert!(!Timeline::Sequence(vec![2.0, 1.0]).is_sorted());
        assert!(Timeline::Single(5.0).is_sorted());
    }
}
