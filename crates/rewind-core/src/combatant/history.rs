//! Time-descending snapshot log that makes rewind possible.
//!
//! Snapshots are pushed at the front every frame a combatant is not
//! rewinding, so the front is always the most recent moment and the back the
//! oldest one still retained. Rewind consumes from the front.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One recorded moment of a combatant's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Head position at the end of the frame.
    pub head: Vec2,
    /// Raw sword-arm angle in degrees.
    pub sword_angle: f32,
    /// Whether the combatant was mid-swing.
    pub attacking: bool,
}

/// Bounded, time-descending history of [`Snapshot`]s.
///
/// When a capacity is set, recording past it drops the oldest snapshot from
/// the back. A rewind can only ever reach as far as the log reaches.
///
/// # Example
///
/// ```
/// use rewind_core::combatant::history::{HistoryLog, Snapshot};
/// use glam::Vec2;
///
/// let mut log = HistoryLog::new(Some(2));
/// for x in [1.0, 2.0, 3.0] {
///     log.record(Snapshot { head: Vec2::new(x, 0.0), sword_angle: 0.0, attacking: false });
/// }
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.newest().unwrap().head.x, 3.0);
/// assert_eq!(log.oldest().unwrap().head.x, 2.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: VecDeque<Snapshot>,
    capacity: Option<usize>,
}

impl HistoryLog {
    /// Creates an empty log. `None` means unbounded.
    #[must_use]
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Configured capacity, if bounded.
    #[must_use]
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Records a snapshot as the newest entry.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.entries.push_front(snapshot);
        if let Some(cap) = self.capacity {
            self.entries.truncate(cap);
        }
    }

    /// Removes and returns the newest snapshot.
    pub fn pop_newest(&mut self) -> Option<Snapshot> {
        self.entries.pop_front()
    }

    /// Drops the newest snapshot. Returns `false` if the log was empty.
    pub fn discard_newest(&mut self) -> bool {
        self.entries.pop_front().is_some()
    }

    /// The most recently recorded snapshot.
    #[must_use]
    pub fn newest(&self) -> Option<&Snapshot> {
        self.entries.front()
    }

    /// The oldest snapshot still retained.
    #[must_use]
    pub fn oldest(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    /// Iterates from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> + '_ {
        self.entries.iter()
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
