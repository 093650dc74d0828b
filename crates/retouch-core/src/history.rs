//! Bounded undo/redo history over immutable image snapshots.
//!
//! The log keeps a sliding window of at most `capacity` snapshots and a
//! cursor pointing at the current one. A new edit made after undoing
//! abandons the redo branch. When the window overflows, the oldest snapshot
//! is evicted from the front.
//!
//! The very first snapshot ever recorded is pinned separately as the
//! *origin*, so [`HistoryLog::reset`] can restore it even after eviction has
//! slid past it.
//!
//! # Example
//!
//! ```ignore
//! let mut log = HistoryLog::new();
//! log.push("a");
//! log.push("b");
//! assert_eq!(log.undo().current, Some(&"a"));
//! log.push("c"); // "b" is gone
//! assert_eq!(log.redo().status, HistoryStatus::NothingToRedo);
//! ```

use std::collections::VecDeque;
use std::fmt;

use tracing::debug;

/// Default number of snapshots kept in the window.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Outcome of a history operation, suitable for a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStatus {
    /// A new snapshot was appended.
    Recorded,
    /// The pushed snapshot equals the current one; nothing changed.
    Unchanged,
    UndoPerformed,
    NothingToUndo,
    RedoPerformed,
    NothingToRedo,
    ResetToOriginal,
    /// Reset was requested before anything was ever recorded.
    NoImageLoaded,
}

impl HistoryStatus {
    /// Returns the user-facing status text.
    pub fn message(self) -> &'static str {
        match self {
            HistoryStatus::Recorded => "State recorded",
            HistoryStatus::Unchanged => "History unchanged",
            HistoryStatus::UndoPerformed => "Undo performed",
            HistoryStatus::NothingToUndo => "Nothing to undo",
            HistoryStatus::RedoPerformed => "Redo performed",
            HistoryStatus::NothingToRedo => "Nothing to redo",
            HistoryStatus::ResetToOriginal => "Image reset to original",
            HistoryStatus::NoImageLoaded => "No image loaded",
        }
    }

    /// True if the operation changed the log.
    pub fn changed(self) -> bool {
        matches!(
            self,
            HistoryStatus::Recorded
                | HistoryStatus::UndoPerformed
                | HistoryStatus::RedoPerformed
                | HistoryStatus::ResetToOriginal
        )
    }
}

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of an undo or redo: the status and the snapshot that is now current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a, T> {
    pub status: HistoryStatus,
    pub current: Option<&'a T>,
}

/// Bounded linear history with branch truncation.
#[derive(Debug, Clone)]
pub struct HistoryLog<T> {
    entries: VecDeque<T>,
    /// `None` while empty, otherwise always a valid index into `entries`.
    cursor: Option<usize>,
    origin: Option<T>,
    capacity: usize,
}

impl<T: Clone + PartialEq> Default for HistoryLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq> HistoryLog<T> {
    /// Create an empty log with [`DEFAULT_HISTORY_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create an empty log holding at most `capacity` snapshots (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            cursor: None,
            origin: None,
            capacity,
        }
    }

    /// Record a new snapshot as the current state.
    ///
    /// Pushing a value equal to the current snapshot is a no-op. Otherwise
    /// every entry after the cursor is discarded, the snapshot is appended,
    /// and the oldest entry is evicted if the window overflows.
    pub fn push(&mut self, snapshot: T) -> HistoryStatus {
        if self.origin.is_none() {
            self.origin = Some(snapshot.clone());
        }

        if self.current() == Some(&snapshot) {
            debug!("skipping push of snapshot identical to current");
            return HistoryStatus::Unchanged;
        }

        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        if keep < self.entries.len() {
            debug!(
                discarded = self.entries.len() - keep,
                "discarding redo branch"
            );
            self.entries.truncate(keep);
        }

        self.entries.push_back(snapshot);
        let mut cursor = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            cursor -= 1;
            debug!(capacity = self.capacity, "evicted oldest snapshot");
        }

        self.cursor = Some(cursor);
        debug!(cursor, len = self.entries.len(), "recorded snapshot");
        HistoryStatus::Recorded
    }

    /// Step back one snapshot.
    pub fn undo(&mut self) -> Step<'_, T> {
        let status = match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                HistoryStatus::UndoPerformed
            }
            _ => HistoryStatus::NothingToUndo,
        };
        debug!(cursor = ?self.cursor, %status, "undo");
        Step {
            status,
            current: self.current(),
        }
    }

    /// Step forward one snapshot along the current branch.
    pub fn redo(&mut self) -> Step<'_, T> {
        let status = match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                HistoryStatus::RedoPerformed
            }
            _ => HistoryStatus::NothingToRedo,
        };
        debug!(cursor = ?self.cursor, %status, "redo");
        Step {
            status,
            current: self.current(),
        }
    }

    /// Collapse the log to a single entry holding the origin snapshot.
    pub fn reset(&mut self) -> HistoryStatus {
        let Some(origin) = self.origin.clone() else {
            return HistoryStatus::NoImageLoaded;
        };
        self.entries.clear();
        self.entries.push_back(origin);
        self.cursor = Some(0);
        debug!("history reset to origin");
        HistoryStatus::ResetToOriginal
    }

    /// The snapshot at the cursor, or `None` if nothing has been recorded.
    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|cursor| self.entries.get(cursor))
    }

    /// The snapshot just before the cursor, used for before/after display.
    pub fn previous(&self) -> Option<&T> {
        match self.cursor {
            Some(cursor) if cursor > 0 => self.entries.get(cursor - 1),
            _ => None,
        }
    }

    /// The first snapshot ever recorded.
    pub fn origin(&self) -> Option<&T> {
        self.origin.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over the window, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with(values: &[u32]) -> HistoryLog<u32> {
        let mut log = HistoryLog::new();
        for &v in values {
            log.push(v);
        }
        log
    }

    fn entries(log: &HistoryLog<u32>) -> Vec<u32> {
        log.iter().copied().collect()
    }

    #[test]
    fn test_empty_log() {
        let log: HistoryLog<u32> = HistoryLog::new();
        assert!(log.is_empty());
        assert_eq!(log.cursor(), None);
        assert_eq!(log.current(), None);
        assert_eq!(log.previous(), None);
        assert_eq!(log.origin(), None);
        assert_eq!(log.capacity(), DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn test_first_push_sets_origin() {
        let log = log_with(&[7]);
        assert_eq!(log.origin(), Some(&7));
        assert_eq!(log.current(), Some(&7));
        assert_eq!(log.cursor(), Some(0));
    }

    #[test]
    fn test_duplicate_push_is_noop() {
        let mut log = log_with(&[1, 2]);
        assert_eq!(log.push(2), HistoryStatus::Unchanged);
        assert_eq!(entries(&log), vec![1, 2]);
        assert_eq!(log.cursor(), Some(1));
    }

    #[test]
    fn test_duplicate_check_is_against_current_not_tail() {
        let mut log = log_with(&[1, 2]);
        log.undo();
        // 1 is current, so pushing 2 again is a new edit that drops the old 2
        assert_eq!(log.push(2), HistoryStatus::Recorded);
        assert_eq!(entries(&log), vec![1, 2]);
        assert!(!log.can_redo());
    }

    #[test]
    fn test_undo_and_redo() {
        let mut log = log_with(&[1, 2, 3]);

        let step = log.undo();
        assert_eq!(step.status, HistoryStatus::UndoPerformed);
        assert_eq!(step.current, Some(&2));

        let step = log.undo();
        assert_eq!(step.current, Some(&1));

        let step = log.undo();
        assert_eq!(step.status, HistoryStatus::NothingToUndo);
        assert_eq!(step.current, Some(&1));

        let step = log.redo();
        assert_eq!(step.status, HistoryStatus::RedoPerformed);
        assert_eq!(step.current, Some(&2));

        log.redo();
        let step = log.redo();
        assert_eq!(step.status, HistoryStatus::NothingToRedo);
        assert_eq!(step.current, Some(&3));
    }

    #[test]
    fn test_undo_redo_on_empty_log() {
        let mut log: HistoryLog<u32> = HistoryLog::new();
        let step = log.undo();
        assert_eq!(step.status, HistoryStatus::NothingToUndo);
        assert_eq!(step.current, None);

        let step = log.redo();
        assert_eq!(step.status, HistoryStatus::NothingToRedo);
        assert_eq!(step.current, None);
    }

    #[test]
    fn test_push_after_undo_discards_redo_branch() {
        let mut log = log_with(&[1, 2, 3, 4]);
        log.undo();
        log.undo();
        assert_eq!(log.push(9), HistoryStatus::Recorded);

        assert_eq!(entries(&log), vec![1, 2, 9]);
        assert_eq!(log.current(), Some(&9));
        assert!(!log.can_redo());
    }

    #[test]
    fn test_previous() {
        let mut log = log_with(&[1]);
        assert_eq!(log.previous(), None);

        log.push(2);
        assert_eq!(log.previous(), Some(&1));

        log.undo();
        assert_eq!(log.previous(), None);
    }

    #[test]
    fn test_reset_restores_origin() {
        let mut log = log_with(&[1, 2, 3]);
        assert_eq!(log.reset(), HistoryStatus::ResetToOriginal);
        assert_eq!(entries(&log), vec![1]);
        assert_eq!(log.cursor(), Some(0));
        assert!(!log.can_undo());
        assert!(!log.can_redo());
    }

    #[test]
    fn test_reset_without_image_is_noop() {
        let mut log: HistoryLog<u32> = HistoryLog::new();
        assert_eq!(log.reset(), HistoryStatus::NoImageLoaded);
        assert!(log.is_empty());
        assert_eq!(log.cursor(), None);
    }

    #[test]
    fn test_eviction_keeps_last_ten_and_origin() {
        let values: Vec<u32> = (1..=15).collect();
        let mut log = log_with(&values);

        assert_eq!(log.len(), 10);
        assert_eq!(entries(&log), (6..=15).collect::<Vec<_>>());
        assert_eq!(log.cursor(), Some(9));
        assert_eq!(log.origin(), Some(&1));

        log.reset();
        assert_eq!(log.current(), Some(&1));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_eviction_undo_stops_at_window_start() {
        let values: Vec<u32> = (1..=12).collect();
        let mut log = log_with(&values);
        for _ in 0..20 {
            log.undo();
        }
        assert_eq!(log.current(), Some(&3));
    }

    #[test]
    fn test_push_after_reset_continues_from_origin() {
        let mut log = log_with(&[1, 2, 3]);
        log.reset();
        log.push(4);
        assert_eq!(entries(&log), vec![1, 4]);
        assert_eq!(log.origin(), Some(&1));
    }

    #[test]
    fn test_custom_capacity() {
        let mut log = HistoryLog::with_capacity(3);
        for v in 0..5u32 {
            log.push(v);
        }
        assert_eq!(log.capacity(), 3);
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_zero_capacity_clamped_to_one() {
        let mut log = HistoryLog::with_capacity(0);
        log.push(1u32);
        log.push(2u32);
        assert_eq!(log.len(), 1);
        assert_eq!(log.current(), Some(&2));
        assert_eq!(log.undo().status, HistoryStatus::NothingToUndo);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(HistoryStatus::UndoPerformed.to_string(), "Undo performed");
        assert_eq!(HistoryStatus::NothingToUndo.to_string(), "Nothing to undo");
        assert_eq!(HistoryStatus::RedoPerformed.to_string(), "Redo performed");
        assert_eq!(HistoryStatus::NothingToRedo.to_string(), "Nothing to redo");
        assert_eq!(
            HistoryStatus::ResetToOriginal.to_string(),
            "Image reset to original"
        );
        assert_eq!(HistoryStatus::NoImageLoaded.to_string(), "No image loaded");
    }

    #[test]
    fn test_status_changed() {
        assert!(HistoryStatus::Recorded.changed());
        assert!(HistoryStatus::UndoPerformed.changed());
        assert!(!HistoryStatus::Unchanged.changed());
        assert!(!HistoryStatus::NothingToRedo.changed());
        assert!(!HistoryStatus::NoImageLoaded.changed());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
