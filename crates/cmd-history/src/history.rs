#![forbid(unsafe_code)]

//! Linear undo/redo history over a client-owned target.
//!
//! [`CommandHistory`] keeps every recorded command in one ordered timeline
//! and a cursor that splits it into an applied prefix and a pending-redo
//! suffix:
//!
//! - **Recording** runs the command forward and appends it
//! - **Undo/redo** move the cursor one step and replay one command
//! - **Branch truncation**: recording while redo entries are pending drops them
//! - **Depth limit**: optionally evict the oldest entries
//!
//! # Invariants
//!
//! 1. `0 <= cursor <= timeline.len()` after every operation
//! 2. Recording with `cursor < timeline.len()` discards `timeline[cursor..]`
//!    before appending (no redo tree)
//! 3. `timeline[cursor - 1]`, if present, is the most recently applied command
//! 4. `timeline.len() <= config.max_depth` after every operation
//!
//! # Memory Model
//!
//! Commands live in a `VecDeque` so that branch truncation is a single
//! `truncate` and depth eviction pops from the front in O(1).
//!
//! ```text
//! execute(A), execute(B), execute(C)
//! ┌───────────────────────────────────────────────┐
//! │ Timeline: [A, B, C]                           │
//! │ Cursor:             ^ 3                       │
//! └───────────────────────────────────────────────┘
//!
//! undo() x2
//! ┌───────────────────────────────────────────────┐
//! │ Timeline: [A, B, C]                           │
//! │ Cursor:       ^ 1      (B, C pending redo)    │
//! └───────────────────────────────────────────────┘
//!
//! execute(D)  <-- new branch, drops B and C
//! ┌───────────────────────────────────────────────┐
//! │ Timeline: [A, D]                              │
//! │ Cursor:          ^ 2                          │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Undo at cursor 0 and redo at the end of the timeline are no-ops, not
//! errors: there is simply nothing to replay.

use std::collections::VecDeque;
use std::fmt;

use tracing::trace;

use crate::command::{Command, Describe};

/// Configuration for a [`CommandHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of commands kept in the timeline; never zero.
    max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl HistoryConfig {
    /// Create a configuration with a depth limit (at least 1).
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    /// No depth limit.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }

    /// Maximum number of commands kept in the timeline.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// True when a finite depth limit is set.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.max_depth != usize::MAX
    }
}

/// Undo/redo history that owns its recorded commands.
///
/// The target is never stored; every operation borrows it for the duration
/// of the call.
pub struct CommandHistory<C> {
    /// Recorded commands, oldest first.
    timeline: VecDeque<C>,
    /// Number of commands currently applied.
    cursor: usize,
    /// Limits.
    config: HistoryConfig,
}

impl<C> fmt::Debug for CommandHistory<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandHistory")
            .field("history_count", &self.timeline.len())
            .field("cursor", &self.cursor)
            .field("config", &self.config)
            .finish()
    }
}

impl<C> Default for CommandHistory<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> CommandHistory<C> {
    /// Create an empty, unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    /// Create an empty history with the given configuration.
    #[must_use]
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            timeline: VecDeque::new(),
            cursor: 0,
            config,
        }
    }

    // ========================================================================
    // Core Operations
    // ========================================================================

    /// Run `command` forward on `target` and record it.
    ///
    /// Any pending redo entries are dropped first. If the timeline then
    /// exceeds the depth limit, the oldest entries are evicted; their effect
    /// stays applied but can no longer be undone.
    pub fn execute<T: ?Sized>(&mut self, command: C, target: &mut T)
    where
        C: Command<T>,
    {
        let discarded = self.truncate_redo();

        command.forward(target);
        self.timeline.push_back(command);

        let evicted = self.enforce_limits();
        self.cursor = self.timeline.len();

        trace!(
            target: "cmd_history",
            discarded,
            evicted,
            history_count = self.timeline.len(),
            cursor = self.cursor,
            "command executed"
        );
    }

    /// Revert the most recently applied command.
    ///
    /// Returns the command that was replayed backward, or `None` when nothing
    /// is applied (the target is left untouched).
    pub fn undo<T: ?Sized>(&mut self, target: &mut T) -> Option<&C>
    where
        C: Command<T>,
    {
        if self.cursor == 0 {
            trace!(target: "cmd_history", "undo: nothing to undo");
            return None;
        }

        self.cursor -= 1;
        let command = &self.timeline[self.cursor];
        command.backward(target);

        trace!(
            target: "cmd_history",
            history_count = self.timeline.len(),
            cursor = self.cursor,
            "command undone"
        );
        Some(command)
    }

    /// Re-apply the next pending command.
    ///
    /// Returns the command that was replayed forward, or `None` when nothing
    /// is pending (the target is left untouched).
    pub fn redo<T: ?Sized>(&mut self, target: &mut T) -> Option<&C>
    where
        C: Command<T>,
    {
        if self.cursor == self.timeline.len() {
            trace!(target: "cmd_history", "redo: nothing to redo");
            return None;
        }

        let command = &self.timeline[self.cursor];
        command.forward(target);
        self.cursor += 1;

        trace!(
            target: "cmd_history",
            history_count = self.timeline.len(),
            cursor = self.cursor,
            "command redone"
        );
        Some(command)
    }

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < self.timeline.len()
    }

    // ========================================================================
    // Info
    // ========================================================================

    /// Number of recorded commands (applied and pending).
    #[must_use]
    pub fn history_count(&self) -> usize {
        self.timeline.len()
    }

    /// Number of commands currently applied.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of commands available for redo.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.timeline.len() - self.cursor
    }

    /// Command that the next [`undo`](Self::undo) would revert.
    #[must_use]
    pub fn next_undo(&self) -> Option<&C> {
        self.cursor
            .checked_sub(1)
            .and_then(|idx| self.timeline.get(idx))
    }

    /// Command that the next [`redo`](Self::redo) would re-apply.
    #[must_use]
    pub fn next_redo(&self) -> Option<&C> {
        self.timeline.get(self.cursor)
    }

    /// Iterate over every recorded command, oldest first.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, C> {
        self.timeline.iter()
    }

    /// Get the current configuration.
    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Drop every recorded command. The target is not touched.
    pub fn clear(&mut self) {
        let dropped = self.timeline.len();
        self.timeline.clear();
        self.cursor = 0;
        trace!(target: "cmd_history", dropped, "history cleared");
    }

    /// Drop the pending-redo suffix, returning how many entries went away.
    fn truncate_redo(&mut self) -> usize {
        let pending = self.timeline.len() - self.cursor;
        self.timeline.truncate(self.cursor);
        pending
    }

    /// Evict oldest entries past the depth limit, returning how many.
    fn enforce_limits(&mut self) -> usize {
        let mut evicted = 0;
        while self.timeline.len() > self.config.max_depth {
            if self.timeline.pop_front().is_none() {
                break;
            }
            evicted += 1;
        }
        self.cursor = self.cursor.saturating_sub(evicted);
        evicted
    }
}

impl<C: Describe> CommandHistory<C> {
    /// Labels of applied commands, most recent first.
    pub fn undo_descriptions(&self, limit: usize) -> Vec<&str> {
        self.timeline
            .range(..self.cursor)
            .rev()
            .take(limit)
            .map(|c| c.description())
            .collect()
    }

    /// Labels of pending commands, next redo first.
    pub fn redo_descriptions(&self, limit: usize) -> Vec<&str> {
        self.timeline
            .range(self.cursor..)
            .take(limit)
            .map(|c| c.description())
            .collect()
    }
}

impl<'a, C> IntoIterator for &'a CommandHistory<C> {
    type Item = &'a C;
    type IntoIter = std::collections::vec_deque::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.timeline.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
