#![forbid(unsafe_code)]

//! Command-based undo/redo.
//!
//! This crate records reversible mutations of client-owned state and replays
//! them backward and forward on request. It implements the Command Pattern
//! with:
//!
//! - **Algebraic inverses**: commands store deltas, not snapshots
//! - **Linear history**: recording after an undo discards the redo branch
//! - **Borrowed targets**: the history never owns or copies the state it edits
//! - **Batching**: several commands can be recorded as one entry
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  execute(cmd, &mut target)  ┌──────────────────────────┐
//! │    Client    │ ──────────────────────────► │      CommandHistory      │
//! │ (input loop) │  undo(&mut target)          │  timeline: [c0 c1 c2 c3] │
//! │              │  redo(&mut target)          │  cursor:          ^      │
//! └──────┬───────┘                             └────────────┬─────────────┘
//!        │ owns                                             │ forward/backward
//!        ▼                                                  ▼
//! ┌──────────────┐                             ┌──────────────────────────┐
//! │    Target    │ ◄────────────────────────── │     impl Command<T>      │
//! └──────────────┘                             └──────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use cmd_history::{CommandHistory, MoveCommand, Position};
//!
//! let mut player = Position::new(0, 0);
//! let mut history = CommandHistory::new();
//!
//! history.execute(MoveCommand::new(16, 0), &mut player);
//! history.execute(MoveCommand::new(0, 16), &mut player);
//! assert_eq!(player, Position::new(16, 16));
//!
//! history.undo(&mut player);
//! assert_eq!(player, Position::new(16, 0));
//!
//! history.redo(&mut player);
//! assert_eq!(player, Position::new(16, 16));
//! assert_eq!((history.history_count(), history.cursor()), (2, 2));
//! ```
//!
//! # Threading
//!
//! Everything runs synchronously on the caller's thread. A history shared
//! between threads must be guarded by one lock that also covers the target.

pub mod command;
pub mod history;
pub mod translate;

pub use command::{Command, CommandBatch, Describe};
pub use history::{CommandHistory, HistoryConfig};
pub use translate::{MoveCommand, Position, Translate};
