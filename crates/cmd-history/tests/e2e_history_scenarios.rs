#![forbid(unsafe_code)]

//! End-to-end scenarios for [`CommandHistory`].
//!
//! Validates:
//! - The reference walkthrough (move right, move down, undo twice, branch)
//! - Branch truncation on A, B, C
//! - Closed enum commands over a multi-unit board
//! - Open trait-object commands with heterogeneous variants
//! - Structured `tracing` events for execute/undo/redo

use std::sync::{Arc, Mutex};

use cmd_history::{
    Command, CommandBatch, CommandHistory, Describe, MoveCommand, Position, Translate,
};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

// ============================================================================
// Board model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct Unit {
    x: i32,
    y: i32,
}

impl Translate for Unit {
    fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Board {
    units: Vec<Unit>,
}

/// Closed set of board edits.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BoardCmd {
    Move { unit: usize, delta: MoveCommand },
    Swap { a: usize, b: usize },
}

impl Command<Board> for BoardCmd {
    fn forward(&self, board: &mut Board) {
        match self {
            Self::Move { unit, delta } => delta.forward(&mut board.units[*unit]),
            Self::Swap { a, b } => board.units.swap(*a, *b),
        }
    }

    fn backward(&self, board: &mut Board) {
        match self {
            Self::Move { unit, delta } => delta.backward(&mut board.units[*unit]),
            Self::Swap { a, b } => board.units.swap(*a, *b),
        }
    }
}

impl Describe for BoardCmd {
    fn description(&self) -> &str {
        match self {
            Self::Move { .. } => "Move unit",
            Self::Swap { .. } => "Swap units",
        }
    }
}

fn board() -> Board {
    Board {
        units: vec![
            Unit { x: 320, y: 160 },
            Unit { x: 704, y: 160 },
            Unit { x: 928, y: 288 },
        ],
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn reference_walkthrough() {
    let mut history = CommandHistory::new();
    let mut pos = Position::new(0, 0);

    let mut trail = Vec::new();
    let mut record = |pos: Position, history: &CommandHistory<MoveCommand>| {
        trail.push((pos.x, pos.y, history.history_count(), history.cursor()));
    };

    history.execute(MoveCommand::new(16, 0), &mut pos);
    record(pos, &history);
    history.execute(MoveCommand::new(0, 16), &mut pos);
    record(pos, &history);
    history.undo(&mut pos);
    record(pos, &history);
    history.undo(&mut pos);
    record(pos, &history);
    history.execute(MoveCommand::new(-16, 0), &mut pos);
    record(pos, &history);
    history.redo(&mut pos);
    record(pos, &history);

    assert_eq!(
        trail,
        vec![
            (16, 0, 1, 1),
            (16, 16, 2, 2),
            (16, 0, 2, 1),
            (0, 0, 2, 0),
            (-16, 0, 1, 1),
            (-16, 0, 1, 1),
        ]
    );
}

#[test]
fn branch_truncation_abc_then_d() {
    let a = MoveCommand::new(1, 0);
    let b = MoveCommand::new(0, 1);
    let c = MoveCommand::new(2, 2);
    let d = MoveCommand::new(-5, 0);

    let mut history = CommandHistory::new();
    let mut pos = Position::ORIGIN;
    history.execute(a, &mut pos);
    history.execute(b, &mut pos);
    history.execute(c, &mut pos);
    assert_eq!((history.history_count(), history.cursor()), (3, 3));

    history.undo(&mut pos);
    history.undo(&mut pos);
    assert_eq!(history.cursor(), 1);

    history.execute(d, &mut pos);
    assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![a, d]);
    assert_eq!(history.cursor(), 2);

    let before = pos;
    assert!(history.redo(&mut pos).is_none());
    assert_eq!(pos, before);
    assert_eq!(history.history_count(), 2);
}

#[test]
fn fresh_history_boundaries() {
    let mut history: CommandHistory<MoveCommand> = CommandHistory::new();
    let mut pos = Position::new(5, 5);

    assert!(history.undo(&mut pos).is_none());
    assert!(history.redo(&mut pos).is_none());
    assert_eq!(pos, Position::new(5, 5));
    assert_eq!((history.history_count(), history.cursor()), (0, 0));
}

#[test]
fn enum_commands_on_board() {
    let start = board();
    let mut state = start.clone();
    let mut history = CommandHistory::new();

    history.execute(
        BoardCmd::Move {
            unit: 0,
            delta: MoveCommand::new(32, 0),
        },
        &mut state,
    );
    history.execute(BoardCmd::Swap { a: 0, b: 2 }, &mut state);
    history.execute(
        BoardCmd::Move {
            unit: 2,
            delta: MoveCommand::new(0, -32),
        },
        &mut state,
    );

    assert_eq!(state.units[0], Unit { x: 928, y: 288 });
    assert_eq!(state.units[2], Unit { x: 352, y: 128 });
    assert_eq!(
        history.undo_descriptions(10),
        vec!["Move unit", "Swap units", "Move unit"]
    );

    while history.undo(&mut state).is_some() {}
    assert_eq!(state, start);

    while history.redo(&mut state).is_some() {}
    assert_eq!(state.units[2], Unit { x: 352, y: 128 });
}

#[test]
fn batch_records_one_entry() {
    let mut history = CommandHistory::new();
    let mut pos = Position::ORIGIN;

    let batch = CommandBatch::new("Dash")
        .with(MoveCommand::new(16, 0))
        .with(MoveCommand::new(16, 0))
        .with(MoveCommand::new(0, 16));
    history.execute(batch, &mut pos);

    assert_eq!(pos, Position::new(32, 16));
    assert_eq!(history.history_count(), 1);
    assert_eq!(history.undo_descriptions(1), vec!["Dash"]);

    history.undo(&mut pos);
    assert_eq!(pos, Position::ORIGIN);
}

#[test]
fn trait_objects_mix_variants() {
    struct Scale(i32);
    impl Command<Position> for Scale {
        fn forward(&self, target: &mut Position) {
            target.x *= self.0;
            target.y *= self.0;
        }
        fn backward(&self, target: &mut Position) {
            target.x /= self.0;
            target.y /= self.0;
        }
    }

    let mut history: CommandHistory<Box<dyn Command<Position>>> = CommandHistory::new();
    let mut pos = Position::new(1, 1);
    history.execute(Box::new(MoveCommand::new(2, 3)), &mut pos);
    history.execute(Box::new(Scale(4)), &mut pos);
    assert_eq!(pos, Position::new(12, 16));

    history.undo(&mut pos);
    assert_eq!(pos, Position::new(3, 4));
    history.undo(&mut pos);
    assert_eq!(pos, Position::new(1, 1));
}

#[test]
fn history_is_send_when_commands_are() {
    fn assert_send<T: Send>() {}
    assert_send::<CommandHistory<MoveCommand>>();
    assert_send::<CommandHistory<Box<dyn Command<Position> + Send>>>();
}

// ============================================================================
// Tracing
// ============================================================================

#[derive(Debug, Default)]
struct TraceState {
    messages: Vec<String>,
    discarded: Vec<u64>,
    cursors: Vec<u64>,
}

struct HistoryTraceCapture {
    state: Arc<Mutex<TraceState>>,
}

impl<S> Layer<S> for HistoryTraceCapture
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != "cmd_history" {
            return;
        }

        #[derive(Default)]
        struct HistoryVisitor {
            message: Option<String>,
            discarded: Option<u64>,
            cursor: Option<u64>,
        }

        impl tracing::field::Visit for HistoryVisitor {
            fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
                match field.name() {
                    "discarded" => self.discarded = Some(value),
                    "cursor" => self.cursor = Some(value),
                    _ => {}
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}"));
                }
            }
        }

        let mut visitor = HistoryVisitor::default();
        event.record(&mut visitor);

        let mut state = self.state.lock().expect("trace state lock");
        if let Some(message) = visitor.message {
            state.messages.push(message);
        }
        if let Some(discarded) = visitor.discarded {
            state.discarded.push(discarded);
        }
        if let Some(cursor) = visitor.cursor {
            state.cursors.push(cursor);
        }
    }
}

#[test]
fn tracing_events_report_truncation_and_cursor() {
    let state = Arc::new(Mutex::new(TraceState::default()));
    let subscriber = tracing_subscriber::registry().with(HistoryTraceCapture {
        state: Arc::clone(&state),
    });
    let _guard = tracing::subscriber::set_default(subscriber);
    tracing::callsite::rebuild_interest_cache();

    let mut history = CommandHistory::new();
    let mut pos = Position::ORIGIN;
    history.execute(MoveCommand::new(1, 0), &mut pos);
    history.execute(MoveCommand::new(1, 0), &mut pos);
    history.undo(&mut pos);
    history.undo(&mut pos);
    history.undo(&mut pos);
    history.execute(MoveCommand::new(0, 1), &mut pos);

    tracing::callsite::rebuild_interest_cache();
    let snapshot = state.lock().expect("trace state lock");
    assert_eq!(
        snapshot.messages,
        vec![
            "command executed",
            "command executed",
            "command undone",
            "command undone",
            "undo: nothing to undo",
            "command executed",
        ]
    );
    assert_eq!(snapshot.discarded, vec![0, 0, 2]);
    assert_eq!(snapshot.cursors, vec![1, 2, 1, 0, 1]);
}
