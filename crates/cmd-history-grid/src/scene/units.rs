use cmd_history::{Command, CommandHistory, Describe, MoveCommand, Position, Translate};
use tracing::{debug, info};

use super::Scene;
use crate::config::GridConfig;
use crate::hud::Hud;
use crate::input::{KeySet, KeyState};
use crate::policy::{Screen, snap};

/// A grid-aligned square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub pos: Position,
    pub size: i32,
}

impl Translate for Unit {
    fn translate(&mut self, dx: i32, dy: i32) {
        self.pos.translate(dx, dy);
    }
}

/// All units of the scene. This is the history's target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub units: Vec<Unit>,
}

impl Board {
    /// Index of the unit whose origin sits exactly at `pos`.
    #[must_use]
    pub fn unit_at(&self, pos: Position) -> Option<usize> {
        self.units.iter().position(|u| u.pos == pos)
    }
}

/// Undoable edits of a [`Board`].
///
/// Commands name the unit they touch, so undo reverts the unit that actually
/// moved even if the selection changed since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCommand {
    Move { unit: usize, delta: MoveCommand },
}

impl UnitCommand {
    /// Unit affected by the command.
    #[must_use]
    pub fn unit(&self) -> usize {
        match self {
            Self::Move { unit, .. } => *unit,
        }
    }
}

impl Command<Board> for UnitCommand {
    fn forward(&self, board: &mut Board) {
        match self {
            Self::Move { unit, delta } => {
                if let Some(target) = board.units.get_mut(*unit) {
                    delta.forward(target);
                }
            }
        }
    }

    fn backward(&self, board: &mut Board) {
        match self {
            Self::Move { unit, delta } => {
                if let Some(target) = board.units.get_mut(*unit) {
                    delta.backward(target);
                }
            }
        }
    }
}

impl Describe for UnitCommand {
    fn description(&self) -> &str {
        match self {
            Self::Move { .. } => "Move unit",
        }
    }
}

/// Which object the direction keys drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Direction keys move the selector; nothing is recorded.
    Selector,
    /// Direction keys move the selected unit through the history.
    Unit,
}

impl Mode {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Selector => "Selector",
            Self::Unit => "Unit",
        }
    }
}

/// Units on a grid, picked with a selector and moved one cell per press.
#[derive(Debug)]
pub struct UnitsScene {
    board: Board,
    selector: Position,
    selector_size: i32,
    selected: usize,
    mode: Mode,
    cell: i32,
    screen: Screen,
    history: CommandHistory<UnitCommand>,
}

impl UnitsScene {
    #[must_use]
    pub fn new(config: &GridConfig) -> Self {
        let screen = config.screen();
        let cell = config.grid.cell;
        let unit_size = config.grid.unit_size;
        let units: Vec<Unit> = config
            .grid
            .units
            .iter()
            .map(|&[x, y]| Unit {
                pos: screen.clamp_and_snap(Position::new(x, y), unit_size, cell),
                size: unit_size,
            })
            .collect();
        let selector = units
            .first()
            .map_or(Position::ORIGIN, |u| u.pos);

        Self {
            board: Board { units },
            selector,
            selector_size: config.grid.selector_size,
            selected: 0,
            mode: Mode::Selector,
            cell,
            screen,
            history: CommandHistory::with_config(config.history_config()),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn selector(&self) -> Position {
        self.selector
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn history(&self) -> &CommandHistory<UnitCommand> {
        &self.history
    }

    fn toggle_mode(&mut self) {
        match self.mode {
            Mode::Selector => match self.board.unit_at(self.selector) {
                Some(hit) => {
                    self.selected = hit;
                    self.mode = Mode::Unit;
                    self.follow_selected();
                    info!(unit = hit, "unit mode");
                }
                None => debug!(
                    x = self.selector.x,
                    y = self.selector.y,
                    "no unit under selector"
                ),
            },
            Mode::Unit => {
                self.mode = Mode::Selector;
                self.follow_selected();
                info!(unit = self.selected, "selector mode");
            }
        }
    }

    fn move_selector(&mut self, dx: i32, dy: i32) {
        let mut next = self.selector;
        next.translate(dx, dy);
        next = Position::new(snap(next.x, self.cell), snap(next.y, self.cell));
        self.selector = self.screen.clamp(next, self.selector_size);
    }

    fn move_selected(&mut self, dx: i32, dy: i32) {
        let Some(unit) = self.board.units.get(self.selected) else {
            return;
        };
        let delta = self
            .screen
            .grid_delta(unit.pos, unit.size, self.cell, dx, dy);
        if delta.is_identity() {
            debug!(unit = self.selected, "move blocked by screen edge");
            return;
        }
        self.history.execute(
            UnitCommand::Move {
                unit: self.selected,
                delta,
            },
            &mut self.board,
        );
    }

    fn follow_selected(&mut self) {
        if let Some(unit) = self.board.units.get(self.selected) {
            self.selector = unit.pos;
        }
    }

    /// Clamp and snap every unit. Recorded moves already land on legal
    /// cells, so this only matters for states set up outside the history.
    fn settle_units(&mut self) {
        for unit in &mut self.board.units {
            unit.pos = self.screen.clamp_and_snap(unit.pos, unit.size, self.cell);
        }
    }
}

impl Scene for UnitsScene {
    fn title(&self) -> &'static str {
        "Command history: units"
    }

    fn update(&mut self, keys: &KeyState) {
        let (dx, dy) = keys.direction(self.cell);

        if keys.triggered(KeySet::TOGGLE) {
            self.toggle_mode();
        }

        match self.mode {
            Mode::Selector => {
                if dx != 0 || dy != 0 {
                    self.move_selector(dx, dy);
                }
            }
            Mode::Unit => {
                if dx != 0 || dy != 0 {
                    self.move_selected(dx, dy);
                    self.follow_selected();
                }
                if keys.triggered(KeySet::UNDO) {
                    if let Some(command) = self.history.undo(&mut self.board) {
                        self.selected = command.unit();
                    }
                    self.follow_selected();
                }
                if keys.triggered(KeySet::REDO) {
                    if let Some(command) = self.history.redo(&mut self.board) {
                        self.selected = command.unit();
                    }
                    self.follow_selected();
                }
            }
        }

        self.settle_units();
    }

    fn hud(&self) -> Hud {
        let mut hud = Hud::new();
        hud.line(self.title())
            .line(format!("Mode: {}", self.mode.label()))
            .line(format!("Selector: ({}, {})", self.selector.x, self.selector.y));
        for (i, unit) in self.board.units.iter().enumerate() {
            let marker = if i == self.selected && self.mode == Mode::Unit {
                " *"
            } else {
                ""
            };
            hud.line(format!("Unit {i}: ({}, {}){marker}", unit.pos.x, unit.pos.y));
        }
        match self.mode {
            Mode::Unit => {
                hud.line("Z: undo   Y: redo")
                    .history(self.history.history_count(), self.history.cursor());
            }
            Mode::Selector => {
                hud.line("Undo and redo are only available in unit mode");
            }
        }
        hud
    }

    fn history_metrics(&self) -> (usize, usize) {
        (self.history.history_count(), self.history.cursor())
    }
}
