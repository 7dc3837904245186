use cmd_history::{CommandHistory, MoveCommand, Position};
use tracing::debug;

use super::Scene;
use crate::config::GridConfig;
use crate::hud::Hud;
use crate::input::{KeySet, KeyState};
use crate::policy::Screen;

/// A single square moved by the direction keys.
///
/// Each triggered direction records its own [`MoveCommand`]. Moves are
/// clamped to the screen before the command is built; a move that would
/// not change anything records nothing.
#[derive(Debug)]
pub struct PlayerScene {
    player: Position,
    size: i32,
    step: i32,
    screen: Screen,
    history: CommandHistory<MoveCommand>,
}

impl PlayerScene {
    #[must_use]
    pub fn new(config: &GridConfig) -> Self {
        let screen = config.screen();
        Self {
            player: screen.clamp(config.player_start(), config.player.size),
            size: config.player.size,
            step: config.player.step,
            screen,
            history: CommandHistory::with_config(config.history_config()),
        }
    }

    #[must_use]
    pub fn player(&self) -> Position {
        self.player
    }

    #[must_use]
    pub fn history(&self) -> &CommandHistory<MoveCommand> {
        &self.history
    }

    fn try_move(&mut self, dx: i32, dy: i32) {
        let command = self.screen.clamp_delta(self.player, self.size, dx, dy);
        if command.is_identity() {
            debug!(x = self.player.x, y = self.player.y, "move blocked by screen edge");
            return;
        }
        self.history.execute(command, &mut self.player);
    }
}

impl Scene for PlayerScene {
    fn title(&self) -> &'static str {
        "Command history: player"
    }

    fn update(&mut self, keys: &KeyState) {
        let step = self.step;
        for (key, dx, dy) in [
            (KeySet::UP, 0, -step),
            (KeySet::DOWN, 0, step),
            (KeySet::LEFT, -step, 0),
            (KeySet::RIGHT, step, 0),
        ] {
            if keys.triggered(key) {
                self.try_move(dx, dy);
            }
        }

        if keys.triggered(KeySet::UNDO) {
            self.history.undo(&mut self.player);
        }
        if keys.triggered(KeySet::REDO) {
            self.history.redo(&mut self.player);
        }
    }

    fn hud(&self) -> Hud {
        let mut hud = Hud::new();
        hud.line(self.title())
            .line("W/A/S/D: move   Z: undo   Y: redo")
            .line(format!("Player: ({}, {})", self.player.x, self.player.y))
            .history(self.history.history_count(), self.history.cursor());
        hud
    }

    fn history_metrics(&self) -> (usize, usize) {
        (self.history.history_count(), self.history.cursor())
    }
}
