//! Scenes: a target, its command history, and the input rules that drive
//! them.
//!
//! A scene is updated once per frame with the current [`KeyState`] and then
//! asked for a [`Hud`]. All mutation of the target goes through the scene's
//! history, except the post-frame snapping pass of the unit scene.

mod player;
mod units;

pub use player::PlayerScene;
pub use units::{Board, Mode, Unit, UnitCommand, UnitsScene};

use clap::ValueEnum;

use crate::config::GridConfig;
use crate::hud::Hud;
use crate::input::KeyState;

pub trait Scene {
    /// Title shown on the first HUD line.
    fn title(&self) -> &'static str;

    /// Apply one frame of input.
    fn update(&mut self, keys: &KeyState);

    /// Status text for the current state.
    fn hud(&self) -> Hud;

    /// `(history_count, cursor)` of the scene's history.
    fn history_metrics(&self) -> (usize, usize);
}

/// Scene selector for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// One square moved freely; every move is undoable.
    Player,
    /// Grid of units picked with a selector; unit moves are undoable.
    Units,
}

impl SceneKind {
    #[must_use]
    pub fn build(self, config: &GridConfig) -> Box<dyn Scene> {
        match self {
            Self::Player => Box::new(PlayerScene::new(config)),
            Self::Units => Box::new(UnitsScene::new(config)),
        }
    }
}

impl<S: Scene + ?Sized> Scene for Box<S> {
    fn title(&self) -> &'static str {
        (**self).title()
    }

    fn update(&mut self, keys: &KeyState) {
        (**self).update(keys);
    }

    fn hud(&self) -> Hud {
        (**self).hud()
    }

    fn history_metrics(&self) -> (usize, usize) {
        (**self).history_metrics()
    }
}
