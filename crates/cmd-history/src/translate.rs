#![forbid(unsafe_code)]

//! Built-in translation command and the target contract it needs.
//!
//! [`MoveCommand`] works on any target that implements [`Translate`]. The
//! history never looks inside the target; it only hands `&mut T` to the
//! command.
//!
//! Callers clamp the delta (screen bounds, grid limits) *before* building a
//! [`MoveCommand`]. A target whose `translate` clamps internally would break
//! the inverse law, because the backward delta would no longer cancel the
//! forward one.

use crate::command::{Command, Describe};

/// A target that can be shifted by a signed 2D delta.
pub trait Translate {
    /// Shift by `(dx, dy)` in place.
    fn translate(&mut self, dx: i32, dy: i32);
}

/// Integer 2D position.
///
/// Arithmetic wraps on overflow so that forward and backward translations
/// stay total and exact inverses of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// The origin `(0, 0)`.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Translate for Position {
    fn translate(&mut self, dx: i32, dy: i32) {
        self.x = self.x.wrapping_add(dx);
        self.y = self.y.wrapping_add(dy);
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Translate a target by a fixed delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveCommand {
    pub dx: i32,
    pub dy: i32,
}

impl MoveCommand {
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// True when the command would leave the target unchanged.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// The command whose forward effect is this command's backward effect.
    #[must_use]
    pub const fn inverse(&self) -> Self {
        Self {
            dx: self.dx.wrapping_neg(),
            dy: self.dy.wrapping_neg(),
        }
    }
}

impl<T: Translate + ?Sized> Command<T> for MoveCommand {
    fn forward(&self, target: &mut T) {
        target.translate(self.dx, self.dy);
    }

    fn backward(&self, target: &mut T) {
        let inverse = self.inverse();
        target.translate(inverse.dx, inverse.dy);
    }
}

impl Describe for MoveCommand {
    fn description(&self) -> &str {
        "Move"
    }
}
