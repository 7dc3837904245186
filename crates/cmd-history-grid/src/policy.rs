//! Screen clamping and grid snapping.
//!
//! These rules belong to the driver, not to the history. Moves are resolved
//! against them *before* a command is built, so every recorded delta lands on
//! a legal spot and undo restores the previous spot exactly. The
//! post-frame pass in the unit scene then leaves reachable states unchanged.

use cmd_history::{MoveCommand, Position};

/// Round `v` down to a multiple of `cell`, truncating toward zero.
#[must_use]
pub fn snap(v: i32, cell: i32) -> i32 {
    if cell <= 0 {
        return v;
    }
    (v / cell) * cell
}

/// Rectangular play field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub width: i32,
    pub height: i32,
}

impl Screen {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Keep a `size`-wide square fully on screen.
    #[must_use]
    pub fn clamp(&self, pos: Position, size: i32) -> Position {
        let max_x = self.width.saturating_sub(size).max(0);
        let max_y = self.height.saturating_sub(size).max(0);
        Position::new(pos.x.clamp(0, max_x), pos.y.clamp(0, max_y))
    }

    /// Clamp first, then snap each axis to the grid.
    #[must_use]
    pub fn clamp_and_snap(&self, pos: Position, size: i32, cell: i32) -> Position {
        let clamped = self.clamp(pos, size);
        Position::new(snap(clamped.x, cell), snap(clamped.y, cell))
    }

    /// Delta that moves `pos` by at most `(dx, dy)` while staying on screen.
    #[must_use]
    pub fn clamp_delta(&self, pos: Position, size: i32, dx: i32, dy: i32) -> MoveCommand {
        let dest = self.clamp(offset(pos, dx, dy), size);
        delta_between(pos, dest)
    }

    /// Like [`clamp_delta`](Self::clamp_delta), but the destination is also
    /// snapped to the grid.
    #[must_use]
    pub fn grid_delta(&self, pos: Position, size: i32, cell: i32, dx: i32, dy: i32) -> MoveCommand {
        let dest = self.clamp_and_snap(offset(pos, dx, dy), size, cell);
        delta_between(pos, dest)
    }
}

fn offset(pos: Position, dx: i32, dy: i32) -> Position {
    Position::new(pos.x.saturating_add(dx), pos.y.saturating_add(dy))
}

fn delta_between(from: Position, to: Position) -> MoveCommand {
    MoveCommand::new(to.x.wrapping_sub(from.x), to.y.wrapping_sub(from.y))
}
