//! Key edge detection and scripted input.
//!
//! A real loop polls the keyboard once per frame. Here the held keys of each
//! frame come from an [`InputScript`], and [`KeyState`] turns consecutive
//! frames into "pressed this frame" edges.

use std::str::FromStr;

use bitflags::bitflags;

use crate::error::{GridError, Result};

bitflags! {
    /// Set of keys held during one frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeySet: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const TOGGLE = 1 << 4;
        const UNDO = 1 << 5;
        const REDO = 1 << 6;
        const QUIT = 1 << 7;
    }
}

impl KeySet {
    /// Map a script character to its key.
    ///
    /// `w a s d` and `^ < v >` are directions, `t` toggles the scene mode,
    /// `z` undoes, `y` redoes and `q` quits. Letters are case-insensitive.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' | '^' => Some(Self::UP),
            's' | 'v' => Some(Self::DOWN),
            'a' | '<' => Some(Self::LEFT),
            'd' | '>' => Some(Self::RIGHT),
            't' => Some(Self::TOGGLE),
            'z' => Some(Self::UNDO),
            'y' => Some(Self::REDO),
            'q' => Some(Self::QUIT),
            _ => None,
        }
    }
}

/// Held keys of the previous and current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    previous: KeySet,
    current: KeySet,
}

impl KeyState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame with `held` as the current key set.
    pub fn advance(&mut self, held: KeySet) {
        self.previous = self.current;
        self.current = held;
    }

    /// Keys held this frame.
    #[must_use]
    pub fn held(&self) -> KeySet {
        self.current
    }

    /// True when every key in `keys` went from released to pressed this frame.
    #[must_use]
    pub fn triggered(&self, keys: KeySet) -> bool {
        !keys.is_empty() && self.current.contains(keys) && !self.previous.intersects(keys)
    }

    /// Direction requested this frame, scaled by `step`.
    ///
    /// Opposite directions pressed on the same frame resolve to down and
    /// right.
    #[must_use]
    pub fn direction(&self, step: i32) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.triggered(KeySet::UP) {
            dy = -step;
        }
        if self.triggered(KeySet::DOWN) {
            dy = step;
        }
        if self.triggered(KeySet::LEFT) {
            dx = -step;
        }
        if self.triggered(KeySet::RIGHT) {
            dx = step;
        }
        (dx, dy)
    }
}

/// Held keys for a sequence of frames.
///
/// Frames are whitespace-separated; each frame lists the characters of the
/// keys held during it, or `.` for none. `#` starts a comment that runs to
/// the end of the line.
///
/// ```text
/// # move right twice, undo once
/// d . d . z
/// ```
///
/// Holding a key over consecutive frames (`d d`) triggers it only once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputScript {
    frames: Vec<KeySet>,
}

impl InputScript {
    pub fn parse(source: &str) -> Result<Self> {
        let mut frames = Vec::new();
        let tokens = source
            .lines()
            .map(|line| line.split_once('#').map_or(line, |(code, _)| code))
            .flat_map(str::split_whitespace);

        for token in tokens {
            let frame = frames.len();
            let mut held = KeySet::empty();
            if token != "." {
                for c in token.chars() {
                    let key = KeySet::from_char(c)
                        .ok_or_else(|| GridError::script(frame, format!("unknown key '{c}'")))?;
                    held |= key;
                }
            }
            frames.push(held);
        }

        Ok(Self { frames })
    }

    #[must_use]
    pub fn frames(&self) -> &[KeySet] {
        &self.frames
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FromStr for InputScript {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
