//! Frame loop over a scripted input sequence.

use tracing::{debug, debug_span};

use crate::hud::Hud;
use crate::input::{InputScript, KeySet, KeyState};
use crate::scene::Scene;

/// State after a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    /// Zero-based frame index.
    pub frame: usize,
    pub held: KeySet,
    pub history_count: usize,
    pub cursor: usize,
    /// Quit was held on this frame; no further frames run.
    pub quit: bool,
}

impl FrameReport {
    /// Held keys as script characters, `.` when none.
    #[must_use]
    pub fn keys_label(&self) -> String {
        if self.held.is_empty() {
            return ".".to_string();
        }
        self.held
            .iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// Outcome of [`Session::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: usize,
    pub quit: bool,
    pub history_count: usize,
    pub cursor: usize,
    pub hud: Hud,
}

/// Drives one scene frame by frame.
#[derive(Debug)]
pub struct Session<S> {
    scene: S,
    keys: KeyState,
    frame: usize,
    quit: bool,
}

impl<S: Scene> Session<S> {
    #[must_use]
    pub fn new(scene: S) -> Self {
        Self {
            scene,
            keys: KeyState::new(),
            frame: 0,
            quit: false,
        }
    }

    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    #[must_use]
    pub fn into_scene(self) -> S {
        self.scene
    }

    /// Frames run so far.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.frame
    }

    #[must_use]
    pub fn has_quit(&self) -> bool {
        self.quit
    }

    /// Run one frame with `held` keys. Does nothing once quit was seen.
    pub fn step(&mut self, held: KeySet) -> Option<FrameReport> {
        if self.quit {
            return None;
        }
        let _span = debug_span!("frame", index = self.frame).entered();

        self.keys.advance(held);
        self.scene.update(&self.keys);
        self.quit = held.contains(KeySet::QUIT);

        let (history_count, cursor) = self.scene.history_metrics();
        let report = FrameReport {
            frame: self.frame,
            held,
            history_count,
            cursor,
            quit: self.quit,
        };
        debug!(
            keys = %report.keys_label(),
            history_count,
            cursor,
            "frame done"
        );
        self.frame += 1;
        Some(report)
    }

    /// Run every frame of `script`, stopping after a frame that holds quit.
    pub fn run(&mut self, script: &InputScript) -> SessionSummary {
        for &held in script.frames() {
            if self.step(held).is_none() {
                break;
            }
        }
        self.summary()
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        let (history_count, cursor) = self.scene.history_metrics();
        SessionSummary {
            frames: self.frame,
            quit: self.quit,
            history_count,
            cursor,
            hud: self.scene.hud(),
        }
    }
}
