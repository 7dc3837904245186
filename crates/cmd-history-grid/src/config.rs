//! Scene configuration loaded from TOML.
//!
//! ```toml
//! # grid.toml
//! [screen]
//! width = 1280
//! height = 720
//!
//! [player]
//! step = 16
//!
//! [grid]
//! cell = 32
//! units = [[320, 160], [704, 160]]
//!
//! [history]
//! max_depth = 64
//! ```
//!
//! Every field has a default, so a partial file only overrides what it
//! names and `GridConfig::default()` reproduces the built-in scenes.

use std::path::Path;

use cmd_history::{HistoryConfig, Position};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::policy::Screen;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub screen: ScreenConfig,
    pub player: PlayerConfig,
    pub grid: GridLayoutConfig,
    pub history: HistoryPolicyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Free-moving player square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub size: i32,
    /// Distance covered by one key press.
    pub step: i32,
    pub start: [i32; 2],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: 32,
            step: 16,
            start: [640, 360],
        }
    }
}

/// Grid-aligned units and the selector that picks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayoutConfig {
    /// Grid cell size; also the distance covered by one key press.
    pub cell: i32,
    pub unit_size: i32,
    pub selector_size: i32,
    /// Initial unit positions, snapped to the grid on load.
    pub units: Vec<[i32; 2]>,
}

impl Default for GridLayoutConfig {
    fn default() -> Self {
        Self {
            cell: 32,
            unit_size: 28,
            selector_size: 32,
            units: vec![[320, 160], [704, 160], [928, 288], [736, 416], [608, 544]],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryPolicyConfig {
    /// Maximum number of recorded commands; unlimited when absent.
    pub max_depth: Option<usize>,
}

impl GridConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| GridError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` when given, otherwise use defaults; then validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        let problems = config.validate();
        if problems.is_empty() {
            Ok(config)
        } else {
            Err(GridError::InvalidConfig { problems })
        }
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.screen.width <= 0 || self.screen.height <= 0 {
            problems.push(format!(
                "screen must be positive, got {}x{}",
                self.screen.width, self.screen.height
            ));
        }

        for (name, value) in [
            ("player.size", self.player.size),
            ("player.step", self.player.step),
            ("grid.cell", self.grid.cell),
            ("grid.unit_size", self.grid.unit_size),
            ("grid.selector_size", self.grid.selector_size),
        ] {
            if value <= 0 {
                problems.push(format!("{name} must be positive, got {value}"));
            } else if value > self.screen.width || value > self.screen.height {
                problems.push(format!("{name} ({value}) does not fit on screen"));
            }
        }

        let [x, y] = self.player.start;
        let max_x = self.screen.width.saturating_sub(self.player.size);
        let max_y = self.screen.height.saturating_sub(self.player.size);
        if x < 0 || y < 0 || x > max_x || y > max_y {
            problems.push(format!("player.start ({x}, {y}) is off screen"));
        }

        for (i, [x, y]) in self.grid.units.iter().copied().enumerate() {
            if x < 0 || y < 0 || x >= self.screen.width || y >= self.screen.height {
                problems.push(format!("grid.units[{i}] ({x}, {y}) is off screen"));
            }
        }

        if self.history.max_depth == Some(0) {
            problems.push("history.max_depth must be at least 1".to_string());
        }

        problems
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        Screen::new(self.screen.width, self.screen.height)
    }

    #[must_use]
    pub fn player_start(&self) -> Position {
        let [x, y] = self.player.start;
        Position::new(x, y)
    }

    #[must_use]
    pub fn history_config(&self) -> HistoryConfig {
        self.history
            .max_depth
            .map_or_else(HistoryConfig::unlimited, HistoryConfig::new)
    }
}
