//! Text heads-up display.
//!
//! Stands in for the on-screen text of a graphical loop: each scene produces
//! a [`Hud`] after every frame, built only from read-only queries.

use std::fmt;

/// Lines of status text for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    lines: Vec<String>,
}

impl Hud {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line.
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    /// Append the standard `History: N   Cursor: M` line.
    pub fn history(&mut self, history_count: usize, cursor: usize) -> &mut Self {
        self.line(format!("History: {history_count}   Cursor: {cursor}"))
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when some line equals `text`.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.lines.iter().any(|l| l == text)
    }
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_line_each() {
        let mut hud = Hud::new();
        hud.line("Player: (0, 0)").history(2, 1);
        assert_eq!(hud.to_string(), "Player: (0, 0)\nHistory: 2   Cursor: 1\n");
        assert!(hud.contains("History: 2   Cursor: 1"));
    }
}
