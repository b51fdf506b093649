//! Session configuration.
//!
//! A config is an immutable snapshot read once when a session starts.
//! Changing a tunable mid-flight means building a new session from a new
//! snapshot.

use anyhow::{Result, ensure};
use crossterm::event::KeyCode;

use crate::difficulty::DifficultyTable;

#[derive(Debug, Clone)]
pub struct Config {
    /// Playfield columns.
    pub width: i32,
    /// Playfield rows.
    pub height: i32,
    /// Glyph drawn at the bird's cell.
    pub bird: char,
    /// Downward acceleration applied every tick.
    pub gravity: f64,
    /// Upward impulse applied every tick the jump key is held.
    pub boost: f64,
    /// Rows of open space in every pipe.
    pub pipe_gap: i32,
    pub difficulties: DifficultyTable,
    pub keys: KeyBindings,
}

#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    pub jump: KeyCode,
    pub exit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            jump: KeyCode::Char(' '),
            exit: KeyCode::Esc,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 80,
            height: 20,
            bird: '>',
            gravity: 0.7,
            boost: 3.0,
            pipe_gap: 5,
            difficulties: DifficultyTable::standard(),
            keys: KeyBindings::default(),
        }
    }
}

impl Config {
    /// Reject snapshots the game cannot start from. A `pipe_gap` taller
    /// than the board is allowed; it just makes every pipe passable.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.width > 0, "width must be positive");
        ensure!(self.height > 0, "height must be positive");
        ensure!(self.gravity > 0.0, "gravity must be positive");
        ensure!(self.boost > 0.0, "boost must be positive");
        ensure!(self.pipe_gap > 0, "pipe gap must be positive");
        self.difficulties.validate()
    }

    /// Fixed start cell: a fifth of the way in from the top-left corner.
    pub fn start_position(&self) -> (i32, i32) {
        (self.width / 10 * 2, self.height / 10 * 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::DifficultyTier;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn default_start_position() {
        assert_eq!(Config::default().start_position(), (16, 4));
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        let mut cfg = Config::default();
        cfg.width = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.height = -1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_positive_physics_tunables_are_rejected() {
        let mut cfg = Config::default();
        cfg.gravity = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.boost = -3.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn oversized_pipe_gap_is_allowed() {
        let mut cfg = Config::default();
        cfg.pipe_gap = cfg.height + 10;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn difficulty_table_problems_fail_validation() {
        let mut cfg = Config::default();
        cfg.difficulties = DifficultyTable::new(vec![DifficultyTier::new(100, "Late", 0.05, 30)]);
        assert!(cfg.validate().is_err());
    }
}
