//! Key input sampling.
//!
//! Terminals report key presses and repeats rather than key state, so the
//! crossterm-backed poller counts a control as held while events for it
//! keep arriving inside a short window. The trait keeps the game loop
//! testable with a scripted poller.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::config::KeyBindings;

/// Auto-repeat on common terminals arrives well inside this window.
const HOLD_WINDOW: Duration = Duration::from_millis(250);

/// Logical game controls. Bindings to terminal keys live in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Jump,
    Exit,
}

/// Instantaneous "is this control held" queries, sampled once per tick.
pub trait InputPoller {
    /// Drain pending terminal events. Called once per tick before any
    /// `is_held` query.
    fn pump(&mut self) -> io::Result<()>;

    /// Whether the control is held at sampling time. No edge detection.
    fn is_held(&self, control: Control) -> bool;

    /// Drop anything recorded so far, so presses buffered during a pause
    /// cannot leak into the next prompt.
    fn discard_pending(&mut self) -> io::Result<()>;
}

/// Polls crossterm key events in raw mode.
pub struct CrosstermPoller {
    bindings: KeyBindings,
    jump_seen: Option<Instant>,
    exit_seen: Option<Instant>,
}

impl CrosstermPoller {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            jump_seen: None,
            exit_seen: None,
        }
    }
}

impl InputPoller for CrosstermPoller {
    fn pump(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            let seen = match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => Some(Instant::now()),
                KeyEventKind::Release => None,
            };
            // Ctrl-C always counts as the exit control in raw mode.
            let ctrl_c =
                key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if key.code == self.bindings.jump {
                self.jump_seen = seen;
            }
            if key.code == self.bindings.exit || ctrl_c {
                self.exit_seen = seen;
            }
        }
        Ok(())
    }

    fn is_held(&self, control: Control) -> bool {
        let seen = match control {
            Control::Jump => self.jump_seen,
            Control::Exit => self.exit_seen,
        };
        seen.is_some_and(|at| at.elapsed() <= HOLD_WINDOW)
    }

    fn discard_pending(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            event::read()?;
        }
        self.jump_seen = None;
        self.exit_seen = None;
        Ok(())
    }
}

/// Short human name for a bound key, for on-screen hints.
pub fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        other => format!("{other:?}").to_lowercase(),
    }
}

/// Replays a fixed per-tick script of held controls. Ticks past the end of
/// the script report nothing held.
#[cfg(test)]
pub struct ScriptedPoller {
    script: std::vec::IntoIter<(bool, bool)>,
    current: (bool, bool),
}

#[cfg(test)]
impl ScriptedPoller {
    /// Each entry is `(jump_held, exit_held)` for one pump.
    pub fn new(script: Vec<(bool, bool)>) -> Self {
        Self {
            script: script.into_iter(),
            current: (false, false),
        }
    }
}

#[cfg(test)]
impl InputPoller for ScriptedPoller {
    fn pump(&mut self) -> io::Result<()> {
        self.current = self.script.next().unwrap_or((false, false));
        Ok(())
    }

    fn is_held(&self, control: Control) -> bool {
        match control {
            Control::Jump => self.current.0,
            Control::Exit => self.current.1,
        }
    }

    fn discard_pending(&mut self) -> io::Result<()> {
        self.current = (false, false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_for_hints() {
        assert_eq!(key_name(KeyCode::Char(' ')), "space");
        assert_eq!(key_name(KeyCode::Char('j')), "j");
        assert_eq!(key_name(KeyCode::Esc), "esc");
        assert_eq!(key_name(KeyCode::Enter), "enter");
    }

    #[test]
    fn scripted_poller_replays_per_tick_states() {
        let mut poller = ScriptedPoller::new(vec![(true, false), (false, true)]);
        assert!(!poller.is_held(Control::Jump));

        poller.pump().unwrap();
        assert!(poller.is_held(Control::Jump));
        assert!(!poller.is_held(Control::Exit));

        poller.pump().unwrap();
        assert!(!poller.is_held(Control::Jump));
        assert!(poller.is_held(Control::Exit));

        // Past the end of the script nothing is held.
        poller.pump().unwrap();
        assert!(!poller.is_held(Control::Jump));
        assert!(!poller.is_held(Control::Exit));
    }
}
