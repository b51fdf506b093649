//! Frame snapshots and the terminal renderer.
//!
//! The game loop emits one [`Frame`] per tick; turning it into escape
//! sequences and clearing stale cells is entirely this module's concern.

use std::io::{self, Write};

use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue, style};

use crate::pipes::Pipe;

/// Everything needed to draw one tick.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: i32,
    pub height: i32,
    pub bird: char,
    pub bird_x: i32,
    pub bird_y: i32,
    pub pipes: Vec<Pipe>,
    pub pipe_gap: i32,
    /// Lines printed under the board: difficulty, score, key hints.
    pub status: Vec<String>,
}

impl Frame {
    fn cell(&self, x: i32, y: i32) -> char {
        if x == self.bird_x && y == self.bird_y {
            self.bird
        } else if self.pipes.iter().any(|pipe| pipe.covers(x, y, self.pipe_gap)) {
            '*'
        } else {
            ' '
        }
    }

    /// Board rows as plain text, border included.
    fn rows(&self) -> Vec<String> {
        let mut rows = Vec::with_capacity(self.height as usize + 2);
        let border = format!("+{}+", "-".repeat(self.width as usize));
        rows.push(border.clone());
        for y in 0..self.height {
            let mut row = String::with_capacity(self.width as usize + 2);
            row.push('|');
            for x in 0..self.width {
                row.push(self.cell(x, y));
            }
            row.push('|');
            rows.push(row);
        }
        rows.push(border);
        rows
    }
}

/// Repaints the whole frame from the top-left every tick.
pub struct Renderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(0, 0))?;
        let rows = frame.rows();
        for line in rows.iter().chain(&frame.status) {
            queue!(
                self.out,
                style::Print(line),
                Clear(ClearType::UntilNewLine),
                style::Print("\r\n"),
            )?;
        }
        queue!(self.out, Clear(ClearType::FromCursorDown))?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame {
            width: 6,
            height: 4,
            bird: '>',
            bird_x: 2,
            bird_y: 1,
            pipes: vec![Pipe { x: 4, gap_y: 0 }],
            pipe_gap: 1,
            status: vec!["Score: 0".to_string()],
        }
    }

    #[test]
    fn board_rows_place_border_bird_and_pipes() {
        let rows = frame().rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], "+------+");
        assert_eq!(rows[5], "+------+");
        // Rows 0 and 1 sit inside the opening; the pipe resumes below it.
        assert_eq!(rows[1], "|      |");
        assert_eq!(rows[2], "|  >   |");
        assert_eq!(rows[3], "|    **|");
        assert_eq!(rows[4], "|    **|");
    }

    #[test]
    fn bird_above_the_board_is_simply_not_drawn() {
        let mut frame = frame();
        frame.bird_y = -3;
        let rows = frame.rows();
        assert!(rows.iter().all(|row| !row.contains('>')));
    }

    #[test]
    fn draw_emits_board_and_status_text() {
        let mut buf = Vec::new();
        Renderer::new(&mut buf).draw(&frame()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("+------+"));
        assert!(text.contains("|  >   |"));
        assert!(text.contains("Score: 0"));
    }
}
