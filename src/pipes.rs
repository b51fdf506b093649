//! Procedurally spaced pipe obstacles.

use rand::Rng;

/// Columns a pipe occupies.
pub const PIPE_WIDTH: i32 = 2;

/// Pipes are culled once fully past the left edge.
const OFFSCREEN_X: i32 = -2;

/// A pipe pair: two columns of material with a vertical opening whose top
/// row is `gap_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipe {
    pub x: i32,
    pub gap_y: i32,
}

impl Pipe {
    /// Whether the cell is pipe material: inside the pipe's columns and
    /// strictly outside the opening.
    pub fn covers(&self, x: i32, y: i32, pipe_gap: i32) -> bool {
        self.x <= x && x < self.x + PIPE_WIDTH && (y < self.gap_y || y > self.gap_y + pipe_gap)
    }
}

/// New pipe at the right edge with a uniformly random opening. When
/// `pipe_gap` swallows the whole board the opening pins to the top row and
/// the pipe has no material anywhere.
pub fn generate_pipe<R: Rng>(rng: &mut R, width: i32, height: i32, pipe_gap: i32) -> Pipe {
    let span = (height - pipe_gap + 1).max(1);
    Pipe {
        x: width,
        gap_y: rng.gen_range(0..span),
    }
}

/// Left-to-right stream of pipes scrolling one column per tick.
#[derive(Debug, Clone)]
pub struct PipeStream {
    pipes: Vec<Pipe>,
}

impl PipeStream {
    /// Stream holding a single pipe at the far right, the state a session
    /// starts from.
    pub fn seeded<R: Rng>(rng: &mut R, width: i32, height: i32, pipe_gap: i32) -> Self {
        Self {
            pipes: vec![generate_pipe(rng, width, height, pipe_gap)],
        }
    }

    #[cfg(test)]
    pub fn from_pipes(pipes: Vec<Pipe>) -> Self {
        Self { pipes }
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    /// One tick of scrolling: shift everything left, cull pipes that are
    /// fully off-screen, and top up from the right once the newest pipe has
    /// moved `pipe_spacing` columns in. Tolerates an empty stream.
    pub fn advance<R: Rng>(
        &mut self,
        rng: &mut R,
        width: i32,
        height: i32,
        pipe_gap: i32,
        pipe_spacing: i32,
    ) {
        for pipe in &mut self.pipes {
            pipe.x -= 1;
        }
        self.pipes.retain(|pipe| pipe.x > OFFSCREEN_X);

        if self
            .pipes
            .last()
            .is_none_or(|pipe| pipe.x < width - pipe_spacing)
        {
            self.pipes.push(generate_pipe(rng, width, height, pipe_gap));
        }

        // Openings clipped above the board should never be generated; drop
        // one from the front if it ever shows up.
        if self.pipes.first().is_some_and(|pipe| pipe.gap_y < 0) {
            self.pipes.remove(0);
        }
    }
}
