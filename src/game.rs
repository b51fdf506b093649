//! The play session: a small state machine advanced one tick at a time.
//!
//! [`Session::tick`] holds all of the per-tick rules and is deterministic
//! given the injected RNG and jump state; [`Session::run`] wraps it in the
//! real-time loop that samples input, draws frames, and paces ticks.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use rand::Rng;

use crate::audio::Audio;
use crate::config::Config;
use crate::difficulty::DifficultyTier;
use crate::input::{Control, InputPoller, key_name};
use crate::physics::{self, SpeedClamp};
use crate::pipes::PipeStream;
use crate::render::{Frame, Renderer};

/// Pause before the game-over prompt starts accepting input.
const GAME_OVER_PAUSE: Duration = Duration::from_millis(1500);
/// Delay between polls while blocked on a key.
const WAIT_POLL: Duration = Duration::from_millis(5);

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player pressed the exit key.
    Aborted,
    /// Pipe collision or floor breach.
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResult {
    pub outcome: Outcome,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    WaitingToStart,
    Running,
    Ended,
}

/// One play-through. Owns all mutable state and is discarded when the run
/// ends.
pub struct Session<'a, R: Rng> {
    cfg: &'a Config,
    rng: R,
    state: State,
    bird_x: i32,
    bird_y: i32,
    speed: f64,
    pipes: PipeStream,
    score: u32,
    tier: DifficultyTier,
}

impl<'a, R: Rng> Session<'a, R> {
    pub fn new(cfg: &'a Config, mut rng: R) -> Result<Self> {
        let tier = cfg
            .difficulties
            .at_score(0)
            .ok_or_else(|| anyhow!("difficulty table needs an entry at score 0"))?
            .clone();
        let (bird_x, bird_y) = cfg.start_position();
        let pipes = PipeStream::seeded(&mut rng, cfg.width, cfg.height, cfg.pipe_gap);
        Ok(Self {
            cfg,
            rng,
            state: State::WaitingToStart,
            bird_x,
            bird_y,
            speed: 0.0,
            pipes,
            score: 0,
            tier,
        })
    }

    fn start(&mut self) {
        if self.state == State::WaitingToStart {
            self.state = State::Running;
        }
    }

    fn is_over(&self) -> bool {
        self.state == State::Ended
    }

    /// One running tick, in order: speed, position, collision, pipe
    /// stream, score, difficulty.
    fn tick(&mut self, jump_held: bool) {
        if self.state != State::Running {
            return;
        }

        self.speed = physics::step(
            self.speed,
            self.cfg.gravity,
            self.cfg.boost,
            jump_held,
            SpeedClamp::GAMEPLAY,
        );
        self.bird_y = physics::fall(self.bird_y, self.speed);

        if physics::collided_with_pipe(self.pipes.pipes(), self.cfg.pipe_gap, self.bird_x, self.bird_y)
            || physics::breached_floor(self.bird_y, self.cfg.height)
        {
            self.state = State::Ended;
            return;
        }

        self.pipes.advance(
            &mut self.rng,
            self.cfg.width,
            self.cfg.height,
            self.cfg.pipe_gap,
            self.tier.pipe_spacing,
        );
        self.score += 1;
        if let Some(tier) = self.cfg.difficulties.at_score(self.score) {
            self.tier = tier.clone();
        }
    }

    /// Render snapshot for the current state.
    fn frame(&self) -> Frame {
        let jump = key_name(self.cfg.keys.jump);
        let exit = key_name(self.cfg.keys.exit);
        let level = format!("Level: {}   Score: {}", self.tier.label, self.score);
        let status = match self.state {
            State::WaitingToStart => vec![
                level,
                format!("Press '{jump}' to jump, '{exit}' to exit. Have FUN!"),
            ],
            State::Running => vec![level, format!("Press '{exit}' to exit")],
            State::Ended => vec![
                level,
                format!("Game Over! Press '{jump}' or '{exit}' to continue"),
            ],
        };
        Frame {
            width: self.cfg.width,
            height: self.cfg.height,
            bird: self.cfg.bird,
            bird_x: self.bird_x,
            bird_y: self.bird_y,
            pipes: self.pipes.pipes().to_vec(),
            pipe_gap: self.cfg.pipe_gap,
            status,
        }
    }

    /// Drive the session in real time until it ends or the player exits.
    pub fn run<W: Write>(
        mut self,
        poller: &mut dyn InputPoller,
        renderer: &mut Renderer<W>,
        audio: Option<&Audio>,
    ) -> Result<SessionResult> {
        renderer.draw(&self.frame())?;

        // WAITING_TO_START: the first jump launches the run, exit abandons
        // the session before anything is scored.
        loop {
            poller.pump()?;
            if poller.is_held(Control::Exit) {
                return Ok(SessionResult {
                    outcome: Outcome::Aborted,
                    score: self.score,
                });
            }
            if poller.is_held(Control::Jump) {
                self.start();
                break;
            }
            thread::sleep(WAIT_POLL);
        }

        let mut jump_was_held = false;
        while self.state == State::Running {
            let tick_start = Instant::now();

            poller.pump()?;
            // Cancellation is honored every tick, not only before launch.
            if poller.is_held(Control::Exit) {
                return Ok(SessionResult {
                    outcome: Outcome::Aborted,
                    score: self.score,
                });
            }
            let jump_held = poller.is_held(Control::Jump);
            if jump_held && !jump_was_held {
                if let Some(audio) = audio {
                    audio.flap();
                }
            }
            jump_was_held = jump_held;

            self.tick(jump_held);
            if self.is_over() {
                break;
            }
            renderer.draw(&self.frame())?;

            let elapsed = tick_start.elapsed();
            if elapsed < self.tier.tick {
                thread::sleep(self.tier.tick - elapsed);
            }
        }

        // ENDED: show the verdict, hold briefly, then wait for an
        // acknowledgment on a fresh press.
        if let Some(audio) = audio {
            audio.death();
        }
        renderer.draw(&self.frame())?;
        thread::sleep(GAME_OVER_PAUSE);
        poller.discard_pending()?;
        loop {
            poller.pump()?;
            if poller.is_held(Control::Jump) || poller.is_held(Control::Exit) {
                break;
            }
            thread::sleep(WAIT_POLL);
        }

        Ok(SessionResult {
            outcome: Outcome::GameOver,
            score: self.score,
        })
    }
}
