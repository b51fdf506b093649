//! Physics preview: fly the current tunables on an empty board.
//!
//! Unlike the play loop this variant derives its speed clamp from the
//! session tunables, keeps the bird inside the board on both edges, and
//! has no pipes, score, or game over. It ends only on the exit key,
//! which is checked every tick.

use std::io::Write;
use std::thread;
use std::time::Instant;

use anyhow::Result;

use crate::config::Config;
use crate::difficulty::DifficultyTier;
use crate::input::{Control, InputPoller, key_name};
use crate::physics::{self, SpeedClamp};
use crate::render::{Frame, Renderer};

pub fn run<W: Write>(
    cfg: &Config,
    tier: &DifficultyTier,
    poller: &mut dyn InputPoller,
    renderer: &mut Renderer<W>,
) -> Result<()> {
    let clamp = SpeedClamp::derive(cfg.gravity, cfg.boost);
    let (bird_x, mut bird_y) = cfg.start_position();
    let mut speed = 0.0;

    let status = vec![
        format!(
            "Difficulty: {}   Gravity: {}   Boost: {}",
            tier.label, cfg.gravity, cfg.boost
        ),
        format!(
            "Press '{}' to jump, '{}' to exit",
            key_name(cfg.keys.jump),
            key_name(cfg.keys.exit)
        ),
    ];

    loop {
        let tick_start = Instant::now();

        poller.pump()?;
        speed = physics::step(
            speed,
            cfg.gravity,
            cfg.boost,
            poller.is_held(Control::Jump),
            clamp,
        );
        if poller.is_held(Control::Exit) {
            return Ok(());
        }
        bird_y = physics::fall(bird_y, speed).clamp(0, cfg.height - 1);

        renderer.draw(&Frame {
            width: cfg.width,
            height: cfg.height,
            bird: cfg.bird,
            bird_x,
            bird_y,
            pipes: Vec::new(),
            pipe_gap: cfg.pipe_gap,
            status: status.clone(),
        })?;

        let elapsed = tick_start.elapsed();
        if elapsed < tier.tick {
            thread::sleep(tier.tick - elapsed);
        }
    }
}
