mod audio;
mod config;
mod difficulty;
mod game;
mod input;
mod physics;
mod pipes;
mod preview;
mod render;

use std::io::stdout;

use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};
use crossterm::{cursor, execute, terminal};

use crate::audio::Audio;
use crate::config::Config;
use crate::game::{Outcome, Session, SessionResult};
use crate::input::CrosstermPoller;
use crate::render::Renderer;

/// A Flappy Bird style arcade game for the terminal.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Playfield columns
    #[arg(long)]
    width: Option<i32>,
    /// Playfield rows
    #[arg(long)]
    height: Option<i32>,
    /// Downward acceleration per tick
    #[arg(long)]
    gravity: Option<f64>,
    /// Upward impulse per tick while jumping
    #[arg(long)]
    boost: Option<f64>,
    /// Rows of open space in each pipe
    #[arg(long)]
    pipe_gap: Option<i32>,
    /// Glyph used for the bird
    #[arg(long)]
    bird: Option<char>,
    /// Disable sound
    #[arg(long)]
    mute: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fly the current tunables on an empty board, without pipes or scoring
    Preview {
        /// Tier whose tick rate to use, by label (e.g. "Baby")
        #[arg(long)]
        difficulty: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut cfg = Config::default();
    if let Some(width) = args.width {
        cfg.width = width;
    }
    if let Some(height) = args.height {
        cfg.height = height;
    }
    if let Some(gravity) = args.gravity {
        cfg.gravity = gravity;
    }
    if let Some(boost) = args.boost {
        cfg.boost = boost;
    }
    if let Some(pipe_gap) = args.pipe_gap {
        cfg.pipe_gap = pipe_gap;
    }
    if let Some(bird) = args.bird {
        cfg.bird = bird;
    }
    cfg.validate()?;

    // Borders add two columns/rows, the status lines two more rows.
    let (cols, rows) = terminal::size()?;
    let (need_cols, need_rows) = (cfg.width as u16 + 2, cfg.height as u16 + 4);
    if cols < need_cols || rows < need_rows {
        bail!(
            "terminal is {cols}x{rows} but this board needs {need_cols}x{need_rows}; \
             resize it or pass a smaller --width/--height"
        );
    }

    let audio = if args.mute { None } else { Audio::open() };

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
    )?;

    let played = play(&cfg, &args, audio.as_ref());

    execute!(
        out,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()?;

    match played? {
        Some(SessionResult {
            outcome: Outcome::GameOver,
            score,
        }) => println!("Game over! Final score: {score}"),
        Some(SessionResult {
            outcome: Outcome::Aborted,
            score,
        }) => println!("Session aborted at score {score}"),
        None => {}
    }
    Ok(())
}

fn play(cfg: &Config, args: &Args, audio: Option<&Audio>) -> Result<Option<SessionResult>> {
    let mut poller = CrosstermPoller::new(cfg.keys);
    let mut renderer = Renderer::new(stdout());

    match &args.command {
        Some(Command::Preview { difficulty }) => {
            let tier = match difficulty {
                Some(label) => cfg
                    .difficulties
                    .by_label(label)
                    .ok_or_else(|| anyhow!("no difficulty named '{label}'"))?,
                None => cfg
                    .difficulties
                    .at_score(0)
                    .ok_or_else(|| anyhow!("difficulty table needs an entry at score 0"))?,
            };
            preview::run(cfg, tier, &mut poller, &mut renderer)?;
            Ok(None)
        }
        None => {
            let session = Session::new(cfg, rand::thread_rng())?;
            Ok(Some(session.run(&mut poller, &mut renderer, audio)?))
        }
    }
}
