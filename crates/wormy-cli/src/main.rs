mod render;
mod script;
mod settings;

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use wormy_core::{Arena, GameOverReason, InputBindings, TickOutcome};

use crate::render::TextRenderer;
use crate::script::{InputScript, Key};
use crate::settings::Settings;

/// Headless Wormy driver: plays scripted matches and prints every frame.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON settings file (display and arena sections).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Match RNG seed; defaults to the current time.
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON key-press script.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Matches to play before exiting.
    #[arg(short, long, default_value_t = 1)]
    matches: u32,

    /// Ticks after which an unfinished match is abandoned.
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Overrides the configured ticks per second.
    #[arg(long)]
    tps: Option<u32>,

    /// Print one JSON snapshot per line instead of text frames.
    #[arg(long)]
    json: bool,

    /// Sleep between ticks to hold the configured cadence.
    #[arg(long)]
    realtime: bool,
}

/// How a match stopped.
enum MatchEnd {
    Over(GameOverReason),
    TimedOut,
    Quit,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Frames go to stdout; logs go to stderr.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Everything one session needs, built once up front.
struct Session<W: Write> {
    arena: Arena,
    bindings: InputBindings<Key>,
    script: InputScript,
    renderer: TextRenderer,
    out: W,
    tick_interval: Duration,
    max_ticks: u64,
    json: bool,
    realtime: bool,
}

impl<W: Write> Session<W> {
    fn play(&mut self, match_number: u32) -> anyhow::Result<MatchEnd> {
        if match_number > 1 {
            self.arena.restart();
        }
        if !self.json {
            writeln!(self.out, "{}", render::title(match_number))?;
        }
        self.emit_frame()?;

        loop {
            let next_tick = self.arena.tick() + 1;
            if next_tick > self.max_ticks {
                return Ok(MatchEnd::TimedOut);
            }

            let keys = self.script.keys_for(next_tick);
            if keys.contains(&Key::Escape) {
                return Ok(MatchEnd::Quit);
            }
            let commands = self.bindings.resolve(keys.iter().copied());

            let started = Instant::now();
            let outcome = self.arena.advance(&commands);
            for event in self.arena.events() {
                debug!(tick = self.arena.tick(), ?event, "arena event");
            }
            self.emit_frame()?;

            if let TickOutcome::GameOver(reason) = outcome {
                return Ok(MatchEnd::Over(reason));
            }
            if self.realtime {
                thread::sleep(self.tick_interval.saturating_sub(started.elapsed()));
            }
        }
    }

    fn emit_frame(&mut self) -> anyhow::Result<()> {
        let snapshot = self.arena.snapshot();
        if self.json {
            let line = serde_json::to_string(&snapshot).context("failed to encode snapshot")?;
            writeln!(self.out, "{line}")?;
        } else {
            let frame = self.renderer.render(&snapshot);
            write!(self.out, "{frame}")?;
        }
        Ok(())
    }

    fn report(&mut self, match_number: u32, end: &MatchEnd) -> anyhow::Result<()> {
        let snapshot = self.arena.snapshot();
        match end {
            MatchEnd::Over(reason) => {
                info!(match_number, tick = snapshot.tick, %reason, "match over");
                if !self.json {
                    writeln!(self.out, "{}", render::game_over(reason, &snapshot))?;
                }
            }
            MatchEnd::TimedOut => {
                info!(match_number, tick = snapshot.tick, "match abandoned at tick limit");
            }
            MatchEnd::Quit => info!(match_number, tick = snapshot.tick, "quit requested"),
        }
        self.out.flush()?;
        Ok(())
    }
}

fn default_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(tps) = args.tps {
        settings.display.ticks_per_second = tps;
    }
    let arena_config = settings.arena_config()?;

    let script = match &args.script {
        Some(path) => InputScript::load(path)?,
        None => InputScript::default(),
    };

    let seed = args.seed.unwrap_or_else(default_seed);
    let arena = Arena::new(arena_config, seed).context("failed to set up arena")?;
    info!(
        seed,
        grid_width = arena.bounds().width,
        grid_height = arena.bounds().height,
        worms = arena.worms().len(),
        scripted_ticks = script.frame_count(),
        "session started"
    );

    let mut session = Session {
        renderer: TextRenderer::new(arena.bounds()),
        arena,
        bindings: script::default_bindings(),
        script,
        out: io::stdout().lock(),
        tick_interval: settings.display.tick_interval(),
        max_ticks: args.max_ticks,
        json: args.json,
        realtime: args.realtime,
    };

    for match_number in 1..=args.matches {
        let end = session.play(match_number)?;
        session.report(match_number, &end)?;
        if matches!(end, MatchEnd::Quit) {
            break;
        }
    }
    Ok(())
}
