//! Focus Tap entry point
//!
//! Plays one session with the autoplay bot and prints the result. Runs on a
//! simulated clock by default; `--realtime` paces ticks against wall time.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use focus_tap::EngineConfig;
use focus_tap::rewards::{format_duration, format_score, generate_feedback_message};
use focus_tap::sim::{AutoPlayer, Clock, FocusTapSession, GameMode, GameResult, ManualClock};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Warmup,
    Challenge,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Warmup => GameMode::Warmup,
            ModeArg::Challenge => GameMode::Challenge,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "focus-tap", version, about = "Play a Focus Tap session with the autoplay bot")]
struct Args {
    /// Session mode
    #[arg(value_enum, default_value = "warmup")]
    mode: ModeArg,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON engine config (partial overrides allowed)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bot accuracy (0-1)
    #[arg(long, default_value_t = 0.85)]
    accuracy: f64,

    /// Bot reaction time in milliseconds
    #[arg(long, default_value_t = 450)]
    reaction_ms: u64,

    /// Stop a challenge session after this many seconds
    #[arg(long, default_value_t = 90)]
    duration_secs: u64,

    /// Pace ticks against wall-clock time
    #[arg(long)]
    realtime: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match EngineConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(2);
            }
        },
        None => EngineConfig::default(),
    };

    log::info!("Focus Tap (native) starting...");
    let result = if args.realtime {
        let mut session = FocusTapSession::realtime(config, args.seed);
        play(&mut session, &args, |tick_ms| {
            thread::sleep(Duration::from_millis(tick_ms))
        })
    } else {
        let clock = ManualClock::new(0);
        let mut session = FocusTapSession::new(config, clock.clone(), args.seed);
        play(&mut session, &args, |tick_ms| clock.advance(tick_ms))
    };

    let Some(result) = result else {
        eprintln!("error: session produced no result");
        std::process::exit(1);
    };
    report(&result, args.json);
}

/// Drive one session to completion, calling `wait` between ticks
fn play<C: Clock>(
    session: &mut FocusTapSession<C>,
    args: &Args,
    mut wait: impl FnMut(u64),
) -> Option<GameResult> {
    let mode = GameMode::from(args.mode);
    let tick_ms = session.config().tick_interval_ms;
    let limit_ms = args.duration_secs.saturating_mul(1000);
    let mut bot = AutoPlayer::new(args.accuracy, args.reaction_ms, args.seed ^ 0xB07);

    let started_at = session.start_game(mode).started_at_ms;
    loop {
        if let Some(result) = session.pump() {
            return Some(result);
        }

        let now = session.clock().now_ms();
        if let Some(intent) = bot.choose_tap(session.state(), now) {
            session.handle_dot_tap(intent.dot_id, intent.color_id);
        }
        for event in session.drain_events() {
            log::trace!("{:?}", event);
        }

        if mode == GameMode::Challenge && now.saturating_sub(started_at) >= limit_ms {
            return session.end_game();
        }
        wait(tick_ms);
    }
}

fn report(result: &GameResult, json: bool) {
    if json {
        match serde_json::to_string_pretty(result) {
            Ok(out) => println!("{out}"),
            Err(err) => eprintln!("error: {err}"),
        }
        return;
    }

    println!("Mode:        {}", result.mode.as_str());
    println!("Score:       {}", format_score(result.score));
    println!("Duration:    {}", format_duration(result.duration_ms));
    println!(
        "Taps:        {} correct / {} wrong ({:.0}% accuracy)",
        result.correct_taps,
        result.wrong_taps,
        result.accuracy() * 100.0
    );
    println!("Best combo:  {}", result.max_combo);
    println!("Top level:   {}", result.max_difficulty);
    println!("XP awarded:  {}", result.xp_awarded);
    println!();
    println!("{}", generate_feedback_message(result));
}
