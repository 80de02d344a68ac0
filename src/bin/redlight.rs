//! redlight - run a red light, green light session over recorded pose frames.
//!
//! Reads JSON-lines frames (one JSON array of tracked subjects per line) from
//! a file or stdin, ticks the game once per frame and prints one tick report
//! per line on stdout.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use red_light::{CueEmitter, FrameReader, GameConfig, GameLoop, SilentPlayer};

#[derive(Parser)]
#[command(name = "redlight")]
#[command(about = "Red light, green light game engine over pose frames")]
struct Args {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON-lines pose frames (defaults to stdin)
    #[arg(short, long)]
    frames: Option<PathBuf>,

    /// Seed for the light timer (deterministic sessions)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding the cue sound files
    #[arg(long)]
    asset_dir: Option<PathBuf>,

    /// Output device, by index or name substring
    #[arg(long)]
    device: Option<String>,

    /// Log cues instead of playing them
    #[arg(long)]
    silent: bool,

    /// List output devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.list_devices {
        return list_devices();
    }

    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(dir) = args.asset_dir {
        config.audio.asset_dir = dir;
    }
    if let Some(device) = args.device {
        config.audio.output_device = Some(device);
    }
    config.validate()?;

    let input: Box<dyn BufRead> = match &args.frames {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open frames {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let emitter = start_emitter(&config, args.silent);
    let mut game = GameLoop::from_config(&config, emitter);
    game.announce_intro();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut malformed = 0u64;

    for frame in FrameReader::new(input) {
        let subjects = match frame {
            Ok(subjects) => subjects,
            Err(err @ red_light::FrameError::Parse { .. }) => {
                log::warn!("{err}, skipping");
                malformed += 1;
                continue;
            }
            Err(err) => return Err(err).context("failed to read frames"),
        };

        let report = game.tick(&subjects);
        serde_json::to_writer(&mut out, &report).context("failed to write tick report")?;
        writeln!(out).context("failed to write tick report")?;
    }
    out.flush().context("failed to flush output")?;

    log::info!(
        "session over: {} ticks, {} rounds, {} eliminations, {} malformed frames",
        game.ticks(),
        game.rounds(),
        game.total_eliminations(),
        malformed
    );

    let emitter = game.into_cues();
    if emitter.dropped() > 0 {
        log::warn!("{} cues dropped", emitter.dropped());
    }
    emitter.shutdown();

    Ok(())
}

#[cfg(feature = "audio")]
fn start_emitter(config: &GameConfig, silent: bool) -> CueEmitter {
    let capacity = config.audio.queue_capacity;
    if silent {
        return CueEmitter::with_player(capacity, SilentPlayer::new());
    }
    let audio = config.audio.clone();
    CueEmitter::spawn(capacity, move || red_light::RodioPlayer::open(audio))
}

#[cfg(not(feature = "audio"))]
fn start_emitter(config: &GameConfig, silent: bool) -> CueEmitter {
    if !silent {
        log::info!("built without the audio feature, cues will only be logged");
    }
    CueEmitter::with_player(config.audio.queue_capacity, SilentPlayer::new())
}

#[cfg(feature = "audio")]
fn list_devices() -> Result<()> {
    let devices = red_light::list_output_devices()?;
    for (index, name) in devices.iter().enumerate() {
        println!("{index}: {name}");
    }
    Ok(())
}

#[cfg(not(feature = "audio"))]
fn list_devices() -> Result<()> {
    anyhow::bail!("built without the audio feature, no output devices available")
}
