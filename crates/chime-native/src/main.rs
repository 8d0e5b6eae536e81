use anyhow::{bail, Context};
use chime_core::{Cue, Field, TimerQueue, ToneEngine};
use clap::{Parser, Subcommand};
use instant::Instant;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

mod device;
mod render;
mod store;

use device::CpalDevice;
use store::JsonFileStore;

// Loop granularity while waiting for deferred notes
const TICK: Duration = Duration::from_millis(5);
// Let the last envelope ring out before the stream is dropped
const RING_OUT: Duration = Duration::from_millis(300);
// Gap between cues in `demo`
const DEMO_GAP: Duration = Duration::from_millis(450);

#[derive(Parser, Debug)]
#[command(name = "chime", version, about = "Play roster chimes and manage sound preferences")]
struct Cli {
    /// Preference file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Behave as if the user asked for reduced motion (silences every cue)
    #[arg(long, global = true)]
    reduced_motion: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one cue: neutral, success, delete, shimmer, or a field name
    Play { cue: String },
    /// Play every cue in turn
    Demo,
    /// Simulate typing: one shimmer request per character
    Type {
        text: String,
        #[arg(long, default_value_t = 80)]
        interval_ms: u64,
    },
    /// Show or change sound preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand, Debug)]
enum PrefsAction {
    Show,
    Enable,
    Disable,
    /// Master volume; clamped to 0..=1
    Volume { value: f32 },
    /// Keystroke shimmer: on or off
    Shimmer { state: String },
}

type NativeEngine = ToneEngine<CpalDevice, JsonFileStore>;

/// Engine plus the wall clock that drives its timer queue.
struct Session {
    engine: NativeEngine,
    clock: TimerQueue,
    started: Instant,
}

impl Session {
    fn open(cli: &Cli) -> anyhow::Result<Self> {
        let path = match &cli.config {
            Some(p) => p.clone(),
            None => store::default_path().context("no config directory on this platform")?,
        };
        log::debug!("[prefs] using {}", path.display());
        let clock = TimerQueue::new();
        let engine = ToneEngine::new(
            JsonFileStore::open(path),
            cli.reduced_motion,
            Rc::new(clock.clone()),
            CpalDevice::connect,
        );
        Ok(Self {
            engine,
            clock,
            started: Instant::now(),
        })
    }

    fn sync(&self) {
        self.clock.advance_to(self.started.elapsed());
    }

    /// Run the clock for `d` of wall time, firing deferred work as it falls due.
    fn run_for(&self, d: Duration) {
        let until = Instant::now() + d;
        loop {
            self.sync();
            let now = Instant::now();
            if now >= until {
                break;
            }
            std::thread::sleep(TICK.min(until - now));
        }
    }

    /// Wait for pending notes, then for the last one to ring out.
    fn drain(&self) {
        while !self.clock.is_idle() {
            self.run_for(TICK);
        }
        std::thread::sleep(RING_OUT);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut session = Session::open(&cli)?;
    match cli.command {
        Command::Play { cue } => {
            let cue = Cue::from_name(&cue).with_context(|| format!("unknown cue '{}'", cue))?;
            // Running the command is the user gesture.
            session.engine.prime();
            session.engine.play_cue(cue);
            session.drain();
        }
        Command::Demo => {
            session.engine.prime();
            let mut cues = vec![Cue::Neutral];
            cues.extend(Field::ALL.into_iter().map(Cue::FieldBlur));
            cues.extend([Cue::Success, Cue::Delete, Cue::Shimmer]);
            for cue in cues {
                println!("{}", cue.name());
                session.engine.play_cue(cue);
                session.run_for(DEMO_GAP);
            }
            session.drain();
        }
        Command::Type { text, interval_ms } => {
            session.engine.prime();
            let interval = Duration::from_millis(interval_ms);
            let mut ticks = 0usize;
            let mut keys = 0usize;
            for _ in text.chars() {
                session.sync();
                let was_cooling = session.engine.shimmer_cooling();
                session.engine.play_shimmer();
                if !was_cooling && session.engine.shimmer_cooling() {
                    ticks += 1;
                }
                keys += 1;
                session.run_for(interval);
            }
            session.drain();
            println!("{} keystrokes, {} shimmer ticks", keys, ticks);
            if !session.engine.keypress_shimmer() {
                println!("keypress shimmer is off; enable it with `chime prefs shimmer on`");
            }
        }
        Command::Prefs { action } => {
            let engine = &mut session.engine;
            match action {
                PrefsAction::Show => {}
                PrefsAction::Enable => engine.set_enabled(true),
                PrefsAction::Disable => engine.set_enabled(false),
                PrefsAction::Volume { value } => engine.set_volume(value),
                PrefsAction::Shimmer { state } => match state.to_ascii_lowercase().as_str() {
                    "on" | "true" => engine.set_keypress_shimmer(true),
                    "off" | "false" => engine.set_keypress_shimmer(false),
                    other => bail!("expected 'on' or 'off', got '{}'", other),
                },
            }
            let prefs = engine.preferences();
            println!("enabled          {}", prefs.enabled);
            println!("volume           {:.2}", prefs.volume());
            println!("keypress shimmer {}", prefs.keypress_shimmer);
        }
    }
    Ok(())
}
