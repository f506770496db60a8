//! Trackside entry point
//!
//! Parses the command line, loads settings and the horse catalog, and runs
//! the race session on stdin/stdout.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use trackside::audio::MusicPlayer;
use trackside::consts::DEFAULT_SETTINGS_PATH;
use trackside::sim::{LengthClass, Terrain};
use trackside::{Catalog, Driver, Settings};

#[derive(Parser, Debug)]
#[command(version, about = "Console horse racing", long_about = None)]
struct Args {
    /// Settings file (JSON); `trackside.json` is used if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Horse catalog CSV
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Seed for a reproducible session
    #[arg(short, long)]
    seed: Option<u64>,

    /// Race length class: short, middle or long
    #[arg(short, long)]
    length: Option<LengthClass>,

    /// Terrain: grass, dirt, mud (or 0, 1, 2)
    #[arg(short, long)]
    terrain: Option<Terrain>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Background music (WAV), looped
    #[arg(long)]
    music: Option<PathBuf>,

    /// Winner fanfare (WAV), played once
    #[arg(long)]
    fanfare: Option<PathBuf>,

    /// Silence music and fanfare
    #[arg(long)]
    mute: bool,

    /// Append frames instead of clearing the screen
    #[arg(long)]
    no_clear: bool,
}

impl Args {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::load_or_default(DEFAULT_SETTINGS_PATH)?,
        };

        if let Some(catalog) = &self.catalog {
            settings.catalog_path = catalog.clone();
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(length) = self.length {
            settings.length_class = length;
        }
        if let Some(terrain) = self.terrain {
            settings.terrain = terrain;
        }
        if let Some(tick_ms) = self.tick_ms {
            settings.tick_ms = tick_ms;
        }
        if let Some(music) = &self.music {
            settings.music = Some(music.clone());
        }
        if let Some(fanfare) = &self.fanfare {
            settings.fanfare = Some(fanfare.clone());
        }
        if self.mute {
            settings.mute = true;
        }
        if self.no_clear {
            settings.clear_screen = false;
        }

        settings.validate()?;
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Trackside starting...");

    let args = Args::parse();
    let settings = args.settings().context("invalid configuration")?;

    let catalog = match Catalog::load(&settings.catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("{e}");
            Catalog::default()
        }
    };

    let mut music = MusicPlayer::new();
    music.set_volume(settings.music_volume);
    music.set_muted(settings.mute);

    let mut driver = Driver::new(&settings, &catalog, music);
    let stdin = io::stdin();
    let races = driver
        .run(&mut stdin.lock(), io::stdout().lock())
        .context("terminal I/O failed")?;

    log::info!("Session over after {races} races (seed {})", driver.seed());
    Ok(())
}
