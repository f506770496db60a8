//! Session driver
//!
//! Runs races back to back until the player declines another one.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::MusicPlayer;
use crate::catalog::Catalog;
use crate::renderer::{ClearMode, TrackRenderer};
use crate::settings::Settings;
use crate::sim::{build_race, random_field_size};

pub const PLAY_AGAIN_PROMPT: &str = "Play Again: (y/n): ";

/// Ask whether to run another race
///
/// Anything other than a literal `n` (after trimming) means yes. End of
/// input means no.
pub fn play_again<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    write!(out, "{PLAY_AGAIN_PROMPT}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(line.trim() != "n")
}

pub struct Driver<'a> {
    settings: &'a Settings,
    catalog: &'a Catalog,
    music: MusicPlayer,
    rng: Pcg32,
    seed: u64,
    tick_period: Duration,
    grid_pause: Duration,
    clear: ClearMode,
}

impl<'a> Driver<'a> {
    pub fn new(settings: &'a Settings, catalog: &'a Catalog, music: MusicPlayer) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let clear = if settings.clear_screen {
            ClearMode::detect()
        } else {
            ClearMode::None
        };
        Self {
            settings,
            catalog,
            music,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            tick_period: settings.tick_period(),
            grid_pause: settings.grid_pause(),
            clear,
        }
    }

    /// Override the pauses from settings
    pub fn with_pacing(mut self, tick_period: Duration, grid_pause: Duration) -> Self {
        self.tick_period = tick_period;
        self.grid_pause = grid_pause;
        self
    }

    pub fn with_clear_mode(mut self, clear: ClearMode) -> Self {
        self.clear = clear;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run races until the player stops; returns the number of races run
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: W) -> io::Result<u32> {
        log::info!("Session seed: {}", self.seed);
        if self.catalog.is_empty() {
            log::warn!("Horse catalog is empty; races will have no runners");
        }
        if let Some(track) = &self.settings.music {
            self.music.play_loop(track.clone());
        }

        let mut view = TrackRenderer::new(out, self.clear);
        let mut races = 0;
        loop {
            view.clear()?;

            let n = random_field_size(
                &mut self.rng,
                self.settings.min_horses,
                self.settings.max_horses,
            );
            let mut race = build_race(
                self.catalog,
                n,
                self.settings.length_class,
                self.settings.terrain,
                &mut self.rng,
            );
            race.display_info(view.out())?;
            if !self.grid_pause.is_zero() {
                thread::sleep(self.grid_pause);
            }

            let result = race.start(&mut self.rng, &mut view, self.tick_period)?;
            races += 1;

            let out = view.out();
            writeln!(out, "Race is Over")?;
            match &result {
                Some(winner) => {
                    log::info!("Race {races} won by {} in {} ticks", winner.name, winner.ticks);
                    writeln!(
                        out,
                        "Winner: #{} {} ({} ticks)",
                        winner.number, winner.name, winner.ticks
                    )?;
                }
                None => writeln!(out, "No horses ran.")?,
            }
            out.flush()?;

            if let (Some(fanfare), Some(_), false) =
                (&self.settings.fanfare, &result, self.settings.mute)
            {
                if let Err(e) = self.music.play_once_blocking(fanfare) {
                    log::warn!("Fanfare skipped: {e}");
                }
            }

            if !play_again(input, view.out())? {
                break;
            }
        }

        self.music.stop();
        Ok(races)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Horse;
    use std::io::Cursor;

    fn stable() -> Catalog {
        Catalog::new(
            (0..12)
                .map(|i| Horse::new(format!("Horse {i}"), 40 + i, 50 + i, 60 + i, 6.0))
                .collect(),
        )
    }

    fn run_session(catalog: &Catalog, input: &str) -> (u32, String) {
        let settings = Settings {
            seed: Some(2718),
            ..Settings::default()
        };
        let mut driver = Driver::new(&settings, catalog, MusicPlayer::new())
            .with_pacing(Duration::ZERO, Duration::ZERO)
            .with_clear_mode(ClearMode::None);
        let mut out = Vec::new();
        let races = driver.run(&mut Cursor::new(input), &mut out).unwrap();
        (races, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_play_again_answers() {
        let ask = |line: &str| {
            let mut out = Vec::new();
            let again = play_again(&mut Cursor::new(line), &mut out).unwrap();
            assert_eq!(out, PLAY_AGAIN_PROMPT.as_bytes());
            again
        };
        assert!(!ask("n\n"));
        assert!(!ask("  n  \n"));
        assert!(ask("y\n"));
        assert!(ask("\n"));
        assert!(ask("N\n"));
        assert!(ask("no\n"));
        assert!(!ask(""));
    }

    #[test]
    fn test_n_ends_after_one_race() {
        let (races, text) = run_session(&stable(), "n\n");
        assert_eq!(races, 1);
        assert_eq!(text.matches("Race is Over").count(), 1);
        assert!(text.contains("Winner: #"));
    }

    #[test]
    fn test_yes_or_blank_runs_again() {
        let (races, text) = run_session(&stable(), "y\n\nn\n");
        assert_eq!(races, 3);
        assert_eq!(text.matches(PLAY_AGAIN_PROMPT).count(), 3);
    }

    #[test]
    fn test_end_of_input_stops() {
        let (races, _) = run_session(&stable(), "y\n");
        assert_eq!(races, 2);
    }

    #[test]
    fn test_empty_catalog_does_not_crash() {
        let (races, text) = run_session(&Catalog::default(), "n\n");
        assert_eq!(races, 1);
        assert!(text.contains("No horses ran."));
    }

    #[test]
    fn test_seeded_sessions_match() {
        let catalog = stable();
        assert_eq!(run_session(&catalog, "y\nn\n"), run_session(&catalog, "y\nn\n"));
    }
}
