//! Race state and the tick loop
//!
//! A race moves through `Configured -> Running -> Finished`. Each tick every
//! racer still on the track draws a step from its distribution, racers are
//! advanced in lane order, and the first racer to reach the finish column
//! wins (lowest lane number on ties).

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use rand::Rng;

use super::horse::{Racer, Terrain};
use super::step::{StepDistribution, fitness};
use crate::consts::*;
use crate::renderer::TrackRenderer;

/// Lifecycle of a race
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacePhase {
    Configured,
    Running,
    Finished,
}

/// Outcome of a finished race
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceResult {
    pub number: u32,
    pub name: String,
    pub ticks: u64,
}

/// Track width in columns for a race length in furlongs
pub fn track_width_for(length: f64) -> u32 {
    ((TRACK_COLUMNS_PER_FURLONG * length).round() as u32).max(MIN_TRACK_WIDTH)
}

#[derive(Debug, Clone)]
pub struct Race {
    racers: Vec<Racer>,
    length: f64,
    terrain: Terrain,
    track_width: u32,
    phase: RacePhase,
    /// Index into `racers`
    winner: Option<usize>,
    ticks: u64,
    /// Cached per-racer odds (fitness is fixed for the whole race)
    odds: Vec<StepDistribution>,
}

impl Race {
    /// Racers are expected in lane order with numbers already assigned
    pub fn new(racers: Vec<Racer>, length: f64, terrain: Terrain) -> Self {
        let odds = racers
            .iter()
            .map(|r| StepDistribution::for_fitness(fitness(r.horse(), terrain, length)))
            .collect();
        Self {
            racers,
            length,
            terrain,
            track_width: track_width_for(length),
            phase: RacePhase::Configured,
            winner: None,
            ticks: 0,
            odds,
        }
    }

    pub fn racers(&self) -> &[Racer] {
        &self.racers
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn track_width(&self) -> u32 {
        self.track_width
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn odds(&self) -> &[StepDistribution] {
        &self.odds
    }

    pub fn winner(&self) -> Option<&Racer> {
        self.winner.map(|i| &self.racers[i])
    }

    pub fn result(&self) -> Option<RaceResult> {
        self.winner().map(|r| RaceResult {
            number: r.number().unwrap_or_default(),
            name: r.name().to_string(),
            ticks: self.ticks,
        })
    }

    /// Print the race card: length, terrain and the starting grid
    pub fn display_info<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Race length: {} furlongs", self.length)?;
        writeln!(out, "Terrain:     {}", self.terrain)?;
        writeln!(out, "Track:       {} columns", self.track_width)?;
        writeln!(out)?;
        writeln!(
            out,
            "{:>4}  {:<24} {:>6} {:>6}",
            "Lane",
            "Horse",
            self.terrain.as_str(),
            "Pref"
        )?;
        for racer in &self.racers {
            writeln!(
                out,
                "{:>4}  {:<24} {:>6} {:>6}",
                racer.number().unwrap_or_default(),
                racer.name(),
                racer.horse().rating_for(self.terrain),
                racer.horse().preferred_length
            )?;
        }
        writeln!(out)?;
        out.flush()
    }

    /// Apply one tick with explicit per-lane steps
    ///
    /// Returns the winning racer's index once the race finishes.
    pub fn apply_steps(&mut self, steps: &[u32]) -> Option<usize> {
        assert_eq!(steps.len(), self.racers.len(), "one step per racer");
        if self.phase == RacePhase::Finished {
            return self.winner;
        }
        self.phase = RacePhase::Running;
        self.ticks += 1;

        let width = self.track_width;
        for (racer, &step) in self.racers.iter_mut().zip(steps) {
            racer.advance(step, width);
        }

        self.winner = self
            .racers
            .iter()
            .enumerate()
            .filter(|(_, r)| r.has_finished(width))
            .min_by_key(|(_, r)| r.number().unwrap_or(u32::MAX))
            .map(|(i, _)| i);
        if self.winner.is_some() {
            self.phase = RacePhase::Finished;
            log::debug!("Race finished after {} ticks", self.ticks);
        }
        self.winner
    }

    /// Advance every racer by one randomly drawn step
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.phase == RacePhase::Finished {
            return self.winner;
        }
        let width = self.track_width;
        let steps: Vec<u32> = self
            .racers
            .iter()
            .zip(&self.odds)
            .map(|(racer, odds)| {
                if racer.has_finished(width) {
                    0
                } else {
                    odds.sample(rng)
                }
            })
            .collect();
        self.apply_steps(&steps)
    }

    /// Run to completion without drawing or pacing
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<RaceResult> {
        if self.racers.is_empty() {
            self.phase = RacePhase::Finished;
            return None;
        }
        while self.phase != RacePhase::Finished {
            self.tick(rng);
        }
        self.result()
    }

    /// Run the race to completion, redrawing the track after every tick
    pub fn start<R: Rng + ?Sized, W: Write>(
        &mut self,
        rng: &mut R,
        view: &mut TrackRenderer<W>,
        tick_period: Duration,
    ) -> io::Result<Option<RaceResult>> {
        if self.racers.is_empty() {
            log::warn!("Race has no horses; nothing to run");
            self.phase = RacePhase::Finished;
            return Ok(None);
        }
        log::info!(
            "Starting {} furlong race on {} with {} horses",
            self.length,
            self.terrain,
            self.racers.len()
        );

        while self.phase != RacePhase::Finished {
            self.tick(rng);
            view.update(&self.racers, self.track_width)?;
            if !tick_period.is_zero() {
                thread::sleep(tick_period);
            }
        }
        Ok(self.result())
    }
}
