//! Horses and per-race racers
//!
//! A `Horse` is an immutable catalog entry shared across races. A `Racer`
//! wraps one for the duration of a single race and carries the mutable
//! lane number and track position.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Racing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Grass,
    #[default]
    Dirt,
    Mud,
}

impl Terrain {
    pub const ALL: [Terrain; 3] = [Terrain::Grass, Terrain::Dirt, Terrain::Mud];

    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::Grass => "Grass",
            Terrain::Dirt => "Dirt",
            Terrain::Mud => "Mud",
        }
    }

    /// Numeric terrain code (0 Grass, 1 Dirt, 2 Mud)
    pub fn code(&self) -> u8 {
        match self {
            Terrain::Grass => 0,
            Terrain::Dirt => 1,
            Terrain::Mud => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Terrain::Grass),
            1 => Some(Terrain::Dirt),
            2 => Some(Terrain::Mud),
            _ => None,
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Terrain {
    type Err = String;

    /// Accepts a name (any case) or a numeric code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Terrain::from_code(code).ok_or_else(|| format!("unknown terrain code: {code}"));
        }
        match s.to_lowercase().as_str() {
            "grass" | "turf" => Ok(Terrain::Grass),
            "dirt" => Ok(Terrain::Dirt),
            "mud" => Ok(Terrain::Mud),
            _ => Err(format!("unknown terrain: {s}")),
        }
    }
}

/// A catalog horse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Horse {
    pub name: String,
    pub mud_rating: i32,
    pub grass_rating: i32,
    pub dirt_rating: i32,
    /// Preferred race length in furlongs
    pub preferred_length: f64,
}

impl Horse {
    pub fn new(
        name: impl Into<String>,
        mud_rating: i32,
        grass_rating: i32,
        dirt_rating: i32,
        preferred_length: f64,
    ) -> Self {
        Self {
            name: name.into(),
            mud_rating,
            grass_rating,
            dirt_rating,
            preferred_length,
        }
    }

    pub fn rating_for(&self, terrain: Terrain) -> i32 {
        match terrain {
            Terrain::Grass => self.grass_rating,
            Terrain::Dirt => self.dirt_rating,
            Terrain::Mud => self.mud_rating,
        }
    }
}

/// A horse entered in one race
#[derive(Debug, Clone)]
pub struct Racer {
    horse: Arc<Horse>,
    number: Option<u32>,
    position: u32,
}

impl Racer {
    pub fn new(horse: Arc<Horse>) -> Self {
        Self {
            horse,
            number: None,
            position: 0,
        }
    }

    pub fn horse(&self) -> &Horse {
        &self.horse
    }

    pub fn name(&self) -> &str {
        &self.horse.name
    }

    pub fn set_number(&mut self, number: u32) {
        debug_assert!(number >= 1, "lane numbers start at 1");
        self.number = Some(number);
    }

    /// Lane number, `None` outside a race
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    /// Current column on the track (0 at the start)
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Move forward by `delta` columns, stopping at the finish column
    pub fn advance(&mut self, delta: u32, track_width: u32) {
        let finish = track_width.saturating_sub(1);
        self.position = self.position.saturating_add(delta).min(finish);
    }

    pub fn has_finished(&self, track_width: u32) -> bool {
        self.position >= track_width.saturating_sub(1)
    }

    pub fn reset(&mut self) {
        self.number = None;
        self.position = 0;
    }
}
