//! Deterministic race simulation
//!
//! All race logic lives here. Given the same catalog and seed, a race
//! selects the same horses, lanes and length and produces the same
//! tick-by-tick positions:
//! - Seeded RNG only
//! - Stable iteration order (lane order)
//! - No terminal or audio dependencies beyond the `TrackRenderer` seam

pub mod factory;
pub mod horse;
pub mod race;
pub mod step;

pub use factory::{LengthClass, build_race, random_field_size};
pub use horse::{Horse, Racer, Terrain};
pub use race::{Race, RacePhase, RaceResult, track_width_for};
pub use step::{StepDistribution, fitness};
