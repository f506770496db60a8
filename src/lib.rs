//! Trackside - A console horse-racing simulation
//!
//! Core modules:
//! - `sim`: Deterministic race simulation (horses, step odds, tick loop)
//! - `renderer`: Plain-text track drawing
//! - `catalog`: Horse pool loaded from CSV
//! - `audio`: Background music on its own thread
//! - `driver`: Replay loop and prompt
//! - `settings`: Layered configuration

pub mod audio;
pub mod catalog;
pub mod driver;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod terminal;

pub use catalog::Catalog;
pub use driver::Driver;
pub use settings::Settings;

/// Simulation constants
pub mod consts {
    /// Race length buckets (furlongs)
    pub const SHORT_LENGTHS: [f64; 3] = [5.0, 5.5, 6.0];
    pub const MIDDLE_LENGTHS: [f64; 2] = [7.0, 8.0];
    pub const LONG_LENGTHS: [f64; 3] = [9.0, 10.0, 12.0];

    /// Field size range (inclusive)
    pub const MIN_FIELD_SIZE: usize = 5;
    pub const MAX_FIELD_SIZE: usize = 11;

    /// Track columns per furlong. A 6 furlong sprint is 30 columns, a
    /// 12 furlong route is 60, both inside an 80 column terminal.
    pub const TRACK_COLUMNS_PER_FURLONG: f64 = 5.0;
    pub const MIN_TRACK_WIDTH: u32 = 2;

    /// Fitness lost per furlong between preferred and actual length
    pub const DISTANCE_PENALTY_PER_FURLONG: f64 = 5.0;

    /// Step odds (0, 1, 2 columns) at the pivot fitness
    pub const STEP_PIVOT_PROBABILITIES: [f64; 3] = [0.3, 0.5, 0.2];
    pub const STEP_PIVOT_FITNESS: f64 = 50.0;
    /// Probability moved from "0" to "2" per fitness point above the pivot
    pub const STEP_SHIFT_PER_FITNESS: f64 = 0.01;

    /// Default pause between ticks (ms)
    pub const DEFAULT_TICK_MS: u64 = 100;
    /// Default pause after showing the race card (ms)
    pub const DEFAULT_GRID_PAUSE_MS: u64 = 2000;

    pub const DEFAULT_CATALOG_PATH: &str = "horses.csv";
    pub const DEFAULT_SETTINGS_PATH: &str = "trackside.json";
}
