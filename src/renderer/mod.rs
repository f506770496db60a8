//! Text rendering module
//!
//! Draws the track as rows of plain ASCII between `|` rails.

pub mod track;

pub use crate::terminal::ClearMode;
pub use track::{TrackRenderer, empty_row, horse_row};
