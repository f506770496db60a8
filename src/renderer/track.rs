//! Track drawing
//!
//! A track `width` columns wide is drawn as `|` + `width` cells + `|`.
//! Each racer's lane number is right-aligned so its last digit sits on the
//! racer's column. A two-digit lane near column 0 is pushed right just far
//! enough to fit inside the rails.

use std::io::{self, Write};

use crate::sim::Racer;
use crate::terminal::{ClearMode, clear_screen};

const RAIL: char = '|';

/// A lane row with no horse
pub fn empty_row(width: u32) -> String {
    let mut row = String::with_capacity(width as usize + 2);
    row.push(RAIL);
    row.extend(std::iter::repeat_n(' ', width as usize));
    row.push(RAIL);
    row
}

/// A lane row with `glyph` ending at column `position`
pub fn horse_row(glyph: &str, position: u32, width: u32) -> String {
    let width = width as usize;
    let glyph_len = glyph.chars().count();
    let end = (position as usize)
        .max(glyph_len.saturating_sub(1))
        .min(width.saturating_sub(1).max(glyph_len.saturating_sub(1)));
    let used = end + 1;

    let mut row = String::with_capacity(width.max(used) + 2);
    row.push(RAIL);
    row.push_str(&format!("{glyph:>used$}"));
    row.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    row.push(RAIL);
    row
}

/// Draws race frames to an output stream
pub struct TrackRenderer<W: Write> {
    out: W,
    clear: ClearMode,
    frames: u64,
}

impl<W: Write> TrackRenderer<W> {
    pub fn new(out: W, clear: ClearMode) -> Self {
        Self {
            out,
            clear,
            frames: 0,
        }
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn clear(&mut self) -> io::Result<()> {
        clear_screen(&mut self.out, self.clear)
    }

    pub fn draw_empty_track(&mut self, width: u32) -> io::Result<()> {
        writeln!(self.out, "{}", empty_row(width))
    }

    pub fn draw_horse(&mut self, racer: &Racer, width: u32) -> io::Result<()> {
        let glyph = racer.number().unwrap_or_default().to_string();
        writeln!(self.out, "{}", horse_row(&glyph, racer.position(), width))
    }

    /// Clear the screen and redraw every lane
    pub fn update(&mut self, racers: &[Racer], width: u32) -> io::Result<()> {
        self.clear()?;
        for racer in racers {
            self.draw_empty_track(width)?;
            self.draw_horse(racer, width)?;
        }
        self.draw_empty_track(width)?;
        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }
}
