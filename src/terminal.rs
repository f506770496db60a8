//! Terminal screen clearing

use std::io::{self, Write};
use std::process::Command;

/// Cursor home + erase display
pub const ANSI_CLEAR: &str = "\x1b[H\x1b[2J";

/// How the screen is cleared between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    /// Write the ANSI escape sequence into the output stream
    Ansi,
    /// Run the platform `cls` command (Windows consoles)
    Command,
    /// Never clear (frames are appended)
    None,
}

impl ClearMode {
    /// Pick the mechanism for the current platform
    pub fn detect() -> Self {
        if cfg!(windows) {
            ClearMode::Command
        } else {
            ClearMode::Ansi
        }
    }
}

/// Clear the screen
///
/// Failures of the `cls` subprocess are logged and swallowed; only write
/// errors on `out` are returned.
pub fn clear_screen<W: Write>(out: &mut W, mode: ClearMode) -> io::Result<()> {
    match mode {
        ClearMode::Ansi => {
            out.write_all(ANSI_CLEAR.as_bytes())?;
            out.flush()
        }
        ClearMode::Command => {
            out.flush()?;
            match Command::new("cmd").args(["/c", "cls"]).status() {
                Ok(status) if !status.success() => {
                    log::warn!("Screen clear exited with {status}");
                }
                Err(e) => log::warn!("Screen clear failed: {e}"),
                Ok(_) => {}
            }
            Ok(())
        }
        ClearMode::None => Ok(()),
    }
}
