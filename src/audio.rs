//! Background music
//!
//! Music plays on its own thread. The only state shared with the race is
//! an atomic stop flag, polled between buffer refills. Playback goes
//! through `rodio` when the `audio` feature is enabled; otherwise every
//! call reports `AudioError::Unsupported` and the race runs silently.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::AudioError;

/// How often the playing thread checks the stop flag
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Music player owning at most one background thread
pub struct MusicPlayer {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
    volume: f32,
    muted: bool,
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicPlayer {
    pub fn new() -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            thread: None,
            volume: 0.7,
            muted: false,
        }
    }

    /// Set volume (0.0 - 1.0), applied to the next track started
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Play `path` on repeat in the background until `stop` is called
    pub fn play_loop(&mut self, path: impl Into<PathBuf>) {
        self.stop();
        self.stop.store(false, Ordering::Release);

        let path = path.into();
        let stop = Arc::clone(&self.stop);
        let volume = self.effective_volume();
        let spawned = thread::Builder::new()
            .name("music".to_string())
            .spawn(move || {
                let passes = repeat_until_stopped(&stop, || backend::play(&path, volume, &stop));
                log::debug!("Music thread exiting after {passes} passes");
            });

        match spawned {
            Ok(handle) => self.thread = Some(handle),
            Err(e) => log::warn!("Failed to start music thread: {e}"),
        }
    }

    /// Play `path` once on the calling thread
    pub fn play_once_blocking(&self, path: impl AsRef<Path>) -> Result<(), AudioError> {
        let never = AtomicBool::new(false);
        backend::play(path.as_ref(), self.effective_volume(), &never)
    }

    /// Signal the background thread to stop and wait for it
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                log::warn!("Music thread panicked");
            }
        }
    }
}

impl Drop for MusicPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Run `pass` until `stop` is raised or a pass fails
///
/// Passes are at least `POLL_INTERVAL` apart so a track that plays nothing
/// does not spin on the output device. Returns the number of passes run.
fn repeat_until_stopped<F>(stop: &AtomicBool, mut pass: F) -> u32
where
    F: FnMut() -> Result<(), AudioError>,
{
    let mut passes = 0;
    while !stop.load(Ordering::Acquire) {
        let started = Instant::now();
        passes += 1;
        if let Err(e) = pass() {
            log::warn!("Background music disabled: {e}");
            break;
        }
        if let Some(rest) = POLL_INTERVAL.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
    passes
}

fn open(path: &Path) -> Result<std::fs::File, AudioError> {
    std::fs::File::open(path).map_err(|source| AudioError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(feature = "audio")]
mod backend {
    use std::io::BufReader;
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    use rodio::{Decoder, OutputStream, Sink};

    use super::{POLL_INTERVAL, open};
    use crate::error::AudioError;

    /// Play one pass of the file, returning early if `stop` is raised
    pub fn play(path: &Path, volume: f32, stop: &AtomicBool) -> Result<(), AudioError> {
        let file = open(path)?;
        let (_stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Output(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| AudioError::Output(e.to_string()))?;
        let source =
            Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode(e.to_string()))?;

        sink.set_volume(volume);
        sink.append(source);
        while !sink.empty() {
            if stop.load(Ordering::Acquire) {
                sink.stop();
                break;
            }
            thread::sleep(POLL_INTERVAL);
        }
        Ok(())
    }
}

#[cfg(not(feature = "audio"))]
mod backend {
    use std::path::Path;
    use std::sync::atomic::AtomicBool;

    use super::open;
    use crate::error::AudioError;

    pub fn play(path: &Path, _volume: f32, _stop: &AtomicBool) -> Result<(), AudioError> {
        open(path)?;
        Err(AudioError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_io_error() {
        let player = MusicPlayer::new();
        let err = player.play_once_blocking("no/such/track.wav").unwrap_err();
        assert!(matches!(err, AudioError::Io { .. }));
    }

    #[test]
    fn test_failed_loop_thread_exits_and_stop_joins() {
        let mut player = MusicPlayer::new();
        player.play_loop("no/such/track.wav");
        player.stop();
        assert!(player.thread.is_none());
        // Stopping twice is harmless
        player.stop();
    }

    #[test]
    fn test_empty_passes_are_paced() {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let looper = thread::spawn(move || repeat_until_stopped(&flag, || Ok(())));
        thread::sleep(Duration::from_millis(300));
        stop.store(true, Ordering::Release);
        let passes = looper.join().unwrap();
        // ~6 passes at 50 ms apart; an unpaced loop would run millions
        assert!((1..=20).contains(&passes), "{passes} passes");
    }

    #[test]
    fn test_failed_pass_ends_loop() {
        let stop = AtomicBool::new(false);
        let passes = repeat_until_stopped(&stop, || Err(AudioError::Unsupported));
        assert_eq!(passes, 1);
    }

    #[test]
    fn test_volume_clamped() {
        let mut player = MusicPlayer::new();
        player.set_volume(3.0);
        assert_eq!(player.effective_volume(), 1.0);
        player.set_muted(true);
        assert_eq!(player.effective_volume(), 0.0);
    }
}
