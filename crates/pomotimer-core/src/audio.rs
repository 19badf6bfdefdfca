//! Audible cue played on every session transition.
//!
//! Playback is best effort: callers go through [`play_cue`], which logs and
//! drops any failure.

use std::io::{self, Write};

use tracing::debug;

pub trait Chime: Send {
    fn play(&self) -> io::Result<()>;
}

/// Rings the terminal bell (BEL) on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Chime for TerminalBell {
    fn play(&self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(b"\x07")?;
        out.flush()
    }
}

/// Plays nothing. Used with `--mute` or when notifications are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Chime for Silent {
    fn play(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Play `chime`, swallowing any error.
pub fn play_cue(chime: &dyn Chime) {
    if let Err(e) = chime.play() {
        debug!(error = %e, "audio cue failed");
    }
}
