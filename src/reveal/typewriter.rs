use std::io::{self, Write};
use std::time::Duration;

use super::{Pace, frames};
use crate::core::AppConfig;

/// Plays reveal frames to a writer with a short pause per character
/// and a longer one per segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Typewriter {
    pub char_delay: Duration,
    pub segment_delay: Duration,
}

impl Typewriter {
    pub fn new(char_delay: Duration, segment_delay: Duration) -> Self {
        Self {
            char_delay,
            segment_delay,
        }
    }

    /// No pauses at all, the text appears in one go.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.char_delay, config.segment_delay)
    }

    fn delay(&self, pace: Pace) -> Duration {
        match pace {
            Pace::Char => self.char_delay,
            Pace::Segment => self.segment_delay,
        }
    }

    /// Writes `text` to `out` frame by frame. Each frame is a prefix
    /// of the previous one plus a few characters so only the new part
    /// is written. Returns the number of frames shown.
    pub async fn play<W: Write>(&self, text: &str, out: &mut W) -> io::Result<usize> {
        let mut shown = 0;
        let mut count = 0;
        for frame in frames(text) {
            out.write_all(frame.text[shown..].as_bytes())?;
            out.flush()?;
            shown = frame.text.len();
            count += 1;

            let delay = self.delay(frame.pace);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
        Ok(count)
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
