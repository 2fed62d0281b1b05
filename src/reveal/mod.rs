//! Progressive reveal of an already complete response.
//!
//! `frames` produces the sequence of display states without any
//! timing, the `Typewriter` plays them back with delays.

pub mod typewriter;

pub use typewriter::Typewriter;

/// Segment boundary. A crude sentence split, abbreviations and
/// decimals are not special cased.
pub const DELIMITER: &str = ". ";

/// How long to wait after showing a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pace {
    Char,
    Segment,
}

/// One display state. `text` is always a prefix of the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame<'a> {
    pub text: &'a str,
    pub pace: Pace,
}

/// Returns the display states for `text`: one per character, and one
/// per consumed delimiter which shows the whole `". "` at once. A
/// trailing fragment with no delimiter after it gets none appended,
/// so the last frame is always exactly `text`.
///
/// Empty input yields a single empty frame.
pub fn frames(text: &str) -> Frames<'_> {
    Frames {
        text,
        pos: 0,
        started: false,
    }
}

/// Lazy iterator over reveal frames. Clone it to replay from the
/// current position.
#[derive(Clone, Debug)]
pub struct Frames<'a> {
    text: &'a str,
    pos: usize,
    started: bool,
}

impl<'a> Iterator for Frames<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Frame<'a>> {
        let first = !self.started;
        self.started = true;

        let rest = &self.text[self.pos..];
        if rest.is_empty() {
            // Empty input still produces one state
            return first.then_some(Frame {
                text: "",
                pace: Pace::Char,
            });
        }

        let pace = if rest.starts_with(DELIMITER) {
            self.pos += DELIMITER.len();
            Pace::Segment
        } else {
            let ch = rest.chars().next()?;
            self.pos += ch.len_utf8();
            Pace::Char
        };

        Some(Frame {
            text: &self.text[..self.pos],
            pace,
        })
    }
}
