//! Character-by-character reveal of command output
//!
//! The animator is a plain state machine driven by [`OutputAnimator::tick`];
//! the caller owns the clock. A queued text first waits out the start delay,
//! then one character is revealed per interval.

use std::time::Duration;

/// Default pause before a response starts appearing
pub const DEFAULT_START_DELAY: Duration = Duration::from_millis(100);

/// Default time between revealed characters
pub const DEFAULT_CHAR_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    /// Waiting for the start delay to elapse
    Pending { text: String, remaining: Duration },
    /// Revealing `text`; `carried` is time not yet spent on a character
    Animating {
        text: String,
        revealed: usize,
        carried: Duration,
    },
}

/// Output visible after a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealFrame {
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone)]
pub struct OutputAnimator {
    state: AnimatorState,
    start_delay: Duration,
    interval: Duration,
}

impl OutputAnimator {
    pub fn new(start_delay: Duration, interval: Duration) -> Self {
        Self {
            state: AnimatorState::Idle,
            start_delay,
            interval,
        }
    }

    pub fn state(&self) -> &AnimatorState {
        &self.state
    }

    /// True from `start` until the whole text has been revealed
    pub fn is_busy(&self) -> bool {
        !matches!(self.state, AnimatorState::Idle)
    }

    /// Queue `text` for reveal, replacing anything in flight
    pub fn start(&mut self, text: impl Into<String>) {
        self.state = AnimatorState::Pending {
            text: text.into(),
            remaining: self.start_delay,
        };
    }

    /// Drop the current animation. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        let was_busy = self.is_busy();
        self.state = AnimatorState::Idle;
        was_busy
    }

    /// Skip to the end, returning the complete text if anything was queued
    pub fn finish(&mut self) -> Option<String> {
        match std::mem::replace(&mut self.state, AnimatorState::Idle) {
            AnimatorState::Idle => None,
            AnimatorState::Pending { text, .. } | AnimatorState::Animating { text, .. } => {
                Some(text)
            }
        }
    }

    /// Advance the clock by `elapsed`.
    ///
    /// Returns the visible text whenever a character was revealed or the
    /// animation completed, and `None` when nothing changed.
    pub fn tick(&mut self, elapsed: Duration) -> Option<RevealFrame> {
        let (text, mut revealed, carried) =
            match std::mem::replace(&mut self.state, AnimatorState::Idle) {
                AnimatorState::Idle => return None,
                AnimatorState::Pending { text, remaining } => {
                    if elapsed < remaining {
                        self.state = AnimatorState::Pending {
                            text,
                            remaining: remaining - elapsed,
                        };
                        return None;
                    }
                    (text, 0, elapsed - remaining)
                }
                AnimatorState::Animating {
                    text,
                    revealed,
                    carried,
                } => (text, revealed, carried + elapsed),
            };

        let total = text.chars().count();
        let (steps, carried) = if self.interval.is_zero() {
            (total, Duration::ZERO)
        } else {
            let steps = (carried.as_nanos() / self.interval.as_nanos()) as usize;
            let spent = self.interval * steps.min(u32::MAX as usize) as u32;
            (steps, carried.saturating_sub(spent))
        };

        let before = revealed;
        revealed = (revealed + steps).min(total);

        if revealed == total {
            return Some(RevealFrame { text, done: true });
        }

        let frame = (revealed != before).then(|| RevealFrame {
            text: prefix(&text, revealed).to_string(),
            done: false,
        });
        self.state = AnimatorState::Animating {
            text,
            revealed,
            carried,
        };
        frame
    }
}

impl Default for OutputAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_START_DELAY, DEFAULT_CHAR_INTERVAL)
    }
}

/// The first `chars` characters of `text`
fn prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
