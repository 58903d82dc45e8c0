//! The simulated shell session
//!
//! [`Shell`] owns every piece of mutable session state: the line editor,
//! the transcript, the theme store and the output animator. Front ends feed
//! it key actions and clock ticks and read back what to display.

pub mod animator;
pub mod commands;
pub mod editor;
pub mod session;

pub use animator::{AnimatorState, OutputAnimator, RevealFrame};
pub use commands::{parse_command, Command, Effect, Interpreter};
pub use editor::LineEditor;
pub use session::{SessionEntry, SessionLog, Tone};

use crate::config::AnimationSettings;
use crate::content::ContentTable;
use crate::theme::{Theme, ThemeStore};
use std::time::Duration;
use tracing::debug;

pub struct Shell {
    editor: LineEditor,
    log: SessionLog,
    themes: ThemeStore,
    animator: OutputAnimator,
    interpreter: Interpreter,
}

impl Shell {
    pub fn new(themes: ThemeStore, animation: &AnimationSettings, greeting: &str) -> Self {
        let animator = if animation.enabled {
            OutputAnimator::new(animation.start_delay(), animation.char_interval())
        } else {
            OutputAnimator::new(Duration::ZERO, Duration::ZERO)
        };
        Self {
            editor: LineEditor::new(),
            log: SessionLog::with_greeting(greeting),
            themes,
            animator,
            interpreter: Interpreter::new(ContentTable::default()),
        }
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn themes(&self) -> &ThemeStore {
        &self.themes
    }

    pub fn current_theme(&self) -> &Theme {
        self.themes.current()
    }

    /// True while a response is queued or being revealed
    pub fn is_typing(&self) -> bool {
        self.animator.is_busy()
    }

    pub fn insert_char(&mut self, c: char) {
        if !self.is_typing() {
            self.editor.insert_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if !self.is_typing() {
            self.editor.backspace();
        }
    }

    pub fn history_previous(&mut self) {
        if !self.is_typing() {
            self.editor.history_previous();
        }
    }

    pub fn history_next(&mut self) {
        if !self.is_typing() {
            self.editor.history_next();
        }
    }

    pub fn complete(&mut self) {
        if !self.is_typing() {
            self.editor.complete(self.interpreter.content().completions());
        }
    }

    /// Submit the input buffer. Returns whether it was accepted; blank input
    /// and input arriving while a response is animating are ignored.
    pub fn submit(&mut self) -> bool {
        if self.is_typing() {
            return false;
        }
        let Some(line) = self.editor.submit() else {
            return false;
        };

        match self.interpreter.interpret(&line, &mut self.themes) {
            Effect::Clear => {
                if self.animator.cancel() {
                    debug!("Cancelled animation on clear");
                }
                self.log.clear();
                self.editor.clear_history();
            }
            Effect::Respond { text, tone } => {
                self.log.push(SessionEntry::new(line, tone));
                self.animator.start(text);
            }
        }
        true
    }

    /// Replace the buffer with `line` and submit it
    pub fn submit_line(&mut self, line: &str) -> bool {
        if self.is_typing() {
            return false;
        }
        self.editor.set_buffer(line);
        self.submit()
    }

    /// Advance the animation clock. Returns true when the transcript changed.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let Some(frame) = self.animator.tick(elapsed) else {
            return false;
        };
        if frame.done {
            debug!("Output complete ({} chars)", frame.text.chars().count());
        }
        self.write_output(frame.text);
        true
    }

    /// Reveal the rest of the current response immediately
    pub fn finish_animation(&mut self) {
        if let Some(text) = self.animator.finish() {
            self.write_output(text);
        }
    }

    fn write_output(&mut self, text: String) {
        if let Some(entry) = self.log.last_mut() {
            entry.output = text;
        }
    }

    /// Run `line` to completion and return the resulting output.
    ///
    /// Returns `None` when the line was rejected or cleared the session.
    pub fn run_line(&mut self, line: &str) -> Option<String> {
        self.finish_animation();
        let before = self.log.len();
        if !self.submit_line(line) {
            self.editor.set_buffer("");
            return None;
        }
        self.finish_animation();
        if self.log.len() <= before {
            return None;
        }
        self.log.last().map(|entry| entry.output.clone())
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("entries", &self.log.len())
            .field("typing", &self.is_typing())
            .field("themes", &self.themes)
            .finish()
    }
}
