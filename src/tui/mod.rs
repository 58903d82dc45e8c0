//! Interactive terminal UI for portfolio-term
//!
//! Runs the shell full-screen: header, scrolling transcript, prompt line and
//! footer tips, with output revealed on a timer. When stdin is not a
//! terminal, lines are read and answered in plain text instead.

pub mod keys;
pub mod links;
pub mod renderer;
pub mod theme;
pub mod view;

use crate::config::TerminalSettings;
use crate::shell::Shell;
use crate::theme::Theme;

use keys::{map_key, KeyAction};
use renderer::{write_plain_entry, TerminalRenderer};

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::execute;
use futures_util::StreamExt;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Repaint cadence while idle
const IDLE_TICK: Duration = Duration::from_millis(50);

/// Raw mode and alternate screen, restored on drop
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Full-screen interactive session
pub struct InteractiveShell {
    shell: Shell,
    chrome: TerminalSettings,
    renderer: TerminalRenderer,
    tick: Duration,
    /// Theme the renderer's palette was built from
    painted_theme: Theme,
    /// Body rows scrolled back from the prompt
    scroll: usize,
    /// Body rows in the last painted frame, used as the page size
    page: usize,
}

impl InteractiveShell {
    pub fn new(shell: Shell, chrome: TerminalSettings, tick: Duration) -> Self {
        let renderer = TerminalRenderer::new(shell.current_theme(), chrome.hyperlinks);
        let painted_theme = shell.current_theme().clone();
        Self {
            shell,
            chrome,
            renderer,
            tick: if tick.is_zero() { IDLE_TICK } else { tick.min(IDLE_TICK) },
            painted_theme,
            scroll: 0,
            page: 1,
        }
    }

    /// Run the interactive shell main loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut stdout = io::stdout();
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        info!("Interactive session started");
        self.paint(&mut stdout)?;

        loop {
            let changed = tokio::select! {
                _ = ticker.tick() => {
                    let now = Instant::now();
                    let elapsed = now.duration_since(last_tick);
                    last_tick = now;
                    let changed = self.shell.tick(elapsed);
                    if changed {
                        self.scroll = 0;
                    }
                    changed
                }
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => match map_key(key) {
                        Some(KeyAction::Quit) => break,
                        Some(action) => {
                            self.apply(action);
                            true
                        }
                        None => false,
                    },
                    Some(Ok(Event::Resize(_, _))) => true,
                    Some(Ok(_)) => false,
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
            };

            if changed {
                self.paint(&mut stdout)?;
            }
        }

        self.renderer.reset(&mut stdout)?;
        info!("Interactive session ended");
        Ok(())
    }

    fn apply(&mut self, action: KeyAction) {
        if !matches!(action, KeyAction::ScrollUp | KeyAction::ScrollDown) {
            self.scroll = 0;
        }

        match action {
            KeyAction::ScrollUp => self.scroll = self.scroll.saturating_add(self.page),
            KeyAction::ScrollDown => self.scroll = self.scroll.saturating_sub(self.page),
            KeyAction::Submit => {
                if self.shell.submit() {
                    debug!("Submitted line ({} entries)", self.shell.log().len());
                }
            }
            KeyAction::HistoryPrevious => self.shell.history_previous(),
            KeyAction::HistoryNext => self.shell.history_next(),
            KeyAction::Complete => self.shell.complete(),
            KeyAction::Backspace => self.shell.backspace(),
            KeyAction::Insert(c) => self.shell.insert_char(c),
            KeyAction::Quit => {}
        }
    }

    /// Rebuild the palette when the current theme differs from the one last
    /// painted, including a redefinition under the same name
    fn refresh_palette(&mut self) -> bool {
        let current = self.shell.current_theme();
        if *current == self.painted_theme {
            return false;
        }
        debug!("Repainting with theme {}", current.name);
        self.renderer.set_theme(current);
        self.painted_theme = current.clone();
        true
    }

    fn paint<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.refresh_palette();

        let (width, height) = terminal::size()?;
        let screen = view::compose(&self.shell, &self.chrome, width, height, self.scroll);
        self.scroll = screen.scroll;
        self.page = screen.body.len().saturating_sub(1).max(1);
        self.renderer.draw(out, &screen, self.shell.is_typing())?;
        Ok(())
    }
}

/// Answer each line of `input` in plain text, echoing the command
pub fn run_batch<R: BufRead, W: Write>(shell: &mut Shell, input: R, out: &mut W) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match shell.run_line(&line) {
            Some(output) => write_plain_entry(out, &line, &output)?,
            None => debug!("No output for {:?}", line),
        }
    }
    out.flush()?;
    Ok(())
}
