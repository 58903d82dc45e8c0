//! Terminal rendering of composed screens

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

use super::theme::Palette;
use super::view::{Role, Screen};
use crate::theme::Theme;

/// Paints screens using the current theme's colours
pub struct TerminalRenderer {
    palette: Palette,
    hyperlinks: bool,
}

impl TerminalRenderer {
    pub fn new(theme: &Theme, hyperlinks: bool) -> Self {
        Self {
            palette: Palette::from_theme(theme),
            hyperlinks,
        }
    }

    /// Switch colours after a theme change
    pub fn set_theme(&mut self, theme: &Theme) {
        self.palette = Palette::from_theme(theme);
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn role_color(&self, role: Role) -> Color {
        match role {
            Role::Header => self.palette.prompt,
            Role::Border => self.palette.border,
            Role::PromptUser => self.palette.prompt_user,
            Role::PromptSymbol => self.palette.prompt_symbol,
            Role::PromptPath => self.palette.prompt_path,
            Role::Command => self.palette.command,
            Role::Output | Role::Link => self.palette.output,
            Role::Error => self.palette.error,
            Role::Tip => self.palette.tip,
        }
    }

    /// Draw a full screen over the previous frame. Each row clears its own
    /// tail instead of wiping the whole screen first. The caret is hidden
    /// while output is animating or the transcript is scrolled back.
    pub fn draw<W: Write>(&self, out: &mut W, screen: &Screen, typing: bool) -> io::Result<()> {
        queue!(
            out,
            Hide,
            SetBackgroundColor(self.palette.background),
            SetForegroundColor(self.palette.text)
        )?;

        let mut rows = 0;
        for (row, line) in screen.lines().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(out, MoveTo(0, row))?;
            for span in &line.spans {
                queue!(out, SetForegroundColor(self.role_color(span.role)))?;
                match (&span.href, span.role) {
                    (Some(href), Role::Link) => self.draw_link(out, &span.text, href)?,
                    _ => queue!(out, Print(&span.text))?,
                }
            }
            queue!(out, Clear(ClearType::UntilNewLine))?;
            rows = row.saturating_add(1);
        }
        queue!(out, MoveTo(0, rows), Clear(ClearType::FromCursorDown))?;

        let (col, row) = screen.cursor;
        queue!(out, MoveTo(col, row))?;
        if !typing && screen.scroll == 0 {
            queue!(out, Show)?;
        }
        out.flush()
    }

    fn draw_link<W: Write>(&self, out: &mut W, text: &str, href: &str) -> io::Result<()> {
        queue!(out, SetAttribute(Attribute::Underlined))?;
        if self.hyperlinks {
            queue!(
                out,
                Print(format!("\x1b]8;;{}\x1b\\", href)),
                Print(text),
                Print("\x1b]8;;\x1b\\")
            )?;
        } else {
            queue!(out, Print(text))?;
        }
        queue!(out, SetAttribute(Attribute::NoUnderline))
    }

    /// Restore default colours before leaving the screen
    pub fn reset<W: Write>(&self, out: &mut W) -> io::Result<()> {
        queue!(out, ResetColor, SetAttribute(Attribute::Reset), Show)?;
        out.flush()
    }
}

/// Write one transcript entry as plain text
pub fn write_plain_entry<W: Write>(out: &mut W, command: &str, output: &str) -> io::Result<()> {
    writeln!(out, "$ {}", command.trim())?;
    if !output.is_empty() {
        writeln!(out, "{}", output)?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnimationSettings, TerminalSettings};
    use crate::shell::Shell;
    use crate::storage::MemoryStore;
    use crate::theme::{builtin_themes, ThemeStore};
    use crate::tui::view::compose;

    fn drawn(hyperlinks: bool) -> String {
        let themes = ThemeStore::load(Box::new(MemoryStore::new()));
        let mut shell = Shell::new(themes, &AnimationSettings::default(), "");
        shell.run_line("contact");

        let screen = compose(&shell, &TerminalSettings::default(), 100, 40, 0);
        let renderer = TerminalRenderer::new(shell.current_theme(), hyperlinks);
        let mut out = Vec::new();
        renderer.draw(&mut out, &screen, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_draw_includes_text_and_hyperlinks() {
        let out = drawn(true);
        assert!(out.contains("CONTACT INFORMATION"));
        assert!(out.contains("\x1b]8;;mailto:jordan.avery@example.com\x1b\\"));
    }

    #[test]
    fn test_draw_without_hyperlinks() {
        let out = drawn(false);
        assert!(out.contains("jordan.avery@example.com"));
        assert!(!out.contains("\x1b]8;;"));
    }

    #[test]
    fn test_draw_clears_rows_not_screen() {
        let out = drawn(true);
        assert!(!out.contains("\x1b[2J"));
        assert!(out.contains("\x1b[K"));
        assert!(out.contains("\x1b[J"));
    }

    #[test]
    fn test_caret_hidden_while_scrolled_back() {
        let themes = ThemeStore::load(Box::new(MemoryStore::new()));
        let mut shell = Shell::new(themes, &AnimationSettings::default(), "");
        shell.run_line("projects");
        let renderer = TerminalRenderer::new(shell.current_theme(), true);
        let chrome = TerminalSettings::default();
        let show = "\x1b[?25h";

        let mut out = Vec::new();
        renderer
            .draw(&mut out, &compose(&shell, &chrome, 80, 12, 0), false)
            .unwrap();
        assert!(String::from_utf8(out).unwrap().contains(show));

        let mut out = Vec::new();
        renderer
            .draw(&mut out, &compose(&shell, &chrome, 80, 12, 4), false)
            .unwrap();
        assert!(!String::from_utf8(out).unwrap().contains(show));
    }

    #[test]
    fn test_set_theme_updates_palette() {
        let themes = builtin_themes();
        let mut renderer = TerminalRenderer::new(&themes[0], true);
        assert_eq!(renderer.palette().background, Color::Black);
        renderer.set_theme(&themes[1]);
        assert_eq!(renderer.palette().background, Color::White);
    }

    #[test]
    fn test_plain_entry() {
        let mut out = Vec::new();
        write_plain_entry(&mut out, " about ", "line one").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "$ about\nline one\n\n");
    }
}
