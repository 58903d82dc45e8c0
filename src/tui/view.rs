//! Layout of the shell screen as styled lines
//!
//! Composition is pure: it turns the shell state into header, transcript
//! and footer lines sized to the terminal, leaving colours and escape
//! sequences to the renderer.

use super::links::{segments, SegmentKind};
use crate::config::TerminalSettings;
use crate::shell::{Shell, Tone};
use unicode_width::UnicodeWidthChar;

pub const TIP_COMPLETION: &str = "Tip: Press Tab for command autocompletion";
pub const TIP_HISTORY: &str = "Use arrow keys to navigate command history";

const BORDER_GLYPH: char = '─';

/// What a span of text represents on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Header,
    Border,
    PromptUser,
    PromptSymbol,
    PromptPath,
    Command,
    Output,
    Error,
    Link,
    Tip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub role: Role,
    /// Hyperlink target for link spans
    pub href: Option<String>,
}

impl Span {
    pub fn new(text: impl Into<String>, role: Role) -> Self {
        Self {
            text: text.into(),
            role,
            href: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| text_width(&s.text)).sum()
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A full screen of lines
#[derive(Debug, Clone)]
pub struct Screen {
    pub header: Vec<Line>,
    pub body: Vec<Line>,
    pub footer: Vec<Line>,
    /// Column and row of the input caret
    pub cursor: (u16, u16),
    /// Body rows hidden below the bottom edge, after clamping
    pub scroll: usize,
}

impl Screen {
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.header.iter().chain(&self.body).chain(&self.footer)
    }
}

fn text_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Compose the screen for a `width` x `height` terminal.
///
/// `scroll` counts body rows to hide below the bottom edge; zero keeps the
/// input line in view. It is clamped so the first row is never passed.
pub fn compose(
    shell: &Shell,
    chrome: &TerminalSettings,
    width: u16,
    height: u16,
    scroll: usize,
) -> Screen {
    let width = usize::from(width.max(1));
    let height = usize::from(height);

    let border = Line::new(vec![Span::new(
        BORDER_GLYPH.to_string().repeat(width),
        Role::Border,
    )]);
    let header: Vec<Line> = [
        Line::new(vec![Span::new(&chrome.title, Role::Header)]),
        Line::new(vec![Span::new(&chrome.system_line, Role::Header)]),
        border.clone(),
    ]
    .into_iter()
    .flat_map(|line| wrap(line, width))
    .collect();
    let footer: Vec<Line> = [
        border,
        Line::new(vec![Span::new(TIP_COMPLETION, Role::Tip)]),
        Line::new(vec![Span::new(TIP_HISTORY, Role::Tip)]),
    ]
    .into_iter()
    .flat_map(|line| wrap(line, width))
    .collect();

    let mut body = Vec::new();
    for entry in shell.log().entries() {
        if !entry.command.is_empty() {
            let mut spans = prompt_spans(chrome);
            spans.push(Span::new(&entry.command, Role::Command));
            body.extend(wrap(Line::new(spans), width));
        }
        if !entry.output.is_empty() {
            for line in entry.output.split('\n') {
                body.extend(wrap(output_line(line, entry.tone), width));
            }
        }
        body.push(Line::blank());
    }

    let mut input = prompt_spans(chrome);
    input.push(Span::new(shell.editor().buffer(), Role::Command));
    let input_lines = wrap(Line::new(input), width);
    let caret_col = input_lines.last().map(Line::width).unwrap_or(0);
    body.extend(input_lines);

    let available = height.saturating_sub(header.len() + footer.len()).max(1);
    let scroll = scroll.min(body.len().saturating_sub(available));
    body.truncate(body.len() - scroll);
    if body.len() > available {
        body.drain(..body.len() - available);
    }

    let caret_row = header.len() + body.len().saturating_sub(1);
    let caret_col = caret_col.min(width - 1);

    Screen {
        header,
        body,
        footer,
        cursor: (caret_col as u16, caret_row.min(u16::MAX as usize) as u16),
        scroll,
    }
}

fn prompt_spans(chrome: &TerminalSettings) -> Vec<Span> {
    vec![
        Span::new(format!("{}@{}", chrome.user, chrome.host), Role::PromptUser),
        Span::new(":", Role::PromptSymbol),
        Span::new("~", Role::PromptPath),
        Span::new("$ ", Role::PromptSymbol),
    ]
}

fn output_line(text: &str, tone: Tone) -> Line {
    let plain = match tone {
        Tone::Normal => Role::Output,
        Tone::Error => Role::Error,
    };
    let spans = segments(text)
        .into_iter()
        .map(|segment| {
            let href = segment.href();
            let role = match segment.kind {
                SegmentKind::Text => plain,
                _ => Role::Link,
            };
            Span {
                text: segment.text.to_string(),
                role,
                href,
            }
        })
        .collect();
    Line::new(spans)
}

/// Break `line` into lines no wider than `width` columns
pub fn wrap(line: Line, width: usize) -> Vec<Line> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = Line::blank();
    let mut used = 0;

    for span in line.spans {
        let mut piece = String::new();
        for c in span.text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && used > 0 {
                if !piece.is_empty() {
                    current.spans.push(Span {
                        text: std::mem::take(&mut piece),
                        role: span.role,
                        href: span.href.clone(),
                    });
                }
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            piece.push(c);
            used += w;
        }
        if !piece.is_empty() {
            current.spans.push(Span {
                text: piece,
                role: span.role,
                href: span.href,
            });
        }
    }
    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimationSettings;
    use crate::storage::MemoryStore;
    use crate::theme::ThemeStore;

    fn shell() -> Shell {
        let themes = ThemeStore::load(Box::new(MemoryStore::new()));
        Shell::new(themes, &AnimationSettings::default(), "Welcome")
    }

    fn body_text(screen: &Screen) -> Vec<String> {
        screen.body.iter().map(Line::text).collect()
    }

    #[test]
    fn test_wrap_splits_at_width() {
        let line = Line::new(vec![
            Span::new("abc", Role::Output),
            Span::new("defg", Role::Command),
        ]);
        let lines = wrap(line, 3);
        let texts: Vec<String> = lines.iter().map(Line::text).collect();
        assert_eq!(texts, vec!["abc", "def", "g"]);
        assert_eq!(lines[1].spans[0].role, Role::Command);
    }

    #[test]
    fn test_wrap_counts_wide_chars() {
        let lines = wrap(Line::new(vec![Span::new("🏆🏆", Role::Output)]), 3);
        assert_eq!(lines.len(), 2);
        assert_eq!(wrap(Line::blank(), 10).len(), 1);
    }

    #[test]
    fn test_compose_transcript_and_prompt() {
        let mut shell = shell();
        shell.run_line("contact");
        let chrome = TerminalSettings::default();
        let screen = compose(&shell, &chrome, 120, 100, 0);

        let body = body_text(&screen);
        assert_eq!(body[0], "Welcome");
        assert_eq!(body[2], "guest@portfolio:~$ contact");
        assert_eq!(body.last().unwrap(), "guest@portfolio:~$ ");
        assert_eq!(screen.cursor.0 as usize, "guest@portfolio:~$ ".len());

        let links: Vec<&Span> = screen
            .body
            .iter()
            .flat_map(|l| &l.spans)
            .filter(|s| s.role == Role::Link)
            .collect();
        assert!(links
            .iter()
            .any(|s| s.href.as_deref() == Some("mailto:jordan.avery@example.com")));
    }

    #[test]
    fn test_compose_keeps_input_in_view() {
        let mut shell = shell();
        shell.run_line("skills");
        shell.run_line("projects");
        let chrome = TerminalSettings::default();
        let screen = compose(&shell, &chrome, 80, 12, 0);

        assert_eq!(screen.lines().count(), 12);
        assert_eq!(
            screen.body.last().unwrap().text(),
            "guest@portfolio:~$ "
        );
        assert_eq!(screen.cursor.1 as usize, 12 - screen.footer.len() - 1);
    }

    #[test]
    fn test_compose_scrolls_back_through_transcript() {
        let mut shell = shell();
        shell.run_line("skills");
        shell.run_line("projects");
        let chrome = TerminalSettings::default();
        let bottom = compose(&shell, &chrome, 80, 12, 0);
        let rows = bottom.body.len();

        let paged = compose(&shell, &chrome, 80, 12, 3);
        assert_eq!(paged.scroll, 3);
        assert_eq!(paged.body.len(), rows);
        assert_eq!(paged.body[3..], bottom.body[..rows - 3]);
        assert_ne!(paged.body.last().unwrap().text(), "guest@portfolio:~$ ");

        // far past the top stops at the greeting
        let top = compose(&shell, &chrome, 80, 12, usize::MAX);
        assert_eq!(top.body[0].text(), "Welcome");
        assert!(top.scroll > 3);
        assert_eq!(compose(&shell, &chrome, 80, 12, top.scroll + 1).scroll, top.scroll);
    }

    #[test]
    fn test_compose_scroll_ignored_when_everything_fits() {
        let shell = shell();
        let screen = compose(&shell, &TerminalSettings::default(), 80, 40, 5);
        assert_eq!(screen.scroll, 0);
        assert_eq!(screen.body[0].text(), "Welcome");
    }

    #[test]
    fn test_error_output_role() {
        let mut shell = shell();
        shell.run_line("nope");
        let screen = compose(&shell, &TerminalSettings::default(), 200, 100, 0);
        let line = screen
            .body
            .iter()
            .find(|l| l.text().starts_with("Command not found"))
            .unwrap();
        assert_eq!(line.spans[0].role, Role::Error);
    }
}
