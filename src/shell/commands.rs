//! Command parsing and execution

use super::session::Tone;
use crate::content::{ContentTable, AVAILABLE_COMMANDS};
use crate::theme::{Theme, ThemeError, ThemeStore};
use tracing::{debug, warn};

/// Tokens required by `theme add`: the two keywords, a name and at least
/// seven styles. An omitted tip style falls back to the text style.
pub const THEME_ADD_TOKENS: usize = 10;

/// Name plus the eight style fields of a [`Theme`]
const THEME_FIELDS: usize = 9;

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Clear,
    /// `theme` with no argument
    ListThemes,
    /// `theme add` with too few arguments
    ThemeAddUsage,
    AddTheme(Theme),
    SelectTheme(String),
    /// A content table key
    Show(String),
    Empty,
    Unknown(String),
}

/// What the shell should do with a submitted line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Reset transcript and history
    Clear,
    /// Append an entry for the command and animate `text` into it
    Respond { text: String, tone: Tone },
}

impl Effect {
    fn normal(text: impl Into<String>) -> Self {
        Effect::Respond {
            text: text.into(),
            tone: Tone::Normal,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Effect::Respond {
            text: text.into(),
            tone: Tone::Error,
        }
    }
}

/// Parse a raw input line
pub fn parse_command(input: &str, content: &ContentTable) -> Command {
    let trimmed = input.trim();
    let lowered = trimmed.to_lowercase();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();

    if lowered == "clear" {
        return Command::Clear;
    }

    if parts.first().is_some_and(|p| p.eq_ignore_ascii_case("theme")) {
        return match parts.get(1) {
            None => Command::ListThemes,
            Some(sub) if sub.eq_ignore_ascii_case("add") => {
                if parts.len() < THEME_ADD_TOKENS {
                    Command::ThemeAddUsage
                } else {
                    let mut fields: Vec<&str> =
                        parts[2..].iter().copied().take(THEME_FIELDS).collect();
                    if fields.len() < THEME_FIELDS {
                        fields.push(fields[2]);
                    }
                    Theme::from_tokens(&fields)
                        .map(Command::AddTheme)
                        .unwrap_or(Command::ThemeAddUsage)
                }
            }
            Some(name) => Command::SelectTheme(name.to_lowercase()),
        };
    }

    if lowered.is_empty() {
        Command::Empty
    } else if content.contains(&lowered) {
        Command::Show(lowered)
    } else {
        Command::Unknown(trimmed.to_string())
    }
}

/// Executes parsed commands against the content table and theme store
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    content: ContentTable,
}

impl Interpreter {
    pub fn new(content: ContentTable) -> Self {
        Self { content }
    }

    pub fn content(&self) -> &ContentTable {
        &self.content
    }

    /// Parse and run `input`
    pub fn interpret(&self, input: &str, themes: &mut ThemeStore) -> Effect {
        let command = parse_command(input, &self.content);
        debug!("Dispatching {:?}", command);
        self.execute(command, themes)
    }

    pub fn execute(&self, command: Command, themes: &mut ThemeStore) -> Effect {
        match command {
            Command::Clear => Effect::Clear,
            Command::ListThemes => {
                let names: Vec<String> =
                    themes.list().iter().map(|t| format!(" {}", t.name)).collect();
                Effect::normal(format!(
                    "Current theme: {}\n\n{}",
                    themes.current().name,
                    names.join("\n")
                ))
            }
            Command::ThemeAddUsage => Effect::normal(self.content.theme_add_usage()),
            Command::AddTheme(theme) => {
                let name = theme.name.clone();
                if let Err(e) = themes.add_custom(theme) {
                    warn!("Custom theme {} not saved: {}", name, e);
                }
                Effect::normal(format!(
                    "Custom theme '{}' added successfully! Use 'theme {}' to switch.",
                    name, name
                ))
            }
            Command::SelectTheme(name) => match themes.set_current(&name) {
                Ok(()) => Effect::normal(format!("Theme switched to: {}", themes.current().name)),
                Err(ThemeError::Unknown(_)) => Effect::error(format!(
                    "Unknown theme: {}\nType 'theme' for available themes.",
                    name
                )),
                Err(e) => {
                    warn!("Theme selection not saved: {}", e);
                    Effect::normal(format!("Theme switched to: {}", themes.current().name))
                }
            },
            Command::Show(key) => Effect::normal(self.content.get(&key).unwrap_or_default()),
            Command::Empty => Effect::normal(""),
            Command::Unknown(input) => Effect::error(not_found_message(&input)),
        }
    }
}

/// Response for input that names no command
pub fn not_found_message(input: &str) -> String {
    format!(
        "Command not found: {}\nAvailable commands: {}",
        input,
        AVAILABLE_COMMANDS.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use crate::theme::{CURRENT_THEME_KEY, CUSTOM_THEMES_KEY};

    const DEMO: &str = "theme add demo bg-red-900 text-yellow-400 text-yellow-500 \
                        text-yellow-400 text-yellow-300 text-red-400 border-red-900 text-red-700";

    fn setup() -> (Interpreter, ThemeStore, MemoryStore) {
        let store = MemoryStore::new();
        let themes = ThemeStore::load(Box::new(store.clone()));
        (Interpreter::default(), themes, store)
    }

    fn text_of(effect: Effect) -> String {
        match effect {
            Effect::Respond { text, .. } => text,
            Effect::Clear => panic!("unexpected clear"),
        }
    }

    #[test]
    fn test_parse_content_keys_any_case() {
        let table = ContentTable::default();
        assert_eq!(
            parse_command("  ABOUT ", &table),
            Command::Show("about".to_string())
        );
        assert_eq!(parse_command("Clear", &table), Command::Clear);
        assert_eq!(parse_command("   ", &table), Command::Empty);
        // whole line must match, not a prefix
        assert_eq!(
            parse_command("about me", &table),
            Command::Unknown("about me".to_string())
        );
    }

    #[test]
    fn test_parse_theme_forms() {
        let table = ContentTable::default();
        assert_eq!(parse_command("theme", &table), Command::ListThemes);
        assert_eq!(
            parse_command("Theme Blue", &table),
            Command::SelectTheme("blue".to_string())
        );
        assert_eq!(parse_command("theme add a b c", &table), Command::ThemeAddUsage);
        assert_eq!(parse_command("theme add", &table), Command::ThemeAddUsage);
        match parse_command(DEMO, &table) {
            Command::AddTheme(theme) => {
                assert_eq!(theme.name, "demo");
                assert_eq!(theme.bg, "bg-red-900");
                assert_eq!(theme.tip, "text-red-700");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_theme_add_without_tip() {
        let table = ContentTable::default();
        match parse_command("theme add Mini bg-black text-green-400 a b c d e", &table) {
            Command::AddTheme(theme) => {
                assert_eq!(theme.name, "mini");
                assert_eq!(theme.border, "e");
                assert_eq!(theme.tip, "text-green-400");
            }
            other => panic!("unexpected {:?}", other),
        }
        // extra tokens past the tip are ignored
        match parse_command(&format!("{} extra", DEMO), &table) {
            Command::AddTheme(theme) => assert_eq!(theme.tip, "text-red-700"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            parse_command("theme add mini bg-black text-green-400 a b c d", &table),
            Command::ThemeAddUsage
        );
    }

    #[test]
    fn test_content_lookup() {
        let (interpreter, mut themes, _) = setup();
        let expected = ContentTable::default().get("skills").unwrap();
        assert_eq!(text_of(interpreter.interpret(" Skills ", &mut themes)), expected);
    }

    #[test]
    fn test_unknown_command_keeps_typed_case() {
        let (interpreter, mut themes, _) = setup();
        match interpreter.interpret("XyZ", &mut themes) {
            Effect::Respond { text, tone } => {
                assert!(text.contains("Command not found: XyZ"));
                assert!(text.contains(
                    "help, about, skills, projects, experience, education, contact, awards, interests, theme, clear"
                ));
                assert_eq!(tone, Tone::Error);
            }
            Effect::Clear => panic!("unexpected clear"),
        }
    }

    #[test]
    fn test_theme_add_usage_leaves_collection() {
        let (interpreter, mut themes, store) = setup();
        let text = text_of(interpreter.interpret("theme add a b c", &mut themes));
        assert_eq!(text, ContentTable::default().theme_add_usage());
        assert_eq!(themes.list().len(), 4);
        assert!(store.is_empty());
    }

    #[test]
    fn test_theme_add_then_select() {
        let (interpreter, mut themes, store) = setup();

        let text = text_of(interpreter.interpret(DEMO, &mut themes));
        assert_eq!(
            text,
            "Custom theme 'demo' added successfully! Use 'theme demo' to switch."
        );
        assert_eq!(themes.current().name, "classic");

        let text = text_of(interpreter.interpret("theme demo", &mut themes));
        assert_eq!(text, "Theme switched to: demo");
        assert_eq!(themes.current().name, "demo");
        assert!(store.get(CUSTOM_THEMES_KEY).unwrap().unwrap().contains("\"demo\""));
        assert_eq!(
            store.get(CURRENT_THEME_KEY).unwrap(),
            Some("\"demo\"".to_string())
        );
    }

    #[test]
    fn test_reselecting_current_theme_persists_again() {
        let (interpreter, mut themes, store) = setup();
        let text = text_of(interpreter.interpret("theme classic", &mut themes));
        assert_eq!(text, "Theme switched to: classic");
        assert_eq!(
            store.get(CURRENT_THEME_KEY).unwrap(),
            Some("\"classic\"".to_string())
        );
    }

    #[test]
    fn test_unknown_theme() {
        let (interpreter, mut themes, _) = setup();
        match interpreter.interpret("theme Neon", &mut themes) {
            Effect::Respond { text, tone } => {
                assert_eq!(text, "Unknown theme: neon\nType 'theme' for available themes.");
                assert_eq!(tone, Tone::Error);
            }
            Effect::Clear => panic!("unexpected clear"),
        }
        assert_eq!(themes.current().name, "classic");
    }

    #[test]
    fn test_list_themes() {
        let (interpreter, mut themes, _) = setup();
        themes.set_current("blue").unwrap();
        let text = text_of(interpreter.interpret("theme", &mut themes));
        assert_eq!(
            text,
            "Current theme: blue\n\n classic\n light\n blue\n purple"
        );
    }

    #[test]
    fn test_clear_effect() {
        let (interpreter, mut themes, _) = setup();
        assert_eq!(interpreter.interpret("  CLEAR ", &mut themes), Effect::Clear);
    }
}
