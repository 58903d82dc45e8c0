//! Terminal colours resolved from theme style tokens
//!
//! Tokens look like Tailwind classes (`text-green-400`, `bg-slate-900`,
//! `border-red-900`) or hex colours (`#1e293b`, `bg-[#1e293b]`). Colour
//! families are folded onto the 16 named terminal colours; hex values map
//! to RGB.

use crate::theme::Theme;
use crossterm::style::Color;

/// Colours for the interactive shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen background
    pub background: Color,
    /// Default text
    pub text: Color,
    /// Header lines
    pub prompt: Color,
    /// Echoed commands and the input line
    pub command: Color,
    /// Command output
    pub output: Color,
    /// Error output
    pub error: Color,
    /// Separator lines
    pub border: Color,
    /// Footer tips
    pub tip: Color,
    /// `user@host` in the prompt
    pub prompt_user: Color,
    /// `~` in the prompt
    pub prompt_path: Color,
    /// `:` and `$` in the prompt
    pub prompt_symbol: Color,
}

impl Palette {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            background: token_color(&theme.bg).unwrap_or(Color::Reset),
            text: token_color(&theme.text).unwrap_or(Color::Reset),
            prompt: token_color(&theme.prompt).unwrap_or(Color::Reset),
            command: token_color(&theme.command).unwrap_or(Color::Reset),
            output: token_color(&theme.output).unwrap_or(Color::Reset),
            error: token_color(&theme.error).unwrap_or(Color::Red),
            border: token_color(&theme.border).unwrap_or(Color::DarkGrey),
            tip: token_color(&theme.tip).unwrap_or(Color::DarkGrey),
            prompt_user: Color::Blue,
            prompt_path: Color::Magenta,
            prompt_symbol: Color::White,
        }
    }
}

/// Resolve a single style token
pub fn token_color(token: &str) -> Option<Color> {
    let token = token.trim().to_lowercase();
    if let Some(color) = hex_color(&token) {
        return Some(color);
    }

    let body = ["bg-", "text-", "border-", "caret-"]
        .iter()
        .find_map(|prefix| token.strip_prefix(prefix))
        .unwrap_or(&token);

    if let Some(color) = hex_color(body) {
        return Some(color);
    }

    match body {
        "black" => return Some(Color::Black),
        "white" => return Some(Color::White),
        "transparent" | "inherit" | "current" => return Some(Color::Reset),
        _ => {}
    }

    let (family, shade) = match body.rsplit_once('-') {
        Some((family, shade)) => (family, shade.parse::<u16>().ok()?),
        None => (body, 500),
    };
    family_color(family, shade)
}

/// `#rrggbb`, optionally in Tailwind's `[#rrggbb]` form
fn hex_color(value: &str) -> Option<Color> {
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

fn family_color(family: &str, shade: u16) -> Option<Color> {
    let light = shade <= 400;
    let pick = |bright: Color, dark: Color| Some(if light { bright } else { dark });

    match family {
        "slate" | "gray" | "zinc" | "neutral" | "stone" => Some(match shade {
            0..=200 => Color::White,
            201..=400 => Color::Grey,
            401..=700 => Color::DarkGrey,
            _ => Color::Black,
        }),
        "red" | "rose" => pick(Color::Red, Color::DarkRed),
        "orange" | "amber" | "yellow" => pick(Color::Yellow, Color::DarkYellow),
        "lime" | "green" | "emerald" => pick(Color::Green, Color::DarkGreen),
        "teal" | "cyan" | "sky" => pick(Color::Cyan, Color::DarkCyan),
        "blue" | "indigo" => pick(Color::Blue, Color::DarkBlue),
        "violet" | "purple" | "fuchsia" | "pink" => pick(Color::Magenta, Color::DarkMagenta),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::builtin_themes;

    #[test]
    fn test_family_tokens() {
        assert_eq!(token_color("text-green-400"), Some(Color::Green));
        assert_eq!(token_color("border-green-900"), Some(Color::DarkGreen));
        assert_eq!(token_color("text-purple-300"), Some(Color::Magenta));
        assert_eq!(token_color("bg-slate-900"), Some(Color::Black));
        assert_eq!(token_color("text-gray-600"), Some(Color::DarkGrey));
        assert_eq!(token_color("text-cyan"), Some(Color::DarkCyan));
    }

    #[test]
    fn test_plain_and_hex_tokens() {
        assert_eq!(token_color("bg-black"), Some(Color::Black));
        assert_eq!(token_color("text-white"), Some(Color::White));
        assert_eq!(
            token_color("bg-[#1e293b]"),
            Some(Color::Rgb { r: 0x1e, g: 0x29, b: 0x3b })
        );
        assert_eq!(
            token_color("#FF0000"),
            Some(Color::Rgb { r: 255, g: 0, b: 0 })
        );
    }

    #[test]
    fn test_unknown_tokens() {
        assert_eq!(token_color("text-mauve-400"), None);
        assert_eq!(token_color("text-green-abc"), None);
        assert_eq!(token_color("#12345"), None);
    }

    #[test]
    fn test_builtin_themes_resolve() {
        for theme in builtin_themes() {
            let palette = Palette::from_theme(&theme);
            assert_ne!(palette.output, Color::Reset, "{}", theme.name);
        }
        let light = Palette::from_theme(&builtin_themes()[1]);
        assert_eq!(light.background, Color::White);
        assert_eq!(light.command, Color::Black);
    }
}
