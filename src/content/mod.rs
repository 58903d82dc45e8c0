//! Static portfolio content served by the shell

/// Synthetic table key holding the `theme add` usage text
pub const THEME_ADD_KEY: &str = "theme add";

/// Command names handled by the interpreter rather than the table
pub const SHELL_COMMANDS: [&str; 2] = ["theme", "clear"];

/// Command names advertised to the user
pub const AVAILABLE_COMMANDS: [&str; 11] = [
    "help",
    "about",
    "skills",
    "projects",
    "experience",
    "education",
    "contact",
    "awards",
    "interests",
    "theme",
    "clear",
];

/// Default greeting shown as the first transcript entry
pub const GREETING: &str = "Type 'help' to see available commands.";

const HELP: &str = "Available commands:
  help - Show this help message
  about - Professional summary
  skills - Technical skills and tools
  projects - Featured projects
  experience - Work experience and internships
  education - Academic background
  contact - Contact information
  awards - Honors and achievements
  interests - Personal interests
  theme - Switch or list terminal themes (use 'theme add' for custom)
  clear - Clear terminal history";

const ABOUT: &str = "JORDAN AVERY
Systems Engineer
Engineer focused on reliable backend services, developer tooling and
command-line software. Enjoys turning fuzzy requirements into small,
well-tested programs with clear failure modes.
Based in Lisbon, open to remote collaboration.";

const SKILLS: &str = "TECHNICAL SKILLS
Programming Languages:
  • Rust, Go, Python, TypeScript
Frameworks & Libraries:
  • Tokio, Axum, Serde, FastAPI
Infrastructure:
  • Docker, Kubernetes, Terraform
Databases:
  • PostgreSQL, SQLite, Redis
Tools & Platforms:
  • Git, GitHub Actions, Linux, Neovim";

const PROJECTS: &str = "FEATURED PROJECTS
1. Portfolio Shell - This terminal :LINK - https://example.com/portfolio-term
   • Line editor with history recall and tab completion
   • Persistent user-defined colour themes

2. Log Courier - Structured log shipper
   • Batches and compresses events before upload
   • Backpressure-aware pipeline built on async channels

3. Config Linter - Static checks for deployment manifests
   • Rule engine with per-repository overrides
   • Runs in CI in under a second for typical repositories";

const EXPERIENCE: &str = "WORK EXPERIENCE
Harbor Systems | Backend Engineer
Mar 2023 - Present
  • Maintains the ingestion service handling customer event streams
  • Cut p99 latency by rewriting the hot path around batched writes

Northwind Labs | Software Engineering Intern
Jun 2022 - Sep 2022
  • Built internal CLI tooling for release management
  • Added integration tests covering the deployment workflow";

const EDUCATION: &str = "EDUCATION
University of Example
Bachelor of Science in Computer Science
Sep 2019 – Jun 2023
Key Courses:
  • Operating Systems
  • Compilers
  • Distributed Systems
  • Databases";

const CONTACT: &str = "CONTACT INFORMATION
Email: jordan.avery@example.com
Mobile: +1-555-010-0199
GitHub: https://github.com/example
Feel free to reach out for collaboration, opportunities, or just to connect!";

const AWARDS: &str = "HONORS AND ACHIEVEMENTS
🏆 2nd Place - Regional Systems Programming Contest
   October 2022

   Built a fault-tolerant key-value store within the contest window.";

const INTERESTS: &str = "PERSONAL INTERESTS
• Open Source - Contributing fixes to tools used every day
• Climbing - Bouldering a few evenings a week
• Music - Playing bass in a small local band
• Reading - Mostly science fiction and systems papers";

const THEME_ADD_USAGE: &str = "Custom theme support:
  To add a custom theme, type: theme add [name] [bg] [text] [prompt] [command] [output] [error] [border] [tip]
  Example: theme add mytheme bg-red-900 text-yellow-400 text-yellow-500 text-yellow-400 text-yellow-300 text-red-400 border-red-900 text-red-700
  Use Tailwind-style colour classes (e.g., bg-blue-800, text-cyan-300) or hex values (#1e293b).
  Custom themes are saved locally and persist across sessions.";

/// Fixed mapping from lowercase command name to its output text
#[derive(Debug, Clone)]
pub struct ContentTable {
    entries: Vec<(&'static str, &'static str)>,
}

impl ContentTable {
    /// Look up the text for an exact (already lowercased) key
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, text)| *text)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Table keys in definition order, including the synthetic usage key
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Names offered by tab completion: every table key plus the
    /// interpreter's own commands
    pub fn completions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.keys().chain(
            SHELL_COMMANDS
                .into_iter()
                .filter(move |name| !self.contains(name)),
        )
    }

    /// Usage text shown for an incomplete `theme add`
    pub fn theme_add_usage(&self) -> &'static str {
        self.get(THEME_ADD_KEY).unwrap_or(THEME_ADD_USAGE)
    }
}

impl Default for ContentTable {
    fn default() -> Self {
        Self {
            entries: vec![
                ("help", HELP),
                ("about", ABOUT),
                ("skills", SKILLS),
                ("projects", PROJECTS),
                ("experience", EXPERIENCE),
                ("education", EDUCATION),
                ("contact", CONTACT),
                ("awards", AWARDS),
                ("interests", INTERESTS),
                (THEME_ADD_KEY, THEME_ADD_USAGE),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_keys_are_lowercase() {
        let table = ContentTable::default();
        for key in table.keys() {
            assert_eq!(key, key.to_lowercase());
        }
    }

    #[test]
    fn test_available_commands_are_served() {
        let table = ContentTable::default();
        for name in AVAILABLE_COMMANDS {
            if !SHELL_COMMANDS.contains(&name) {
                assert!(table.contains(name), "missing {}", name);
            }
        }
        assert!(table.theme_add_usage().starts_with("Custom theme support:"));
    }

    #[test]
    fn test_completions_cover_table_and_shell_commands() {
        let table = ContentTable::default();
        let names: Vec<&str> = table.completions().collect();
        assert!(names.contains(&THEME_ADD_KEY));
        assert!(names.contains(&"theme"));
        assert!(names.contains(&"clear"));
        assert_eq!(names.len(), table.keys().count() + SHELL_COMMANDS.len());
    }
}
