//! portfolio-term - A portfolio presented as a simulated shell session
//!
//! Visitors type commands such as `about`, `skills` or `projects` into a
//! prompt and the answers are typed back one character at a time.
//!
//! ## Key Features
//!
//! - **Line Editor**: command history recall and tab completion
//! - **Command Interpreter**: static content table plus `clear` and `theme`
//! - **Themes**: built-in colour schemes and persisted user-defined themes
//! - **Output Animation**: explicit, cancellable reveal state machine
//! - **Terminal UI**: full-screen crossterm front end with clickable links

pub mod config;
pub mod content;
pub mod shell;
pub mod storage;
pub mod theme;
pub mod tui;

pub use config::{Config, ConfigBuilder, ConfigError};
pub use content::ContentTable;
pub use shell::{Command, Effect, Interpreter, LineEditor, OutputAnimator, SessionLog, Shell};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use theme::{Theme, ThemeError, ThemeStore};
pub use tui::InteractiveShell;
