//! Transcript of commands and their output

use std::time::SystemTime;

/// How an entry's output should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Normal,
    Error,
}

/// One command and the output shown beneath it
#[derive(Debug, Clone)]
pub struct SessionEntry {
    /// Raw submitted text; empty for the greeting
    pub command: String,
    /// Grows while the response is animated
    pub output: String,
    pub tone: Tone,
    pub timestamp: SystemTime,
}

impl SessionEntry {
    pub fn new(command: impl Into<String>, tone: Tone) -> Self {
        Self {
            command: command.into(),
            output: String::new(),
            tone,
            timestamp: SystemTime::now(),
        }
    }

    /// An entry with no command and fully visible output
    pub fn notice(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..Self::new("", Tone::Normal)
        }
    }
}

/// Ordered transcript; append-only apart from a full clear
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    entries: Vec<SessionEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log holding just the greeting
    pub fn with_greeting(greeting: &str) -> Self {
        let mut log = Self::new();
        if !greeting.is_empty() {
            log.push(SessionEntry::notice(greeting));
        }
        log
    }

    pub fn push(&mut self, entry: SessionEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&SessionEntry> {
        self.entries.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut SessionEntry> {
        self.entries.last_mut()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_entry() {
        let log = SessionLog::with_greeting("hello");
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].command, "");
        assert_eq!(log.entries()[0].output, "hello");

        assert!(SessionLog::with_greeting("").is_empty());
    }

    #[test]
    fn test_last_mut_updates_newest_entry() {
        let mut log = SessionLog::new();
        log.push(SessionEntry::new("about", Tone::Normal));
        log.push(SessionEntry::new("xyz", Tone::Error));

        log.last_mut().unwrap().output.push_str("partial");
        assert_eq!(log.entries()[0].output, "");
        assert_eq!(log.last().unwrap().output, "partial");
        assert_eq!(log.last().unwrap().tone, Tone::Error);

        log.clear();
        assert!(log.is_empty());
    }
}
