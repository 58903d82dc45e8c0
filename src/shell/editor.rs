//! Input buffer with command history and tab completion

/// Current input line plus the history it can recall
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    buffer: String,
    history: Vec<String>,
    /// `None` while editing a fresh line, `Some(i)` while browsing history
    cursor: Option<usize>,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Take the buffer for execution.
    ///
    /// Returns `None` (and leaves everything untouched) when the trimmed
    /// buffer is empty. Otherwise the trimmed line is recorded in history,
    /// the buffer is cleared and history browsing stops.
    pub fn submit(&mut self) -> Option<String> {
        let trimmed = self.buffer.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.history.push(trimmed.to_string());
        self.cursor = None;
        Some(std::mem::take(&mut self.buffer))
    }

    /// Step back to an older history entry
    pub fn history_previous(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.cursor {
            None => self.history.len() - 1,
            Some(0) => return,
            Some(i) => i - 1,
        };
        self.cursor = Some(index);
        self.buffer = self.history[index].clone();
    }

    /// Step forward to a newer entry, or back to a fresh line
    pub fn history_next(&mut self) {
        let Some(i) = self.cursor else {
            return;
        };
        if i + 1 >= self.history.len() {
            self.cursor = None;
            self.buffer.clear();
        } else {
            self.cursor = Some(i + 1);
            self.buffer = self.history[i + 1].clone();
        }
    }

    /// Complete the buffer against `candidates`
    pub fn complete<'a, I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        if let Some(completed) = complete(&self.buffer, candidates) {
            self.buffer = completed;
        }
    }

    /// Forget all history and stop browsing
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.cursor = None;
    }
}

/// Resolve `input` against `candidates`.
///
/// A single match completes to that name, several matches to their longest
/// common prefix; either way a trailing space is appended. Returns `None`
/// when nothing should change: empty input, no match, or no shared prefix.
pub fn complete<'a, I>(input: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let matches: Vec<&str> = candidates
        .into_iter()
        .filter(|c| c.starts_with(input.as_str()))
        .collect();
    let (first, rest) = matches.split_first()?;

    let mut prefix: &str = first;
    for candidate in rest {
        while !candidate.starts_with(prefix) {
            let cut = prefix.char_indices().last().map(|(i, _)| i)?;
            prefix = &prefix[..cut];
        }
    }

    if prefix.is_empty() {
        return None;
    }
    Some(format!("{} ", prefix))
}
