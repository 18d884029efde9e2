//! Per-agent short and long term memory.

use serde::{Deserialize, Serialize};

/// Two ordered text buffers owned by a single agent.
///
/// Short-term memory collects recent replies and observations. Summarizing
/// folds it into one long-term entry and clears it. Long-term memory only
/// grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Memory {
    short_term: Vec<String>,
    long_term: Vec<String>,
}

impl Memory {
    /// Empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Short-term entries, oldest first.
    pub fn short_term(&self) -> &[String] {
        &self.short_term
    }

    /// Long-term entries, oldest first.
    pub fn long_term(&self) -> &[String] {
        &self.long_term
    }

    /// Remember something recent.
    pub fn remember(&mut self, entry: impl Into<String>) {
        self.short_term.push(entry.into());
    }

    /// Remember several recent things in order.
    pub fn remember_all<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.short_term.extend(entries.into_iter().map(Into::into));
    }

    /// Record a long-term entry.
    pub fn commit(&mut self, entry: impl Into<String>) {
        self.long_term.push(entry.into());
    }

    /// Empty short-term memory.
    pub fn clear_short_term(&mut self) {
        self.short_term.clear();
    }

    /// True when there is nothing in short-term memory.
    pub fn is_short_term_empty(&self) -> bool {
        self.short_term.is_empty()
    }

    /// Short-term entries joined with a space.
    pub fn short_term_text(&self) -> String {
        self.short_term.join(" ")
    }

    /// Long-term entries joined with a space.
    pub fn long_term_text(&self) -> String {
        self.long_term.join(" ")
    }
}
