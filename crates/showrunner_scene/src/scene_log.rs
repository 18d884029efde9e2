//! The shared, append-only scene history.

use serde::{Deserialize, Serialize};

/// Ordered narrative entries visible to every agent in a run.
///
/// Entries are only ever appended. A log is replaced wholesale between runs,
/// never truncated or reordered during one.
///
/// # Examples
///
/// ```
/// use showrunner_scene::SceneLog;
///
/// let mut log = SceneLog::with_opening("bob walks into the living room");
/// log.push("alex looks up from her book.");
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.latest(), Some("alex looks up from her book."));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneLog {
    entries: Vec<String>,
}

impl SceneLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A log seeded with the opening narrative. An empty opening yields an
    /// empty log.
    pub fn with_opening(opening: impl Into<String>) -> Self {
        let opening = opening.into();
        if opening.trim().is_empty() {
            Self::new()
        } else {
            Self {
                entries: vec![opening],
            }
        }
    }

    /// Append an entry, returning its index.
    pub fn push(&mut self, entry: impl Into<String>) -> usize {
        self.entries.push(entry.into());
        self.entries.len() - 1
    }

    /// All entries in order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    /// Entries joined with a single space, the form agents see as context.
    pub fn joined(&self) -> String {
        self.entries.join(" ")
    }

    /// One entry per line.
    pub fn to_text(&self) -> String {
        let mut text = self.entries.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }
}

impl<'a> IntoIterator for &'a SceneLog {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
