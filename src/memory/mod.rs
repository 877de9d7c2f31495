//! Conversation memory.
//!
//! A bounded, ordered log of the most recent conversation lines. The memory
//! feeds prompt assembly each turn: the pipeline appends the user query and
//! the assistant answer after every turn, and the oldest lines fall off
//! silently once capacity is exceeded.
//!
//! One instance belongs to exactly one conversation session. The struct has
//! no internal locking; the session layer wraps it in a mutex so turns
//! within a session serialize.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Default number of lines a conversation retains.
pub const DEFAULT_MEMORY_CAPACITY: usize = 3;

/// Who produced a conversation line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The human asking questions.
    User,
    /// The model's answer, degraded or not.
    Assistant,
}

impl Speaker {
    /// Label used when formatting memory into a prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::User => "User",
            Speaker::Assistant => "AI",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One remembered line of conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationLine {
    /// Who said it.
    pub speaker: Speaker,
    /// What was said.
    pub text: String,
}

impl ConversationLine {
    /// A line spoken by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    /// A line spoken by the assistant.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// Bounded FIFO log of recent conversation lines.
pub struct ConversationMemory {
    capacity: usize,
    lines: VecDeque<ConversationLine>,
}

impl ConversationMemory {
    /// Create an empty memory retaining at most `capacity` lines.
    ///
    /// Capacity is clamped to at least 1: a memory that kept nothing would
    /// drop failure messages the next turn is supposed to see.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            lines: VecDeque::new(),
        }
    }

    /// Append a line, evicting the oldest line once over capacity.
    pub fn append(&mut self, line: ConversationLine) {
        self.lines.push_back(line);
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    /// Owned copy of the remembered lines, oldest first.
    pub fn snapshot(&self) -> Vec<ConversationLine> {
        self.lines.iter().cloned().collect()
    }

    /// Forget everything. Exposed for tests and session resets.
    pub fn reset(&mut self) {
        self.lines.clear();
    }

    /// Number of remembered lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when nothing has been remembered yet.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The capacity this memory was constructed with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_CAPACITY)
    }
}

/// Formats memory lines for inclusion in a prompt, oldest first.
///
/// Each line renders as `<speaker>: <text>`; an empty memory renders as an
/// empty string.
pub fn format_memory_for_prompt(lines: &[ConversationLine]) -> String {
    lines
        .iter()
        .map(|line| format!("{}: {}", line.speaker.label(), line.text))
        .collect::<Vec<_>>()
        .join("\n")
}
