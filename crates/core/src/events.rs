use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogKind {
    /// Narration written by the engine.
    Narration,
    /// Client-side notes (separators, pending actions, load status).
    Notice,
    /// Failures; always distinct from game narration.
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogLine {
    pub kind: LogKind,
    pub text: String,
}

/// Append-only within a session; only a full reset clears it.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    lines: Vec<LogLine>,
}

impl MessageLog {
    pub fn push(&mut self, kind: LogKind, text: impl Into<String>) {
        let text = text.into();
        // Engine narration can span several lines.
        for part in text.split('\n') {
            self.lines.push(LogLine {
                kind,
                text: part.to_string(),
            });
        }
    }

    pub fn narration(&mut self, text: impl Into<String>) {
        self.push(LogKind::Narration, text);
    }

    pub fn notice(&mut self, text: impl Into<String>) {
        self.push(LogKind::Notice, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(LogKind::Error, text);
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }
}
