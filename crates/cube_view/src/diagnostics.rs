use std::{collections::VecDeque, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Warn,
    Error,
}

impl DiagnosticLevel {
    pub fn label(self) -> &'static str {
        match self {
            DiagnosticLevel::Info => "INFO",
            DiagnosticLevel::Warn => "WARN",
            DiagnosticLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct DiagnosticEntry {
    pub level: DiagnosticLevel,
    pub message: String,
}

impl fmt::Display for DiagnosticEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

pub const MAX_ENTRIES: usize = 500;

/// Bounded, per-cube record of user-visible events such as content failures.
/// Every entry is also forwarded to `tracing`.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: VecDeque<DiagnosticEntry>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let msg = message.into();
        tracing::info!("{msg}");
        self.push(DiagnosticLevel::Info, msg);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let msg = message.into();
        tracing::warn!("{msg}");
        self.push(DiagnosticLevel::Warn, msg);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let msg = message.into();
        tracing::error!("{msg}");
        self.push(DiagnosticLevel::Error, msg);
    }

    pub fn entries(&self) -> impl Iterator<Item = &DiagnosticEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn push(&mut self, level: DiagnosticLevel, message: String) {
        self.entries.push_back(DiagnosticEntry { level, message });
        while self.entries.len() > MAX_ENTRIES {
            self.entries.pop_front();
        }
    }
}
