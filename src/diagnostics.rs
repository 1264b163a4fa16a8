//! Diagnostics reporting for the include sorter and the orchestrator.
//!
//! Three channels are available through the [`Diagnostics`] trait:
//! - `info`: progress messages (suppressed in quiet mode by [`RunContext`])
//! - `warn`: non-fatal anomalies, always shown
//! - `error`: fatal per-file problems, always shown
//!
//! [`RunContext`]: crate::context::RunContext

use std::sync::Mutex;

/// Severity of a reported message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl Level {
    /// Prefix written in front of messages of this level
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

/// Sink for messages produced while stylifying sources.
///
/// Implementations must be shareable between worker threads.
pub trait Diagnostics: Sync {
    fn report(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.report(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.report(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.report(Level::Error, message);
    }
}

/// Writes every message to stderr as `LEVEL: message`
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrDiagnostics;

impl Diagnostics for StderrDiagnostics {
    fn report(&self, level: Level, message: &str) {
        eprintln!("{}: {message}", level.prefix());
    }
}

/// A single recorded message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

/// Records messages in memory instead of printing them
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages, in reporting order
    #[must_use]
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Messages recorded at the given level
    #[must_use]
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|d| d.level == level)
            .map(|d| d.message)
            .collect()
    }

    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.messages(Level::Warning)
    }

    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.messages(Level::Error)
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn report(&self, level: Level, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(Diagnostic {
                level,
                message: message.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_prefix() {
        assert_eq!(Level::Info.prefix(), "INFO");
        assert_eq!(Level::Warning.prefix(), "WARNING");
        assert_eq!(Level::Error.prefix(), "ERROR");
    }

    #[test]
    fn test_collecting_diagnostics_keeps_order() {
        let sink = CollectingDiagnostics::new();
        sink.info("starting");
        sink.warn("first");
        sink.error("broken");
        sink.warn("second");

        assert_eq!(sink.entries().len(), 4);
        assert_eq!(sink.warnings(), vec!["first", "second"]);
        assert_eq!(sink.errors(), vec!["broken"]);
        assert_eq!(sink.messages(Level::Info), vec!["starting"]);
    }
}
