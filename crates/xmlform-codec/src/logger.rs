//! Decode failure reporting
//!
//! Malformed legacy text is not an error for the caller: the decoder reports
//! it through a [`DecodeLogger`] and returns an empty record.

use crate::error::ParseError;
use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::Mutex;

/// Kind of stored entity a document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntityKind {
    /// A form definition
    #[default]
    XmlForm,
    /// A filled-in task log
    TaskLog,
}

impl EntityKind {
    /// Name used in log messages
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::XmlForm => "xmlform",
            Self::TaskLog => "task log",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xmlform" => Ok(Self::XmlForm),
            "task log" | "task-log" | "task_log" => Ok(Self::TaskLog),
            other => Err(format!("unknown entity kind: '{other}'")),
        }
    }
}

/// The entity being decoded, for log context only
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    /// Entity kind
    pub kind: EntityKind,
    /// Entity id
    pub id: String,
}

impl EntityRef {
    /// Create entity reference
    #[inline]
    #[must_use]
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    /// A form definition
    #[inline]
    #[must_use]
    pub fn xml_form(id: impl Display) -> Self {
        Self::new(EntityKind::XmlForm, id.to_string())
    }

    /// A task log
    #[inline]
    #[must_use]
    pub fn task_log(id: impl Display) -> Self {
        Self::new(EntityKind::TaskLog, id.to_string())
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with id {}", self.kind, self.id)
    }
}

/// Receives decode failures
pub trait DecodeLogger: Send + Sync {
    /// Called once per document that failed to parse
    fn parse_failed(&self, entity: &EntityRef, error: &ParseError);
}

/// Reports failures as `tracing` error events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DecodeLogger for TracingLogger {
    fn parse_failed(&self, entity: &EntityRef, error: &ParseError) {
        tracing::error!(
            entity = %entity.kind,
            id = %entity.id,
            %error,
            "An error occurred while parsing {entity} Message: {error}"
        );
    }
}

/// One recorded failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedFailure {
    /// Entity that failed
    pub entity: EntityRef,
    /// Rendered parse error
    pub message: String,
}

/// Keeps failures in memory
///
/// Useful for batch jobs that report failures at the end, and in tests.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    failures: Mutex<Vec<LoggedFailure>>,
}

impl MemoryLogger {
    /// Create empty logger
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Failures recorded so far
    #[must_use]
    pub fn failures(&self) -> Vec<LoggedFailure> {
        self.failures
            .lock()
            .map(|failures| failures.clone())
            .unwrap_or_default()
    }

    /// Number of failures recorded so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.lock().map(|failures| failures.len()).unwrap_or_default()
    }

    /// True when nothing failed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DecodeLogger for MemoryLogger {
    fn parse_failed(&self, entity: &EntityRef, error: &ParseError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(LoggedFailure {
                entity: entity.clone(),
                message: error.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_display_matches_log_wording() {
        assert_eq!(EntityRef::xml_form(42).to_string(), "xmlform with id 42");
        assert_eq!(EntityRef::task_log("7").to_string(), "task log with id 7");
    }

    #[test]
    fn entity_kind_parses_cli_spelling() {
        assert_eq!("task-log".parse::<EntityKind>(), Ok(EntityKind::TaskLog));
        assert_eq!("xmlform".parse::<EntityKind>(), Ok(EntityKind::XmlForm));
        assert!("form".parse::<EntityKind>().is_err());
    }

    #[test]
    fn memory_logger_records_each_failure() {
        let logger = MemoryLogger::new();
        logger.parse_failed(&EntityRef::xml_form(9), &ParseError::NoRoot);

        let failures = logger.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].entity.id, "9");
        assert!(failures[0].message.contains("no root"));
    }
}
