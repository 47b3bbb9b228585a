//! Capture of GDAL diagnostics during a read.
//!
//! GDAL reports problems through a process-wide error handler rather than
//! through return values alone. [`ErrorCollector`] keeps the most recent
//! message; [`DiagnosticSink`] shares one collector with the handler; and
//! [`ErrorHandlerGuard`] installs the handler for the lifetime of a read and
//! removes it when dropped.

use std::sync::{Arc, Mutex, PoisonError};

use gdal::errors::CplErrType;
use log::debug;
use serde::Serialize;

/// Diagnostic category, derived from GDAL's numeric severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    #[default]
    None,
    Debug,
    Warning,
    Failure,
    Fatal,
}

impl ErrorCategory {
    /// Maps GDAL's `CE_*` severity scale. Unknown values map to [`ErrorCategory::None`].
    #[must_use]
    pub fn from_severity(severity: i32) -> Self {
        match severity {
            1 => Self::Debug,
            2 => Self::Warning,
            3 => Self::Failure,
            4 => Self::Fatal,
            _ => Self::None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "None",
            Self::Debug => "Debug",
            Self::Warning => "Warning",
            Self::Failure => "Failure",
            Self::Fatal => "Fatal",
        }
    }
}

/// The (category, message) pair attached to a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: ErrorCategory,
    pub message: String,
}

/// Keeps the latest diagnostic emitted by the library.
///
/// Each call to [`ErrorCollector::record`] replaces the previous state.
#[derive(Debug, Clone, Default)]
pub struct ErrorCollector {
    severity: i32,
    code: i32,
    last: Diagnostic,
}

impl ErrorCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a diagnostic, overwriting the previous one. Newlines in
    /// `message` are flattened to spaces.
    pub fn record(&mut self, severity: i32, code: i32, message: &str) {
        self.severity = severity;
        self.code = code;
        self.last = Diagnostic {
            category: ErrorCategory::from_severity(severity),
            message: message.replace('\n', " "),
        };
    }

    /// Raw severity of the latest diagnostic (0 when none was recorded).
    #[must_use]
    pub fn severity(&self) -> i32 {
        self.severity
    }

    /// Library error number of the latest diagnostic.
    #[must_use]
    pub fn code(&self) -> i32 {
        self.code
    }

    #[must_use]
    pub fn last(&self) -> &Diagnostic {
        &self.last
    }
}

/// A collector shared between a read and the library's error handler.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    inner: Arc<Mutex<ErrorCollector>>,
}

impl DiagnosticSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, severity: i32, code: i32, message: &str) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(severity, code, message);
    }

    /// Copy of the latest diagnostic.
    #[must_use]
    pub fn last(&self) -> Diagnostic {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .clone()
    }
}

fn severity_code(class: CplErrType) -> i32 {
    match class {
        CplErrType::None => 0,
        CplErrType::Debug => 1,
        CplErrType::Warning => 2,
        CplErrType::Failure => 3,
        CplErrType::Fatal => 4,
    }
}

/// Routes GDAL's error handler into a [`DiagnosticSink`] until dropped.
///
/// GDAL has a single handler slot per process, so only one guard should be
/// alive at a time.
pub struct ErrorHandlerGuard {
    sink: DiagnosticSink,
}

impl ErrorHandlerGuard {
    /// Installs the handler, replacing any handler set before.
    #[must_use]
    pub fn install() -> Self {
        let sink = DiagnosticSink::new();
        let handler_sink = sink.clone();
        gdal::config::set_error_handler(move |class, code, message| {
            debug!("GDAL {class:?} ({code}): {message}");
            handler_sink.record(severity_code(class), code, message);
        });
        Self { sink }
    }

    #[must_use]
    pub fn sink(&self) -> &DiagnosticSink {
        &self.sink
    }
}

impl Drop for ErrorHandlerGuard {
    fn drop(&mut self) {
        gdal::config::remove_error_handler();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_none() {
        let collector = ErrorCollector::new();
        assert_eq!(collector.last().category, ErrorCategory::None);
        assert_eq!(collector.last().message, "");
        assert_eq!(collector.severity(), 0);
    }

    #[test]
    fn test_record_keeps_latest_only() {
        let mut collector = ErrorCollector::new();
        collector.record(2, 1, "first warning");
        collector.record(3, 4, "then a failure");

        assert_eq!(collector.last().category, ErrorCategory::Failure);
        assert_eq!(collector.last().message, "then a failure");
        assert_eq!(collector.code(), 4);
    }

    #[test]
    fn test_record_flattens_newlines() {
        let mut collector = ErrorCollector::new();
        collector.record(2, 1, "sqlite3_open failed:\nunable to open\ndatabase file");
        assert_eq!(
            collector.last().message,
            "sqlite3_open failed: unable to open database file"
        );
    }

    #[test]
    fn test_unknown_severity_maps_to_none() {
        assert_eq!(ErrorCategory::from_severity(42), ErrorCategory::None);
        assert_eq!(ErrorCategory::from_severity(-1), ErrorCategory::None);
        assert_eq!(ErrorCategory::from_severity(4), ErrorCategory::Fatal);
        assert_eq!(ErrorCategory::from_severity(1).as_str(), "Debug");
    }

    #[test]
    fn test_sink_shares_collector() {
        let sink = DiagnosticSink::new();
        let clone = sink.clone();
        clone.record(2, 6, "layer has no geometry column");
        assert_eq!(
            sink.last(),
            Diagnostic {
                category: ErrorCategory::Warning,
                message: "layer has no geometry column".to_string(),
            }
        );
    }
}
