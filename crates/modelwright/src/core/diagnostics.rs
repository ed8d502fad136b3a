//! Diagnostic hook for skipped diagram lines
//!
//! Translation never fails on malformed text; constructs that do not match
//! are dropped. Tooling that wants to know what was dropped installs a sink.
//! Sinks only observe: the generated output is the same with or without one.

use std::fmt;
use std::sync::Mutex;

use serde::Serialize;

/// Why a line contributed nothing to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A class body line that is not `<marker> name : type`
    MalformedAttribute,
    /// An association naming a class that was never declared
    UnknownClass,
    /// A line outside any class block matching no statement grammar
    UnrecognizedStatement,
    /// A `class Name {` header with no closing brace
    UnterminatedClass,
    /// A second `class` block reusing an earlier name
    DuplicateClass,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MalformedAttribute => write!(f, "malformed attribute"),
            SkipReason::UnknownClass => write!(f, "unknown class"),
            SkipReason::UnrecognizedStatement => write!(f, "unrecognized statement"),
            SkipReason::UnterminatedClass => write!(f, "unterminated class"),
            SkipReason::DuplicateClass => write!(f, "duplicate class"),
        }
    }
}

/// A single dropped line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number in the diagram text
    pub line: usize,
    /// The trimmed line text
    pub text: String,
    pub reason: SkipReason,
}

impl SkippedLine {
    pub fn new(line: usize, text: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            line,
            text: text.into(),
            reason,
        }
    }
}

impl fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.reason, self.text)
    }
}

/// Receiver for skipped-line reports
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, skipped: SkippedLine);
}

/// Sink that discards every report
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _skipped: SkippedLine) {}
}

/// Sink that keeps every report in arrival order
#[derive(Debug, Default)]
pub struct CollectingSink {
    lines: Mutex<Vec<SkippedLine>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far
    pub fn lines(&self) -> Vec<SkippedLine> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Drain everything reported so far
    pub fn take(&self) -> Vec<SkippedLine> {
        std::mem::take(
            &mut *self
                .lines
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, skipped: SkippedLine) {
        tracing::trace!(line = skipped.line, reason = %skipped.reason, "Skipped line");
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(skipped);
    }
}
