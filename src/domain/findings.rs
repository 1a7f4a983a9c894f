//! Core domain models for lint findings and scan results
//!
//! A Finding records a single rule match at a line/column position. Findings
//! do not carry a file path: a document does not know where it came from, so
//! paths attach at the FileReport layer. ScanReport is the aggregate root
//! that collects per-file reports and maintains summary counts.

use crate::rules::RuleId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity levels for lint findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Gentle suggestions (e.g. prefer logging over print)
    Hint,
    /// Informational style nits
    Info,
    /// Warnings that should be addressed but don't block builds
    Warning,
    /// Errors that block commits and fail CI builds
    Error,
}

impl Severity {
    /// Whether this severity level should cause a check run to fail
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Convert to string for display
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hint => "hint",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A single rule violation at a specific line of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// The rule that produced this finding
    pub rule: RuleId,
    /// Severity level of this finding
    pub severity: Severity,
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed, in characters)
    pub column: u32,
    /// Human-readable description of the finding
    pub message: String,
}

impl Finding {
    pub fn new(
        rule: RuleId,
        severity: Severity,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        Self { rule, severity, line, column, message: message.into() }
    }

    /// Whether this finding is blocking (fails the run)
    pub fn is_blocking(&self) -> bool {
        self.severity.is_blocking()
    }

    /// Format finding for display (`line:col rule [severity] message`)
    pub fn format_display(&self) -> String {
        format!(
            "{}:{} {} [{}] {}",
            self.line,
            self.column,
            self.rule.name(),
            self.severity.as_str(),
            self.message
        )
    }
}

/// Count of findings by severity level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
    pub hint: usize,
}

impl FindingCounts {
    /// Total number of findings across all severities
    pub fn total(&self) -> usize {
        self.error + self.warning + self.info + self.hint
    }

    /// Whether there are any blocking findings
    pub fn has_blocking(&self) -> bool {
        self.error > 0
    }

    /// Add a finding to the counts
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
            Severity::Hint => self.hint += 1,
        }
    }
}

/// Findings for a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Path of the scanned file
    pub path: PathBuf,
    /// Number of lines scanned
    pub lines: usize,
    /// Findings in ascending line order
    pub findings: Vec<Finding>,
}

impl FileReport {
    pub fn new(path: PathBuf, lines: usize, findings: Vec<Finding>) -> Self {
        Self { path, lines, findings }
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// Summary statistics for a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Total number of files scanned
    pub total_files: usize,
    /// Total number of lines scanned
    pub total_lines: usize,
    /// Number of findings by severity level
    pub counts: FindingCounts,
    /// Total execution time in milliseconds
    pub duration_ms: u64,
    /// Timestamp when the scan was performed
    pub scanned_at: DateTime<Utc>,
}

impl Default for ScanSummary {
    fn default() -> Self {
        Self {
            total_files: 0,
            total_lines: 0,
            counts: FindingCounts::default(),
            duration_ms: 0,
            scanned_at: Utc::now(),
        }
    }
}

/// Complete scan report across one or more files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Per-file findings
    pub files: Vec<FileReport>,
    /// Summary statistics
    pub summary: ScanSummary,
}

impl ScanReport {
    /// Create a new empty scan report
    pub fn new() -> Self {
        Self { files: Vec::new(), summary: ScanSummary::default() }
    }

    /// Add a file report, updating summary counts
    pub fn add_file(&mut self, file: FileReport) {
        self.summary.total_files += 1;
        self.summary.total_lines += file.lines;
        for finding in &file.findings {
            self.summary.counts.add(finding.severity);
        }
        self.files.push(file);
    }

    /// Whether the report contains any findings
    pub fn has_findings(&self) -> bool {
        self.summary.counts.total() > 0
    }

    /// Whether the report contains blocking findings (errors)
    pub fn has_blocking(&self) -> bool {
        self.summary.counts.has_blocking()
    }

    /// Set the execution time
    pub fn set_duration(&mut self, duration_ms: u64) {
        self.summary.duration_ms = duration_ms;
    }

    /// Sort file reports by path for consistent output
    pub fn sort_files(&mut self) {
        self.files.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: ScanReport) {
        for file in other.files {
            self.add_file(file);
        }
    }
}

impl Default for ScanReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Error types that can occur while checking
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// Input bytes are not valid UTF-8 text
    #[error("invalid UTF-8 in {}: {source}", path.as_deref().map(|p| p.display().to_string()).unwrap_or_else(|| "input".to_string()))]
    InputDecoding {
        path: Option<PathBuf>,
        #[source]
        source: std::str::Utf8Error,
    },

    /// File could not be read or accessed
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid user-supplied pattern or rule name
    #[error("Pattern error: {message}")]
    Pattern { message: String },

    /// Report serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LintError {
    /// Create a decoding error without a known path (e.g. stdin)
    pub fn decoding(source: std::str::Utf8Error) -> Self {
        Self::InputDecoding { path: None, source }
    }

    /// Create a decoding error for a file
    pub fn decoding_in(path: impl Into<PathBuf>, source: std::str::Utf8Error) -> Self {
        Self::InputDecoding { path: Some(path.into()), source }
    }

    /// Create an IO error for a file
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Create a pattern error
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::Pattern { message: message.into() }
    }
}

/// Result type for linelint operations
pub type LintResult<T> = Result<T, LintError>;
