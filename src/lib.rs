//! linelint - line-oriented style checking
//!
//! A small lint tool that reads source text line by line and applies
//! independent, stateless pattern checks, producing findings (rule, severity,
//! line, column, message). Rules live in one fixed, ordered registry; a scan
//! is a single pass over the document and findings always come out in
//! ascending line order, same-line findings in registry order.
//!
//! ```
//! use linelint::{scan_text, RuleSet, ScanOptions};
//!
//! let findings = scan_text("var x = 1;\n", &RuleSet::all(), &ScanOptions::default());
//! assert_eq!(findings[0].rule.name(), "no-var");
//! ```

pub mod checker;
pub mod domain;
pub mod report;
pub mod rules;
pub mod source;

// Re-export main types for convenient access
pub use domain::{
    FileReport, Finding, FindingCounts, LintError, LintResult, ScanReport, ScanSummary, Severity,
};

pub use rules::{scan_lines, RuleId, RuleScope, RuleSet, RuleSpec, ScanOptions, REGISTRY};

pub use checker::{CheckOptions, Checker, CheckerBuilder, PathFilter};

pub use report::{OutputFormat, ReportFormatter, ReportOptions};

pub use source::{Language, SourceDocument};

use std::path::{Path, PathBuf};

/// Scan a string with the given rules, without any language scoping
pub fn scan_text(text: &str, rules: &RuleSet, options: &ScanOptions) -> Vec<Finding> {
    scan_lines(&SourceDocument::new(text), rules, options)
}

/// Check a single file with every rule that applies to its language
pub fn check_file<P: AsRef<Path>>(path: P) -> LintResult<FileReport> {
    Checker::new().check_file(path)
}

/// Check a mix of files and directories with default options
pub fn check_paths(paths: &[PathBuf]) -> LintResult<ScanReport> {
    Checker::new().check_paths(paths, &CheckOptions::default())
}
