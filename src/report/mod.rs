//! Report rendering with multiple output formats
//!
//! Formatters translate the domain report into external representations.
//! Severity filtering and truncation happen at format time only: the report
//! itself is never mutated, so the same report can be rendered repeatedly
//! with different options.

use crate::domain::{Finding, LintResult, ScanReport, Severity};
use serde_json::json;
use std::io::Write;

/// Supported output formats for scan reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format with colors
    Human,
    /// JSON format for programmatic consumption
    Json,
    /// GitHub Actions workflow annotations
    GitHub,
}

impl OutputFormat {
    /// Parse format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "github" => Some(Self::GitHub),
            _ => None,
        }
    }

    /// Get all available format names
    pub fn all_formats() -> &'static [&'static str] {
        &["human", "json", "github"]
    }
}

/// Options for customizing report output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Whether to use colored output (for human format)
    pub use_colors: bool,
    /// Minimum severity level to include
    pub min_severity: Option<Severity>,
    /// Maximum number of findings to include across all files
    pub max_findings: Option<usize>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { use_colors: true, min_severity: None, max_findings: None }
    }
}

/// Renders scan reports in the supported output formats
pub struct ReportFormatter {
    options: ReportOptions,
}

impl ReportFormatter {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format a scan report in the specified format
    pub fn format_report(&self, report: &ScanReport, format: OutputFormat) -> LintResult<String> {
        let filtered = self.filter_findings(report);

        match format {
            OutputFormat::Human => Ok(self.format_human(report, &filtered)),
            OutputFormat::Json => self.format_json(report, &filtered),
            OutputFormat::GitHub => Ok(self.format_github(&filtered)),
        }
    }

    /// Write a formatted report to a writer
    pub fn write_report<W: Write>(
        &self,
        report: &ScanReport,
        format: OutputFormat,
        mut writer: W,
    ) -> LintResult<()> {
        let formatted = self.format_report(report, format)?;
        writer
            .write_all(formatted.as_bytes())
            .map_err(|e| crate::domain::LintError::io("<output>", e))?;
        Ok(())
    }

    /// Apply severity filtering and global truncation, keeping findings
    /// grouped per file
    fn filter_findings<'a>(
        &self,
        report: &'a ScanReport,
    ) -> Vec<(&'a std::path::Path, Vec<&'a Finding>)> {
        let mut remaining = self.options.max_findings.unwrap_or(usize::MAX);
        let mut grouped = Vec::new();

        for file in &report.files {
            if remaining == 0 {
                break;
            }
            let mut kept: Vec<&Finding> = file
                .findings
                .iter()
                .filter(|f| match self.options.min_severity {
                    Some(min) => f.severity >= min,
                    None => true,
                })
                .collect();
            kept.truncate(remaining);
            remaining -= kept.len();
            if !kept.is_empty() {
                grouped.push((file.path.as_path(), kept));
            }
        }

        grouped
    }

    fn format_human(
        &self,
        report: &ScanReport,
        grouped: &[(&std::path::Path, Vec<&Finding>)],
    ) -> String {
        let mut output = String::new();

        if grouped.is_empty() {
            if self.options.use_colors {
                output.push_str("\x1b[32mNo style findings\x1b[0m\n");
            } else {
                output.push_str("No style findings\n");
            }
        } else {
            for (path, findings) in grouped {
                output.push_str(&format!("{}\n", path.display()));

                for finding in findings {
                    if self.options.use_colors {
                        let severity_color = match finding.severity {
                            Severity::Error => "31",
                            Severity::Warning => "33",
                            Severity::Info => "36",
                            Severity::Hint => "35",
                        };
                        output.push_str(&format!(
                            "  \x1b[2m{}:{}\x1b[0m  {} [\x1b[{}m{}\x1b[0m] {}\n",
                            finding.line,
                            finding.column,
                            finding.rule.name(),
                            severity_color,
                            finding.severity.as_str(),
                            finding.message
                        ));
                    } else {
                        output.push_str(&format!(
                            "  {}:{}  {} [{}] {}\n",
                            finding.line,
                            finding.column,
                            finding.rule.name(),
                            finding.severity.as_str(),
                            finding.message
                        ));
                    }
                }
                output.push('\n');
            }
        }

        output.push_str(&self.format_summary(report));
        output
    }

    fn format_json(
        &self,
        report: &ScanReport,
        grouped: &[(&std::path::Path, Vec<&Finding>)],
    ) -> LintResult<String> {
        let files: Vec<serde_json::Value> = grouped
            .iter()
            .map(|(path, findings)| {
                json!({
                    "path": path.display().to_string(),
                    "findings": findings.iter().map(|f| {
                        json!({
                            "rule": f.rule.name(),
                            "severity": f.severity.as_str(),
                            "line": f.line,
                            "column": f.column,
                            "message": f.message,
                        })
                    }).collect::<Vec<_>>(),
                })
            })
            .collect();

        let json_report = json!({
            "files": files,
            "summary": {
                "total_files": report.summary.total_files,
                "total_lines": report.summary.total_lines,
                "counts": {
                    "error": report.summary.counts.error,
                    "warning": report.summary.counts.warning,
                    "info": report.summary.counts.info,
                    "hint": report.summary.counts.hint,
                },
                "duration_ms": report.summary.duration_ms,
                "scanned_at": report.summary.scanned_at.to_rfc3339(),
            },
        });

        Ok(serde_json::to_string_pretty(&json_report)?)
    }

    fn format_github(&self, grouped: &[(&std::path::Path, Vec<&Finding>)]) -> String {
        let mut output = String::new();

        for (path, findings) in grouped {
            for finding in findings {
                let level = match finding.severity {
                    Severity::Error => "error",
                    Severity::Warning => "warning",
                    Severity::Info | Severity::Hint => "notice",
                };
                output.push_str(&format!(
                    "::{} file={},line={},col={},title={}::{}\n",
                    level,
                    path.display(),
                    finding.line,
                    finding.column,
                    finding.rule.name(),
                    finding.message
                ));
            }
        }

        output
    }

    fn format_summary(&self, report: &ScanReport) -> String {
        let counts = &report.summary.counts;
        let duration = (report.summary.duration_ms as f64) / 1000.0;

        if counts.total() == 0 {
            let text = format!(
                "0 findings in {} files ({:.1}s)\n",
                report.summary.total_files, duration
            );
            return if self.options.use_colors {
                format!("\x1b[32m{text}\x1b[0m")
            } else {
                text
            };
        }

        let mut parts = Vec::new();
        if counts.error > 0 {
            let text = format!("{} error{}", counts.error, plural(counts.error));
            parts.push(self.colorize(text, "31"));
        }
        if counts.warning > 0 {
            let text = format!("{} warning{}", counts.warning, plural(counts.warning));
            parts.push(self.colorize(text, "33"));
        }
        if counts.info > 0 {
            parts.push(self.colorize(format!("{} info", counts.info), "36"));
        }
        if counts.hint > 0 {
            let text = format!("{} hint{}", counts.hint, plural(counts.hint));
            parts.push(self.colorize(text, "35"));
        }

        format!(
            "{} in {} files ({:.1}s)\n",
            parts.join(", "),
            report.summary.total_files,
            duration
        )
    }

    fn colorize(&self, text: String, color: &str) -> String {
        if self.options.use_colors {
            format!("\x1b[{color}m{text}\x1b[0m")
        } else {
            text
        }
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(ReportOptions::default())
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
