//! Scan orchestration: single files, path lists, and directory trees
//!
//! The Checker owns the requested rule set and thresholds and coordinates
//! discovery, per-file scanning, and report assembly. Individual documents
//! are always scanned on one thread; parallelism distributes whole files
//! across rayon workers.

pub mod path_filter;

use crate::domain::{FileReport, Finding, LintError, LintResult, ScanReport};
use crate::rules::{scan_lines, RuleSet, ScanOptions};
use crate::source::{Language, SourceDocument};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub use path_filter::PathFilter;

/// Options for multi-path check runs
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Whether to scan files in parallel
    pub parallel: bool,
    /// Whether to abort on the first file that fails to read or decode
    pub fail_fast: bool,
    /// Maximum number of files to scan
    pub max_files: Option<usize>,
    /// Exclude globs applied on top of the defaults
    pub exclude: Vec<String>,
    /// Force a language instead of detecting it from file extensions
    pub language_override: Option<Language>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            fail_fast: false,
            max_files: None,
            exclude: Vec::new(),
            language_override: None,
        }
    }
}

/// Applies the configured rules to documents, files, and directory trees
#[derive(Debug, Clone)]
pub struct Checker {
    rules: RuleSet,
    options: ScanOptions,
}

impl Checker {
    /// A checker with every rule enabled and default thresholds
    pub fn new() -> Self {
        Self { rules: RuleSet::all(), options: ScanOptions::default() }
    }

    pub fn builder() -> CheckerBuilder {
        CheckerBuilder::default()
    }

    /// The requested rule set
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Scan a document with the requested rules exactly as given, without
    /// language filtering
    pub fn scan(&self, document: &SourceDocument<'_>) -> Vec<Finding> {
        scan_lines(document, &self.rules, &self.options)
    }

    /// Scan text as a document of a given language: the requested set is
    /// intersected with the rules that apply to that language
    pub fn scan_source(&self, text: &str, language: Language) -> Vec<Finding> {
        let scoped = self.rules.intersect(RuleSet::for_language(language));
        scan_lines(&SourceDocument::new(text), &scoped, &self.options)
    }

    /// Read, decode, and scan a single file, detecting its language from the
    /// extension
    pub fn check_file<P: AsRef<Path>>(&self, path: P) -> LintResult<FileReport> {
        self.check_file_as(path, None)
    }

    /// Like `check_file` but with an optional forced language
    pub fn check_file_as<P: AsRef<Path>>(
        &self,
        path: P,
        language_override: Option<Language>,
    ) -> LintResult<FileReport> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| LintError::io(path, e))?;
        let content = String::from_utf8(bytes)
            .map_err(|e| LintError::decoding_in(path, e.utf8_error()))?;

        let language = language_override.unwrap_or_else(|| Language::from_path(path));
        tracing::debug!(path = %path.display(), language = language.as_str(), "scanning file");

        let document = SourceDocument::new(&content);
        let lines = document.line_count();
        let scoped = self.rules.intersect(RuleSet::for_language(language));
        let findings = scan_lines(&document, &scoped, &self.options);

        Ok(FileReport::new(path.to_path_buf(), lines, findings))
    }

    /// Check a mix of files and directories and assemble a sorted report.
    ///
    /// Directories are expanded through the path filter; explicitly named
    /// files are always checked. Unreadable or undecodable files abort the
    /// run under `fail_fast`, otherwise they are logged and skipped.
    pub fn check_paths(&self, paths: &[PathBuf], options: &CheckOptions) -> LintResult<ScanReport> {
        let start_time = Instant::now();
        let filter = PathFilter::new(&options.exclude)?;

        let mut files_to_check = Vec::new();
        for path in paths {
            if path.is_file() {
                files_to_check.push(path.clone());
            } else if path.is_dir() {
                files_to_check.extend(filter.find_files(path));
            } else {
                let err = LintError::io(
                    path,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
                );
                if options.fail_fast {
                    return Err(err);
                }
                tracing::warn!("skipping {}: {}", path.display(), err);
            }
        }

        files_to_check.sort();
        files_to_check.dedup();

        if let Some(max_files) = options.max_files {
            files_to_check.truncate(max_files);
        }

        let results: Vec<LintResult<FileReport>> = if options.parallel && files_to_check.len() > 1 {
            files_to_check
                .par_iter()
                .map(|path| self.check_file_as(path, options.language_override))
                .collect()
        } else {
            files_to_check
                .iter()
                .map(|path| self.check_file_as(path, options.language_override))
                .collect()
        };

        let mut report = ScanReport::new();
        for result in results {
            match result {
                Ok(file) => report.add_file(file),
                Err(e) => {
                    if options.fail_fast {
                        return Err(e);
                    }
                    tracing::warn!("failed to check file: {e}");
                }
            }
        }

        report.sort_files();
        report.set_duration(start_time.elapsed().as_millis() as u64);
        Ok(report)
    }

    /// Check a directory tree with the given options
    pub fn check_directory<P: AsRef<Path>>(
        &self,
        root: P,
        options: &CheckOptions,
    ) -> LintResult<ScanReport> {
        self.check_paths(&[root.as_ref().to_path_buf()], options)
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for checkers with a restricted rule set or custom thresholds
#[derive(Debug, Clone, Default)]
pub struct CheckerBuilder {
    rules: Option<RuleSet>,
    options: ScanOptions,
}

impl CheckerBuilder {
    /// Restrict the checker to the given rules (default: all)
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Override the universal line-length limit
    pub fn max_line_length(mut self, limit: usize) -> Self {
        self.options.max_line_length = limit;
        self
    }

    /// Override the Python line-length limit
    pub fn py_max_line_length(mut self, limit: usize) -> Self {
        self.options.py_max_line_length = limit;
        self
    }

    pub fn build(self) -> Checker {
        Checker { rules: self.rules.unwrap_or_else(RuleSet::all), options: self.options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleId;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_applies_rules_as_given() {
        let checker = Checker::new();
        // A direct scan has no language scoping: JS rules fire on any text
        let doc = SourceDocument::new("var x = 1;\n");
        let findings = checker.scan(&doc);
        assert!(findings.iter().any(|f| f.rule == RuleId::NoVar));
    }

    #[test]
    fn test_scan_source_filters_by_language() {
        let checker = Checker::new();

        let js = checker.scan_source("var x = 1;\n", Language::JavaScript);
        assert!(js.iter().any(|f| f.rule == RuleId::NoVar));

        // The same text as Rust produces no JavaScript findings
        let rust = checker.scan_source("var x = 1;\n", Language::Rust);
        assert!(rust.iter().all(|f| f.rule != RuleId::NoVar));
    }

    #[test]
    fn test_check_file_detects_language() -> LintResult<()> {
        let temp_dir = TempDir::new().unwrap();

        let js_file = temp_dir.path().join("app.js");
        fs::write(&js_file, "var oldStyle = 1;\nconsole.log(oldStyle);\n").unwrap();

        let rs_file = temp_dir.path().join("lib.rs");
        fs::write(&rs_file, "let v = x.unwrap();\n").unwrap();

        let checker = Checker::new();

        let js_report = checker.check_file(&js_file)?;
        assert_eq!(js_report.lines, 2);
        assert!(js_report.findings.iter().any(|f| f.rule == RuleId::NoVar));
        assert!(js_report.findings.iter().any(|f| f.rule == RuleId::NoConsole));

        let rs_report = checker.check_file(&rs_file)?;
        assert!(rs_report.findings.iter().any(|f| f.rule == RuleId::NoUnwrap));
        // Rust files never produce JavaScript findings
        assert!(rs_report.findings.iter().all(|f| f.rule != RuleId::NoConsole));

        Ok(())
    }

    #[test]
    fn test_check_file_rejects_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let bad_file = temp_dir.path().join("bad.js");
        fs::write(&bad_file, [0x76u8, 0x61, 0x72, 0xff, 0xfe]).unwrap();

        let checker = Checker::new();
        let err = checker.check_file(&bad_file).unwrap_err();
        assert!(matches!(err, LintError::InputDecoding { path: Some(_), .. }));
    }

    #[test]
    fn test_check_paths_assembles_sorted_report() -> LintResult<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("b.js"), "var b = 1;\n").unwrap();
        fs::write(root.join("a.js"), "var a = 1;\n").unwrap();

        let checker = Checker::new();
        let report = checker.check_directory(root, &CheckOptions::default())?;

        assert_eq!(report.summary.total_files, 2);
        assert!(report.has_blocking());
        assert!(report.files[0].path < report.files[1].path);

        Ok(())
    }

    #[test]
    fn test_parallel_and_sequential_agree() -> LintResult<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        for i in 0..6 {
            fs::write(
                root.join(format!("f{i}.js")),
                format!("var v{i} = {i};\nconsole.log(v{i})  \n"),
            )
            .unwrap();
        }

        let checker = Checker::new();
        let parallel = checker
            .check_directory(root, &CheckOptions { parallel: true, ..Default::default() })?;
        let sequential = checker
            .check_directory(root, &CheckOptions { parallel: false, ..Default::default() })?;

        assert_eq!(parallel.summary.counts, sequential.summary.counts);
        assert_eq!(parallel.files.len(), sequential.files.len());
        for (p, s) in parallel.files.iter().zip(sequential.files.iter()) {
            assert_eq!(p.path, s.path);
            assert_eq!(p.findings, s.findings);
        }

        Ok(())
    }

    #[test]
    fn test_max_files_truncation() -> LintResult<()> {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("a.js"), "var a;\n").unwrap();
        fs::write(root.join("b.js"), "var b;\n").unwrap();
        fs::write(root.join("c.js"), "var c;\n").unwrap();

        let checker = Checker::new();
        let options = CheckOptions { max_files: Some(2), ..Default::default() };
        let report = checker.check_directory(root, &options)?;

        assert_eq!(report.summary.total_files, 2);
        Ok(())
    }

    #[test]
    fn test_fail_fast_surfaces_decode_errors() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("good.js"), "let x = 1;\n").unwrap();
        fs::write(root.join("bad.js"), [0xffu8, 0xfe]).unwrap();

        let checker = Checker::new();

        let strict = CheckOptions { fail_fast: true, parallel: false, ..Default::default() };
        assert!(checker.check_directory(root, &strict).is_err());

        // Without fail_fast the bad file is skipped and the rest is reported
        let lenient = CheckOptions::default();
        let report = checker.check_directory(root, &lenient).unwrap();
        assert_eq!(report.summary.total_files, 1);
    }

    #[test]
    fn test_language_override() -> LintResult<()> {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("script.txt");
        fs::write(&file, "var x = 1;\n").unwrap();

        let checker = Checker::new();

        // As plain text the JS rules stay quiet
        let plain = checker.check_file(&file)?;
        assert!(plain.findings.is_empty());

        let forced = checker.check_file_as(&file, Some(Language::JavaScript))?;
        assert!(forced.findings.iter().any(|f| f.rule == RuleId::NoVar));

        Ok(())
    }

    #[test]
    fn test_builder_restricts_rules_and_thresholds() -> LintResult<()> {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("app.js");
        fs::write(&file, "var x = 1; // short but wrong\n").unwrap();

        let checker = Checker::builder()
            .rules(RuleSet::parse("max-line-length").unwrap())
            .max_line_length(10)
            .build();

        let report = checker.check_file(&file)?;
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].rule, RuleId::MaxLineLength);

        Ok(())
    }
}
