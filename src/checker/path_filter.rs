//! Path filtering and file discovery for directory scans
//!
//! Exclude patterns are plain globs evaluated against the full path (when the
//! pattern contains a slash) or the file name (when it does not), plus a set
//! of default exclusions for build output and VCS metadata. Discovery only
//! picks up files whose extension we know how to scan; explicitly named files
//! bypass discovery entirely.

use crate::domain::{LintError, LintResult};
use crate::source::Language;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never descended into during discovery
const DEFAULT_EXCLUDED_DIRS: &[&str] = &["target", "node_modules", "dist", "build"];

/// Plain-text extensions picked up during discovery in addition to the
/// language extensions
const PLAIN_EXTENSIONS: &[&str] = &["txt", "md", "toml", "yaml", "yml", "cfg", "ini"];

/// Glob-based exclude filter plus directory-tree file discovery
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    excludes: Vec<FilterPattern>,
}

/// A single compiled exclude pattern
#[derive(Debug, Clone)]
struct FilterPattern {
    pattern: glob::Pattern,
    /// Original pattern string, kept to decide full-path vs filename matching
    original: String,
}

impl PathFilter {
    /// Create a filter from user-supplied exclude globs
    pub fn new<I, S>(excludes: I) -> LintResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for pattern_str in excludes {
            let pattern_str = pattern_str.as_ref();
            let pattern = glob::Pattern::new(pattern_str).map_err(|e| {
                LintError::pattern(format!("invalid exclude pattern '{pattern_str}': {e}"))
            })?;
            compiled.push(FilterPattern { pattern, original: pattern_str.to_string() });
        }
        Ok(Self { excludes: compiled })
    }

    /// Whether a file passes the exclude patterns
    pub fn allows<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        !self.excludes.iter().any(|p| p.matches(path))
    }

    /// Discover scannable files under a directory root.
    ///
    /// Hidden entries and the default build/VCS directories are skipped, and
    /// only files with a recognized extension are returned.
    pub fn find_files<P: AsRef<Path>>(&self, root: P) -> Vec<PathBuf> {
        let walker = WalkDir::new(root.as_ref())
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_skipped_dir_entry(entry.path(), entry.depth()));

        let mut files = Vec::new();
        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_file() && has_scannable_extension(path) && self.allows(path) {
                files.push(path.to_path_buf());
            }
        }
        files
    }

    /// Drop excluded paths from a list
    pub fn filter_paths(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        paths.iter().filter(|p| self.allows(p)).cloned().collect()
    }
}

impl FilterPattern {
    fn matches(&self, path: &Path) -> bool {
        if self.original.contains('/') {
            // Pattern contains a slash: match against the full path
            self.pattern.matches(&path.to_string_lossy())
        } else if let Some(name) = path.file_name() {
            // No slash: match the file name only
            self.pattern.matches(&name.to_string_lossy())
        } else {
            false
        }
    }
}

/// Hidden entries and default build directories are not descended into.
/// Depth 0 is the root the caller asked for; it is never skipped.
fn is_skipped_dir_entry(path: &Path, depth: usize) -> bool {
    if depth == 0 {
        return false;
    }
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.starts_with('.') || DEFAULT_EXCLUDED_DIRS.contains(&name),
        None => false,
    }
}

/// Whether discovery should pick this file up based on its extension
fn has_scannable_extension(path: &Path) -> bool {
    if Language::from_path(path) != Language::Plain {
        return true;
    }
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if PLAIN_EXTENSIONS.contains(&ext)
    )
}
