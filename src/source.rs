//! Source text model: borrowed documents and language detection
//!
//! SourceDocument is a read-only borrow of the text being scanned. Lines are
//! 1-indexed with boundaries at line feeds; a trailing `\r` from CRLF input
//! is stripped together with the terminator by `str::lines`. Decoding from
//! bytes is the only fallible step on the scan path.

use crate::domain::{LintError, LintResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A read-only view of source text, borrowed for the duration of a scan
#[derive(Debug, Clone, Copy)]
pub struct SourceDocument<'a> {
    text: &'a str,
}

impl<'a> SourceDocument<'a> {
    /// Wrap already-decoded text
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Decode raw bytes as UTF-8; invalid input yields `LintError::InputDecoding`
    pub fn from_bytes(bytes: &'a [u8]) -> LintResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(LintError::decoding)?;
        Ok(Self { text })
    }

    /// Iterate lines as `(line_number, content)`, numbered from 1
    pub fn lines(&self) -> impl Iterator<Item = (u32, &'a str)> {
        self.text.lines().enumerate().map(|(idx, line)| (idx as u32 + 1, line))
    }

    /// Number of lines in the document
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    /// Whether the document has no content at all
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The underlying text
    pub fn text(&self) -> &'a str {
        self.text
    }
}

/// Languages with dedicated rule families; everything else is Plain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Plain,
    JavaScript,
    Rust,
    Python,
    Json,
}

impl Language {
    /// Detect the language from a file extension; unknown extensions map to Plain
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("js" | "jsx" | "ts" | "tsx" | "mjs" | "cjs") => Self::JavaScript,
            Some("rs") => Self::Rust,
            Some("py") => Self::Python,
            Some("json") => Self::Json,
            _ => Self::Plain,
        }
    }

    /// Convert to string for display
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::JavaScript => "javascript",
            Self::Rust => "rust",
            Self::Python => "python",
            Self::Json => "json",
        }
    }

    /// All languages, for CLI listings
    pub fn all() -> &'static [Language] {
        &[Self::Plain, Self::JavaScript, Self::Rust, Self::Python, Self::Json]
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "javascript" | "js" | "typescript" | "ts" => Ok(Self::JavaScript),
            "rust" | "rs" => Ok(Self::Rust),
            "python" | "py" => Ok(Self::Python),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown language '{other}' (expected plain, javascript, rust, python or json)"
            )),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
