//! Line rule registry and the scan engine
//!
//! Every rule is a stateless predicate over a single line of text, registered
//! in one fixed, ordered table. `scan_lines` walks the document line by line
//! and evaluates each enabled rule in registry order, so findings come out
//! ascending by line and, within a line, in declared rule order. A rule
//! reports at most one finding per line, at its first occurrence.

use crate::domain::{Finding, LintError, LintResult, Severity};
use crate::source::{Language, SourceDocument};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Stable identifiers for the built-in rules, in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    NoVar,
    NoLooseEquality,
    NoConsole,
    MaxLineLength,
    NoTrailingWhitespace,
    NoMixedIndentation,
    NoDebugger,
    NoDoubleNegation,
    NoEmptyBlock,
    FunctionSpacing,
    NoUnwrap,
    NoPanic,
    PyMaxLineLength,
    PyIndentWidth,
    PyCommaSpacing,
    PyPrint,
    JsonTrailingComma,
}

impl RuleId {
    /// All rules in registry order
    pub const ALL: [RuleId; 17] = [
        RuleId::NoVar,
        RuleId::NoLooseEquality,
        RuleId::NoConsole,
        RuleId::MaxLineLength,
        RuleId::NoTrailingWhitespace,
        RuleId::NoMixedIndentation,
        RuleId::NoDebugger,
        RuleId::NoDoubleNegation,
        RuleId::NoEmptyBlock,
        RuleId::FunctionSpacing,
        RuleId::NoUnwrap,
        RuleId::NoPanic,
        RuleId::PyMaxLineLength,
        RuleId::PyIndentWidth,
        RuleId::PyCommaSpacing,
        RuleId::PyPrint,
        RuleId::JsonTrailingComma,
    ];

    /// The kebab-case rule name used in output and on the command line
    pub fn name(self) -> &'static str {
        match self {
            Self::NoVar => "no-var",
            Self::NoLooseEquality => "no-loose-equality",
            Self::NoConsole => "no-console",
            Self::MaxLineLength => "max-line-length",
            Self::NoTrailingWhitespace => "no-trailing-whitespace",
            Self::NoMixedIndentation => "no-mixed-indentation",
            Self::NoDebugger => "no-debugger",
            Self::NoDoubleNegation => "no-double-negation",
            Self::NoEmptyBlock => "no-empty-block",
            Self::FunctionSpacing => "function-spacing",
            Self::NoUnwrap => "no-unwrap",
            Self::NoPanic => "no-panic",
            Self::PyMaxLineLength => "py-max-line-length",
            Self::PyIndentWidth => "py-indent-width",
            Self::PyCommaSpacing => "py-comma-spacing",
            Self::PyPrint => "py-print",
            Self::JsonTrailingComma => "json-trailing-comma",
        }
    }

    /// Look up a rule by its kebab-case name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.name() == name)
    }

    /// The registry entry for this rule
    pub fn spec(self) -> &'static RuleSpec {
        &REGISTRY[self as usize]
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which files a rule applies to during file scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Applies to every document
    Universal,
    /// Applies only to documents of one language
    Lang(Language),
}

impl RuleScope {
    pub fn applies_to(self, language: Language) -> bool {
        match self {
            Self::Universal => true,
            Self::Lang(lang) => lang == language,
        }
    }

    /// Convert to string for display
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Universal => "universal",
            Self::Lang(lang) => lang.as_str(),
        }
    }
}

/// Configurable thresholds for the parametric rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Character limit for `max-line-length`
    pub max_line_length: usize,
    /// Character limit for `py-max-line-length` (PEP 8)
    pub py_max_line_length: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self { max_line_length: 100, py_max_line_length: 79 }
    }
}

/// A single rule match on one line
struct Hit {
    column: u32,
    message: String,
}

impl Hit {
    fn new(column: u32, message: impl Into<String>) -> Self {
        Self { column, message: message.into() }
    }
}

type CheckFn = fn(&str, &ScanOptions) -> Option<Hit>;

/// A registry entry: rule metadata plus its check function
pub struct RuleSpec {
    pub id: RuleId,
    pub scope: RuleScope,
    pub severity: Severity,
    pub summary: &'static str,
    check: CheckFn,
}

/// The fixed, ordered rule registry. Registry order is the declared rule
/// order: same-line findings are emitted in this order.
pub static REGISTRY: [RuleSpec; 17] = [
    RuleSpec {
        id: RuleId::NoVar,
        scope: RuleScope::Lang(Language::JavaScript),
        severity: Severity::Error,
        summary: "Disallow 'var' declarations; use 'let' or 'const'",
        check: check_no_var,
    },
    RuleSpec {
        id: RuleId::NoLooseEquality,
        scope: RuleScope::Lang(Language::JavaScript),
        severity: Severity::Error,
        summary: "Require '===' and '!==' over loose comparison",
        check: check_no_loose_equality,
    },
    RuleSpec {
        id: RuleId::NoConsole,
        scope: RuleScope::Lang(Language::JavaScript),
        severity: Severity::Warning,
        summary: "Disallow console logging calls",
        check: check_no_console,
    },
    RuleSpec {
        id: RuleId::MaxLineLength,
        scope: RuleScope::Universal,
        severity: Severity::Warning,
        summary: "Limit line length (default 100 characters)",
        check: check_max_line_length,
    },
    RuleSpec {
        id: RuleId::NoTrailingWhitespace,
        scope: RuleScope::Universal,
        severity: Severity::Info,
        summary: "Disallow whitespace at end of line",
        check: check_no_trailing_whitespace,
    },
    RuleSpec {
        id: RuleId::NoMixedIndentation,
        scope: RuleScope::Universal,
        severity: Severity::Warning,
        summary: "Disallow mixing tabs and spaces in indentation",
        check: check_no_mixed_indentation,
    },
    RuleSpec {
        id: RuleId::NoDebugger,
        scope: RuleScope::Lang(Language::JavaScript),
        severity: Severity::Error,
        summary: "Disallow debugger statements",
        check: check_no_debugger,
    },
    RuleSpec {
        id: RuleId::NoDoubleNegation,
        scope: RuleScope::Lang(Language::JavaScript),
        severity: Severity::Info,
        summary: "Prefer Boolean() over double negation",
        check: check_no_double_negation,
    },
    RuleSpec {
        id: RuleId::NoEmptyBlock,
        scope: RuleScope::Lang(Language::JavaScript),
        severity: Severity::Warning,
        summary: "Disallow empty block statements",
        check: check_no_empty_block,
    },
    RuleSpec {
        id: RuleId::FunctionSpacing,
        scope: RuleScope::Lang(Language::JavaScript),
        severity: Severity::Info,
        summary: "Require a space before anonymous function parameter lists",
        check: check_function_spacing,
    },
    RuleSpec {
        id: RuleId::NoUnwrap,
        scope: RuleScope::Lang(Language::Rust),
        severity: Severity::Warning,
        summary: "Discourage .unwrap(); prefer expect() or error propagation",
        check: check_no_unwrap,
    },
    RuleSpec {
        id: RuleId::NoPanic,
        scope: RuleScope::Lang(Language::Rust),
        severity: Severity::Warning,
        summary: "Discourage panic!(); prefer returning Result",
        check: check_no_panic,
    },
    RuleSpec {
        id: RuleId::PyMaxLineLength,
        scope: RuleScope::Lang(Language::Python),
        severity: Severity::Info,
        summary: "Limit Python line length (PEP 8, default 79 characters)",
        check: check_py_max_line_length,
    },
    RuleSpec {
        id: RuleId::PyIndentWidth,
        scope: RuleScope::Lang(Language::Python),
        severity: Severity::Warning,
        summary: "Require 4-space indentation levels (PEP 8)",
        check: check_py_indent_width,
    },
    RuleSpec {
        id: RuleId::PyCommaSpacing,
        scope: RuleScope::Lang(Language::Python),
        severity: Severity::Info,
        summary: "Require whitespace after ',' (PEP 8)",
        check: check_py_comma_spacing,
    },
    RuleSpec {
        id: RuleId::PyPrint,
        scope: RuleScope::Lang(Language::Python),
        severity: Severity::Hint,
        summary: "Prefer logging over print()",
        check: check_py_print,
    },
    RuleSpec {
        id: RuleId::JsonTrailingComma,
        scope: RuleScope::Lang(Language::Json),
        severity: Severity::Error,
        summary: "Disallow trailing commas in JSON",
        check: check_json_trailing_comma,
    },
];

/// An ordered set of enabled rules over the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    bits: u32,
}

impl RuleSet {
    /// The set of every registered rule
    pub fn all() -> Self {
        Self { bits: (1 << REGISTRY.len()) - 1 }
    }

    /// The empty set
    pub fn none() -> Self {
        Self { bits: 0 }
    }

    /// Universal rules plus the given language's rules
    pub fn for_language(language: Language) -> Self {
        REGISTRY
            .iter()
            .filter(|spec| spec.scope.applies_to(language))
            .map(|spec| spec.id)
            .collect()
    }

    pub fn enable(&mut self, id: RuleId) {
        self.bits |= 1 << id as u32;
    }

    pub fn disable(&mut self, id: RuleId) {
        self.bits &= !(1 << id as u32);
    }

    pub fn contains(&self, id: RuleId) -> bool {
        self.bits & (1 << id as u32) != 0
    }

    pub fn intersect(self, other: RuleSet) -> Self {
        Self { bits: self.bits & other.bits }
    }

    pub fn union(self, other: RuleSet) -> Self {
        Self { bits: self.bits | other.bits }
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterate enabled rules in registry order
    pub fn iter(&self) -> impl Iterator<Item = RuleId> + '_ {
        RuleId::ALL.iter().copied().filter(|id| self.contains(*id))
    }

    /// Parse a comma-separated list of rule names; unknown names are rejected
    pub fn parse(list: &str) -> LintResult<Self> {
        let mut set = Self::none();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let id = RuleId::from_name(name)
                .ok_or_else(|| LintError::pattern(format!("unknown rule '{name}'")))?;
            set.enable(id);
        }
        Ok(set)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<RuleId> for RuleSet {
    fn from_iter<T: IntoIterator<Item = RuleId>>(iter: T) -> Self {
        let mut set = Self::none();
        for id in iter {
            set.enable(id);
        }
        set
    }
}

/// Apply the enabled rules to every line of the document.
///
/// Pure and side-effect free: the document is borrowed, never mutated, and
/// the same inputs always produce the same findings. Empty documents and
/// empty rule sets yield an empty vec.
pub fn scan_lines(
    document: &SourceDocument<'_>,
    rules: &RuleSet,
    options: &ScanOptions,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    if rules.is_empty() {
        return findings;
    }

    for (line_number, line) in document.lines() {
        for spec in REGISTRY.iter() {
            if !rules.contains(spec.id) {
                continue;
            }
            if let Some(hit) = (spec.check)(line, options) {
                findings.push(Finding::new(
                    spec.id,
                    spec.severity,
                    line_number,
                    hit.column,
                    hit.message,
                ));
            }
        }
    }

    findings
}

lazy_static! {
    static ref VAR_DECL: Regex =
        Regex::new(r"(?:^|[;{(])\s*(var)\s").expect("VAR_DECL regex is valid");
    static ref CONSOLE_CALL: Regex =
        Regex::new(r"\bconsole\.(?:log|error|warn|info|debug|trace)\s*\(")
            .expect("CONSOLE_CALL regex is valid");
    static ref DEBUGGER_STMT: Regex =
        Regex::new(r"\bdebugger\b").expect("DEBUGGER_STMT regex is valid");
    static ref DOUBLE_NEGATION: Regex =
        Regex::new(r"!!\s*\w").expect("DOUBLE_NEGATION regex is valid");
    static ref EMPTY_BLOCK: Regex = Regex::new(r"\{\s*\}").expect("EMPTY_BLOCK regex is valid");
    static ref ANON_FUNCTION: Regex =
        Regex::new(r"\bfunction\(").expect("ANON_FUNCTION regex is valid");
    static ref UNWRAP_CALL: Regex = Regex::new(r"\.unwrap\(\)").expect("UNWRAP_CALL regex is valid");
    static ref PANIC_CALL: Regex = Regex::new(r"panic!\s*\(").expect("PANIC_CALL regex is valid");
    static ref COMMA_NO_SPACE: Regex =
        Regex::new(r",[^\s)\]}]").expect("COMMA_NO_SPACE regex is valid");
    static ref PRINT_CALL: Regex = Regex::new(r"\bprint\s*\(").expect("PRINT_CALL regex is valid");
    static ref JSON_TRAILING_COMMA: Regex =
        Regex::new(r",\s*[}\]]").expect("JSON_TRAILING_COMMA regex is valid");
}

/// 1-indexed character column of a byte offset within a line
fn col_at(line: &str, byte_idx: usize) -> u32 {
    line[..byte_idx].chars().count() as u32 + 1
}

/// Leading whitespace run of a line
fn indentation(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn check_no_var(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let caps = VAR_DECL.captures(line)?;
    let token = caps.get(1)?;
    Some(Hit::new(col_at(line, token.start()), "Use 'let' or 'const' instead of 'var'"))
}

fn check_no_loose_equality(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        let pair = &bytes[i..i + 2];
        let next = bytes.get(i + 2).copied();
        if pair == b"==" {
            // ===, <=, >=, != swallow the occurrence; plain == fires
            let prev = if i > 0 { Some(bytes[i - 1]) } else { None };
            let strict = matches!(prev, Some(b'=' | b'!' | b'<' | b'>')) || next == Some(b'=');
            if !strict {
                return Some(Hit::new(
                    col_at(line, i),
                    "Use strict equality ('===' / '!==') instead of loose comparison",
                ));
            }
        } else if pair == b"!=" && next != Some(b'=') {
            return Some(Hit::new(
                col_at(line, i),
                "Use strict equality ('===' / '!==') instead of loose comparison",
            ));
        }
        i += 1;
    }
    None
}

fn check_no_console(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let mat = CONSOLE_CALL.find(line)?;
    Some(Hit::new(col_at(line, mat.start()), "Avoid console logging in production code"))
}

fn check_max_line_length(line: &str, opts: &ScanOptions) -> Option<Hit> {
    let limit = opts.max_line_length;
    let len = line.chars().count();
    if len > limit {
        Some(Hit::new(limit as u32 + 1, format!("Line too long ({len} > {limit} characters)")))
    } else {
        None
    }
}

fn check_no_trailing_whitespace(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let trimmed = line.trim_end();
    if trimmed.len() < line.len() {
        Some(Hit::new(trimmed.chars().count() as u32 + 1, "Trailing whitespace"))
    } else {
        None
    }
}

fn check_no_mixed_indentation(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let indent = indentation(line);
    if indent.contains(' ') && indent.contains('\t') {
        Some(Hit::new(1, "Mixed indentation (tabs and spaces)"))
    } else {
        None
    }
}

fn check_no_debugger(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let mat = DEBUGGER_STMT.find(line)?;
    Some(Hit::new(col_at(line, mat.start()), "Remove debugger statement"))
}

fn check_no_double_negation(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let mat = DOUBLE_NEGATION.find(line)?;
    Some(Hit::new(col_at(line, mat.start()), "Use Boolean() instead of double negation (!!)"))
}

fn check_no_empty_block(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let mat = EMPTY_BLOCK.find(line)?;
    Some(Hit::new(col_at(line, mat.start()), "Empty block statement"))
}

fn check_function_spacing(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let mat = ANON_FUNCTION.find(line)?;
    Some(Hit::new(
        col_at(line, mat.start()),
        "Missing space between 'function' and its parameter list",
    ))
}

fn check_no_unwrap(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let mat = UNWRAP_CALL.find(line)?;
    Some(Hit::new(
        col_at(line, mat.start()),
        "Avoid .unwrap(); use .expect() with a message or propagate the error",
    ))
}

fn check_no_panic(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let mat = PANIC_CALL.find(line)?;
    Some(Hit::new(col_at(line, mat.start()), "Avoid panic!(); return a Result instead"))
}

fn check_py_max_line_length(line: &str, opts: &ScanOptions) -> Option<Hit> {
    let limit = opts.py_max_line_length;
    let len = line.chars().count();
    if len > limit {
        Some(Hit::new(
            limit as u32 + 1,
            format!("Line too long ({len} > {limit} characters, PEP 8)"),
        ))
    } else {
        None
    }
}

fn check_py_indent_width(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let indent = indentation(line);
    // Tab-bearing indentation is no-mixed-indentation's concern
    if indent.is_empty() || indent.contains('\t') {
        return None;
    }
    if indent.len() % 4 != 0 {
        Some(Hit::new(1, "Indentation is not a multiple of 4 spaces (PEP 8)"))
    } else {
        None
    }
}

fn check_py_comma_spacing(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let mat = COMMA_NO_SPACE.find(line)?;
    Some(Hit::new(col_at(line, mat.start() + 1), "Missing whitespace after ',' (PEP 8)"))
}

fn check_py_print(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let mat = PRINT_CALL.find(line)?;
    Some(Hit::new(col_at(line, mat.start()), "Consider using logging instead of print()"))
}

fn check_json_trailing_comma(line: &str, _opts: &ScanOptions) -> Option<Hit> {
    let mat = JSON_TRAILING_COMMA.find(line)?;
    Some(Hit::new(col_at(line, mat.start()), "Trailing comma not allowed in JSON"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scan(text: &str, rules: RuleSet) -> Vec<Finding> {
        scan_lines(&SourceDocument::new(text), &rules, &ScanOptions::default())
    }

    fn only(id: RuleId) -> RuleSet {
        std::iter::once(id).collect()
    }

    #[test]
    fn registry_order_matches_rule_ids() {
        for (idx, spec) in REGISTRY.iter().enumerate() {
            assert_eq!(spec.id as usize, idx, "registry entry {idx} out of order");
        }
    }

    #[test]
    fn rule_names_are_unique_and_round_trip() {
        for id in RuleId::ALL {
            assert_eq!(RuleId::from_name(id.name()), Some(id));
        }
        let mut names: Vec<_> = RuleId::ALL.iter().map(|id| id.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RuleId::ALL.len());
    }

    #[rstest]
    #[case("var x = 1;", true)]
    #[case("    var indented = 1;", true)]
    #[case("for (var i = 0; i < 3; i++) {", true)]
    #[case("if (x) { var y = 1; }", true)]
    #[case("let ok = 1; var bad = 2;", true)]
    #[case("const variable = 1;", false)]
    #[case("invariant = 2;", false)]
    #[case("let x = 1;", false)]
    fn no_var_cases(#[case] line: &str, #[case] fires: bool) {
        assert_eq!(scan(line, only(RuleId::NoVar)).len(), usize::from(fires), "line: {line}");
    }

    #[test]
    fn no_var_column_points_at_token() {
        let findings = scan("var x = 1;", only(RuleId::NoVar));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[0].column, 1);
        assert_eq!(findings[0].rule, RuleId::NoVar);
    }

    #[rstest]
    #[case("if (value == null) {", true)]
    #[case("count != max", true)]
    #[case("if (a == b && c === d)", true)]
    #[case("a === b", false)]
    #[case("a !== b", false)]
    #[case("x <= y", false)]
    #[case("x >= y", false)]
    #[case("const f = (a) => a;", false)]
    #[case("let x = 1;", false)]
    fn loose_equality_cases(#[case] line: &str, #[case] fires: bool) {
        assert_eq!(
            scan(line, only(RuleId::NoLooseEquality)).len(),
            usize::from(fires),
            "line: {line}"
        );
    }

    #[rstest]
    #[case("console.log(\"hi\");", true)]
    #[case("console.error('boom');", true)]
    #[case("    console.warn(x)", true)]
    #[case("myconsole.log(x);", false)]
    #[case("// just a comment about console usage", false)]
    fn no_console_cases(#[case] line: &str, #[case] fires: bool) {
        assert_eq!(scan(line, only(RuleId::NoConsole)).len(), usize::from(fires), "line: {line}");
    }

    #[test]
    fn max_line_length_threshold() {
        let long = "x".repeat(120);
        let findings = scan(&long, only(RuleId::MaxLineLength));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].column, 101);

        let exact = "y".repeat(100);
        assert!(scan(&exact, only(RuleId::MaxLineLength)).is_empty());
    }

    #[test]
    fn max_line_length_counts_chars_not_bytes() {
        // 100 two-byte chars: 200 bytes but within the character limit
        let multibyte = "é".repeat(100);
        assert!(scan(&multibyte, only(RuleId::MaxLineLength)).is_empty());

        let over = "é".repeat(101);
        assert_eq!(scan(&over, only(RuleId::MaxLineLength)).len(), 1);
    }

    #[test]
    fn trailing_whitespace_cases() {
        let findings = scan("let trailing = \"x\";   ", only(RuleId::NoTrailingWhitespace));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].column, 20);

        assert_eq!(scan("tabbed\t", only(RuleId::NoTrailingWhitespace)).len(), 1);
        assert!(scan("clean", only(RuleId::NoTrailingWhitespace)).is_empty());
        assert!(scan("", only(RuleId::NoTrailingWhitespace)).is_empty());
    }

    #[rstest]
    #[case("    \tlet x = 5;", true)]
    #[case("\t    mixed()", true)]
    #[case("\tonly_tabs()", false)]
    #[case("    only_spaces()", false)]
    #[case("code with \t embedded tab", false)]
    fn mixed_indentation_cases(#[case] line: &str, #[case] fires: bool) {
        assert_eq!(
            scan(line, only(RuleId::NoMixedIndentation)).len(),
            usize::from(fires),
            "line: {line:?}"
        );
    }

    #[rstest]
    #[case("debugger;", true)]
    #[case("  debugger", true)]
    #[case("mydebugger();", false)]
    fn no_debugger_cases(#[case] line: &str, #[case] fires: bool) {
        assert_eq!(scan(line, only(RuleId::NoDebugger)).len(), usize::from(fires), "line: {line}");
    }

    #[rstest]
    #[case("const b = !!value;", true)]
    #[case("if (!! flag) {", true)]
    #[case("a != b", false)]
    #[case("!important", false)]
    fn double_negation_cases(#[case] line: &str, #[case] fires: bool) {
        assert_eq!(
            scan(line, only(RuleId::NoDoubleNegation)).len(),
            usize::from(fires),
            "line: {line}"
        );
    }

    #[rstest]
    #[case("if (x) {}", true)]
    #[case("function noop() { }", true)]
    #[case("if (x) { y(); }", false)]
    fn empty_block_cases(#[case] line: &str, #[case] fires: bool) {
        assert_eq!(scan(line, only(RuleId::NoEmptyBlock)).len(), usize::from(fires), "line: {line}");
    }

    #[rstest]
    #[case("function(){}", true)]
    #[case("const cb = function(done) {", true)]
    #[case("function greet(name) {", false)]
    #[case("function (done) {", false)]
    fn function_spacing_cases(#[case] line: &str, #[case] fires: bool) {
        assert_eq!(
            scan(line, only(RuleId::FunctionSpacing)).len(),
            usize::from(fires),
            "line: {line}"
        );
    }

    #[rstest]
    #[case("let v = name.parse::<i32>().unwrap();", true)]
    #[case("let v = x.unwrap_or(0);", false)]
    fn no_unwrap_cases(#[case] line: &str, #[case] fires: bool) {
        assert_eq!(scan(line, only(RuleId::NoUnwrap)).len(), usize::from(fires), "line: {line}");
    }

    #[rstest]
    #[case("panic!(\"boom\");", true)]
    #[case("panic! (\"spaced\");", true)]
    #[case("no_panic();", false)]
    fn no_panic_cases(#[case] line: &str, #[case] fires: bool) {
        assert_eq!(scan(line, only(RuleId::NoPanic)).len(), usize::from(fires), "line: {line}");
    }

    #[test]
    fn py_line_length_uses_pep8_limit() {
        let line = "a".repeat(85);
        let findings = scan(&line, only(RuleId::PyMaxLineLength));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].column, 80);

        let fits = "b".repeat(79);
        assert!(scan(&fits, only(RuleId::PyMaxLineLength)).is_empty());
    }

    #[rstest]
    #[case("   x = 1", true)]
    #[case("  y = 2", true)]
    #[case("    z = 3", false)]
    #[case("        w = 4", false)]
    #[case("top = 5", false)]
    #[case("\ttabbed = 6", false)]
    fn py_indent_width_cases(#[case] line: &str, #[case] fires: bool) {
        assert_eq!(
            scan(line, only(RuleId::PyIndentWidth)).len(),
            usize::from(fires),
            "line: {line:?}"
        );
    }

    #[test]
    fn py_comma_spacing_cases() {
        let findings = scan("f(a,b)", only(RuleId::PyCommaSpacing));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].column, 5);

        assert!(scan("f(a, b)", only(RuleId::PyCommaSpacing)).is_empty());
        assert!(scan("t = (1,)", only(RuleId::PyCommaSpacing)).is_empty());
    }

    #[rstest]
    #[case("print(\"hello\")", true)]
    #[case("    print(value)", true)]
    #[case("pprint(value)", false)]
    #[case("sprint()", false)]
    fn py_print_cases(#[case] line: &str, #[case] fires: bool) {
        assert_eq!(scan(line, only(RuleId::PyPrint)).len(), usize::from(fires), "line: {line}");
    }

    #[rstest]
    #[case("[1, 2,]", true)]
    #[case("{\"a\": 1,}", true)]
    #[case("  \"last\": true,", false)]
    #[case("[1, 2]", false)]
    fn json_trailing_comma_cases(#[case] line: &str, #[case] fires: bool) {
        assert_eq!(
            scan(line, only(RuleId::JsonTrailingComma)).len(),
            usize::from(fires),
            "line: {line}"
        );
    }

    #[test]
    fn empty_document_yields_no_findings() {
        assert!(scan("", RuleSet::all()).is_empty());
    }

    #[test]
    fn empty_rule_set_yields_no_findings() {
        assert!(scan("var x = 1;   \nconsole.log(x)", RuleSet::none()).is_empty());
    }

    #[test]
    fn findings_ascend_by_line() {
        let text = "clean line\nvar a = 1;\nclean again\nconsole.log(a);  \n";
        let findings = scan(text, RuleSet::all());

        assert!(!findings.is_empty());
        for pair in findings.windows(2) {
            assert!(pair[0].line <= pair[1].line);
        }
    }

    #[test]
    fn same_line_findings_follow_registry_order() {
        // Triggers both no-var (rule 0) and max-line-length (rule 3)
        let line = format!("var padding = \"{}\";", "x".repeat(110));
        let rules: RuleSet = [RuleId::MaxLineLength, RuleId::NoVar].into_iter().collect();
        let findings = scan(&line, rules);

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].rule, RuleId::NoVar);
        assert_eq!(findings[1].rule, RuleId::MaxLineLength);
        assert_eq!(findings[0].line, findings[1].line);
    }

    #[test]
    fn scan_is_idempotent() {
        let text = "var x = 1;\nif (x == 1) { console.log(x); }\t\n";
        let first = scan(text, RuleSet::all());
        let second = scan(text, RuleSet::all());
        assert_eq!(first, second);
    }

    #[test]
    fn custom_line_length_threshold() {
        let options = ScanOptions { max_line_length: 10, ..Default::default() };
        let doc = SourceDocument::new("this line is well over ten characters");
        let findings = scan_lines(&doc, &only(RuleId::MaxLineLength), &options);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].column, 11);
    }

    #[test]
    fn rule_set_membership_and_parsing() {
        let mut set = RuleSet::none();
        assert!(set.is_empty());
        set.enable(RuleId::NoVar);
        set.enable(RuleId::NoConsole);
        assert_eq!(set.len(), 2);
        assert!(set.contains(RuleId::NoVar));
        set.disable(RuleId::NoVar);
        assert!(!set.contains(RuleId::NoVar));

        let parsed = RuleSet::parse("no-var, no-console,max-line-length").unwrap();
        assert_eq!(parsed.len(), 3);
        assert!(parsed.contains(RuleId::MaxLineLength));

        let err = RuleSet::parse("no-var,bogus-rule").unwrap_err();
        assert!(matches!(err, LintError::Pattern { .. }));
    }

    #[test]
    fn rule_set_iterates_in_registry_order() {
        let set: RuleSet = [RuleId::NoPanic, RuleId::NoVar, RuleId::MaxLineLength]
            .into_iter()
            .collect();
        let order: Vec<_> = set.iter().collect();
        assert_eq!(order, vec![RuleId::NoVar, RuleId::MaxLineLength, RuleId::NoPanic]);
    }

    #[test]
    fn language_scoped_sets() {
        let js = RuleSet::for_language(Language::JavaScript);
        assert!(js.contains(RuleId::NoVar));
        assert!(js.contains(RuleId::MaxLineLength));
        assert!(!js.contains(RuleId::NoUnwrap));

        let rust = RuleSet::for_language(Language::Rust);
        assert!(rust.contains(RuleId::NoUnwrap));
        assert!(rust.contains(RuleId::NoTrailingWhitespace));
        assert!(!rust.contains(RuleId::NoConsole));

        // Plain text gets only the universal rules
        let plain = RuleSet::for_language(Language::Plain);
        assert_eq!(plain.len(), 3);
        assert!(plain.contains(RuleId::MaxLineLength));
        assert!(plain.contains(RuleId::NoTrailingWhitespace));
        assert!(plain.contains(RuleId::NoMixedIndentation));
    }
}
