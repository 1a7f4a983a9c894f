//! linelint CLI - command-line interface for line-oriented style checks
//!
//! Translates flags into checker configuration, renders reports, and decides
//! the process exit code: 0 for a clean (or non-blocking) run, 1 when any
//! error-severity finding is present, 2 for operational failures such as
//! unreadable files or invalid flag values.

use clap::{Parser, Subcommand, ValueEnum};
use linelint::{
    CheckOptions, Checker, FileReport, Language, LintResult, OutputFormat, ReportFormatter,
    ReportOptions, RuleId, RuleSet, ScanReport, Severity, SourceDocument, REGISTRY,
};
use std::io::Read;
use std::path::PathBuf;
use std::process;

/// linelint - line-oriented style checking
#[derive(Parser)]
#[command(name = "linelint")]
#[command(version = "0.1.0")]
#[command(about = "Line-oriented lint tool applying stateless per-line style checks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check files or directories for style findings
    Check {
        /// Paths to check (files or directories; `-` reads stdin)
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Minimum severity level to report
        #[arg(short, long, value_enum)]
        severity: Option<SeverityArg>,

        /// Comma-separated list of rules to enable (default: all)
        #[arg(long)]
        rules: Option<String>,

        /// Comma-separated list of rules to disable
        #[arg(long)]
        skip: Option<String>,

        /// Character limit for the max-line-length rule
        #[arg(long)]
        max_line_length: Option<usize>,

        /// Additional exclude glob patterns
        #[arg(long, action = clap::ArgAction::Append)]
        exclude: Vec<String>,

        /// Force a language instead of detecting from file extensions
        #[arg(short, long)]
        language: Option<Language>,

        /// Maximum number of findings to report
        #[arg(long)]
        max_findings: Option<usize>,

        /// Maximum number of files to check
        #[arg(long)]
        max_files: Option<usize>,

        /// Disable parallel scanning
        #[arg(long)]
        no_parallel: bool,

        /// Abort on the first file that fails to read or decode
        #[arg(long)]
        fail_fast: bool,
    },

    /// List the registered rules
    Rules {
        /// Only list rules that apply to the given language
        #[arg(short, long)]
        language: Option<Language>,
    },

    /// Explain what a specific rule does
    Explain {
        /// Rule name to explain
        rule: String,
    },
}

#[derive(Copy, Clone, ValueEnum, PartialEq)]
enum OutputFormatArg {
    Human,
    Json,
    Github,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Github => OutputFormat::GitHub,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum SeverityArg {
    Hint,
    Info,
    Warning,
    Error,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Hint => Severity::Hint,
            SeverityArg::Info => Severity::Info,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Error => Severity::Error,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run_command(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    }
}

fn run_command(cli: Cli) -> LintResult<i32> {
    match cli.command {
        Commands::Check {
            paths,
            format,
            severity,
            rules,
            skip,
            max_line_length,
            exclude,
            language,
            max_findings,
            max_files,
            no_parallel,
            fail_fast,
        } => run_check(CheckArgs {
            paths,
            format,
            severity,
            rules,
            skip,
            max_line_length,
            exclude,
            language,
            max_findings,
            max_files,
            no_parallel,
            fail_fast,
            use_colors: !cli.no_color,
        }),
        Commands::Rules { language } => run_rules(language),
        Commands::Explain { rule } => run_explain(&rule),
    }
}

struct CheckArgs {
    paths: Vec<PathBuf>,
    format: OutputFormatArg,
    severity: Option<SeverityArg>,
    rules: Option<String>,
    skip: Option<String>,
    max_line_length: Option<usize>,
    exclude: Vec<String>,
    language: Option<Language>,
    max_findings: Option<usize>,
    max_files: Option<usize>,
    no_parallel: bool,
    fail_fast: bool,
    use_colors: bool,
}

fn run_check(args: CheckArgs) -> LintResult<i32> {
    let mut rule_set = match &args.rules {
        Some(list) => RuleSet::parse(list)?,
        None => RuleSet::all(),
    };
    if let Some(list) = &args.skip {
        for id in RuleSet::parse(list)?.iter() {
            rule_set.disable(id);
        }
    }

    let mut builder = Checker::builder().rules(rule_set);
    if let Some(limit) = args.max_line_length {
        builder = builder.max_line_length(limit);
    }
    let checker = builder.build();

    let report = if args.paths.len() == 1 && args.paths[0] == PathBuf::from("-") {
        check_stdin(&checker, args.language)?
    } else {
        let paths = if args.paths.is_empty() { vec![PathBuf::from(".")] } else { args.paths.clone() };
        let options = CheckOptions {
            parallel: !args.no_parallel,
            fail_fast: args.fail_fast,
            max_files: args.max_files,
            exclude: args.exclude.clone(),
            language_override: args.language,
        };
        checker.check_paths(&paths, &options)?
    };

    let formatter = ReportFormatter::new(ReportOptions {
        use_colors: args.use_colors && args.format == OutputFormatArg::Human,
        min_severity: args.severity.map(Into::into),
        max_findings: args.max_findings,
    });
    let formatted = formatter.format_report(&report, args.format.into())?;
    print!("{formatted}");

    Ok(if report.has_blocking() { 1 } else { 0 })
}

/// Scan stdin as a single pseudo-file named `<stdin>`
fn check_stdin(checker: &Checker, language: Option<Language>) -> LintResult<ScanReport> {
    let start = std::time::Instant::now();
    let mut bytes = Vec::new();
    std::io::stdin()
        .read_to_end(&mut bytes)
        .map_err(|e| linelint::LintError::io("<stdin>", e))?;

    let document = SourceDocument::from_bytes(&bytes)?;
    let language = language.unwrap_or(Language::Plain);
    let findings = checker.scan_source(document.text(), language);

    let mut report = ScanReport::new();
    report.add_file(FileReport::new(PathBuf::from("<stdin>"), document.line_count(), findings));
    report.set_duration(start.elapsed().as_millis() as u64);
    Ok(report)
}

fn run_rules(language: Option<Language>) -> LintResult<i32> {
    for spec in REGISTRY.iter() {
        if let Some(lang) = language {
            if !spec.scope.applies_to(lang) {
                continue;
            }
        }
        println!(
            "{:<24} {:<10} [{}] {}",
            spec.id.name(),
            spec.scope.as_str(),
            spec.severity.as_str(),
            spec.summary
        );
    }
    Ok(0)
}

fn run_explain(rule: &str) -> LintResult<i32> {
    match RuleId::from_name(rule) {
        Some(id) => {
            let spec = id.spec();
            println!("Rule: {}", spec.id.name());
            println!("Scope: {}", spec.scope.as_str());
            println!("Severity: {}", spec.severity.as_str());
            println!();
            println!("{}", spec.summary);
            Ok(0)
        }
        None => {
            eprintln!("Unknown rule '{rule}'");
            eprintln!();
            eprintln!("Available rules:");
            for spec in REGISTRY.iter() {
                eprintln!("  {}", spec.id.name());
            }
            Ok(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();
}
