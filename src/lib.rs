//! Sita: simple inline text annotation.
//!
//! Sita converts between an annotated-text document (plain text, labeled
//! character spans, relations between spans and an entity type dictionary)
//! and a compact inline markup:
//!
//! ```text
//! [Elon Musk][T1, Person, member_of, T2] is a member of the [PayPal Mafia][T2, Organization].
//!
//! [Person]: https://example.com/Person
//! [Organization]: https://example.com/Organization
//! ```
//!
//! # Modules
//!
//! - [`document`]: Document types and JSON I/O
//! - [`parse`]: Inline markup → document
//! - [`generate`]: Document → inline markup
//! - [`resolve`]: Span conflict resolution and relation filtering
//! - [`entity_types`]: Entity type definition blocks
//! - [`error`]: Error types for sita operations

pub mod document;
pub mod entity_types;
pub mod error;
pub mod generate;
pub mod parse;
pub mod resolve;
pub mod token;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub use error::{GenerateError, SitaError};
pub use generate::{generate, generate_with_report};
pub use parse::{parse, parse_with_report};

/// Path shown in errors when reading standard input.
const STDIN_PATH: &str = "<stdin>";

/// The sita CLI application.
#[derive(Parser)]
#[command(name = "sita")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Parse inline markup into document JSON.
    Parse(ParseArgs),
    /// Generate inline markup from document JSON.
    Generate(GenerateArgs),
}

/// Arguments for the parse subcommand.
#[derive(clap::Args)]
struct ParseArgs {
    /// Markup file to parse ('-' or omitted reads stdin).
    input: Option<PathBuf>,

    /// Output file for the document JSON (stdout if omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed JSON.
    #[arg(long)]
    compact: bool,

    /// Print a report of annotations left as text to stderr ('text' or 'json').
    #[arg(long)]
    report: Option<String>,
}

/// Arguments for the generate subcommand.
#[derive(clap::Args)]
struct GenerateArgs {
    /// Document JSON file ('-' or omitted reads stdin).
    input: Option<PathBuf>,

    /// Output file for the markup (stdout if omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a report of dropped annotations to stderr ('text' or 'json').
    #[arg(long)]
    report: Option<String>,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    fn from_arg(value: &str) -> Result<Self, SitaError> {
        match value {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(SitaError::UnsupportedFormat(format!(
                "report format '{}' (supported: text, json)",
                other
            ))),
        }
    }
}

/// Run the sita CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), SitaError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Parse(args)) => run_parse(args),
        Some(Commands::Generate(args)) => run_generate(args),
        None => {
            println!("sita {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Simple inline text annotation.");
            println!();
            println!("Run 'sita --help' for usage information.");
            Ok(())
        }
    }
}

/// Installs a stderr subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when run from tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the parse subcommand.
fn run_parse(args: ParseArgs) -> Result<(), SitaError> {
    let report_format = args.report.as_deref().map(ReportFormat::from_arg).transpose()?;

    let source = read_input(args.input.as_deref())?;
    let (document, report) = parse::parse_with_report(&source);
    tracing::debug!(
        denotations = document.denotations.len(),
        relations = document.relations.len(),
        skipped = report.skipped.len(),
        "parsed markup"
    );

    match args.output.as_deref() {
        Some(path) if !args.compact => document::io_json::write_document_json(path, &document)?,
        output => {
            let path = output.unwrap_or_else(|| Path::new("<stdout>"));
            let json = if args.compact {
                serde_json::to_string(&document)
            } else {
                document::io_json::to_json_string(&document)
            }
            .map_err(|source| SitaError::DocumentJsonWrite {
                path: path.to_path_buf(),
                source,
            })?;
            write_output(output, &json)?;
        }
    }

    if let Some(format) = report_format {
        match format {
            ReportFormat::Text => eprint!("{}", report),
            ReportFormat::Json => eprintln!("{}", report_json(&report)?),
        }
    }

    Ok(())
}

/// Execute the generate subcommand.
fn run_generate(args: GenerateArgs) -> Result<(), SitaError> {
    let report_format = args.report.as_deref().map(ReportFormat::from_arg).transpose()?;

    let document = match input_path(args.input.as_deref()) {
        Some(path) => document::io_json::read_document_json(path)?,
        None => {
            let json = read_stdin()?;
            document::io_json::from_json_str(&json).map_err(|source| {
                SitaError::DocumentJsonParse {
                    path: PathBuf::from(STDIN_PATH),
                    source,
                }
            })?
        }
    };

    let (markup, report) = generate::generate_with_report(&document)?;
    if report.is_lossy() {
        tracing::warn!(
            dropped = report.issues.len(),
            "some annotations were left out of the markup"
        );
    }

    write_output(args.output.as_deref(), &markup)?;

    if let Some(format) = report_format {
        match format {
            ReportFormat::Text => {
                eprintln!("Generation report:");
                eprint!("{}", report);
            }
            ReportFormat::Json => eprintln!("{}", report_json(&report)?),
        }
    }

    Ok(())
}

/// Returns the file path to read, or `None` for stdin.
fn input_path(input: Option<&Path>) -> Option<&Path> {
    input.filter(|path| *path != Path::new("-"))
}

fn read_stdin() -> Result<String, SitaError> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn read_input(input: Option<&Path>) -> Result<String, SitaError> {
    match input_path(input) {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => read_stdin(),
    }
}

/// Writes `content` newline-terminated to `output`, or to stdout.
fn write_output(output: Option<&Path>, content: &str) -> Result<(), SitaError> {
    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            writeln!(file, "{}", content)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}

fn report_json<T: serde::Serialize>(report: &T) -> Result<String, SitaError> {
    serde_json::to_string_pretty(report).map_err(SitaError::ReportJson)
}
