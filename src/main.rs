//! keydiff command-line interface.
//!
//! Parses the two inputs, computes the three-bucket diff and prints it.
//! Exits with 0 when the inputs match, 1 when they differ and 2 on error.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use keydiff::{
    diff, format_diff, parse_file, parse_stdin, Diff, FormatHint, KeydiffError, Node,
    OutputFormat, OutputOptions, ParseError,
};
use std::path::Path;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// keydiff - structural diff for JSON-shaped data
///
/// Reports keys added to ACTUAL, keys removed from EXPECTED, and values
/// that changed between them.
#[derive(Parser)]
#[command(name = "keydiff")]
#[command(version)]
#[command(about = "Three-bucket structural diff for JSON, YAML and TOML", long_about = None)]
struct Cli {
    /// Expected input (file path, or - for stdin)
    #[arg(value_name = "EXPECTED")]
    expected: String,

    /// Actual input (file path, or - for stdin)
    #[arg(value_name = "ACTUAL")]
    actual: String,

    /// Treat both arguments as inline JSON text instead of paths
    #[arg(long)]
    text: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "terminal")]
    format: OutputFormatArg,

    /// Show full values instead of previews
    #[arg(long)]
    show_values: bool,

    /// Maximum length for displayed values
    #[arg(long, default_value = "80")]
    max_value_length: usize,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (only show changes, suppress summary)
    #[arg(short, long)]
    quiet: bool,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// The added/removed/changed object as JSON
    Json,
    /// Plain text (no colors)
    Plain,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn load(arg: &str) -> Result<Node, ParseError> {
    if arg == "-" {
        parse_stdin(FormatHint::Auto)
    } else {
        parse_file(Path::new(arg))
    }
}

/// Loads both sides and diffs them. Scalars are rejected by `diff`.
fn compare(cli: &Cli) -> Result<Diff, KeydiffError> {
    if cli.text {
        return Ok(diff(cli.expected.as_str(), cli.actual.as_str())?);
    }

    if cli.expected == "-" && cli.actual == "-" {
        return Err(KeydiffError::ConfigError {
            message: "only one input can be read from stdin".to_string(),
        });
    }

    let expected = load(&cli.expected)?;
    let actual = load(&cli.actual)?;
    Ok(diff(expected, actual)?)
}

fn render(cli: &Cli, result: &Diff) -> Result<String, KeydiffError> {
    let output_options = OutputOptions {
        show_values: cli.show_values,
        max_value_length: cli.max_value_length,
    };

    let output_format: OutputFormat = cli.format.into();
    Ok(format_diff(result, &output_format, &output_options)?)
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let result = compare(&cli).context("Failed to compare inputs")?;
    let output = render(&cli, &result).context("Failed to format diff output")?;

    if !cli.quiet {
        println!("{}", output);
    } else {
        for line in output.lines() {
            if !line.starts_with("Summary:") && !line.trim().is_empty() {
                println!("{}", line);
            }
        }
    }

    if result.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}
