//! `jsonify` CLI: assemble JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Merge JSON files into one object (later keys win, in place)
//! jsonify merge defaults.json overrides.json
//!
//! # Merge stdin under a key, pretty-printed
//! echo '{"a":1}' | jsonify --pretty merge --under config
//!
//! # Build an object from KEY=VALUE pairs (VALUE is JSON if it parses, else text)
//! jsonify object name=Alice age=30 tags='["x","y"]' missing
//!
//! # Build an array, or store one under a key
//! jsonify array 1 two '{"three":3}'
//! jsonify --unwrap-single array only --under item
//!
//! # Options from a file, output to a file, debug logging on stderr
//! jsonify --options opts.json -o out.json -v object a=1
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jsonify::{Builder, BuilderOptions, Value};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jsonify",
    version,
    about = "Build JSON documents from files and command-line values"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Indent the output with two spaces per level
    #[arg(long, global = true)]
    pretty: bool,

    /// Parse the output back before writing it
    #[arg(long, global = true)]
    verify: bool,

    /// Store a single-element array under --under KEY as the element itself
    #[arg(long, global = true)]
    unwrap_single: bool,

    /// JSON file with builder options ({"verify":..,"pretty":..,"unwrap_single_item":..})
    #[arg(long, global = true, value_name = "FILE")]
    options: Option<String>,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long, global = true, value_name = "FILE")]
    output: Option<String>,

    /// Log builder activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge JSON documents, in order, into one
    Merge {
        /// Input files (reads from stdin if omitted)
        files: Vec<String>,
        /// Nest the merged result under this key
        #[arg(long, value_name = "KEY")]
        under: Option<String>,
    },
    /// Build an object from KEY=VALUE pairs
    Object {
        /// KEY=VALUE pairs; a bare KEY stores null
        pairs: Vec<String>,
    },
    /// Build an array from values
    Array {
        /// Values, parsed as JSON when valid and kept as text otherwise
        #[arg(required = true)]
        values: Vec<String>,
        /// Store the array under this key instead of at the top level
        #[arg(long, value_name = "KEY")]
        under: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = resolve_options(&cli)?;
    debug!(?options, "resolved builder options");
    let mut json = Builder::with_options(options);

    match cli.command {
        Commands::Merge { files, under } => {
            let documents = read_documents(&files)?;
            debug!(documents = documents.len(), under = ?under, "merging documents");
            match under {
                Some(key) => {
                    json.nest(key, |json| {
                        for (_, text) in &documents {
                            json.ingest(text)?;
                        }
                        Ok(())
                    })
                    .context("Failed to merge documents")?;
                }
                None => {
                    for (name, text) in &documents {
                        json.ingest(text)
                            .with_context(|| format!("Failed to merge {}", name))?;
                    }
                }
            }
        }
        Commands::Object { pairs } => {
            for pair in &pairs {
                let (key, value) = match pair.split_once('=') {
                    Some((key, raw)) => (key, parse_value(raw)),
                    None => (pair.as_str(), Value::Null),
                };
                json.store(key, value)
                    .with_context(|| format!("Failed to store '{}'", key))?;
            }
        }
        Commands::Array { values, under } => {
            let parsed = values.iter().map(|raw| parse_value(raw));
            match under {
                Some(key) => {
                    json.nest_each(key, parsed, |value| value)
                        .context("Failed to build array")?;
                }
                None => {
                    json.append_all(parsed).context("Failed to build array")?;
                }
            }
        }
    }

    let compiled = json.compile().context("Failed to compile document")?;
    write_output(cli.output.as_deref(), &compiled)?;
    Ok(())
}

/// Install a stderr subscriber. `-v` forces debug; otherwise `RUST_LOG` is
/// honored, falling back to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Options from `--options FILE` (or defaults), with every flag given on the
/// command line switched on top.
fn resolve_options(cli: &Cli) -> Result<BuilderOptions> {
    let base = match cli.options.as_deref() {
        Some(path) => {
            let text = read_input(Some(path))?;
            BuilderOptions::from_json(&text)
                .with_context(|| format!("Invalid options file: {}", path))?
        }
        None => BuilderOptions::default(),
    };
    Ok(base
        .verify(base.verify || cli.verify)
        .pretty(base.pretty || cli.pretty)
        .unwrap_single_item(base.unwrap_single_item || cli.unwrap_single))
}

/// A command-line value: JSON when it parses, plain text otherwise.
fn parse_value(raw: &str) -> Value {
    jsonify::parse(raw).unwrap_or_else(|_| Value::from(raw))
}

/// Read every named file, or stdin when the list is empty. Returns
/// `(name, text)` pairs in order.
fn read_documents(files: &[String]) -> Result<Vec<(String, String)>> {
    if files.is_empty() {
        return Ok(vec![("<stdin>".to_string(), read_input(None)?)]);
    }
    files
        .iter()
        .map(|path| Ok((path.clone(), read_input(Some(path))?)))
        .collect()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
