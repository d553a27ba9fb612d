use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use schemaform_core::{
    compute_changes, default_value, matches_search, normalize, parse_path, NormalizeOptions,
    SchemaBundle, Segment, UiHintMap,
};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "schemaform")]
#[command(about = "Schema-driven configuration engine: normalize schemas, diff snapshots, synthesize defaults")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a JSON Schema into the engine's canonical shape
    Normalize {
        /// Input schema file (plain schema or a full schema bundle)
        input: PathBuf,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Dot-joined path the subtree lives at (prefixes unsupported paths)
        #[arg(long, default_value = "")]
        base_path: String,

        /// Max traversal depth before subtrees are left unnormalized
        #[arg(long, default_value_t = 50)]
        max_depth: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Diff two configuration snapshots into leaf-level change records
    Diff {
        /// Original document file
        original: PathBuf,

        /// Edited document file
        current: PathBuf,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Synthesize the default value for a schema node
    Defaults {
        /// Input schema file (plain schema or a full schema bundle)
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// List schema paths matching a free-text term
    Search {
        /// Input schema file (plain schema or a full schema bundle)
        input: PathBuf,

        /// Case-insensitive search term
        term: String,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing — logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Normalize {
            input,
            output,
            base_path,
            max_depth,
            format,
        } => {
            let (schema, _) = load_schema(&input)?;
            let options = NormalizeOptions { max_depth };
            let result = normalize(&schema, &parse_path(&base_path), &options);

            for path in &result.unsupported_paths {
                eprintln!("Warning: unsupported schema construct at '{}'", path);
            }

            write_json(&result.schema, output.as_ref(), format)?;
        }
        Commands::Diff {
            original,
            current,
            output,
            format,
        } => {
            let original = read_json(&original)?;
            let current = read_json(&current)?;

            let mut changes = compute_changes(&original, &current);
            // Union-of-keys order is not contractual; sort for stable output.
            changes.sort_by(|a, b| a.path.cmp(&b.path));

            write_json(&changes, output.as_ref(), format)?;
        }
        Commands::Defaults { input, format } => {
            let (schema, _) = load_schema(&input)?;
            let result = normalize(&schema, &[], &NormalizeOptions::default());
            write_json(&default_value(&result.schema), None, format)?;
        }
        Commands::Search { input, term } => {
            let (schema, hints) = load_schema(&input)?;
            let result = normalize(&schema, &[], &NormalizeOptions::default());

            let mut matches = Vec::new();
            let mut path = Vec::new();
            collect_matches(&result.schema, &hints, &mut path, &term, &mut matches);
            let mut out = BufWriter::new(io::stdout());
            for matched in matches {
                writeln!(out, "{}", matched).context("Failed to write match")?;
            }
        }
    }

    Ok(())
}

/// Walk `properties` recursively and record the dot-joined path of every
/// node that matches the term.
fn collect_matches(
    schema: &Value,
    hints: &UiHintMap,
    path: &mut Vec<Segment>,
    term: &str,
    matches: &mut Vec<String>,
) {
    let Some(Value::Object(properties)) = schema.get("properties") else {
        return;
    };
    for (key, child) in properties {
        path.push(Segment::Key(key.clone()));
        if matches_search(key, child, hints, path, term) {
            matches.push(schemaform_core::path_key(path));
        }
        collect_matches(child, hints, path, term, matches);
        path.pop();
    }
}

/// Read a schema file that is either a full gateway bundle (with `uiHints`)
/// or a bare schema tree.
fn load_schema(path: &PathBuf) -> Result<(Value, UiHintMap)> {
    let value = read_json(path)?;
    if value.get("schema").is_some() && value.get("uiHints").is_some() {
        let bundle: SchemaBundle = serde_json::from_value(value)
            .with_context(|| format!("Failed to parse schema bundle from: {}", path.display()))?;
        return Ok((bundle.schema, bundle.ui_hints));
    }
    Ok((value, UiHintMap::new()))
}

fn read_json(path: &PathBuf) -> Result<Value> {
    let file =
        File::open(path).with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse JSON from: {}", path.display()))
}

fn write_json<T: serde::Serialize>(
    val: &T,
    path: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
        }
    }

    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;

    Ok(())
}
