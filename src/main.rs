use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use to_api::{ApiConverter, ConverterConfig, Include, Includes, document};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "to-api")]
#[command(about = "Render value documents the way API clients see them")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a document, expanding the requested relations
    Render {
        file: PathBuf,
        /// Include request as JSON, e.g. '"comments"' or '{"comments":"author"}'
        #[arg(long = "include")]
        includes: Vec<String>,
        #[arg(long, default_value_t = ConverterConfig::DEFAULT_MAX_DEPTH)]
        max_depth: usize,
        #[arg(long)]
        compact: bool,
    },
    /// Print the canonical routing table for a set of includes
    Normalize {
        #[arg(long = "include")]
        includes: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            file,
            includes,
            max_depth,
            compact,
        } => render(&file, &includes, max_depth, compact),
        Command::Normalize { includes } => {
            let includes = parse_includes(&includes)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&Includes::normalize(&includes))?
            );
            Ok(())
        }
    }
}

fn render(file: &Path, includes: &[String], max_depth: usize, compact: bool) -> Result<()> {
    let value = document::load_file(file)
        .with_context(|| format!("failed to load document {}", file.display()))?;
    let includes = parse_includes(includes)?;

    let converter = ApiConverter::with_config(ConverterConfig::new().max_depth(max_depth));
    let api = converter
        .convert(&value, &includes)
        .context("conversion failed")?;

    let out = if compact {
        serde_json::to_string(&api)?
    } else {
        serde_json::to_string_pretty(&api)?
    };
    println!("{}", out);
    Ok(())
}

// Bare words are accepted as relation names so `--include comments` works
// without shell quoting.
fn parse_includes(raw: &[String]) -> Result<Vec<Include>> {
    raw.iter()
        .map(|arg| match serde_json::from_str::<serde_json::Value>(arg) {
            Ok(json) => Ok(Include::from_json(&json)),
            Err(_) if !arg.trim_start().starts_with(['{', '[', '"']) => {
                Ok(Include::Name(arg.clone()))
            }
            Err(e) => Err(e).with_context(|| format!("invalid --include '{}'", arg)),
        })
        .collect()
}
