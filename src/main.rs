//! Command-line entry point for sql_diff

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use sql_diff::utils::logging;
use sql_diff::{parse, upgrade_sql, Database};

/// Generate a MySQL migration script from two schema dumps
#[derive(Parser, Debug)]
#[command(name = "sql_diff", version, about)]
struct Cli {
    /// Schema dump describing the currently deployed (origin) database
    origin: PathBuf,

    /// Schema dump describing the desired (target) database
    target: PathBuf,

    /// Write the migration script to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print both parsed models as JSON to stderr before diffing
    #[arg(long)]
    dump_models: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let origin = parse_dump(&cli.origin)?;
    let target = parse_dump(&cli.target)?;

    if cli.dump_models {
        eprintln!("{}", serde_json::to_string_pretty(&origin)?);
        eprintln!("{}", serde_json::to_string_pretty(&target)?);
    }

    let script = upgrade_sql(&origin, &target);
    tracing::info!(bytes = script.len(), "generated migration script");

    match &cli.output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            file.write_all(script.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => print!("{}", script),
    }

    Ok(())
}

fn parse_dump(path: &PathBuf) -> anyhow::Result<Database> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    parse(BufReader::new(file)).with_context(|| format!("failed to read {}", path.display()))
}
