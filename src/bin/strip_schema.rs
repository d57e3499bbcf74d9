//! Runtime Schema CLI
//!
//! Writes schema.json from schema-full.json by stripping editorial keys.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use r3xa_schemas::strip::to_runtime_json;
use r3xa_schemas::{
    check_freshness, strip_file, Freshness, KeyStripper, SchemaDocument, ToolsConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "strip-schema")]
#[command(about = "Generate schema.json from schema-full.json by stripping non-runtime keys")]
struct Cli {
    /// Input schema path [default: schema-full.json]
    source: Option<PathBuf>,

    /// Output schema path [default: schema.json]
    output: Option<PathBuf>,

    /// Configuration file layered over r3xa.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Compare with the existing output instead of writing it
    #[arg(long)]
    check: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ToolsConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    let source = cli.source.unwrap_or(config.paths.schema_full);
    let output = cli.output.unwrap_or(config.paths.schema_runtime);
    let stripper = KeyStripper::from_config(&config.strip);

    if cli.check {
        let doc = SchemaDocument::load(&source)?;
        let expected = to_runtime_json(&stripper.strip(&doc.content).value)?;
        let freshness = check_freshness(&output, &expected)?;
        match &freshness {
            Freshness::Stale { diff } => eprint!("{}", diff),
            Freshness::UpToDate => println!("{} is up to date", output.display()),
        }
        freshness.into_result(&output)?;
        return Ok(());
    }

    let report = strip_file(&source, &output, &stripper)?;
    println!("{}", report.summary());
    Ok(())
}
