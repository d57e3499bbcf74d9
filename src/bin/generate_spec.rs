//! Specification CLI
//!
//! Renders docs/specification.md from schema-full.json.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use r3xa_schemas::{check_freshness, generate_spec_file, render_spec_file, Freshness, ToolsConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "generate-spec")]
#[command(about = "Generate docs/specification.md from schema-full.json")]
struct Cli {
    /// Path to schema JSON [default: schema-full.json]
    schema: Option<PathBuf>,

    /// Output markdown path [default: docs/specification.md]
    output: Option<PathBuf>,

    /// Configuration file layered over r3xa.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail on sub-schemas that cannot be classified
    #[arg(long)]
    strict: bool,

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
    let mut config = ToolsConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    config.render.strict |= cli.strict;
    let schema = cli.schema.unwrap_or(config.paths.schema_full);
    let output = cli.output.unwrap_or(config.paths.specification);

    if cli.check {
        let expected = render_spec_file(&schema, &config.render)?;
        let freshness = check_freshness(&output, &expected)?;
        match &freshness {
            Freshness::Stale { diff } => eprint!("{}", diff),
            Freshness::UpToDate => println!("{} is up to date", output.display()),
        }
        freshness.into_result(&output)?;
        return Ok(());
    }

    let written = generate_spec_file(&schema, &output, &config.render)?;
    println!("Specification written to {}", written.to_string_lossy().replace('\\', "/"));
    Ok(())
}
