use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use r3xa_schemas::strip::to_runtime_json;
use r3xa_schemas::{
    check_freshness, generate_spec_file, render_spec_file, strip_file, KeyStripper,
    SchemaDocument, ToolsConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build helpers for the R3XA schema artifacts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild schema.json and docs/specification.md from schema-full.json
    Regenerate {
        /// Project root holding schema-full.json
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Verify both artifacts are current without writing them
        #[arg(long)]
        check: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Regenerate { root, check } => regenerate(&root, check),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn regenerate(root: &Path, check: bool) -> anyhow::Result<()> {
    // Run from the project root so r3xa.toml and the banner's source path resolve there.
    std::env::set_current_dir(root)
        .with_context(|| format!("entering project root {}", root.display()))?;
    tracing::info!(root = %root.display(), check, "regenerating schema artifacts");

    let config = ToolsConfig::load().context("loading configuration")?;
    let source = config.paths.schema_full;
    let runtime = config.paths.schema_runtime;
    let spec = config.paths.specification;
    let stripper = KeyStripper::from_config(&config.strip);

    if check {
        let doc = SchemaDocument::load(&source)?;
        let artifacts = [
            (runtime, to_runtime_json(&stripper.strip(&doc.content).value)?),
            (spec, render_spec_file(&source, &config.render)?),
        ];

        let mut stale = Vec::new();
        for (path, expected) in &artifacts {
            if check_freshness(path, expected)?.is_stale() {
                tracing::warn!(path = %path.display(), "artifact out of date");
                println!("⚠️  {} is out of date", path.display());
                stale.push(path.display().to_string());
            } else {
                println!("✅ {} is up to date", path.display());
            }
        }
        if !stale.is_empty() {
            bail!("stale artifacts: {}; run `cargo xtask regenerate`", stale.join(", "));
        }
        return Ok(());
    }

    println!("🔧 Stripping {}", source.display());
    let report = strip_file(&source, &runtime, &stripper)?;
    println!("   {}", report.summary());

    println!("📝 Rendering specification");
    let written = generate_spec_file(&source, &spec, &config.render)?;
    println!("   Specification written to {}", written.display());
    tracing::info!(removed = report.removed, "regeneration complete");
    Ok(())
}
