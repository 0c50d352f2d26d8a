//! CLI commands.

mod digests;
mod pins;
mod versions;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mirror_catalog::Catalog;

use crate::config::Layout;
use crate::output::OutputFormat;

/// Keep a Dockerfile-encoded image mirror in sync with its catalog.
#[derive(Debug, Parser)]
#[command(name = "mirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (text or json).
    #[arg(long, global = true, default_value = "text")]
    format: String,

    /// Project root holding images.json and the _dockerfiles trees.
    #[arg(long, global = true, env = "MIRROR_ROOT", default_value = ".")]
    root: PathBuf,

    /// Catalog file (defaults to <root>/images.json).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reconcile the versions tree against the catalog.
    GenerateVersions(versions::GenerateVersionsCommand),

    /// Reconcile the pins tree against the catalog and versions tree.
    GeneratePins(pins::GeneratePinsCommand),

    /// Rebuild the digest index from the pins tree.
    HarvestDigests(digests::HarvestDigestsCommand),
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let format = match self.format.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        };

        let ctx = CommandContext {
            layout: Layout::new(self.root),
            catalog: self.catalog,
            format,
        };

        match self.command {
            Commands::GenerateVersions(cmd) => cmd.run(ctx),
            Commands::GeneratePins(cmd) => cmd.run(ctx),
            Commands::HarvestDigests(cmd) => cmd.run(ctx),
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub layout: Layout,
    pub catalog: Option<PathBuf>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Resolve the catalog path, preferring the flag over the layout default.
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog
            .clone()
            .unwrap_or_else(|| self.layout.catalog_path())
    }

    /// Load the catalog. Failure here is the fatal configuration case.
    pub fn load_catalog(&self) -> Result<Catalog> {
        Ok(Catalog::load(&self.catalog_path())?)
    }
}
