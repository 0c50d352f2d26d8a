//! `mirror harvest-digests` - rebuild the digest index.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mirror_reconcile::harvest_digests;

use super::CommandContext;
use crate::output;

#[derive(Debug, Args)]
pub struct HarvestDigestsCommand {
    /// Output file (defaults to <root>/digests.json).
    #[arg(long)]
    output: Option<PathBuf>,
}

impl HarvestDigestsCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let report = harvest_digests(&ctx.layout.pins_root())?;

        let path = self.output.unwrap_or_else(|| ctx.layout.digests_path());
        let json = report
            .index
            .to_json_pretty()
            .context("failed to serialize digest index")?;
        fs::write(&path, json + "\n")
            .with_context(|| format!("failed to write digest index to {}", path.display()))?;

        output::print_harvest_summary(ctx.format, &report, &path);
        Ok(())
    }
}
