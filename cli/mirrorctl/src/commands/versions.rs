//! `mirror generate-versions` - reconcile the versions tree.

use anyhow::Result;
use clap::Args;
use mirror_reconcile::reconcile_versions;

use super::CommandContext;
use crate::output;

#[derive(Debug, Args)]
pub struct GenerateVersionsCommand {}

impl GenerateVersionsCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let catalog = ctx.load_catalog()?;
        let outcome = reconcile_versions(&catalog, &ctx.layout.versions_root())?;
        output::print_sync_summary(ctx.format, "generate-versions", "version", &outcome);
        Ok(())
    }
}
