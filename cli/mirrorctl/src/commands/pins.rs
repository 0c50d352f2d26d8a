//! `mirror generate-pins` - reconcile the pins tree.

use anyhow::Result;
use clap::Args;
use mirror_reconcile::reconcile_pins;

use super::CommandContext;
use crate::output;

#[derive(Debug, Args)]
pub struct GeneratePinsCommand {}

impl GeneratePinsCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let catalog = ctx.load_catalog()?;
        let outcome = reconcile_pins(
            &catalog,
            &ctx.layout.versions_root(),
            &ctx.layout.pins_root(),
        )?;
        output::print_sync_summary(ctx.format, "generate-pins", "pin", &outcome);
        Ok(())
    }
}
