//! Error handling and display for the CLI.

use colored::Colorize;
use mirror_catalog::CatalogError;
use mirror_reconcile::SyncError;

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    // Check for specific error types and provide hints
    if err.downcast_ref::<CatalogError>().is_some() {
        eprintln!(
            "\n{}",
            "Hint: Check that images.json exists at the project root, or pass --catalog.".yellow()
        );
    } else if err.downcast_ref::<SyncError>().is_some() {
        eprintln!(
            "\n{}",
            "Hint: Check filesystem permissions under the mirror root.".yellow()
        );
    }
}
