//! # mirror-catalog
//!
//! The declarative source of truth: which images are mirrored, on which
//! platforms, and with which initial tags per version-tracking strategy.
//!
//! The catalog is an ordered JSON sequence (`images.json`); it is read-only
//! to the reconciliation engine. Loading is a plain file read plus
//! deserialization; a missing or unparsable catalog is the one fatal
//! configuration error in the system.

mod error;
mod types;

pub use error::CatalogError;
pub use types::{Catalog, ImageSpec, Strategy};
