//! Tree reconciliation for the Dockerfile mirror.
//!
//! This library converges two filesystem-encoded trees (versions and pins)
//! to the state implied by the catalog, and derives a pinned digest index
//! from the result. Key concepts:
//!
//! - **Expected state**: the set of directive files the catalog (and, for
//!   pins, the current versions tree) implies should exist.
//! - **Existing state**: the directive files actually on disk.
//! - **Convergence**: removing orphans, pruning emptied directories, and
//!   creating missing entries until the two match.
//!
//! # Invariants
//!
//! - All operations are idempotent: a second run with no external change
//!   performs no work.
//! - Expected state is pure computation, finished before any I/O starts.
//! - An existing entry is never rewritten. External actors advance tags in
//!   version files and append digests to pin files; both survive every run.
//! - Orphan removal happens before creation, so a retired entry's stale
//!   directories never shadow a freshly created one.

mod codec;
mod error;
mod harvest;
mod pins;
mod tree;
mod versions;

pub use codec::{sanitize, PinKey, VersionKey};
pub use error::SyncError;
pub use harvest::{harvest_digests, DigestIndex, HarvestReport};
pub use pins::reconcile_pins;
pub use tree::{list_directive_files, reconcile, SyncOutcome, DIRECTIVE_FILE};
pub use versions::reconcile_versions;
