//! # mirror-reference
//!
//! Parsing and formatting of container-image reference directives.
//!
//! A directive file carries a single significant line of the form:
//!
//! ```text
//! FROM [--platform=<os/arch>] <image>[:<tag>][@sha256:<digest>] [AS <name>]
//! ```
//!
//! ## Design Principles
//!
//! - A file with no matching line is not an error; it yields no reference.
//!   Callers treat that as "not applicable" and move on.
//! - Absence is preserved: a missing platform or tag stays `None` in the
//!   parsed [`Reference`]. Defaults are applied only by callers that need a
//!   concrete value, through [`Reference::platform_or_default`] and
//!   [`Reference::tag_or_default`].
//! - Digests are validated strictly (64 lowercase hex characters); a line
//!   with a malformed digest is not a match.

mod error;
mod types;

pub use error::DigestError;
pub use types::{directive, Digest, Reference};

/// Platform assumed when a directive names none and a concrete value is
/// required.
pub const DEFAULT_PLATFORM: &str = "linux/amd64";

/// Tag assumed when a directive names none and a concrete value is required.
pub const DEFAULT_TAG: &str = "latest";
