//! Deterministic mapping from reference coordinates to tree paths.
//!
//! Both synchronizers and the harvester go through this codec, so all three
//! agree on tree shape. Sanitization substitutes every filesystem-unsafe
//! character with `_`, consistently for image names, platforms, and tags.

use std::path::PathBuf;

use mirror_catalog::Strategy;

use crate::tree::DIRECTIVE_FILE;

/// Converts a raw value into a filesystem-safe path segment.
///
/// Total and stable: the same input always yields the same segment.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '/' | ':' | '.' => '_',
            c => c,
        })
        .collect()
}

/// Coordinates of one versions-tree entry.
///
/// Carries the unsanitized values; sanitization happens only when the key is
/// turned into a path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionKey {
    pub strategy: Strategy,
    pub image: String,
    pub platform: String,
}

impl VersionKey {
    /// Path of this entry's directive file, relative to the versions root.
    #[must_use]
    pub fn rel_path(&self) -> PathBuf {
        PathBuf::from(self.strategy.as_str())
            .join(sanitize(&self.image))
            .join(sanitize(&self.platform))
            .join(DIRECTIVE_FILE)
    }
}

/// Coordinates of one pins-tree entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinKey {
    pub image: String,
    pub platform: String,
    pub tag: String,
}

impl PinKey {
    /// Path of this entry's directive file, relative to the pins root.
    #[must_use]
    pub fn rel_path(&self) -> PathBuf {
        PathBuf::from(sanitize(&self.image))
            .join(sanitize(&self.platform))
            .join(sanitize(&self.tag))
            .join(DIRECTIVE_FILE)
    }
}
