//! Digest harvesting.
//!
//! Walks the pins tree and rebuilds the canonical digest index from scratch.
//! Only entries an external actor has already pinned (directive carries a
//! `@sha256:` digest) are included; the rest are counted as skipped and
//! picked up on a later run.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use mirror_reference::Reference;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::tree;

/// Nested digest index: image → tag → platform → pinned reference string.
///
/// Backed by `BTreeMap` throughout, so serialization order is fixed and the
/// output is byte-stable given identical input state.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct DigestIndex(BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>);

impl DigestIndex {
    /// Inserts one pinned reference at `[image][tag][platform]`.
    pub fn insert(&mut self, image: &str, tag: &str, platform: &str, reference: String) {
        self.0
            .entry(image.to_string())
            .or_default()
            .entry(tag.to_string())
            .or_default()
            .insert(platform.to_string(), reference);
    }

    /// Looks up a pinned reference.
    #[must_use]
    pub fn get(&self, image: &str, tag: &str, platform: &str) -> Option<&str> {
        self.0
            .get(image)?
            .get(tag)?
            .get(platform)
            .map(String::as_str)
    }

    /// Number of images with at least one pinned entry.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.0.len()
    }

    /// Total number of pinned (image, tag, platform) entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.0
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    /// Serializes the index with stable key ordering.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Result of one harvest pass.
#[derive(Debug, Default)]
pub struct HarvestReport {
    /// The rebuilt index.
    pub index: DigestIndex,
    /// Entries parsed but not yet pinned with a digest.
    pub skipped: usize,
}

impl HarvestReport {
    /// Total pinned entries in the index.
    #[must_use]
    pub fn pinned(&self) -> usize {
        self.index.entry_count()
    }
}

/// Rebuilds the digest index from the pins tree.
///
/// The index is never merged with a previous one; each run starts empty. A
/// missing pins root yields an empty report.
pub fn harvest_digests(pins_root: &Path) -> Result<HarvestReport, SyncError> {
    let mut report = HarvestReport::default();

    for path in tree::list_directive_files(pins_root)? {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable pin file, skipping");
                continue;
            }
        };
        let Some(reference) = Reference::first_in(&content) else {
            debug!(path = %path.display(), "no reference in pin file, ignoring");
            continue;
        };
        match reference.pinned() {
            Some(pinned) => {
                report.index.insert(
                    &reference.image,
                    reference.tag_or_default(),
                    reference.platform_or_default(),
                    pinned,
                );
            }
            None => {
                debug!(path = %path.display(), "awaiting digest, skipping");
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}
