//! Pin-tree synchronization.
//!
//! A pin exists for every (image, platform, tag) referenced either by the
//! catalog's initial tags or by a tag currently surfaced in the versions
//! tree. Newly created pins carry no digest; an external actor appends one
//! in place, and existing pins are never rewritten. Removal is keyed on
//! membership alone, so retiring an image from the catalog drops its whole
//! pin subtree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use mirror_catalog::Catalog;
use mirror_reference::{directive, Reference};
use tracing::{debug, warn};

use crate::codec::PinKey;
use crate::error::SyncError;
use crate::tree::{self, SyncOutcome};

/// Computes the expected pins tree from the catalog and the current
/// versions tree: absolute directive path → content.
fn expected_pins(
    catalog: &Catalog,
    versions_root: &Path,
    pins_root: &Path,
) -> Result<BTreeMap<PathBuf, String>, SyncError> {
    let mut expected = BTreeMap::new();

    // Every declared initial tag, across all three strategies.
    for spec in catalog.iter() {
        for tag in spec.all_initial_tags() {
            for platform in &spec.platforms {
                let key = PinKey {
                    image: spec.image.clone(),
                    platform: platform.clone(),
                    tag: tag.to_string(),
                };
                expected.insert(
                    pins_root.join(key.rel_path()),
                    directive(&spec.image, platform, tag),
                );
            }
        }
    }

    // Every tag currently surfaced in the versions tree. Version files the
    // bump bot has not filled in yet parse without a tag and contribute
    // nothing.
    for path in tree::list_directive_files(versions_root)? {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable version file, skipping");
                continue;
            }
        };
        let Some(reference) = Reference::first_in(&content) else {
            debug!(path = %path.display(), "no reference in version file, skipping");
            continue;
        };
        let Some(tag) = reference.tag.as_deref() else {
            continue;
        };
        let platform = reference.platform_or_default();
        let key = PinKey {
            image: reference.image.clone(),
            platform: platform.to_string(),
            tag: tag.to_string(),
        };
        expected
            .entry(pins_root.join(key.rel_path()))
            .or_insert_with(|| directive(&reference.image, platform, tag));
    }

    Ok(expected)
}

/// Reconciles the pins tree against the union of catalog-declared tags and
/// tags observed in the versions tree.
pub fn reconcile_pins(
    catalog: &Catalog,
    versions_root: &Path,
    pins_root: &Path,
) -> Result<SyncOutcome, SyncError> {
    let expected = expected_pins(catalog, versions_root, pins_root)?;
    debug!(entries = expected.len(), "computed expected pins tree");
    tree::reconcile(pins_root, &expected)
}
