//! Version-tree synchronization.
//!
//! One entry per (strategy, image, platform) where the catalog declares at
//! least one initial tag for that strategy. The generated content names the
//! first declared tag; an external actor advances it in place afterwards, so
//! existing entries are never rewritten.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mirror_catalog::{Catalog, Strategy};
use mirror_reference::directive;
use tracing::debug;

use crate::codec::VersionKey;
use crate::error::SyncError;
use crate::tree::{self, SyncOutcome};

/// Computes the expected versions tree: absolute directive path → content.
fn expected_versions(catalog: &Catalog, versions_root: &Path) -> BTreeMap<PathBuf, String> {
    let mut expected = BTreeMap::new();

    for spec in catalog.iter() {
        for strategy in Strategy::ALL {
            let Some(first_tag) = spec.initial_tags(strategy).first() else {
                continue;
            };
            for platform in &spec.platforms {
                let key = VersionKey {
                    strategy,
                    image: spec.image.clone(),
                    platform: platform.clone(),
                };
                expected.insert(
                    versions_root.join(key.rel_path()),
                    directive(&spec.image, platform, first_tag),
                );
            }
        }
    }

    expected
}

/// Reconciles the versions tree against the catalog.
pub fn reconcile_versions(
    catalog: &Catalog,
    versions_root: &Path,
) -> Result<SyncOutcome, SyncError> {
    let expected = expected_versions(catalog, versions_root);
    debug!(entries = expected.len(), "computed expected versions tree");
    tree::reconcile(versions_root, &expected)
}
