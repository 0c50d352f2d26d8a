//! End-to-end pipeline test.
//!
//! Walks the full mirror lifecycle the way CI and the external update bot
//! interleave it:
//!
//! 1. Catalog declares an image
//! 2. generate-versions seeds the versions tree
//! 3. generate-pins seeds the pins tree
//! 4. The external bot appends a digest to a pin
//! 5. harvest-digests builds the index from pinned entries only
//! 6. Retiring the image converges both trees back to empty
//!
//! ## Running
//!
//! ```bash
//! cargo test -p mirror-e2e --test pipeline
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use mirror_catalog::Catalog;
use mirror_reconcile::{harvest_digests, reconcile_pins, reconcile_versions};
use tempfile::TempDir;

const DIGEST: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

struct Mirror {
    _dir: TempDir,
    root: PathBuf,
}

impl Mirror {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        Self { _dir: dir, root }
    }

    fn versions(&self) -> PathBuf {
        self.root.join("_dockerfiles/versions")
    }

    fn pins(&self) -> PathBuf {
        self.root.join("_dockerfiles/pins")
    }

    fn catalog(&self, json: &str) -> Catalog {
        serde_json::from_str(json).unwrap()
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn busybox_walkthrough() {
    let mirror = Mirror::new();
    let catalog = mirror.catalog(
        r#"[{"image": "busybox", "platforms": ["linux/amd64"], "initialMajor": ["1"]}]"#,
    );

    // Stage 1: versions.
    let outcome = reconcile_versions(&catalog, &mirror.versions()).unwrap();
    assert_eq!(outcome.created.len(), 1);
    let version_file = mirror.versions().join("major/busybox/linux_amd64/Dockerfile");
    assert_eq!(read(&version_file), "FROM --platform=linux/amd64 busybox:1\n");

    // Stage 2: pins, same directive content.
    let outcome = reconcile_pins(&catalog, &mirror.versions(), &mirror.pins()).unwrap();
    assert_eq!(outcome.created.len(), 1);
    let pin_file = mirror.pins().join("busybox/linux_amd64/1/Dockerfile");
    assert_eq!(read(&pin_file), "FROM --platform=linux/amd64 busybox:1\n");

    // Before the digest lands, harvest includes nothing.
    let report = harvest_digests(&mirror.pins()).unwrap();
    assert_eq!(report.pinned(), 0);
    assert_eq!(report.skipped, 1);

    // The external bot pins the entry in place.
    fs::write(
        &pin_file,
        format!("FROM --platform=linux/amd64 busybox:1@sha256:{DIGEST}\n"),
    )
    .unwrap();

    // Stage 3: harvest.
    let report = harvest_digests(&mirror.pins()).unwrap();
    assert_eq!(report.pinned(), 1);
    assert_eq!(report.skipped, 0);

    let expected = serde_json::json!({
        "busybox": {"1": {"linux/amd64": format!("busybox:1@sha256:{DIGEST}")}}
    });
    let index: serde_json::Value =
        serde_json::from_str(&report.index.to_json_pretty().unwrap()).unwrap();
    assert_eq!(index, expected);
}

#[test]
fn every_stage_is_idempotent() {
    let mirror = Mirror::new();
    let catalog = mirror.catalog(
        r#"[
        {
            "image": "ghcr.io/acme/tool",
            "platforms": ["linux/amd64", "linux/arm64"],
            "initialMajor": ["2"],
            "initialMajorMinor": ["2.4"]
        }
    ]"#,
    );

    assert!(reconcile_versions(&catalog, &mirror.versions()).unwrap().changed());
    assert!(reconcile_pins(&catalog, &mirror.versions(), &mirror.pins())
        .unwrap()
        .changed());
    let first = harvest_digests(&mirror.pins()).unwrap().index.to_json_pretty().unwrap();

    // Second pass with no external mutation: no work, identical index.
    assert!(!reconcile_versions(&catalog, &mirror.versions()).unwrap().changed());
    assert!(!reconcile_pins(&catalog, &mirror.versions(), &mirror.pins())
        .unwrap()
        .changed());
    let second = harvest_digests(&mirror.pins()).unwrap().index.to_json_pretty().unwrap();
    assert_eq!(first, second);
}

#[test]
fn bump_bot_interleaving_converges() {
    let mirror = Mirror::new();
    let catalog = mirror.catalog(
        r#"[{"image": "busybox", "platforms": ["linux/amd64"], "initialMajor": ["1"]}]"#,
    );
    reconcile_versions(&catalog, &mirror.versions()).unwrap();
    reconcile_pins(&catalog, &mirror.versions(), &mirror.pins()).unwrap();

    // The bump bot advances the version file between runs.
    let version_file = mirror.versions().join("major/busybox/linux_amd64/Dockerfile");
    fs::write(&version_file, "FROM --platform=linux/amd64 busybox:2\n").unwrap();

    // Versions stage leaves the advanced tag alone; pins stage unions the
    // new tag in next to the initial one.
    assert!(!reconcile_versions(&catalog, &mirror.versions()).unwrap().changed());
    let outcome = reconcile_pins(&catalog, &mirror.versions(), &mirror.pins()).unwrap();
    assert_eq!(outcome.created, vec![mirror.pins().join("busybox/linux_amd64/2/Dockerfile")]);
    assert!(outcome.removed.is_empty());
    assert!(mirror.pins().join("busybox/linux_amd64/1/Dockerfile").exists());
}

#[test]
fn retiring_an_image_converges_to_empty_trees() {
    let mirror = Mirror::new();
    let catalog = mirror.catalog(
        r#"[
        {
            "image": "busybox",
            "platforms": ["linux/amd64"],
            "initialMajor": ["1"],
            "initialMajorMinorPatch": ["1.36.1"]
        }
    ]"#,
    );
    reconcile_versions(&catalog, &mirror.versions()).unwrap();
    reconcile_pins(&catalog, &mirror.versions(), &mirror.pins()).unwrap();

    // A pinned digest does not keep an orphan alive; removal is keyed on
    // membership alone.
    let pin_file = mirror.pins().join("busybox/linux_amd64/1/Dockerfile");
    fs::write(
        &pin_file,
        format!("FROM --platform=linux/amd64 busybox:1@sha256:{DIGEST}\n"),
    )
    .unwrap();

    let empty = mirror.catalog("[]");
    let outcome = reconcile_versions(&empty, &mirror.versions()).unwrap();
    assert_eq!(outcome.removed.len(), 2);
    let outcome = reconcile_pins(&empty, &mirror.versions(), &mirror.pins()).unwrap();
    assert_eq!(outcome.removed.len(), 2);

    assert!(!mirror.versions().join("major").exists());
    assert!(!mirror.pins().join("busybox").exists());

    let report = harvest_digests(&mirror.pins()).unwrap();
    assert_eq!(report.pinned(), 0);
    assert_eq!(report.index.to_json_pretty().unwrap(), "{}");
}
