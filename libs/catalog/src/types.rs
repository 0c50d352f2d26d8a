//! Catalog data model.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Granularity at which an image's version is tracked.
///
/// Each strategy maps to its own subtree of version directive files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strategy {
    Major,
    MajorMinor,
    MajorMinorPatch,
}

impl Strategy {
    /// All strategies, in tree order.
    pub const ALL: [Strategy; 3] = [
        Strategy::Major,
        Strategy::MajorMinor,
        Strategy::MajorMinorPatch,
    ];

    /// The path segment for this strategy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Strategy::Major => "major",
            Strategy::MajorMinor => "major-minor",
            Strategy::MajorMinorPatch => "major-minor-patch",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One catalog entry: an image, its platforms, and the initial tags declared
/// per strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    /// Image identifier, e.g. `registry/repo`.
    pub image: String,

    /// Platforms (`os/arch`) the image is mirrored for.
    pub platforms: Vec<String>,

    /// Initial tags tracked at major granularity.
    #[serde(default)]
    pub initial_major: Vec<String>,

    /// Initial tags tracked at major.minor granularity.
    #[serde(default)]
    pub initial_major_minor: Vec<String>,

    /// Initial tags tracked at major.minor.patch granularity.
    #[serde(default)]
    pub initial_major_minor_patch: Vec<String>,
}

impl ImageSpec {
    /// The initial tags declared for one strategy. The first element is
    /// authoritative for version-file generation.
    #[must_use]
    pub fn initial_tags(&self, strategy: Strategy) -> &[String] {
        match strategy {
            Strategy::Major => &self.initial_major,
            Strategy::MajorMinor => &self.initial_major_minor,
            Strategy::MajorMinorPatch => &self.initial_major_minor_patch,
        }
    }

    /// Every initial tag across all strategies, in declaration order.
    pub fn all_initial_tags(&self) -> impl Iterator<Item = &str> {
        Strategy::ALL
            .iter()
            .flat_map(|strategy| self.initial_tags(*strategy))
            .map(String::as_str)
    }
}

/// The full catalog, in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(pub Vec<ImageSpec>);

impl Catalog {
    /// Loads the catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Iterates over the catalog entries.
    pub fn iter(&self) -> impl Iterator<Item = &ImageSpec> {
        self.0.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the catalog declares no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_path_segments() {
        assert_eq!(Strategy::Major.as_str(), "major");
        assert_eq!(Strategy::MajorMinor.as_str(), "major-minor");
        assert_eq!(Strategy::MajorMinorPatch.as_str(), "major-minor-patch");
    }

    #[test]
    fn parses_catalog_with_all_strategies() {
        let json = r#"[
            {
                "image": "busybox",
                "platforms": ["linux/amd64", "linux/arm64"],
                "initialMajor": ["1"],
                "initialMajorMinor": ["1.36"],
                "initialMajorMinorPatch": ["1.36.1"]
            }
        ]"#;

        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 1);

        let spec = &catalog.0[0];
        assert_eq!(spec.image, "busybox");
        assert_eq!(spec.platforms.len(), 2);
        assert_eq!(spec.initial_tags(Strategy::Major), ["1"]);
        assert_eq!(spec.initial_tags(Strategy::MajorMinor), ["1.36"]);
        assert_eq!(spec.initial_tags(Strategy::MajorMinorPatch), ["1.36.1"]);
    }

    #[test]
    fn absent_tag_lists_default_to_empty() {
        let json = r#"[{"image": "busybox", "platforms": ["linux/amd64"]}]"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();

        let spec = &catalog.0[0];
        for strategy in Strategy::ALL {
            assert!(spec.initial_tags(strategy).is_empty());
        }
        assert_eq!(spec.all_initial_tags().count(), 0);
    }

    #[test]
    fn all_initial_tags_spans_strategies() {
        let json = r#"[
            {
                "image": "busybox",
                "platforms": ["linux/amd64"],
                "initialMajor": ["1"],
                "initialMajorMinorPatch": ["1.36.1"]
            }
        ]"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();

        let tags: Vec<&str> = catalog.0[0].all_initial_tags().collect();
        assert_eq!(tags, ["1", "1.36.1"]);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(&dir.path().join("images.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn load_reports_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("images.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }
}
