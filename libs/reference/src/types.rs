//! The [`Reference`] value type and the directive-line scanner.

use std::fmt;
use std::str::FromStr;

use crate::error::DigestError;
use crate::{DEFAULT_PLATFORM, DEFAULT_TAG};

/// A validated sha256 image digest: exactly 64 lowercase hex characters,
/// without the `sha256:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest(String);

impl Digest {
    /// Length of a sha256 digest in hex characters.
    pub const LEN: usize = 64;

    /// Parses a digest from its hex representation.
    pub fn parse(s: &str) -> Result<Self, DigestError> {
        if s.len() != Self::LEN {
            return Err(DigestError::Length { actual: s.len() });
        }
        if !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(DigestError::Alphabet);
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Digest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One parsed image reference.
///
/// Platform and tag stay `None` when the directive omits them; the digest is
/// present only once an external actor has pinned the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Target platform (`os/arch`), if the directive names one.
    pub platform: Option<String>,
    /// Image identifier, e.g. `registry/repo`.
    pub image: String,
    /// Tag, if the directive names one.
    pub tag: Option<String>,
    /// Content digest, if the reference has been pinned.
    pub digest: Option<Digest>,
}

impl Reference {
    /// Scans directive content and returns the first `FROM` reference.
    ///
    /// Lines are examined in order; the first matching line wins. Content
    /// with no matching line yields `None`.
    #[must_use]
    pub fn first_in(content: &str) -> Option<Self> {
        content.lines().find_map(match_from_line)
    }

    /// The platform, or [`DEFAULT_PLATFORM`] when absent.
    #[must_use]
    pub fn platform_or_default(&self) -> &str {
        self.platform.as_deref().unwrap_or(DEFAULT_PLATFORM)
    }

    /// The tag, or [`DEFAULT_TAG`] when absent.
    #[must_use]
    pub fn tag_or_default(&self) -> &str {
        self.tag.as_deref().unwrap_or(DEFAULT_TAG)
    }

    /// The fully-qualified pinned form `image:tag@sha256:digest`, if this
    /// reference carries a digest.
    #[must_use]
    pub fn pinned(&self) -> Option<String> {
        self.digest.as_ref().map(|digest| {
            format!(
                "{}:{}@sha256:{}",
                self.image,
                self.tag_or_default(),
                digest
            )
        })
    }
}

/// Canonical content for a generated directive file.
#[must_use]
pub fn directive(image: &str, platform: &str, tag: &str) -> String {
    format!("FROM --platform={platform} {image}:{tag}\n")
}

/// Matches a single line against the directive grammar.
///
/// Trailing tokens other than an `AS <name>` clause invalidate the line.
fn match_from_line(line: &str) -> Option<Reference> {
    let mut tokens = line.split_whitespace();

    if !tokens.next()?.eq_ignore_ascii_case("FROM") {
        return None;
    }

    let mut token = tokens.next()?;
    let platform = match token.strip_prefix("--platform=") {
        Some(platform) if !platform.is_empty() => {
            token = tokens.next()?;
            Some(platform.to_string())
        }
        Some(_) => return None,
        None => None,
    };

    let (name, digest) = match token.split_once('@') {
        Some((name, suffix)) => {
            let hex = suffix.strip_prefix("sha256:")?;
            (name, Some(Digest::parse(hex).ok()?))
        }
        None => (token, None),
    };

    // The tag separator is the last colon, and only when the suffix holds no
    // `/` (keeps the port inside `registry:5000/repo`).
    let (image, tag) = match name.rsplit_once(':') {
        Some((image, tag)) if !image.is_empty() && !tag.is_empty() && !tag.contains('/') => {
            (image, Some(tag.to_string()))
        }
        _ => (name, None),
    };
    if image.is_empty() {
        return None;
    }

    match tokens.next() {
        None => {}
        Some(keyword) if keyword.eq_ignore_ascii_case("AS") => {
            // Require a stage name; anything after it is ignored.
            tokens.next()?;
        }
        Some(_) => return None,
    }

    Some(Reference {
        platform,
        image: image.to_string(),
        tag,
        digest,
    })
}
