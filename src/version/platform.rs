//! Minecraft platform versions targeted by script modules
//!
//! A platform version is the part after the module version in a composite
//! version string, e.g. `1.21.0-stable` or `1.21.0-preview.20`.
//!
//! Ordering is lexicographic over the numeric components. A preview build
//! carries its preview number as a fourth component and sorts after the
//! stable build with the same three components.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::version::error::PlatformParseError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformVersion {
    components: Vec<u32>,
    semver: String,
    is_preview: bool,
}

impl PlatformVersion {
    /// Create a stable platform version, e.g. `1.21.0-stable`
    pub fn stable(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            components: vec![major, minor, patch],
            semver: format!("{major}.{minor}.{patch}-stable"),
            is_preview: false,
        }
    }

    /// Create a preview platform version, e.g. `1.21.0-preview.20`
    pub fn preview(major: u32, minor: u32, patch: u32, revision: u32) -> Self {
        Self {
            components: vec![major, minor, patch, revision],
            semver: format!("{major}.{minor}.{patch}-preview.{revision}"),
            is_preview: true,
        }
    }

    /// Numeric components; four entries for preview builds
    pub fn components(&self) -> &[u32] {
        &self.components
    }

    /// Canonical text used as a map key, e.g. `1.21.0-preview.20`
    pub fn semver(&self) -> &str {
        &self.semver
    }

    pub fn is_preview(&self) -> bool {
        self.is_preview
    }

    /// Human label, e.g. `1.21.0.20 Preview`
    pub fn display_text(&self) -> String {
        self.to_string()
    }

    /// The first three components, used for engine version comparisons
    pub fn release(&self) -> [u32; 3] {
        [self.components[0], self.components[1], self.components[2]]
    }
}

impl Ord for PlatformVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components
            .cmp(&other.components)
            .then(self.is_preview.cmp(&other.is_preview))
    }
}

impl PartialOrd for PlatformVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .components
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".");
        if self.is_preview {
            write!(f, "{joined} Preview")
        } else {
            f.write_str(&joined)
        }
    }
}

/// Parses user-supplied platform versions.
///
/// Accepts `1.21.0`, `1.21.0-stable` and `1.21.0-preview.20`.
impl FromStr for PlatformVersion {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlatformParseError::Invalid(s.to_string());

        let (release, channel) = match s.split_once('-') {
            Some((release, channel)) => (release, Some(channel)),
            None => (s, None),
        };

        let parts: Vec<u32> = release
            .split('.')
            .map(|part| digits(part).ok_or_else(invalid))
            .collect::<Result<_, _>>()?;
        let [major, minor, patch] = parts[..] else {
            return Err(invalid());
        };

        match channel {
            None | Some("stable") => Ok(Self::stable(major, minor, patch)),
            Some(channel) => {
                let revision = channel
                    .strip_prefix("preview.")
                    .and_then(digits)
                    .ok_or_else(invalid)?;
                Ok(Self::preview(major, minor, patch, revision))
            }
        }
    }
}

/// `u32::from_str` also takes a leading `+`, which the composite grammar does not
fn digits(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
