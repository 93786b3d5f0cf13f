//! Script module version descriptors
//!
//! Parses the composite version strings published for `@minecraft/*` script
//! modules. One string carries the module version, its release channel and
//! the platform version it was built against:
//!
//! - `1.2.0` - released module version, not tied to a platform build
//! - `1.2.0-rc.1.21.0-stable` - release candidate built for 1.21.0
//! - `1.3.0-beta.1.21.10-preview.20` - beta pinned to preview 20 of 1.21.10

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

use crate::version::platform::PlatformVersion;

static MODULE_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?<module>(?<major>0|[1-9]\d*)\.(?<minor>0|[1-9]\d*)\.(?<patch>0|[1-9]\d*)(?:-(?<channel>beta|rc))?)(?:\.(?<platform>(?<pmajor>0|[1-9]\d*)\.(?<pminor>0|[1-9]\d*)\.(?<ppatch>0|[1-9]\d*)-(?:stable|preview\.(?<preview>0|[1-9]\d*))))?$",
    )
    .unwrap()
});

/// Release maturity of a module version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Stable,
    ReleaseCandidate,
    Beta,
}

/// The range table a channel is aggregated into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseTrack {
    Stable,
    Beta,
}

impl Channel {
    pub fn track(self) -> ReleaseTrack {
        match self {
            Channel::Stable | Channel::ReleaseCandidate => ReleaseTrack::Stable,
            Channel::Beta => ReleaseTrack::Beta,
        }
    }

    /// Pre-release ordering within one module version
    fn rank(self) -> u8 {
        match self {
            Channel::Beta => 0,
            Channel::ReleaseCandidate => 1,
            Channel::Stable => 2,
        }
    }

    fn tag(self) -> Option<&'static str> {
        match self {
            Channel::Stable => None,
            Channel::ReleaseCandidate => Some("rc"),
            Channel::Beta => Some("beta"),
        }
    }
}

/// A parsed script module version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionDescriptor {
    module_version: Version,
    module_semver: String,
    channel: Channel,
    platform: Option<PlatformVersion>,
    raw: String,
}

impl VersionDescriptor {
    /// Parse a raw registry version string.
    ///
    /// Returns `None` for anything outside the composite grammar; callers
    /// drop such entries.
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = MODULE_VERSION_RE.captures(raw)?;
        let number = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());

        let module_version = Version::new(
            caps["major"].parse().ok()?,
            caps["minor"].parse().ok()?,
            caps["patch"].parse().ok()?,
        );

        let channel = match caps.name("channel").map(|m| m.as_str()) {
            Some("beta") => Channel::Beta,
            Some("rc") => Channel::ReleaseCandidate,
            _ => Channel::Stable,
        };

        let platform = match caps.name("platform") {
            None => None,
            Some(_) => {
                let (major, minor, patch) = (number("pmajor")?, number("pminor")?, number("ppatch")?);
                Some(match caps.name("preview") {
                    Some(_) => PlatformVersion::preview(major, minor, patch, number("preview")?),
                    None => PlatformVersion::stable(major, minor, patch),
                })
            }
        };

        Some(Self {
            module_version,
            module_semver: caps["module"].to_string(),
            channel,
            platform,
            raw: raw.to_string(),
        })
    }

    pub fn module_version(&self) -> &Version {
        &self.module_version
    }

    /// Module version with its channel tag, e.g. `1.3.0-beta`
    pub fn module_semver(&self) -> &str {
        &self.module_semver
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn platform(&self) -> Option<&PlatformVersion> {
        self.platform.as_ref()
    }

    /// The string as published, used for install specs
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_beta(&self) -> bool {
        self.channel == Channel::Beta
    }

    pub fn is_release_candidate(&self) -> bool {
        self.channel == Channel::ReleaseCandidate
    }

    /// Key of the range this descriptor aggregates into.
    ///
    /// Stable and RC forms of a module version share `1.2.0`; betas keep
    /// their tag (`1.2.0-beta`).
    pub fn range_key(&self) -> String {
        match self.channel.track() {
            ReleaseTrack::Stable => self.module_version.to_string(),
            ReleaseTrack::Beta => self.module_semver.clone(),
        }
    }

    /// Order in which the range builder consumes descriptors
    pub(crate) fn build_order(&self, other: &Self) -> Ordering {
        self.module_version
            .cmp(&other.module_version)
            .then(self.channel.rank().cmp(&other.channel.rank()))
            .then(self.platform.is_none().cmp(&other.platform.is_none()))
            .then(self.platform.cmp(&other.platform))
            .then(self.raw.cmp(&other.raw))
    }
}

/// Renders the canonical composite text
impl fmt::Display for VersionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.module_version)?;
        if let Some(tag) = self.channel.tag() {
            write!(f, "-{tag}")?;
        }
        if let Some(platform) = &self.platform {
            write!(f, ".{}", platform.semver())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parse_bare_module_version() {
        let descriptor = VersionDescriptor::parse("1.2.0").unwrap();

        assert_eq!(descriptor.module_version(), &Version::new(1, 2, 0));
        assert_eq!(descriptor.module_semver(), "1.2.0");
        assert_eq!(descriptor.channel(), Channel::Stable);
        assert_eq!(descriptor.platform(), None);
        assert_eq!(descriptor.raw(), "1.2.0");
    }

    #[test]
    fn parse_release_candidate_with_stable_platform() {
        let descriptor = VersionDescriptor::parse("1.2.0-rc.1.21.0-stable").unwrap();

        assert_eq!(descriptor.module_semver(), "1.2.0-rc");
        assert!(descriptor.is_release_candidate());
        assert!(!descriptor.is_beta());
        assert_eq!(
            descriptor.platform(),
            Some(&PlatformVersion::stable(1, 21, 0))
        );
    }

    #[test]
    fn parse_beta_with_preview_platform() {
        let descriptor = VersionDescriptor::parse("1.3.0-beta.1.21.10-preview.20").unwrap();

        assert_eq!(descriptor.module_semver(), "1.3.0-beta");
        assert!(descriptor.is_beta());
        let platform = descriptor.platform().unwrap();
        assert_eq!(platform.components(), &[1, 21, 10, 20]);
        assert_eq!(platform.semver(), "1.21.10-preview.20");
        assert!(platform.is_preview());
    }

    #[test]
    fn parse_beta_without_platform_for_manifest_entries() {
        let descriptor = VersionDescriptor::parse("1.0.0-beta").unwrap();

        assert!(descriptor.is_beta());
        assert_eq!(descriptor.platform(), None);
    }

    #[rstest]
    #[case("")]
    #[case("1.2")]
    #[case("1.2.0.0")]
    #[case("v1.2.0")]
    #[case("1.2.0-alpha")]
    #[case("1.2.0-alpha.1.21.0-stable")]
    #[case("1.2.0-rc.1.21-stable")]
    #[case("1.2.0-rc.1.21.0")]
    #[case("1.2.0-rc.1.21.0-nightly")]
    #[case("1.2.0-beta.1.21.0-preview")]
    #[case("1.2.0-beta.1.21.0-preview.x")]
    #[case("1.0.0-beta.1.99999999999.0-stable")]
    #[case("1.02.0-rc.1.21.0-stable")]
    #[case("1.2.0-rc.1.021.0-stable")]
    #[case("1.3.0-beta.1.21.10-preview.020")]
    fn parse_rejects_malformed(#[case] raw: &str) {
        assert_eq!(VersionDescriptor::parse(raw), None);
    }

    #[rstest]
    #[case("1.2.0")]
    #[case("1.2.0-rc")]
    #[case("1.2.0-rc.1.21.0-stable")]
    #[case("1.3.0-beta.1.21.10-preview.20")]
    #[case("2.0.0.1.21.0-stable")]
    #[case("10.0.0-rc.1.20.0-stable")]
    #[case("0.1.0-beta.1.21.0-preview.0")]
    fn rendered_text_parses_back_to_the_same_descriptor(#[case] raw: &str) {
        let descriptor = VersionDescriptor::parse(raw).unwrap();
        let rendered = descriptor.to_string();

        assert_eq!(rendered, raw);
        assert_eq!(VersionDescriptor::parse(&rendered), Some(descriptor));
    }

    #[rstest]
    #[case("1.2.0-rc.1.21.0-stable", "1.2.0")]
    #[case("1.2.0", "1.2.0")]
    #[case("1.2.0-beta.1.21.0-stable", "1.2.0-beta")]
    fn range_key_groups_stable_and_rc(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(VersionDescriptor::parse(raw).unwrap().range_key(), expected);
    }

    #[test]
    fn build_order_puts_prereleases_and_platform_builds_before_release() {
        let mut descriptors: Vec<VersionDescriptor> = [
            "1.2.0",
            "1.2.0-rc.1.21.0-stable",
            "1.1.0",
            "1.2.0-beta.1.21.0-preview.2",
            "1.2.0-rc.1.20.0-stable",
            "1.2.0-beta.1.21.0-preview.1",
        ]
        .iter()
        .filter_map(|raw| VersionDescriptor::parse(raw))
        .collect();

        descriptors.sort_by(VersionDescriptor::build_order);

        let raws: Vec<&str> = descriptors.iter().map(VersionDescriptor::raw).collect();
        assert_eq!(
            raws,
            vec![
                "1.1.0",
                "1.2.0-beta.1.21.0-preview.1",
                "1.2.0-beta.1.21.0-preview.2",
                "1.2.0-rc.1.20.0-stable",
                "1.2.0-rc.1.21.0-stable",
                "1.2.0",
            ]
        );
    }
}
