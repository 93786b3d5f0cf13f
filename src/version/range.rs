//! Range tables: which platform versions each module version supports
//!
//! Built from the raw version list of one module. Stable and release
//! candidate builds aggregate into [`StableRange`]s keyed by module version,
//! beta builds into [`BetaRange`]s keyed by `<version>-beta`.

use indexmap::IndexMap;
use tracing::debug;

use crate::version::descriptor::{Channel, ReleaseTrack, VersionDescriptor};
use crate::version::platform::PlatformVersion;
use crate::version::selector::{Choices, RangeRef, Selection};

/// Platform span of a stable module version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StableRange {
    min: PlatformVersion,
    latest: PlatformVersion,
    final_release: Option<VersionDescriptor>,
    platforms: IndexMap<String, VersionDescriptor>,
}

impl StableRange {
    fn seed(platform: PlatformVersion, descriptor: VersionDescriptor) -> Self {
        let mut platforms = IndexMap::new();
        platforms.insert(platform.semver().to_string(), descriptor);
        Self {
            min: platform.clone(),
            latest: platform,
            final_release: None,
            platforms,
        }
    }

    /// First platform version this module version was built for
    pub fn min(&self) -> &PlatformVersion {
        &self.min
    }

    /// Newest platform version a release candidate was built for
    pub fn latest(&self) -> &PlatformVersion {
        &self.latest
    }

    /// The released form of this module version, valid at or above `latest`
    pub fn final_release(&self) -> Option<&VersionDescriptor> {
        self.final_release.as_ref()
    }

    /// Platform semver text to descriptor, ascending
    pub fn platforms(&self) -> &IndexMap<String, VersionDescriptor> {
        &self.platforms
    }

    pub fn is_released(&self) -> bool {
        self.final_release.is_some()
    }

    /// Whether the module version is usable on `platform` at all
    pub fn supports(&self, platform: &PlatformVersion) -> bool {
        &self.min <= platform && (platform <= &self.latest || self.is_released())
    }

    pub fn select(&self, preferred: Option<&PlatformVersion>) -> Selection<'_> {
        RangeRef::Stable(self).select(preferred)
    }
}

/// Platform span of a beta module version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetaRange {
    min: PlatformVersion,
    max: PlatformVersion,
    platforms: IndexMap<String, VersionDescriptor>,
}

impl BetaRange {
    pub fn min(&self) -> &PlatformVersion {
        &self.min
    }

    pub fn max(&self) -> &PlatformVersion {
        &self.max
    }

    pub fn platforms(&self) -> &IndexMap<String, VersionDescriptor> {
        &self.platforms
    }

    pub fn contains(&self, platform: &PlatformVersion) -> bool {
        &self.min <= platform && platform <= &self.max
    }

    pub fn select(&self, preferred: Option<&PlatformVersion>) -> Selection<'_> {
        RangeRef::Beta(self).select(preferred)
    }
}

/// Stable and beta ranges of one module, ascending by module version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeTable {
    stable: IndexMap<String, StableRange>,
    beta: IndexMap<String, BetaRange>,
}

impl RangeTable {
    /// Build a table from raw registry versions.
    ///
    /// Unparseable entries are dropped. Input order does not matter.
    pub fn build<I, S>(raw_versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut descriptors: Vec<VersionDescriptor> = raw_versions
            .into_iter()
            .filter_map(|raw| {
                let raw = raw.as_ref();
                let descriptor = VersionDescriptor::parse(raw);
                if descriptor.is_none() {
                    debug!("Skipping unrecognized module version: {}", raw);
                }
                descriptor
            })
            .collect();

        descriptors.sort_by(VersionDescriptor::build_order);

        descriptors
            .into_iter()
            .fold(RangeTableBuilder::default(), RangeTableBuilder::push)
            .finish()
    }

    pub fn stable(&self) -> &IndexMap<String, StableRange> {
        &self.stable
    }

    pub fn beta(&self) -> &IndexMap<String, BetaRange> {
        &self.beta
    }

    pub fn is_empty(&self) -> bool {
        self.stable.is_empty() && self.beta.is_empty()
    }

    /// Lowest platform version any module version of `track` requires
    pub fn minimum_platform(&self, track: ReleaseTrack) -> Option<&PlatformVersion> {
        match track {
            ReleaseTrack::Stable => self.stable.values().map(StableRange::min).min(),
            ReleaseTrack::Beta => self.beta.values().map(BetaRange::min).min(),
        }
    }

    /// Ranges of `track`, newest module version first
    pub fn ranges(&self, track: ReleaseTrack) -> Vec<(&str, RangeRef<'_>)> {
        match track {
            ReleaseTrack::Stable => self
                .stable
                .iter()
                .rev()
                .map(|(key, range)| (key.as_str(), RangeRef::Stable(range)))
                .collect(),
            ReleaseTrack::Beta => self
                .beta
                .iter()
                .rev()
                .map(|(key, range)| (key.as_str(), RangeRef::Beta(range)))
                .collect(),
        }
    }

    /// Module version choices of one track, newest first.
    ///
    /// The default is the first range spanning `preferred`, otherwise the
    /// range matching `previous` (a module version like `1.2.0`), otherwise
    /// the newest.
    pub fn module_choices(
        &self,
        track: ReleaseTrack,
        preferred: Option<&PlatformVersion>,
        previous: Option<&str>,
    ) -> Choices<(&str, RangeRef<'_>)> {
        let items = self.ranges(track);
        let default_index = match preferred {
            Some(platform) => items.iter().position(|(_, range)| range.spans(platform)),
            None => previous.and_then(|previous| {
                items.iter().position(|(key, _)| {
                    *key == previous || key.strip_suffix("-beta") == Some(previous)
                })
            }),
        }
        .unwrap_or(0);

        Choices {
            items,
            default_index,
        }
    }

    /// Best descriptor of `track` for a target platform.
    ///
    /// Picks the newest module version usable on `platform`, then the
    /// tightest build inside it.
    pub fn resolve(
        &self,
        track: ReleaseTrack,
        platform: &PlatformVersion,
    ) -> Option<&VersionDescriptor> {
        self.ranges(track)
            .into_iter()
            .find(|(_, range)| range.is_compatible(platform))
            .and_then(|(_, range)| range.select(Some(platform)).contained())
    }
}

/// Accumulates sorted descriptors; only [`RangeTableBuilder::finish`]
/// hands out a table.
#[derive(Debug, Default)]
struct RangeTableBuilder {
    stable: IndexMap<String, StableRange>,
    beta: IndexMap<String, BetaRange>,
}

impl RangeTableBuilder {
    fn push(mut self, descriptor: VersionDescriptor) -> Self {
        let key = descriptor.range_key();

        match descriptor.channel() {
            Channel::Beta => {
                let Some(platform) = descriptor.platform().cloned() else {
                    debug!("Skipping beta without platform: {}", descriptor.raw());
                    return self;
                };

                match self.beta.get_mut(&key) {
                    Some(range) => {
                        range.max = platform.clone();
                        range
                            .platforms
                            .insert(platform.semver().to_string(), descriptor);
                    }
                    None => {
                        let mut platforms = IndexMap::new();
                        platforms.insert(platform.semver().to_string(), descriptor);
                        self.beta.insert(
                            key,
                            BetaRange {
                                min: platform.clone(),
                                max: platform,
                                platforms,
                            },
                        );
                    }
                }
            }
            Channel::Stable | Channel::ReleaseCandidate => {
                let platform = descriptor.platform().cloned();

                match self.stable.get_mut(&key) {
                    Some(range) => match platform {
                        Some(platform) if descriptor.is_release_candidate() => {
                            range.latest = platform.clone();
                            range
                                .platforms
                                .insert(platform.semver().to_string(), descriptor);
                        }
                        _ => range.final_release = Some(descriptor),
                    },
                    None => match platform {
                        Some(platform) => {
                            self.stable
                                .insert(key, StableRange::seed(platform, descriptor));
                        }
                        None => debug!(
                            "Skipping {} with no platform build to range over",
                            descriptor.raw()
                        ),
                    },
                }
            }
        }

        self
    }

    fn finish(self) -> RangeTable {
        RangeTable {
            stable: self.stable,
            beta: self.beta,
        }
    }
}
