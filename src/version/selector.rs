//! Candidate narrowing for interactive version choosers
//!
//! The chooser itself lives outside this crate. This module only lists what
//! can be chosen inside a range, newest first, and which entry should be
//! highlighted initially for a preferred platform version.

use crate::version::descriptor::{Channel, VersionDescriptor};
use crate::version::platform::PlatformVersion;
use crate::version::range::{BetaRange, StableRange};

/// Items offered to a chooser together with the initial pick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choices<T> {
    pub items: Vec<T>,
    /// Always a valid index when `items` is non-empty
    pub default_index: usize,
}

impl<T> Choices<T> {
    pub fn default_item(&self) -> Option<&T> {
        self.items.get(self.default_index)
    }
}

/// Either kind of range, for code that handles both tracks alike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRef<'a> {
    Stable(&'a StableRange),
    Beta(&'a BetaRange),
}

impl<'a> RangeRef<'a> {
    pub fn min(self) -> &'a PlatformVersion {
        match self {
            RangeRef::Stable(range) => range.min(),
            RangeRef::Beta(range) => range.min(),
        }
    }

    /// `latest` for stable ranges, `max` for beta ranges
    pub fn upper(self) -> &'a PlatformVersion {
        match self {
            RangeRef::Stable(range) => range.latest(),
            RangeRef::Beta(range) => range.max(),
        }
    }

    /// Whether `platform` lies within `[min, upper]`
    pub fn spans(self, platform: &PlatformVersion) -> bool {
        self.min() <= platform && platform <= self.upper()
    }

    /// Whether some build of this range can be used on `platform`
    pub fn is_compatible(self, platform: &PlatformVersion) -> bool {
        match self {
            RangeRef::Stable(range) => range.supports(platform),
            RangeRef::Beta(range) => range.contains(platform),
        }
    }

    pub fn description(self) -> String {
        match self {
            RangeRef::Stable(range) => format!(
                "Minimum: {}\nRecommended: >{}\n{}",
                range.min(),
                range.latest(),
                if range.is_released() {
                    "released"
                } else {
                    "release candidate"
                }
            ),
            RangeRef::Beta(range) => format!("{} - {}", range.min(), range.max()),
        }
    }

    /// All builds of this range, newest first
    pub fn candidates(self) -> Vec<Candidate<'a>> {
        match self {
            RangeRef::Stable(range) => {
                let final_release = range.final_release().map(|descriptor| Candidate {
                    descriptor,
                    kind: CandidateKind::FinalRelease,
                    min: range.latest(),
                    max: None,
                });

                let builds = range.platforms().values().rev().map(|descriptor| Candidate {
                    descriptor,
                    kind: match descriptor.channel() {
                        Channel::ReleaseCandidate => CandidateKind::ReleaseCandidate,
                        _ => CandidateKind::Released,
                    },
                    min: descriptor.platform().unwrap_or(range.min()),
                    max: None,
                });

                final_release.into_iter().chain(builds).collect()
            }
            RangeRef::Beta(range) => range
                .platforms()
                .values()
                .rev()
                .map(|descriptor| Candidate {
                    descriptor,
                    kind: CandidateKind::Beta,
                    min: range.min(),
                    max: Some(range.max()),
                })
                .collect(),
        }
    }

    /// List candidates and pick the initial one.
    ///
    /// With a preferred platform the tightest candidate containing it wins,
    /// the released form over a build for the same platform. When none
    /// contains it, or without a preference, the newest is picked.
    pub fn select(self, preferred: Option<&PlatformVersion>) -> Selection<'a> {
        let candidates = self.candidates();

        let matched = preferred.and_then(|preferred| {
            candidates
                .iter()
                .enumerate()
                .filter(|(_, candidate)| {
                    candidate.contains(preferred) && candidate.anchor() <= preferred
                })
                .max_by_key(|(_, candidate)| (candidate.anchor(), candidate.kind.rank()))
                .map(|(index, _)| index)
        });

        Selection {
            default_index: matched.unwrap_or(0),
            matched: matched.is_some(),
            candidates,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// Platform-pinned build of a module version
    ReleaseCandidate,
    /// Platform build that is also the released form
    Released,
    /// Released form, valid at or above the range's latest build
    FinalRelease,
    Beta,
}

impl CandidateKind {
    fn rank(self) -> u8 {
        match self {
            CandidateKind::ReleaseCandidate | CandidateKind::Beta => 0,
            CandidateKind::Released => 1,
            CandidateKind::FinalRelease => 2,
        }
    }
}

/// One selectable build and the platform span it is valid for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub descriptor: &'a VersionDescriptor,
    pub kind: CandidateKind,
    pub min: &'a PlatformVersion,
    /// `None` means open-ended
    pub max: Option<&'a PlatformVersion>,
}

impl<'a> Candidate<'a> {
    pub fn contains(&self, platform: &PlatformVersion) -> bool {
        self.min <= platform && self.max.is_none_or(|max| platform <= max)
    }

    /// Platform version this candidate is closest to
    fn anchor(&self) -> &'a PlatformVersion {
        match self.kind {
            CandidateKind::FinalRelease => self.min,
            _ => self.descriptor.platform().unwrap_or(self.min),
        }
    }

    pub fn title(&self) -> String {
        match self.kind {
            CandidateKind::FinalRelease => "release".to_string(),
            _ => self.anchor().display_text(),
        }
    }

    pub fn description(&self) -> String {
        match self.kind {
            CandidateKind::ReleaseCandidate => format!("rc ({})", self.descriptor.raw()),
            CandidateKind::Released => format!("released ({})", self.descriptor.raw()),
            CandidateKind::FinalRelease => format!(">{}", self.min),
            CandidateKind::Beta => self.descriptor.raw().to_string(),
        }
    }
}

/// Candidates of one range with the initial pick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    pub candidates: Vec<Candidate<'a>>,
    /// Index to highlight; 0 when nothing matched
    pub default_index: usize,
    /// Whether `default_index` contains the preferred platform
    pub matched: bool,
}

impl<'a> Selection<'a> {
    pub fn default_candidate(&self) -> Option<&Candidate<'a>> {
        self.candidates.get(self.default_index)
    }

    /// The default pick, only if it actually contains the preferred platform
    pub fn contained(self) -> Option<&'a VersionDescriptor> {
        if !self.matched {
            return None;
        }
        self.candidates
            .get(self.default_index)
            .map(|candidate| candidate.descriptor)
    }
}
