use scriptapi_versions::version::descriptor::{ReleaseTrack, VersionDescriptor};
use scriptapi_versions::version::diff::{Change, diff};
use scriptapi_versions::version::platform::PlatformVersion;
use scriptapi_versions::version::range::RangeTable;

/// A slice of the real `@minecraft/server` publication history
const SERVER_VERSIONS: &[&str] = &[
    "1.8.0",
    "1.8.0-beta.1.20.50-preview.20",
    "1.8.0-beta.1.20.50-preview.24",
    "1.8.0-beta.1.20.50-stable",
    "1.8.0-rc.1.20.50-preview.24",
    "1.8.0-rc.1.20.50-stable",
    "1.9.0-beta.1.20.60-preview.21",
    "1.9.0-beta.1.20.60-stable",
    "1.9.0-rc.1.20.60-stable",
    "1.9.0-rc.1.20.70-preview.20",
    "1.10.0-beta.1.20.70-preview.21",
    "1.10.0-rc.1.20.70-stable",
    "0.1.0",
    "not-a-version",
];

#[test]
fn bare_release_marks_range_final_and_beta_is_pinned() {
    let table = RangeTable::build([
        "1.2.0",
        "1.2.0-beta.2.1.0-preview.1",
        "1.2.0-rc.2.1.0-stable",
    ]);

    let stable = &table.stable()["1.2.0"];
    assert!(stable.final_release().is_some());
    assert_eq!(stable.latest(), &PlatformVersion::stable(2, 1, 0));

    let beta = &table.beta()["1.2.0-beta"];
    assert_eq!(beta.min(), &PlatformVersion::preview(2, 1, 0, 1));
    assert_eq!(beta.max(), beta.min());
}

#[test]
fn selection_below_every_build_falls_back_to_first_candidate() {
    let table = RangeTable::build(["1.0.0-rc.2.1.0-stable"]);

    let selection = table.stable()["1.0.0"].select(Some(&PlatformVersion::stable(2, 0, 0)));

    assert_eq!(selection.default_index, 0);
    assert!(!selection.matched);
}

#[test]
fn beta_is_never_unchanged() {
    let old = VersionDescriptor::parse("1.0.0-beta").unwrap();
    let new = VersionDescriptor::parse("1.0.0-beta").unwrap();
    assert_eq!(diff(Some(&old), Some(&new)), Change::Changed);

    let old = VersionDescriptor::parse("1.0.0").unwrap();
    let new = VersionDescriptor::parse("1.0.0").unwrap();
    assert_eq!(diff(Some(&old), Some(&new)), Change::Unchanged);
}

#[test]
fn registry_history_builds_ordered_ranges() {
    let table = RangeTable::build(SERVER_VERSIONS);

    assert_eq!(
        table.stable().keys().collect::<Vec<_>>(),
        vec!["1.8.0", "1.9.0", "1.10.0"]
    );
    assert_eq!(
        table.beta().keys().collect::<Vec<_>>(),
        vec!["1.8.0-beta", "1.9.0-beta", "1.10.0-beta"]
    );

    let server_1_8 = &table.stable()["1.8.0"];
    assert_eq!(server_1_8.min(), &PlatformVersion::stable(1, 20, 50));
    // previews sort after the stable build they preview
    assert_eq!(server_1_8.latest(), &PlatformVersion::preview(1, 20, 50, 24));
    assert!(server_1_8.is_released());

    let server_1_9 = &table.stable()["1.9.0"];
    assert_eq!(server_1_9.latest(), &PlatformVersion::preview(1, 20, 70, 20));
    assert!(!server_1_9.is_released());
}

#[test]
fn stable_ranges_are_monotonic_and_beta_builds_stay_in_bounds() {
    let table = RangeTable::build(SERVER_VERSIONS);

    for range in table.stable().values() {
        assert!(range.min() <= range.latest());
        let platforms: Vec<&PlatformVersion> = range
            .platforms()
            .values()
            .filter_map(VersionDescriptor::platform)
            .collect();
        assert!(platforms.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    for range in table.beta().values() {
        assert!(range.min() <= range.max());
        for descriptor in range.platforms().values() {
            assert!(range.contains(descriptor.platform().unwrap()));
        }
    }
}

#[test]
fn resolve_follows_platform_versions() {
    let table = RangeTable::build(SERVER_VERSIONS);
    let resolve = |track, platform: PlatformVersion| {
        table
            .resolve(track, &platform)
            .map(|d| d.raw().to_string())
    };

    assert_eq!(
        resolve(ReleaseTrack::Stable, PlatformVersion::stable(1, 20, 60)),
        Some("1.9.0-rc.1.20.60-stable".to_string())
    );
    assert_eq!(
        resolve(ReleaseTrack::Stable, PlatformVersion::stable(1, 20, 80)),
        Some("1.8.0".to_string())
    );
    assert_eq!(
        resolve(ReleaseTrack::Beta, PlatformVersion::preview(1, 20, 50, 22)),
        Some("1.8.0-beta.1.20.50-preview.20".to_string())
    );
    assert_eq!(
        resolve(ReleaseTrack::Beta, PlatformVersion::stable(1, 20, 40)),
        None
    );
}
