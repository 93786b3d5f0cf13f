mod helper;

use helper::registry::MockRegistry;
use scriptapi_versions::version::diff::Change;
use scriptapi_versions::version::fetch::fetch_range_tables;
use scriptapi_versions::version::platform::PlatformVersion;
use scriptapi_versions::version::update::{
    SelectionRecord, UpdateChoice, UpdatePlan, UpdateSession, UpdateState,
};

fn registry() -> MockRegistry {
    MockRegistry::new()
        .with_versions(
            "@minecraft/server",
            vec![
                "1.9.0-rc.1.20.60-stable",
                "1.9.0",
                "1.10.0-rc.1.20.70-stable",
                "1.10.0-beta.1.20.70-stable",
                "1.11.0-beta.1.20.70-stable",
            ],
        )
        .with_versions(
            "@minecraft/server-ui",
            vec!["1.1.0-rc.1.20.60-stable", "1.1.0", "1.2.0-beta.1.20.70-stable"],
        )
}

#[tokio::test]
async fn update_flow_reports_changes_and_applies_adjustments() {
    let modules = [
        "@minecraft/server",
        "@minecraft/server-ui",
        "@minecraft/server-net",
    ];
    let tables = fetch_range_tables(&registry(), &modules).await;
    assert!(tables["@minecraft/server-net"].is_empty());

    let previous = vec![
        SelectionRecord::parse("@minecraft/server", "1.9.0").unwrap(),
        SelectionRecord::parse("@minecraft/server-ui", "1.1.0").unwrap(),
        SelectionRecord::parse("@minecraft/server-net", "1.0.0-beta").unwrap(),
    ];
    let plan = UpdatePlan::new(&previous, &tables, &PlatformVersion::stable(1, 20, 70));
    let mut session = UpdateSession::new(plan);

    let changes: Vec<(String, Change)> = session
        .diff()
        .unwrap()
        .into_iter()
        .map(|c| (c.module, c.change))
        .collect();
    assert_eq!(
        changes,
        vec![
            ("@minecraft/server".to_string(), Change::Changed),
            ("@minecraft/server-ui".to_string(), Change::Unchanged),
            ("@minecraft/server-net".to_string(), Change::Removed),
        ]
    );

    session.adjust().unwrap();
    session
        .choose("@minecraft/server-ui", UpdateChoice::Beta)
        .unwrap();
    session.diff().unwrap();
    session.confirm().unwrap();
    let applied = session.apply().unwrap();

    assert_eq!(session.state(), UpdateState::Applied);
    assert_eq!(
        applied.installs,
        vec![
            "@minecraft/server@1.10.0-rc.1.20.70-stable".to_string(),
            "@minecraft/server-ui@1.2.0-beta.1.20.70-stable".to_string(),
        ]
    );
    assert_eq!(applied.uninstalls, vec!["@minecraft/server-net".to_string()]);
    let manifest: Vec<(&str, &str)> = applied
        .records
        .iter()
        .map(|r| (r.module.as_str(), r.manifest_version()))
        .collect();
    assert_eq!(
        manifest,
        vec![
            ("@minecraft/server", "1.10.0-rc"),
            ("@minecraft/server-ui", "1.2.0-beta"),
        ]
    );
}

#[tokio::test]
async fn cancelled_update_cannot_be_applied() {
    let tables = fetch_range_tables(&registry(), &["@minecraft/server"]).await;
    let plan = UpdatePlan::new(&[], &tables, &PlatformVersion::stable(1, 20, 70));
    let mut session = UpdateSession::new(plan);

    session.diff().unwrap();
    session.cancel().unwrap();

    assert!(session.state().is_terminal());
    assert!(session.apply().is_err());
}
