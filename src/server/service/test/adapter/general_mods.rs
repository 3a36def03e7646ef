use super::*;
use crate::server::service::adapter::general_mods::GeneralModsAdapter;

fn adapter(server: &MockServer, filter_nsfw: bool) -> GeneralModsAdapter {
    GeneralModsAdapter::new(nexus_client(server), filter_nsfw, chrono::Duration::hours(24))
}

/// Tests normalizing admissible mods.
///
/// Expected: record carries id, mod page URL, category and version
#[tokio::test]
async fn fetches_admissible_mods() {
    let server = MockServer::start().await;
    nexus_mock::mount_latest_updated(
        &server,
        DOMAIN,
        vec![NexusModFactory::new()
            .mod_id(500)
            .name("Hero Overhaul")
            .category(Some("Heroes"))
            .version("3.0")
            .updated_at(unix_day(2025, 1, 9))
            .build()],
    )
    .await;

    let records = adapter(&server, false).fetch(context(10)).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "500");
    assert_eq!(records[0].title, "Hero Overhaul");
    assert_eq!(records[0].url, "https://www.nexusmods.com/testgame/mods/500");
    assert_eq!(records[0].category, "Heroes");
    assert_eq!(records[0].version.as_deref(), Some("3.0"));
    assert_eq!(records[0].timestamp, day(9));
}

/// Tests the status, availability and timestamp filters.
///
/// Expected: only the published, available, dated mod survives
#[tokio::test]
async fn filters_inadmissible_mods() {
    let server = MockServer::start().await;
    let recent = unix_day(2025, 1, 9);
    nexus_mock::mount_latest_updated(
        &server,
        DOMAIN,
        vec![
            create_nexus_mod(1, recent),
            NexusModFactory::new().mod_id(2).status("hidden").updated_at(recent).build(),
            NexusModFactory::new().mod_id(3).available(false).updated_at(recent).build(),
            NexusModFactory::new().mod_id(4).without_timestamps().build(),
            serde_json::json!({ "name": "missing id" }),
        ],
    )
    .await;

    let records = adapter(&server, false).fetch(context(10)).await;

    assert_eq!(ids(&records), vec!["1"]);
}

/// Tests the NSFW filter switch.
///
/// Expected: adult mod excluded when enabled and included when disabled
#[tokio::test]
async fn nsfw_filter_toggle() {
    let server = MockServer::start().await;
    nexus_mock::mount_latest_updated(
        &server,
        DOMAIN,
        vec![NexusModFactory::new()
            .mod_id(9)
            .adult(true)
            .updated_at(unix_day(2025, 1, 9))
            .build()],
    )
    .await;

    let filtered = adapter(&server, true).fetch(context(10)).await;
    let unfiltered = adapter(&server, false).fetch(context(10)).await;

    assert!(filtered.is_empty());
    assert_eq!(ids(&unfiltered), vec!["9"]);
}

/// Tests the lookback window and the last check time.
///
/// Expected: mods older than the later of 24h ago and the last check are excluded
#[tokio::test]
async fn applies_cutoff() {
    let server = MockServer::start().await;
    nexus_mock::mount_latest_updated(
        &server,
        DOMAIN,
        vec![
            create_nexus_mod(1, unix_day(2025, 1, 8)),
            create_nexus_mod(2, unix_day(2025, 1, 9) + 3600),
            create_nexus_mod(3, unix_day(2025, 1, 9) + 7 * 3600),
        ],
    )
    .await;
    let adapter = adapter(&server, false);

    let window_only = adapter.fetch(context(10)).await;
    let after_check = adapter
        .fetch(FetchContext {
            last_checked: Some(day(9) + chrono::Duration::hours(6)),
            now: day(10),
        })
        .await;

    assert_eq!(ids(&window_only), vec!["2", "3"]);
    assert_eq!(ids(&after_check), vec!["3"]);
}

/// Tests an upstream failing on every attempt.
///
/// Expected: empty batch after exactly three requests, no panic
#[tokio::test]
async fn retry_exhaustion_returns_empty() {
    let server = MockServer::start().await;
    nexus_mock::mount_failure(
        &server,
        &format!("/games/{}/mods/latest_updated.json", DOMAIN),
        503,
        3,
    )
    .await;

    let records = adapter(&server, false).fetch(context(10)).await;

    assert!(records.is_empty());
}
