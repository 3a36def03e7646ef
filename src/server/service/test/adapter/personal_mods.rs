use super::*;
use crate::server::service::adapter::personal_mods::PersonalModsAdapter;

const AUTHOR: u64 = 4242;
const WHITELISTED: u64 = 11814;

fn adapter(server: &MockServer) -> PersonalModsAdapter {
    PersonalModsAdapter::new(
        nexus_client(server),
        AUTHOR,
        vec![WHITELISTED],
        false,
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
    )
}

/// Tests author matching.
///
/// Verifies that the uploader id must equal the configured author as an integer, and
/// that a whitelisted mod is kept regardless of uploader.
///
/// Expected: own mod and whitelisted mod kept; foreign and string-id mods dropped
#[tokio::test]
async fn keeps_author_and_whitelisted_mods() {
    let server = MockServer::start().await;
    let recent = unix_day(2025, 1, 9);
    nexus_mock::mount_author_mods(
        &server,
        AUTHOR,
        serde_json::json!([
            NexusModFactory::new().mod_id(1).author_id(AUTHOR).updated_at(recent).build(),
            NexusModFactory::new().mod_id(2).author_id(7).updated_at(recent).build(),
            NexusModFactory::new()
                .mod_id(3)
                .raw_author_id(serde_json::json!(AUTHOR.to_string()))
                .updated_at(recent)
                .build(),
            NexusModFactory::new().mod_id(WHITELISTED).author_id(7).updated_at(recent).build(),
        ]),
    )
    .await;

    let records = adapter(&server).fetch(context(10)).await;

    assert_eq!(ids(&records), vec!["1", "11814"]);
}

/// Tests the wrapped response shape and the fixed cutoff.
///
/// Expected: mods listed under `mods` are read; mods before 2020 are dropped
#[tokio::test]
async fn reads_wrapped_listing_and_applies_cutoff() {
    let server = MockServer::start().await;
    nexus_mock::mount_author_mods(
        &server,
        AUTHOR,
        serde_json::json!({
            "mods": [
                NexusModFactory::new().mod_id(1).author_id(AUTHOR)
                    .updated_at(unix_day(2019, 6, 1)).build(),
                NexusModFactory::new().mod_id(2).author_id(AUTHOR)
                    .updated_at(unix_day(2021, 6, 1)).build(),
            ]
        }),
    )
    .await;

    let records = adapter(&server).fetch(context(10)).await;

    assert_eq!(ids(&records), vec!["2"]);
}

/// Tests the fallback when the author listing is unavailable.
///
/// Expected: listing retried three times, then the whitelisted mod fetched directly
#[tokio::test]
async fn falls_back_to_whitelisted_mods() {
    let server = MockServer::start().await;
    nexus_mock::mount_failure(&server, &format!("/users/{}/mods.json", AUTHOR), 500, 3).await;
    nexus_mock::mount_mod(
        &server,
        DOMAIN,
        NexusModFactory::new()
            .mod_id(WHITELISTED)
            .name("BF Poofies")
            .updated_at(unix_day(2025, 1, 9))
            .build(),
    )
    .await;

    let records = adapter(&server).fetch(context(10)).await;

    assert_eq!(ids(&records), vec!["11814"]);
    assert_eq!(records[0].title, "BF Poofies");
}

/// Tests both the listing and the fallback failing.
///
/// Expected: empty batch
#[tokio::test]
async fn total_failure_returns_empty() {
    let server = MockServer::start().await;
    nexus_mock::mount_failure(&server, &format!("/users/{}/mods.json", AUTHOR), 500, 3).await;
    nexus_mock::mount_failure(
        &server,
        &format!("/games/{}/mods/{}.json", DOMAIN, WHITELISTED),
        502,
        3,
    )
    .await;

    let records = adapter(&server).fetch(context(10)).await;

    assert!(records.is_empty());
}
