use std::{sync::Arc, time::Duration};

use chrono::{DateTime, TimeZone, Utc};
use test_utils::{
    factory::{
        helpers::unix_day,
        nexus_mod::{create_nexus_mod, NexusModFactory},
    },
    mock::nexus::{self as nexus_mock, TEST_API_KEY},
};
use wiremock::MockServer;

use crate::server::{
    model::record::Record,
    service::adapter::{
        nexus::{NexusClient, NexusSettings},
        retry::RetryPolicy,
        FetchAdapter, FetchContext,
    },
};

mod articles;
mod general_mods;
mod personal_mods;

const DOMAIN: &str = "testgame";

fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(1))
}

fn nexus_client(server: &MockServer) -> Arc<NexusClient> {
    Arc::new(NexusClient::new(
        reqwest::Client::new(),
        NexusSettings {
            api_url: server.uri(),
            site_url: "https://www.nexusmods.com".to_string(),
            api_key: TEST_API_KEY.to_string(),
            game_domain: DOMAIN.to_string(),
            debug: false,
        },
        fast_retry(),
    ))
}

fn day(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap()
}

fn context(now_day: u32) -> FetchContext {
    FetchContext {
        last_checked: None,
        now: day(now_day),
    }
}

fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.identity()).collect()
}
