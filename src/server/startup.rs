//! Process wiring.
//!
//! Builds the shared clients, loads every store from the data directory, seeds the
//! personal feed, and assembles the feed engines, the status monitor and the bot's event
//! handler. Nothing here talks to the gateway; that happens once the bot is started.

use std::{path::Path, sync::Arc, time::Duration};

use serenity::http::Http;
use tracing_subscriber::EnvFilter;

use crate::server::{
    bot::handler::Handler,
    config::Config,
    data::{
        mapping_store::MappingStore,
        ordered_store::{OrderedLayout, OrderedStore},
        registration::RegistrationMarker,
        user_language::UserLanguageRepository,
    },
    error::AppError,
    model::{notification::MessageStyle, record::Record},
    scheduler::feed_polling::ScheduledFeed,
    service::{
        adapter::{
            articles::ArticlesAdapter,
            general_mods::GeneralModsAdapter,
            nexus::{NexusClient, NexusSettings},
            personal_mods::PersonalModsAdapter,
            retry::RetryPolicy,
            scraper::HttpArticleScraper,
        },
        dispatcher::{Destination, DiscordSink, Dispatcher, MessageSink},
        feed::engine::FeedEngine,
        moderation::ModerationService,
        role_reaction::{DiscordRoleOps, RoleReactionService},
        status::StatusMonitor,
        translation::TranslationService,
    },
};

pub const MODS_FILE: &str = "mods.json";
pub const PERSONAL_MODS_FILE: &str = "personal_mods.json";
pub const ARTICLES_FILE: &str = "sw_articles.json";
pub const USERS_FILE: &str = "users.json";
pub const COMMANDS_MARKER_FILE: &str = "commands_registered.txt";

const GENERAL_CAP: usize = 100_000;
const PERSONAL_CAP: usize = 1_000;
const ARTICLES_CAP: usize = 100;

/// Mod inserted into an empty personal store so the first run does not announce it.
pub const SEED_MOD_ID: u64 = 11814;
const SEED_MOD_TITLE: &str = "BF Poofies";

const USER_AGENT: &str = concat!("modwatch/", env!("CARGO_PKG_VERSION"));

/// Installs the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, raised to `debug` for this
/// crate when `DEBUG=true`. Runs before configuration is parsed so configuration errors
/// are logged too.
pub fn init_tracing() {
    let debug = std::env::var("DEBUG").is_ok_and(|value| value.eq_ignore_ascii_case("true"));
    let default_filter = if debug { "info,modwatch=debug" } else { "info" };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Logs panics through tracing so they reach the same sink as every other error.
///
/// The panicking task dies; the runtime and the other pollers keep running.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("Uncaught panic: {}", info);
    }));
}

/// Creates the HTTP client shared by the adapters, the status monitor and translation.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::ReqwestErr)` - TLS backend could not be initialized
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    Ok(client)
}

/// Seed record of the personal feed, dated at the personal cutoff.
pub fn personal_seed(config: &Config, nexus: &NexusClient) -> Record {
    Record::new(
        SEED_MOD_ID.to_string(),
        SEED_MOD_TITLE,
        nexus.mod_url(SEED_MOD_ID),
        config.timing.personal_cutoff,
    )
}

/// Loads the stores and builds one engine per enabled feed.
///
/// The personal store is seeded before its engine is returned, so the seed is persisted
/// before the first poll.
///
/// # Arguments
/// - `config` - Application configuration
/// - `http_client` - Shared HTTP client for upstream requests
/// - `sink` - Messaging client used by the dispatcher
///
/// # Returns
/// - `Ok(Vec<ScheduledFeed>)` - General and personal feeds, plus articles when configured
/// - `Err(AppError)` - The news page URL could not be used
pub async fn build_feeds(
    config: &Config,
    http_client: &reqwest::Client,
    sink: Arc<dyn MessageSink>,
) -> Result<Vec<ScheduledFeed>, AppError> {
    let timing = &config.timing;
    let data_dir = &config.data_dir;
    let retry = RetryPolicy::new(timing.fetch_attempts, timing.fetch_backoff);
    let dispatcher = Arc::new(Dispatcher::new(
        sink,
        timing.dispatch_pacing,
        timing.dispatch_timeout,
    ));
    let mod_heading = format!("New Mod Update for {}", config.game_name);

    let nexus = Arc::new(NexusClient::new(
        http_client.clone(),
        NexusSettings {
            api_url: config.nexus.api_url.clone(),
            site_url: config.nexus.site_url.clone(),
            api_key: config.nexus.api_key.clone(),
            game_domain: config.nexus.game_domain.clone(),
            debug: config.debug,
        },
        retry,
    ));

    let general = FeedEngine::new(
        Arc::new(GeneralModsAdapter::new(
            nexus.clone(),
            config.nexus.filter_nsfw,
            timing.general_lookback,
        )),
        OrderedStore::load(data_dir.join(MODS_FILE), OrderedLayout::Flat, GENERAL_CAP).into(),
        dispatcher.clone(),
        Destination {
            channel_id: config.mod_updater_channel_id,
            style: MessageStyle::Text,
            heading: mod_heading.clone(),
        },
    );

    let personal = FeedEngine::new(
        Arc::new(PersonalModsAdapter::new(
            nexus.clone(),
            config.nexus.author_id,
            config.nexus.whitelist.clone(),
            config.nexus.filter_nsfw,
            timing.personal_cutoff,
        )),
        MappingStore::load(data_dir.join(PERSONAL_MODS_FILE), PERSONAL_CAP).into(),
        dispatcher.clone(),
        Destination {
            channel_id: config.personal_channel_id,
            style: MessageStyle::Text,
            heading: mod_heading,
        },
    );

    match personal.seed(personal_seed(config, &nexus)).await {
        Ok(true) => tracing::info!("Seeded personal mods with mod {}", SEED_MOD_ID),
        Ok(false) => {}
        Err(e) => tracing::error!("Failed to persist personal mods seed: {}", e),
    }

    let mut feeds = vec![
        ScheduledFeed {
            engine: Arc::new(general),
            interval: timing.mod_poll_interval,
        },
        ScheduledFeed {
            engine: Arc::new(personal),
            interval: timing.mod_poll_interval,
        },
    ];

    match &config.articles {
        Some(articles) => {
            let scraper = HttpArticleScraper::new(http_client.clone(), articles.news_url.clone())?;
            let engine = FeedEngine::new(
                Arc::new(ArticlesAdapter::new(Arc::new(scraper), retry)),
                OrderedStore::load(
                    data_dir.join(ARTICLES_FILE),
                    OrderedLayout::ByCategory,
                    ARTICLES_CAP,
                )
                .into(),
                dispatcher,
                Destination {
                    channel_id: articles.channel_id,
                    style: MessageStyle::Embed,
                    heading: format!("{} News", config.game_name),
                },
            );

            feeds.push(ScheduledFeed {
                engine: Arc::new(engine),
                interval: timing.article_poll_interval,
            });
        }
        None => tracing::info!("NEWS_URL or ARTICLES_CHANNEL_ID not set, articles feed disabled"),
    }

    Ok(feeds)
}

/// Builds the status monitor when its endpoints and channel are configured.
pub fn build_status_monitor(
    config: &Config,
    http_client: &reqwest::Client,
    sink: Arc<dyn MessageSink>,
) -> Option<(Arc<StatusMonitor>, Duration)> {
    let Some(settings) = config.status.clone() else {
        tracing::info!("Status API not configured, server status monitor disabled");
        return None;
    };

    Some((
        Arc::new(StatusMonitor::new(http_client.clone(), settings, sink)),
        config.timing.status_poll_interval,
    ))
}

/// Builds the gateway event handler and the services behind it.
///
/// # Arguments
/// - `config` - Application configuration
/// - `http_client` - Shared HTTP client for the translation service
/// - `discord_http` - REST client used for member role changes
pub fn build_handler(
    config: &Config,
    http_client: &reqwest::Client,
    discord_http: Arc<Http>,
) -> Handler {
    let data_dir: &Path = &config.data_dir;
    let users = Arc::new(UserLanguageRepository::load(data_dir.join(USERS_FILE)));

    Handler {
        translation: Arc::new(TranslationService::new(
            http_client.clone(),
            config.translate_url.clone(),
            users,
        )),
        moderation: Arc::new(ModerationService::new(config.moderation.clone())),
        role_reactions: Arc::new(RoleReactionService::new(
            Arc::new(DiscordRoleOps::new(discord_http)),
            config.role_reactions.clone(),
            config.reaction_role_message_id,
        )),
        registration: RegistrationMarker::new(data_dir.join(COMMANDS_MARKER_FILE)),
        client_id: config.client_id,
        welcome_channel_id: config.welcome_channel_id,
    }
}

/// Shared Discord REST client and the sink built on it.
pub fn setup_discord_http(config: &Config) -> (Arc<Http>, Arc<dyn MessageSink>) {
    let http = Arc::new(Http::new(&config.discord_token));
    let sink: Arc<dyn MessageSink> = Arc::new(DiscordSink::new(http.clone()));

    (http, sink)
}
