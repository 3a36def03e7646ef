mod server;

use std::net::SocketAddr;

use crate::server::{
    bot, config::Config, error::AppError, router, scheduler::feed_polling, startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();
    startup::install_panic_hook();

    if let Err(e) = run().await {
        tracing::error!("Fatal startup error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    std::fs::create_dir_all(&config.data_dir)?;

    let http_client = startup::setup_reqwest_client()?;
    let (discord_http, sink) = startup::setup_discord_http(&config);

    tracing::info!("Starting {} update watcher", config.game_name);

    let feeds = startup::build_feeds(&config, &http_client, sink.clone()).await?;
    let status = startup::build_status_monitor(&config, &http_client, sink);
    let handler = startup::build_handler(&config, &http_client, discord_http);

    // Start Discord bot in a separate task
    let bot_client = bot::start::init_bot(&config, handler).await?;
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let mut scheduler = feed_polling::start_scheduler(feeds, status).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Health endpoint listening on {}", addr);

    axum::serve(listener, router::router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");
    scheduler.shutdown().await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
