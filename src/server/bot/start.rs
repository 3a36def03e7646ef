use serenity::all::{Client, GatewayIntents};

use crate::server::{bot::handler::Handler, config::Config, error::AppError};

/// Builds the Discord client without connecting.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `handler` - Event handler with the services it dispatches to
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError::DiscordErr)` - Client construction failed
pub async fn init_bot(config: &Config, handler: Handler) -> Result<Client, AppError> {
    // MESSAGE_CONTENT is privileged and must be enabled in the Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGE_REACTIONS;

    let client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Connects to the gateway and runs until the connection ends.
///
/// Should be called from within a `tokio::spawn` task.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
