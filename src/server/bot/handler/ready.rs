//! Ready event handler for bot initialization.
//!
//! Runs the one-time setup that needs a gateway connection: slash-command registration
//! (skipped once the registration marker exists) and the role-reaction message, which is
//! reused when the tracked message still carries the expected embed and posted anew
//! otherwise.

use serenity::all::{
    ApplicationId, ChannelId, Command, Context, CreateMessage, EmojiId, MessageId, ReactionType,
    Ready,
};

use crate::server::{
    bot::{command::commands, handler::Handler},
    error::AppError,
    model::role_reaction::ROLE_REACTION_TITLE,
    service::{dispatcher::build_embed, role_reaction::role_reaction_embed},
};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `handler` - Event handler holding the bot services
/// - `ctx` - Discord context for REST calls
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(handler: &Handler, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    register_commands(handler, &ctx, &ready).await;

    if let Err(e) = ensure_role_message(handler, &ctx).await {
        tracing::error!("Failed to set up role-reaction message: {}", e);
    }
}

async fn register_commands(handler: &Handler, ctx: &Context, ready: &Ready) {
    if handler.registration.is_registered() {
        tracing::info!("Slash commands already registered, skipping");
        return;
    }

    let application_id = handler
        .client_id
        .map(ApplicationId::new)
        .unwrap_or(ready.application.id);
    ctx.http.set_application_id(application_id);

    tracing::info!("Registering slash commands...");
    match Command::set_global_commands(&ctx.http, commands()).await {
        Ok(registered) => {
            tracing::info!("Registered {} slash commands", registered.len());
            if let Err(e) = handler.registration.mark_registered() {
                tracing::error!("Failed to write command registration marker: {}", e);
            }
        }
        Err(e) => tracing::error!("Error registering slash commands: {}", e),
    }
}

/// Makes sure the role-reaction message exists and is tracked.
///
/// # Returns
/// - `Ok(())` - Existing message reused, new message posted, or feature not configured
/// - `Err(AppError)` - Posting the new message failed
async fn ensure_role_message(handler: &Handler, ctx: &Context) -> Result<(), AppError> {
    let service = &handler.role_reactions;
    let Some(channel_id) = handler.welcome_channel_id.map(ChannelId::new) else {
        tracing::info!("WELCOME_CHANNEL_ID not set, role reactions disabled");
        return Ok(());
    };
    if service.mapping().is_empty() {
        tracing::info!("ROLE_REACTIONS not set, role reactions disabled");
        return Ok(());
    }

    if let Some(message_id) = service.tracked_message() {
        match channel_id
            .message(&ctx.http, MessageId::new(message_id))
            .await
        {
            Ok(message) => {
                let title = message.embeds.first().and_then(|embed| embed.title.as_deref());
                if title == Some(ROLE_REACTION_TITLE) {
                    tracing::info!("Found existing role-reaction message {}", message_id);
                    return Ok(());
                }
                tracing::info!(
                    "Message {} is not the role-reaction embed, posting new one",
                    message_id
                );
            }
            Err(e) => {
                tracing::error!("Error fetching role-reaction message {}: {}", message_id, e)
            }
        }
    } else {
        tracing::info!("No role-reaction message id configured");
    }

    let embed = build_embed(&role_reaction_embed(service.mapping()))?;
    let message = channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;
    service.track_message(message.id.get());

    tracing::info!(
        "New role-reaction message posted with ID {}. Set REACTION_ROLE_MESSAGE_ID to keep it",
        message.id
    );

    for entry in &service.mapping().entries {
        let emoji = ReactionType::Custom {
            animated: false,
            id: EmojiId::new(entry.emoji_id),
            name: Some(entry.label.clone()),
        };
        if let Err(e) = message.react(&ctx.http, emoji).await {
            tracing::error!("Failed to react with emoji {}: {}", entry.emoji_id, e);
        }
    }

    Ok(())
}
