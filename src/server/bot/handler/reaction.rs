//! Role-reaction event handlers.
//!
//! Converts gateway reactions into `ReactionEvent`s and hands them to the role-reaction
//! service, which ignores anything outside the tracked message.

use serenity::all::{Context, Reaction, ReactionType};

use crate::server::{
    model::role_reaction::ReactionEvent, service::role_reaction::RoleReactionService,
};

/// Reduces a gateway reaction to the fields the role planner uses.
///
/// # Returns
/// - `Some((guild_id, ReactionEvent))` - Reaction in a guild with a known user
/// - `None` - Reaction in a DM or without user information
pub fn reaction_event(reaction: &Reaction) -> Option<(u64, ReactionEvent)> {
    let guild_id = reaction.guild_id?.get();
    let user_id = reaction.user_id?.get();
    let emoji_id = match &reaction.emoji {
        ReactionType::Custom { id, .. } => Some(id.get()),
        _ => None,
    };

    Some((
        guild_id,
        ReactionEvent {
            message_id: reaction.message_id.get(),
            user_id,
            emoji_id,
        },
    ))
}

/// Handle a reaction being added
pub async fn handle_reaction_add(service: &RoleReactionService, ctx: Context, reaction: Reaction) {
    let Some((guild_id, event)) = reaction_event(&reaction) else {
        return;
    };
    let bot_user_id = ctx.cache.current_user().id.get();

    match service.handle_add(guild_id, &event, bot_user_id).await {
        Ok(0) => {}
        Ok(failures) => tracing::warn!(
            "{} role changes failed for user {} on reaction add",
            failures,
            event.user_id
        ),
        Err(e) => tracing::error!("Failed to read roles of user {}: {}", event.user_id, e),
    }
}

/// Handle a reaction being removed
pub async fn handle_reaction_remove(
    service: &RoleReactionService,
    ctx: Context,
    reaction: Reaction,
) {
    let Some((guild_id, event)) = reaction_event(&reaction) else {
        return;
    };
    let bot_user_id = ctx.cache.current_user().id.get();

    match service.handle_remove(guild_id, &event, bot_user_id).await {
        Ok(0) => {}
        Ok(failures) => tracing::warn!(
            "{} role changes failed for user {} on reaction remove",
            failures,
            event.user_id
        ),
        Err(e) => tracing::error!("Failed to read roles of user {}: {}", event.user_id, e),
    }
}
