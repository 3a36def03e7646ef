use std::sync::Arc;

use serenity::all::{Context, EventHandler, Interaction, Message, Reaction, Ready};
use serenity::async_trait;

use crate::server::{
    data::registration::RegistrationMarker,
    service::{
        moderation::ModerationService, role_reaction::RoleReactionService,
        translation::TranslationService,
    },
};

pub mod interaction;
pub mod message;
pub mod reaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub translation: Arc<TranslationService>,
    pub moderation: Arc<ModerationService>,
    pub role_reactions: Arc<RoleReactionService>,
    /// Marker recording that slash commands were registered.
    pub registration: RegistrationMarker,
    /// Application id override for command registration.
    pub client_id: Option<u64>,
    /// Channel holding the role-reaction message.
    pub welcome_channel_id: Option<u64>,
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(self, ctx, ready).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(self, ctx, message).await;
    }

    /// Called when a reaction is added to a message
    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        reaction::handle_reaction_add(&self.role_reactions, ctx, reaction).await;
    }

    /// Called when a reaction is removed from a message
    async fn reaction_remove(&self, ctx: Context, reaction: Reaction) {
        reaction::handle_reaction_remove(&self.role_reactions, ctx, reaction).await;
    }

    /// Called when a slash command or context-menu command is invoked
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.translation, ctx, interaction).await;
    }
}
