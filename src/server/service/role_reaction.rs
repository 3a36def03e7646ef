//! Role-reaction "claim a class" mechanic.
//!
//! Planning is pure: given a reaction event, the mapping and the member's current roles,
//! `plan_reaction_add` / `plan_reaction_remove` return the role mutations to apply. The
//! service applies them one by one through `MemberRoleOps`; every mutation is attempted
//! regardless of whether an earlier one failed.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serenity::{
    all::{GuildId, RoleId, UserId},
    http::Http,
};

use crate::server::{
    error::AppError,
    model::{
        notification::EmbedSpec,
        role_reaction::{ReactionEvent, RoleMapping, RoleMutation, ROLE_REACTION_TITLE},
    },
};

const ROLE_REACTION_COLOR: u32 = 0xFFD700;

/// Embed of the role-reaction message, listing every mapped emoji with its label.
pub fn role_reaction_embed(mapping: &RoleMapping) -> EmbedSpec {
    let lines: Vec<String> = mapping
        .entries
        .iter()
        .map(|entry| format!("<:{}:{}> {}", entry.label, entry.emoji_id, entry.label))
        .collect();

    EmbedSpec {
        title: ROLE_REACTION_TITLE.to_string(),
        description: Some(format!(
            "Across the galaxy, every warrior channels power through a crystal attuned to \
             their essence.\n\n{}",
            lines.join("\n")
        )),
        color: ROLE_REACTION_COLOR,
        footer: Some("React to claim your role (only one role allowed at a time)!".to_string()),
        ..Default::default()
    }
}

/// Plans the mutations for an added reaction.
///
/// Other mapped roles the member holds are removed first, then the reacted role is added
/// if missing. A member ends up with at most one mapped role.
///
/// # Arguments
/// - `event` - Reaction that was added
/// - `mapping` - Emoji → role bindings
/// - `member_roles` - Roles the member currently holds
///
/// # Returns
/// - `Vec<RoleMutation>` - Removals followed by at most one addition; empty when the emoji
///   is not mapped or nothing changes
pub fn plan_reaction_add(
    event: &ReactionEvent,
    mapping: &RoleMapping,
    member_roles: &[u64],
) -> Vec<RoleMutation> {
    let Some(role_id) = event.emoji_id.and_then(|emoji_id| mapping.role_for(emoji_id)) else {
        return Vec::new();
    };

    let mut mutations: Vec<RoleMutation> = mapping
        .role_ids()
        .filter(|other| *other != role_id && member_roles.contains(other))
        .map(RoleMutation::Remove)
        .collect();

    if !member_roles.contains(&role_id) {
        mutations.push(RoleMutation::Add(role_id));
    }

    mutations
}

/// Plans the mutations for a removed reaction.
///
/// # Returns
/// - `Vec<RoleMutation>` - Removal of the mapped role if the member holds it, else empty
pub fn plan_reaction_remove(
    event: &ReactionEvent,
    mapping: &RoleMapping,
    member_roles: &[u64],
) -> Vec<RoleMutation> {
    event
        .emoji_id
        .and_then(|emoji_id| mapping.role_for(emoji_id))
        .filter(|role_id| member_roles.contains(role_id))
        .map(|role_id| vec![RoleMutation::Remove(role_id)])
        .unwrap_or_default()
}

/// Member role operations of the messaging platform.
#[serenity::async_trait]
pub trait MemberRoleOps: Send + Sync {
    async fn member_roles(&self, guild_id: u64, user_id: u64) -> Result<Vec<u64>, AppError>;
    async fn add_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<(), AppError>;
    async fn remove_role(&self, guild_id: u64, user_id: u64, role_id: u64)
        -> Result<(), AppError>;
}

/// `MemberRoleOps` backed by the Discord REST API.
pub struct DiscordRoleOps {
    http: Arc<Http>,
}

impl DiscordRoleOps {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[serenity::async_trait]
impl MemberRoleOps for DiscordRoleOps {
    async fn member_roles(&self, guild_id: u64, user_id: u64) -> Result<Vec<u64>, AppError> {
        let member = self
            .http
            .get_member(GuildId::new(guild_id), UserId::new(user_id))
            .await?;

        Ok(member.roles.iter().map(|role| role.get()).collect())
    }

    async fn add_role(&self, guild_id: u64, user_id: u64, role_id: u64) -> Result<(), AppError> {
        self.http
            .add_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                Some("Role reaction"),
            )
            .await?;
        Ok(())
    }

    async fn remove_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), AppError> {
        self.http
            .remove_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                Some("Role reaction"),
            )
            .await?;
        Ok(())
    }
}

/// Applies role reactions on the tracked message.
pub struct RoleReactionService {
    ops: Arc<dyn MemberRoleOps>,
    mapping: RoleMapping,
    /// Id of the tracked message, 0 while none is posted.
    tracked_message: AtomicU64,
}

impl RoleReactionService {
    /// Creates a new RoleReactionService.
    ///
    /// # Arguments
    /// - `ops` - Member role operations
    /// - `mapping` - Emoji → role bindings
    /// - `tracked_message` - Configured message id, if any
    pub fn new(
        ops: Arc<dyn MemberRoleOps>,
        mapping: RoleMapping,
        tracked_message: Option<u64>,
    ) -> Self {
        Self {
            ops,
            mapping,
            tracked_message: AtomicU64::new(tracked_message.unwrap_or(0)),
        }
    }

    pub fn mapping(&self) -> &RoleMapping {
        &self.mapping
    }

    pub fn tracked_message(&self) -> Option<u64> {
        match self.tracked_message.load(Ordering::Acquire) {
            0 => None,
            id => Some(id),
        }
    }

    /// Switches tracking to a newly posted message.
    pub fn track_message(&self, message_id: u64) {
        self.tracked_message.store(message_id, Ordering::Release);
    }

    /// Whether an event concerns the tracked message and was not caused by the bot.
    pub fn is_relevant(&self, event: &ReactionEvent, bot_user_id: u64) -> bool {
        self.tracked_message() == Some(event.message_id) && event.user_id != bot_user_id
    }

    /// Handles an added reaction.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of mutations that failed; each failure is logged
    /// - `Err(AppError)` - Member roles could not be read; nothing was changed
    pub async fn handle_add(
        &self,
        guild_id: u64,
        event: &ReactionEvent,
        bot_user_id: u64,
    ) -> Result<usize, AppError> {
        if !self.is_relevant(event, bot_user_id) {
            return Ok(0);
        }

        let member_roles = self.ops.member_roles(guild_id, event.user_id).await?;
        let mutations = plan_reaction_add(event, &self.mapping, &member_roles);

        Ok(self.apply(guild_id, event.user_id, &mutations).await)
    }

    /// Handles a removed reaction.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of mutations that failed
    /// - `Err(AppError)` - Member roles could not be read
    pub async fn handle_remove(
        &self,
        guild_id: u64,
        event: &ReactionEvent,
        bot_user_id: u64,
    ) -> Result<usize, AppError> {
        if !self.is_relevant(event, bot_user_id) {
            return Ok(0);
        }

        let member_roles = self.ops.member_roles(guild_id, event.user_id).await?;
        let mutations = plan_reaction_remove(event, &self.mapping, &member_roles);

        Ok(self.apply(guild_id, event.user_id, &mutations).await)
    }

    async fn apply(&self, guild_id: u64, user_id: u64, mutations: &[RoleMutation]) -> usize {
        let mut failures = 0;

        for mutation in mutations {
            let result = match mutation {
                RoleMutation::Add(role_id) => self.ops.add_role(guild_id, user_id, *role_id).await,
                RoleMutation::Remove(role_id) => {
                    self.ops.remove_role(guild_id, user_id, *role_id).await
                }
            };

            match result {
                Ok(()) => tracing::info!("Applied {:?} for user {}", mutation, user_id),
                Err(e) => {
                    failures += 1;
                    tracing::error!("Failed to apply {:?} for user {}: {}", mutation, user_id, e);
                }
            }
        }

        failures
    }
}
