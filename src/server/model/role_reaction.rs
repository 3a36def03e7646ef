//! Role-reaction domain models.
//!
//! A single tracked message carries one reaction per "class" emoji. Reacting grants the
//! mapped role and revokes every other mapped role, so a member holds at most one class
//! role at a time.

/// Title of the role-reaction embed, also used to recognize a previously posted message.
pub const ROLE_REACTION_TITLE: &str = "The strongest stars have hearts of...";

/// One emoji → role binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleReaction {
    pub emoji_id: u64,
    pub role_id: u64,
    /// Emoji name used when rendering the embed.
    pub label: String,
}

/// Fixed set of emoji → role bindings for the tracked message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleMapping {
    pub entries: Vec<RoleReaction>,
}

impl RoleMapping {
    pub fn new(entries: Vec<RoleReaction>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Role bound to the given custom emoji, if any.
    pub fn role_for(&self, emoji_id: u64) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.emoji_id == emoji_id)
            .map(|entry| entry.role_id)
    }

    /// Every mapped role id.
    pub fn role_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|entry| entry.role_id)
    }
}

/// Reaction event reduced to the fields the role planner needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub message_id: u64,
    pub user_id: u64,
    /// `None` for unicode emoji, which never map to a role.
    pub emoji_id: Option<u64>,
}

/// A single role change to apply to a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleMutation {
    Add(u64),
    Remove(u64),
}
