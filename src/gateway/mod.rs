//! Everything the bot asks of the chat platform, behind one trait.
//!
//! `SerenityGateway` talks to Discord; tests drive the verification flow
//! against the in-memory `FakeGateway`. Permission failures come back as
//! `BotError::PermissionDenied` so callers can treat them as non-fatal.

mod serenity_gateway;

#[cfg(test)]
pub mod fake;

pub use serenity_gateway::SerenityGateway;

use async_trait::async_trait;
use poise::serenity_prelude::{ChannelId, GuildId, MessageId, RoleId, UserId};

use crate::error::Result;
use crate::verification::VerifyAffordance;

/// The parts of a guild member the bot reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub id: UserId,
    pub name: String,
    pub bot: bool,
    pub roles: Vec<RoleId>,
}

impl MemberInfo {
    pub fn has_role(&self, role_id: RoleId) -> bool {
        self.roles.contains(&role_id)
    }
}

#[async_trait]
pub trait Gateway: Send + Sync {
    async fn role_by_name(&self, guild_id: GuildId, name: &str) -> Result<Option<RoleId>>;

    async fn channel_by_name(&self, guild_id: GuildId, name: &str) -> Result<Option<ChannelId>>;

    /// Name of a guild text channel; `None` for DMs and unknown channels
    async fn channel_name(&self, channel_id: ChannelId) -> Result<Option<String>>;

    async fn member(&self, guild_id: GuildId, user_id: UserId) -> Result<Option<MemberInfo>>;

    async fn members(&self, guild_id: GuildId) -> Result<Vec<MemberInfo>>;

    async fn member_count(&self, guild_id: GuildId) -> Result<u64>;

    async fn add_role(&self, guild_id: GuildId, user_id: UserId, role_id: RoleId) -> Result<()>;

    async fn remove_role(&self, guild_id: GuildId, user_id: UserId, role_id: RoleId)
        -> Result<()>;

    async fn send_message(&self, channel_id: ChannelId, content: &str) -> Result<()>;

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<()>;

    async fn react(&self, channel_id: ChannelId, message_id: MessageId, emoji: char)
        -> Result<()>;

    async fn send_dm(&self, user_id: UserId, content: &str) -> Result<()>;

    /// Direct message carrying the confirmation button
    async fn send_verify_dm(
        &self,
        user_id: UserId,
        content: &str,
        affordance: &VerifyAffordance,
    ) -> Result<()>;
}
