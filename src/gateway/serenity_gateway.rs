use async_trait::async_trait;
use futures::TryStreamExt;
use poise::serenity_prelude::{
    self as serenity, Cache, ChannelId, GuildId, Http, MessageId, RoleId, UserId,
};
use std::sync::Arc;
use tracing::debug;

use super::{Gateway, MemberInfo};
use crate::error::{status_code, Result};
use crate::verification::VerifyAffordance;

/// `Gateway` over serenity's HTTP client, reading the cache first where
/// serenity keeps the data (roles, channels, member count).
#[derive(Clone)]
pub struct SerenityGateway {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl SerenityGateway {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }
}

#[async_trait]
impl Gateway for SerenityGateway {
    async fn role_by_name(&self, guild_id: GuildId, name: &str) -> Result<Option<RoleId>> {
        let cached = guild_id.to_guild_cached(&self.cache).map(|guild| {
            guild
                .roles
                .values()
                .find(|role| role.name == name)
                .map(|role| role.id)
        });
        if let Some(role_id) = cached {
            return Ok(role_id);
        }

        let roles = guild_id.roles(&self.http).await?;
        Ok(roles
            .into_iter()
            .find(|(_, role)| role.name == name)
            .map(|(id, _)| id))
    }

    async fn channel_by_name(&self, guild_id: GuildId, name: &str) -> Result<Option<ChannelId>> {
        let cached = guild_id.to_guild_cached(&self.cache).map(|guild| {
            guild
                .channels
                .values()
                .find(|channel| channel.name == name)
                .map(|channel| channel.id)
        });
        if let Some(channel_id) = cached {
            return Ok(channel_id);
        }

        let channels = guild_id.channels(&self.http).await?;
        Ok(channels
            .into_iter()
            .find(|(_, channel)| channel.name == name)
            .map(|(id, _)| id))
    }

    async fn channel_name(&self, channel_id: ChannelId) -> Result<Option<String>> {
        let channel = channel_id
            .to_channel((&self.cache, self.http.as_ref()))
            .await?;
        Ok(channel.guild().map(|channel| channel.name))
    }

    async fn member(&self, guild_id: GuildId, user_id: UserId) -> Result<Option<MemberInfo>> {
        match guild_id
            .member((&self.cache, self.http.as_ref()), user_id)
            .await
        {
            Ok(member) => Ok(Some(member_info(&member))),
            Err(e) if status_code(&e) == Some(404) => {
                debug!("User {} is not a member of guild {}", user_id, guild_id);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn members(&self, guild_id: GuildId) -> Result<Vec<MemberInfo>> {
        let members: Vec<serenity::Member> =
            guild_id.members_iter(&self.http).try_collect().await?;
        Ok(members.iter().map(member_info).collect())
    }

    async fn member_count(&self, guild_id: GuildId) -> Result<u64> {
        let cached = guild_id
            .to_guild_cached(&self.cache)
            .map(|guild| guild.member_count);
        if let Some(count) = cached {
            return Ok(count);
        }

        let guild = guild_id.to_partial_guild_with_counts(&self.http).await?;
        Ok(guild.approximate_member_count.unwrap_or_default())
    }

    async fn add_role(&self, guild_id: GuildId, user_id: UserId, role_id: RoleId) -> Result<()> {
        self.http
            .add_member_role(guild_id, user_id, role_id, None)
            .await?;
        Ok(())
    }

    async fn remove_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()> {
        self.http
            .remove_member_role(guild_id, user_id, role_id, None)
            .await?;
        Ok(())
    }

    async fn send_message(&self, channel_id: ChannelId, content: &str) -> Result<()> {
        channel_id.say(&self.http, content).await?;
        Ok(())
    }

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<()> {
        channel_id.delete_message(&self.http, message_id).await?;
        Ok(())
    }

    async fn react(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: char,
    ) -> Result<()> {
        channel_id
            .create_reaction(&self.http, message_id, emoji)
            .await?;
        Ok(())
    }

    async fn send_dm(&self, user_id: UserId, content: &str) -> Result<()> {
        let dm_channel = user_id.create_dm_channel(&self.http).await?;
        dm_channel
            .send_message(&self.http, serenity::CreateMessage::new().content(content))
            .await?;
        Ok(())
    }

    async fn send_verify_dm(
        &self,
        user_id: UserId,
        content: &str,
        affordance: &VerifyAffordance,
    ) -> Result<()> {
        let dm_channel = user_id.create_dm_channel(&self.http).await?;
        dm_channel
            .send_message(
                &self.http,
                serenity::CreateMessage::new()
                    .content(content)
                    .components(affordance.components(false)),
            )
            .await?;
        Ok(())
    }
}

fn member_info(member: &serenity::Member) -> MemberInfo {
    MemberInfo {
        id: member.user.id,
        name: member.user.name.clone(),
        bot: member.user.bot,
        roles: member.roles.clone(),
    }
}
