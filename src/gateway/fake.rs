//! In-memory `Gateway` used by the flow and command tests.

use async_trait::async_trait;
use poise::serenity_prelude::{ChannelId, GuildId, MessageId, RoleId, UserId};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::{Gateway, MemberInfo};
use crate::error::{BotError, Result};
use crate::verification::VerifyAffordance;

#[derive(Default)]
struct FakeState {
    roles: HashMap<String, RoleId>,
    channels: HashMap<String, ChannelId>,
    members: HashMap<UserId, MemberInfo>,
    dm_blocked: HashSet<UserId>,
    locked_channels: HashSet<ChannelId>,
    protected_messages: HashSet<MessageId>,
    sent: Vec<(ChannelId, String)>,
    dms: Vec<(UserId, String)>,
    verify_dms: Vec<(UserId, VerifyAffordance)>,
    deleted: Vec<MessageId>,
    reactions: Vec<(MessageId, char)>,
    next_id: u64,
}

/// A single guild held in memory. Role and message operations mutate it,
/// sends are recorded for assertions.
#[derive(Default)]
pub struct FakeGateway {
    state: Mutex<FakeState>,
}

fn forbidden(what: &str) -> BotError {
    BotError::PermissionDenied {
        message: what.to_string(),
    }
}

impl FakeGateway {
    pub fn new() -> Self {
        let gateway = Self::default();
        gateway.state.lock().unwrap().next_id = 1000;
        gateway
    }

    fn next_id(&self) -> u64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        state.next_id
    }

    pub fn with_role(self, name: &str) -> Self {
        let id = RoleId::new(self.next_id());
        self.state.lock().unwrap().roles.insert(name.to_string(), id);
        self
    }

    pub fn with_channel(self, name: &str) -> Self {
        let id = ChannelId::new(self.next_id());
        self.state
            .lock()
            .unwrap()
            .channels
            .insert(name.to_string(), id);
        self
    }

    pub fn add_member(&self, id: u64, name: &str, bot: bool, roles: &[&str]) -> UserId {
        let user_id = UserId::new(id);
        let mut state = self.state.lock().unwrap();
        let roles = roles
            .iter()
            .filter_map(|name| state.roles.get(*name).copied())
            .collect();
        state.members.insert(
            user_id,
            MemberInfo {
                id: user_id,
                name: name.to_string(),
                bot,
                roles,
            },
        );
        user_id
    }

    pub fn block_dms(&self, user_id: UserId) {
        self.state.lock().unwrap().dm_blocked.insert(user_id);
    }

    pub fn lock_channel(&self, name: &str) {
        let channel_id = self.channel(name);
        self.state.lock().unwrap().locked_channels.insert(channel_id);
    }

    pub fn protect_message(&self, message_id: MessageId) {
        self.state
            .lock()
            .unwrap()
            .protected_messages
            .insert(message_id);
    }

    pub fn channel(&self, name: &str) -> ChannelId {
        self.state.lock().unwrap().channels[name]
    }

    pub fn member_has_role(&self, user_id: UserId, role: &str) -> bool {
        let state = self.state.lock().unwrap();
        match (state.members.get(&user_id), state.roles.get(role)) {
            (Some(member), Some(role_id)) => member.has_role(*role_id),
            _ => false,
        }
    }

    pub fn sent_to(&self, channel: &str) -> Vec<String> {
        let channel_id = self.channel(channel);
        self.state
            .lock()
            .unwrap()
            .sent
            .iter()
            .filter(|(id, _)| *id == channel_id)
            .map(|(_, content)| content.clone())
            .collect()
    }

    pub fn dms_to(&self, user_id: UserId) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .dms
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, content)| content.clone())
            .collect()
    }

    pub fn verify_dms(&self) -> Vec<(UserId, VerifyAffordance)> {
        self.state.lock().unwrap().verify_dms.clone()
    }

    pub fn deleted(&self) -> Vec<MessageId> {
        self.state.lock().unwrap().deleted.clone()
    }

    pub fn reactions(&self) -> Vec<(MessageId, char)> {
        self.state.lock().unwrap().reactions.clone()
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn role_by_name(&self, _guild_id: GuildId, name: &str) -> Result<Option<RoleId>> {
        Ok(self.state.lock().unwrap().roles.get(name).copied())
    }

    async fn channel_by_name(&self, _guild_id: GuildId, name: &str) -> Result<Option<ChannelId>> {
        Ok(self.state.lock().unwrap().channels.get(name).copied())
    }

    async fn channel_name(&self, channel_id: ChannelId) -> Result<Option<String>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .channels
            .iter()
            .find(|(_, id)| **id == channel_id)
            .map(|(name, _)| name.clone()))
    }

    async fn member(&self, _guild_id: GuildId, user_id: UserId) -> Result<Option<MemberInfo>> {
        Ok(self.state.lock().unwrap().members.get(&user_id).cloned())
    }

    async fn members(&self, _guild_id: GuildId) -> Result<Vec<MemberInfo>> {
        let state = self.state.lock().unwrap();
        let mut members: Vec<MemberInfo> = state.members.values().cloned().collect();
        members.sort_by_key(|m| m.id);
        Ok(members)
    }

    async fn member_count(&self, _guild_id: GuildId) -> Result<u64> {
        Ok(self.state.lock().unwrap().members.len() as u64)
    }

    async fn add_role(&self, _guild_id: GuildId, user_id: UserId, role_id: RoleId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let member = state
            .members
            .get_mut(&user_id)
            .ok_or_else(|| BotError::MemberNotFound {
                id: user_id.to_string(),
            })?;
        if !member.roles.contains(&role_id) {
            member.roles.push(role_id);
        }
        Ok(())
    }

    async fn remove_role(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let member = state
            .members
            .get_mut(&user_id)
            .ok_or_else(|| BotError::MemberNotFound {
                id: user_id.to_string(),
            })?;
        member.roles.retain(|id| *id != role_id);
        Ok(())
    }

    async fn send_message(&self, channel_id: ChannelId, content: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.locked_channels.contains(&channel_id) {
            return Err(forbidden("Missing Access"));
        }
        state.sent.push((channel_id, content.to_string()));
        Ok(())
    }

    async fn delete_message(&self, _channel_id: ChannelId, message_id: MessageId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.protected_messages.contains(&message_id) {
            return Err(forbidden("Missing Permissions"));
        }
        state.deleted.push(message_id);
        Ok(())
    }

    async fn react(
        &self,
        _channel_id: ChannelId,
        message_id: MessageId,
        emoji: char,
    ) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .reactions
            .push((message_id, emoji));
        Ok(())
    }

    async fn send_dm(&self, user_id: UserId, content: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.dm_blocked.contains(&user_id) {
            return Err(forbidden("Cannot send messages to this user"));
        }
        state.dms.push((user_id, content.to_string()));
        Ok(())
    }

    async fn send_verify_dm(
        &self,
        user_id: UserId,
        content: &str,
        affordance: &VerifyAffordance,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.dm_blocked.contains(&user_id) {
            return Err(forbidden("Cannot send messages to this user"));
        }
        state.dms.push((user_id, content.to_string()));
        state.verify_dms.push((user_id, *affordance));
        Ok(())
    }
}
