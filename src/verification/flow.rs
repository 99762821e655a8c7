use poise::serenity_prelude::{ChannelId, GuildId, RoleId, UserId};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::types::*;
use super::{FormatValidator, PendingApprovals, VerifyAffordance};
use crate::config::BotConfig;
use crate::error::{BotError, Result};
use crate::gateway::Gateway;
use crate::messages;

/// Drives a member from `Unverified` through `FormatPassed` to `Verified`.
///
/// Verification status itself lives in the member's roles; the only state
/// held here is the set of members with an outstanding confirmation button.
pub struct VerificationFlow<G> {
    gateway: G,
    config: BotConfig,
    validator: FormatValidator,
    pending: PendingApprovals,
}

impl<G: Gateway> VerificationFlow<G> {
    pub fn new(gateway: G, config: BotConfig) -> Self {
        Self {
            validator: FormatValidator::new(config.min_length),
            gateway,
            config,
            pending: PendingApprovals::new(),
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn pending(&self) -> &PendingApprovals {
        &self.pending
    }

    /// Give a newcomer the unverified role and DM them the instructions
    pub async fn handle_join(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        is_self: bool,
    ) -> Result<JoinOutcome> {
        if is_self {
            return Ok(JoinOutcome::Skipped);
        }

        let Some(unverified) = self
            .gateway
            .role_by_name(guild_id, &self.config.unverified_role)
            .await?
        else {
            warn!(
                "Role '{}' not found in guild {}, cannot gate new member {}",
                self.config.unverified_role, guild_id, user_id
            );
            return Ok(JoinOutcome::RoleMissing);
        };

        self.gateway.add_role(guild_id, user_id, unverified).await?;
        info!("Gave '{}' to new member {}", self.config.unverified_role, user_id);

        let dm_delivered = self
            .best_effort_dm(user_id, &messages::join_instructions(&self.config))
            .await;

        Ok(JoinOutcome::Welcomed { dm_delivered })
    }

    /// Whether `channel_id` is the introduction channel
    pub async fn is_introduction_channel(&self, channel_id: ChannelId) -> Result<bool> {
        let name = self.gateway.channel_name(channel_id).await?;
        Ok(name.as_deref() == Some(self.config.introduction_channel.as_str()))
    }

    /// Check a message posted in the introduction channel.
    ///
    /// A passing message from a member without an outstanding button gets one
    /// by DM. A pending member's passing message is left alone. A failing
    /// message is deleted and its author told why, pending or not.
    pub async fn handle_submission(
        &self,
        submission: &IntroSubmission,
    ) -> Result<SubmissionOutcome> {
        let author = submission.author_id;
        let check = self.validator.check(&submission.content);

        if !check.passed() {
            debug!("Introduction from {} rejected: {:?}", author, check);

            let deleted = match self
                .gateway
                .delete_message(submission.channel_id, submission.message_id)
                .await
            {
                Ok(()) => true,
                Err(e) => {
                    warn!("Could not delete introduction from {}: {}", author, e);
                    false
                }
            };
            let notified = self
                .best_effort_dm(author, &messages::format_rejected_message(&self.config))
                .await;

            return Ok(SubmissionOutcome::Rejected { deleted, notified });
        }

        if !self.pending.try_insert(author) {
            debug!("User {} already has a confirmation button", author);
            return Ok(SubmissionOutcome::AlreadyPending);
        }

        let affordance = VerifyAffordance::new(author, submission.guild_id);
        match self
            .gateway
            .send_verify_dm(author, &messages::format_accepted_message(), &affordance)
            .await
        {
            Ok(()) => {
                info!("Introduction from {} accepted, button sent", author);
                if let Err(e) = self
                    .gateway
                    .react(submission.channel_id, submission.message_id, '✅')
                    .await
                {
                    warn!("Could not react to introduction from {}: {}", author, e);
                }
                Ok(SubmissionOutcome::ButtonIssued)
            }
            Err(e) if e.is_forbidden() => {
                info!("User {} does not accept DMs, posting notice", author);
                if let Err(e) = self
                    .gateway
                    .send_message(submission.channel_id, &messages::dm_blocked_notice(author))
                    .await
                {
                    warn!("Could not post DM notice for {}: {}", author, e);
                }
                Ok(SubmissionOutcome::DmBlocked)
            }
            Err(e) => Err(e),
        }
    }

    /// The "Verify Now" button was pressed by `activator`
    pub async fn confirm(
        &self,
        affordance: &VerifyAffordance,
        activator: UserId,
    ) -> Result<ConfirmOutcome> {
        if !affordance.is_bound_to(activator) {
            info!(
                "User {} pressed the verify button issued to {}",
                activator, affordance.user_id
            );
            return Ok(ConfirmOutcome::NotForYou);
        }

        let guild_id = affordance.guild_id;
        let Some(member) = self.gateway.member(guild_id, activator).await? else {
            return Ok(ConfirmOutcome::MemberMissing);
        };

        let unverified = self
            .gateway
            .role_by_name(guild_id, &self.config.unverified_role)
            .await?;
        let verified = self
            .gateway
            .role_by_name(guild_id, &self.config.verified_role)
            .await?;

        let (Some(unverified), Some(verified)) = (unverified, verified) else {
            warn!("Verification roles missing in guild {}", guild_id);
            return Ok(ConfirmOutcome::RolesUnavailable);
        };
        if !member.has_role(unverified) {
            return Ok(ConfirmOutcome::RolesUnavailable);
        }

        self.promote(guild_id, activator, unverified, verified).await?;
        self.pending.remove(activator);
        info!("{} has been fully verified via button press", member.name);

        self.announce(guild_id, |count| {
            messages::verified_announcement(activator, count)
        })
        .await;

        Ok(ConfirmOutcome::Verified)
    }

    /// Administrator override: verify a member without the format check
    pub async fn manual_verify(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<ManualVerifyOutcome> {
        let member = self
            .gateway
            .member(guild_id, user_id)
            .await?
            .ok_or_else(|| BotError::MemberNotFound {
                id: user_id.to_string(),
            })?;

        let unverified = self
            .gateway
            .role_by_name(guild_id, &self.config.unverified_role)
            .await?;
        let Some(unverified) = unverified.filter(|role| member.has_role(*role)) else {
            return Ok(ManualVerifyOutcome::AlreadyVerified);
        };
        let verified = self.require_role(guild_id, &self.config.verified_role).await?;

        self.promote(guild_id, user_id, unverified, verified).await?;
        self.pending.remove(user_id);
        info!("{} has been manually verified", member.name);

        self.announce(guild_id, |count| {
            messages::manual_verified_announcement(user_id, count)
        })
        .await;

        Ok(ManualVerifyOutcome::Verified)
    }

    /// DM every human member still holding the unverified role
    pub async fn remind_unverified(&self, guild_id: GuildId) -> Result<ReminderReport> {
        let unverified = self.require_role(guild_id, &self.config.unverified_role).await?;
        let members = self.gateway.members(guild_id).await?;

        let mut report = ReminderReport::default();
        for member in members
            .iter()
            .filter(|m| !m.bot && m.has_role(unverified))
        {
            let reminder = messages::reminder_message(&member.name, &self.config);
            if self.best_effort_dm(member.id, &reminder).await {
                report.reminded += 1;
            } else {
                report.failed += 1;
            }
        }

        info!(
            "Sent {} verification reminders in guild {} ({} undeliverable)",
            report.reminded, guild_id, report.failed
        );
        Ok(report)
    }

    /// Post the heading and the copyable template in the format channel
    pub async fn post_template(&self, guild_id: GuildId) -> Result<ChannelId> {
        let channel_id = self
            .gateway
            .channel_by_name(guild_id, &self.config.format_channel)
            .await?
            .ok_or_else(|| BotError::ChannelNotFound {
                name: self.config.format_channel.clone(),
            })?;

        self.gateway
            .send_message(channel_id, &messages::template_heading(&self.config))
            .await?;
        self.gateway
            .send_message(channel_id, &messages::template_block())
            .await?;

        info!("Posted introduction template in guild {}", guild_id);
        Ok(channel_id)
    }

    async fn promote(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        unverified: RoleId,
        verified: RoleId,
    ) -> Result<()> {
        self.gateway.add_role(guild_id, user_id, verified).await?;
        self.gateway.remove_role(guild_id, user_id, unverified).await?;
        Ok(())
    }

    async fn require_role(&self, guild_id: GuildId, name: &str) -> Result<RoleId> {
        self.gateway
            .role_by_name(guild_id, name)
            .await?
            .ok_or_else(|| BotError::RoleNotFound {
                name: name.to_string(),
            })
    }

    /// Post in the welcome channel, if there is one, with the member count
    async fn announce(&self, guild_id: GuildId, render: impl FnOnce(u64) -> String + Send) {
        let channel = match self
            .gateway
            .channel_by_name(guild_id, &self.config.welcome_channel)
            .await
        {
            Ok(Some(channel)) => channel,
            Ok(None) => {
                debug!("No '{}' channel in guild {}", self.config.welcome_channel, guild_id);
                return;
            }
            Err(e) => {
                warn!("Could not look up welcome channel: {}", e);
                return;
            }
        };

        let member_count = match self.gateway.member_count(guild_id).await {
            Ok(count) => count,
            Err(e) => {
                warn!("Could not read member count of guild {}: {}", guild_id, e);
                return;
            }
        };

        if let Err(e) = self.gateway.send_message(channel, &render(member_count)).await {
            warn!("Could not post welcome announcement: {}", e);
        }
    }

    async fn best_effort_dm(&self, user_id: UserId, content: &str) -> bool {
        match self.gateway.send_dm(user_id, content).await {
            Ok(()) => true,
            Err(e) if e.is_forbidden() => {
                debug!("User {} does not accept DMs", user_id);
                false
            }
            Err(e) => {
                warn!("Failed to DM user {}: {}", user_id, e);
                false
            }
        }
    }
}

/// Shared verification flow type
pub type SharedVerificationFlow<G> = Arc<VerificationFlow<G>>;

pub fn create_shared_verification_flow<G: Gateway>(
    gateway: G,
    config: BotConfig,
) -> SharedVerificationFlow<G> {
    Arc::new(VerificationFlow::new(gateway, config))
}
