// src/verification/types.rs
use poise::serenity_prelude::{ChannelId, GuildId, MessageId, UserId};

/// A message posted in the introduction channel
#[derive(Debug, Clone)]
pub struct IntroSubmission {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub author_id: UserId,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The joining account is the bot itself
    Skipped,
    /// The unverified role does not exist in the guild
    RoleMissing,
    Welcomed { dm_delivered: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Format passed and the confirmation button was delivered
    ButtonIssued,
    /// Format passed but the member does not accept DMs
    DmBlocked,
    /// Format passed but a button is already outstanding
    AlreadyPending,
    Rejected { deleted: bool, notified: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Someone other than the bound member pressed the button
    NotForYou,
    MemberMissing,
    /// Member no longer holds the unverified role, or the verified role is gone
    RolesUnavailable,
    Verified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualVerifyOutcome {
    Verified,
    AlreadyVerified,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderReport {
    pub reminded: usize,
    pub failed: usize,
}
