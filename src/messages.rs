// src/messages.rs
use poise::serenity_prelude::{Mentionable, UserId};

use crate::config::BotConfig;
use crate::verification::COPYABLE_TEMPLATE;

pub fn join_instructions(config: &BotConfig) -> String {
    format!(
        "Welcome! Please read the instructions below to verify.\n\n\
        1. Go to the `#{}` channel and **long-press to copy the template**.\n\
        2. Paste and fill out your introduction in the `#{}` channel.\n\
        3. The bot will send you a **private message with a button** to verify once your format is accepted.",
        config.format_channel, config.introduction_channel
    )
}

pub fn reminder_message(name: &str, config: &BotConfig) -> String {
    format!(
        "Hi {}, you are still unverified!\n\n\
        Please complete the steps to gain full access:\n\
        1. Go to the `#{}` channel and **copy the template**.\n\
        2. Paste and fill out your introduction in the `#{}` channel.\n\
        3. The bot will send you a **private message with a button** to verify once your format is accepted.",
        name, config.format_channel, config.introduction_channel
    )
}

pub fn format_accepted_message() -> String {
    "Your introduction format is correct! Press the button below to verify.".to_string()
}

pub fn dm_blocked_notice(user_id: UserId) -> String {
    format!(
        "{}, I can't DM you! Please enable DMs to receive the verification button.",
        user_id.mention()
    )
}

pub fn format_rejected_message(config: &BotConfig) -> String {
    format!(
        "Your message in `#{}` did not follow the required format or was too short.\n\n\
        Please go to the `#{}` channel to copy the correct template.",
        config.introduction_channel, config.format_channel
    )
}

pub fn verified_announcement(user_id: UserId, member_count: u64) -> String {
    format!(
        "🎉 **{}** just verified and joined the main chat! They are our **#{}** member!",
        user_id.mention(),
        member_count
    )
}

pub fn manual_verified_announcement(user_id: UserId, member_count: u64) -> String {
    format!(
        "🎉 **{}** has been manually verified! They are member **#{}**.",
        user_id.mention(),
        member_count
    )
}

pub fn template_heading(config: &BotConfig) -> String {
    format!(
        "**👇 COPY AND PASTE THE TEXT BELOW INTO `#{}` 👇**",
        config.introduction_channel
    )
}

pub fn template_block() -> String {
    format!("```\n{}\n```", COPYABLE_TEMPLATE)
}

pub const NOT_YOUR_BUTTON: &str = "This button is not for you.";
pub const MEMBER_NOT_FOUND: &str = "Could not find you in the server.";
pub const VERIFICATION_COMPLETE: &str = "Verification complete! Welcome to the server.";
pub const VERIFICATION_ROLE_ERROR: &str =
    "An error occurred during verification (check roles/hierarchy).";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_names_configured_channels() {
        let config = BotConfig {
            introduction_channel: "say-hi".to_string(),
            format_channel: "how-to".to_string(),
            ..BotConfig::default()
        };

        let text = join_instructions(&config);
        assert!(text.contains("`#how-to`"));
        assert!(text.contains("`#say-hi`"));
        assert!(format_rejected_message(&config).contains("`#say-hi`"));
    }

    #[test]
    fn test_announcement_mentions_member() {
        let text = verified_announcement(UserId::new(42), 7);
        assert!(text.contains("<@42>"));
        assert!(text.contains("**#7**"));
    }

    #[test]
    fn test_template_block_is_fenced() {
        let block = template_block();
        assert!(block.starts_with("```\nName: \nAge :"));
        assert!(block.ends_with("Fun fact:\n```"));
    }
}
