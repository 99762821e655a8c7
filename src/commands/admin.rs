use poise::serenity_prelude::{self as serenity, Mentionable};
use tracing::{error, info, warn};

use crate::config::BotConfig;
use crate::error::{BotError, Result as BotResult};
use crate::verification::{ManualVerifyOutcome, ReminderReport};
use crate::{Context, Error};

/// Post the introduction template in the format channel
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn send_format_template(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command can only be used in a guild")?;
    let flow = &ctx.data().flow;

    let result = flow.post_template(guild_id).await.map(|_| ());
    if let Err(e) = &result {
        warn!("Failed to post template in guild {}: {}", guild_id, e);
    }
    ctx.say(template_report(&result, flow.config())).await?;

    delete_invocation(ctx).await;
    Ok(())
}

/// Verify a member by hand, skipping the introduction check
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn verify_user(
    ctx: Context<'_>,
    #[description = "Member to verify"] member: serenity::Member,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command can only be used in a guild")?;
    let user_id = member.user.id;

    let reply = match ctx.data().flow.manual_verify(guild_id, user_id).await {
        Ok(outcome) => {
            info!(
                "Manual verification of {} by {}: {:?}",
                member.user.name,
                ctx.author().name,
                outcome
            );
            manual_verify_report(outcome, user_id)
        }
        Err(e) => {
            error!("Manual verification of {} failed: {}", member.user.name, e);
            format!("Error: {}", e)
        }
    };

    ctx.say(reply).await?;
    Ok(())
}

/// DM a reminder to every member who is still unverified
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn remind_unverified(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command can only be used in a guild")?;
    let flow = &ctx.data().flow;

    let result = flow.remind_unverified(guild_id).await;
    if let Err(e) = &result {
        error!("Reminder run failed in guild {}: {}", guild_id, e);
    }
    ctx.say(reminder_report(&result)).await?;

    if reminder_ran(&result) {
        delete_invocation(ctx).await;
    }
    Ok(())
}

/// Remove the command message that invoked a prefix command
async fn delete_invocation(ctx: Context<'_>) {
    if let poise::Context::Prefix(prefix_ctx) = ctx {
        if let Err(e) = prefix_ctx.msg.delete(ctx.http()).await {
            warn!("Could not delete command message: {}", e);
        }
    }
}

fn template_report(result: &BotResult<()>, config: &BotConfig) -> String {
    match result {
        Ok(()) => format!("Template messages posted in `#{}`.", config.format_channel),
        Err(BotError::ChannelNotFound { .. }) => {
            format!("Error: Channel `#{}` not found.", config.format_channel)
        }
        Err(e) if e.is_forbidden() => {
            format!("Error: No permission in `#{}`.", config.format_channel)
        }
        Err(e) => format!("Error: {}", e),
    }
}

fn manual_verify_report(outcome: ManualVerifyOutcome, user_id: serenity::UserId) -> String {
    match outcome {
        ManualVerifyOutcome::Verified => format!("Manually verified {}.", user_id.mention()),
        ManualVerifyOutcome::AlreadyVerified => format!(
            "{} is already verified or does not have the unverified role.",
            user_id.mention()
        ),
    }
}

/// A missing unverified role stops the run before anything is cleaned up
fn reminder_ran(result: &BotResult<ReminderReport>) -> bool {
    !matches!(result, Err(BotError::RoleNotFound { .. }))
}

fn reminder_report(result: &BotResult<ReminderReport>) -> String {
    match result {
        Ok(report) => format!(
            "Sent verification reminders to **{}** unverified members.",
            report.reminded
        ),
        Err(BotError::RoleNotFound { name }) => format!("Error: Role named '{}' not found.", name),
        Err(e) => format!("Error: {}", e),
    }
}
