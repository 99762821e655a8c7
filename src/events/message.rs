use poise::serenity_prelude as serenity;
use tracing::{debug, info};

use crate::verification::IntroSubmission;
use crate::{Data, Error};

/// Handle incoming messages
pub async fn handle_message(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
) -> Result<(), Error> {
    let flow = &data.flow;
    let bot_id = ctx.cache.current_user().id;

    // Commands are run by the poise framework
    if is_command_or_own(msg.author.id, bot_id, &msg.content, &flow.config().command_prefix) {
        return Ok(());
    }

    // DMs never reach the introduction check
    let Some(guild_id) = msg.guild_id else {
        return Ok(());
    };

    if !flow.is_introduction_channel(msg.channel_id).await? {
        return Ok(());
    }

    debug!("Checking introduction from {}", msg.author.name);

    let submission = IntroSubmission {
        guild_id,
        channel_id: msg.channel_id,
        message_id: msg.id,
        author_id: msg.author.id,
        content: msg.content.clone(),
    };
    let outcome = flow.handle_submission(&submission).await?;
    info!("Introduction from {}: {:?}", msg.author.name, outcome);

    Ok(())
}

fn is_command_or_own(
    author: serenity::UserId,
    bot_id: serenity::UserId,
    content: &str,
    prefix: &str,
) -> bool {
    author == bot_id || content.trim().starts_with(prefix)
}
