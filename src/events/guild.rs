use poise::serenity_prelude as serenity;
use tracing::info;

use crate::{Data, Error};

/// Handle when a new member joins the guild
pub async fn handle_member_add(
    ctx: &serenity::Context,
    new_member: &serenity::Member,
    data: &Data,
) -> Result<(), Error> {
    let user_id = new_member.user.id;
    let guild_id = new_member.guild_id;
    let is_self = user_id == ctx.cache.current_user().id;

    info!(
        "New member joined: {} in guild {}",
        new_member.user.name, guild_id
    );

    let outcome = data.flow.handle_join(guild_id, user_id, is_self).await?;
    info!("Join of {} handled: {:?}", new_member.user.name, outcome);

    Ok(())
}
