use poise::serenity_prelude as serenity;
use tracing::info;

/// Go invisible once the gateway session is up
pub async fn handle_ready(ctx: &serenity::Context, ready: &serenity::Ready) {
    info!("Bot is online as {}", ready.user.name);
    info!("Bot ID: {}", ready.user.id);

    ctx.set_presence(None, serenity::OnlineStatus::Invisible);
    info!("Bot status set to Invisible");
}
