use tracing::info;

use crate::{Context, Error};

/// Check that the bot is alive and show gateway latency
#[poise::command(prefix_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    info!("Ping command called by {}", ctx.author().name);
    let latency = ctx.ping().await;
    ctx.say(pong_message(latency.as_millis())).await?;
    Ok(())
}

fn pong_message(latency_ms: u128) -> String {
    format!("🏓 Pong! {}ms", latency_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pong_message() {
        assert_eq!(pong_message(42), "🏓 Pong! 42ms");
    }
}
