use poise::serenity_prelude as serenity;
use tracing::{debug, error, warn};

use crate::messages;
use crate::verification::{ConfirmOutcome, VerifyAffordance};
use crate::{Data, Error};

/// Handle a press of the "Verify Now" button sent by DM
pub async fn handle_interaction(
    ctx: &serenity::Context,
    interaction: &serenity::Interaction,
    data: &Data,
) -> Result<(), Error> {
    let Some(component) = interaction.as_message_component() else {
        return Ok(());
    };
    let Some(affordance) = VerifyAffordance::parse(&component.data.custom_id) else {
        debug!("Ignoring component {}", component.data.custom_id);
        return Ok(());
    };

    component.defer_ephemeral(&ctx.http).await?;

    let reply = match data.flow.confirm(&affordance, component.user.id).await {
        Ok(ConfirmOutcome::Verified) => {
            let mut message = component.message.clone();
            if let Err(e) = message
                .edit(
                    &ctx.http,
                    serenity::EditMessage::new().components(affordance.components(true)),
                )
                .await
            {
                warn!("Could not disable verify button for {}: {}", component.user.name, e);
            }
            messages::VERIFICATION_COMPLETE
        }
        Ok(ConfirmOutcome::NotForYou) => messages::NOT_YOUR_BUTTON,
        Ok(ConfirmOutcome::MemberMissing) => messages::MEMBER_NOT_FOUND,
        Ok(ConfirmOutcome::RolesUnavailable) => messages::VERIFICATION_ROLE_ERROR,
        Err(e) => {
            error!("Verification of {} failed: {}", component.user.name, e);
            messages::VERIFICATION_ROLE_ERROR
        }
    };

    component
        .create_followup(
            &ctx.http,
            serenity::CreateInteractionResponseFollowup::new()
                .content(reply)
                .ephemeral(true),
        )
        .await?;

    Ok(())
}
