use poise::serenity_prelude::{self as serenity, GuildId, UserId};

const CUSTOM_ID_PREFIX: &str = "intro-verify";

/// The "Verify Now" button sent by DM once an introduction passes.
/// It is bound to one member and one server through its custom id, so the
/// binding survives with the message rather than in bot memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyAffordance {
    pub user_id: UserId,
    pub guild_id: GuildId,
}

impl VerifyAffordance {
    pub fn new(user_id: UserId, guild_id: GuildId) -> Self {
        Self { user_id, guild_id }
    }

    pub fn custom_id(&self) -> String {
        format!("{}:{}:{}", CUSTOM_ID_PREFIX, self.user_id, self.guild_id)
    }

    /// Parse a component custom id; `None` for anything that is not ours
    pub fn parse(custom_id: &str) -> Option<Self> {
        let mut parts = custom_id.split(':');
        if parts.next()? != CUSTOM_ID_PREFIX {
            return None;
        }

        let user_id = parts.next()?.parse::<u64>().ok().filter(|id| *id != 0)?;
        let guild_id = parts.next()?.parse::<u64>().ok().filter(|id| *id != 0)?;

        if parts.next().is_some() {
            return None;
        }

        Some(Self::new(UserId::new(user_id), GuildId::new(guild_id)))
    }

    /// Whether `activator` is the member this button was issued to
    pub fn is_bound_to(&self, activator: UserId) -> bool {
        self.user_id == activator
    }

    pub fn button(&self, disabled: bool) -> serenity::CreateButton {
        serenity::CreateButton::new(self.custom_id())
            .label("Verify Now")
            .style(serenity::ButtonStyle::Success)
            .emoji('✅')
            .disabled(disabled)
    }

    pub fn components(&self, disabled: bool) -> Vec<serenity::CreateActionRow> {
        vec![serenity::CreateActionRow::Buttons(vec![self.button(disabled)])]
    }
}
