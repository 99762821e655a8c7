use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};

/// Deploy-time settings: role and channel names the bot looks up by name,
/// the command prefix and the minimum introduction length.
/// Optionally loaded from the JSON file named by `BOT_CONFIG` / `--config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotConfig {
    pub command_prefix: String,

    /// Role granted on join and removed on verification
    pub unverified_role: String,

    /// Role granted on verification
    pub verified_role: String,

    /// Channel where introductions are posted and checked
    pub introduction_channel: String,

    /// Channel that holds the copyable template
    pub format_channel: String,

    /// Channel where verifications are announced
    pub welcome_channel: String,

    /// Minimum trimmed length of an introduction, in characters
    pub min_length: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_prefix: "!".to_string(),
            unverified_role: "Unverified".to_string(),
            verified_role: "Konco-konco UTMKL ESPORTSr".to_string(),
            introduction_channel: "introductions".to_string(),
            format_channel: "format-template".to_string(),
            welcome_channel: "welcome".to_string(),
            min_length: 50,
        }
    }
}

impl BotConfig {
    /// Load from a JSON file; keys that are absent keep their default
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BotError::ConfigLoad {
            path: path.to_string(),
            source: e,
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| BotError::ConfigParse {
            path: path.to_string(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let names = [
            ("command_prefix", &self.command_prefix),
            ("unverified_role", &self.unverified_role),
            ("verified_role", &self.verified_role),
            ("introduction_channel", &self.introduction_channel),
            ("format_channel", &self.format_channel),
            ("welcome_channel", &self.welcome_channel),
        ];

        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(BotError::ConfigValidation {
                    message: format!("'{}' must not be empty", key),
                });
            }
        }

        if self.unverified_role == self.verified_role {
            return Err(BotError::ConfigValidation {
                message: "unverified_role and verified_role must differ".to_string(),
            });
        }

        Ok(())
    }
}
