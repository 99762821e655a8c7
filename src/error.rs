use serenity::http::HttpError;
use serenity::model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    // Configuration errors
    #[error("BOT_TOKEN not found in the environment or .env file")]
    MissingToken,

    #[error("Failed to load config file '{path}': {source}")]
    ConfigLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {message}")]
    ConfigValidation { message: String },

    // Lookup errors
    #[error("Channel not found: {name}")]
    ChannelNotFound { name: String },

    #[error("Role not found: {name}")]
    RoleNotFound { name: String },

    #[error("Member not found: {id}")]
    MemberNotFound { id: String },

    // Permission errors
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    // Discord errors
    #[error("Discord API error: {message}")]
    Discord { message: String },
}

impl BotError {
    /// True when the platform refused the operation for lack of permission
    /// (including a member that does not accept direct messages).
    pub fn is_forbidden(&self) -> bool {
        matches!(self, BotError::PermissionDenied { .. })
    }
}

impl From<serenity::Error> for BotError {
    fn from(err: serenity::Error) -> Self {
        let forbidden = status_code(&err) == Some(403)
            || matches!(
                err,
                serenity::Error::Model(ModelError::InvalidPermissions { .. })
            );

        if forbidden {
            BotError::PermissionDenied {
                message: err.to_string(),
            }
        } else {
            BotError::Discord {
                message: err.to_string(),
            }
        }
    }
}

/// HTTP status of a request Discord rejected
pub(crate) fn status_code(err: &serenity::Error) -> Option<u16> {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            Some(response.status_code.as_u16())
        }
        _ => None,
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
