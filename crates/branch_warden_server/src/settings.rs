//! Process configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! Required:
//!
//! - `GITHUB_WEBHOOK_SECRET`: shared secret for webhook signature verification
//! - `GITHUB_PERSONAL_ACCESS_TOKEN`: token the warden acts as
//! - `GITHUB_ORG_NAME`: organization used when a payload carries none
//!
//! Optional:
//!
//! - `GITHUB_REQUIRED_REVIEWS`: approving review count (default: 3)
//! - `GITHUB_COMMENT_MENTION`: handle mentioned in issues (default: repo-admins)
//! - `GITHUB_EMAIL_PRIVATE`: committer email fallback (default: private@email.com)
//! - `HOST`: bind address (default: 0.0.0.0)
//! - `PORT`: listen port (default: 8080)

use std::env;

use branch_warden_core::WardenConfig;
use secrecy::SecretString;

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Errors raised while loading settings from the environment.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A required environment variable is absent or not unicode.
    #[error("required environment variable {name} is not set")]
    MissingVariable {
        /// Name of the missing variable
        name: &'static str,
    },

    /// `PORT` was set but does not parse as a port number.
    #[error("PORT value {value:?} is not a valid port number")]
    InvalidPort {
        /// The rejected value
        value: String,
    },
}

/// All process configuration, resolved once at startup.
#[derive(Debug)]
pub struct Settings {
    /// Bind address
    pub host: String,

    /// Listen port
    pub port: u16,

    /// Shared secret for webhook signature verification
    pub webhook_secret: SecretString,

    /// Personal access token the warden authenticates with
    pub github_token: SecretString,

    /// Organization used when a payload carries none
    pub organization: String,

    /// Required approving review count
    pub required_reviews: u32,

    /// Handle mentioned in audit and diagnostic issues
    pub reviewer_mention: Option<String>,

    /// Committer email used when the authenticated user's email is private
    pub fallback_email: Option<String>,
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::MissingVariable` when a required variable is
    /// absent, and `SettingsError::InvalidPort` when `PORT` does not parse.
    pub fn from_env() -> Result<Self, SettingsError> {
        let webhook_secret = SecretString::from(require("GITHUB_WEBHOOK_SECRET")?);
        let github_token = SecretString::from(require("GITHUB_PERSONAL_ACCESS_TOKEN")?);
        let organization = require("GITHUB_ORG_NAME")?;

        let required_reviews =
            WardenConfig::parse_required_reviews(env::var("GITHUB_REQUIRED_REVIEWS").ok().as_deref());

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| SettingsError::InvalidPort { value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
            webhook_secret,
            github_token,
            organization,
            required_reviews,
            reviewer_mention: non_empty(env::var("GITHUB_COMMENT_MENTION").ok()),
            fallback_email: non_empty(env::var("GITHUB_EMAIL_PRIVATE").ok()),
        })
    }

    /// Builds the workflow configuration these settings describe.
    pub fn warden_config(&self) -> WardenConfig {
        let mut config =
            WardenConfig::new(&self.organization).with_required_reviews(self.required_reviews);
        if let Some(mention) = &self.reviewer_mention {
            config = config.with_reviewer_mention(mention);
        }
        if let Some(email) = &self.fallback_email {
            config = config.with_fallback_committer_email(email);
        }
        config
    }
}

fn require(name: &'static str) -> Result<String, SettingsError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SettingsError::MissingVariable { name }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
