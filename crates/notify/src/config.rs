//! Configuration for dispatch: retry policy and provider credentials.
//!
//! Parsed from `courier.toml` with environment variable overrides in the
//! `COURIER_SECTION_KEY` convention. Secrets (API key, auth token) may be
//! supplied entirely through the environment.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

/// Full courier configuration, read-only after startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourierConfig {
    /// Shared dispatch policy.
    #[serde(default)]
    pub messaging: MessagingConfig,

    /// Email provider settings.
    pub sendgrid: SendGridConfig,

    /// SMS provider settings.
    pub twilio: TwilioConfig,
}

/// Dispatch policy shared by both channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// Maximum provider attempts per send call.
    #[serde(default = "default_retries")]
    pub retries: u32,
}

fn default_retries() -> u32 {
    5
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
        }
    }
}

/// Email provider section: API key plus the default sender identity
/// substituted when a request carries no sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendGridConfig {
    #[serde(default)]
    pub api_key: String,
    /// Default sender address.
    pub email: String,
    /// Default sender display name.
    pub name: String,
}

/// SMS provider section: account credentials and the origin phone number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwilioConfig {
    #[serde(default)]
    pub accounts_id: String,
    #[serde(default)]
    pub auth_token: String,
    /// Origin phone number sends are issued from.
    pub phone: String,
}

impl CourierConfig {
    /// Parse config from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, NotifyError> {
        let mut config: Self = toml::from_str(toml_str)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, NotifyError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    // ── Environment variable overrides ──────────────────────────────

    /// Apply environment variable overrides.
    ///
    /// Convention: `COURIER_SECTION_KEY` overrides `section.key`.
    /// Examples:
    /// - `COURIER_MESSAGING_RETRIES` -> `messaging.retries`
    /// - `COURIER_SENDGRID_API_KEY` -> `sendgrid.api_key`
    /// - `COURIER_TWILIO_ACCOUNTS_ID` -> `twilio.accounts_id`
    /// - `COURIER_TWILIO_AUTH_TOKEN` -> `twilio.auth_token`
    pub(crate) fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override application with an injectable lookup, so tests don't
    /// have to mutate process-wide environment state.
    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(v) = get("COURIER_MESSAGING_RETRIES") {
            if let Ok(retries) = v.parse::<u32>() {
                self.messaging.retries = retries;
            }
        }
        if let Some(v) = get("COURIER_SENDGRID_API_KEY") {
            self.sendgrid.api_key = v;
        }
        if let Some(v) = get("COURIER_SENDGRID_EMAIL") {
            self.sendgrid.email = v;
        }
        if let Some(v) = get("COURIER_SENDGRID_NAME") {
            self.sendgrid.name = v;
        }
        if let Some(v) = get("COURIER_TWILIO_ACCOUNTS_ID") {
            self.twilio.accounts_id = v;
        }
        if let Some(v) = get("COURIER_TWILIO_AUTH_TOKEN") {
            self.twilio.auth_token = v;
        }
        if let Some(v) = get("COURIER_TWILIO_PHONE") {
            self.twilio.phone = v;
        }
    }

    /// Reject configurations that cannot possibly dispatch.
    fn validate(&self) -> Result<(), NotifyError> {
        if self.sendgrid.api_key.is_empty() {
            return Err(NotifyError::Config(
                "sendgrid.api_key is required (or COURIER_SENDGRID_API_KEY)".to_string(),
            ));
        }
        if self.twilio.accounts_id.is_empty() || self.twilio.auth_token.is_empty() {
            return Err(NotifyError::Config(
                "twilio.accounts_id and twilio.auth_token are required".to_string(),
            ));
        }
        Ok(())
    }
}
