//! Provider boundary traits and response types.
//!
//! Dispatchers talk to delivery providers only through these traits so
//! tests can substitute counting/failing stubs and the composition root
//! can inject fully configured clients.

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::sendgrid::MailPayload;

/// Outcome of one email provider call.
///
/// Carries the raw HTTP status; the provider queues the message on 202
/// (acceptance, not delivery confirmation).
#[derive(Debug, Clone, Copy)]
pub struct EmailResponse {
    pub status: reqwest::StatusCode,
}

impl EmailResponse {
    /// Whether the provider accepted the message for delivery.
    pub fn is_accepted(&self) -> bool {
        self.status == reqwest::StatusCode::ACCEPTED
    }
}

/// Outcome of one SMS provider call.
///
/// Acceptance is signalled by the absence of both error fields.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SmsResponse {
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl SmsResponse {
    pub fn is_accepted(&self) -> bool {
        self.error_code.is_none() && self.error_message.is_none()
    }
}

/// Email delivery provider (SendGrid-style HTTP mail API).
#[async_trait]
pub trait EmailApi: Send + Sync {
    /// Submit one mail payload. `Err` means the call itself faulted
    /// (network, auth transport, serialization); a rejected-but-delivered
    /// HTTP response comes back as `Ok` with a non-accepted status.
    async fn send(&self, mail: &MailPayload) -> Result<EmailResponse, NotifyError>;
}

/// SMS delivery provider (Twilio-style messaging API).
#[async_trait]
pub trait SmsApi: Send + Sync {
    /// Create one outbound message from `from` to `to`.
    async fn create_message(
        &self,
        body: &str,
        from: &str,
        to: &str,
    ) -> Result<SmsResponse, NotifyError>;
}
