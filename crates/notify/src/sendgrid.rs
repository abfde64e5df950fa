//! SendGrid v3 `mail/send` client.
//!
//! Posts JSON payloads with bearer auth. Non-2xx responses are returned
//! as-is so the dispatcher can classify them; only transport faults
//! surface as errors.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::NotifyError;
use crate::provider::{EmailApi, EmailResponse};

const MAIL_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// One address entry in a SendGrid payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Personalization {
    pub to: Vec<EmailAddress>,
}

/// One content variant (`text/plain` or `text/html`).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Content {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

/// Wire payload for the v3 `mail/send` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MailPayload {
    pub personalizations: Vec<Personalization>,
    pub from: EmailAddress,
    pub subject: String,
    pub content: Vec<Content>,
}

impl MailPayload {
    /// Build a single-recipient payload with the body used as both the
    /// plain-text and HTML variants.
    pub fn single(from: EmailAddress, to: &str, subject: &str, body: &str) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: vec![EmailAddress {
                    email: to.to_string(),
                    name: None,
                }],
            }],
            from,
            subject: subject.to_string(),
            content: vec![
                Content {
                    content_type: "text/plain".to_string(),
                    value: body.to_string(),
                },
                Content {
                    content_type: "text/html".to_string(),
                    value: body.to_string(),
                },
            ],
        }
    }
}

/// SendGrid HTTP client. Cheap to clone; shares its connection pool.
#[derive(Debug, Clone)]
pub struct SendGridClient {
    api_key: String,
    client: reqwest::Client,
}

impl SendGridClient {
    pub fn new(api_key: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            api_key: api_key.into(),
            client,
        }
    }
}

#[async_trait]
impl EmailApi for SendGridClient {
    async fn send(&self, mail: &MailPayload) -> Result<EmailResponse, NotifyError> {
        let response = self
            .client
            .post(MAIL_SEND_URL)
            .bearer_auth(&self.api_key)
            .json(mail)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(channel = "email", %status, "mail/send call completed");

        Ok(EmailResponse { status })
    }
}
