//! Twilio Messages API client.
//!
//! Posts form-encoded create-message requests with basic auth and parses
//! the `error_code`/`error_message` fields out of the response envelope.
//! Constructed once by the composition root with its credentials; no
//! process-wide session state.

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::provider::{SmsApi, SmsResponse};

/// Twilio REST client. Cheap to clone; shares its connection pool.
#[derive(Debug, Clone)]
pub struct TwilioClient {
    accounts_id: String,
    auth_token: String,
    client: reqwest::Client,
}

impl TwilioClient {
    pub fn new(
        accounts_id: impl Into<String>,
        auth_token: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            accounts_id: accounts_id.into(),
            auth_token: auth_token.into(),
            client,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.accounts_id
        )
    }
}

#[async_trait]
impl SmsApi for TwilioClient {
    async fn create_message(
        &self,
        body: &str,
        from: &str,
        to: &str,
    ) -> Result<SmsResponse, NotifyError> {
        let params = [("Body", body), ("From", from), ("To", to)];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.accounts_id, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let parsed: SmsResponse = response.json().await?;

        tracing::debug!(
            channel = "sms",
            %status,
            error_code = ?parsed.error_code,
            "create-message call completed"
        );

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_url_embeds_account() {
        let client = TwilioClient::new("AC123", "tok", reqwest::Client::new());
        assert_eq!(
            client.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn response_parses_error_fields() {
        let raw = r#"{"sid":"SM1","error_code":21211,"error_message":"Invalid 'To'"}"#;
        let parsed: SmsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.error_code, Some(21211));
        assert!(!parsed.is_accepted());
    }

    #[test]
    fn response_without_errors_is_accepted() {
        let raw = r#"{"sid":"SM1","status":"queued","error_code":null,"error_message":null}"#;
        let parsed: SmsResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.is_accepted());
    }
}
