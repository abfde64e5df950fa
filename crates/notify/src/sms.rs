//! SMS dispatch with bounded retry.
//!
//! Normalizes the destination number, prefixes the body with a sender
//! label, and runs the same send-with-retry loop as email dispatch.
//! Success is classified from the provider's error fields rather than an
//! HTTP status.

use std::sync::Arc;

use crate::error::NotifyError;
use crate::provider::SmsApi;
use crate::request::NotificationRequest;

/// Country-code prefix prepended to normalized destination numbers.
///
/// Locale-specific by deliberate compatibility choice; see [`normalize_phone`].
const COUNTRY_PREFIX: &str = "+234";

/// Normalize a national phone number to its dispatched form.
///
/// Skips one leading character (the trunk "0") and keeps the next ten,
/// then prepends [`COUNTRY_PREFIX`]: `"08031234567"` becomes
/// `"+2348031234567"`. The extraction is unconditional; input that is
/// not one trunk character followed by a 10-digit subscriber number
/// silently produces a malformed destination rather than an error.
pub fn normalize_phone(raw: &str) -> String {
    let local: String = raw.chars().skip(1).take(10).collect();
    format!("{COUNTRY_PREFIX}{local}")
}

/// Dispatches SMS through an injected provider client.
///
/// The client arrives fully configured (credentials included) from the
/// composition root; there is no per-call or process-global session
/// initialization.
pub struct SmsDispatcher {
    api: Arc<dyn SmsApi>,
    /// Origin phone number sends are issued from.
    origin_phone: String,
    /// Maximum provider attempts per send call.
    retries: u32,
}

impl SmsDispatcher {
    pub fn new(api: Arc<dyn SmsApi>, origin_phone: impl Into<String>, retries: u32) -> Self {
        Self {
            api,
            origin_phone: origin_phone.into(),
            retries,
        }
    }

    /// Override the shared retry count for this channel.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Send with retry; same loop shape as email dispatch. Faults abort
    /// immediately, non-accepted responses consume an attempt.
    async fn dispatch(&self, request: &NotificationRequest) -> Result<bool, NotifyError> {
        let to = normalize_phone(&request.to);
        // The raw request sender, not the configured default: SMS is not
        // subject to default-sender substitution.
        let sender = request.from.as_deref().unwrap_or_default();
        let body = format!("Message from {}: {}", sender, request.body);

        let mut success = false;
        let mut remaining = self.retries;
        while !success && remaining > 0 {
            let response = self
                .api
                .create_message(&body, &self.origin_phone, &to)
                .await?;
            success = response.is_accepted();
            remaining -= 1;
        }
        Ok(success)
    }

    /// Send an SMS, returning whether the provider accepted it.
    ///
    /// All failure modes collapse to `false`; the underlying fault, if
    /// any, is emitted as a structured warning only.
    pub async fn send_sms(&self, request: &NotificationRequest) -> bool {
        match self.dispatch(request).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!(
                    channel = "sms",
                    to = %request.to,
                    retries = self.retries,
                    "sms not accepted within retry budget"
                );
                false
            }
            Err(e) => {
                tracing::warn!(
                    channel = "sms",
                    to = %request.to,
                    error = %e,
                    "sms dispatch aborted"
                );
                false
            }
        }
    }
}
