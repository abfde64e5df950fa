//! Email dispatch with bounded retry.
//!
//! Builds a provider mail payload from a generic request and runs the
//! send-with-retry loop. The public contract is a plain `bool`: rejected,
//! retries-exhausted, and faulted all collapse to `false`, with the
//! discarded reason logged at the narrowing point.

use std::sync::Arc;

use crate::error::NotifyError;
use crate::provider::EmailApi;
use crate::request::NotificationRequest;
use crate::sendgrid::{EmailAddress, MailPayload};

/// Dispatches email through an injected provider client.
///
/// Holds only immutable state; safe to share across concurrent callers.
pub struct EmailDispatcher {
    api: Arc<dyn EmailApi>,
    /// Default sender address substituted when a request carries none.
    default_from: String,
    /// Default sender display name.
    default_name: String,
    /// Maximum provider attempts per send call.
    retries: u32,
}

impl EmailDispatcher {
    pub fn new(
        api: Arc<dyn EmailApi>,
        default_from: impl Into<String>,
        default_name: impl Into<String>,
        retries: u32,
    ) -> Self {
        Self {
            api,
            default_from: default_from.into(),
            default_name: default_name.into(),
            retries,
        }
    }

    /// Override the shared retry count for this channel.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Build the provider payload, applying the default sender when the
    /// request has a blank `from`. No input validation happens here;
    /// malformed addresses surface as provider rejections.
    fn build_payload(&self, request: &NotificationRequest) -> MailPayload {
        let resolved = request.with_default_sender(&self.default_from, &self.default_name);

        let from = EmailAddress {
            // with_default_sender guarantees a sender is present.
            email: resolved.from.clone().unwrap_or_default(),
            name: resolved.sender_name.clone(),
        };

        MailPayload::single(from, &resolved.to, &resolved.subject, &resolved.body)
    }

    /// Send with retry. `Ok(true)` means the provider accepted the
    /// message within the attempt budget; `Ok(false)` means every attempt
    /// came back non-accepted; `Err` means an attempt faulted (faults
    /// abort the loop and are never retried).
    async fn dispatch(&self, request: &NotificationRequest) -> Result<bool, NotifyError> {
        let payload = self.build_payload(request);

        let mut success = false;
        let mut remaining = self.retries;
        while !success && remaining > 0 {
            let response = self.api.send(&payload).await?;
            success = response.is_accepted();
            remaining -= 1;
        }
        Ok(success)
    }

    /// Send an email, returning whether the provider accepted it.
    ///
    /// All failure modes collapse to `false`; the underlying fault, if
    /// any, is emitted as a structured warning only.
    pub async fn send_email(&self, request: &NotificationRequest) -> bool {
        match self.dispatch(request).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!(
                    channel = "email",
                    to = %request.to,
                    retries = self.retries,
                    "email not accepted within retry budget"
                );
                false
            }
            Err(e) => {
                tracing::warn!(
                    channel = "email",
                    to = %request.to,
                    error = %e,
                    "email dispatch aborted"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::EmailResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub that faults or rejects until a chosen attempt succeeds.
    struct StubEmailApi {
        calls: AtomicUsize,
        /// Attempt number (1-based) that returns 202; 0 means never.
        accept_on: usize,
        /// Fault on the first call instead of responding.
        fail_with_error: bool,
        /// Snapshot of the payload from the most recent call.
        last_payload: std::sync::Mutex<Option<MailPayload>>,
    }

    impl StubEmailApi {
        fn accepting_on(n: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                accept_on: n,
                fail_with_error: false,
                last_payload: std::sync::Mutex::new(None),
            }
        }

        fn erroring() -> Self {
            Self {
                fail_with_error: true,
                ..Self::accepting_on(0)
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl EmailApi for StubEmailApi {
        async fn send(&self, mail: &MailPayload) -> Result<EmailResponse, NotifyError> {
            let attempt = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            *self.last_payload.lock().unwrap() = Some(mail.clone());

            if self.fail_with_error {
                return Err(NotifyError::Provider("connection refused".to_string()));
            }

            let status = if attempt == self.accept_on {
                reqwest::StatusCode::ACCEPTED
            } else {
                reqwest::StatusCode::BAD_REQUEST
            };
            Ok(EmailResponse { status })
        }
    }

    fn request() -> NotificationRequest {
        NotificationRequest {
            from: Some("alice@example.com".to_string()),
            sender_name: Some("Alice".to_string()),
            to: "bob@example.com".to_string(),
            subject: "Hello".to_string(),
            body: "body".to_string(),
        }
    }

    fn dispatcher(api: Arc<StubEmailApi>, retries: u32) -> EmailDispatcher {
        EmailDispatcher::new(api, "noreply@example.com", "Courier", retries)
    }

    #[tokio::test]
    async fn accepted_first_attempt_calls_once() {
        let api = Arc::new(StubEmailApi::accepting_on(1));
        let result = dispatcher(api.clone(), 5).send_email(&request()).await;
        assert!(result);
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn accepted_on_third_attempt_calls_exactly_three_times() {
        let api = Arc::new(StubEmailApi::accepting_on(3));
        let result = dispatcher(api.clone(), 5).send_email(&request()).await;
        assert!(result);
        assert_eq!(api.call_count(), 3);
    }

    #[tokio::test]
    async fn never_accepted_exhausts_retry_budget() {
        let api = Arc::new(StubEmailApi::accepting_on(0));
        let result = dispatcher(api.clone(), 5).send_email(&request()).await;
        assert!(!result);
        assert_eq!(api.call_count(), 5);
    }

    #[tokio::test]
    async fn fault_aborts_without_retry() {
        let api = Arc::new(StubEmailApi::erroring());
        let result = dispatcher(api.clone(), 5).send_email(&request()).await;
        assert!(!result);
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn zero_retries_never_calls_provider() {
        let api = Arc::new(StubEmailApi::accepting_on(1));
        let result = dispatcher(api.clone(), 0).send_email(&request()).await;
        assert!(!result);
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn with_retries_overrides_channel_budget() {
        let api = Arc::new(StubEmailApi::accepting_on(0));
        let result = dispatcher(api.clone(), 5)
            .with_retries(2)
            .send_email(&request())
            .await;
        assert!(!result);
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn blank_from_gets_default_sender() {
        let api = Arc::new(StubEmailApi::accepting_on(1));
        let req = NotificationRequest {
            from: None,
            sender_name: None,
            ..request()
        };
        dispatcher(api.clone(), 5).send_email(&req).await;

        let payload = api.last_payload.lock().unwrap().clone().unwrap();
        assert_eq!(payload.from.email, "noreply@example.com");
        assert_eq!(payload.from.name.as_deref(), Some("Courier"));
    }

    #[tokio::test]
    async fn explicit_from_kept_verbatim() {
        let api = Arc::new(StubEmailApi::accepting_on(1));
        dispatcher(api.clone(), 5).send_email(&request()).await;

        let payload = api.last_payload.lock().unwrap().clone().unwrap();
        assert_eq!(payload.from.email, "alice@example.com");
        assert_eq!(payload.from.name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn body_used_for_both_content_variants() {
        let api = Arc::new(StubEmailApi::accepting_on(1));
        dispatcher(api.clone(), 5).send_email(&request()).await;

        let payload = api.last_payload.lock().unwrap().clone().unwrap();
        assert_eq!(payload.content.len(), 2);
        assert_eq!(payload.content[0].value, "body");
        assert_eq!(payload.content[1].value, "body");
    }
}
