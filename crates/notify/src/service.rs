//! Facade composing the two dispatchers and the message store.
//!
//! Pure delegation: sends go verbatim to the channel dispatchers, reads
//! pass through to the store, and the only write path stages a record
//! and flushes. No retry or transformation happens here.

use std::sync::Arc;

use crate::email::EmailDispatcher;
use crate::error::NotifyError;
use crate::request::NotificationRequest;
use crate::sms::SmsDispatcher;
use crate::store::{MessageRecord, MessageStore};

pub struct NotificationService {
    email: EmailDispatcher,
    sms: SmsDispatcher,
    store: Arc<dyn MessageStore>,
}

impl NotificationService {
    pub fn new(email: EmailDispatcher, sms: SmsDispatcher, store: Arc<dyn MessageStore>) -> Self {
        Self { email, sms, store }
    }

    /// Dispatch an email; see [`EmailDispatcher::send_email`].
    pub async fn send_email(&self, request: &NotificationRequest) -> bool {
        self.email.send_email(request).await
    }

    /// Dispatch an SMS; see [`SmsDispatcher::send_sms`].
    pub async fn send_sms(&self, request: &NotificationRequest) -> bool {
        self.sms.send_sms(request).await
    }

    pub async fn all_messages(&self) -> Result<Vec<MessageRecord>, NotifyError> {
        self.store.all_messages().await
    }

    pub async fn messages_by_status(
        &self,
        status: Option<bool>,
    ) -> Result<Vec<MessageRecord>, NotifyError> {
        self.store.messages_by_status(status).await
    }

    /// Stage a record and flush the store.
    pub async fn add_message(&self, record: MessageRecord) -> Result<(), NotifyError> {
        self.store.add_entity(record).await?;
        self.store.save_all().await
    }
}
