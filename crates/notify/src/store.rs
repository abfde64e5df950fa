//! Message history persistence boundary.
//!
//! The dispatch core never reads or writes records itself; callers may
//! persist a record after observing a dispatch result, through the
//! facade. `MemoryMessageStore` is the in-process implementation and the
//! default test double.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NotifyError;

/// Delivery channel a record was dispatched over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
}

/// One historical notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: Uuid,
    pub channel: Channel,
    pub recipient: String,
    pub body: String,
    /// Whether the provider accepted the message.
    pub delivered: bool,
    pub created_at: DateTime<Utc>,
}

impl MessageRecord {
    /// Build a record for a just-observed dispatch outcome.
    pub fn new(channel: Channel, recipient: impl Into<String>, body: impl Into<String>, delivered: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel,
            recipient: recipient.into(),
            body: body.into(),
            delivered,
            created_at: Utc::now(),
        }
    }
}

/// Persistence operations for message records.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// All records, in insertion order.
    async fn all_messages(&self) -> Result<Vec<MessageRecord>, NotifyError>;

    /// Records filtered by delivery status; `None` returns everything.
    async fn messages_by_status(
        &self,
        status: Option<bool>,
    ) -> Result<Vec<MessageRecord>, NotifyError>;

    /// Stage a new record.
    async fn add_entity(&self, record: MessageRecord) -> Result<(), NotifyError>;

    /// Flush staged records to durable storage. A no-op for in-memory
    /// implementations.
    async fn save_all(&self) -> Result<(), NotifyError>;
}

/// In-memory store backed by a mutex-guarded vec.
#[derive(Debug, Default)]
pub struct MemoryMessageStore {
    records: tokio::sync::Mutex<Vec<MessageRecord>>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn all_messages(&self) -> Result<Vec<MessageRecord>, NotifyError> {
        Ok(self.records.lock().await.clone())
    }

    async fn messages_by_status(
        &self,
        status: Option<bool>,
    ) -> Result<Vec<MessageRecord>, NotifyError> {
        let records = self.records.lock().await;
        Ok(match status {
            Some(wanted) => records
                .iter()
                .filter(|r| r.delivered == wanted)
                .cloned()
                .collect(),
            None => records.clone(),
        })
    }

    async fn add_entity(&self, record: MessageRecord) -> Result<(), NotifyError> {
        self.records.lock().await.push(record);
        Ok(())
    }

    async fn save_all(&self) -> Result<(), NotifyError> {
        Ok(())
    }
}
