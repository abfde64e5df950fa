//! Generic notification request shared by both channels.

use serde::{Deserialize, Serialize};

/// A channel-agnostic request to send one notification.
///
/// `subject` and `sender_name` are only meaningful for email; SMS
/// dispatch ignores them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Sender address (email) or identifier (SMS). When absent or blank,
    /// email dispatch substitutes the configured default sender.
    #[serde(default)]
    pub from: Option<String>,
    /// Display name accompanying the sender address (email only).
    #[serde(default)]
    pub sender_name: Option<String>,
    /// Recipient address or phone number.
    pub to: String,
    /// Subject line (email only).
    #[serde(default)]
    pub subject: String,
    /// Message body.
    pub body: String,
}

impl NotificationRequest {
    /// Whether the sender field is absent, empty, or whitespace-only.
    pub fn from_is_blank(&self) -> bool {
        self.from
            .as_deref()
            .map(|s| s.trim().is_empty())
            .unwrap_or(true)
    }

    /// Return a copy with the configured default sender applied.
    ///
    /// The substitution only happens when `from` is blank, so applying
    /// it to an already-resolved request is a no-op. The original
    /// request is never mutated.
    pub fn with_default_sender(&self, address: &str, name: &str) -> Self {
        if !self.from_is_blank() {
            return self.clone();
        }
        Self {
            from: Some(address.to_string()),
            sender_name: Some(name.to_string()),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(from: Option<&str>) -> NotificationRequest {
        NotificationRequest {
            from: from.map(String::from),
            sender_name: None,
            to: "bob@example.com".to_string(),
            subject: "hi".to_string(),
            body: "hello".to_string(),
        }
    }

    #[test]
    fn blank_from_detection() {
        assert!(request(None).from_is_blank());
        assert!(request(Some("")).from_is_blank());
        assert!(request(Some("   ")).from_is_blank());
        assert!(!request(Some("alice@example.com")).from_is_blank());
    }

    #[test]
    fn default_applied_when_blank() {
        let resolved = request(None).with_default_sender("noreply@example.com", "Courier");
        assert_eq!(resolved.from.as_deref(), Some("noreply@example.com"));
        assert_eq!(resolved.sender_name.as_deref(), Some("Courier"));
    }

    #[test]
    fn explicit_from_not_overwritten() {
        let mut req = request(Some("alice@example.com"));
        req.sender_name = Some("Alice".to_string());
        let resolved = req.with_default_sender("noreply@example.com", "Courier");
        assert_eq!(resolved.from.as_deref(), Some("alice@example.com"));
        assert_eq!(resolved.sender_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn substitution_is_idempotent() {
        let once = request(Some("  ")).with_default_sender("noreply@example.com", "Courier");
        let twice = once.with_default_sender("other@example.com", "Other");
        assert_eq!(twice.from.as_deref(), Some("noreply@example.com"));
        assert_eq!(twice.sender_name.as_deref(), Some("Courier"));
    }

    #[test]
    fn original_request_unchanged() {
        let req = request(None);
        let _ = req.with_default_sender("noreply@example.com", "Courier");
        assert!(req.from.is_none());
    }
}
