//! Organization notification models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A notification delivered to an organization's in-app inbox
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub listing_id: Uuid,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub sent_at: DateTime<Utc>,
}

impl Notification {
    /// Flip the read flag. Returns `true` if the flag changed.
    pub fn mark_read(&mut self) -> bool {
        let changed = !self.is_read;
        self.is_read = true;
        changed
    }
}

/// Notification type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NewListing,
    ListingClaimed,
    Reminder,
}

/// Fields of a notification before the repository assigns `id` and `sent_at`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub organization_id: Uuid,
    pub listing_id: Uuid,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub is_read: bool,
}

impl NewNotification {
    pub fn into_notification(self, id: Uuid, sent_at: DateTime<Utc>) -> Notification {
        Notification {
            id,
            organization_id: self.organization_id,
            listing_id: self.listing_id,
            notification_type: self.notification_type,
            title: self.title,
            message: self.message,
            is_read: self.is_read,
            sent_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unread() -> Notification {
        NewNotification {
            organization_id: Uuid::new_v4(),
            listing_id: Uuid::new_v4(),
            notification_type: NotificationType::NewListing,
            title: "New Food Available: Bread".to_string(),
            message: "10 loaves of bakery available at Delhi.".to_string(),
            is_read: false,
        }
        .into_notification(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_mark_read_transitions_once() {
        let mut notification = unread();
        assert!(notification.mark_read());
        assert!(notification.is_read);

        // Second call is a no-op
        assert!(!notification.mark_read());
        assert!(notification.is_read);
    }

    #[test]
    fn test_type_serializes_snake_case() {
        let json = serde_json::to_value(unread()).unwrap();
        assert_eq!(json["type"], "new_listing");
        assert_eq!(json["isRead"], false);
    }
}
