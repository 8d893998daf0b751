//! Follow-up notification endpoints.

use serde::Deserialize;

use super::{Ack, ApiClient, ApiError};
use crate::models::{Notification, StatusFilter};

/// Result of asking the backend to scan for due follow-ups.
#[derive(Debug, Deserialize)]
pub struct FollowUpCheck {
    pub message: String,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
struct NotificationsEnvelope {
    notifications: Vec<Notification>,
}

impl ApiClient {
    pub fn notifications(&self, filter: StatusFilter) -> Result<Vec<Notification>, ApiError> {
        let envelope: NotificationsEnvelope = self.send(
            self.get("/api/notifications")?
                .query(&[("status", filter.as_str())]),
            "Failed to fetch notifications",
        )?;
        Ok(envelope.notifications)
    }

    /// Mark a notification read. The backend applies the status
    /// unconditionally, so repeating this on an already-read notification
    /// succeeds as a no-op.
    pub fn mark_as_read(&self, notification_id: i64) -> Result<(), ApiError> {
        let _: Ack = self.send(
            self.put(&format!("/api/notifications/{}/mark-as-read", notification_id))?,
            "Failed to mark notification as read",
        )?;
        Ok(())
    }

    /// Dismiss a notification. Idempotent for the same reason as
    /// [`ApiClient::mark_as_read`].
    pub fn dismiss(&self, notification_id: i64) -> Result<(), ApiError> {
        let _: Ack = self.send(
            self.put(&format!("/api/notifications/{}/dismiss", notification_id))?,
            "Failed to dismiss notification",
        )?;
        Ok(())
    }

    /// Ask the backend to create notifications for follow-ups due within
    /// the next day. Returns how many were created.
    pub fn check_follow_ups(&self) -> Result<FollowUpCheck, ApiError> {
        self.send(
            self.get("/api/notifications/check-follow-ups")?,
            "Failed to check for new notifications",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_up_check_payload() {
        let json = r#"{"message": "Created 2 new notification(s)", "count": 2}"#;
        let check: FollowUpCheck = serde_json::from_str(json).unwrap();
        assert_eq!(check.count, 2);
    }

    #[test]
    fn test_notifications_envelope() {
        let json = r#"{"notifications": []}"#;
        let envelope: NotificationsEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.notifications.is_empty());
    }
}
