use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Notification lifecycle. Transitions go unread→read and
/// unread/read→dismissed only; nothing moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    #[default]
    Unread,
    Read,
    Dismissed,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Dismissed => "dismissed",
        }
    }
}

/// Which notifications to ask the backend for. `all` disables the server
/// side status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Unread,
    Read,
    Dismissed,
    All,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Dismissed => "dismissed",
            Self::All => "all",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unread" => Some(Self::Unread),
            "read" => Some(Self::Read),
            "dismissed" => Some(Self::Dismissed),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub lead_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub status: NotificationStatus,
    pub created_at: NaiveDateTime,
    pub scheduled_for: Option<NaiveDateTime>,
    pub lead_name: Option<String>,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        self.status == NotificationStatus::Unread
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&NotificationStatus::Unread).unwrap(),
            r#""unread""#
        );
        assert_eq!(
            serde_json::to_string(&NotificationStatus::Dismissed).unwrap(),
            r#""dismissed""#
        );
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(StatusFilter::parse("all"), Some(StatusFilter::All));
        assert_eq!(StatusFilter::parse("unread"), Some(StatusFilter::Unread));
        assert_eq!(StatusFilter::parse("archived"), None);
    }

    #[test]
    fn test_notification_from_backend_payload() {
        let json = r#"{
            "id": 11,
            "user_id": 7,
            "lead_id": 42,
            "type": "follow_up",
            "title": "Follow-up with Acme Co",
            "message": "You have a scheduled follow-up with Acme Co from Acme.",
            "status": "unread",
            "created_at": "2024-03-04T10:00:00",
            "scheduled_for": "2024-03-05T09:00:00",
            "lead_name": "Acme Co"
        }"#;
        let notification: Notification = serde_json::from_str(json).unwrap();
        assert!(notification.is_unread());
        assert_eq!(notification.kind, "follow_up");
        assert_eq!(notification.lead_name.as_deref(), Some("Acme Co"));
    }
}
