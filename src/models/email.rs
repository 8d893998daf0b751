use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Received => "received",
        }
    }

    /// Strict parse for user-supplied direction flags.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sent" => Some(Self::Sent),
            "received" => Some(Self::Received),
            _ => None,
        }
    }
}

/// How the lead responded to an email, when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Positive,
    Negative,
    FollowUpRequested,
    NoResponse,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::FollowUpRequested => "follow_up_requested",
            Self::NoResponse => "no_response",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::FollowUpRequested => "Follow-up Requested",
            Self::NoResponse => "No Response",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "follow_up_requested" | "follow_up" => Some(Self::FollowUpRequested),
            "no_response" => Some(Self::NoResponse),
            _ => None,
        }
    }
}

/// One entry in a lead's email log. Direction and sent_at are fixed at
/// creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailLog {
    pub id: i64,
    pub lead_id: i64,
    pub user_id: i64,
    pub direction: Direction,
    pub subject: Option<String>,
    pub content: Option<String>,
    pub response_type: Option<ResponseType>,
    pub sent_at: NaiveDateTime,
    pub scheduled_follow_up: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        assert_eq!(serde_json::to_string(&Direction::Sent).unwrap(), r#""sent""#);
        assert_eq!(
            serde_json::to_string(&Direction::Received).unwrap(),
            r#""received""#
        );
    }

    #[test]
    fn test_response_type_round_trip() {
        for s in ["positive", "negative", "follow_up_requested", "no_response"] {
            let parsed = ResponseType::parse(s).unwrap();
            assert_eq!(parsed.as_str(), s);
        }
        assert_eq!(ResponseType::parse("maybe"), None);
    }

    #[test]
    fn test_email_log_from_backend_payload() {
        let json = r#"{
            "id": 3,
            "lead_id": 42,
            "user_id": 7,
            "direction": "sent",
            "subject": "Intro",
            "content": "Hello there",
            "response_type": "follow_up_requested",
            "sent_at": "2024-03-04T15:30:00",
            "scheduled_follow_up": "2024-03-06T09:00:00"
        }"#;
        let email: EmailLog = serde_json::from_str(json).unwrap();
        assert_eq!(email.direction, Direction::Sent);
        assert_eq!(email.response_type, Some(ResponseType::FollowUpRequested));
        assert!(email.scheduled_follow_up.is_some());
    }
}
