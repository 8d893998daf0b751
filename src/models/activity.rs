use chrono::NaiveDateTime;

use super::{EmailLog, Note};

/// One entry in a lead's activity feed. Derived from the lead's notes and
/// email log on each view; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    Note(Note),
    Email(EmailLog),
}

impl Activity {
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            Self::Note(note) => note.created_at,
            Self::Email(email) => email.sent_at,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Note(_) => "note",
            Self::Email(_) => "email",
        }
    }
}

/// Merge a lead's notes and emails into one feed, most recent first.
///
/// Equal timestamps order notes before emails; items of the same kind keep
/// their fetched order. The backend does not guarantee unique timestamps,
/// so the tie-break keeps the feed deterministic.
pub fn merge_feed(notes: Vec<Note>, emails: Vec<EmailLog>) -> Vec<Activity> {
    let mut feed: Vec<Activity> = notes
        .into_iter()
        .map(Activity::Note)
        .chain(emails.into_iter().map(Activity::Email))
        .collect();
    // Stable sort: notes were chained ahead of emails, so ties keep that
    // order.
    feed.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn note(id: i64, created_at: NaiveDateTime) -> Note {
        Note {
            id,
            lead_id: 42,
            user_id: 7,
            content: format!("note {}", id),
            created_at,
            updated_at: created_at,
        }
    }

    fn email(id: i64, sent_at: NaiveDateTime) -> EmailLog {
        EmailLog {
            id,
            lead_id: 42,
            user_id: 7,
            direction: Direction::Sent,
            subject: Some(format!("email {}", id)),
            content: None,
            response_type: None,
            sent_at,
            scheduled_follow_up: None,
        }
    }

    #[test]
    fn test_feed_has_every_item_tagged() {
        let notes = vec![note(1, at(1, 9)), note(2, at(3, 9))];
        let emails = vec![email(1, at(2, 9)), email(2, at(4, 9)), email(3, at(5, 9))];
        let feed = merge_feed(notes, emails);

        assert_eq!(feed.len(), 5);
        assert_eq!(feed.iter().filter(|a| a.kind() == "note").count(), 2);
        assert_eq!(feed.iter().filter(|a| a.kind() == "email").count(), 3);
    }

    #[test]
    fn test_feed_is_sorted_most_recent_first() {
        let notes = vec![note(1, at(1, 9)), note(2, at(3, 9))];
        let emails = vec![email(1, at(2, 9)), email(2, at(4, 9))];
        let feed = merge_feed(notes, emails);

        let timestamps: Vec<_> = feed.iter().map(Activity::timestamp).collect();
        let mut sorted = timestamps.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(timestamps, sorted);
        assert_eq!(feed[0].timestamp(), at(4, 9));
    }

    #[test]
    fn test_equal_timestamps_put_notes_before_emails() {
        let when = at(2, 12);
        let feed = merge_feed(vec![note(1, when)], vec![email(9, when)]);

        assert_eq!(feed[0].kind(), "note");
        assert_eq!(feed[1].kind(), "email");
    }

    #[test]
    fn test_same_kind_keeps_fetched_order() {
        let when = at(2, 12);
        let feed = merge_feed(vec![note(1, when), note(2, when)], Vec::new());

        match (&feed[0], &feed[1]) {
            (Activity::Note(first), Activity::Note(second)) => {
                assert_eq!(first.id, 1);
                assert_eq!(second.id, 2);
            }
            _ => panic!("expected two notes"),
        }
    }

    #[test]
    fn test_empty_inputs_yield_empty_feed() {
        assert!(merge_feed(Vec::new(), Vec::new()).is_empty());
    }
}
