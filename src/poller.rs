//! Follow-up notification polling.
//!
//! The watch command drives one of these on a fixed interval: ask the
//! backend to scan for due follow-ups, then re-fetch the unread list. A
//! failed cycle parks the poller in the error state, but the timer always
//! re-arms; the next tick retries with no backoff and no cap. Better to
//! keep retrying silently than to make the user restart the watch.

use std::time::Duration;

use crate::api::{ApiClient, ApiError};
use crate::models::{Notification, StatusFilter};

pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Backend surface the poller needs. The API client implements it; tests
/// substitute a scripted source.
pub trait FollowUpSource {
    /// Scan for due follow-ups; returns how many notifications were
    /// created.
    fn check_follow_ups(&self) -> Result<i64, ApiError>;
    fn unread_notifications(&self) -> Result<Vec<Notification>, ApiError>;
    fn mark_as_read(&self, notification_id: i64) -> Result<(), ApiError>;
    fn dismiss(&self, notification_id: i64) -> Result<(), ApiError>;
}

impl FollowUpSource for ApiClient {
    fn check_follow_ups(&self) -> Result<i64, ApiError> {
        ApiClient::check_follow_ups(self).map(|check| check.count)
    }

    fn unread_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.notifications(StatusFilter::Unread)
    }

    fn mark_as_read(&self, notification_id: i64) -> Result<(), ApiError> {
        ApiClient::mark_as_read(self, notification_id)
    }

    fn dismiss(&self, notification_id: i64) -> Result<(), ApiError> {
        ApiClient::dismiss(self, notification_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollerState {
    #[default]
    Idle,
    Polling,
    Error,
}

/// Poll cycle outcome handed to the caller for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Cycle completed; how many notifications the check created.
    Fresh { created: i64 },
    /// Cycle failed; retried on the next interval.
    Failed,
}

#[derive(Default)]
pub struct Poller {
    state: PollerState,
    notifications: Vec<Notification>,
    last_error: Option<String>,
}

impl Poller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    /// Unread notifications as of the last successful fetch.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.len()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// One poll cycle, run on the interval tick and on manual refresh:
    /// check follow-ups, then re-fetch unconditionally. The fetched list
    /// is applied whenever the fetch itself succeeds, even if the check
    /// failed; the cycle still counts as failed so the state shows it.
    pub fn tick(&mut self, source: &impl FollowUpSource) -> Tick {
        self.state = PollerState::Polling;

        let checked = source.check_follow_ups();
        let fetch_ok = match source.unread_notifications() {
            Ok(list) => {
                self.notifications = list;
                true
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                false
            }
        };

        match (checked, fetch_ok) {
            (Ok(created), true) => {
                self.last_error = None;
                self.state = PollerState::Idle;
                Tick::Fresh { created }
            }
            (Err(err), true) => {
                self.last_error = Some(err.to_string());
                self.state = PollerState::Error;
                Tick::Failed
            }
            (_, false) => {
                self.state = PollerState::Error;
                Tick::Failed
            }
        }
    }

    /// Mark a notification read, confirmed by a re-fetch. The local list
    /// is never updated speculatively; what the server returns is what
    /// the user sees.
    pub fn mark_read(&mut self, source: &impl FollowUpSource, notification_id: i64) -> Result<(), ApiError> {
        source.mark_as_read(notification_id)?;
        self.refresh(source)
    }

    /// Dismiss a notification, confirmed by a re-fetch.
    pub fn dismiss(&mut self, source: &impl FollowUpSource, notification_id: i64) -> Result<(), ApiError> {
        source.dismiss(notification_id)?;
        self.refresh(source)
    }

    fn refresh(&mut self, source: &impl FollowUpSource) -> Result<(), ApiError> {
        match source.unread_notifications() {
            Ok(list) => {
                self.notifications = list;
                self.last_error = None;
                self.state = PollerState::Idle;
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                self.state = PollerState::Error;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationStatus;
    use chrono::NaiveDate;
    use std::cell::RefCell;

    fn notification(id: i64, status: NotificationStatus) -> Notification {
        Notification {
            id,
            user_id: 7,
            lead_id: Some(42),
            kind: "follow_up".to_string(),
            title: format!("Follow-up {}", id),
            message: "Scheduled follow-up".to_string(),
            status,
            created_at: NaiveDate::from_ymd_opt(2024, 3, 4)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            scheduled_for: None,
            lead_name: Some("Acme Co".to_string()),
        }
    }

    /// Scripted source: configurable failures, call log for assertions.
    #[derive(Default)]
    struct StubSource {
        unread: RefCell<Vec<Notification>>,
        created: i64,
        fail_check: bool,
        fail_fetch: bool,
        calls: RefCell<Vec<String>>,
    }

    impl StubSource {
        fn with_unread(unread: Vec<Notification>) -> Self {
            Self {
                unread: RefCell::new(unread),
                ..Self::default()
            }
        }
    }

    impl FollowUpSource for StubSource {
        fn check_follow_ups(&self) -> Result<i64, ApiError> {
            self.calls.borrow_mut().push("check".to_string());
            if self.fail_check {
                return Err(ApiError::Transport(
                    "Failed to check for new notifications".to_string(),
                ));
            }
            Ok(self.created)
        }

        fn unread_notifications(&self) -> Result<Vec<Notification>, ApiError> {
            self.calls.borrow_mut().push("fetch".to_string());
            if self.fail_fetch {
                return Err(ApiError::Transport(
                    "Failed to fetch notifications".to_string(),
                ));
            }
            Ok(self.unread.borrow().clone())
        }

        fn mark_as_read(&self, id: i64) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(format!("read {}", id));
            // Backend semantics: already-read is still a success.
            self.unread.borrow_mut().retain(|n| n.id != id);
            Ok(())
        }

        fn dismiss(&self, id: i64) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(format!("dismiss {}", id));
            self.unread.borrow_mut().retain(|n| n.id != id);
            Ok(())
        }
    }

    #[test]
    fn test_starts_idle_and_empty() {
        let poller = Poller::new();
        assert_eq!(poller.state(), PollerState::Idle);
        assert_eq!(poller.unread_count(), 0);
    }

    #[test]
    fn test_tick_checks_then_refetches() {
        let source = StubSource {
            created: 1,
            ..StubSource::with_unread(vec![notification(1, NotificationStatus::Unread)])
        };
        let mut poller = Poller::new();

        let outcome = poller.tick(&source);

        assert_eq!(outcome, Tick::Fresh { created: 1 });
        assert_eq!(poller.state(), PollerState::Idle);
        assert_eq!(poller.unread_count(), 1);
        assert!(poller.last_error().is_none());
        assert_eq!(*source.calls.borrow(), vec!["check", "fetch"]);
    }

    #[test]
    fn test_failed_check_still_refetches_and_reports_error() {
        let source = StubSource {
            fail_check: true,
            ..StubSource::with_unread(vec![notification(1, NotificationStatus::Unread)])
        };
        let mut poller = Poller::new();

        assert_eq!(poller.tick(&source), Tick::Failed);
        assert_eq!(poller.state(), PollerState::Error);
        // The fetch ran and its result was applied.
        assert_eq!(*source.calls.borrow(), vec!["check", "fetch"]);
        assert_eq!(poller.unread_count(), 1);
    }

    #[test]
    fn test_failed_fetch_keeps_previous_list() {
        let mut source = StubSource::with_unread(vec![notification(1, NotificationStatus::Unread)]);
        let mut poller = Poller::new();
        poller.tick(&source);

        source.fail_fetch = true;
        assert_eq!(poller.tick(&source), Tick::Failed);
        assert_eq!(poller.state(), PollerState::Error);
        assert_eq!(poller.unread_count(), 1);
        assert!(poller.last_error().is_some());
    }

    #[test]
    fn test_error_state_recovers_on_next_tick() {
        let mut source = StubSource::with_unread(Vec::new());
        source.fail_check = true;
        let mut poller = Poller::new();
        poller.tick(&source);
        assert_eq!(poller.state(), PollerState::Error);

        source.fail_check = false;
        assert_eq!(poller.tick(&source), Tick::Fresh { created: 0 });
        assert_eq!(poller.state(), PollerState::Idle);
        assert!(poller.last_error().is_none());
    }

    #[test]
    fn test_mark_read_confirms_through_refetch() {
        let source = StubSource::with_unread(vec![
            notification(1, NotificationStatus::Unread),
            notification(2, NotificationStatus::Unread),
        ]);
        let mut poller = Poller::new();
        poller.tick(&source);
        assert_eq!(poller.unread_count(), 2);

        poller.mark_read(&source, 1).unwrap();

        assert_eq!(poller.unread_count(), 1);
        assert_eq!(poller.notifications()[0].id, 2);
        assert_eq!(
            *source.calls.borrow(),
            vec!["check", "fetch", "read 1", "fetch"]
        );
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let source = StubSource::with_unread(vec![notification(1, NotificationStatus::Unread)]);
        let mut poller = Poller::new();
        poller.tick(&source);

        poller.mark_read(&source, 1).unwrap();
        // Second mark of the same id: still succeeds, list unchanged.
        poller.mark_read(&source, 1).unwrap();
        assert_eq!(poller.unread_count(), 0);
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let source = StubSource::with_unread(vec![notification(3, NotificationStatus::Unread)]);
        let mut poller = Poller::new();
        poller.tick(&source);

        poller.dismiss(&source, 3).unwrap();
        poller.dismiss(&source, 3).unwrap();
        assert_eq!(poller.unread_count(), 0);
        assert_eq!(poller.state(), PollerState::Idle);
    }
}
