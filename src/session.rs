//! Session persistence and the capability gate for protected commands.
//!
//! The token and the user record it belongs to live together in one JSON
//! file under the user config directory, and are removed together on
//! logout. Nothing else is persisted client-side.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::models::{Role, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: String, user: User) -> Self {
        Self { token, user }
    }

    /// Load the stored session. A missing or unreadable file means
    /// "not signed in", never an error.
    pub fn load() -> Result<Option<Session>> {
        Ok(Self::load_from(&Self::default_path()?))
    }

    pub fn load_from(path: &Path) -> Option<Session> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Remove the stored session. Clearing an absent session is fine.
    pub fn clear() -> Result<()> {
        Self::clear_at(&Self::default_path()?)
    }

    pub fn clear_at(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("leadcmd").join("session.json"))
    }
}

/// Capability a command needs before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    SignedIn,
    Admin,
}

/// Outcome of the capability check. A pure decision; the caller acts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    LoginRequired,
    Denied,
}

/// Decide whether the current session satisfies `requirement`. No side
/// effects; evaluated before every protected command.
pub fn check_access(session: Option<&Session>, requirement: Requirement) -> Access {
    let Some(session) = session else {
        return Access::LoginRequired;
    };
    match requirement {
        Requirement::SignedIn => Access::Allowed,
        Requirement::Admin if session.user.role == Role::Admin => Access::Allowed,
        Requirement::Admin => Access::Denied,
    }
}

/// Load the session and enforce `requirement`, or explain how to proceed.
pub fn require(requirement: Requirement) -> Result<Session> {
    let session = Session::load()?;
    match (check_access(session.as_ref(), requirement), session) {
        (Access::Allowed, Some(session)) => Ok(session),
        (Access::Denied, _) => bail!("Admin access required."),
        _ => bail!("Not signed in. Run: leadcmd login"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user(role: Role) -> User {
        User {
            id: 7,
            email: "sam@example.com".to_string(),
            first_name: "Sam".to_string(),
            last_name: "Rivera".to_string(),
            role,
            calendly_link: None,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            last_login: None,
            is_active: true,
        }
    }

    fn session(role: Role) -> Session {
        Session::new("jwt".to_string(), user(role))
    }

    #[test]
    fn test_no_session_requires_login() {
        assert_eq!(check_access(None, Requirement::SignedIn), Access::LoginRequired);
        assert_eq!(check_access(None, Requirement::Admin), Access::LoginRequired);
    }

    #[test]
    fn test_team_member_denied_admin_commands() {
        let session = session(Role::TeamMember);
        assert_eq!(
            check_access(Some(&session), Requirement::Admin),
            Access::Denied
        );
        assert_eq!(
            check_access(Some(&session), Requirement::SignedIn),
            Access::Allowed
        );
    }

    #[test]
    fn test_admin_allowed_admin_commands() {
        let session = session(Role::Admin);
        assert_eq!(
            check_access(Some(&session), Requirement::Admin),
            Access::Allowed
        );
    }

    #[test]
    fn test_save_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = session(Role::TeamMember);
        session.save_to(&path).unwrap();

        let loaded = Session::load_from(&path).unwrap();
        assert_eq!(loaded, session);

        Session::clear_at(&path).unwrap();
        assert!(Session::load_from(&path).is_none());
        // Clearing twice is fine.
        Session::clear_at(&path).unwrap();
    }

    #[test]
    fn test_corrupt_session_reads_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        assert!(Session::load_from(&path).is_none());
    }
}
