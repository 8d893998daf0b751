//! Lead, note, and email-log endpoints, plus the activity feed join.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::models::{merge_feed, Activity, Direction, EmailLog, Lead, LeadStatus, Note, ResponseType};

/// Server-side search and filter parameters for the lead list.
#[derive(Debug, Clone, Default)]
pub struct LeadQuery {
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub assigned_to: Option<i64>,
}

impl LeadQuery {
    /// Flatten into query pairs; unset filters are omitted entirely.
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref search) = self.search {
            params.push(("search", search.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(start) = self.start_date {
            params.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        if let Some(user_id) = self.assigned_to {
            params.push(("assigned_to", user_id.to_string()));
        }
        params
    }
}

#[derive(Debug, Serialize)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

/// Partial lead update. Absent fields are left untouched server-side.
#[derive(Debug, Default, Serialize)]
pub struct LeadUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<NaiveDateTime>,
}

impl LeadUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.company_name.is_none()
            && self.industry.is_none()
            && self.status.is_none()
            && self.assigned_to.is_none()
            && self.next_follow_up.is_none()
    }
}

/// An email to record in a lead's log. The backend stamps the lead's last
/// contact date and copies `scheduled_follow_up` to its next follow-up.
#[derive(Debug, Serialize)]
pub struct NewEmail {
    pub direction: Direction,
    pub subject: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_follow_up: Option<NaiveDateTime>,
}

/// An email for the backend to deliver to the lead's address and then log.
#[derive(Debug, Serialize)]
pub struct OutgoingEmail {
    pub subject: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_follow_up: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
struct LeadEnvelope {
    lead: Lead,
}

#[derive(Debug, Deserialize)]
struct LeadsEnvelope {
    leads: Vec<Lead>,
}

#[derive(Debug, Deserialize)]
struct NoteEnvelope {
    note: Note,
}

#[derive(Debug, Deserialize)]
struct NotesEnvelope {
    notes: Vec<Note>,
}

#[derive(Debug, Deserialize)]
struct EmailEnvelope {
    email: EmailLog,
}

#[derive(Debug, Deserialize)]
struct EmailsEnvelope {
    emails: Vec<EmailLog>,
}

impl ApiClient {
    pub fn create_lead(&self, lead: &NewLead) -> Result<Lead, ApiError> {
        let envelope: LeadEnvelope =
            self.send(self.post("/api/leads")?.json(lead), "Failed to create lead")?;
        Ok(envelope.lead)
    }

    pub fn leads(&self, query: &LeadQuery) -> Result<Vec<Lead>, ApiError> {
        let envelope: LeadsEnvelope = self.send(
            self.get("/api/leads")?.query(&query.to_params()),
            "Failed to fetch leads",
        )?;
        Ok(envelope.leads)
    }

    pub fn lead(&self, lead_id: i64) -> Result<Lead, ApiError> {
        self.send(
            self.get(&format!("/api/leads/{}", lead_id))?,
            "Failed to fetch lead",
        )
    }

    pub fn update_lead(&self, lead_id: i64, update: &LeadUpdate) -> Result<Lead, ApiError> {
        let envelope: LeadEnvelope = self.send(
            self.put(&format!("/api/leads/{}", lead_id))?.json(update),
            "Failed to update lead",
        )?;
        Ok(envelope.lead)
    }

    pub fn add_note(&self, lead_id: i64, content: &str) -> Result<Note, ApiError> {
        let body = serde_json::json!({ "content": content });
        let envelope: NoteEnvelope = self.send(
            self.post(&format!("/api/leads/{}/notes", lead_id))?.json(&body),
            "Failed to add note",
        )?;
        Ok(envelope.note)
    }

    pub fn notes(&self, lead_id: i64) -> Result<Vec<Note>, ApiError> {
        let envelope: NotesEnvelope = self.send(
            self.get(&format!("/api/leads/{}/notes", lead_id))?,
            "Failed to fetch notes",
        )?;
        Ok(envelope.notes)
    }

    pub fn log_email(&self, lead_id: i64, email: &NewEmail) -> Result<EmailLog, ApiError> {
        let envelope: EmailEnvelope = self.send(
            self.post(&format!("/api/leads/{}/emails", lead_id))?.json(email),
            "Failed to log email",
        )?;
        Ok(envelope.email)
    }

    pub fn emails(&self, lead_id: i64) -> Result<Vec<EmailLog>, ApiError> {
        let envelope: EmailsEnvelope = self.send(
            self.get(&format!("/api/leads/{}/emails", lead_id))?,
            "Failed to fetch emails",
        )?;
        Ok(envelope.emails)
    }

    /// Deliver an email through the backend's sender and log it.
    pub fn send_email(&self, lead_id: i64, email: &OutgoingEmail) -> Result<EmailLog, ApiError> {
        let envelope: EmailEnvelope = self.send(
            self.post(&format!("/api/leads/{}/send-email", lead_id))?.json(email),
            "Failed to send email",
        )?;
        Ok(envelope.email)
    }

    /// Fetch a lead's notes and emails concurrently and merge them into
    /// the activity feed. If either fetch fails the whole feed is
    /// unavailable; no partial feed is returned.
    pub fn activity_feed(&self, lead_id: i64) -> Result<Vec<Activity>, ApiError> {
        let (notes, emails) = std::thread::scope(|scope| {
            let notes = scope.spawn(|| self.notes(lead_id));
            let emails = scope.spawn(|| self.emails(lead_id));
            (notes.join(), emails.join())
        });

        join_feed(
            notes.unwrap_or_else(|_| Err(ApiError::Transport("Failed to fetch notes".to_string()))),
            emails
                .unwrap_or_else(|_| Err(ApiError::Transport("Failed to fetch emails".to_string()))),
        )
    }
}

/// Join the two halves of the feed. Fail-closed: one failed half fails
/// the whole feed rather than rendering the other half alone.
fn join_feed(
    notes: Result<Vec<Note>, ApiError>,
    emails: Result<Vec<EmailLog>, ApiError>,
) -> Result<Vec<Activity>, ApiError> {
    Ok(merge_feed(notes?, emails?))
}
