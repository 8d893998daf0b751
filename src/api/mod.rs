//! HTTP clients for the CRM backend.
//!
//! One module per resource family (auth, leads, notifications, settings),
//! all thin wrappers over a shared blocking client. Every failed call
//! surfaces the backend's error message when the payload carries one, or a
//! per-operation fallback when it does not.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

mod auth;
mod leads;
mod notifications;
mod settings;

pub use auth::{LoginResponse, RegisterRequest, UserUpdate};
pub use leads::{LeadQuery, LeadUpdate, NewEmail, NewLead, OutgoingEmail};
pub use notifications::FollowUpCheck;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failures surfaced by the API clients. Every variant carries a
/// human-readable message; callers print it and leave the pre-operation
/// state untouched.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable HTTP response.
    #[error("{0}")]
    Transport(String),
    /// The backend rejected the credentials or the caller's role.
    #[error("{0}")]
    Unauthorized(String),
    /// Rejected client-side before submission.
    #[error("{0}")]
    Validation(String),
    /// The backend reported a business error.
    #[error("{0}")]
    Api(String),
}

/// Acknowledgement payload returned by mutation endpoints.
#[derive(Debug, Deserialize)]
pub struct Ack {
    pub message: String,
}

pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client against `base_url`, optionally carrying a session
    /// token for protected endpoints.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|_| ApiError::Validation(format!("Invalid API URL: {}", base_url)))?;
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Store the token from a fresh login for subsequent requests.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|_| ApiError::Validation(format!("Invalid API path: {}", path)))
    }

    pub(crate) fn get(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.http.get(self.endpoint(path)?))
    }

    pub(crate) fn post(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.http.post(self.endpoint(path)?))
    }

    pub(crate) fn put(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.http.put(self.endpoint(path)?))
    }

    /// Send a request and decode the JSON body, mapping failures to the
    /// backend's error message or `fallback`.
    pub(crate) fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .map_err(|_| ApiError::Transport(fallback.to_string()))?;
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .map_err(|_| ApiError::Transport(fallback.to_string()));
        }

        let message = response
            .text()
            .ok()
            .and_then(|body| error_message(&body))
            .unwrap_or_else(|| fallback.to_string());

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(ApiError::Unauthorized(message))
        } else {
            Err(ApiError::Api(message))
        }
    }
}

/// Pull the `{"error": "..."}` message out of a failed response body.
fn error_message(body: &str) -> Option<String> {
    let payload: serde_json::Value = serde_json::from_str(body).ok()?;
    payload.get("error")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"error": "Invalid email or password"}"#),
            Some("Invalid email or password".to_string())
        );
        assert_eq!(error_message(r#"{"message": "ok"}"#), None);
        assert_eq!(error_message("<html>502</html>"), None);
        assert_eq!(error_message(""), None);
    }

    #[test]
    fn test_api_error_displays_bare_message() {
        let err = ApiError::Api("Missing required fields".to_string());
        assert_eq!(err.to_string(), "Missing required fields");

        let err = ApiError::Transport("Failed to fetch leads".to_string());
        assert_eq!(err.to_string(), "Failed to fetch leads");
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        assert!(ApiClient::new("not a url", None).is_err());
    }

    #[test]
    fn test_client_holds_token() {
        let mut client = ApiClient::new(DEFAULT_BASE_URL, None).unwrap();
        assert!(client.token().is_none());

        client.set_token("jwt".to_string());
        assert_eq!(client.token(), Some("jwt"));
    }
}
