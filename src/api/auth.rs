//! Authentication and user management endpoints.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::models::{Role, User};

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Partial user update. Absent fields are left untouched server-side;
/// role and is_active are honored for admins only.
#[derive(Debug, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendly_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Debug, Deserialize)]
struct UsersEnvelope {
    users: Vec<User>,
}

impl ApiClient {
    pub fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.send(self.post("/api/auth/login")?.json(&body), "Login failed")
    }

    /// Register a new team member. Admin only.
    pub fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.send(
            self.post("/api/auth/register")?.json(request),
            "Registration failed",
        )?;
        Ok(envelope.user)
    }

    /// The user the stored token belongs to.
    pub fn current_user(&self) -> Result<User, ApiError> {
        self.send(self.get("/api/auth/me")?, "Failed to get user data")
    }

    /// All users. Admin only.
    pub fn users(&self) -> Result<Vec<User>, ApiError> {
        let envelope: UsersEnvelope = self.send(self.get("/api/auth/users")?, "Failed to get users")?;
        Ok(envelope.users)
    }

    pub fn update_user(&self, user_id: i64, update: &UserUpdate) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.send(
            self.put(&format!("/api/auth/users/{}", user_id))?.json(update),
            "Failed to update user",
        )?;
        Ok(envelope.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_payload() {
        let json = r#"{
            "token": "jwt-token",
            "user": {
                "id": 1,
                "email": "admin@example.com",
                "first_name": "Ada",
                "last_name": "Li",
                "role": "admin",
                "calendly_link": "https://calendly.com/ada",
                "created_at": "2024-01-01T00:00:00",
                "last_login": null,
                "is_active": true
            }
        }"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token, "jwt-token");
        assert!(response.user.is_admin());
    }

    #[test]
    fn test_user_update_serializes_only_set_fields() {
        let update = UserUpdate {
            first_name: Some("Sam".to_string()),
            ..UserUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "first_name": "Sam" }));
    }
}
