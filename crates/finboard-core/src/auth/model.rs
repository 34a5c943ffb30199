//! Authentication domain models.

use serde::{Deserialize, Serialize};

use crate::serde_util::{opt_string_or_number, string_or_number};

/// The authenticated user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend user id (numeric on the wire, kept as text)
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub username: String,
    /// Login identifier. `/users/me` reports it as `email`.
    #[serde(
        default,
        alias = "email",
        deserialize_with = "opt_string_or_number"
    )]
    pub identifier: String,
}

/// Credentials posted to the auth endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

/// Response of `POST /api/auth/local`.
///
/// Both fields are optional on the wire; the session layer decides what a
/// missing token means.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub jwt: Option<String>,
}

/// Where the session stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Startup, before the persisted token has been checked
    #[default]
    Unknown,
    LoggedOut,
    LoggedIn(User),
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::LoggedIn(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_accepts_numeric_id_and_email() {
        let user: User = serde_json::from_str(
            r#"{"id": 7, "username": "ana", "email": "ana@example.com", "confirmed": true}"#,
        )
        .unwrap();
        assert_eq!(user.id, "7");
        assert_eq!(user.identifier, "ana@example.com");
    }

    #[test]
    fn test_auth_response_without_jwt() {
        let resp: AuthResponse =
            serde_json::from_str(r#"{"user": {"id": "1", "username": "ana"}}"#).unwrap();
        assert!(resp.jwt.is_none());
        assert_eq!(resp.user.unwrap().identifier, "");
    }
}
