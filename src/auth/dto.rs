use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{auth::repo_types::User, error::AuthError};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&mut self) -> Result<(), AuthError> {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        if self.name.is_empty() {
            return Err(AuthError::Validation("name must not be empty".into()));
        }
        if !is_valid_email(&self.email) {
            return Err(AuthError::Validation("invalid email".into()));
        }
        if self.password.len() < 6 {
            return Err(AuthError::Validation("password too short".into()));
        }
        Ok(())
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&mut self) -> Result<(), AuthError> {
        self.email = self.email.trim().to_lowercase();
        if !is_valid_email(&self.email) {
            return Err(AuthError::Validation("invalid email".into()));
        }
        if self.password.len() < 6 {
            return Err(AuthError::Validation("password too short".into()));
        }
        Ok(())
    }
}

/// Public part of the user returned to the client. Timestamps serialize as
/// RFC 3339 strings; the password hash never appears here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Response returned by register, login and profile.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Bare `{message}` response (logout).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: "$argon2id$not-real".into(),
            role: "USER".into(),
            created_at: datetime!(2024-01-02 03:04:05 UTC),
            updated_at: datetime!(2024-01-02 03:04:05 UTC),
        }
    }

    #[test]
    fn public_user_has_no_hash_and_camel_case_dates() {
        let json = serde_json::to_string(&PublicUser::from(sample_user())).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"createdAt\":\"2024-01-02T03:04:05Z\""));
        assert!(json.contains("\"updatedAt\""));
        assert!(json.contains("\"role\":\"USER\""));
    }

    #[test]
    fn register_request_normalizes_and_validates() {
        let mut req = RegisterRequest {
            name: "  Ada  ".into(),
            email: "  Ada@Example.COM ".into(),
            password: "secret1".into(),
        };
        req.validate().expect("valid request");
        assert_eq!(req.name, "Ada");
        assert_eq!(req.email, "ada@example.com");
    }

    #[test]
    fn register_request_rejects_bad_input() {
        let mut req = RegisterRequest {
            name: "   ".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
        };
        assert!(req.validate().is_err());

        let mut req = RegisterRequest {
            name: "Ada".into(),
            email: "not-an-email".into(),
            password: "secret1".into(),
        };
        assert!(req.validate().is_err());

        let mut req = RegisterRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "short".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn login_request_rejects_short_password() {
        let mut req = LoginRequest {
            email: "ada@example.com".into(),
            password: "12345".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email(""));
    }
}
