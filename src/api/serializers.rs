//! Request payloads and response DTOs.
//!
//! Responses never expose the password hash; `id` and `author` are
//! read-only and come from the authenticated request, not the payload.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::models::{Trip, TripDay, User};
use crate::error::ApiError;

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Auth

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
    pub expires_in: u64,
}

// ---------------------------------------------------------------------------
// Trips

#[derive(Debug, Deserialize)]
pub struct TripPayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

impl TripPayload {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();

        if self.title.trim().is_empty() {
            field_errors.insert("title".to_string(), "This field is required".to_string());
        }
        if self.title.chars().count() > 255 {
            field_errors.insert(
                "title".to_string(),
                "Must be at most 255 characters".to_string(),
            );
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid trip", Some(field_errors)))
        }
    }
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Deserialize)]
pub struct TripPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

impl TripPatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(title) = &self.title {
            let full = TripPayload {
                title: title.clone(),
                description: String::new(),
                is_public: true,
            };
            full.validate()?;
        }
        Ok(())
    }

    /// Resolve the patch against the stored trip into full update values.
    pub fn apply(&self, trip: &Trip) -> TripPayload {
        TripPayload {
            title: self.title.clone().unwrap_or_else(|| trip.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| trip.description.clone()),
            is_public: self.is_public.unwrap_or(trip.is_public),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: Uuid,
    pub title: String,
    pub author: Uuid,
    pub description: String,
    pub is_public: bool,
}

impl From<&Trip> for TripResponse {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id,
            title: trip.title.clone(),
            author: trip.author_id,
            description: trip.description.clone(),
            is_public: trip.is_public,
        }
    }
}

// ---------------------------------------------------------------------------
// Trip days

#[derive(Debug, Deserialize)]
pub struct TripDayCreate {
    #[serde(default)]
    pub content: String,
    /// Insertion position; omitted means append
    pub position: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct TripDayPayload {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct TripDayPatch {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TripDayMove {
    pub to: i32,
}

#[derive(Debug, Serialize)]
pub struct TripDayResponse {
    pub id: Uuid,
    pub trip: Uuid,
    pub order: i32,
    pub content: String,
}

impl From<&TripDay> for TripDayResponse {
    fn from(day: &TripDay) -> Self {
        Self {
            id: day.id,
            trip: day.trip_id,
            order: day.order,
            content: day.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_trip_payload_defaults() {
        let payload: TripPayload =
            serde_json::from_value(serde_json::json!({ "title": "Test title" })).unwrap();

        assert_eq!(payload.title, "Test title");
        assert_eq!(payload.description, "");
        assert!(payload.is_public);
    }

    #[test]
    fn test_blank_title_rejected() {
        let payload = TripPayload {
            title: "   ".to_string(),
            description: String::new(),
            is_public: true,
        };

        let err = payload.validate().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_overlong_title_rejected() {
        let payload = TripPayload {
            title: "x".repeat(256),
            description: String::new(),
            is_public: true,
        };

        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_title_limit_counts_characters_not_bytes() {
        // 200 chars but 400 bytes; must pass a 255-character limit
        let payload = TripPayload {
            title: "é".repeat(200),
            description: String::new(),
            is_public: true,
        };
        assert!(payload.validate().is_ok());

        let payload = TripPayload {
            title: "é".repeat(256),
            description: String::new(),
            is_public: true,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_patch_keeps_unset_fields() {
        let trip = Trip {
            id: Uuid::new_v4(),
            title: "Old title".to_string(),
            author_id: Uuid::new_v4(),
            description: "Old description".to_string(),
            is_public: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let patch = TripPatch {
            title: None,
            description: None,
            is_public: Some(false),
        };

        let resolved = patch.apply(&trip);
        assert_eq!(resolved.title, "Old title");
        assert_eq!(resolved.description, "Old description");
        assert!(!resolved.is_public);
    }

    #[test]
    fn test_user_response_has_no_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "valid@testemail.com".to_string(),
            name: "Test name".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let body = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert!(body.get("password_hash").is_none());
        assert_eq!(body["email"], "valid@testemail.com");
    }

    #[test]
    fn test_trip_response_fields() {
        let trip = Trip {
            id: Uuid::new_v4(),
            title: "Test title".to_string(),
            author_id: Uuid::new_v4(),
            description: "desc".to_string(),
            is_public: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let body = serde_json::to_value(TripResponse::from(&trip)).unwrap();
        assert_eq!(body["author"], serde_json::json!(trip.author_id));
        assert_eq!(body["is_public"], false);
        assert!(body.get("created_at").is_none());
    }
}
