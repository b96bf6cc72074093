//! User identity models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Domain model representing a registered user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new user. The password is already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// Usernames are 3-150 characters of letters, digits and `_.@+-`.
pub fn validate_username(raw: &str) -> Result<String, ValidationError> {
    let username = raw.trim();
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::invalid_field(
            "username",
            format!("Must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters."),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_.@+-".contains(c))
    {
        return Err(ValidationError::invalid_field(
            "username",
            "May contain only letters, numbers, and @/./+/-/_ characters.",
        ));
    }
    Ok(username.to_string())
}

pub fn validate_password(raw: &str) -> Result<(), ValidationError> {
    if raw.chars().count() < PASSWORD_MIN_LEN {
        return Err(ValidationError::invalid_field(
            "password",
            format!("Must contain at least {PASSWORD_MIN_LEN} characters."),
        ));
    }
    Ok(())
}
