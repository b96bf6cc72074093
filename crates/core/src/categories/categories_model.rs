//! Expense category domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

pub const CATEGORY_NAME_MAX_LEN: usize = 100;

/// Domain model representing an expense category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new category
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub user_id: String,
    pub name: String,
}

pub fn validate_category_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::invalid_field(
            "name",
            "This field may not be blank.",
        ));
    }
    if name.chars().count() > CATEGORY_NAME_MAX_LEN {
        return Err(ValidationError::invalid_field(
            "name",
            format!("Ensure this field has no more than {CATEGORY_NAME_MAX_LEN} characters."),
        ));
    }
    Ok(name.to_string())
}
