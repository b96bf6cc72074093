//! Wire types for the HTTP API.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use spendcap_core::budgets::{Budget, BudgetInput, BudgetPeriod};
use spendcap_core::categories::Category;
use spendcap_core::errors::ValidationError;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct BudgetResponse {
    pub id: String,
    /// Id of the referenced category.
    pub category: String,
    pub category_name: String,
    #[schema(value_type = String, example = "150.00")]
    pub limit: Decimal,
    #[schema(value_type = String, example = "monthly")]
    pub period: BudgetPeriod,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Budget> for BudgetResponse {
    fn from(budget: Budget) -> Self {
        Self {
            id: budget.id,
            category: budget.category_id,
            category_name: budget.category_name,
            limit: budget.limit,
            period: budget.period,
            created_at: budget.created_at,
            updated_at: budget.updated_at,
        }
    }
}

/// Documents the budget write body. Requests are read as raw JSON through
/// [`budget_input_from_json`] so that `limit` may be a string or a number.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct BudgetRequest {
    pub category: Option<String>,
    #[schema(value_type = Option<String>, example = "150.00")]
    pub limit: Option<String>,
    #[schema(example = "weekly")]
    pub period: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewCategoryRequest {
    pub name: String,
}

fn null_field(field: &str) -> ValidationError {
    ValidationError::invalid_field(field, "This field may not be null.")
}

/// Reads the writable budget fields out of a request body. Unknown keys
/// (including `user`, `id` and the read-only fields) are ignored.
pub fn budget_input_from_json(body: Value) -> Result<BudgetInput, ValidationError> {
    let Value::Object(map) = body else {
        return Err(ValidationError::InvalidInput(
            "Expected a JSON object.".to_string(),
        ));
    };

    let category = match map.get("category") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) => return Err(null_field("category")),
        Some(other) => {
            return Err(ValidationError::invalid_field(
                "category",
                format!("Incorrect type. Expected pk value, received {}.", type_name(other)),
            ))
        }
    };

    let limit = match map.get("limit") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Null) => return Err(null_field("limit")),
        Some(_) => {
            return Err(ValidationError::invalid_field(
                "limit",
                "A valid number is required.",
            ))
        }
    };

    let period = match map.get("period") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) => return Err(null_field("period")),
        Some(other) => {
            return Err(ValidationError::invalid_field(
                "period",
                format!("\"{other}\" is not a valid choice."),
            ))
        }
    };

    Ok(BudgetInput {
        category,
        limit,
        period,
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
