//! Budget domain models and field validation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Total significant digits a limit may carry.
pub const LIMIT_MAX_DIGITS: u32 = 10;
/// Fractional digits a limit may carry (and is stored with).
pub const LIMIT_DECIMAL_PLACES: u32 = 2;

/// Recurrence granularity of a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub const ALL: [BudgetPeriod; 3] = [
        BudgetPeriod::Weekly,
        BudgetPeriod::Monthly,
        BudgetPeriod::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BudgetPeriod::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_field(
                    "period",
                    format!("\"{s}\" is not a valid choice (weekly, monthly, yearly)"),
                )
            })
    }
}

/// Domain model representing a budget, joined with its category's name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub category_id: String,
    pub category_name: String,
    pub limit: Decimal,
    pub period: BudgetPeriod,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Nu. {} ({})",
            self.category_name, self.limit, self.period
        )
    }
}

/// Unvalidated budget fields as received from a client.
///
/// The owner is never part of the input; it always comes from the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetInput {
    pub category: Option<String>,
    pub limit: Option<String>,
    pub period: Option<String>,
}

/// How an update treats omitted fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// `category` and `limit` are required.
    Replace,
    /// Every field is optional.
    Patch,
}

/// Validated budget ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub user_id: String,
    pub category_id: String,
    pub limit: Decimal,
    pub period: BudgetPeriod,
}

/// Validated replacement values for an existing budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetUpdate {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub limit: Decimal,
    pub period: BudgetPeriod,
}

/// Parses a monetary limit, enforcing at most 10 digits of which at most 2 are
/// fractional. The result is rescaled to exactly two fractional digits.
pub fn parse_limit(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains(['e', 'E']) {
        return Err(ValidationError::invalid_field(
            "limit",
            "A valid number is required.",
        ));
    }

    let mut value = Decimal::from_str(trimmed)
        .map_err(|_| ValidationError::invalid_field("limit", "A valid number is required."))?;

    if value.scale() > LIMIT_DECIMAL_PLACES {
        return Err(ValidationError::invalid_field(
            "limit",
            format!("Ensure that there are no more than {LIMIT_DECIMAL_PLACES} decimal places."),
        ));
    }

    let max_whole_digits = LIMIT_MAX_DIGITS - LIMIT_DECIMAL_PLACES;
    let whole_bound = Decimal::from(10u64.pow(max_whole_digits));
    if value.abs().trunc() >= whole_bound {
        return Err(ValidationError::invalid_field(
            "limit",
            format!(
                "Ensure that there are no more than {max_whole_digits} digits before the decimal point."
            ),
        ));
    }

    value.rescale(LIMIT_DECIMAL_PLACES);
    Ok(value)
}

/// Parses an optional period, falling back to the default (monthly).
pub fn parse_period(raw: Option<&str>) -> Result<BudgetPeriod, ValidationError> {
    match raw {
        Some(value) => value.parse(),
        None => Ok(BudgetPeriod::default()),
    }
}

/// Validates a category reference's shape. Existence is checked by the service.
pub fn parse_category_ref(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::invalid_field(
            "category",
            "This field may not be blank.",
        ));
    }
    Ok(trimmed.to_string())
}
