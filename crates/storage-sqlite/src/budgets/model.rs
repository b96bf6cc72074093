//! Database models for budgets.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use spendcap_core::budgets::{Budget, BudgetPeriod};
use spendcap_core::errors::Result;

use crate::categories::CategoryDB;
use crate::errors::StorageError;
use crate::users::UserDB;

/// Database model for budgets. The limit is stored as its canonical
/// two-place decimal text.
#[derive(
    Queryable, Identifiable, Insertable, Associations, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(belongs_to(UserDB, foreign_key = user_id))]
#[diesel(belongs_to(CategoryDB, foreign_key = category_id))]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub limit_amount: String,
    pub period: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl BudgetDB {
    /// Builds the domain model, attaching the name of the joined category.
    pub fn into_budget(self, category_name: String) -> Result<Budget> {
        let limit = Decimal::from_str(&self.limit_amount).map_err(|e| {
            StorageError::InvalidStoredValue(format!(
                "budget {} has limit '{}': {}",
                self.id, self.limit_amount, e
            ))
        })?;
        let period = BudgetPeriod::from_str(&self.period).map_err(|_| {
            StorageError::InvalidStoredValue(format!(
                "budget {} has period '{}'",
                self.id, self.period
            ))
        })?;

        Ok(Budget {
            id: self.id,
            user_id: self.user_id,
            category_id: self.category_id,
            category_name,
            limit,
            period,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(limit_amount: &str, period: &str) -> BudgetDB {
        let now = chrono::Utc::now().naive_utc();
        BudgetDB {
            id: "b1".to_string(),
            user_id: "u1".to_string(),
            category_id: "c1".to_string(),
            limit_amount: limit_amount.to_string(),
            period: period.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_into_budget_parses_stored_values() {
        let budget = row("150.00", "weekly").into_budget("Food".to_string()).unwrap();
        assert_eq!(budget.limit, dec!(150.00));
        assert_eq!(budget.period, BudgetPeriod::Weekly);
        assert_eq!(budget.category_name, "Food");
    }

    #[test]
    fn test_into_budget_rejects_corrupt_period() {
        assert!(row("1.00", "daily").into_budget("Food".to_string()).is_err());
    }
}
