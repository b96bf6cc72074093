use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::budgets_model::{
    parse_category_ref, parse_limit, parse_period, Budget, BudgetInput, BudgetPeriod,
    BudgetUpdate, NewBudget, UpdateMode,
};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::categories::CategoryRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
    ) -> Self {
        BudgetService {
            repository,
            category_repository,
        }
    }

    /// Any existing category is accepted, whoever owns it.
    fn ensure_category_exists(&self, category_id: &str) -> Result<()> {
        match self.category_repository.get_category(category_id)? {
            Some(_) => Ok(()),
            None => Err(ValidationError::invalid_field(
                "category",
                format!("Invalid pk \"{category_id}\" - object does not exist."),
            )
            .into()),
        }
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| ValidationError::MissingField(field.to_string()).into())
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn list_budgets(&self, caller_id: &str) -> Result<Vec<Budget>> {
        self.repository.list_budgets_for_user(caller_id)
    }

    fn get_budget(&self, caller_id: &str, budget_id: &str) -> Result<Budget> {
        self.repository
            .get_budget_for_user(caller_id, budget_id)?
            .ok_or_else(|| Error::NotFound("Budget".to_string()))
    }

    async fn create_budget(&self, caller_id: &str, input: BudgetInput) -> Result<Budget> {
        let category_id = parse_category_ref(required(&input.category, "category")?)?;
        let limit = parse_limit(required(&input.limit, "limit")?)?;
        let period = parse_period(input.period.as_deref())?;
        self.ensure_category_exists(&category_id)?;

        let budget = self
            .repository
            .insert_budget(NewBudget {
                user_id: caller_id.to_string(),
                category_id,
                limit,
                period,
            })
            .await?;
        debug!("Created budget {} for user {}", budget.id, caller_id);
        Ok(budget)
    }

    async fn update_budget(
        &self,
        caller_id: &str,
        budget_id: &str,
        input: BudgetInput,
        mode: UpdateMode,
    ) -> Result<Budget> {
        let existing = self.get_budget(caller_id, budget_id)?;

        if mode == UpdateMode::Replace {
            required(&input.category, "category")?;
            required(&input.limit, "limit")?;
        }

        let category_id = match input.category.as_deref() {
            Some(raw) => {
                let category_id = parse_category_ref(raw)?;
                if category_id != existing.category_id {
                    self.ensure_category_exists(&category_id)?;
                }
                category_id
            }
            None => existing.category_id,
        };
        let limit = match input.limit.as_deref() {
            Some(raw) => parse_limit(raw)?,
            None => existing.limit,
        };
        let period = match input.period.as_deref() {
            Some(raw) => raw.parse::<BudgetPeriod>()?,
            None => existing.period,
        };

        self.repository
            .update_budget(BudgetUpdate {
                id: existing.id,
                user_id: caller_id.to_string(),
                category_id,
                limit,
                period,
            })
            .await
    }

    async fn delete_budget(&self, caller_id: &str, budget_id: &str) -> Result<()> {
        let deleted = self
            .repository
            .delete_budget_for_user(caller_id, budget_id)
            .await?;
        if deleted == 0 {
            return Err(Error::NotFound("Budget".to_string()));
        }
        debug!("Deleted budget {} for user {}", budget_id, caller_id);
        Ok(())
    }
}
