use crate::budgets::budgets_model::{Budget, BudgetInput, BudgetUpdate, NewBudget, UpdateMode};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for budget repository operations.
///
/// Every lookup is scoped by owner; a budget owned by someone else is
/// indistinguishable from a missing one.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn list_budgets_for_user(&self, user_id: &str) -> Result<Vec<Budget>>;
    fn get_budget_for_user(&self, user_id: &str, budget_id: &str) -> Result<Option<Budget>>;
    /// Inserts the budget, failing with a constraint violation if the
    /// (user, category, period) triple is taken.
    async fn insert_budget(&self, new_budget: NewBudget) -> Result<Budget>;
    /// Replaces category, limit and period of an owned budget under the same
    /// uniqueness rule as `insert_budget`.
    async fn update_budget(&self, update: BudgetUpdate) -> Result<Budget>;
    async fn delete_budget_for_user(&self, user_id: &str, budget_id: &str) -> Result<usize>;
}

/// Trait for budget service operations. `caller_id` is the authenticated user.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn list_budgets(&self, caller_id: &str) -> Result<Vec<Budget>>;
    fn get_budget(&self, caller_id: &str, budget_id: &str) -> Result<Budget>;
    async fn create_budget(&self, caller_id: &str, input: BudgetInput) -> Result<Budget>;
    async fn update_budget(
        &self,
        caller_id: &str,
        budget_id: &str,
        input: BudgetInput,
        mode: UpdateMode,
    ) -> Result<Budget>;
    async fn delete_budget(&self, caller_id: &str, budget_id: &str) -> Result<()>;
}
