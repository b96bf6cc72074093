use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use spendcap_core::budgets::{Budget, BudgetRepositoryTrait, BudgetUpdate, NewBudget};
use spendcap_core::errors::{Error, Result, ValidationError};
use std::sync::Arc;
use uuid::Uuid;

use super::model::BudgetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{budgets, categories};
use crate::users::ensure_user_exists;

const DUPLICATE_BUDGET: &str = "The fields user, category, period must make a unique set.";

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

fn find_owned(conn: &mut SqliteConnection, user_id: &str, budget_id: &str) -> Result<Option<Budget>> {
    let row = budgets::table
        .inner_join(categories::table)
        .filter(budgets::id.eq(budget_id))
        .filter(budgets::user_id.eq(user_id))
        .select((BudgetDB::as_select(), categories::name))
        .first::<(BudgetDB, String)>(conn)
        .optional()
        .into_core()?;
    row.map(|(budget, category_name)| budget.into_budget(category_name))
        .transpose()
}

fn ensure_category(conn: &mut SqliteConnection, category_id: &str) -> Result<()> {
    let found = categories::table
        .find(category_id)
        .count()
        .get_result::<i64>(conn)
        .into_core()?;
    if found == 0 {
        return Err(ValidationError::invalid_field(
            "category",
            format!("Invalid pk \"{category_id}\" - object does not exist."),
        )
        .into());
    }
    Ok(())
}

/// Fails if another budget of `user_id` already holds the category/period
/// pair. `exclude_id` is the budget being updated, if any.
fn ensure_unique(
    conn: &mut SqliteConnection,
    user_id: &str,
    category_id: &str,
    period: &str,
    exclude_id: Option<&str>,
) -> Result<()> {
    let mut query = budgets::table
        .filter(budgets::user_id.eq(user_id))
        .filter(budgets::category_id.eq(category_id))
        .filter(budgets::period.eq(period))
        .into_boxed::<diesel::sqlite::Sqlite>();
    if let Some(id) = exclude_id {
        query = query.filter(budgets::id.ne(id));
    }
    let clashes = query.count().get_result::<i64>(conn).into_core()?;
    if clashes > 0 {
        return Err(Error::ConstraintViolation(DUPLICATE_BUDGET.to_string()));
    }
    Ok(())
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn list_budgets_for_user(&self, user_id: &str) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = budgets::table
            .inner_join(categories::table)
            .filter(budgets::user_id.eq(user_id))
            .order((budgets::created_at.asc(), budgets::id.asc()))
            .select((BudgetDB::as_select(), categories::name))
            .load::<(BudgetDB, String)>(&mut conn)
            .into_core()?;
        rows.into_iter()
            .map(|(budget, category_name)| budget.into_budget(category_name))
            .collect()
    }

    fn get_budget_for_user(&self, user_id: &str, budget_id: &str) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        find_owned(&mut conn, user_id, budget_id)
    }

    async fn insert_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let period = new_budget.period.as_str();
                ensure_user_exists(conn, &new_budget.user_id)?;
                ensure_category(conn, &new_budget.category_id)?;
                ensure_unique(
                    conn,
                    &new_budget.user_id,
                    &new_budget.category_id,
                    period,
                    None,
                )?;

                let now = Utc::now().naive_utc();
                let budget_db = BudgetDB {
                    id: Uuid::new_v4().to_string(),
                    user_id: new_budget.user_id,
                    category_id: new_budget.category_id,
                    limit_amount: new_budget.limit.to_string(),
                    period: period.to_string(),
                    created_at: now,
                    updated_at: now,
                };
                diesel::insert_into(budgets::table)
                    .values(&budget_db)
                    .execute(conn)
                    .into_core()?;

                find_owned(conn, &budget_db.user_id, &budget_db.id)?
                    .ok_or_else(|| Error::NotFound("Budget".to_string()))
            })
            .await
    }

    async fn update_budget(&self, update: BudgetUpdate) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let period = update.period.as_str();
                if find_owned(conn, &update.user_id, &update.id)?.is_none() {
                    return Err(Error::NotFound("Budget".to_string()));
                }
                ensure_category(conn, &update.category_id)?;
                ensure_unique(
                    conn,
                    &update.user_id,
                    &update.category_id,
                    period,
                    Some(&update.id),
                )?;

                diesel::update(
                    budgets::table
                        .filter(budgets::id.eq(&update.id))
                        .filter(budgets::user_id.eq(&update.user_id)),
                )
                .set((
                    budgets::category_id.eq(&update.category_id),
                    budgets::limit_amount.eq(update.limit.to_string()),
                    budgets::period.eq(period),
                    budgets::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)
                .into_core()?;

                find_owned(conn, &update.user_id, &update.id)?
                    .ok_or_else(|| Error::NotFound("Budget".to_string()))
            })
            .await
    }

    async fn delete_budget_for_user(&self, user_id: &str, budget_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    budgets::table
                        .filter(budgets::id.eq(budget_id))
                        .filter(budgets::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
