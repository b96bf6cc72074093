use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use spendcap_core::categories::{Category, CategoryRepositoryTrait, NewCategory};
use spendcap_core::errors::Result;
use std::sync::Arc;
use uuid::Uuid;

use super::model::CategoryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::categories;
use crate::users::ensure_user_exists;

pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn get_category(&self, category_id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let category = categories::table
            .find(category_id)
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(category.map(Category::from))
    }

    fn list_categories_for_user(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .filter(categories::user_id.eq(user_id))
            .order((categories::created_at.asc(), categories::name.asc()))
            .select(CategoryDB::as_select())
            .load::<CategoryDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn insert_category(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                ensure_user_exists(conn, &new_category.user_id)?;
                let category_db = CategoryDB {
                    id: Uuid::new_v4().to_string(),
                    user_id: new_category.user_id,
                    name: new_category.name,
                    created_at: Utc::now().naive_utc(),
                };
                let inserted = diesel::insert_into(categories::table)
                    .values(&category_db)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Category::from(inserted))
            })
            .await
    }

    async fn delete_category_for_user(&self, user_id: &str, category_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    categories::table
                        .filter(categories::id.eq(category_id))
                        .filter(categories::user_id.eq(user_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
