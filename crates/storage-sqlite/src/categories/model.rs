//! Database models for expense categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::users::UserDB;

/// Database model for categories
#[derive(
    Queryable, Identifiable, Insertable, Associations, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(belongs_to(UserDB, foreign_key = user_id))]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<CategoryDB> for spendcap_core::categories::Category {
    fn from(db: CategoryDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            created_at: db.created_at,
        }
    }
}
