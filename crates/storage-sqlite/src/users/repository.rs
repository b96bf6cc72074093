use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use spendcap_core::errors::{Error, Result};
use spendcap_core::users::{NewUser, User, UserRepositoryTrait};
use std::sync::Arc;
use uuid::Uuid;

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

/// Fails with `NotFound` unless `user_id` exists. Write jobs call this so an
/// owner deleted after authentication is reported as missing rather than as a
/// foreign key failure.
pub(crate) fn ensure_user_exists(conn: &mut SqliteConnection, user_id: &str) -> Result<()> {
    let found = users::table
        .find(user_id)
        .count()
        .get_result::<i64>(conn)
        .into_core()?;
    if found == 0 {
        return Err(Error::NotFound("User".to_string()));
    }
    Ok(())
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(user.map(User::from))
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .filter(users::username.eq(username))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(user.map(User::from))
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let taken = users::table
                    .filter(users::username.eq(&new_user.username))
                    .count()
                    .get_result::<i64>(conn)
                    .into_core()?;
                if taken > 0 {
                    return Err(Error::ConstraintViolation(
                        "A user with that username already exists.".to_string(),
                    ));
                }

                let user_db = UserDB {
                    id: Uuid::new_v4().to_string(),
                    username: new_user.username,
                    password_hash: new_user.password_hash,
                    created_at: Utc::now().naive_utc(),
                };
                let inserted = diesel::insert_into(users::table)
                    .values(&user_db)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(User::from(inserted))
            })
            .await
    }

    async fn delete_user(&self, user_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(users::table.find(user_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
