use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::users_model::{validate_username, NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository
            .get_user(user_id)?
            .ok_or_else(|| Error::NotFound("User".to_string()))
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.repository.find_by_username(username.trim())
    }

    async fn register_user(&self, username: &str, password_hash: String) -> Result<User> {
        let username = validate_username(username)?;
        let user = self
            .repository
            .insert_user(NewUser {
                username,
                password_hash,
            })
            .await?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        if self.repository.delete_user(user_id).await? == 0 {
            return Err(Error::NotFound("User".to_string()));
        }
        info!("Deleted user {}", user_id);
        Ok(())
    }
}
