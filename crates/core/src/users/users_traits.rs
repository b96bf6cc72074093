use crate::errors::Result;
use crate::users::users_model::{NewUser, User};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<Option<User>>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    /// Fails with a constraint violation if the username is taken.
    async fn insert_user(&self, new_user: NewUser) -> Result<User>;
    /// Deletes the user together with their categories and budgets.
    async fn delete_user(&self, user_id: &str) -> Result<usize>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn register_user(&self, username: &str, password_hash: String) -> Result<User>;
    async fn delete_user(&self, user_id: &str) -> Result<()>;
}
