use crate::categories::categories_model::{Category, NewCategory};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for category repository operations
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Looks a category up by id regardless of owner.
    fn get_category(&self, category_id: &str) -> Result<Option<Category>>;
    fn list_categories_for_user(&self, user_id: &str) -> Result<Vec<Category>>;
    async fn insert_category(&self, new_category: NewCategory) -> Result<Category>;
    /// Deletes an owned category together with every budget referencing it.
    async fn delete_category_for_user(&self, user_id: &str, category_id: &str) -> Result<usize>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn get_categories(&self, caller_id: &str) -> Result<Vec<Category>>;
    async fn create_category(&self, caller_id: &str, name: &str) -> Result<Category>;
    async fn delete_category(&self, caller_id: &str, category_id: &str) -> Result<()>;
}
