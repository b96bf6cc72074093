use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::categories_model::{validate_category_name, Category, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Error, Result};

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { repository }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn get_categories(&self, caller_id: &str) -> Result<Vec<Category>> {
        self.repository.list_categories_for_user(caller_id)
    }

    async fn create_category(&self, caller_id: &str, name: &str) -> Result<Category> {
        let name = validate_category_name(name)?;
        let category = self
            .repository
            .insert_category(NewCategory {
                user_id: caller_id.to_string(),
                name,
            })
            .await?;
        debug!("Created category {} for user {}", category.id, caller_id);
        Ok(category)
    }

    async fn delete_category(&self, caller_id: &str, category_id: &str) -> Result<()> {
        let deleted = self
            .repository
            .delete_category_for_user(caller_id, category_id)
            .await?;
        if deleted == 0 {
            return Err(Error::NotFound("Category".to_string()));
        }
        debug!("Deleted category {} for user {}", category_id, caller_id);
        Ok(())
    }
}
