//! Expense categories module - domain models, services, and traits.

mod categories_model;
mod categories_service;
mod categories_traits;

pub use categories_model::{validate_category_name, Category, NewCategory, CATEGORY_NAME_MAX_LEN};
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
