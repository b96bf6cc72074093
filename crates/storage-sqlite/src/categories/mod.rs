//! SQLite storage implementation for expense categories.

mod model;
mod repository;

pub use model::CategoryDB;
pub use repository::CategoryRepository;
