//! SQLite storage implementation for users.

mod model;
mod repository;

pub use model::UserDB;
pub(crate) use repository::ensure_user_exists;
pub use repository::UserRepository;
