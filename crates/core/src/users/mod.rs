//! Users module - identity records backing authentication.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{
    validate_password, validate_username, NewUser, User, PASSWORD_MIN_LEN, USERNAME_MAX_LEN,
    USERNAME_MIN_LEN,
};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
