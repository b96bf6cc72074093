//! Budgets module - domain models, services, and traits.

mod budgets_model;
mod budgets_service;
mod budgets_traits;

pub use budgets_model::{
    parse_category_ref, parse_limit, parse_period, Budget, BudgetInput, BudgetPeriod,
    BudgetUpdate, NewBudget, UpdateMode, LIMIT_DECIMAL_PLACES, LIMIT_MAX_DIGITS,
};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
