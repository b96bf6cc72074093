use std::sync::Arc;

use crate::{
    auth::AuthManager,
    config::{random_secret_key, Config, LogFormat},
};
use spendcap_core::{
    budgets::{BudgetService, BudgetServiceTrait},
    categories::{CategoryService, CategoryServiceTrait},
    users::{UserService, UserServiceTrait},
};
use spendcap_storage_sqlite::{
    budgets::BudgetRepository, categories::CategoryRepository, db, users::UserRepository, DbPool,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub auth: Arc<AuthManager>,
    pub pool: Arc<DbPool>,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let category_repository = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let budget_repository = Arc::new(BudgetRepository::new(pool.clone(), writer));

    let user_service: Arc<dyn UserServiceTrait> = Arc::new(UserService::new(user_repository));
    let category_service: Arc<dyn CategoryServiceTrait> =
        Arc::new(CategoryService::new(category_repository.clone()));
    let budget_service: Arc<dyn BudgetServiceTrait> = Arc::new(BudgetService::new(
        budget_repository,
        category_repository,
    ));

    let secret_key = match &config.secret_key {
        Some(key) => key.clone(),
        None => {
            tracing::warn!(
                "SC_SECRET_KEY is not set; using a random key. Issued tokens will not survive a restart."
            );
            random_secret_key()
        }
    };
    let auth = Arc::new(AuthManager::new(&secret_key, config.token_ttl)?);

    Ok(Arc::new(AppState {
        budget_service,
        category_service,
        user_service,
        auth,
        pool,
    }))
}
