use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use spendcap_storage_sqlite::get_connection;

use crate::{error::ApiResult, main_lib::AppState};

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

/// Ready once a pooled database connection can be checked out.
#[utoipa::path(get, path = "/api/v1/readyz", responses((status = 200, description = "Ready"), (status = 500)))]
pub async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    get_connection(&state.pool)?;
    Ok("ok")
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
