use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use spendcap_core::budgets::UpdateMode;

use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{budget_input_from_json, BudgetRequest, BudgetResponse},
};

#[utoipa::path(get, path = "/api/v1/budgets", responses((status = 200, body = [BudgetResponse])))]
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<BudgetResponse>>> {
    let budgets = state.budget_service.list_budgets(&current.id)?;
    Ok(Json(budgets.into_iter().map(BudgetResponse::from).collect()))
}

#[utoipa::path(get, path = "/api/v1/budgets/{id}", responses((status = 200, body = BudgetResponse), (status = 404)))]
pub async fn get_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
) -> ApiResult<Json<BudgetResponse>> {
    let budget = state.budget_service.get_budget(&current.id, &id)?;
    Ok(Json(BudgetResponse::from(budget)))
}

#[utoipa::path(post, path = "/api/v1/budgets", request_body = BudgetRequest, responses((status = 201, body = BudgetResponse), (status = 400), (status = 409)))]
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BudgetResponse>)> {
    let Json(body) = payload?;
    let input = budget_input_from_json(body).map_err(spendcap_core::Error::from)?;
    let budget = state.budget_service.create_budget(&current.id, input).await?;
    Ok((StatusCode::CREATED, Json(BudgetResponse::from(budget))))
}

async fn update_with_mode(
    state: &AppState,
    current: &CurrentUser,
    id: &str,
    payload: Result<Json<Value>, JsonRejection>,
    mode: UpdateMode,
) -> ApiResult<Json<BudgetResponse>> {
    let Json(body) = payload?;
    let input = budget_input_from_json(body).map_err(spendcap_core::Error::from)?;
    let budget = state
        .budget_service
        .update_budget(&current.id, id, input, mode)
        .await?;
    Ok(Json(BudgetResponse::from(budget)))
}

#[utoipa::path(put, path = "/api/v1/budgets/{id}", request_body = BudgetRequest, responses((status = 200, body = BudgetResponse), (status = 400), (status = 404), (status = 409)))]
pub async fn replace_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<BudgetResponse>> {
    update_with_mode(&state, &current, &id, payload, UpdateMode::Replace).await
}

#[utoipa::path(patch, path = "/api/v1/budgets/{id}", request_body = BudgetRequest, responses((status = 200, body = BudgetResponse), (status = 400), (status = 404), (status = 409)))]
pub async fn patch_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<BudgetResponse>> {
    update_with_mode(&state, &current, &id, payload, UpdateMode::Patch).await
}

#[utoipa::path(delete, path = "/api/v1/budgets/{id}", responses((status = 204), (status = 404)))]
pub async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
) -> ApiResult<StatusCode> {
    state.budget_service.delete_budget(&current.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/", get(list_budgets).post(create_budget))
        .route(
            "/budgets/{id}",
            get(get_budget)
                .put(replace_budget)
                .patch(patch_budget)
                .delete(delete_budget),
        )
        .route(
            "/budgets/{id}/",
            get(get_budget)
                .put(replace_budget)
                .patch(patch_budget)
                .delete(delete_budget),
        )
}
