use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};

use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{CategoryResponse, NewCategoryRequest},
};

#[utoipa::path(get, path = "/api/v1/categories", responses((status = 200, body = [CategoryResponse])))]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let categories = state.category_service.get_categories(&current.id)?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

#[utoipa::path(post, path = "/api/v1/categories", request_body = NewCategoryRequest, responses((status = 201, body = CategoryResponse), (status = 400)))]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    payload: Result<Json<NewCategoryRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    let Json(payload) = payload?;
    let category = state
        .category_service
        .create_category(&current.id, &payload.name)
        .await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// Deleting a category removes every budget that references it.
#[utoipa::path(delete, path = "/api/v1/categories/{id}", responses((status = 204), (status = 404)))]
pub async fn delete_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
) -> ApiResult<StatusCode> {
    state
        .category_service
        .delete_category(&current.id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/", get(list_categories).post(create_category))
        .route("/categories/{id}", delete(delete_category))
        .route("/categories/{id}/", delete(delete_category))
}
