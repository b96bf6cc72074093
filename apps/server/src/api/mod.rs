use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    auth::{self, require_jwt, CredentialsRequest, LoginResponse, UserResponse},
    config::Config,
    main_lib::AppState,
    models::{BudgetRequest, BudgetResponse, CategoryResponse, NewCategoryRequest},
};

pub mod budgets;
pub mod categories;
pub mod health;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        health::readyz,
        auth::register,
        auth::login,
        auth::me,
        auth::delete_me,
        categories::list_categories,
        categories::create_category,
        categories::delete_category,
        budgets::list_budgets,
        budgets::get_budget,
        budgets::create_budget,
        budgets::replace_budget,
        budgets::patch_budget,
        budgets::delete_budget,
    ),
    components(schemas(
        BudgetRequest,
        BudgetResponse,
        CategoryResponse,
        NewCategoryRequest,
        CredentialsRequest,
        LoginResponse,
        UserResponse,
    )),
    tags((name = "spendcap"))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    let protected = Router::new()
        .merge(budgets::router())
        .merge(categories::router())
        .route("/auth/me", get(auth::me).delete(auth::delete_me))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_jwt));

    let api = Router::new()
        .merge(health::router())
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .merge(protected);

    Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
