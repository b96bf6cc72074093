use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher,
        PasswordVerifier, SaltString,
    },
    Argon2,
};
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDateTime;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use spendcap_core::users::{validate_password, validate_username, User};
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
    // Checked against when the username is unknown so both login paths do the same work.
    dummy_hash: String,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    InvalidCredentials,
    Internal(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

#[derive(Deserialize, ToSchema)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

fn hash_with_random_salt(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// The authenticated caller, placed in request extensions by [`require_jwt`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
}

impl AuthManager {
    pub fn new(secret: &[u8], token_ttl: Duration) -> anyhow::Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let dummy_hash = hash_with_random_salt("spendcap-unknown-user")
            .map_err(|e| anyhow::anyhow!("Failed to prepare login hash: {e}"))?;
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            token_ttl,
            dummy_hash,
        })
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        hash_with_random_salt(password)
            .map_err(|e| AuthError::Internal(format!("Failed to hash password: {e}")))
    }

    /// Checks a login attempt. `None` means no such user; the candidate is
    /// still verified against a throwaway hash before the attempt is refused.
    pub fn verify_login(
        &self,
        password_hash: Option<&str>,
        candidate: &str,
    ) -> Result<(), AuthError> {
        match password_hash {
            Some(hash) => self.verify_password(hash, candidate),
            None => {
                let _ = self.verify_password(&self.dummy_hash, candidate);
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    pub fn verify_password(&self, password_hash: &str, candidate: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::Internal(format!("Stored password hash is invalid: {e}")))?;
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|err| match err {
                PasswordHashError::Password => AuthError::InvalidCredentials,
                other => AuthError::Internal(format!("Password verification failed: {other}")),
            })
    }

    pub fn issue_token(&self, user_id: &str) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Returns the user id the token was issued for.
    pub fn validate_token(&self, token: &str) -> Result<String, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
                | jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_)
                | jsonwebtoken::errors::ErrorKind::Base64(_)
                | jsonwebtoken::errors::ErrorKind::Json(_)
                | jsonwebtoken::errors::ErrorKind::Utf8(_) => AuthError::Unauthorized,
                other => AuthError::Internal(format!("Failed to validate token: {other:?}")),
            })
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::Unauthorized)
    }
}

fn bearer_token(request: &Request<Body>) -> Result<&str, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::Unauthorized)?;

    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return Err(AuthError::Unauthorized);
    };

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::Unauthorized);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Unauthorized);
    }
    Ok(token)
}

/// Rejects the request unless it carries a valid token for an existing user.
pub async fn require_jwt(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = state.auth.validate_token(bearer_token(&request)?)?;

    let user = match state.user_service.get_user(&user_id) {
        Ok(user) => user,
        Err(e) if e.is_not_found() => return Err(AuthError::Unauthorized.into()),
        Err(e) => return Err(e.into()),
    };

    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        username: user.username,
    });
    Ok(next.run(request).await)
}

#[utoipa::path(post, path = "/api/v1/auth/register", request_body = CredentialsRequest, responses((status = 201, body = UserResponse)))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let Json(payload) = payload?;
    validate_username(&payload.username).map_err(spendcap_core::Error::from)?;
    validate_password(&payload.password).map_err(spendcap_core::Error::from)?;
    let password_hash = state.auth.hash_password(&payload.password)?;
    let user = state
        .user_service
        .register_user(&payload.username, password_hash)
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(post, path = "/api/v1/auth/login", request_body = CredentialsRequest, responses((status = 200, body = LoginResponse)))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(payload) = payload?;
    let user = state.user_service.find_by_username(&payload.username)?;
    state.auth.verify_login(
        user.as_ref().map(|u| u.password_hash.as_str()),
        &payload.password,
    )?;
    let user = user.ok_or(AuthError::InvalidCredentials)?;
    let token = state.auth.issue_token(&user.id)?;
    tracing::debug!("Issued access token for user {}", user.id);
    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth.expires_in().as_secs(),
    }))
}

#[utoipa::path(get, path = "/api/v1/auth/me", responses((status = 200, body = UserResponse)))]
pub async fn me(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.get_user(&current.id)?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(delete, path = "/api/v1/auth/me", responses((status = 204)))]
pub async fn delete_me(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
) -> ApiResult<StatusCode> {
    state.user_service.delete_user(&current.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
