// handlers/public/auth/login.rs - POST /login handler

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::api::{FieldCheck, JsonBody};
use crate::auth::AuthError;
use crate::database::models::UserInfo;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub senha: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user_info: UserInfo,
}

/// POST /login - Authenticate and receive a bearer token
///
/// Expected Input:
/// ```json
/// { "email": "ana@x.com", "senha": "pw1" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiI...",
///   "expires_in": 86400,
///   "user_info": { "id": 1, "nome": "Ana", "email": "ana@x.com" }
/// }
/// ```
///
/// Unknown email and wrong secret produce the same 401 so callers cannot
/// probe which accounts exist.
pub async fn login_post(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let mut check = FieldCheck::new();
    let email = check.text("email", payload.email);
    let senha = check.secret("senha", payload.senha);
    check.finish()?;

    let user = state.users.find_by_email(&email).await?;
    let verified = state
        .passwords
        .verify_blocking(senha, user.as_ref().map(|u| u.senha.clone()))
        .await?;

    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::warn!("Failed login attempt");
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let issued = state.tokens.issue(user.id)?;
    tracing::info!(user_id = user.id, "Login succeeded");

    Ok(ApiResponse::success(LoginResponse {
        token: issued.token,
        expires_in: issued.expires_in,
        user_info: user.into(),
    }))
}
