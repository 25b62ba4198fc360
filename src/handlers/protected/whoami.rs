use axum::extract::{Extension, State};

use crate::database::models::UserInfo;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /me - Profile of the user the token was issued to
///
/// A valid token for an account that no longer exists is treated as
/// unauthenticated.
pub async fn whoami(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<UserInfo> {
    let user = state
        .users
        .find_by_id(auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unknown user"))?;

    Ok(ApiResponse::success(user.into()))
}
