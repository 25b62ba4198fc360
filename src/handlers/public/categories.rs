use axum::extract::State;

use crate::database::models::Category;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /categorias - List every category, oldest first. No token required.
pub async fn categories_get(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let categories = state.recipes.list_categories().await?;
    Ok(ApiResponse::success(categories))
}
