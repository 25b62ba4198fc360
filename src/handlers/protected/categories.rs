use axum::extract::State;
use serde::Deserialize;

use crate::api::{FieldCheck, JsonBody};
use crate::middleware::{ApiResponse, ApiResult, Created};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub nome: Option<String>,
}

/// POST /categorias
pub async fn categories_post(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateCategoryRequest>,
) -> ApiResult<Created> {
    let mut check = FieldCheck::new();
    let nome = check.text("nome", payload.nome);
    check.finish()?;

    let category = state.recipes.create_category(nome).await?;

    tracing::info!(category_id = category.id, "Created category");
    Ok(ApiResponse::created_row("Category created", category.id))
}
