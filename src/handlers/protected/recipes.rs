use axum::extract::{Extension, State};
use serde::Deserialize;

use crate::api::{FieldCheck, JsonBody};
use crate::database::models::{NewRecipe, Recipe};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, Created};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub titulo: Option<String>,
    pub descricao: Option<String>,
    pub categoria_id: Option<i64>,
}

/// GET /receitas - List every recipe, oldest first
pub async fn recipes_get(State(state): State<AppState>) -> ApiResult<Vec<Recipe>> {
    let recipes = state.recipes.list_recipes().await?;
    Ok(ApiResponse::success(recipes))
}

/// POST /receitas - Create a recipe authored by the caller
pub async fn recipes_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    JsonBody(payload): JsonBody<CreateRecipeRequest>,
) -> ApiResult<Created> {
    let mut check = FieldCheck::new();
    let titulo = check.text("titulo", payload.titulo);
    let descricao = check.text("descricao", payload.descricao);
    let categoria_id = check.id("categoria_id", payload.categoria_id);
    check.finish()?;

    let recipe = state
        .recipes
        .create_recipe(NewRecipe {
            titulo,
            descricao,
            categoria_id,
            usuario_id: auth_user.user_id,
        })
        .await?;

    tracing::info!(recipe_id = recipe.id, user_id = auth_user.user_id, "Created recipe");
    Ok(ApiResponse::created_row("Recipe created successfully", recipe.id))
}
