// Child rows of a recipe: ingredients and preparation steps.
// A missing parent recipe is reported as 404 by the store.

use axum::extract::State;
use serde::Deserialize;

use crate::api::{FieldCheck, IdPath, JsonBody};
use crate::database::models::{NewIngredient, NewStep};
use crate::middleware::{ApiResponse, ApiResult, Created};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddIngredientRequest {
    pub nome: Option<String>,
    pub quantidade: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddStepRequest {
    pub descricao: Option<String>,
    pub ordem: Option<i64>,
}

/// POST /receitas/:id/ingredientes
pub async fn ingredients_post(
    State(state): State<AppState>,
    IdPath(receita_id): IdPath,
    JsonBody(payload): JsonBody<AddIngredientRequest>,
) -> ApiResult<Created> {
    let mut check = FieldCheck::new();
    let nome = check.text("nome", payload.nome);
    let quantidade = check.text("quantidade", payload.quantidade);
    check.finish()?;

    let ingredient = state
        .recipes
        .add_ingredient(NewIngredient {
            receita_id,
            nome,
            quantidade,
        })
        .await?;

    tracing::info!(recipe_id = receita_id, ingredient_id = ingredient.id, "Added ingredient");
    Ok(ApiResponse::created_row("Ingredient added", ingredient.id))
}

/// POST /receitas/:id/etapas
///
/// `ordem` is stored as given; it is neither renumbered nor checked for gaps
/// or duplicates.
pub async fn steps_post(
    State(state): State<AppState>,
    IdPath(receita_id): IdPath,
    JsonBody(payload): JsonBody<AddStepRequest>,
) -> ApiResult<Created> {
    let mut check = FieldCheck::new();
    let descricao = check.text("descricao", payload.descricao);
    let ordem = check.integer("ordem", payload.ordem, 1..=i32::MAX as i64);
    check.finish()?;

    let step = state
        .recipes
        .add_step(NewStep {
            receita_id,
            descricao,
            ordem: ordem as i32,
        })
        .await?;

    tracing::info!(recipe_id = receita_id, step_id = step.id, "Added step");
    Ok(ApiResponse::created_row("Step added", step.id))
}
