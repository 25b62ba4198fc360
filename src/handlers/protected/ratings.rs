use axum::extract::{Extension, State};
use serde::Deserialize;

use crate::api::{FieldCheck, IdPath, JsonBody};
use crate::database::models::NewRating;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, Created};
use crate::state::AppState;

/// Star scale accepted for `nota`
const MIN_SCORE: i64 = 1;
const MAX_SCORE: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct RateRecipeRequest {
    pub nota: Option<i64>,
    pub comentario: Option<String>,
}

/// POST /receitas/:id/avaliacoes - Rate a recipe as the caller
pub async fn ratings_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    IdPath(receita_id): IdPath,
    JsonBody(payload): JsonBody<RateRecipeRequest>,
) -> ApiResult<Created> {
    let mut check = FieldCheck::new();
    let nota = check.integer("nota", payload.nota, MIN_SCORE..=MAX_SCORE);
    let comentario = check.optional_text(payload.comentario);
    check.finish()?;

    let rating = state
        .recipes
        .add_rating(NewRating {
            receita_id,
            usuario_id: auth_user.user_id,
            nota: nota as i16,
            comentario,
        })
        .await?;

    tracing::info!(recipe_id = receita_id, rating_id = rating.id, "Recorded rating");
    Ok(ApiResponse::created_row("Rating recorded", rating.id))
}
