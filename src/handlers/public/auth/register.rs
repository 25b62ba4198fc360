// handlers/public/auth/register.rs - POST /register handler

use axum::extract::State;
use serde::Deserialize;

use crate::api::{FieldCheck, JsonBody};
use crate::database::models::NewUser;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Created};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
}

/// POST /register - Create a new account
///
/// Expected Input:
/// ```json
/// { "nome": "Ana", "email": "ana@x.com", "senha": "pw1" }
/// ```
///
/// Responses: 201 `{"msg", "id"}`, 400 on missing fields, 409 when the email
/// is already registered.
pub async fn register_post(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> ApiResult<Created> {
    let mut check = FieldCheck::new();
    let nome = check.text("nome", payload.nome);
    let email = check.email("email", payload.email);
    let senha = check.secret("senha", payload.senha);
    check.finish()?;

    let senha_hash = state.passwords.hash_blocking(senha).await?;

    let user = state
        .users
        .insert_if_absent(NewUser {
            nome,
            email,
            senha_hash,
        })
        .await?
        .ok_or_else(|| {
            tracing::info!("Registration rejected, email already in use");
            ApiError::conflict("This email is already registered")
        })?;

    tracing::info!(user_id = user.id, "Registered user");
    Ok(ApiResponse::created_row("User registered successfully", user.id))
}
