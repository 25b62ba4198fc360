use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row in `users`. `senha` holds an Argon2 PHC string, never plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub nome: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub senha: String,
}

/// Public view of a user returned by login and `/me`.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub nome: String,
    pub email: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nome: user.nome,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Recipe {
    pub id: i64,
    pub titulo: String,
    pub descricao: String,
    pub categoria_id: i64,
    pub usuario_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub titulo: String,
    pub descricao: String,
    pub categoria_id: i64,
    pub usuario_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Ingredient {
    pub id: i64,
    pub receita_id: i64,
    pub nome: String,
    pub quantidade: String,
}

#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub receita_id: i64,
    pub nome: String,
    pub quantidade: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Step {
    pub id: i64,
    pub receita_id: i64,
    pub descricao: String,
    pub ordem: i32,
}

#[derive(Debug, Clone)]
pub struct NewStep {
    pub receita_id: i64,
    pub descricao: String,
    pub ordem: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Rating {
    pub id: i64,
    pub receita_id: i64,
    pub usuario_id: i64,
    pub nota: i16,
    pub comentario: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewRating {
    pub receita_id: i64,
    pub usuario_id: i64,
    pub nota: i16,
    pub comentario: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Category {
    pub id: i64,
    pub nome: String,
}
