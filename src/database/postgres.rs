use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{
    Category, Ingredient, NewIngredient, NewRating, NewRecipe, NewStep, NewUser, Rating, Recipe, Step, User,
};
use super::store::{RecipeStore, UserStore};

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed store over the `users`, `receitas`, `ingredientes`,
/// `etapas`, `avaliacoes` and `categorias` tables.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
        _ => None,
    }
}

/// Constraint name of a foreign-key violation, `""` if the driver omits it.
fn violated_foreign_key(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
            Some(db.constraint().unwrap_or(""))
        }
        _ => None,
    }
}

/// Foreign-key violations on child rows mean the parent recipe is gone.
fn missing_recipe(receita_id: i64) -> impl FnOnce(sqlx::Error) -> DatabaseError {
    move |err| match sqlstate(&err).as_deref() {
        Some(FOREIGN_KEY_VIOLATION) => DatabaseError::NotFound(format!("Recipe {} not found", receita_id)),
        _ => DatabaseError::Sqlx(err),
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_if_absent(&self, user: NewUser) -> Result<Option<User>, DatabaseError> {
        // The UNIQUE(email) constraint makes this atomic; a conflicting row
        // yields no RETURNING row instead of an error.
        let query = r#"
            INSERT INTO users (nome, email, senha)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, nome, email, senha
        "#;

        let row = sqlx::query_as::<_, User>(query)
            .bind(&user.nome)
            .bind(&user.email)
            .bind(&user.senha_hash)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, nome, email, senha FROM users WHERE email = $1 ORDER BY id LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, User>("SELECT id, nome, email, senha FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl RecipeStore for PgStore {
    async fn list_recipes(&self) -> Result<Vec<Recipe>, DatabaseError> {
        let rows = sqlx::query_as::<_, Recipe>(
            "SELECT id, titulo, descricao, categoria_id, usuario_id FROM receitas ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_recipe(&self, recipe: NewRecipe) -> Result<Recipe, DatabaseError> {
        let query = r#"
            INSERT INTO receitas (titulo, descricao, categoria_id, usuario_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, titulo, descricao, categoria_id, usuario_id
        "#;

        let categoria_id = recipe.categoria_id;
        sqlx::query_as::<_, Recipe>(query)
            .bind(recipe.titulo)
            .bind(recipe.descricao)
            .bind(recipe.categoria_id)
            .bind(recipe.usuario_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                let missing_category =
                    matches!(violated_foreign_key(&err), Some(constraint) if !constraint.contains("usuario"));
                if missing_category {
                    DatabaseError::InvalidReference {
                        field: "categoria_id",
                        message: format!("Category {} does not exist", categoria_id),
                    }
                } else {
                    DatabaseError::Sqlx(err)
                }
            })
    }

    async fn add_ingredient(&self, ingredient: NewIngredient) -> Result<Ingredient, DatabaseError> {
        let query = r#"
            INSERT INTO ingredientes (receita_id, nome, quantidade)
            VALUES ($1, $2, $3)
            RETURNING id, receita_id, nome, quantidade
        "#;

        sqlx::query_as::<_, Ingredient>(query)
            .bind(ingredient.receita_id)
            .bind(ingredient.nome)
            .bind(ingredient.quantidade)
            .fetch_one(&self.pool)
            .await
            .map_err(missing_recipe(ingredient.receita_id))
    }

    async fn add_step(&self, step: NewStep) -> Result<Step, DatabaseError> {
        let query = r#"
            INSERT INTO etapas (receita_id, descricao, ordem)
            VALUES ($1, $2, $3)
            RETURNING id, receita_id, descricao, ordem
        "#;

        sqlx::query_as::<_, Step>(query)
            .bind(step.receita_id)
            .bind(step.descricao)
            .bind(step.ordem)
            .fetch_one(&self.pool)
            .await
            .map_err(missing_recipe(step.receita_id))
    }

    async fn add_rating(&self, rating: NewRating) -> Result<Rating, DatabaseError> {
        let query = r#"
            INSERT INTO avaliacoes (receita_id, usuario_id, nota, comentario)
            VALUES ($1, $2, $3, $4)
            RETURNING id, receita_id, usuario_id, nota, comentario
        "#;

        sqlx::query_as::<_, Rating>(query)
            .bind(rating.receita_id)
            .bind(rating.usuario_id)
            .bind(rating.nota)
            .bind(rating.comentario)
            .fetch_one(&self.pool)
            .await
            .map_err(missing_recipe(rating.receita_id))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DatabaseError> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, nome FROM categorias ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_category(&self, nome: String) -> Result<Category, DatabaseError> {
        sqlx::query_as::<_, Category>("INSERT INTO categorias (nome) VALUES ($1) RETURNING id, nome")
            .bind(&nome)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match sqlstate(&err).as_deref() {
                Some(UNIQUE_VIOLATION) => DatabaseError::Conflict(format!("Category '{}' already exists", nome)),
                _ => DatabaseError::Sqlx(err),
            })
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
