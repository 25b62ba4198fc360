use async_trait::async_trait;
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::{
    Category, Ingredient, NewIngredient, NewRating, NewRecipe, NewStep, NewUser, Rating, Recipe, Step, User,
};
use super::store::{RecipeStore, UserStore};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    receitas: Vec<Recipe>,
    ingredientes: Vec<Ingredient>,
    etapas: Vec<Step>,
    avaliacoes: Vec<Rating>,
    categorias: Vec<Category>,
}

/// Process-local store with the same contract as [`super::PgStore`].
///
/// Ids are sequential per table starting at 1. All tables sit behind one lock
/// so every operation is atomic with respect to every other.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(len: usize) -> i64 {
    len as i64 + 1
}

impl Tables {
    fn require_recipe(&self, receita_id: i64) -> Result<(), DatabaseError> {
        if self.receitas.iter().any(|r| r.id == receita_id) {
            Ok(())
        } else {
            Err(DatabaseError::NotFound(format!("Recipe {} not found", receita_id)))
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_if_absent(&self, user: NewUser) -> Result<Option<User>, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }

        let row = User {
            id: next_id(tables.users.len()),
            nome: user.nome,
            email: user.email,
            senha: user.senha_hash,
        };
        tables.users.push(row.clone());
        Ok(Some(row))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn list_recipes(&self) -> Result<Vec<Recipe>, DatabaseError> {
        Ok(self.tables.read().await.receitas.clone())
    }

    async fn create_recipe(&self, recipe: NewRecipe) -> Result<Recipe, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.categorias.iter().any(|c| c.id == recipe.categoria_id) {
            return Err(DatabaseError::InvalidReference {
                field: "categoria_id",
                message: format!("Category {} does not exist", recipe.categoria_id),
            });
        }

        let row = Recipe {
            id: next_id(tables.receitas.len()),
            titulo: recipe.titulo,
            descricao: recipe.descricao,
            categoria_id: recipe.categoria_id,
            usuario_id: recipe.usuario_id,
        };
        tables.receitas.push(row.clone());
        Ok(row)
    }

    async fn add_ingredient(&self, ingredient: NewIngredient) -> Result<Ingredient, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.require_recipe(ingredient.receita_id)?;

        let row = Ingredient {
            id: next_id(tables.ingredientes.len()),
            receita_id: ingredient.receita_id,
            nome: ingredient.nome,
            quantidade: ingredient.quantidade,
        };
        tables.ingredientes.push(row.clone());
        Ok(row)
    }

    async fn add_step(&self, step: NewStep) -> Result<Step, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.require_recipe(step.receita_id)?;

        let row = Step {
            id: next_id(tables.etapas.len()),
            receita_id: step.receita_id,
            descricao: step.descricao,
            ordem: step.ordem,
        };
        tables.etapas.push(row.clone());
        Ok(row)
    }

    async fn add_rating(&self, rating: NewRating) -> Result<Rating, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.require_recipe(rating.receita_id)?;

        let row = Rating {
            id: next_id(tables.avaliacoes.len()),
            receita_id: rating.receita_id,
            usuario_id: rating.usuario_id,
            nota: rating.nota,
            comentario: rating.comentario,
        };
        tables.avaliacoes.push(row.clone());
        Ok(row)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DatabaseError> {
        Ok(self.tables.read().await.categorias.clone())
    }

    async fn create_category(&self, nome: String) -> Result<Category, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.categorias.iter().any(|c| c.nome == nome) {
            return Err(DatabaseError::Conflict(format!("Category '{}' already exists", nome)));
        }

        let row = Category {
            id: next_id(tables.categorias.len()),
            nome,
        };
        tables.categorias.push(row.clone());
        Ok(row)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
