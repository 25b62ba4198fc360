use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{
    Category, Ingredient, NewIngredient, NewRating, NewRecipe, NewStep, NewUser, Rating, Recipe, Step, User,
};

/// Registered accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert `user` unless its email is already registered.
    ///
    /// Returns `None` when the email is taken. The check and the insert are a
    /// single atomic step, so two concurrent registrations of one email cannot
    /// both succeed.
    async fn insert_if_absent(&self, user: NewUser) -> Result<Option<User>, DatabaseError>;

    /// Exact, case-sensitive email lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError>;
}

/// Recipes and the rows hanging off them. Every call is one statement.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn list_recipes(&self) -> Result<Vec<Recipe>, DatabaseError>;

    /// Fails with `InvalidReference` on `categoria_id` if the category is missing.
    async fn create_recipe(&self, recipe: NewRecipe) -> Result<Recipe, DatabaseError>;

    /// Fails with `NotFound` if the recipe is missing.
    async fn add_ingredient(&self, ingredient: NewIngredient) -> Result<Ingredient, DatabaseError>;

    /// Fails with `NotFound` if the recipe is missing.
    async fn add_step(&self, step: NewStep) -> Result<Step, DatabaseError>;

    /// Fails with `NotFound` if the recipe is missing.
    async fn add_rating(&self, rating: NewRating) -> Result<Rating, DatabaseError>;

    async fn list_categories(&self) -> Result<Vec<Category>, DatabaseError>;

    async fn create_category(&self, nome: String) -> Result<Category, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
