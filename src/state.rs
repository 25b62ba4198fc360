use std::sync::Arc;

use crate::auth::{AuthError, PasswordHasher, TokenService};
use crate::config::SecurityConfig;
use crate::database::{RecipeStore, UserStore};

/// Shared, cheaply cloneable handles every handler receives
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub recipes: Arc<dyn RecipeStore>,
    pub tokens: Arc<TokenService>,
    pub passwords: Arc<PasswordHasher>,
}

impl AppState {
    /// Wire one backing store into both store roles.
    pub fn new<S>(store: Arc<S>, tokens: TokenService, passwords: PasswordHasher) -> Self
    where
        S: UserStore + RecipeStore + 'static,
    {
        Self {
            users: store.clone(),
            recipes: store,
            tokens: Arc::new(tokens),
            passwords: Arc::new(passwords),
        }
    }

    pub fn from_config<S>(store: Arc<S>, security: &SecurityConfig) -> Result<Self, AuthError>
    where
        S: UserStore + RecipeStore + 'static,
    {
        Ok(Self::new(
            store,
            TokenService::from_config(security),
            PasswordHasher::from_config(security)?,
        ))
    }
}
