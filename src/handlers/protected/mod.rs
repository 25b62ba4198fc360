// Handlers behind jwt_auth_middleware; each may rely on an AuthUser extension.

pub mod categories;
pub mod ingredients;
pub mod ratings;
pub mod recipes;
pub mod whoami;

pub use categories::categories_post;
pub use ingredients::{ingredients_post, steps_post};
pub use ratings::ratings_post;
pub use recipes::{recipes_get, recipes_post};
pub use whoami::whoami;
