pub mod auth;
pub mod categories;

pub use categories::categories_get;
