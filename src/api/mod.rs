pub mod payload;

pub use payload::{FieldCheck, IdPath, JsonBody};
