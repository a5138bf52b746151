//! Study text loading, tokenization and pagination

pub mod model;
pub mod pagination;
pub mod tokenizer;

pub use model::Text;
pub use pagination::{Geometry, Pagination, paginate};
pub use tokenizer::tokenize;
