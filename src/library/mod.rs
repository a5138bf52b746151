//! Available languages and documents

pub mod scanner;

pub use scanner::{Catalog, DocumentEntry, list_documents, list_languages};
