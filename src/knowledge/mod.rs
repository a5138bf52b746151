//! Learner knowledge tracking
//!
//! Levels are stored per study language and flushed to disk on every change.

pub mod level;
pub mod store;

pub use level::{KnowledgeLevel, LevelError};
pub use store::{KnowledgeStore, LevelMap};
