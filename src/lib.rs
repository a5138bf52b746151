//! Lingo - a terminal reader for studying foreign-language texts
//!
//! Lingo opens a document in the language you are learning, lays its words
//! out page by page, and lets you rate how well you know each one. Ratings
//! are kept per language and can be exported as a word list. Translation,
//! pronunciation and stroke-order lookups are one key away.

pub mod app;
pub mod config;
pub mod export;
pub mod knowledge;
pub mod language;
pub mod library;
pub mod locale;
pub mod romanize;
pub mod services;
pub mod text;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
