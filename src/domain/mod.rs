//! Domain models for Dojo CLI
//!
//! Contains the problem types and the language catalog without any I/O concerns.

mod language;
mod problem;
mod slug;

pub use language::{Language, LanguageError, LanguageKind};
pub use problem::{ProblemMeta, ProblemRecord};
pub use slug::{similarity, slugify};
