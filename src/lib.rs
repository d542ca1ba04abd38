//! Dojo CLI - Coding-challenge problems as local source files
//!
//! Dojo keeps each problem as a single source file: a comment header with
//! the title, difficulty, tags, judge metadata and description, followed
//! by the solution being worked on. The file can be edited freely below the
//! header and is parsed back into a structured record when needed.

pub mod domain;
pub mod storage;
pub mod provider;
pub mod cli;

pub use domain::{Language, ProblemMeta, ProblemRecord};
pub use storage::{ProblemFormat, ProblemStore};
