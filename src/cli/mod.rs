//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Config and catalog | `init`, `config`, `languages` |
//! | LeetCode | Saved problems | `leetcode show`, `leetcode find`, `leetcode clear` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! dojo --verbose leetcode list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod config_cmd;
mod problem_cmd;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
