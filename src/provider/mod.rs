//! # Providers
//!
//! A provider is a remote judge platform. Problems from one provider are
//! kept under their own directory and carry provider-specific metadata in
//! the problem file.
//!
//! ## Metadata Schemas
//!
//! The problem file format stores metadata as free key/value pairs and
//! does not know which keys a provider needs. Each provider checks its own
//! schema when turning a decoded [`ProblemRecord`] into its typed problem.
//!
//! | Provider | Directory | Required keys |
//! |----------|-----------|---------------|
//! | LeetCode | `leetcode` | `problem_id`, `test_input`, `judge_type` |
//!
//! ## Key Types
//!
//! - [`ProviderProblem`] - Conversion between records and typed problems
//! - [`LeetCodeProblem`] - LeetCode problem with its judge metadata

mod leetcode;

pub use leetcode::{Difficulty, LeetCodeProblem};

use thiserror::Error;

use crate::domain::ProblemRecord;

#[derive(Debug, Error, PartialEq)]
pub enum ProviderError {
    #[error("Problem \"{slug}\" is missing metadata: {key}")]
    MissingMetadata { slug: String, key: String },

    #[error("Invalid difficulty: {0}")]
    InvalidDifficulty(String),
}

/// A provider's typed view of a problem record
pub trait ProviderProblem: Sized {
    /// Directory name used for this provider's problems
    const PROVIDER: &'static str;

    /// Metadata keys every saved problem must carry
    const METADATA_KEYS: &'static [&'static str];

    /// Validates the metadata schema and builds the typed problem
    fn from_record(record: ProblemRecord) -> Result<Self, ProviderError>;

    /// Builds the record to save, optionally dropping tags
    fn to_record(&self, include_tags: bool) -> ProblemRecord;
}

/// Returns the value of a required metadata key
pub(crate) fn required(record: &ProblemRecord, key: &str) -> Result<String, ProviderError> {
    record
        .metadata
        .get(key)
        .map(str::to_string)
        .ok_or_else(|| ProviderError::MissingMetadata {
            slug: record.title_slug.clone(),
            key: key.to_string(),
        })
}
