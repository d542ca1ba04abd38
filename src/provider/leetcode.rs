//! LeetCode problems

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::{required, ProviderError, ProviderProblem};
use crate::domain::ProblemRecord;

/// Problem difficulty as reported by LeetCode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ProviderError::InvalidDifficulty(s.to_string())),
        }
    }
}

/// A LeetCode problem with the metadata the judge needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeetCodeProblem {
    /// The record as read from disk, metadata included
    pub record: ProblemRecord,

    /// Numeric question id used by the judge endpoints
    pub problem_id: String,

    /// Sample input used when testing without explicit input
    pub test_input: String,

    /// Judge mode, e.g. `large`
    pub judge_type: String,
}

impl LeetCodeProblem {
    /// Parses the difficulty, if it is one LeetCode uses
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.record.difficulty.parse().ok()
    }
}

impl ProviderProblem for LeetCodeProblem {
    const PROVIDER: &'static str = "leetcode";

    const METADATA_KEYS: &'static [&'static str] = &["problem_id", "test_input", "judge_type"];

    fn from_record(record: ProblemRecord) -> Result<Self, ProviderError> {
        Ok(Self {
            problem_id: required(&record, "problem_id")?,
            test_input: required(&record, "test_input")?,
            judge_type: required(&record, "judge_type")?,
            record,
        })
    }

    fn to_record(&self, include_tags: bool) -> ProblemRecord {
        let mut record = self.record.clone();
        record.metadata.set("problem_id", &self.problem_id);
        record.metadata.set("test_input", &self.test_input);
        record.metadata.set("judge_type", &self.judge_type);
        if !include_tags {
            record.tags.clear();
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Language;

    fn record() -> ProblemRecord {
        let mut record =
            ProblemRecord::new("Two Sum", "two-sum", Language::by_name("Python").unwrap());
        record.difficulty = "Easy".to_string();
        record.tags = vec!["Array".to_string()];
        record.metadata.set("problem_id", "1");
        record.metadata.set("test_input", "[2,7,11,15]\n9");
        record.metadata.set("judge_type", "small");
        record
    }

    #[test]
    fn from_record_reads_schema() {
        let problem = LeetCodeProblem::from_record(record()).unwrap();
        assert_eq!(problem.problem_id, "1");
        assert_eq!(problem.test_input, "[2,7,11,15]\n9");
        assert_eq!(problem.judge_type, "small");
        assert_eq!(problem.difficulty(), Some(Difficulty::Easy));
    }

    #[test]
    fn missing_key_is_reported() {
        let mut record = record();
        record.metadata.remove("judge_type");

        assert_eq!(
            LeetCodeProblem::from_record(record),
            Err(ProviderError::MissingMetadata {
                slug: "two-sum".to_string(),
                key: "judge_type".to_string(),
            })
        );
    }

    #[test]
    fn every_schema_key_is_required() {
        for key in LeetCodeProblem::METADATA_KEYS {
            let mut record = record();
            record.metadata.remove(key);

            let err = LeetCodeProblem::from_record(record).unwrap_err();
            assert_eq!(err.to_string(), format!("Problem \"two-sum\" is missing metadata: {}", key));
        }
    }

    #[test]
    fn absent_value_counts_as_missing() {
        let mut record = record();
        record.metadata.set_absent("test_input");
        assert!(LeetCodeProblem::from_record(record).is_err());
    }

    #[test]
    fn extra_metadata_is_kept() {
        let mut record = record();
        record.metadata.set("frontend_id", "1");

        let problem = LeetCodeProblem::from_record(record.clone()).unwrap();
        assert_eq!(problem.to_record(true), record);
    }

    #[test]
    fn to_record_can_drop_tags() {
        let mut problem = LeetCodeProblem::from_record(record()).unwrap();
        problem.judge_type = "large".to_string();

        let saved = problem.to_record(false);
        assert!(saved.tags.is_empty());
        assert_eq!(saved.metadata.get("judge_type"), Some("large"));
    }

    #[test]
    fn parse_difficulty() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" medium ".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::all().len(), 3);
    }
}
