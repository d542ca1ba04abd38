//! Language catalog
//!
//! Every language a problem can be saved in, with the file extension and
//! line-comment marker used when the problem file is written. The catalog is
//! fixed at compile time and looked up by name.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LanguageError {
    #[error("Invalid language: {0}")]
    Unknown(String),
}

/// Which family a language belongs to on the judge side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageKind {
    /// Algorithmic problems
    General,
    /// Shell problems
    Shell,
    /// Database problems
    Sql,
}

/// A supported language or SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Language {
    /// Display name, also used as the directory name on disk
    pub name: &'static str,

    /// File extension without the dot
    pub file_extension: &'static str,

    /// Line-comment marker prefixed to every header line
    pub comment_marker: &'static str,

    pub kind: LanguageKind,
}

const fn lang(
    name: &'static str,
    file_extension: &'static str,
    comment_marker: &'static str,
    kind: LanguageKind,
) -> Language {
    Language {
        name,
        file_extension,
        comment_marker,
        kind,
    }
}

static CATALOG: [Language; 23] = [
    lang("C++", "cpp", "//", LanguageKind::General),
    lang("Java", "java", "//", LanguageKind::General),
    lang("Python", "py", "#", LanguageKind::General),
    lang("C", "c", "//", LanguageKind::General),
    lang("C#", "cs", "//", LanguageKind::General),
    lang("JavaScript", "js", "//", LanguageKind::General),
    lang("TypeScript", "ts", "//", LanguageKind::General),
    lang("PHP", "php", "//", LanguageKind::General),
    lang("Swift", "swift", "//", LanguageKind::General),
    lang("Kotlin", "kt", "//", LanguageKind::General),
    lang("Dart", "dart", "//", LanguageKind::General),
    lang("Go", "go", "//", LanguageKind::General),
    lang("Ruby", "rb", "#", LanguageKind::General),
    lang("Scala", "scala", "//", LanguageKind::General),
    lang("Rust", "rs", "//", LanguageKind::General),
    lang("Racket", "rkt", ";", LanguageKind::General),
    lang("Erlang", "erl", "%", LanguageKind::General),
    lang("Elixir", "exs", "#", LanguageKind::General),
    lang("Bash", "sh", "#", LanguageKind::Shell),
    lang("MySQL", "sql", "--", LanguageKind::Sql),
    lang("MS SQL Server", "sql", "--", LanguageKind::Sql),
    lang("Oracle", "sql", "--", LanguageKind::Sql),
    lang("PostgreSQL", "sql", "--", LanguageKind::Sql),
];

impl Language {
    /// Returns the whole catalog in display order
    pub fn all() -> &'static [Language] {
        &CATALOG
    }

    /// Returns the languages of one family
    pub fn of_kind(kind: LanguageKind) -> impl Iterator<Item = &'static Language> {
        CATALOG.iter().filter(move |l| l.kind == kind)
    }

    /// Looks a language up by name (case-insensitive)
    pub fn by_name(name: &str) -> Result<Language, LanguageError> {
        let name = name.trim();
        CATALOG
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| LanguageError::Unknown(name.to_string()))
    }
}

impl fmt::Display for LanguageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageKind::General => write!(f, "general"),
            LanguageKind::Shell => write!(f, "shell"),
            LanguageKind::Sql => write!(f, "sql"),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::by_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        let python = Language::by_name("Python").unwrap();
        assert_eq!(python.file_extension, "py");
        assert_eq!(python.comment_marker, "#");
        assert_eq!(python.kind, LanguageKind::General);
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Language::by_name("postgresql").unwrap().name, "PostgreSQL");
        assert_eq!("c++".parse::<Language>().unwrap().name, "C++");
    }

    #[test]
    fn unknown_language() {
        assert_eq!(
            Language::by_name("Brainfuck"),
            Err(LanguageError::Unknown("Brainfuck".to_string()))
        );
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = Language::all().iter().map(|l| l.name.to_lowercase()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Language::all().len());
    }

    #[test]
    fn sql_dialects_share_marker() {
        let dialects: Vec<_> = Language::of_kind(LanguageKind::Sql).collect();
        assert_eq!(dialects.len(), 4);
        assert!(dialects.iter().all(|l| l.comment_marker == "--"));
    }
}
