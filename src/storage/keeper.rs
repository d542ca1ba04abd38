//! File storage for problems
//!
//! Each problem is one file at
//! `{problems_dir}/{provider}/{language}/{slug}.{ext}`, written in the
//! [`ProblemFormat`] text encoding. Writes overwrite in place; there is no
//! locking since a single operator drives the tool.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::format::{FormatError, ProblemFormat};
use crate::domain::{similarity, Language, ProblemRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Problem \"{slug}\" was not found at {}", .path.display())]
    NotFound { slug: String, path: PathBuf },

    #[error(transparent)]
    InvalidFormat(#[from] FormatError),

    #[error("Failed to access problem file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Store for one provider's problem files
#[derive(Debug, Clone)]
pub struct ProblemStore {
    /// Provider directory, `{problems_dir}/{provider}`
    dir: PathBuf,

    provider: String,

    format: ProblemFormat,
}

impl ProblemStore {
    /// Creates a store for `provider` under `problems_dir`
    pub fn new(
        problems_dir: impl AsRef<Path>,
        provider: impl Into<String>,
        format: ProblemFormat,
    ) -> Self {
        let provider = provider.into();
        let dir = problems_dir.as_ref().join(&provider);
        Self {
            dir,
            provider,
            format,
        }
    }

    /// Returns the provider directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn format(&self) -> &ProblemFormat {
        &self.format
    }

    /// Returns the directory holding one language's problems
    pub fn language_dir(&self, language: &Language) -> PathBuf {
        self.dir.join(language.name)
    }

    /// Returns the path of a problem file
    pub fn path(&self, slug: &str, language: &Language) -> PathBuf {
        self.language_dir(language)
            .join(format!("{}.{}", slug, language.file_extension))
    }

    /// Writes a problem, replacing any existing file, and returns its path
    pub fn save(&self, problem: &ProblemRecord) -> Result<PathBuf> {
        let path = self.path(&problem.title_slug, &problem.language);
        let dir = self.language_dir(&problem.language);

        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        fs::write(&path, self.format.encode(problem)).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// Reads a problem
    ///
    /// Fails with [`StoreError::NotFound`] when no file exists,
    /// [`StoreError::InvalidFormat`] when the file cannot be parsed and
    /// [`StoreError::Io`] when it cannot be read.
    pub fn load(&self, slug: &str, language: &Language) -> Result<ProblemRecord> {
        let path = self.path(slug, language);
        if !path.is_file() {
            return Err(StoreError::NotFound {
                slug: slug.to_string(),
                path,
            }
            .into());
        }

        let text = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        let problem = self
            .format
            .decode(slug, *language, &text)
            .map_err(StoreError::from)?;

        Ok(problem)
    }

    /// Checks if a problem file exists
    pub fn exists(&self, slug: &str, language: &Language) -> bool {
        self.path(slug, language).is_file()
    }

    /// Lists saved problem slugs for a language, sorted
    pub fn list(&self, language: &Language) -> Result<Vec<String>> {
        let dir = self.language_dir(language);
        let mut slugs = Vec::new();

        if !dir.is_dir() {
            return Ok(slugs);
        }

        for entry in fs::read_dir(&dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() || !path.extension().is_some_and(|e| e == language.file_extension) {
                continue;
            }

            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                slugs.push(stem.to_string());
            }
        }

        slugs.sort();
        Ok(slugs)
    }

    /// Finds the saved slug most similar to `query`
    ///
    /// Candidates are scanned in sorted order and only a strictly better
    /// score replaces the current best, so ties go to the smallest slug.
    /// Returns `None` when nothing scores above zero.
    pub fn fuzzy_find(&self, query: &str, language: &Language) -> Result<Option<String>> {
        let mut best: Option<(f64, String)> = None;

        for slug in self.list(language)? {
            let score = similarity(query, &slug);
            let best_score = best.as_ref().map_or(0.0, |(s, _)| *s);
            if score > best_score {
                best = Some((score, slug));
            }
        }

        Ok(best.map(|(_, slug)| slug))
    }

    /// Deletes every saved problem for a language
    ///
    /// Returns `(removed, failed)`. A failed removal does not stop the
    /// others. The language directory is removed afterwards if it ended up
    /// empty.
    pub fn delete_all(&self, language: &Language) -> Result<(usize, usize)> {
        self.delete_all_with(language, |path| fs::remove_file(path))
    }

    fn delete_all_with<F>(&self, language: &Language, mut remove: F) -> Result<(usize, usize)>
    where
        F: FnMut(&Path) -> io::Result<()>,
    {
        let dir = self.language_dir(language);
        let (mut removed, mut failed) = (0, 0);

        if !dir.is_dir() {
            return Ok((removed, failed));
        }

        for entry in fs::read_dir(&dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            match remove(&path) {
                Ok(()) => removed += 1,
                Err(_) => failed += 1,
            }
        }

        // Fails, and is skipped, while anything is left behind
        let _ = fs::remove_dir(&dir);

        Ok((removed, failed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CodePrefixes;
    use tempfile::TempDir;

    fn python() -> Language {
        Language::by_name("Python").unwrap()
    }

    fn store(dir: &TempDir) -> ProblemStore {
        ProblemStore::new(
            dir.path().join("problems"),
            "leetcode",
            ProblemFormat::new(88, CodePrefixes::new()),
        )
    }

    fn problem(slug: &str, language: Language) -> ProblemRecord {
        let mut problem = ProblemRecord::new("Two Sum", slug, language);
        problem.difficulty = "Easy".to_string();
        problem.category = "Algorithms".to_string();
        problem.tags = vec!["Array".to_string()];
        problem.description = "Find two numbers.".to_string();
        problem.solution_code = "class Solution:\n    pass".to_string();
        problem.metadata.set("problem_id", "1");
        problem
    }

    #[test]
    fn path_layout() {
        let store = ProblemStore::new("problems", "leetcode", ProblemFormat::new(0, CodePrefixes::new()));
        assert_eq!(
            store.path("two-sum", &python()),
            PathBuf::from("problems/leetcode/Python/two-sum.py")
        );

        let postgres = Language::by_name("PostgreSQL").unwrap();
        assert_eq!(
            store.path("big-countries", &postgres),
            PathBuf::from("problems/leetcode/PostgreSQL/big-countries.sql")
        );
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let problem = problem("two-sum", python());

        let path = store.save(&problem).unwrap();
        assert_eq!(path, store.path("two-sum", &python()));
        assert!(path.is_file());

        let loaded = store.load("two-sum", &python()).unwrap();
        assert_eq!(loaded, problem);
    }

    #[test]
    fn save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let mut problem = problem("two-sum", python());

        store.save(&problem).unwrap();
        problem.solution_code = "print('rewritten')".to_string();
        store.save(&problem).unwrap();

        let loaded = store.load("two-sum", &python()).unwrap();
        assert_eq!(loaded.solution_code, "print('rewritten')");
    }

    #[test]
    fn load_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let err = store.load("two-sum", &python()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::NotFound { slug, .. }) if slug == "two-sum"
        ));
    }

    #[test]
    fn load_malformed_is_invalid_format() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let path = store.path("two-sum", &python());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "class Solution:\n    pass\n").unwrap();

        let err = store.load("two-sum", &python()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::InvalidFormat(_))
        ));
    }

    #[test]
    fn exists_checks_language() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&problem("two-sum", python())).unwrap();

        assert!(store.exists("two-sum", &python()));
        assert!(!store.exists("two-sum", &Language::by_name("Rust").unwrap()));
        assert!(!store.exists("three-sum", &python()));
    }

    #[test]
    fn list_is_sorted_and_skips_other_files() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&problem("two-sum", python())).unwrap();
        store.save(&problem("add-two-numbers", python())).unwrap();
        fs::write(store.language_dir(&python()).join("notes.txt"), "x").unwrap();
        fs::create_dir_all(store.language_dir(&python()).join("nested.py")).unwrap();

        assert_eq!(store.list(&python()).unwrap(), vec!["add-two-numbers", "two-sum"]);
    }

    #[test]
    fn fuzzy_find_picks_closest() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&problem("two-sum", python())).unwrap();
        store.save(&problem("three-sum", python())).unwrap();

        assert_eq!(
            store.fuzzy_find("two sum", &python()).unwrap(),
            Some("two-sum".to_string())
        );
    }

    #[test]
    fn fuzzy_find_ties_go_to_smallest_slug() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&problem("abd", python())).unwrap();
        store.save(&problem("abc", python())).unwrap();

        assert_eq!(store.fuzzy_find("ab", &python()).unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn fuzzy_find_without_candidates() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert_eq!(store.fuzzy_find("two sum", &python()).unwrap(), None);

        fs::create_dir_all(store.language_dir(&python())).unwrap();
        assert_eq!(store.fuzzy_find("two sum", &python()).unwrap(), None);

        store.save(&problem("xyz", python())).unwrap();
        assert_eq!(store.fuzzy_find("abc", &python()).unwrap(), None);
    }

    #[test]
    fn delete_all_removes_files_and_directory() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let rust = Language::by_name("Rust").unwrap();
        store.save(&problem("two-sum", python())).unwrap();
        store.save(&problem("three-sum", python())).unwrap();
        store.save(&problem("two-sum", rust)).unwrap();

        assert_eq!(store.delete_all(&python()).unwrap(), (2, 0));
        assert!(!store.language_dir(&python()).exists());
        assert!(store.exists("two-sum", &rust));
    }

    #[test]
    fn save_reports_io_failure() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let path = store.path("two-sum", &python());
        fs::create_dir_all(&path).unwrap();

        let err = store.save(&problem("two-sum", python())).unwrap_err();
        match err.downcast_ref::<StoreError>() {
            Some(StoreError::Io { path: failed, .. }) => assert_eq!(failed, &path),
            other => panic!("expected an I/O error, got {:?}", other),
        }
    }

    #[test]
    fn delete_all_missing_directory() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert_eq!(store.delete_all(&python()).unwrap(), (0, 0));
    }

    #[test]
    fn delete_all_counts_failures_and_keeps_going() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        for slug in ["a", "b", "c"] {
            store.save(&problem(slug, python())).unwrap();
        }

        let locked = store.path("b", &python());
        let counts = store
            .delete_all_with(&python(), |path| {
                if path == locked {
                    Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
                } else {
                    fs::remove_file(path)
                }
            })
            .unwrap();

        assert_eq!(counts, (2, 1));
        assert!(store.language_dir(&python()).is_dir());
        assert!(locked.is_file());
    }
}
