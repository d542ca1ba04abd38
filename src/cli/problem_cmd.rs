//! Problem CLI commands
//!
//! Everything here works on problems already saved on disk; fetching,
//! testing and submitting go through the judge and live elsewhere.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::{slugify, Language};
use crate::provider::{Difficulty, LeetCodeProblem, ProviderProblem};
use crate::storage::{Config, ProblemFormat, ProblemStore, StoreError};

#[derive(Subcommand)]
pub enum ProblemCommands {
    /// Show a saved problem
    Show {
        /// Problem title or slug
        problem: String,

        /// Language of the saved solution
        #[arg(long, short)]
        language: Option<String>,
    },

    /// Print the path of a problem file
    Path {
        /// Problem title or slug
        problem: String,

        /// Language of the saved solution
        #[arg(long, short)]
        language: Option<String>,
    },

    /// List saved problems
    List {
        /// Language of the saved solutions
        #[arg(long, short)]
        language: Option<String>,

        /// Only show problems of this difficulty
        #[arg(long, short)]
        difficulty: Option<String>,
    },

    /// Find the saved problem closest to a name
    Find {
        /// Approximate title or slug
        query: String,

        /// Language of the saved solutions
        #[arg(long, short)]
        language: Option<String>,
    },

    /// Rewrite a saved problem with the current wrap width and code prefix
    Reformat {
        /// Problem title or slug
        problem: String,

        /// Language of the saved solution
        #[arg(long, short)]
        language: Option<String>,

        /// Open the problem afterwards (overrides main.open_saved_problems)
        #[arg(long, short)]
        open: bool,
    },

    /// Open a saved problem in the editor
    Open {
        /// Problem title or slug
        problem: String,

        /// Language of the saved solution
        #[arg(long, short)]
        language: Option<String>,
    },

    /// Delete all saved problems for a language
    Clear {
        /// Language of the saved solutions
        #[arg(long, short)]
        language: Option<String>,

        /// Confirm the deletion
        #[arg(long, short)]
        yes: bool,
    },
}

pub fn run(cmd: ProblemCommands, config: &Config, output: &Output) -> Result<()> {
    let store = store(config);
    output.verbose_ctx(
        "store",
        &format!("Provider {} at {}", store.provider(), store.dir().display()),
    );

    match cmd {
        ProblemCommands::Show { problem, language } => {
            show(output, config, &store, &problem, language.as_deref())
        }
        ProblemCommands::Path { problem, language } => {
            let language = resolve_language(config, language.as_deref())?;
            let path = store.path(&slugify(&problem), &language);
            if output.is_json() {
                output.data(&serde_json::json!({
                    "path": path.display().to_string(),
                    "exists": path.is_file(),
                }));
            } else {
                println!("{}", path.display());
            }
            Ok(())
        }
        ProblemCommands::List {
            language,
            difficulty,
        } => list(output, config, &store, language.as_deref(), difficulty.as_deref()),
        ProblemCommands::Find { query, language } => {
            find(output, config, &store, &query, language.as_deref())
        }
        ProblemCommands::Reformat {
            problem,
            language,
            open,
        } => reformat(output, config, &store, &problem, language.as_deref(), open),
        ProblemCommands::Open { problem, language } => {
            let language = resolve_language(config, language.as_deref())?;
            let slug = slugify(&problem);
            if !store.exists(&slug, &language) {
                return Err(not_found(&store, &problem, &slug, &language));
            }
            open_in_editor(config, output, &store.path(&slug, &language))
        }
        ProblemCommands::Clear { language, yes } => {
            clear(output, config, &store, language.as_deref(), yes)
        }
    }
}

/// Builds the LeetCode store from the configuration
fn store(config: &Config) -> ProblemStore {
    let format = ProblemFormat::new(
        config.main.max_description_line_length,
        config.providers.leetcode.code_prefixes.clone(),
    );
    ProblemStore::new(&config.main.problems_dir, LeetCodeProblem::PROVIDER, format)
}

/// Uses the given language name or the configured default
fn resolve_language(config: &Config, name: Option<&str>) -> Result<Language> {
    let name = name.unwrap_or(&config.providers.leetcode.default_language);
    Ok(Language::by_name(name)?)
}

/// Builds a not-found error, suggesting the closest saved problem
fn not_found(store: &ProblemStore, query: &str, slug: &str, language: &Language) -> anyhow::Error {
    let err = StoreError::NotFound {
        slug: slug.to_string(),
        path: store.path(slug, language),
    };

    match store.fuzzy_find(query, language) {
        Ok(Some(similar)) => anyhow::anyhow!("{}. Did you mean \"{}\"?", err, similar),
        _ => err.into(),
    }
}

/// Loads a problem and checks its LeetCode metadata
fn load(
    store: &ProblemStore,
    problem: &str,
    language: &Language,
) -> Result<LeetCodeProblem> {
    let slug = slugify(problem);
    if !store.exists(&slug, language) {
        return Err(not_found(store, problem, &slug, language));
    }

    let record = store.load(&slug, language)?;
    Ok(LeetCodeProblem::from_record(record)?)
}

fn show(
    output: &Output,
    config: &Config,
    store: &ProblemStore,
    problem: &str,
    language: Option<&str>,
) -> Result<()> {
    let language = resolve_language(config, language)?;
    let problem = load(store, problem, &language)?;
    let record = &problem.record;
    let path = store.path(&record.title_slug, &language);
    let tags = if config.main.show_problem_tags {
        record.tags.clone()
    } else {
        Vec::new()
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "title": record.title,
            "slug": record.title_slug,
            "difficulty": record.difficulty,
            "category": record.category,
            "tags": tags,
            "language": language.name,
            "path": path.display().to_string(),
            "problem_id": problem.problem_id,
            "judge_type": problem.judge_type,
            "test_input": problem.test_input,
            "description": record.description,
        }));
        return Ok(());
    }

    println!("{} ({})", record.title, record.difficulty);
    output.field("Category", &record.category);
    output.field("Tags", &tags.join(", "));
    output.field("Language", language.name);
    output.field("Path", &path.display().to_string());
    output.field("Problem ID", &problem.problem_id);
    output.field("Judge", &problem.judge_type);
    println!("\nTest input:\n{}", problem.test_input);

    if !record.description.is_empty() {
        println!("\n{}", record.description);
    }

    Ok(())
}

fn list(
    output: &Output,
    config: &Config,
    store: &ProblemStore,
    language: Option<&str>,
    difficulty: Option<&str>,
) -> Result<()> {
    let language = resolve_language(config, language)?;
    let difficulty = difficulty
        .map(|d| {
            d.parse::<Difficulty>().with_context(|| {
                let valid: Vec<_> = Difficulty::all().iter().map(|d| d.to_string()).collect();
                format!("Expected one of: {}", valid.join(", "))
            })
        })
        .transpose()?;

    let mut rows = Vec::new();
    for slug in store.list(&language)? {
        match store.load(&slug, &language) {
            Ok(record) => {
                let matches = difficulty
                    .map_or(true, |d| record.difficulty.parse::<Difficulty>().ok() == Some(d));
                if matches {
                    rows.push((slug, record.difficulty, record.title));
                }
            }
            Err(e) => {
                output.verbose_ctx("list", &format!("Skipping {}: {:#}", slug, e));
                if difficulty.is_none() {
                    rows.push((slug, "?".to_string(), String::new()));
                }
            }
        }
    }

    if output.is_json() {
        let items: Vec<_> = rows
            .iter()
            .map(|(slug, difficulty, title)| {
                serde_json::json!({
                    "slug": slug,
                    "difficulty": difficulty,
                    "title": title,
                })
            })
            .collect();
        output.data(&items);
    } else if rows.is_empty() {
        println!("No saved {} problems.", language.name);
    } else {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|(slug, difficulty, title)| vec![slug, difficulty, title])
            .collect();
        output.table(&[("SLUG", 40), ("LEVEL", 8), ("TITLE", 0)], &rows);
    }

    Ok(())
}

fn find(
    output: &Output,
    config: &Config,
    store: &ProblemStore,
    query: &str,
    language: Option<&str>,
) -> Result<()> {
    let language = resolve_language(config, language)?;
    let found = store.fuzzy_find(query, &language)?;
    output.verbose_ctx("find", &format!("Best match for {:?}: {:?}", query, found));

    if output.is_json() {
        output.data(&serde_json::json!({
            "query": query,
            "slug": found,
            "path": found.as_ref().map(|s| store.path(s, &language).display().to_string()),
        }));
    } else {
        match found {
            Some(slug) => println!("{}", slug),
            None => println!("No saved {} problems match \"{}\"", language.name, query),
        }
    }

    Ok(())
}

fn reformat(
    output: &Output,
    config: &Config,
    store: &ProblemStore,
    problem: &str,
    language: Option<&str>,
    open: bool,
) -> Result<()> {
    let language = resolve_language(config, language)?;
    let problem = load(store, problem, &language)?;

    output.verbose_ctx(
        "reformat",
        &format!("Wrapping descriptions at {}", store.format().max_description_line_length()),
    );

    let record = problem.to_record(config.main.show_problem_tags);
    let path = store.save(&record)?;
    output.success(&format!("Problem \"{}\" was saved at {}", record.title, path.display()));

    if open || config.main.open_saved_problems {
        open_in_editor(config, output, &path)?;
    }

    Ok(())
}

fn clear(
    output: &Output,
    config: &Config,
    store: &ProblemStore,
    language: Option<&str>,
    yes: bool,
) -> Result<()> {
    let language = resolve_language(config, language)?;
    if !yes {
        anyhow::bail!(
            "Refusing to delete saved {} problems without --yes",
            language.name
        );
    }

    let (removed, failed) = store.delete_all(&language)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "language": language.name,
            "removed": removed,
            "failed": failed,
        }));
    } else {
        println!("REMOVED: {}, FAILED: {}", removed, failed);
    }

    Ok(())
}

/// Opens a file with the configured editor or the platform opener
fn open_in_editor(config: &Config, output: &Output, path: &Path) -> Result<()> {
    let mut command = match config.main.editor.as_deref() {
        Some(editor) => {
            let mut parts = editor.split_whitespace();
            let program = parts
                .next()
                .ok_or_else(|| anyhow::anyhow!("main.editor is empty"))?;
            let mut command = Command::new(program);
            command.args(parts);
            command
        }
        None if cfg!(target_os = "macos") => Command::new("open"),
        None if cfg!(target_os = "windows") => {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", ""]);
            command
        }
        None => Command::new("xdg-open"),
    };

    output.verbose_ctx("open", &format!("Running {:?} {}", command, path.display()));

    let status = command
        .arg(path)
        .status()
        .with_context(|| format!("Failed to open {}", path.display()))?;

    if !status.success() {
        anyhow::bail!("Failed to open {}: editor exited with {}", path.display(), status);
    }

    Ok(())
}
