//! Problem file format
//!
//! A problem is saved as a single source file. Everything except the
//! solution lives in line comments at the top, using the language's comment
//! marker (`#` below):
//!
//! ```text
//! # Two Sum (Easy)
//! # Category: Algorithms
//! # Tags: Array, Hash Table
//!
//! # problem_id=1
//! # test_input=[2,7,11,15]\n9
//!
//!
//! # Given an array of integers nums and an integer target, return indices
//! # of the two numbers such that they add up to target.
//!
//!
//! class Solution:
//!     def twoSum(self, nums: List[int], target: int) -> List[int]:
//! ```
//!
//! Metadata values have their newlines escaped as `\n` so each entry stays
//! on one line. Descriptions are word-wrapped to a configurable width.
//! The solution is written verbatim after an optional per-language prefix.
//!
//! Decoding scans the file line by line: header, category, optional tags,
//! metadata block, description block, then everything else is the solution.
//! The first comment block is metadata when it starts with a `key=value`
//! line. When it does not, the blank lines under the header decide: with no
//! metadata the encoder leaves three or more there instead of one.
//! Carriage returns are stripped only from files that are CRLF throughout.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::{Language, ProblemMeta, ProblemRecord};

/// Blank lines the encoder leaves under the header when metadata is empty;
/// decides the first block when its content does not
const EMPTY_METADATA_GAP: usize = 3;

/// Solution prefixes by language name; a missing entry means no prefix
pub type CodePrefixes = BTreeMap<String, String>;

#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("Problem \"{slug}\" is invalid: {reason} (line {line})")]
    InvalidFormat {
        slug: String,
        line: usize,
        reason: String,
    },
}

/// Encodes problem records to file text and back
#[derive(Debug, Clone)]
pub struct ProblemFormat {
    /// Description wrap width in characters; zero or less disables wrapping
    max_description_line_length: i64,

    code_prefixes: CodePrefixes,
}

impl ProblemFormat {
    pub fn new(max_description_line_length: i64, code_prefixes: CodePrefixes) -> Self {
        Self {
            max_description_line_length,
            code_prefixes,
        }
    }

    pub fn max_description_line_length(&self) -> i64 {
        self.max_description_line_length
    }

    /// Returns the solution prefix configured for a language
    pub fn code_prefix(&self, language: &Language) -> Option<&str> {
        self.code_prefixes
            .get(language.name)
            .map(String::as_str)
            .filter(|p| !p.is_empty())
    }

    /// Renders a problem to file text
    pub fn encode(&self, problem: &ProblemRecord) -> String {
        let marker = problem.language.comment_marker;

        let mut header = format!(
            "{marker} {} ({})\n{marker} Category: {}",
            problem.title, problem.difficulty, problem.category
        );
        if !problem.tags.is_empty() {
            header.push_str(&format!("\n{marker} Tags: {}", problem.tags.join(", ")));
        }

        let metadata = problem
            .metadata
            .present()
            .map(|(key, value)| format!("{marker} {key}={}", escape_newlines(value)))
            .collect::<Vec<_>>()
            .join("\n");

        let description = self.format_description(&problem.description, marker);

        let solution = match self.code_prefix(&problem.language) {
            Some(prefix) => format!("{prefix}{}", problem.solution_code),
            None => problem.solution_code.clone(),
        };

        format!("{header}\n\n{metadata}\n\n\n{description}\n\n\n{solution}")
    }

    /// Parses file text back into a problem
    ///
    /// `slug` and `language` are taken as given; they are not recovered from
    /// the text.
    pub fn decode(
        &self,
        slug: &str,
        language: Language,
        text: &str,
    ) -> Result<ProblemRecord, FormatError> {
        let mut scanner = Scanner::new(slug, language.comment_marker, text);

        let (title, difficulty) = scanner
            .peek()
            .and_then(|line| scanner.header(line))
            .ok_or_else(|| scanner.error("expected \"<title> (<difficulty>)\" header"))?;
        scanner.advance();

        scanner.skip_blank();
        let category = scanner
            .peek()
            .and_then(|line| scanner.field(line, "Category"))
            .ok_or_else(|| scanner.error("expected \"Category:\" line"))?;
        scanner.advance();

        let mut tags = Vec::new();
        if let Some(list) = scanner.peek().and_then(|line| scanner.field(line, "Tags")) {
            tags = list.split(", ").map(str::to_string).collect();
            scanner.advance();
        }

        let gap = scanner.skip_blank();
        if gap == 0 {
            return Err(scanner.error("expected a blank line after the header"));
        }

        let first = scanner.take_marker_lines();
        let after_first = scanner.position();
        let has_second = scanner.skip_blank() > 0 && scanner.at_marker_line();

        let looks_like_metadata = first.first().is_some_and(|line| is_metadata_key_line(line));
        let first_is_metadata = if has_second {
            looks_like_metadata || gap < EMPTY_METADATA_GAP
        } else {
            looks_like_metadata && gap < EMPTY_METADATA_GAP
        };

        let (meta_lines, description_lines) = if first_is_metadata && has_second {
            let second = scanner.take_marker_lines();
            (first, second)
        } else if first_is_metadata {
            scanner.seek(after_first);
            (first, Vec::new())
        } else {
            scanner.seek(after_first);
            (Vec::new(), first)
        };
        scanner.skip_empty();

        let mut metadata = ProblemMeta::new();
        for line in meta_lines {
            if let Some((key, value)) = line.split_once('=') {
                if !key.is_empty() {
                    metadata.set(key, unescape_newlines(value));
                }
            }
        }

        let description = description_lines.join("\n").trim_matches('\n').to_string();

        let rest = scanner.rest();
        let mut solution_code = rest.trim_matches('\n');
        if let Some(prefix) = self.code_prefix(&language) {
            if let Some(code) = solution_code.strip_prefix(prefix.trim_matches('\n')) {
                solution_code = code.trim_start_matches('\n');
            }
        }

        Ok(ProblemRecord {
            title: title.to_string(),
            title_slug: slug.to_string(),
            difficulty: difficulty.to_string(),
            category: category.to_string(),
            tags,
            description,
            language,
            solution_code: solution_code.to_string(),
            metadata,
        })
    }

    /// Prefixes every description line with the marker, wrapping long lines
    fn format_description(&self, description: &str, marker: &str) -> String {
        let description = description.replace('\r', "");
        let width = self.max_description_line_length;

        let mut lines = Vec::new();
        for line in description.split('\n') {
            if width > 0 && line.chars().count() > width as usize {
                lines.extend(wrap_line(line, width as usize));
            } else {
                lines.push(line.to_string());
            }
        }

        lines
            .iter()
            .map(|line| format!("{marker} {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Greedily packs the words of a line into lines of at most `width` characters
///
/// A word longer than `width` gets a line of its own and is never split.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }

    lines
}

fn escape_newlines(value: &str) -> String {
    value.replace('\n', "\\n")
}

fn unescape_newlines(value: &str) -> String {
    value.replace("\\n", "\n")
}

/// Whether a header line reads as `key=value` with a word-like key
fn is_metadata_key_line(line: &str) -> bool {
    line.split_once('=')
        .is_some_and(|(key, _)| !key.is_empty() && !key.contains(char::is_whitespace))
}

/// Line cursor over problem file text
struct Scanner<'a> {
    slug: &'a str,
    marker: &'a str,
    lines: Vec<&'a str>,
    /// Every line break is `\r\n`
    crlf: bool,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(slug: &'a str, marker: &'a str, text: &'a str) -> Self {
        let lines: Vec<&'a str> = text.split('\n').collect();
        let crlf = lines.len() > 1
            && lines[..lines.len() - 1]
                .iter()
                .all(|line| line.ends_with('\r'));

        Self {
            slug,
            marker,
            lines,
            crlf,
            pos: 0,
        }
    }

    /// Current line, without its carriage return in CRLF text
    fn peek(&self) -> Option<&'a str> {
        let line = self.lines.get(self.pos).copied()?;
        if self.crlf {
            Some(line.strip_suffix('\r').unwrap_or(line))
        } else {
            Some(line)
        }
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Skips empty lines only; whitespace-only lines are kept
    fn skip_empty(&mut self) {
        while self.peek().is_some_and(str::is_empty) {
            self.advance();
        }
    }

    /// Skips blank lines, returning how many were skipped
    fn skip_blank(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|line| line.trim().is_empty()) {
            self.advance();
        }
        self.pos - start
    }

    fn at_marker_line(&self) -> bool {
        self.peek().is_some_and(|line| line.starts_with(self.marker))
    }

    /// Consumes consecutive marker lines, returning their stripped contents
    fn take_marker_lines(&mut self) -> Vec<&'a str> {
        let mut taken = Vec::new();
        while let Some(line) = self.peek() {
            match self.strip_marker(line) {
                Some(content) => taken.push(content),
                None => break,
            }
            self.advance();
        }
        taken
    }

    /// Removes `"{marker} "` (or a bare marker) from the start of a line
    fn strip_marker(&self, line: &'a str) -> Option<&'a str> {
        let rest = line.strip_prefix(self.marker)?;
        Some(rest.strip_prefix(' ').unwrap_or(rest))
    }

    /// Splits `"{marker} {title} ({difficulty})"` at the last `" ("`
    fn header(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let inner = line
            .strip_prefix(self.marker)?
            .strip_prefix(' ')?
            .strip_suffix(')')?;
        let split = inner.rfind(" (")?;
        Some((&inner[..split], &inner[split + 2..]))
    }

    /// Reads the value of a `"{marker} {name}: {value}"` line
    fn field(&self, line: &'a str, name: &str) -> Option<&'a str> {
        let value = line
            .strip_prefix(self.marker)?
            .strip_prefix(' ')?
            .strip_prefix(name)?
            .strip_prefix(':')?;
        Some(value.strip_prefix(' ').unwrap_or(value))
    }

    /// Everything from the current line on, verbatim
    fn rest(&self) -> String {
        self.lines
            .get(self.pos..)
            .map(|lines| lines.join("\n"))
            .unwrap_or_default()
    }

    fn error(&self, reason: &str) -> FormatError {
        FormatError::InvalidFormat {
            slug: self.slug.to_string(),
            line: self.pos + 1,
            reason: reason.to_string(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    fn description() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop::collection::vec("[a-z]{1,12}", 0..12).prop_map(|w| w.join(" ")),
            0..5,
        )
        .prop_map(|lines| lines.join("\n"))
    }

    fn solution() -> impl Strategy<Value = String> {
        (
            "[a-z][a-z =:()#]{0,20}",
            prop::collection::vec("[a-z =:()#]{1,20}", 0..4),
        )
            .prop_map(|(first, rest)| {
                std::iter::once(first)
                    .chain(rest)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
    }

    fn metadata() -> impl Strategy<Value = ProblemMeta> {
        prop::collection::btree_map("[a-z_]{1,10}", "[a-zA-Z0-9 \r\n,\\[\\]]{0,20}", 0..4)
            .prop_map(|entries| entries.into_iter().collect())
    }

    prop_compose! {
        fn record()(
            title in "[A-Za-z0-9][A-Za-z0-9 ]{0,20}",
            difficulty in "[A-Za-z]{1,8}",
            category in "[A-Za-z ]{0,15}",
            tags in prop::collection::vec("([A-Za-z]{1,8}( [A-Za-z]{1,8})?)?", 0..4),
            description in description(),
            language in prop::sample::select(Language::all()),
            solution_code in solution(),
            metadata in metadata(),
        ) -> ProblemRecord {
            ProblemRecord {
                title,
                title_slug: "some-problem".to_string(),
                difficulty,
                category,
                tags,
                description,
                language,
                solution_code,
                metadata,
            }
        }
    }

    fn formats() -> impl Strategy<Value = ProblemFormat> {
        (-5i64..40, prop::option::of("[a-z ]{1,12}\n\n")).prop_map(|(width, prefix)| {
            let prefixes = prefix
                .map(|p| {
                    Language::all()
                        .iter()
                        .map(|l| (l.name.to_string(), p.clone()))
                        .collect()
                })
                .unwrap_or_default();
            ProblemFormat::new(width, prefixes)
        })
    }

    proptest! {
        #[test]
        fn roundtrip_modulo_reflow(problem in record(), format in formats()) {
            let text = format.encode(&problem);
            let decoded = format
                .decode(&problem.title_slug, problem.language, &text)
                .unwrap();

            prop_assert_eq!(words(&decoded.description), words(&problem.description));

            let mut expected = problem.clone();
            expected.description = decoded.description.clone();
            prop_assert_eq!(decoded, expected);
        }

        #[test]
        fn second_roundtrip_is_stable(problem in record(), format in formats()) {
            let once = format
                .decode(&problem.title_slug, problem.language, &format.encode(&problem))
                .unwrap();
            let twice = format
                .decode(&once.title_slug, once.language, &format.encode(&once))
                .unwrap();
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn wrapped_lines_fit_width(line in "[a-z ]{0,120}", width in 1usize..30) {
            for wrapped in wrap_line(&line, width) {
                let len = wrapped.chars().count();
                prop_assert!(len <= width || !wrapped.contains(' '));
            }
        }
    }
}
