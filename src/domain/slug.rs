//! Slugs and fuzzy matching of problem names

use rapidfuzz::distance::indel;

/// Turns a title or loose slug into a filename-safe slug
///
/// Lowercases, keeps alphanumerics and collapses every other run of
/// characters into a single `-`. `"Two Sum II"` becomes `"two-sum-ii"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Normalized similarity of two strings in `0.0..=1.0`
///
/// Indel ratio: `2 * lcs / (|a| + |b|)`, counted in characters, where `lcs`
/// is the length of the longest common subsequence. Two empty strings are
/// identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    indel::normalized_similarity(a.chars(), b.chars())
}
