//! String similarity primitives used by the matcher.
//!
//! [`similarity`] is a case-insensitive sequence-similarity ratio built from
//! longest common blocks; [`extract_keywords`] turns a free-text
//! description into the tokens compared by the description factor.

use std::sync::LazyLock;

use regex::Regex;

/// Words dropped from descriptions before keyword comparison.
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "was", "are", "were",
];

/// Tokens of this many characters or fewer are never keywords.
pub const MAX_SHORT_TOKEN_LEN: usize = 2;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid regex"));

// ---------------------------------------------------------------------------
// Similarity ratio
// ---------------------------------------------------------------------------

/// Case-insensitive similarity ratio in `[0.0, 1.0]`.
///
/// Defined as `2 * M / T` where `T` is the combined character count and `M`
/// the number of characters matched by repeatedly taking the longest common
/// block and recursing into the unmatched text on either side of it.
///
/// Two empty strings are identical (`1.0`); one empty string against a
/// non-empty one scores `0.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

/// Sum of the lengths of all matching blocks between `a` and `b`.
fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
///
/// Ties go to the block that starts earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
    let width = bhi.saturating_sub(blo);
    // run[x] = length of the common run ending at (i, blo + x).
    let mut prev = vec![0usize; width];
    let mut curr = vec![0usize; width];

    for i in alo..ahi {
        for (x, j) in (blo..bhi).enumerate() {
            curr[x] = if a[i] == b[j] {
                let len = if x > 0 { prev[x - 1] + 1 } else { 1 };
                if len > best_len {
                    best_i = i + 1 - len;
                    best_j = j + 1 - len;
                    best_len = len;
                }
                len
            } else {
                0
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best_len)
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

/// Lowercased word tokens of `text` minus stopwords and short tokens.
///
/// Source order and duplicates are preserved.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| word.chars().count() > MAX_SHORT_TOKEN_LEN && !STOPWORDS.contains(word))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
