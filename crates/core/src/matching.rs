//! Cross-report matcher for persons and items.
//!
//! A new report is scored against a snapshot of existing reports of the
//! opposite type in the same category. Each report category has a factor
//! table; a factor contributes only when both reports carry a non-empty
//! value for it and the factor's rule accepts the pair. The pair score is
//! the sum of contributions divided by the number of contributing factors.
//!
//! Weights per table do not sum to 1.0 and the divisor is the factor count
//! rather than the weight sum, so pairs with few contributing factors can
//! score higher per factor. A mean of weighted contributions never exceeds
//! the largest weight in its table, which is below [`MATCH_THRESHOLD`];
//! deployments that want matches lower the threshold through configuration.

use serde::Serialize;

use crate::error::CoreError;
use crate::report::{ItemReport, ItemReportType, PersonReport, PersonReportType};
use crate::similarity::{extract_keywords, similarity};
use crate::types::non_empty;

/// Pairs must score strictly above this to become candidates.
pub const MATCH_THRESHOLD: f64 = 0.55;

/// Maximum number of candidates returned per match run.
pub const MAX_CANDIDATES: usize = 5;

/// Two keywords count as matching above this similarity.
pub const KEYWORD_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Largest age gap (in years) for which the age factor contributes.
pub const MAX_AGE_GAP: i64 = 5;

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// A scored pairing between the new report and an existing one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate<'a, R> {
    pub report: &'a R,
    /// Final score, above the threshold the match ran with.
    pub score: f64,
}

/// Reports the matcher can pair up.
pub trait Matchable {
    type Kind: PartialEq + Copy;

    fn report_type(&self) -> Self::Kind;
}

impl Matchable for PersonReport {
    type Kind = PersonReportType;

    fn report_type(&self) -> PersonReportType {
        self.report_type
    }
}

impl Matchable for ItemReport {
    type Kind = ItemReportType;

    fn report_type(&self) -> ItemReportType {
        self.report_type
    }
}

// ---------------------------------------------------------------------------
// Factor tables
// ---------------------------------------------------------------------------

/// How a factor turns two attribute values into a raw value in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Similarity ratio, kept only above `threshold`.
    Similarity { threshold: f64 },
    /// Integer ages within [`MAX_AGE_GAP`]; `1.0 - 0.1 * gap`.
    AgeProximity,
    /// Case-insensitive equality; contributes a flat `1.0`.
    EqualIgnoreCase,
    /// Keyword overlap ratio of two descriptions.
    KeywordOverlap,
}

impl Rule {
    fn evaluate(self, new: &str, existing: &str) -> Option<f64> {
        match self {
            Rule::Similarity { threshold } => {
                let sim = similarity(new, existing);
                (sim > threshold).then_some(sim)
            }
            Rule::AgeProximity => {
                let a: i64 = new.trim().parse().ok()?;
                let b: i64 = existing.trim().parse().ok()?;
                let gap = a.checked_sub(b)?.checked_abs()?;
                (gap <= MAX_AGE_GAP).then(|| 1.0 - 0.1 * gap as f64)
            }
            Rule::EqualIgnoreCase => {
                (new.to_lowercase() == existing.to_lowercase()).then_some(1.0)
            }
            Rule::KeywordOverlap => keyword_overlap(new, existing),
        }
    }
}

struct Factor<R> {
    field: fn(&R) -> Option<&str>,
    rule: Rule,
    weight: f64,
}

impl<R> Factor<R> {
    fn contribution(&self, new: &R, existing: &R) -> Option<f64> {
        let a = (self.field)(new)?;
        let b = (self.field)(existing)?;
        self.rule.evaluate(a, b).map(|value| value * self.weight)
    }
}

fn person_name(r: &PersonReport) -> Option<&str> {
    non_empty(&r.name)
}

fn person_age(r: &PersonReport) -> Option<&str> {
    non_empty(&r.age)
}

fn person_gender(r: &PersonReport) -> Option<&str> {
    non_empty(&r.gender)
}

fn person_description(r: &PersonReport) -> Option<&str> {
    non_empty(&r.description)
}

fn person_location(r: &PersonReport) -> Option<&str> {
    non_empty(&r.location)
}

fn item_category(r: &ItemReport) -> Option<&str> {
    non_empty(&r.category)
}

fn item_color(r: &ItemReport) -> Option<&str> {
    non_empty(&r.color)
}

fn item_brand(r: &ItemReport) -> Option<&str> {
    non_empty(&r.brand)
}

fn item_description(r: &ItemReport) -> Option<&str> {
    non_empty(&r.description)
}

fn item_location(r: &ItemReport) -> Option<&str> {
    non_empty(&r.location)
}

const PERSON_FACTORS: &[Factor<PersonReport>] = &[
    Factor {
        field: person_name,
        rule: Rule::Similarity { threshold: 0.6 },
        weight: 0.4,
    },
    Factor {
        field: person_age,
        rule: Rule::AgeProximity,
        weight: 0.2,
    },
    Factor {
        field: person_gender,
        rule: Rule::EqualIgnoreCase,
        weight: 0.2,
    },
    Factor {
        field: person_description,
        rule: Rule::KeywordOverlap,
        weight: 0.2,
    },
    Factor {
        field: person_location,
        rule: Rule::Similarity { threshold: 0.4 },
        weight: 0.2,
    },
];

const ITEM_FACTORS: &[Factor<ItemReport>] = &[
    Factor {
        field: item_category,
        rule: Rule::Similarity { threshold: 0.6 },
        weight: 0.25,
    },
    Factor {
        field: item_color,
        rule: Rule::Similarity { threshold: 0.6 },
        weight: 0.25,
    },
    Factor {
        field: item_brand,
        rule: Rule::Similarity { threshold: 0.6 },
        weight: 0.2,
    },
    Factor {
        field: item_description,
        rule: Rule::KeywordOverlap,
        weight: 0.15,
    },
    Factor {
        field: item_location,
        rule: Rule::Similarity { threshold: 0.4 },
        weight: 0.1,
    },
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Rank existing person reports against a new one.
///
/// Returns at most [`MAX_CANDIDATES`] candidates of the opposite report
/// type, highest score first, every score above [`MATCH_THRESHOLD`].
pub fn match_persons<'a>(
    new_report: &PersonReport,
    existing: &'a [PersonReport],
) -> Vec<MatchCandidate<'a, PersonReport>> {
    match_persons_above(new_report, existing, MATCH_THRESHOLD)
}

/// [`match_persons`] with an explicit score threshold.
pub fn match_persons_above<'a>(
    new_report: &PersonReport,
    existing: &'a [PersonReport],
    threshold: f64,
) -> Vec<MatchCandidate<'a, PersonReport>> {
    rank(new_report, existing, PERSON_FACTORS, threshold)
}

/// Rank existing item reports against a new one.
///
/// Same contract as [`match_persons`].
pub fn match_items<'a>(
    new_report: &ItemReport,
    existing: &'a [ItemReport],
) -> Vec<MatchCandidate<'a, ItemReport>> {
    match_items_above(new_report, existing, MATCH_THRESHOLD)
}

/// [`match_items`] with an explicit score threshold.
pub fn match_items_above<'a>(
    new_report: &ItemReport,
    existing: &'a [ItemReport],
    threshold: f64,
) -> Vec<MatchCandidate<'a, ItemReport>> {
    rank(new_report, existing, ITEM_FACTORS, threshold)
}

/// Validate that a configured match threshold lies in `[0.0, 1.0)`.
pub fn validate_threshold(threshold: f64) -> Result<(), CoreError> {
    if !(0.0..1.0).contains(&threshold) {
        return Err(CoreError::Validation(format!(
            "Match threshold must be at least 0 and below 1, got {threshold}"
        )));
    }
    Ok(())
}

/// Fraction of `new`'s keywords that have a near match among `existing`'s.
///
/// `None` when either description yields no keywords.
pub fn keyword_overlap(new: &str, existing: &str) -> Option<f64> {
    let new_keywords = extract_keywords(new);
    let existing_keywords = extract_keywords(existing);
    if new_keywords.is_empty() || existing_keywords.is_empty() {
        return None;
    }

    let matched = new_keywords
        .iter()
        .filter(|kw| {
            existing_keywords
                .iter()
                .any(|other| similarity(kw, other) > KEYWORD_SIMILARITY_THRESHOLD)
        })
        .count();

    Some(matched as f64 / new_keywords.len() as f64)
}

fn rank<'a, R: Matchable>(
    new_report: &R,
    existing: &'a [R],
    factors: &[Factor<R>],
    threshold: f64,
) -> Vec<MatchCandidate<'a, R>> {
    let mut candidates: Vec<MatchCandidate<'a, R>> = existing
        .iter()
        .filter(|candidate| candidate.report_type() != new_report.report_type())
        .filter_map(|candidate| {
            let score = pair_score(new_report, candidate, factors)?;
            (score > threshold).then_some(MatchCandidate {
                report: candidate,
                score,
            })
        })
        .collect();

    // Stable: equal scores keep snapshot order.
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(MAX_CANDIDATES);
    candidates
}

/// Mean contribution over the factors that fired, or `None` if none did.
fn pair_score<R>(new_report: &R, existing: &R, factors: &[Factor<R>]) -> Option<f64> {
    let (score, fired) = factors
        .iter()
        .filter_map(|factor| factor.contribution(new_report, existing))
        .fold((0.0, 0u32), |(sum, n), c| (sum + c, n + 1));

    (fired > 0).then(|| score / f64::from(fired))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
