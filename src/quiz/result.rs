//! Final result calculation: best-match character and the full ranking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::catalog::{Catalog, Character};

/// One character's final standing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterStanding {
    pub character: Character,
    pub score: i32,
    pub percentage: i32,
}

/// The computed quiz outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    /// Best-match character. Ties go to the first one in catalog order.
    pub character: Character,
    pub compatibility_percentage: i32,
    /// Every character, sorted descending by score. The sort is stable, so
    /// tied characters keep their catalog order.
    pub all_scores: Vec<CharacterStanding>,
}

/// Percentage of the maximum reachable score, standard rounding.
fn percentage(score: i32, max_possible: i32) -> i32 {
    if max_possible <= 0 {
        return 0;
    }
    ((score as f64 / max_possible as f64) * 100.0).round() as i32
}

/// Compute the ranked result. `None` while the quiz is still in progress;
/// "not ready yet" is a normal state, not an error.
pub fn compute(
    catalog: &Catalog,
    scores: &HashMap<String, i32>,
    completed: bool,
) -> Option<QuizResult> {
    if !completed {
        return None;
    }

    let score_of = |c: &Character| scores.get(&c.id).copied().unwrap_or(0);

    // Strictly-greater comparison keeps the first maximum in catalog order.
    let winner = catalog
        .characters()
        .iter()
        .reduce(|best, c| if score_of(c) > score_of(best) { c } else { best })?;

    let max_possible = catalog.question_count() as i32 * catalog.max_score_per_question;

    let mut all_scores: Vec<CharacterStanding> = catalog
        .characters()
        .iter()
        .map(|c| CharacterStanding {
            character: c.clone(),
            score: score_of(c),
            percentage: percentage(score_of(c), max_possible),
        })
        .collect();
    all_scores.sort_by(|x, y| y.score.cmp(&x.score));

    Some(QuizResult {
        character: winner.clone(),
        compatibility_percentage: percentage(score_of(winner), max_possible),
        all_scores,
    })
}
