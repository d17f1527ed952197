//! Quiz progression and scoring engine.
//!
//! Owns all mutable session state: current position, recorded answers,
//! running per-character scores, and the completion flag. Scores live in an
//! engine-owned map keyed by character id; the catalog stays immutable and
//! callers only ever see copies.
//!
//! Runtime input errors follow the leniency policy of the UI boundary: an
//! out-of-range option or an operation after completion is ignored with a
//! log diagnostic, never an error. Catalog problems, by contrast, are
//! rejected loudly at construction (see [`super::catalog`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::catalog::{Catalog, Character, Question};
use super::result::{self, QuizResult};
use super::storage::StorageManager;

/// Storage key for the progress snapshot, under the manager's namespace.
pub const PROGRESS_KEY: &str = "progress";

/// A recorded answer: the selected option with a snapshot of its score map,
/// so reversal works even if it outlives the question it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: u32,
    pub option_index: usize,
    pub option_text: String,
    pub scores: HashMap<String, i32>,
}

/// Progress summary for the View's progress bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// 1-based number of the question being viewed.
    pub current: usize,
    pub total: usize,
    pub percentage: i32,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterScore {
    pub id: String,
    pub score: i32,
}

/// Full session snapshot, persisted after every recorded answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub current_question_index: usize,
    /// Sparse answer sequence; a cleared or never-answered slot is `null`.
    pub user_answers: Vec<Option<Answer>>,
    pub character_scores: Vec<CharacterScore>,
    pub timestamp: DateTime<Utc>,
}

/// The quiz state machine: NotStarted → InProgress → Completed.
pub struct QuizEngine {
    catalog: Catalog,
    current_index: usize,
    answers: Vec<Option<Answer>>,
    scores: HashMap<String, i32>,
    completed: bool,
    storage: StorageManager,
}

impl QuizEngine {
    pub fn new(catalog: Catalog, storage: StorageManager) -> Self {
        let scores = catalog
            .characters()
            .iter()
            .map(|c| (c.id.clone(), 0))
            .collect();
        Self {
            catalog,
            current_index: 0,
            answers: Vec::new(),
            scores,
            completed: false,
            storage,
        }
    }

    /// Engine over the built-in catalog and an in-memory store.
    pub fn with_builtin_catalog() -> Self {
        Self::new(Catalog::builtin(), StorageManager::in_memory())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The question being viewed, or `None` past the end of the catalog.
    /// The transitions never move the index past the last question, but an
    /// empty catalog or a bad restored index must not panic.
    pub fn current_question(&self) -> Option<&Question> {
        self.catalog.question(self.current_index)
    }

    pub fn has_current_answer(&self) -> bool {
        self.current_answer().is_some()
    }

    pub fn current_answer(&self) -> Option<&Answer> {
        self.answers.get(self.current_index).and_then(Option::as_ref)
    }

    pub fn character_by_id(&self, id: &str) -> Option<&Character> {
        self.catalog.character_by_id(id)
    }

    /// Running score for a character; 0 for unknown ids.
    pub fn score_of(&self, id: &str) -> i32 {
        self.scores.get(id).copied().unwrap_or(0)
    }

    pub fn progress(&self) -> Progress {
        let total = self.catalog.question_count();
        let current = self.current_index + 1;
        let percentage = if total == 0 {
            0
        } else {
            ((current as f64 / total as f64) * 100.0).round() as i32
        };
        Progress {
            current,
            total,
            percentage,
            completed: self.completed,
        }
    }

    /// Record (or replace) the answer for the current question and apply its
    /// score map. Invalid input is ignored; malformed UI events must not
    /// break a running session.
    pub fn answer_question(&mut self, option_index: usize) {
        if self.completed {
            log::warn!("ignoring answer: quiz already completed");
            return;
        }
        let answer = {
            let Some(question) = self.catalog.question(self.current_index) else {
                log::warn!("ignoring answer: no question at index {}", self.current_index);
                return;
            };
            let Some(option) = question.options.get(option_index) else {
                log::warn!(
                    "ignoring answer: option {option_index} out of range for question {}",
                    question.id
                );
                return;
            };
            Answer {
                question_id: question.id,
                option_index,
                option_text: option.text.clone(),
                scores: option.scores.clone(),
            }
        };

        if self.answers.len() <= self.current_index {
            self.answers.resize(self.current_index + 1, None);
        }
        // Re-answering on the same visit replaces, never accumulates:
        // reverse the prior contribution before applying the new one.
        if let Some(previous) = self.answers[self.current_index].take() {
            self.apply_scores(&previous.scores, -1);
        }
        self.apply_scores(&answer.scores, 1);
        self.answers[self.current_index] = Some(answer);

        self.save_progress();
    }

    /// Advance to the next question. Returns true while more questions
    /// remain; the false return is the sole transition into Completed, and
    /// it discards the saved snapshot so a finished run never resumes.
    pub fn next_question(&mut self) -> bool {
        let total = self.catalog.question_count();
        if self.current_index + 1 < total {
            self.current_index += 1;
            true
        } else {
            if !self.completed {
                self.completed = true;
                self.clear_progress();
            }
            false
        }
    }

    /// Step back one question. Reverses and clears the answer at the current
    /// index first, so scores only ever reflect answers at or before the
    /// position being viewed. Returns false (no mutation) at index 0.
    pub fn previous_question(&mut self) -> bool {
        if self.completed {
            log::warn!("ignoring previous_question: quiz already completed");
            return false;
        }
        if self.current_index == 0 {
            return false;
        }
        if let Some(answer) = self.answers.get_mut(self.current_index).and_then(Option::take) {
            self.apply_scores(&answer.scores, -1);
        }
        self.current_index -= 1;
        true
    }

    /// Reset to a fresh session. Valid from any state.
    pub fn restart(&mut self) {
        self.current_index = 0;
        self.answers.clear();
        self.completed = false;
        for score in self.scores.values_mut() {
            *score = 0;
        }
    }

    /// Final ranked result; `None` until the quiz is completed.
    pub fn calculate_result(&self) -> Option<QuizResult> {
        result::compute(&self.catalog, &self.scores, self.completed)
    }

    /// Persist the current session snapshot. False when the store rejects
    /// the write; the session continues unpersisted.
    pub fn save_progress(&mut self) -> bool {
        let snapshot = ProgressSnapshot {
            current_question_index: self.current_index,
            user_answers: self.answers.clone(),
            character_scores: self
                .catalog
                .characters()
                .iter()
                .map(|c| CharacterScore {
                    id: c.id.clone(),
                    score: self.score_of(&c.id),
                })
                .collect(),
            timestamp: Utc::now(),
        };
        self.storage.save(PROGRESS_KEY, &snapshot)
    }

    /// Restore a saved session. Best-effort: the index is clamped to the
    /// catalog, surplus answer slots are dropped, score entries for unknown
    /// character ids are ignored and missing characters keep 0. Returns
    /// false when no usable snapshot exists.
    pub fn load_progress(&mut self) -> bool {
        let Some(snapshot) = self.storage.load::<ProgressSnapshot>(PROGRESS_KEY) else {
            return false;
        };

        let total = self.catalog.question_count();
        self.current_index = snapshot.current_question_index.min(total.saturating_sub(1));
        let mut answers = snapshot.user_answers;
        answers.truncate(total);
        self.answers = answers;
        self.completed = false;

        for score in self.scores.values_mut() {
            *score = 0;
        }
        for entry in snapshot.character_scores {
            match self.scores.get_mut(&entry.id) {
                Some(slot) => *slot = entry.score,
                None => log::warn!("snapshot references unknown character '{}'", entry.id),
            }
        }
        true
    }

    /// Drop the saved snapshot. Called when starting fresh and on completion.
    pub fn clear_progress(&mut self) -> bool {
        self.storage.remove(PROGRESS_KEY)
    }

    /// Raw snapshot blob for the JS localStorage bridge.
    pub fn export_progress_raw(&self) -> Option<String> {
        self.storage.export_raw(PROGRESS_KEY)
    }

    /// Inject a raw snapshot blob from the JS localStorage bridge.
    pub fn import_progress_raw(&mut self, raw: &str) -> bool {
        self.storage.import_raw(PROGRESS_KEY, raw)
    }

    fn apply_scores(&mut self, scores: &HashMap<String, i32>, sign: i32) {
        for (id, points) in scores {
            // Unknown ids can only come from a restored foreign snapshot.
            if let Some(score) = self.scores.get_mut(id) {
                *score += sign * points;
            }
        }
    }
}
