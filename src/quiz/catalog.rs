//! Immutable quiz reference data: characters and questions.
//!
//! The catalog is built once at session start and validated at construction
//! time. Everything here is read-only for the rest of the session; running
//! scores live in the engine, never on the characters themselves.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// A character archetype the quiz can match the user against.
///
/// `icon` is an opaque presentation reference (a Lucide icon name in the
/// built-in data); the engine never interprets it. `traits` is flavor data
/// for the character pages and plays no part in scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub role: String,
    pub description: String,
    pub icon: String,
    pub traits: HashMap<String, u8>,
}

/// One selectable answer for a question.
///
/// `scores` maps character id to the points that character earns when this
/// option is picked. Keys must exist in the character catalog; values must
/// be non-negative. Both are enforced by [`Catalog::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    pub text: String,
    pub scores: HashMap<String, i32>,
}

/// A quiz question with its ordered options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// 1-based sequential id, matching display order.
    pub id: u32,
    pub text: String,
    pub image: Option<String>,
    pub options: Vec<QuestionOption>,
}

/// Catalog construction failures. These are load-time errors and abort
/// catalog construction; they are never produced at runtime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate character id '{0}'")]
    DuplicateCharacter(String),
    #[error("question {id} has {count} option(s), need at least 2")]
    TooFewOptions { id: u32, count: usize },
    #[error("question {question} scores unknown character '{id}'")]
    UnknownCharacter { question: u32, id: String },
    #[error("question {question} has a negative score for '{id}'")]
    NegativeScore { question: u32, id: String },
}

/// Validated, immutable quiz content.
#[derive(Debug, Clone)]
pub struct Catalog {
    characters: Vec<Character>,
    questions: Vec<Question>,
    /// Highest point value a single question can award one character.
    /// Used for percentage normalization in the result calculation.
    pub max_score_per_question: i32,
}

impl Catalog {
    /// Build a catalog, rejecting structurally invalid content.
    pub fn new(
        characters: Vec<Character>,
        questions: Vec<Question>,
        max_score_per_question: i32,
    ) -> Result<Self, CatalogError> {
        let mut seen: Vec<&str> = Vec::with_capacity(characters.len());
        for c in &characters {
            if seen.contains(&c.id.as_str()) {
                return Err(CatalogError::DuplicateCharacter(c.id.clone()));
            }
            seen.push(&c.id);
        }

        for q in &questions {
            if q.options.len() < 2 {
                return Err(CatalogError::TooFewOptions {
                    id: q.id,
                    count: q.options.len(),
                });
            }
            for opt in &q.options {
                for (id, points) in &opt.scores {
                    if !seen.contains(&id.as_str()) {
                        return Err(CatalogError::UnknownCharacter {
                            question: q.id,
                            id: id.clone(),
                        });
                    }
                    if *points < 0 {
                        return Err(CatalogError::NegativeScore {
                            question: q.id,
                            id: id.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self {
            characters,
            questions,
            max_score_per_question,
        })
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn character_by_id(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }
}
