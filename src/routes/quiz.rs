//! `/api/quiz/*` routes — the engine-to-View boundary as JSON payloads.
//!
//! The browser shell (HTMX/JS, out of scope here) renders whatever these
//! handlers return; no HTML is produced on this side. The persist/restore
//! pair is the localStorage bridge: the shell mirrors the exported snapshot
//! blob into `localStorage` and posts it back on page load.

use serde::Serialize;

use crate::quiz::engine::QuizEngine;
use crate::quiz::session;
use crate::routes::util::{get_param, parse_form_body, parse_query};

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| r#"{"error":"serialization failed"}"#.into())
}

fn error(message: &str) -> String {
    json(&serde_json::json!({ "error": message }))
}

/// Current question, progress, and any recorded answer, in one payload.
fn question_view(quiz: &QuizEngine) -> String {
    json(&serde_json::json!({
        "question": quiz.current_question(),
        "progress": quiz.progress(),
        "answer": quiz.current_answer(),
    }))
}

// ── GET /api/quiz/question ─────────────────────────────────────────

pub fn handle_question_get(_query: &str) -> String {
    session::with_session(question_view)
}

// ── POST /api/quiz/answer ──────────────────────────────────────────

/// Body: `option={n}` — zero-based index into the current question's
/// options. Out-of-range indices are ignored by the engine; the returned
/// view simply shows no recorded answer.
pub fn handle_answer_post(body: &str) -> String {
    let params = parse_form_body(body);
    let Some(option_index) = get_param(&params, "option").and_then(|s| s.parse::<usize>().ok())
    else {
        return error("missing or invalid option parameter");
    };
    session::with_session_mut(|quiz| {
        quiz.answer_question(option_index);
        question_view(quiz)
    })
}

// ── POST /api/quiz/next ────────────────────────────────────────────

/// Advance the quiz. `hasMore: false` means the quiz just completed (or
/// already was); the shell switches to the result view.
pub fn handle_next_post(_body: &str) -> String {
    session::with_session_mut(|quiz| {
        let has_more = quiz.next_question();
        json(&serde_json::json!({
            "hasMore": has_more,
            "question": quiz.current_question(),
            "progress": quiz.progress(),
            "answer": quiz.current_answer(),
        }))
    })
}

// ── POST /api/quiz/previous ────────────────────────────────────────

pub fn handle_previous_post(_body: &str) -> String {
    session::with_session_mut(|quiz| {
        let moved = quiz.previous_question();
        json(&serde_json::json!({
            "moved": moved,
            "question": quiz.current_question(),
            "progress": quiz.progress(),
            "answer": quiz.current_answer(),
        }))
    })
}

// ── POST /api/quiz/restart ─────────────────────────────────────────

/// Start a fresh run: reset engine state and drop any saved snapshot.
pub fn handle_restart_post(_body: &str) -> String {
    session::with_session_mut(|quiz| {
        quiz.restart();
        quiz.clear_progress();
        question_view(quiz)
    })
}

// ── GET /api/quiz/progress ─────────────────────────────────────────

pub fn handle_progress_get(_query: &str) -> String {
    session::with_session(|quiz| json(&quiz.progress()))
}

// ── GET /api/quiz/result ───────────────────────────────────────────

/// JSON `null` while the quiz is still in progress; not an error.
pub fn handle_result_get(_query: &str) -> String {
    session::with_session(|quiz| json(&quiz.calculate_result()))
}

// ── GET /api/quiz/character ────────────────────────────────────────

/// Query: `id={character-id}` — character detail for the catalog pages.
pub fn handle_character_get(query: &str) -> String {
    let params = parse_query(query);
    let Some(id) = get_param(&params, "id").filter(|id| !id.is_empty()) else {
        return error("missing id parameter");
    };
    session::with_session(|quiz| match quiz.character_by_id(id) {
        Some(character) => json(character),
        None => error("unknown character id"),
    })
}

// ── POST /api/quiz/resume ──────────────────────────────────────────

/// Restore a saved session, if a usable snapshot exists in the store.
pub fn handle_resume_post(_body: &str) -> String {
    session::with_session_mut(|quiz| {
        let restored = quiz.load_progress();
        json(&serde_json::json!({
            "restored": restored,
            "question": quiz.current_question(),
            "progress": quiz.progress(),
            "answer": quiz.current_answer(),
        }))
    })
}

// ── GET /api/quiz/persist ──────────────────────────────────────────

/// Raw snapshot blob for the shell to mirror into localStorage.
/// JSON `null` when nothing is saved.
pub fn handle_persist_get(_query: &str) -> String {
    session::with_session(|quiz| quiz.export_progress_raw().unwrap_or_else(|| "null".into()))
}

// ── POST /api/quiz/restore ─────────────────────────────────────────

/// Inject a snapshot blob read back from localStorage on page load.
/// Body is the raw JSON blob.
pub fn handle_restore_post(body: &str) -> String {
    session::with_session_mut(|quiz| {
        let imported = quiz.import_progress_raw(body.trim());
        json(&serde_json::json!({ "imported": imported }))
    })
}

// ── POST /api/quiz/clear ───────────────────────────────────────────

pub fn handle_clear_post(_body: &str) -> String {
    session::with_session_mut(|quiz| {
        let cleared = quiz.clear_progress();
        json(&serde_json::json!({ "cleared": cleared }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(payload: &str) -> Value {
        serde_json::from_str(payload).unwrap()
    }

    #[test]
    fn question_get_returns_first_question_and_progress() {
        session::reset_session();
        let view = parse(&handle_question_get(""));
        assert_eq!(view["question"]["id"], 1);
        assert_eq!(view["progress"]["current"], 1);
        assert_eq!(view["progress"]["total"], 10);
        assert_eq!(view["answer"], Value::Null);
        session::reset_session();
    }

    #[test]
    fn answer_post_records_and_echoes_the_answer() {
        session::reset_session();
        let view = parse(&handle_answer_post("option=1"));
        assert_eq!(view["answer"]["optionIndex"], 1);
        assert_eq!(view["answer"]["questionId"], 1);
        session::reset_session();
    }

    #[test]
    fn answer_post_without_option_is_an_error() {
        session::reset_session();
        let view = parse(&handle_answer_post("option=lots"));
        assert!(view["error"].is_string());
        session::reset_session();
    }

    #[test]
    fn next_and_previous_move_the_position() {
        session::reset_session();
        handle_answer_post("option=0");
        let next = parse(&handle_next_post(""));
        assert_eq!(next["hasMore"], true);
        assert_eq!(next["progress"]["current"], 2);
        let back = parse(&handle_previous_post(""));
        assert_eq!(back["moved"], true);
        assert_eq!(back["progress"]["current"], 1);
        // Back at the first question: previous is a no-op.
        let stuck = parse(&handle_previous_post(""));
        assert_eq!(stuck["moved"], false);
        session::reset_session();
    }

    #[test]
    fn full_run_produces_a_result() {
        session::reset_session();
        for _ in 0..10 {
            handle_answer_post("option=0");
            handle_next_post("");
        }
        let progress = parse(&handle_progress_get(""));
        assert_eq!(progress["completed"], true);
        let result = parse(&handle_result_get(""));
        // Option 0 always favors the survivor in the built-in data.
        assert_eq!(result["character"]["id"], "survivor");
        assert_eq!(result["allScores"].as_array().unwrap().len(), 3);
        session::reset_session();
    }

    #[test]
    fn result_is_null_mid_quiz() {
        session::reset_session();
        handle_answer_post("option=0");
        assert_eq!(parse(&handle_result_get("")), Value::Null);
        session::reset_session();
    }

    #[test]
    fn restart_returns_to_a_clean_first_question() {
        session::reset_session();
        handle_answer_post("option=0");
        handle_next_post("");
        let view = parse(&handle_restart_post(""));
        assert_eq!(view["progress"]["current"], 1);
        assert_eq!(view["answer"], Value::Null);
        assert_eq!(handle_persist_get(""), "null");
        session::reset_session();
    }

    #[test]
    fn character_get_looks_up_by_id() {
        session::reset_session();
        let character = parse(&handle_character_get("?id=synthetic"));
        assert_eq!(character["name"], "Weyland Android");
        let missing = parse(&handle_character_get("?id=ripley"));
        assert!(missing["error"].is_string());
        let none = parse(&handle_character_get(""));
        assert!(none["error"].is_string());
        session::reset_session();
    }

    #[test]
    fn persist_restore_resume_round_trip() {
        session::reset_session();
        handle_answer_post("option=2");
        handle_next_post("");
        handle_answer_post("option=2");
        let blob = handle_persist_get("");
        assert_ne!(blob, "null");

        // New browser session: fresh engine, blob comes back from localStorage.
        session::reset_session();
        let imported = parse(&handle_restore_post(&blob));
        assert_eq!(imported["imported"], true);
        let resumed = parse(&handle_resume_post(""));
        assert_eq!(resumed["restored"], true);
        assert_eq!(resumed["progress"]["current"], 2);
        assert_eq!(resumed["answer"]["optionIndex"], 2);
        session::reset_session();
    }

    #[test]
    fn restore_refuses_garbage_and_resume_reports_nothing() {
        session::reset_session();
        let imported = parse(&handle_restore_post("not a snapshot {{{"));
        assert_eq!(imported["imported"], false);
        let resumed = parse(&handle_resume_post(""));
        assert_eq!(resumed["restored"], false);
        session::reset_session();
    }

    #[test]
    fn clear_post_removes_saved_progress() {
        session::reset_session();
        handle_answer_post("option=0");
        assert_ne!(handle_persist_get(""), "null");
        let cleared = parse(&handle_clear_post(""));
        assert_eq!(cleared["cleared"], true);
        assert_eq!(handle_persist_get(""), "null");
        session::reset_session();
    }
}
