//! Alien: Earth personality quiz — in-browser WASM engine.
//!
//! Exports `handle_request(method, path, query, body)` for the Web Worker
//! bridge to call. Uses `matchit` for URL routing — the same router engine
//! that powers Axum. The browser shell owns all rendering and calls these
//! routes for quiz state; handlers return JSON payloads, never HTML.
//!
//! Session state (current question, answers, per-character scores) lives in
//! a thread-local engine for the lifetime of the WASM module; progress
//! snapshots flow to localStorage through the persist/restore routes.

use wasm_bindgen::prelude::*;

pub mod quiz;
pub mod routes;

/// Process an HTTP-like request and return a JSON payload.
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method` — HTTP method (e.g., "GET", "POST")
/// * `path`   — URL path (e.g., "/api/quiz/question")
/// * `query`  — Query string (e.g., "?id=survivor")
/// * `body`   — Request body (POST form data or a raw snapshot blob).
///   Empty string for GET requests.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    // Build the router. matchit compiles route patterns into a radix tree.
    let mut router = matchit::Router::new();

    // Register routes — the value is a &str tag we match on below
    router.insert("/api/quiz/question", "question").ok();
    router.insert("/api/quiz/answer", "answer").ok();
    router.insert("/api/quiz/next", "next").ok();
    router.insert("/api/quiz/previous", "previous").ok();
    router.insert("/api/quiz/restart", "restart").ok();
    router.insert("/api/quiz/progress", "progress").ok();
    router.insert("/api/quiz/result", "result").ok();
    router.insert("/api/quiz/character", "character").ok();
    router.insert("/api/quiz/resume", "resume").ok();
    router.insert("/api/quiz/persist", "persist").ok();
    router.insert("/api/quiz/restore", "restore").ok();
    router.insert("/api/quiz/clear", "clear").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("question", "GET") => routes::quiz::handle_question_get(query),
            ("progress", "GET") => routes::quiz::handle_progress_get(query),
            ("result", "GET") => routes::quiz::handle_result_get(query),
            ("character", "GET") => routes::quiz::handle_character_get(query),
            ("persist", "GET") => routes::quiz::handle_persist_get(query),

            ("answer", "POST") => routes::quiz::handle_answer_post(body),
            ("next", "POST") => routes::quiz::handle_next_post(body),
            ("previous", "POST") => routes::quiz::handle_previous_post(body),
            ("restart", "POST") => routes::quiz::handle_restart_post(body),
            ("resume", "POST") => routes::quiz::handle_resume_post(body),
            ("restore", "POST") => routes::quiz::handle_restore_post(body),
            ("clear", "POST") => routes::quiz::handle_clear_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"{"error":"404 route not found"}"#.to_string()
}

fn method_not_allowed() -> String {
    r#"{"error":"405 method not allowed"}"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::session;
    use serde_json::Value;

    fn parse(payload: &str) -> Value {
        serde_json::from_str(payload).unwrap()
    }

    #[test]
    fn routes_question_get() {
        session::reset_session();
        let view = parse(&handle_request("GET", "/api/quiz/question", "", ""));
        assert_eq!(view["question"]["id"], 1);
        session::reset_session();
    }

    #[test]
    fn routes_answer_post() {
        session::reset_session();
        let view = parse(&handle_request("POST", "/api/quiz/answer", "", "option=0"));
        assert_eq!(view["answer"]["optionIndex"], 0);
        session::reset_session();
    }

    #[test]
    fn routes_character_get_with_query() {
        session::reset_session();
        let view = parse(&handle_request("GET", "/api/quiz/character", "?id=hybrid", ""));
        assert_eq!(view["name"], "Evolved Hybrid");
        session::reset_session();
    }

    #[test]
    fn returns_404_for_unknown_route() {
        let payload = handle_request("GET", "/api/nonexistent", "", "");
        assert!(payload.contains("404"));
    }

    #[test]
    fn returns_405_for_wrong_method() {
        let payload = handle_request("POST", "/api/quiz/question", "", "");
        assert!(payload.contains("405"));
        let payload = handle_request("GET", "/api/quiz/answer", "", "");
        assert!(payload.contains("405"));
    }

    #[test]
    fn routes_full_quiz_flow() {
        session::reset_session();
        for _ in 0..10 {
            handle_request("POST", "/api/quiz/answer", "", "option=1");
            handle_request("POST", "/api/quiz/next", "", "");
        }
        let result = parse(&handle_request("GET", "/api/quiz/result", "", ""));
        assert_eq!(result["character"]["id"], "synthetic");
        session::reset_session();
    }
}
