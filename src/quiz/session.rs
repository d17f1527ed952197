//! Thread-local quiz session container.
//!
//! Uses `thread_local!` + `RefCell` for safe mutable access in single-threaded
//! WASM. The Web Worker keeps the WASM module alive, so the engine persists
//! across `handle_request` calls for the entire browser session.

use std::cell::RefCell;

use super::engine::QuizEngine;

thread_local! {
    static SESSION: RefCell<QuizEngine> = RefCell::new(QuizEngine::with_builtin_catalog());
}

/// Execute a closure with read access to the session engine.
pub fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(&QuizEngine) -> R,
{
    SESSION.with(|s| f(&s.borrow()))
}

/// Execute a closure with mutable access to the session engine.
pub fn with_session_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut QuizEngine) -> R,
{
    SESSION.with(|s| f(&mut s.borrow_mut()))
}

/// Replace the session with a brand-new engine (fresh state, empty store).
pub fn reset_session() {
    SESSION.with(|s| {
        *s.borrow_mut() = QuizEngine::with_builtin_catalog();
    });
}
