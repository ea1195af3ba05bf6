use crate::symbol::Interner;

/// Per-session global state. Everything that hands out [`crate::Symbol`]s
/// lives here.
pub struct SessionGlobals {
    pub(crate) symbol_interner: Interner,
}

impl SessionGlobals {
    fn new() -> Self {
        Self {
            symbol_interner: Interner::fresh(),
        }
    }
}

scoped_tls::scoped_thread_local!(static SESSION_GLOBALS: SessionGlobals);

/// Runs `f` inside a session. Nested calls reuse the enclosing session, so
/// symbols created by the caller stay valid.
pub fn session<R>(f: impl FnOnce() -> R) -> R {
    if SESSION_GLOBALS.is_set() {
        f()
    } else {
        let session_globals = SessionGlobals::new();
        SESSION_GLOBALS.set(&session_globals, f)
    }
}

pub(crate) fn with_session_globals<R, F>(f: F) -> R
where
    F: FnOnce(&SessionGlobals) -> R,
{
    SESSION_GLOBALS.with(f)
}
