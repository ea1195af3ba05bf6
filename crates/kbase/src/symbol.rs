use std::{collections::HashMap, fmt, sync::Mutex};

use crate::{arena::StrArena, session::with_session_globals};

/// An interned name. Symbols are only meaningful inside the session that
/// created them, see [`crate::session`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    const fn new(n: u32) -> Self {
        Symbol(n)
    }

    /// Maps a string to its interned representation.
    pub fn intern(string: &str) -> Self {
        with_session_globals(|session_globals| session_globals.symbol_interner.intern(string))
    }

    /// Whether `string` has been interned in the current session.
    pub fn is_interned(string: &str) -> bool {
        with_session_globals(|session_globals| session_globals.symbol_interner.contains(string))
    }

    /// Interns `{base}{n}` for the next `n` produced by `counter` such that
    /// the name was not known to the session before.
    pub fn fresh(base: &str, counter: &mut u32) -> Self {
        loop {
            *counter += 1;
            let name = format!("{}{}", base, counter);
            if !Symbol::is_interned(&name) {
                return Symbol::intern(&name);
            }
        }
    }

    /// Access the underlying string. This is a slowish operation because it
    /// requires locking the symbol interner.
    ///
    /// Note that the lifetime of the return value is a lie. It's not the same
    /// as `&self`, but actually tied to the lifetime of the session's
    /// interner. Sessions outlive everything created inside them, so in
    /// practice it works out ok.
    pub fn as_str(&self) -> &str {
        with_session_globals(|session_globals| unsafe {
            std::mem::transmute::<&str, &str>(session_globals.symbol_interner.get(*self))
        })
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

#[derive(Default)]
pub(crate) struct Interner(Mutex<InternerInner>);

#[derive(Default)]
struct InternerInner {
    arena: StrArena,
    names: HashMap<&'static str, Symbol>,
    strings: Vec<&'static str>,
}

impl Interner {
    pub fn fresh() -> Self {
        Self {
            ..Default::default()
        }
    }

    #[inline]
    fn intern(&self, string: &str) -> Symbol {
        let mut inner = self.0.lock().unwrap();
        if let Some(&name) = inner.names.get(string) {
            return name;
        }

        let name = Symbol::new(inner.strings.len() as u32);

        let string = inner.arena.alloc_str(string);

        // SAFETY: we can extend the arena allocation to `'static` because we
        // only access these while the arena is still alive.
        let string: &'static str = unsafe { &*(string as *const str) };
        inner.strings.push(string);
        inner.names.insert(string, name);
        name
    }

    fn contains(&self, string: &str) -> bool {
        self.0.lock().unwrap().names.contains_key(string)
    }

    // Get the symbol as a string. `Symbol::as_str()` should be used in
    // preference to this function.
    fn get(&self, symbol: Symbol) -> &str {
        self.0.lock().unwrap().strings[symbol.0 as usize]
    }
}

mod serde {
    use super::Symbol;
    use ::serde::de::{Deserializer, Error, Visitor};
    use std::fmt;

    struct SymbolVisitor;

    impl<'a> Visitor<'a> for SymbolVisitor {
        type Value = Symbol;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Symbol::intern(v))
        }

        fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Symbol::intern(&v))
        }
    }

    impl From<&str> for Symbol {
        fn from(s: &str) -> Self {
            Symbol::intern(s)
        }
    }

    impl serde::Serialize for Symbol {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(self.as_str())
        }
    }

    impl<'de> serde::Deserialize<'de> for Symbol {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_str(SymbolVisitor)
        }
    }
}
