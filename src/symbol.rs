//! Symbol type for context-free grammars.
//!
//! A [`Symbol`] is an opaque, string-backed identifier. Whether a symbol is
//! a terminal or a nonterminal is *not* part of the type — it is a fact
//! about a particular [`crate::grammar::Grammar`] (see its `is_terminal`
//! and `is_nonterminal` methods). Two sentinel symbols are reserved by
//! convention: `@` for the empty string (ε) and `$` for end-of-input.
//! Neither sentinel may appear on a nonterminal's left-hand side.

use std::fmt;
use std::rc::Rc;

/// The reserved spelling of the empty string (ε).
pub const EPSILON: &str = "@";
/// The reserved spelling of the end-of-input marker.
pub const END_MARKER: &str = "$";

/// An opaque grammar symbol, cheap to clone and compare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Rc<str>);

impl Symbol {
    /// Builds a symbol from any string-like value.
    pub fn new(s: impl AsRef<str>) -> Self {
        Symbol(Rc::from(s.as_ref()))
    }

    /// The `@` sentinel.
    pub fn epsilon() -> Self {
        Symbol::new(EPSILON)
    }

    /// The `$` sentinel.
    pub fn end_marker() -> Self {
        Symbol::new(END_MARKER)
    }

    /// Whether this symbol is the `@` sentinel.
    pub fn is_epsilon(&self) -> bool {
        &*self.0 == EPSILON
    }

    /// Whether this symbol is the `$` sentinel.
    pub fn is_end_marker(&self) -> bool {
        &*self.0 == END_MARKER
    }

    /// Borrows the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_epsilon() {
            write!(f, "ε")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::new(s)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Converts a whitespace-separated token stream into symbols.
///
/// Used for the token-stream input of parse drivers (§6): a sequence of
/// terminal symbols separated by whitespace, end-of-input implied.
pub fn string_to_symbols(s: &str) -> Vec<Symbol> {
    s.split_whitespace().map(Symbol::new).collect()
}

/// Joins a sequence of symbols back into a whitespace-separated string.
pub fn symbols_to_string(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
