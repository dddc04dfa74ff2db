//! Error types for grammar loading and parse driving.
//!
//! Analysis *conflicts* (LL(1) multiply-defined cells, LR shift/reduce and
//! reduce/reduce) are not represented here: per the conflict-handling
//! policy, they are not fatal and are returned as first-class data
//! alongside the table that contains them (see [`crate::ll1::Conflict`]
//! and [`crate::lr::table::conflicts`]).

use thiserror::Error;

/// Errors that halt loading or constructing a grammar.
#[derive(Error, Debug)]
pub enum GrammarError {
    /// The BNF tokenizer encountered a byte sequence matching none of its rules.
    #[error("unknown token at byte {pos}: {excerpt:?}")]
    UnknownToken { pos: usize, excerpt: String },

    /// A production's right-hand side parsed to zero symbols.
    #[error("empty right-hand side in production for nonterminal {nonterminal}")]
    EmptyRhs { nonterminal: String },

    /// `:=` was expected but something else (or nothing) followed a nonterminal.
    #[error("expected ':=' after nonterminal {found:?}")]
    MissingAssign { found: String },

    /// Input ended in the middle of a production.
    #[error("unexpected end of input while parsing a production")]
    UnexpectedEof,

    /// A nonterminal was expected at the head of a production but something else was found.
    #[error("nonterminal expected, got {0:?}")]
    NonterminalExpected(String),

    /// The grammar source had no productions at all.
    #[error("grammar has no productions")]
    EmptyGrammar,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-local result alias for loading/construction.
pub type Result<T> = std::result::Result<T, GrammarError>;

/// Errors that halt a parse driver (LL(1) or LR) partway through, without
/// aborting the process — see spec §7, "Driver errors during parse".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// No action exists for `(state, lookahead)` in an LR table.
    #[error("no action for state {state} on symbol '{symbol}' at input position {cursor}")]
    NoAction {
        state: usize,
        symbol: String,
        cursor: usize,
    },

    /// A `Goto` that an LR reduce step expects to exist is missing.
    #[error("expected goto from state {state} on nonterminal '{symbol}', but none exists")]
    MissingGoto { state: usize, symbol: String },

    /// The LL(1) stack's top terminal did not match the current input symbol.
    #[error("expected terminal '{expected}', found '{found}' at input position {cursor}")]
    UnexpectedToken {
        expected: String,
        found: String,
        cursor: usize,
    },

    /// No LL(1) table cell exists for `(nonterminal, lookahead)`.
    #[error("no table entry for nonterminal '{nonterminal}' with lookahead '{lookahead}'")]
    NoLl1Entry {
        nonterminal: String,
        lookahead: String,
    },
}

/// Crate-local result alias for parse drivers.
pub type DriverResult<T> = std::result::Result<T, DriverError>;
