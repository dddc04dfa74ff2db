//! LL(1) parse table construction and the LL(1) predictive parse driver.

use crate::error::{DriverError, DriverResult};
use crate::first_follow::{first_of_string, FirstSets, FollowSets};
use crate::grammar::{Grammar, Production};
use crate::symbol::{string_to_symbols, symbols_to_string, Symbol};
use crate::trace::TraceRow;
use std::collections::HashMap;

/// All productions competing for one `(nonterminal, lookahead)` cell.
///
/// A cell with more than one production is a conflict; conflicts are
/// captured as data here rather than raised as an error (spec §7).
pub type Cell = Vec<Production>;

/// The LL(1) parse table: `M[A, a]`.
#[derive(Debug, Default)]
pub struct Table {
    cells: HashMap<(Symbol, Symbol), Cell>,
}

impl Table {
    pub fn get(&self, nonterminal: &Symbol, lookahead: &Symbol) -> Option<&[Production]> {
        self.cells
            .get(&(nonterminal.clone(), lookahead.clone()))
            .map(Vec::as_slice)
    }

    /// Every populated cell, keyed by `(nonterminal, lookahead)`.
    pub fn cells(&self) -> impl Iterator<Item = (&(Symbol, Symbol), &Cell)> {
        self.cells.iter()
    }

    /// All conflicting cells, i.e. those with more than one production.
    pub fn conflicts(&self) -> Vec<Conflict> {
        self.cells
            .iter()
            .filter(|(_, productions)| productions.len() > 1)
            .map(|((nonterminal, lookahead), productions)| Conflict {
                nonterminal: nonterminal.clone(),
                lookahead: lookahead.clone(),
                productions: productions.clone(),
            })
            .collect()
    }

    fn insert(&mut self, nonterminal: Symbol, lookahead: Symbol, production: Production) {
        self.cells
            .entry((nonterminal, lookahead))
            .or_default()
            .push(production);
    }
}

/// A single conflicting cell: more than one production predicted for the
/// same `(nonterminal, lookahead)` pair.
#[derive(Debug, Clone)]
pub struct Conflict {
    pub nonterminal: Symbol,
    pub lookahead: Symbol,
    pub productions: Vec<Production>,
}

/// Builds the LL(1) parse table for `grammar`.
///
/// For each production `A → α`: every terminal in `FIRST(α)` gets a cell
/// `M[A, a] = A → α`; if `@ ∈ FIRST(α)`, every terminal in `FOLLOW(A)` (and
/// `$` if present there) *also* gets a cell for `A → α` — mirroring the
/// source construction exactly, with no special-casing when both rules
/// would populate the same cell (see spec §9, open question 1).
pub fn build_table(grammar: &Grammar, first_sets: &FirstSets, follow_sets: &FollowSets) -> Table {
    let mut table = Table::default();

    for production in grammar.all_productions() {
        let head = &production.head;
        let first_alpha = first_of_string(first_sets, &production.body);

        for symbol in first_alpha.iter().filter(|s| !s.is_epsilon()) {
            table.insert(head.clone(), symbol.clone(), production.clone());
        }

        if first_alpha.contains(&Symbol::epsilon()) {
            let follow_head = follow_sets.get(head).cloned().unwrap_or_default();
            for symbol in &follow_head {
                table.insert(head.clone(), symbol.clone(), production.clone());
            }
        }
    }

    let conflicts = table.conflicts();
    if !conflicts.is_empty() {
        log::warn!("LL(1) table has {} conflicting cell(s)", conflicts.len());
    }

    table
}

/// Observes the predictive driver's steps. All methods default to no-ops;
/// implement only the ones a caller cares about (tracing, debugging). Each
/// callback is given the stack and remaining input *after* the step it
/// reports, so a [`Trace`] can reconstruct a full input/stack/action trace
/// without re-deriving state from the driver.
pub trait Trace {
    fn on_start(&mut self, _stack: &[Symbol], _remaining: &[Symbol]) {}
    fn on_match(&mut self, _terminal: &Symbol, _stack: &[Symbol], _remaining: &[Symbol]) {}
    fn on_expand(
        &mut self,
        _nonterminal: &Symbol,
        _production: &Production,
        _stack: &[Symbol],
        _remaining: &[Symbol],
    ) {
    }
}

/// A [`Trace`] that observes nothing.
pub struct NoTrace;
impl Trace for NoTrace {}

/// Collects a step-by-step parse trace as the driver runs, rendering rows
/// with [`crate::trace::format_trace`] (spec §6 "parse traces").
#[derive(Default)]
pub struct TraceRecorder {
    rows: Vec<TraceRow>,
}

impl TraceRecorder {
    /// The rows recorded so far, in the order the driver produced them.
    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }

    fn record(&mut self, stack: &[Symbol], remaining: &[Symbol], action: String) {
        let stack = stack.iter().rev().map(Symbol::to_string).collect::<Vec<_>>().join(" ");
        self.rows.push(TraceRow {
            input: symbols_to_string(remaining),
            stack,
            action,
        });
    }
}

impl Trace for TraceRecorder {
    fn on_start(&mut self, stack: &[Symbol], remaining: &[Symbol]) {
        self.record(stack, remaining, String::new());
    }

    fn on_match(&mut self, terminal: &Symbol, stack: &[Symbol], remaining: &[Symbol]) {
        self.record(stack, remaining, format!("match {terminal}"));
    }

    fn on_expand(
        &mut self,
        _nonterminal: &Symbol,
        production: &Production,
        stack: &[Symbol],
        remaining: &[Symbol],
    ) {
        self.record(stack, remaining, format!("output {production}"));
    }
}

/// Drives a stack-based LL(1) predictive parse over `input` using `table`.
///
/// Initializes the stack to `[$, start]`, then at each step: matches a
/// terminal against the stack top, or looks up `table[top, lookahead]` for
/// a nonterminal top and pushes its body (reversed, `@`-bodies pushing
/// nothing). Returns `Ok(())` on acceptance (both stack and input consumed)
/// or the first [`DriverError`] encountered.
pub fn parse(
    grammar: &Grammar,
    table: &Table,
    input: &str,
    trace: &mut impl Trace,
) -> DriverResult<()> {
    let mut symbols = string_to_symbols(input);
    symbols.push(Symbol::end_marker());

    let mut stack = vec![Symbol::end_marker(), grammar.start().clone()];
    trace.on_start(&stack, &symbols);

    let mut cursor = 0;
    while let Some(top) = stack.last().cloned() {
        let lookahead = symbols
            .get(cursor)
            .cloned()
            .unwrap_or_else(Symbol::end_marker);

        if top == lookahead {
            stack.pop();
            cursor += 1;
            trace.on_match(&top, &stack, &symbols[cursor..]);
            continue;
        }

        if grammar.is_nonterminal(&top) {
            match table.get(&top, &lookahead) {
                Some([production, ..]) => {
                    let production = production.clone();
                    stack.pop();
                    if !production.is_epsilon() {
                        for symbol in production.body.iter().rev() {
                            stack.push(symbol.clone());
                        }
                    }
                    trace.on_expand(&top, &production, &stack, &symbols[cursor..]);
                }
                None => {
                    return Err(DriverError::NoLl1Entry {
                        nonterminal: top.to_string(),
                        lookahead: lookahead.to_string(),
                    });
                }
            }
        } else {
            return Err(DriverError::UnexpectedToken {
                expected: top.to_string(),
                found: lookahead.to_string(),
                cursor,
            });
        }
    }

    if cursor == symbols.len() {
        Ok(())
    } else {
        Err(DriverError::UnexpectedToken {
            expected: Symbol::end_marker().to_string(),
            found: symbols[cursor].to_string(),
            cursor,
        })
    }
}
