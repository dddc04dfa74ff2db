//! The LR parse driver: a two-stack (state, symbol) shift-reduce machine
//! that runs over any table produced by [`super::table::build_table`].

use super::table::{Action, Table};
use crate::error::{DriverError, DriverResult};
use crate::symbol::{string_to_symbols, symbols_to_string, Symbol};
use crate::trace::TraceRow;

/// Observes the driver's steps. Fires once per loop iteration, *before*
/// `action` is dispatched, with a snapshot of both stacks and the
/// remaining (unconsumed) input (spec §4.7). All methods default to
/// no-ops; implement only what a caller cares about (tracing, debugging).
pub trait Trace {
    fn on_step(
        &mut self,
        _action: &Action,
        _state_stack: &[usize],
        _symbol_stack: &[Symbol],
        _remaining: &[Symbol],
    ) {
    }
}

/// A [`Trace`] that observes nothing.
pub struct NoTrace;
impl Trace for NoTrace {}

/// Collects a step-by-step parse trace as the driver runs, rendering rows
/// with [`crate::trace::format_trace`] (spec §6 "parse traces"). The
/// stack column interleaves states and symbols bottom-to-top
/// (`I0 sym0 I1 sym1 ... Itop`), the conventional way an LR parse trace is
/// laid out.
#[derive(Default)]
pub struct TraceRecorder {
    rows: Vec<TraceRow>,
}

impl TraceRecorder {
    /// The rows recorded so far, in the order the driver produced them.
    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }
}

impl Trace for TraceRecorder {
    fn on_step(
        &mut self,
        action: &Action,
        state_stack: &[usize],
        symbol_stack: &[Symbol],
        remaining: &[Symbol],
    ) {
        let mut parts = Vec::with_capacity(state_stack.len() + symbol_stack.len());
        for (state, symbol) in state_stack.iter().zip(symbol_stack.iter()) {
            parts.push(format!("I{state}"));
            parts.push(symbol.to_string());
        }
        parts.push(format!("I{}", state_stack.last().copied().unwrap_or(0)));

        let action_str = match action {
            Action::Shift(dest) => format!("shift I{dest}"),
            Action::Reduce(production) => format!("reduce {production}"),
            Action::Accept => "accept".to_string(),
        };

        self.rows.push(TraceRow {
            input: symbols_to_string(remaining),
            stack: parts.join(" "),
            action: action_str,
        });
    }
}

/// Drives `table` over `input`, shifting terminals and reducing by
/// productions until the unique `Accept` action fires or the driver hits a
/// cell with no action, a conflicting cell (ambiguous — rejected rather
/// than guessed), or a missing goto.
///
/// On a conflicting cell, the *first* captured action is attempted,
/// matching the convention that conflicts are reported separately (spec
/// §7) rather than silently resolved by the driver; callers that built a
/// table with conflicts should inspect [`Table::conflicts`] before parsing.
pub fn parse(table: &Table, input: &str, trace: &mut impl Trace) -> DriverResult<()> {
    let mut symbols = string_to_symbols(input);
    symbols.push(Symbol::end_marker());

    let mut state_stack: Vec<usize> = vec![0];
    let mut symbol_stack: Vec<Symbol> = Vec::new();
    let mut cursor = 0;

    loop {
        let state = *state_stack.last().expect("state stack is never empty");
        let lookahead = symbols[cursor].clone();

        let action = table.actions(state, &lookahead).first().cloned().ok_or(
            DriverError::NoAction {
                state,
                symbol: lookahead.to_string(),
                cursor,
            },
        )?;

        trace.on_step(&action, &state_stack, &symbol_stack, &symbols[cursor..]);

        match action {
            Action::Shift(dest) => {
                state_stack.push(dest);
                symbol_stack.push(lookahead);
                cursor += 1;
            }
            Action::Reduce(production) => {
                let pop_count = production.effective_len();
                for _ in 0..pop_count {
                    state_stack.pop();
                    symbol_stack.pop();
                }
                let back = *state_stack.last().expect("state stack is never empty");
                let dest = table.goto(back, &production.head).ok_or_else(|| {
                    DriverError::MissingGoto {
                        state: back,
                        symbol: production.head.to_string(),
                    }
                })?;
                state_stack.push(dest);
                symbol_stack.push(production.head.clone());
            }
            Action::Accept => {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first_follow::compute_first_sets;
    use crate::grammar::Grammar;
    use crate::lr::automaton::{augment, build};
    use crate::lr::table::build_table;
    use crate::lr::variant::LrVariant;
    use indexmap::IndexMap;
    use std::collections::HashSet;

    fn sym(s: &str) -> Symbol {
        Symbol::new(s)
    }

    /// S -> C C
    /// C -> c C | d
    fn cc_grammar() -> Grammar {
        let terminals: HashSet<Symbol> = ["c", "d"].iter().map(|s| sym(s)).collect();
        let mut g = Grammar::new(sym("S"), terminals, IndexMap::new());
        g.add_production(sym("S"), vec![sym("C"), sym("C")]);
        g.add_production(sym("C"), vec![sym("c"), sym("C")]);
        g.add_production(sym("C"), vec![sym("d")]);
        g
    }

    #[test]
    fn lr1_driver_accepts_valid_input() {
        let original = cc_grammar();
        let augmented = augment(&original);
        let first = compute_first_sets(&augmented);
        let variant = LrVariant::Lr1(&first);
        let automaton = build(&augmented, &variant);
        let table = build_table(&augmented, &automaton, &variant);

        assert!(parse(&table, "c d d", &mut NoTrace).is_ok());
        assert!(parse(&table, "d d", &mut NoTrace).is_ok());
    }

    #[test]
    fn lr1_driver_rejects_invalid_input() {
        let original = cc_grammar();
        let augmented = augment(&original);
        let first = compute_first_sets(&augmented);
        let variant = LrVariant::Lr1(&first);
        let automaton = build(&augmented, &variant);
        let table = build_table(&augmented, &automaton, &variant);

        assert!(parse(&table, "c c", &mut NoTrace).is_err());
    }

    #[test]
    fn trace_recorder_emits_one_row_per_step_and_ends_in_accept() {
        let original = cc_grammar();
        let augmented = augment(&original);
        let first = compute_first_sets(&augmented);
        let variant = LrVariant::Lr1(&first);
        let automaton = build(&augmented, &variant);
        let table = build_table(&augmented, &automaton, &variant);

        let mut recorder = TraceRecorder::default();
        parse(&table, "d d", &mut recorder).unwrap();

        let rows = recorder.rows();
        assert!(!rows.is_empty());
        assert_eq!(rows.last().unwrap().action, "accept");
    }
}
