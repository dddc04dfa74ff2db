//! Pretty-printers for grammars, FIRST/FOLLOW sets, and LL(1)/LR tables.
//!
//! Every printer here takes read-only views and renders symbols in a
//! stable, sorted order (spec §5) — output never depends on `HashMap`
//! iteration order.

use crate::first_follow::{FirstSets, FollowSets};
use crate::grammar::{Grammar, Production};
use crate::ll1;
use crate::lr::{Action, Automaton, Table as LrTable, TableConflict};
use crate::symbol::Symbol;
use std::fmt::Write as _;

fn sorted_symbols<'a>(symbols: impl Iterator<Item = &'a Symbol>) -> Vec<&'a Symbol> {
    let mut v: Vec<&Symbol> = symbols.collect();
    v.sort_by_key(|s| s.as_str().to_string());
    v
}

/// Renders the grammar's productions, one per line, in declaration order.
pub fn format_grammar(grammar: &Grammar) -> String {
    grammar.to_string()
}

/// Renders `FIRST(X)` for every nonterminal, symbols sorted by name.
pub fn format_first_sets(grammar: &Grammar, first_sets: &FirstSets) -> String {
    let mut out = String::new();
    for nonterminal in grammar.nonterminals() {
        let set = first_sets.get(nonterminal).cloned().unwrap_or_default();
        let symbols = sorted_symbols(set.iter());
        let rendered: Vec<String> = symbols.iter().map(|s| s.to_string()).collect();
        let _ = writeln!(out, "FIRST({}) = {{{}}}", nonterminal, rendered.join(", "));
    }
    out
}

/// Renders `FOLLOW(A)` for every nonterminal, symbols sorted by name.
pub fn format_follow_sets(grammar: &Grammar, follow_sets: &FollowSets) -> String {
    let mut out = String::new();
    for nonterminal in grammar.nonterminals() {
        let set = follow_sets.get(nonterminal).cloned().unwrap_or_default();
        let symbols = sorted_symbols(set.iter());
        let rendered: Vec<String> = symbols.iter().map(|s| s.to_string()).collect();
        let _ = writeln!(out, "FOLLOW({}) = {{{}}}", nonterminal, rendered.join(", "));
    }
    out
}

/// Renders the LL(1) table, one `M[A, a]` cell per populated entry, rows
/// sorted by nonterminal then lookahead.
pub fn format_ll1_table(table: &ll1::Table) -> String {
    let mut cells: Vec<_> = table.cells().collect();
    cells.sort_by(|a, b| {
        (a.0 .0.as_str(), a.0 .1.as_str()).cmp(&(b.0 .0.as_str(), b.0 .1.as_str()))
    });

    let mut out = String::new();
    for ((nonterminal, lookahead), productions) in cells {
        let rendered: Vec<String> = productions.iter().map(Production::to_string).collect();
        let _ = writeln!(out, "M[{nonterminal}, {lookahead}] = {}", rendered.join(" / "));
    }
    out
}

/// Renders the LL(1) conflicts, if any.
pub fn format_ll1_conflicts(conflicts: &[ll1::Conflict]) -> String {
    let mut out = String::new();
    for conflict in conflicts {
        let rendered: Vec<String> = conflict.productions.iter().map(Production::to_string).collect();
        let _ = writeln!(
            out,
            "conflict at M[{}, {}]: {}",
            conflict.nonterminal,
            conflict.lookahead,
            rendered.join(" vs. ")
        );
    }
    out
}

/// Renders every state's kernel items, and its nonkernel (closure-only)
/// items under a `(Nonkernel)` heading, matching the source's
/// `str_kernels`.
pub fn format_lr_states(automaton: &Automaton) -> String {
    let mut out = String::new();
    for (idx, state) in automaton.states.iter().enumerate() {
        let _ = writeln!(out, "I{idx}:");
        for item in &state.kernel {
            let _ = writeln!(out, "  {item}");
        }
        let nonkernel: Vec<_> = state.nonkernel().collect();
        if !nonkernel.is_empty() {
            let _ = writeln!(out, "  (Nonkernel)");
            for item in nonkernel {
                let _ = writeln!(out, "  {item}");
            }
        }
    }
    out
}

/// Renders every state's outgoing transitions, in the order they were
/// first discovered.
pub fn format_lr_transitions(automaton: &Automaton) -> String {
    let mut out = String::new();
    for (state_idx, transition) in automaton.transitions.iter().enumerate() {
        for (symbol, dest) in transition {
            let _ = writeln!(out, "I{state_idx} --{symbol}--> I{dest}");
        }
    }
    out
}

/// Renders the LR action/goto table, one line per populated cell.
pub fn format_lr_table(automaton: &Automaton, table: &LrTable, grammar: &Grammar) -> String {
    let mut out = String::new();
    let mut terminals: Vec<Symbol> = grammar.terminals().iter().cloned().collect();
    terminals.push(Symbol::end_marker());
    terminals.sort_by_key(|s| s.as_str().to_string());

    let mut nonterminals: Vec<&Symbol> = grammar.nonterminals().collect();
    nonterminals.sort_by_key(|s| s.as_str().to_string());

    for state in 0..automaton.states.len() {
        for terminal in &terminals {
            for action in table.actions(state, terminal) {
                let rendered = match action {
                    Action::Shift(dest) => format!("shift I{dest}"),
                    Action::Reduce(production) => format!("reduce {production}"),
                    Action::Accept => "accept".to_string(),
                };
                let _ = writeln!(out, "action[I{state}, {terminal}] = {rendered}");
            }
        }
        for nonterminal in &nonterminals {
            if let Some(dest) = table.goto(state, nonterminal) {
                let _ = writeln!(out, "goto[I{state}, {nonterminal}] = I{dest}");
            }
        }
    }
    out
}

/// Renders LR table conflicts, if any.
pub fn format_lr_conflicts(conflicts: &[TableConflict]) -> String {
    let mut out = String::new();
    for conflict in conflicts {
        let rendered: Vec<String> = conflict
            .actions
            .iter()
            .map(|a| match a {
                Action::Shift(dest) => format!("shift I{dest}"),
                Action::Reduce(production) => format!("reduce {production}"),
                Action::Accept => "accept".to_string(),
            })
            .collect();
        let _ = writeln!(
            out,
            "conflict at [I{}, {}]: {}",
            conflict.state,
            conflict.symbol,
            rendered.join(" vs. ")
        );
    }
    out
}
