//! LR action/goto table construction and conflict detection.

use super::automaton::{Automaton, AUGMENTED_START};
use super::variant::LrVariant;
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

/// One action an LR driver may take for a given `(state, terminal)` cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(Rc<Production>),
    Accept,
}

/// The action table (indexed by terminal, including `$`) and the goto
/// table (indexed by nonterminal).
#[derive(Debug, Default)]
pub struct Table {
    action: HashMap<(usize, Symbol), Vec<Action>>,
    goto: HashMap<(usize, Symbol), usize>,
}

impl Table {
    /// All actions for `(state, terminal)`; empty if the cell is unset.
    pub fn actions(&self, state: usize, terminal: &Symbol) -> &[Action] {
        self.action
            .get(&(state, terminal.clone()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn goto(&self, state: usize, nonterminal: &Symbol) -> Option<usize> {
        self.goto.get(&(state, nonterminal.clone())).copied()
    }

    /// Every cell with more than one action — shift/reduce or
    /// reduce/reduce conflicts, captured as data (spec §7).
    pub fn conflicts(&self) -> Vec<Conflict> {
        self.action
            .iter()
            .filter(|(_, actions)| actions.len() > 1)
            .map(|((state, symbol), actions)| Conflict {
                state: *state,
                symbol: symbol.clone(),
                actions: actions.clone(),
            })
            .collect()
    }

    fn add_action(&mut self, state: usize, symbol: Symbol, action: Action) {
        let cell = self.action.entry((state, symbol)).or_default();
        if !cell.contains(&action) {
            cell.push(action);
        }
    }
}

/// A conflicting action-table cell.
#[derive(Debug, Clone)]
pub struct Conflict {
    pub state: usize,
    pub symbol: Symbol,
    pub actions: Vec<Action>,
}

/// Builds the action/goto table for `automaton` over `grammar` (the
/// augmented grammar the automaton was built from) under `variant`.
pub fn build_table(grammar: &Grammar, automaton: &Automaton, variant: &LrVariant) -> Table {
    let mut table = Table::default();

    let mut all_terminals: BTreeSet<Symbol> = grammar.terminals().iter().cloned().collect();
    all_terminals.insert(Symbol::end_marker());

    for (state_idx, state) in automaton.states.iter().enumerate() {
        for item in &state.closure {
            if let Some(next) = item.next_symbol() {
                let Some(&dest) = automaton.transitions[state_idx].get(next) else {
                    continue;
                };
                if grammar.is_terminal(next) {
                    table.add_action(state_idx, next.clone(), Action::Shift(dest));
                } else {
                    table.goto.insert((state_idx, next.clone()), dest);
                }
                continue;
            }

            // Complete item: accept if it is `!S -> S ·`, otherwise reduce.
            if item.production.head.as_str() == AUGMENTED_START
                && item.production == automaton.start_production
            {
                table.add_action(state_idx, Symbol::end_marker(), Action::Accept);
                continue;
            }

            let reduce_terminals = variant.reduce_terminals(item, &all_terminals);
            for terminal in reduce_terminals {
                table.add_action(state_idx, terminal, Action::Reduce(item.production.clone()));
            }
        }
    }

    let conflicts = table.conflicts();
    if !conflicts.is_empty() {
        log::warn!("LR table has {} conflicting cell(s)", conflicts.len());
    }

    table
}
