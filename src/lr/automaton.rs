//! Construction of the LR canonical collection: augmentation, closure,
//! goto, and the kernel/closure/transition tables shared by every variant.

use super::item::Item;
use super::variant::LrVariant;
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::rc::Rc;

/// The spelling of the synthetic augmented start nonterminal, `!S → S`.
pub const AUGMENTED_START: &str = "!S";

/// One state of the automaton: its kernel items and their closure.
#[derive(Debug, Clone)]
pub struct State {
    pub kernel: BTreeSet<Item>,
    pub closure: BTreeSet<Item>,
}

impl State {
    /// Items present in the closure but not the kernel — what a DOT
    /// export or pretty-printer shows as the state's "nonkernel" part.
    pub fn nonkernel(&self) -> impl Iterator<Item = &Item> {
        self.closure.iter().filter(|item| !self.kernel.contains(item))
    }
}

/// The full canonical collection: states plus the transition function.
#[derive(Debug, Clone)]
pub struct Automaton {
    pub states: Vec<State>,
    /// `transitions[state][symbol] = destination state`, insertion-ordered
    /// by first discovery within that state's closure.
    pub transitions: Vec<IndexMap<Symbol, usize>>,
    /// The augmented grammar's unique start production, `!S → S`.
    pub start_production: Rc<Production>,
}

/// Builds `!S → S` over a duplicate of `grammar`, making `!S` the new
/// start symbol (spec §4.5).
pub fn augment(grammar: &Grammar) -> Grammar {
    let mut augmented = grammar.deep_duplicate();
    let new_start = Symbol::new(AUGMENTED_START);
    augmented.add_production(new_start.clone(), vec![grammar.start().clone()]);
    augmented.set_start(new_start);
    augmented
}

/// Closes a kernel item set under nonterminal expansion: whenever an
/// item's next symbol is a nonterminal, every one of that nonterminal's
/// productions is added (seeded via `variant`) unless already present.
pub fn closure(grammar: &Grammar, variant: &LrVariant, seeds: BTreeSet<Item>) -> BTreeSet<Item> {
    let mut result: BTreeSet<Item> = BTreeSet::new();
    let mut worklist: Vec<Item> = seeds.into_iter().collect();

    while let Some(item) = worklist.pop() {
        if !result.insert(item.clone()) {
            continue;
        }
        if let Some(next) = item.next_symbol() {
            if grammar.is_nonterminal(next) {
                for production in grammar.productions_of(next) {
                    let new_item = variant.seed(Rc::new(production.clone()), Some(&item));
                    if !result.contains(&new_item) {
                        worklist.push(new_item);
                    }
                }
            }
        }
    }
    result
}

/// The kernel reached from `closure_items` on `symbol`: every item whose
/// next symbol is `symbol`, advanced one position.
fn goto(closure_items: &BTreeSet<Item>, symbol: &Symbol) -> BTreeSet<Item> {
    closure_items
        .iter()
        .filter(|item| item.next_symbol() == Some(symbol))
        .map(Item::advanced)
        .collect()
}

/// Builds the canonical collection for `grammar` (already augmented) under
/// `variant`.
///
/// Kernels are registered in a plain `Vec` and looked up by linear scan,
/// so the first kernel set ever produced for a given item set keeps its
/// state index for the life of the run — "first occurrence wins" (spec
/// §9, open question 3). Symbol transitions out of a state are discovered
/// in the sorted order `Item`'s `Ord` imposes on that state's closure,
/// which is fully determined by the grammar and variant rather than by
/// any hashing artifact.
pub fn build(grammar: &Grammar, variant: &LrVariant) -> Automaton {
    let start_production = Rc::new(grammar.start_productions()[0].clone());
    let seed = variant.seed(start_production.clone(), None);

    let mut kernels: Vec<BTreeSet<Item>> = vec![BTreeSet::from([seed])];
    let mut closures: Vec<BTreeSet<Item>> = Vec::new();
    let mut transitions: Vec<IndexMap<Symbol, usize>> = Vec::new();

    let mut state_idx = 0;
    while state_idx < kernels.len() {
        let closure_items = closure(grammar, variant, kernels[state_idx].clone());

        let mut transition: IndexMap<Symbol, usize> = IndexMap::new();
        for item in &closure_items {
            let Some(next) = item.next_symbol() else {
                continue;
            };
            if transition.contains_key(next) {
                continue;
            }
            let dest_kernel = goto(&closure_items, next);
            let dest_idx = match kernels.iter().position(|k| k == &dest_kernel) {
                Some(idx) => idx,
                None => {
                    kernels.push(dest_kernel);
                    kernels.len() - 1
                }
            };
            transition.insert(next.clone(), dest_idx);
        }

        closures.push(closure_items);
        transitions.push(transition);
        state_idx += 1;
    }

    let states = kernels
        .into_iter()
        .zip(closures)
        .map(|(kernel, closure)| State { kernel, closure })
        .collect();

    Automaton {
        states,
        transitions,
        start_production,
    }
}

/// Merges canonical LR(1) states that share an LR(0) core (same
/// productions and dot positions, ignoring lookahead), unioning their
/// lookaheads — turning a canonical LR(1) collection into an LALR(1) one
/// (spec §4.9 / REDESIGN FLAGS).
pub fn merge_lalr(automaton: Automaton) -> Automaton {
    fn core(items: &BTreeSet<Item>) -> BTreeSet<(Rc<Production>, usize)> {
        items.iter().map(|item| (item.production.clone(), item.dot)).collect()
    }

    let mut group_of: Vec<usize> = Vec::with_capacity(automaton.states.len());
    let mut cores: Vec<BTreeSet<(Rc<Production>, usize)>> = Vec::new();

    for state in &automaton.states {
        let state_core = core(&state.kernel);
        let group = cores.iter().position(|c| c == &state_core).unwrap_or_else(|| {
            cores.push(state_core);
            cores.len() - 1
        });
        group_of.push(group);
    }

    let mut merged_kernels: Vec<BTreeSet<Item>> = vec![BTreeSet::new(); cores.len()];
    let mut merged_closures: Vec<BTreeSet<Item>> = vec![BTreeSet::new(); cores.len()];

    for (state_idx, state) in automaton.states.iter().enumerate() {
        let group = group_of[state_idx];
        merge_item_set(&mut merged_kernels[group], &state.kernel);
        merge_item_set(&mut merged_closures[group], &state.closure);
    }

    let mut merged_transitions: Vec<IndexMap<Symbol, usize>> = vec![IndexMap::new(); cores.len()];
    for (state_idx, transition) in automaton.transitions.iter().enumerate() {
        let group = group_of[state_idx];
        for (symbol, dest) in transition {
            merged_transitions[group]
                .entry(symbol.clone())
                .or_insert(group_of[*dest]);
        }
    }

    let states = merged_kernels
        .into_iter()
        .zip(merged_closures)
        .map(|(kernel, closure)| State { kernel, closure })
        .collect();

    Automaton {
        states,
        transitions: merged_transitions,
        start_production: automaton.start_production,
    }
}

/// Unions `incoming` into `target`, merging lookaheads of items that share
/// a core (production, dot) but differ only in lookahead.
fn merge_item_set(target: &mut BTreeSet<Item>, incoming: &BTreeSet<Item>) {
    for item in incoming {
        if let Some(existing) = target
            .iter()
            .find(|candidate| {
                candidate.production == item.production && candidate.dot == item.dot
            })
            .cloned()
        {
            if existing.lookahead != item.lookahead {
                target.remove(&existing);
                let mut lookahead = existing.lookahead.unwrap_or_default();
                lookahead.extend(item.lookahead.clone().unwrap_or_default());
                target.insert(Item::new(existing.production, existing.dot, Some(lookahead)));
            }
        } else {
            target.insert(item.clone());
        }
    }
}
