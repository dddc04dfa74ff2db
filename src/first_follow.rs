//! FIRST and FOLLOW set computation for context-free grammars.
//!
//! Implements the fixed-point algorithms from Aho et al., "Compilers:
//! Principles, Techniques, and Tools" (2nd Edition), section 4.4.

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// Maps each terminal and nonterminal to its FIRST set.
pub type FirstSets = HashMap<Symbol, HashSet<Symbol>>;

/// Maps each nonterminal to its FOLLOW set.
pub type FollowSets = HashMap<Symbol, HashSet<Symbol>>;

/// Computes the FIRST sets for every terminal and nonterminal in `grammar`.
///
/// Terminals and `@` are seeded with FIRST(x) = {x}; nonterminals start
/// empty and grow by fixed-point iteration over every production.
pub fn compute_first_sets(grammar: &Grammar) -> FirstSets {
    let mut first_sets: FirstSets = HashMap::new();

    for terminal in grammar.terminals() {
        first_sets.insert(terminal.clone(), HashSet::from([terminal.clone()]));
    }
    first_sets.insert(Symbol::epsilon(), HashSet::from([Symbol::epsilon()]));

    for nonterminal in grammar.nonterminals() {
        first_sets.entry(nonterminal.clone()).or_default();
    }

    let mut changed = true;
    let mut rounds = 0;
    while changed {
        changed = false;
        rounds += 1;

        for production in grammar.all_productions() {
            let head = production.head.clone();
            let current = first_sets.entry(head.clone()).or_default().clone();

            let body_first = first_of_string(&first_sets, &production.body);
            let merged: HashSet<Symbol> = current.union(&body_first).cloned().collect();

            if merged.len() != current.len() {
                first_sets.insert(head, merged);
                changed = true;
            }
        }
    }
    log::debug!("FIRST sets converged after {rounds} round(s)");

    first_sets
}

/// Computes FIRST(α) for an arbitrary symbol sequence, given already-computed
/// per-symbol FIRST sets.
///
/// - Unions `FIRST(Xᵢ) - {@}` for each leading `Xᵢ` while every prior symbol
///   can derive `@`.
/// - Adds `@` to the result only if every symbol in the sequence can derive
///   `@` (vacuously true for the empty sequence).
pub fn first_of_string(first_sets: &FirstSets, symbols: &[Symbol]) -> HashSet<Symbol> {
    let mut result = HashSet::new();
    let mut all_nullable = true;

    for symbol in symbols {
        let first_sym = first_sets.get(symbol).cloned().unwrap_or_default();
        result.extend(first_sym.iter().filter(|s| !s.is_epsilon()).cloned());

        if !first_sym.contains(&Symbol::epsilon()) {
            all_nullable = false;
            break;
        }
    }

    if all_nullable {
        result.insert(Symbol::epsilon());
    }

    result
}

/// Computes the FOLLOW sets for every nonterminal in `grammar`.
///
/// `FOLLOW(start)` is seeded with `$`; for each production `A → αBβ`,
/// `FIRST(β) - {@}` is added to `FOLLOW(B)`, and `FOLLOW(A)` is added to
/// `FOLLOW(B)` whenever `β` is empty or nullable.
pub fn compute_follow_sets(grammar: &Grammar, first_sets: &FirstSets) -> FollowSets {
    let mut follow_sets: FollowSets = HashMap::new();

    for nonterminal in grammar.nonterminals() {
        follow_sets.insert(nonterminal.clone(), HashSet::new());
    }
    follow_sets
        .entry(grammar.start().clone())
        .or_default()
        .insert(Symbol::end_marker());

    let mut changed = true;
    let mut rounds = 0;
    while changed {
        changed = false;
        rounds += 1;

        for production in grammar.all_productions() {
            let head = production.head.clone();
            let body = &production.body;

            for (i, symbol) in body.iter().enumerate() {
                if !grammar.is_nonterminal(symbol) {
                    continue;
                }

                let current = follow_sets.entry(symbol.clone()).or_default().clone();
                let mut merged = current.clone();

                let beta = &body[i + 1..];
                let beta_first = first_of_string(first_sets, beta);
                merged.extend(beta_first.iter().filter(|s| !s.is_epsilon()).cloned());

                if beta.is_empty() || beta_first.contains(&Symbol::epsilon()) {
                    let follow_head = follow_sets.entry(head.clone()).or_default().clone();
                    merged.extend(follow_head);
                }

                if merged.len() != current.len() {
                    follow_sets.insert(symbol.clone(), merged);
                    changed = true;
                }
            }
        }
    }
    log::debug!("FOLLOW sets converged after {rounds} round(s)");

    follow_sets
}
