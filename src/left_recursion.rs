//! Paull's algorithm for eliminating left recursion.
//!
//! Operates on a [`Grammar::deep_duplicate`] of its input, leaving the
//! original untouched (spec §4.4). Nonterminals are processed in a fixed
//! order captured before any rewriting begins (the grammar's declaration
//! order); within that order, indirect recursion through an
//! already-processed nonterminal is resolved first, then direct recursion
//! on the nonterminal itself.

use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;

/// Eliminates left recursion from `grammar`, returning a new grammar.
pub fn eliminate(grammar: &Grammar) -> Grammar {
    let mut working = grammar.deep_duplicate();
    let order: Vec<Symbol> = working.nonterminals().cloned().collect();

    for (elim_idx, elim) in order.iter().enumerate() {
        let elim_prods = working.productions_of(elim).to_vec();
        let indirect = eliminate_indirect(&working, &order[..elim_idx], elim, elim_prods);
        let direct = eliminate_direct(&mut working, elim, indirect);
        working.set_productions_of(elim.clone(), direct);
    }

    working
}

/// Rewrites any production of `elim` whose first body symbol is an
/// earlier-processed nonterminal `chk`, substituting in each of `chk`'s
/// (already recursion-free) alternatives. Productions not headed by an
/// earlier nonterminal pass through unchanged (spec §4.4a).
fn eliminate_indirect(
    grammar: &Grammar,
    earlier: &[Symbol],
    elim: &Symbol,
    elim_prods: Vec<Production>,
) -> Vec<Production> {
    let mut replaced = vec![false; elim_prods.len()];
    let mut rewritten = Vec::new();

    for chk in earlier {
        let chk_prods = grammar.productions_of(chk).to_vec();
        for (idx, prod) in elim_prods.iter().enumerate() {
            if prod.body.first() != Some(chk) {
                continue;
            }
            let rest = &prod.body[1..];
            for chk_prod in &chk_prods {
                let mut new_body = chk_prod.body.clone();
                new_body.extend_from_slice(rest);
                rewritten.push(Production::new(elim.clone(), new_body));
            }
            replaced[idx] = true;
        }
    }

    for (idx, prod) in elim_prods.into_iter().enumerate() {
        if !replaced[idx] {
            rewritten.push(prod);
        }
    }
    rewritten
}

/// Splits `elim`'s (already indirect-free) productions into those directly
/// left-recursive on `elim` and those that are not; if there is no direct
/// recursion, returns the productions unchanged. Otherwise mints a fresh
/// nonterminal `elim'` carrying the recursive tail as right recursion, and
/// rewrites `elim`'s own productions to append `elim'`.
fn eliminate_direct(
    grammar: &mut Grammar,
    elim: &Symbol,
    elim_prods: Vec<Production>,
) -> Vec<Production> {
    let (recursive, nonrecursive): (Vec<_>, Vec<_>) = elim_prods
        .into_iter()
        .partition(|p| p.body.first() == Some(elim));

    if recursive.is_empty() {
        return nonrecursive;
    }

    let fresh = grammar.fresh_nonterminal(elim);

    for recur in &recursive {
        let mut body: Vec<Symbol> = recur.body[1..].to_vec();
        body.push(fresh.clone());
        grammar.add_production(fresh.clone(), body);
    }
    grammar.add_production(fresh.clone(), vec![Symbol::epsilon()]);

    nonrecursive
        .into_iter()
        .map(|prod| {
            let mut body = prod.body.clone();
            body.push(fresh.clone());
            Production::new(elim.clone(), body)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::collections::HashSet;

    fn sym(s: &str) -> Symbol {
        Symbol::new(s)
    }

    #[test]
    fn eliminates_direct_left_recursion() {
        // E -> E + T | T
        let terminals: HashSet<Symbol> = ["+"].iter().map(|s| sym(s)).collect();
        let mut g = Grammar::new(sym("E"), terminals, IndexMap::new());
        g.add_production(sym("E"), vec![sym("E"), sym("+"), sym("T")]);
        g.add_production(sym("E"), vec![sym("T")]);
        g.add_production(sym("T"), vec![sym("id")]);

        let eliminated = eliminate(&g);

        let e_prods = eliminated.productions_of(&sym("E"));
        assert_eq!(e_prods.len(), 1);
        assert_eq!(e_prods[0].body, vec![sym("T"), sym("E'")]);

        let ep_prods = eliminated.productions_of(&sym("E'"));
        assert_eq!(ep_prods.len(), 2);
        assert_eq!(ep_prods[0].body, vec![sym("+"), sym("T"), sym("E'")]);
        assert!(ep_prods[1].is_epsilon());

        // Original grammar is untouched.
        assert_eq!(g.productions_of(&sym("E")).len(), 2);
    }

    #[test]
    fn eliminates_indirect_left_recursion() {
        // S -> X a | b
        // X -> X c | S d | @
        let terminals: HashSet<Symbol> = ["a", "b", "c", "d"].iter().map(|s| sym(s)).collect();
        let mut g = Grammar::new(sym("S"), terminals, IndexMap::new());
        g.add_production(sym("S"), vec![sym("X"), sym("a")]);
        g.add_production(sym("S"), vec![sym("b")]);
        g.add_production(sym("X"), vec![sym("X"), sym("c")]);
        g.add_production(sym("X"), vec![sym("S"), sym("d")]);
        g.add_production(sym("X"), vec![Symbol::epsilon()]);

        let eliminated = eliminate(&g);

        // S's own productions are never left-recursive, so they survive as-is.
        assert_eq!(eliminated.productions_of(&sym("S")), g.productions_of(&sym("S")));

        // X had indirect recursion through S, then direct recursion on X
        // itself; it must now be right-recursive via a fresh X'.
        assert!(eliminated.is_nonterminal(&sym("X'")));
        for prod in eliminated.productions_of(&sym("X")) {
            assert_ne!(prod.body.first(), Some(&sym("X")));
        }
    }

    #[test]
    fn no_recursion_is_a_no_op() {
        let terminals: HashSet<Symbol> = ["a"].iter().map(|s| sym(s)).collect();
        let mut g = Grammar::new(sym("S"), terminals, IndexMap::new());
        g.add_production(sym("S"), vec![sym("a")]);

        let eliminated = eliminate(&g);
        assert_eq!(eliminated.productions_of(&sym("S")), g.productions_of(&sym("S")));
    }
}
