//! The `LrVariant` enum parameterizing closure-seeding and reduce-terminal
//! selection across LR0, SLR1, LR1, and LALR1.
//!
//! This replaces the "dynamic strategy object" the original implementation
//! used (a class hierarchy selected at runtime) with a plain enum matched
//! at the two points that actually differ between variants: how a new item
//! is seeded when a closure expands a nonterminal, and which terminals a
//! completed item reduces on.

use super::item::Item;
use crate::first_follow::{first_of_string, FirstSets, FollowSets};
use crate::grammar::Production;
use crate::symbol::Symbol;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Which LR table-construction strategy to use.
#[derive(Debug, Clone, Copy)]
pub enum LrVariant<'a> {
    /// No lookahead at all: table reduces on every terminal (and `$`).
    Lr0,
    /// Reduces on `FOLLOW(head)`.
    Slr1(&'a FollowSets),
    /// Reduces on the item's own tracked lookahead set (canonical LR(1)).
    Lr1(&'a FirstSets),
    /// Canonical LR(1) item tracking, merged by core after construction.
    Lalr1(&'a FirstSets),
}

impl<'a> LrVariant<'a> {
    /// Whether items of this variant carry a `lookahead` set.
    pub fn tracks_lookahead(&self) -> bool {
        matches!(self, LrVariant::Lr1(_) | LrVariant::Lalr1(_))
    }

    /// Builds the item a closure step adds for `production`, given the
    /// item whose nonterminal expansion produced it (`None` for the
    /// initial kernel item of the whole automaton).
    pub fn seed(&self, production: Rc<Production>, parent: Option<&Item>) -> Item {
        match self {
            LrVariant::Lr0 | LrVariant::Slr1(_) => Item::new(production, 0, None),
            LrVariant::Lr1(first_sets) | LrVariant::Lalr1(first_sets) => {
                let lookahead = match parent {
                    None => BTreeSet::from([Symbol::end_marker()]),
                    Some(parent_item) => {
                        let rest = &parent_item.symbols_after_dot()[1..];
                        let mut first_rest = first_of_string(first_sets, rest);
                        let nullable = first_rest.remove(&Symbol::epsilon());
                        let mut result: BTreeSet<Symbol> = first_rest.into_iter().collect();
                        if nullable {
                            if let Some(parent_lookahead) = &parent_item.lookahead {
                                result.extend(parent_lookahead.iter().cloned());
                            }
                        }
                        result
                    }
                };
                Item::new(production, 0, Some(lookahead))
            }
        }
    }

    /// The terminals (and possibly `$`) on which a completed `item`
    /// reduces. `all_terminals` must already include `$` when this is
    /// called for [`LrVariant::Lr0`].
    pub fn reduce_terminals(&self, item: &Item, all_terminals: &BTreeSet<Symbol>) -> BTreeSet<Symbol> {
        match self {
            LrVariant::Lr0 => all_terminals.clone(),
            LrVariant::Slr1(follow_sets) => follow_sets
                .get(&item.production.head)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .collect(),
            LrVariant::Lr1(_) | LrVariant::Lalr1(_) => {
                item.lookahead.clone().unwrap_or_default()
            }
        }
    }
}
