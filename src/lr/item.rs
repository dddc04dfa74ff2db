//! LR items, unified across the LR0/SLR1/LR1/LALR1 variants.
//!
//! A single `Item` type serves all four variants: `lookahead` is `None`
//! for LR0/SLR1 (which do not track per-item lookahead) and `Some(_)` for
//! LR1/LALR1. This lets one `closure`/`goto`/canonical-collection
//! implementation (see [`crate::lr::automaton`]) serve every variant,
//! parameterized only by [`crate::lr::variant::LrVariant`].

use crate::grammar::Production;
use crate::symbol::Symbol;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// A production with a dot position and (for lookahead-tracking variants)
/// a set of lookahead terminals.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub production: Rc<Production>,
    pub dot: usize,
    pub lookahead: Option<BTreeSet<Symbol>>,
}

impl Item {
    pub fn new(production: Rc<Production>, dot: usize, lookahead: Option<BTreeSet<Symbol>>) -> Self {
        Item {
            production,
            dot,
            lookahead,
        }
    }

    /// The body symbols strictly after the dot; always empty for an
    /// epsilon production regardless of `dot`.
    pub fn symbols_after_dot(&self) -> &[Symbol] {
        if self.production.is_epsilon() || self.dot >= self.production.body.len() {
            &[]
        } else {
            &self.production.body[self.dot..]
        }
    }

    /// The symbol immediately after the dot, if any.
    pub fn next_symbol(&self) -> Option<&Symbol> {
        self.symbols_after_dot().first()
    }

    /// Whether the dot has reached the end of the body (a reducible item).
    pub fn is_complete(&self) -> bool {
        self.symbols_after_dot().is_empty()
    }

    /// The item with the dot advanced past its next symbol.
    pub fn advanced(&self) -> Item {
        Item {
            production: self.production.clone(),
            dot: self.dot + 1,
            lookahead: self.lookahead.clone(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut body: Vec<String> = self.production.body.iter().map(Symbol::to_string).collect();
        let dot_at = if self.production.is_epsilon() {
            0
        } else {
            self.dot.min(body.len())
        };
        body.insert(dot_at, "·".to_string());
        write!(f, "{} → {}", self.production.head, body.join(" "))?;
        if let Some(lookahead) = &self.lookahead {
            let mut symbols: Vec<_> = lookahead.iter().map(Symbol::to_string).collect();
            symbols.sort();
            write!(f, ", {{{}}}", symbols.join("/"))?;
        }
        Ok(())
    }
}
