//! LR(0)/SLR(1)/LR(1)/LALR(1) item automata, action tables, and the LR
//! parse driver (spec §4.5-4.7, §4.9).

pub mod automaton;
pub mod driver;
pub mod item;
pub mod table;
pub mod variant;

pub use automaton::{augment, build as build_automaton, merge_lalr, Automaton, State};
pub use item::Item;
pub use table::{build_table, Action, Conflict as TableConflict, Table};
pub use variant::LrVariant;
