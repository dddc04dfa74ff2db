//! Integration tests for LR(0)/SLR(1)/LR(1)/LALR(1) automaton and table
//! construction, and the shift-reduce driver.

use cfg_toolkit::bnf;
use cfg_toolkit::first_follow::{compute_first_sets, compute_follow_sets};
use cfg_toolkit::lr::{self, driver, LrVariant};

fn expr_grammar() -> cfg_toolkit::Grammar {
    bnf::parse("S := S + T | T\nT := T * F | F\nF := ( S ) | id\n").unwrap()
}

#[test]
fn slr1_accepts_and_rejects_expressions() {
    let grammar = expr_grammar();
    let augmented = lr::augment(&grammar);
    let follow = compute_follow_sets(&grammar, &compute_first_sets(&grammar));
    let automaton = lr::build_automaton(&augmented, &LrVariant::Lr0);
    let variant = LrVariant::Slr1(&follow);
    let table = lr::build_table(&augmented, &automaton, &variant);

    assert!(table.conflicts().is_empty());
    assert!(driver::parse(&table, "id + id", &mut driver::NoTrace).is_ok());
    assert!(driver::parse(&table, "( id + id ) * id", &mut driver::NoTrace).is_ok());
    assert!(driver::parse(&table, "( id + id", &mut driver::NoTrace).is_err());
}

#[test]
fn lr1_accepts_and_rejects_expressions() {
    let grammar = expr_grammar();
    let augmented = lr::augment(&grammar);
    let first = compute_first_sets(&augmented);
    let variant = LrVariant::Lr1(&first);
    let automaton = lr::build_automaton(&augmented, &variant);
    let table = lr::build_table(&augmented, &automaton, &variant);

    assert!(table.conflicts().is_empty());
    assert!(driver::parse(&table, "id * id + id", &mut driver::NoTrace).is_ok());
    assert!(driver::parse(&table, "id id", &mut driver::NoTrace).is_err());
}

#[test]
fn lr0_reduces_unconditionally_on_every_terminal() {
    // S -> a is the only production besides the augmented start, so its
    // reduce cell is populated for every terminal and the end marker, not
    // just the ones that could legally follow S.
    let grammar = bnf::parse("S := a\n").unwrap();
    let augmented = lr::augment(&grammar);
    let automaton = lr::build_automaton(&augmented, &LrVariant::Lr0);
    let table = lr::build_table(&augmented, &automaton, &LrVariant::Lr0);

    assert!(driver::parse(&table, "a", &mut driver::NoTrace).is_ok());
}

#[test]
fn lalr1_never_has_more_states_than_canonical_lr1() {
    let grammar = expr_grammar();
    let augmented = lr::augment(&grammar);
    let first = compute_first_sets(&augmented);
    let lr1_variant = LrVariant::Lr1(&first);
    let lr1_automaton = lr::build_automaton(&augmented, &lr1_variant);

    let lalr_variant = LrVariant::Lalr1(&first);
    let lalr_automaton = lr::build_automaton(&augmented, &lalr_variant);
    let merged = lr::merge_lalr(lalr_automaton);

    assert!(merged.states.len() <= lr1_automaton.states.len());
}

#[test]
fn reduce_reduce_conflict_is_detected_as_data_not_an_error() {
    // Ambiguous grammar: A and B both reduce to the same string under S.
    let grammar = bnf::parse("S := A a | B a\nA := c\nB := c\n").unwrap();
    let augmented = lr::augment(&grammar);
    let first = compute_first_sets(&augmented);
    let variant = LrVariant::Lr1(&first);
    let automaton = lr::build_automaton(&augmented, &variant);
    let table = lr::build_table(&augmented, &automaton, &variant);

    assert!(!table.conflicts().is_empty());
}

#[test]
fn accept_state_is_reached_exactly_once_per_successful_parse() {
    let grammar = bnf::parse("S := a\n").unwrap();
    let augmented = lr::augment(&grammar);
    let automaton = lr::build_automaton(&augmented, &LrVariant::Lr0);
    let table = lr::build_table(&augmented, &automaton, &LrVariant::Lr0);

    struct CountAccepts(usize);
    impl driver::Trace for CountAccepts {
        fn on_step(
            &mut self,
            action: &lr::Action,
            _state_stack: &[usize],
            _symbol_stack: &[cfg_toolkit::Symbol],
            _remaining: &[cfg_toolkit::Symbol],
        ) {
            if matches!(action, lr::Action::Accept) {
                self.0 += 1;
            }
        }
    }

    let mut trace = CountAccepts(0);
    driver::parse(&table, "a", &mut trace).unwrap();
    assert_eq!(trace.0, 1);
}
