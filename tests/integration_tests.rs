//! End-to-end tests exercising the full pipeline: BNF loading through
//! FIRST/FOLLOW, LL(1) and LR table construction, pretty-printing, and DOT
//! export, on the three canonical example grammars (SLR(1)-only,
//! LL(1)-and-SLR(1), and neither).

use cfg_toolkit::bnf;
use cfg_toolkit::dot;
use cfg_toolkit::first_follow::{compute_first_sets, compute_follow_sets};
use cfg_toolkit::ll1;
use cfg_toolkit::lr::{self, LrVariant};
use cfg_toolkit::print;

/// Example 1: an SLR(1)-only grammar (left recursive, so not LL(1)).
#[test]
fn example1_slr1_only_grammar() {
    let grammar = bnf::parse("S := S + T | T\nT := T * F | F\nF := ( S ) | i\n").unwrap();
    let first = compute_first_sets(&grammar);
    let follow = compute_follow_sets(&grammar, &first);

    let ll1_table = ll1::build_table(&grammar, &first, &follow);
    assert!(!ll1_table.conflicts().is_empty(), "grammar should not be LL(1)");

    let augmented = lr::augment(&grammar);
    let lr0_automaton = lr::build_automaton(&augmented, &LrVariant::Lr0);
    let slr1_variant = LrVariant::Slr1(&follow);
    let slr1_table = lr::build_table(&augmented, &lr0_automaton, &slr1_variant);
    assert!(slr1_table.conflicts().is_empty(), "grammar should be SLR(1)");

    assert!(lr::driver::parse(&slr1_table, "i + i", &mut lr::driver::NoTrace).is_ok());
    assert!(lr::driver::parse(&slr1_table, "( i )", &mut lr::driver::NoTrace).is_ok());
    assert!(lr::driver::parse(&slr1_table, "( i + i ) * i )", &mut lr::driver::NoTrace).is_err());
}

/// Example 2: a grammar that is both LL(1) and SLR(1).
#[test]
fn example2_both_ll1_and_slr1() {
    let grammar = bnf::parse("S := A B\nA := a A | d\nB := b B c | e\n").unwrap();
    let first = compute_first_sets(&grammar);
    let follow = compute_follow_sets(&grammar, &first);

    let ll1_table = ll1::build_table(&grammar, &first, &follow);
    assert!(ll1_table.conflicts().is_empty(), "grammar should be LL(1)");

    let augmented = lr::augment(&grammar);
    let lr0_automaton = lr::build_automaton(&augmented, &LrVariant::Lr0);
    let slr1_variant = LrVariant::Slr1(&follow);
    let slr1_table = lr::build_table(&augmented, &lr0_automaton, &slr1_variant);
    assert!(slr1_table.conflicts().is_empty(), "grammar should be SLR(1)");

    assert!(ll1::parse(&grammar, &ll1_table, "d e", &mut ll1::NoTrace).is_ok());
    assert!(ll1::parse(&grammar, &ll1_table, "a d b e c", &mut ll1::NoTrace).is_ok());
    assert!(ll1::parse(&grammar, &ll1_table, "a", &mut ll1::NoTrace).is_err());

    assert!(lr::driver::parse(&slr1_table, "d e", &mut lr::driver::NoTrace).is_ok());
    assert!(lr::driver::parse(&slr1_table, "a d b e c", &mut lr::driver::NoTrace).is_ok());
}

/// Example 3: the classic dangling-else ambiguity — neither LL(1) (common
/// `i` prefix) nor SLR(1) (shift-reduce conflict on `e`).
#[test]
fn example3_neither_ll1_nor_slr1() {
    let grammar = bnf::parse("S := i S t S e S | i S t S | a\n").unwrap();
    let first = compute_first_sets(&grammar);
    let follow = compute_follow_sets(&grammar, &first);

    let ll1_table = ll1::build_table(&grammar, &first, &follow);
    assert!(!ll1_table.conflicts().is_empty());

    let augmented = lr::augment(&grammar);
    let lr0_automaton = lr::build_automaton(&augmented, &LrVariant::Lr0);
    let slr1_variant = LrVariant::Slr1(&follow);
    let slr1_table = lr::build_table(&augmented, &lr0_automaton, &slr1_variant);
    assert!(!slr1_table.conflicts().is_empty());
}

#[test]
fn pretty_printers_cover_every_populated_cell() {
    let grammar = bnf::parse("S := A B\nA := a A | d\nB := b B c | e\n").unwrap();
    let first = compute_first_sets(&grammar);
    let follow = compute_follow_sets(&grammar, &first);
    let ll1_table = ll1::build_table(&grammar, &first, &follow);

    let rendered = print::format_ll1_table(&ll1_table);
    assert_eq!(rendered.lines().count(), ll1_table.cells().count());

    let first_text = print::format_first_sets(&grammar, &first);
    assert!(first_text.contains("FIRST(S)"));
    let follow_text = print::format_follow_sets(&grammar, &follow);
    assert!(follow_text.contains("FOLLOW(S)"));
}

#[test]
fn dot_export_contains_every_state_and_every_transition() {
    let grammar = bnf::parse("S := S + T | T\nT := i\n").unwrap();
    let augmented = lr::augment(&grammar);
    let first = compute_first_sets(&augmented);
    let variant = LrVariant::Lr1(&first);
    let automaton = lr::build_automaton(&augmented, &variant);

    let rendered = dot::render(&automaton);
    for idx in 0..automaton.states.len() {
        assert!(rendered.contains(&format!("\"node{idx}\"")));
    }
    let edge_count: usize = automaton.transitions.iter().map(|t| t.len()).sum();
    assert_eq!(rendered.matches("->").count(), edge_count);
}

#[test]
fn bnf_loader_and_grammar_printer_round_trip_terminal_classification() {
    let source = "S := if E then S else S | x\nE := x\n";
    let grammar = bnf::parse(source).unwrap();
    let rendered = print::format_grammar(&grammar);
    assert!(rendered.contains("if"));
    assert!(rendered.contains("then"));
    assert!(rendered.contains("else"));
    assert!(!grammar.is_terminal(&cfg_toolkit::Symbol::new("S")));
    assert!(grammar.is_terminal(&cfg_toolkit::Symbol::new("if")));
}
