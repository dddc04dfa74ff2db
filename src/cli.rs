//! Command-line surface: reads a BNF file, computes whichever analysis
//! artifacts the flags ask for, and prints them.
//!
//! Each requested artifact is produced by a lazily-memoized accessor on
//! [`Artifacts`] — mirroring the source `cli.py`'s `get(key)` / `builder`
//! dict, where an artifact is computed at most once no matter how many
//! flags depend on it (e.g. both `--lr0-table` and `--slr1-table` reuse
//! the same LR(0) automaton).

use crate::error::Result;
use crate::first_follow::{compute_first_sets, compute_follow_sets, FirstSets, FollowSets};
use crate::grammar::Grammar;
use crate::left_recursion;
use crate::lr::{self, Automaton, LrVariant, Table as LrTable};
use crate::{bnf, dot, ll1, print, trace};
use clap::Parser;
use std::cell::OnceCell;
use std::fs;
use std::path::PathBuf;

/// Analyze and parse context-free grammars: FIRST/FOLLOW, LL(1), left-
/// recursion elimination, and LR(0)/SLR(1)/LR(1) tables and drivers.
#[derive(Parser, Debug)]
#[command(name = "cfg_toolkit", about)]
pub struct Cli {
    /// Path to the input grammar, written in the toolkit's BNF.
    pub bnf: PathBuf,

    /// Eliminate left recursion on the input grammar before analysis.
    #[arg(short = 'e', long = "left-elim")]
    pub left_elim: bool,
    /// Print the parsed grammar.
    #[arg(short = 'g', long = "grammar")]
    pub grammar: bool,
    /// Print the FIRST sets.
    #[arg(short = 'f', long = "first")]
    pub first: bool,
    /// Print the FOLLOW sets.
    #[arg(short = 'F', long = "follow")]
    pub follow: bool,

    /// Print the LL(1) table.
    #[arg(long = "ll1-table")]
    pub ll1_table: bool,
    /// Print LL(1) table conflicts.
    #[arg(long = "ll1-conflicts")]
    pub ll1_conflicts: bool,

    /// Print the augmented LR grammar.
    #[arg(long = "lr-arg-grammar")]
    pub lr_arg_grammar: bool,
    /// Print LR(0) states.
    #[arg(long = "lr0-states")]
    pub lr0_states: bool,
    /// Print LR(0) transitions.
    #[arg(long = "lr0-transitions")]
    pub lr0_transitions: bool,
    /// Print the LR(0) table.
    #[arg(long = "lr0-table")]
    pub lr0_table: bool,
    /// Print LR(0) table conflicts.
    #[arg(long = "lr0-conflicts")]
    pub lr0_conflicts: bool,
    /// Export the LR(0) automaton to a DOT file.
    #[arg(long = "lr0-dot")]
    pub lr0_dot: Option<PathBuf>,

    /// Print the SLR(1) table.
    #[arg(long = "slr1-table")]
    pub slr1_table: bool,
    /// Print SLR(1) table conflicts.
    #[arg(long = "slr1-conflicts")]
    pub slr1_conflicts: bool,
    /// Export the SLR(1) automaton (same states as LR(0)) to a DOT file.
    #[arg(long = "slr1-dot")]
    pub slr1_dot: Option<PathBuf>,

    /// Print LR(1) states.
    #[arg(long = "lr1-states")]
    pub lr1_states: bool,
    /// Print LR(1) transitions.
    #[arg(long = "lr1-transitions")]
    pub lr1_transitions: bool,
    /// Print the LR(1) table.
    #[arg(long = "lr1-table")]
    pub lr1_table: bool,
    /// Print LR(1) table conflicts.
    #[arg(long = "lr1-conflicts")]
    pub lr1_conflicts: bool,
    /// Export the LR(1) automaton to a DOT file.
    #[arg(long = "lr1-dot")]
    pub lr1_dot: Option<PathBuf>,

    /// Demonstrate LL(1) parsing of whitespace-separated tokens in FILE.
    #[arg(long = "parse-ll1", value_name = "FILE")]
    pub parse_ll1: Option<PathBuf>,
    /// Demonstrate LR(0) parsing of whitespace-separated tokens in FILE.
    #[arg(long = "parse-lr0", value_name = "FILE")]
    pub parse_lr0: Option<PathBuf>,
    /// Demonstrate SLR(1) parsing of whitespace-separated tokens in FILE.
    #[arg(long = "parse-slr1", value_name = "FILE")]
    pub parse_slr1: Option<PathBuf>,
    /// Demonstrate LR(1) parsing of whitespace-separated tokens in FILE.
    #[arg(long = "parse-lr1", value_name = "FILE")]
    pub parse_lr1: Option<PathBuf>,
}

/// Lazily-computed analysis artifacts, each built at most once.
struct Artifacts {
    grammar: Grammar,
    first: OnceCell<FirstSets>,
    follow: OnceCell<FollowSets>,
    ll1_table: OnceCell<ll1::Table>,
    lr_grammar: OnceCell<Grammar>,
    lr0_automaton: OnceCell<Automaton>,
    lr0_table: OnceCell<LrTable>,
    slr1_table: OnceCell<LrTable>,
    lr1_automaton: OnceCell<Automaton>,
    lr1_table: OnceCell<LrTable>,
}

impl Artifacts {
    fn new(grammar: Grammar) -> Self {
        Artifacts {
            grammar,
            first: OnceCell::new(),
            follow: OnceCell::new(),
            ll1_table: OnceCell::new(),
            lr_grammar: OnceCell::new(),
            lr0_automaton: OnceCell::new(),
            lr0_table: OnceCell::new(),
            slr1_table: OnceCell::new(),
            lr1_automaton: OnceCell::new(),
            lr1_table: OnceCell::new(),
        }
    }

    fn first(&self) -> &FirstSets {
        self.first.get_or_init(|| compute_first_sets(&self.grammar))
    }

    fn follow(&self) -> &FollowSets {
        self.follow
            .get_or_init(|| compute_follow_sets(&self.grammar, self.first()))
    }

    fn ll1_table(&self) -> &ll1::Table {
        self.ll1_table
            .get_or_init(|| ll1::build_table(&self.grammar, self.first(), self.follow()))
    }

    fn lr_grammar(&self) -> &Grammar {
        self.lr_grammar.get_or_init(|| lr::augment(&self.grammar))
    }

    fn lr0_automaton(&self) -> &Automaton {
        self.lr0_automaton
            .get_or_init(|| lr::build_automaton(self.lr_grammar(), &LrVariant::Lr0))
    }

    fn lr0_table(&self) -> &LrTable {
        self.lr0_table.get_or_init(|| {
            lr::build_table(self.lr_grammar(), self.lr0_automaton(), &LrVariant::Lr0)
        })
    }

    fn slr1_table(&self) -> &LrTable {
        self.slr1_table.get_or_init(|| {
            let variant = LrVariant::Slr1(self.follow());
            lr::build_table(self.lr_grammar(), self.lr0_automaton(), &variant)
        })
    }

    fn lr1_automaton(&self) -> &Automaton {
        self.lr1_automaton.get_or_init(|| {
            let variant = LrVariant::Lr1(self.first());
            lr::build_automaton(self.lr_grammar(), &variant)
        })
    }

    fn lr1_table(&self) -> &LrTable {
        self.lr1_table.get_or_init(|| {
            let variant = LrVariant::Lr1(self.first());
            lr::build_table(self.lr_grammar(), self.lr1_automaton(), &variant)
        })
    }
}

/// Entry point invoked by `main`.
pub fn run(cli: Cli) -> Result<()> {
    let source = fs::read_to_string(&cli.bnf)?;
    let mut grammar = bnf::parse(&source)?;
    if cli.left_elim {
        grammar = left_recursion::eliminate(&grammar);
    }
    if cli.grammar {
        print!("{}", print::format_grammar(&grammar));
    }

    let artifacts = Artifacts::new(grammar);

    process_ll(&cli, &artifacts);
    process_lr0_slr1(&cli, &artifacts)?;
    process_lr1(&cli, &artifacts)?;
    process_parse(&cli, &artifacts)?;

    Ok(())
}

fn process_ll(cli: &Cli, artifacts: &Artifacts) {
    if cli.first {
        print!("{}", print::format_first_sets(&artifacts.grammar, artifacts.first()));
    }
    if cli.follow {
        print!("{}", print::format_follow_sets(&artifacts.grammar, artifacts.follow()));
    }
    if cli.ll1_table {
        print!("{}", print::format_ll1_table(artifacts.ll1_table()));
    }
    if cli.ll1_conflicts {
        print!("{}", print::format_ll1_conflicts(&artifacts.ll1_table().conflicts()));
    }
}

fn process_lr0_slr1(cli: &Cli, artifacts: &Artifacts) -> Result<()> {
    if cli.lr_arg_grammar {
        print!("{}", print::format_grammar(artifacts.lr_grammar()));
    }
    if cli.lr0_states {
        print!("{}", print::format_lr_states(artifacts.lr0_automaton()));
    }
    if cli.lr0_transitions {
        print!("{}", print::format_lr_transitions(artifacts.lr0_automaton()));
    }
    if cli.lr0_table {
        print!(
            "{}",
            print::format_lr_table(artifacts.lr0_automaton(), artifacts.lr0_table(), artifacts.lr_grammar())
        );
    }
    if cli.lr0_conflicts {
        print!("{}", print::format_lr_conflicts(&artifacts.lr0_table().conflicts()));
    }
    if let Some(path) = &cli.lr0_dot {
        fs::write(path, dot::render(artifacts.lr0_automaton()))?;
    }
    if cli.slr1_table {
        print!(
            "{}",
            print::format_lr_table(artifacts.lr0_automaton(), artifacts.slr1_table(), artifacts.lr_grammar())
        );
    }
    if cli.slr1_conflicts {
        print!("{}", print::format_lr_conflicts(&artifacts.slr1_table().conflicts()));
    }
    if let Some(path) = &cli.slr1_dot {
        fs::write(path, dot::render(artifacts.lr0_automaton()))?;
    }
    Ok(())
}

fn process_lr1(cli: &Cli, artifacts: &Artifacts) -> Result<()> {
    if cli.lr1_states {
        print!("{}", print::format_lr_states(artifacts.lr1_automaton()));
    }
    if cli.lr1_transitions {
        print!("{}", print::format_lr_transitions(artifacts.lr1_automaton()));
    }
    if cli.lr1_table {
        print!(
            "{}",
            print::format_lr_table(artifacts.lr1_automaton(), artifacts.lr1_table(), artifacts.lr_grammar())
        );
    }
    if cli.lr1_conflicts {
        print!("{}", print::format_lr_conflicts(&artifacts.lr1_table().conflicts()));
    }
    if let Some(path) = &cli.lr1_dot {
        fs::write(path, dot::render(artifacts.lr1_automaton()))?;
    }
    Ok(())
}

fn process_parse(cli: &Cli, artifacts: &Artifacts) -> Result<()> {
    if let Some(path) = &cli.parse_ll1 {
        let input = fs::read_to_string(path)?;
        report_ll1_parse(&artifacts.grammar, artifacts.ll1_table(), &input);
    }
    if let Some(path) = &cli.parse_lr0 {
        let input = fs::read_to_string(path)?;
        report_lr_parse("LR(0)", artifacts.lr0_table(), &input);
    }
    if let Some(path) = &cli.parse_slr1 {
        let input = fs::read_to_string(path)?;
        report_lr_parse("SLR(1)", artifacts.slr1_table(), &input);
    }
    if let Some(path) = &cli.parse_lr1 {
        let input = fs::read_to_string(path)?;
        report_lr_parse("LR(1)", artifacts.lr1_table(), &input);
    }
    Ok(())
}

fn report_ll1_parse(grammar: &Grammar, table: &ll1::Table, input: &str) {
    let mut recorder = ll1::TraceRecorder::default();
    let outcome = ll1::parse(grammar, table, input, &mut recorder);
    print!("{}", trace::format_trace(recorder.rows()));
    match outcome {
        Ok(()) => println!("LL(1) parse of {input:?}: accept"),
        Err(e) => println!("LL(1) parse of {input:?}: reject ({e})"),
    }
}

fn report_lr_parse(label: &str, table: &LrTable, input: &str) {
    let mut recorder = lr::driver::TraceRecorder::default();
    let outcome = lr::driver::parse(table, input, &mut recorder);
    print!("{}", trace::format_trace(recorder.rows()));
    match outcome {
        Ok(()) => println!("{label} parse of {input:?}: accept"),
        Err(e) => println!("{label} parse of {input:?}: reject ({e})"),
    }
}
