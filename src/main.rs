//! Context-Free Grammar Parser
//!
//! FIRST/FOLLOW sets, LL(1) tables, left-recursion elimination, and
//! LR(0)/SLR(1)/LR(1) automata and tables, driven from the command line.
//!
//! # References
//! Aho, Alfred V. et al. "Compilers: Principles, Techniques, and Tools" (2nd Edition).
//! Addison-Wesley, 2006.

use clap::Parser;
use cfg_toolkit::cli::Cli;
use std::process;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = cfg_toolkit::cli::run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
