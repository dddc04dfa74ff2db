//! DOT graph export for an LR automaton, grounded in the source's
//! `dump_dfa`: one record-shaped node per state (kernel items, then a
//! divider, then nonkernel items), one labeled edge per transition.

use crate::lr::Automaton;
use std::fmt::Write as _;

/// Renders `automaton` as a Graphviz `digraph`, ready to be piped to `dot`.
pub fn render(automaton: &Automaton) -> String {
    let mut out = String::new();
    out.push_str("digraph {\n  rankdir = \"LR\";\n");

    for (idx, state) in automaton.states.iter().enumerate() {
        let _ = writeln!(out, "  \"node{idx}\" [");
        out.push_str("    shape = \"record\"\n");

        let mut label = format!("I{idx}\\n|");
        let kernel_lines: Vec<String> = state.kernel.iter().map(|item| escape(&item.to_string())).collect();
        label.push_str(&kernel_lines.join("\\l"));
        label.push_str("\\l");

        let nonkernel_lines: Vec<String> =
            state.nonkernel().map(|item| escape(&item.to_string())).collect();
        if !nonkernel_lines.is_empty() {
            label.push('|');
            label.push_str(&nonkernel_lines.join("\\l"));
            label.push_str("\\l");
        }

        let _ = writeln!(out, "    label = \"{label}\"");
        out.push_str("  ];\n");
    }
    out.push_str("\n\n");

    for (src, transition) in automaton.transitions.iter().enumerate() {
        for (symbol, dest) in transition {
            let _ = writeln!(out, "  \"node{src}\" -> \"node{dest}\" [label=\"{}\"]", escape(&symbol.to_string()));
        }
    }
    out.push('}');
    out
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('|', "\\|")
        .replace('<', "\\<")
        .replace('>', "\\>")
}
