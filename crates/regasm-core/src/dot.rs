//! Graphviz export.

use std::fmt::Write;

use crate::automaton::{Automaton, Symbol};

impl Automaton {
    /// Renders the automaton as a Graphviz `digraph` named `name`.
    ///
    /// Accept states are drawn with a double outline; a point-shaped vertex
    /// points at the entry. Epsilon edges are labelled `ε`.
    pub fn to_dot(&self, name: &str) -> String {
        let mut out = String::new();
        // Writing into a String never fails.
        let _ = self.write_dot(&mut out, name);
        out
    }

    fn write_dot(&self, out: &mut String, name: &str) -> std::fmt::Result {
        writeln!(out, "digraph \"{}\" {{", escape(name))?;
        writeln!(out, "  rankdir=LR;")?;

        for id in self.state_ids() {
            let state = self.state(id);
            let shape = if state.is_accept() { "doublecircle" } else { "circle" };
            writeln!(
                out,
                "  {} [label=\"{}\", shape={}];",
                id.0,
                escape(state.name().unwrap_or_default()),
                shape
            )?;
        }

        if let Some(entry) = self.entry() {
            writeln!(out, "  entry [label=\"\", shape=point];")?;
            writeln!(out, "  entry -> {};", entry.0)?;
        }

        for t in self.transitions() {
            let label = match t.symbol {
                Some(c) => escape(&symbol_text(c)),
                None => "ε".to_string(),
            };
            writeln!(out, "  {} -> {} [label=\"{}\"];", t.from.0, t.to.0, label)?;
        }

        writeln!(out, "}}")
    }
}

fn symbol_text(c: Symbol) -> String {
    if c.is_ascii_graphic() || c == b' ' {
        (c as char).to_string()
    } else {
        format!("\\x{c:02x}")
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}
