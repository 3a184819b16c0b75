//! Diagnostic dumps.
//!
//! Everything here renders construction artifacts to plain strings:
//! FIRST/FOLLOW listings, the numbered canonical collection with its
//! transition edges, the ACTION/GOTO grid (`sN`, `rN`, `acc`, blank), and
//! the conflict list. No I/O — the embedding application decides where
//! the text goes.

use std::fmt::Write;

use crate::analysis::FirstFollow;
use crate::automaton::{Automaton, Item};
use crate::grammar::Grammar;
use crate::intern::Symbol;
use crate::table::{Action, Conflict, ConflictKind, ParseTables};

/// Render `[A → α • β, a]`.
#[must_use]
pub fn render_item(grammar: &Grammar, item: &Item) -> String {
    let production = grammar.production(item.production());
    let mut out = format!("[{} →", grammar.resolve(production.lhs()));
    for (i, sym) in production.rhs().iter().enumerate() {
        if i == item.dot() {
            out.push_str(" •");
        }
        out.push(' ');
        out.push_str(grammar.resolve(*sym));
    }
    if item.dot() == production.rhs().len() {
        out.push_str(" •");
    }
    out.push_str(", ");
    out.push_str(grammar.resolve(item.lookahead()));
    out.push(']');
    out
}

/// FIRST and FOLLOW listings, symbols sorted by name.
#[must_use]
pub fn dump_sets(grammar: &Grammar, sets: &FirstFollow) -> String {
    let mut out = String::from("FIRST sets\n");
    for sym in grammar.sorted_nonterminals() {
        let _ = writeln!(
            out,
            "  FIRST({}) = {{ {} }}",
            grammar.resolve(sym),
            sorted_names(grammar, sets.first(sym).iter().copied())
        );
    }
    out.push_str("FOLLOW sets\n");
    for sym in grammar.sorted_nonterminals() {
        let _ = writeln!(
            out,
            "  FOLLOW({}) = {{ {} }}",
            grammar.resolve(sym),
            sorted_names(grammar, sets.follow(sym).iter().copied())
        );
    }
    out
}

/// The numbered canonical collection plus its transition edges.
#[must_use]
pub fn dump_states(grammar: &Grammar, automaton: &Automaton) -> String {
    let mut out = String::new();
    for (i, state) in automaton.states().iter().enumerate() {
        let _ = writeln!(out, "I{i}:");
        for item in state.iter() {
            let _ = writeln!(out, "  {}", render_item(grammar, item));
        }
    }

    let mut edges: Vec<((usize, Symbol), usize)> = automaton.transitions().collect();
    edges.sort_unstable_by(|((s1, x1), _), ((s2, x2), _)| {
        (s1, grammar.resolve(*x1)).cmp(&(s2, grammar.resolve(*x2)))
    });
    out.push_str("transitions:\n");
    for ((state, symbol), to) in edges {
        let _ = writeln!(out, "  ({state}, {}) → {to}", grammar.resolve(symbol));
    }
    out
}

/// The ACTION/GOTO grid: one row per state, one column per terminal then
/// per nonterminal; blank cells are errors.
#[must_use]
pub fn dump_tables(grammar: &Grammar, tables: &ParseTables) -> String {
    let terminals = grammar.sorted_terminals();
    let nonterminals: Vec<Symbol> = grammar
        .sorted_nonterminals()
        .into_iter()
        .filter(|s| *s != grammar.augmented_start())
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{:>6}", "state");
    for t in &terminals {
        let _ = write!(out, "{:>8}", grammar.resolve(*t));
    }
    for nt in &nonterminals {
        let _ = write!(out, "{:>8}", grammar.resolve(*nt));
    }
    out.push('\n');

    for state in 0..tables.num_states() {
        let _ = write!(out, "{state:>6}");
        for t in &terminals {
            let cell = tables
                .action(state, *t)
                .map_or(String::new(), render_action);
            let _ = write!(out, "{cell:>8}");
        }
        for nt in &nonterminals {
            let cell = tables
                .goto(state, *nt)
                .map_or(String::new(), |to| to.to_string());
            let _ = write!(out, "{cell:>8}");
        }
        out.push('\n');
    }
    out
}

/// One line per conflict: where, what kind, what survived, what did not.
#[must_use]
pub fn dump_conflicts(grammar: &Grammar, conflicts: &[Conflict]) -> String {
    if conflicts.is_empty() {
        return String::from("no conflicts\n");
    }
    let mut out = String::new();
    for c in conflicts {
        let kind = match c.kind {
            ConflictKind::ShiftReduce => "shift/reduce",
            ConflictKind::ReduceReduce => "reduce/reduce",
        };
        let _ = writeln!(
            out,
            "state {} on '{}': {kind}, kept {}, discarded {}",
            c.state,
            grammar.resolve(c.symbol),
            render_action(c.kept),
            render_action(c.discarded),
        );
    }
    out
}

fn render_action(action: Action) -> String {
    match action {
        Action::Shift(to) => format!("s{to}"),
        Action::Reduce(id) => format!("r{id}"),
        Action::Accept => String::from("acc"),
    }
}

fn sorted_names<I>(grammar: &Grammar, symbols: I) -> String
where
    I: IntoIterator<Item = Symbol>,
{
    let mut names: Vec<&str> = symbols.into_iter().map(|s| grammar.resolve(s)).collect();
    names.sort_unstable();
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Lr1Parser;

    fn arithmetic() -> Lr1Parser {
        Lr1Parser::from_rules(
            [
                ("E", vec!["E", "+", "T"]),
                ("E", vec!["T"]),
                ("T", vec!["id"]),
            ],
            "E",
        )
        .unwrap()
    }

    #[test]
    fn item_rendering() {
        let parser = arithmetic();
        let g = parser.grammar();
        let item = Item::new(1, 1, g.eof());
        assert_eq!(render_item(g, &item), "[E → E • + T, $]");

        let done = Item::new(3, 1, g.lookup("+").unwrap());
        assert_eq!(render_item(g, &done), "[T → id •, +]");
    }

    #[test]
    fn sets_dump_mentions_every_nonterminal() {
        let parser = arithmetic();
        let dump = dump_sets(parser.grammar(), parser.first_follow());
        assert!(dump.contains("FIRST(E) = { id }"));
        assert!(dump.contains("FOLLOW(E) = { $, + }"));
        assert!(dump.contains("FIRST(E')"));
    }

    #[test]
    fn states_dump_numbers_from_zero() {
        let parser = arithmetic();
        let dump = dump_states(parser.grammar(), parser.automaton());
        assert!(dump.starts_with("I0:\n"));
        assert!(dump.contains("[E' → • E, $]"));
        assert!(dump.contains("transitions:"));
    }

    #[test]
    fn table_dump_renders_cells() {
        let parser = arithmetic();
        let dump = dump_tables(parser.grammar(), parser.tables());
        assert!(dump.contains("acc"));
        assert!(dump.contains("s"));
        assert!(dump.contains("r"));
    }

    #[test]
    fn conflict_dump_for_clean_grammar() {
        let parser = arithmetic();
        assert_eq!(
            dump_conflicts(parser.grammar(), parser.conflicts()),
            "no conflicts\n"
        );
    }
}
